use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::codes::{DocumentType, PeriodMonth, Periodicity};
use crate::error::FacturaError;

use super::types::{Item, RelatedCfdi};

/// Filters for listing CFDI documents.
///
/// Unset filters are omitted from the query string.
#[derive(Debug, Clone, Default)]
pub struct CfdiFilters {
    month: Option<u32>,
    year: Option<i32>,
    rfc: Option<String>,
    type_document: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
}

impl CfdiFilters {
    /// Start with no filters (first page, server defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by issue month, 1 (January) through 12 (December).
    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    /// Filter by four-digit issue year.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Filter by recipient RFC.
    pub fn rfc(mut self, rfc: impl Into<String>) -> Self {
        self.rfc = Some(rfc.into());
        self
    }

    /// Filter by document-type code (SAT catalog `Tipos de CFDI`).
    pub fn type_document(mut self, code: impl Into<String>) -> Self {
        self.type_document = Some(code.into());
        self
    }

    /// Request a specific result page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Render the query string pairs, zero-padding the month.
    pub(crate) fn query(&self) -> Result<Vec<(&'static str, String)>, FacturaError> {
        let mut query = Vec::new();
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(FacturaError::InvalidArgument(format!(
                    "month must be between 1 and 12, got {month}"
                )));
            }
            query.push(("month", format!("{month:02}")));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(rfc) = &self.rfc {
            query.push(("rfc", rfc.clone()));
        }
        if let Some(type_document) = &self.type_document {
            query.push(("type_document", type_document.clone()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        Ok(query)
    }
}

/// Everything needed to stamp (or draft) a new CFDI.
///
/// Required fields are fixed by [`CfdiRequest::new`] plus at least one
/// [`Item`]; the rest defaults to the API's conventions (currency
/// `"MXN"`, email sending on) and is omitted from the payload when left
/// unset. Validation happens when the request is submitted.
#[derive(Debug, Clone)]
pub struct CfdiRequest {
    customer_uid: String,
    document_type: String,
    items: Vec<Item>,
    cfdi_use: String,
    series: u64,
    payment_method: String,
    payment_option: String,
    currency: String,
    tax_residence: String,
    create_draft_on_error: bool,
    draft: bool,
    send_email: bool,
    payment_terms: Option<String>,
    related_cfdis: Vec<RelatedCfdi>,
    exchange_rate: Option<Decimal>,
    order_number: Option<String>,
    date: Option<NaiveDateTime>,
    comments: Option<String>,
    account: Option<String>,
    expedition_place: Option<String>,
    global_periodicity: Option<String>,
    global_months: Option<String>,
    global_year: Option<i32>,
}

impl CfdiRequest {
    /// Start a request from the fields every invoice needs.
    ///
    /// `document_type` is a code from [`DocumentType`]; `cfdi_use`,
    /// `payment_method` and `payment_option` are SAT catalog codes;
    /// `series` is the numeric series identifier.
    pub fn new(
        customer_uid: impl Into<String>,
        document_type: impl Into<String>,
        cfdi_use: impl Into<String>,
        series: u64,
        payment_method: impl Into<String>,
        payment_option: impl Into<String>,
    ) -> Self {
        Self {
            customer_uid: customer_uid.into(),
            document_type: document_type.into(),
            items: Vec::new(),
            cfdi_use: cfdi_use.into(),
            series,
            payment_method: payment_method.into(),
            payment_option: payment_option.into(),
            currency: "MXN".to_string(),
            tax_residence: String::new(),
            create_draft_on_error: false,
            draft: false,
            send_email: true,
            payment_terms: None,
            related_cfdis: Vec::new(),
            exchange_rate: None,
            order_number: None,
            date: None,
            comments: None,
            account: None,
            expedition_place: None,
            global_periodicity: None,
            global_months: None,
            global_year: None,
        }
    }

    /// Add a line item.
    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add several line items.
    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the invoice currency (ISO 4217). Non-MXN currencies require
    /// an [`exchange_rate`](Self::exchange_rate).
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the recipient's tax residence country code.
    pub fn tax_residence(mut self, country: impl Into<String>) -> Self {
        self.tax_residence = country.into();
        self
    }

    /// Keep the document as a draft if stamping fails.
    pub fn create_draft_on_error(mut self, enabled: bool) -> Self {
        self.create_draft_on_error = enabled;
        self
    }

    /// Create a draft instead of stamping immediately.
    pub fn draft(mut self, enabled: bool) -> Self {
        self.draft = enabled;
        self
    }

    /// Whether the recipient is emailed the stamped document.
    pub fn send_email(mut self, enabled: bool) -> Self {
        self.send_email = enabled;
        self
    }

    /// Set the payment terms free text.
    pub fn payment_terms(mut self, terms: impl Into<String>) -> Self {
        self.payment_terms = Some(terms.into());
        self
    }

    /// Relate this document to a previously stamped CFDI.
    pub fn related_cfdi(mut self, related: RelatedCfdi) -> Self {
        self.related_cfdis.push(related);
        self
    }

    /// Set the exchange rate to MXN; mandatory for non-MXN currencies.
    pub fn exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// Set the order number.
    pub fn order_number(mut self, number: impl Into<String>) -> Self {
        self.order_number = Some(number.into());
        self
    }

    /// Set the issue date (local time, no timezone).
    pub fn date(mut self, date: NaiveDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Set free-text comments.
    pub fn comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = Some(comments.into());
        self
    }

    /// Set the account reference.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set the expedition place (issuer postal code).
    pub fn expedition_place(mut self, place: impl Into<String>) -> Self {
        self.expedition_place = Some(place.into());
        self
    }

    /// Mark this as a global CFDI with the given periodicity code.
    ///
    /// Global CFDIs need the full periodicity/months/year triple.
    pub fn global_periodicity(mut self, code: impl Into<String>) -> Self {
        self.global_periodicity = Some(code.into());
        self
    }

    /// Set the global-CFDI reporting month code.
    pub fn global_months(mut self, code: impl Into<String>) -> Self {
        self.global_months = Some(code.into());
        self
    }

    /// Set the global-CFDI reporting year.
    pub fn global_year(mut self, year: i32) -> Self {
        self.global_year = Some(year);
        self
    }

    /// Client-side checks, in the order the API contract fixes them.
    pub(crate) fn validate(&self) -> Result<(), FacturaError> {
        if DocumentType::from_code(&self.document_type).is_none() {
            return Err(FacturaError::InvalidArgument(format!(
                "invalid document type {:?}; valid types are: {}",
                self.document_type,
                DocumentType::code_list()
            )));
        }

        if self.items.is_empty() {
            return Err(FacturaError::InvalidArgument(
                "at least one item is required".into(),
            ));
        }

        if self.currency != "MXN" && self.exchange_rate.is_none() {
            return Err(FacturaError::InvalidArgument(
                "exchange rate is required for non-MXN currencies".into(),
            ));
        }

        let global = [
            self.global_periodicity.is_some(),
            self.global_months.is_some(),
            self.global_year.is_some(),
        ];
        if global.iter().any(|set| *set) {
            if !global.iter().all(|set| *set) {
                return Err(FacturaError::InvalidArgument(
                    "global CFDI requires periodicity, months and year together".into(),
                ));
            }
            let periodicity = self.global_periodicity.as_deref().unwrap_or_default();
            if Periodicity::from_code(periodicity).is_none() {
                return Err(FacturaError::InvalidArgument(format!(
                    "invalid global CFDI periodicity {periodicity:?}"
                )));
            }
            let months = self.global_months.as_deref().unwrap_or_default();
            if PeriodMonth::from_code(months).is_none() {
                return Err(FacturaError::InvalidArgument(format!(
                    "invalid global CFDI months {months:?}"
                )));
            }
        }

        Ok(())
    }

    /// Assemble the wire payload. Optional fields left unset are absent
    /// from the body entirely.
    pub(crate) fn payload(&self) -> CfdiPayload<'_> {
        CfdiPayload {
            recipient: Recipient {
                uid: &self.customer_uid,
                tax_residence: &self.tax_residence,
            },
            document_type: &self.document_type,
            create_draft_on_error: self.create_draft_on_error as u8,
            draft: self.draft as u8,
            items: &self.items,
            cfdi_use: &self.cfdi_use,
            series: self.series,
            payment_method: &self.payment_method,
            payment_option: &self.payment_option,
            currency: &self.currency,
            send_email: self.send_email,
            payment_terms: self.payment_terms.as_deref(),
            related_cfdis: if self.related_cfdis.is_empty() {
                None
            } else {
                Some(&self.related_cfdis)
            },
            exchange_rate: self.exchange_rate,
            order_number: self.order_number.as_deref(),
            date: self
                .date
                .map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string()),
            comments: self.comments.as_deref(),
            account: self.account.as_deref(),
            expedition_place: self.expedition_place.as_deref(),
            global_information: match (
                self.global_periodicity.as_deref(),
                self.global_months.as_deref(),
                self.global_year,
            ) {
                (Some(periodicity), Some(months), Some(year)) => Some(GlobalInformation {
                    periodicity,
                    months,
                    year,
                }),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Recipient<'a> {
    #[serde(rename = "UID")]
    uid: &'a str,
    #[serde(rename = "ResidenciaFiscal")]
    tax_residence: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GlobalInformation<'a> {
    #[serde(rename = "Periodicidad")]
    periodicity: &'a str,
    #[serde(rename = "Meses")]
    months: &'a str,
    #[serde(rename = "Año")]
    year: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct CfdiPayload<'a> {
    #[serde(rename = "Receptor")]
    recipient: Recipient<'a>,
    #[serde(rename = "TipoDocumento")]
    document_type: &'a str,
    #[serde(rename = "BorradorSiFalla")]
    create_draft_on_error: u8,
    #[serde(rename = "Draft")]
    draft: u8,
    #[serde(rename = "Conceptos")]
    items: &'a [Item],
    #[serde(rename = "UsoCFDI")]
    cfdi_use: &'a str,
    #[serde(rename = "Serie")]
    series: u64,
    #[serde(rename = "FormaPago")]
    payment_method: &'a str,
    #[serde(rename = "MetodoPago")]
    payment_option: &'a str,
    #[serde(rename = "Moneda")]
    currency: &'a str,
    #[serde(rename = "EnviarCorreo")]
    send_email: bool,
    #[serde(rename = "CondicionesDePago", skip_serializing_if = "Option::is_none")]
    payment_terms: Option<&'a str>,
    #[serde(rename = "CfdiRelacionados", skip_serializing_if = "Option::is_none")]
    related_cfdis: Option<&'a [RelatedCfdi]>,
    #[serde(
        rename = "TipoCambio",
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    exchange_rate: Option<Decimal>,
    #[serde(rename = "NumOrder", skip_serializing_if = "Option::is_none")]
    order_number: Option<&'a str>,
    #[serde(rename = "Fecha", skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(rename = "Comentarios", skip_serializing_if = "Option::is_none")]
    comments: Option<&'a str>,
    #[serde(rename = "Cuenta", skip_serializing_if = "Option::is_none")]
    account: Option<&'a str>,
    #[serde(rename = "LugarExpedicion", skip_serializing_if = "Option::is_none")]
    expedition_place: Option<&'a str>,
    #[serde(rename = "InformacionGlobal", skip_serializing_if = "Option::is_none")]
    global_information: Option<GlobalInformation<'a>>,
}

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::codes::{LocalTaxCode, TaxFactorType};
use crate::error::FacturaError;

/// Accept a string or a number and keep it as a string.
///
/// The API is not consistent about whether folios and series arrive as
/// JSON strings or numbers.
pub(crate) fn stringlike<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Parse the API's timezone-less local timestamps.
pub(crate) fn parse_stamp_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// A stamped invoice document as returned by list and lookup calls.
///
/// Every field decodes leniently: the server omits fields freely
/// depending on the endpoint and document state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cfdi {
    /// Recipient's legal company name.
    #[serde(default, rename = "RazonSocialReceptor")]
    pub recipient_company_name: Option<String>,
    /// Assigned folio number.
    #[serde(default, rename = "Folio", deserialize_with = "stringlike")]
    pub folio: Option<String>,
    /// Platform-internal record identifier.
    #[serde(default, rename = "UID")]
    pub uid: Option<String>,
    /// SAT-assigned fiscal folio.
    #[serde(default, rename = "UUID")]
    pub uuid: Option<String>,
    /// Total before taxes and discounts.
    #[serde(default, rename = "Subtotal")]
    pub subtotal: Option<Decimal>,
    /// Discount amount.
    #[serde(default, rename = "Descuento")]
    pub discount: Option<Decimal>,
    /// Grand total.
    #[serde(default, rename = "Total")]
    pub total: Option<Decimal>,
    /// Caller-supplied client reference.
    #[serde(default, rename = "ReferenceClient")]
    pub reference_client: Option<String>,
    /// Order number.
    #[serde(default, rename = "NumOrder", deserialize_with = "stringlike")]
    pub num_order: Option<String>,
    /// Recipient RFC.
    #[serde(default, rename = "Receptor")]
    pub recipient: Option<String>,
    /// Stamping timestamp, as sent by the server.
    #[serde(default, rename = "FechaTimbrado")]
    pub stamp_date: Option<String>,
    /// Document status (e.g. "enviada", "cancelada").
    #[serde(default, rename = "Status")]
    pub status: Option<String>,
    /// Document type code.
    #[serde(default, rename = "TipoDocumento")]
    pub document_type: Option<String>,
    /// CFDI version.
    #[serde(default, rename = "Version", deserialize_with = "stringlike")]
    pub version: Option<String>,
    /// Raw stamped XML, when the endpoint includes it.
    #[serde(default, rename = "XML")]
    pub xml: Option<String>,
}

/// One page of CFDI documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CfdiList {
    /// Total matching documents across all pages.
    #[serde(default)]
    pub total: u64,
    /// Page size.
    #[serde(default)]
    pub per_page: u32,
    /// Current page number.
    #[serde(default)]
    pub current_page: u32,
    /// Last page number.
    #[serde(default)]
    pub last_page: u32,
    /// Index of the first item on this page; null on an empty page.
    #[serde(default)]
    pub from: Option<u32>,
    /// Index of the last item on this page; null on an empty page.
    #[serde(default)]
    pub to: Option<u32>,
    /// Documents on this page.
    #[serde(default)]
    pub data: Vec<Cfdi>,
}

/// A transferred or withheld tax line on an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemTax {
    /// Amount the tax is calculated on.
    #[serde(rename = "Base", with = "rust_decimal::serde::float")]
    pub base: Decimal,
    /// SAT tax code (e.g. "002" for IVA).
    #[serde(rename = "Impuesto")]
    pub code: String,
    /// Factor type.
    #[serde(rename = "TipoFactor")]
    pub factor_type: TaxFactorType,
    /// Rate (for `Tasa`) or fixed fee (for `Cuota`).
    #[serde(rename = "TasaOCuota", with = "rust_decimal::serde::float")]
    pub rate_or_amount: Decimal,
    /// Resulting tax amount for the item.
    #[serde(rename = "Importe", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl ItemTax {
    /// Build a tax line.
    ///
    /// # Errors
    ///
    /// Rejects a negative `amount` with [`FacturaError::InvalidArgument`].
    pub fn new(
        base: Decimal,
        code: impl Into<String>,
        rate_or_amount: Decimal,
        amount: Decimal,
        factor_type: TaxFactorType,
    ) -> Result<Self, FacturaError> {
        if amount < Decimal::ZERO {
            return Err(FacturaError::InvalidArgument(
                "tax amount cannot be negative".into(),
            ));
        }
        Ok(Self {
            base,
            code: code.into(),
            factor_type,
            rate_or_amount,
            amount,
        })
    }
}

/// A state-level tax line on an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalItemTax {
    /// Local tax code.
    #[serde(rename = "Impuesto")]
    pub code: LocalTaxCode,
    /// Rate or fixed fee.
    #[serde(rename = "TasaOCuota", with = "rust_decimal::serde::float")]
    pub rate_or_amount: Decimal,
}

impl LocalItemTax {
    /// Build a local tax line.
    pub fn new(code: LocalTaxCode, rate_or_amount: Decimal) -> Self {
        Self {
            code,
            rate_or_amount,
        }
    }
}

/// Tax lines grouped the way the API expects them on each item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemTaxes {
    /// Transferred taxes (traslados).
    #[serde(rename = "Traslados")]
    pub transferred: Vec<ItemTax>,
    /// Withheld taxes (retenidos).
    #[serde(rename = "Retenidos")]
    pub withheld: Vec<ItemTax>,
    /// Local taxes.
    #[serde(rename = "Locales")]
    pub local: Vec<LocalItemTax>,
}

/// A component of an [`Item`] (parte).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPart {
    /// SAT product/service code.
    #[serde(rename = "ClaveProdServ")]
    pub product_service_code: String,
    /// SKU, when the part has one.
    #[serde(rename = "NoIdentificacion", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Quantity.
    #[serde(rename = "Cantidad", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// SAT unit-of-measure code.
    #[serde(rename = "Unidad")]
    pub unit_of_measure_code: String,
    /// Net price per unit.
    #[serde(rename = "ValorUnitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Description.
    #[serde(rename = "Descripcion")]
    pub description: String,
}

impl ItemPart {
    /// Build an item part.
    pub fn new(
        product_service_code: impl Into<String>,
        quantity: Decimal,
        unit_of_measure_code: impl Into<String>,
        unit_price: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            product_service_code: product_service_code.into(),
            sku: None,
            quantity,
            unit_of_measure_code: unit_of_measure_code.into(),
            unit_price,
            description: description.into(),
        }
    }

    /// Attach a SKU.
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }
}

/// A line item (concepto) on an invoice. Request-only: items are built
/// by the caller and never parsed from responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// SAT product/service code.
    #[serde(rename = "ClaveProdServ")]
    pub product_service_code: String,
    /// SKU, when the item has one.
    #[serde(rename = "NoIdentificacion", skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Quantity.
    #[serde(rename = "Cantidad", with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// SAT unit-of-measure code.
    #[serde(rename = "ClaveUnidad")]
    pub unit_of_measure_code: String,
    /// Unit-of-measure display name.
    #[serde(rename = "Unidad")]
    pub unit_of_measure_name: String,
    /// Net price per unit.
    #[serde(rename = "ValorUnitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Description.
    #[serde(rename = "Descripcion")]
    pub description: String,
    /// Discount amount.
    #[serde(rename = "Descuento", with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// Taxes applying to this item.
    #[serde(rename = "Impuestos")]
    pub taxes: ItemTaxes,
    /// Customs declaration number (número de pedimento).
    #[serde(rename = "NumeroPedimento", skip_serializing_if = "Option::is_none")]
    pub customs_declaration_number: Option<String>,
    /// Property tax number (predial).
    #[serde(rename = "Predial", skip_serializing_if = "Option::is_none")]
    pub property_tax_number: Option<String>,
    /// Component parts.
    #[serde(rename = "Partes", skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<ItemPart>,
}

impl Item {
    /// Build a line item; discount defaults to zero and taxes to none.
    pub fn new(
        product_service_code: impl Into<String>,
        quantity: Decimal,
        unit_of_measure_code: impl Into<String>,
        unit_of_measure_name: impl Into<String>,
        unit_price: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            product_service_code: product_service_code.into(),
            sku: None,
            quantity,
            unit_of_measure_code: unit_of_measure_code.into(),
            unit_of_measure_name: unit_of_measure_name.into(),
            unit_price,
            description: description.into(),
            discount_amount: Decimal::ZERO,
            taxes: ItemTaxes::default(),
            customs_declaration_number: None,
            property_tax_number: None,
            parts: Vec::new(),
        }
    }

    /// Attach a SKU.
    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Set the discount amount.
    pub fn discount(mut self, amount: Decimal) -> Self {
        self.discount_amount = amount;
        self
    }

    /// Add a transferred tax (traslado).
    pub fn transferred_tax(mut self, tax: ItemTax) -> Self {
        self.taxes.transferred.push(tax);
        self
    }

    /// Add a withheld tax (retenido).
    pub fn withheld_tax(mut self, tax: ItemTax) -> Self {
        self.taxes.withheld.push(tax);
        self
    }

    /// Add a local tax.
    pub fn local_tax(mut self, tax: LocalItemTax) -> Self {
        self.taxes.local.push(tax);
        self
    }

    /// Set the customs declaration number.
    pub fn customs_declaration_number(mut self, number: impl Into<String>) -> Self {
        self.customs_declaration_number = Some(number.into());
        self
    }

    /// Set the property tax number.
    pub fn property_tax_number(mut self, number: impl Into<String>) -> Self {
        self.property_tax_number = Some(number.into());
        self
    }

    /// Add a component part.
    pub fn part(mut self, part: ItemPart) -> Self {
        self.parts.push(part);
        self
    }
}

/// Reference to a previously stamped CFDI this document relates to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedCfdi {
    /// Fiscal folio of the related document.
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// SAT relation-type code (catalog `Tipo de Relación`).
    #[serde(rename = "TipoRelacion")]
    pub relation_type: String,
}

impl RelatedCfdi {
    /// Build a related-CFDI reference.
    pub fn new(uuid: impl Into<String>, relation_type: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            relation_type: relation_type.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SatStamp {
    #[serde(default, rename = "FechaTimbrado")]
    pub stamp_date: Option<String>,
    #[serde(default, rename = "NoCertificadoSAT")]
    pub certificate_number: Option<String>,
    #[serde(default, rename = "Version", deserialize_with = "stringlike")]
    pub version: Option<String>,
    #[serde(default, rename = "SelloSAT")]
    pub sat_stamp: Option<String>,
    #[serde(default, rename = "SelloCFD")]
    pub cfd_stamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AssignedNumber {
    #[serde(default, rename = "Serie", deserialize_with = "stringlike")]
    pub series: Option<String>,
    #[serde(default, rename = "Folio", deserialize_with = "stringlike")]
    pub folio: Option<String>,
}

/// Result of stamping a new CFDI.
#[derive(Debug, Clone, Default)]
pub struct StampedCfdi {
    /// Server confirmation message.
    pub message: String,
    /// SAT-assigned fiscal folio.
    pub uuid: String,
    /// Platform-internal record identifier.
    pub uid: String,
    /// Stamping timestamp, when the server sent a parsable one.
    pub stamped_at: Option<NaiveDateTime>,
    /// SAT certificate number used for the stamp.
    pub sat_certificate_number: String,
    /// CFDI version.
    pub version: String,
    /// SAT digital stamp.
    pub sat_stamp: String,
    /// Issuer (CFD) digital stamp.
    pub cfd_stamp: String,
    /// Series the document was filed under.
    pub series: String,
    /// Folio assigned within the series.
    pub folio: String,
}

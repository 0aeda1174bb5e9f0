//! Closed SAT code sets used across the API surface.
//!
//! The API accepts these values as loose strings; the enums here
//! materialize the valid sets at compile time so client-side validation
//! can reject anything else before a request is made.

use serde::{Deserialize, Serialize};

/// Document types understood by Factura.com (`TipoDocumento`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Factura.
    #[serde(rename = "factura")]
    Invoice,
    /// Factura para hoteles.
    #[serde(rename = "factura_hotel")]
    HotelInvoice,
    /// Recibo de honorarios.
    #[serde(rename = "honorarios")]
    FeeReceipt,
    /// Nota de cargo.
    #[serde(rename = "nota_cargo")]
    ChargeNote,
    /// Donativo.
    #[serde(rename = "donativos")]
    Donation,
    /// Recibo de arrendamiento.
    #[serde(rename = "arrendamiento")]
    LeaseReceipt,
    /// Nota de crédito.
    #[serde(rename = "nota_credito")]
    CreditNote,
    /// Nota de débito.
    #[serde(rename = "nota_debito")]
    DebitNote,
    /// Nota de devolución.
    #[serde(rename = "nota_devolucion")]
    ReturnNote,
    /// Carta porte.
    #[serde(rename = "carta_porte")]
    Waybill,
    /// Carta porte de ingreso.
    #[serde(rename = "carta_porte_ingreso")]
    IncomeWaybill,
    /// Pago.
    #[serde(rename = "pago")]
    Payment,
    /// Retención.
    #[serde(rename = "retencion")]
    Withholding,
}

impl DocumentType {
    /// Every document type, in catalog order.
    pub const ALL: [DocumentType; 13] = [
        Self::Invoice,
        Self::HotelInvoice,
        Self::FeeReceipt,
        Self::ChargeNote,
        Self::Donation,
        Self::LeaseReceipt,
        Self::CreditNote,
        Self::DebitNote,
        Self::ReturnNote,
        Self::Waybill,
        Self::IncomeWaybill,
        Self::Payment,
        Self::Withholding,
    ];

    /// Wire code for this document type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "factura",
            Self::HotelInvoice => "factura_hotel",
            Self::FeeReceipt => "honorarios",
            Self::ChargeNote => "nota_cargo",
            Self::Donation => "donativos",
            Self::LeaseReceipt => "arrendamiento",
            Self::CreditNote => "nota_credito",
            Self::DebitNote => "nota_debito",
            Self::ReturnNote => "nota_devolucion",
            Self::Waybill => "carta_porte",
            Self::IncomeWaybill => "carta_porte_ingreso",
            Self::Payment => "pago",
            Self::Withholding => "retencion",
        }
    }

    /// Parse from a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.code() == code)
    }

    /// Comma-separated list of all valid codes, for error messages.
    pub(crate) fn code_list() -> String {
        Self::ALL
            .iter()
            .map(|d| d.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Tax factor types (`TipoFactor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxFactorType {
    /// `Tasa` — percentage rate.
    #[serde(rename = "Tasa")]
    Rate,
    /// `Cuota` — fixed fee per unit.
    #[serde(rename = "Cuota")]
    Quota,
    /// `Exento` — exempt.
    #[serde(rename = "Exento")]
    Exempt,
}

impl TaxFactorType {
    /// Wire code for this factor type.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Rate => "Tasa",
            Self::Quota => "Cuota",
            Self::Exempt => "Exento",
        }
    }

    /// Parse from a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Tasa" => Some(Self::Rate),
            "Cuota" => Some(Self::Quota),
            "Exento" => Some(Self::Exempt),
            _ => None,
        }
    }
}

/// Local (state-level) tax codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocalTaxCode {
    /// `CEDULAR` — state income tax.
    #[serde(rename = "CEDULAR")]
    Cedular,
    /// `ISH` — lodging services tax.
    #[serde(rename = "ISH")]
    Ish,
}

impl LocalTaxCode {
    /// Wire code for this local tax.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cedular => "CEDULAR",
            Self::Ish => "ISH",
        }
    }

    /// Parse from a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "CEDULAR" => Some(Self::Cedular),
            "ISH" => Some(Self::Ish),
            _ => None,
        }
    }
}

/// Global-CFDI periodicity (`Periodicidad`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Periodicity {
    /// `01` — daily.
    Daily,
    /// `02` — weekly.
    Weekly,
    /// `03` — biweekly (quincenal).
    Biweekly,
    /// `04` — monthly.
    Monthly,
    /// `05` — bimonthly.
    Bimonthly,
}

impl Periodicity {
    /// Every periodicity, in catalog order.
    pub const ALL: [Periodicity; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
        Self::Bimonthly,
    ];

    /// Wire code for this periodicity.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Daily => "01",
            Self::Weekly => "02",
            Self::Biweekly => "03",
            Self::Monthly => "04",
            Self::Bimonthly => "05",
        }
    }

    /// Parse from a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.code() == code)
    }
}

/// Global-CFDI reporting month (`Meses`).
///
/// Codes 01–12 are calendar months; 13–18 are the bimonthly pairs used
/// with [`Periodicity::Bimonthly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodMonth {
    /// `01`
    January,
    /// `02`
    February,
    /// `03`
    March,
    /// `04`
    April,
    /// `05`
    May,
    /// `06`
    June,
    /// `07`
    July,
    /// `08`
    August,
    /// `09`
    September,
    /// `10`
    October,
    /// `11`
    November,
    /// `12`
    December,
    /// `13`
    JanuaryFebruary,
    /// `14`
    MarchApril,
    /// `15`
    MayJune,
    /// `16`
    JulyAugust,
    /// `17`
    SeptemberOctober,
    /// `18`
    NovemberDecember,
}

impl PeriodMonth {
    /// Every reporting month, in catalog order.
    pub const ALL: [PeriodMonth; 18] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::JanuaryFebruary,
        Self::MarchApril,
        Self::MayJune,
        Self::JulyAugust,
        Self::SeptemberOctober,
        Self::NovemberDecember,
    ];

    /// Wire code for this reporting month.
    pub fn code(&self) -> &'static str {
        match self {
            Self::January => "01",
            Self::February => "02",
            Self::March => "03",
            Self::April => "04",
            Self::May => "05",
            Self::June => "06",
            Self::July => "07",
            Self::August => "08",
            Self::September => "09",
            Self::October => "10",
            Self::November => "11",
            Self::December => "12",
            Self::JanuaryFebruary => "13",
            Self::MarchApril => "14",
            Self::MayJune => "15",
            Self::JulyAugust => "16",
            Self::SeptemberOctober => "17",
            Self::NovemberDecember => "18",
        }
    }

    /// Parse from a wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_type_round_trip() {
        for doc in DocumentType::ALL {
            assert_eq!(DocumentType::from_code(doc.code()), Some(doc));
        }
        assert_eq!(DocumentType::from_code("factura_invalida"), None);
        assert_eq!(DocumentType::from_code(""), None);
    }

    #[test]
    fn document_type_code_list_mentions_every_code() {
        let list = DocumentType::code_list();
        assert!(list.contains("factura"));
        assert!(list.contains("carta_porte_ingreso"));
        assert!(list.contains("retencion"));
    }

    #[test]
    fn factor_type_serializes_as_wire_code() {
        assert_eq!(
            serde_json::to_string(&TaxFactorType::Rate).unwrap(),
            "\"Tasa\""
        );
        assert_eq!(
            serde_json::to_string(&TaxFactorType::Exempt).unwrap(),
            "\"Exento\""
        );
    }

    #[test]
    fn local_tax_codes() {
        assert_eq!(LocalTaxCode::from_code("CEDULAR"), Some(LocalTaxCode::Cedular));
        assert_eq!(LocalTaxCode::from_code("ISH"), Some(LocalTaxCode::Ish));
        assert_eq!(LocalTaxCode::from_code("IVA"), None);
        assert_eq!(
            serde_json::to_string(&LocalTaxCode::Ish).unwrap(),
            "\"ISH\""
        );
    }

    #[test]
    fn periodicity_round_trip() {
        for p in Periodicity::ALL {
            assert_eq!(Periodicity::from_code(p.code()), Some(p));
        }
        assert_eq!(Periodicity::from_code("06"), None);
    }

    #[test]
    fn period_month_round_trip() {
        for m in PeriodMonth::ALL {
            assert_eq!(PeriodMonth::from_code(m.code()), Some(m));
        }
        assert_eq!(PeriodMonth::from_code("19"), None);
        assert_eq!(PeriodMonth::from_code("00"), None);
    }
}

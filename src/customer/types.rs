use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contact person attached to a [`Customer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// First name.
    #[serde(default, rename = "Nombre")]
    pub name: Option<String>,
    /// Last name(s).
    #[serde(default, rename = "Apellidos")]
    pub last_name: Option<String>,
    /// Primary email.
    #[serde(default, rename = "Email")]
    pub email: Option<String>,
    /// Secondary email.
    #[serde(default, rename = "Email2")]
    pub email2: Option<String>,
    /// Tertiary email.
    #[serde(default, rename = "Email3")]
    pub email3: Option<String>,
    /// Phone number.
    #[serde(default, rename = "Telefono")]
    pub phone: Option<String>,
}

/// A billing counterparty as returned by the API.
///
/// Fields absent from a response decode to `None`/empty rather than
/// failing; the server is not consistent about which ones it sends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Customer {
    /// Server-assigned record identifier.
    #[serde(default, rename = "UID")]
    pub uid: String,
    /// Legal company name (razón social).
    #[serde(default, rename = "RazonSocial")]
    pub company_name: String,
    /// Taxpayer identifier.
    #[serde(default, rename = "RFC")]
    pub rfc: String,
    /// Tax regime name (régimen fiscal).
    #[serde(default, rename = "Regimen")]
    pub tax_regime: Option<String>,
    /// SAT code of the tax regime.
    #[serde(default, rename = "RegimenId")]
    pub tax_regime_id: Option<u32>,
    /// Street name.
    #[serde(default, rename = "Calle")]
    pub street: Option<String>,
    /// Street number (número exterior).
    #[serde(default, rename = "Numero")]
    pub street_number: Option<String>,
    /// Unit number (número interior).
    #[serde(default, rename = "Interior")]
    pub building_number: Option<String>,
    /// Neighborhood (colonia).
    #[serde(default, rename = "Colonia")]
    pub neighborhood: Option<String>,
    /// Postal code.
    #[serde(default, rename = "CodigoPostal")]
    pub zip_code: String,
    /// City.
    #[serde(default, rename = "Ciudad")]
    pub city: Option<String>,
    /// Municipality (delegación).
    #[serde(default, rename = "Delegacion")]
    pub municipality: Option<String>,
    /// State.
    #[serde(default, rename = "Estado")]
    pub state: Option<String>,
    /// Locality.
    #[serde(default, rename = "Localidad")]
    pub locality: Option<String>,
    /// Country code.
    #[serde(default, rename = "Pais")]
    pub country: String,
    /// Foreign tax identifier (NumRegIdTrib), for non-Mexican customers.
    #[serde(default, rename = "NumRegIdTrib")]
    pub foreign_tax_id: Option<String>,
    /// Default CFDI-use code for invoices issued to this customer.
    #[serde(default, rename = "UsoCFDI")]
    pub cfdi_use: Option<String>,
    /// Contact person.
    #[serde(default, rename = "Contacto")]
    pub contact: Contact,
    /// Number of CFDIs issued to this customer.
    #[serde(default, rename = "cfdis")]
    pub cfdi_qty: u32,
    /// Registered bank accounts, as returned by the server.
    #[serde(default, rename = "cuentas_banco")]
    pub bank_accounts: Vec<Value>,
}

/// Request payload for registering a new customer.
///
/// Required fields go through [`NewCustomer::new`]; everything else is
/// set through the chaining methods and omitted from the request when
/// left unset. Country defaults to `"MEX"`.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    rfc: String,
    #[serde(rename = "razons")]
    company_name: String,
    #[serde(rename = "codpos")]
    zip_code: String,
    email: String,
    #[serde(rename = "regimen")]
    tax_regime: u32,
    #[serde(rename = "usocfdi", skip_serializing_if = "Option::is_none")]
    cfdi_use: Option<String>,
    #[serde(rename = "calle", skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(rename = "numero_exterior", skip_serializing_if = "Option::is_none")]
    street_number: Option<String>,
    #[serde(rename = "numero_interior", skip_serializing_if = "Option::is_none")]
    building_number: Option<String>,
    #[serde(rename = "colonia", skip_serializing_if = "Option::is_none")]
    neighborhood: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "delegacion", skip_serializing_if = "Option::is_none")]
    municipality: Option<String>,
    #[serde(rename = "localidad", skip_serializing_if = "Option::is_none")]
    locality: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(rename = "pais")]
    country: String,
    #[serde(rename = "numregidtrib", skip_serializing_if = "Option::is_none")]
    foreign_tax_id: Option<String>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "apellidos", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email3: Option<String>,
}

impl NewCustomer {
    /// Start a customer record from the fields the API requires.
    pub fn new(
        rfc: impl Into<String>,
        company_name: impl Into<String>,
        zip_code: impl Into<String>,
        email: impl Into<String>,
        tax_regime: u32,
    ) -> Self {
        Self {
            rfc: rfc.into(),
            company_name: company_name.into(),
            zip_code: zip_code.into(),
            email: email.into(),
            tax_regime,
            cfdi_use: None,
            street: None,
            street_number: None,
            building_number: None,
            neighborhood: None,
            city: None,
            municipality: None,
            locality: None,
            state: None,
            country: "MEX".to_string(),
            foreign_tax_id: None,
            first_name: None,
            last_name: None,
            phone: None,
            email2: None,
            email3: None,
        }
    }

    pub fn cfdi_use(mut self, code: impl Into<String>) -> Self {
        self.cfdi_use = Some(code.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn street_number(mut self, number: impl Into<String>) -> Self {
        self.street_number = Some(number.into());
        self
    }

    pub fn building_number(mut self, number: impl Into<String>) -> Self {
        self.building_number = Some(number.into());
        self
    }

    pub fn neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    pub fn locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn foreign_tax_id(mut self, id: impl Into<String>) -> Self {
        self.foreign_tax_id = Some(id.into());
        self
    }

    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email2(mut self, email: impl Into<String>) -> Self {
        self.email2 = Some(email.into());
        self
    }

    pub fn email3(mut self, email: impl Into<String>) -> Self {
        self.email3 = Some(email.into());
        self
    }
}

/// Partial update for an existing customer.
///
/// Only explicitly-set fields are sent; everything else keeps its
/// server-side value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    rfc: Option<String>,
    #[serde(rename = "razons", skip_serializing_if = "Option::is_none")]
    company_name: Option<String>,
    #[serde(rename = "codpos", skip_serializing_if = "Option::is_none")]
    zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(rename = "regimen", skip_serializing_if = "Option::is_none")]
    tax_regime: Option<u32>,
    #[serde(rename = "usocfdi", skip_serializing_if = "Option::is_none")]
    cfdi_use: Option<String>,
    #[serde(rename = "calle", skip_serializing_if = "Option::is_none")]
    street: Option<String>,
    #[serde(rename = "numero_exterior", skip_serializing_if = "Option::is_none")]
    street_number: Option<String>,
    #[serde(rename = "numero_interior", skip_serializing_if = "Option::is_none")]
    building_number: Option<String>,
    #[serde(rename = "colonia", skip_serializing_if = "Option::is_none")]
    neighborhood: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(rename = "delegacion", skip_serializing_if = "Option::is_none")]
    municipality: Option<String>,
    #[serde(rename = "localidad", skip_serializing_if = "Option::is_none")]
    locality: Option<String>,
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(rename = "pais", skip_serializing_if = "Option::is_none")]
    country: Option<String>,
    #[serde(rename = "numregidtrib", skip_serializing_if = "Option::is_none")]
    foreign_tax_id: Option<String>,
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "apellidos", skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email3: Option<String>,
}

impl CustomerUpdate {
    /// Start an empty update; sends nothing until fields are set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rfc(mut self, rfc: impl Into<String>) -> Self {
        self.rfc = Some(rfc.into());
        self
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = Some(zip.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn tax_regime(mut self, regime: u32) -> Self {
        self.tax_regime = Some(regime);
        self
    }

    pub fn cfdi_use(mut self, code: impl Into<String>) -> Self {
        self.cfdi_use = Some(code.into());
        self
    }

    pub fn street(mut self, street: impl Into<String>) -> Self {
        self.street = Some(street.into());
        self
    }

    pub fn street_number(mut self, number: impl Into<String>) -> Self {
        self.street_number = Some(number.into());
        self
    }

    pub fn building_number(mut self, number: impl Into<String>) -> Self {
        self.building_number = Some(number.into());
        self
    }

    pub fn neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    pub fn locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Some(locality.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn foreign_tax_id(mut self, id: impl Into<String>) -> Self {
        self.foreign_tax_id = Some(id.into());
        self
    }

    pub fn first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = Some(name.into());
        self
    }

    pub fn last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn email2(mut self, email: impl Into<String>) -> Self {
        self.email2 = Some(email.into());
        self
    }

    pub fn email3(mut self, email: impl Into<String>) -> Self {
        self.email3 = Some(email.into());
        self
    }

    /// True when no field has been set.
    pub fn is_empty(&self) -> bool {
        serde_json::to_value(self)
            .map(|v| v.as_object().is_some_and(|m| m.is_empty()))
            .unwrap_or(false)
    }
}

//! SAT reference catalogs.
//!
//! Read-only lookups of the reference data (products/services, units,
//! payment methods, …) that invoice fields must be drawn from. All
//! catalogs except withholding types share the v3 `catalogo` endpoint
//! family and its `response`/`data` envelope; withholding types live on
//! v4 `catalogos` and return a bare array.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FacturaError;
use crate::http::{ApiTransport, envelope_message};

/// A key/name row from a SAT reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// SAT code identifying the entry.
    #[serde(default)]
    pub key: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
}

/// A row from the product/service catalog (`ClaveProductServ`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductService {
    /// SAT product/service code.
    #[serde(default)]
    pub key: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Complement the code may require on an invoice.
    #[serde(default)]
    pub complement: Option<String>,
}

/// A row from the CFDI-use catalog (`UsoCfdi`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfdiUse {
    /// SAT CFDI-use code.
    #[serde(default)]
    pub key: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Kind of taxpayer the use applies to.
    #[serde(default, rename = "use")]
    pub applies_to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogEnvelope<T> {
    #[serde(default)]
    response: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Client for the SAT reference catalogs.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    transport: ApiTransport,
}

impl CatalogClient {
    pub(crate) fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        catalog: &str,
    ) -> Result<Vec<T>, FacturaError> {
        let envelope: CatalogEnvelope<T> = self
            .transport
            .get("v3", "catalogo", &[catalog], &[])
            .await?;

        if envelope.response != "success" {
            return Err(FacturaError::Api(envelope_message(
                &envelope.message.unwrap_or(Value::Null),
            )));
        }
        Ok(envelope.data)
    }

    /// SAT catalog of product/service codes (`Clave Producto/Servicio`).
    pub async fn products_services(&self) -> Result<Vec<ProductService>, FacturaError> {
        self.fetch("ClaveProductServ").await
    }

    /// SAT catalog of customs entry ports (`Aduana`).
    pub async fn customs_houses(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("Aduana").await
    }

    /// SAT catalog of unit-of-measure codes (`Clave Unidad`).
    pub async fn units_of_measure(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("ClaveUnidad").await
    }

    /// SAT catalog of payment methods (`Forma de Pago`).
    pub async fn payment_methods(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("FormaPago").await
    }

    /// SAT catalog of taxes (`Impuesto`).
    pub async fn taxes(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("Impuesto").await
    }

    /// SAT catalog of payment options (`Método de Pago`).
    pub async fn payment_options(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("MetodoPago").await
    }

    /// SAT catalog of currencies (`Moneda`).
    pub async fn currencies(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("Moneda").await
    }

    /// SAT catalog of countries (`País`).
    pub async fn countries(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("Pais").await
    }

    /// SAT catalog of tax regimes (`Régimen Fiscal`).
    pub async fn tax_regimes(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("RegimenFiscal").await
    }

    /// SAT catalog of CFDI relation types (`Tipo de Relación`).
    pub async fn relation_types(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.fetch("Relacion").await
    }

    /// SAT catalog of CFDI uses (`Uso de CFDI`).
    pub async fn cfdi_uses(&self) -> Result<Vec<CfdiUse>, FacturaError> {
        self.fetch("UsoCfdi").await
    }

    /// SAT catalog of withholding types (`Tipos de Retenciones`).
    ///
    /// Unlike the other catalogs this endpoint lives on v4 and returns
    /// the rows directly, without an envelope.
    pub async fn withholding_types(&self) -> Result<Vec<CatalogEntry>, FacturaError> {
        self.transport
            .get("v4", "catalogos", &["retenciones", "claveRetencion"], &[])
            .await
    }
}

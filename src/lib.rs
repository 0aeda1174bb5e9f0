//! # facturacom
//!
//! Typed async client for the [Factura.com](https://factura.com) REST
//! API — Mexican CFDI 4.0 electronic invoicing: SAT catalogs, customers,
//! invoices (CFDI), drafts, and document series.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Every call is one authenticated HTTPS round-trip; there is no
//! retry, caching, or rate-limiting built in.
//!
//! ## Quick Start
//!
//! ```no_run
//! use facturacom::FacturaCom;
//! use facturacom::cfdi::{CfdiRequest, Item, ItemTax};
//! use facturacom::codes::TaxFactorType;
//! use rust_decimal_macros::dec;
//!
//! # async fn example() -> Result<(), facturacom::FacturaError> {
//! let api = FacturaCom::new("F-Api-Key", "F-Secret-Key", true)?;
//!
//! let tax = ItemTax::new(dec!(100), "002", dec!(0.16), dec!(16), TaxFactorType::Rate)?;
//! let item = Item::new("84111506", dec!(1), "E48", "Unidad de servicio", dec!(100), "Desarrollo")
//!     .transferred_tax(tax);
//!
//! let stamped = api
//!     .cfdi
//!     .create(&CfdiRequest::new("CLIENT_UID", "factura", "G03", 1234, "03", "PUE").item(item))
//!     .await?;
//! println!("stamped {} as {}-{}", stamped.uuid, stamped.series, stamped.folio);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environments
//!
//! | Constructor | Target |
//! |-------------|--------|
//! | `FacturaCom::new(key, secret, false)` | production |
//! | `FacturaCom::new(key, secret, true)` | sandbox |
//! | `FacturaCom::with_base_url(key, secret, url)` | explicit URL (tests) |

pub mod catalog;
pub mod cfdi;
pub mod codes;
pub mod customer;
pub mod draft;
mod error;
pub mod http;
pub mod series;

pub use error::FacturaError;

use std::time::Duration;

use crate::catalog::CatalogClient;
use crate::cfdi::CfdiClient;
use crate::customer::CustomerClient;
use crate::draft::DraftClient;
use crate::http::{ApiTransport, DEFAULT_TIMEOUT};
use crate::series::SeriesClient;

/// Entry point to the API: one sub-client per resource family, all
/// sharing the credentials and environment fixed at construction.
///
/// The facade holds no mutable state and is cheap to clone; clones share
/// the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct FacturaCom {
    /// SAT reference catalogs.
    pub catalog: CatalogClient,
    /// Billing counterparties.
    pub customer: CustomerClient,
    /// Stamped invoices.
    pub cfdi: CfdiClient,
    /// Unstamped documents.
    pub draft: DraftClient,
    /// Document series / numbering.
    pub series: SeriesClient,
}

impl FacturaCom {
    /// Connect to production (`sandbox = false`) or the sandbox
    /// environment, with the default request timeout.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        sandbox: bool,
    ) -> Result<Self, FacturaError> {
        Self::with_timeout(api_key, secret_key, sandbox, DEFAULT_TIMEOUT)
    }

    /// Like [`FacturaCom::new`] with an explicit request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        sandbox: bool,
        timeout: Duration,
    ) -> Result<Self, FacturaError> {
        Ok(Self::from_transport(ApiTransport::new(
            api_key, secret_key, sandbox, timeout,
        )?))
    }

    /// Point the client at an explicit base URL. Intended for tests
    /// against a local mock server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, FacturaError> {
        Ok(Self::from_transport(ApiTransport::with_base_url(
            api_key,
            secret_key,
            base_url,
            DEFAULT_TIMEOUT,
        )?))
    }

    fn from_transport(transport: ApiTransport) -> Self {
        Self {
            catalog: CatalogClient::new(transport.clone()),
            customer: CustomerClient::new(transport.clone()),
            cfdi: CfdiClient::new(transport.clone()),
            draft: DraftClient::new(transport.clone()),
            series: SeriesClient::new(transport),
        }
    }
}

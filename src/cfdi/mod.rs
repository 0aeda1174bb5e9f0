//! CFDI (stamped invoice) resource.
//!
//! Listing and lookups live on the v4 `cfdi` endpoint family; creation
//! goes to the v4 `cfdi40` family instead — the endpoint switch exists
//! only for `create`.

mod request;
pub(crate) mod types;

pub use request::{CfdiFilters, CfdiRequest};
pub use types::{
    Cfdi, CfdiList, Item, ItemPart, ItemTax, ItemTaxes, LocalItemTax, RelatedCfdi, StampedCfdi,
};

use serde::Deserialize;
use serde_json::Value;

use crate::error::FacturaError;
use crate::http::{ApiTransport, envelope_message};

use types::{AssignedNumber, SatStamp, parse_stamp_date};

const VERSION: &str = "v4";
const ENDPOINT: &str = "cfdi";
const CREATE_ENDPOINT: &str = "cfdi40";

/// Identifier kinds accepted by [`CfdiClient::get_by_id`].
const ID_KINDS: [&str; 3] = ["uid", "uuid", "folio"];

#[derive(Debug, Deserialize)]
struct CreateEnvelope {
    #[serde(default)]
    response: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default, rename = "UUID")]
    uuid: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(default, rename = "SAT")]
    sat: Option<SatStamp>,
    #[serde(default, rename = "INV")]
    inv: Option<AssignedNumber>,
}

/// Client for the CFDI resource.
#[derive(Debug, Clone)]
pub struct CfdiClient {
    transport: ApiTransport,
}

impl CfdiClient {
    pub(crate) fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// List stamped documents, newest first, with optional filters.
    pub async fn all(&self, filters: &CfdiFilters) -> Result<CfdiList, FacturaError> {
        let query = filters.query()?;
        self.transport
            .get(VERSION, ENDPOINT, &["list"], &query)
            .await
    }

    /// Look up one document by the given identifier kind.
    ///
    /// `kind` must be `"uid"`, `"uuid"` or `"folio"`; anything else is
    /// rejected before a request is made.
    pub async fn get_by_id(&self, id: &str, kind: &str) -> Result<Cfdi, FacturaError> {
        if !ID_KINDS.contains(&kind) {
            return Err(FacturaError::InvalidArgument(format!(
                "invalid ID kind {kind:?}; valid kinds are: {}",
                ID_KINDS.join(", ")
            )));
        }

        let value: Value = self.transport.get(VERSION, ENDPOINT, &[kind, id], &[]).await?;
        if value.get("status").and_then(Value::as_str) == Some("error") {
            return Err(FacturaError::Api(envelope_message(
                value.get("message").unwrap_or(&Value::Null),
            )));
        }
        serde_json::from_value(value).map_err(|e| FacturaError::Decode(e.to_string()))
    }

    /// Look up one document by its platform UID.
    pub async fn get_by_uid(&self, uid: &str) -> Result<Cfdi, FacturaError> {
        self.get_by_id(uid, "uid").await
    }

    /// Look up one document by its SAT fiscal folio.
    pub async fn get_by_uuid(&self, uuid: &str) -> Result<Cfdi, FacturaError> {
        self.get_by_id(uuid, "uuid").await
    }

    /// Look up one document by its folio number.
    pub async fn get_by_folio(&self, folio: &str) -> Result<Cfdi, FacturaError> {
        self.get_by_id(folio, "folio").await
    }

    /// Stamp a new CFDI (or file it as a draft, per the request flags).
    ///
    /// Runs the client-side checks first; nothing is sent when they
    /// fail.
    pub async fn create(&self, request: &CfdiRequest) -> Result<StampedCfdi, FacturaError> {
        request.validate()?;

        let envelope: CreateEnvelope = self
            .transport
            .post(VERSION, CREATE_ENDPOINT, &["create"], &request.payload())
            .await?;

        if envelope.response != "success" {
            return Err(FacturaError::Api(envelope_message(
                envelope.message.as_ref().unwrap_or(&Value::Null),
            )));
        }

        let sat = envelope.sat.unwrap_or_default();
        let inv = envelope.inv.unwrap_or_default();
        Ok(StampedCfdi {
            message: envelope
                .message
                .as_ref()
                .map(envelope_message)
                .unwrap_or_default(),
            uuid: envelope.uuid.unwrap_or_default(),
            uid: envelope.uid.unwrap_or_default(),
            stamped_at: sat.stamp_date.as_deref().and_then(parse_stamp_date),
            sat_certificate_number: sat.certificate_number.unwrap_or_default(),
            version: sat.version.unwrap_or_default(),
            sat_stamp: sat.sat_stamp.unwrap_or_default(),
            cfd_stamp: sat.cfd_stamp.unwrap_or_default(),
            series: inv.series.unwrap_or_default(),
            folio: inv.folio.unwrap_or_default(),
        })
    }
}

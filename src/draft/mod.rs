//! Draft (unstamped document) resource.
//!
//! Lives on the v4 `drafts` endpoint family. The list envelope uses
//! camelCase pagination keys, unlike the CFDI list, and only carries a
//! `status` key when something went wrong.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cfdi::Cfdi;
use crate::cfdi::types::stringlike;
use crate::error::FacturaError;
use crate::http::{ApiTransport, envelope_message};

const VERSION: &str = "v4";
const ENDPOINT: &str = "drafts";

/// A prepared document that has not been stamped yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Draft {
    /// Draft identifier.
    #[serde(default, rename = "UUID")]
    pub uuid: Option<String>,
    /// Series the draft is filed under.
    #[serde(default, rename = "Serie", deserialize_with = "stringlike")]
    pub series: Option<String>,
    /// Folio reserved for the draft.
    #[serde(default, rename = "Folio", deserialize_with = "stringlike")]
    pub folio: Option<String>,
    /// CFDI version the draft targets.
    #[serde(default, rename = "Version", deserialize_with = "stringlike")]
    pub version: Option<String>,
    /// Snapshot of the pending document.
    #[serde(default, rename = "draft")]
    pub cfdi: Cfdi,
}

/// One page of drafts.
#[derive(Debug, Clone, Default)]
pub struct DraftList {
    /// Total drafts across all pages.
    pub total: u64,
    /// Page size.
    pub per_page: u32,
    /// Current page number.
    pub current_page: u32,
    /// Last page number.
    pub last_page: u32,
    /// Drafts on this page.
    pub data: Vec<Draft>,
}

/// Pagination controls for [`DraftClient::all`].
#[derive(Debug, Clone, Default)]
pub struct DraftFilters {
    per_page: Option<u32>,
    page: Option<u32>,
}

impl DraftFilters {
    /// Server-default pagination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Request a specific result page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(per_page) = self.per_page {
            query.push(("perPage", per_page.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query
    }
}

#[derive(Debug, Deserialize)]
struct DraftEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    total: u64,
    #[serde(default, rename = "perPage")]
    per_page: u32,
    #[serde(default, rename = "currentPage")]
    current_page: u32,
    #[serde(default, rename = "lastPage")]
    last_page: u32,
    #[serde(default)]
    data: Vec<Draft>,
}

/// Client for the draft resource.
#[derive(Debug, Clone)]
pub struct DraftClient {
    transport: ApiTransport,
}

impl DraftClient {
    pub(crate) fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// List pending drafts.
    pub async fn all(&self, filters: &DraftFilters) -> Result<DraftList, FacturaError> {
        let envelope: DraftEnvelope = self
            .transport
            .get(VERSION, ENDPOINT, &[], &filters.query())
            .await?;

        if let Some(status) = &envelope.status {
            if status != "success" {
                return Err(FacturaError::Api(envelope_message(
                    envelope.message.as_ref().unwrap_or(&Value::Null),
                )));
            }
        }

        Ok(DraftList {
            total: envelope.total,
            per_page: envelope.per_page,
            current_page: envelope.current_page,
            last_page: envelope.last_page,
            data: envelope.data,
        })
    }
}

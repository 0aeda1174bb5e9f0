//! Document series (numbering) resource.
//!
//! Lives on the v4 `series` endpoint family. Reads use a `status`
//! envelope; mutations answer with `status` or `response` depending on
//! the endpoint, and their payload is just a confirmation message.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codes::DocumentType;
use crate::error::FacturaError;
use crate::http::{ApiTransport, envelope_message};

const VERSION: &str = "v4";
const ENDPOINT: &str = "series";

/// A document series/numbering configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    /// Numeric series identifier.
    #[serde(default, rename = "SerieID")]
    pub id: u64,
    /// Series letter/name.
    #[serde(default, rename = "SerieName")]
    pub name: String,
    /// Document type the series issues.
    #[serde(default, rename = "SerieType")]
    pub series_type: String,
    /// Free-text description.
    #[serde(default, rename = "SerieDescription")]
    pub description: Option<String>,
    /// Whether the series is active.
    #[serde(default, rename = "SerieStatus")]
    pub status: String,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
    data: Option<Series>,
}

/// Mutations report success under `status` on some endpoints and
/// `response` on others; both are accepted.
#[derive(Debug, Deserialize)]
struct MutationEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<Value>,
}

impl MutationEnvelope {
    fn status(&self) -> &str {
        self.status
            .as_deref()
            .or(self.response.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Serialize)]
struct CreateSeries<'a> {
    #[serde(rename = "letra")]
    letter: &'a str,
    #[serde(rename = "tipoDocumento")]
    document_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    folio: Option<u32>,
}

fn check_status(status: &str, message: Option<&Value>) -> Result<(), FacturaError> {
    if status != "success" {
        return Err(FacturaError::Api(envelope_message(
            message.unwrap_or(&Value::Null),
        )));
    }
    Ok(())
}

/// Client for the series resource.
#[derive(Debug, Clone)]
pub struct SeriesClient {
    transport: ApiTransport,
}

impl SeriesClient {
    pub(crate) fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// List every configured series.
    pub async fn all(&self) -> Result<Vec<Series>, FacturaError> {
        let envelope: ListEnvelope = self.transport.get(VERSION, ENDPOINT, &[], &[]).await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        Ok(envelope.data)
    }

    /// Look up one series by its identifier.
    pub async fn get_by_uid(&self, uid: &str) -> Result<Series, FacturaError> {
        let envelope: SingleEnvelope = self.transport.get(VERSION, ENDPOINT, &[uid], &[]).await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        envelope
            .data
            .ok_or_else(|| FacturaError::Decode("response is missing the data payload".into()))
    }

    /// Create a series from a letter and a document-type code, with an
    /// optional starting folio. Returns the server's confirmation
    /// message.
    ///
    /// The document type is validated against [`DocumentType`] before
    /// any request is made.
    pub async fn create(
        &self,
        letter: &str,
        document_type: &str,
        folio: Option<u32>,
    ) -> Result<String, FacturaError> {
        if DocumentType::from_code(document_type).is_none() {
            return Err(FacturaError::InvalidArgument(format!(
                "invalid document type {:?}; valid types are: {}",
                document_type,
                DocumentType::code_list()
            )));
        }

        let body = CreateSeries {
            letter,
            document_type,
            folio,
        };
        self.mutate(&["create"], &body).await
    }

    /// Re-enable a disabled series.
    pub async fn enable(&self, uid: &str) -> Result<String, FacturaError> {
        self.mutate(&[uid, "up"], &Value::Object(Default::default()))
            .await
    }

    /// Disable a series without deleting it.
    pub async fn disable(&self, uid: &str) -> Result<String, FacturaError> {
        self.mutate(&[uid, "down"], &Value::Object(Default::default()))
            .await
    }

    /// Delete a series.
    pub async fn delete(&self, uid: &str) -> Result<String, FacturaError> {
        self.mutate(&[uid, "drop"], &Value::Object(Default::default()))
            .await
    }

    async fn mutate<B: Serialize>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<String, FacturaError> {
        let envelope: MutationEnvelope = self
            .transport
            .post(VERSION, ENDPOINT, segments, body)
            .await?;
        check_status(envelope.status(), envelope.message.as_ref())?;
        Ok(envelope
            .message
            .as_ref()
            .map(envelope_message)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn series_decodes_wire_names() {
        let json = json!({
            "SerieID": 1234,
            "SerieName": "F",
            "SerieType": "factura",
            "SerieDescription": "Facturación general",
            "SerieStatus": "Activa"
        });
        let series: Series = serde_json::from_value(json).unwrap();
        assert_eq!(series.id, 1234);
        assert_eq!(series.name, "F");
        assert_eq!(series.series_type, "factura");
        assert_eq!(series.status, "Activa");
    }

    #[test]
    fn mutation_envelope_accepts_either_status_key() {
        let with_status: MutationEnvelope =
            serde_json::from_value(json!({"status": "success", "message": "ok"})).unwrap();
        assert_eq!(with_status.status(), "success");

        let with_response: MutationEnvelope =
            serde_json::from_value(json!({"response": "success", "message": "ok"})).unwrap();
        assert_eq!(with_response.status(), "success");

        let with_neither: MutationEnvelope = serde_json::from_value(json!({})).unwrap();
        assert_eq!(with_neither.status(), "");
    }

    #[test]
    fn create_body_omits_missing_folio() {
        let body = CreateSeries {
            letter: "F",
            document_type: "factura",
            folio: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, json!({"letra": "F", "tipoDocumento": "factura"}));

        let body = CreateSeries {
            letter: "F",
            document_type: "factura",
            folio: Some(500),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["folio"], 500);
    }
}

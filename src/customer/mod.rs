//! Customer (billing counterparty) resource.
//!
//! Lives on the v1 `clients` endpoint family. The envelope key is
//! `status`; the payload arrives under `data` for the list call and
//! `Data` for everything else. Create/update validation failures carry
//! the message as a field-to-errors map, flattened into one string.

mod types;

pub use types::{Contact, Customer, CustomerUpdate, NewCustomer};

use serde::Deserialize;
use serde_json::Value;

use crate::error::FacturaError;
use crate::http::{ApiTransport, envelope_message};

const VERSION: &str = "v1";
const ENDPOINT: &str = "clients";

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    data: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct SingleEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(rename = "Data")]
    data: Option<Customer>,
}

#[derive(Debug, Deserialize)]
struct FilterEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
    #[serde(default, rename = "Data")]
    data: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<Value>,
}

fn check_status(status: &str, message: Option<&Value>) -> Result<(), FacturaError> {
    if status != "success" {
        return Err(FacturaError::Api(envelope_message(
            message.unwrap_or(&Value::Null),
        )));
    }
    Ok(())
}

/// Client for the customer resource.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    transport: ApiTransport,
}

impl CustomerClient {
    pub(crate) fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// List every registered customer.
    pub async fn all(&self) -> Result<Vec<Customer>, FacturaError> {
        let envelope: ListEnvelope = self.transport.get(VERSION, ENDPOINT, &[], &[]).await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        Ok(envelope.data)
    }

    /// Look up one customer by RFC or UID; the server disambiguates.
    pub async fn get_by_id(&self, id: &str) -> Result<Customer, FacturaError> {
        let envelope: SingleEnvelope = self.transport.get(VERSION, ENDPOINT, &[id], &[]).await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        envelope
            .data
            .ok_or_else(|| FacturaError::Decode("response is missing the Data payload".into()))
    }

    /// List the customers sharing a duplicated RFC.
    pub async fn filter_duplicated_by_rfc(
        &self,
        rfc: &str,
    ) -> Result<Vec<Customer>, FacturaError> {
        let envelope: FilterEnvelope = self
            .transport
            .get(VERSION, ENDPOINT, &["rfc", rfc], &[])
            .await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        Ok(envelope.data)
    }

    /// Register a new customer; returns the record as stored server-side.
    pub async fn create(&self, customer: &NewCustomer) -> Result<Customer, FacturaError> {
        let envelope: SingleEnvelope = self
            .transport
            .post(VERSION, ENDPOINT, &["create"], customer)
            .await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        envelope
            .data
            .ok_or_else(|| FacturaError::Decode("response is missing the Data payload".into()))
    }

    /// Partially update a customer; only the fields set on `update` are
    /// sent. Returns the record reflecting the post-update state.
    pub async fn update(
        &self,
        uid: &str,
        update: &CustomerUpdate,
    ) -> Result<Customer, FacturaError> {
        let envelope: SingleEnvelope = self
            .transport
            .post(VERSION, ENDPOINT, &[uid, "update"], update)
            .await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        envelope
            .data
            .ok_or_else(|| FacturaError::Decode("response is missing the Data payload".into()))
    }

    /// Delete a customer; returns the server's confirmation message.
    pub async fn delete(&self, uid: &str) -> Result<String, FacturaError> {
        let envelope: MessageEnvelope = self
            .transport
            .post(VERSION, ENDPOINT, &[uid, "drop"], &Value::Object(Default::default()))
            .await?;
        check_status(&envelope.status, envelope.message.as_ref())?;
        Ok(envelope
            .message
            .as_ref()
            .map(envelope_message)
            .unwrap_or_default())
    }
}

//! Provider implementation for Indianapolis using the indy.gov API.

/// Endpoint and client settings.
pub mod config;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use indytrash_core::{
    model::{CanonicalAddress, Coordinates, JurisdictionMeta, Parcel, ParcelQuery, PickupRecord},
    plugin::ResolverPlugin,
    ports::{GeocodePort, ParcelPort, PortError, SchedulePort},
};

pub use config::{ConfigError, IndyConfig};

/// Response from /api/v1/search_gis_address
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    addresses: Option<Vec<Value>>,
    // other keys (query echo, paging) are ignored
}

/// Address normalization against the GIS address search.
pub struct IndyGeocodePort {
    config: Arc<IndyConfig>,
}

impl IndyGeocodePort {
    /// Create a new geocode port using the given settings.
    #[must_use]
    pub fn new(config: Arc<IndyConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl GeocodePort for IndyGeocodePort {
    async fn search(&self, fragment: &str) -> Result<Vec<CanonicalAddress>, PortError> {
        let client = client(&self.config)?;
        let req = client
            .get(self.config.geocode_url.clone())
            .query(&[("address_fragment", fragment)]);

        let resp = fetch_json::<SearchResponse>(req).await?;
        decode_entries("address", resp.addresses.unwrap_or_default())
    }
}

/// Parcel lookup against /api/v1/parcel.
pub struct IndyParcelPort {
    config: Arc<IndyConfig>,
}

impl IndyParcelPort {
    /// Create a new parcel port using the given settings.
    #[must_use]
    pub fn new(config: Arc<IndyConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ParcelPort for IndyParcelPort {
    async fn parcels(&self, query: &ParcelQuery) -> Result<Vec<Parcel>, PortError> {
        let client = client(&self.config)?;
        let req = client
            .get(self.config.parcel_url.clone())
            .query(&query.params());

        // The body is expected to be a JSON array; anything else is malformed.
        match fetch_json::<Value>(req).await? {
            Value::Array(items) => decode_entries("parcel", items),
            other => Err(PortError::Malformed(format!(
                "expected a list of parcels, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Trash pickup lookup against /api/v1/indy_trash_pickup.
pub struct IndySchedulePort {
    config: Arc<IndyConfig>,
}

impl IndySchedulePort {
    /// Create a new schedule port using the given settings.
    #[must_use]
    pub fn new(config: Arc<IndyConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SchedulePort for IndySchedulePort {
    async fn pickup(&self, coordinates: &Coordinates) -> Result<Option<PickupRecord>, PortError> {
        let client = client(&self.config)?;
        let mut req = client.get(self.config.schedule_url.clone());

        if let Some(workflow_id) = &self.config.workflow_id {
            req = req.query(&[("__workflow_id", workflow_id)]);
        }
        let req = req.query(&[("x", coordinates.x.as_str()), ("y", coordinates.y.as_str())]);

        fetch_json::<Option<PickupRecord>>(req).await
    }
}

/// Build the plugin bundle for the Indianapolis provider.
#[must_use]
pub fn plugin(config: IndyConfig) -> ResolverPlugin {
    let config = Arc::new(config);

    ResolverPlugin {
        meta: jurisdiction_meta(),
        geocode_port: Arc::new(IndyGeocodePort::new(Arc::clone(&config))),
        parcel_port: Arc::new(IndyParcelPort::new(Arc::clone(&config))),
        schedule_port: Arc::new(IndySchedulePort::new(config)),
    }
}

fn jurisdiction_meta() -> JurisdictionMeta {
    JurisdictionMeta {
        id: String::from("indianapolis"),
        name: String::from("Indianapolis, IN"),
    }
}

// Each call gets its own client so concurrent runs share no connection state;
// it is dropped when the call returns.
fn client(config: &IndyConfig) -> Result<Client, PortError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()
        .map_err(PortError::from)
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    let resp = req.send().await.map_err(PortError::from)?;
    let status = resp.status();
    debug!(url = %resp.url(), %status, "Lookup service responded");

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        return Err(PortError::Unprocessable);
    }
    if !status.is_success() {
        return Err(PortError::Status(status.as_u16()));
    }

    let body = resp.bytes().await.map_err(PortError::from)?;
    serde_json::from_slice(&body).map_err(|err| PortError::Malformed(err.to_string()))
}

// Callers only act on the first entry, so only that one has to decode; later
// entries of the wrong shape are dropped.
fn decode_entries<T: DeserializeOwned>(
    kind: &'static str,
    items: Vec<Value>,
) -> Result<Vec<T>, PortError> {
    let mut items = items.into_iter();
    let Some(first) = items.next() else {
        return Ok(Vec::new());
    };
    let first = serde_json::from_value(first)
        .map_err(|err| PortError::Malformed(format!("{kind} entry: {err}")))?;

    let mut decoded = vec![first];
    for item in items {
        match serde_json::from_value(item) {
            Ok(entry) => decoded.push(entry),
            Err(err) => warn!(kind, error = %err, "Skipping unreadable trailing entry"),
        }
    }
    Ok(decoded)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

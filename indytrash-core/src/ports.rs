//! Traits describing the three lookup services and their shared error type.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{CanonicalAddress, Coordinates, Parcel, ParcelQuery, PickupRecord};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to a lookup service.
pub enum PortError {
    /// Network layer failed, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The service rejected the input as unprocessable (HTTP 422).
    #[error("Unprocessable input")]
    Unprocessable,
    /// The service answered with a non-success status other than 422.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
/// Address normalization and geocoding backend.
pub trait GeocodePort: Send + Sync {
    /// Look up address candidates matching a free-text fragment.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the service rejects the input.
    async fn search(&self, fragment: &str) -> Result<Vec<CanonicalAddress>, PortError>;
}

#[async_trait]
/// Parcel lookup backend.
pub trait ParcelPort: Send + Sync {
    /// Fetch parcel records for a validated address.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the body is malformed.
    async fn parcels(&self, query: &ParcelQuery) -> Result<Vec<Parcel>, PortError>;
}

#[async_trait]
/// Trash pickup schedule backend.
pub trait SchedulePort: Send + Sync {
    /// Fetch the pickup record for a coordinate pair.
    ///
    /// `Ok(None)` means the service answered with an empty body.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the body is malformed.
    async fn pickup(&self, coordinates: &Coordinates) -> Result<Option<PickupRecord>, PortError>;
}

//! Failure reasons reported by each lookup stage.

use crate::ports::PortError;

/// Sentence returned when the address could not be validated.
pub const ADDRESS_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't validate that address. Please provide a valid Indianapolis address.";
/// Sentence returned when no usable parcel was found.
pub const PARCEL_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't retrieve parcel information for that address.";
/// Sentence returned when the pickup schedule could not be retrieved.
pub const SCHEDULE_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't retrieve trash pickup details for that address.";

#[derive(thiserror::Error, Debug)]
/// Why address normalization failed.
pub enum NormalizeFailure {
    /// The query had no tokens; nothing was sent.
    #[error("address query is empty")]
    EmptyQuery,
    /// The geocoder returned no candidates.
    #[error("no address found")]
    NoAddressFound,
    /// Every truncated form of the query was rejected as unprocessable.
    #[error("address rejected as unprocessable after {attempts} attempt(s)")]
    Unprocessable {
        /// Number of requests made before giving up.
        attempts: usize,
    },
    /// The geocoder could not be reached or answered with an error.
    #[error("geocoding request failed: {0}")]
    Transport(#[source] PortError),
}

#[derive(thiserror::Error, Debug)]
/// Why the parcel lookup failed.
pub enum LocateFailure {
    /// The address candidate lacked required fields; nothing was sent.
    #[error("address is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    /// The parcel service returned an empty or malformed result.
    #[error("no parcel data found")]
    NoParcelData,
    /// The first parcel had no usable coordinate pair.
    #[error("parcel data missing coordinates")]
    MissingCoordinates,
    /// The parcel service could not be reached or answered with an error.
    #[error("parcel request failed: {0}")]
    Transport(#[source] PortError),
}

#[derive(thiserror::Error, Debug)]
/// Why the schedule lookup failed.
pub enum ScheduleFailure {
    /// The parcel lacked a coordinate pair; nothing was sent.
    #[error("parcel is missing coordinates")]
    MissingCoordinates,
    /// The schedule service answered without a pickup day.
    #[error("missing pickup day")]
    MissingPickupDay,
    /// The schedule service could not be reached or answered with an error.
    #[error("schedule request failed: {0}")]
    Transport(#[source] PortError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Pipeline stage at which a run stopped.
pub enum Stage {
    /// Address normalization.
    Normalize,
    /// Parcel lookup.
    Locate,
    /// Schedule lookup.
    Schedule,
}

#[derive(thiserror::Error, Debug)]
/// Terminal failure of a pipeline run, tagged with the stage that failed.
pub enum ResolveError {
    /// Stage 1 failed.
    #[error("address normalization failed: {0}")]
    Normalize(#[from] NormalizeFailure),
    /// Stage 2 failed.
    #[error("parcel lookup failed: {0}")]
    Locate(#[from] LocateFailure),
    /// Stage 3 failed.
    #[error("schedule lookup failed: {0}")]
    Schedule(#[from] ScheduleFailure),
}

impl ResolveError {
    /// The stage that produced this failure.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::Normalize(_) => Stage::Normalize,
            Self::Locate(_) => Stage::Locate,
            Self::Schedule(_) => Stage::Schedule,
        }
    }

    /// Fixed caller-facing sentence for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self.stage() {
            Stage::Normalize => ADDRESS_FAILURE_MESSAGE,
            Stage::Locate => PARCEL_FAILURE_MESSAGE,
            Stage::Schedule => SCHEDULE_FAILURE_MESSAGE,
        }
    }
}

//! Stage 2: find the parcel, and with it the map coordinates, of an address.

use tracing::error;

use crate::failure::LocateFailure;
use crate::model::{CanonicalAddress, Parcel};
use crate::ports::{ParcelPort, PortError};

/// Look up the parcel for a canonical address.
///
/// The first parcel returned is used and must carry both coordinates.
///
/// # Errors
///
/// Returns a [`LocateFailure`] when the address is incomplete (no request is
/// made), the service returns nothing usable, or the request fails.
pub async fn locate(
    port: &dyn ParcelPort,
    address: &CanonicalAddress,
) -> Result<Parcel, LocateFailure> {
    let query = address.parcel_query().map_err(|missing| {
        error!(
            missing = ?missing,
            "Missing required keys in address for parcel lookup"
        );
        LocateFailure::MissingFields(missing)
    })?;

    let parcels = match port.parcels(&query).await {
        Ok(parcels) => parcels,
        Err(PortError::Malformed(detail)) => {
            error!(%detail, "Parcel service returned a malformed response");
            return Err(LocateFailure::NoParcelData);
        }
        Err(err) => {
            error!(error = %err, "Error calling parcel service");
            return Err(LocateFailure::Transport(err));
        }
    };

    let Some(parcel) = parcels.into_iter().next() else {
        error!(query = ?query, "No parcel data found");
        return Err(LocateFailure::NoParcelData);
    };

    if parcel.coordinates().is_none() {
        error!(parcel = ?parcel, "Parcel data missing x/y coordinates");
        return Err(LocateFailure::MissingCoordinates);
    }

    Ok(parcel)
}

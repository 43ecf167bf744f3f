//! Stage 3: fetch the pickup schedule for a parcel's coordinates.

use tracing::error;

use crate::failure::ScheduleFailure;
use crate::model::{Parcel, Schedule};
use crate::ports::SchedulePort;

/// Look up the trash pickup schedule at the parcel's location.
///
/// # Errors
///
/// Returns a [`ScheduleFailure`] when the parcel has no coordinates (no
/// request is made), the answer lacks a pickup day, or the request fails.
pub async fn lookup_schedule(
    port: &dyn SchedulePort,
    parcel: &Parcel,
) -> Result<Schedule, ScheduleFailure> {
    let Some(coordinates) = parcel.coordinates() else {
        error!(parcel = ?parcel, "Missing x or y coordinates in parcel");
        return Err(ScheduleFailure::MissingCoordinates);
    };

    let record = port.pickup(&coordinates).await.map_err(|err| {
        error!(error = %err, "Error calling trash pickup service");
        ScheduleFailure::Transport(err)
    })?;

    record.and_then(Schedule::from_record).ok_or_else(|| {
        error!(
            x = %coordinates.x,
            y = %coordinates.y,
            "Trash pickup data missing pickup day"
        );
        ScheduleFailure::MissingPickupDay
    })
}

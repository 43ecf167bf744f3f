//! Bundle of the ports a provider supplies for one jurisdiction.

use std::sync::Arc;

use crate::model::JurisdictionMeta;
use crate::ports::{GeocodePort, ParcelPort, SchedulePort};

/// Collection of ports implementing a provider for a single jurisdiction.
pub struct ResolverPlugin {
    /// Static metadata describing the jurisdiction.
    pub meta: JurisdictionMeta,
    /// Address normalization backend.
    pub geocode_port: Arc<dyn GeocodePort>,
    /// Parcel lookup backend.
    pub parcel_port: Arc<dyn ParcelPort>,
    /// Pickup schedule backend.
    pub schedule_port: Arc<dyn SchedulePort>,
}

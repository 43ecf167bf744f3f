//! In-memory ports for exercising the stages without a network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{CanonicalAddress, Coordinates, Parcel, ParcelQuery, PickupRecord};
use crate::ports::{GeocodePort, ParcelPort, PortError, SchedulePort};

enum Reply<T> {
    Ok(T),
    Unprocessable,
    Status(u16),
    Malformed,
}

impl<T: Clone> Reply<T> {
    fn to_result(&self) -> Result<T, PortError> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Unprocessable => Err(PortError::Unprocessable),
            Self::Status(status) => Err(PortError::Status(*status)),
            Self::Malformed => Err(PortError::Malformed("not a list".to_owned())),
        }
    }
}

pub(crate) fn candidate(address1: &str) -> CanonicalAddress {
    CanonicalAddress {
        address1: Some(address1.to_owned()),
        city: Some("INDIANAPOLIS".to_owned()),
        level: Some(String::new()),
        number: Some("1234".to_owned()),
        state: Some("IN".to_owned()),
        tag: Some("ADDR".to_owned()),
        zipcode: Some("46204".to_owned()),
        ..CanonicalAddress::default()
    }
}

pub(crate) fn parcel_at(x: f64, y: f64) -> Parcel {
    Parcel {
        x: Some(x.into()),
        y: Some(y.into()),
        ..Parcel::default()
    }
}

pub(crate) fn pickup(day: &str, heavy: &str) -> PickupRecord {
    PickupRecord {
        pickup_day: Some(day.to_owned()),
        heavy_trash_pickup: Some(heavy.to_owned()),
    }
}

/// Geocoder answering from a fixed table; unknown fragments get no candidates.
#[derive(Default)]
pub(crate) struct FakeGeocoder {
    replies: HashMap<String, Reply<Vec<CanonicalAddress>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeGeocoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, fragment: &str, candidates: Vec<CanonicalAddress>) -> Self {
        self.replies
            .insert(fragment.to_owned(), Reply::Ok(candidates));
        self
    }

    pub(crate) fn reject(mut self, fragment: &str) -> Self {
        self.replies
            .insert(fragment.to_owned(), Reply::Unprocessable);
        self
    }

    pub(crate) fn fail_with_status(mut self, fragment: &str, status: u16) -> Self {
        self.replies
            .insert(fragment.to_owned(), Reply::Status(status));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl GeocodePort for FakeGeocoder {
    async fn search(&self, fragment: &str) -> Result<Vec<CanonicalAddress>, PortError> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(fragment.to_owned());
        self.replies
            .get(fragment)
            .map_or_else(|| Ok(Vec::new()), Reply::to_result)
    }
}

/// Parcel service returning one canned reply for every query.
pub(crate) struct FakeParcels {
    reply: Reply<Vec<Parcel>>,
    calls: Mutex<Vec<ParcelQuery>>,
}

impl FakeParcels {
    pub(crate) fn returning(parcels: Vec<Parcel>) -> Self {
        Self::with_reply(Reply::Ok(parcels))
    }

    pub(crate) fn malformed() -> Self {
        Self::with_reply(Reply::Malformed)
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    fn with_reply(reply: Reply<Vec<Parcel>>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<ParcelQuery> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ParcelPort for FakeParcels {
    async fn parcels(&self, query: &ParcelQuery) -> Result<Vec<Parcel>, PortError> {
        self.calls.lock().expect("calls lock").push(query.clone());
        self.reply.to_result()
    }
}

/// Schedule service returning one canned reply for every query.
pub(crate) struct FakeSchedules {
    reply: Reply<Option<PickupRecord>>,
    calls: Mutex<Vec<Coordinates>>,
}

impl FakeSchedules {
    pub(crate) fn returning(record: Option<PickupRecord>) -> Self {
        Self::with_reply(Reply::Ok(record))
    }

    pub(crate) fn failing(status: u16) -> Self {
        Self::with_reply(Reply::Status(status))
    }

    fn with_reply(reply: Reply<Option<PickupRecord>>) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<Coordinates> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl SchedulePort for FakeSchedules {
    async fn pickup(&self, coordinates: &Coordinates) -> Result<Option<PickupRecord>, PortError> {
        self.calls.lock().expect("calls lock").push(coordinates.clone());
        self.reply.to_result()
    }
}

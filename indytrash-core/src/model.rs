//! Domain data structures flowing through the resolution pipeline.

use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing the jurisdiction served by a plugin.
pub struct JurisdictionMeta {
    /// Short machine-friendly identifier.
    pub id: String,
    /// Human-friendly name.
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Address candidate as returned by the geocoding service.
///
/// Every field the parcel service needs is kept optional here; completeness is
/// checked when the candidate is turned into a [`ParcelQuery`].
pub struct CanonicalAddress {
    /// Street line, e.g. `1234 N MAIN ST`.
    #[serde(default, deserialize_with = "scalar_text")]
    pub address1: Option<String>,
    /// City name.
    #[serde(default, deserialize_with = "scalar_text")]
    pub city: Option<String>,
    /// Level or unit designator.
    #[serde(default, deserialize_with = "scalar_text")]
    pub level: Option<String>,
    /// House number.
    #[serde(default, deserialize_with = "scalar_text")]
    pub number: Option<String>,
    /// State abbreviation.
    #[serde(default, deserialize_with = "scalar_text")]
    pub state: Option<String>,
    /// Classification tag assigned by the geocoder.
    #[serde(default, deserialize_with = "scalar_text")]
    pub tag: Option<String>,
    /// Postal code.
    #[serde(default, deserialize_with = "scalar_text")]
    pub zipcode: Option<String>,
    /// Any other fields the geocoder returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalAddress {
    fn fields(&self) -> [(&'static str, Option<&String>); 7] {
        [
            ("address1", self.address1.as_ref()),
            ("city", self.city.as_ref()),
            ("level", self.level.as_ref()),
            ("number", self.number.as_ref()),
            ("state", self.state.as_ref()),
            ("tag", self.tag.as_ref()),
            ("zipcode", self.zipcode.as_ref()),
        ]
    }

    /// Names of required fields that are absent.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter_map(|(key, value)| value.is_none().then_some(key))
            .collect()
    }

    /// Turn the candidate into a parcel lookup request.
    ///
    /// # Errors
    ///
    /// Returns the names of all missing fields when the candidate is incomplete.
    pub fn parcel_query(&self) -> Result<ParcelQuery, Vec<&'static str>> {
        match (
            &self.address1,
            &self.city,
            &self.level,
            &self.number,
            &self.state,
            &self.tag,
            &self.zipcode,
        ) {
            (
                Some(address1),
                Some(city),
                Some(level),
                Some(number),
                Some(state),
                Some(tag),
                Some(zipcode),
            ) => Ok(ParcelQuery {
                address1: address1.clone(),
                city: city.clone(),
                level: level.clone(),
                number: number.clone(),
                state: state.clone(),
                tag_id: tag.clone(),
                zipcode: zipcode.clone(),
            }),
            _ => Err(self.missing_keys()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Complete set of parameters for a parcel lookup.
pub struct ParcelQuery {
    /// Street line.
    pub address1: String,
    /// City name.
    pub city: String,
    /// Level or unit designator.
    pub level: String,
    /// House number.
    pub number: String,
    /// State abbreviation.
    pub state: String,
    /// The geocoder's `tag`, sent under the parcel service's `tag_id` name.
    pub tag_id: String,
    /// Postal code.
    pub zipcode: String,
}

impl ParcelQuery {
    /// Query parameters in the parcel service's naming.
    #[must_use]
    pub fn params(&self) -> [(&'static str, &str); 7] {
        [
            ("address1", self.address1.as_str()),
            ("city", self.city.as_str()),
            ("level", self.level.as_str()),
            ("number", self.number.as_str()),
            ("state", self.state.as_str()),
            ("tag_id", self.tag_id.as_str()),
            ("zipcode", self.zipcode.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One numeric coordinate, kept in the text form the parcel service used.
pub struct Coordinate(String);

impl Coordinate {
    /// Accept `text` when it reads as a finite number.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        text.parse::<f64>()
            .is_ok_and(f64::is_finite)
            .then(|| Self(text.to_owned()))
    }

    /// The coordinate exactly as it will be sent on.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Planar map coordinates of a parcel.
pub struct Coordinates {
    /// Easting.
    pub x: Coordinate,
    /// Northing.
    pub y: Coordinate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Parcel record returned by the parcel service.
pub struct Parcel {
    /// Easting, if the service supplied a numeric one.
    #[serde(default, deserialize_with = "coordinate")]
    pub x: Option<Coordinate>,
    /// Northing, if the service supplied a numeric one.
    #[serde(default, deserialize_with = "coordinate")]
    pub y: Option<Coordinate>,
    /// Remaining descriptive fields, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Parcel {
    /// Coordinate pair, when both halves are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            x: self.x.clone()?,
            y: self.y.clone()?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Raw payload of the schedule service.
pub struct PickupRecord {
    /// Regular pickup day label.
    #[serde(default)]
    pub pickup_day: Option<String>,
    /// Heavy trash pickup description; often empty.
    #[serde(default)]
    pub heavy_trash_pickup: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Interpreted pickup schedule for one address.
pub struct Schedule {
    /// Regular weekly pickup day.
    pub pickup_day: String,
    /// Heavy trash pickup info, `None` when the service left it blank.
    pub heavy_trash_pickup: Option<String>,
}

impl Schedule {
    /// Interpret a raw record; `None` when it carries no pickup day.
    #[must_use]
    pub fn from_record(record: PickupRecord) -> Option<Self> {
        let pickup_day = record.pickup_day?;
        let heavy_trash_pickup = record
            .heavy_trash_pickup
            .filter(|heavy| !heavy.is_empty());
        Some(Self {
            pickup_day,
            heavy_trash_pickup,
        })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "Your regular trash pickup day is {}.",
            self.pickup_day
        )?;
        if let Some(heavy) = &self.heavy_trash_pickup {
            write!(formatter, " Heavy trash pickup: {heavy}.")?;
        }
        Ok(())
    }
}

// The geocoder is loose about types: house numbers and zip codes may arrive as
// JSON numbers. Null, arrays, and objects count as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

// Coordinates come as numbers or numeric strings; either way the text is passed
// on unchanged.
fn coordinate<'de, D>(deserializer: D) -> Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => Coordinate::parse(&number.to_string()),
        Value::String(text) => Coordinate::parse(&text),
        _ => None,
    })
}

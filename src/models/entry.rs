use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Category;

/// A recorded emission as returned by the service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub activity: String,
    pub category: Category,
    /// kg CO₂e
    pub carbon_amount: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Body of a create request: an entry before the service assigns its id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCarbonEntry {
    pub activity: String,
    pub category: Category,
    pub carbon_amount: f64,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl NewCarbonEntry {
    pub fn new(
        activity: impl Into<String>,
        category: Category,
        carbon_amount: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            activity: activity.into(),
            category,
            carbon_amount,
            location: location.into(),
            latitude: None,
            longitude: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_id(self, id: u64) -> CarbonEntry {
        CarbonEntry {
            id: Some(id),
            activity: self.activity,
            category: self.category,
            carbon_amount: self.carbon_amount,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            timestamp: self.timestamp,
        }
    }
}

/// Body of an update request. Absent fields are left out of the JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbon_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.activity.is_none()
            && self.category.is_none()
            && self.carbon_amount.is_none()
            && self.location.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    /// Apply the patch to a local copy. The id is never touched.
    pub fn apply_to(&self, entry: &mut CarbonEntry) {
        if let Some(ref activity) = self.activity {
            entry.activity = activity.clone();
        }
        if let Some(ref category) = self.category {
            entry.category = category.clone();
        }
        if let Some(amount) = self.carbon_amount {
            entry.carbon_amount = amount;
        }
        if let Some(ref location) = self.location {
            entry.location = location.clone();
        }
        if self.latitude.is_some() {
            entry.latitude = self.latitude;
        }
        if self.longitude.is_some() {
            entry.longitude = self.longitude;
        }
    }
}

/// Accepts RFC 3339 or an offset-less ISO date-time, which is read as local time.
pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| serde::de::Error::custom(format!("bad timestamp: {raw}")))
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => Some(local.with_timezone(&Utc)),
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

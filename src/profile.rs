use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(String);

impl ProfileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh identifier that does not depend on how many profiles exist.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A person shown in the list, map and detail views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Set when `lat`/`lng` were generated rather than geocoded from `address`.
    #[serde(default)]
    pub location_is_placeholder: bool,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl Profile {
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.address.to_lowercase().contains(needle)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        self.matches_lowercase(&query.to_lowercase())
    }

    pub fn contact_display(&self) -> &str {
        match self.contact.as_deref() {
            Some(contact) if !contact.is_empty() => contact,
            _ => "Not provided",
        }
    }

    pub fn interests_display(&self) -> String {
        if self.interests.is_empty() {
            "None".to_string()
        } else {
            self.interests.join(", ")
        }
    }

    pub fn coordinates_display(&self) -> String {
        format!("Lat: {}, Lng: {}", self.lat, self.lng)
    }
}

/// Input buffer for the admin form. Not a `Profile` until committed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftProfile {
    pub name: String,
    pub description: String,
    pub address: String,
}

impl DraftProfile {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.address.is_empty()
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Name => self.name = value,
            DraftField::Description => self.description = value,
            DraftField::Address => self.address = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    Address,
}

impl DraftField {
    pub const ALL: [DraftField; 3] = [
        DraftField::Name,
        DraftField::Description,
        DraftField::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Name => "Name",
            DraftField::Description => "Description",
            DraftField::Address => "Address",
        }
    }
}

impl FromStr for DraftField {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(DraftField::Name),
            "description" => Ok(DraftField::Description),
            "address" => Ok(DraftField::Address),
            other => Err(StoreError::UnknownDraftField(other.to_string())),
        }
    }
}

pub fn seed_profiles() -> Vec<Profile> {
    vec![
        Profile {
            id: ProfileId::new("1"),
            name: "John Doe".to_string(),
            image_url: "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
            description: "Software Engineer from San Francisco".to_string(),
            address: "Golden Gate Bridge, San Francisco, CA".to_string(),
            lat: 37.8199,
            lng: -122.4783,
            location_is_placeholder: false,
            contact: Some("john@example.com".to_string()),
            interests: vec!["Hiking".to_string(), "Photography".to_string()],
        },
        Profile {
            id: ProfileId::new("2"),
            name: "Jane Smith".to_string(),
            image_url: "https://randomuser.me/api/portraits/women/1.jpg".to_string(),
            description: "Product Designer from New York".to_string(),
            address: "Times Square, New York, NY".to_string(),
            lat: 40.7580,
            lng: -73.9855,
            location_is_placeholder: false,
            contact: Some("jane@example.com".to_string()),
            interests: vec!["Painting".to_string(), "Travel".to_string()],
        },
    ]
}

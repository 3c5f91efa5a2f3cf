use crate::profile::{DraftProfile, Profile};

/// Snapshot of the draft taken when a creation starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfileRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub image_url: String,
}

impl NewProfileRequest {
    pub fn from_draft(draft: &DraftProfile, image_url: &str) -> Self {
        Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            address: draft.address.clone(),
            image_url: image_url.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    InitialLoad,
    CreateProfile(NewProfileRequest),
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    InitialLoadFinished,
    ProfileCreated(Profile),
    ProfileCreationFailed(String),
}

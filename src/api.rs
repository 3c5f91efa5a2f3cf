//! Simulated profile backend. Nothing here leaves the process; the delays
//! stand in for request latency.

use rand::Rng;
use std::time::Duration;

use crate::app_state::NewProfileRequest;
use crate::profile::{Profile, ProfileId};

pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://randomuser.me/api/portraits/lego/1.jpg";

/// Wait out the initial "fetch" window. Seed data is already in the store.
pub async fn load_profiles(latency: Duration) {
    tokio::time::sleep(latency).await;
}

/// Create a profile after the simulated request latency
pub async fn create_profile(request: &NewProfileRequest, latency: Duration) -> Profile {
    tokio::time::sleep(latency).await;
    let profile = build_profile(request);
    tracing::debug!(profile_id = %profile.id, "Simulated create completed");
    profile
}

/// Coordinates are placeholders, not a geocode of the address.
pub fn build_profile(request: &NewProfileRequest) -> Profile {
    let mut rng = rand::rng();
    Profile {
        id: ProfileId::generate(),
        name: request.name.clone(),
        image_url: request.image_url.clone(),
        description: request.description.clone(),
        address: request.address.clone(),
        lat: rng.random_range(-90.0..=90.0),
        lng: rng.random_range(-180.0..=180.0),
        location_is_placeholder: true,
        contact: None,
        interests: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> NewProfileRequest {
        NewProfileRequest {
            name: "Alice".to_string(),
            description: "Artist".to_string(),
            address: "Paris".to_string(),
            image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    #[test]
    fn builds_profile_from_request_with_placeholder_location() {
        for _ in 0..100 {
            let profile = build_profile(&request());
            assert_eq!(profile.name, "Alice");
            assert_eq!(profile.description, "Artist");
            assert_eq!(profile.address, "Paris");
            assert_eq!(profile.image_url, DEFAULT_PLACEHOLDER_IMAGE_URL);
            assert!((-90.0..=90.0).contains(&profile.lat));
            assert!((-180.0..=180.0).contains(&profile.lng));
            assert!(profile.location_is_placeholder);
            assert!(profile.contact.is_none());
            assert!(profile.interests.is_empty());
        }
    }

    #[tokio::test]
    async fn create_profile_waits_for_latency() {
        let start = std::time::Instant::now();
        let profile = create_profile(&request(), Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
        assert_eq!(profile.name, "Alice");
    }
}

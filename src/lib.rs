pub mod api;
pub mod app;
pub mod app_state;
pub mod config;
pub mod error;
pub mod profile;
pub mod settings;
pub mod store;
pub mod worker;

#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use profile::{DraftField, DraftProfile, Profile, ProfileId};
pub use store::ProfileStore;

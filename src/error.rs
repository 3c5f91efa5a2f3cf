use thiserror::Error;

use crate::profile::ProfileId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Profile '{0}' not found")]
    NotFound(ProfileId),
    #[error("Unknown draft field '{0}'")]
    UnknownDraftField(String),
    #[error("Duplicate profile id '{0}'")]
    DuplicateId(ProfileId),
    #[error("Profile name must not be empty")]
    EmptyName,
}

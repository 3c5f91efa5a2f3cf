use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::api::{self, DEFAULT_PLACEHOLDER_IMAGE_URL};
use crate::app_state::{AppEvent, NewProfileRequest};
use crate::error::StoreError;
use crate::profile::{seed_profiles, DraftField, DraftProfile, Profile, ProfileId};
use crate::settings::ExplorerSettings;

/// Profile collection plus the user's search, selection and draft state.
///
/// The view owns one store for the whole session and re-renders from its
/// accessors after every call. `filtered` holds indices into `profiles`,
/// which is append-only, so they never go stale.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
    search_query: String,
    filtered: Vec<usize>,
    selected: Option<ProfileId>,
    detailed: Option<ProfileId>,
    draft: DraftProfile,
    pending_loads: usize,
    admin_mode: bool,
    placeholder_image_url: String,
    last_updated: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::from_unique(seed_profiles())
    }

    /// Rejects a list in which two profiles share an id.
    pub fn with_profiles(profiles: Vec<Profile>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(&profile.id) {
                return Err(StoreError::DuplicateId(profile.id.clone()));
            }
        }
        Ok(Self::from_unique(profiles))
    }

    fn from_unique(profiles: Vec<Profile>) -> Self {
        let filtered = (0..profiles.len()).collect();
        Self {
            profiles,
            search_query: String::new(),
            filtered,
            selected: None,
            detailed: None,
            draft: DraftProfile::default(),
            pending_loads: 0,
            admin_mode: false,
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
            last_updated: None,
            last_error: None,
        }
    }

    pub fn from_settings(settings: &ExplorerSettings) -> Self {
        let mut store = Self::new();
        store.admin_mode = settings.admin_mode;
        store.placeholder_image_url = settings.placeholder_image_url.clone();
        store
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn filtered_profiles(&self) -> Vec<&Profile> {
        self.filtered.iter().map(|&idx| &self.profiles[idx]).collect()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_profile(&self) -> Option<&Profile> {
        self.selected.as_ref().and_then(|id| self.find(id))
    }

    pub fn detailed_profile(&self) -> Option<&Profile> {
        self.detailed.as_ref().and_then(|id| self.find(id))
    }

    pub fn draft(&self) -> &DraftProfile {
        &self.draft
    }

    pub fn is_loading(&self) -> bool {
        self.pending_loads > 0
    }

    pub fn admin_mode(&self) -> bool {
        self.admin_mode
    }

    pub fn set_admin_mode(&mut self, enabled: bool) {
        self.admin_mode = enabled;
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    pub fn find(&self, id: &ProfileId) -> Option<&Profile> {
        self.profiles.iter().find(|profile| &profile.id == id)
    }

    /// Selections are not touched, even if they no longer match.
    pub fn set_search_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
        self.refilter();
    }

    fn refilter(&mut self) {
        let needle = self.search_query.to_lowercase();
        self.filtered = self
            .profiles
            .iter()
            .enumerate()
            .filter(|(_, profile)| profile.matches_lowercase(&needle))
            .map(|(idx, _)| idx)
            .collect();
    }

    pub fn select_for_map(&mut self, id: &ProfileId) -> Result<(), StoreError> {
        self.ensure_exists(id)?;
        self.selected = Some(id.clone());
        Ok(())
    }

    pub fn clear_map_selection(&mut self) {
        self.selected = None;
    }

    pub fn select_for_details(&mut self, id: &ProfileId) -> Result<(), StoreError> {
        self.ensure_exists(id)?;
        self.detailed = Some(id.clone());
        Ok(())
    }

    pub fn clear_details(&mut self) {
        self.detailed = None;
    }

    fn ensure_exists(&self, id: &ProfileId) -> Result<(), StoreError> {
        if self.find(id).is_some() {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.clone()))
        }
    }

    pub fn begin_load(&mut self) {
        self.pending_loads += 1;
    }

    pub fn end_load(&mut self) {
        if self.pending_loads == 0 {
            tracing::debug!("end_load called without an open load");
            return;
        }
        self.pending_loads -= 1;
    }

    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set(field, value.into());
    }

    pub fn update_draft_named(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), StoreError> {
        let field: DraftField = field.parse()?;
        self.update_draft(field, value);
        Ok(())
    }

    /// First half of a creation: validate and snapshot the draft, then open
    /// a loading bracket that `commit_created` closes.
    pub fn begin_create(&mut self) -> Result<NewProfileRequest, StoreError> {
        if self.draft.name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        let request = NewProfileRequest::from_draft(&self.draft, &self.placeholder_image_url);
        self.begin_load();
        Ok(request)
    }

    /// Second half of a creation. Appends, refilters against the active
    /// query, clears the draft and closes the loading bracket in one step.
    /// An id already in the store is replaced with a fresh one.
    pub fn commit_created(&mut self, mut profile: Profile) -> ProfileId {
        if self.find(&profile.id).is_some() {
            let fresh = ProfileId::generate();
            tracing::warn!(
                profile_id = %profile.id,
                new_id = %fresh,
                "Re-keyed duplicate profile id"
            );
            profile.id = fresh;
        }
        let id = profile.id.clone();
        let needle = self.search_query.to_lowercase();
        let visible = profile.matches_lowercase(&needle);
        self.profiles.push(profile);
        if visible {
            self.filtered.push(self.profiles.len() - 1);
        }
        self.draft = DraftProfile::default();
        self.last_updated = Some(Utc::now());
        self.end_load();
        tracing::info!(profile_id = %id, visible, "Profile created");
        id
    }

    /// Create without simulated latency.
    pub fn create_profile_now(&mut self) -> Result<ProfileId, StoreError> {
        let request = self.begin_create()?;
        Ok(self.commit_created(api::build_profile(&request)))
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::InitialLoadFinished => {
                self.end_load();
                self.last_updated = Some(Utc::now());
            }
            AppEvent::ProfileCreated(profile) => {
                self.commit_created(profile);
            }
            AppEvent::ProfileCreationFailed(message) => {
                tracing::warn!(error = %message, "Profile creation failed");
                self.end_load();
                self.last_error = Some(message);
            }
        }
    }
}

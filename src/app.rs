use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use eframe::egui;

use crate::app_state::{AppCommand, AppEvent};
use crate::profile::{DraftField, ProfileId};
use crate::settings::{self, ExplorerSettings};
use crate::store::ProfileStore;
use crate::worker::{self, WorkerTimings};

#[derive(Debug, Clone)]
enum ListAction {
    ShowOnMap(ProfileId),
    ViewDetails(ProfileId),
}

pub struct ExplorerApp {
    store: ProfileStore,
    settings: ExplorerSettings,
    search_input: String,
    cmd_tx: Sender<AppCommand>,
    evt_rx: Receiver<AppEvent>,
    worker_handle: Option<JoinHandle<()>>,
}

impl ExplorerApp {
    pub fn new(settings: &ExplorerSettings) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::channel();
        let timings = WorkerTimings {
            initial_load: settings.initial_load(),
            create_latency: settings.create_latency(),
        };
        let worker_handle = worker::start_worker(cmd_rx, evt_tx, timings)?;

        let mut store = ProfileStore::from_settings(settings);
        store.begin_load();
        if cmd_tx.send(AppCommand::InitialLoad).is_err() {
            store.end_load();
        }

        Ok(Self {
            store,
            settings: settings.clone(),
            search_input: String::new(),
            cmd_tx,
            evt_rx,
            worker_handle: Some(worker_handle),
        })
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn poll_events(&mut self) {
        while let Ok(event) = self.evt_rx.try_recv() {
            self.store.apply_event(event);
        }
    }

    pub fn submit_new_profile(&mut self) {
        let request = match self.store.begin_create() {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected new profile");
                return;
            }
        };
        if let Err(err) = self.cmd_tx.send(AppCommand::CreateProfile(request)) {
            let message = format!("Worker unavailable: {}", err);
            self.store.apply_event(AppEvent::ProfileCreationFailed(message));
        }
    }

    /// Toggle the admin panel and remember the choice in the settings file.
    pub fn set_admin_mode(&mut self, enabled: bool) {
        self.store.set_admin_mode(enabled);
        self.settings.admin_mode = enabled;
        if let Err(err) = settings::save_settings(&self.settings) {
            tracing::warn!(error = %err, "Failed to save settings");
        }
    }

    fn apply_list_action(&mut self, action: ListAction) {
        let result = match &action {
            ListAction::ShowOnMap(id) => self.store.select_for_map(id),
            ListAction::ViewDetails(id) => self.store.select_for_details(id),
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, ?action, "Selection ignored");
        }
    }

    fn header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Profile Explorer");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search profiles...")
                    .desired_width(300.0),
            );
            if response.changed() {
                self.store.set_search_query(self.search_input.clone());
            }
            if self.store.is_loading() {
                ui.spinner();
            }
            if let Some(updated) = self.store.last_updated() {
                ui.weak(format!(
                    "Updated {}",
                    updated.with_timezone(&chrono::Local).format("%H:%M:%S")
                ));
            }
            let mut admin = self.store.admin_mode();
            if ui.checkbox(&mut admin, "Admin").changed() {
                self.set_admin_mode(admin);
            }
        });
    }

    fn body(&mut self, ui: &mut egui::Ui) {
        let mut action = None;
        let store = &self.store;

        ui.columns(2, |columns| {
            egui::ScrollArea::vertical()
                .id_salt("profile-list")
                .show(&mut columns[0], |ui| {
                    for profile in store.filtered_profiles() {
                        ui.group(|ui| {
                            ui.strong(&profile.name);
                            ui.label(&profile.description);
                            ui.horizontal(|ui| {
                                if ui.button("View on Map").clicked() {
                                    action = Some(ListAction::ShowOnMap(profile.id.clone()));
                                }
                                if ui.button("Details").clicked() {
                                    action = Some(ListAction::ViewDetails(profile.id.clone()));
                                }
                            });
                        });
                    }
                });

            let map = &mut columns[1];
            match store.selected_profile() {
                Some(profile) => {
                    map.heading(format!("Map View: {}", profile.name));
                    map.label(format!("📍 {}", profile.address));
                    map.separator();
                    map.label("Map would display here with marker at:");
                    map.label(profile.coordinates_display());
                    if profile.location_is_placeholder {
                        map.weak("Placeholder location");
                    }
                }
                None => {
                    map.label("Select a profile to view on map");
                }
            }
        });

        if let Some(action) = action {
            self.apply_list_action(action);
        }
    }

    fn admin_panel(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.heading("Admin Panel");
        ui.horizontal(|ui| {
            for field in DraftField::ALL {
                let mut value = self.store.draft().field(field).to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut value)
                        .hint_text(field.label())
                        .desired_width(160.0),
                );
                if response.changed() {
                    self.store.update_draft(field, value);
                }
            }
            if ui.button("Add Profile").clicked() {
                self.submit_new_profile();
            }
        });
    }

    fn details_window(&mut self, ctx: &egui::Context) {
        let Some(profile) = self.store.detailed_profile() else {
            return;
        };

        let mut open = true;
        egui::Window::new(profile.name.clone())
            .id(egui::Id::new("profile-details"))
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(format!("Address: {}", profile.address));
                ui.label(format!("Contact: {}", profile.contact_display()));
                ui.label(format!("Interests: {}", profile.interests_display()));
            });

        if !open {
            self.store.clear_details();
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.header(ui);

            if let Some(error) = self.store.last_error().map(str::to_string) {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, error);
                    if ui.small_button("Dismiss").clicked() {
                        self.store.dismiss_error();
                    }
                });
            }

            ui.separator();
            self.body(ui);

            if self.store.admin_mode() {
                self.admin_panel(ui);
            }
        });

        self.details_window(ctx);

        if self.store.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

impl Drop for ExplorerApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(AppCommand::Shutdown);
        if let Some(handle) = self.worker_handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ADMIN_ENV, CREATE_DELAY_ENV, HOME_ENV};
    use crate::test_support::{EnvGuard, ENV_LOCK};
    use std::time::Instant;

    fn fast_settings() -> ExplorerSettings {
        ExplorerSettings {
            admin_mode: true,
            create_latency_ms: 10,
            initial_load_ms: 10,
            ..ExplorerSettings::default()
        }
    }

    fn wait_until_idle(app: &mut ExplorerApp) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while app.store().is_loading() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.poll_events();
        }
    }

    #[test]
    fn explorer_app_starts_loading_then_settles() {
        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        assert!(app.store().is_loading());
        assert!(app.store().admin_mode());

        wait_until_idle(&mut app);

        assert!(!app.store().is_loading());
        assert_eq!(app.store().profiles().len(), 2);
    }

    #[test]
    fn submitted_profile_arrives_through_worker() {
        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        wait_until_idle(&mut app);

        app.store.update_draft(DraftField::Name, "Alice");
        app.store.update_draft(DraftField::Address, "Paris");
        app.submit_new_profile();
        assert!(app.store().is_loading());

        wait_until_idle(&mut app);

        assert_eq!(app.store().profiles().len(), 3);
        assert_eq!(app.store().profiles()[2].name, "Alice");
        assert!(app.store().draft().is_empty());
    }

    #[test]
    fn blank_submission_does_not_start_loading() {
        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        wait_until_idle(&mut app);

        app.submit_new_profile();

        assert!(!app.store().is_loading());
        assert_eq!(app.store().profiles().len(), 2);
    }

    #[test]
    fn admin_toggle_is_saved_to_settings() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|err| err.into_inner());
        let temp_dir = tempfile::tempdir().unwrap();
        let _home = EnvGuard::set(HOME_ENV, temp_dir.path());
        let _admin = EnvGuard::unset(ADMIN_ENV);
        let _delay = EnvGuard::unset(CREATE_DELAY_ENV);

        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        app.set_admin_mode(false);

        assert!(!app.store().admin_mode());
        let saved = settings::load_settings().unwrap();
        assert!(!saved.admin_mode);
        assert_eq!(saved.create_latency_ms, 10);
    }

    #[test]
    fn initial_load_records_update_time() {
        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        assert!(app.store().last_updated().is_none());
        wait_until_idle(&mut app);
        assert!(app.store().last_updated().is_some());
    }

    #[test]
    fn unknown_selection_is_ignored() {
        let mut app = ExplorerApp::new(&fast_settings()).unwrap();
        app.apply_list_action(ListAction::ShowOnMap(ProfileId::new("1")));
        app.apply_list_action(ListAction::ShowOnMap(ProfileId::new("missing")));
        assert_eq!(app.store().selected_profile().unwrap().name, "John Doe");
    }
}

use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::api;
use crate::app_state::{AppCommand, AppEvent};

#[derive(Debug, Clone, Copy)]
pub struct WorkerTimings {
    pub initial_load: Duration,
    pub create_latency: Duration,
}

/// Commands run one at a time in arrival order, so overlapping creations
/// are serialized.
pub fn start_worker(
    cmd_rx: Receiver<AppCommand>,
    evt_tx: Sender<AppEvent>,
    timings: WorkerTimings,
) -> anyhow::Result<JoinHandle<()>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    let handle = std::thread::Builder::new()
        .name("profile-worker".to_string())
        .spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    AppCommand::InitialLoad => {
                        runtime.block_on(api::load_profiles(timings.initial_load));
                        let _ = evt_tx.send(AppEvent::InitialLoadFinished);
                    }
                    AppCommand::CreateProfile(request) => {
                        tracing::info!(name = %request.name, "Creating profile");
                        let profile =
                            runtime.block_on(api::create_profile(&request, timings.create_latency));
                        let _ = evt_tx.send(AppEvent::ProfileCreated(profile));
                    }
                    AppCommand::Shutdown => break,
                }
            }
            tracing::debug!("Profile worker stopped");
        })?;

    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::NewProfileRequest;
    use std::time::Instant;

    fn timings() -> WorkerTimings {
        WorkerTimings {
            initial_load: Duration::from_millis(5),
            create_latency: Duration::from_millis(30),
        }
    }

    fn request(name: &str) -> NewProfileRequest {
        NewProfileRequest {
            name: name.to_string(),
            description: "desc".to_string(),
            address: "addr".to_string(),
            image_url: api::DEFAULT_PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    #[test]
    fn worker_emits_initial_load_finished() {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::channel();
        let handle = start_worker(cmd_rx, evt_tx, timings()).unwrap();

        cmd_tx.send(AppCommand::InitialLoad).unwrap();

        let event = evt_rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(matches!(event, AppEvent::InitialLoadFinished));

        cmd_tx.send(AppCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn worker_serializes_overlapping_creations() {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel();
        let (evt_tx, evt_rx) = std::sync::mpsc::channel();
        let handle = start_worker(cmd_rx, evt_tx, timings()).unwrap();

        let start = Instant::now();
        cmd_tx.send(AppCommand::CreateProfile(request("first"))).unwrap();
        cmd_tx.send(AppCommand::CreateProfile(request("second"))).unwrap();

        let mut created = Vec::new();
        for _ in 0..2 {
            match evt_rx.recv_timeout(Duration::from_secs(2)).unwrap() {
                AppEvent::ProfileCreated(profile) => created.push(profile.name),
                other => panic!("unexpected event: {:?}", other),
            }
        }

        assert_eq!(created, vec!["first", "second"]);
        assert!(start.elapsed() >= Duration::from_millis(60));

        cmd_tx.send(AppCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn worker_stops_when_sender_dropped() {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel::<AppCommand>();
        let (evt_tx, _evt_rx) = std::sync::mpsc::channel();
        let handle = start_worker(cmd_rx, evt_tx, timings()).unwrap();

        drop(cmd_tx);
        handle.join().unwrap();
    }
}

use profile_explorer::app::ExplorerApp;
use profile_explorer::settings::{load_settings, ExplorerSettings};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Falling back to default settings");
        ExplorerSettings::default()
    });
    tracing::info!(admin_mode = settings.admin_mode, "Starting Profile Explorer");

    let explorer = ExplorerApp::new(&settings)?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Profile Explorer")
            .with_inner_size([1200.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Profile Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(explorer))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run window: {}", err))
}

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

mod controller;
mod events;
mod logging;
mod profile;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "totext", about = "Pick or capture a photo and extract its text")]
struct Args {
    /// Profile to load from the user config directory
    #[arg(short, long, default_value = "main")]
    profile: String,

    /// Debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    logging::init(args.verbose);

    let root = profile::default_root();
    if let Err(e) = profile::init_user_config(&root) {
        tracing::warn!("Failed to initialize user config: {}", e);
    }
    let config = profile::load_user_profile(&root, &args.profile)?;
    config.validate()?;
    let ui_config = config.ui.clone();

    let runtime = tokio::runtime::Runtime::new()?;
    let app = AppController::new(Arc::new(AppState::new(config)));
    let mut tasks = {
        let _guard = runtime.enter();
        app.spawn_tasks()
    };

    // Slint owns the main thread until the window closes
    let (app_to_ui_rx, ui_to_app_tx) = app.ui_endpoints();
    let ui_result = totext_ui::run_ui(app_to_ui_rx, ui_to_app_tx, &ui_config);

    app.shutdown();
    runtime.block_on(async {
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => tracing::debug!("task finished"),
                Ok(Err(e)) => tracing::error!("task failed: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    });
    runtime.shutdown_timeout(Duration::from_secs(2));

    ui_result
}

mod bootstrap;

use anyhow::{bail, Result};
use tally_core::settings::Settings;
use tally_runtime::orchestrator::{FeedSource, TallyOrchestrator};
use tally_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Cloud Wars v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Mode: {}, Feed: {}, Theme: {}",
        settings.mode,
        settings.feed_addr(),
        settings.theme
    );

    let (source, feed_label) = match settings.mode.as_str() {
        "live" => (
            FeedSource::Live {
                host: settings.feed_host.clone(),
                port: settings.feed_port,
                reconnect_secs: settings.reconnect_secs,
            },
            settings.feed_addr(),
        ),
        "replay" => {
            let Some(path) = settings.replay_file.clone() else {
                bail!("replay mode requires --replay-file");
            };
            let label = path.display().to_string();
            (
                FeedSource::Replay {
                    path,
                    interval_ms: settings.replay_interval_ms,
                },
                label,
            )
        }
        unknown => bail!("unknown mode: {unknown}"),
    };

    let orchestrator = TallyOrchestrator::new(source);
    let (rx, handle) = orchestrator.start();

    let app = App::new(&settings.theme, feed_label);

    // Run the TUI event loop. The loop exits on 'q' / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(rx) => {
            handle.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down tally task");
            handle.abort();
        }
    }

    Ok(())
}

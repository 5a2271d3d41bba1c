use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod media;
mod ui;

use clap::Parser;
use anyhow::anyhow;
use client_core::{default_settings, load_settings, SettingsOverrides};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const APP_TITLE: &str = "MRI Scan Classifier";

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Brain MRI upload-and-classify window")]
struct Args {
    /// Classification endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config_path: self.config.clone(),
            endpoint_url: self.endpoint.clone(),
            request_timeout_secs: self.timeout_secs,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings(&args.overrides()).or_else(|err| {
        tracing::warn!("falling back to default settings: {err:#}");
        default_settings()
    })?;
    tracing::info!(
        endpoint = %settings.endpoint_url,
        timeout_secs = settings.request_timeout.as_secs(),
        "starting classifier window"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, &settings);

    let startup = StartupConfig { settings };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([880.0, 860.0])
            .with_min_inner_size([520.0, 560.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| {
            Ok(Box::new(DesktopGuiApp::bootstrap(
                cmd_tx,
                ui_rx,
                startup,
                &cc.egui_ctx,
            )))
        }),
    )
    .map_err(|err| anyhow!("failed to run classifier window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flags_become_settings_overrides() {
        let args = Args::parse_from([
            "desktop_gui",
            "--endpoint",
            "http://10.0.0.5:8000/api/classify/",
            "--timeout-secs",
            "15",
        ]);
        let overrides = args.overrides();
        assert_eq!(
            overrides.endpoint_url.as_deref(),
            Some("http://10.0.0.5:8000/api/classify/")
        );
        assert_eq!(overrides.request_timeout_secs, Some(15));
        assert!(overrides.config_path.is_none());
    }

    #[test]
    fn no_flags_leave_everything_to_config_layers() {
        let overrides = Args::parse_from(["desktop_gui"]).overrides();
        assert!(overrides.endpoint_url.is_none());
        assert!(overrides.request_timeout_secs.is_none());
    }
}

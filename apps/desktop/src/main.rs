use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    load_settings, stage_image_file, ClassifierClient, ClassifyHandle, SettingsOverrides,
};
use shared::{domain::SelectionSource, protocol::ClassificationOutcome};
use tracing_subscriber::EnvFilter;

/// Submit a single brain MRI scan to the classification endpoint.
#[derive(Parser, Debug)]
struct Args {
    /// Image file to classify.
    #[arg(long)]
    image: PathBuf,
    /// Classification endpoint URL (overrides config file and environment).
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// Settings file; defaults to ./classifier.toml or the user config dir.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(&SettingsOverrides {
        config_path: args.config.clone(),
        endpoint_url: args.endpoint.clone(),
        request_timeout_secs: args.timeout_secs,
    })?;
    let client = ClassifierClient::from_settings(&settings)
        .context("failed to build classification client")?;

    let candidate = stage_image_file(&args.image)?;
    let image = match candidate.into_selected(SelectionSource::Picker) {
        Ok(image) => image,
        Err(err) => {
            tracing::debug!(path = %args.image.display(), "rejected non-image file");
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!(
        endpoint = %client.endpoint(),
        file_name = image.file_name(),
        "submitting image for classification"
    );
    match client.classify(&image).await {
        Ok(outcome) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("{}", render_outcome(&outcome));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::warn!(error = %err, "classification failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render_outcome(outcome: &ClassificationOutcome) -> String {
    let mut lines = vec![format!("Result: {}", outcome.label)];
    lines.extend(outcome.confidence_text());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_outcome;
    use clap::Parser;
    use shared::protocol::{ClassificationOutcome, Confidence};

    #[test]
    fn renders_label_and_confidence() {
        let outcome = ClassificationOutcome::new(
            "Tumor Detected",
            Some(Confidence::Text("92%".to_string())),
        );
        assert_eq!(render_outcome(&outcome), "Result: Tumor Detected\nConfidence: 92%");
    }

    #[test]
    fn omits_absent_confidence() {
        let outcome = ClassificationOutcome::new("No Tumor Detected", None);
        assert_eq!(render_outcome(&outcome), "Result: No Tumor Detected");
    }

    #[test]
    fn parses_cli_flags() {
        let args = super::Args::try_parse_from([
            "desktop",
            "--image",
            "scan.png",
            "--endpoint",
            "http://127.0.0.1:9000/api/classify/",
            "--timeout-secs",
            "10",
            "--json",
        ])
        .expect("args");
        assert_eq!(args.image.to_string_lossy(), "scan.png");
        assert_eq!(
            args.endpoint.as_deref(),
            Some("http://127.0.0.1:9000/api/classify/")
        );
        assert_eq!(args.timeout_secs, Some(10));
        assert!(args.json);
        assert!(super::Args::try_parse_from(["desktop"]).is_err());
    }
}

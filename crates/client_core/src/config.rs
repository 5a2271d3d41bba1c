use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000/api/classify/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const SETTINGS_FILE_NAME: &str = "classifier.toml";
const SETTINGS_DIR_NAME: &str = "mri_classifier";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint_url: Url,
    pub request_timeout: Duration,
}

/// Built-in settings with no file, environment or CLI layer applied.
pub fn default_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(None, &SettingsOverrides::default(), |_| None)
}

/// Values supplied on the command line; these win over file and env.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub endpoint_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    endpoint_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

pub fn load_settings(overrides: &SettingsOverrides) -> anyhow::Result<ClientSettings> {
    let file = resolve_settings_file(overrides.config_path.as_deref());
    load_settings_from(file.as_deref(), overrides, |name| std::env::var(name).ok())
}

/// Picks the settings file: an explicit path always wins, then the working
/// directory, then the per-user config directory.
pub fn resolve_settings_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
        .filter(|path| path.is_file())
}

pub fn load_settings_from(
    file: Option<&Path>,
    overrides: &SettingsOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut endpoint_url = DEFAULT_ENDPOINT_URL.to_string();
    let mut request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;

    if let Some(path) = file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.endpoint_url {
            endpoint_url = v;
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            request_timeout_secs = v;
        }
    }

    if let Some(v) = non_empty(env("CLASSIFIER_ENDPOINT")) {
        endpoint_url = v;
    }
    if let Some(v) = non_empty(env("APP__ENDPOINT_URL")) {
        endpoint_url = v;
    }
    if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_SECS")) {
        match v.trim().parse::<u64>() {
            Ok(parsed) => request_timeout_secs = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring unparsable APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if let Some(v) = &overrides.endpoint_url {
        endpoint_url = v.clone();
    }
    if let Some(v) = overrides.request_timeout_secs {
        request_timeout_secs = v;
    }

    if request_timeout_secs == 0 {
        bail!("request timeout must be at least one second");
    }

    Ok(ClientSettings {
        endpoint_url: parse_endpoint_url(&endpoint_url)?,
        request_timeout: Duration::from_secs(request_timeout_secs),
    })
}

pub fn parse_endpoint_url(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid classification endpoint url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("classification endpoint must use http or https, got '{other}'"),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

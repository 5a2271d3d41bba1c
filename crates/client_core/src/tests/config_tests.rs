use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

fn write_temp_settings(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("mri_classifier_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE_NAME);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_point_at_local_endpoint() {
    let settings =
        load_settings_from(None, &SettingsOverrides::default(), no_env).expect("defaults");
    assert_eq!(settings, default_settings().expect("built-in defaults"));
    assert_eq!(settings.endpoint_url.as_str(), DEFAULT_ENDPOINT_URL);
    assert_eq!(settings.request_timeout, Duration::from_secs(60));
}

#[test]
fn file_values_override_defaults() {
    let path = write_temp_settings(
        "endpoint_url = \"https://scans.example.org/api/classify/\"\nrequest_timeout_secs = 15\n",
    );
    let settings = load_settings_from(Some(&path), &SettingsOverrides::default(), no_env)
        .expect("file settings");
    assert_eq!(
        settings.endpoint_url.as_str(),
        "https://scans.example.org/api/classify/"
    );
    assert_eq!(settings.request_timeout, Duration::from_secs(15));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_cli_overrides_env() {
    let path = write_temp_settings("endpoint_url = \"http://file.local/classify\"\n");
    let env = env_from(&[
        ("CLASSIFIER_ENDPOINT", "http://env.local/classify"),
        ("APP__REQUEST_TIMEOUT_SECS", "5"),
    ]);

    let from_env =
        load_settings_from(Some(&path), &SettingsOverrides::default(), &env).expect("env");
    assert_eq!(from_env.endpoint_url.as_str(), "http://env.local/classify");
    assert_eq!(from_env.request_timeout, Duration::from_secs(5));

    let overrides = SettingsOverrides {
        endpoint_url: Some("http://cli.local/classify".to_string()),
        request_timeout_secs: Some(9),
        ..SettingsOverrides::default()
    };
    let from_cli = load_settings_from(Some(&path), &overrides, &env).expect("cli");
    assert_eq!(from_cli.endpoint_url.as_str(), "http://cli.local/classify");
    assert_eq!(from_cli.request_timeout, Duration::from_secs(9));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn app_prefixed_endpoint_wins_over_plain_env_name() {
    let env = env_from(&[
        ("CLASSIFIER_ENDPOINT", "http://plain.local/"),
        ("APP__ENDPOINT_URL", "http://prefixed.local/"),
    ]);
    let settings =
        load_settings_from(None, &SettingsOverrides::default(), env).expect("settings");
    assert_eq!(settings.endpoint_url.as_str(), "http://prefixed.local/");
}

#[test]
fn unparsable_env_timeout_is_ignored() {
    let env = env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]);
    let settings =
        load_settings_from(None, &SettingsOverrides::default(), env).expect("settings");
    assert_eq!(
        settings.request_timeout,
        Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
    );
}

#[test]
fn rejects_invalid_endpoints() {
    for raw in ["not a url", "ftp://scans.example.org/classify", "localhost:8000"] {
        let overrides = SettingsOverrides {
            endpoint_url: Some(raw.to_string()),
            ..SettingsOverrides::default()
        };
        assert!(
            load_settings_from(None, &overrides, no_env).is_err(),
            "expected rejection for {raw}"
        );
    }
}

#[test]
fn rejects_zero_timeout() {
    let overrides = SettingsOverrides {
        request_timeout_secs: Some(0),
        ..SettingsOverrides::default()
    };
    assert!(load_settings_from(None, &overrides, no_env).is_err());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = env::temp_dir().join("mri_classifier_config_test_missing/classifier.toml");
    assert!(load_settings_from(Some(&path), &SettingsOverrides::default(), no_env).is_err());
}

#[test]
fn explicit_path_is_always_resolved() {
    let explicit = PathBuf::from("/nonexistent/custom.toml");
    assert_eq!(resolve_settings_file(Some(&explicit)), Some(explicit));
}

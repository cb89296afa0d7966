use super::*;

use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_point_at_profile_page() {
    let settings = WizardSettings::default();

    assert_eq!(settings.profile_url.as_str(), DEFAULT_PROFILE_URL);
    assert_eq!(settings.min_mobile_len, 10);
    assert_eq!(settings.empty_catalog, EmptyCatalogPolicy::Reject);
    assert!(settings.catalog_path.is_none());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = WizardSettings::default();
    apply_file(
        &mut settings,
        r#"
profile_url = "https://example.com/me"
min_mobile_len = 8
lookup_timeout_ms = 250
empty_catalog = "advance"
catalog_path = "passes.toml"
"#,
    )
    .expect("apply file");

    assert_eq!(settings.profile_url.as_str(), "https://example.com/me");
    assert_eq!(settings.min_mobile_len, 8);
    assert_eq!(settings.lookup_timeout, Duration::from_millis(250));
    assert_eq!(settings.empty_catalog, EmptyCatalogPolicy::Advance);
    assert_eq!(settings.catalog_path, Some(PathBuf::from("passes.toml")));
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = WizardSettings::default();
    assert!(apply_file(&mut settings, "bind_addr = \"0.0.0.0\"").is_err());
}

#[test]
fn env_overrides_file_values() {
    let mut settings = WizardSettings::default();
    apply_file(&mut settings, "min_mobile_len = 8").expect("apply file");

    apply_env(
        &mut settings,
        env_from(&[
            ("APP__MIN_MOBILE_LEN", "12"),
            ("APP__EMPTY_CATALOG", "Advance"),
            ("APP__CATALOG_PATH", "/etc/passes.toml"),
        ]),
    )
    .expect("apply env");

    assert_eq!(settings.min_mobile_len, 12);
    assert_eq!(settings.empty_catalog, EmptyCatalogPolicy::Advance);
    assert_eq!(settings.catalog_path, Some(PathBuf::from("/etc/passes.toml")));
}

#[test]
fn malformed_env_number_is_an_error() {
    let mut settings = WizardSettings::default();
    let err = apply_env(&mut settings, env_from(&[("APP__LOOKUP_TIMEOUT_MS", "soon")]))
        .expect_err("not a number");

    assert!(err.to_string().contains("APP__LOOKUP_TIMEOUT_MS"));
    assert_eq!(settings.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
}

#[test]
fn profile_url_must_be_http() {
    assert!(parse_profile_url("ftp://tripxoxo.com/profile").is_err());
    assert!(parse_profile_url("not a url").is_err());
    assert_eq!(
        parse_profile_url(" https://tripxoxo.com/profile ")
            .expect("url")
            .as_str(),
        "https://tripxoxo.com/profile"
    );
}

#[test]
fn explicit_missing_settings_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("wizard_missing_{suffix}.toml"));

    assert!(load_settings(Some(&path)).is_err());
}

#[test]
fn explicit_settings_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("wizard_settings_{suffix}.toml"));
    fs::write(&path, "lookup_timeout_ms = 1500\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(settings.lookup_timeout, Duration::from_millis(1500));
}

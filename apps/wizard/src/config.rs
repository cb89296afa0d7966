use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use registration_core::{
    ControllerOptions, EmptyCatalogPolicy, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_MIN_MOBILE_LEN,
};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "wizard.toml";
pub const DEFAULT_PROFILE_URL: &str = "https://tripxoxo.com/profile";

#[derive(Debug, Clone, PartialEq)]
pub struct WizardSettings {
    pub profile_url: Url,
    pub min_mobile_len: usize,
    pub lookup_timeout: Duration,
    pub empty_catalog: EmptyCatalogPolicy,
    pub catalog_path: Option<PathBuf>,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            profile_url: Url::parse(DEFAULT_PROFILE_URL).expect("default profile url is valid"),
            min_mobile_len: DEFAULT_MIN_MOBILE_LEN,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            empty_catalog: EmptyCatalogPolicy::default(),
            catalog_path: None,
        }
    }
}

impl WizardSettings {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            min_mobile_len: self.min_mobile_len,
            lookup_timeout: self.lookup_timeout,
            empty_catalog: self.empty_catalog,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    profile_url: Option<String>,
    min_mobile_len: Option<usize>,
    lookup_timeout_ms: Option<u64>,
    empty_catalog: Option<EmptyCatalogPolicy>,
    catalog_path: Option<PathBuf>,
}

/// Defaults, then the settings file (if present), then `APP__*` environment overrides.
pub fn load_settings(path: Option<&Path>) -> Result<WizardSettings> {
    let mut settings = WizardSettings::default();

    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid settings file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

pub fn apply_file(settings: &mut WizardSettings, raw: &str) -> Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw).context("failed to parse settings")?;

    if let Some(v) = file_cfg.profile_url {
        settings.profile_url = parse_profile_url(&v)?;
    }
    if let Some(v) = file_cfg.min_mobile_len {
        settings.min_mobile_len = v;
    }
    if let Some(v) = file_cfg.lookup_timeout_ms {
        settings.lookup_timeout = Duration::from_millis(v);
    }
    if let Some(v) = file_cfg.empty_catalog {
        settings.empty_catalog = v;
    }
    if let Some(v) = file_cfg.catalog_path {
        settings.catalog_path = Some(v);
    }
    Ok(())
}

pub fn apply_env(
    settings: &mut WizardSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(v) = lookup("APP__PROFILE_URL") {
        settings.profile_url = parse_profile_url(&v)?;
    }
    if let Some(v) = lookup("APP__MIN_MOBILE_LEN") {
        settings.min_mobile_len = v
            .trim()
            .parse::<usize>()
            .with_context(|| format!("APP__MIN_MOBILE_LEN is not a number: '{v}'"))?;
    }
    if let Some(v) = lookup("APP__LOOKUP_TIMEOUT_MS") {
        let millis: u64 = v
            .trim()
            .parse()
            .with_context(|| format!("APP__LOOKUP_TIMEOUT_MS is not a number: '{v}'"))?;
        settings.lookup_timeout = Duration::from_millis(millis);
    }
    if let Some(v) = lookup("APP__EMPTY_CATALOG") {
        settings.empty_catalog = v
            .parse::<EmptyCatalogPolicy>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Some(v) = lookup("APP__CATALOG_PATH") {
        if !v.trim().is_empty() {
            settings.catalog_path = Some(PathBuf::from(v));
        }
    }
    Ok(())
}

pub fn parse_profile_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("invalid profile url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("profile url must use http or https, got '{}'", url.scheme());
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

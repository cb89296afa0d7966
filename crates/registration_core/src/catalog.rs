use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use shared::domain::{default_pass_catalog, AttractionPass, PassId};
use thiserror::Error;
use tracing::debug;

/// Resolves the attraction passes a registration code unlocks.
#[async_trait]
pub trait PassCatalog: Send + Sync {
    async fn lookup(&self, code: &str) -> Result<Vec<AttractionPass>>;
}

#[async_trait]
impl<T> PassCatalog for Box<T>
where
    T: PassCatalog + ?Sized,
{
    async fn lookup(&self, code: &str) -> Result<Vec<AttractionPass>> {
        (**self).lookup(code).await
    }
}

/// Returns the same passes for every code.
#[derive(Debug, Clone)]
pub struct FixedPassCatalog {
    passes: Vec<AttractionPass>,
}

impl FixedPassCatalog {
    pub fn new(passes: Vec<AttractionPass>) -> Self {
        Self { passes }
    }
}

impl Default for FixedPassCatalog {
    fn default() -> Self {
        Self::new(default_pass_catalog())
    }
}

#[async_trait]
impl PassCatalog for FixedPassCatalog {
    async fn lookup(&self, code: &str) -> Result<Vec<AttractionPass>> {
        debug!(code, passes = self.passes.len(), "fixed catalog lookup");
        Ok(self.passes.clone())
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("code {code} references unknown pass {pass_id}")]
    UnknownPass { code: String, pass_id: PassId },
    #[error("pass {0} is defined more than once")]
    DuplicatePass(PassId),
    #[error("code {code} lists pass {pass_id} more than once")]
    DuplicateCodeEntry { code: String, pass_id: PassId },
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    passes: Vec<AttractionPass>,
    #[serde(default)]
    codes: HashMap<String, Vec<PassId>>,
}

/// Code-keyed catalog. Codes match exactly; an unknown code unlocks nothing.
#[derive(Debug, Clone, Default)]
pub struct KeyedPassCatalog {
    entries: HashMap<String, Vec<AttractionPass>>,
}

impl KeyedPassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>, passes: Vec<AttractionPass>) -> Self {
        self.entries.insert(code.into(), passes);
        self
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Parses a document with a `[[passes]]` array and a `[codes]` table
    /// mapping each code to an ordered list of pass ids.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let document: CatalogDocument =
            toml::from_str(raw).context("failed to parse pass catalog document")?;

        let mut by_id: HashMap<PassId, AttractionPass> = HashMap::new();
        for pass in document.passes {
            let id = pass.id.clone();
            if by_id.insert(id.clone(), pass).is_some() {
                return Err(CatalogLoadError::DuplicatePass(id).into());
            }
        }

        let mut entries = HashMap::with_capacity(document.codes.len());
        for (code, pass_ids) in document.codes {
            let mut passes = Vec::with_capacity(pass_ids.len());
            for pass_id in pass_ids {
                if passes.iter().any(|pass: &AttractionPass| pass.id == pass_id) {
                    return Err(CatalogLoadError::DuplicateCodeEntry { code, pass_id }.into());
                }
                let pass = by_id.get(&pass_id).cloned().ok_or_else(|| {
                    CatalogLoadError::UnknownPass {
                        code: code.clone(),
                        pass_id: pass_id.clone(),
                    }
                })?;
                passes.push(pass);
            }
            entries.insert(code, passes);
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read pass catalog '{}'", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid pass catalog '{}'", path.display()))
    }
}

#[async_trait]
impl PassCatalog for KeyedPassCatalog {
    async fn lookup(&self, code: &str) -> Result<Vec<AttractionPass>> {
        let passes = self.entries.get(code).cloned().unwrap_or_default();
        debug!(code, passes = passes.len(), "keyed catalog lookup");
        Ok(passes)
    }
}

pub struct MissingPassCatalog;

#[async_trait]
impl PassCatalog for MissingPassCatalog {
    async fn lookup(&self, code: &str) -> Result<Vec<AttractionPass>> {
        Err(anyhow!("pass catalog unavailable for code {code}"))
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;

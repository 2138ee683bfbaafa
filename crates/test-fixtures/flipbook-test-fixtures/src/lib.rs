//! Shared animation library documents for flipbook tests.
//!
//! Names resolve through `fixtures/manifest.json` at the workspace root.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    libraries: HashMap<String, String>,
}

/// Animation library documents (`{ "animations": [...] }`).
pub mod libraries {
    use super::*;

    fn library_path(name: &str) -> Result<PathBuf> {
        let rel = MANIFEST
            .libraries
            .get(name)
            .ok_or_else(|| anyhow!("no library fixture named '{name}'"))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.libraries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Raw document text.
    pub fn json(name: &str) -> Result<String> {
        let path = library_path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("reading library fixture {}", path.display()))
    }

    /// Document parsed into `T` (usually `serde_json::Value`).
    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = json(name)?;
        serde_json::from_str(&text).with_context(|| format!("parsing library fixture '{name}'"))
    }
}

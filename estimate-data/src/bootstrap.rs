//! Startup bootstrap data.
//!
//! A deployment can ship a single JSON file with its own company profile,
//! catalog and templates. Every section is optional; whatever is missing
//! (including the whole file) falls back to the built-in defaults, so the
//! application never needs the file or any network access to start.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use estimate_core::defaults;
use estimate_core::models::{CatalogEntry, CompanyProfile, Template};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to read bootstrap file '{path}': {reason}")]
    Io { path: String, reason: String },

    #[error("Invalid bootstrap file '{path}': {reason}")]
    Parse { path: String, reason: String },
}

/// Contents of the bootstrap file. Absent sections mean "use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BootstrapData {
    #[serde(default)]
    pub company: Option<CompanyProfile>,
    #[serde(default)]
    pub catalog: Option<Vec<CatalogEntry>>,
    #[serde(default)]
    pub templates: Option<Vec<Template>>,
}

impl BootstrapData {
    /// Strict load: any read or parse failure is an error.
    pub fn load(path: &Path) -> Result<Self, BootstrapError> {
        let text = std::fs::read_to_string(path).map_err(|e| BootstrapError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| BootstrapError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Lenient load: failures are logged and the built-in defaults win.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(data) => data,
            Err(error) => {
                warn!(%error, "bootstrap file unusable, falling back to built-in defaults");
                Self::default()
            }
        }
    }

    pub fn company(&self) -> CompanyProfile {
        self.company.clone().unwrap_or_default()
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.catalog
            .clone()
            .unwrap_or_else(defaults::default_catalog)
    }

    pub fn templates(&self) -> Vec<Template> {
        self.templates
            .clone()
            .unwrap_or_else(defaults::default_templates)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let data = BootstrapData::load_or_default(Path::new("./no-such-bootstrap.json"));

        assert_eq!(data, BootstrapData::default());
        assert_eq!(data.company(), CompanyProfile::default());
        assert_eq!(data.catalog(), defaults::default_catalog());
        assert_eq!(data.templates(), defaults::default_templates());
    }

    #[test]
    fn partial_file_overrides_only_its_sections() {
        let json = r#"{"company": {"name": "CeilingCo", "email": "sales@ceilingco.example"}}"#;

        let data: BootstrapData = serde_json::from_str(json).expect("Should parse");

        assert_eq!(data.company().name, "CeilingCo");
        // Untouched sections still come from the defaults.
        assert_eq!(data.catalog(), defaults::default_catalog());
    }

    #[test]
    fn strict_load_reports_missing_file() {
        let result = BootstrapData::load(Path::new("./no-such-bootstrap.json"));

        assert!(matches!(result, Err(BootstrapError::Io { .. })));
    }
}

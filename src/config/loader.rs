//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payslip
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CompaniesConfig, CompanyProfile, PayslipConfig, PayslipSettings};

/// Loads and provides access to payslip configuration.
///
/// # Directory Structure
///
/// ```text
/// config/payslip/
/// ├── settings.yaml   # Currency labels, default address, footer, year window
/// └── companies.yaml  # Company header profiles (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payslip").unwrap();
/// println!("Footer: {}", loader.settings().footer);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayslipConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// `settings.yaml` is required. `companies.yaml` is optional; without it
    /// every payslip uses the default address and no logo.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `settings.yaml` is missing (`ConfigNotFound`)
    /// - any present file contains invalid YAML (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<PayslipSettings>(&path.join("settings.yaml"))?;

        let companies_path = path.join("companies.yaml");
        let companies = if companies_path.exists() {
            Self::load_yaml::<CompaniesConfig>(&companies_path)?.companies
        } else {
            Default::default()
        };

        tracing::debug!(
            path = %path.display(),
            companies = companies.len(),
            "Loaded payslip configuration"
        );

        Ok(Self {
            config: PayslipConfig::new(settings, companies),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payslip configuration.
    pub fn config(&self) -> &PayslipConfig {
        &self.config
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &PayslipSettings {
        self.config.settings()
    }

    /// Gets a company profile by name.
    pub fn get_company(&self, name: &str) -> Option<&CompanyProfile> {
        self.config.company(Some(name))
    }
}

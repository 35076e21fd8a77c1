//! Configuration types for payslip rendering.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;
use std::collections::HashMap;

fn default_currency_label() -> String {
    "Rs.".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_footer() -> String {
    "This PDF is system-generated, no signature required".to_string()
}

fn default_year_window() -> u32 {
    10
}

/// General payslip settings from `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayslipSettings {
    /// Label used in the amount column headers, e.g. "Rs.".
    #[serde(default = "default_currency_label")]
    pub currency_label: String,
    /// Symbol printed before the net payable amount.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Address printed when the employee's company has no profile.
    pub default_address: String,
    /// Footer line printed at the bottom of every payslip.
    #[serde(default = "default_footer")]
    pub footer: String,
    /// Number of years offered either side of the current year.
    #[serde(default = "default_year_window")]
    pub year_window: u32,
}

impl Default for PayslipSettings {
    fn default() -> Self {
        Self {
            currency_label: default_currency_label(),
            currency_symbol: default_currency_symbol(),
            default_address: String::new(),
            footer: default_footer(),
            year_window: default_year_window(),
        }
    }
}

/// A company's payslip header profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyProfile {
    /// Address override; the default address is used when absent.
    #[serde(default)]
    pub address: Option<String>,
    /// Logo image paths, tried in order by the renderer.
    #[serde(default)]
    pub logo_sources: Vec<String>,
}

/// Company profiles file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompaniesConfig {
    /// Map of company name to profile.
    #[serde(default)]
    pub companies: HashMap<String, CompanyProfile>,
}

/// The complete payslip configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct PayslipConfig {
    /// General settings.
    settings: PayslipSettings,
    /// Company profiles by name.
    companies: HashMap<String, CompanyProfile>,
}

impl PayslipConfig {
    /// Creates a new PayslipConfig from its component parts.
    pub fn new(settings: PayslipSettings, companies: HashMap<String, CompanyProfile>) -> Self {
        Self {
            settings,
            companies,
        }
    }

    /// Returns the general settings.
    pub fn settings(&self) -> &PayslipSettings {
        &self.settings
    }

    /// Returns all company profiles.
    pub fn companies(&self) -> &HashMap<String, CompanyProfile> {
        &self.companies
    }

    /// Looks up the profile for a company name.
    pub fn company(&self, name: Option<&str>) -> Option<&CompanyProfile> {
        name.and_then(|name| self.companies.get(name))
    }

    /// The address printed for a company, falling back to the default address.
    pub fn address_for(&self, company: Option<&str>) -> &str {
        self.company(company)
            .and_then(|profile| profile.address.as_deref())
            .unwrap_or(&self.settings.default_address)
    }

    /// Logo candidates for a company; empty when it has no profile.
    pub fn logo_sources_for(&self, company: Option<&str>) -> &[String] {
        self.company(company)
            .map(|profile| profile.logo_sources.as_slice())
            .unwrap_or(&[])
    }
}

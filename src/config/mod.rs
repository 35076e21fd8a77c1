//! Configuration loading and management for the Payslip Engine.
//!
//! This module loads payslip rendering settings and company header profiles
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payslip").unwrap();
//! println!("Currency: {}", config.settings().currency_label);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompaniesConfig, CompanyProfile, PayslipConfig, PayslipSettings};

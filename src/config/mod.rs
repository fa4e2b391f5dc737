//! Configuration loading and management for the Payroll Deduction Engine.
//!
//! This module provides functionality to load tax schedules from YAML files,
//! including federal and provincial bracket tables and contribution rates,
//! and exposes the compiled-in 2020 schedule.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/canada_2020").unwrap();
//! println!("Loaded schedule: {}", config.metadata().name);
//! ```

mod builtin;
mod loader;
mod types;

pub use builtin::{
    ALBERTA_BRACKETS, BRITISH_COLUMBIA_BRACKETS, BUILTIN_SCHEDULE_NAME, BUILTIN_TAX_YEAR,
    FEDERAL_BRACKETS, INSURANCE_RATE, PENSION_RATE, builtin_schedule, provincial_brackets,
};
pub use loader::ConfigLoader;
pub use types::{
    Bracket, BracketTable, ContributionRate, ContributionsConfig, FederalTableConfig,
    ProvinceTableConfig, ScheduleMetadata, TaxSchedule,
};

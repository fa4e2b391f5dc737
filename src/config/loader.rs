//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax schedules
//! from YAML files, or using the compiled-in schedule.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::Jurisdiction;

use super::builtin::builtin_schedule;
use super::types::{
    BracketTable, ContributionsConfig, FederalTableConfig, ProvinceTableConfig, ScheduleMetadata,
    TaxSchedule,
};

/// Loads and provides access to a tax schedule.
///
/// # Directory Structure
///
/// ```text
/// config/canada_2020/
/// ├── schedule.yaml        # Schedule metadata
/// ├── federal.yaml         # Federal bracket table
/// ├── contributions.yaml   # Pension and insurance rates
/// └── provinces/
///     ├── alberta.yaml
///     └── british_columbia.yaml
/// ```
///
/// The `provinces` directory is optional; without it every jurisdiction
/// computes zero provincial tax.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/canada_2020")?;
/// println!("Loaded schedule: {}", loader.metadata().name);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: TaxSchedule,
}

impl ConfigLoader {
    /// Loads a schedule from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if a required file is missing
    /// - `ConfigParseError` if a file contains invalid YAML
    /// - `InvalidSchedule` if a table is malformed, names an unrecognised
    ///   jurisdiction, or duplicates another province file
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;

        let federal_config = Self::load_yaml::<FederalTableConfig>(&path.join("federal.yaml"))?;
        let federal = BracketTable::new("federal", federal_config.brackets)?;

        let contributions =
            Self::load_yaml::<ContributionsConfig>(&path.join("contributions.yaml"))?;
        contributions.pension.validate("pension")?;
        contributions.insurance.validate("insurance")?;

        let provinces = Self::load_provinces(&path.join("provinces"))?;

        info!(
            schedule = %metadata.name,
            tax_year = metadata.tax_year,
            provinces = provinces.len(),
            "Loaded tax schedule"
        );

        Ok(Self {
            schedule: TaxSchedule::new(
                metadata,
                federal,
                provinces,
                contributions.pension,
                contributions.insurance,
            ),
        })
    }

    /// Returns a loader over the compiled-in 2020 schedule.
    pub fn builtin() -> Self {
        Self {
            schedule: builtin_schedule(),
        }
    }

    /// Wraps an already-assembled schedule.
    pub fn from_schedule(schedule: TaxSchedule) -> Self {
        Self { schedule }
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

    /// Loads every province table in the provinces directory.
    fn load_provinces(provinces_dir: &Path) -> EngineResult<BTreeMap<Jurisdiction, BracketTable>> {
        let mut provinces = BTreeMap::new();

        if !provinces_dir.exists() {
            debug!(path = %provinces_dir.display(), "No provinces directory");
            return Ok(provinces);
        }

        let dir_str = provinces_dir.display().to_string();
        let entries = fs::read_dir(provinces_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let config = Self::load_yaml::<ProvinceTableConfig>(&path)?;
            let jurisdiction = Jurisdiction::parse(&config.jurisdiction).ok_or_else(|| {
                EngineError::InvalidSchedule {
                    name: path.display().to_string(),
                    message: format!("unrecognised jurisdiction '{}'", config.jurisdiction),
                }
            })?;

            let table = BracketTable::new(jurisdiction.as_str(), config.brackets)?;
            if provinces.insert(jurisdiction, table).is_some() {
                return Err(EngineError::InvalidSchedule {
                    name: path.display().to_string(),
                    message: format!("duplicate table for '{}'", jurisdiction),
                });
            }
            debug!(jurisdiction = %jurisdiction, path = %path.display(), "Loaded province table");
        }

        Ok(provinces)
    }

    /// Returns the underlying tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.schedule.metadata()
    }

    /// Gets the provincial bracket table for a jurisdiction name.
    ///
    /// Returns `None` when the name is unrecognised or the jurisdiction has
    /// no table in this schedule.
    pub fn provincial_table(&self, name: &str) -> Option<&BracketTable> {
        Jurisdiction::parse(name).and_then(|jurisdiction| self.schedule.provincial(jurisdiction))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/canada_2020"
    }

    /// A scratch schedule directory under the system temp dir.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(label: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "payroll-engine-{}-{}",
                label,
                uuid::Uuid::new_v4()
            ));
            fs::create_dir_all(dir.join("provinces")).unwrap();
            for file in ["schedule.yaml", "federal.yaml", "contributions.yaml"] {
                fs::copy(Path::new(config_path()).join(file), dir.join(file)).unwrap();
            }
            Self(dir)
        }

        fn write_province(&self, file: &str, content: &str) {
            fs::write(self.0.join("provinces").join(file), content).unwrap();
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    const MANITOBA_YAML: &str = r#"
jurisdiction: Manitoba
brackets:
  - lower_bound: "0"
    rate: "0.108"
  - lower_bound: "33389"
    rate: "0.1275"
  - lower_bound: "72164"
    rate: "0.174"
"#;

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().name, "canada_2020");
        assert_eq!(loader.metadata().tax_year, 2020);
    }

    #[test]
    fn test_loaded_schedule_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.schedule(), ConfigLoader::builtin().schedule());
    }

    #[test]
    fn test_provincial_table_lookup_is_case_insensitive() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let table = loader.provincial_table("British Columbia").unwrap();
        assert_eq!(table.brackets().len(), 7);
        assert_eq!(table.top_rate(), dec!(0.2050));
    }

    #[test]
    fn test_provincial_table_missing_for_unimplemented_jurisdiction() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert!(loader.provincial_table("quebec").is_none());
        assert!(loader.provincial_table("ontario").is_none());
    }

    #[test]
    fn test_contribution_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.schedule().pension().rate, dec!(0.0525));
        assert_eq!(loader.schedule().pension().maximum_earnings, dec!(58700));
        assert_eq!(loader.schedule().insurance().rate, dec!(0.0158));
        assert_eq!(loader.schedule().insurance().maximum_earnings, dec!(54200));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("schedule.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_additional_province_table_is_loaded() {
        let scratch = ScratchDir::new("manitoba");
        scratch.write_province("manitoba.yaml", MANITOBA_YAML);

        let loader = ConfigLoader::load(&scratch.0).unwrap();
        let table = loader.provincial_table("manitoba").unwrap();
        assert_eq!(table.brackets()[1].lower_bound, dec!(33389));
    }

    #[test]
    fn test_missing_provinces_directory_yields_no_tables() {
        let scratch = ScratchDir::new("no-provinces");
        fs::remove_dir_all(scratch.0.join("provinces")).unwrap();

        let loader = ConfigLoader::load(&scratch.0).unwrap();
        assert_eq!(loader.schedule().implemented_jurisdictions().count(), 0);
    }

    #[test]
    fn test_unrecognised_province_returns_error() {
        let scratch = ScratchDir::new("ontario");
        scratch.write_province(
            "ontario.yaml",
            "jurisdiction: ontario\nbrackets:\n  - lower_bound: \"0\"\n    rate: \"0.0505\"\n",
        );

        match ConfigLoader::load(&scratch.0) {
            Err(EngineError::InvalidSchedule { message, .. }) => {
                assert!(message.contains("ontario"));
            }
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_province_returns_error() {
        let scratch = ScratchDir::new("duplicate");
        scratch.write_province("manitoba.yaml", MANITOBA_YAML);
        scratch.write_province("manitoba_copy.yaml", MANITOBA_YAML);

        match ConfigLoader::load(&scratch.0) {
            Err(EngineError::InvalidSchedule { message, .. }) => {
                assert!(message.contains("duplicate"));
            }
            other => panic!("Expected InvalidSchedule error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let scratch = ScratchDir::new("malformed");
        scratch.write_province("broken.yaml", "jurisdiction: [unclosed");

        match ConfigLoader::load(&scratch.0) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("broken.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_default_is_builtin() {
        let loader = ConfigLoader::default();
        assert_eq!(loader.metadata().name, "canada_2020");
    }
}

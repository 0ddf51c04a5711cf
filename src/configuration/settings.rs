use config::{Config, ConfigError, Environment, File};
use serde_derive::Deserialize;
use std::path::{Path, PathBuf};

use crate::configuration::constants::common::{DEFAULT_REPORT_PATH, ENV_PREFIX, ENV_SEPARATOR};
use crate::report::model::DEFAULT_RUN_NAME;
use crate::report::OutcomePolicy;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Where report snapshots are written.
    pub path: PathBuf,
    /// Name of the root `testsuites` element.
    pub run_name: String,
    #[serde(with = "crate::configuration::deserialize::outcome_policy")]
    pub outcome_policy: OutcomePolicy,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_REPORT_PATH),
            run_name: DEFAULT_RUN_NAME.to_owned(),
            outcome_policy: OutcomePolicy::default(),
        }
    }
}

impl Settings {
    /// Loads settings from an optional file (YAML, JSON, TOML, HJSON) overlaid with
    /// `SUITE_REPORT_*` environment variables, e.g. `SUITE_REPORT_REPORT__RUN_NAME`.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        if let Some(file) = file {
            config.merge(File::from(file))?;
        }
        config.merge(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))?;

        config.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use crate::report::OutcomePolicy;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();

        assert_eq!(settings.report.path, PathBuf::from("report.junit.xml"));
        assert_eq!(settings.report.outcome_policy, OutcomePolicy::Lenient);
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            "[report]\npath = \"out/lisa.junit.xml\"\nrun_name = \"nightly\"\noutcome_policy = \"strict\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.report.path, PathBuf::from("out/lisa.junit.xml"));
        assert_eq!(settings.report.run_name, "nightly");
        assert_eq!(settings.report.outcome_policy, OutcomePolicy::Strict);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yaml");
        fs::write(&path, "report:\n  run_name: weekly\n").unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();

        assert_eq!(settings.report.run_name, "weekly");
        assert_eq!(settings.report.path, PathBuf::from("report.junit.xml"));
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{"report": {"outcome_policy": "loud"}}"#).unwrap();

        assert!(Settings::load(Some(path.as_path())).is_err());
    }
}

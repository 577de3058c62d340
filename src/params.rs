use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EpisimError;

/// Parameters of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulationParams {
    /// Calendar date of simulated day 0.
    pub start_date: NaiveDate,
    pub seed: u64,
    /// The run stops after this many days even if the epidemic is still active.
    pub max_days: u32,
    /// Whether detected and symptomatic persons have their recent contacts quarantined.
    #[serde(default)]
    pub tracing: bool,
    #[serde(default)]
    pub initial_infections: usize,
}

impl SimulationParams {
    /// # Errors
    ///
    /// Returns `EpisimError::JsonError` if the document does not parse and
    /// `EpisimError::ConfigError` if `max_days` is zero.
    pub fn from_json_str(json: &str) -> Result<Self, EpisimError> {
        let params: SimulationParams = serde_json::from_str(json)?;
        if params.max_days == 0 {
            return Err(EpisimError::ConfigError(
                "maxDays must be at least 1".to_string(),
            ));
        }
        Ok(params)
    }

    /// # Errors
    ///
    /// As [`SimulationParams::from_json_str`], plus `EpisimError::IoError` if the file
    /// cannot be read.
    pub fn from_json_file(path: &Path) -> Result<Self, EpisimError> {
        let data = fs::read_to_string(path)?;
        SimulationParams::from_json_str(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_params() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "startDate": "2020-02-21", "seed": 4711, "maxDays": 60, "tracing": true, "initialInfections": 3 }}"#
        )
        .unwrap();
        let params = SimulationParams::from_json_file(file.path()).unwrap();
        assert_eq!(params.start_date, NaiveDate::from_ymd_opt(2020, 2, 21).unwrap());
        assert_eq!(params.seed, 4711);
        assert_eq!(params.max_days, 60);
        assert!(params.tracing);
        assert_eq!(params.initial_infections, 3);
    }

    #[test]
    fn optional_fields_default() {
        let params =
            SimulationParams::from_json_str(r#"{ "startDate": "2020-02-21", "seed": 1, "maxDays": 5 }"#)
                .unwrap();
        assert!(!params.tracing);
        assert_eq!(params.initial_infections, 0);
    }

    #[test]
    fn invalid_params() {
        assert!(matches!(
            SimulationParams::from_json_str(r#"{ "startDate": "2020-02-21", "seed": 1, "maxDays": 0 }"#),
            Err(EpisimError::ConfigError(_))
        ));
        assert!(matches!(
            SimulationParams::from_json_str(r#"{ "startDate": "2020-02-21", "seed": 1, "maxDays": 5, "speed": 2 }"#),
            Err(EpisimError::JsonError(_))
        ));
    }
}

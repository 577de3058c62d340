use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::EpisimError;
use crate::policy::AdministrativeSchedule;
use crate::HashMap;

/// The policy configuration document. Every section is optional. An activity is governed
/// from the day after a period's opening boundary, so administrative entries are dated
/// inside the period.
///
/// ```json
/// {
///   "outOfHome": { "2020-03-02": 0.8, "2020-03-09": 0.4 },
///   "baseDays": { "MONDAY": "2020-03-02" },
///   "periods": { "educ_school": ["2020-03-14", "2020-05-04"] },
///   "administrative": { "2020-03-15": { "educ_school": 0.1 } }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(default)]
    pub out_of_home: BTreeMap<NaiveDate, f64>,
    #[serde(default)]
    pub base_days: HashMap<Weekday, NaiveDate>,
    #[serde(default)]
    pub periods: BTreeMap<String, Vec<NaiveDate>>,
    #[serde(default)]
    pub administrative: AdministrativeSchedule,
}

impl PolicyConfig {
    /// # Errors
    ///
    /// Returns `EpisimError::JsonError` if the document does not parse.
    pub fn from_json_str(json: &str) -> Result<Self, EpisimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns `EpisimError::IoError` if the file cannot be read and
    /// `EpisimError::JsonError` if it does not parse.
    pub fn from_json_file(path: &Path) -> Result<Self, EpisimError> {
        let contents = fs::read_to_string(path)?;
        PolicyConfig::from_json_str(&contents)
    }
}

use std::fmt::{self, Debug, Display};
use std::io;

use crate::people::PersonId;

/// Provides `EpisimError` and maps other errors to
/// convert to an `EpisimError`
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum EpisimError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// A person's age is outside of the range covered by the age tables.
    ImplausibleAge {
        person: PersonId,
        age: i32,
    },
    /// A person is past `InfectedButNotContagious` without a recorded infection day.
    MissingInfectionDay(PersonId),
    UnknownPerson(PersonId),
    ConfigError(String),
    ReportError(String),
}

impl From<io::Error> for EpisimError {
    fn from(error: io::Error) -> Self {
        EpisimError::IoError(error)
    }
}

impl From<serde_json::Error> for EpisimError {
    fn from(error: serde_json::Error) -> Self {
        EpisimError::JsonError(error)
    }
}

impl From<csv::Error> for EpisimError {
    fn from(error: csv::Error) -> Self {
        EpisimError::CsvError(error)
    }
}

impl From<String> for EpisimError {
    fn from(error: String) -> Self {
        EpisimError::ConfigError(error)
    }
}

impl From<&str> for EpisimError {
    fn from(error: &str) -> Self {
        EpisimError::ConfigError(error.to_string())
    }
}

impl std::error::Error for EpisimError {}

impl Display for EpisimError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EpisimError::ImplausibleAge { person, age } => {
                write!(f, "Error: age of person {person} is not plausible, age is {age}")
            }
            EpisimError::MissingInfectionDay(person) => {
                write!(f, "Error: person {person} has no recorded infection day")
            }
            EpisimError::UnknownPerson(person) => write!(f, "Error: unknown person {person}"),
            _ => write!(f, "Error: {self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn implausible_age_names_person_and_age() {
        let error = EpisimError::ImplausibleAge {
            person: PersonId::new(7),
            age: 130,
        };
        let message = error.to_string();
        assert!(message.contains("person 7"));
        assert!(message.contains("130"));
    }

    #[test]
    fn string_converts_to_config_error() {
        let error: EpisimError = "bad periods".into();
        assert!(matches!(error, EpisimError::ConfigError(ref s) if s == "bad periods"));
    }
}

//! Daily outputs: the [`InfectionReport`] and tab-separated files written from it.

use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::marker::PhantomData;
use std::path::Path;

use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;

use crate::error::EpisimError;
use crate::people::{DiseaseStatus, PersonRegistry};
use crate::policy::Restrictions;

/// Aggregate counts of one simulated day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfectionReport {
    pub day: u32,
    pub date: NaiveDate,
    pub n_susceptible: usize,
    pub n_infected_but_not_contagious: usize,
    pub n_contagious: usize,
    pub n_showing_symptoms: usize,
    pub n_seriously_sick: usize,
    pub n_critical: usize,
    pub n_recovered: usize,
    /// Everyone infected and not yet recovered.
    pub n_total_infected: usize,
    pub n_in_quarantine: usize,
    /// Persons who became contagious on `day`.
    pub n_newly_contagious: usize,
}

impl InfectionReport {
    #[must_use]
    pub fn collect(registry: &PersonRegistry, day: u32, date: NaiveDate) -> Self {
        let mut report = InfectionReport {
            day,
            date,
            ..InfectionReport::default()
        };
        for person in registry.iter() {
            let status = person.disease_status();
            match status {
                DiseaseStatus::Susceptible => report.n_susceptible += 1,
                DiseaseStatus::InfectedButNotContagious => {
                    report.n_infected_but_not_contagious += 1;
                }
                DiseaseStatus::Contagious => report.n_contagious += 1,
                DiseaseStatus::ShowingSymptoms => report.n_showing_symptoms += 1,
                DiseaseStatus::SeriouslySick => report.n_seriously_sick += 1,
                DiseaseStatus::Critical => report.n_critical += 1,
                DiseaseStatus::Recovered => report.n_recovered += 1,
            }
            if status.is_infected() {
                report.n_total_infected += 1;
            }
            if person.is_quarantined() {
                report.n_in_quarantine += 1;
            }
            if person.entered(DiseaseStatus::Contagious) == Some(day) {
                report.n_newly_contagious += 1;
            }
        }
        report
    }
}

// Checks the extension and creates missing parent directories.
fn create_report_file(path: &Path) -> Result<File, EpisimError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("tsv" | "txt") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            Ok(File::create(path)?)
        }
        _ => Err(EpisimError::ReportError(format!(
            "report output files must end in .tsv or .txt: {}",
            path.display()
        ))),
    }
}

fn tab_separated(file: File) -> Writer<File> {
    csv::WriterBuilder::new().delimiter(b'\t').from_writer(file)
}

/// Writes one tab-separated row per record, with a header derived from the field names.
pub struct ReportWriter<T> {
    writer: Writer<File>,
    rows: usize,
    _row: PhantomData<T>,
}

impl<T: Serialize> ReportWriter<T> {
    /// # Errors
    ///
    /// Returns `EpisimError::ReportError` for an unsupported extension and
    /// `EpisimError::IoError` if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, EpisimError> {
        Ok(ReportWriter {
            writer: tab_separated(create_report_file(path)?),
            rows: 0,
            _row: PhantomData,
        })
    }

    /// Appends `row` and flushes.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if the row cannot be written.
    pub fn write(&mut self, row: &T) -> Result<(), EpisimError> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }
}

pub type InfectionsWriter = ReportWriter<InfectionReport>;

/// Writes one row per day with the remaining fraction of every activity. The columns are
/// fixed by the first snapshot written.
pub struct RestrictionsWriter {
    writer: Writer<File>,
    activities: Option<Vec<String>>,
}

impl RestrictionsWriter {
    /// # Errors
    ///
    /// Returns `EpisimError::ReportError` for an unsupported extension and
    /// `EpisimError::IoError` if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, EpisimError> {
        Ok(RestrictionsWriter {
            writer: tab_separated(create_report_file(path)?),
            activities: None,
        })
    }

    /// # Errors
    ///
    /// Returns an `EpisimError` if the row cannot be written.
    pub fn write(
        &mut self,
        day: u32,
        date: NaiveDate,
        restrictions: &Restrictions,
    ) -> Result<(), EpisimError> {
        if self.activities.is_none() {
            let activities: Vec<String> = restrictions.activities().map(str::to_string).collect();
            let mut header = vec!["day".to_string(), "date".to_string()];
            header.extend(activities.iter().cloned());
            self.writer.write_record(&header)?;
            self.activities = Some(activities);
        }
        let activities = self.activities.as_deref().unwrap_or_default();

        let mut row = vec![day.to_string(), date.to_string()];
        row.extend(
            activities
                .iter()
                .map(|activity| restrictions.remaining_fraction(activity).to_string()),
        );
        self.writer.write_record(&row)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::QuarantineStatus;
    use crate::policy::Restriction;
    use crate::progression::StatusChange;
    use std::fs;
    use tempfile::tempdir;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    #[test]
    fn collect_counts_statuses() {
        let mut registry = PersonRegistry::new();
        for _ in 0..5 {
            registry.add_person(Some(30));
        }
        let ids: Vec<_> = registry.ids().collect();
        registry.infect(ids[0], 0).unwrap();
        registry.infect(ids[1], 0).unwrap();
        {
            let person = registry.get_mut(ids[1]).unwrap();
            person.set_disease_status(DiseaseStatus::Contagious, 4);
            person.set_quarantine_status(QuarantineStatus::AtHome, 4);
        }
        registry
            .get_mut(ids[2])
            .unwrap()
            .set_disease_status(DiseaseStatus::Recovered, 2);
        registry
            .get_mut(ids[3])
            .unwrap()
            .set_quarantine_status(QuarantineStatus::AtHome, 3);

        let report = InfectionReport::collect(&registry, 4, march(5));
        assert_eq!(report.day, 4);
        assert_eq!(report.date, march(5));
        assert_eq!(report.n_susceptible, 2);
        assert_eq!(report.n_infected_but_not_contagious, 1);
        assert_eq!(report.n_contagious, 1);
        assert_eq!(report.n_recovered, 1);
        assert_eq!(report.n_total_infected, 2);
        assert_eq!(report.n_in_quarantine, 2);
        assert_eq!(report.n_newly_contagious, 1);

        let next_day = InfectionReport::collect(&registry, 5, march(6));
        assert_eq!(next_day.n_newly_contagious, 0);
    }

    #[test]
    fn infections_are_tab_separated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("infections.txt");
        let mut writer = InfectionsWriter::create(&path).unwrap();
        let report = InfectionReport {
            day: 3,
            date: march(4),
            n_total_infected: 7,
            ..InfectionReport::default()
        };
        writer.write(&report).unwrap();
        writer.write(&report).unwrap();
        assert_eq!(writer.rows(), 2);

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        let header: Vec<_> = lines.next().unwrap().split('\t').collect();
        assert_eq!(header[0], "day");
        assert_eq!(header[1], "date");
        assert!(header.contains(&"nTotalInfected"));
        let row: Vec<_> = lines.next().unwrap().split('\t').collect();
        assert_eq!(row[0], "3");
        assert_eq!(row[1], "2020-03-04");
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn status_changes_can_be_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.tsv");
        let mut writer = ReportWriter::<StatusChange>::create(&path).unwrap();
        let mut registry = PersonRegistry::new();
        let id = registry.add_person(None);
        writer
            .write(&StatusChange {
                person: id,
                day: 4,
                status: DiseaseStatus::Contagious,
            })
            .unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("0\t4\tcontagious"));
    }

    #[test]
    fn restrictions_columns_follow_first_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("restrictions.txt");
        let mut writer = RestrictionsWriter::create(&path).unwrap();
        let mut restrictions = Restrictions::for_activities(["work", "home"]);
        writer.write(0, march(1), &restrictions).unwrap();
        restrictions.insert("work", Restriction::of(0.25));
        restrictions.insert("leisure", Restriction::of(0.5));
        writer.write(1, march(2), &restrictions).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "day\tdate\thome\twork");
        assert_eq!(lines[1], "0\t2020-03-01\t1\t1");
        assert_eq!(lines[2], "1\t2020-03-02\t1\t0.25");
    }

    #[test]
    fn only_tab_separated_outputs() {
        let dir = tempdir().unwrap();
        let result = InfectionsWriter::create(&dir.path().join("infections.csv"));
        assert!(matches!(result, Err(EpisimError::ReportError(_))));
    }
}

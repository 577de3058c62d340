use std::io::Read;
use std::path::Path;

use log::{debug, trace};
use serde::Deserialize;

use crate::error::EpisimError;
use crate::people::{DiseaseStatus, Person, PersonId, QuarantineStatus};

/// One row of a population file. Only `age` is read; an empty cell means the age is unknown.
#[derive(Deserialize, Debug)]
pub struct PersonRecord {
    pub age: Option<i32>,
}

/// Owns every person in the run. Ids are assigned densely in insertion order.
#[derive(Debug, Default)]
pub struct PersonRegistry {
    people: Vec<Person>,
}

impl PersonRegistry {
    #[must_use]
    pub fn new() -> Self {
        PersonRegistry::default()
    }

    pub fn add_person(&mut self, age: Option<i32>) -> PersonId {
        let id = PersonId::new(self.people.len());
        self.people.push(Person::new(id, age));
        id
    }

    /// Loads a population from CSV. Persons are added in row order.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if the file cannot be read or a row does not parse.
    pub fn load_csv(&mut self, path: &Path) -> Result<usize, EpisimError> {
        let reader = csv::Reader::from_path(path)?;
        self.load_records(reader)
    }

    /// Loads a population from any CSV reader with a header row.
    ///
    /// # Errors
    ///
    /// Returns an `EpisimError` if a row does not parse.
    pub fn load_records<R: Read>(&mut self, mut reader: csv::Reader<R>) -> Result<usize, EpisimError> {
        let before = self.people.len();
        for record in reader.deserialize() {
            let record: PersonRecord = record?;
            self.add_person(record.age);
        }
        let added = self.people.len() - before;
        debug!("loaded {added} persons");
        Ok(added)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` if `id` is not in the registry.
    pub fn get(&self, id: PersonId) -> Result<&Person, EpisimError> {
        self.people
            .get(id.index())
            .ok_or(EpisimError::UnknownPerson(id))
    }

    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` if `id` is not in the registry.
    pub fn get_mut(&mut self, id: PersonId) -> Result<&mut Person, EpisimError> {
        self.people
            .get_mut(id.index())
            .ok_or(EpisimError::UnknownPerson(id))
    }

    /// Iterates over all persons in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.people.iter_mut()
    }

    pub fn ids(&self) -> impl Iterator<Item = PersonId> {
        (0..self.people.len()).map(PersonId::new)
    }

    /// Marks `id` as freshly infected on `day`.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` if `id` is not in the registry.
    pub fn infect(&mut self, id: PersonId, day: u32) -> Result<(), EpisimError> {
        trace!("infecting person {id} on day {day}");
        self.get_mut(id)?
            .set_disease_status(DiseaseStatus::InfectedButNotContagious, day);
        Ok(())
    }

    /// Records that `a` and `b` were co-present at `time`, in both trace logs.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` if either id is not in the registry.
    pub fn record_contact(&mut self, a: PersonId, b: PersonId, time: f64) -> Result<(), EpisimError> {
        self.get(b)?;
        self.get_mut(a)?.trace_log_mut().record(time, b);
        self.get_mut(b)?.trace_log_mut().record(time, a);
        Ok(())
    }

    /// Puts a traced contact into home quarantine unless they are already quarantined or
    /// recovered. Returns whether the person was quarantined.
    ///
    /// # Errors
    ///
    /// Returns `EpisimError::UnknownPerson` if `id` is not in the registry.
    pub fn quarantine_contact(&mut self, id: PersonId, day: u32) -> Result<bool, EpisimError> {
        let person = self.get_mut(id)?;
        if person.is_quarantined() || person.disease_status() == DiseaseStatus::Recovered {
            return Ok(false);
        }
        trace!("quarantining traced contact {id} on day {day}");
        person.set_quarantine_status(QuarantineStatus::AtHome, day);
        Ok(true)
    }

    #[must_use]
    pub fn count_status(&self, status: DiseaseStatus) -> usize {
        self.people
            .iter()
            .filter(|p| p.disease_status() == status)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_ordered() {
        let mut registry = PersonRegistry::new();
        let a = registry.add_person(Some(20));
        let b = registry.add_person(None);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(registry.get(b).unwrap().age(), None);
    }

    #[test]
    fn unknown_person_is_an_error() {
        let registry = PersonRegistry::new();
        assert!(matches!(
            registry.get(PersonId::new(3)),
            Err(EpisimError::UnknownPerson(id)) if id.index() == 3
        ));
    }

    #[test]
    fn record_contact_is_symmetric() {
        let mut registry = PersonRegistry::new();
        let a = registry.add_person(None);
        let b = registry.add_person(None);
        registry.record_contact(a, b, 100.0).unwrap();

        assert_eq!(
            registry.get(a).unwrap().trace_log().contacts_since(0.0).collect::<Vec<_>>(),
            vec![b]
        );
        assert_eq!(
            registry.get(b).unwrap().trace_log().contacts_since(0.0).collect::<Vec<_>>(),
            vec![a]
        );
        assert!(registry.record_contact(a, PersonId::new(9), 1.0).is_err());
        assert!(registry.get(a).unwrap().trace_log().len() == 1);
    }

    #[test]
    fn quarantine_contact_skips_quarantined_and_recovered() {
        let mut registry = PersonRegistry::new();
        let free = registry.add_person(None);
        let already = registry.add_person(None);
        let recovered = registry.add_person(None);
        registry
            .get_mut(already)
            .unwrap()
            .set_quarantine_status(QuarantineStatus::AtHome, 2);
        registry
            .get_mut(recovered)
            .unwrap()
            .set_disease_status(DiseaseStatus::Recovered, 1);

        assert!(registry.quarantine_contact(free, 5).unwrap());
        assert!(!registry.quarantine_contact(already, 5).unwrap());
        assert!(!registry.quarantine_contact(recovered, 5).unwrap());

        assert_eq!(registry.get(free).unwrap().days_since_quarantine(5), Some(0));
        // The earlier quarantine start is kept.
        assert_eq!(registry.get(already).unwrap().days_since_quarantine(5), Some(3));
        assert!(!registry.get(recovered).unwrap().is_quarantined());
    }

    #[test]
    fn load_records_reads_optional_ages() {
        let data = "age\n34\n71\n";
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data.as_bytes());
        let mut registry = PersonRegistry::new();
        assert_eq!(registry.load_records(reader).unwrap(), 2);
        assert_eq!(registry.get(PersonId::new(0)).unwrap().age(), Some(34));
        assert_eq!(registry.get(PersonId::new(1)).unwrap().age(), Some(71));
    }

    #[test]
    fn load_records_with_unknown_age() {
        let data = "id,age\na,\nb,5\n";
        let reader = csv::Reader::from_reader(data.as_bytes());
        let mut registry = PersonRegistry::new();
        assert_eq!(registry.load_records(reader).unwrap(), 2);
        assert_eq!(registry.get(PersonId::new(0)).unwrap().age(), None);
        assert_eq!(registry.get(PersonId::new(1)).unwrap().age(), Some(5));
    }
}

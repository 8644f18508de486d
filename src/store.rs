// src/store.rs

use crate::error::{AncestryError, Result};
use crate::model::{Event, Family, Handle, Person};
use indicatif::ProgressBar;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Record count above which loading reports progress
const PROGRESS_THRESHOLD: usize = 10_000;

/// An individual as seen by the ancestor traversal
pub trait Individual {
    fn handle(&self) -> &Handle;
    /// The family in which this individual is a child, if any
    fn parent_family(&self) -> Option<&Handle>;
}

/// A family group as seen by the ancestor traversal
pub trait FamilyGroup {
    fn father(&self) -> Option<&Handle>;
    fn mother(&self) -> Option<&Handle>;
}

/// Read-only lookups into a genealogical record store
pub trait RecordStore {
    type Individual: Individual;
    type Family: FamilyGroup;

    fn individual(&self, handle: &Handle) -> Option<&Self::Individual>;
    fn family(&self, handle: &Handle) -> Option<&Self::Family>;
}

impl Individual for Person {
    fn handle(&self) -> &Handle {
        &self.handle
    }

    fn parent_family(&self) -> Option<&Handle> {
        self.main_parents_family()
    }
}

impl FamilyGroup for Family {
    fn father(&self) -> Option<&Handle> {
        self.father.as_ref()
    }

    fn mother(&self) -> Option<&Handle> {
        self.mother.as_ref()
    }
}

/// On-disk layout of a record file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordFile {
    people: Vec<Person>,
    families: Vec<Family>,
    events: Vec<Event>,
}

/// In-memory record store indexed by handle
#[derive(Debug, Default)]
pub struct Database {
    people: HashMap<Handle, Person>,
    families: HashMap<Handle, Family>,
    events: HashMap<Handle, Event>,
    gramps_ids: HashMap<String, Handle>,
}

impl Database {
    pub fn open(path: &Path, show_progress: bool) -> Result<Self> {
        log::info!("Loading records from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), show_progress)
    }

    pub fn from_reader<R: Read>(reader: R, show_progress: bool) -> Result<Self> {
        let records: RecordFile = serde_json::from_reader(reader)?;
        Self::from_records(records.people, records.families, records.events, show_progress)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: RecordFile = serde_json::from_str(json)?;
        Self::from_records(records.people, records.families, records.events, false)
    }

    pub fn from_records(
        people: Vec<Person>,
        families: Vec<Family>,
        events: Vec<Event>,
        show_progress: bool,
    ) -> Result<Self> {
        let total = people.len() + families.len() + events.len();
        let bar = if show_progress && total >= PROGRESS_THRESHOLD {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        bar.set_message("Indexing records");

        let mut db = Database::default();
        for event in events {
            if let Some(date) = &event.date {
                date.validate()?;
            }
            insert_unique(&mut db.events, event.handle.clone(), event, "event")?;
            bar.inc(1);
        }
        for family in families {
            insert_unique(&mut db.families, family.handle.clone(), family, "family")?;
            bar.inc(1);
        }
        for person in people {
            if !person.gramps_id.is_empty() {
                if let Some(first) = db.gramps_ids.get(&person.gramps_id) {
                    return Err(AncestryError::DuplicateGrampsId {
                        gramps_id: person.gramps_id.clone(),
                        first: first.to_string(),
                        second: person.handle.to_string(),
                    });
                }
                db.gramps_ids.insert(person.gramps_id.clone(), person.handle.clone());
            }
            insert_unique(&mut db.people, person.handle.clone(), person, "person")?;
            bar.inc(1);
        }
        bar.finish_and_clear();

        log::info!(
            "Indexed {} people, {} families, {} events",
            db.people.len(),
            db.families.len(),
            db.events.len()
        );
        Ok(db)
    }

    pub fn event(&self, handle: &Handle) -> Option<&Event> {
        self.events.get(handle)
    }

    /// Person handle for a gramps id such as "I0001"
    pub fn handle_from_gramps_id(&self, gramps_id: &str) -> Option<&Handle> {
        self.gramps_ids.get(gramps_id)
    }

    /// Accepts either a handle or a gramps id
    pub fn resolve_person(&self, key: &str) -> Result<Handle> {
        let handle = Handle::new(key);
        if self.people.contains_key(&handle) {
            return Ok(handle);
        }
        self.handle_from_gramps_id(key)
            .cloned()
            .ok_or_else(|| AncestryError::UnknownPerson(key.to_string()))
    }

    pub fn people_count(&self) -> usize {
        self.people.len()
    }
}

fn insert_unique<T>(
    map: &mut HashMap<Handle, T>,
    handle: Handle,
    value: T,
    kind: &'static str,
) -> Result<()> {
    if map.contains_key(&handle) {
        return Err(AncestryError::DuplicateHandle {
            kind,
            handle: handle.to_string(),
        });
    }
    map.insert(handle, value);
    Ok(())
}

impl RecordStore for Database {
    type Individual = Person;
    type Family = Family;

    fn individual(&self, handle: &Handle) -> Option<&Person> {
        self.people.get(handle)
    }

    fn family(&self, handle: &Handle) -> Option<&Family> {
        self.families.get(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "people": [
            {"handle": "p1", "gramps_id": "I0001", "name": {"first_name": "Ada", "surname": "Lovelace"},
             "parent_families": ["f1"]},
            {"handle": "p2", "gramps_id": "I0002", "name": {"first_name": "George", "surname": "Byron"}}
        ],
        "families": [{"handle": "f1", "gramps_id": "F0001", "father": "p2"}],
        "events": [{"handle": "e1", "type": "birth", "date": {"year": 1815, "month": 12, "day": 10}}]
    }"#;

    #[test]
    fn loads_and_indexes_records() {
        let db = Database::from_json_str(SAMPLE).unwrap();
        assert_eq!(db.people_count(), 2);
        let ada = db.individual(&Handle::new("p1")).unwrap();
        assert_eq!(ada.parent_family(), Some(&Handle::new("f1")));
        let family = db.family(&Handle::new("f1")).unwrap();
        assert_eq!(family.father(), Some(&Handle::new("p2")));
        assert_eq!(family.mother(), None);
        assert!(db.event(&Handle::new("e1")).is_some());
    }

    #[test]
    fn resolves_people_by_handle_or_gramps_id() {
        let db = Database::from_json_str(SAMPLE).unwrap();
        assert_eq!(db.resolve_person("p2").unwrap(), Handle::new("p2"));
        assert_eq!(db.resolve_person("I0001").unwrap(), Handle::new("p1"));
        // a family id is not a person
        assert!(matches!(
            db.resolve_person("F0001"),
            Err(AncestryError::UnknownPerson(_))
        ));
    }

    #[test]
    fn rejects_duplicate_handles() {
        let json = r#"{"people": [{"handle": "p1"}, {"handle": "p1"}]}"#;
        let err = Database::from_json_str(json).unwrap_err();
        assert!(matches!(err, AncestryError::DuplicateHandle { kind: "person", .. }));
    }

    #[test]
    fn rejects_shared_gramps_ids() {
        let json = r#"{"people": [
            {"handle": "a", "gramps_id": "I1"},
            {"handle": "b", "gramps_id": "I1"}
        ]}"#;
        match Database::from_json_str(json) {
            Err(AncestryError::DuplicateGrampsId { gramps_id, first, second }) => {
                assert_eq!(gramps_id, "I1");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected a duplicate gramps id error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_invalid_dates() {
        let json = r#"{"events": [{"handle": "e1", "type": "death", "date": {"year": 1900, "month": 2, "day": 31}}]}"#;
        assert!(matches!(
            Database::from_json_str(json),
            Err(AncestryError::InvalidDate(_))
        ));

        let yearless = r#"{"events": [{"handle": "e2", "type": "birth", "date": {"month": 5, "day": 3}}]}"#;
        assert!(matches!(
            Database::from_json_str(yearless),
            Err(AncestryError::InvalidDate(_))
        ));
    }

    #[test]
    fn empty_document_is_an_empty_store() {
        let db = Database::from_json_str("{}").unwrap();
        assert_eq!(db.people_count(), 0);
    }
}

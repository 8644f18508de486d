// src/events.rs

use crate::model::{Event, EventRole, Handle, Person};
use crate::store::Database;

/// What the ancestor rows need to know about an event
pub trait EventInfo {
    fn abbreviation(&self) -> String;
    fn display_date(&self) -> String;
    /// Chronological sort value; `None` when the event carries no calendrical date
    fn sort_value(&self) -> Option<u64>;
}

/// Resolves the events that mark the start and end of a life
pub trait EventResolver<P: ?Sized> {
    type Event: EventInfo;

    fn birth_or_fallback<'a>(&'a self, person: &P) -> Option<&'a Self::Event>;
    fn death_or_fallback<'a>(&'a self, person: &P) -> Option<&'a Self::Event>;
}

impl EventInfo for Event {
    fn abbreviation(&self) -> String {
        self.event_type.abbreviation()
    }

    fn display_date(&self) -> String {
        self.date.as_ref().map(|d| d.to_string()).unwrap_or_default()
    }

    fn sort_value(&self) -> Option<u64> {
        self.date.as_ref().and_then(|d| d.sort_value())
    }
}

impl Database {
    /// The referenced event if it resolves, otherwise the first primary event accepted by `fallback`.
    fn event_or_fallback(
        &self,
        person: &Person,
        primary: Option<&Handle>,
        fallback: fn(&Event) -> bool,
    ) -> Option<&Event> {
        if let Some(event) = primary.and_then(|h| self.event(h)) {
            return Some(event);
        }
        person
            .event_refs
            .iter()
            .filter(|r| r.role == EventRole::Primary)
            .filter_map(|r| self.event(&r.handle))
            .find(|event| fallback(event))
    }
}

impl EventResolver<Person> for Database {
    type Event = Event;

    fn birth_or_fallback<'a>(&'a self, person: &Person) -> Option<&'a Event> {
        self.event_or_fallback(person, person.birth_ref.as_ref(), |e| {
            e.event_type.is_birth_fallback()
        })
    }

    fn death_or_fallback<'a>(&'a self, person: &Person) -> Option<&'a Event> {
        self.event_or_fallback(person, person.death_ref.as_ref(), |e| {
            e.event_type.is_death_fallback()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RecordStore;

    fn db() -> Database {
        Database::from_json_str(
            r#"{
            "people": [
                {"handle": "born", "birth_ref": "b1",
                 "event_refs": [{"handle": "bap1"}, {"handle": "b1"}]},
                {"handle": "baptised",
                 "event_refs": [{"handle": "chr1", "role": "witness"}, {"handle": "bap1"}, {"handle": "bur1"}]},
                {"handle": "dangling", "birth_ref": "missing", "death_ref": "missing",
                 "event_refs": [{"handle": "crem1"}]},
                {"handle": "nothing"}
            ],
            "events": [
                {"handle": "b1", "type": "birth", "date": {"year": 1801, "month": 5, "day": 2}},
                {"handle": "bap1", "type": "baptism", "date": {"year": 1801, "month": 5}},
                {"handle": "chr1", "type": "christening", "date": {"year": 1799}},
                {"handle": "bur1", "type": "burial", "date": {"text": "winter"}},
                {"handle": "crem1", "type": "cremation"}
            ]
        }"#,
        )
        .unwrap()
    }

    fn person<'a>(db: &'a Database, handle: &str) -> &'a Person {
        db.individual(&Handle::new(handle)).unwrap()
    }

    #[test]
    fn primary_birth_wins_over_fallback() {
        let db = db();
        let birth = db.birth_or_fallback(person(&db, "born")).unwrap();
        assert_eq!(birth.handle, Handle::new("b1"));
        assert_eq!(birth.display_date(), "1801-05-02");
        assert_eq!(birth.abbreviation(), "b.");
    }

    #[test]
    fn fallback_skips_non_primary_roles() {
        let db = db();
        let p = person(&db, "baptised");
        let birth = db.birth_or_fallback(p).unwrap();
        assert_eq!(birth.handle, Handle::new("bap1"));
        assert_eq!(birth.abbreviation(), "bap.");

        let death = db.death_or_fallback(p).unwrap();
        assert_eq!(death.handle, Handle::new("bur1"));
        assert_eq!(death.display_date(), "winter");
        assert_eq!(death.sort_value(), None);
    }

    #[test]
    fn dangling_reference_falls_back() {
        let db = db();
        let p = person(&db, "dangling");
        assert!(db.birth_or_fallback(p).is_none());
        let death = db.death_or_fallback(p).unwrap();
        assert_eq!(death.handle, Handle::new("crem1"));
        assert_eq!(death.display_date(), "");
    }

    #[test]
    fn no_events_resolve_to_none() {
        let db = db();
        let p = person(&db, "nothing");
        assert!(db.birth_or_fallback(p).is_none());
        assert!(db.death_or_fallback(p).is_none());
    }
}

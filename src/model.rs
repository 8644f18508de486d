// src/model.rs

use crate::error::AncestryError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Julian Day Number of 0001-01-01 minus one, relative to chrono's day count from CE.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Opaque identifier of a record in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Handle(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Handle::new(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unknown,
}

/// The parts of a person's primary name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Name {
    pub title: String,
    pub first_name: String,
    pub call: String,
    pub surname: String,
    pub suffix: String,
    pub nick: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRole {
    #[default]
    Primary,
    Witness,
    Family,
    Unknown,
}

/// A person's link to an event, with the role they played in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    pub handle: Handle,
    #[serde(default)]
    pub role: EventRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(default)]
    pub name: Name,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub event_refs: Vec<EventRef>,
    #[serde(default)]
    pub birth_ref: Option<Handle>,
    #[serde(default)]
    pub death_ref: Option<Handle>,
    /// Families in which this person is a child; the first one is the main parents family
    #[serde(default)]
    pub parent_families: Vec<Handle>,
}

impl Person {
    pub fn main_parents_family(&self) -> Option<&Handle> {
        self.parent_families.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(default)]
    pub father: Option<Handle>,
    #[serde(default)]
    pub mother: Option<Handle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateModifier {
    #[default]
    None,
    Before,
    After,
    About,
    Estimated,
}

impl DateModifier {
    fn prefix(self) -> &'static str {
        match self {
            DateModifier::None => "",
            DateModifier::Before => "before ",
            DateModifier::After => "after ",
            DateModifier::About => "about ",
            DateModifier::Estimated => "estimated ",
        }
    }
}

/// A proleptic Gregorian date, possibly partial, or a free-text date
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    pub modifier: DateModifier,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    /// Used when the date could not be parsed into components
    pub text: Option<String>,
}

impl Date {
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Date {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..Default::default()
        }
    }

    pub fn year(year: i32) -> Self {
        Date {
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Date {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn with_modifier(mut self, modifier: DateModifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Resolves the calendrical part, filling an unknown month or day with 1.
    fn naive(&self) -> Option<NaiveDate> {
        let year = self.year?;
        NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), self.day.unwrap_or(1))
    }

    pub fn validate(&self) -> Result<(), AncestryError> {
        if self.year.is_none() && (self.month.is_some() || self.day.is_some()) {
            return Err(AncestryError::InvalidDate(format!(
                "{:?}: month or day given without year",
                self
            )));
        }
        if self.day.is_some() && self.month.is_none() {
            return Err(AncestryError::InvalidDate(format!(
                "{:?}: day given without month",
                self
            )));
        }
        if self.year.is_some() && self.naive().is_none() {
            return Err(AncestryError::InvalidDate(format!("{:?}", self)));
        }
        Ok(())
    }

    /// Julian Day Number of the date; `None` for text-only dates
    pub fn sort_value(&self) -> Option<u64> {
        let date = self.naive()?;
        let jdn = i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET;
        u64::try_from(jdn).ok()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(date) = self.naive() else {
            return f.write_str(self.text.as_deref().unwrap_or(""));
        };
        f.write_str(self.modifier.prefix())?;
        match (self.month, self.day) {
            (Some(_), Some(_)) => write!(f, "{:04}-{:02}-{:02}", date.year(), date.month(), date.day()),
            (Some(_), None) => write!(f, "{:04}-{:02}", date.year(), date.month()),
            _ => write!(f, "{:04}", date.year()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Birth,
    Baptism,
    Christening,
    Death,
    Burial,
    Cremation,
    CauseOfDeath,
    Marriage,
    Residence,
    Occupation,
    Custom(String),
}

impl EventType {
    pub fn abbreviation(&self) -> String {
        match self {
            EventType::Birth => "b.".into(),
            EventType::Baptism => "bap.".into(),
            EventType::Christening => "chr.".into(),
            EventType::Death => "d.".into(),
            EventType::Burial => "bur.".into(),
            EventType::Cremation => "crem.".into(),
            EventType::CauseOfDeath => "d.(cause)".into(),
            EventType::Marriage => "m.".into(),
            EventType::Residence => "res.".into(),
            EventType::Occupation => "occ.".into(),
            EventType::Custom(name) => {
                let short: String = name.chars().take(3).collect();
                format!("{}.", short.to_lowercase())
            }
        }
    }

    /// Events that may stand in for a missing birth
    pub fn is_birth_fallback(&self) -> bool {
        matches!(self, EventType::Baptism | EventType::Christening)
    }

    /// Events that may stand in for a missing death
    pub fn is_death_fallback(&self) -> bool {
        matches!(
            self,
            EventType::Burial | EventType::Cremation | EventType::CauseOfDeath
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub handle: Handle,
    #[serde(default)]
    pub gramps_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub date: Option<Date>,
    #[serde(default)]
    pub description: String,
}

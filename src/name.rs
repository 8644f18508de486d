// src/name.rs

use crate::model::{Name, Person};
use serde::{Deserialize, Serialize};

/// Produces the display name of an individual
pub trait NameFormatter<P: ?Sized> {
    fn display(&self, person: &P) -> String;
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameFormat {
    /// "Surname, Given Suffix"
    #[default]
    SurnameGiven,
    /// "Given Surname Suffix"
    GivenSurname,
    /// "Title Given Surname Suffix"
    Full,
    /// "Call-name Surname", falling back to the given name
    CallSurname,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NameDisplay {
    pub format: NameFormat,
}

impl NameDisplay {
    pub fn new(format: NameFormat) -> Self {
        NameDisplay { format }
    }

    pub fn format_name(&self, name: &Name) -> String {
        match self.format {
            NameFormat::SurnameGiven => {
                let given = join_words(&[&name.first_name, &name.suffix]);
                match (name.surname.trim().is_empty(), given.is_empty()) {
                    (false, false) => format!("{}, {}", name.surname.trim(), given),
                    (false, true) => name.surname.trim().to_string(),
                    (true, _) => given,
                }
            }
            NameFormat::GivenSurname => {
                join_words(&[&name.first_name, &name.surname, &name.suffix])
            }
            NameFormat::Full => join_words(&[
                &name.title,
                &name.first_name,
                &name.surname,
                &name.suffix,
            ]),
            NameFormat::CallSurname => {
                let call = if name.call.trim().is_empty() {
                    &name.first_name
                } else {
                    &name.call
                };
                join_words(&[call, &name.surname])
            }
        }
    }
}

/// Joins the non-empty parts with single spaces
fn join_words(parts: &[&String]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

impl NameFormatter<Person> for NameDisplay {
    fn display(&self, person: &Person) -> String {
        self.format_name(&person.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> Name {
        Name {
            title: "Sir".into(),
            first_name: "John  Ronald".into(),
            call: "Ronald".into(),
            surname: "Tolkien".into(),
            suffix: "Jr".into(),
            nick: String::new(),
        }
    }

    #[test]
    fn formats() {
        let n = name();
        assert_eq!(
            NameDisplay::new(NameFormat::SurnameGiven).format_name(&n),
            "Tolkien, John Ronald Jr"
        );
        assert_eq!(
            NameDisplay::new(NameFormat::GivenSurname).format_name(&n),
            "John Ronald Tolkien Jr"
        );
        assert_eq!(
            NameDisplay::new(NameFormat::Full).format_name(&n),
            "Sir John Ronald Tolkien Jr"
        );
        assert_eq!(
            NameDisplay::new(NameFormat::CallSurname).format_name(&n),
            "Ronald Tolkien"
        );
    }

    #[test]
    fn missing_parts_leave_no_stray_separators() {
        let surname_only = Name {
            surname: "Doe".into(),
            ..Default::default()
        };
        let given_only = Name {
            first_name: "Jane".into(),
            ..Default::default()
        };
        let fmt = NameDisplay::default();
        assert_eq!(fmt.format_name(&surname_only), "Doe");
        assert_eq!(fmt.format_name(&given_only), "Jane");
        assert_eq!(fmt.format_name(&Name::default()), "");
        assert_eq!(
            NameDisplay::new(NameFormat::CallSurname).format_name(&given_only),
            "Jane"
        );
    }

    #[test]
    fn settings_and_flags_spell_formats_alike() {
        use clap::ValueEnum;
        for format in NameFormat::value_variants() {
            let flag = format.to_possible_value().unwrap();
            let json = serde_json::to_value(format).unwrap();
            assert_eq!(json, flag.get_name());
        }
        assert_eq!(
            serde_json::from_str::<NameFormat>("\"call-surname\"").unwrap(),
            NameFormat::CallSurname
        );
        assert!(serde_json::from_str::<NameFormat>("\"nickname\"").is_err());
    }
}

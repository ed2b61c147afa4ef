use crate::scheduler::SchedError;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Tag de groupe (bâtiment), normalisé en minuscules. Vide = aucun groupe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Group(String);

impl Group {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_lowercase())
    }
    pub fn none() -> Self {
        Self(String::new())
    }
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("-")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Personne de garde (RA)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Group,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "BTreeSet::is_empty")
    )]
    pub unavailable: BTreeSet<NaiveDate>,
}

impl Person {
    pub fn new<N: Into<String>>(name: N, group: Group) -> Self {
        Self {
            name: name.into(),
            group,
            unavailable: BTreeSet::new(),
        }
    }

    pub fn with_unavailable<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.unavailable.extend(dates);
        self
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.unavailable.contains(&date)
    }
}

/// Roster complet, figé après construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Roster {
    people: Vec<Person>,
}

impl Roster {
    /// Valide les noms (non vides, uniques) ; chaque personne porte sa ligne
    /// d'origine, `origin` nomme la source en cas d'erreur.
    pub fn from_lines(lines: Vec<(u64, Person)>, origin: &str) -> Result<Self, SchedError> {
        let mut seen = HashSet::new();
        for (line, p) in &lines {
            let reason = if p.name.trim().is_empty() {
                "empty name".to_string()
            } else if !seen.insert(p.name.as_str()) {
                format!("duplicate name {}", p.name)
            } else {
                continue;
            };
            return Err(SchedError::InvalidFormat {
                origin: origin.to_string(),
                line: *line,
                reason,
            });
        }
        Ok(Self {
            people: lines.into_iter().map(|(_, p)| p).collect(),
        })
    }

    /// Roster construit par programme : la « ligne » est le rang (1-based).
    pub fn new(people: Vec<Person>) -> Result<Self, SchedError> {
        let lines = people
            .into_iter()
            .enumerate()
            .map(|(idx, p)| (idx as u64 + 1, p))
            .collect();
        Self::from_lines(lines, "roster")
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn find<'a>(&'a self, name: &str) -> Option<&'a Person> {
        self.people.iter().find(|p| p.name == name)
    }

    pub fn members_of<'a>(&'a self, group: &'a Group) -> impl Iterator<Item = &'a Person> + 'a {
        self.people.iter().filter(move |p| &p.group == group)
    }
}

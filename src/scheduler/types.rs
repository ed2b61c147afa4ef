use crate::calendar::DateRange;
use crate::model::Group;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use super::load::LoadTracker;

/// Métrique d'équité pour les jours de semaine.
///
/// Les jours de week-end se classent toujours sur le compteur week-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FairnessMetric {
    /// semaine + week-end cumulés
    #[default]
    Combined,
    /// semaine uniquement
    WeekdayOnly,
}

/// Mode de couverture des week-ends.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DutyMode {
    /// une seule personne par jour, tous jours confondus
    #[default]
    Single,
    /// un membre de chaque groupe les jours de week-end
    Dual { first: Group, second: Group },
}

/// Options d'assignation
#[derive(Debug, Clone, Default)]
pub struct ScheduleOptions {
    pub mode: DutyMode,
    pub metric: FairnessMetric,
}

/// Rôle qui n'a pas pu être pourvu normalement un jour donné.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    Any,
    Group(Group),
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Any => f.write_str("duty"),
            Role::Group(g) => write!(f, "{g}"),
        }
    }
}

/// Repli utilisé pour résoudre un rôle sans candidat disponible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Fallback {
    /// tirage sur tout le roster, disponibilités ignorées
    WholeRoster,
    /// seul candidat de l'autre groupe, qui couvre les deux rôles
    SoleCandidate,
    /// tirage dans le pool disponible de l'autre groupe
    CrossGroup,
}

/// Jour dégradé : signalé pour revue manuelle, le planning reste complet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolutionFailure {
    pub date: NaiveDate,
    pub role: Role,
    pub fallback: Fallback,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.role {
            Role::Any => write!(f, "{} - couldn't resolve", self.date)?,
            Role::Group(g) => write!(f, "{} - couldn't resolve for {g}", self.date)?,
        }
        match self.fallback {
            Fallback::WholeRoster => f.write_str(" (picked at random from the whole roster)"),
            Fallback::SoleCandidate => {
                f.write_str(" (not enough people to cover both groups, sole candidate doubles)")
            }
            Fallback::CrossGroup => f.write_str(" (covered from the other group)"),
        }
    }
}

/// Affectation d'une date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Assignment {
    Single(String),
    Dual { first: String, second: String },
}

impl Assignment {
    /// Noms affectés, dans l'ordre des rôles.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Assignment::Single(name) => vec![name.as_str()],
            Assignment::Dual { first, second } => vec![first.as_str(), second.as_str()],
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.names().contains(&name)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assignment::Single(name) => f.write_str(name),
            Assignment::Dual { first, second } => write!(f, "{first}, {second}"),
        }
    }
}

/// Date -> affectation ; une entrée n'est jamais réécrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignmentMap(BTreeMap<NaiveDate, Assignment>);

impl AssignmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, assignment: Assignment) -> Result<(), SchedError> {
        if self.0.contains_key(&date) {
            return Err(SchedError::AlreadyAssigned(date));
        }
        self.0.insert(date, assignment);
        Ok(())
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Assignment> {
        self.0.get(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &Assignment)> {
        self.0.iter()
    }
}

/// Résultat d'un run complet.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub range: DateRange,
    pub assignments: AssignmentMap,
    pub loads: LoadTracker,
    pub failures: Vec<ResolutionFailure>,
}

impl Schedule {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("start date {start} is later than end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("{origin} - file format is invalid (line {line}): {reason}")]
    InvalidFormat {
        origin: String,
        line: u64,
        reason: String,
    },
    #[error("roster is empty, nobody can be scheduled")]
    EmptyRoster,
    #[error("both duty roles use group {0}, two distinct groups are required")]
    SameGroup(Group),
    #[error("{date} - not enough people to cover both groups")]
    RosterExhausted { date: NaiveDate },
    #[error("date {0} is already assigned")]
    AlreadyAssigned(NaiveDate),
    #[error("unknown person: {0}")]
    UnknownPerson(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

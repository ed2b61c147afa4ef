use super::types::{FairnessMetric, SchedError};
use crate::model::Roster;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Compteurs cumulés d'une personne.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoadCount {
    pub weekday: u32,
    pub weekend: u32,
}

impl LoadCount {
    pub fn total(&self) -> u32 {
        self.weekday + self.weekend
    }
}

/// Axe de compteur touché par une affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Weekday,
    Weekend,
}

/// Suivi de charge par personne, dans l'ordre du roster.
///
/// Croissance monotone : `increment` est la seule mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTracker {
    entries: Vec<(String, LoadCount)>,
}

impl LoadTracker {
    pub fn new(roster: &Roster) -> Self {
        Self {
            entries: roster
                .iter()
                .map(|p| (p.name.clone(), LoadCount::default()))
                .collect(),
        }
    }

    /// Tracker pré-chargé ; les membres absents de `seed` partent de (0,0).
    pub fn seeded<I, S>(roster: &Roster, seed: I) -> Result<Self, SchedError>
    where
        I: IntoIterator<Item = (S, LoadCount)>,
        S: AsRef<str>,
    {
        let mut tracker = Self::new(roster);
        for (name, count) in seed {
            let slot = tracker
                .slot_mut(name.as_ref())
                .ok_or_else(|| SchedError::UnknownPerson(name.as_ref().to_string()))?;
            *slot = count;
        }
        Ok(tracker)
    }

    pub fn get(&self, name: &str) -> Option<LoadCount> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, count)| *count)
    }

    pub fn increment(&mut self, name: &str, axis: Axis) -> Result<(), SchedError> {
        let slot = self
            .slot_mut(name)
            .ok_or_else(|| SchedError::UnknownPerson(name.to_string()))?;
        match axis {
            Axis::Weekday => slot.weekday += 1,
            Axis::Weekend => slot.weekend += 1,
        }
        Ok(())
    }

    /// Valeur de charge utilisée pour classer les candidats sur cet axe.
    pub fn load_value(&self, name: &str, axis: Axis, metric: FairnessMetric) -> u32 {
        let count = self.get(name).unwrap_or_default();
        match (axis, metric) {
            (Axis::Weekend, _) => count.weekend,
            (Axis::Weekday, FairnessMetric::WeekdayOnly) => count.weekday,
            (Axis::Weekday, FairnessMetric::Combined) => count.total(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LoadCount)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut LoadCount> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, count)| count)
    }
}

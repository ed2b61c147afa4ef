mod assignment;
mod conflicts;
mod load;
mod selection;
mod types;

pub use conflicts::{detect_conflicts, Conflict, ConflictKind};
pub use load::{Axis, LoadCount, LoadTracker};
pub use types::{
    Assignment, AssignmentMap, DutyMode, Fallback, FairnessMetric, ResolutionFailure, Role,
    SchedError, Schedule, ScheduleOptions,
};

use crate::calendar::DateRange;
use crate::model::Roster;
use chrono::NaiveDate;
use rand::Rng;

/// Scheduler : répartit les gardes d'un roster emprunté, jour par jour.
#[derive(Debug)]
pub struct Scheduler<'r> {
    roster: &'r Roster,
    options: ScheduleOptions,
    loads: LoadTracker,
    assignments: AssignmentMap,
    failures: Vec<ResolutionFailure>,
}

impl<'r> Scheduler<'r> {
    pub fn new(roster: &'r Roster, options: ScheduleOptions) -> Self {
        Self {
            roster,
            options,
            loads: LoadTracker::new(roster),
            assignments: AssignmentMap::new(),
            failures: Vec::new(),
        }
    }

    /// Démarre avec des charges déjà accumulées.
    pub fn with_loads(mut self, loads: LoadTracker) -> Self {
        self.loads = loads;
        self
    }

    pub fn roster(&self) -> &Roster {
        self.roster
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    pub fn loads(&self) -> &LoadTracker {
        &self.loads
    }

    /// Affecte chaque date de `range` exactement une fois.
    pub fn run<R>(mut self, range: &DateRange, rng: &mut R) -> Result<Schedule, SchedError>
    where
        R: Rng + ?Sized,
    {
        #[cfg(feature = "logging")]
        tracing::info!(
            people = self.roster.len(),
            days = range.len(),
            mode = ?self.options.mode,
            metric = ?self.options.metric,
            "scheduling started"
        );

        assignment::assign_range(&mut self, range, rng)?;

        #[cfg(feature = "logging")]
        tracing::info!(degraded = self.failures.len(), "scheduling finished");

        Ok(Schedule {
            range: range.clone(),
            assignments: self.assignments,
            loads: self.loads,
            failures: self.failures,
        })
    }

    fn note_failure(&mut self, date: NaiveDate, role: Role, fallback: Fallback) {
        let failure = ResolutionFailure {
            date,
            role,
            fallback,
        };
        #[cfg(feature = "logging")]
        tracing::warn!(%date, role = %failure.role, ?fallback, "{failure}");
        self.failures.push(failure);
    }
}

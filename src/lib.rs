#![forbid(unsafe_code)]
//! Garde — répartition équitable des tours de garde d'une équipe (sans BD).
//!
//! - Roster en fichier texte (`nom | bâtiment | indisponibilités`).
//! - Glouton à charge minimale, départage aléatoire reproductible (graine).
//! - Week-ends à deux bâtiments, avec replis signalés pour revue manuelle.
//! - Dates calendaires sans fuseau (`NaiveDate`).

pub mod calendar;
pub mod io;
pub mod model;
pub mod report;
pub mod scheduler;
pub mod storage;

pub use calendar::{parse_date, weekday_label, DateRange, DayClass};
pub use model::{Group, Person, Roster};
pub use report::{PersonSummary, ReportLine, ScheduleReport};
pub use scheduler::{
    detect_conflicts, Assignment, AssignmentMap, Conflict, ConflictKind, DutyMode,
    FairnessMetric, LoadCount, LoadTracker, ResolutionFailure, SchedError, Schedule,
    ScheduleOptions, Scheduler,
};
pub use storage::{ReportStore, TextReportStore};
#[cfg(feature = "serde")]
pub use storage::JsonReportStore;

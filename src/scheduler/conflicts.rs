use super::types::{Assignment, Schedule};
use crate::model::Roster;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    Unavailable,          // de garde un jour déclaré indisponible
    DoubleRole,           // couvre les deux bâtiments le même jour
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub person: String,
    pub date: NaiveDate,
    pub kind: ConflictKind,
}

/// Relit un planning terminé et liste les affectations à revoir à la main.
pub fn detect_conflicts(schedule: &Schedule, roster: &Roster) -> Vec<Conflict> {
    let mut out = Vec::new();

    for (date, assignment) in schedule.assignments.iter() {
        if let Assignment::Dual { first, second } = assignment {
            if first == second {
                out.push(Conflict {
                    person: first.clone(),
                    date: *date,
                    kind: ConflictKind::DoubleRole,
                });
            }
        }

        let mut names = assignment.names();
        names.dedup();
        for name in names {
            let blocked = roster
                .find(name)
                .map(|p| !p.is_available(*date))
                .unwrap_or(false);
            if blocked {
                out.push(Conflict {
                    person: name.to_string(),
                    date: *date,
                    kind: ConflictKind::Unavailable,
                });
            }
        }
    }

    out
}

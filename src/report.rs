use crate::calendar::{weekday_label, DayClass};
use crate::model::Roster;
use crate::scheduler::Schedule;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Une ligne du rapport : `<jour> : <date> : <affectés>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ReportLine {
    pub label: &'static str,
    pub date: NaiveDate,
    pub class: DayClass,
    pub assignee: String,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.label, self.date, self.assignee)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PersonSummary {
    pub name: String,
    pub weekdays: u32,
    pub weekends: u32,
}

/// Rapport final, dans l'ordre chronologique.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ScheduleReport {
    pub lines: Vec<ReportLine>,
    pub people: Vec<PersonSummary>,
    pub total_weekdays: usize,
    pub total_weekends: usize,
    pub degraded_days: Vec<NaiveDate>,
}

impl ScheduleReport {
    pub fn from_schedule(schedule: &Schedule, roster: &Roster) -> Self {
        let lines = schedule
            .range
            .dates()
            .iter()
            .map(|&date| ReportLine {
                label: weekday_label(date),
                date,
                class: DayClass::of(date),
                assignee: schedule
                    .assignments
                    .get(date)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            })
            .collect();

        let people = roster
            .iter()
            .map(|p| {
                let count = schedule.loads.get(&p.name).unwrap_or_default();
                PersonSummary {
                    name: p.name.clone(),
                    weekdays: count.weekday,
                    weekends: count.weekend,
                }
            })
            .collect();

        let mut degraded_days: Vec<NaiveDate> =
            schedule.failures.iter().map(|f| f.date).collect();
        degraded_days.sort();
        degraded_days.dedup();

        Self {
            lines,
            people,
            total_weekdays: schedule.range.weekdays().count(),
            total_weekends: schedule.range.weekends().count(),
            degraded_days,
        }
    }

    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        self.write_summary(out)
    }

    /// Bloc de synthèse seul (aussi affiché par la CLI).
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Summary")?;
        writeln!(out, "Number of RAs: {}", self.people.len())?;
        writeln!(out, "Total weekdays: {}", self.total_weekdays)?;
        writeln!(out, "Total weekends: {}", self.total_weekends)?;
        for p in &self.people {
            writeln!(out, "{} : weekdays {}, weekends {}", p.name, p.weekdays, p.weekends)?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut buf = Vec::new();
        // écrire dans un Vec ne peut pas échouer
        let _ = self.write_text(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

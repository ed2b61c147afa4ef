use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Classe d'un jour de garde.
///
/// Vendredi et samedi forment le « week-end » : ce sont les nuits qui
/// précèdent un jour sans cours, pas le week-end du calendrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayClass {
    Weekday,
    Weekend,
}

impl DayClass {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Fri | Weekday::Sat => DayClass::Weekend,
            _ => DayClass::Weekday,
        }
    }
}

/// Nom du jour tel qu'il apparaît dans le rapport.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Parse `M/D/YYYY`, `M/D/YY` (20YY) ou `YYYY-MM-DD`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, SchedError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    let invalid = || SchedError::InvalidDate(raw.to_string());
    let parts: Vec<&str> = raw.split('/').map(str::trim).collect();
    let [m, d, y] = parts.as_slice() else {
        return Err(invalid());
    };
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let day: u32 = d.parse().map_err(|_| invalid())?;
    let year: i32 = match y.len() {
        2 => 2000 + y.parse::<i32>().map_err(|_| invalid())?,
        4 => y.parse().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Suite chronologique de dates `[start, end]`, exclusions retirées.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl DateRange {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        exclude: &BTreeSet<NaiveDate>,
    ) -> Result<Self, SchedError> {
        let dates = span(start, end)?
            .into_iter()
            .filter(|d| !exclude.contains(d))
            .collect();
        Ok(Self { start, end, dates })
    }

    /// Construit la plage principale en retirant une fenêtre de vacances.
    pub fn with_break(
        start: NaiveDate,
        end: NaiveDate,
        window: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Self, SchedError> {
        let exclude: BTreeSet<NaiveDate> = match window {
            Some((break_start, break_end)) => span(break_start, break_end)?.into_iter().collect(),
            None => BTreeSet::new(),
        };
        Self::new(start, end, &exclude)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn weekdays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.of_class(DayClass::Weekday)
    }

    pub fn weekends(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.of_class(DayClass::Weekend)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    fn of_class(&self, class: DayClass) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates
            .iter()
            .copied()
            .filter(move |d| DayClass::of(*d) == class)
    }
}

fn span(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, SchedError> {
    if end < start {
        return Err(SchedError::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

use super::load::Axis;
use super::selection;
use super::types::{Assignment, DutyMode, Fallback, Role, SchedError};
use super::Scheduler;
use crate::calendar::DateRange;
use crate::model::{Group, Person};
use chrono::NaiveDate;
use rand::Rng;

/// Week-ends d'abord (toute la plage), puis jours de semaine.
pub(super) fn assign_range<R>(
    scheduler: &mut Scheduler<'_>,
    range: &DateRange,
    rng: &mut R,
) -> Result<(), SchedError>
where
    R: Rng + ?Sized,
{
    if scheduler.roster.is_empty() {
        return Err(SchedError::EmptyRoster);
    }

    let mode = scheduler.options.mode.clone();
    if let DutyMode::Dual { first, second } = &mode {
        if first == second {
            return Err(SchedError::SameGroup(first.clone()));
        }
    }
    for date in range.weekends() {
        match &mode {
            DutyMode::Single => assign_single_day(scheduler, date, Axis::Weekend, rng)?,
            DutyMode::Dual { first, second } => {
                assign_dual_day(scheduler, date, first, second, rng)?
            }
        }
    }
    for date in range.weekdays() {
        assign_single_day(scheduler, date, Axis::Weekday, rng)?;
    }
    Ok(())
}

fn assign_single_day<R>(
    scheduler: &mut Scheduler<'_>,
    date: NaiveDate,
    axis: Axis,
    rng: &mut R,
) -> Result<(), SchedError>
where
    R: Rng + ?Sized,
{
    let roster = scheduler.roster;
    let pool = selection::eligible(roster.iter(), date);
    let (chosen, degraded) = match selection::select(
        &pool,
        &scheduler.loads,
        axis,
        scheduler.options.metric,
        rng,
    ) {
        Some(p) => (p, false),
        None => {
            let everyone: Vec<&Person> = roster.iter().collect();
            let p = selection::pick(&everyone, rng).ok_or(SchedError::EmptyRoster)?;
            (p, true)
        }
    };

    if degraded {
        scheduler.note_failure(date, Role::Any, Fallback::WholeRoster);
    }

    #[cfg(feature = "logging")]
    tracing::debug!(%date, person = %chosen.name, ?axis, "duty assigned");

    scheduler
        .assignments
        .record(date, Assignment::Single(chosen.name.clone()))?;
    scheduler.loads.increment(&chosen.name, axis)
}

fn assign_dual_day<R>(
    scheduler: &mut Scheduler<'_>,
    date: NaiveDate,
    first: &Group,
    second: &Group,
    rng: &mut R,
) -> Result<(), SchedError>
where
    R: Rng + ?Sized,
{
    let roster = scheduler.roster;
    let metric = scheduler.options.metric;
    let first_pool = selection::eligible(roster.members_of(first), date);
    let second_pool = selection::eligible(roster.members_of(second), date);

    let first_pick = selection::select(&first_pool, &scheduler.loads, Axis::Weekend, metric, rng);
    let second_pick =
        selection::select(&second_pool, &scheduler.loads, Axis::Weekend, metric, rng);

    let (first_person, second_person) = match (first_pick, second_pick) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(b)) => {
            let (a, fallback) = cover_from(&second_pool, b, rng);
            scheduler.note_failure(date, Role::Group(first.clone()), fallback);
            (a, b)
        }
        (Some(a), None) => {
            let (b, fallback) = cover_from(&first_pool, a, rng);
            scheduler.note_failure(date, Role::Group(second.clone()), fallback);
            (a, b)
        }
        (None, None) => return Err(SchedError::RosterExhausted { date }),
    };

    #[cfg(feature = "logging")]
    tracing::debug!(
        %date,
        first = %first_person.name,
        second = %second_person.name,
        "weekend duty assigned"
    );

    scheduler.assignments.record(
        date,
        Assignment::Dual {
            first: first_person.name.clone(),
            second: second_person.name.clone(),
        },
    )?;
    scheduler
        .loads
        .increment(&first_person.name, Axis::Weekend)?;
    if second_person.name != first_person.name {
        scheduler
            .loads
            .increment(&second_person.name, Axis::Weekend)?;
    }
    Ok(())
}

/// Couvre un rôle vide depuis le pool disponible de l'autre groupe.
///
/// Le tirage est uniforme sur ce pool privé de `serving`, qui tient déjà
/// l'autre rôle : deux personnes distinctes dès que le pool en compte deux.
/// Un pool d'un seul candidat le fait doubler.
fn cover_from<'a, R>(
    pool: &[&'a Person],
    serving: &'a Person,
    rng: &mut R,
) -> (&'a Person, Fallback)
where
    R: Rng + ?Sized,
{
    if let [only] = pool {
        return (*only, Fallback::SoleCandidate);
    }
    let others: Vec<&Person> = pool
        .iter()
        .copied()
        .filter(|p| p.name != serving.name)
        .collect();
    match selection::pick(&others, rng) {
        Some(p) => (p, Fallback::CrossGroup),
        None => (serving, Fallback::SoleCandidate),
    }
}

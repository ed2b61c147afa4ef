use super::load::{Axis, LoadTracker};
use super::types::FairnessMetric;
use crate::model::Person;
use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Personnes disponibles à cette date.
pub(super) fn eligible<'a, I>(people: I, date: NaiveDate) -> Vec<&'a Person>
where
    I: IntoIterator<Item = &'a Person>,
{
    people.into_iter().filter(|p| p.is_available(date)).collect()
}

/// Sous-ensemble des candidats ayant la charge minimale sur l'axe donné.
pub(super) fn least_loaded<'a>(
    candidates: &[&'a Person],
    loads: &LoadTracker,
    axis: Axis,
    metric: FairnessMetric,
) -> Vec<&'a Person> {
    let value = |p: &Person| loads.load_value(&p.name, axis, metric);
    let Some(min) = candidates.iter().map(|p| value(*p)).min() else {
        return Vec::new();
    };
    candidates
        .iter()
        .copied()
        .filter(|p| value(*p) == min)
        .collect()
}

/// Un seul candidat : choisi d'office. Plusieurs : tirage uniforme.
pub(super) fn pick<'a, R>(candidates: &[&'a Person], rng: &mut R) -> Option<&'a Person>
where
    R: Rng + ?Sized,
{
    match candidates {
        [] => None,
        [only] => Some(*only),
        many => many.choose(rng).copied(),
    }
}

/// Sélection complète : filtre, charge minimale, départage.
pub(super) fn select<'a, R>(
    pool: &[&'a Person],
    loads: &LoadTracker,
    axis: Axis,
    metric: FairnessMetric,
    rng: &mut R,
) -> Option<&'a Person>
where
    R: Rng + ?Sized,
{
    let minimal = least_loaded(pool, loads, axis, metric);
    pick(&minimal, rng)
}

#![forbid(unsafe_code)]
use chrono::NaiveDate;
use garde::scheduler::{Fallback, Role};
use garde::{
    detect_conflicts, Assignment, AssignmentMap, ConflictKind, DateRange, DutyMode,
    FairnessMetric, Group, LoadCount, LoadTracker, Person, ResolutionFailure, Roster, SchedError,
    ScheduleOptions, Scheduler,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::with_break(start, end, None).unwrap()
}

fn person(name: &str, group: &str) -> Person {
    Person::new(name, Group::new(group))
}

fn dual() -> ScheduleOptions {
    ScheduleOptions {
        mode: DutyMode::Dual {
            first: Group::new("homewood"),
            second: Group::new("bradford"),
        },
        metric: FairnessMetric::Combined,
    }
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn two_people_three_weekdays() {
    let roster = Roster::new(vec![person("Alice", "a"), person("Bob", "a")]).unwrap();
    // lundi 1er -> mercredi 3 janvier 2024
    let days = range(d(2024, 1, 1), d(2024, 1, 3));
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&days, &mut rng(7))
        .unwrap();

    assert_eq!(schedule.assignments.len(), 3);
    assert!(days.dates().iter().all(|&day| schedule.assignments.get(day).is_some()));
    let alice = schedule.loads.get("Alice").unwrap().weekday;
    let bob = schedule.loads.get("Bob").unwrap().weekday;
    assert_eq!(alice + bob, 3);
    assert!(alice.abs_diff(bob) <= 1);
    assert!(schedule.failures.is_empty());
}

#[test]
fn counters_match_assignments() {
    let roster = Roster::new(vec![
        person("Alice", ""),
        person("Bob", ""),
        person("Carol", "").with_unavailable([d(2024, 1, 9), d(2024, 1, 10)]),
    ])
    .unwrap();
    let days = range(d(2024, 1, 1), d(2024, 1, 31));
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&days, &mut rng(3))
        .unwrap();

    assert_eq!(schedule.assignments.len(), days.len());
    let weekday_sum: u32 = schedule.loads.iter().map(|(_, c)| c.weekday).sum();
    let weekend_sum: u32 = schedule.loads.iter().map(|(_, c)| c.weekend).sum();
    assert_eq!(weekday_sum as usize, days.weekdays().count());
    assert_eq!(weekend_sum as usize, days.weekends().count());

    for (name, count) in schedule.loads.iter() {
        let days_on_duty = schedule
            .assignments
            .iter()
            .filter(|(_, a)| a.involves(name))
            .count();
        assert_eq!(count.total() as usize, days_on_duty);
    }
}

#[test]
fn combined_metric_keeps_totals_within_one() {
    let roster = Roster::new(
        ["A", "B", "C", "D", "E"]
            .into_iter()
            .map(|n| person(n, ""))
            .collect(),
    )
    .unwrap();
    let days = range(d(2024, 1, 1), d(2024, 3, 31));
    for seed in 0..5 {
        let schedule = Scheduler::new(&roster, ScheduleOptions::default())
            .run(&days, &mut rng(seed))
            .unwrap();
        let totals: Vec<u32> = schedule.loads.iter().map(|(_, c)| c.total()).collect();
        let spread = totals.iter().max().unwrap() - totals.iter().min().unwrap();
        assert!(spread <= 1, "seed {seed}: {totals:?}");
    }
}

#[test]
fn weekday_only_metric_balances_each_axis() {
    let roster = Roster::new(
        ["A", "B", "C"].into_iter().map(|n| person(n, "")).collect(),
    )
    .unwrap();
    let options = ScheduleOptions {
        mode: DutyMode::Single,
        metric: FairnessMetric::WeekdayOnly,
    };
    let schedule = Scheduler::new(&roster, options)
        .run(&range(d(2024, 9, 1), d(2024, 12, 15)), &mut rng(11))
        .unwrap();

    let weekdays: Vec<u32> = schedule.loads.iter().map(|(_, c)| c.weekday).collect();
    let weekends: Vec<u32> = schedule.loads.iter().map(|(_, c)| c.weekend).collect();
    assert!(weekdays.iter().max().unwrap() - weekdays.iter().min().unwrap() <= 1);
    assert!(weekends.iter().max().unwrap() - weekends.iter().min().unwrap() <= 1);
}

#[test]
fn same_seed_same_schedule() {
    let roster = Roster::new(
        ["A", "B", "C", "D"].into_iter().map(|n| person(n, "")).collect(),
    )
    .unwrap();
    let days = range(d(2024, 1, 1), d(2024, 2, 29));
    let run = |seed| {
        Scheduler::new(&roster, ScheduleOptions::default())
            .run(&days, &mut rng(seed))
            .unwrap()
            .assignments
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn unavailable_person_is_skipped() {
    let roster = Roster::new(vec![
        person("Alice", ""),
        person("Bob", "").with_unavailable([d(2024, 1, 2)]),
    ])
    .unwrap();
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&range(d(2024, 1, 2), d(2024, 1, 2)), &mut rng(1))
        .unwrap();
    assert_eq!(
        schedule.assignments.get(d(2024, 1, 2)),
        Some(&Assignment::Single("Alice".into()))
    );
}

#[test]
fn nobody_available_falls_back_to_whole_roster() {
    let blocked = d(2024, 1, 3);
    let roster = Roster::new(vec![
        person("Alice", "").with_unavailable([blocked]),
        person("Bob", "").with_unavailable([blocked]),
    ])
    .unwrap();
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&range(blocked, blocked), &mut rng(5))
        .unwrap();

    assert!(schedule.assignments.get(blocked).is_some());
    assert_eq!(
        schedule.failures,
        vec![ResolutionFailure {
            date: blocked,
            role: Role::Any,
            fallback: Fallback::WholeRoster,
        }]
    );
    let conflicts = detect_conflicts(&schedule, &roster);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::Unavailable);
}

#[test]
fn sole_candidate_covers_both_buildings() {
    let friday = d(2024, 1, 5);
    let roster = Roster::new(vec![
        person("Alice", "homewood"),
        person("Bob", "bradford").with_unavailable([friday]),
    ])
    .unwrap();
    let schedule = Scheduler::new(&roster, dual())
        .run(&range(friday, friday), &mut rng(9))
        .unwrap();

    let assignment = schedule.assignments.get(friday).unwrap();
    assert_eq!(assignment.to_string(), "Alice, Alice");
    assert_eq!(
        schedule.failures,
        vec![ResolutionFailure {
            date: friday,
            role: Role::Group(Group::new("bradford")),
            fallback: Fallback::SoleCandidate,
        }]
    );
    assert_eq!(
        schedule.loads.get("Alice"),
        Some(LoadCount { weekday: 0, weekend: 1 })
    );
    let conflicts = detect_conflicts(&schedule, &roster);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::DoubleRole);
}

#[test]
fn other_group_covers_with_a_second_person() {
    let saturday = d(2024, 1, 6);
    let roster = Roster::new(vec![
        person("Alice", "homewood"),
        person("Carol", "homewood"),
        person("Bob", "bradford").with_unavailable([saturday]),
    ])
    .unwrap();
    let schedule = Scheduler::new(&roster, dual())
        .run(&range(saturday, saturday), &mut rng(2))
        .unwrap();

    let Some(Assignment::Dual { first, second }) = schedule.assignments.get(saturday) else {
        panic!("expected a dual assignment");
    };
    assert_ne!(first, second);
    assert!(["Alice", "Carol"].contains(&first.as_str()));
    assert!(["Alice", "Carol"].contains(&second.as_str()));
    assert_eq!(schedule.failures[0].fallback, Fallback::CrossGroup);
    assert_eq!(schedule.loads.get("Bob").unwrap().weekend, 0);
}

#[test]
fn both_pools_empty_is_fatal() {
    let friday = d(2024, 1, 5);
    let roster = Roster::new(vec![
        person("Alice", "homewood").with_unavailable([friday]),
        person("Bob", "bradford").with_unavailable([friday]),
        person("Dan", ""),
    ])
    .unwrap();
    let err = Scheduler::new(&roster, dual())
        .run(&range(friday, friday), &mut rng(0))
        .unwrap_err();
    assert!(matches!(err, SchedError::RosterExhausted { date } if date == friday));
}

#[test]
fn empty_roster_is_rejected() {
    let roster = Roster::new(Vec::new()).unwrap();
    let err = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&range(d(2024, 1, 1), d(2024, 1, 2)), &mut rng(0))
        .unwrap_err();
    assert!(matches!(err, SchedError::EmptyRoster));
}

#[test]
fn dual_weekends_balance_within_each_building() {
    let roster = Roster::new(vec![
        person("A1", "homewood"),
        person("A2", "homewood"),
        person("B1", "bradford"),
        person("B2", "bradford"),
        person("Dan", ""),
    ])
    .unwrap();
    // 8 jours de week-end (vendredi/samedi) du 1er au 28 janvier 2024
    let days = range(d(2024, 1, 1), d(2024, 1, 28));
    let schedule = Scheduler::new(&roster, dual()).run(&days, &mut rng(4)).unwrap();

    for name in ["A1", "A2", "B1", "B2"] {
        assert_eq!(schedule.loads.get(name).unwrap().weekend, 4, "{name}");
    }
    assert_eq!(schedule.loads.get("Dan").unwrap().weekend, 0);
    assert!(schedule.loads.get("Dan").unwrap().weekday > 0);

    let friday = schedule.assignments.get(d(2024, 1, 5)).unwrap();
    let names = friday.names();
    assert!(names[0].starts_with('A') && names[1].starts_with('B'));
}

#[test]
fn seeded_loads_shift_the_balance() {
    let roster = Roster::new(vec![person("Alice", ""), person("Bob", "")]).unwrap();
    let loads =
        LoadTracker::seeded(&roster, [("Alice", LoadCount { weekday: 5, weekend: 0 })]).unwrap();
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .with_loads(loads)
        .run(&range(d(2024, 1, 1), d(2024, 1, 3)), &mut rng(0))
        .unwrap();
    assert_eq!(schedule.loads.get("Bob").unwrap().weekday, 3);

    let err = LoadTracker::seeded(&roster, [("Zoe", LoadCount::default())]).unwrap_err();
    assert!(matches!(err, SchedError::UnknownPerson(name) if name == "Zoe"));
}

#[test]
fn assignment_entries_are_write_once() {
    let mut map = AssignmentMap::new();
    let day = d(2024, 1, 1);
    map.record(day, Assignment::Single("Alice".into())).unwrap();
    let err = map
        .record(day, Assignment::Single("Bob".into()))
        .unwrap_err();
    assert!(matches!(err, SchedError::AlreadyAssigned(_)));
    assert_eq!(map.get(day), Some(&Assignment::Single("Alice".into())));
}

#[test]
fn dual_mode_requires_two_distinct_groups() {
    let roster = Roster::new(vec![person("Alice", "homewood")]).unwrap();
    let options = ScheduleOptions {
        mode: DutyMode::Dual {
            first: Group::new("homewood"),
            second: Group::new("HomeWood"),
        },
        metric: FairnessMetric::Combined,
    };
    let friday = d(2024, 1, 5);
    let err = Scheduler::new(&roster, options)
        .run(&range(friday, friday), &mut rng(0))
        .unwrap_err();
    assert!(matches!(err, SchedError::SameGroup(g) if g == Group::new("homewood")));
}

#[test]
fn second_group_covers_an_empty_first_group() {
    let friday = d(2024, 1, 5);
    let roster = Roster::new(vec![
        person("Alice", "homewood").with_unavailable([friday]),
        person("Bob", "bradford"),
        person("Bea", "bradford"),
    ])
    .unwrap();
    let schedule = Scheduler::new(&roster, dual())
        .run(&range(friday, friday), &mut rng(6))
        .unwrap();

    let Some(Assignment::Dual { first, second }) = schedule.assignments.get(friday) else {
        panic!("expected a dual assignment");
    };
    assert_ne!(first, second);
    assert!(["Bob", "Bea"].contains(&first.as_str()));
    assert!(["Bob", "Bea"].contains(&second.as_str()));
    assert_eq!(
        schedule.failures,
        vec![ResolutionFailure {
            date: friday,
            role: Role::Group(Group::new("homewood")),
            fallback: Fallback::CrossGroup,
        }]
    );
    assert_eq!(schedule.loads.get("Alice").unwrap().total(), 0);
    assert_eq!(schedule.loads.get("Bob").unwrap().weekend, 1);
    assert_eq!(schedule.loads.get("Bea").unwrap().weekend, 1);
}

#[test]
fn break_window_is_left_out_of_schedule_and_tallies() {
    let roster = Roster::new(vec![person("Alice", ""), person("Bob", ""), person("Carol", "")])
        .unwrap();
    let days = DateRange::with_break(
        d(2024, 1, 1),
        d(2024, 1, 31),
        Some((d(2024, 1, 10), d(2024, 1, 16))),
    )
    .unwrap();
    let schedule = Scheduler::new(&roster, ScheduleOptions::default())
        .run(&days, &mut rng(8))
        .unwrap();

    assert_eq!(schedule.assignments.len(), 31 - 7);
    for day in 10..=16 {
        assert!(schedule.assignments.get(d(2024, 1, day)).is_none());
    }
    let weekday_sum: u32 = schedule.loads.iter().map(|(_, c)| c.weekday).sum();
    let weekend_sum: u32 = schedule.loads.iter().map(|(_, c)| c.weekend).sum();
    // janvier 2024 : 23 jours de semaine et 8 de week-end, dont 5 et 2 en vacances
    assert_eq!(weekday_sum, 23 - 5);
    assert_eq!(weekend_sum, 8 - 2);
}

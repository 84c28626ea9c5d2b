//! Property-based tests for events, strategies, and both collections.
//!
//! These check invariants that must hold for *any* input, complementing the
//! fixed scenarios in `collection_tests.rs`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use scheduler_core::chain;
use scheduler_core::{
    ArrayEventCollection, Event, EventCollection, LinkedEventCollection, ScheduleError,
    SearchAlgorithm, SortAlgorithm,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn origin() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn event_at(offset_minutes: i64, duration_minutes: i64, title: String) -> Event {
    let at = origin() + Duration::minutes(offset_minutes);
    Event::with_duration(
        title,
        at.format("%Y-%m-%d").to_string(),
        at.format("%H:%M").to_string(),
        "",
        Duration::minutes(duration_minutes),
    )
    .unwrap()
}

/// Any event in a two-week window lasting 1 minute to 4 hours.
fn arb_event() -> impl Strategy<Value = Event> {
    (0i64..20_160, 1i64..=240).prop_map(|(offset, dur)| event_at(offset, dur, "e".into()))
}

/// Distinct hour slots in a random order, for non-overlapping one-hour events.
fn arb_hours() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::hash_set(0i64..500, 0..40)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

fn hourly_events(hours: &[i64]) -> Vec<Event> {
    hours
        .iter()
        .map(|h| event_at(h * 60, 60, format!("slot {h}")))
        .collect()
}

fn fill<C: EventCollection + Default>(events: Vec<Event>) -> C {
    let mut collection = C::default();
    for event in events {
        collection.insert(event, None).unwrap();
    }
    collection
}

fn snapshot<C: EventCollection>(collection: &C) -> Vec<Event> {
    collection.list_all(None).into_iter().cloned().collect()
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Event properties
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn collision_is_symmetric(a in arb_event(), b in arb_event()) {
        prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
    }

    #[test]
    fn valid_pairs_construct_with_fixed_duration(
        y in 2000i32..2100, m in 1u32..=12, d in 1u32..=28, h in 0u32..=23, min in 0u32..=59,
    ) {
        let date = format!("{y:04}-{m:02}-{d:02}");
        let time = format!("{h:02}:{min:02}");
        let event = Event::new("p", date, time, "").unwrap();
        prop_assert!(event.start_time() < event.end_time());
        prop_assert_eq!(event.end_time() - event.start_time(), Duration::minutes(60));
    }

    #[test]
    fn malformed_time_is_format_error(h in 24u32..100, min in 0u32..=59) {
        let result = Event::new("p", "2026-03-01", format!("{h}:{min:02}"), "");
        let is_format = matches!(result, Err(ScheduleError::Format { .. }));
        prop_assert!(is_format, "expected a format error, got {:?}", result);
    }
}

// ---------------------------------------------------------------------------
// Strategy properties
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn every_algorithm_matches_std_sort(data in prop::collection::vec(-50i32..50, 0..120)) {
        let mut expected = data.clone();
        expected.sort();
        for algorithm in SortAlgorithm::ALL {
            prop_assert_eq!(&algorithm.sort(data.clone(), |x| *x), &expected);
            let head = algorithm.sort_chain(chain::from_iter(data.clone()), |x| *x);
            prop_assert_eq!(&chain::into_vec(head), &expected);
        }
    }

    #[test]
    fn stable_algorithms_match_std_stable_sort(keys in prop::collection::vec(0u8..5, 0..80)) {
        let data: Vec<(u8, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        let mut expected = data.clone();
        expected.sort_by_key(|pair| pair.0);
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Merge] {
            prop_assert_eq!(&algorithm.sort(data.clone(), |p| p.0), &expected);
            let head = algorithm.sort_chain(chain::from_iter(data.clone()), |p| p.0);
            prop_assert_eq!(&chain::into_vec(head), &expected);
        }
    }

    #[test]
    fn binary_agrees_with_linear_on_sorted_data(
        mut data in prop::collection::vec(0u32..200, 0..60),
        target in 0u32..220,
    ) {
        data.sort();
        data.dedup();
        let linear = SearchAlgorithm::Linear.search(&data, &target, |x| *x);
        let binary = SearchAlgorithm::Binary.search(&data, &target, |x| *x);
        prop_assert_eq!(linear, binary);

        let head = chain::from_iter(data.iter().copied());
        prop_assert_eq!(SearchAlgorithm::Binary.search_chain(&head, &target, |x| *x), linear);
    }
}

// ---------------------------------------------------------------------------
// Collection properties
// ---------------------------------------------------------------------------

fn check_sorted_listing<C: EventCollection + Default>(hours: &[i64]) -> Result<(), TestCaseError> {
    let collection: C = fill(hourly_events(hours));
    for algorithm in SortAlgorithm::ALL {
        let listed = collection.list_all(Some(algorithm));
        prop_assert_eq!(listed.len(), hours.len());
        for pair in listed.windows(2) {
            prop_assert!(pair[0].start_time() < pair[1].start_time());
        }
        let again = collection.list_all(Some(algorithm));
        prop_assert_eq!(listed, again);
    }
    Ok(())
}

fn check_conflict_is_idempotent<C: EventCollection + Default>(
    hours: &[i64],
    pick: prop::sample::Index,
    shift: i64,
) -> Result<(), TestCaseError> {
    let mut collection: C = fill(hourly_events(hours));
    let before = snapshot(&collection);
    let next_id = collection.next_id();

    let target = hours[pick.index(hours.len())];
    let clash = event_at(target * 60 + shift, 30, "clash".into());
    let result = collection.insert(clash, None);
    let is_conflict = matches!(result, Err(ScheduleError::Conflict { .. }));
    prop_assert!(is_conflict, "expected a conflict, got {:?}", result);

    prop_assert_eq!(collection.len(), hours.len());
    prop_assert_eq!(collection.next_id(), next_id);
    prop_assert_eq!(snapshot(&collection), before);
    Ok(())
}

fn check_search_strategies_agree<C: EventCollection + Default>(
    hours: &[i64],
    sort_first: Option<SortAlgorithm>,
) -> Result<(), TestCaseError> {
    let mut collection: C = fill(hourly_events(hours));
    if let Some(algorithm) = sort_first {
        collection.sort(algorithm);
    }
    for id in 0..(hours.len() as u64 + 5) {
        let linear = collection.search_by_id(id, SearchAlgorithm::Linear).ok().cloned();
        let binary = collection.search_by_id(id, SearchAlgorithm::Binary).ok().cloned();
        prop_assert_eq!(&linear, &binary);
        prop_assert_eq!(linear.is_some(), (1..=hours.len() as u64).contains(&id));
    }
    Ok(())
}

fn arb_sort() -> impl Strategy<Value = Option<SortAlgorithm>> {
    prop::option::of(prop::sample::select(SortAlgorithm::ALL.to_vec()))
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn sorted_listing_is_strictly_ascending(hours in arb_hours()) {
        check_sorted_listing::<ArrayEventCollection>(&hours)?;
        check_sorted_listing::<LinkedEventCollection>(&hours)?;
    }

    #[test]
    fn conflicting_insert_is_idempotent(
        hours in arb_hours().prop_filter("need an event to clash with", |h| !h.is_empty()),
        pick in any::<prop::sample::Index>(),
        shift in -29i64..60,
    ) {
        check_conflict_is_idempotent::<ArrayEventCollection>(&hours, pick.clone(), shift)?;
        check_conflict_is_idempotent::<LinkedEventCollection>(&hours, pick, shift)?;
    }

    #[test]
    fn search_strategies_agree(hours in arb_hours(), sort_first in arb_sort()) {
        check_search_strategies_agree::<ArrayEventCollection>(&hours, sort_first)?;
        check_search_strategies_agree::<LinkedEventCollection>(&hours, sort_first)?;
    }

    #[test]
    fn representations_agree(hours in arb_hours(), sort_first in arb_sort()) {
        let mut array: ArrayEventCollection = fill(hourly_events(&hours));
        let mut linked: LinkedEventCollection = fill(hourly_events(&hours));
        if let Some(algorithm) = sort_first {
            array.sort(algorithm);
            linked.sort(algorithm);
        }
        prop_assert_eq!(snapshot(&array), snapshot(&linked));
    }
}

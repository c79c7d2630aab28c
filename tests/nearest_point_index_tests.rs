use chart_reactor::core::{LookupPolicy, NearestPointIndex, nearest_index};

#[test]
fn center_policy_matches_documented_examples() {
    let index = NearestPointIndex::from_sorted(vec![0.0, 10.0, 20.0]);
    assert_eq!(index.lookup(9.0, LookupPolicy::Center), Some(1));
    assert_eq!(index.lookup(5.0, LookupPolicy::Center), Some(0));
}

#[test]
fn left_policy_returns_first_value_at_or_after_query() {
    let xs = [1.0, 3.0, 3.0, 7.0];
    let by_value = |value: &f64| *value;
    assert_eq!(nearest_index(&xs, 3.0, LookupPolicy::Left, by_value), Some(1));
    assert_eq!(nearest_index(&xs, 3.5, LookupPolicy::Left, by_value), Some(3));
    assert_eq!(nearest_index(&xs, 0.0, LookupPolicy::Left, by_value), Some(0));
}

#[test]
fn right_policy_returns_last_value_before_query() {
    let xs = [1.0, 3.0, 3.0, 7.0];
    let by_value = |value: &f64| *value;
    assert_eq!(nearest_index(&xs, 3.0, LookupPolicy::Right, by_value), Some(0));
    assert_eq!(nearest_index(&xs, 6.9, LookupPolicy::Right, by_value), Some(2));
    assert_eq!(nearest_index(&xs, 70.0, LookupPolicy::Right, by_value), Some(3));
}

#[test]
fn lookups_work_over_records_through_a_key_function() {
    struct Row {
        at: f64,
        label: &'static str,
    }
    let rows = [
        Row { at: 100.0, label: "a" },
        Row { at: 200.0, label: "b" },
        Row { at: 400.0, label: "c" },
    ];
    let found = nearest_index(&rows, 310.0, LookupPolicy::Center, |row| row.at)
        .map(|index| rows[index].label);
    assert_eq!(found, Some("c"));
}

#[test]
fn nan_queries_and_empty_input_resolve_nothing() {
    let index = NearestPointIndex::from_sorted(vec![1.0, 2.0]);
    assert_eq!(index.lookup(f64::NAN, LookupPolicy::Center), None);
    assert!(NearestPointIndex::default().is_empty());
    assert_eq!(
        NearestPointIndex::default().lookup(0.0, LookupPolicy::Left),
        None
    );
}

#[test]
fn from_unsorted_sorts_and_drops_nan() {
    let index = NearestPointIndex::from_unsorted(vec![20.0, f64::NAN, 0.0, 10.0]);
    assert_eq!(index.len(), 3);
    assert_eq!(index.x_at(0), Some(0.0));
    assert_eq!(index.x_at(2), Some(20.0));
}

use sidra_rs::error::CoreError;
use sidra_rs::lookup::RegionTable;
use sidra_rs::models::Observation;
use sidra_rs::{Dashboard, RecomputeGate};

fn obs(unit: &str, year: &str, value: Option<f64>) -> Observation {
    Observation {
        unit: unit.into(),
        year: year.into(),
        breakdown: None,
        raw_value: value,
        region: RegionTable::brazil().region_of(unit),
        rate: value.map(|v| v / 100.0),
    }
}

#[test]
fn distinct_years_feed_the_year_selector_in_order() {
    let dash = Dashboard::new(vec![
        obs("Acre", "2022", Some(70.0)),
        obs("Acre", "2016", Some(60.0)),
        obs("Bahia", "2016", Some(75.0)),
    ]);
    assert_eq!(dash.distinct_years(), vec!["2016", "2022"]);
}

#[test]
fn headline_indicators_expose_mean_and_labeled_extrema() {
    let dash = Dashboard::new(vec![
        obs("Acre", "2022", Some(70.0)),
        obs("Amazonas", "2022", Some(90.0)),
    ]);
    let headline = dash.headline_indicators("2022").unwrap();
    assert!((headline.national_mean - 0.80).abs() < 1e-12);
    assert_eq!(headline.max.label, "Amazonas");
    assert_eq!(headline.min.label, "Acre");
}

#[test]
fn parameter_change_with_unknown_year_surfaces_empty_year() {
    let dash = Dashboard::new(vec![obs("Acre", "2022", Some(70.0))]);
    let err = dash
        .on_parameter_change(
            "1999",
            sidra_rs::Grouping::Unit,
            sidra_rs::ChartKind::Bar,
        )
        .unwrap_err();
    assert_eq!(err, CoreError::EmptyYear("1999".into()));
}

#[test]
fn recompute_gate_publishes_in_request_order() {
    let gate = RecomputeGate::new();
    let first = gate.accept();
    assert_eq!(gate.publish(first, "a"), Some("a"));
    let second = gate.accept();
    assert_eq!(gate.publish(second, "b"), Some("b"));
}

#[test]
fn recompute_gate_discards_output_of_superseded_request() {
    let gate = RecomputeGate::new();
    let stale = gate.accept();
    let fresh = gate.accept();
    // The newer request finished first; the stale one must be discarded on
    // arrival even though it completes later.
    assert_eq!(gate.publish(fresh, "fresh"), Some("fresh"));
    assert_eq!(gate.publish(stale, "stale"), None);
}

#[test]
fn recompute_gate_discards_before_completion_when_newer_accepted() {
    let gate = RecomputeGate::new();
    let stale = gate.accept();
    let _fresh = gate.accept();
    assert_eq!(gate.publish(stale, "stale"), None);
}

#[test]
fn recompute_gate_never_publishes_the_same_sequence_twice() {
    let gate = RecomputeGate::new();
    let seq = gate.accept();
    assert_eq!(gate.publish(seq, "once"), Some("once"));
    assert_eq!(gate.publish(seq, "again"), None);
}

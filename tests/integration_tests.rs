use quake_stats::aggregate;
use quake_stats::output::Report;
use quake_stats::parser::parse_catalog;
use quake_stats::records::{location_of, magnitude_of, year_of};

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/uk_quakes.json");
    let catalog = parse_catalog(bytes).expect("Failed to parse catalog");
    let records = &catalog.features;

    assert_eq!(aggregate::count(records), 6);
    assert_eq!(catalog.metadata.unwrap().count, Some(6));

    // Two events tie at 4.8, one in 2001 and one in 2008; both locations
    // must survive, feed order, latitude first.
    let max = aggregate::maximum(records).unwrap();
    assert_eq!(max.magnitude, 4.8);
    assert_eq!(max.locations, vec![(56.1, -3.5), (51.4, 1.2)]);

    let counts = aggregate::count_per_year(records).unwrap();
    assert_eq!(counts, vec![(2001, 2), (2003, 1), (2008, 3)]);

    let total: usize = counts.iter().map(|(_, n)| n).sum();
    assert_eq!(total, aggregate::count(records));

    let averages = aggregate::average_magnitude_per_year(records).unwrap();
    assert_eq!(averages.len(), 3);
    assert!((averages[0].1 - 3.45).abs() < 1e-9);
    assert!((averages[1].1 - 3.0).abs() < 1e-9);
    assert!((averages[2].1 - 2.9).abs() < 1e-9);
}

#[test]
fn test_accessors_on_fixture_records() {
    let bytes = include_bytes!("fixtures/uk_quakes.json");
    let catalog = parse_catalog(bytes).unwrap();
    let first = &catalog.features[0];

    assert_eq!(magnitude_of(first), Ok(2.1));
    assert_eq!(year_of(first), Ok(2001));
    assert_eq!(location_of(first), Ok((54.91, -2.94)));
}

#[test]
fn test_report_over_fixture() {
    let bytes = include_bytes!("fixtures/uk_quakes.json");
    let catalog = parse_catalog(bytes).unwrap();

    let report = Report::build(&catalog.features).unwrap();
    assert_eq!(report.total, 6);
    assert_eq!(report.strongest.magnitude, 4.8);
    assert_eq!(report.years.len(), 3);
    assert_eq!(report.years[0].year, 2001);
    assert_eq!(report.years[0].count, 2);
}

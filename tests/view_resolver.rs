use sidra_rs::models::{ChartKind, Grouping};
use sidra_rs::view::{CentroidSource, DatasetRef, SortOrder, ValueFormat, resolve};

#[test]
fn resolve_is_deterministic() {
    let a = resolve("2022", Grouping::Unit, ChartKind::Bar);
    let b = resolve("2022", Grouping::Unit, ChartKind::Bar);
    assert_eq!(a, b);
}

#[test]
fn unit_grouping_selects_unit_dataset_and_fields() {
    let view = resolve("2022", Grouping::Unit, ChartKind::Bar);
    assert_eq!(view.dataset, DatasetRef::Units);
    assert_eq!(view.category_field, "unit");
    assert_eq!(view.value_field, "rate");
    assert_eq!(view.sort, SortOrder::ValueDescending);
    assert_eq!(view.format, ValueFormat::PERCENT_2);
    assert_eq!(view.centroids, None);
}

#[test]
fn region_grouping_selects_aggregate_dataset_and_fields() {
    let view = resolve("2022", Grouping::Region, ChartKind::Heatmap);
    assert_eq!(view.dataset, DatasetRef::RegionAggregates);
    assert_eq!(view.category_field, "region");
    assert_eq!(view.value_field, "mean_rate");
    assert_eq!(view.centroids, None);
}

#[test]
fn geo_kind_requires_centroids_matching_the_grouping() {
    let unit_view = resolve("2022", Grouping::Unit, ChartKind::Geo);
    assert_eq!(unit_view.centroids, Some(CentroidSource::UnitCentroids));
    let region_view = resolve("2022", Grouping::Region, ChartKind::Geo);
    assert_eq!(region_view.centroids, Some(CentroidSource::RegionCentroids));
}

#[test]
fn value_format_renders_percentage_with_two_decimals() {
    assert_eq!(ValueFormat::PERCENT_2.render(0.8), "80.00%");
    assert_eq!(ValueFormat::PERCENT_2.render(0.935), "93.50%");
}

//! Live tests against the SIDRA API. Opt-in: cargo test --features online

#![cfg(feature = "online")]

use sidra_rs::Client;
use sidra_rs::lookup::RegionTable;
use sidra_rs::normalize::{TableLayout, normalize};

#[test]
fn fetch_literacy_table_yields_header_and_normalizable_rows() {
    let client = Client::default();
    let payload = client.fetch_literacy_table().expect("live fetch");
    assert!(payload.len() > 1, "expected header plus data rows");

    let obs = normalize(&payload, &TableLayout::default(), &RegionTable::brazil())
        .expect("normalize live payload");
    assert!(!obs.is_empty());
    // The table is served by federative unit; every known unit resolves.
    assert!(obs.iter().any(|o| o.region.is_some()));
}

use sidra_rs::Client;
use sidra_rs::api::parse_values_payload;
use sidra_rs::lookup::RegionTable;
use sidra_rs::normalize::{TableLayout, normalize};

#[test]
fn parse_sample_sidra_payload_end_to_end() {
    let sample = r#"
    [
      {"D1N":"Unidade da Federação","D2N":"Ano","D3N":"Sexo","V":"Valor"},
      {"D1N":"Acre","D2N":"2022","D3N":"Total","V":"70.0"},
      {"D1N":"Amazonas","D2N":"2022","D3N":"Total","V":"90.0"},
      {"D1N":"Roraima","D2N":"2022","D3N":"Total","V":"..."}
    ]
    "#;
    let v: serde_json::Value = serde_json::from_str(sample).unwrap();
    let records = parse_values_payload(v).unwrap();
    assert_eq!(records.len(), 4);

    let obs = normalize(&records, &TableLayout::default(), &RegionTable::brazil()).unwrap();
    assert_eq!(obs.len(), 3);
    assert_eq!(obs[0].unit, "Acre");
    assert_eq!(obs[0].raw_value, Some(70.0));
    assert_eq!(obs[2].unit, "Roraima");
    assert_eq!(obs[2].raw_value, None);
}

#[test]
fn non_array_payload_is_rejected() {
    let v = serde_json::json!({"erro": "Tabela inexistente"});
    assert!(parse_values_payload(v).is_err());
}

#[test]
fn empty_array_payload_is_rejected() {
    assert!(parse_values_payload(serde_json::json!([])).is_err());
}

#[test]
fn array_with_non_object_element_is_rejected() {
    assert!(parse_values_payload(serde_json::json!([{"V": "Valor"}, 42])).is_err());
}

#[test]
fn values_url_percent_encodes_path_segments() {
    let client = Client::default();
    let url = client.values_url("10056", &[("d", "v3795 2"), ("n3", "all")]);
    assert!(url.starts_with("https://apisidra.ibge.gov.br/values/t/10056"));
    assert!(url.contains("/d/v3795%202"));
    assert!(url.contains("/n3/all"));
}

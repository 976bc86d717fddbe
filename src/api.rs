//! Synchronous client for the **IBGE SIDRA values API**.
//!
//! The values endpoint (`/values/t/{table}/...`) returns a JSON array of
//! objects keyed by column codes; element 0 carries the column labels and
//! the remaining elements are data rows. This module fetches that payload
//! and hands it to [`crate::normalize`] untouched.
//!
//! ### Notes
//! - Path segments are percent-encoded (the decimals selector of table
//!   10056 contains a space: `v3795 2`).
//! - Network timeouts use a sane default (30s); transient 5xx/network
//!   failures get a small fixed backoff retry.

use crate::normalize::RawRecord;
use anyhow::{Context, Result, bail};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;

/// Selection for SIDRA table 10056: literacy rate of persons 15 and over by
/// federative unit, all periods, one sex/age/color slice, values as
/// percentages with 2 decimals.
pub const LITERACY_TABLE: &str = "10056";
pub const LITERACY_SELECTION: &[(&str, &str)] = &[
    ("n3", "all"),
    ("v", "all"),
    ("p", "all"),
    ("c58", "allxt"),
    ("c2", "6794"),
    ("c86", "95251"),
    ("d", "v3795 2"),
];

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("sidra_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: "https://apisidra.ibge.gov.br".into(),
            http,
        }
    }
}

// Allow -, _, . unescaped in selector values (common in SIDRA selections)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment.trim(), SAFE).to_string()
}

impl Client {
    /// Assemble a values URL for a table and a selection of
    /// (classifier, value) path segments.
    pub fn values_url(&self, table: &str, selection: &[(&str, &str)]) -> String {
        let mut url = format!("{}/values/t/{}", self.base_url, enc(table));
        for (key, value) in selection {
            url.push('/');
            url.push_str(&enc(key));
            url.push('/');
            url.push_str(&enc(value));
        }
        url
    }

    /// Fetch the raw payload for a table selection.
    ///
    /// ### Errors
    /// - Network/HTTP error (after the retry budget is spent)
    /// - JSON decoding error
    /// - API-level error payload (SIDRA answers errors with a non-array
    ///   body), surfaced as an error
    pub fn fetch_values(&self, table: &str, selection: &[(&str, &str)]) -> Result<Vec<RawRecord>> {
        let url = self.values_url(table, selection);
        log::debug!("GET {url}");

        // Small retry for transient failures (5xx / network errors)
        let get_json = |u: &str| -> Result<Value> {
            let mut last_err: Option<anyhow::Error> = None;
            for backoff_ms in [100u64, 300, 700] {
                match self.http.get(u).send() {
                    Ok(r) if r.status().is_success() => {
                        return r.json().context("decode json");
                    }
                    Ok(r) if r.status().is_server_error() => { /* retry */ }
                    Ok(r) => bail!("request failed with HTTP {}", r.status()),
                    Err(e) => last_err = Some(e.into()),
                }
                std::thread::sleep(Duration::from_millis(backoff_ms));
            }
            bail!("network error: {:?}", last_err);
        };

        let v: Value = get_json(&url).with_context(|| format!("GET {}", url))?;
        let records = parse_values_payload(v)?;
        log::info!(
            "fetched {} rows (plus header) from table {table}",
            records.len().saturating_sub(1)
        );
        Ok(records)
    }

    /// Fetch the literacy-rate table this crate is built around.
    pub fn fetch_literacy_table(&self) -> Result<Vec<RawRecord>> {
        self.fetch_values(LITERACY_TABLE, LITERACY_SELECTION)
    }
}

/// Check the payload shape: a top-level array of objects, header first.
pub fn parse_values_payload(v: Value) -> Result<Vec<RawRecord>> {
    let arr = match v {
        Value::Array(arr) => arr,
        other => bail!("unexpected response shape: not a top-level array: {other}"),
    };
    if arr.is_empty() {
        bail!("unexpected response: empty array");
    }
    arr.into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map),
            other => bail!("unexpected response element: not an object: {other}"),
        })
        .collect()
}

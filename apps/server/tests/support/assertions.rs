use anyhow::Context as _;
use axum::{body::Bytes, http::StatusCode};
use serde_json::Value;

/// Serialize a JSON payload into a request body
pub fn to_json_body(value: &Value) -> anyhow::Result<Bytes> {
    Ok(Bytes::from(
        serde_json::to_vec(value).context("serialize request body")?,
    ))
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, what: &str) {
    assert_eq!(actual, expected, "unexpected status for {what}");
}

/// Href of a `_links` relation
pub fn link<'a>(value: &'a Value, rel: &str) -> anyhow::Result<&'a str> {
    value["_links"][rel]["href"]
        .as_str()
        .with_context(|| format!("missing _links.{rel}.href in {value}"))
}

/// Assert every named relation is present
pub fn assert_links(value: &Value, rels: &[&str]) -> anyhow::Result<()> {
    for rel in rels {
        link(value, rel)?;
    }
    Ok(())
}

/// Items of a HAL collection under `_embedded.<list_name>`
pub fn embedded<'a>(value: &'a Value, list_name: &str) -> anyhow::Result<&'a Vec<Value>> {
    value["_embedded"][list_name]
        .as_array()
        .with_context(|| format!("missing _embedded.{list_name} array in {value}"))
}

/// Numeric `id` of a created record
pub fn record_id(value: &Value) -> anyhow::Result<i64> {
    value["id"]
        .as_i64()
        .with_context(|| format!("missing numeric id in {value}"))
}

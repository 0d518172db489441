//! The persisted JSON form of result trees.
//!
//! A result node is a JSON object with exactly these keys:
//!
//! - `coin_span`: list of `[key, value]` string pairs
//! - `references`: list of nested nodes
//! - `preferred_citation`: nested node or `null`
//!
//! Decoding works bottom-up over arbitrary JSON, so result nodes may be
//! embedded inside larger documents. Objects lacking any of the three keys
//! pass through unchanged.

use coins_parser::CoinSpan;
use serde_json::Value;

use crate::cff_coin_span::CffCoinSpan;
use crate::error::{Error, Result};

const COIN_SPAN_KEY: &str = "coin_span";
const REFERENCES_KEY: &str = "references";
const PREFERRED_CITATION_KEY: &str = "preferred_citation";

/// A decoded JSON value in which result nodes have been recognised.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedJson {
    CoinSpan(CffCoinSpan),
    /// An ordinary object, entries in `serde_json` map order.
    Object(Vec<(String, DecodedJson)>),
    Array(Vec<DecodedJson>),
    /// Any scalar, including `null`.
    Value(Value),
}

impl DecodedJson {
    pub fn as_coin_span(&self) -> Option<&CffCoinSpan> {
        match self {
            DecodedJson::CoinSpan(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_coin_span(self) -> Option<CffCoinSpan> {
        match self {
            DecodedJson::CoinSpan(result) => Some(result),
            _ => None,
        }
    }

    /// The result nodes of a top-level array, skipping anything else.
    pub fn into_coin_spans(self) -> Vec<CffCoinSpan> {
        match self {
            DecodedJson::CoinSpan(result) => vec![result],
            DecodedJson::Array(items) => items
                .into_iter()
                .filter_map(DecodedJson::into_coin_span)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Decode a parsed JSON value.
pub fn decode_json_value(value: Value) -> Result<DecodedJson> {
    match value {
        Value::Array(items) => Ok(DecodedJson::Array(
            items
                .into_iter()
                .map(decode_json_value)
                .collect::<Result<Vec<_>>>()?,
        )),
        Value::Object(map) => {
            let is_node = [COIN_SPAN_KEY, REFERENCES_KEY, PREFERRED_CITATION_KEY]
                .iter()
                .all(|key| map.contains_key(*key));

            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                let decoded = decode_json_value(value)?;
                entries.push((key, decoded));
            }

            if is_node {
                Ok(DecodedJson::CoinSpan(node_from_entries(entries)?))
            } else {
                Ok(DecodedJson::Object(entries))
            }
        }
        scalar => Ok(DecodedJson::Value(scalar)),
    }
}

/// Parse and decode JSON text.
pub fn decode_json_str(text: &str) -> Result<DecodedJson> {
    let value: Value = serde_json::from_str(text)?;
    decode_json_value(value)
}

fn node_from_entries(entries: Vec<(String, DecodedJson)>) -> Result<CffCoinSpan> {
    let mut coin_span = CoinSpan::new();
    let mut references = Vec::new();
    let mut preferred_citation = None;

    for (key, value) in entries {
        match key.as_str() {
            COIN_SPAN_KEY => coin_span = span_from_decoded(value)?,
            REFERENCES_KEY => {
                if let DecodedJson::Array(items) = value {
                    references = items
                        .into_iter()
                        .filter_map(DecodedJson::into_coin_span)
                        .collect();
                }
            }
            PREFERRED_CITATION_KEY => preferred_citation = value.into_coin_span(),
            _ => {}
        }
    }

    Ok(CffCoinSpan::from_parts(
        coin_span,
        references,
        preferred_citation,
    ))
}

fn span_from_decoded(value: DecodedJson) -> Result<CoinSpan> {
    let DecodedJson::Array(items) = value else {
        return Err(Error::json("`coin_span` must be a list of [key, value] pairs"));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            DecodedJson::Array(pair) => match <[DecodedJson; 2]>::try_from(pair) {
                Ok([DecodedJson::Value(Value::String(key)), DecodedJson::Value(Value::String(value))]) => {
                    Ok((key, value))
                }
                _ => Err(Error::json(format!(
                    "`coin_span[{}]` must be a pair of strings",
                    i
                ))),
            },
            _ => Err(Error::json(format!(
                "`coin_span[{}]` must be a [key, value] pair",
                i
            ))),
        })
        .collect()
}

impl CffCoinSpan {
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Decode a single result node from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        decode_json_str(text)?
            .into_coin_span()
            .ok_or_else(|| Error::json("expected an object with `coin_span`, `references` and `preferred_citation`"))
    }
}

/// Encode a list of results, as produced from markup, as a JSON array.
pub fn to_json_list_string(results: &[CffCoinSpan], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(results)?
    } else {
        serde_json::to_string(results)?
    };
    Ok(json)
}

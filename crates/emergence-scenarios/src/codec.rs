//! Shareable-state codec.
//!
//! The full interactive state travels as a URL query string:
//!
//! | Param | Meaning | Default |
//! |-------|---------|---------|
//! | `n`   | agent count | 30 |
//! | `a`   | autonomy | 5 |
//! | `k`   | connection cap | 3 |
//! | `t`   | topology code | `bounded` |
//! | `sc`  | compare list payload | empty |
//!
//! The compare payload is URL-safe base64 of a JSON array of scenarios.
//!
//! Decoding never fails: unusable values fall back to their defaults and are
//! then clamped, and an unreadable payload yields an empty compare list.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use emergence_model::{Configuration, Topology};
use serde_json::Value;
use url::form_urlencoded;

use crate::error::{Error, Result};
use crate::lists::{CompareList, COMPARE_CAP};
use crate::scenario::{compare_default_name, parse_number, sanitize_scenarios, Scenario};

/// Agent count parameter.
pub const PARAM_AGENTS: &str = "n";
/// Autonomy parameter.
pub const PARAM_AUTONOMY: &str = "a";
/// Connection cap parameter.
pub const PARAM_CAP: &str = "k";
/// Topology parameter.
pub const PARAM_TOPOLOGY: &str = "t";
/// Compare list parameter.
pub const PARAM_COMPARE: &str = "sc";

/// Unpadded URL-safe base64 that also accepts padded input.
const PAYLOAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Primary configuration plus compare list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SharedState {
    /// Primary parameters.
    pub primary: Configuration,
    /// Pinned compare scenarios.
    pub compare: CompareList,
}

/// Encode the state as a query string (without the leading `?`).
pub fn encode(primary: &Configuration, compare: &CompareList) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair(PARAM_AGENTS, &primary.agents().to_string())
        .append_pair(PARAM_AUTONOMY, &primary.autonomy().to_string())
        .append_pair(PARAM_CAP, &primary.cap().to_string())
        .append_pair(PARAM_TOPOLOGY, primary.topology().code());
    if !compare.is_empty() {
        query.append_pair(PARAM_COMPARE, &encode_compare_payload(compare.as_slice()));
    }
    query.finish()
}

/// Encode scenarios as the opaque `sc` payload.
pub fn encode_compare_payload(scenarios: &[Scenario]) -> String {
    // Serializing plain strings and integers cannot fail.
    let json = serde_json::to_vec(scenarios).unwrap_or_else(|_| b"[]".to_vec());
    PAYLOAD.encode(json)
}

/// Decode a compare payload, reporting why it could not be read.
///
/// Individual entries are still sanitized rather than rejected.
pub fn decode_compare_payload(payload: &str) -> Result<Vec<Scenario>> {
    let bytes = PAYLOAD.decode(payload.trim())?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| Error::MalformedShareState(format!("compare payload is not JSON: {e}")))?;
    if !value.is_array() {
        return Err(Error::MalformedShareState(
            "compare payload is not an array".to_string(),
        ));
    }
    Ok(sanitize_scenarios(&value, compare_default_name, COMPARE_CAP))
}

/// Decode a query string, a `?`-prefixed query, or a full URL.
pub fn decode(input: &str) -> SharedState {
    let query = query_part(input);

    let mut agents = None;
    let mut autonomy = None;
    let mut cap = None;
    let mut topology = None;
    let mut compare = None;

    // First occurrence of each parameter wins.
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PARAM_AGENTS if agents.is_none() => agents = Some(value.into_owned()),
            PARAM_AUTONOMY if autonomy.is_none() => autonomy = Some(value.into_owned()),
            PARAM_CAP if cap.is_none() => cap = Some(value.into_owned()),
            PARAM_TOPOLOGY if topology.is_none() => topology = Some(value.into_owned()),
            PARAM_COMPARE if compare.is_none() => compare = Some(value.into_owned()),
            _ => {}
        }
    }

    let defaults = Configuration::DEFAULT;
    let primary = Configuration::clamped(
        int_param(agents.as_deref()).unwrap_or(defaults.agents() as i64),
        int_param(autonomy.as_deref()).unwrap_or(defaults.autonomy() as i64),
        int_param(cap.as_deref()).unwrap_or(defaults.cap() as i64),
        topology
            .as_deref()
            .and_then(Topology::from_code)
            .unwrap_or_default(),
    );

    let scenarios = match compare.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(payload) => decode_compare_payload(payload).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring compare list in share link");
            Vec::new()
        }),
        None => Vec::new(),
    };

    SharedState {
        primary,
        compare: CompareList::from_scenarios(scenarios),
    }
}

fn int_param(value: Option<&str>) -> Option<i64> {
    parse_number(value?).map(|n| n.round() as i64)
}

fn query_part(input: &str) -> &str {
    let input = input.trim();
    let input = input.split_once('#').map_or(input, |(before, _)| before);
    match input.split_once('?') {
        Some((_, query)) => query,
        None => input,
    }
}

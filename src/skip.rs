//! Canonical skip records and normalization of the raw API payload.
//!
//! The pricing API has shipped two response shapes over time (a bare array of
//! records, and an envelope with a `skips` array plus location overrides) and
//! its records vary in field presence and primitive types. Everything is
//! decoded here, at the boundary, into one canonical [`Skip`] shape so the
//! rest of the core never touches loose JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::SkipId;
use crate::DEFAULT_HIRE_PERIOD;

/// One skip-size offering. Serde names match the wire format of the pricing
/// API, which mixes snake_case and camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skip {
    pub id: SkipId,
    /// Size in yards.
    pub size: u32,
    pub name: String,
    pub price_before_vat: f64,
    /// Legacy price field, kept for backward compatibility with older
    /// payloads and consumers.
    pub price: f64,
    pub description: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "hirePeriod")]
    pub hire_period: String,
    pub allowed_on_road: bool,
    pub allows_heavy_waste: bool,
    pub per_tonne_cost: f64,
    pub transport_cost: f64,
    pub restrictions: Vec<String>,
}

impl Skip {
    /// Normalizes one raw record into a canonical `Skip`.
    ///
    /// Total over object-shaped input: every field has a defined fallback and
    /// no access can fail. Callers are responsible for excluding non-object
    /// entries before normalization (see [`decode_payload`]).
    #[must_use]
    pub fn from_raw(raw: &Value) -> Self {
        let size = raw_u32(raw.get("size")).unwrap_or(0);

        let price_before_vat = raw_number(raw.get("price_before_vat"))
            .or_else(|| raw_number(raw.get("price")))
            .unwrap_or(0.0);
        let price = raw_number(raw.get("price"))
            .or_else(|| raw_number(raw.get("price_before_vat")))
            .unwrap_or(0.0);

        let name = raw_string(raw.get("name"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("{size} Yard Skip"));

        let hire_period = raw_string(raw.get("hirePeriod"))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_HIRE_PERIOD.into());

        Self {
            id: SkipId::new(raw_id(raw.get("id")).unwrap_or_default()),
            size,
            name,
            price_before_vat,
            price,
            description: raw_string(raw.get("description")).unwrap_or_default(),
            image_url: raw_string(raw.get("imageUrl")).unwrap_or_default(),
            hire_period,
            allowed_on_road: truthy(raw.get("allowed_on_road")),
            allows_heavy_waste: truthy(raw.get("allows_heavy_waste")),
            per_tonne_cost: raw_number(raw.get("per_tonne_cost")).unwrap_or(0.0),
            transport_cost: raw_number(raw.get("transport_cost")).unwrap_or(0.0),
            restrictions: raw_string_list(raw.get("restrictions")),
        }
    }
}

/// The two payload shapes the API is known to produce, decoded explicitly
/// rather than shape-sniffed at use sites.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkipsPayload {
    Skips(Vec<Value>),
    Envelope {
        skips: Vec<Value>,
        location: Option<String>,
        postcode: Option<String>,
    },
}

/// Normalized skips plus any location override the envelope shape carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSkips {
    pub skips: Vec<Skip>,
    pub location: Option<String>,
    pub postcode: Option<String>,
}

/// Decodes a response body into normalized skips.
///
/// Returns `None` when the body is not one of the two recognized shapes.
/// Non-object entries in the list are dropped; a malformed record never
/// discards the rest of the batch.
#[must_use]
pub fn decode_payload(body: &[u8]) -> Option<ExtractedSkips> {
    let payload: SkipsPayload = serde_json::from_slice(body).ok()?;

    let (raw, location, postcode) = match payload {
        SkipsPayload::Skips(raw) => (raw, None, None),
        SkipsPayload::Envelope {
            skips,
            location,
            postcode,
        } => (skips, location, postcode),
    };

    let skips = raw
        .iter()
        .filter(|entry| entry.is_object())
        .map(Skip::from_raw)
        .collect();

    Some(ExtractedSkips {
        skips,
        location,
        postcode,
    })
}

/// JavaScript `Boolean(x)` semantics: absent, `null`, `false`, `0`, `NaN`
/// and `""` are false, everything else is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

fn raw_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn raw_u32(value: Option<&Value>) -> Option<u32> {
    let n = raw_number(value)?;
    if n.is_finite() && n >= 0.0 {
        Some(n as u32)
    } else {
        None
    }
}

fn raw_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Ids arrive as strings from our own data and as numbers from the live API.
fn raw_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn raw_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

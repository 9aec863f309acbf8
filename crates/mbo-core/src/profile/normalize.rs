//! Adapters from inbound JSON records to the canonical [`SubscriberProfile`].
//!
//! Two shapes are recognized:
//! - flat legacy: `subscriber_id`/`initials`, `kit_type`/`tier`, `dob`/`birth_date`,
//!   `birth_time`, `birth_city`, `birth_state`, `mmfsn`
//! - nested identity: an `identity` object holding name and birth fields

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::dates::{parse_date, parse_time};
use crate::errors::{FormatError, MboResult, ValidationError};
use crate::models::{BirthData, BirthLocation, GameId, SubscriberProfile, Tier};

/// Recognized inbound record shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileShape {
    Flat,
    Nested,
}

/// Detect the record shape without normalizing.
pub fn detect_shape(value: &Value) -> Result<ProfileShape, FormatError> {
    let obj = value.as_object().ok_or_else(|| FormatError::UnrecognizedShape {
        reason: "profile record must be a JSON object".to_string(),
    })?;
    if obj.get("identity").is_some_and(Value::is_object) {
        return Ok(ProfileShape::Nested);
    }
    if obj.contains_key("subscriber_id") || obj.contains_key("initials") {
        return Ok(ProfileShape::Flat);
    }
    Err(FormatError::UnrecognizedShape {
        reason: "neither an identity object nor a subscriber_id/initials field".to_string(),
    })
}

/// Parse a JSON document and normalize it.
pub fn normalize_profile_str(raw: &str) -> MboResult<SubscriberProfile> {
    let value: Value = serde_json::from_str(raw).map_err(|e| FormatError::InvalidJson {
        message: e.to_string(),
    })?;
    normalize_profile(&value)
}

/// Normalize either supported shape, then enforce the tier's requirements.
pub fn normalize_profile(value: &Value) -> MboResult<SubscriberProfile> {
    let shape = detect_shape(value)?;
    let Some(obj) = value.as_object() else {
        return Err(FormatError::UnrecognizedShape {
            reason: "profile record must be a JSON object".to_string(),
        }
        .into());
    };
    let identity = match shape {
        ProfileShape::Nested => obj.get("identity").and_then(Value::as_object),
        ProfileShape::Flat => None,
    };

    let tier_raw = text(obj, &["kit_type", "tier", "kit"]).ok_or_else(|| {
        FormatError::MalformedField {
            field: "kit_type".to_string(),
            reason: "missing tier".to_string(),
        }
    })?;
    let tier: Tier = tier_raw.parse()?;

    let display_name = identity.and_then(|id| {
        let parts: Vec<&str> = ["first_name", "last_name"]
            .iter()
            .filter_map(|k| id.get(*k).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    });

    let id = text(obj, &["subscriber_id", "initials"])
        .map(str::to_string)
        .or_else(|| identity.and_then(initials_from_identity))
        .ok_or(ValidationError::EmptySubscriberId)?;

    let birth = read_birth(obj, identity)?;
    let favorite_numbers = match obj.get("mmfsn") {
        Some(v) if !v.is_null() => read_favorites(v)?,
        _ => BTreeMap::new(),
    };

    let profile = SubscriberProfile {
        id,
        tier,
        birth,
        display_name,
        favorite_numbers,
    };
    profile.validate()?;
    tracing::debug!(subscriber = %profile.id, ?shape, tier = %profile.tier, "profile normalized");
    Ok(profile)
}

/// First non-empty string among `keys`.
fn text<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

fn initials_from_identity(identity: &Map<String, Value>) -> Option<String> {
    let initials: String = ["first_name", "last_name"]
        .iter()
        .filter_map(|k| identity.get(*k).and_then(Value::as_str))
        .filter_map(|s| s.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    (!initials.is_empty()).then_some(initials)
}

/// Nested identity fields win over top-level ones.
fn read_birth(
    obj: &Map<String, Value>,
    identity: Option<&Map<String, Value>>,
) -> MboResult<Option<BirthData>> {
    let lookup = |keys: &[&str]| -> Option<String> {
        identity
            .and_then(|id| text(id, keys))
            .or_else(|| text(obj, keys))
            .map(str::to_string)
    };

    let Some(date_raw) = lookup(&["birth_date", "date_of_birth", "dob"]) else {
        return Ok(None);
    };
    let date = parse_date(&date_raw)?;

    let time = match lookup(&["birth_time"]) {
        Some(raw) => Some(parse_time(&raw).ok_or_else(|| FormatError::MalformedField {
            field: "birth_time".to_string(),
            reason: format!("unrecognized time '{raw}'"),
        })?),
        None => None,
    };

    let city = lookup(&["birth_city"]);
    let state = lookup(&["birth_state"]);
    let location = (city.is_some() || state.is_some()).then_some(BirthLocation { city, state });

    Ok(Some(BirthData {
        date,
        time,
        location,
    }))
}

/// Per-game favorites. Accepts a ball-set object (`main`), a list of digit
/// strings (`values`), or a bare array of numbers.
fn read_favorites(value: &Value) -> Result<BTreeMap<GameId, Vec<u32>>, FormatError> {
    let obj = value.as_object().ok_or_else(|| malformed("mmfsn", "expected an object"))?;
    let mut out = BTreeMap::new();
    for (game, entry) in obj {
        let numbers = match entry {
            Value::Array(items) => numbers_from(items, game)?,
            Value::Object(fields) => {
                if let Some(Value::Array(main)) = fields.get("main") {
                    numbers_from(main, game)?
                } else if let Some(Value::Array(values)) = fields.get("values") {
                    digits_from(values, game)?
                } else {
                    Vec::new()
                }
            }
            Value::Null => Vec::new(),
            _ => return Err(malformed(&format!("mmfsn.{game}"), "unsupported entry")),
        };
        if !numbers.is_empty() {
            out.insert(GameId::new(game), numbers);
        }
    }
    Ok(out)
}

fn numbers_from(items: &[Value], game: &str) -> Result<Vec<u32>, FormatError> {
    items
        .iter()
        .map(|v| {
            v.as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| malformed(&format!("mmfsn.{game}"), "expected unsigned integers"))
        })
        .collect()
}

/// Digit combinations like `"123"` contribute their digits, first seen first.
fn digits_from(items: &[Value], game: &str) -> Result<Vec<u32>, FormatError> {
    let mut digits = Vec::new();
    for item in items {
        let combo = item
            .as_str()
            .ok_or_else(|| malformed(&format!("mmfsn.{game}"), "expected digit strings"))?;
        for c in combo.chars() {
            let d = c
                .to_digit(10)
                .ok_or_else(|| malformed(&format!("mmfsn.{game}"), "non-digit character"))?;
            if !digits.contains(&d) {
                digits.push(d);
            }
        }
    }
    Ok(digits)
}

fn malformed(field: &str, reason: &str) -> FormatError {
    FormatError::MalformedField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::CoreError;

/// Current record layout version.
pub const CURRENT_VERSION: u16 = 1;

/// Version assigned to values written before envelopes existed.
pub const LEGACY_VERSION: u16 = 0;

const VERSION_FIELD: &str = "version";
const DATA_FIELD: &str = "data";
const ID_FIELD: &str = "id";

/// Serialize a value into its persisted form.
///
/// Layout:
/// ```text
/// {"version": 1, "data": <value>}
/// ```
pub fn encode<T: Serialize>(value: &T) -> Result<String, CoreError> {
    let data = serde_json::to_value(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize record: {e}")))?;
    let mut envelope = serde_json::Map::with_capacity(2);
    envelope.insert(VERSION_FIELD.into(), Value::from(CURRENT_VERSION));
    envelope.insert(DATA_FIELD.into(), data);
    serde_json::to_string(&Value::Object(envelope))
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize record: {e}")))
}

/// Parse a persisted value, upgrading older layouts on the way.
///
/// A value without an envelope is a legacy record (version 0).
/// Versions newer than `CURRENT_VERSION` are rejected.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, CoreError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let (version, data) = split_envelope(parsed)?;

    if version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let upgraded = upgrade(version, data)?;
    serde_json::from_value(upgraded).map_err(|e| {
        CoreError::Deserialization(format!("Failed to decode record (version {version}): {e}"))
    })
}

/// Return the version of a persisted value without decoding its data.
pub fn peek_version(raw: &str) -> Result<u16, CoreError> {
    let parsed: Value = serde_json::from_str(raw)?;
    split_envelope(parsed).map(|(version, _)| version)
}

fn split_envelope(parsed: Value) -> Result<(u16, Value), CoreError> {
    match parsed {
        Value::Object(mut map)
            if map.len() == 2 && map.contains_key(VERSION_FIELD) && map.contains_key(DATA_FIELD) =>
        {
            let version = map
                .get(VERSION_FIELD)
                .and_then(Value::as_u64)
                .and_then(|v| u16::try_from(v).ok())
                .ok_or_else(|| {
                    CoreError::Deserialization("Record version is not a valid number".into())
                })?;
            let data = map.remove(DATA_FIELD).unwrap_or(Value::Null);
            Ok((version, data))
        }
        other => Ok((LEGACY_VERSION, other)),
    }
}

/// Bring `data` written at `from` up to `CURRENT_VERSION`, one step at a time.
fn upgrade(from: u16, mut data: Value) -> Result<Value, CoreError> {
    let mut version = from;
    while version < CURRENT_VERSION {
        data = match version {
            // v0 → v1: records gain UUID ids.
            LEGACY_VERSION => assign_record_ids(data),
            v => return Err(CoreError::UnsupportedVersion(v)),
        };
        version += 1;
    }
    Ok(data)
}

/// Give every object in a legacy list a UUID `id`.
///
/// Legacy records carry timestamp strings (`"1736500000000"`), small
/// counters, or no id at all. Each maps to a name-based UUID so the same
/// stored bytes always decode to the same ids.
fn assign_record_ids(data: Value) -> Value {
    let Value::Array(items) = data else {
        return data;
    };
    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(mut record) => {
                let id = match record.get(ID_FIELD) {
                    Some(Value::String(s)) => match Uuid::parse_str(s) {
                        Ok(id) => id,
                        Err(_) => legacy_id(s),
                    },
                    Some(Value::Number(n)) => legacy_id(&n.to_string()),
                    _ => legacy_id(&format!("{index}:{}", Value::Object(record.clone()))),
                };
                record.insert(ID_FIELD.into(), Value::String(id.to_string()));
                Value::Object(record)
            }
            other => other,
        })
        .collect();
    Value::Array(items)
}

fn legacy_id(name: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
}

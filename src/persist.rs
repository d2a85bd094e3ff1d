use crate::SchemaError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Serializes a persisted record.
///
/// # Errors
///
/// * [`SchemaError::Json`] The record could not be serialized.
pub fn to_json_strict<T: Serialize>(value: &T) -> Result<String, SchemaError> {
    Ok(serde_json::to_string(value)?)
}

/// Deserializes a persisted record and rejects anything that [to_json_strict] would not have
/// written for it: extra keys, missing keys, reordered keys, and values of the wrong type.
///
/// Key order is checked by serializing the record again and comparing the keys of every object
/// with the keys of the input at the same position.
///
/// # Errors
///
/// * [`SchemaError::Json`] The JSON is malformed, has extra keys, or has values of the
/// wrong type.
/// * [`SchemaError::KeyOrder`] An object has missing or reordered keys.
pub fn from_json_strict<T: DeserializeOwned + Serialize>(json: &str) -> Result<T, SchemaError> {
    let input: Value = serde_json::from_str(json)?;
    let value = T::deserialize(&input)?;
    let written = serde_json::to_value(&value)?;
    check_key_order(&input, &written, "")?;

    Ok(value)
}

fn check_key_order(input: &Value, written: &Value, path: &str) -> Result<(), SchemaError> {
    match (input, written) {
        (Value::Object(input), Value::Object(written)) => {
            let found: Vec<&String> = input.keys().collect();
            let expected: Vec<&String> = written.keys().collect();
            if found != expected {
                return Err(SchemaError::KeyOrder {
                    path: if path.is_empty() { "/" } else { path }.to_owned(),
                    expected: expected.into_iter().cloned().collect(),
                    found: found.into_iter().cloned().collect(),
                });
            }

            input.iter().zip(written.values()).try_for_each(|((key, input), written)| {
                check_key_order(input, written, &format!("{path}/{key}"))
            })
        }
        (Value::Array(input), Value::Array(written)) => input
            .iter()
            .zip(written)
            .enumerate()
            .try_for_each(|(index, (input, written))| {
                check_key_order(input, written, &format!("{path}/{index}"))
            }),
        _ => Ok(()),
    }
}

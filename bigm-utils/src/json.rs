use serde::{Deserialize, Serialize};
use serde_json::{to_string, to_value, Map, Value};

pub fn dejsonify<'a, T>(json_str: &'a str) -> serde_json::Result<T>
where
    T: Deserialize<'a>,
{
    serde_json::from_str::<T>(json_str)
}

/// Serializes `obj` to JSON with object keys sorted at every depth, so equal
/// configs and instances always produce identical strings.
pub fn jsonify<T>(obj: &T) -> anyhow::Result<String>
where
    T: Serialize,
{
    Ok(to_string(&sort_keys(&to_value(obj)?))?)
}

fn sort_keys(json_value: &Value) -> Value {
    match json_value {
        Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let mut sorted_map = Map::new();
            for key in keys {
                if let Some(value) = obj.get(key) {
                    sorted_map.insert(key.clone(), sort_keys(value));
                }
            }
            Value::Object(sorted_map)
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        _ => json_value.clone(),
    }
}

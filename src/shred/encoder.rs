use crate::shred::types::NullPolicy;
use serde_json::{Number, Value};

/// Encode a scalar leaf as attribute text.
///
/// Returns `None` when the leaf should not produce an attribute (a `null`
/// under `NullPolicy::Omit`, or a container passed by mistake).
pub fn encode_leaf(value: &Value, null_policy: NullPolicy) -> Option<String> {
    match value {
        Value::Number(n) => Some(encode_number(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Null => match null_policy {
            NullPolicy::Empty => Some(String::new()),
            NullPolicy::Literal => Some(String::from("null")),
            NullPolicy::Omit => None,
        },
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn encode_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    // Integers beyond 64 bits are kept verbatim
    let text = n.to_string();
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return text;
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        // Plain decimal in shortest round-trip form
        Some(f) => f.to_string(),
        // Exponent outside the f64 range
        None => text,
    }
}

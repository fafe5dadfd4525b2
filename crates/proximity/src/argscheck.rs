// Runtime argument-shape checks for dynamically typed callers
// Statically typed Rust callers never go through here

use serde_json::Value;

use crate::{ProximityError, Result};

/// Callback receiving the near/far state
pub type StateCallback = Box<dyn FnOnce(bool) + Send + 'static>;

/// One argument handed over by a dynamic host
pub enum Arg {
    Callback(StateCallback),
    Value(Value),
    Undefined,
}

impl Arg {
    /// Type name used in mismatch messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Callback(_) => "Function",
            Arg::Undefined => "Undefined",
            Arg::Value(Value::Null) => "Null",
            Arg::Value(Value::Bool(_)) => "Boolean",
            Arg::Value(Value::Number(_)) => "Number",
            Arg::Value(Value::String(_)) => "String",
            Arg::Value(Value::Array(_)) => "Array",
            Arg::Value(Value::Object(_)) => "Object",
        }
    }

    fn is_absent(&self) -> bool {
        matches!(self, Arg::Undefined | Arg::Value(Value::Null))
    }
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Callback(_) => f.write_str("Callback(..)"),
            Arg::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Arg::Undefined => f.write_str("Undefined"),
        }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

fn expected_name(code: char) -> Option<&'static str> {
    match code.to_ascii_uppercase() {
        'F' => Some("Function"),
        'S' => Some("String"),
        'N' => Some("Number"),
        'B' => Some("Boolean"),
        'A' => Some("Array"),
        'O' => Some("Object"),
        '*' => Some("Any"),
        _ => None,
    }
}

/// Validate `args` against `spec`, one format character per argument.
///
/// Upper-case codes are required, lower-case codes accept a missing or null
/// argument. `params` names the parameters for error messages; positions
/// without a name are reported by index. Arguments beyond the spec are ignored.
pub fn check_args(spec: &str, label: &str, params: &[&str], args: &[Arg]) -> Result<()> {
    for (index, code) in spec.chars().enumerate() {
        let expected = expected_name(code).ok_or_else(|| {
            ProximityError::Internal(format!("invalid argument spec character '{}' in {}", code, label))
        })?;
        let arg = args.get(index);
        let actual = arg.map_or("Undefined", Arg::type_name);

        if code == '*' || (code.is_ascii_lowercase() && arg.map_or(true, Arg::is_absent)) {
            continue;
        }

        if actual != expected {
            let parameter = params
                .get(index)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("#{}", index + 1));

            return Err(ProximityError::ArgumentType {
                label: label.to_string(),
                parameter,
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    Ok(())
}

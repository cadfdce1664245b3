//! Path resolution: walking a root value through a chain of field-name and
//! bracket-index steps.
//!
//! The original source does this with `reflect` — `reflect.Struct` fields,
//! `reflect.Map` keys, `reflect.Slice` indices, all discovered at runtime
//! off a single `interface{}`. `Value` is already typed, so each container
//! kind gets its own small `match` arm instead; the one piece of original
//! behavior worth preserving explicitly is that a string index widens to
//! `Value::Char`, never `Value::Number` — `convert2Float64` in the original
//! has a deliberately commented-out `case int32:` arm for exactly this
//! reason, since Go's `rune` is an `int32` and would otherwise be swept up
//! by the general integer-widening case.

use crate::error::EvalError;
use crate::value::Value;

/// Applies one named-field step (a `Selector`/`Accessor` path segment) to
/// `value`. Mirrors the original's `reflect`-based `extractValueFromParams`,
/// which dispatches on the *container's* reflect kind rather than the
/// segment's own shape — so a segment that reads as a plain field name
/// (`"Int"`) against a `Record`/`Map` is instead read as a numeric index
/// when the container turns out to be a `Seq`/`Str` (this is how a dotted
/// path like `param.Array.1.1` indexes into a slice and then a string, the
/// same path syntax `param.Array[1][1]` would use explicitly).
pub fn step_field(value: &Value, field: &str) -> Result<Value, EvalError> {
    match value {
        Value::Record(record) => record.field(field).ok_or_else(|| EvalError::FieldNotFound {
            container: "record",
            field: field.to_string(),
        }),
        Value::Map(map) => map.get(field).cloned().ok_or_else(|| EvalError::FieldNotFound {
            container: "map",
            field: field.to_string(),
        }),
        Value::Seq(items) => {
            let i = field
                .parse::<usize>()
                .map_err(|_| EvalError::InvalidIndex(field.to_string()))?;
            items
                .get(i)
                .cloned()
                .ok_or_else(|| EvalError::InvalidIndex(field.to_string()))
        }
        Value::Str(s) => {
            let i = field
                .parse::<usize>()
                .map_err(|_| EvalError::InvalidIndex(field.to_string()))?;
            s.chars()
                .nth(i)
                .map(Value::Char)
                .ok_or_else(|| EvalError::InvalidIndex(field.to_string()))
        }
        other => Err(EvalError::UnsupportedContainer(other.kind_name())),
    }
}

/// Applies every segment of a `Selector`/`Accessor` path in turn.
pub fn step_fields(mut current: Value, segments: &[String]) -> Result<Value, EvalError> {
    for segment in segments {
        current = step_field(&current, segment)?;
    }
    Ok(current)
}

/// Applies one bracket-index step (`container[index]`) to `value`, where
/// `index` is the already-evaluated bracket expression. Mirrors the
/// original's `buildPathFromRight`, which stringifies a numeric index with
/// `strconv.Itoa` before using it as a slice/map key.
pub fn step_index(value: &Value, index: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Seq(items) => {
            let i = index_to_usize(index)?;
            items
                .get(i)
                .cloned()
                .ok_or_else(|| EvalError::InvalidIndex(index.to_string()))
        }
        Value::Str(s) => {
            let i = index_to_usize(index)?;
            s.chars()
                .nth(i)
                .map(Value::Char)
                .ok_or_else(|| EvalError::InvalidIndex(index.to_string()))
        }
        Value::Map(map) => {
            let key = index.to_string();
            map.get(&key)
                .cloned()
                .ok_or_else(|| EvalError::FieldNotFound {
                    container: "map",
                    field: key,
                })
        }
        Value::Record(record) => {
            let key = index.to_string();
            record.field(&key).ok_or_else(|| EvalError::FieldNotFound {
                container: "record",
                field: key,
            })
        }
        other => Err(EvalError::UnsupportedContainer(other.kind_name())),
    }
}

fn index_to_usize(index: &Value) -> Result<usize, EvalError> {
    match index {
        Value::Number(n) if *n >= 0.0 => Ok(*n as usize),
        _ => Err(EvalError::InvalidIndex(index.to_string())),
    }
}

//! Host-provided bindings the evaluator resolves paths against.
//!
//! The original source takes a bare `map[string]interface{}` and walks it
//! with `reflect`. Rust has no runtime reflection, so the equivalent is a
//! pair of traits: [`Environment`] supplies the top-level parameter
//! bindings, and [`Record`] lets a host type expose struct-like field
//! access without the engine needing to know its shape at compile time.

use crate::value::Value;
use std::collections::HashMap;
use std::fmt;

/// Top-level variable bindings, looked up by the first segment of a path.
pub trait Environment {
    fn get(&self, name: &str) -> Option<Value>;
}

/// A struct-shaped host value. Implement this to expose a Rust struct's
/// fields to `param.Field` path resolution the way the original's
/// `reflect.Struct` case does, without giving the engine a runtime
/// reflection API.
///
/// Requires `Debug` so `Value` (which embeds `Rc<dyn Record>`) can keep
/// deriving `Debug` itself.
pub trait Record: fmt::Debug {
    fn field(&self, name: &str) -> Option<Value>;
}

/// An [`Environment`] over a plain string-keyed map, for tests and for
/// hosts with no struct fields to expose.
#[derive(Debug, Clone, Default)]
pub struct MapEnvironment {
    bindings: HashMap<String, Value>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, name: impl Into<String>, value: Value) -> Self {
        self.bindings.insert(name.into(), value);
        self
    }
}

impl Environment for MapEnvironment {
    fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }
}

/// An environment with no bindings at all — useful for exercising
/// literal-only expressions and for proving that short-circuited branches
/// never touch the environment (a `get` that panics would still pass,
/// since a correct short circuit never calls it).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn get(&self, _name: &str) -> Option<Value> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_environment_round_trips_bindings() {
        let env = MapEnvironment::new().insert("x", Value::Number(1.0));
        assert_eq!(env.get("x"), Some(Value::Number(1.0)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn empty_environment_has_no_bindings() {
        assert_eq!(EmptyEnvironment.get("anything"), None);
    }
}

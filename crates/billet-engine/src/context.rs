// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Binding context: the name to value mapping a render pass reads from.
//!
//! A name is bound either to a [`Scalar`] or to a sequence of child
//! [`Context`]s. Sequences drive loops; everything else drives conditional
//! sections and variable substitution. Loop iterations never copy the parent
//! mapping: a [`Scope`] stacks borrowed layers and resolves names from the
//! innermost layer outwards.

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::Error;

/// A single non-sequence value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Flag.
    Bool(bool),
    /// Text; blank text is falsy.
    Str(String),
    /// Whole number.
    Int(i64),
    /// Exact decimal; renders with its scale preserved.
    Decimal(Decimal),
    /// Renders empty and is falsy.
    Null,
}

/// Shape a name is bound to for the lifetime of one render.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A single value.
    Scalar(Scalar),
    /// Child contexts, one per loop iteration.
    Sequence(Vec<Context>),
}

impl Binding {
    /// Returns the elements when bound to a sequence.
    pub fn as_sequence(&self) -> Option<&[Context]> {
        match self {
            Binding::Sequence(items) => Some(items),
            Binding::Scalar(_) => None,
        }
    }

    /// Returns the value when not a sequence.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Binding::Scalar(scalar) => Some(scalar),
            Binding::Sequence(_) => None,
        }
    }
}

/// Name to [`Binding`] mapping. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    map: BTreeMap<String, Binding>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Binding>) -> &mut Self {
        self.map.insert(name.into(), value.into());
        self
    }

    /// Builder form of [`Context::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Binding>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a name in this context only.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.map.get(name)
    }

    /// Whether `name` is bound here.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Converts a JSON object into a context.
    ///
    /// Scalars map onto [`Scalar`] (integers that fit `i64` become
    /// [`Scalar::Int`], every other number a [`Scalar::Decimal`]), arrays of
    /// objects become sequences. Nested objects outside an array and arrays
    /// holding anything but objects have no binding shape and are rejected.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        let Value::Object(object) = value else {
            return Err(Error::binding(format!(
                "context root must be a JSON object, got {}",
                json_kind(value)
            )));
        };

        let mut context = Context::new();
        for (name, field) in object {
            context.insert(name.clone(), binding_from_json(name, field)?);
        }
        Ok(context)
    }
}

fn binding_from_json(name: &str, value: &Value) -> Result<Binding, Error> {
    let scalar = match value {
        Value::Null => Scalar::Null,
        Value::Bool(flag) => Scalar::Bool(*flag),
        Value::String(text) => Scalar::Str(text.clone()),
        Value::Number(number) => match number.as_i64() {
            Some(int) => Scalar::Int(int),
            None => {
                let text = number.to_string();
                let decimal = Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map_err(|err| {
                        Error::binding_with_source(
                            format!("field `{name}` holds a number outside the decimal range"),
                            err,
                        )
                    })?;
                Scalar::Decimal(decimal)
            }
        },
        Value::Array(items) => {
            let mut children = Vec::with_capacity(items.len());
            for item in items {
                if !item.is_object() {
                    return Err(Error::binding(format!(
                        "sequence field `{name}` must contain only objects, found {}",
                        json_kind(item)
                    )));
                }
                children.push(Context::from_json(item)?);
            }
            return Ok(Binding::Sequence(children));
        }
        Value::Object(_) => {
            return Err(Error::binding(format!(
                "field `{name}` is a nested object; only scalars and arrays of objects can be bound"
            )));
        }
    };
    Ok(Binding::Scalar(scalar))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Layered view over borrowed contexts used while rendering.
///
/// The root layer is the render's context; each loop iteration pushes the
/// element's own context on top. Lookups walk from the top layer down, so
/// element fields shadow parent fields of the same name.
#[derive(Debug, Clone)]
pub struct Scope<'a> {
    layers: SmallVec<[&'a Context; 4]>,
}

impl<'a> Scope<'a> {
    /// Creates a scope whose only layer is `root`.
    pub fn new(root: &'a Context) -> Self {
        let mut layers = SmallVec::new();
        layers.push(root);
        Self { layers }
    }

    /// Returns a derived scope with `item` overlaid on top of this one.
    pub fn push(&self, item: &'a Context) -> Scope<'a> {
        let mut layers = self.layers.clone();
        layers.push(item);
        Scope { layers }
    }

    /// Resolves `name` from the innermost layer outwards.
    pub fn lookup(&self, name: &str) -> Option<&'a Binding> {
        self.layers.iter().rev().copied().find_map(|layer| layer.get(name))
    }

    /// Number of stacked layers; 1 outside loops.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }
}

impl From<Scalar> for Binding {
    fn from(value: Scalar) -> Self {
        Binding::Scalar(value)
    }
}

impl From<Vec<Context>> for Binding {
    fn from(value: Vec<Context>) -> Self {
        Binding::Sequence(value)
    }
}

impl From<bool> for Binding {
    fn from(value: bool) -> Self {
        Binding::Scalar(Scalar::Bool(value))
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Binding {
    fn from(value: String) -> Self {
        Binding::Scalar(Scalar::Str(value))
    }
}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Binding::Scalar(Scalar::Int(value))
    }
}

impl From<i32> for Binding {
    fn from(value: i32) -> Self {
        Binding::Scalar(Scalar::Int(i64::from(value)))
    }
}

impl From<Decimal> for Binding {
    fn from(value: Decimal) -> Self {
        Binding::Scalar(Scalar::Decimal(value))
    }
}

impl<T> From<Option<T>> for Binding
where
    T: Into<Binding>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Binding::Scalar(Scalar::Null),
        }
    }
}

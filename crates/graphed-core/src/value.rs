//! Input values, parameterized by whether variable references may appear.
//!
//! [`ConstValue`] and [`DynValue`] share one tree shape. The `Variable` variant of
//! a `ConstValue` holds an uninhabited [`Const`], so a const tree can never contain
//! a variable reference at any depth.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Selects what a `$name` position turns into inside a [`Value`].
pub trait ValueMode: Clone + fmt::Debug + PartialEq + Serialize {
    /// Whether the grammar accepts `$name` in this mode.
    const ALLOWS_VARIABLES: bool;

    /// Builds a variable reference, or `None` when the mode forbids them.
    fn variable(name: &str) -> Option<Self>;

    fn name(&self) -> &str;
}

/// Marker for values that cannot reference variables. Has no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Const {}

impl ValueMode for Const {
    const ALLOWS_VARIABLES: bool = false;

    fn variable(_name: &str) -> Option<Self> {
        None
    }

    fn name(&self) -> &str {
        match *self {}
    }
}

impl Serialize for Const {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        match *self {}
    }
}

/// A `$name` reference (name stored without the sigil).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Variable(pub String);

impl ValueMode for Variable {
    const ALLOWS_VARIABLES: bool = true;

    fn variable(name: &str) -> Option<Self> {
        Some(Variable(name.to_owned()))
    }

    fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value<V: ValueMode> {
    Variable(V),
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Enum(String),
    Null,
    List(Vec<Value<V>>),
    /// Keys keep first-insertion order; a repeated key overwrites the earlier value.
    Object(IndexMap<String, Value<V>>),
}

pub type ConstValue = Value<Const>;
pub type DynValue = Value<Variable>;

impl<V: ValueMode> Value<V> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Walks the tree looking for any variable reference.
    pub fn has_variables(&self) -> bool {
        match self {
            Value::Variable(_) => true,
            Value::List(items) => items.iter().any(Value::has_variables),
            Value::Object(fields) => fields.values().any(Value::has_variables),
            _ => false,
        }
    }
}

impl From<ConstValue> for DynValue {
    fn from(value: ConstValue) -> Self {
        match value {
            Value::Variable(never) => match never {},
            Value::Boolean(b) => Value::Boolean(b),
            Value::Int(i) => Value::Int(i),
            Value::Float(f) => Value::Float(f),
            Value::String(s) => Value::String(s),
            Value::Enum(e) => Value::Enum(e),
            Value::Null => Value::Null,
            Value::List(items) => Value::List(items.into_iter().map(Into::into).collect()),
            Value::Object(fields) => {
                Value::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument<V: ValueMode> {
    pub name: String,
    pub value: Value<V>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive<V: ValueMode> {
    pub name: String,
    pub arguments: Vec<Argument<V>>,
}

pub type ConstArgument = Argument<Const>;
pub type DynArgument = Argument<Variable>;
pub type ConstDirective = Directive<Const>;
pub type DynDirective = Directive<Variable>;

impl<V: ValueMode> Directive<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value<V>) -> Self {
        self.arguments.push(Argument {
            name: name.into(),
            value,
        });
        self
    }
}

//! # Field Values
//!
//! The runtime content of a model field.
//!
//! [`FieldValue`] is a closed set of shapes: primitives, opaque maps, integer enumerations,
//! sequences and nested models. The codec branches on these variants to decide how a field is
//! exported, and on a handful of predicates ([`FieldValue::is_null`],
//! [`FieldValue::is_empty_list`], [`FieldValue::is_model`]) to decide whether an incoming
//! value may overwrite it.
use crate::model::Model;
use crate::schema::FieldType;
use serde_json::{Map, Number, Value};
use std::fmt;

/// A value of an integer enumeration, tagged with the enumeration's type path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_path: &'static str,
    pub value: i64,
}

impl EnumValue {
    pub const fn new(type_path: &'static str, value: i64) -> Self {
        Self { type_path, value }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_path, self.value)
    }
}

/// Implemented by enumerations that are exchanged as plain integers.
///
/// # Example
///
/// ```
/// use terra_core::value::{FieldValue, IntEnum};
///
/// #[derive(Clone, Copy)]
/// enum UploadType {
///     Manual = 1,
///     Automatic = 2,
/// }
///
/// impl IntEnum for UploadType {
///     fn type_path() -> &'static str {
///         "terra.models.enums.UploadType"
///     }
///
///     fn to_i64(self) -> i64 {
///         self as i64
///     }
/// }
///
/// let value = FieldValue::enumeration(UploadType::Automatic);
/// assert_eq!(value.as_enum().map(|e| e.value), Some(2));
/// ```
pub trait IntEnum: Copy {
    fn type_path() -> &'static str;

    fn to_i64(self) -> i64;
}

/// The runtime value held by a model field.
#[derive(Debug, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// An opaque JSON object, carried as-is.
    Map(Map<String, Value>),
    Enum(EnumValue),
    List(Vec<FieldValue>),
    Model(Box<dyn Model>),
}

impl FieldValue {
    /// Wraps a model instance.
    pub fn model<M: Model>(model: M) -> Self {
        FieldValue::Model(Box::new(model))
    }

    /// Tags an enumeration value with its type path.
    pub fn enumeration<E: IntEnum>(value: E) -> Self {
        FieldValue::Enum(EnumValue::new(E::type_path(), value.to_i64()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, FieldValue::List(items) if items.is_empty())
    }

    pub fn is_model(&self) -> bool {
        matches!(self, FieldValue::Model(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Enum(e) => Some(e.value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map<String, Value>> {
        match self {
            FieldValue::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<EnumValue> {
        match self {
            FieldValue::Enum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&dyn Model> {
        match self {
            FieldValue::Model(model) => Some(model.as_ref()),
            _ => None,
        }
    }

    pub fn as_model_mut(&mut self) -> Option<&mut dyn Model> {
        match self {
            FieldValue::Model(model) => Some(model.as_mut()),
            _ => None,
        }
    }

    /// A short name for the shape of this value, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "int",
            FieldValue::Float(_) => "float",
            FieldValue::Str(_) => "str",
            FieldValue::Map(_) => "dict",
            FieldValue::Enum(_) => "enum",
            FieldValue::List(_) => "list",
            FieldValue::Model(_) => "model",
        }
    }

    /// Converts an incoming JSON value, guided by the declared type of the receiving field.
    ///
    /// Integers arriving for an [`FieldType::Enum`] field are tagged as [`EnumValue`]s.
    /// Everything else is converted by shape: objects stay opaque maps and arrays are
    /// converted element by element without any model resolution.
    pub fn from_json(value: &Value, declared: &FieldType) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(v) => FieldValue::Bool(*v),
            Value::Number(n) => match (n.as_i64(), declared) {
                (Some(v), FieldType::Enum(type_path)) => {
                    FieldValue::Enum(EnumValue::new(type_path, v))
                }
                (Some(v), _) => FieldValue::Int(v),
                // u64 beyond i64::MAX or a real float
                (None, _) => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
            },
            Value::String(v) => FieldValue::Str(v.clone()),
            Value::Array(items) => FieldValue::List(
                items
                    .iter()
                    .map(|item| FieldValue::from_json(item, &FieldType::Any))
                    .collect(),
            ),
            Value::Object(map) => FieldValue::Map(map.clone()),
        }
    }
}

impl Clone for FieldValue {
    fn clone(&self) -> Self {
        match self {
            FieldValue::Null => FieldValue::Null,
            FieldValue::Bool(v) => FieldValue::Bool(*v),
            FieldValue::Int(v) => FieldValue::Int(*v),
            FieldValue::Float(v) => FieldValue::Float(*v),
            FieldValue::Str(v) => FieldValue::Str(v.clone()),
            FieldValue::Map(v) => FieldValue::Map(v.clone()),
            FieldValue::Enum(v) => FieldValue::Enum(*v),
            FieldValue::List(v) => FieldValue::List(v.clone()),
            FieldValue::Model(v) => FieldValue::Model(v.clone_model()),
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::Enum(a), FieldValue::Enum(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Model(a), FieldValue::Model(b)) => a.as_ref() == b.as_ref(),
            _ => false,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<Map<String, Value>> for FieldValue {
    fn from(value: Map<String, Value>) -> Self {
        FieldValue::Map(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        FieldValue::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Converts a float into a JSON number, failing on NaN and infinities.
pub(crate) fn float_to_json(value: f64) -> Option<Value> {
    Number::from_f64(value).map(Value::Number)
}

//! # Models
//!
//! A model is a struct with a fixed set of named fields, each holding a [`FieldValue`], and a
//! static [`Schema`] describing them.
//!
//! The capability is split in three traits:
//!
//! * **[`Model`]**: the object-safe core. It gives field access by name and lets the codec
//!   create empty instances of the same type, so nested models can live behind a
//!   `Box<dyn Model>`.
//! * **[`ModelType`]**: the static side of a concrete model type. It exposes the schema without
//!   an instance and provides the decode entry points.
//! * **[`ModelExt`]**: a blanket extension with the attribute views (`keys`, `values`, `items`)
//!   and the instance-bound codec operations (`encode`, `merge_missing`).
//!
//! Model types are normally declared through the [`model!`](crate::model!) macro.
use crate::catalog::Catalog;
use crate::codec::{self, CodecError};
use crate::schema::{FieldDef, Schema};
use crate::value::FieldValue;
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt::Debug;

/// The object-safe part of a model.
pub trait Model: Debug + Send + Sync + 'static {
    /// The static schema of this model's type.
    fn schema(&self) -> &'static Schema;

    /// Returns the value of a declared field, or `None` if the type has no such field.
    fn field(&self, name: &str) -> Option<&FieldValue>;

    /// Mutable counterpart of [`Model::field`].
    fn field_mut(&mut self, name: &str) -> Option<&mut FieldValue>;

    /// Creates an empty instance of the same type.
    fn new_empty(&self) -> Box<dyn Model>;

    fn clone_model(&self) -> Box<dyn Model>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'a> dyn Model + 'a {
    /// Fully qualified type path of the concrete model.
    pub fn type_path(&self) -> &'static str {
        self.schema().type_path
    }

    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }
}

/// Two models are equal when they share a type path and every declared field is equal.
impl<'a> PartialEq for dyn Model + 'a {
    fn eq(&self, other: &Self) -> bool {
        let schema = self.schema();

        schema.type_path == other.type_path()
            && schema
                .fields
                .iter()
                .all(|def| self.field(def.name) == other.field(def.name))
    }
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

/// The static side of a concrete model type.
pub trait ModelType: Model + Default + Sized {
    fn model_schema() -> &'static Schema;

    /// Strict decode: builds a new instance from `mapping`, resolving the element types of
    /// list fields through `catalog`.
    ///
    /// See [`codec::decode`].
    fn decode(
        catalog: &Catalog,
        mapping: &Map<String, Value>,
        safe: bool,
    ) -> Result<Self, CodecError> {
        codec::decode(catalog, mapping, safe)
    }

    /// Permissive decode: builds a new instance from `mapping` without resolving list
    /// element types.
    ///
    /// See [`codec::decode_api`].
    fn decode_api(mapping: &Map<String, Value>, safe: bool) -> Result<Self, CodecError> {
        codec::decode_api(mapping, safe)
    }
}

/// Attribute views and instance-bound codec operations, available on every model.
pub trait ModelExt: Model {
    /// Names of the data fields, in declaration order.
    fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.schema().data_fields().map(|def| def.name)
    }

    /// Values of the data fields, in declaration order.
    fn values(&self) -> impl Iterator<Item = &FieldValue> + '_ {
        self.items().map(|(_, value)| value)
    }

    /// Name-value pairs of the data fields, in declaration order.
    fn items(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> + '_ {
        self.schema()
            .data_fields()
            .filter_map(move |def: &'static FieldDef| {
                self.field(def.name).map(|value| (def.name, value))
            })
    }

    /// Exports this model as a plain nested mapping. See [`codec::encode`].
    fn encode(&self) -> Result<Map<String, Value>, CodecError> {
        codec::encode(self)
    }

    /// Fills the fields that are currently null from `mapping`. See [`codec::merge_missing`].
    fn merge_missing(
        &mut self,
        mapping: &Map<String, Value>,
        safe: bool,
    ) -> Result<&mut Self, CodecError> {
        codec::merge_missing(self, mapping, safe)?;
        Ok(self)
    }
}

impl<M: Model + ?Sized> ModelExt for M {}

/// Declares a model type.
///
/// Each field is declared with its [`FieldType`](crate::schema::FieldType) and, optionally, a
/// default value following `=>`. Fields without a default start as
/// [`FieldValue::Null`](crate::value::FieldValue::Null). The type path given between
/// parentheses is the key the model is registered under in a
/// [`Catalog`](crate::catalog::Catalog).
///
/// # Example
///
/// ```
/// use terra_core::model::ModelExt;
/// use terra_core::schema::FieldType;
/// use terra_core::value::FieldValue;
///
/// terra_core::model! {
///     /// A single heart rate sample.
///     pub struct HeartRateSample("terra.models.v2.samples.HeartRateSample") {
///         timestamp: FieldType::Str,
///         bpm: FieldType::Float,
///     }
/// }
///
/// terra_core::model! {
///     pub struct HeartRateData("terra.models.v2.samples.HeartRateData") {
///         samples: FieldType::List("models.v2.samples.HeartRateSample") => FieldValue::List(Vec::new()),
///         _source: FieldType::Str,
///     }
/// }
///
/// let data = HeartRateData::default();
/// assert!(data.samples.is_empty_list());
/// assert_eq!(data.keys().collect::<Vec<_>>(), vec!["samples"]);
/// ```
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($path:literal) {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:expr $(=> $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $crate::value::FieldValue,
            )*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $crate::__model_field_default!($($default)?), )*
                }
            }
        }

        impl $crate::model::ModelType for $name {
            fn model_schema() -> &'static $crate::schema::Schema {
                const FIELDS: &[$crate::schema::FieldDef] = &[
                    $( $crate::schema::FieldDef::new(stringify!($field), $ty), )*
                ];
                static SCHEMA: $crate::schema::Schema = $crate::schema::Schema::new($path, FIELDS);
                &SCHEMA
            }
        }

        impl $crate::model::Model for $name {
            fn schema(&self) -> &'static $crate::schema::Schema {
                <Self as $crate::model::ModelType>::model_schema()
            }

            fn field(&self, name: &str) -> ::std::option::Option<&$crate::value::FieldValue> {
                match name {
                    $( stringify!($field) => ::std::option::Option::Some(&self.$field), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::std::option::Option<&mut $crate::value::FieldValue> {
                match name {
                    $( stringify!($field) => ::std::option::Option::Some(&mut self.$field), )*
                    _ => ::std::option::Option::None,
                }
            }

            fn new_empty(&self) -> ::std::boxed::Box<dyn $crate::model::Model> {
                ::std::boxed::Box::new(<Self as ::std::default::Default>::default())
            }

            fn clone_model(&self) -> ::std::boxed::Box<dyn $crate::model::Model> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __model_field_default {
    () => {
        $crate::value::FieldValue::Null
    };
    ($default:expr) => {
        $default
    };
}

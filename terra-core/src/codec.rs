//! # Model Codec
//!
//! Converts models to plain nested mappings (JSON objects) and back.
//!
//! ## Operations
//!
//! * **[`encode`]**: exports the data fields of a model. Enumerations become their integer
//!   value, nested models and lists of models are encoded recursively, everything else is
//!   copied as-is. The source model is never mutated.
//! * **[`decode`]** (strict): builds a new model from a mapping. Nested models are decoded
//!   recursively and the elements of list fields are built as the model type named in the
//!   field's declared signature, when the [`Catalog`] knows it.
//! * **[`decode_api`]** (permissive): same as [`decode`] but list fields are assigned as they
//!   come, without resolving their element type.
//! * **[`merge_missing`]**: fills in, in place, only the fields that are currently null.
//!
//! ## Overwrite rule
//!
//! Both decode variants only assign an incoming value when the field currently holds null, an
//! empty list or a nested model, or when the incoming value is itself a list. Any other
//! incoming value is skipped without error, so a field pre-populated with a scalar by the
//! model's defaults keeps that value.
//!
//! ## Unknown keys
//!
//! Every operation taking a `safe` flag fails with [`CodecError::MissingAttribute`] when the
//! mapping contains a key the model does not declare, unless `safe` is `true`, in which case
//! the key is ignored. Decode and merge work in place: on failure, the keys processed before
//! the offending one have already been applied.
use crate::catalog::Catalog;
use crate::model::{Model, ModelExt, ModelType};
use crate::schema::FieldType;
use crate::value::{FieldValue, float_to_json};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("'{model}' has no attribute '{field}'")]
    MissingAttribute { model: &'static str, field: String },

    #[error("Cannot encode field '{field}' of '{model}': {reason}")]
    UnsupportedValueType {
        model: &'static str,
        field: String,
        reason: String,
    },

    #[error("Field '{field}' of '{model}' expects a mapping, found {found}")]
    ExpectedMapping {
        model: &'static str,
        field: String,
        found: &'static str,
    },
}

/// How list fields and nested models are resolved while decoding.
#[derive(Debug, Clone, Copy)]
enum Resolution<'c> {
    /// Resolve list element types through the catalog.
    Strict(&'c Catalog),
    /// Assign lists as they come.
    Permissive,
}

/// Exports the data fields of `model` as a plain nested mapping.
///
/// Fields whose name starts with `_` are not exported.
///
/// # Returns
///
/// * `Ok(mapping)` - A freshly built mapping, keyed by field name.
/// * `Err(CodecError::UnsupportedValueType)` - A field (possibly nested) holds a float that
///   has no JSON representation (NaN or an infinity).
pub fn encode<M: Model + ?Sized>(model: &M) -> Result<Map<String, Value>, CodecError> {
    let type_path = model.schema().type_path;
    let mut output = Map::new();

    for (name, value) in model.items() {
        output.insert(name.to_string(), encode_value(value, type_path, name)?);
    }

    Ok(output)
}

fn encode_value(value: &FieldValue, model: &'static str, field: &str) -> Result<Value, CodecError> {
    let encoded = match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(v) => Value::Bool(*v),
        FieldValue::Int(v) => Value::from(*v),
        FieldValue::Float(v) => {
            float_to_json(*v).ok_or_else(|| CodecError::UnsupportedValueType {
                model,
                field: field.to_string(),
                reason: format!("'{v}' is not a finite number"),
            })?
        }
        FieldValue::Str(v) => Value::String(v.clone()),
        FieldValue::Map(v) => Value::Object(v.clone()),
        FieldValue::Enum(v) => Value::from(v.value),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| encode_value(item, model, field))
                .collect::<Result<_, _>>()?,
        ),
        FieldValue::Model(inner) => Value::Object(encode(inner.as_ref())?),
    };

    Ok(encoded)
}

/// Strict decode: builds a new `T` from `mapping`.
///
/// For each key of the mapping, in order:
///
/// 1. The field is looked up. A missing field is an error unless `safe` is set, in which case
///    the key is skipped. Fields that fail the overwrite rule (see the module documentation)
///    are skipped.
/// 2. If the field currently holds a nested model, the incoming mapping is decoded into a fresh
///    instance of that model's type.
/// 3. If the incoming value is a non-empty list, the element type named in the field's declared
///    signature (`List[models.X]`) is qualified and looked up in `catalog`. When it resolves,
///    each element is decoded into a new instance of that type; otherwise the list is assigned
///    as-is.
/// 4. Anything else, empty lists included, is assigned as-is.
///
/// Nested decodes (models and list elements) never skip unknown keys.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use terra_core::catalog::Catalog;
/// use terra_core::model::ModelType;
/// use terra_core::schema::FieldType;
/// use terra_core::value::FieldValue;
///
/// terra_core::model! {
///     pub struct Inner("terra.models.Inner") {
///         a: FieldType::Int,
///     }
/// }
///
/// terra_core::model! {
///     pub struct Outer("terra.models.Outer") {
///         items: FieldType::List("models.Inner") => FieldValue::List(vec![]),
///     }
/// }
///
/// let mut catalog = Catalog::new();
/// catalog.register::<Inner>();
///
/// let payload = json!({"items": [{"a": 1}, {"a": 2}]});
/// let outer = Outer::decode(&catalog, payload.as_object().unwrap(), false).unwrap();
///
/// let items = outer.items.as_list().unwrap();
/// assert_eq!(items[1].as_model().unwrap().downcast_ref::<Inner>().unwrap().a, FieldValue::Int(2));
/// ```
pub fn decode<T: ModelType>(
    catalog: &Catalog,
    mapping: &Map<String, Value>,
    safe: bool,
) -> Result<T, CodecError> {
    let mut model = T::default();
    decode_into(&mut model, mapping, safe, Resolution::Strict(catalog))?;
    Ok(model)
}

/// Permissive decode: builds a new `T` from `mapping` without resolving list element types.
///
/// Follows the same overwrite rule as [`decode`]. Nested models are decoded permissively and
/// lists are assigned as they come.
pub fn decode_api<T: ModelType>(mapping: &Map<String, Value>, safe: bool) -> Result<T, CodecError> {
    let mut model = T::default();
    decode_into(&mut model, mapping, safe, Resolution::Permissive)?;
    Ok(model)
}

/// Strict decode into an already constructed, usually empty, model.
///
/// This is what [`decode`] runs on a fresh `T`; it is exposed for callers holding a model
/// behind a `Box<dyn Model>`, e.g. one produced by [`Catalog::instantiate`].
pub fn decode_dyn(
    catalog: &Catalog,
    model: &mut dyn Model,
    mapping: &Map<String, Value>,
    safe: bool,
) -> Result<(), CodecError> {
    decode_into(model, mapping, safe, Resolution::Strict(catalog))
}

fn decode_into<M: Model + ?Sized>(
    model: &mut M,
    mapping: &Map<String, Value>,
    safe: bool,
    resolution: Resolution<'_>,
) -> Result<(), CodecError> {
    let schema = model.schema();

    for (key, incoming) in mapping {
        let Some(existing) = model.field(key) else {
            if safe {
                log::debug!("Ignoring unknown key '{key}' for '{}'", schema.type_path);
                continue;
            }
            return Err(CodecError::MissingAttribute {
                model: schema.type_path,
                field: key.clone(),
            });
        };

        let overwritable = existing.is_null()
            || existing.is_empty_list()
            || existing.is_model()
            || incoming.is_array();

        if !overwritable {
            log::debug!(
                "Keeping existing {} value of '{key}' for '{}'",
                existing.kind(),
                schema.type_path
            );
            continue;
        }

        let declared = schema.field(key).map_or(FieldType::Any, |def| def.ty);

        let value = match existing.as_model() {
            Some(inner) => {
                let nested = expect_mapping(incoming, schema.type_path, key)?;
                let mut fresh = inner.new_empty();
                decode_into(fresh.as_mut(), nested, false, resolution)?;
                FieldValue::Model(fresh)
            }
            None => decode_value(incoming, &declared, resolution, schema.type_path, key)?,
        };

        if let Some(slot) = model.field_mut(key) {
            *slot = value;
        }
    }

    Ok(())
}

fn decode_value(
    incoming: &Value,
    declared: &FieldType,
    resolution: Resolution<'_>,
    model: &'static str,
    field: &str,
) -> Result<FieldValue, CodecError> {
    let (Value::Array(items), Resolution::Strict(catalog)) = (incoming, resolution) else {
        return Ok(FieldValue::from_json(incoming, declared));
    };

    if items.is_empty() {
        return Ok(FieldValue::List(Vec::new()));
    }

    let Some(factory) = catalog.resolve_element_type(declared) else {
        log::debug!(
            "Element type of '{field}' ({declared}) for '{model}' is not a registered model, \
             assigning the list as-is"
        );
        return Ok(FieldValue::from_json(incoming, declared));
    };

    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        let nested = expect_mapping(item, model, field)?;
        let mut element = factory();
        decode_into(element.as_mut(), nested, false, resolution)?;
        elements.push(FieldValue::Model(element));
    }

    Ok(FieldValue::List(elements))
}

/// Fills, in place, the fields of `model` that are currently null.
///
/// Fields holding anything else (empty lists and other falsy values included) are left
/// untouched. Values are assigned as they come: no recursion into nested models and no list
/// element resolution.
pub fn merge_missing<M: Model + ?Sized>(
    model: &mut M,
    mapping: &Map<String, Value>,
    safe: bool,
) -> Result<(), CodecError> {
    let schema = model.schema();

    for (key, incoming) in mapping {
        let Some(slot) = model.field_mut(key) else {
            if safe {
                log::debug!("Ignoring unknown key '{key}' for '{}'", schema.type_path);
                continue;
            }
            return Err(CodecError::MissingAttribute {
                model: schema.type_path,
                field: key.clone(),
            });
        };

        if slot.is_null() {
            let declared = schema.field(key).map_or(FieldType::Any, |def| def.ty);
            *slot = FieldValue::from_json(incoming, &declared);
        }
    }

    Ok(())
}

fn expect_mapping<'v>(
    value: &'v Value,
    model: &'static str,
    field: &str,
) -> Result<&'v Map<String, Value>, CodecError> {
    value.as_object().ok_or_else(|| CodecError::ExpectedMapping {
        model,
        field: field.to_string(),
        found: json_kind(value),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

//! # Terra Core
//!
//! `terra-core` is the model layer of the Terra client. It maps the JSON payloads returned by
//! the Terra API to typed model instances and back, with a single generic codec instead of a
//! hand-written converter per model.
//!
//! ## Key Components
//!
//! * **[`model!`]:** Declares a model type: a struct of [`FieldValue`]s plus a static
//!   [`Schema`] naming each field and its declared [`FieldType`].
//! * **[`Catalog`]:** A registry mapping fully qualified type paths to model factories. Strict
//!   decoding uses it to build the elements of list fields as the right model type.
//! * **[`codec`]:** The four codec operations: `encode`, strict `decode`, permissive
//!   `decode_api` and `merge_missing`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use terra_core::{Catalog, FieldType, FieldValue, ModelExt, ModelType};
//!
//! terra_core::model! {
//!     pub struct HeartRateSample("terra.models.v2.samples.HeartRateSample") {
//!         timestamp: FieldType::Str,
//!         bpm: FieldType::Int,
//!     }
//! }
//!
//! terra_core::model! {
//!     pub struct HeartRateData("terra.models.v2.samples.HeartRateData") {
//!         samples: FieldType::List("models.v2.samples.HeartRateSample") => FieldValue::List(vec![]),
//!     }
//! }
//!
//! let mut catalog = Catalog::new();
//! catalog.register::<HeartRateSample>();
//!
//! let payload = json!({"samples": [{"timestamp": "2022-01-01T00:00:00Z", "bpm": 62}]});
//! let data = HeartRateData::decode(&catalog, payload.as_object().unwrap(), false).unwrap();
//!
//! assert_eq!(serde_json::Value::Object(data.encode().unwrap()), payload);
//! ```
//!
//! ## Feature Flags
//!
//! * `auto_register` (default): enables [`register_model!`] and [`Catalog::auto_register`],
//!   backed by the `inventory` crate.
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: decisions that are not
//! errors (skipped fields, unresolved list element types, replaced catalog entries) are
//! reported at `debug` or `warn` level. No logger is installed.
pub mod catalog;
pub mod codec;
pub mod model;
pub mod schema;
pub mod value;

pub use catalog::{Catalog, ModelFactory};
pub use codec::CodecError;
pub use model::{Model, ModelExt, ModelType};
pub use schema::{FieldDef, FieldType, Schema};
pub use value::{EnumValue, FieldValue, IntEnum};

// Re-exports
pub use serde_json;

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

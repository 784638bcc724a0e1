//! # Type Catalog
//!
//! A registry mapping fully qualified type paths (e.g. `terra.models.v2.samples.HeartRateData`)
//! to factories producing empty instances of the corresponding model.
//!
//! Strict decoding consults the catalog to find out which model the elements of a list field
//! should be built as. Declared element types are usually written relative to the models
//! namespace (`models.v2.samples.HeartRateData`); [`Catalog::qualify`] turns them into full
//! paths by prefixing the root package.
//!
//! ## auto_register
//!
//! With the `auto_register` feature (enabled by default), models declared with
//! [`register_model!`](crate::register_model!) are collected at link time through the
//! [`inventory`] crate and can be added to a catalog in one call with
//! [`Catalog::auto_register`].
use crate::model::{Model, ModelType};
use crate::schema::{FieldType, element_type_name};
use std::borrow::Cow;
use std::collections::HashMap;

/// Root package prepended to module-relative type paths.
pub const DEFAULT_ROOT_PACKAGE: &str = "terra";

/// First path segment identifying a module-relative model reference.
pub const DEFAULT_MODELS_NAMESPACE: &str = "models";

/// Produces an empty instance of a model type.
pub type ModelFactory = fn() -> Box<dyn Model>;

/// A registry of constructible model types, keyed by type path.
#[derive(Debug, Clone)]
pub struct Catalog {
    root_package: String,
    models_namespace: String,
    factories: HashMap<String, ModelFactory>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Creates an empty catalog qualifying `models.*` references under `terra`.
    pub fn new() -> Self {
        Self::with_namespace(DEFAULT_ROOT_PACKAGE, DEFAULT_MODELS_NAMESPACE)
    }

    /// Creates an empty catalog with a custom qualification rule: element type names whose
    /// first segment equals `models_namespace` get `root_package` prepended.
    pub fn with_namespace(
        root_package: impl Into<String>,
        models_namespace: impl Into<String>,
    ) -> Self {
        Self {
            root_package: root_package.into(),
            models_namespace: models_namespace.into(),
            factories: HashMap::new(),
        }
    }

    /// Creates a catalog containing every model declared with
    /// [`register_model!`](crate::register_model!).
    #[cfg(feature = "auto_register")]
    pub fn registered() -> Self {
        let mut catalog = Self::new();
        catalog.auto_register();
        catalog
    }

    pub fn root_package(&self) -> &str {
        &self.root_package
    }

    pub fn models_namespace(&self) -> &str {
        &self.models_namespace
    }

    /// Registers `T` under the type path of its schema.
    ///
    /// Returns `true` if the path was not registered before. An existing entry is kept.
    pub fn register<T: ModelType>(&mut self) -> bool {
        let type_path = T::model_schema().type_path;

        if self.factories.contains_key(type_path) {
            return false;
        }

        self.factories.insert(type_path.to_string(), new_boxed::<T>);
        true
    }

    /// Registers a factory under an arbitrary type path, replacing any previous entry.
    ///
    /// Returns `true` if the path was not registered before.
    pub fn register_factory(
        &mut self,
        type_path: impl Into<String>,
        factory: ModelFactory,
    ) -> bool {
        let type_path = type_path.into();

        if self.factories.contains_key(&type_path) {
            log::warn!("Replacing catalog entry for '{type_path}'");
        }

        self.factories.insert(type_path, factory).is_none()
    }

    /// Registers every model declared with [`register_model!`](crate::register_model!).
    ///
    /// Returns the number of newly registered types. Repeated calls are cheap and do not insert
    /// duplicates.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> usize {
        inventory::iter::<Registration>
            .into_iter()
            .filter(|registration| (registration.register)(self))
            .count()
    }

    pub fn get(&self, type_path: &str) -> Option<ModelFactory> {
        self.factories.get(type_path).copied()
    }

    pub fn contains(&self, type_path: &str) -> bool {
        self.factories.contains_key(type_path)
    }

    /// Builds an empty instance of the model registered under `type_path`.
    pub fn instantiate(&self, type_path: &str) -> Option<Box<dyn Model>> {
        self.get(type_path).map(|factory| factory())
    }

    /// Registered type paths, in no particular order.
    pub fn type_paths(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Turns a module-relative type name into a fully qualified one.
    ///
    /// ```
    /// use terra_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::new();
    ///
    /// assert_eq!(catalog.qualify("models.v2.User"), "terra.models.v2.User");
    /// assert_eq!(catalog.qualify("terra.models.User"), "terra.models.User");
    /// assert_eq!(catalog.qualify("int"), "int");
    /// ```
    pub fn qualify<'a>(&self, name: &'a str) -> Cow<'a, str> {
        let first_segment = name.split('.').next().unwrap_or(name);

        if first_segment == self.models_namespace {
            Cow::Owned(format!("{}.{}", self.root_package, name))
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Resolves the element type of a list field declaration to a registered factory.
    ///
    /// The element name is read from the declared signature (see
    /// [`element_type_name`]), qualified and looked up. Returns `None` when the signature
    /// embeds no element type or when the element type is not a registered model.
    pub fn resolve_element_type(&self, declared: &FieldType) -> Option<ModelFactory> {
        let signature = declared.to_string();
        let element = element_type_name(&signature)?;
        self.get(&self.qualify(element))
    }
}

fn new_boxed<T: ModelType>() -> Box<dyn Model> {
    Box::new(T::default())
}

/// A link-time registration hook, submitted by [`register_model!`](crate::register_model!).
#[cfg(feature = "auto_register")]
pub struct Registration {
    register: fn(&mut Catalog) -> bool,
}

#[cfg(feature = "auto_register")]
impl Registration {
    pub const fn new(register: fn(&mut Catalog) -> bool) -> Self {
        Self { register }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(Registration);

/// Registration hook for `T`, usable in const context.
#[doc(hidden)]
pub fn register_hook<T: ModelType>(catalog: &mut Catalog) -> bool {
    catalog.register::<T>()
}

/// Submits one or more model types for [`Catalog::auto_register`].
///
/// ```
/// use terra_core::catalog::Catalog;
/// use terra_core::schema::FieldType;
///
/// terra_core::model! {
///     pub struct Device("terra.models.v2.device.Device") {
///         name: FieldType::Str,
///     }
/// }
///
/// terra_core::register_model!(Device);
///
/// let catalog = Catalog::registered();
/// assert!(catalog.contains("terra.models.v2.device.Device"));
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_model {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__private::inventory::submit! {
                $crate::catalog::Registration::new($crate::catalog::register_hook::<$ty>)
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    crate::model! {
        struct Sample("terra.models.v2.samples.Sample") {
            value: FieldType::Float,
        }
    }

    crate::model! {
        struct Series("terra.models.v2.samples.Series") {
            samples: FieldType::List("models.v2.samples.Sample") => FieldValue::List(vec![]),
            tags: FieldType::List("str"),
            label: FieldType::Str,
        }
    }

    #[cfg(feature = "auto_register")]
    crate::register_model!(Sample, Series);

    #[cfg(feature = "auto_register")]
    #[test]
    fn test_auto_register() {
        let mut catalog = Catalog::new();

        assert!(catalog.auto_register() >= 2);
        assert!(catalog.contains("terra.models.v2.samples.Sample"));
        assert!(catalog.contains("terra.models.v2.samples.Series"));

        // Already registered
        assert_eq!(catalog.auto_register(), 0);

        let catalog = Catalog::registered();
        assert!(catalog.instantiate("terra.models.v2.samples.Series").is_some());
    }

    #[test]
    fn test_register_and_instantiate() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.register::<Sample>());
        assert!(!catalog.register::<Sample>());
        assert_eq!(catalog.len(), 1);

        let instance = catalog
            .instantiate("terra.models.v2.samples.Sample")
            .expect("Sample is registered");
        assert!(instance.is::<Sample>());

        assert!(catalog.instantiate("terra.models.v2.samples.Ghost").is_none());
        assert_eq!(
            catalog.type_paths().collect::<Vec<_>>(),
            vec!["terra.models.v2.samples.Sample"]
        );
    }

    #[test]
    fn test_register_factory_replaces() {
        let mut catalog = Catalog::new();

        let sample: ModelFactory = || Box::new(Sample::default());
        let series: ModelFactory = || Box::new(Series::default());

        assert!(catalog.register_factory("terra.models.Alias", sample));
        assert!(!catalog.register_factory("terra.models.Alias", series));

        let instance = catalog.instantiate("terra.models.Alias").unwrap();
        assert!(instance.is::<Series>());
    }

    #[test]
    fn test_qualify_with_custom_namespace() {
        let catalog = Catalog::with_namespace("acme", "schemas");

        assert_eq!(catalog.qualify("schemas.Sample"), "acme.schemas.Sample");
        assert_eq!(catalog.qualify("models.Sample"), "models.Sample");
        assert_eq!(catalog.root_package(), "acme");
        assert_eq!(catalog.models_namespace(), "schemas");
    }

    #[test]
    fn test_resolve_element_type() {
        let mut catalog = Catalog::new();
        catalog.register::<Sample>();

        let schema = Series::model_schema();
        let samples = schema.field("samples").unwrap().ty;
        let tags = schema.field("tags").unwrap().ty;
        let label = schema.field("label").unwrap().ty;

        let factory = catalog.resolve_element_type(&samples).expect("resolves");
        assert!(factory().is::<Sample>());

        assert!(catalog.resolve_element_type(&tags).is_none());
        assert!(catalog.resolve_element_type(&label).is_none());
    }

    #[test]
    fn test_unregistered_element_type_does_not_resolve() {
        let catalog = Catalog::new();
        let samples = Series::model_schema().field("samples").unwrap().ty;

        assert!(catalog.resolve_element_type(&samples).is_none());
    }
}

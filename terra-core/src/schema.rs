//! # Field Schema
//!
//! Static metadata describing the data fields of a model type.
//!
//! Every model type carries a [`Schema`]: its fully qualified type path and, for each field,
//! the declared [`FieldType`]. The codec walks this schema instead of inspecting the runtime
//! shape of a model, and strict decoding reads the declared signature of list fields to find
//! out which model type their elements should be built as.
use std::fmt;

/// Prefix marking a field as internal machinery rather than public data.
pub const RESERVED_PREFIX: char = '_';

/// The declared type of a model field.
///
/// The [`Display`](fmt::Display) form is the declared signature of the field, e.g. `str`,
/// `models.v2.samples.HeartRateData` or `List[models.v2.samples.HeartRateData]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Any JSON-compatible value.
    Any,
    Str,
    Int,
    Float,
    Bool,
    /// An opaque mapping. Its content is never interpreted by the codec.
    Map,
    /// An integer enumeration, identified by its type path.
    Enum(&'static str),
    /// A nested model, identified by its (possibly module-relative) type path.
    Model(&'static str),
    /// A sequence whose elements are declared with the given signature.
    List(&'static str),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Any => f.write_str("Any"),
            FieldType::Str => f.write_str("str"),
            FieldType::Int => f.write_str("int"),
            FieldType::Float => f.write_str("float"),
            FieldType::Bool => f.write_str("bool"),
            FieldType::Map => f.write_str("dict"),
            FieldType::Enum(path) | FieldType::Model(path) => f.write_str(path),
            FieldType::List(element) => write!(f, "List[{element}]"),
        }
    }
}

/// A single field declaration: its name and declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldDef {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }

    /// Returns `true` unless the name starts with the reserved prefix.
    pub fn is_data_field(&self) -> bool {
        !self.name.starts_with(RESERVED_PREFIX)
    }
}

/// The static description of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    /// Fully qualified type path (e.g. `terra.models.v2.activity.Activity`).
    pub type_path: &'static str,
    /// Every declared field, in declaration order.
    pub fields: &'static [FieldDef],
}

impl Schema {
    pub const fn new(type_path: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { type_path, fields }
    }

    /// Short name of the type, i.e. the last segment of its path.
    pub fn name(&self) -> &'static str {
        self.type_path
            .rsplit_once('.')
            .map_or(self.type_path, |(_, name)| name)
    }

    /// Looks up the declaration of a field, reserved fields included.
    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        let fields: &'static [FieldDef] = self.fields;
        fields.iter().find(|def| def.name == name)
    }

    /// Iterates the public data fields, skipping names with the reserved prefix.
    pub fn data_fields(&self) -> impl Iterator<Item = &'static FieldDef> + 'static {
        let fields: &'static [FieldDef] = self.fields;
        fields.iter().filter(|def| def.is_data_field())
    }
}

/// Extracts the element type name embedded in a declared sequence signature.
///
/// Returns the text between the first `[` and the first `]` following it, or `None` when the
/// signature carries no brackets.
///
/// ```
/// use terra_core::schema::element_type_name;
///
/// assert_eq!(element_type_name("List[models.Inner]"), Some("models.Inner"));
/// assert_eq!(element_type_name("str"), None);
/// ```
pub fn element_type_name(signature: &str) -> Option<&str> {
    let (_, rest) = signature.split_once('[')?;
    Some(rest.split_once(']').map_or(rest, |(name, _)| name))
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: [FieldDef; 3] = [
        FieldDef::new("name", FieldType::Str),
        FieldDef::new("samples", FieldType::List("models.v2.samples.HeartRateData")),
        FieldDef::new("_raw", FieldType::Map),
    ];
    static SCHEMA: Schema = Schema::new("terra.models.v2.activity.Activity", &FIELDS);

    #[test]
    fn test_signatures() {
        assert_eq!(FieldType::Str.to_string(), "str");
        assert_eq!(FieldType::Map.to_string(), "dict");
        assert_eq!(
            FieldType::List("models.v2.samples.HeartRateData").to_string(),
            "List[models.v2.samples.HeartRateData]"
        );
        assert_eq!(
            FieldType::Enum("terra.models.enums.ActivityType").to_string(),
            "terra.models.enums.ActivityType"
        );
    }

    #[test]
    fn test_element_type_name() {
        assert_eq!(element_type_name("List[models.Inner]"), Some("models.Inner"));
        assert_eq!(element_type_name("List[int]"), Some("int"));
        // Nested signatures are cut at the first closing bracket
        assert_eq!(
            element_type_name("Optional[List[models.Inner]]"),
            Some("List[models.Inner")
        );
        assert_eq!(element_type_name("List[unterminated"), Some("unterminated"));
        assert_eq!(element_type_name("models.Inner"), None);
    }

    #[test]
    fn test_schema_lookup() {
        assert_eq!(SCHEMA.name(), "Activity");
        assert_eq!(SCHEMA.field("samples").map(|f| f.ty), Some(FIELDS[1].ty));
        assert!(SCHEMA.field("_raw").is_some());
        assert!(SCHEMA.field("missing").is_none());

        let data: Vec<_> = SCHEMA.data_fields().map(|f| f.name).collect();
        assert_eq!(data, vec!["name", "samples"]);
    }
}

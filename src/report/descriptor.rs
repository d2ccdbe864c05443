//! The structural type-descriptor model.
//!
//! A [`TypeDescriptor`] is a tagged, recursive description of the shape
//! the validator expected at some path: primitives, literals, arrays,
//! records, dictionaries, unions, intersections, and opaque shapes.
//! Descriptors are immutable and shared via `Arc` — union members,
//! record properties, and context entries all alias the same nodes.
//!
//! A recursive descriptor carries only its display name. It has no
//! unwrap thunk on purpose: expanding recursion during reduction is an
//! infinite-loop hazard, and every branch that actually failed arrives
//! already expanded as ordinary entries in the error paths.

use std::sync::Arc;

use indexmap::IndexMap;

use super::value::Value;

/// An ordered property map for record-shaped descriptors.
pub type PropertyMap = IndexMap<String, Arc<TypeDescriptor>>;

/// A structural description of an expected shape.
///
/// Carries an optional display name (used for short type names and
/// fallback messages) and the shape itself as a closed [`TypeKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: Option<String>,
    kind: TypeKind,
}

/// The shape of a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Exactly one permitted value.
    Literal(Value),
    /// Any string.
    String,
    /// Any number.
    Number,
    /// Any boolean.
    Boolean,
    /// The null value.
    Null,
    /// An array with a uniform element type.
    Array(Arc<TypeDescriptor>),
    /// A record with a fixed, ordered set of required properties.
    Record(PropertyMap),
    /// A record whose declared properties are all optional.
    PartialRecord(PropertyMap),
    /// A map from arbitrary string keys to values.
    Dictionary,
    /// One of several alternative shapes.
    Union(Vec<Arc<TypeDescriptor>>),
    /// All of several shapes at once.
    Intersection(Vec<Arc<TypeDescriptor>>),
    /// A self-referential shape, represented by name only.
    Recursive,
    /// A shape this crate has no structural knowledge of.
    Other {
        /// The foreign tag label, reported verbatim in diagnostics.
        tag: String,
    },
}

impl TypeDescriptor {
    /// Creates a descriptor with an auto-derived display name.
    #[must_use]
    pub fn new(kind: TypeKind) -> Arc<Self> {
        let name = derive_name(&kind);
        Arc::new(Self { name, kind })
    }

    /// Creates a descriptor with an explicit display name.
    #[must_use]
    pub fn named(name: impl Into<String>, kind: TypeKind) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.into()),
            kind,
        })
    }

    /// The string primitive.
    #[must_use]
    pub fn string() -> Arc<Self> {
        Self::new(TypeKind::String)
    }

    /// The number primitive.
    #[must_use]
    pub fn number() -> Arc<Self> {
        Self::new(TypeKind::Number)
    }

    /// The boolean primitive.
    #[must_use]
    pub fn boolean() -> Arc<Self> {
        Self::new(TypeKind::Boolean)
    }

    /// The null type.
    #[must_use]
    pub fn null() -> Arc<Self> {
        Self::new(TypeKind::Null)
    }

    /// A literal type permitting exactly `value`.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Arc<Self> {
        Self::new(TypeKind::Literal(value.into()))
    }

    /// An array of `element`.
    #[must_use]
    pub fn array(element: Arc<Self>) -> Arc<Self> {
        Self::new(TypeKind::Array(element))
    }

    /// A named record with the given required properties.
    #[must_use]
    pub fn record(name: impl Into<String>, props: PropertyMap) -> Arc<Self> {
        Self::named(name, TypeKind::Record(props))
    }

    /// A named record whose declared properties are all optional.
    #[must_use]
    pub fn partial_record(name: impl Into<String>, props: PropertyMap) -> Arc<Self> {
        Self::named(name, TypeKind::PartialRecord(props))
    }

    /// A dictionary from string keys to arbitrary values.
    #[must_use]
    pub fn dictionary() -> Arc<Self> {
        Self::new(TypeKind::Dictionary)
    }

    /// A union over `members`, named after them.
    #[must_use]
    pub fn union(members: Vec<Arc<Self>>) -> Arc<Self> {
        Self::new(TypeKind::Union(members))
    }

    /// An intersection over `members`, named after them.
    #[must_use]
    pub fn intersection(members: Vec<Arc<Self>>) -> Arc<Self> {
        Self::new(TypeKind::Intersection(members))
    }

    /// A named recursive type.
    #[must_use]
    pub fn recursive(name: impl Into<String>) -> Arc<Self> {
        Self::named(name, TypeKind::Recursive)
    }

    /// An anonymous recursive type.
    #[must_use]
    pub fn recursive_unnamed() -> Arc<Self> {
        Self::new(TypeKind::Recursive)
    }

    /// An opaque foreign type with the given tag and display name.
    #[must_use]
    pub fn other(tag: impl Into<String>, name: impl Into<String>) -> Arc<Self> {
        Self::named(name, TypeKind::Other { tag: tag.into() })
    }

    /// The declared display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The display name, falling back to `"mixed"` for anonymous types.
    #[must_use]
    pub(crate) fn name_or_mixed(&self) -> &str {
        self.name.as_deref().unwrap_or("mixed")
    }

    /// The shape of this descriptor.
    #[must_use]
    pub const fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// The stable tag label for this shape, reported in diagnostics.
    #[must_use]
    pub fn tag(&self) -> &str {
        match &self.kind {
            TypeKind::Literal(_) => "literal",
            TypeKind::String => "string",
            TypeKind::Number => "number",
            TypeKind::Boolean => "boolean",
            TypeKind::Null => "null",
            TypeKind::Array(_) => "array",
            TypeKind::Record(_) => "record",
            TypeKind::PartialRecord(_) => "partial",
            TypeKind::Dictionary => "dictionary",
            TypeKind::Union(_) => "union",
            TypeKind::Intersection(_) => "intersection",
            TypeKind::Recursive => "recursive",
            TypeKind::Other { tag } => tag,
        }
    }
}

/// Derives a display name for a shape, mirroring how the validator's
/// combinators compose theirs.
fn derive_name(kind: &TypeKind) -> Option<String> {
    match kind {
        TypeKind::Literal(value) => Some(value.to_json()),
        TypeKind::String => Some("string".to_owned()),
        TypeKind::Number => Some("number".to_owned()),
        TypeKind::Boolean => Some("boolean".to_owned()),
        TypeKind::Null => Some("null".to_owned()),
        TypeKind::Array(element) => Some(format!("Array<{}>", element.name_or_mixed())),
        TypeKind::Record(props) => Some(record_name(props)),
        TypeKind::PartialRecord(props) => Some(format!("Partial<{}>", record_name(props))),
        TypeKind::Dictionary => Some("{ [key: string]: mixed }".to_owned()),
        TypeKind::Union(members) => Some(joined_name(members, " | ")),
        TypeKind::Intersection(members) => Some(joined_name(members, " & ")),
        TypeKind::Recursive | TypeKind::Other { .. } => None,
    }
}

/// `{ a: string, b: number }`-style name for a property map.
fn record_name(props: &PropertyMap) -> String {
    if props.is_empty() {
        return "{}".to_owned();
    }
    let fields: Vec<String> = props
        .iter()
        .map(|(key, ty)| format!("{key}: {}", ty.name_or_mixed()))
        .collect();
    format!("{{ {} }}", fields.join(", "))
}

/// Member names joined by a separator, for union/intersection names.
fn joined_name(members: &[Arc<TypeDescriptor>], separator: &str) -> String {
    let names: Vec<&str> = members.iter().map(|m| m.name_or_mixed()).collect();
    names.join(separator)
}

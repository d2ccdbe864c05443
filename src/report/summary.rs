//! Type-summary helpers shared by the reducer and the renderer.
//!
//! Two classifications live here: the JS-runtime category of a value or
//! an expected shape (what `typeof` would report at runtime), and a
//! compact textual signature for a descriptor. The reducer compares
//! categories to rule union branches out; the renderer prints the
//! signatures.

use indexmap::IndexSet;

use super::descriptor::{TypeDescriptor, TypeKind};
use super::value::Value;

/// The category `typeof` reports for a value in the source runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum JsCategory {
    /// Records, dictionaries, arrays — and null, which `typeof`
    /// famously classifies as `"object"`.
    Object,
    /// Strings (and string-valued literals on the expected side).
    String,
    /// Numbers.
    Number,
    /// Booleans.
    Boolean,
    /// The absent marker; only ever an *actual* category.
    Undefined,
}

impl JsCategory {
    /// The `typeof`-style label for this category.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Undefined => "undefined",
        }
    }
}

/// The runtime category a value of the given shape would have, or
/// `None` when the shape implies no single category (unions, null,
/// recursive and opaque shapes).
///
/// Arrays classify as `Object` deliberately: it mirrors `typeof` for
/// arrays and keeps array-vs-record union members from being spuriously
/// excluded on category alone.
pub(crate) fn expected_category(ty: &TypeDescriptor) -> Option<JsCategory> {
    match ty.kind() {
        TypeKind::Record(_)
        | TypeKind::PartialRecord(_)
        | TypeKind::Dictionary
        | TypeKind::Array(_) => Some(JsCategory::Object),
        TypeKind::Literal(_) | TypeKind::String => Some(JsCategory::String),
        TypeKind::Number => Some(JsCategory::Number),
        TypeKind::Boolean => Some(JsCategory::Boolean),
        _ => None,
    }
}

/// The runtime category of an actual value, mirroring `typeof`:
/// null and containers are `Object`, an absent value is `Undefined`.
pub(crate) fn actual_category(actual: Option<&Value>) -> JsCategory {
    match actual {
        None => JsCategory::Undefined,
        Some(Value::Null | Value::Sequence(_) | Value::Mapping(_)) => JsCategory::Object,
        Some(Value::Bool(_)) => JsCategory::Boolean,
        Some(Value::Integer(_) | Value::Float(_)) => JsCategory::Number,
        Some(Value::String(_)) => JsCategory::String,
    }
}

/// A compact textual signature for a descriptor, or `None` when no
/// short form applies.
///
/// Literals render in JSON form, arrays as `elem[]`, unions as their
/// de-duplicated member signatures joined by `|`. Otherwise a declared
/// name is used when it is a single bare word, falling back to the
/// runtime category label.
pub(crate) fn short_type_name(ty: &TypeDescriptor) -> Option<String> {
    match ty.kind() {
        TypeKind::Literal(value) => Some(value.to_json()),
        TypeKind::Array(element) => {
            let inner = short_type_name(element).unwrap_or_else(|| "mixed".to_owned());
            Some(format!("{inner}[]"))
        }
        TypeKind::Union(members) => {
            let names: IndexSet<String> = members
                .iter()
                .map(|m| short_type_name(m).unwrap_or_else(|| "mixed".to_owned()))
                .collect();
            Some(names.into_iter().collect::<Vec<_>>().join("|"))
        }
        _ => match ty.name() {
            Some(name) if is_bare_word(name) => Some(name.to_owned()),
            _ => expected_category(ty).map(|c| c.as_str().to_owned()),
        },
    }
}

/// Returns `true` if the string is one bare word (`[0-9A-Za-z_]+`).
fn is_bare_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

//! Shared fixture builders for report integration tests.

use std::sync::Arc;

use errtree::report::{
    ContextEntry, EntryArena, PropertyMap, TypeDescriptor, ValidationError, Value,
};
use indexmap::IndexMap;

/// `RecordA = { kind: 'a', x: number }`.
pub fn record_a() -> Arc<TypeDescriptor> {
    let mut props = PropertyMap::new();
    props.insert("kind".to_owned(), TypeDescriptor::literal("a"));
    props.insert("x".to_owned(), TypeDescriptor::number());
    TypeDescriptor::record("RecordA", props)
}

/// `RecordB = { kind: 'b', y: string }`.
pub fn record_b() -> Arc<TypeDescriptor> {
    let mut props = PropertyMap::new();
    props.insert("kind".to_owned(), TypeDescriptor::literal("b"));
    props.insert("y".to_owned(), TypeDescriptor::string());
    TypeDescriptor::record("RecordB", props)
}

/// Builds a mapping value from key/value pairs, preserving order.
pub fn mapping(pairs: &[(&str, Value)]) -> Value {
    let mut map = IndexMap::new();
    for (key, value) in pairs {
        map.insert((*key).to_owned(), value.clone());
    }
    Value::Mapping(map)
}

/// Arena and errors for `RecordA | RecordB` validated against
/// `{kind: "a", x: "oops"}`: branch A fails on `x`, branch B on its
/// missing `y`. Both errors share the union entry's id, so they group
/// under one root.
pub fn tagged_union_failure() -> (EntryArena, Vec<ValidationError>) {
    let mut arena = EntryArena::new();
    let union_ty = TypeDescriptor::union(vec![record_a(), record_b()]);
    let actual = mapping(&[("kind", Value::from("a")), ("x", Value::from("oops"))]);

    let union_entry = arena.insert(ContextEntry::new("value", union_ty, actual.clone()));
    let branch_a = arena.insert(ContextEntry::new("0", record_a(), actual.clone()));
    let branch_b = arena.insert(ContextEntry::new("1", record_b(), actual));
    let x_leaf = arena.insert(ContextEntry::new("x", TypeDescriptor::number(), "oops"));
    let y_leaf = arena.insert(ContextEntry::absent("y", TypeDescriptor::string()));

    let errors = vec![
        ValidationError::new(vec![union_entry, branch_a, x_leaf]),
        ValidationError::new(vec![union_entry, branch_b, y_leaf]),
    ];
    (arena, errors)
}

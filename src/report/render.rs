//! Text rendering of reduced error trees.
//!
//! One line (or block) per node, two-space indent per nesting level.
//! The prefix of a line comes from the *parent's* type (`| ` under a
//! union, `& ` under an intersection, `at [i] ` under an array, `key: `
//! under a record-like shape); the container phrase comes from the
//! node's *own* type and is used only when the node has sub-failures.

use super::descriptor::{TypeDescriptor, TypeKind};
use super::entry::{EntryArena, ValidationError};
use super::error::ReportError;
use super::reduce::reduce;
use super::summary::{actual_category, expected_category, short_type_name};
use super::tree::ReportNode;
use super::value::Value;

/// One indentation step.
const INDENT: &str = "  ";

/// Longest union member name printed in an "expected one of" list
/// before truncation.
const MAX_MEMBER_NAME: usize = 60;

/// Reduces the error tree for `errors` and renders it as an indented
/// diagnostic report, one trailing newline per top-level node.
///
/// # Errors
///
/// Returns [`ReportError::UnknownEntry`] if an error path references an
/// id that is not present in `arena`.
///
/// # Examples
///
///     use errtree::report::{ContextEntry, EntryArena, TypeDescriptor, ValidationError, render};
///
///     let mut arena = EntryArena::new();
///     let id = arena.insert(ContextEntry::new("port", TypeDescriptor::number(), "8080"));
///     let errors = vec![ValidationError::new(vec![id])];
///     let report = render(&errors, &arena).unwrap();
///     assert_eq!(report, "number expected, but string found\n");
pub fn render(errors: &[ValidationError], arena: &EntryArena) -> Result<String, ReportError> {
    let tree = reduce(errors, arena)?;
    Ok(render_nodes(&tree.roots, None, 0))
}

/// Renders sibling nodes at one nesting level.
fn render_nodes(nodes: &[ReportNode], parent: Option<&TypeDescriptor>, level: usize) -> String {
    let mut out = String::new();
    for node in nodes {
        out.push_str(&INDENT.repeat(level));
        out.push_str(&element_prefix(parent, &node.entry.key));
        match &node.entry.actual {
            None => {
                out.push_str(&mandatory_line(&node.entry.ty));
                out.push('\n');
            }
            Some(_) if !node.children.is_empty() => {
                out.push_str(&container_phrase(node));
                out.push('\n');
                out.push_str(&render_nodes(&node.children, Some(&node.entry.ty), level + 1));
            }
            Some(actual) => {
                out.push_str(&mismatch_message(&node.entry.ty, actual, level + 1));
                out.push('\n');
            }
        }
    }
    out
}

/// The line prefix a child gets under a parent of the given type.
fn element_prefix(parent: Option<&TypeDescriptor>, key: &str) -> String {
    let Some(parent_ty) = parent else {
        return String::new();
    };
    match parent_ty.kind() {
        TypeKind::Union(_) => "| ".to_owned(),
        TypeKind::Intersection(_) => "& ".to_owned(),
        TypeKind::Array(_) => format!("at [{key}] "),
        _ => format!("{key}: "),
    }
}

/// The heading for a node whose sub-failures follow.
fn container_phrase(node: &ReportNode) -> String {
    match node.entry.ty.kind() {
        TypeKind::Union(_) => "must satisfy either of".to_owned(),
        TypeKind::Intersection(_) => "must satisfy every of".to_owned(),
        TypeKind::Array(_) => "array [".to_owned(),
        TypeKind::Record(_) => "object {".to_owned(),
        TypeKind::Recursive if node.entry.ty.name().is_some() => {
            format!("{} {{", node.entry.ty.name_or_mixed())
        }
        _ => format!(
            "invalid {} {} element(s)",
            node.children.len(),
            node.entry.ty.tag()
        ),
    }
}

/// The line for a required position that was never supplied.
fn mandatory_line(ty: &TypeDescriptor) -> String {
    short_type_name(ty).map_or_else(
        || "is mandatory".to_owned(),
        |short| format!("{short} is mandatory"),
    )
}

/// A one-line (or, for bare unions, multi-line) message for a leaf
/// mismatch, chosen by priority: literal-vs-string first, then category
/// mismatch, array, null, named recursion, bare union, and finally a
/// generic `<tag> <name> expected` fallback.
fn mismatch_message(expected: &TypeDescriptor, actual: &Value, level: usize) -> String {
    let actual_cat = actual_category(Some(actual));

    if let TypeKind::Literal(lit) = expected.kind() {
        if let Value::String(found) = actual {
            return format!("'{}' expected, but '{found}' found", lit.unquoted());
        }
    }
    if let Some(expected_cat) = expected_category(expected) {
        if expected_cat != actual_cat {
            let shown = match expected.kind() {
                TypeKind::Literal(lit) => lit.to_json(),
                _ => expected_cat.as_str().to_owned(),
            };
            return format!("{shown} expected, but {} found", actual_cat.as_str());
        }
    }
    if matches!(expected.kind(), TypeKind::Array(_)) && !matches!(actual, Value::Sequence(_)) {
        return format!("array expected, but {} found", actual_cat.as_str());
    }
    if matches!(expected.kind(), TypeKind::Null) && !matches!(actual, Value::Null) {
        return format!("null expected, but {} found", actual_cat.as_str());
    }
    if matches!(expected.kind(), TypeKind::Recursive) {
        if let Some(name) = expected.name() {
            return format!("{name} expected");
        }
    }
    if let TypeKind::Union(members) = expected.kind() {
        let mut lines = vec!["expected one of".to_owned()];
        for member in members {
            lines.push(format!(
                "{} | {}",
                INDENT.repeat(level),
                truncated(member.name_or_mixed())
            ));
        }
        return lines.join("\n");
    }
    format!("{} {} expected", expected.tag(), expected.name_or_mixed())
}

/// Bounds a union member name to [`MAX_MEMBER_NAME`] characters,
/// appending an ellipsis when cut.
fn truncated(name: &str) -> String {
    if name.chars().count() <= MAX_MEMBER_NAME {
        return name.to_owned();
    }
    let head: String = name.chars().take(MAX_MEMBER_NAME).collect();
    format!("{head}…")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use indexmap::IndexMap;
    use rstest::rstest;

    use super::{mismatch_message, render, truncated};
    use crate::report::descriptor::{PropertyMap, TypeDescriptor};
    use crate::report::entry::{ContextEntry, EntryArena, ValidationError};
    use crate::report::value::Value;

    fn record_a() -> Arc<TypeDescriptor> {
        let mut props = PropertyMap::new();
        props.insert("kind".to_owned(), TypeDescriptor::literal("a"));
        props.insert("x".to_owned(), TypeDescriptor::number());
        TypeDescriptor::record("RecordA", props)
    }

    fn record_b() -> Arc<TypeDescriptor> {
        let mut props = PropertyMap::new();
        props.insert("kind".to_owned(), TypeDescriptor::literal("b"));
        props.insert("y".to_owned(), TypeDescriptor::string());
        TypeDescriptor::record("RecordB", props)
    }

    // ── Mismatch-message priority ───────────────────────────────────

    #[rstest]
    #[case::literal_vs_string_wins_over_category(
        TypeDescriptor::literal("x"),
        Value::from("y"),
        "'x' expected, but 'y' found"
    )]
    #[case::literal_vs_non_string_uses_json(
        TypeDescriptor::literal("x"),
        Value::Integer(3),
        "\"x\" expected, but number found"
    )]
    #[case::category_mismatch(
        TypeDescriptor::number(),
        Value::from("8080"),
        "number expected, but string found"
    )]
    #[case::array_vs_mapping(
        TypeDescriptor::array(TypeDescriptor::number()),
        Value::Mapping(IndexMap::new()),
        "array expected, but object found"
    )]
    #[case::null_vs_string(
        TypeDescriptor::null(),
        Value::from("x"),
        "null expected, but string found"
    )]
    #[case::named_recursion(
        TypeDescriptor::recursive("Tree"),
        Value::Integer(1),
        "Tree expected"
    )]
    #[case::fallback(
        TypeDescriptor::other("branded", "UserId"),
        Value::Integer(1),
        "branded UserId expected"
    )]
    fn mismatch_priority(
        #[case] expected_ty: Arc<TypeDescriptor>,
        #[case] actual: Value,
        #[case] expected_message: &str,
    ) {
        assert_eq!(mismatch_message(&expected_ty, &actual, 1), expected_message);
    }

    #[test]
    fn bare_union_mismatch_lists_member_names() {
        let union = TypeDescriptor::union(vec![record_a(), record_b()]);
        let message = mismatch_message(&union, &Value::Integer(5), 1);
        assert_eq!(
            message,
            "expected one of\n   | RecordA\n   | RecordB"
        );
    }

    #[test]
    fn long_member_names_are_truncated_with_an_ellipsis() {
        let long = "A".repeat(80);
        let cut = truncated(&long);
        assert_eq!(cut.chars().count(), 61);
        assert!(cut.ends_with('…'));
        assert_eq!(truncated("Short"), "Short");
    }

    // ── Whole-report rendering ──────────────────────────────────────

    #[test]
    fn mandatory_line_renders_regardless_of_type_complexity() {
        let mut arena = EntryArena::new();
        let id = arena.insert(ContextEntry::absent("name", record_a()));
        let report = render(&[ValidationError::new(vec![id])], &arena).unwrap();
        assert_eq!(report, "RecordA is mandatory\n");
    }

    #[test]
    fn mandatory_line_with_no_short_name_degrades_cleanly() {
        let mut arena = EntryArena::new();
        let id = arena.insert(ContextEntry::absent("x", TypeDescriptor::other("branded", "a b")));
        let report = render(&[ValidationError::new(vec![id])], &arena).unwrap();
        assert_eq!(report, "is mandatory\n");
    }

    #[test]
    fn record_children_are_prefixed_with_their_key() {
        let mut arena = EntryArena::new();
        let mut actual = IndexMap::new();
        actual.insert("x".to_owned(), Value::from("oops"));
        let parent = arena.insert(ContextEntry::new(
            "value",
            record_a(),
            Value::Mapping(actual),
        ));
        let leaf = arena.insert(ContextEntry::new("x", TypeDescriptor::number(), "oops"));
        let report = render(&[ValidationError::new(vec![parent, leaf])], &arena).unwrap();
        assert_eq!(report, "object {\n  x: number expected, but string found\n");
    }

    #[test]
    fn array_children_are_prefixed_with_their_index() {
        let mut arena = EntryArena::new();
        let arr = TypeDescriptor::array(TypeDescriptor::number());
        let parent = arena.insert(ContextEntry::new(
            "items",
            arr,
            Value::Sequence(vec![Value::Integer(1), Value::from("bad")]),
        ));
        let leaf = arena.insert(ContextEntry::new("1", TypeDescriptor::number(), "bad"));
        let report = render(&[ValidationError::new(vec![parent, leaf])], &arena).unwrap();
        assert_eq!(
            report,
            "array [\n  at [1] number expected, but string found\n"
        );
    }

    #[test]
    fn surviving_union_branches_are_prefixed_with_bars() {
        // A number satisfies neither record branch; both survive and
        // render as alternatives.
        let mut arena = EntryArena::new();
        let union_ty = TypeDescriptor::union(vec![record_a(), record_b()]);
        let parent = arena.insert(ContextEntry::new("value", union_ty, 5i64));
        let branch_a = arena.insert(ContextEntry::new("0", record_a(), 5i64));
        let branch_b = arena.insert(ContextEntry::new("1", record_b(), 5i64));
        let errors = vec![
            ValidationError::new(vec![parent, branch_a]),
            ValidationError::new(vec![parent, branch_b]),
        ];
        let report = render(&errors, &arena).unwrap();
        assert_eq!(
            report,
            "must satisfy either of\n\
             \x20 | object expected, but number found\n\
             \x20 | object expected, but number found\n"
        );
    }

    #[test]
    fn named_recursive_container_uses_its_name() {
        let mut arena = EntryArena::new();
        let tree_ty = TypeDescriptor::recursive("Tree");
        let mut actual = IndexMap::new();
        actual.insert("left".to_owned(), Value::Null);
        let parent = arena.insert(ContextEntry::new("root", tree_ty, Value::Mapping(actual)));
        let leaf = arena.insert(ContextEntry::new("left", TypeDescriptor::number(), Value::Null));
        let report = render(&[ValidationError::new(vec![parent, leaf])], &arena).unwrap();
        assert_eq!(
            report,
            "Tree {\n  left: number expected, but object found\n"
        );
    }

    #[test]
    fn end_to_end_union_reduction_names_only_the_plausible_branch() {
        let mut arena = EntryArena::new();
        let union_ty = TypeDescriptor::union(vec![record_a(), record_b()]);
        let mut map = IndexMap::new();
        map.insert("kind".to_owned(), Value::from("a"));
        map.insert("x".to_owned(), Value::from("oops"));
        let actual = Value::Mapping(map);

        let union_entry = arena.insert(ContextEntry::new("value", union_ty, actual.clone()));
        let branch_a = arena.insert(ContextEntry::new("0", record_a(), actual.clone()));
        let branch_b = arena.insert(ContextEntry::new("1", record_b(), actual));
        let x_leaf = arena.insert(ContextEntry::new("x", TypeDescriptor::number(), "oops"));
        let y_leaf = arena.insert(ContextEntry::absent("y", TypeDescriptor::string()));

        let errors = vec![
            ValidationError::new(vec![union_entry, branch_a, x_leaf]),
            ValidationError::new(vec![union_entry, branch_b, y_leaf]),
        ];
        let report = render(&errors, &arena).unwrap();
        assert_eq!(report, "object {\n  x: number expected, but string found\n");
        assert!(!report.contains("RecordB"));
        assert!(!report.contains('y'));
    }
}

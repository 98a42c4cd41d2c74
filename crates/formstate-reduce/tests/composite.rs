#![allow(missing_docs)]

use formstate_model::{
    Action, ControlId, FormState, FormValue, ValidationErrors, create_form_state,
};
use formstate_reduce::{ReduceError, form_array_reducer, form_group_reducer, reduce, reduce_all};
use serde_json::json;

fn root() -> ControlId {
    ControlId::root("form")
}

fn form(value: serde_json::Value) -> FormState {
    create_form_state(root(), FormValue::from(value))
}

fn node<'a>(state: &'a FormState, path: &str) -> &'a FormState {
    let id = ControlId::parse(path).expect("valid id");
    state.find(&id).unwrap_or_else(|| panic!("no node at {path}"))
}

fn errors(entries: &[(&str, FormValue)]) -> ValidationErrors {
    entries.iter().map(|(k, v)| (*k, v.clone())).collect()
}

#[test]
fn test_child_value_change_recomputes_parents() {
    let state = form(json!({ "name": "", "address": { "street": "" } }));
    let street = root().child("address").child("street");
    let next = reduce(&state, &Action::set_value(street, "Main"));

    assert_eq!(
        next.value(),
        &FormValue::from(json!({ "name": "", "address": { "street": "Main" } }))
    );
    assert_eq!(node(&next, "form.address").value(), &FormValue::from(json!({ "street": "Main" })));
    // Untouched siblings are shared between the two trees.
    assert!(node(&next, "form.name").ptr_eq(node(&state, "form.name")));
}

#[test]
fn test_child_errors_are_summarized_on_parents() {
    let state = form(json!({ "address": { "street": "" } }));
    let street = root().child("address").child("street");
    let required = errors(&[("required", FormValue::from(true))]);
    let next = reduce(&state, &Action::set_errors(street.clone(), required));

    let leaf_errors = node(&next, "form.address.street").errors().clone();
    let address = node(&next, "form.address");
    assert!(address.is_invalid());
    assert!(
        address
            .errors()
            .child("street")
            .is_some_and(|e| e.ptr_eq(&leaf_errors))
    );
    assert!(next.is_invalid());
    assert_eq!(next.errors().keys().collect::<Vec<_>>(), ["_address"]);

    let fixed = reduce(&next, &Action::set_errors(street, ValidationErrors::new()));
    assert!(fixed.is_valid());
    assert!(fixed.errors().is_empty());
}

#[test]
fn test_set_errors_on_composite_keeps_child_summaries() {
    let state = form(json!({ "name": "" }));
    let name = root().child("name");
    let state = reduce(
        &state,
        &Action::set_errors(name, errors(&[("required", FormValue::from(true))])),
    );
    let own = errors(&[
        ("match", FormValue::from(true)),
        ("_stale", FormValue::from(true)),
    ]);
    let next = reduce(&state, &Action::set_errors(root(), own));
    assert_eq!(next.errors().keys().collect::<Vec<_>>(), ["match", "_name"]);

    let again = reduce(
        &next,
        &Action::set_errors(root(), errors(&[("match", FormValue::from(true))])),
    );
    assert!(again.ptr_eq(&next));
}

#[test]
fn test_async_errors_on_composite() {
    let state = form(json!({ "name": "" }));
    let next = reduce_all(
        &state,
        &[
            Action::start_async_validation(root(), "exists"),
            Action::start_async_validation(root(), "unique"),
        ],
    );
    assert!(next.is_validation_pending());
    assert!(!node(&next, "form.name").is_validation_pending());

    let failed = reduce(&next, &Action::set_async_error(root(), "exists", true));
    assert!(failed.is_invalid());
    assert_eq!(failed.errors().get("$exists"), Some(&FormValue::from(true)));
    assert_eq!(failed.pending_validations().iter().collect::<Vec<_>>(), ["unique"]);

    let cleared = reduce(&failed, &Action::clear_async_error(root(), "unique"));
    assert!(!cleared.is_validation_pending());
    assert!(cleared.is_invalid());
}

#[test]
fn test_falsy_async_error_on_composite_removes_key() {
    let sequence = [
        Action::start_async_validation(root(), "x"),
        Action::set_async_error(root(), "x", true),
        Action::start_async_validation(root(), "x"),
        Action::set_async_error(root(), "x", 0),
    ];

    let state = form(json!({ "a": "" }));
    let failed = reduce_all(&state, &sequence[..2]);
    assert_eq!(failed.errors().get("$x"), Some(&FormValue::from(true)));
    assert!(failed.pending_validations().is_empty());

    let passed = reduce_all(&failed, &sequence[2..]);
    assert!(passed.errors().get("$x").is_none());
    assert!(passed.errors().is_empty());
    assert!(passed.pending_validations().is_empty());
    assert!(passed.is_valid());

    let a = root().child("a");
    let state = reduce(
        &form(json!({ "a": "" })),
        &Action::set_errors(a, errors(&[("required", FormValue::from(true))])),
    );
    let child_errors = node(&state, "form.a").errors().clone();
    let passed = reduce_all(&state, &sequence);
    assert_eq!(passed.errors().keys().collect::<Vec<_>>(), ["_a"]);
    assert!(passed.errors().child("a").is_some_and(|e| e.ptr_eq(&child_errors)));
    assert!(passed.pending_validations().is_empty());
    assert!(passed.is_invalid());
}

#[test]
fn test_group_value_addressed_at_leaf_is_ignored() {
    let state = form(json!({ "a": "" }));
    let next = reduce(&state, &Action::set_value(root().child("a"), FormValue::from(json!({ "x": 1 }))));
    assert!(next.ptr_eq(&state));
    assert!(node(&next, "form.a").is_control());
    assert_eq!(node(&next, "form.a").value(), &FormValue::from(""));
}

#[test]
fn test_flags_are_broadcast_to_children() {
    let state = form(json!({ "a": "", "b": { "c": "" }, "tags": [""] }));
    let touched = reduce(&state, &Action::mark_as_touched(root()));
    for n in touched.walk() {
        assert!(n.is_touched(), "{} untouched", n.id());
    }

    let disabled = reduce(&state, &Action::disable(root()));
    assert!(disabled.walk().iter().all(|n| n.is_disabled()));

    let one_enabled = reduce(&disabled, &Action::enable(root().child("a")));
    assert!(one_enabled.is_enabled());
    assert!(node(&one_enabled, "form.b").is_disabled());
}

#[test]
fn test_broadcast_when_all_children_already_set_returns_same_state() {
    let state = form(json!({ "a": "", "b": { "c": "" } }));
    let dirty = reduce(&state, &Action::mark_as_dirty(root()));
    assert!(dirty.is_dirty());
    let again = reduce(&dirty, &Action::mark_as_dirty(root()));
    assert!(again.ptr_eq(&dirty));

    let pristine = reduce(&dirty, &Action::mark_as_pristine(root().child("b")));
    assert!(pristine.is_dirty());
    assert!(node(&pristine, "form.b").is_pristine());
}

#[test]
fn test_focus_is_never_applied_to_composites() {
    let state = form(json!({ "name": "" }));
    let same = reduce(&state, &Action::focus(root()));
    assert!(same.ptr_eq(&state));

    let focused = reduce(&state, &Action::focus(root().child("name")));
    assert!(!focused.ptr_eq(&state));
    let leaf = node(&focused, "form.name").as_control().expect("leaf");
    assert!(leaf.is_focused());
    assert!(focused.value().same(state.value()));
}

#[test]
fn test_set_value_on_group_reconciles_keys() {
    let state = form(json!({ "keep": "a", "drop": "b", "nested": { "x": 1 } }));
    let state = reduce(&state, &Action::mark_as_dirty(root().child("keep")));

    let value = FormValue::from(json!({ "keep": "c", "added": [1, 2], "nested": "flat" }));
    let next = reduce(&state, &Action::set_value(root(), value.clone()));

    assert_eq!(next.value(), &value);
    assert!(next.find(&root().child("drop")).is_none());
    let keep = node(&next, "form.keep");
    assert_eq!(keep.value(), &FormValue::from("c"));
    assert!(keep.is_dirty());
    assert!(node(&next, "form.added").is_composite());
    assert_eq!(node(&next, "form.added.1").value(), &FormValue::from(2));
    assert!(node(&next, "form.nested").is_control());
}

#[test]
fn test_set_value_keeps_callers_allocation() {
    let state = form(json!({ "a": "x" }));
    let value = FormValue::from(json!({ "a": "y" }));
    let next = reduce(&state, &Action::set_value(root(), value.clone()));
    assert!(next.value().same(&value));

    let same = reduce(&next, &Action::set_value(root(), value));
    assert!(same.ptr_eq(&next));
}

#[test]
fn test_set_value_with_wrong_shape_is_ignored() {
    let state = form(json!({ "a": "x" }));
    for value in [FormValue::from("scalar"), FormValue::from(json!(["x"]))] {
        let next = reduce(&state, &Action::set_value(root(), value));
        assert!(next.ptr_eq(&state));
    }
}

#[test]
fn test_add_and_remove_group_controls() {
    let state = form(json!({ "a": "" }));
    let added = reduce(&state, &Action::add_control(root(), "b", json!({ "c": true })));
    assert_eq!(node(&added, "form.b.c").value(), &FormValue::from(true));
    assert_eq!(
        added.value(),
        &FormValue::from(json!({ "a": "", "b": { "c": true } }))
    );

    let removed = reduce(&added, &Action::remove_control(root(), "a"));
    assert!(removed.find(&root().child("a")).is_none());
    assert_eq!(removed.value(), &FormValue::from(json!({ "b": { "c": true } })));

    let missing = reduce(&removed, &Action::remove_control(root(), "zzz"));
    assert!(missing.ptr_eq(&removed));
}

#[test]
fn test_removing_an_invalid_child_drops_its_summary() {
    let state = form(json!({ "a": "", "b": "" }));
    let state = reduce(
        &state,
        &Action::set_errors(
            root().child("a"),
            errors(&[("required", FormValue::from(true))]),
        ),
    );
    assert!(state.is_invalid());
    let next = reduce(&state, &Action::remove_control(root(), "a"));
    assert!(next.is_valid());
}

#[test]
fn test_array_insert_and_remove_reidentify_children() {
    let state = form(json!({ "tags": ["a", "b"] }));
    let tags = root().child("tags");
    let state = reduce(&state, &Action::mark_as_touched(tags.index(1)));

    let inserted = reduce(&state, &Action::add_array_control(tags.clone(), "new", Some(0)));
    assert_eq!(
        node(&inserted, "form.tags").value(),
        &FormValue::from(json!(["new", "a", "b"]))
    );
    let moved = node(&inserted, "form.tags.2");
    assert_eq!(moved.value(), &FormValue::from("b"));
    assert!(moved.is_touched());

    let appended = reduce(&inserted, &Action::add_array_control(tags.clone(), "z", None));
    assert_eq!(node(&appended, "form.tags.3").value(), &FormValue::from("z"));

    let removed = reduce(&appended, &Action::remove_array_control(tags.clone(), 0));
    assert_eq!(
        node(&removed, "form.tags").value(),
        &FormValue::from(json!(["a", "b", "z"]))
    );
    for (idx, child) in node(&removed, "form.tags")
        .as_composite()
        .expect("array")
        .controls()
        .states()
        .enumerate()
    {
        assert_eq!(child.id(), &tags.index(idx));
    }
}

#[test]
fn test_out_of_range_array_edits_are_ignored() {
    let state = form(json!({ "tags": ["a"] }));
    let tags = root().child("tags");
    for action in [
        Action::add_array_control(tags.clone(), "x", Some(5)),
        Action::remove_array_control(tags.clone(), 1),
        Action::add_control(tags.clone(), "k", "v"),
        Action::add_array_control(root(), "x", None),
    ] {
        let next = reduce(&state, &action);
        assert!(next.ptr_eq(&state), "{} changed the tree", action.type_name());
    }
}

#[test]
fn test_dotted_keys_are_addressed_exactly() {
    let value = FormValue::group([
        ("a.b", FormValue::from("dotted")),
        ("a", FormValue::group([("b", FormValue::from("nested"))])),
    ]);
    let state = create_form_state(root(), value);
    let dotted = ControlId::from_segments(["form", "a.b"]).expect("id");
    let next = reduce(&state, &Action::set_value(dotted.clone(), "changed"));

    assert_eq!(next.find(&dotted).map(FormState::value), Some(&FormValue::from("changed")));
    assert_eq!(
        node(&next, "form.a.b").value(),
        &FormValue::from("nested")
    );
}

#[test]
fn test_user_defined_property_on_composite() {
    let state = form(json!({ "a": "" }));
    let next = reduce(&state, &Action::set_user_defined_property(root(), "step", 2));
    assert_eq!(
        next.user_defined_properties().get("step"),
        Some(&FormValue::from(2))
    );
    assert!(node(&next, "form.a").ptr_eq(node(&state, "form.a")));
}

#[test]
fn test_typed_entry_points_reject_wrong_kind() {
    let group = form(json!({ "a": "" }));
    let array = form(json!([""]));
    let leaf = form(json!("x"));
    let action = Action::mark_as_dirty(root());

    assert!(form_group_reducer(&group, &action).is_ok());
    assert!(form_array_reducer(&array, &action).is_ok());
    assert!(matches!(
        form_group_reducer(&array, &action),
        Err(ReduceError::NotAGroup { found: "array", .. })
    ));
    assert!(matches!(
        form_array_reducer(&leaf, &action),
        Err(ReduceError::NotAnArray { found: "control", .. })
    ));
    let message = form_group_reducer(&leaf, &action)
        .expect_err("leaf is not a group")
        .to_string();
    assert_eq!(message, "state form must be a group state, found control");
}

#[test]
fn test_reduced_tree_serializes() {
    let state = form(json!({ "name": "" }));
    let state = reduce_all(
        &state,
        &[
            Action::set_value(root().child("name"), "Ada"),
            Action::mark_as_dirty(root().child("name")),
        ],
    );
    insta::assert_json_snapshot!(state.value(), @r#"
    {
      "name": "Ada"
    }
    "#);
    let json = serde_json::to_value(&state).expect("serialize");
    assert_eq!(json["isDirty"], true);
    assert_eq!(json["controls"]["name"]["isPristine"], false);
}

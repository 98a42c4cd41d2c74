#![allow(missing_docs)]

use formstate_model::{Action, ControlId, FormValue, create_form_state};
use formstate_reduce::{form_array_reducer, reduce};

#[test]
fn test_array_set_value_then_submit() {
    let root = ControlId::root("root");
    let state = create_form_state(root.clone(), FormValue::array([FormValue::from("")]));

    let state = form_array_reducer(&state, &Action::set_value(root.index(0), "A")).expect("array");
    assert_eq!(state.value(), &FormValue::array([FormValue::from("A")]));
    let controls = state.as_composite().expect("composite").controls().clone();
    assert_eq!(
        controls.get("0").map(|c| c.value().clone()),
        Some(FormValue::from("A"))
    );

    let submitted =
        form_array_reducer(&state, &Action::mark_as_submitted(root.clone())).expect("array");
    assert!(submitted.is_submitted());
    let child = submitted
        .as_composite()
        .and_then(|c| c.controls().get("0").cloned())
        .expect("child");
    assert_eq!(child.value(), &FormValue::from("A"));
    assert!(child.is_submitted());
    assert!(submitted.value().same(state.value()));
}

#[test]
fn test_clear_async_error_that_is_not_pending() {
    let id = ControlId::root("field");
    let state = create_form_state(id.clone(), FormValue::from(""));
    let state = reduce(&state, &Action::start_async_validation(id.clone(), "min"));
    assert!(state.errors().is_empty());
    assert_eq!(state.pending_validations().iter().collect::<Vec<_>>(), ["min"]);

    let next = reduce(&state, &Action::clear_async_error(id, "required"));
    assert!(next.ptr_eq(&state));
}

#[test]
fn test_action_for_nonexistent_sibling_is_ignored() {
    let id = ControlId::root("form");
    let state = create_form_state(
        id.clone(),
        FormValue::group([
            ("inner", FormValue::from("")),
            ("list", FormValue::array([FormValue::from(1)])),
        ]),
    );
    let sibling = ControlId::root(format!("X{id}"));
    for action in [
        Action::set_value(sibling.clone(), "x"),
        Action::mark_as_dirty(sibling.clone()),
        Action::focus(sibling.clone()),
        Action::add_control(sibling.clone(), "k", "v"),
        Action::set_value(id.child("Xinner"), "x"),
        Action::remove_array_control(id.child("list").child("X0"), 0),
    ] {
        let next = reduce(&state, &action);
        assert!(next.ptr_eq(&state), "{} changed the tree", action.type_name());
    }
}

#[test]
fn test_mark_as_dirty_when_every_child_is_dirty() {
    let id = ControlId::root("form");
    let state = create_form_state(
        id.clone(),
        FormValue::group([("a", FormValue::from("")), ("b", FormValue::from(""))]),
    );
    let state = reduce(&state, &Action::mark_as_dirty(id.child("a")));
    let state = reduce(&state, &Action::mark_as_dirty(id.child("b")));
    assert!(state.is_dirty());

    let next = reduce(&state, &Action::mark_as_dirty(id));
    assert!(next.ptr_eq(&state));
}

#[test]
fn test_async_validation_lifecycle_on_tree_leaf() {
    let root = ControlId::root("form");
    let name = root.child("name");
    let state = create_form_state(root, FormValue::group([("name", FormValue::from(""))]));

    let started = reduce(&state, &Action::start_async_validation(name.clone(), "required"));
    let cleared = reduce(&started, &Action::clear_async_error(name.clone(), "required"));
    let leaf = cleared.find(&name).expect("leaf");
    assert!(leaf.pending_validations().is_empty());
    assert!(!leaf.is_validation_pending());

    let two = reduce(&state, &Action::start_async_validation(name.clone(), "required"));
    let two = reduce(&two, &Action::start_async_validation(name.clone(), "min"));
    let one = reduce(&two, &Action::clear_async_error(name.clone(), "required"));
    let leaf = one.find(&name).expect("leaf");
    assert_eq!(leaf.pending_validations().iter().collect::<Vec<_>>(), ["min"]);
    assert!(leaf.is_validation_pending());
}

//! Recursion into the children of a composite.

use std::sync::Arc;

use formstate_model::{Action, ActionKind, CompositeState, Controls, FormState};
use indexmap::IndexMap;

use crate::reduce_node;

/// Forward `action` into the children when it targets a descendant.
///
/// The composite is only recomputed when some child actually changed.
pub(crate) fn child_reducer(state: &Arc<CompositeState>, action: &Action) -> Arc<CompositeState> {
    if !state.id().is_ancestor_of(&action.control_id) {
        return Arc::clone(state);
    }
    map_controls(state.controls(), |child| reduce_node(child, action)).map_or_else(
        || Arc::clone(state),
        |controls| Arc::new(state.with_controls(controls)),
    )
}

/// Dispatch `kind` to every child, addressed at the child's own id.
pub(crate) fn broadcast(state: &CompositeState, kind: &ActionKind) -> Option<CompositeState> {
    map_controls(state.controls(), |child| {
        reduce_node(child, &Action::new(child.id().clone(), kind.clone()))
    })
    .map(|controls| state.with_controls(controls))
}

/// Apply `f` to every child; `None` when every child came back unchanged.
///
/// Children before the first changed one are shared as-is, so nothing is
/// allocated when no child changes.
fn map_controls(
    controls: &Controls,
    mut f: impl FnMut(&FormState) -> FormState,
) -> Option<Controls> {
    let (first, replaced) = controls.states().enumerate().find_map(|(idx, child)| {
        let next = f(child);
        (!next.ptr_eq(child)).then_some((idx, next))
    })?;
    let next = match controls {
        Controls::Group(map) => {
            let mut next: IndexMap<String, FormState> = IndexMap::with_capacity(map.len());
            let mut entries = map.iter();
            next.extend(
                entries
                    .by_ref()
                    .take(first)
                    .map(|(key, child)| (key.clone(), child.clone())),
            );
            if let Some((key, _)) = entries.next() {
                next.insert(key.clone(), replaced);
            }
            next.extend(entries.map(|(key, child)| (key.clone(), f(child))));
            Controls::Group(Arc::new(next))
        }
        Controls::Array(items) => {
            let mut next = Vec::with_capacity(items.len());
            next.extend_from_slice(&items[..first]);
            next.push(replaced);
            next.extend(items[first + 1..].iter().map(&mut f));
            Controls::Array(Arc::new(next))
        }
    };
    Some(next)
}

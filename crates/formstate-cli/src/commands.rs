use anyhow::Result;
use formstate_cli::session::{ReplayResult, build_tree, load_actions, load_value, replay};
use formstate_model::FormState;
use tracing::info;

use crate::cli::{InspectArgs, ReplayArgs};

pub fn run_inspect(args: &InspectArgs) -> Result<FormState> {
    let value = load_value(&args.tree.value)?;
    let state = build_tree(&args.tree.id, value)?;
    info!(root = %state.id(), nodes = state.walk().len(), "built state tree");
    Ok(state)
}

pub fn run_replay(args: &ReplayArgs) -> Result<ReplayResult> {
    let value = load_value(&args.tree.value)?;
    let actions = load_actions(&args.actions)?;
    let initial = build_tree(&args.tree.id, value)?;
    info!(
        root = %initial.id(),
        actions = actions.len(),
        path = %args.actions.display(),
        "loaded action log"
    );
    Ok(replay(initial, &actions))
}

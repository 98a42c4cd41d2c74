//! Loading inputs and replaying action logs.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use formstate_model::{Action, ControlId, FormState, FormValue, create_form_state};
use formstate_reduce::reduce;
use tracing::{debug, info, info_span};

use crate::logging::redact_value;

/// How an action log file is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLogFormat {
    /// A single JSON array of actions.
    JsonArray,
    /// One JSON action per line; blank lines are skipped.
    JsonLines,
}

impl ActionLogFormat {
    /// Pick the layout from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson") => {
                Self::JsonLines
            }
            _ => Self::JsonArray,
        }
    }
}

/// One applied action.
#[derive(Debug, Clone)]
pub struct ReplayStep {
    pub action_type: &'static str,
    pub control_id: ControlId,
    pub changed: bool,
}

#[derive(Debug)]
pub struct ReplayResult {
    pub initial: FormState,
    pub state: FormState,
    pub steps: Vec<ReplayStep>,
}

impl ReplayResult {
    pub fn applied(&self) -> usize {
        self.steps.len()
    }

    /// Number of actions that produced a new tree.
    pub fn changed(&self) -> usize {
        self.steps.iter().filter(|step| step.changed).count()
    }
}

pub fn parse_value(text: &str) -> Result<FormValue> {
    let json: serde_json::Value = serde_json::from_str(text).context("parse value JSON")?;
    Ok(FormValue::from(json))
}

pub fn parse_actions(text: &str, format: ActionLogFormat) -> Result<Vec<Action>> {
    match format {
        ActionLogFormat::JsonArray => serde_json::from_str(text).context("parse action array"),
        ActionLogFormat::JsonLines => text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).with_context(|| format!("parse action on line {}", idx + 1))
            })
            .collect(),
    }
}

pub fn load_value(path: &Path) -> Result<FormValue> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read value file {}", path.display()))?;
    parse_value(&text).with_context(|| format!("load value from {}", path.display()))
}

pub fn load_actions(path: &Path) -> Result<Vec<Action>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read action log {}", path.display()))?;
    parse_actions(&text, ActionLogFormat::from_path(path))
        .with_context(|| format!("load actions from {}", path.display()))
}

/// Build the initial tree for `value` rooted at the dotted id `root`.
pub fn build_tree(root: &str, value: FormValue) -> Result<FormState> {
    let id = ControlId::parse(root).with_context(|| format!("invalid root id {root:?}"))?;
    Ok(create_form_state(id, value))
}

/// Apply `actions` to `initial` one at a time, recording whether each one
/// changed the tree.
pub fn replay(initial: FormState, actions: &[Action]) -> ReplayResult {
    let span = info_span!("replay", root = %initial.id(), actions = actions.len());
    let _guard = span.enter();
    let mut state = initial.clone();
    let mut steps = Vec::with_capacity(actions.len());
    for (idx, action) in actions.iter().enumerate() {
        let next = reduce(&state, action);
        let changed = !next.ptr_eq(&state);
        debug!(
            step = idx + 1,
            action = action.type_name(),
            control_id = %action.control_id,
            payload = %redact_value(&PayloadDisplay(action)),
            changed,
            "applied action"
        );
        steps.push(ReplayStep {
            action_type: action.type_name(),
            control_id: action.control_id.clone(),
            changed,
        });
        state = next;
    }
    let result = ReplayResult {
        initial,
        state,
        steps,
    };
    info!(
        applied = result.applied(),
        changed = result.changed(),
        valid = result.state.is_valid(),
        "replay finished"
    );
    result
}

/// Action payload rendered as compact JSON.
struct PayloadDisplay<'a>(&'a Action);

impl std::fmt::Display for PayloadDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.0.kind) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str("?"),
        }
    }
}

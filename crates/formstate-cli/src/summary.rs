use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use formstate_cli::session::ReplayResult;
use formstate_model::FormState;

use crate::cli::OutputArg;

pub fn print_state(state: &FormState, output: OutputArg) -> Result<()> {
    match output {
        OutputArg::Table => print_tree_table(state),
        OutputArg::Json => {
            let json = serde_json::to_string_pretty(state).context("serialize state tree")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn print_tree_table(state: &FormState) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Control"),
        header_cell("Kind"),
        header_cell("Value"),
        header_cell("Valid"),
        header_cell("Errors"),
        header_cell("Dirty"),
        header_cell("Touched"),
        header_cell("Submitted"),
        header_cell("Enabled"),
        header_cell("Pending"),
    ]);
    apply_tree_table_style(&mut table);
    for column in 3..10 {
        if column != 4 {
            align_column(&mut table, column, CellAlignment::Center);
        }
    }
    let root_depth = state.id().depth();
    for node in state.walk() {
        let indent = "  ".repeat(node.id().depth() - root_depth);
        table.add_row(vec![
            id_cell(node, &indent),
            dim_cell(kind_label(node)),
            value_cell(node),
            valid_cell(node.is_valid()),
            errors_cell(node),
            flag_cell(node.is_dirty(), Color::Yellow),
            flag_cell(node.is_touched(), Color::Yellow),
            flag_cell(node.is_submitted(), Color::Green),
            flag_cell(node.is_enabled(), Color::Green),
            pending_cell(node),
        ]);
    }
    println!("{table}");
}

pub fn print_replay_summary(result: &ReplayResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Action"),
        header_cell("Control"),
        header_cell("Changed"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for (idx, step) in result.steps.iter().enumerate() {
        table.add_row(vec![
            dim_cell(idx + 1),
            Cell::new(step.action_type),
            Cell::new(step.control_id.to_string()),
            flag_cell(step.changed, Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} applied", result.applied())).add_attribute(Attribute::Bold),
        dim_cell(format!("root {}", result.state.id())),
        Cell::new(format!("{} changed", result.changed())).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("{table}");
    let unchanged = result.state.ptr_eq(&result.initial);
    println!(
        "Root: {}{}",
        if result.state.is_valid() { "valid" } else { "invalid" },
        if unchanged { " (unchanged)" } else { "" }
    );
}

fn kind_label(node: &FormState) -> &'static str {
    node.as_composite()
        .map_or("control", |composite| composite.kind().as_str())
}

fn id_cell(node: &FormState, indent: &str) -> Cell {
    let cell = Cell::new(format!("{indent}{}", node.id().last()));
    if node.is_composite() {
        cell.fg(Color::Blue).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn value_cell(node: &FormState) -> Cell {
    if node.is_composite() {
        dim_cell("-")
    } else if node.value().is_null() {
        dim_cell("null")
    } else {
        Cell::new(node.value().to_string())
    }
}

fn valid_cell(valid: bool) -> Cell {
    if valid {
        Cell::new("✓").fg(Color::Green)
    } else {
        Cell::new("✗")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn errors_cell(node: &FormState) -> Cell {
    let own: Vec<&str> = node
        .errors()
        .own_entries()
        .map(|(key, _)| key)
        .collect();
    if own.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(own.join(", ")).fg(Color::Red)
    }
}

fn pending_cell(node: &FormState) -> Cell {
    let pending: Vec<&str> = node.pending_validations().iter().collect();
    if pending.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(pending.join(", ")).fg(Color::Yellow)
    }
}

fn flag_cell(set: bool, color: Color) -> Cell {
    if set {
        Cell::new("✓").fg(color)
    } else {
        dim_cell("-")
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_tree_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

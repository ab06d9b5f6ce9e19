//! Synthesized columns: fixed values, concatenation formulas, and
//! first-match conditional rules.
//!
//! Evaluation is total. A malformed condition, an unknown column, or an
//! unsupported operator makes a rule false; it never aborts the recipe.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::Table;
use crate::recipe::{ColumnSource, ConditionalRule, NewColumn};

/// The only condition grammar accepted: `[Column] OP 'literal'` with OP
/// one of `===`, `!==`, `==`, `!=` and a single- or double-quoted
/// literal. Deliberately a fixed grammar, not an expression evaluator.
static CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*\[([^\]]+)\]\s*(===|!==|==|!=)\s*(?:'([^']*)'|"([^"]*)")\s*$"#).unwrap()
});

/// `+` concatenation operators left behind after placeholder substitution.
static CONCAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\+\s*").unwrap());

/// Append one header and one value per row for each new column.
///
/// Values are computed against the table's original headers and cells,
/// so columns synthesized in the same pass cannot reference each other.
/// Rows are normalized to the header width first so the appended cells
/// line up with the appended headers.
pub fn add_columns(table: &Table, new_columns: &[NewColumn]) -> Table {
    if new_columns.is_empty() {
        return table.clone();
    }

    let mut out = table.clone();
    for column in new_columns {
        out.headers.push(column.name.clone());
    }

    let width = table.headers.len();
    for (row_idx, row) in out.rows.iter_mut().enumerate() {
        row.resize(width, String::new());
        for column in new_columns {
            row.push(evaluate(&column.source, table, row_idx));
        }
    }

    out
}

fn evaluate(source: &ColumnSource, table: &Table, row_idx: usize) -> String {
    match source {
        ColumnSource::Fixed { value } => value.clone(),
        ColumnSource::Formula { expression } => evaluate_formula(expression, table, row_idx),
        ColumnSource::Conditional { rules } => evaluate_rules(rules, table, row_idx),
    }
}

/// Substitute `[Header]` placeholders with the row's cells, then reduce
/// the quote-and-plus concatenation syntax: all quote characters are
/// stripped and `+` operators collapse to adjacency. Placeholders naming
/// unknown headers are left as literal text.
fn evaluate_formula(expression: &str, table: &Table, row_idx: usize) -> String {
    let mut value = expression.to_string();

    for (col, header) in table.headers.iter().enumerate() {
        let placeholder = format!("[{header}]");
        if value.contains(&placeholder) {
            value = value.replace(&placeholder, table.cell(row_idx, col));
        }
    }

    let unquoted: String = value.chars().filter(|c| *c != '\'' && *c != '"').collect();
    CONCAT_RE.replace_all(&unquoted, "").into_owned()
}

/// First rule whose condition holds wins; no match yields "".
fn evaluate_rules(rules: &[ConditionalRule], table: &Table, row_idx: usize) -> String {
    rules
        .iter()
        .find(|rule| evaluate_condition(&rule.condition, table, row_idx))
        .map(|rule| rule.value.clone())
        .unwrap_or_default()
}

fn evaluate_condition(condition: &str, table: &Table, row_idx: usize) -> bool {
    let Some(caps) = CONDITION_RE.captures(condition) else {
        return false;
    };
    let Some(col) = table.column_index(&caps[1]) else {
        return false;
    };

    let actual = table.cell(row_idx, col);
    let literal = caps
        .get(3)
        .or_else(|| caps.get(4))
        .map(|m| m.as_str())
        .unwrap_or("");

    match &caps[2] {
        "===" | "==" => actual == literal,
        _ => actual != literal,
    }
}

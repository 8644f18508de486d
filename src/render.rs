// src/render.rs

use crate::sink::{AncestorRow, RowId, TreeModel};
use serde::Serialize;
use std::io::{self, Write};

const INDENT: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    /// Print the birth and death lines of each tooltip under the row
    pub tooltips: bool,
}

/// Writes the fully expanded tree as aligned text columns
pub fn render_text<W: Write>(model: &TreeModel, options: TextOptions, out: &mut W) -> io::Result<()> {
    let order = model.walk();
    let name_width = order
        .iter()
        .filter_map(|&id| model.row(id))
        .map(|row| indent_of(row) + row.label.chars().count())
        .max()
        .unwrap_or(0);

    for id in order {
        let Some(row) = model.row(id) else { continue };
        let pad = indent_of(row);
        let line = format!("{:pad$}{}", "", row.label, pad = pad);
        if row.birth_date.is_empty() {
            writeln!(out, "{}", line)?;
        } else {
            writeln!(out, "{:<width$}  {}", line, row.birth_date, width = name_width)?;
        }

        if options.tooltips {
            for detail in [&row.birth_text, &row.death_text] {
                if !detail.is_empty() {
                    writeln!(out, "{:pad$}{}", "", detail, pad = pad + INDENT * 2)?;
                }
            }
        }
    }
    Ok(())
}

fn indent_of(row: &AncestorRow) -> usize {
    row.depth.saturating_sub(1) * INDENT
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a AncestorRow,
    ancestors: Vec<JsonRow<'a>>,
}

fn json_row(model: &TreeModel, id: RowId) -> Option<JsonRow<'_>> {
    Some(JsonRow {
        row: model.row(id)?,
        ancestors: model
            .children(id)
            .iter()
            .filter_map(|&child| json_row(model, child))
            .collect(),
    })
}

/// Writes the tree as nested JSON rows
pub fn render_json<W: Write>(model: &TreeModel, out: &mut W) -> io::Result<()> {
    let roots: Vec<JsonRow<'_>> = model
        .roots()
        .iter()
        .filter_map(|&id| json_row(model, id))
        .collect();
    serde_json::to_writer_pretty(&mut *out, &roots)?;
    writeln!(out)
}

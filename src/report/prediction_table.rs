//! Table rendering for uploads and prediction results

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::*;

use crate::pipeline::{
    column_values, BatchOutcome, Category, RawValue, CATEGORY_COLUMN, PREDICTION_COLUMN,
};

/// Rows shown in the upload preview
pub const PREVIEW_ROWS: usize = 5;

fn format_value(value: &RawValue, is_prediction: bool) -> String {
    match value {
        RawValue::Number(v) if is_prediction => format!("{:.2}", v),
        other => other.to_string(),
    }
}

fn category_color(text: &str) -> Color {
    match Category::ALL.iter().find(|c| c.as_str() == text) {
        Some(Category::LowIncomeHighBuy) => Color::Green,
        Some(Category::HighIncomeHighBuy) => Color::Cyan,
        Some(Category::LowIncomeLowBuy) => Color::Yellow,
        Some(Category::HighIncomeLowBuy) => Color::Magenta,
        None => Color::White,
    }
}

/// Build a table of the first `max_rows` rows of a frame
pub fn frame_table(df: &DataFrame, max_rows: Option<usize>) -> Result<Table> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    table.set_header(
        names
            .iter()
            .map(|n| Cell::new(n).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    let columns = df
        .get_columns()
        .iter()
        .map(column_values)
        .collect::<Result<Vec<_>>>()?;

    let rows = max_rows.map_or(df.height(), |m| m.min(df.height()));
    for row in 0..rows {
        let cells: Vec<Cell> = names
            .iter()
            .zip(&columns)
            .map(|(name, values)| {
                let text = format_value(&values[row], name == PREDICTION_COLUMN);
                if name == CATEGORY_COLUMN {
                    let color = category_color(&text);
                    Cell::new(text).fg(color)
                } else {
                    Cell::new(text)
                }
            })
            .collect();
        table.add_row(cells);
    }

    Ok(table)
}

/// Print a table indented to line up with the step output
pub fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

/// Show the first rows of an upload
pub fn print_preview(df: &DataFrame) -> Result<()> {
    println!(
        "\n    {} {}",
        style("✧").cyan(),
        style("Uploaded Data Preview").white().bold()
    );
    print_indented(&frame_table(df, Some(PREVIEW_ROWS))?);
    Ok(())
}

/// Show the result columns of a batch run
pub fn print_results(outcome: &BatchOutcome, max_rows: Option<usize>) -> Result<()> {
    let title = match outcome.labels {
        Some(_) => "Labeled Predictions",
        None => "Predictions",
    };
    println!("\n    {} {}", style("✧").cyan(), style(title).white().bold());

    let display = outcome.display_frame()?;
    print_indented(&frame_table(&display, max_rows)?);

    if let Some(limit) = max_rows {
        if outcome.row_count() > limit {
            println!(
                "    {}",
                style(format!("... {} more row(s) in the output file", outcome.row_count() - limit)).dim()
            );
        }
    }
    Ok(())
}

//! Segment summary shown after a labeled batch run

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{BatchOutcome, Category, Thresholds};

/// Per-category counts and timings of a batch run
#[derive(Debug, Default)]
pub struct SegmentSummary {
    pub total_rows: usize,
    pub counts: Vec<(Category, usize)>,
    pub thresholds: Option<Thresholds>,
    pub load_time: Option<Duration>,
    pub predict_time: Option<Duration>,
    pub save_time: Option<Duration>,
}

impl SegmentSummary {
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            total_rows: outcome.row_count(),
            counts: outcome.category_counts(),
            thresholds: outcome.labels.as_ref().map(|l| l.thresholds),
            ..Default::default()
        }
    }

    pub fn set_load_time(&mut self, duration: Duration) {
        self.load_time = Some(duration);
    }

    pub fn set_predict_time(&mut self, duration: Duration) {
        self.predict_time = Some(duration);
    }

    pub fn set_save_time(&mut self, duration: Duration) {
        self.save_time = Some(duration);
    }

    fn share(&self, count: usize) -> f64 {
        if self.total_rows > 0 {
            count as f64 / self.total_rows as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SEGMENT SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Segment").add_attribute(Attribute::Bold),
            Cell::new("Customers").add_attribute(Attribute::Bold),
            Cell::new("Share").add_attribute(Attribute::Bold),
        ]);

        for (category, count) in &self.counts {
            let color = if category.is_high_buy() {
                Color::Green
            } else {
                Color::Yellow
            };
            table.add_row(vec![
                Cell::new(category.as_str()),
                Cell::new(count).fg(color),
                Cell::new(format!("{:.1}%", self.share(*count))),
            ]);
        }

        table.add_row(vec![
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(self.total_rows)
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new("100.0%"),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if let Some(t) = &self.thresholds {
            println!();
            println!(
                "      {} income < {}, purchases > {}",
                style("Median thresholds:").dim(),
                style(format!("{:.2}", t.income)).yellow(),
                style(format!("{:.2}", t.purchase)).yellow()
            );
        }

        let timings = [
            ("load", self.load_time),
            ("predict", self.predict_time),
            ("save", self.save_time),
        ];
        let parts: Vec<String> = timings
            .iter()
            .filter_map(|(name, d)| d.map(|d| format!("{} {:.2}s", name, d.as_secs_f64())))
            .collect();
        if !parts.is_empty() {
            println!("      {} {}", style("Timings:").dim(), parts.join(" · "));
        }
    }
}

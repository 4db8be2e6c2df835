//! Processing summary report generation

use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::ProcessedData;

/// What happened to one split during a processing run
#[derive(Debug, Clone, Default)]
pub struct SplitSummary {
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub encoded_columns: Vec<String>,
    pub transformed_columns: Vec<String>,
    pub rows_balanced: usize,
    pub output: PathBuf,
}

impl SplitSummary {
    pub fn new(
        raw: &DataFrame,
        processed: &ProcessedData,
        balanced: &DataFrame,
        output: PathBuf,
    ) -> Self {
        Self {
            rows_loaded: raw.height(),
            duplicates_removed: processed.duplicates_removed,
            encoded_columns: processed.label_mappings.keys().cloned().collect(),
            transformed_columns: processed.transformed_columns(),
            rows_balanced: balanced.height(),
            output,
        }
    }

    /// Rows added by SMOTE
    pub fn synthetic_rows(&self) -> usize {
        self.rows_balanced
            .saturating_sub(self.rows_loaded - self.duplicates_removed)
    }
}

/// Summary of a full train/test processing run
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub train: SplitSummary,
    pub test: SplitSummary,
    /// Categorical columns whose label → code mapping differs between the splits
    pub diverging_mappings: Vec<String>,
}

impl ProcessingSummary {
    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PROCESSING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Train").add_attribute(Attribute::Bold),
            Cell::new("Test").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Rows Loaded"),
            Cell::new(self.train.rows_loaded),
            Cell::new(self.test.rows_loaded),
        ]);

        let dup_color = |n: usize| if n == 0 { Color::White } else { Color::Red };
        table.add_row(vec![
            Cell::new("🗑️  Duplicates Removed"),
            Cell::new(self.train.duplicates_removed).fg(dup_color(self.train.duplicates_removed)),
            Cell::new(self.test.duplicates_removed).fg(dup_color(self.test.duplicates_removed)),
        ]);

        table.add_row(vec![
            Cell::new("🔤 Encoded Columns"),
            Cell::new(self.train.encoded_columns.len()),
            Cell::new(self.test.encoded_columns.len()),
        ]);

        table.add_row(vec![
            Cell::new("📉 Log1p Columns"),
            Cell::new(self.train.transformed_columns.len()).fg(Color::Yellow),
            Cell::new(self.test.transformed_columns.len()).fg(Color::Yellow),
        ]);

        table.add_row(vec![
            Cell::new("🧪 Synthetic Rows"),
            Cell::new(self.train.synthetic_rows()).fg(Color::Cyan),
            Cell::new(self.test.synthetic_rows()).fg(Color::Cyan),
        ]);

        table.add_row(vec![
            Cell::new("✅ Final Rows"),
            Cell::new(self.train.rows_balanced)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            Cell::new(self.test.rows_balanced)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        let mut transformed: Vec<&String> = self
            .train
            .transformed_columns
            .iter()
            .chain(self.test.transformed_columns.iter())
            .collect();
        transformed.sort();
        transformed.dedup();

        if !transformed.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("LOG1P TRANSFORMED").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for column in transformed {
                println!("        {} {}", style("•").dim(), column);
            }
        }

        if !self.diverging_mappings.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("⚠️").yellow(),
                style("MAPPINGS DIFFER BETWEEN SPLITS").yellow().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());
            for column in &self.diverging_mappings {
                println!("        {} {}", style("•").dim(), column);
            }
        }

        println!();
        println!("    Train → {}", style(self.train.output.display()).dim());
        println!("    Test  → {}", style(self.test.output.display()).dim());
    }
}

//! Preparation summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::error::Result;
use crate::pipeline::{LabelVector, PreparedSplits};

/// Class share of one subset
#[derive(Debug, Clone, PartialEq)]
pub struct ClassShare {
    pub class: String,
    pub train_fraction: f64,
    pub eval_fraction: f64,
}

/// Summary of a preprocessing run
#[derive(Debug, Default)]
pub struct PreparationSummary {
    pub raw_rows: usize,
    pub clean_rows: usize,
    pub features: usize,
    pub train_rows: usize,
    pub eval_rows: usize,
    pub dropped_columns: Vec<String>,
    pub dropped_rows: usize,
    pub constant_columns: Vec<String>,
    pub class_shares: Vec<ClassShare>,
}

impl PreparationSummary {
    pub fn from_splits(splits: &PreparedSplits) -> Result<Self> {
        let train_keys = splits.train_labels.class_keys()?;
        let eval_keys = splits.eval_labels.class_keys()?;
        let classes = union_classes(&splits.train_labels, &splits.eval_labels)?;

        let class_shares = classes
            .into_iter()
            .map(|class| ClassShare {
                train_fraction: share(&train_keys, &class),
                eval_fraction: share(&eval_keys, &class),
                class,
            })
            .collect();

        Ok(Self {
            raw_rows: splits.raw_rows,
            clean_rows: splits.clean_rows,
            features: splits.train.n_features(),
            train_rows: splits.train.n_rows(),
            eval_rows: splits.eval.n_rows(),
            dropped_columns: splits.dropped_columns.clone(),
            dropped_rows: splits.dropped_rows,
            constant_columns: splits
                .scaler
                .constant_columns()
                .into_iter()
                .map(String::from)
                .collect(),
            class_shares,
        })
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("PREPARATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.raw_rows)]);
        table.add_row(vec![
            Cell::new("🗑️  Rows Dropped (Missing)"),
            Cell::new(self.dropped_rows).fg(if self.dropped_rows == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🧹 Columns Dropped"),
            Cell::new(self.dropped_columns.len()).fg(if self.dropped_columns.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("🔢 Features"), Cell::new(self.features)]);
        table.add_row(vec![
            Cell::new("🏋️ Train Rows"),
            Cell::new(self.train_rows)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("🧪 Eval Rows"),
            Cell::new(self.eval_rows)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for share in &self.class_shares {
            table.add_row(vec![
                Cell::new(format!("⚖️  Class '{}'", share.class)),
                Cell::new(format!(
                    "train {:.1}% / eval {:.1}%",
                    share.train_fraction * 100.0,
                    share.eval_fraction * 100.0
                ))
                .fg(Color::Cyan),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.dropped_columns.is_empty() || !self.constant_columns.is_empty() {
            println!();
            if !self.dropped_columns.is_empty() {
                println!(
                    "      {} {}:",
                    style("Dropped Columns").yellow(),
                    style(format!("({})", self.dropped_columns.len())).dim()
                );
                for column in &self.dropped_columns {
                    println!("        {} {}", style("•").dim(), display_name(column));
                }
            }
            if !self.constant_columns.is_empty() {
                println!(
                    "      {} {}:",
                    style("Constant in Training (centered only)").yellow(),
                    style(format!("({})", self.constant_columns.len())).dim()
                );
                for column in &self.constant_columns {
                    println!("        {} {}", style("•").dim(), column);
                }
            }
        }
    }
}

fn union_classes(a: &LabelVector, b: &LabelVector) -> Result<Vec<String>> {
    let mut classes = a.classes()?;
    for class in b.classes()? {
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    classes.sort();
    Ok(classes)
}

fn share(keys: &[String], class: &str) -> f64 {
    if keys.is_empty() {
        return 0.0;
    }
    keys.iter().filter(|k| k.as_str() == class).count() as f64 / keys.len() as f64
}

fn display_name(column: &str) -> String {
    if column.trim().is_empty() {
        "<unnamed>".to_string()
    } else {
        column.to_string()
    }
}

//! Top contributing features report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::explain::{Direction, RankedAttributions};

/// Plain-text lines: `"{rank}. {feature}: {score:.4} {arrow}"`
pub fn format_ranked_list(ranked: &RankedAttributions) -> Vec<String> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{}. {}: {:.4} {}",
                i + 1,
                entry.feature,
                entry.score,
                entry.direction().arrow()
            )
        })
        .collect()
}

/// Terminal table of a ranked attribution summary
pub struct AttributionReport<'a> {
    pub ranked: &'a RankedAttributions,
    /// Samples aggregated into the scores
    pub samples: usize,
}

impl<'a> AttributionReport<'a> {
    pub fn new(ranked: &'a RankedAttributions, samples: usize) -> Self {
        Self { ranked, samples }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("🔎").cyan(),
            style(format!("TOP {} SHAP FEATURES", self.ranked.len()))
                .white()
                .bold()
        );
        println!(
            "    {}",
            style(format!("mean |attribution| over {} sample(s)", self.samples)).dim()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Mean |SHAP|").add_attribute(Attribute::Bold),
            Cell::new("Direction").add_attribute(Attribute::Bold),
        ]);

        for (i, entry) in self.ranked.iter().enumerate() {
            let direction = entry.direction();
            let color = match direction {
                Direction::Positive => Color::Red,
                Direction::Negative => Color::Green,
                Direction::Neutral => Color::White,
            };
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(&entry.feature),
                Cell::new(format!("{:.4}", entry.score))
                    .set_alignment(CellAlignment::Right)
                    .fg(Color::Yellow),
                Cell::new(format!("{} {:+.4}", direction.arrow(), entry.mean_signed)).fg(color),
            ]);
        }

        for line in table.to_string().lines() {
            println!("    {}", line);
        }
    }
}

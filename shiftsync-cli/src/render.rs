//! Colored terminal rendering for shiftsync types.

use owo_colors::OwoColorize;
use shiftsync_core::ShiftEntity;
use shiftsync_core::reconcile::{Outcome, ReconcileCounts, ShiftReport};

pub trait Render {
    fn render(&self) -> String;
}

fn shift_time(shift: &ShiftEntity) -> String {
    format!(
        "{} → {}",
        shift.start().format("%a %Y-%m-%d %H:%M"),
        shift.end().format("%H:%M")
    )
}

impl Render for ShiftEntity {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.title().bold(),
            shift_time(self).dimmed(),
            format!("({})", self.color()).dimmed()
        )
    }
}

impl Render for Outcome {
    fn render(&self) -> String {
        let symbol = self.symbol();
        match self {
            Outcome::Inserted => symbol.green().to_string(),
            Outcome::Updated => symbol.yellow().to_string(),
            Outcome::Renamed => symbol.cyan().to_string(),
        }
    }
}

impl Render for ShiftReport {
    fn render(&self) -> String {
        let time = shift_time(&self.shift);
        match &self.result {
            Ok(outcome) => format!(
                "{} {} {} {}",
                outcome.render(),
                self.shift.title(),
                time.dimmed(),
                format!("({})", outcome).dimmed()
            ),
            Err(e) => format!(
                "{} {} {} {}",
                "!".red(),
                self.shift.title().red(),
                time.dimmed(),
                e.to_string().red()
            ),
        }
    }
}

impl Render for ReconcileCounts {
    fn render(&self) -> String {
        let mut parts = vec![
            format!("{} inserted", self.inserted).green().to_string(),
            format!("{} updated", self.updated).yellow().to_string(),
            format!("{} renamed", self.renamed).cyan().to_string(),
        ];
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed).red().to_string());
        }
        parts.join(", ")
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("shift", 1), "shift");
        assert_eq!(pluralize("shift", 0), "shifts");
        assert_eq!(pluralize("view", 2), "views");
    }

    #[test]
    fn test_counts_mention_failures_only_when_present() {
        let clean = ReconcileCounts {
            inserted: 2,
            ..Default::default()
        };
        assert!(!clean.render().contains("failed"));

        let failing = ReconcileCounts {
            failed: 1,
            ..Default::default()
        };
        assert!(failing.render().contains("1 failed"));
    }

    #[test]
    fn test_outcome_symbols() {
        assert!(Outcome::Inserted.render().contains('+'));
        assert!(Outcome::Updated.render().contains('~'));
        assert!(Outcome::Renamed.render().contains('»'));
    }
}

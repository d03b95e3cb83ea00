//! Terminal summary output.
//!
//! Log lines describe each step of a run; this module prints the short,
//! colored recap on stdout once the run is over.

use crate::file_organizer::RunReport;
use colored::*;

/// Prints run results with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the per-category table and the moved/skipped totals.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::file_organizer::RunReport;
    /// use dirsort::output::OutputFormatter;
    ///
    /// OutputFormatter::summary_table(&RunReport::default(), false);
    /// ```
    pub fn summary_table(report: &RunReport, dry_run: bool) {
        Self::header(if dry_run { "DRY RUN SUMMARY" } else { "SUMMARY" });

        let max_category_len = report
            .by_category
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        // BTreeMap keeps categories sorted.
        for (category, count) in &report.by_category {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word(*count),
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        let moved_label = if dry_run { "Would move" } else { "Moved" };
        println!(
            "{:<width$} | {} {}",
            moved_label.bold(),
            report.moved.to_string().green().bold(),
            file_word(report.moved),
            width = max_category_len
        );
        println!(
            "{:<width$} | {} {}",
            "Skipped".bold(),
            report.skipped.to_string().yellow().bold(),
            file_word(report.skipped),
            width = max_category_len
        );

        if dry_run {
            Self::success("Dry run complete. No files were modified.");
        } else if report.skipped > 0 {
            Self::warning("Some files were skipped. Please review the log above.");
        } else {
            Self::success("Organization complete!");
        }
    }
}

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

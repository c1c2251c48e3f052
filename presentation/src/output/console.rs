//! Console output formatter for the record listing and message log

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use finder_domain::Human;
use finder_domain::core::string::{single_line, truncate};

const ALLERGIES_YES: &str = "⚠️ Yes";
const ALLERGIES_NO: &str = "✅ No";

/// Widest bio cell before truncation
const BIO_WIDTH: usize = 48;

/// Formats records and completed messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the record table
    pub fn format_records(records: &[Human]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No humans found.".dimmed());
        }

        let headers = ["First Name", "Last Name", "DOB", "Allergies?", "Bio"];
        let rows: Vec<[String; 5]> = records.iter().map(Self::row).collect();

        let mut widths = headers.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut output = String::new();
        output.push_str(&Self::header("Humans"));
        output.push('\n');

        let header_line = headers
            .iter()
            .zip(widths.iter())
            .map(|(h, w)| pad(h, *w))
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&format!("{}\n", header_line.trim_end().cyan().bold()));
        output.push_str(&format!(
            "{}\n",
            "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1))
        ));

        for row in &rows {
            let line = row
                .iter()
                .zip(widths.iter())
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = pad(cell, *w);
                    if i == 3 && cell == ALLERGIES_YES {
                        padded.yellow().to_string()
                    } else {
                        padded
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{}\n",
            format!("{} record(s)", records.len()).dimmed()
        ));
        output
    }

    /// Format records as a pretty JSON array
    pub fn format_records_json(records: &[Human]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format the completed-message log, oldest first
    pub fn format_history(log: &[String]) -> String {
        if log.is_empty() {
            return format!("{}\n", "No messages yet.".dimmed());
        }

        let mut output = String::new();
        for (i, message) in log.iter().enumerate() {
            output.push_str(&format!("{}\n", format!("── #{} ──", i + 1).yellow().bold()));
            output.push_str(message);
            output.push_str("\n\n");
        }
        output
    }

    fn row(human: &Human) -> [String; 5] {
        let allergies = if human.has_allergies {
            ALLERGIES_YES
        } else {
            ALLERGIES_NO
        };
        [
            human.first_name.clone(),
            human.last_name.clone(),
            human.date_of_birth.clone(),
            allergies.to_string(),
            truncate(&single_line(&human.bio), BIO_WIDTH),
        ]
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

impl OutputFormatter for ConsoleFormatter {
    fn format_records(&self, records: &[Human]) -> String {
        Self::format_records(records)
    }

    fn format_records_json(&self, records: &[Human]) -> String {
        Self::format_records_json(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finder_domain::OutputFormat;

    fn human(first: &str, allergies: bool, bio: &str) -> Human {
        Human {
            id: 1,
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: "1990-03-12".to_string(),
            has_allergies: allergies,
            bio: bio.to_string(),
        }
    }

    #[test]
    fn test_table_contains_columns_and_rows() {
        let records = vec![
            human("Jane", true, "Loves hiking"),
            human("John", false, "Quiet\nhome body"),
        ];
        let output = ConsoleFormatter::format_records(&records);

        assert!(output.contains("First Name"));
        assert!(output.contains("Allergies?"));
        assert!(output.contains("Jane"));
        assert!(output.contains(ALLERGIES_YES));
        assert!(output.contains(ALLERGIES_NO));
        assert!(output.contains("Quiet home body"));
        assert!(output.contains("2 record(s)"));
    }

    #[test]
    fn test_long_bio_is_truncated() {
        let bio = "word ".repeat(40);
        let output = ConsoleFormatter::format_records(&[human("Jane", false, &bio)]);
        assert!(output.contains("..."));
        assert!(!output.contains(bio.trim()));
    }

    #[test]
    fn test_empty_listing() {
        assert!(ConsoleFormatter::format_records(&[]).contains("No humans found."));
    }

    #[test]
    fn test_json_uses_wire_field_names() {
        let output = ConsoleFormatter::format_records_json(&[human("Jane", true, "")]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["firstName"], "Jane");
        assert_eq!(value[0]["hasAllergies"], true);
    }

    #[test]
    fn test_render_dispatches_on_format() {
        let records = [human("Jane", false, "")];
        let json = ConsoleFormatter.render(&records, OutputFormat::Json);
        assert!(json.trim_start().starts_with('['));
        let table = ConsoleFormatter.render(&records, OutputFormat::Table);
        assert!(table.contains("First Name"));
    }

    #[test]
    fn test_history_numbers_messages() {
        let output = ConsoleFormatter::format_history(&["first".into(), "second".into()]);
        assert!(output.contains("#1"));
        assert!(output.contains("#2"));
        assert!(output.find("first") < output.find("second"));
        assert!(ConsoleFormatter::format_history(&[]).contains("No messages yet."));
    }
}

//! Output formatter trait

use finder_domain::{Human, OutputFormat};

/// Trait for formatting the record listing
pub trait OutputFormatter {
    /// Format records as a human-readable table
    fn format_records(&self, records: &[Human]) -> String;

    /// Format records as JSON
    fn format_records_json(&self, records: &[Human]) -> String;

    /// Format records in the requested format
    fn render(&self, records: &[Human], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.format_records(records),
            OutputFormat::Json => self.format_records_json(records),
        }
    }
}

//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for record listings
///
/// This is a domain concept representing how records should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Column-aligned table (default)
    #[default]
    Table,
    /// JSON output
    Json,
}

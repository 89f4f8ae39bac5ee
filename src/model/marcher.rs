//! Marcher model.
//!
//! A marcher is one performer in the drill, identified on the field by a
//! drill number (section prefix + order, e.g. "T1").

use serde::{Deserialize, Serialize};

/// A performer in the drill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marcher {
    /// Row ID. Stable across undo/redo of deletes.
    pub id: i64,

    /// Optional display name
    pub name: Option<String>,

    /// Instrument section (e.g. "Trumpet")
    pub section: String,

    /// Optional class year
    pub year: Option<String>,

    /// Free-form notes
    pub notes: Option<String>,

    /// Drill number prefix (e.g. "T")
    pub drill_prefix: String,

    /// Position within the prefix (e.g. 1)
    pub drill_order: i64,

    /// Rendered drill number, unique across the file (e.g. "T1")
    pub drill_number: String,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

impl Marcher {
    /// Render a drill number from its parts.
    #[must_use]
    pub fn drill_number_for(prefix: &str, order: i64) -> String {
        format!("{prefix}{order}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_number_rendering() {
        assert_eq!(Marcher::drill_number_for("T", 1), "T1");
        assert_eq!(Marcher::drill_number_for("BD", 12), "BD12");
    }
}

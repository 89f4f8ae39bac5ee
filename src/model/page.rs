//! Page, placement, and appearance models.

use serde::{Deserialize, Serialize};

/// Default coordinate assigned when a placement is auto-created.
pub const DEFAULT_COORDINATE: (f64, f64) = (100.0, 100.0);

/// One drill page: a set of counts the performers move through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Row ID
    pub id: i64,

    /// Number of counts to reach this page
    pub counts: i64,

    /// True if this page subdivides the previous one
    pub is_subset: bool,

    /// Free-form notes
    pub notes: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// The coordinate of one marcher on one page.
///
/// Exactly one exists per (marcher, page) pair; they are created
/// automatically with the marcher or the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarcherPage {
    /// Row ID
    pub id: i64,

    /// Owning marcher
    pub marcher_id: i64,

    /// Owning page
    pub page_id: i64,

    /// Field X coordinate
    pub x: f64,

    /// Field Y coordinate
    pub y: f64,

    /// Choreography notes for this placement
    pub notes: Option<String>,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Rendering overrides for one instrument section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionAppearance {
    /// Row ID
    pub id: i64,

    /// Section name, unique per file
    pub section: String,

    /// Fill color (e.g. "rgba(0, 0, 0, 1)")
    pub fill_color: String,

    /// Outline color
    pub outline_color: String,

    /// Creation timestamp (RFC 3339)
    pub created_at: String,

    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

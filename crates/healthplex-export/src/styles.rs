use serde::{Deserialize, Serialize};

/// Fonts, sizes and margins of generated documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    pub body_font: String,
    pub heading_font: String,

    /// Point sizes.
    pub body_size: usize,
    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,

    /// Applied to all four page edges.
    pub margin_inches: f64,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            body_font: "Calibri".to_string(),
            heading_font: "Calibri".to_string(),
            body_size: 11,
            heading1_size: 18,
            heading2_size: 14,
            heading3_size: 12,
            margin_inches: 0.75,
        }
    }
}

//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Book resolution constants.
pub mod resolver {
    /// Minimum similarity score (0-100 scale) for accepting a fuzzy book match.
    pub const MIN_MATCH_SCORE: f64 = 80.0;
}

/// Context window constants.
pub mod context {
    /// Default number of verses shown on each side of the target verse.
    pub const DEFAULT_WINDOW: u32 = 2;
}

/// Rendering and pagination constants.
pub mod render {
    /// Rows shown per page when paginating long result sets.
    pub const PAGE_SIZE: usize = 10;

    /// Reference column width in the two-column verse table.
    pub const REFERENCE_COLUMN_WIDTH: usize = 18;

    /// Minimum text column width after subtracting the reference column.
    pub const MIN_TEXT_WIDTH: usize = 20;

    /// Fallback terminal width when size detection fails.
    pub const FALLBACK_TERMINAL_WIDTH: usize = 100;
}

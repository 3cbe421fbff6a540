use thiserror::Error;

/// Errors surfaced before any layout work starts. Once sampling begins the
/// engine only degrades locally (clamping), it never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Zero sectors, zero rings, or an unusable drawing area.
    #[error("invalid radar configuration: {0}")]
    InvalidConfiguration(String),

    /// A blip names a sector that is not in the declared sector list.
    #[error("blip `{blip}` references unknown sector `{sector}`")]
    UnknownSector { blip: String, sector: String },

    /// A blip names a ring that is not in the declared ring list.
    #[error("blip `{blip}` references unknown ring `{ring}`")]
    UnknownRing { blip: String, ring: String },
}

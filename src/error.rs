use thiserror::Error;

/// Failures of the view geometry helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// A bounding box was requested for an empty collection of boxes.
    #[error("box not representable: cannot bound an empty set of boxes")]
    NotRepresentable,
    #[error(
        "box of {width}x{height} is not viewable within zoom bounds {min_zoom}..={max_zoom} (needs zoom {required_zoom})"
    )]
    NotViewable {
        width: f64,
        height: f64,
        min_zoom: f64,
        max_zoom: f64,
        required_zoom: f64,
    },
}

/// Failures reported by a rendering surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("canvas state is malformed: {0}")]
    MalformedCanvas(String),
    #[error("surface rejected component: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsertError {
    #[error("unknown component kind '{0}'")]
    UnknownKind(String),
    #[error("{kind} requires a bit width")]
    MissingBits { kind: &'static str },
    #[error("bit width {bits} out of range 1..={max}")]
    InvalidBits { bits: u32, max: u32 },
    #[error("{kind} requires a name")]
    MissingName { kind: &'static str },
    #[error("invalid component name '{0}'")]
    InvalidName(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

//! Viewer configuration for coordinate reconciliation.

/// Pixel density the document renderer draws at.
pub const VIEWER_RESOLUTION: f64 = 96.0;

/// Density assumed for analysis results that state none.
pub const DEFAULT_RESULT_RESOLUTION: f64 = 144.0;

/// Options controlling how analysis coordinates map onto the rendered page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Renderer pixel density (DPI)
    pub viewer_resolution: f64,

    /// Result density used when neither page nor metrics state one
    pub fallback_resolution: f64,

    /// Decimal places kept when deriving a view box (None = no rounding)
    pub view_box_precision: Option<u32>,
}

impl ViewOptions {
    /// Create new view options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the renderer pixel density.
    pub fn with_viewer_resolution(mut self, dpi: f64) -> Self {
        self.viewer_resolution = dpi;
        self
    }

    /// Set the fallback result density.
    pub fn with_fallback_resolution(mut self, dpi: f64) -> Self {
        self.fallback_resolution = dpi;
        self
    }

    /// Set view box rounding precision.
    pub fn with_view_box_precision(mut self, decimals: Option<u32>) -> Self {
        self.view_box_precision = decimals;
        self
    }

    /// Renderer density, falling back to the default for unusable values.
    pub(crate) fn viewer_dpi(&self) -> f64 {
        positive_or(self.viewer_resolution, VIEWER_RESOLUTION)
    }

    /// Fallback result density, never zero or negative.
    pub(crate) fn fallback_dpi(&self) -> f64 {
        positive_or(self.fallback_resolution, DEFAULT_RESULT_RESOLUTION)
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            viewer_resolution: VIEWER_RESOLUTION,
            fallback_resolution: DEFAULT_RESULT_RESOLUTION,
            view_box_precision: Some(2),
        }
    }
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

//! JSON export of normalized data.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any index value (the index, a page, a projection) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Serialize(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, Quad, Region, RegionType};

    fn page() -> Page {
        let mut page = Page::new(1).with_size(100.0, 200.0);
        page.add_region(
            Region::new(3, 1, RegionType::Title, Quad::from_rect(0.0, 0.0, 10.0, 10.0).unwrap())
                .with_text("Intro"),
        );
        page
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&page(), JsonFormat::Pretty).unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("\"type\": \"title\""));
        assert!(json.contains("Intro"));
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&page(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"content_id\":3"));
    }
}

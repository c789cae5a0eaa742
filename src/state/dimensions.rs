/// Resize dimensions: the form fields the user types into, the validated
/// pair, and the JSON object sent to the backend as the `dim` field.

use serde::{Deserialize, Serialize};

use super::data::{InputError, Operation};

/// Raw text of the width/height fields, updated on every keystroke
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionInput {
    pub width: String,
    pub height: String,
}

impl DimensionInput {
    /// Validate both fields as positive whole pixel counts
    pub fn parse(&self) -> Result<ResizeDimensions, InputError> {
        let width = parse_pixels(&self.width).ok_or(InputError::InvalidDimensions)?;
        let height = parse_pixels(&self.height).ok_or(InputError::InvalidDimensions)?;
        ResizeDimensions::new(width, height)
    }
}

fn parse_pixels(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Target size for the Resize operation, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDimensions {
    pub width: u32,
    pub height: u32,
}

impl ResizeDimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, InputError> {
        if width == 0 || height == 0 {
            return Err(InputError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }
}

/// Wire form of the `dim` multipart field
///
/// The backend expects numeric strings when resizing and a null pair for
/// every other operation (it ignores the field in that case).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DimPayload {
    pub width: Option<String>,
    pub height: Option<String>,
}

impl DimPayload {
    /// Build the payload for an operation, dropping dimensions it doesn't use
    pub fn for_request(operation: Operation, dimensions: Option<ResizeDimensions>) -> Self {
        match dimensions {
            Some(dims) if operation.requires_dimensions() => Self {
                width: Some(dims.width.to_string()),
                height: Some(dims.height.to_string()),
            },
            _ => Self::default(),
        }
    }

    /// Convert to the JSON string sent in the form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(width: &str, height: &str) -> DimensionInput {
        DimensionInput {
            width: width.to_string(),
            height: height.to_string(),
        }
    }

    #[test]
    fn test_parse_accepts_positive_integers() {
        let dims = input("800", " 600 ").parse().unwrap();
        assert_eq!(dims, ResizeDimensions { width: 800, height: 600 });
    }

    #[test]
    fn test_parse_rejects_missing_or_invalid_fields() {
        for (w, h) in [("", "600"), ("800", ""), ("0", "600"), ("-5", "600"), ("12.5", "600"), ("abc", "1")] {
            assert_eq!(input(w, h).parse(), Err(InputError::InvalidDimensions), "{w}x{h}");
        }
    }

    #[test]
    fn test_resize_payload_carries_numeric_strings() {
        let op = Operation::Resize;
        let dims = ResizeDimensions::new(640, 480).unwrap();

        let json = DimPayload::for_request(op, Some(dims)).to_json().unwrap();
        assert_eq!(json, r#"{"width":"640","height":"480"}"#);
    }

    #[test]
    fn test_other_operations_send_null_pair() {
        let dims = ResizeDimensions::new(640, 480).ok();

        for op in Operation::MENU.iter().filter(|op| !op.requires_dimensions()) {
            let json = DimPayload::for_request(*op, dims).to_json().unwrap();
            assert_eq!(json, r#"{"width":null,"height":null}"#, "{op}");
        }
    }

    #[test]
    fn test_resize_without_dimensions_sends_null_pair() {
        let payload = DimPayload::for_request(Operation::Resize, None);
        assert_eq!(payload, DimPayload::default());
    }
}

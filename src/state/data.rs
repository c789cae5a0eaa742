/// Shared data structures for the application state
///
/// These types describe the inputs the user collects (image, operation)
/// and the artifacts that flow back from the processing backend.

use bytes::Bytes;
use iced::widget::image::Handle;
use image::ImageFormat;
use std::fmt;
use thiserror::Error;

/// Largest file accepted for upload (10 MiB, inclusive)
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Suggested file name for the downloaded output, whatever its real format
pub const DOWNLOAD_NAME: &str = "processed_image.jpg";

/// Server-side transformation applied to the uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Grayscale,
    Resize,
    Sketch,
    Cartoon,
    Sepia,
    Denoise,
    FaceDetection,
}

impl Operation {
    /// Operations in the order they are offered in the menu
    pub const MENU: &'static [Operation] = &[
        Operation::Grayscale,
        Operation::Resize,
        Operation::Sketch,
        Operation::Cartoon,
        Operation::Sepia,
        Operation::Denoise,
        Operation::FaceDetection,
    ];

    /// Code sent to the backend in the `choice` field
    pub fn wire_code(self) -> u8 {
        match self {
            Operation::FaceDetection => 1,
            Operation::Grayscale => 2,
            Operation::Resize => 3,
            Operation::Sketch => 4,
            Operation::Cartoon => 5,
            Operation::Sepia => 6,
            Operation::Denoise => 7,
        }
    }

    /// Only resizing needs a target width and height
    pub fn requires_dimensions(self) -> bool {
        self == Operation::Resize
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Grayscale => "Grayscale Filter",
            Operation::Resize => "Resize Image",
            Operation::Sketch => "Pencil Sketch Filter",
            Operation::Cartoon => "Cartoon Filter",
            Operation::Sepia => "Sepia Filter",
            Operation::Denoise => "Reduce Noise",
            Operation::FaceDetection => "Face Detection",
        };
        f.write_str(label)
    }
}

/// Best-effort belief about whether the backend is reachable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Connecting,
    Online,
    Offline,
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Connecting => f.write_str("Connecting"),
            Connectivity::Online => f.write_str("Online"),
            Connectivity::Offline => f.write_str("Offline"),
        }
    }
}

/// Problems with what the user picked or typed. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("File Size Limit Exceeded !!")]
    TooLarge { size: u64 },
    #[error("{name} is not a supported image")]
    UnsupportedFormat { name: String },
    #[error("Couldn't read {name}: {reason}")]
    Unreadable { name: String, reason: String },
    #[error("Width and height must be whole numbers of at least 1 px")]
    InvalidDimensions,
}

/// Reject files above the upload limit
pub fn check_size(size: u64) -> Result<(), InputError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(InputError::TooLarge { size });
    }
    Ok(())
}

/// An image the user picked, validated and ready to upload
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// File name only (e.g., "holiday.png")
    pub name: String,
    /// Raw file contents, uploaded as-is
    pub bytes: Bytes,
    /// Format detected from the file signature
    pub format: ImageFormat,
    /// Local preview shown in the file area
    pub preview: Handle,
}

impl SelectedImage {
    /// Validate raw file contents and derive the preview
    ///
    /// Fails when the data exceeds [`MAX_UPLOAD_BYTES`] or doesn't start
    /// with a recognizable image signature.
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, InputError> {
        let name = name.into();
        let bytes = bytes.into();

        check_size(bytes.len() as u64)?;

        let format = image::guess_format(&bytes)
            .map_err(|_| InputError::UnsupportedFormat { name: name.clone() })?;

        let preview = Handle::from_bytes(bytes.clone());

        Ok(Self {
            name,
            bytes,
            format,
            preview,
        })
    }

    /// MIME type for the multipart `image` part
    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Output returned by a successful submission
#[derive(Debug, Clone)]
pub struct ResultArtifact {
    pub bytes: Bytes,
    /// Display handle for the inline output view
    pub handle: Handle,
}

impl ResultArtifact {
    pub fn new(bytes: Bytes) -> Self {
        let handle = Handle::from_bytes(bytes.clone());
        Self { bytes, handle }
    }

    pub fn file_name(&self) -> &'static str {
        DOWNLOAD_NAME
    }
}

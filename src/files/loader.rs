/// Image file loader
///
/// Reads the picked file in the background and validates it before it
/// becomes the selected image. The size limit is checked from metadata
/// first so oversized files are never read into memory.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

use crate::state::data::{check_size, InputError, SelectedImage};

/// Extensions offered in the open dialog
const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff",
];

/// Show the native file picker
pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Select an Image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
}

/// Read and validate an image file
///
/// # Returns
/// * `Ok(SelectedImage)` - file fits the upload limit and looks like an image
/// * `Err(InputError)` - too large, not an image, or unreadable
pub async fn load_selected_image(path: PathBuf) -> Result<SelectedImage, InputError> {
    let name = display_name(&path);
    let unreadable = |e: std::io::Error| InputError::Unreadable {
        name: name.clone(),
        reason: e.to_string(),
    };

    let metadata = tokio::fs::metadata(&path).await.map_err(unreadable)?;
    check_size(metadata.len())?;

    let bytes = tokio::fs::read(&path).await.map_err(unreadable)?;
    SelectedImage::from_bytes(name, bytes)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

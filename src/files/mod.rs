/// Local file I/O
///
/// - `loader.rs` - picking and reading the image to upload
/// - `export.rs` - saving the processed output

pub mod export;
pub mod loader;

/// Reusable pieces of the main window
///
/// - `advisory.rs` - dismissible message banner
/// - `status.rs` - server status indicator
/// - `overlay.rs` - "Please Wait" overlay shown while a submission runs

pub mod advisory;
pub mod overlay;
pub mod status;

/// State management module
///
/// This module holds everything the window shows, independent of iced:
/// - Shared data structures: operations, images, artifacts (data.rs)
/// - Resize dimension fields and their wire form (dimensions.rs)
/// - The upload workflow reducer (session.rs)

pub mod data;
pub mod dimensions;
pub mod session;

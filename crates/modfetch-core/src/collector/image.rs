//! Standalone image records (custom tokens and tiles).

/// One custom token/tile with its cleaned image URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomImageRecord {
    pub guid: String,
    pub nickname: String,
    /// Type tag as found in the save (`Custom_Token` or `Custom_Tile`).
    pub kind: String,
    pub image_url: String,
    /// `None` when no secondary image was declared.
    pub secondary_url: Option<String>,
}

//! Entity kinds recognized by the collector.

/// Closed set of node kinds, decided once per node from its `Name` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// `Card` / `CardCustom`: a slice of a sprite sheet.
    Card,
    /// `Custom_Token` / `Custom_Tile`: one or two standalone images.
    CustomImage,
    /// Anything else (decks, bags, boards, ...): no assets of its own.
    Other,
}

impl EntityKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Card" | "CardCustom" => EntityKind::Card,
            "Custom_Token" | "Custom_Tile" => EntityKind::CustomImage,
            _ => EntityKind::Other,
        }
    }
}

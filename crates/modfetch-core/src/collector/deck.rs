//! Effective deck configuration: parent view overridden by local entries.

use crate::mod_file::DeckMap;
use std::borrow::Cow;

/// Merges `local` over `inherited` without touching `inherited`.
///
/// Borrows the parent's view when the node declares nothing, so plain
/// containers do not copy the map.
pub fn effective<'a>(inherited: &'a DeckMap, local: Option<&DeckMap>) -> Cow<'a, DeckMap> {
    match local {
        Some(local) if !local.is_empty() => {
            let mut merged = inherited.clone();
            merged.extend(local.iter().map(|(k, v)| (k.clone(), v.clone())));
            Cow::Owned(merged)
        }
        _ => Cow::Borrowed(inherited),
    }
}

/// Deck key a card id belongs to (`id / 100`).
pub fn deck_key(card_id: u64) -> String {
    (card_id / 100).to_string()
}

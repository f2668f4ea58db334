//! Object graph collector.
//!
//! Walks the mod's object tree depth-first, carrying the effective deck
//! configuration down to children, and gathers two collections: sprite sheets
//! (grouped by face/back URL pair) and custom image records. Missing or bad
//! data on a node skips that node's asset with a warning; it never stops the walk.

mod deck;
mod entity;
mod image;
mod sheet;

pub use deck::{deck_key, effective};
pub use entity::EntityKind;
pub use image::CustomImageRecord;
pub use sheet::{CardSlice, Sheet, SheetKey, SheetLayout, SheetSet};

use crate::mod_file::{preview, DeckMap, ModFile, Node, ObjectState};
use crate::url_model::clean;

/// Everything the collector found in one document.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub sheets: SheetSet,
    pub images: Vec<CustomImageRecord>,
    /// Entities whose assets were skipped (missing id, unknown deck, empty URL, undecodable node).
    pub skipped: usize,
}

/// Collects sheets and custom images from a whole document.
pub fn collect_mod(doc: &ModFile) -> Collection {
    collect(&doc.object_states)
}

/// Collects sheets and custom images from a list of root nodes.
pub fn collect(roots: &[Node]) -> Collection {
    let mut out = Collection::default();
    let empty = DeckMap::new();
    for node in roots {
        walk(node, &empty, &mut out);
    }
    if out.skipped > 0 {
        tracing::warn!(
            "skipped {} entities due to missing CardID, deck definition or image URL",
            out.skipped
        );
    }
    out
}

fn walk(node: &Node, inherited: &DeckMap, out: &mut Collection) {
    let obj = match node {
        Node::Object(obj) => obj,
        Node::Malformed(value) => {
            tracing::warn!("non-object node skipped: {}", preview(value));
            out.skipped += 1;
            return;
        }
    };

    let decks = effective(inherited, obj.custom_deck.as_ref());

    match EntityKind::from_name(obj.name()) {
        EntityKind::Card => collect_card(obj, &decks, out),
        EntityKind::CustomImage => collect_custom_image(obj, out),
        EntityKind::Other => {}
    }

    for child in obj.children() {
        walk(child, &decks, out);
    }
}

fn collect_card(obj: &ObjectState, decks: &DeckMap, out: &mut Collection) {
    let Some(card_id) = obj.card_number() else {
        tracing::warn!("card {} has no usable CardID, skipping", obj.guid());
        out.skipped += 1;
        return;
    };
    let key = deck_key(card_id);
    let Some(def) = decks.get(&key) else {
        tracing::warn!(
            "card {} CardID={}: deck key '{}' not in effective CustomDeck, skipping",
            obj.guid(),
            card_id,
            key
        );
        out.skipped += 1;
        return;
    };

    let face_url = clean(&def.face_url);
    if face_url.is_empty() {
        tracing::warn!("card {} has empty FaceURL, skipping", obj.guid());
        out.skipped += 1;
        return;
    }
    let sheet_key = SheetKey {
        face_url,
        back_url: clean(&def.back_url),
    };

    if !out.sheets.contains(&sheet_key) && def.num_width == 0 {
        tracing::warn!(
            "card {}: deck key '{}' declares NumWidth=0, skipping",
            obj.guid(),
            key
        );
        out.skipped += 1;
        return;
    }

    let sheet = out.sheets.get_or_insert_with(sheet_key, || SheetLayout {
        num_width: def.num_width,
        num_height: def.num_height,
        unique_back: def.unique_back,
        back_is_hidden: def.back_is_hidden,
    });
    let slice = sheet.push_card(obj.guid(), obj.nickname(), card_id);
    tracing::debug!(
        "card {} → sheet index {} (row {}, col {})",
        slice.guid,
        slice.sheet_index,
        slice.row,
        slice.col
    );
}

fn collect_custom_image(obj: &ObjectState, out: &mut Collection) {
    let image = obj.custom_image.clone().unwrap_or_default();
    let image_url = clean(&image.image_url);
    if image_url.is_empty() {
        tracing::warn!("{} {} has empty ImageURL, skipping", obj.name(), obj.guid());
        out.skipped += 1;
        return;
    }
    let secondary = clean(&image.image_secondary_url);
    out.images.push(CustomImageRecord {
        guid: obj.guid().to_string(),
        nickname: obj.nickname().to_string(),
        kind: obj.name().to_string(),
        image_url,
        secondary_url: (!secondary.is_empty()).then_some(secondary),
    });
}

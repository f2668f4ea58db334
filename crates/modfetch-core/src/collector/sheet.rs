//! Sprite sheets: face/back image pairs sliced into a grid of cards.

use std::collections::HashMap;

/// Identity of a sheet: cleaned (face URL, back URL). Back may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetKey {
    pub face_url: String,
    pub back_url: String,
}

/// Grid layout captured from the deck definition that created the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub num_width: u32,
    pub num_height: u32,
    pub unique_back: bool,
    pub back_is_hidden: bool,
}

/// One card's position on a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSlice {
    pub guid: String,
    pub nickname: String,
    pub card_id: u64,
    pub sheet_index: u32,
    pub row: u32,
    pub col: u32,
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub key: SheetKey,
    pub layout: SheetLayout,
    pub cards: Vec<CardSlice>,
}

impl Sheet {
    fn new(key: SheetKey, layout: SheetLayout) -> Self {
        Self {
            key,
            layout,
            cards: Vec::new(),
        }
    }

    /// Appends a card, placing it with this sheet's stored width.
    /// The layout must have a non-zero width.
    pub fn push_card(&mut self, guid: &str, nickname: &str, card_id: u64) -> &CardSlice {
        let width = u64::from(self.layout.num_width);
        let index = card_id % 100;
        self.cards.push(CardSlice {
            guid: guid.to_string(),
            nickname: nickname.to_string(),
            card_id,
            sheet_index: index as u32,
            row: (index / width) as u32,
            col: (index % width) as u32,
        });
        &self.cards[self.cards.len() - 1]
    }
}

/// Sheets in first-encounter order, indexed by key.
#[derive(Debug, Clone, Default)]
pub struct SheetSet {
    sheets: Vec<Sheet>,
    index: HashMap<SheetKey, usize>,
}

impl SheetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sheet for `key`, creating it with `layout()` if absent.
    /// `layout` is only called on creation: the first writer sets the layout.
    pub fn get_or_insert_with<F>(&mut self, key: SheetKey, layout: F) -> &mut Sheet
    where
        F: FnOnce() -> SheetLayout,
    {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.sheets.len();
                self.index.insert(key.clone(), idx);
                self.sheets.push(Sheet::new(key, layout()));
                idx
            }
        };
        &mut self.sheets[idx]
    }

    pub fn contains(&self, key: &SheetKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Number of cards across all sheets.
    pub fn card_count(&self) -> usize {
        self.sheets.iter().map(|s| s.cards.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(face: &str) -> SheetKey {
        SheetKey {
            face_url: face.to_string(),
            back_url: "http://x/back.jpg".to_string(),
        }
    }

    fn layout(width: u32) -> SheetLayout {
        SheetLayout {
            num_width: width,
            num_height: 7,
            unique_back: false,
            back_is_hidden: false,
        }
    }

    #[test]
    fn card_placement() {
        let mut sheet = Sheet::new(key("http://x/face.jpg"), layout(10));
        let c = sheet.push_card("a", "A", 305).clone();
        assert_eq!((c.sheet_index, c.row, c.col), (5, 0, 5));
        let c = sheet.push_card("b", "B", 312).clone();
        assert_eq!((c.sheet_index, c.row, c.col), (12, 1, 2));
    }

    #[test]
    fn first_writer_sets_layout() {
        let mut set = SheetSet::new();
        set.get_or_insert_with(key("http://x/face.jpg"), || layout(10));
        let sheet = set.get_or_insert_with(key("http://x/face.jpg"), || layout(4));
        assert_eq!(sheet.layout.num_width, 10);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn keeps_first_encounter_order() {
        let mut set = SheetSet::new();
        set.get_or_insert_with(key("http://x/b.jpg"), || layout(10));
        set.get_or_insert_with(key("http://x/a.jpg"), || layout(10));
        set.get_or_insert_with(key("http://x/b.jpg"), || layout(10));
        let faces: Vec<_> = set.iter().map(|s| s.key.face_url.as_str()).collect();
        assert_eq!(faces, ["http://x/b.jpg", "http://x/a.jpg"]);
    }
}

//! Serde structures for the parts of a mod save that carry assets.
//!
//! Only the shape of the tree is strict: a node must be a JSON object. Every field
//! inside goes through [`super::lenient`], so a mistyped field falls back to its
//! default and the node, its siblings and its children are still visited.

use super::lenient;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Deck definitions keyed by deck key (`CardID / 100` as a string).
pub type DeckMap = HashMap<String, DeckDefinition>;

/// Root of a mod save.
#[derive(Debug, Deserialize)]
pub struct ModFile {
    #[serde(default, rename = "ObjectStates")]
    pub object_states: Vec<Node>,
}

/// A tree node: an object, or a value that is not an object at all.
#[derive(Debug)]
pub enum Node {
    Object(Box<ObjectState>),
    Malformed(Value),
}

impl Node {
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Node::Malformed(value);
        }
        match ObjectState::deserialize(&value) {
            Ok(obj) => Node::Object(Box::new(obj)),
            Err(_) => Node::Malformed(value),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        Value::deserialize(d).map(Node::from_value)
    }
}

/// One game object (card, deck, bag, token, tile, ...).
#[derive(Debug, Default, Deserialize)]
pub struct ObjectState {
    #[serde(default, rename = "Name", deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, rename = "GUID", deserialize_with = "lenient::string")]
    pub guid: Option<String>,
    #[serde(default, rename = "Nickname", deserialize_with = "lenient::string")]
    pub nickname: Option<String>,
    /// Kept raw: saves carry integers, floats or strings here.
    #[serde(default, rename = "CardID")]
    pub card_id: Option<Value>,
    #[serde(default, rename = "CustomDeck", deserialize_with = "deck_map")]
    pub custom_deck: Option<DeckMap>,
    #[serde(default, rename = "CustomImage", deserialize_with = "lenient::object")]
    pub custom_image: Option<CustomImage>,
    #[serde(default, rename = "ContainedObjects", deserialize_with = "nodes")]
    pub contained_objects: Option<Vec<Node>>,
}

impl ObjectState {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn guid(&self) -> &str {
        self.guid.as_deref().unwrap_or_default()
    }

    pub fn nickname(&self) -> &str {
        self.nickname.as_deref().unwrap_or_default()
    }

    /// Child nodes; absent, null or not a list means none.
    pub fn children(&self) -> &[Node] {
        self.contained_objects.as_deref().unwrap_or_default()
    }

    /// `CardID` as a non-negative integer, if it is one (integral floats and
    /// numeric strings included).
    pub fn card_number(&self) -> Option<u64> {
        self.card_id.as_ref().and_then(lenient::integer)
    }
}

/// `CustomDeck`: entries that are not objects are dropped one by one.
fn deck_map<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DeckMap>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Object(entries) => Some(
            entries
                .into_iter()
                .filter_map(|(key, value)| {
                    lenient::decode_object(value, "deck definition").map(|def| (key, def))
                })
                .collect(),
        ),
        Value::Null => None,
        other => {
            tracing::warn!("CustomDeck is not an object: {}", lenient::preview(&other));
            None
        }
    })
}

fn nodes<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Node>>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => Some(items.into_iter().map(Node::from_value).collect()),
        Value::Null => None,
        other => {
            tracing::warn!("ContainedObjects is not a list: {}", lenient::preview(&other));
            None
        }
    })
}

/// Sprite sheet layout for one deck key.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckDefinition {
    #[serde(default, rename = "FaceURL", deserialize_with = "lenient::string_or_empty")]
    pub face_url: String,
    #[serde(default, rename = "BackURL", deserialize_with = "lenient::string_or_empty")]
    pub back_url: String,
    #[serde(default = "default_num_width", rename = "NumWidth", deserialize_with = "num_width")]
    pub num_width: u32,
    #[serde(
        default = "default_num_height",
        rename = "NumHeight",
        deserialize_with = "num_height"
    )]
    pub num_height: u32,
    #[serde(default, rename = "UniqueBack", deserialize_with = "lenient::flag")]
    pub unique_back: bool,
    #[serde(default, rename = "BackIsHidden", deserialize_with = "lenient::flag")]
    pub back_is_hidden: bool,
}

fn default_num_width() -> u32 {
    10
}

fn default_num_height() -> u32 {
    7
}

fn num_width<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(lenient::count(d)?.unwrap_or_else(default_num_width))
}

fn num_height<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(lenient::count(d)?.unwrap_or_else(default_num_height))
}

/// Image URLs of a custom token or tile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomImage {
    #[serde(default, rename = "ImageURL", deserialize_with = "lenient::string_or_empty")]
    pub image_url: String,
    #[serde(
        default,
        rename = "ImageSecondaryURL",
        deserialize_with = "lenient::string_or_empty"
    )]
    pub image_secondary_url: String,
}

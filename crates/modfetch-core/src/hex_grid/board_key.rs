//! Board key derivation from VASSAL board names ("CODE: Description").

use regex::Regex;
use std::sync::OnceLock;

fn floor_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\s+[Ff]loor").expect("static floor regex"))
}

/// `"A: Corral"` → `board_A`; overlay boards get a floor suffix:
/// `"NN: Warehouse 2nd Floor"` → `board_NN_floor2`.
pub fn derive_board_key(name: &str) -> String {
    let (code, desc) = name.split_once(':').unwrap_or((name, ""));
    let mut key = format!("board_{}", code.trim());
    if let Some(caps) = floor_re().captures(desc.trim()) {
        key.push_str(&format!("_floor{}", &caps[1]));
    }
    key
}

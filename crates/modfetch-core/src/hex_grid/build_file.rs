//! Streaming scan of a VASSAL `buildFile.xml` for boards and their regions.

use super::board_key::derive_board_key;
use super::{Board, Hex, HexGridError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

pub(super) const TAG_BOARD: &[u8] = b"VASSAL.build.module.map.boardPicker.Board";
pub(super) const TAG_REGION: &[u8] = b"VASSAL.build.module.map.boardPicker.board.Region";

/// A board element still open in the document.
struct OpenBoard {
    name: String,
    image: String,
    hexes: Vec<Hex>,
}

/// Attribute values of `e` by name; missing attributes are absent from the map.
fn attributes(e: &BytesStart<'_>) -> Result<BTreeMap<String, String>, HexGridError> {
    let mut out = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        out.insert(key, attr.unescape_value()?.into_owned());
    }
    Ok(out)
}

fn origin(attrs: &BTreeMap<String, String>, key: &str, region: &str) -> i64 {
    let raw = attrs.get(key).map(String::as_str).unwrap_or("0");
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("region {}: {}={:?} is not an integer, using 0", region, key, raw);
        0
    })
}

/// Scales a module coordinate, rounding halves to even.
fn scaled(v: i64, scale: f64) -> i64 {
    (v as f64 * scale).round_ties_even() as i64
}

fn region_hex(e: &BytesStart<'_>, scale: f64) -> Result<Hex, HexGridError> {
    let attrs = attributes(e)?;
    let id = attrs.get("name").cloned().unwrap_or_default();
    let ox = origin(&attrs, "originx", &id);
    let oy = origin(&attrs, "originy", &id);
    Ok(Hex {
        x: scaled(ox, scale),
        y: scaled(oy, scale),
        id,
    })
}

fn close_board(board: OpenBoard, boards: &mut BTreeMap<String, Board>) {
    if !board.name.contains(':') {
        tracing::debug!("skipping {:?} ({}): not a game board", board.name, board.image);
        return;
    }
    if board.hexes.is_empty() {
        tracing::debug!("skipping {} ({}): no regions", board.name, board.image);
        return;
    }
    let key = derive_board_key(&board.name);
    tracing::debug!("  {}: {} hexes", key, board.hexes.len());
    boards.insert(
        key,
        Board {
            name: board.name,
            image: board.image,
            hexes: board.hexes,
        },
    );
}

/// Collects every game board with at least one region. Regions count for every
/// board they are nested in.
pub fn parse_build_file(
    xml: &[u8],
    scale: f64,
) -> Result<BTreeMap<String, Board>, HexGridError> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut open: Vec<OpenBoard> = Vec::new();
    let mut boards = BTreeMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == TAG_BOARD => {
                let attrs = attributes(&e)?;
                open.push(OpenBoard {
                    name: attrs.get("name").cloned().unwrap_or_default(),
                    image: attrs.get("image").cloned().unwrap_or_default(),
                    hexes: Vec::new(),
                });
            }
            Event::Empty(e) if e.name().as_ref() == TAG_BOARD => {
                let attrs = attributes(&e)?;
                close_board(
                    OpenBoard {
                        name: attrs.get("name").cloned().unwrap_or_default(),
                        image: attrs.get("image").cloned().unwrap_or_default(),
                        hexes: Vec::new(),
                    },
                    &mut boards,
                );
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == TAG_REGION => {
                if !open.is_empty() {
                    let hex = region_hex(&e, scale)?;
                    for board in &mut open {
                        board.hexes.push(hex.clone());
                    }
                }
            }
            Event::End(e) if e.name().as_ref() == TAG_BOARD => {
                if let Some(board) = open.pop() {
                    close_board(board, &mut boards);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(boards)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VASSAL.launch.BasicModule name="Gunslinger">
  <VASSAL.build.module.Map>
    <VASSAL.build.module.map.BoardPicker>
      <VASSAL.build.module.map.boardPicker.Board name="A: Corral" image="A.png">
        <VASSAL.build.module.map.boardPicker.board.RegionGrid>
          <VASSAL.build.module.map.boardPicker.board.Region name="A1" originx="100" originy="57"/>
          <VASSAL.build.module.map.boardPicker.board.Region name="A2" originx="150" originy="86"/>
        </VASSAL.build.module.map.boardPicker.board.RegionGrid>
      </VASSAL.build.module.map.boardPicker.Board>
      <VASSAL.build.module.map.boardPicker.Board name="NN: Warehouse 2nd Floor" image="NN2.png">
        <VASSAL.build.module.map.boardPicker.board.Region name="N1" originx="10"/>
      </VASSAL.build.module.map.boardPicker.Board>
      <VASSAL.build.module.map.boardPicker.Board name="Splash" image="splash.png">
        <VASSAL.build.module.map.boardPicker.board.Region name="S1" originx="1" originy="1"/>
      </VASSAL.build.module.map.boardPicker.Board>
      <VASSAL.build.module.map.boardPicker.Board name="Z: Empty" image="Z.png"/>
    </VASSAL.build.module.map.BoardPicker>
  </VASSAL.build.module.Map>
  <VASSAL.build.module.map.boardPicker.board.Region name="orphan" originx="5" originy="5"/>
</VASSAL.launch.BasicModule>"#;

    #[test]
    fn boards_with_scaled_hexes() {
        let boards = parse_build_file(XML.as_bytes(), 2.0).unwrap();
        let keys: Vec<_> = boards.keys().cloned().collect();
        assert_eq!(keys, ["board_A", "board_NN_floor2"]);

        let a = &boards["board_A"];
        assert_eq!(a.name, "A: Corral");
        assert_eq!(a.image, "A.png");
        assert_eq!(a.hexes.len(), 2);
        assert_eq!((a.hexes[0].id.as_str(), a.hexes[0].x, a.hexes[0].y), ("A1", 200, 114));
        assert_eq!((a.hexes[1].x, a.hexes[1].y), (300, 172));

        let nn = &boards["board_NN_floor2"];
        assert_eq!((nn.hexes[0].x, nn.hexes[0].y), (20, 0));
    }

    #[test]
    fn custom_scale_rounds_halves_to_even() {
        let boards = parse_build_file(XML.as_bytes(), 1.5).unwrap();
        let a = &boards["board_A"];
        // 57 * 1.5 = 85.5 → 86
        assert_eq!((a.hexes[0].x, a.hexes[0].y), (150, 86));
        assert_eq!(scaled(59, 1.5), 88);
        assert_eq!(scaled(61, 1.5), 92);
        assert_eq!(scaled(-3, 1.5), -4);
        assert_eq!(scaled(57, 2.0), 114);
    }

    #[test]
    fn malformed_xml_is_error() {
        let xml = b"<VASSAL.build.module.map.boardPicker.Board name=\"A: x\"><oops></VASSAL.build.module.map.boardPicker.Board>";
        assert!(parse_build_file(xml, 2.0).is_err());
    }
}

use serde::{Deserialize, Serialize};

/// A single status record, as displayed by the bar host.
///
/// Only the fields barpipe itself needs are named; everything else a producer
/// puts into a record (separators, urgency flags, markup hints, ...) is
/// carried through the `extra` map untouched, so producers can speak to the
/// bar host in whatever dialect it understands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    /// Display color, as a `#rrggbb` hex string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Block {
    pub fn text(full_text: impl Into<String>) -> Self {
        Block { full_text: Some(full_text.into()), ..Block::default() }
    }
}

/// The on-disk shape of a `.block` file: either one record or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BlockFile {
    Many(Vec<Block>),
    One(Block),
}

impl BlockFile {
    pub fn into_blocks(self) -> Vec<Block> {
        match self {
            BlockFile::Many(blocks) => blocks,
            BlockFile::One(block) => vec![block],
        }
    }
}

/// Parse the contents of a `.block` file, normalized to a list.
pub fn parse_block_file(raw: &str) -> serde_json::Result<Vec<Block>> {
    serde_json::from_str::<BlockFile>(raw).map(BlockFile::into_blocks)
}

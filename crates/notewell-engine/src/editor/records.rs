use serde::{Deserialize, Serialize};

use crate::editor::{Block, BlockDocument, BlockKind};

/// The persisted shape of one block: `{"type": "...", "content": "..."}`.
///
/// Plain text only; any formatting beyond that is an acknowledged lossy
/// boundary. An unknown `type` hydrates as a paragraph via the lenient
/// [`BlockKind`] deserializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
}

impl BlockRecord {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

impl From<&Block> for BlockRecord {
    fn from(block: &Block) -> Self {
        Self::new(block.kind, block.content.clone())
    }
}

/// Walk the document in order and emit one record per block.
pub fn to_records(document: &BlockDocument) -> Vec<BlockRecord> {
    document.blocks().iter().map(BlockRecord::from).collect()
}

/// Rebuild a document from stored records, one block per record, in
/// list order.
pub fn from_records(records: &[BlockRecord]) -> BlockDocument {
    let mut document = BlockDocument::new();
    for record in records {
        document.push(record.kind, record.content.clone());
    }
    document
}

use crate::editor::reorder::DropEdge;
use crate::editor::{Block, BlockKind};

/// An ordered sequence of blocks forming one document.
///
/// Order is reading order. Blocks carry no identifiers and do not nest;
/// positions are plain indices, valid until the next mutation. Every
/// mutation increments a version counter so a frontend can cheaply detect
/// that it must re-render.
///
/// Index-taking operations return `None` (or no-op for relocation) when
/// the index is out of range; the document never panics on stale
/// positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockDocument {
    blocks: Vec<Block>,
    version: u64,
}

impl BlockDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Version counter, incremented on every mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Append a block of the given kind.
    pub fn push(&mut self, kind: BlockKind, content: impl Into<String>) -> usize {
        self.blocks.push(Block::new(kind, content));
        self.version += 1;
        self.blocks.len() - 1
    }

    /// Insert a block at `index`, shifting later blocks down.
    /// `index == len` appends; anything larger is rejected.
    pub fn insert(&mut self, index: usize, block: Block) -> Option<usize> {
        if index > self.blocks.len() {
            return None;
        }
        self.blocks.insert(index, block);
        self.version += 1;
        Some(index)
    }

    /// Change a block's type, preserving its text content exactly.
    pub fn convert(&mut self, index: usize, kind: BlockKind) -> Option<&Block> {
        let block = self.blocks.get_mut(index)?;
        block.kind = kind;
        self.version += 1;
        Some(&self.blocks[index])
    }

    /// Replace a block's text content.
    pub fn set_content(&mut self, index: usize, content: impl Into<String>) -> Option<&Block> {
        let block = self.blocks.get_mut(index)?;
        block.content = content.into();
        self.version += 1;
        Some(&self.blocks[index])
    }

    pub fn remove(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        self.version += 1;
        Some(removed)
    }

    /// Move the block at `from` immediately before (`Above`) or after
    /// (`Below`) the block at `target`. Moving a block onto itself is a
    /// no-op, as is any out-of-range index; neither bumps the version.
    pub fn relocate(&mut self, from: usize, target: usize, edge: DropEdge) {
        let len = self.blocks.len();
        if from == target || from >= len || target >= len {
            return;
        }

        let mut insert_at = match edge {
            DropEdge::Above => target,
            DropEdge::Below => target + 1,
        };
        let moved = self.blocks.remove(from);
        if from < insert_at {
            insert_at -= 1;
        }
        self.blocks.insert(insert_at, moved);
        self.version += 1;
    }

    /// Drop all blocks. Used when rebuilding from stored records.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.version += 1;
    }
}

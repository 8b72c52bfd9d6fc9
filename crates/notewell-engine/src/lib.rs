pub mod automation;
pub mod data;
pub mod editor;
pub mod render;

// Re-export key types for easier usage
pub use automation::{Action, Rule, RuleDraft, Trigger, TriggerKind};
pub use data::{PropertyKind, PropertySpec, Record, Schema, ViewMode};
pub use editor::{Block, BlockDocument, BlockKind, BlockRecord, EditorSession, MenuState};

use crate::editor::menu::{menu_position, CaretRect, KeyDisposition, MenuState, PointerTarget};
use crate::editor::records::{from_records, to_records, BlockRecord};
use crate::editor::reorder::{BlockRect, DragState, Indicator};
use crate::editor::{BlockDocument, BlockKind};

/// One editor surface: the document plus the transient view-state that
/// belongs to it (block-type menu, drag gesture).
///
/// The session is an explicitly constructed, owned value: event handlers
/// receive a `&mut EditorSession`, there is no process-wide editor. All
/// mutation happens on the caller's thread; the session does no I/O.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSession {
    document: BlockDocument,
    menu: MenuState,
    drag: DragState,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: BlockDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    pub fn document(&self) -> &BlockDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut BlockDocument {
        &mut self.document
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn drag_indicator(&self) -> Option<Indicator> {
        self.drag.indicator()
    }

    // ---- keyboard ----

    /// Feed a keystroke that landed inside the editable region of
    /// `block`. A slash opens the block-type menu at the caret (the
    /// literal character is suppressed); everything else passes through.
    pub fn handle_keydown(
        &mut self,
        key: &str,
        block: usize,
        caret: CaretRect,
        scroll_y: f64,
    ) -> KeyDisposition {
        if key != "/" || block >= self.document.len() {
            return KeyDisposition::PassThrough;
        }
        self.menu = MenuState::Open {
            block,
            position: menu_position(caret, scroll_y),
        };
        KeyDisposition::Suppressed
    }

    // ---- menu ----

    /// Select a menu option: convert the anchored block to the chosen
    /// kind, preserving its text, and close the menu. Returns the anchor
    /// index when a conversion happened.
    pub fn select_menu_option(&mut self, kind: BlockKind) -> Option<usize> {
        let anchor = self.menu.anchor()?;
        self.menu = MenuState::Closed;
        self.document.convert(anchor, kind)?;
        Some(anchor)
    }

    /// Feed a pointer-down event. A press outside the menu region closes
    /// the menu; a press inside leaves it open (the option click arrives
    /// separately via [`Self::select_menu_option`]).
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if self.menu.is_open() && target == PointerTarget::Outside {
            self.menu = MenuState::Closed;
        }
    }

    // ---- drag and drop ----

    pub fn drag_start(&mut self, block: usize) {
        if block < self.document.len() {
            self.drag.start(block);
        }
    }

    /// Drag-over a candidate block; returns the insertion indicator to
    /// paint, if any.
    pub fn drag_over(&mut self, target: usize, pointer_y: f64, rect: BlockRect) -> Option<Indicator> {
        if target >= self.document.len() {
            return None;
        }
        self.drag.hover(target, pointer_y, rect)
    }

    /// Drop onto a candidate block: relocate the dragged block before or
    /// after it per the midpoint test, then clear all drag state.
    pub fn drop(&mut self, target: usize, pointer_y: f64, rect: BlockRect) {
        if target >= self.document.len() {
            self.drag.cancel();
            return;
        }
        if let Some((source, edge)) = self.drag.finish(target, pointer_y, rect) {
            self.document.relocate(source, target, edge);
        }
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    // ---- persistence ----

    pub fn to_records(&self) -> Vec<BlockRecord> {
        to_records(&self.document)
    }

    /// Replace the document with one rebuilt from stored records. Any
    /// open menu or drag gesture is discarded with the old blocks.
    pub fn load_records(&mut self, records: &[BlockRecord]) {
        self.document = from_records(records);
        self.menu = MenuState::Closed;
        self.drag.cancel();
    }
}

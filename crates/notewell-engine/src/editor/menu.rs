use crate::editor::BlockKind;

/// Caret bounding box, as reported by the frontend's selection API.
/// Only the fields the menu placement needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretRect {
    pub left: f64,
    pub bottom: f64,
}

/// Screen position for the menu overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPosition {
    pub x: f64,
    pub y: f64,
}

/// Where the menu opens: at the caret's left edge, just below it,
/// offset by the page scroll.
pub fn menu_position(caret: CaretRect, scroll_y: f64) -> MenuPosition {
    MenuPosition {
        x: caret.left,
        y: caret.bottom + scroll_y,
    }
}

/// The block-type menu: either closed, or open anchored to one block.
/// At most one menu exists per editor session; opening while open simply
/// re-anchors and repositions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        /// Index of the block the menu will convert.
        block: usize,
        position: MenuPosition,
    },
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open { .. })
    }

    /// The anchored block index, when open.
    pub fn anchor(&self) -> Option<usize> {
        match self {
            MenuState::Open { block, .. } => Some(*block),
            MenuState::Closed => None,
        }
    }

    pub fn position(&self) -> Option<MenuPosition> {
        match self {
            MenuState::Open { position, .. } => Some(*position),
            MenuState::Closed => None,
        }
    }
}

/// What the frontend should do with the keystroke it just reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Swallow the keystroke (the literal character must not be typed).
    Suppressed,
    /// Let the keystroke through unchanged.
    PassThrough,
}

/// Where a pointer event landed, relative to the open menu's region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    InsideMenu,
    Outside,
}

/// One selectable entry in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub kind: BlockKind,
    pub label: &'static str,
}

/// The fixed option list, in display order.
pub const MENU_OPTIONS: [MenuOption; 8] = [
    MenuOption { kind: BlockKind::Heading1, label: "Heading 1" },
    MenuOption { kind: BlockKind::Heading2, label: "Heading 2" },
    MenuOption { kind: BlockKind::Heading3, label: "Heading 3" },
    MenuOption { kind: BlockKind::Paragraph, label: "Text" },
    MenuOption { kind: BlockKind::Todo, label: "To-do" },
    MenuOption { kind: BlockKind::BulletList, label: "Bullet List" },
    MenuOption { kind: BlockKind::NumberedList, label: "Numbered List" },
    MenuOption { kind: BlockKind::Code, label: "Code" },
];

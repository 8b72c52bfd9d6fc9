/*!
 * # Block Editor Core
 *
 * The editor models a document as an ordered sequence of typed plain-text
 * blocks. Everything in this module is a pure value or a pure state
 * machine: there is no DOM, no network, and no global state. A frontend
 * feeds input events (keystrokes, pointer positions, drag coordinates)
 * into an [`EditorSession`] and renders whatever state comes back.
 *
 * ## Module Structure
 *
 * - **`block`**: the [`Block`] unit and its closed [`BlockKind`] type set
 * - **`document`**: [`BlockDocument`], the ordered block sequence with
 *   insert/convert/relocate/remove operations and a version counter
 * - **`menu`**: the slash-triggered block-type menu as an explicit
 *   [`MenuState`] state machine with screen-position computation
 * - **`reorder`**: drag-and-drop view-state (midpoint test, insertion
 *   indicator) kept separate from the relocation itself
 * - **`records`**: the persisted `{type, content}` record shape and the
 *   document <-> record conversions
 * - **`session`**: [`EditorSession`], the owned value that ties the
 *   document, menu and drag state together for one editor surface
 *
 * ## Usage Pattern
 *
 * ```rust
 * use notewell_engine::editor::{BlockKind, CaretRect, EditorSession, PointerTarget};
 *
 * let mut session = EditorSession::new();
 * session.document_mut().push(BlockKind::Paragraph, "hello");
 *
 * // Slash keystroke opens the block-type menu at the caret
 * let caret = CaretRect { left: 120.0, bottom: 300.0 };
 * session.handle_keydown("/", 0, caret, 0.0);
 * assert!(session.menu().is_open());
 *
 * // Choosing an option converts the anchored block, preserving its text
 * let converted = session.select_menu_option(BlockKind::Heading1);
 * assert_eq!(converted, Some(0));
 * assert_eq!(session.document().get(0).unwrap().content, "hello");
 *
 * // Clicking outside closes the menu without touching any block
 * session.pointer_down(PointerTarget::Outside);
 * ```
 */

pub mod block;
pub mod document;
pub mod menu;
pub mod records;
pub mod reorder;
pub mod session;

pub use block::{Block, BlockKind, UnknownBlockKind};
pub use document::BlockDocument;
pub use menu::{CaretRect, KeyDisposition, MenuOption, MenuPosition, MenuState, PointerTarget, MENU_OPTIONS};
pub use records::{from_records, to_records, BlockRecord};
pub use reorder::{BlockRect, DragState, DropEdge, Indicator};
pub use session::EditorSession;

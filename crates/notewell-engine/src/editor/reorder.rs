//! Drag-and-drop view-state for block reordering.
//!
//! The drag machinery here is pure: it records which block is being
//! dragged and, on every drag-over event, recomputes a cosmetic insertion
//! indicator from the pointer's position relative to the hovered block's
//! vertical midpoint. The actual relocation lives on
//! [`BlockDocument::relocate`](crate::editor::BlockDocument::relocate);
//! the session wires the two together on drop.

/// Vertical extent of a block's on-screen box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRect {
    pub top: f64,
    pub height: f64,
}

impl BlockRect {
    fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Which edge of the hovered block the dragged block would land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEdge {
    Above,
    Below,
}

/// Midpoint test: pointers in the upper half target the top edge.
pub fn drop_edge(pointer_y: f64, target: BlockRect) -> DropEdge {
    if pointer_y < target.midpoint() {
        DropEdge::Above
    } else {
        DropEdge::Below
    }
}

/// The insertion indicator shown while hovering. Purely cosmetic;
/// recomputed on every drag-over event and cleared on drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub block: usize,
    pub edge: DropEdge,
}

/// Transient state of one drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<usize>,
    indicator: Option<Indicator>,
}

impl DragState {
    /// Begin dragging the block at `index`.
    pub fn start(&mut self, index: usize) {
        self.source = Some(index);
        self.indicator = None;
    }

    pub fn source(&self) -> Option<usize> {
        self.source
    }

    pub fn indicator(&self) -> Option<Indicator> {
        self.indicator
    }

    /// Drag-over: update the indicator for the hovered block. Hovering
    /// the dragged block itself (or hovering with no active drag) clears
    /// the indicator.
    pub fn hover(&mut self, target: usize, pointer_y: f64, rect: BlockRect) -> Option<Indicator> {
        let source = self.source?;
        if target == source {
            self.indicator = None;
            return None;
        }
        let indicator = Indicator {
            block: target,
            edge: drop_edge(pointer_y, rect),
        };
        self.indicator = Some(indicator);
        Some(indicator)
    }

    /// Drop: consume the gesture, returning `(source, edge)` when the
    /// drop should relocate a block. Self-drop and drop-without-drag
    /// yield `None`. All transient state is cleared either way.
    pub fn finish(&mut self, target: usize, pointer_y: f64, rect: BlockRect) -> Option<(usize, DropEdge)> {
        self.indicator = None;
        let source = self.source.take()?;
        if source == target {
            return None;
        }
        Some((source, drop_edge(pointer_y, rect)))
    }

    /// Abandon the gesture (drag cancelled, pointer left the container).
    pub fn cancel(&mut self) {
        self.source = None;
        self.indicator = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: BlockRect = BlockRect {
        top: 100.0,
        height: 40.0,
    };

    #[test]
    fn midpoint_test_picks_the_edge() {
        assert_eq!(drop_edge(110.0, RECT), DropEdge::Above);
        assert_eq!(drop_edge(130.0, RECT), DropEdge::Below);
        // On the midpoint exactly counts as below
        assert_eq!(drop_edge(120.0, RECT), DropEdge::Below);
    }

    #[test]
    fn hover_recomputes_indicator_each_event() {
        let mut drag = DragState::default();
        drag.start(0);

        let first = drag.hover(2, 105.0, RECT).unwrap();
        assert_eq!(first.edge, DropEdge::Above);

        let second = drag.hover(2, 135.0, RECT).unwrap();
        assert_eq!(second.edge, DropEdge::Below);
        assert_eq!(drag.indicator(), Some(second));
    }

    #[test]
    fn hover_over_source_clears_indicator() {
        let mut drag = DragState::default();
        drag.start(1);
        drag.hover(2, 105.0, RECT);
        assert!(drag.hover(1, 105.0, RECT).is_none());
        assert_eq!(drag.indicator(), None);
    }

    #[test]
    fn hover_without_drag_does_nothing() {
        let mut drag = DragState::default();
        assert!(drag.hover(0, 105.0, RECT).is_none());
    }

    #[test]
    fn finish_consumes_the_gesture_and_clears_state() {
        let mut drag = DragState::default();
        drag.start(0);
        drag.hover(3, 105.0, RECT);

        let (source, edge) = drag.finish(3, 105.0, RECT).unwrap();
        assert_eq!((source, edge), (0, DropEdge::Above));
        assert_eq!(drag.source(), None);
        assert_eq!(drag.indicator(), None);
    }

    #[test]
    fn self_drop_yields_nothing() {
        let mut drag = DragState::default();
        drag.start(2);
        assert!(drag.finish(2, 105.0, RECT).is_none());
        assert_eq!(drag.source(), None);
    }

    #[test]
    fn drop_without_drag_yields_nothing() {
        let mut drag = DragState::default();
        assert!(drag.finish(0, 105.0, RECT).is_none());
    }
}

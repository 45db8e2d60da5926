//! Drag-and-drop controller.
//!
//! The controller is a two-state machine: [`DragState::Idle`] when no piece
//! is held and [`DragState::Dragging`] while a gesture carries an image. The
//! state is a plain value owned by whoever feeds the events:
//! [`DragState::apply`] consumes it together with an event and returns the
//! next state alongside the [`Effect`] the event had on the board.
//!
//! There are no rules. Any image can be dropped anywhere on the board:
//!
//! - Dropping on an empty cell moves the image there.
//! - Dropping on another image moves the dragged one into that image's cell,
//!   stacking them. Nothing is captured or swapped.
//! - Dropping on the container of an occupied cell (rather than on the image
//!   inside it) does not move anything.
//!
//! Every drop and every drag end returns the controller to idle.
//!
//! ```
//! use dragboard::board::core::Square;
//! use dragboard::board::{Board, ImageId};
//! use dragboard::drag::{DragEvent, DragState, DropTarget, Effect};
//!
//! let mut board = Board::starting();
//! let pawn = ImageId::new(Square::E2);
//!
//! let (state, _) = DragState::Idle.apply(DragEvent::Start(pawn), &mut board);
//! let (state, effect) = state.apply(DragEvent::Drop(DropTarget::Cell(Square::E4)), &mut board);
//!
//! assert_eq!(state, DragState::Idle);
//! assert_eq!(
//!     effect,
//!     Effect::Moved {
//!         image: pawn,
//!         from: Square::E2,
//!         to: Square::E4
//!     }
//! );
//! ```

use std::fmt;

use crate::board::core::Square;
use crate::board::{Board, ImageId};

/// Where the pointer is when a drop (or drag over) happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// The cell container itself.
    Cell(Square),
    /// An image sitting in some cell.
    Image(ImageId),
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell(square) => write!(f, "cell {square}"),
            Self::Image(image) => write!(f, "image {image}"),
        }
    }
}

/// Discrete input gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer started dragging an image.
    Start(ImageId),
    /// Pointer moved over a target while dragging.
    Over(DropTarget),
    /// Pointer released over a target on the board.
    Drop(DropTarget),
    /// Gesture ended without a drop on the board.
    End,
}

/// What an event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// A drag session started (or switched to another image).
    Picked(ImageId),
    /// Reply to [`DragEvent::Over`]. The default behaviour of the platform is
    /// to reject drops, so the controller opts in for every target.
    DropAllowed,
    /// The image went into an empty cell.
    Moved {
        #[allow(missing_docs)]
        image: ImageId,
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// The image was dropped on another image and now shares its cell.
    Stacked {
        #[allow(missing_docs)]
        image: ImageId,
        #[allow(missing_docs)]
        from: Square,
        #[allow(missing_docs)]
        to: Square,
    },
    /// The drag session ended without the board changing.
    Cancelled,
    /// The event was not applicable in the current state.
    Ignored(Ignored),
}

/// Reasons for [`Effect::Ignored`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ignored {
    /// Drop or drag end without a drag session.
    NotDragging,
    /// The image is not on the board.
    UnknownImage(ImageId),
    /// Drop on the container of a cell that already holds an image.
    OccupiedCell(Square),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Picked(image) => write!(f, "picked {image}"),
            Self::DropAllowed => write!(f, "drop allowed"),
            Self::Moved { image, from, to } => write!(f, "moved {image} from {from} to {to}"),
            Self::Stacked { image, from, to } => {
                write!(f, "stacked {image} from {from} onto {to}")
            },
            Self::Cancelled => write!(f, "drag cancelled"),
            Self::Ignored(Ignored::NotDragging) => write!(f, "ignored: nothing is being dragged"),
            Self::Ignored(Ignored::UnknownImage(image)) => {
                write!(f, "ignored: no image {image} on the board")
            },
            Self::Ignored(Ignored::OccupiedCell(square)) => {
                write!(f, "ignored: cell {square} is occupied")
            },
        }
    }
}

/// State of the drag controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No piece is held.
    #[default]
    Idle,
    /// The image is being carried by the pointer.
    Dragging(ImageId),
}

impl DragState {
    /// Feeds the event to the state machine and returns the next state.
    ///
    /// Only [`DragEvent::Drop`] modifies the board.
    #[must_use]
    pub fn apply(self, event: DragEvent, board: &mut Board) -> (Self, Effect) {
        let (next, effect) = match (self, event) {
            (_, DragEvent::Start(image)) => match board.locate(image) {
                Some(_) => (Self::Dragging(image), Effect::Picked(image)),
                None => (self, Effect::Ignored(Ignored::UnknownImage(image))),
            },
            (_, DragEvent::Over(_)) => (self, Effect::DropAllowed),
            (Self::Idle, DragEvent::Drop(_) | DragEvent::End) => {
                (Self::Idle, Effect::Ignored(Ignored::NotDragging))
            },
            (Self::Dragging(image), DragEvent::Drop(target)) => {
                (Self::Idle, drop_on(target, image, board))
            },
            (Self::Dragging(_), DragEvent::End) => (Self::Idle, Effect::Cancelled),
        };
        match effect {
            Effect::Ignored(reason) => log::info!("{event:?} in {self:?}: {reason:?}"),
            _ => log::debug!("{event:?}: {self:?} -> {next:?}, {effect}"),
        }
        (next, effect)
    }

    /// Image carried by the pointer, if any.
    #[must_use]
    pub const fn dragged(self) -> Option<ImageId> {
        match self {
            Self::Idle => None,
            Self::Dragging(image) => Some(image),
        }
    }
}

impl fmt::Display for DragState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Dragging(image) => write!(f, "dragging {image}"),
        }
    }
}

fn drop_on(target: DropTarget, image: ImageId, board: &mut Board) -> Effect {
    match target {
        DropTarget::Cell(square) => {
            if !board.cell(square).is_empty() {
                return Effect::Ignored(Ignored::OccupiedCell(square));
            }
            match board.reparent(image, square) {
                Some(from) => Effect::Moved {
                    image,
                    from,
                    to: square,
                },
                None => Effect::Ignored(Ignored::UnknownImage(image)),
            }
        },
        DropTarget::Image(below) => {
            let Some(to) = board.locate(below) else {
                return Effect::Ignored(Ignored::UnknownImage(below));
            };
            match board.reparent(image, to) {
                Some(from) => Effect::Stacked { image, from, to },
                None => Effect::Ignored(Ignored::UnknownImage(image)),
            }
        },
    }
}

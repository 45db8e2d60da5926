//! Board model: primitives, the layout it is built from, the asset table and
//! the cells themselves.

pub mod assets;
pub mod cells;
pub mod core;
pub mod layout;

pub use cells::{Board, Cell, ImageId, PieceImage};
pub use layout::Layout;

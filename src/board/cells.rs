//! The rendered board: 64 cell containers holding piece images.
//!
//! Building the board never fails. Images keep the index of the layout slot
//! they were created from for their whole lifetime, which is how the drag
//! controller refers to them. They are never created or destroyed after the
//! board is built, only moved between cells.

use std::fmt::{self, Write};

use arrayvec::ArrayVec;
use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::board::assets::{Assets, ImageSource};
use crate::board::core::{File, Piece, Rank, Shade, Square, BOARD_SIZE};
use crate::board::layout::Layout;

/// Identifies a piece image by the layout index it originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(Square);

impl ImageId {
    /// The image built from the layout slot at `origin`.
    #[must_use]
    pub const fn new(origin: Square) -> Self {
        Self(origin)
    }

    /// Layout slot the image was created from.
    #[must_use]
    pub const fn origin(self) -> Square {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// A piece on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceImage {
    id: ImageId,
    code: String,
    source: ImageSource,
}

impl PieceImage {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn id(&self) -> ImageId {
        self.id
    }

    /// Piece code exactly as it appeared in the layout.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Symbol used in the text diagram: FEN letter for known pieces, `?` for
    /// anything else.
    fn symbol(&self) -> char {
        match Piece::try_from(self.code.as_str()) {
            Ok(piece) => piece.symbol(),
            Err(_) => '?',
        }
    }
}

/// Every image can end up in a single cell.
type Stack = ArrayVec<ImageId, { BOARD_SIZE as usize }>;

/// Container for zero or more images. The last image in the stack is the
/// top-most one.
#[derive(Clone, Debug)]
pub struct Cell {
    square: Square,
    stack: Stack,
}

impl Cell {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn shade(&self) -> Shade {
        self.square.shade()
    }

    /// Images in the cell, bottom to top.
    #[must_use]
    pub fn images(&self) -> &[ImageId] {
        &self.stack
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The image a pointer would land on.
    #[must_use]
    pub fn top(&self) -> Option<ImageId> {
        self.stack.last().copied()
    }
}

/// 64 cells in row-major order plus the images living in them.
#[derive(Clone)]
pub struct Board {
    cells: Vec<Cell>,
    images: Vec<PieceImage>,
}

impl Board {
    /// Builds the cells from the layout and attaches an image wherever the
    /// layout has a piece code.
    #[must_use]
    pub fn new(layout: &Layout, assets: &Assets) -> Self {
        let mut cells = Vec::with_capacity(BOARD_SIZE as usize);
        let mut images = Vec::with_capacity(layout.piece_count());
        for (square, code) in Square::iter().zip(layout.iter()) {
            let mut stack = Stack::new();
            if let Some(code) = code {
                let id = ImageId::new(square);
                images.push(PieceImage {
                    id,
                    code: code.to_string(),
                    source: assets.resolve(code),
                });
                stack.push(id);
            }
            cells.push(Cell { square, stack });
        }
        log::debug!("built board with {} pieces", images.len());
        Self { cells, images }
    }

    /// Standard starting position with the default assets.
    #[must_use]
    pub fn starting() -> Self {
        Self::new(&Layout::starting(), &Assets::default())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn cell(&self, square: Square) -> &Cell {
        &self.cells[square.index()]
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All images, ordered by their origin.
    #[must_use]
    pub fn images(&self) -> &[PieceImage] {
        &self.images
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn image(&self, id: ImageId) -> Option<&PieceImage> {
        self.images.iter().find(|image| image.id == id)
    }

    /// Top-most image in the cell at `square`.
    #[must_use]
    pub fn top(&self, square: Square) -> Option<ImageId> {
        self.cell(square).top()
    }

    /// Square of the cell currently holding the image.
    #[must_use]
    pub fn locate(&self, id: ImageId) -> Option<Square> {
        self.cells
            .iter()
            .find(|cell| cell.stack.contains(&id))
            .map(Cell::square)
    }

    /// Number of images on the board. Does not change after building.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.images.len()
    }

    /// Detaches the image from its cell and appends it on top of the cell at
    /// `target`. Moving an image into the cell it already is in puts it on
    /// top of that cell. Returns the square the image was taken from, or
    /// `None` if the image is not on the board.
    pub fn reparent(&mut self, id: ImageId, target: Square) -> Option<Square> {
        let from = self.locate(id)?;
        let stack = &mut self.cells[from.index()].stack;
        if let Some(position) = stack.iter().position(|image| *image == id) {
            let _ = stack.remove(position);
        }
        // Capacity covers every image on the board, so this can not overflow.
        self.cells[target.index()].stack.push(id);
        Some(from)
    }

    /// Current contents as a layout: the top-most code of each cell. Stacked
    /// images underneath are not representable and are dropped.
    #[must_use]
    pub fn to_layout(&self) -> Layout {
        let mut layout = Layout::empty();
        for cell in &self.cells {
            let code = cell
                .top()
                .and_then(|id| self.image(id))
                .map(PieceImage::code);
            layout.set(cell.square, code);
        }
        layout
    }

    /// Writes one line per non-empty cell with the cell shade and every image
    /// in it, bottom to top.
    ///
    /// # Errors
    ///
    /// Propagates formatter errors.
    pub fn write_cells(&self, f: &mut impl Write) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{} {}", cell.square, cell.shade())?;
            if !cell.is_empty() {
                write!(
                    f,
                    " {}",
                    cell.stack
                        .iter()
                        .filter_map(|id| self.image(*id))
                        .map(|image| format!("{}{}={}", image.code, image.id, image.source))
                        .join(" ")
                )?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }

    fn symbol(&self, square: Square) -> char {
        match self.top(square).and_then(|id| self.image(id)) {
            Some(image) => image.symbol(),
            None => '.',
        }
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty cell, FEN algebraic
    /// symbol for the top-most piece) with rank 8 on top. Cells holding more
    /// than one image are followed by `+` instead of a space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                f.write_char(self.symbol(square))?;
                let stacked = self.cell(square).stack.len() > 1;
                if file != File::H {
                    f.write_str(if stacked { "+" } else { SQUARE_SEPARATOR })?;
                } else if stacked {
                    f.write_char('+')?;
                }
            }
            if rank != Rank::One {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

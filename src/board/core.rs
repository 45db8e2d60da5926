//! Board primitives commonly used within [`crate::board`].

use std::fmt::{self, Write};

use anyhow::{bail, Context};
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top. The square index
/// is the index of the layout slot it is built from: row is `index / 8`,
/// column is `index % 8`.
///
/// ```
/// use dragboard::board::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A2 as u8, 8);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte.
///
/// ```
/// use dragboard::board::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[rustfmt::skip]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter, strum::FromRepr,
)]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub fn new(file: File, rank: Rank) -> Self {
        match Self::from_repr(file as u8 + rank as u8 * BOARD_WIDTH) {
            Some(square) => square,
            None => unreachable!("file and rank are both within 0..BOARD_WIDTH"),
        }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub fn file(self) -> File {
        match File::from_repr(self as u8 % BOARD_WIDTH) {
            Some(file) => file,
            None => unreachable!("remainder is always within 0..BOARD_WIDTH"),
        }
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub fn rank(self) -> Rank {
        match Rank::from_repr(self as u8 / BOARD_WIDTH) {
            Some(rank) => rank,
            None => unreachable!("square index is always within 0..BOARD_SIZE"),
        }
    }

    /// Position of the square in the row-major layout.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Cells alternate colors: the cell is light when `row + column` is even.
    #[must_use]
    pub fn shade(self) -> Shade {
        if (self.rank() as u8 + self.file() as u8) % 2 == 0 {
            Shade::Light
        } else {
            Shade::Dark
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        match Self::from_repr(square_index) {
            Some(square) => Ok(square),
            None => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<usize> for Square {
    type Error = anyhow::Error;

    fn try_from(square_index: usize) -> anyhow::Result<Self> {
        match u8::try_from(square_index) {
            Ok(index) => Self::try_from(index),
            Err(_) => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    /// Accepts both the algebraic notation (`e2`) and the layout index (`12`).
    fn try_from(square: &str) -> anyhow::Result<Self> {
        if !square.is_empty() && square.bytes().all(|c| c.is_ascii_digit()) {
            let index: usize = square
                .parse()
                .with_context(|| format!("square index is too large: {square}"))?;
            return Self::try_from(index);
        }
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char or an index, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column of the board. In chess notation, it is normally
/// represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter, strum::FromRepr)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Self::try_from(file as u8 - b'a'),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::from_repr(column) {
            Some(file) => Ok(file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the board. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, strum::EnumIter, strum::FromRepr)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::try_from(rank as u8 - b'1'),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::from_repr(row) {
            Some(rank) => Ok(rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// Color of a cell.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Light,
    Dark,
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// Owner of a piece: White or Black. Nobody takes turns here, the owner only
/// determines which image is drawn.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum Player {
    White,
    Black,
}

impl TryFrom<char> for Player {
    type Error = anyhow::Error;

    fn try_from(player: char) -> anyhow::Result<Self> {
        match player {
            'w' => Ok(Self::White),
            'b' => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Uppercase letter used in piece codes (`wN`, `bK`).
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Pawn => 'P',
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    fn try_from(letter: char) -> anyhow::Result<Self> {
        match letter {
            'K' => Ok(Self::King),
            'Q' => Ok(Self::Queen),
            'R' => Ok(Self::Rook),
            'B' => Ok(Self::Bishop),
            'N' => Ok(Self::Knight),
            'P' => Ok(Self::Pawn),
            _ => bail!("piece kind should be within \"KQRBNP\", got '{letter}'"),
        }
    }
}

/// Represents a specific piece owned by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    /// Two-character piece code: owner followed by kind, e.g. `wR`.
    #[must_use]
    pub fn code(self) -> String {
        self.to_string()
    }

    /// Algebraic symbol used in FEN: uppercase for white, lowercase for
    /// black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let letter = self.kind.letter();
        match self.owner {
            Player::White => letter,
            Player::Black => letter.to_ascii_lowercase(),
        }
    }
}

impl TryFrom<&str> for Piece {
    type Error = anyhow::Error;

    /// Parses a piece code such as `wN` or `bQ`.
    fn try_from(code: &str) -> anyhow::Result<Self> {
        let (owner, kind) = match code.chars().collect_tuple() {
            Some((owner, kind)) => (owner, kind),
            None => bail!("piece code should be two-char, got \"{code}\""),
        };
        Ok(Self {
            owner: owner.try_into()?,
            kind: kind.try_into()?,
        })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.owner, self.kind.letter())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn square_coordinates() {
        assert_eq!(Square::new(File::A, Rank::One), Square::A1);
        assert_eq!(Square::new(File::E, Rank::Two), Square::E2);
        assert_eq!(Square::H8.file(), File::H);
        assert_eq!(Square::H8.rank(), Rank::Eight);
        for square in Square::iter() {
            assert_eq!(square.index() / 8, square.rank() as usize);
            assert_eq!(square.index() % 8, square.file() as usize);
        }
        assert_eq!(Square::iter().count(), BOARD_SIZE as usize);
    }

    #[test]
    fn square_parsing() {
        assert_eq!(Square::try_from("a1").unwrap(), Square::A1);
        assert_eq!(Square::try_from("e4").unwrap(), Square::E4);
        assert_eq!(Square::try_from("8").unwrap(), Square::A2);
        assert_eq!(Square::try_from("63").unwrap(), Square::H8);
        assert_eq!(Square::try_from(12_u8).unwrap(), Square::E2);
        assert!(Square::try_from("64").is_err());
        assert!(Square::try_from("999").is_err());
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("").is_err());
        assert!(Square::try_from(64_usize).is_err());
    }

    #[test]
    fn square_index_parsing() {
        assert_eq!(Square::try_from("0").unwrap(), Square::A1);
        assert_eq!(Square::try_from("012").unwrap(), Square::E2);
        assert!(Square::try_from("256").is_err());
        assert!(Square::try_from("300").is_err());
        assert!(Square::try_from("99999999999999999999999").is_err());
    }

    #[test]
    fn square_display() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::G7.to_string(), "g7");
        for square in Square::iter() {
            assert_eq!(Square::try_from(square.to_string().as_str()).unwrap(), square);
        }
    }

    #[test]
    fn shades_alternate() {
        assert_eq!(Square::A1.shade(), Shade::Light);
        assert_eq!(Square::B1.shade(), Shade::Dark);
        assert_eq!(Square::A2.shade(), Shade::Dark);
        assert_eq!(Square::H8.shade(), Shade::Light);
        for square in Square::iter() {
            let row = square.index() / 8;
            let column = square.index() % 8;
            let expected = if (row + column) % 2 == 0 {
                Shade::Light
            } else {
                Shade::Dark
            };
            assert_eq!(square.shade(), expected, "{square}");
        }
    }

    #[test]
    fn piece_codes() {
        for owner in Player::iter() {
            for kind in PieceKind::iter() {
                let piece = Piece { owner, kind };
                assert_eq!(piece.code(), piece.to_string());
                assert_eq!(Piece::try_from(piece.code().as_str()).unwrap(), piece);
            }
        }
        assert_eq!(
            Piece::try_from("wN").unwrap(),
            Piece {
                owner: Player::White,
                kind: PieceKind::Knight
            }
        );
        assert_eq!(Piece::try_from("bQ").unwrap().symbol(), 'q');
        assert_eq!(Piece::try_from("wK").unwrap().symbol(), 'K');
        assert!(Piece::try_from("xK").is_err());
        assert!(Piece::try_from("wX").is_err());
        assert!(Piece::try_from("wKK").is_err());
        assert!(Piece::try_from("").is_err());
    }
}

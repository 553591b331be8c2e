use crate::error::RangeError;
use crate::geometry;
use crate::types::{Chessman, Color, Coord, File, Piece, Rank};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Error parsing the piece placement of a board
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Non-ASCII data in placement string
    #[error("non-ASCII data in placement")]
    NonAscii,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    /// Too many items in rank
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Not enough items in rank
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// Chess board
///
/// Holds 64 squares, each of them is either empty or occupied by one [`Chessman`]. The board
/// itself enforces no rules: it doesn't know whose turn it is and accepts any placement. Rules
/// are the business of [`Engine`](crate::Engine).
///
/// The board is `Copy`, so testing a move on a scratch copy is cheap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Chessman>; 64],
}

impl Board {
    /// Creates a board with no pieces at all
    #[inline]
    pub const fn empty() -> Board {
        Board { cells: [None; 64] }
    }

    /// Creates a board with the standard initial placement
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for color in [Color::White, Color::Black] {
            let back = geometry::castling_rank(color);
            let pawns = geometry::double_move_src_rank(color);
            for file in File::iter() {
                res.put(
                    Coord::from_parts(file, back),
                    Chessman::new(color, BACK_RANK[file.index()]),
                );
                res.put(
                    Coord::from_parts(file, pawns),
                    Chessman::new(color, Piece::Pawn),
                );
            }
        }
        res
    }

    /// Parses the piece placement part of FEN, like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`
    ///
    /// A piece is considered unmoved iff the standard initial position holds the same piece
    /// on the same square.
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        let cells = parse_cells(s)?;
        let initial = Board::initial();
        let mut res = Board::empty();
        for (idx, cell) in cells.into_iter().enumerate() {
            if let Some(man) = cell {
                let coord = Coord::from_index(idx);
                let moved = initial.get(coord) != Some(man);
                res.put(coord, man.with_moved(moved));
            }
        }
        Ok(res)
    }

    /// Converts the board into the piece placement part of FEN
    ///
    /// Does the same as `Board::to_string()`.
    #[inline]
    pub fn as_placement(&self) -> String {
        self.to_string()
    }

    #[inline]
    pub fn get(&self, c: Coord) -> Option<Chessman> {
        self.cells[c.index()]
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Chessman> {
        self.get(Coord::from_parts(file, rank))
    }

    /// Returns the contents of the square at `row` and `col`, failing if any of them is
    /// out of range
    pub fn at(&self, row: isize, col: isize) -> Result<Option<Chessman>, RangeError> {
        Ok(self.get(Coord::new(row, col)?))
    }

    #[inline]
    pub fn set(&mut self, c: Coord, cell: Option<Chessman>) {
        self.cells[c.index()] = cell;
    }

    #[inline]
    pub fn put(&mut self, c: Coord, man: Chessman) {
        self.set(c, Some(man));
    }

    /// Clears the square and returns the piece which stood there
    #[inline]
    pub fn clear(&mut self, c: Coord) -> Option<Chessman> {
        self.cells[c.index()].take()
    }

    /// Iterates over all the occupied squares
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Chessman)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|man| (Coord::from_index(idx), man)))
    }

    /// Iterates over the pieces of color `c`
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Coord, Chessman)> + '_ {
        self.iter().filter(move |(_, man)| man.color == c)
    }

    /// Returns the position of the king of color `c`
    pub fn king_pos(&self, c: Color) -> Result<Coord, RangeError> {
        self.pieces(c)
            .find(|(_, man)| man.piece == Piece::King)
            .map(|(coord, _)| coord)
            .ok_or(RangeError::NoKing(c))
    }

    /// Wraps the board to allow pretty-printing with the given style `style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

fn parse_cells(s: &str) -> Result<[Option<Chessman>; 64], PlacementParseError> {
    type Error = PlacementParseError;

    if !s.is_ascii() {
        return Err(Error::NonAscii);
    }

    let mut file = 0_usize;
    let mut rank = 0_usize;
    let mut pos = 0_usize;
    let mut cells = [None; 64];
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
                pos += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                rank += 1;
                file = 0;
                if rank >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                let man = Chessman::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                cells[pos] = Some(man);
                file += 1;
                pos += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Board::from_placement(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            if rank.index() != 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let man = match self.get2(file, rank) {
                    Some(man) => man,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", man)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const EMPTY: char;

    fn man(m: Chessman) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                let c = b.get2(file, rank).map(Self::man).unwrap_or(Self::EMPTY);
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const EMPTY: char = '.';

    fn man(m: Chessman) -> char {
        m.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const EMPTY: char = '.';

    fn man(m: Chessman) -> char {
        m.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}

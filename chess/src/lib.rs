//! # sanchess
//!
//! Chess rules engine: board state, move generation with full legality checking, castling,
//! en passant and promotion, game termination, draw offers, and moves in SAN and coordinate
//! notation.
//!
//! The main entry point is [`Engine`]:
//!
//! ```
//! use sanchess::{moves::San, Engine, GameResult};
//!
//! let mut engine = Engine::new();
//! for mv in ["f3", "e5", "g4", "Qh4#"] {
//!     engine.make(&San(mv)).unwrap();
//! }
//! assert_eq!(engine.result(), GameResult::BlackWin);
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod pgn;
pub mod types;

pub use sanchess_base::{geometry, rules};

pub use board::Board;
pub use engine::Engine;
pub use error::Error;
pub use movegen::MoveList;
pub use moves::Move;
pub use types::{CastlingSide, Chessman, Color, Coord, File, GameResult, Piece, PromotePiece, Rank};

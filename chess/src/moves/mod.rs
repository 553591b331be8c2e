mod base;

pub mod make;
pub mod san;
pub mod uci;

pub use base::*;
pub use make::{Make, San, Text, Uci};

pub type SanMove = san::Move;
pub type UciMove = uci::Move;

// 盤面関連のドメイン層

pub mod board;
pub mod cell;
pub mod error;
pub mod placement;
pub mod snapshot;

pub use board::{parse_next_beans, Board, Grid, NextBeans};
pub use cell::{Cell, Color};
pub use error::BoardError;
pub use placement::Move;
pub use snapshot::BoardSnapshot;

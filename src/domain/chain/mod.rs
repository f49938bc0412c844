// 連鎖関連のドメイン層 - 連結判定・消去・得点

pub mod bitboard;
pub mod connectivity;
pub mod resolver;
pub mod result;
pub mod score;
pub mod strategy;

pub use bitboard::BitboardEliminator;
pub use connectivity::connected_region;
pub use resolver::apply_gravity;
pub use result::{ChainStep, Combo};
pub use score::{round_score, CHAIN_POWER, COLOR_BONUS, GROUP_BONUS};
pub use strategy::{EliminationStrategy, Eliminator, ReferenceEliminator, RoundStats};

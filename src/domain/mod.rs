// ドメイン層 - 盤面と連鎖のルール

pub mod board;
pub mod chain;
pub mod nuisance;

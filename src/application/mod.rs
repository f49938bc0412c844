// アプリケーション層 - 設定と候補手の評価

pub mod config;
pub mod move_eval;

pub use config::{EngineConfig, WorkerCount};
pub use move_eval::{best_by_score, evaluate_moves, MoveOutcome};

// ぷよぷよ1 盤面シミュレーションエンジン - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod infrastructure; // インフラ層
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use application::{evaluate_moves, EngineConfig, MoveOutcome};
pub use constants::{H, SPAWN_COL, W};
pub use domain::board::{parse_next_beans, Board, BoardError, BoardSnapshot, Cell, Color, Move, NextBeans};
pub use domain::chain::{
    BitboardEliminator, ChainStep, Combo, EliminationStrategy, Eliminator, ReferenceEliminator,
};

// 盤面スナップショット（記録・テストフィクスチャ用のシリアライズ形式）

use serde::{Deserialize, Serialize};

use super::board::{parse_next_beans, Board};
use super::error::BoardError;
use crate::domain::chain::strategy::EliminationStrategy;

/// 上の行から並べた6文字の行12本と、ネクスト（例: "rg"）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_beans: Option<String>,
}

impl BoardSnapshot {
    /// 盤面に復元（参照実装の消去戦略）
    pub fn to_board(&self) -> Result<Board, BoardError> {
        let next_beans = self
            .next_beans
            .as_deref()
            .map(|s| parse_next_beans(s.as_bytes()))
            .transpose()?;
        Board::from_rows(&self.rows, next_beans)
    }
}

impl<E: EliminationStrategy> Board<E> {
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.to_rows(),
            next_beans: self
                .next_beans()
                .map(|(top, bottom)| [top.to_char(), bottom.to_char()].iter().collect()),
        }
    }
}

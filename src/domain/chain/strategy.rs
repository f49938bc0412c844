// 消去処理の戦略（参照実装とビットボード実装を差し替え可能にする）

use serde::{Deserialize, Serialize};

use super::bitboard::BitboardEliminator;
use super::connectivity::{connected_region, neighbors};
use super::score::{group_bonus, round_score};
use crate::constants::{H, W};
use crate::domain::board::{Cell, Color, Grid};

/// 消去1回分の集計
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundStats {
    /// 消えた色ぷよの数（巻き込まれたおじゃまは数えない）
    pub n_beans: u32,
    /// 連結ボーナスの合計
    pub group_bonus: u32,
    pub n_groups: u32,
    /// 消えた色のビット集合（bit = Color::index）
    pub colors: u8,
}

impl RoundStats {
    pub fn record_group(&mut self, color: Color, size: usize) {
        self.n_beans += size as u32;
        self.group_bonus += group_bonus(size);
        self.n_groups += 1;
        self.colors |= 1 << color.index();
    }

    pub fn n_colors(&self) -> u32 {
        self.colors.count_ones()
    }

    /// 何も消えなかったか
    pub fn is_empty(&self) -> bool {
        self.n_groups == 0
    }

    /// `round`（0始まり）番目の連鎖としての得点
    pub fn score(&self, round: usize) -> u64 {
        round_score(round, self.n_beans, self.n_colors(), self.group_bonus)
    }
}

/// 4個以上つながった同色グループと、それに上下左右で接するおじゃまを消す
pub trait EliminationStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// 1回分の消去を行い、集計を返す（重力は適用しない）
    fn eliminate(&self, grid: &mut Grid) -> RoundStats;
}

/// 参照実装: 列優先で走査し、塗りつぶしでグループを求める
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReferenceEliminator;

impl EliminationStrategy for ReferenceEliminator {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn eliminate(&self, grid: &mut Grid) -> RoundStats {
        let mut stats = RoundStats::default();
        let mut visited = [[false; H]; W];

        for x in 0..W {
            for y in 0..H {
                if visited[x][y] {
                    continue;
                }
                let Cell::Color(color) = grid[x][y] else {
                    continue;
                };

                let group = connected_region(grid, x, y);
                for &(gx, gy) in &group {
                    visited[gx][gy] = true;
                }
                if group.len() < 4 {
                    continue;
                }

                for &(gx, gy) in &group {
                    grid[gx][gy] = Cell::Empty;
                    for (nx, ny) in neighbors(gx, gy) {
                        if grid[nx][ny] == Cell::Nuisance {
                            grid[nx][ny] = Cell::Empty;
                        }
                    }
                }
                stats.record_group(color, group.len());
            }
        }
        stats
    }
}

/// 設定から選べる消去戦略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eliminator {
    #[default]
    Reference,
    Bitboard,
}

impl EliminationStrategy for Eliminator {
    fn name(&self) -> &'static str {
        match self {
            Eliminator::Reference => ReferenceEliminator.name(),
            Eliminator::Bitboard => BitboardEliminator.name(),
        }
    }

    fn eliminate(&self, grid: &mut Grid) -> RoundStats {
        match self {
            Eliminator::Reference => ReferenceEliminator.eliminate(grid),
            Eliminator::Bitboard => BitboardEliminator.eliminate(grid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::Board;

    fn grid(rows: &[&str]) -> Grid {
        *Board::from_rows(rows, None).unwrap().cells()
    }

    #[test]
    fn removes_group_and_adjacent_nuisance() {
        let mut g = grid(&["rrrrk "]);
        let stats = ReferenceEliminator.eliminate(&mut g);
        assert_eq!(stats.n_beans, 4);
        assert_eq!(stats.n_groups, 1);
        assert_eq!(stats.n_colors(), 1);
        assert_eq!(g, grid(&[]));
    }

    #[test]
    fn keeps_diagonal_nuisance_and_small_groups() {
        let mut g = grid(&["    k ", "rrrrg "]);
        let stats = ReferenceEliminator.eliminate(&mut g);
        assert_eq!(stats.n_beans, 4);
        assert_eq!(g, grid(&["    k ", "    g "]));
    }

    #[test]
    fn nothing_to_eliminate() {
        let mut g = grid(&["kk    ", "kkrgby"]);
        let before = g;
        let stats = ReferenceEliminator.eliminate(&mut g);
        assert!(stats.is_empty());
        assert_eq!(g, before);
    }

    #[test]
    fn counts_each_group_separately() {
        let mut g = grid(&["gggggb", "rrrrbb", "yyyyyb"]);
        let stats = ReferenceEliminator.eliminate(&mut g);
        assert_eq!(stats.n_groups, 4);
        assert_eq!(stats.n_beans, 18);
        assert_eq!(stats.n_colors(), 4);
        // 5個(g) + 5個(y) + 4個(r) + 4個(b)
        assert_eq!(stats.group_bonus, 4);
    }

    #[test]
    fn enum_dispatches_to_both_implementations() {
        let rows = ["  rk k", "yrrrgk", "yygggk"];
        for eliminator in [Eliminator::Reference, Eliminator::Bitboard] {
            let mut g = grid(&rows);
            let stats = eliminator.eliminate(&mut g);
            assert_eq!(stats.n_beans, 8, "{}", eliminator.name());
            assert_eq!(g, grid(&["     k", "y     ", "yy    "]));
        }
    }
}

// 落下 → 消去 → 重力 の連鎖処理と得点集計

use super::result::{ChainStep, Combo};
use super::strategy::EliminationStrategy;
use crate::constants::{SPAWN_COL, W};
use crate::domain::board::{Board, BoardError, Cell, Color, Grid, Move, NextBeans};
use crate::vlog;

/// 重力適用: 各列の空でないセルを順序を保って下に詰める
pub fn apply_gravity(grid: &mut Grid) {
    for column in grid.iter_mut() {
        let mut lowest_free = 0;
        for y in 0..column.len() {
            if !column[y].is_empty() {
                column.swap(lowest_free, y);
                lowest_free += 1;
            }
        }
    }
}

impl<E: EliminationStrategy> Board<E> {
    /// 複数のぷよを同時に落とし、連鎖を最後まで処理する
    ///
    /// 同じ列への落下は呼び出し順に下から積まれる。埋まっている列への落下は捨てる。
    /// 空の `drops` でも連鎖判定は行う。
    pub fn drop_beans(&mut self, drops: &[(usize, Color)]) -> Result<Combo, BoardError> {
        if self.is_game_over() {
            return Err(BoardError::GameOver);
        }
        if let Some(&(x, _)) = drops.iter().find(|(x, _)| *x >= W) {
            return Err(BoardError::OutOfRange { x, y: 0 });
        }

        for &(x, color) in drops {
            match self.drop_at(x, Cell::Color(color)) {
                Ok(_) => {}
                Err(BoardError::ColumnFull(col)) => {
                    vlog!("[連鎖] 列{}が埋まっているため {:?} を捨てます", col, color);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(self.resolve_chain())
    }

    /// 1個だけ落とす
    pub fn drop_bean(&mut self, column: usize, color: Color) -> Result<Combo, BoardError> {
        self.drop_beans(&[(column, color)])
    }

    fn resolve_chain(&mut self) -> Combo {
        let mut combo = Combo::new();
        let mut round = 0usize;

        loop {
            let mut grid = *self.cells();
            let stats = self.eliminator().eliminate(&mut grid);
            if stats.is_empty() {
                break;
            }
            apply_gravity(&mut grid);
            *self.cells_mut() = grid;

            let score = stats.score(round);
            vlog!(
                "[連鎖] {}連鎖目: 消去={} 色数={} グループ={} 連結ボーナス={} 得点={}",
                round + 1,
                stats.n_beans,
                stats.n_colors(),
                stats.n_groups,
                stats.group_bonus,
                score
            );
            combo.add_step(ChainStep {
                n_beans: stats.n_beans,
                n_colors: stats.n_colors(),
                group_bonus: stats.group_bonus,
                score,
            });
            round += 1;
        }

        combo
    }

    /// ペアを置く（ゲームで実際に打てる手のみ）
    ///
    /// `beans` は (上のぷよ, 下のぷよ)。打てない手なら `None`。
    /// 3列目が最上段まで埋まった状態で (3列目, 回転0) を打つとゲームオーバーになる。
    pub fn make_move(&mut self, beans: NextBeans, mv: Move) -> Option<Combo> {
        if !self.can_make_move(mv) {
            return None;
        }

        if mv.position() == SPAWN_COL && mv.rotation() == 0 && !self.has_room(SPAWN_COL) {
            vlog!("[手] 3列目が埋まっているためゲームオーバー");
            self.mark_game_over();
            return Some(Combo::game_over());
        }

        let (top, bottom) = beans;
        // 180度回すと上下が入れ替わる
        let (first, second) = if mv.rotation() > 1 { (top, bottom) } else { (bottom, top) };
        let drops = if mv.is_horizontal() {
            [(mv.position(), first), (mv.position() + 1, second)]
        } else {
            [(mv.position(), first), (mv.position(), second)]
        };
        match self.drop_beans(&drops) {
            Ok(combo) => Some(combo),
            Err(e) => {
                // 合法手の判定を通った後には起きない
                debug_assert!(false, "合法手の落下に失敗: {:?} {}", mv, e);
                vlog!("[手] {:?} の落下に失敗: {}", mv, e);
                None
            }
        }
    }
}

// おじゃまぷよの落下

use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::W;
use crate::domain::board::{Board, BoardError, Cell};
use crate::domain::chain::EliminationStrategy;
use crate::vlog;

impl<E: EliminationStrategy> Board<E> {
    /// おじゃまを `n` 個降らせ、実際に置けた個数を返す
    ///
    /// 各列に `n / 6` 個ずつ、余りはランダムに選んだ別々の列に1個ずつ。
    /// 列に入りきらない分は捨てる。消去判定は行わない。
    pub fn drop_nuisance(&mut self, n: usize) -> Result<usize, BoardError> {
        self.drop_nuisance_with_rng(n, &mut rand::thread_rng())
    }

    /// 乱数生成器を指定して `drop_nuisance` する
    pub fn drop_nuisance_with_rng<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<usize, BoardError> {
        if self.is_game_over() {
            return Err(BoardError::GameOver);
        }

        let mut counts = [n / W; W];
        let columns: [usize; W] = std::array::from_fn(|x| x);
        for &x in columns.choose_multiple(rng, n % W) {
            counts[x] += 1;
        }

        let mut placed = 0;
        for (x, &count) in counts.iter().enumerate() {
            let mut dropped = 0;
            while dropped < count {
                match self.drop_at(x, Cell::Nuisance) {
                    Ok(_) => dropped += 1,
                    Err(BoardError::ColumnFull(_)) => break,
                    Err(e) => return Err(e),
                }
            }
            if dropped < count {
                vlog!("[おじゃま] 列{}に入りきらない {} 個を捨てます", x, count - dropped);
            }
            placed += dropped;
        }
        Ok(placed)
    }

    /// おじゃまを1個だけ列に落とす。列が埋まっていれば何もせず `false`
    pub fn drop_black_bean(&mut self, column: usize) -> Result<bool, BoardError> {
        match self.drop_at(column, Cell::Nuisance) {
            Ok(_) => Ok(true),
            Err(BoardError::ColumnFull(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

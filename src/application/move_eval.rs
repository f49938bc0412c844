// 候補手の並列評価

use rayon::prelude::*;
use std::sync::atomic::Ordering;

use crate::domain::board::{Board, Move, NextBeans};
use crate::domain::chain::{Combo, EliminationStrategy};
use crate::infrastructure::executor::ParallelExecutor;
use crate::vlog;

/// 1手を打った結果
#[derive(Clone, Debug)]
pub struct MoveOutcome<E> {
    pub mv: Move,
    pub combo: Combo,
    /// 打った後の盤面
    pub board: Board<E>,
}

/// 打てる手をすべて盤面のコピー上で試す
///
/// 結果は `iter_moves()` の順。中断フラグが立った後の候補は飛ばす。
pub fn evaluate_moves<E>(
    board: &Board<E>,
    beans: NextBeans,
    executor: &ParallelExecutor,
) -> Vec<MoveOutcome<E>>
where
    E: EliminationStrategy + Clone,
{
    let moves: Vec<Move> = board.iter_moves().collect();
    let abort = executor.abort_flag();
    vlog!("[評価] 候補手 {} 件（ワーカー {}）", moves.len(), executor.num_workers());

    let outcomes: Vec<MoveOutcome<E>> = executor.install(|| {
        moves
            .par_iter()
            .filter_map(|&mv| {
                if abort.load(Ordering::Relaxed) {
                    return None;
                }
                let mut next = board.copy();
                let combo = next.make_move(beans, mv)?;
                Some(MoveOutcome { mv, combo, board: next })
            })
            .collect()
    });

    if outcomes.len() < moves.len() {
        vlog!("[評価] 中断: {} / {} 件を評価", outcomes.len(), moves.len());
    }
    outcomes
}

/// 得点が最も高い結果（同点なら先に列挙された手）
pub fn best_by_score<E>(outcomes: &[MoveOutcome<E>]) -> Option<&MoveOutcome<E>> {
    outcomes.iter().fold(None, |best, o| match best {
        Some(b) if b.combo.score >= o.combo.score => Some(b),
        _ => Some(o),
    })
}

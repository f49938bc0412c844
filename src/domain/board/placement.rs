// ペア配置の合法性判定と1列落下

use super::board::Board;
use super::cell::Cell;
use super::error::BoardError;
use crate::constants::{SPAWN_COL, W};
use crate::domain::chain::strategy::EliminationStrategy;

/// 手 = (位置, 回転)
///
/// `rotation` は縦置きペアを時計回りに90度回した回数（0..=3）。
/// 偶数回転は縦置きで `position` は 0..=5、奇数回転は横置きで
/// `position` と `position + 1` の2列を占めるため 0..=4。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    position: usize,
    rotation: u8,
}

impl Move {
    pub fn new(position: usize, rotation: u8) -> Result<Self, BoardError> {
        if rotation > 3 || position >= Self::position_count(rotation) {
            return Err(BoardError::InvalidMove { position, rotation });
        }
        Ok(Self { position, rotation })
    }

    #[inline]
    fn position_count(rotation: u8) -> usize {
        if rotation % 2 == 1 {
            W - 1
        } else {
            W
        }
    }

    pub fn position(self) -> usize {
        self.position
    }

    pub fn rotation(self) -> u8 {
        self.rotation
    }

    pub fn is_horizontal(self) -> bool {
        self.rotation % 2 == 1
    }

    /// ペアが着地する一番右の列
    pub fn far_column(self) -> usize {
        if self.is_horizontal() {
            self.position + 1
        } else {
            self.position
        }
    }

    /// 形として可能な全22手（回転 0..3 × 位置）
    pub fn all() -> impl Iterator<Item = Move> {
        (0..4u8).flat_map(|rotation| {
            (0..Self::position_count(rotation)).map(move |position| Move { position, rotation })
        })
    }
}

impl<E: EliminationStrategy> Board<E> {
    /// 列の最下段の空きにセルを置き、置いた y を返す
    pub fn drop_at(&mut self, column: usize, cell: Cell) -> Result<usize, BoardError> {
        if column >= W {
            return Err(BoardError::OutOfRange { x: column, y: 0 });
        }
        if self.is_game_over() {
            return Err(BoardError::GameOver);
        }
        let y = self.column_height(column);
        self.set(column, y, cell)
            .map_err(|_| BoardError::ColumnFull(column))?;
        Ok(y)
    }

    /// この手が打てるか
    ///
    /// ペアは3列目に出現し、目標列まで横に移動してから落下する。
    /// 途中の列（出現列と目標列を含む）の最上段が埋まっていれば通れない。
    /// 回転するには2列目か4列目のどちらかの最上段が空いている必要がある。
    /// (3列目, 回転0) だけは常に合法で、3列目が埋まっていればゲームオーバーになる。
    pub fn can_make_move(&self, mv: Move) -> bool {
        if self.is_game_over() {
            return false;
        }

        if mv.position == SPAWN_COL && mv.rotation == 0 {
            return true;
        }

        if mv.rotation != 0 && !self.has_room(SPAWN_COL - 1) && !self.has_room(SPAWN_COL + 1) {
            return false;
        }

        let (lo, hi) = if mv.position >= SPAWN_COL {
            (SPAWN_COL, mv.far_column())
        } else {
            (mv.position, SPAWN_COL)
        };
        (lo..=hi).all(|x| self.has_room(x))
    }

    /// 現在打てる手を列挙（呼び出すたびに最初から）
    pub fn iter_moves(&self) -> impl Iterator<Item = Move> + '_ {
        Move::all().filter(move |&mv| self.can_make_move(mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::H;
    use crate::domain::board::Color;

    fn board_from_drops(columns: &[usize]) -> Board {
        let mut board = Board::new();
        for (i, &x) in columns.iter().enumerate() {
            let color = if i % 2 == 0 { Color::Red } else { Color::Green };
            let _ = board.drop_at(x, Cell::Color(color));
        }
        board
    }

    fn can(board: &Board, position: usize, rotation: u8) -> bool {
        board.can_make_move(Move::new(position, rotation).unwrap())
    }

    #[test]
    fn move_new_validates_ranges() {
        assert!(Move::new(5, 0).is_ok());
        assert!(Move::new(5, 2).is_ok());
        assert!(Move::new(4, 1).is_ok());
        assert_eq!(
            Move::new(5, 1),
            Err(BoardError::InvalidMove { position: 5, rotation: 1 })
        );
        assert!(Move::new(5, 3).is_err());
        assert!(Move::new(6, 0).is_err());
        assert!(Move::new(0, 4).is_err());
    }

    #[test]
    fn all_moves_are_rotation_major() {
        let moves: Vec<Move> = Move::all().collect();
        assert_eq!(moves.len(), 22);
        assert_eq!(moves[0], Move::new(0, 0).unwrap());
        assert_eq!(moves[6], Move::new(0, 1).unwrap());
        assert_eq!(moves[21], Move::new(4, 3).unwrap());
    }

    #[test]
    fn drop_at_stacks_and_reports_full() {
        let mut board = Board::new();
        for y in 0..H {
            assert_eq!(board.drop_at(0, Cell::Nuisance), Ok(y));
        }
        let before = board.copy();
        assert_eq!(board.drop_at(0, Cell::Nuisance), Err(BoardError::ColumnFull(0)));
        assert_eq!(board, before);
        assert_eq!(
            board.drop_at(W, Cell::Nuisance),
            Err(BoardError::OutOfRange { x: W, y: 0 })
        );
    }

    #[test]
    fn empty_board_allows_every_move() {
        let board = Board::new();
        assert_eq!(board.iter_moves().count(), 22);
    }

    #[test]
    fn first_column_filled() {
        let board = board_from_drops(&[0; H]);
        for r in 0..4 {
            assert!(!can(&board, 0, r));
            assert!(can(&board, 1, r));
        }
    }

    #[test]
    fn one_space_left_in_first_column() {
        let board = board_from_drops(&[0; H - 1]);
        for r in 0..4 {
            assert!(can(&board, 0, r));
        }
    }

    #[test]
    fn first_column_blocked_by_second() {
        let board = board_from_drops(&[1; H]);
        for r in 0..4 {
            assert!(!can(&board, 0, r));
            assert!(!can(&board, 1, r));
            assert!(can(&board, 2, r));
        }
    }

    #[test]
    fn sixth_column_blocked_by_fifth() {
        let board = board_from_drops(&[4; H]);
        assert!(!can(&board, 5, 0));
        assert!(!can(&board, 5, 2));
        for r in 0..4 {
            assert!(!can(&board, 4, r));
            assert_eq!(can(&board, 3, r), r % 2 == 0);
        }
    }

    #[test]
    fn no_room_to_rotate_when_boxed_in() {
        let mut columns = vec![1; H];
        columns.extend(vec![3; H]);
        let board = board_from_drops(&columns);
        assert!(can(&board, 2, 0));
        assert!(!can(&board, 2, 1));
        assert!(!can(&board, 2, 2));
        assert!(!can(&board, 2, 3));
        assert_eq!(board.iter_moves().collect::<Vec<_>>(), vec![Move::new(2, 0).unwrap()]);
    }

    #[test]
    fn full_spawn_column_leaves_only_the_losing_move() {
        let board = board_from_drops(&[2; H]);
        assert_eq!(board.iter_moves().collect::<Vec<_>>(), vec![Move::new(2, 0).unwrap()]);
    }

    #[test]
    fn legality_depends_only_on_top_rows() {
        let a = board_from_drops(&[0, 0, 4, 5, 5]);
        let b = Board::from_rows(&["k   kk", "k   kk"], None).unwrap();
        let legal_a: Vec<Move> = a.iter_moves().collect();
        let legal_b: Vec<Move> = b.iter_moves().collect();
        assert_eq!(legal_a, legal_b);
        assert_eq!(legal_a.len(), 22);
    }
}

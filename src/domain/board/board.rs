// Board型 - 6×12の盤面を表現

use std::fmt;

use super::cell::{Cell, Color};
use super::error::BoardError;
use crate::constants::{H, W};
use crate::domain::chain::strategy::{EliminationStrategy, ReferenceEliminator};

/// 列優先のセル配列（grid[x][y]、y=0 が最下段）
pub type Grid = [[Cell; H]; W];

/// ネクストのペア（上のぷよ, 下のぷよ）
pub type NextBeans = (Color, Color);

/// 6×12の盤面
///
/// セルは値で保持するため `copy()` は完全に独立したスナップショットになる。
/// 消去処理は構築時に注入された `EliminationStrategy` が担う。
#[derive(Clone, Debug)]
pub struct Board<E = ReferenceEliminator> {
    cells: Grid,
    next_beans: Option<NextBeans>,
    game_over: bool,
    eliminator: E,
}

impl Board {
    /// 新しい空の盤面を作成
    pub fn new() -> Self {
        Self::with_strategy(ReferenceEliminator)
    }

    /// 検証済みのセル配列から構築
    pub fn from_cells(cells: Grid, next_beans: Option<NextBeans>) -> Self {
        Self {
            cells,
            next_beans,
            game_over: false,
            eliminator: ReferenceEliminator,
        }
    }

    /// 列ごとのバイト列（6列×12段、下から）から構築
    pub fn from_columns<C: AsRef<[u8]>>(
        columns: &[C],
        next_beans: Option<NextBeans>,
    ) -> Result<Self, BoardError> {
        if columns.len() != W {
            return Err(BoardError::WrongDimensions {
                expected: W,
                actual: columns.len(),
            });
        }

        let mut cells = [[Cell::Empty; H]; W];
        for (x, column) in columns.iter().enumerate() {
            let column = column.as_ref();
            if column.len() != H {
                return Err(BoardError::WrongDimensions {
                    expected: H,
                    actual: column.len(),
                });
            }
            for (y, &byte) in column.iter().enumerate() {
                cells[x][y] = Cell::from_char(byte as char)?;
            }
        }

        Ok(Self::from_cells(cells, next_beans))
    }

    /// 行の文字列表現から構築
    ///
    /// 行は見た目どおり上から並べる（最後の行が y=0）。足りない上段は空で埋める。
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        next_beans: Option<NextBeans>,
    ) -> Result<Self, BoardError> {
        if rows.len() > H {
            return Err(BoardError::WrongDimensions {
                expected: H,
                actual: rows.len(),
            });
        }

        let mut cells = [[Cell::Empty; H]; W];
        for (i, row) in rows.iter().enumerate() {
            let y = rows.len() - 1 - i;
            let chars: Vec<char> = row.as_ref().chars().collect();
            if chars.len() != W {
                return Err(BoardError::WrongDimensions {
                    expected: W,
                    actual: chars.len(),
                });
            }
            for (x, &ch) in chars.iter().enumerate() {
                cells[x][y] = Cell::from_char(ch)?;
            }
        }

        Ok(Self::from_cells(cells, next_beans))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EliminationStrategy> Board<E> {
    /// 消去戦略を注入して空の盤面を作成
    pub fn with_strategy(eliminator: E) -> Self {
        Self {
            cells: [[Cell::Empty; H]; W],
            next_beans: None,
            game_over: false,
            eliminator,
        }
    }

    /// セルはそのままに消去戦略だけ差し替える
    pub fn into_strategy<F: EliminationStrategy>(self, eliminator: F) -> Board<F> {
        Board {
            cells: self.cells,
            next_beans: self.next_beans,
            game_over: self.game_over,
            eliminator,
        }
    }

    pub fn eliminator(&self) -> &E {
        &self.eliminator
    }

    /// セルを取得
    pub fn get(&self, x: usize, y: usize) -> Result<Cell, BoardError> {
        if x >= W || y >= H {
            return Err(BoardError::OutOfRange { x, y });
        }
        Ok(self.cells[x][y])
    }

    /// セルを設定
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<(), BoardError> {
        if x >= W || y >= H {
            return Err(BoardError::OutOfRange { x, y });
        }
        self.cells[x][y] = cell;
        Ok(())
    }

    /// 文字でセルを設定（不正な文字は InvalidCell）
    pub fn set_char(&mut self, x: usize, y: usize, ch: char) -> Result<(), BoardError> {
        let cell = Cell::from_char(ch)?;
        self.set(x, y, cell)
    }

    /// 盤面全体への直接アクセス（読み取り専用）
    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Grid {
        &mut self.cells
    }

    pub fn next_beans(&self) -> Option<NextBeans> {
        self.next_beans
    }

    pub fn set_next_beans(&mut self, next_beans: Option<NextBeans>) {
        self.next_beans = next_beans;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub(crate) fn mark_game_over(&mut self) {
        self.game_over = true;
    }

    /// 独立したコピーを返す
    pub fn copy(&self) -> Self
    where
        E: Clone,
    {
        self.clone()
    }

    /// 指定セルの個数
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// 空でないセルの個数
    pub fn count_any(&self) -> usize {
        self.cells.iter().flatten().filter(|c| !c.is_empty()).count()
    }

    /// 列の最下段の空きの y（＝高さ）。埋まっていれば H。`x < W` が前提
    pub(crate) fn column_height(&self, x: usize) -> usize {
        self.cells[x].iter().position(|c| c.is_empty()).unwrap_or(H)
    }

    /// 全列の高さ
    pub fn heights(&self) -> [usize; W] {
        let mut heights = [0; W];
        for (x, h) in heights.iter_mut().enumerate() {
            *h = self.column_height(x);
        }
        heights
    }

    /// 最上段が空いているか。`x < W` が前提
    #[inline]
    pub(crate) fn has_room(&self, x: usize) -> bool {
        self.cells[x][H - 1].is_empty()
    }

    /// 上の行から順に文字列化（空は ' '）
    pub fn to_rows(&self) -> Vec<String> {
        (0..H)
            .rev()
            .map(|y| (0..W).map(|x| self.cells[x][y].to_char()).collect())
            .collect()
    }
}

/// ネクストのバイト列（例: b"rg"）を検証して変換
pub fn parse_next_beans(bytes: &[u8]) -> Result<NextBeans, BoardError> {
    let invalid = || BoardError::InvalidNextBeans(String::from_utf8_lossy(bytes).into_owned());
    match bytes {
        [top, bottom] => {
            let top = Color::from_char(*top as char).map_err(|_| invalid())?;
            let bottom = Color::from_char(*bottom as char).map_err(|_| invalid())?;
            Ok((top, bottom))
        }
        _ => Err(invalid()),
    }
}

/// 盤面の一致はセルとネクストのみで判定する
impl<E, F> PartialEq<Board<F>> for Board<E> {
    fn eq(&self, other: &Board<F>) -> bool {
        self.cells == other.cells && self.next_beans == other.next_beans
    }
}

impl<E> Eq for Board<E> {}

impl<E> fmt::Display for Board<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..H).rev() {
            let line: String = (0..W).map(|x| self.cells[x][y].label_char()).collect();
            writeln!(f, "{}", line)?;
        }
        if let Some((top, bottom)) = self.next_beans {
            writeln!(f, "next: {}{}", top.to_char(), bottom.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::BitboardEliminator;

    #[test]
    fn new_board_is_all_empty() {
        let board = Board::new();
        for x in 0..W {
            for y in 0..H {
                assert_eq!(board.get(x, y), Ok(Cell::Empty));
            }
        }
        assert_eq!(board.next_beans(), None);
        assert!(!board.is_game_over());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut board = Board::new();
        assert_eq!(board.get(W, 0), Err(BoardError::OutOfRange { x: W, y: 0 }));
        assert_eq!(board.get(0, H), Err(BoardError::OutOfRange { x: 0, y: H }));
        assert!(board.set(W, 0, Cell::Nuisance).is_err());
        assert!(board.set(0, H, Cell::Nuisance).is_err());
    }

    #[test]
    fn set_and_get_work() {
        let mut board = Board::new();
        board.set(1, 1, Cell::Color(Color::Red)).unwrap();
        assert_eq!(board.get(1, 1), Ok(Cell::Color(Color::Red)));
        board.set_char(1, 1, 'g').unwrap();
        assert_eq!(board.get(1, 1), Ok(Cell::Color(Color::Green)));
        assert_eq!(board.set_char(1, 1, 'z'), Err(BoardError::InvalidCell('z')));
    }

    #[test]
    fn copy_is_independent() {
        let mut board = Board::new();
        board.set(1, 1, Cell::Color(Color::Red)).unwrap();
        let copy = board.copy();

        board.set(1, 1, Cell::Color(Color::Green)).unwrap();
        assert_eq!(board.get(1, 1), Ok(Cell::Color(Color::Green)));
        assert_eq!(copy.get(1, 1), Ok(Cell::Color(Color::Red)));
        assert_ne!(board, copy);
    }

    #[test]
    fn from_rows_puts_last_row_at_bottom() {
        let board = Board::from_rows(&["   r  ", "rrrggg"], None).unwrap();
        assert_eq!(board.get(3, 1), Ok(Cell::Color(Color::Red)));
        assert_eq!(board.get(5, 0), Ok(Cell::Color(Color::Green)));
        assert_eq!(board.get(0, 1), Ok(Cell::Empty));
        assert_eq!(board.count_any(), 7);
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        assert_eq!(
            Board::from_rows(&["rrr"], None),
            Err(BoardError::WrongDimensions { expected: W, actual: 3 })
        );
        assert_eq!(
            Board::from_rows(&["rr x  "], None),
            Err(BoardError::InvalidCell('x'))
        );
        let too_many = vec!["      "; H + 1];
        assert!(Board::from_rows(&too_many, None).is_err());
    }

    #[test]
    fn from_columns_validates_dimensions_and_cells() {
        let good: Vec<Vec<u8>> = (0..W).map(|_| b"rg          ".to_vec()).collect();
        let board = Board::from_columns(&good, Some((Color::Blue, Color::Yellow))).unwrap();
        assert_eq!(board.count(Cell::Color(Color::Red)), W);
        assert_eq!(board.next_beans(), Some((Color::Blue, Color::Yellow)));

        let short: Vec<Vec<u8>> = (0..W - 1).map(|_| vec![b' '; H]).collect();
        assert_eq!(
            Board::from_columns(&short, None),
            Err(BoardError::WrongDimensions { expected: W, actual: W - 1 })
        );

        let mut bad_height: Vec<Vec<u8>> = (0..W).map(|_| vec![b' '; H]).collect();
        bad_height[3].pop();
        assert!(Board::from_columns(&bad_height, None).is_err());

        let mut bad_cell: Vec<Vec<u8>> = (0..W).map(|_| vec![b' '; H]).collect();
        bad_cell[2][4] = b'Q';
        assert_eq!(
            Board::from_columns(&bad_cell, None),
            Err(BoardError::InvalidCell('Q'))
        );
    }

    #[test]
    fn parse_next_beans_accepts_only_two_colors() {
        assert_eq!(parse_next_beans(b"rg"), Ok((Color::Red, Color::Green)));
        assert!(parse_next_beans(b"rk").is_err());
        assert!(parse_next_beans(b" r").is_err());
        assert!(parse_next_beans(b"rgb").is_err());
        assert!(parse_next_beans(b"").is_err());
    }

    #[test]
    fn equality_ignores_strategy_but_not_next_beans() {
        let a = Board::from_rows(&["rgbypk"], None).unwrap();
        let b = a.copy().into_strategy(BitboardEliminator);
        assert_eq!(a, b);

        let mut c = a.copy();
        c.set_next_beans(Some((Color::Red, Color::Red)));
        assert_ne!(a, c);
    }

    #[test]
    fn count_and_heights() {
        let board = Board::from_rows(&["k     ", "kr   g"], None).unwrap();
        assert_eq!(board.count(Cell::Nuisance), 2);
        assert_eq!(board.count(Cell::Color(Color::Red)), 1);
        assert_eq!(board.count_any(), 4);
        assert_eq!(board.heights(), [2, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn heights_match_each_column() {
        let board = Board::from_rows(&vec!["k    r"; H], None).unwrap();
        let heights = board.heights();
        for x in 0..W {
            assert_eq!(heights[x], board.column_height(x));
            assert_eq!(board.has_room(x), heights[x] < H);
        }
        assert_eq!(heights, [H, 0, 0, 0, 0, H]);
    }

    #[test]
    fn display_and_to_rows() {
        let board = Board::from_rows(&["rr k  "], Some((Color::Green, Color::Purple))).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), H + 1);
        assert_eq!(lines[H - 1], "rr.k..");
        assert_eq!(lines[H], "next: gp");

        let rows = board.to_rows();
        assert_eq!(rows.len(), H);
        assert_eq!(rows[H - 1], "rr k  ");
        assert_eq!(Board::from_rows(&rows, board.next_beans()).unwrap(), board);
    }
}

// セル型定義（ドメイン層）

use super::error::BoardError;
use serde::{Deserialize, Serialize};

/// プレイ可能なぷよの色（5色）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl Color {
    pub const COUNT: usize = 5;
    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// 文字から色に変換（'r','g','b','y','p'）
    pub fn from_char(ch: char) -> Result<Self, BoardError> {
        match ch {
            'r' => Ok(Color::Red),
            'g' => Ok(Color::Green),
            'b' => Ok(Color::Blue),
            'y' => Ok(Color::Yellow),
            'p' => Ok(Color::Purple),
            _ => Err(BoardError::InvalidCell(ch)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Color::Red => 'r',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Yellow => 'y',
            Color::Purple => 'p',
        }
    }
}

/// 盤面の1マス（空・おじゃま・色ぷよ の7値）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Nuisance, // 'k'
    Color(Color),
}

impl Cell {
    pub const ALL: [Cell; 7] = [
        Cell::Empty,
        Cell::Nuisance,
        Cell::Color(Color::Red),
        Cell::Color(Color::Green),
        Cell::Color(Color::Blue),
        Cell::Color(Color::Yellow),
        Cell::Color(Color::Purple),
    ];

    /// 文字からCellに変換
    pub fn from_char(ch: char) -> Result<Self, BoardError> {
        match ch {
            ' ' | '.' => Ok(Cell::Empty),
            'k' => Ok(Cell::Nuisance),
            _ => Color::from_char(ch).map(Cell::Color),
        }
    }

    /// 入力形式の文字（空は ' '）
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Nuisance => 'k',
            Cell::Color(c) => c.to_char(),
        }
    }

    /// 表示用の文字（空は '.'）
    pub fn label_char(self) -> char {
        match self {
            Cell::Empty => '.',
            other => other.to_char(),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Color(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        Cell::Color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_char_converts_correctly() {
        assert_eq!(Cell::from_char(' ').unwrap(), Cell::Empty);
        assert_eq!(Cell::from_char('.').unwrap(), Cell::Empty);
        assert_eq!(Cell::from_char('k').unwrap(), Cell::Nuisance);
        assert_eq!(Cell::from_char('r').unwrap(), Cell::Color(Color::Red));
        assert_eq!(Cell::from_char('p').unwrap(), Cell::Color(Color::Purple));
    }

    #[test]
    fn from_char_rejects_invalid() {
        assert_eq!(Cell::from_char('x'), Err(BoardError::InvalidCell('x')));
        assert_eq!(Cell::from_char('R'), Err(BoardError::InvalidCell('R')));
        assert!(Color::from_char('k').is_err());
        assert!(Color::from_char(' ').is_err());
    }

    #[test]
    fn to_char_roundtrip() {
        for cell in Cell::ALL {
            assert_eq!(Cell::from_char(cell.to_char()).unwrap(), cell);
            assert_eq!(Cell::from_char(cell.label_char()).unwrap(), cell);
        }
    }

    #[test]
    fn color_index_matches_order() {
        for (i, color) in Color::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
        assert_eq!(Cell::Nuisance.color(), None);
        assert_eq!(Cell::from(Color::Blue).color(), Some(Color::Blue));
    }
}

// 盤面操作のエラー型

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("座標が範囲外: ({x}, {y})")]
    OutOfRange { x: usize, y: usize },

    #[error("不正なセル値: {0:?}")]
    InvalidCell(char),

    #[error("盤面サイズが不正: 期待{expected}、実際{actual}")]
    WrongDimensions { expected: usize, actual: usize },

    #[error("ネクストが不正: {0:?}")]
    InvalidNextBeans(String),

    #[error("不正な手: position={position}, rotation={rotation}")]
    InvalidMove { position: usize, rotation: u8 },

    #[error("列{0}が埋まっています")]
    ColumnFull(usize),

    #[error("ゲームオーバー後の操作")]
    GameOver,
}

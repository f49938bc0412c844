// 連鎖結果の定義

use serde::{Deserialize, Serialize};

/// 落下1回で起きた連鎖の結果
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    /// 得点の合計
    pub score: u64,
    /// 消えた色ぷよの総数
    pub n_beans: u32,
    /// 連鎖数（消去が起きたラウンド数）
    pub length: u32,
    /// 3列目が埋まっていてゲームオーバーになったか
    pub game_over: bool,
    /// 各ラウンドの詳細
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<ChainStep>,
}

impl Combo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_over() -> Self {
        Self {
            game_over: true,
            ..Self::default()
        }
    }

    pub fn add_step(&mut self, step: ChainStep) {
        self.score += step.score;
        self.n_beans += step.n_beans;
        self.length += 1;
        self.steps.push(step);
    }

    /// 何か消えたか
    pub fn is_chain(&self) -> bool {
        self.length > 0
    }
}

/// 連鎖の1ラウンド
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStep {
    pub n_beans: u32,
    pub n_colors: u32,
    pub group_bonus: u32,
    pub score: u64,
}

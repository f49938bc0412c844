// 得点計算（ぷよぷよ1の連鎖ボーナス表）

/// 連鎖ボーナス（0始まりの連鎖ラウンドで引く。表を超えたら末尾）
pub const CHAIN_POWER: [u32; 9] = [0, 8, 16, 32, 64, 128, 256, 512, 999];

/// 色数ボーナス（同時に消えた色数で引く）
pub const COLOR_BONUS: [u32; 6] = [0, 0, 3, 6, 12, 24];

/// 連結ボーナス（グループのサイズで引く。4未満は消えない）
pub const GROUP_BONUS: [u32; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];

pub const MIN_MULTIPLIER: u32 = 1;
pub const MAX_MULTIPLIER: u32 = 999;

#[inline]
fn lookup(table: &[u32], index: usize) -> u32 {
    table[index.min(table.len() - 1)]
}

pub fn chain_power(round: usize) -> u32 {
    lookup(&CHAIN_POWER, round)
}

pub fn color_bonus(n_colors: usize) -> u32 {
    lookup(&COLOR_BONUS, n_colors)
}

pub fn group_bonus(group_size: usize) -> u32 {
    lookup(&GROUP_BONUS, group_size)
}

/// ボーナス合計を 1..=999 に丸めた倍率
pub fn multiplier(round: usize, n_colors: u32, group_bonus: u32) -> u32 {
    let total = chain_power(round) + color_bonus(n_colors as usize) + group_bonus;
    total.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

/// 1ラウンドの得点 = 10 × 消えた数 × 倍率
pub fn round_score(round: usize, n_beans: u32, n_colors: u32, group_bonus: u32) -> u64 {
    10 * u64::from(n_beans) * u64::from(multiplier(round, n_colors, group_bonus))
}

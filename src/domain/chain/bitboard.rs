// ビットボードによる高速な消去処理

use super::strategy::{EliminationStrategy, RoundStats};
use crate::constants::{BB, BOTTOM_MASK, COL_BITS, LEFTCOL_MASK, MASK12, RIGHTCOL_MASK, TOP_MASK};
use crate::domain::board::{Cell, Color, Grid};

#[inline(always)]
fn bit(x: usize, y: usize) -> BB {
    1u128 << (x * COL_BITS + y)
}

/// 色ごと（5色）とおじゃまのビットボードに変換
#[inline(always)]
pub fn pack_grid(grid: &Grid) -> ([BB; Color::COUNT], BB) {
    let mut colors = [0u128; Color::COUNT];
    let mut nuisance: BB = 0;
    for (x, column) in grid.iter().enumerate() {
        for (y, &cell) in column.iter().enumerate() {
            match cell {
                Cell::Color(c) => colors[c.index()] |= bit(x, y),
                Cell::Nuisance => nuisance |= bit(x, y),
                Cell::Empty => {}
            }
        }
    }
    (colors, nuisance)
}

/// 隣接ビット取得
#[inline(always)]
pub fn neighbors(bits: BB) -> BB {
    let v_up = (bits & !TOP_MASK) << 1;
    let v_down = (bits & !BOTTOM_MASK) >> 1;
    let h_left = (bits & !LEFTCOL_MASK) >> COL_BITS;
    let h_right = (bits & !RIGHTCOL_MASK) << COL_BITS;
    v_up | v_down | h_left | h_right
}

/// seed から mask 内で連結している領域
#[inline(always)]
fn flood(seed: BB, mask: BB) -> BB {
    let mut cur = seed & mask;
    loop {
        let next = (cur | neighbors(cur)) & mask;
        if next == cur {
            return cur;
        }
        cur = next;
    }
}

/// ビットボード実装: 色ごとに最下位ビットから領域を広げてグループを切り出す
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BitboardEliminator;

impl EliminationStrategy for BitboardEliminator {
    fn name(&self) -> &'static str {
        "bitboard"
    }

    fn eliminate(&self, grid: &mut Grid) -> RoundStats {
        let (colors, nuisance) = pack_grid(grid);
        let mut stats = RoundStats::default();
        let mut cleared: BB = 0;

        for color in Color::ALL {
            let mut remaining = colors[color.index()];
            // 4個未満の色は消えようがない
            if remaining.count_ones() < 4 {
                continue;
            }
            while remaining != 0 {
                let seed = remaining & remaining.wrapping_neg();
                let group = flood(seed, remaining);
                remaining &= !group;

                let size = group.count_ones() as usize;
                if size >= 4 {
                    cleared |= group;
                    stats.record_group(color, size);
                }
            }
        }

        if cleared == 0 {
            return stats;
        }
        cleared |= neighbors(cleared) & nuisance;

        for (x, column) in grid.iter_mut().enumerate() {
            let col_bits = ((cleared >> (x * COL_BITS)) as u16) & MASK12;
            if col_bits == 0 {
                continue;
            }
            for (y, cell) in column.iter_mut().enumerate() {
                if col_bits & (1 << y) != 0 {
                    *cell = Cell::Empty;
                }
            }
        }
        stats
    }
}

// 盤面定数とビットボード用マスク

/// ====== 盤面定数 ======
pub const W: usize = 6;
pub const H: usize = 12;
pub const MASK12: u16 = (1u16 << H) - 1;

/// ツモの出現列（3列目）
pub const SPAWN_COL: usize = 2;

// ビットボード用（列ごとに H ビット、x * H + y）
pub type BB = u128;
pub const COL_BITS: usize = H;

const fn board_mask() -> BB {
    let mut m: BB = 0;
    let mut x = 0;
    while x < W {
        m |= ((1u128 << COL_BITS) - 1) << (x * COL_BITS);
        x += 1;
    }
    m
}
pub const BOARD_MASK: BB = board_mask();

const fn top_mask() -> BB {
    let mut m: BB = 0;
    let mut x = 0;
    while x < W {
        m |= 1u128 << (x * COL_BITS + (COL_BITS - 1));
        x += 1;
    }
    m
}

const fn bottom_mask() -> BB {
    let mut m: BB = 0;
    let mut x = 0;
    while x < W {
        m |= 1u128 << (x * COL_BITS);
        x += 1;
    }
    m
}

pub const TOP_MASK: BB = top_mask();
pub const BOTTOM_MASK: BB = bottom_mask();
pub const LEFTCOL_MASK: BB = (1u128 << COL_BITS) - 1;
pub const RIGHTCOL_MASK: BB = ((1u128 << COL_BITS) - 1) << ((W - 1) * COL_BITS);

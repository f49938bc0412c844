// 同色連結領域の探索（明示スタックによる塗りつぶし）

use std::collections::BTreeSet;

use crate::constants::{H, W};
use crate::domain::board::{Board, BoardError, Cell, Grid};
use crate::domain::chain::strategy::EliminationStrategy;

const DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 上下左右の盤内の隣接マス
#[inline]
pub fn neighbors(x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    DIRS.iter().filter_map(move |&(dx, dy)| {
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        if nx < 0 || ny < 0 || nx as usize >= W || ny as usize >= H {
            return None;
        }
        Some((nx as usize, ny as usize))
    })
}

/// (sx, sy) と同色で4方向に連結したマス。空・おじゃまなら空
pub fn connected_region(grid: &Grid, sx: usize, sy: usize) -> Vec<(usize, usize)> {
    let base = grid[sx][sy];
    if base.color().is_none() {
        return Vec::new();
    }

    let mut visited = [[false; H]; W];
    let mut stack = vec![(sx, sy)];
    let mut out = Vec::new();
    visited[sx][sy] = true;

    while let Some((x, y)) = stack.pop() {
        out.push((x, y));
        for (nx, ny) in neighbors(x, y) {
            if !visited[nx][ny] && grid[nx][ny] == base {
                visited[nx][ny] = true;
                stack.push((nx, ny));
            }
        }
    }
    out
}

impl<E: EliminationStrategy> Board<E> {
    /// (x, y) を含む同色連結グループの座標集合
    pub fn get_connected(&self, x: usize, y: usize) -> Result<BTreeSet<(usize, usize)>, BoardError> {
        if x >= W || y >= H {
            return Err(BoardError::OutOfRange { x, y });
        }
        Ok(connected_region(self.cells(), x, y).into_iter().collect())
    }

    /// 各マスの所属グループのサイズ（空・おじゃまは0）
    pub fn group_sizes(&self) -> [[usize; H]; W] {
        let mut sizes = [[0usize; H]; W];
        for x in 0..W {
            for y in 0..H {
                if sizes[x][y] != 0 || self.cells()[x][y] == Cell::Empty {
                    continue;
                }
                let group = connected_region(self.cells(), x, y);
                for &(gx, gy) in &group {
                    sizes[gx][gy] = group.len();
                }
            }
        }
        sizes
    }
}

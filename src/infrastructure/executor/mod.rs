// 並列実行

pub mod parallel;

pub use parallel::{ParallelConfig, ParallelExecutor};

// 並列実行管理

use anyhow::{Context, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 並列実行設定
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// ワーカースレッド数
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }
}

/// 並列実行エグゼキューター
///
/// 専用の rayon スレッドプールと、呼び出し側が立てる中断フラグを持つ。
pub struct ParallelExecutor {
    config: ParallelConfig,
    abort_flag: Arc<AtomicBool>,
    pool: ThreadPool,
}

impl ParallelExecutor {
    pub fn new(config: ParallelConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_workers.max(1))
            .thread_name(|i| format!("puyobot-worker-{}", i))
            .build()
            .with_context(|| format!("スレッドプールを作成できません（ワーカー数: {}）", config.num_workers))?;

        Ok(Self {
            config,
            abort_flag: Arc::new(AtomicBool::new(false)),
            pool,
        })
    }

    /// プール内で処理を実行する（中の par_iter はこのプールで動く）
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// 中断フラグを取得
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort_flag)
    }

    /// 実行を中断
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断フラグを下ろす
    pub fn reset(&self) {
        self.abort_flag.store(false, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// ワーカー数を取得
    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// 設定を取得
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }
}

// エンジン設定のValue Objects

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::board::{Board, BoardError, NextBeans};
use crate::domain::chain::Eliminator;
use crate::infrastructure::executor::{ParallelConfig, ParallelExecutor};
use crate::logging;

/// ワーカー数を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WorkerCount(usize);

impl WorkerCount {
    pub const MAX: usize = 256;

    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(anyhow!("ワーカー数は1以上である必要があります"));
        }
        if count > Self::MAX {
            return Err(anyhow!("ワーカー数が大きすぎます: {}", count));
        }
        Ok(Self(count))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for WorkerCount {
    fn default() -> Self {
        Self(num_cpus::get().clamp(1, Self::MAX))
    }
}

impl TryFrom<usize> for WorkerCount {
    type Error = anyhow::Error;

    fn try_from(count: usize) -> Result<Self> {
        Self::new(count)
    }
}

impl From<WorkerCount> for usize {
    fn from(count: WorkerCount) -> usize {
        count.0
    }
}

/// エンジン設定
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: Eliminator,
    pub workers: WorkerCount,
    pub verbose: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("設定のJSONが不正です")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("設定ファイルを読めません: {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("設定ファイルを解釈できません: {}", path.display()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("設定をJSONにできません")
    }

    /// 詳細ログの設定を反映する
    pub fn apply_logging(&self) -> Result<()> {
        logging::set_verbose(self.verbose);
        if let Some(path) = &self.log_path {
            logging::init_log_file(path)?;
        }
        Ok(())
    }

    /// 設定した消去戦略で空の盤面を作る
    pub fn new_board(&self) -> Board<Eliminator> {
        Board::with_strategy(self.strategy)
    }

    pub fn board_from_rows<S: AsRef<str>>(
        &self,
        rows: &[S],
        next_beans: Option<NextBeans>,
    ) -> Result<Board<Eliminator>, BoardError> {
        Ok(Board::from_rows(rows, next_beans)?.into_strategy(self.strategy))
    }

    pub fn executor(&self) -> Result<ParallelExecutor> {
        ParallelExecutor::new(ParallelConfig::new(self.workers.get()))
    }
}

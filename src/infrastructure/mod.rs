// インフラ層 - 外部システムとの接続、技術的実装

pub mod executor;
pub mod storage;

pub use executor::{ParallelConfig, ParallelExecutor};
pub use storage::{read_recording, Recorder, RecordingWriter};

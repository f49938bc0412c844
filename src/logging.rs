// 詳細ログ（ファイル出力）

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// グローバルな詳細ログフラグ
static VERBOSE_LOGGING: AtomicBool = AtomicBool::new(false);

/// ログファイルのグローバルハンドル（未設定なら stderr）
static LOG_FILE: Mutex<Option<std::fs::File>> = Mutex::new(None);

/// ログファイルを初期化する
pub fn init_log_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("ログファイルを開けません: {}", path.display()))?;

    if let Ok(mut log_file) = LOG_FILE.lock() {
        *log_file = Some(file);
    }
    Ok(())
}

/// ログを書き込む
pub fn write_log(message: &str) {
    if let Ok(mut log_file) = LOG_FILE.lock() {
        match log_file.as_mut() {
            Some(file) => {
                let _ = writeln!(file, "{}", message);
                let _ = file.flush();
            }
            None => eprintln!("{}", message),
        }
    }
}

/// 詳細ログの有効/無効を切り替える
pub fn set_verbose(enabled: bool) {
    VERBOSE_LOGGING.store(enabled, Ordering::Relaxed);
}

/// 詳細ログが有効かチェック
pub fn is_verbose() -> bool {
    VERBOSE_LOGGING.load(Ordering::Relaxed)
}

/// 詳細ログ出力マクロ
#[macro_export]
macro_rules! vlog {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            let message = format!($($arg)*);
            $crate::logging::write_log(&message);
        }
    };
}

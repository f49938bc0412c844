// 盤面の記録（JSON Lines）の書き込みと読み込み

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::domain::board::{Board, BoardSnapshot};
use crate::domain::chain::EliminationStrategy;

/// 記録の1行
///
/// `board` が無い行は「直前と同じ盤面」を表す。`t` は記録開始からの秒数。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardSnapshot>,
    pub t: f64,
}

/// 記録を書き込むためのtrait
pub trait RecordingWriter: Send {
    /// 1行書き込む
    fn write_entry(&mut self, entry: &RecordingEntry) -> Result<()>;

    /// 複数行をまとめて書き込む
    fn write_batch(&mut self, entries: &[RecordingEntry]) -> Result<()> {
        for entry in entries {
            self.write_entry(entry)?;
        }
        Ok(())
    }

    /// 書き込みを完了（フラッシュ）
    fn flush(&mut self) -> Result<()>;

    /// 書き込んだ行数
    fn count(&self) -> u64;
}

/// ファイルへの書き込み実装
pub struct FileRecordingWriter {
    writer: BufWriter<File>,
    count: u64,
}

impl FileRecordingWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("記録ファイルを作成できません: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
            count: 0,
        })
    }
}

impl RecordingWriter for FileRecordingWriter {
    fn write_entry(&mut self, entry: &RecordingEntry) -> Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.writer, "{}", json)?;
        self.count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl Drop for FileRecordingWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// メモリ内書き込み実装（テスト用）
#[derive(Default)]
pub struct MemoryRecordingWriter {
    entries: Vec<RecordingEntry>,
}

impl MemoryRecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RecordingEntry] {
        &self.entries
    }
}

impl RecordingWriter for MemoryRecordingWriter {
    fn write_entry(&mut self, entry: &RecordingEntry) -> Result<()> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn count(&self) -> u64 {
        self.entries.len() as u64
    }
}

/// 盤面を時刻付きで記録する。直前と同じ盤面は省略して書く
pub struct Recorder<W: RecordingWriter> {
    writer: W,
    last: Option<BoardSnapshot>,
}

impl<W: RecordingWriter> Recorder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last: None }
    }

    /// 書き込みに失敗した盤面は未記録のまま扱う（次回も盤面付きで書く）
    pub fn record<E: EliminationStrategy>(&mut self, board: &Board<E>, t: f64) -> Result<()> {
        check_time(t)?;
        let snapshot = board.snapshot();
        if self.last.as_ref() == Some(&snapshot) {
            return self.writer.write_entry(&RecordingEntry { board: None, t });
        }

        let entry = RecordingEntry {
            board: Some(snapshot),
            t,
        };
        self.writer.write_entry(&entry)?;
        self.last = entry.board;
        Ok(())
    }

    /// 盤面を読めなかった時刻を記録する（直前の盤面のまま扱われる）
    pub fn record_unchanged(&mut self, t: f64) -> Result<()> {
        check_time(t)?;
        self.writer.write_entry(&RecordingEntry { board: None, t })
    }

    /// フラッシュして writer を返す
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// JSON で表せない NaN・無限大を弾く
fn check_time(t: f64) -> Result<()> {
    if !t.is_finite() {
        return Err(anyhow!("記録時刻が有限の値ではありません: {}", t));
    }
    Ok(())
}

/// JSON Lines を読み、省略された盤面を直前の盤面で補う
pub fn parse_recording<R: BufRead>(reader: R) -> Result<Vec<(Board, f64)>> {
    let mut frames: Vec<(Board, f64)> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.with_context(|| format!("{}行目を読めません", line_no))?;
        if line.trim().is_empty() {
            continue;
        }

        let entry: RecordingEntry = serde_json::from_str(&line)
            .with_context(|| format!("{}行目のJSONが不正です", line_no))?;
        let board = match entry.board {
            Some(snapshot) => snapshot
                .to_board()
                .with_context(|| format!("{}行目の盤面が不正です", line_no))?,
            None => match frames.last() {
                Some((previous, _)) => previous.copy(),
                None => return Err(anyhow!("{}行目: 最初の行に盤面がありません", line_no)),
            },
        };
        frames.push((board, entry.t));
    }
    Ok(frames)
}

/// 記録ファイルを読む
pub fn read_recording(path: &Path) -> Result<Vec<(Board, f64)>> {
    let file = File::open(path)
        .with_context(|| format!("記録ファイルを開けません: {}", path.display()))?;
    parse_recording(BufReader::new(file))
}

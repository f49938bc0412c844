// 記録の保存

pub mod recording;

pub use recording::{
    parse_recording, read_recording, FileRecordingWriter, MemoryRecordingWriter, Recorder,
    RecordingEntry, RecordingWriter,
};

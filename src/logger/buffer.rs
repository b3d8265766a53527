use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use super::flags::FormatFlags;
use super::sink::{LineRecord, LineWriter, StreamWriter};

/// In-memory byte sink that can be cloned and handed to a `StreamWriter`
///
/// All clones share the same storage, so a test or an embedding application
/// keeps one handle and reads back what the logger wrote through another.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.bytes.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Line writer that keeps every formatted line in memory
///
/// Lines are annotated exactly like a `StreamWriter` with the same prefix and
/// flags would write them, one entry per write.
pub struct MemoryWriter {
    format: StreamWriter<io::Sink>,
    lines: Mutex<Vec<String>>,
}

impl MemoryWriter {
    pub fn new(prefix: impl Into<String>, flags: FormatFlags) -> Self {
        Self {
            format: StreamWriter::new(io::sink(), prefix, flags),
            lines: Mutex::new(Vec::new()),
        }
    }

    /// One entry per written line, final newline removed
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .map(|line| line.strip_suffix('\n').unwrap_or(line).to_string())
            .collect()
    }

    /// Everything written so far, exactly as a stream would have received it
    pub fn contents(&self) -> String {
        self.lines.lock().concat()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl Default for MemoryWriter {
    fn default() -> Self {
        Self::new("", FormatFlags::empty())
    }
}

impl LineWriter for MemoryWriter {
    fn write_line(&self, record: &LineRecord<'_>) {
        let line = self.format.render(record);
        self.lines.lock().push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::Location;
    use std::sync::Arc;

    use crate::logger::LeveledLogger;

    #[test]
    fn test_memory_writer_keeps_one_entry_per_line() {
        let memory = MemoryWriter::default();
        memory.write_line(&LineRecord::now("WARN svc first", Location::caller()));
        memory.write_line(&LineRecord::now("INFO second\n", Location::caller()));
        memory.write_line(&LineRecord::now("DEBUG two\nrows\n", Location::caller()));

        assert_eq!(memory.len(), 3);
        assert_eq!(
            memory.lines(),
            vec!["WARN svc first", "INFO second", "DEBUG two\nrows"]
        );
        assert_eq!(
            memory.contents(),
            "WARN svc first\nINFO second\nDEBUG two\nrows\n"
        );

        memory.clear();
        assert!(memory.is_empty());
    }

    #[test]
    fn test_memory_writer_applies_prefix_and_file_flags() {
        let memory = MemoryWriter::new("app: ", FormatFlags::SHORT_FILE);
        let location = Location::caller();
        memory.write_line(&LineRecord::now("ERROR boom", location));
        assert_eq!(
            memory.lines(),
            vec![format!("app: buffer.rs:{}: ERROR boom", location.line())]
        );
    }

    #[test]
    fn test_memory_writer_behind_a_leveled_logger() {
        let memory = Arc::new(MemoryWriter::default());
        let log = LeveledLogger::with_sink(memory.clone(), "svc", "Info").unwrap();
        log.warn(&[&"disk", &"low"]);
        log.infoln(&[&"ready"]);
        log.debug(&[&"hidden"]);
        log.flush();

        let mut lines = memory.lines();
        lines.sort();
        assert_eq!(lines, vec!["INFO svc ready", "WARN svc disk low"]);
    }

    #[test]
    fn test_shared_buffer_clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"one\ntwo\n").unwrap();
        assert_eq!(buffer.lines(), vec!["one", "two"]);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}

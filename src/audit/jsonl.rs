use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::domain::AuditRecord;

use super::sink::{AuditError, AuditSink, MemoryAuditLog};

/// Append-only JSON-lines audit file.
///
/// One record per line, flushed after every append so a crash loses at
/// most the record being written.
pub struct JsonlAuditWriter {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAuditWriter {
    /// Open or create an audit file for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(JsonlAuditWriter {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Sync the file to disk.
    pub fn sync(&self) -> Result<(), AuditError> {
        let mut writer = self.writer.lock();
        writer.flush()?;
        writer.get_ref().sync_data()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for JsonlAuditWriter {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let json = serde_json::to_string(record)?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }
}

/// Reader for iterating over a JSON-lines audit file.
pub struct JsonlAuditReader {
    reader: BufReader<File>,
    line_buffer: String,
    records_read: u64,
    errors: u64,
}

impl JsonlAuditReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let file = File::open(path)?;

        Ok(JsonlAuditReader {
            reader: BufReader::new(file),
            line_buffer: String::with_capacity(512),
            records_read: 0,
            errors: 0,
        })
    }

    /// Read the next record.
    ///
    /// Returns None at end of file. Lines that do not parse (for example a
    /// torn final write) are skipped and counted.
    pub fn next_record(&mut self) -> Result<Option<AuditRecord>, AuditError> {
        loop {
            self.line_buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.line_buffer)?;

            if bytes_read == 0 {
                return Ok(None);
            }

            let line = self.line_buffer.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<AuditRecord>(line) {
                Ok(record) => {
                    self.records_read += 1;
                    return Ok(Some(record));
                }
                Err(e) => {
                    self.errors += 1;
                    tracing::warn!(error = %e, "Unreadable audit line, skipping");
                }
            }
        }
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    pub fn errors(&self) -> u64 {
        self.errors
    }
}

impl Iterator for JsonlAuditReader {
    type Item = Result<AuditRecord, AuditError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Statistics from replaying an audit file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records appended to the trail
    pub records: u64,
    /// Lines skipped because they did not parse
    pub errors: u64,
}

/// Load the history in an audit file into the in-memory trail.
///
/// A missing file is an empty history. When the file holds more records than
/// the trail's capacity, only the newest survive.
pub fn replay_into(path: impl AsRef<Path>, log: &MemoryAuditLog) -> Result<ReplayStats, AuditError> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "No audit file to replay");
        return Ok(ReplayStats::default());
    }

    let mut reader = JsonlAuditReader::open(path)?;
    while let Some(record) = reader.next_record()? {
        log.append(&record)?;
    }

    Ok(ReplayStats {
        records: reader.records_read(),
        errors: reader.errors(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditRecorder;
    use crate::domain::{AuditResult, Classification, Role};
    use crate::testing::{resource, subject};
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let s = subject("EMP-2045", Role::HrManager, Classification::Confidential);
        let r = resource("DOC-7781", Classification::Confidential, "EMP-2045", &[]);
        let recorder = AuditRecorder::new();

        let first = recorder.record(&s, "VIEW_DOCUMENT: DOC-7781", AuditResult::Success, Some(&r), None);
        let second = recorder.record(&s, "CONNECTION_TERMINATED", AuditResult::Success, None, None);

        {
            let writer = JsonlAuditWriter::open(path).unwrap();
            writer.append(&first).unwrap();
            writer.append(&second).unwrap();
            writer.sync().unwrap();
        }

        let mut reader = JsonlAuditReader::open(path).unwrap();
        assert_eq!(reader.next_record().unwrap(), Some(first));
        assert_eq!(reader.next_record().unwrap(), Some(second));
        assert!(reader.next_record().unwrap().is_none());
        assert_eq!(reader.records_read(), 2);
        assert_eq!(reader.errors(), 0);
    }

    #[test]
    fn test_reopen_appends() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();
        let s = subject("EMP-1", Role::JuniorEmployee, Classification::Public);

        for _ in 0..2 {
            let writer = JsonlAuditWriter::open(path).unwrap();
            writer
                .append(&AuditRecorder::new().record(&s, "LOGIN", AuditResult::Success, None, None))
                .unwrap();
        }

        let reader = JsonlAuditReader::open(path).unwrap();
        assert_eq!(reader.filter_map(Result::ok).count(), 2);
    }

    #[test]
    fn test_torn_line_skipped() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let s = subject("EMP-1", Role::JuniorEmployee, Classification::Public);
        let record = AuditRecorder::new().record(&s, "LOGIN", AuditResult::Alert, None, None);

        writeln!(temp_file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
        write!(temp_file, "{{\"id\":\"LOG-tor").unwrap();
        temp_file.flush().unwrap();

        let mut reader = JsonlAuditReader::open(temp_file.path()).unwrap();
        assert_eq!(reader.next_record().unwrap(), Some(record));
        assert!(reader.next_record().unwrap().is_none());
        assert_eq!(reader.errors(), 1);
    }

    #[test]
    fn test_replay_restores_trail() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();
        let s = subject("EMP-1", Role::JuniorEmployee, Classification::Public);
        let recorder = AuditRecorder::new();

        let records: Vec<AuditRecord> = ["A", "B", "C"]
            .iter()
            .map(|action| recorder.record(&s, *action, AuditResult::Success, None, None))
            .collect();
        {
            let writer = JsonlAuditWriter::open(path).unwrap();
            for record in &records {
                writer.append(record).unwrap();
            }
        }
        let mut file = OpenOptions::new().append(true).open(path).unwrap();
        writeln!(file, "not json").unwrap();

        let log = MemoryAuditLog::new(2);
        let stats = replay_into(path, &log).unwrap();

        assert_eq!(stats, ReplayStats { records: 3, errors: 1 });
        assert_eq!(log.snapshot(), records[1..].to_vec());
    }

    #[test]
    fn test_replay_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = MemoryAuditLog::default();

        let stats = replay_into(dir.path().join("audit.jsonl"), &log).unwrap();

        assert_eq!(stats, ReplayStats::default());
        assert!(log.is_empty());
    }
}

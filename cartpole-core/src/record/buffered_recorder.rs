use super::{AggregateRecorder, Record, RecordStorage, Recorder};

/// Buffered recorder.
///
/// Keeps written records in memory. Records given to [`AggregateRecorder::store`]
/// are aggregated on [`AggregateRecorder::flush`] and the aggregate is appended
/// to the buffer, tagged with the flush step as `"step"`.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
    storage: RecordStorage,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self {
            buf: Vec::default(),
            storage: RecordStorage::new(),
        }
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// The number of buffered records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}

impl AggregateRecorder for BufferedRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let mut record = self.storage.aggregate();
        record.insert("step", super::RecordValue::Scalar(step as f32));
        self.buf.push(record);
    }
}

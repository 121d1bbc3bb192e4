use cartpole_core::record::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use log::warn;
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
    ignore_unsupported_value: bool,
    storage: RecordStorage,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "episode".to_string(),
            ignore_unsupported_value: true,
            storage: RecordStorage::new(),
        }
    }

    /// Construct a [`TensorboardRecorder`] warning about unsupported record values.
    ///
    /// TFRecord will be stored in `logdir`.
    pub fn new_with_check_unsupported_value<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            ignore_unsupported_value: false,
            ..Self::new(logdir)
        }
    }

    /// Sets the key of the value used as the step of the written scalars.
    pub fn step_key(mut self, v: impl Into<String>) -> Self {
        self.step_key = v.into();
        self
    }

    fn write_values(&mut self, record: &Record, step: usize) {
        for (k, v) in record.iter() {
            if *k != self.step_key {
                match v {
                    RecordValue::Scalar(v) => self.writer.add_scalar(k, *v, step),
                    RecordValue::DateTime(_) => {} // discard value
                    _ => {
                        if !self.ignore_unsupported_value {
                            warn!("Unsupported value: {:?}", (k, v));
                        }
                    }
                };
            }
        }
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [`Record`] into a TFRecord.
    ///
    /// The step of the values is taken from the scalar under the step key
    /// (`"episode"` by default). Only [`RecordValue::Scalar`] values are written.
    fn write(&mut self, record: Record) {
        let step = match record.get(&self.step_key) {
            Some(RecordValue::Scalar(v)) => *v as usize,
            _ => {
                warn!(
                    "Record without scalar step key {:?} is not written",
                    self.step_key
                );
                return;
            }
        };
        self.write_values(&record, step);
    }
}

impl AggregateRecorder for TensorboardRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    /// Writes the aggregate of the stored records at `step` and flushes the writer.
    fn flush(&mut self, step: i64) {
        if !self.storage.is_empty() {
            let record = self.storage.aggregate();
            self.write_values(&record, step.max(0) as usize);
        }
        self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    fn n_event_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .contains("tfevents")
            })
            .count()
    }

    #[test]
    fn test_write_and_flush() {
        let tmp = TempDir::new("tensorboard_recorder").unwrap();
        let mut recorder = TensorboardRecorder::new(tmp.path());

        let mut record = Record::from_scalar("episode_return", 10.0);
        record.insert("episode", RecordValue::Scalar(0.0));
        recorder.write(record.clone());
        // Ignored without the step key.
        recorder.write(Record::from_scalar("episode_return", 1.0));

        recorder.store(record);
        recorder.store(Record::from_scalar("episode_return", 20.0));
        recorder.flush(2);

        assert_eq!(n_event_files(tmp.path()), 1);
    }
}

//! CSV trace of the steps of a check.
use anyhow::Result;
use gridcheck_core::record::{BufferedRecorder, Record};
use serde::Serialize;
use std::{convert::TryFrom, fs::File, path::Path};

/// A row of the trace, built from a record written by
/// [`check_clone`](gridcheck_core::check_clone).
#[derive(Debug, Serialize, PartialEq)]
pub struct TraceRecord {
    /// Step index, starting at 1.
    pub step: u64,

    /// Episode index, starting at 0.
    pub episode: u64,

    /// Rewards of the step separated by spaces, one per player.
    pub reward: String,

    /// Whether the episode ended at the step.
    pub done: bool,

    /// State hash after the step.
    pub hash: String,
}

impl TryFrom<&Record> for TraceRecord {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self> {
        Ok(Self {
            step: record.get_integer("step")?,
            episode: record.get_integer("episode")?,
            reward: record
                .get_array1("reward")?
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(" "),
            done: record.get_scalar("done")? != 0.0,
            hash: record.get_string("hash")?,
        })
    }
}

/// Writes the records in `recorder` to a CSV file with a header.
pub fn write_trace(path: impl AsRef<Path>, recorder: &BufferedRecorder) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(File::create(path)?);
    for record in recorder.iter() {
        wtr.serialize(TraceRecord::try_from(record)?)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcheck_core::record::{RecordValue, Recorder};
    use tempdir::TempDir;

    fn record(step: u64, done: f32) -> Record {
        Record::from_slice(&[
            ("step", RecordValue::Integer(step)),
            ("episode", RecordValue::Integer(0)),
            ("reward", RecordValue::Array1(vec![1.0, 0.0])),
            ("done", RecordValue::Scalar(done)),
            ("hash", RecordValue::String("0x000000000000beef".to_string())),
        ])
    }

    #[test]
    fn test_trace_record_from_record() {
        let row = TraceRecord::try_from(&record(3, 1.0)).unwrap();
        assert_eq!(
            row,
            TraceRecord {
                step: 3,
                episode: 0,
                reward: "1 0".to_string(),
                done: true,
                hash: "0x000000000000beef".to_string(),
            }
        );

        let missing = Record::from_slice(&[("step", RecordValue::Integer(1))]);
        assert!(TraceRecord::try_from(&missing).is_err());
    }

    #[test]
    fn test_write_trace() -> Result<()> {
        let dir = TempDir::new("trace")?;
        let path = dir.path().join("trace.csv");
        let mut recorder = BufferedRecorder::new();
        recorder.write(record(1, 0.0));
        recorder.write(record(2, 1.0));
        write_trace(&path, &recorder)?;

        let lines = std::fs::read_to_string(&path)?
            .lines()
            .map(str::to_string)
            .collect::<Vec<_>>();
        assert_eq!(lines[0], "step,episode,reward,done,hash");
        assert_eq!(lines[1], "1,0,1 0,false,0x000000000000beef");
        assert_eq!(lines.len(), 3);
        Ok(())
    }
}

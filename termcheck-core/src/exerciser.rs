// termcheck-core/src/exerciser.rs
//
// Plays a Script against one exclusively owned byte channel.

use std::io::Write;
use std::time::Duration;

use termcheck_io::ChannelError;
use tokio::time::Instant;

use crate::error::ExerciseError;
use crate::script::{Script, Step};

/// Length of one pause unit on real hardware.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub units_written: usize,
    pub bytes_written: usize,
    pub pauses: usize,
    /// Time from the first completed write to the last one.
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(RunReport),
    /// The channel could not be acquired. Nothing was written.
    ChannelUnavailable { reason: String },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }
}

#[derive(Debug, Clone)]
pub struct Exerciser {
    script: Script,
    time_unit: Duration,
}

impl Exerciser {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            time_unit: DEFAULT_TIME_UNIT,
        }
    }

    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }

    /// Acquire a channel with `acquire` and play the script on it.
    ///
    /// A channel that cannot be acquired is not an error: a rig without the
    /// terminal attached is expected, so the reason is logged and returned as
    /// `Outcome::ChannelUnavailable`. Write failures after that are errors.
    pub async fn run<W, F>(&self, acquire: F) -> Result<Outcome, ExerciseError>
    where
        W: Write,
        F: FnOnce() -> Result<W, ChannelError>,
    {
        let mut channel = match acquire() {
            Ok(channel) => channel,
            Err(e) => {
                tracing::warn!("Terminal channel unavailable: {}", e);
                return Ok(Outcome::ChannelUnavailable {
                    reason: e.to_string(),
                });
            }
        };

        tracing::info!(
            steps = self.script.steps().len(),
            time_unit = ?self.time_unit,
            "Exercising terminal"
        );
        let report = self.play(&mut channel).await?;
        tracing::info!(
            units = report.units_written,
            bytes = report.bytes_written,
            elapsed = ?report.elapsed,
            "Terminal exercise finished"
        );

        Ok(Outcome::Completed(report))
    }

    /// Play every step in order on `channel`.
    ///
    /// Each write unit goes out as one `write_all` plus a flush, so the
    /// transport has accepted it before the next step starts.
    pub async fn play<W: Write>(&self, channel: &mut W) -> Result<RunReport, ExerciseError> {
        let mut report = RunReport::default();
        let mut first_write: Option<Instant> = None;
        let mut last_write: Option<Instant> = None;

        for step in self.script.steps() {
            match step {
                Step::Write(unit) => {
                    let index = report.units_written;
                    channel
                        .write_all(&unit.payload)
                        .and_then(|()| channel.flush())
                        .map_err(|source| ExerciseError::Write { index, source })?;

                    let now = Instant::now();
                    first_write.get_or_insert(now);
                    last_write = Some(now);

                    report.units_written += 1;
                    report.bytes_written += unit.payload.len();
                    tracing::debug!(index, kind = ?unit.kind, len = unit.payload.len(), "write");
                }
                Step::Pause(units) => {
                    let pause = self.time_unit * *units;
                    tracing::debug!(?pause, "pause");
                    // Nothing else runs on this task; writes stay strictly ordered.
                    tokio::time::sleep(pause).await;
                    report.pauses += 1;
                }
            }
        }

        if let (Some(first), Some(last)) = (first_write, last_write) {
            report.elapsed = last - first;
        }

        Ok(report)
    }
}

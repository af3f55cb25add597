//! The main program loop: ask about calibration once, optionally run
//! it, then measure and report headings forever.

use core::fmt::Write as _;

use embassy_time::{with_timeout, Duration, Instant, Timer};
use embedded_io_async::{Read, Write};
use heapless::String;

use crate::console::{Console, LINE_MAX};
use crate::consts;
use crate::errors::adapter::embedded_io::EmbeddedIoError;
use crate::estimators::heading::{heading_degrees, MeanAccumulator};
use crate::signals::{self as s, register_error};
use crate::tasks::calibrator::CalibratorState;
use crate::types::config::CompassConfig;
use crate::types::measurements::{Heading, MagOffset};
use crate::types::status::IndicatorState;

/// Consecutive dropped samples tolerated within one measuring pass.
const MAX_DROPPED: u32 = 10;

/// Top-level program state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompassState {
    AwaitingDecision,
    Calibrating,
    Measuring,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Decision {
    Calibrate,
    Skip,
    Reprompt,
}

/// Command words are case-sensitive; anything unrecognized re-prompts.
fn parse_decision(line: &str) -> Decision {
    match line {
        "y" | "yes" => Decision::Calibrate,
        "n" | "no" => Decision::Skip,
        _ => Decision::Reprompt,
    }
}

/// Explicit state of the main loop. All transitions are synchronous so
/// they can be exercised without hardware or an executor.
pub struct Commander {
    name: &'static str,
    config: CompassConfig,
    state: CompassState,
    offset: Option<MagOffset>,
}

impl Commander {
    pub fn new(config: CompassConfig) -> Self {
        // A preset offset means the decision is already made: go
        // straight to measuring. Otherwise ask, exactly once.
        let state = match config.mag_offset {
            Some(_) => CompassState::Measuring,
            None => CompassState::AwaitingDecision,
        };
        Self {
            name: "commander",
            offset: config.mag_offset,
            config,
            state,
        }
    }

    pub fn state(&self) -> CompassState {
        self.state
    }

    pub fn offset(&self) -> Option<MagOffset> {
        self.offset
    }

    pub fn config(&self) -> &CompassConfig {
        &self.config
    }

    /// Apply one line of user input to the calibration prompt.
    fn handle_decision(&mut self, line: &str) {
        if self.state != CompassState::AwaitingDecision {
            return;
        }
        match parse_decision(line) {
            Decision::Calibrate => {
                info!("[{}] User requested calibration", self.name);
                self.state = CompassState::Calibrating;
            }
            Decision::Skip => {
                info!("[{}] User declined calibration", self.name);
                self.state = CompassState::Measuring;
            }
            Decision::Reprompt => {
                debug!("[{}] Unrecognized input, asking again", self.name);
            }
        }
    }

    /// Record the outcome of a commanded calibration.
    fn handle_calibrator(&mut self, outcome: &CalibratorState) {
        if self.state != CompassState::Calibrating {
            return;
        }
        match outcome {
            CalibratorState::Done(offset) => {
                self.offset = Some(*offset);
                self.state = CompassState::Measuring;
            }
            CalibratorState::Failed(error) => {
                warn!("[{}] Calibration failed: {:?}", self.name, error);
                self.state = CompassState::Measuring;
            }
            _ => {}
        }
    }
}

/// Main loop task, generic over the console byte stream.
pub async fn main(reader: impl Read, writer: impl Write, config: CompassConfig) -> ! {
    const ID: &str = "commander";
    info!("{}: Task started", ID);

    let mut console = Console::new(reader, writer);
    let mut commander = Commander::new(config);

    let mut rcv_raw_mag = unwrap!(s::RAW_MAG_DATA.receiver());
    let mut rcv_cal_state = unwrap!(s::CALIBRATOR_STATE.receiver());
    let snd_heading = s::HEADING.sender();
    let snd_indicator = s::INDICATOR_STATE.sender();

    if let Some(offset) = commander.offset() {
        s::MAG_OFFSET.sender().send(offset);
        info!("{}: Using preset offset x: {} y: {}", ID, offset.x, offset.y);
    }

    _ = console.write_line("Starting compass").await;
    snd_indicator.send(IndicatorState::On);

    loop {
        match commander.state() {
            CompassState::AwaitingDecision => {
                match prompt(&mut console).await {
                    Ok(line) => commander.handle_decision(&line),
                    Err(error) => {
                        error!("{}: Console error: {:?}", ID, error);
                        register_error(error);
                        Timer::after_secs(1).await;
                    }
                }
            }

            CompassState::Calibrating => {
                // Mark any stale terminal state as seen before
                // commanding a fresh run.
                _ = rcv_cal_state.try_get();
                s::CMD_CALIBRATE.sender().send(commander.config().calib);

                let outcome = rcv_cal_state
                    .changed_and(|state| state.is_finished())
                    .await;
                commander.handle_calibrator(&outcome);

                match outcome {
                    CalibratorState::Done(offset) => {
                        let mut line = String::<LINE_MAX>::new();
                        _ = write!(line, "New offset X= {} Y= {}", offset.x, offset.y);
                        _ = console.write_line(&line).await;
                    }
                    _ => {
                        _ = console
                            .write_line("Calibration failed, continuing without offset")
                            .await;
                    }
                }
            }

            CompassState::Measuring => {
                _ = console.write_str("Measuring ").await;

                let timeout = Duration::from_millis(consts::SAMPLE_TIMEOUT_MS as u64);
                let mut mean = MeanAccumulator::new();
                let mut dropped = 0;
                let mut aborted = false;

                while mean.count() < commander.config().sample_count as u32 {
                    match with_timeout(timeout, rcv_raw_mag.changed()).await {
                        Ok(data) => {
                            mean.push(data.mag);
                            dropped = 0;
                            snd_indicator.send(IndicatorState::Off);
                        }
                        Err(_) => {
                            dropped += 1;
                            if dropped > MAX_DROPPED {
                                error!("{}: No data from magnetometer", ID);
                                _ = console.write_line("no magnetometer data").await;
                                aborted = true;
                                break;
                            }
                        }
                    }
                }
                if aborted {
                    continue;
                }

                let Some((mean_x, mean_y)) = mean.mean() else {
                    continue;
                };
                let offset = commander.offset().unwrap_or_default();
                let degrees = heading_degrees(mean_x, mean_y, offset);

                snd_indicator.send(IndicatorState::On);
                snd_heading.send(Heading {
                    timestamp_us: Instant::now().as_micros(),
                    degrees,
                });

                let mut line = String::<LINE_MAX>::new();
                _ = write!(line, " Compass direction {}", degrees);
                _ = console.write_line(&line).await;
            }
        }
    }
}

async fn prompt(
    console: &mut Console<impl Read, impl Write>,
) -> Result<String<LINE_MAX>, EmbeddedIoError> {
    console
        .write_str("Calibrate the magnetometer? (y/n): ")
        .await?;
    console.read_line().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_offset_skips_the_prompt() {
        let config = CompassConfig {
            mag_offset: Some(MagOffset { x: 1.0, y: -2.0 }),
            ..CompassConfig::default()
        };
        let commander = Commander::new(config);

        assert_eq!(commander.state(), CompassState::Measuring);
        assert_eq!(commander.offset(), Some(MagOffset { x: 1.0, y: -2.0 }));
    }

    #[test]
    fn declining_measures_without_an_offset() {
        let mut commander = Commander::new(CompassConfig::default());
        assert_eq!(commander.state(), CompassState::AwaitingDecision);

        commander.handle_decision("no");
        assert_eq!(commander.state(), CompassState::Measuring);
        assert_eq!(commander.offset(), None);
    }

    #[test]
    fn unknown_word_reprompts_then_yes_calibrates() {
        let mut commander = Commander::new(CompassConfig::default());

        commander.handle_decision("maybe");
        assert_eq!(commander.state(), CompassState::AwaitingDecision);

        commander.handle_decision("y");
        assert_eq!(commander.state(), CompassState::Calibrating);
    }

    #[test]
    fn command_words_are_case_sensitive() {
        let mut commander = Commander::new(CompassConfig::default());

        commander.handle_decision("Y");
        commander.handle_decision("YES");
        commander.handle_decision("No");
        assert_eq!(commander.state(), CompassState::AwaitingDecision);
    }

    #[test]
    fn successful_calibration_applies_the_offset() {
        let mut commander = Commander::new(CompassConfig::default());
        commander.handle_decision("yes");

        let offset = MagOffset { x: 0.5, y: 0.25 };
        commander.handle_calibrator(&CalibratorState::Done(offset));

        assert_eq!(commander.state(), CompassState::Measuring);
        assert_eq!(commander.offset(), Some(offset));
    }

    #[test]
    fn failed_calibration_still_measures() {
        let mut commander = Commander::new(CompassConfig::default());
        commander.handle_decision("y");

        commander.handle_calibrator(&CalibratorState::Failed(
            crate::errors::CalibrationError::MagMaxDropped,
        ));

        assert_eq!(commander.state(), CompassState::Measuring);
        assert_eq!(commander.offset(), None);
    }

    #[test]
    fn progress_updates_do_not_change_state() {
        let mut commander = Commander::new(CompassConfig::default());
        commander.handle_decision("y");

        commander.handle_calibrator(&CalibratorState::Collecting { samples: 7 });
        assert_eq!(commander.state(), CompassState::Calibrating);
    }

    #[test]
    fn decision_is_never_revisited() {
        let mut commander = Commander::new(CompassConfig::default());
        commander.handle_decision("n");

        // Even with the offset still unset, further input cannot bring
        // the prompt back.
        commander.handle_decision("y");
        assert_eq!(commander.state(), CompassState::Measuring);
        assert_eq!(commander.offset(), None);
    }
}

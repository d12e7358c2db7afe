use embedded_hal::digital::{Error as _, InputPin};
use log::{info, warn};

use crate::calibration::Envelope;
use crate::clock::Clock;
use crate::configs::{CompassConfig, CONFIG_CLEAR_OFFSET};
use crate::events::EventSink;
use crate::heading::heading_degrees;
use crate::types::{CompassEvent, CompassState, HeadingUnavailable, Sample};
use crate::{CompatibleI2c, Error, Mag3110};

/// Calibrated compass on top of a [`Mag3110`].
///
/// The driver owns its collaborators: the I2C bus (through [`Mag3110`]), the
/// data-ready input, a tick [`Clock`] and an [`EventSink`]. Nothing here is
/// reentrant; the scheduler's [`idle_tick`](Self::idle_tick) and the public
/// calls must come from the same execution context.
pub struct Compass<I2C, E, DRDY, CLK, EVT> {
    mag: Mag3110<I2C, E>,
    data_ready: DRDY,
    clock: CLK,
    events: EVT,
    id: u16,
    calibrate_period: u64,
    state: CompassState,
    /// Hard-iron offset, mirrored in the device's offset registers.
    offset: Sample,
    sample: Sample,
    envelope: Envelope,
    /// Tick at which an asynchronous calibration pass started.
    deadline_start: Option<u64>,
}

impl<I2C, E, DRDY, CLK, EVT> Compass<I2C, E, DRDY, CLK, EVT>
where
    I2C: CompatibleI2c<E>,
    E: core::fmt::Debug,
    DRDY: InputPin,
    CLK: Clock,
    EVT: EventSink,
{
    /// Configures the device for continuous sampling and loads the stored
    /// offset. An all-zero offset is taken to mean "never calibrated".
    pub fn new(
        i2c: I2C,
        data_ready: DRDY,
        clock: CLK,
        events: EVT,
        config: CompassConfig,
    ) -> Result<Self, Error<E>> {
        let mut mag = Mag3110::new(i2c, config.address);
        mag.apply_config(config.wakeup)?;

        let offset = mag.read_offset()?;
        let state = if offset.is_zero() {
            CompassState::Uncalibrated
        } else {
            CompassState::Calibrated
        };
        info!("compass {} up at {:#04x}, offset {:?}, {:?}", config.id, config.address, offset, state);

        Ok(Self {
            mag,
            data_ready,
            clock,
            events,
            id: config.id,
            calibrate_period: config.calibrate_period,
            state,
            offset,
            sample: Sample::ZERO,
            envelope: Envelope::default(),
            deadline_start: None,
        })
    }

    /// Scheduler hook. Does nothing unless the data-ready line is high.
    pub fn idle_tick(&mut self) -> Result<(), Error<E>> {
        if !self.is_idle_callback_needed()? {
            return Ok(());
        }

        self.sample = self.mag.read_sample()?;

        if self.state == CompassState::Calibrating {
            self.envelope.include(self.sample);

            if let Some(start) = self.deadline_start {
                if self.clock.ticks() > start.saturating_add(self.calibrate_period) {
                    self.deadline_start = None;
                    self.calibrate_end()?;
                }
            }
        }
        Ok(())
    }

    /// Degrees clockwise from magnetic north, `0..360`.
    ///
    /// Publishes [`CompassEvent::CalibrationRequired`] on every call made
    /// while no calibration is available.
    pub fn heading(&mut self) -> Result<u16, HeadingUnavailable> {
        match self.state {
            CompassState::Calibrating => Err(HeadingUnavailable::Calibrating),
            CompassState::Uncalibrated => {
                self.events.publish(self.id, CompassEvent::CalibrationRequired);
                Err(HeadingUnavailable::CalibrationRequired)
            }
            CompassState::Calibrated => Ok(heading_degrees(self.sample, self.offset)),
        }
    }

    /// Begins collecting the min/max envelope from the current sample.
    /// No-op while a pass is already running; the caller ends it with
    /// [`calibrate_end`](Self::calibrate_end).
    pub fn calibrate_start(&mut self) {
        if self.state == CompassState::Calibrating {
            return;
        }

        self.state = CompassState::Calibrating;
        self.envelope = Envelope::seeded(self.sample);
        info!("compass {} calibration started at {:?}", self.id, self.sample);
        self.events.publish(self.id, CompassEvent::CalibrationStart);
    }

    /// Starts a pass that [`idle_tick`](Self::idle_tick) ends on its own once
    /// `calibrate_period` ticks have gone by.
    pub fn calibrate_async(&mut self) {
        self.deadline_start = Some(self.clock.ticks());
        self.calibrate_start();
    }

    /// Takes the envelope midpoint as the new offset and persists it.
    ///
    /// Without a running pass the envelope left by the previous pass (zero
    /// after construction) is used. The pass ends and
    /// [`CompassEvent::CalibrationEnd`] is published even when persisting
    /// fails; the bus error is returned afterwards.
    pub fn calibrate_end(&mut self) -> Result<(), Error<E>> {
        if self.state != CompassState::Calibrating {
            warn!("compass {} calibration ended without a running pass", self.id);
        }

        self.offset = self.envelope.midpoint();
        self.state = CompassState::Calibrated;
        self.deadline_start = None;

        let persisted = self.mag.write_offset(self.offset);
        match &persisted {
            Ok(()) => info!("compass {} calibrated, offset {:?}", self.id, self.offset),
            Err(e) => warn!("compass {} calibrated, offset {:?} not stored: {:?}", self.id, self.offset, e),
        }
        self.events.publish(self.id, CompassEvent::CalibrationEnd);
        persisted
    }

    /// Zeroes the stored offset so the next start-up reads as uncalibrated.
    /// The in-memory offset is left as it was; a running pass keeps running.
    pub fn clear_calibration(&mut self) -> Result<(), Error<E>> {
        self.mag.apply_config(CONFIG_CLEAR_OFFSET)?;
        if self.state == CompassState::Calibrated {
            self.state = CompassState::Uncalibrated;
        }
        Ok(())
    }

    /// Live level of the data-ready line.
    pub fn is_idle_callback_needed(&mut self) -> Result<bool, Error<E>> {
        self.data_ready
            .is_high()
            .map_err(|e| Error::DataReady(e.kind()))
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error<E>> {
        self.mag.who_am_i()
    }

    pub fn temperature(&mut self) -> Result<i8, Error<E>> {
        self.mag.temperature()
    }
}

impl<I2C, E, DRDY, CLK, EVT> Compass<I2C, E, DRDY, CLK, EVT> {
    pub fn x(&self) -> i16 {
        self.sample.x
    }

    pub fn y(&self) -> i16 {
        self.sample.y
    }

    pub fn z(&self) -> i16 {
        self.sample.z
    }

    /// Latest raw reading, not offset-corrected.
    pub fn sample(&self) -> Sample {
        self.sample
    }

    pub fn offset(&self) -> Sample {
        self.offset
    }

    pub fn state(&self) -> CompassState {
        self.state
    }

    pub fn is_calibrated(&self) -> bool {
        self.state == CompassState::Calibrated
    }

    pub fn is_calibrating(&self) -> bool {
        self.state == CompassState::Calibrating
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn mag(&mut self) -> &mut Mag3110<I2C, E> {
        &mut self.mag
    }

    pub fn events(&self) -> &EVT {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EVT {
        &mut self.events
    }

    pub fn release(self) -> (I2C, DRDY, CLK, EVT) {
        (self.mag.i2c, self.data_ready, self.clock, self.events)
    }
}

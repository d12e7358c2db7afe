//! Driver for the NXP MAG3110 three-axis magnetometer, with hard-iron
//! calibration and a tilt-free compass heading.
//!
//! [`Mag3110`] is the register-level driver. [`Compass`] builds the
//! calibration state machine and heading on top of it, driven by a
//! scheduler calling [`Compass::idle_tick`].
#![cfg_attr(not(test), no_std)]

pub mod registers;
pub mod configs;
pub mod types;
pub mod calibration;
pub mod heading;
pub mod events;
pub mod clock;
pub mod compass;

#[cfg(test)]
mod testing;

use embedded_hal::i2c::I2c;
use log::debug;

use registers::*;

pub use calibration::Envelope;
pub use clock::Clock;
pub use compass::Compass;
pub use configs::*;
pub use events::{Event, EventQueue, EventSink};
pub use types::*;

/// Trait alias to support both I2c<SevenBitAddress> and I2c without address mode.
pub trait CompatibleI2c<E>: I2c<Error = E> {}
impl<T, E> CompatibleI2c<E> for T where T: I2c<Error = E> {}

pub const DEFAULT_ADDRESS: u8 = 0x0E;

#[derive(Debug)]
pub enum Error<E> {
    I2c(E),
    /// The data-ready input could not be read.
    DataReady(embedded_hal::digital::ErrorKind),
    /// WHO_AM_I returned something other than [`WHO_AM_I_VALUE`].
    InvalidDevice(u8),
}

pub struct Mag3110<I2C, E> {
    i2c: I2C,
    address: u8,
    _error: core::marker::PhantomData<E>,
}

impl<I2C, E> Mag3110<I2C, E> {
    pub fn i2c(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }
}

impl<I2C, E> Mag3110<I2C, E>
where
    I2C: CompatibleI2c<E>,
    E: core::fmt::Debug,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            _error: core::marker::PhantomData,
        }
    }

    pub fn default(i2c: I2C) -> Self {
        Self::new(i2c, DEFAULT_ADDRESS)
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(MagReg::WhoAmI as u8)
    }

    /// Reads WHO_AM_I and fails unless it identifies a MAG3110.
    pub fn probe(&mut self) -> Result<u8, Error<E>> {
        let id = self.who_am_i()?;
        if id != WHO_AM_I_VALUE {
            return Err(Error::InvalidDevice(id));
        }
        Ok(id)
    }

    /// Continuous 10Hz sampling with auto-reset, see [`CONFIG_WAKEUP_MAG3110`].
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.apply_config(CONFIG_WAKEUP_MAG3110)
    }

    /// Stops sampling and returns the mode the device reports afterwards.
    pub fn standby(&mut self) -> Result<SysMode, Error<E>> {
        self.apply_config(CONFIG_STANDBY)?;
        self.sys_mode()
    }

    pub fn sys_mode(&mut self) -> Result<SysMode, Error<E>> {
        let bits = self.read_reg(MagReg::SysMod as u8)?;
        Ok(SysMode::from_bits(bits))
    }

    pub fn read_reg(&mut self, reg: u8) -> Result<u8, Error<E>> {
        let mut buf = [0u8];
        self.read_bytes(reg, &mut buf)?;
        Ok(buf[0])
    }

    pub fn write_reg(&mut self, reg: u8, val: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[reg, val])
            .map_err(Error::I2c)
    }

    /// Register address then a repeated-start read of `buffer.len()` bytes.
    pub fn read_bytes(&mut self, start_reg: u8, buffer: &mut [u8]) -> Result<(), Error<E>> {
        self.i2c
            .write_read(self.address, &[start_reg], buffer)
            .map_err(Error::I2c)
    }

    /// Big-endian register pair starting at the MSB register `reg`.
    pub fn read16(&mut self, reg: u8) -> Result<i16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_bytes(reg, &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    pub fn read8(&mut self, reg: u8) -> Result<i8, Error<E>> {
        Ok(self.read_reg(reg)? as i8)
    }

    /// Latest measurement. Reading OUT_X_MSB clears the data-ready line, so X
    /// is always read first.
    pub fn read_sample(&mut self) -> Result<Sample, Error<E>> {
        Ok(Sample {
            x: self.read16(MagReg::OutXMsb as u8)?,
            y: self.read16(MagReg::OutYMsb as u8)?,
            z: self.read16(MagReg::OutZMsb as u8)?,
        })
    }

    pub fn read_offset(&mut self) -> Result<Sample, Error<E>> {
        Ok(Sample {
            x: self.read16(MagReg::OffXMsb as u8)?,
            y: self.read16(MagReg::OffYMsb as u8)?,
            z: self.read16(MagReg::OffZMsb as u8)?,
        })
    }

    /// Stores `offset` in the offset registers, low byte then high byte per axis.
    /// Every write is attempted; the first failure is returned.
    pub fn write_offset(&mut self, offset: Sample) -> Result<(), Error<E>> {
        let axes: [i16; 3] = offset.into();
        let mut result = Ok(());
        for ((lsb, msb), value) in OFFSET_REGS.iter().zip(axes) {
            let [hi, lo] = value.to_be_bytes();
            for (reg, byte) in [(lsb.addr(), lo), (msb.addr(), hi)] {
                let written = self.write_reg(reg, byte);
                if result.is_ok() {
                    result = written;
                }
            }
        }
        result
    }

    /// Die temperature in degrees Celsius, uncalibrated.
    pub fn temperature(&mut self) -> Result<i8, Error<E>> {
        self.read8(MagReg::DieTemp as u8)
    }

    pub fn data_status(&mut self) -> Result<DataStatus, Error<E>> {
        let bits = self.read_reg(MagReg::DrStatus as u8)?;
        Ok(DataStatus::from_bits_truncate(bits))
    }

    /// Accepts any register type that implements the `Register` trait
    pub fn apply_config<R>(&mut self, config: &[RegConfig<R>]) -> Result<(), Error<E>>
    where
        R: Register + NamedRegister + Copy,
    {
        for entry in config {
            let addr = entry.reg.addr();
            match entry.op {
                RegOp::Write => {
                    debug!("write_reg {:<21}({:#04X}) = {:#04x}", entry.reg.name(), addr, entry.value);
                    self.write_reg(addr, entry.value)?
                },
                RegOp::Read => {
                    let data = self.read_reg(addr)?;
                    debug!("read_reg {:<21}({:#04X}) = {:#04x}", entry.reg.name(), addr, data);
                }
            }
        }
        Ok(())
    }

    pub fn dump_config<R>(&mut self, regs: &[R]) -> Result<(), Error<E>>
    where
        R: NamedRegister + Copy,
    {
        for reg in regs {
            let addr = reg.addr();
            let v = self.read_reg(addr)?;
            debug!("{:<21}({:#04x}): 0x{:02X} ({:>3}) 0b{:08b}", reg.name(), addr, v, v, v);
        }
        Ok(())
    }
}

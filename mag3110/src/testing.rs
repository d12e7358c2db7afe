//! Host-side stand-ins for the bus, data-ready line, clock and event bus.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use core::convert::Infallible;
use embedded_hal::digital::{self, InputPin};
use embedded_hal::i2c::{self, ErrorKind, NoAcknowledgeSource, Operation};

use crate::clock::Clock;
use crate::events::EventSink;
use crate::registers::MagReg;
use crate::types::{CompassEvent, Sample};
use crate::DEFAULT_ADDRESS;

const REG_COUNT: usize = 0x12;

#[derive(Default)]
struct Device {
    regs: [u8; REG_COUNT],
    pointer: usize,
    writes: Vec<(u8, u8)>,
    reads: usize,
    data_ready: bool,
    fail: bool,
    fail_reg: Option<u8>,
}

/// MAG3110 register file behind an I2C bus. Register pointer auto-increments,
/// and reading OUT_X_MSB drops the data-ready line like the real part.
#[derive(Clone, Default)]
pub struct FakeBus {
    device: Rc<RefCell<Device>>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reg(&self, reg: MagReg, value: u8) {
        self.device.borrow_mut().regs[reg as usize] = value;
    }

    pub fn reg(&self, reg: MagReg) -> u8 {
        self.device.borrow().regs[reg as usize]
    }

    pub fn set_offset(&self, offset: Sample) {
        let pairs = [
            (MagReg::OffXMsb, offset.x),
            (MagReg::OffYMsb, offset.y),
            (MagReg::OffZMsb, offset.z),
        ];
        for (msb, v) in pairs {
            let [hi, lo] = v.to_be_bytes();
            self.set_reg(msb, hi);
            self.device.borrow_mut().regs[msb as usize + 1] = lo;
        }
    }

    /// Loads a new measurement and raises data-ready.
    pub fn push_sample(&self, s: Sample) {
        let pairs = [
            (MagReg::OutXMsb, s.x),
            (MagReg::OutYMsb, s.y),
            (MagReg::OutZMsb, s.z),
        ];
        for (msb, v) in pairs {
            let [hi, lo] = v.to_be_bytes();
            self.set_reg(msb, hi);
            self.device.borrow_mut().regs[msb as usize + 1] = lo;
        }
        self.device.borrow_mut().data_ready = true;
    }

    pub fn set_data_ready(&self, level: bool) {
        self.device.borrow_mut().data_ready = level;
    }

    pub fn fail(&self, fail: bool) {
        self.device.borrow_mut().fail = fail;
    }

    /// Writes addressed to `reg` are refused; everything else succeeds.
    pub fn fail_writes_to(&self, reg: MagReg) {
        self.device.borrow_mut().fail_reg = Some(reg as u8);
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.device.borrow().writes.clone()
    }

    pub fn clear_log(&self) {
        let mut dev = self.device.borrow_mut();
        dev.writes.clear();
        dev.reads = 0;
    }

    /// Number of read transfers seen.
    pub fn reads(&self) -> usize {
        self.device.borrow().reads
    }

    pub fn data_ready_pin(&self) -> FakePin {
        FakePin { device: self.device.clone() }
    }
}

impl i2c::ErrorType for FakeBus {
    type Error = ErrorKind;
}

impl i2c::I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut dev = self.device.borrow_mut();
        if dev.fail {
            return Err(ErrorKind::Other);
        }
        if address != DEFAULT_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((reg, data)) = bytes.split_first() else {
                        continue;
                    };
                    if !data.is_empty() && dev.fail_reg == Some(*reg) {
                        return Err(ErrorKind::Other);
                    }
                    dev.pointer = *reg as usize;
                    for b in data {
                        let at = dev.pointer;
                        if at < REG_COUNT {
                            dev.regs[at] = *b;
                        }
                        dev.writes.push((at as u8, *b));
                        dev.pointer += 1;
                    }
                }
                Operation::Read(buf) => {
                    dev.reads += 1;
                    for b in buf.iter_mut() {
                        let at = dev.pointer;
                        *b = dev.regs.get(at).copied().unwrap_or(0);
                        if at == MagReg::OutXMsb as usize {
                            dev.data_ready = false;
                        }
                        dev.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

pub struct FakePin {
    device: Rc<RefCell<Device>>,
}

impl digital::ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.device.borrow().data_ready)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.device.borrow().data_ready)
    }
}

#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<u64>>,
}

impl FakeClock {
    pub fn set(&self, ticks: u64) {
        self.now.set(ticks);
    }

    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get() + ticks);
    }
}

impl Clock for FakeClock {
    fn ticks(&self) -> u64 {
        self.now.get()
    }
}

impl EventSink for Vec<(u16, CompassEvent)> {
    fn publish(&mut self, source: u16, event: CompassEvent) {
        self.push((source, event));
    }
}

use crate::registers::*;

// 10Hz at 16x oversampling, continuous, raw output with a reset before each
// measurement. CTRL_REG2 goes first; CTRL_REG1 starts sampling.
pub const CONFIG_WAKEUP_MAG3110: &[RegConfig<MagReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::CtrlReg2,
        value: CtrlReg2Flags::AUTO_MRST_EN.bits() | CtrlReg2Flags::RAW.bits(),
    },
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::CtrlReg1,
        value: (MagDataRate::Hz10 as u8) << MAG_DR_LOC
            | (MagOversampling::Os16 as u8) << MAG_OS_LOC
            | CtrlReg1Flags::ACTIVE.bits(),
    },
];

// Zero the persisted user offset, LSB then MSB per axis
pub const CONFIG_CLEAR_OFFSET: &[RegConfig<MagReg>] = &[
    RegConfig { op: RegOp::Write, reg: MagReg::OffXLsb, value: 0x00 },
    RegConfig { op: RegOp::Write, reg: MagReg::OffXMsb, value: 0x00 },
    RegConfig { op: RegOp::Write, reg: MagReg::OffYLsb, value: 0x00 },
    RegConfig { op: RegOp::Write, reg: MagReg::OffYMsb, value: 0x00 },
    RegConfig { op: RegOp::Write, reg: MagReg::OffZLsb, value: 0x00 },
    RegConfig { op: RegOp::Write, reg: MagReg::OffZMsb, value: 0x00 },
];

pub const CONFIG_STANDBY: &[RegConfig<MagReg>] = &[
    RegConfig {
        op: RegOp::Write,
        reg: MagReg::CtrlReg1,
        value: 0x00,
    },
];

/// Construction-time settings for [`crate::Compass`].
#[derive(Clone, Copy, Debug)]
pub struct CompassConfig {
    /// Component id carried by every published event.
    pub id: u16,
    pub address: u8,
    /// Ticks an asynchronous calibration pass collects samples for.
    pub calibrate_period: u64,
    pub wakeup: &'static [RegConfig<MagReg>],
}

pub const DEFAULT_COMPONENT_ID: u16 = 5;
pub const DEFAULT_CALIBRATE_PERIOD: u64 = 10_000;

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_COMPONENT_ID,
            address: crate::DEFAULT_ADDRESS,
            calibrate_period: DEFAULT_CALIBRATE_PERIOD,
            wakeup: CONFIG_WAKEUP_MAG3110,
        }
    }
}

use bitflags::bitflags;

macro_rules! registers {
    (
        $enum_name:ident, $slice_name:ident {
            $($name:ident = $val:expr),* $(,)?
        }
    ) => {
        #[repr(u8)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum $enum_name {
            $($name = $val),*
        }

        pub const $slice_name: &[$enum_name] = &[
            $($enum_name::$name),*
        ];

        impl $enum_name {
            pub fn name(&self) -> &'static str {
                match self {
                    $($enum_name::$name => stringify!($name),)*
                }
            }
        }

        impl Register for $enum_name {
            fn addr(self) -> u8 {
                self as u8
            }
        }

        impl NamedRegister for $enum_name {
            fn name(&self) -> &'static str {
                self.name()
            }
        }

        impl From<$enum_name> for u8 {
            fn from(r: $enum_name) -> u8 {
                r as u8
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegOp {
    Read,
    Write,
}

pub trait NamedRegister: Register {
    fn name(&self) -> &'static str;
}

pub trait Register: Copy {
    fn addr(self) -> u8;
}

#[derive(Clone, Copy, Debug)]
pub struct RegConfig<R: Register> {
    pub op: RegOp,
    pub reg: R,
    pub value: u8,
}

registers! {
    MagReg, MAG_REGS {
        DrStatus = 0x00,
        OutXMsb = 0x01,
        OutXLsb = 0x02,
        OutYMsb = 0x03,
        OutYLsb = 0x04,
        OutZMsb = 0x05,
        OutZLsb = 0x06,
        WhoAmI = 0x07,
        SysMod = 0x08,
        OffXMsb = 0x09,
        OffXLsb = 0x0A,
        OffYMsb = 0x0B,
        OffYLsb = 0x0C,
        OffZMsb = 0x0D,
        OffZLsb = 0x0E,
        DieTemp = 0x0F,
        CtrlReg1 = 0x10,
        CtrlReg2 = 0x11,
    }
}

/// Value of WHO_AM_I on a genuine part.
pub const WHO_AM_I_VALUE: u8 = 0xC4;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DataStatus: u8 {
        const ZYXOW = 1 << 7;
        const ZOW   = 1 << 6;
        const YOW   = 1 << 5;
        const XOW   = 1 << 4;
        const ZYXDR = 1 << 3;
        const ZDR   = 1 << 2;
        const YDR   = 1 << 1;
        const XDR   = 1 << 0;
    }
}

/* CTRL_REG1
 * B7   B6   B5   B4   B3   B2   B1   B0
 * DR2  DR1  DR0  OS1  OS0  FR   TM   AC
*/
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CtrlReg1Flags: u8 {
        const FAST_READ = 1 << 2;
        const TRIGGER   = 1 << 1;
        const ACTIVE    = 1 << 0;
    }
}

pub const MAG_DR_LOC: u8 = 5;
/// Output rate at 16x oversampling. Each oversampling step up halves it.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagDataRate {
    Hz80    = 0,
    Hz40    = 1,
    Hz20    = 2,
    Hz10    = 3,
    Hz5     = 4,
    Hz2_5   = 5,
    Hz1_25  = 6,
    Hz0_63  = 7,
}

pub const MAG_OS_LOC: u8 = 3;
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MagOversampling {
    Os16    = 0,
    Os32    = 1,
    Os64    = 2,
    Os128   = 3,
}

/* CTRL_REG2
 * B7           B6   B5   B4       B3   B2   B1   B0
 * AUTO_MRST_EN 0    RAW  Mag_RST  0    0    0    0
*/
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CtrlReg2Flags: u8 {
        const AUTO_MRST_EN = 1 << 7;
        const RAW          = 1 << 5;
        const MAG_RST      = 1 << 4;
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SysMode {
    Standby     = 0,
    ActiveRaw   = 1,
    Active      = 2,
}

impl SysMode {
    /// SYSMOD only uses bits 1:0, and 3 is not assigned.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => SysMode::Standby,
            1 => SysMode::ActiveRaw,
            _ => SysMode::Active,
        }
    }
}

/// Offset register pairs, in the order they are persisted.
pub const OFFSET_REGS: [(MagReg, MagReg); 3] = [
    (MagReg::OffXLsb, MagReg::OffXMsb),
    (MagReg::OffYLsb, MagReg::OffYMsb),
    (MagReg::OffZLsb, MagReg::OffZMsb),
];

/// One three-axis reading in raw sensor counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Sample {
    pub const ZERO: Sample = Sample { x: 0, y: 0, z: 0 };

    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl From<[i16; 3]> for Sample {
    fn from(v: [i16; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Sample> for [i16; 3] {
    fn from(s: Sample) -> Self {
        [s.x, s.y, s.z]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassState {
    /// No usable offset, either never calibrated or cleared.
    Uncalibrated,
    Calibrating,
    Calibrated,
}

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassEvent {
    CalibrationRequired = 1,
    CalibrationStart = 2,
    CalibrationEnd = 3,
}

impl CompassEvent {
    pub fn id(self) -> u16 {
        self as u16
    }
}

/// Why [`crate::Compass::heading`] could not produce a bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingUnavailable {
    Calibrating,
    CalibrationRequired,
}

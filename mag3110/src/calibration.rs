use crate::types::Sample;

/// Per-axis running minimum and maximum seen during a calibration pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Envelope {
    pub min: Sample,
    pub max: Sample,
}

impl Envelope {
    pub fn seeded(sample: Sample) -> Self {
        Self { min: sample, max: sample }
    }

    pub fn include(&mut self, s: Sample) {
        self.min.x = self.min.x.min(s.x);
        self.min.y = self.min.y.min(s.y);
        self.min.z = self.min.z.min(s.z);

        self.max.x = self.max.x.max(s.x);
        self.max.y = self.max.y.max(s.y);
        self.max.z = self.max.z.max(s.z);
    }

    /// Hard-iron offset: per-axis midpoint, truncated toward zero.
    pub fn midpoint(&self) -> Sample {
        fn mid(a: i16, b: i16) -> i16 {
            ((a as i32 + b as i32) / 2) as i16
        }

        Sample {
            x: mid(self.max.x, self.min.x),
            y: mid(self.max.y, self.min.y),
            z: mid(self.max.z, self.min.z),
        }
    }
}

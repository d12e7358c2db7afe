use core::f64::consts::PI;

use crate::types::Sample;

/// Heading in whole degrees, clockwise from magnetic north, for `sample`
/// corrected by the hard-iron `offset`. Only the horizontal (x, y) plane is
/// used. Always in `0..360`.
pub fn heading_degrees(sample: Sample, offset: Sample) -> u16 {
    let dx = (sample.x as i32 - offset.x as i32) as f64;
    let dy = (sample.y as i32 - offset.y as i32) as f64;

    let mut bearing = libm::atan2(dy, dx) * 180.0 / PI;
    if bearing < 0.0 {
        bearing += 360.0;
    }

    // truncation, not rounding; a bearing of exactly 0 lands on 360
    let heading = (360.0 - bearing) as u16;
    heading % 360
}

//! 3D coordinate slots used for positioning and pathing.

use crate::model::FieldError;

/// One waypoint: signed 16-bit raw coordinates plus an enabled flag. The
/// region index exists on disk only in the last generation and is restricted
/// to 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Waypoint {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub enabled: bool,
    region: u8,
}

impl Waypoint {
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Waypoint { x, y, z, enabled: true, region: 0 }
    }

    pub fn region(&self) -> u8 {
        self.region
    }

    pub fn set_region(&mut self, region: u8) -> Result<(), FieldError> {
        if region > 3 {
            return Err(FieldError::OutOfRange {
                field: "waypoint region",
                value: region as i32,
                max: 3,
            });
        }
        self.region = region;
        Ok(())
    }
}

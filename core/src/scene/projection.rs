use serde::{Deserialize, Serialize};

/// Fixed-origin linear projection from geographic to scene coordinates.
///
/// Purely illustrative: neither equal-area nor conformal, just a flat
/// offset-and-scale around the configured center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoProjection {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub scale: f64,
}

impl Default for GeoProjection {
    /// Geographic center of peninsular Spain.
    fn default() -> Self {
        Self {
            center_latitude: 40.4637,
            center_longitude: -3.7492,
            scale: 10.0,
        }
    }
}

impl GeoProjection {
    /// Maps a coordinate onto the stage plane; y is always ground level.
    pub fn scene_position(&self, latitude: f64, longitude: f64) -> [f32; 3] {
        let x = (longitude - self.center_longitude) * self.scale;
        let z = (self.center_latitude - latitude) * self.scale;
        [x as f32, 0.0, z as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_projects_to_the_origin() {
        let projection = GeoProjection::default();
        let position =
            projection.scene_position(projection.center_latitude, projection.center_longitude);
        assert_eq!(position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn axes_follow_the_map_convention() {
        let projection = GeoProjection::default();
        // East of center -> positive x; north of center -> negative z.
        let east = projection.scene_position(40.4637, -2.7492);
        assert!((east[0] - 10.0).abs() < 1e-4 && east[2].abs() < 1e-4);
        let north = projection.scene_position(41.4637, -3.7492);
        assert!(north[0].abs() < 1e-4 && (north[2] + 10.0).abs() < 1e-4);
    }
}

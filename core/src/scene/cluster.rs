use crate::scene::params::building_count;
use crate::scene::JitterSource;
use std::f32::consts::PI;

/// Placement and shape of one building inside a city cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSpec {
    pub x: f32,
    pub z: f32,
    pub height: f32,
    pub width: f32,
    pub depth: f32,
    pub emissive_intensity: f32,
}

/// Lays out a city's buildings on a ring around its scene anchor.
///
/// Building count, footprint and base height grow with AQI; the jitter
/// term only perturbs heights so two cities with identical readings do
/// not render as identical silhouettes.
pub fn cluster_layout(aqi: i32, jitter: &mut dyn JitterSource) -> Vec<BuildingSpec> {
    let count = building_count(aqi);
    let base_height = 0.3 + aqi.max(0) as f32 * 0.4;
    let width = 0.06 + aqi.max(0) as f32 / 10.0;
    let emissive_intensity = 0.1 + aqi.max(0) as f32 / 10.0;
    let radius = 0.15;

    (0..count)
        .map(|i| {
            let angle = (i as f32 / count as f32) * 2.0 * PI;
            BuildingSpec {
                x: angle.cos() * radius,
                z: angle.sin() * radius,
                height: base_height + jitter.unit() * 0.3,
                width,
                depth: width * 0.8,
                emissive_intensity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NoJitter, SeededJitter};

    #[test]
    fn layout_size_matches_building_count() {
        for aqi in 1..=6 {
            let layout = cluster_layout(aqi, &mut NoJitter);
            assert_eq!(layout.len(), building_count(aqi));
        }
    }

    #[test]
    fn jitter_free_layout_is_exact() {
        let layout = cluster_layout(3, &mut NoJitter);
        assert_eq!(layout[0].height, 0.3 + 3.0 * 0.4);
        assert_eq!(layout[0].width, 0.06 + 0.3);
        // First building sits on the positive x axis.
        assert!((layout[0].x - 0.15).abs() < 1e-6);
        assert!(layout[0].z.abs() < 1e-6);
    }

    #[test]
    fn seeded_layouts_replay() {
        let a = cluster_layout(5, &mut SeededJitter::new(11));
        let b = cluster_layout(5, &mut SeededJitter::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn heights_grow_with_aqi() {
        let calm = cluster_layout(1, &mut NoJitter)[0].height;
        let severe = cluster_layout(6, &mut NoJitter)[0].height;
        assert!(severe > calm);
    }
}

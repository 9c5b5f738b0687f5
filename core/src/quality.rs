use serde::{Deserialize, Serialize};

/// Air-quality severity derived from the coarse 1-6 AQI scale.
///
/// The ordering is total: `Excellent < Good < ... < Hazardous`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
    Hazardous,
}

impl QualityLevel {
    /// Classifies an AQI value into a severity level.
    ///
    /// Values at or below 1 clamp to `Excellent` and values at or above 6
    /// collapse to `Hazardous`, so the mapping is total and monotone even
    /// for out-of-range input.
    pub fn from_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=1 => QualityLevel::Excellent,
            2 => QualityLevel::Good,
            3 => QualityLevel::Moderate,
            4 => QualityLevel::Poor,
            5 => QualityLevel::VeryPoor,
            _ => QualityLevel::Hazardous,
        }
    }

    /// Fixed display color per level, as an `#rrggbb` hex string.
    pub fn color(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "#00e400",
            QualityLevel::Good => "#ffff00",
            QualityLevel::Moderate => "#ff7e00",
            QualityLevel::Poor => "#ff0000",
            QualityLevel::VeryPoor => "#8f3f97",
            QualityLevel::Hazardous => "#7e0023",
        }
    }

    /// Same color decomposed into linear RGB components in [0, 1].
    pub fn rgb(&self) -> [f32; 3] {
        let hex = &self.color()[1..];
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).unwrap_or(0) as f32 / 255.0
        };
        [channel(0), channel(1), channel(2)]
    }

    /// Human-readable advisory text shown next to the level.
    pub fn description(&self) -> &'static str {
        match self {
            QualityLevel::Excellent => "Excelente - Aire muy limpio",
            QualityLevel::Good => "Buena - Aire de buena calidad",
            QualityLevel::Moderate => "Moderada - Calidad aceptable",
            QualityLevel::Poor => "Mala - Puede afectar a personas sensibles",
            QualityLevel::VeryPoor => "Muy Mala - Evitar actividades al aire libre",
            QualityLevel::Hazardous => "Peligrosa - Emergencia sanitaria",
        }
    }
}

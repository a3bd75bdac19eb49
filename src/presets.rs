use opencv::core::Scalar;

use crate::error::PresetError;

/// Inclusive HSV bound pair in OpenCV convention: hue 0-179, saturation and
/// value 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    pub fn lower_scalar(&self) -> Scalar {
        Scalar::new(
            f64::from(self.lower[0]),
            f64::from(self.lower[1]),
            f64::from(self.lower[2]),
            0.0,
        )
    }

    pub fn upper_scalar(&self) -> Scalar {
        Scalar::new(
            f64::from(self.upper[0]),
            f64::from(self.upper[1]),
            f64::from(self.upper[2]),
            0.0,
        )
    }
}

/// Preset HSV ranges for the supported colors. Built once at startup and
/// handed to whoever needs a lookup; the table never changes afterwards.
///
/// Red sits on the hue wrap-around at 0, so it needs two disjoint ranges.
pub struct ColorPresets {
    presets: Vec<(&'static str, Vec<HsvRange>)>,
}

impl ColorPresets {
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                (
                    "red",
                    vec![
                        HsvRange::new([0, 120, 70], [10, 255, 255]),
                        HsvRange::new([170, 120, 70], [180, 255, 255]),
                    ],
                ),
                ("blue", vec![HsvRange::new([94, 80, 2], [126, 255, 255])]),
                ("green", vec![HsvRange::new([40, 40, 40], [80, 255, 255])]),
            ],
        }
    }

    pub fn ranges_for(&self, name: &str) -> Result<&[HsvRange], PresetError> {
        self.presets
            .iter()
            .find(|(preset_name, _)| *preset_name == name)
            .map(|(_, ranges)| ranges.as_slice())
            .ok_or_else(|| PresetError::UnknownColor(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.presets.iter().map(|(name, _)| *name).collect()
    }
}

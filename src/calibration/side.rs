// Eye side tag
//
// Replaces the legacy integer encoding (0 = left, 1 = right). Raw tags are
// only accepted through the fallible conversions below, so a stray value
// can never be filed under the wrong eye.

use std::fmt;
use std::str::FromStr;

use crate::error::CalibrationError;

/// Which eye a frame or sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EyeSide {
    Left,
    Right,
}

impl EyeSide {
    /// Both sides in calibration order
    pub const ALL: [EyeSide; 2] = [EyeSide::Left, EyeSide::Right];

    /// Get human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            EyeSide::Left => "left",
            EyeSide::Right => "right",
        }
    }
}

impl fmt::Display for EyeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl TryFrom<i32> for EyeSide {
    type Error = CalibrationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EyeSide::Left),
            1 => Ok(EyeSide::Right),
            other => Err(CalibrationError::InvalidSide {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for EyeSide {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" | "0" => Ok(EyeSide::Left),
            "right" | "r" | "1" => Ok(EyeSide::Right),
            _ => Err(CalibrationError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_legacy_tags() {
        assert_eq!(EyeSide::try_from(0).unwrap(), EyeSide::Left);
        assert_eq!(EyeSide::try_from(1).unwrap(), EyeSide::Right);
    }

    #[test]
    fn test_try_from_rejects_other_values() {
        for raw in [2, -1, 42, i32::MAX] {
            match EyeSide::try_from(raw) {
                Err(CalibrationError::InvalidSide { value }) => {
                    assert_eq!(value, raw.to_string());
                }
                other => panic!("Expected InvalidSide for {}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("left".parse::<EyeSide>().unwrap(), EyeSide::Left);
        assert_eq!(" Right ".parse::<EyeSide>().unwrap(), EyeSide::Right);
        assert_eq!("r".parse::<EyeSide>().unwrap(), EyeSide::Right);
        assert!(matches!(
            "both".parse::<EyeSide>(),
            Err(CalibrationError::InvalidSide { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(EyeSide::Left.to_string(), "left");
        assert_eq!(EyeSide::ALL, [EyeSide::Left, EyeSide::Right]);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&EyeSide::Right).unwrap();
        assert_eq!(json, "\"right\"");
        let side: EyeSide = serde_json::from_str("\"left\"").unwrap();
        assert_eq!(side, EyeSide::Left);
    }
}

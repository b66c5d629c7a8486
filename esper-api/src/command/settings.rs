//! Range-checked device setting values
//!
//! Each type can only be constructed from an in-range value, so a command
//! built from one is valid by construction.

use serde::{Serialize, Serializer};

use super::validation::{ensure_in_range, ValidationError};

/// Screen brightness in percent (1-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Brightness(u8);

impl Brightness {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        ensure_in_range("brightness_value", value, Self::MIN, Self::MAX).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Brightness {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = ensure_in_range("brightness_value", value, Self::MIN.into(), Self::MAX.into())?;
        // In range, so it fits a u8.
        Ok(Self(value as u8))
    }
}

/// Stream volume in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VolumeLevel(u8);

impl VolumeLevel {
    pub const MAX: u8 = 100;

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        ensure_in_range("volume_level", value, 0, Self::MAX).map(Self)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for VolumeLevel {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let value = ensure_in_range("volume_level", value, 0, Self::MAX.into())?;
        Ok(Self(value as u8))
    }
}

/// Declares an enum carried on the wire as its integer code
macro_rules! coded_setting {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $parameter:literal {
            $($variant:ident = $code:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant = $code),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn code(&self) -> u8 {
                *self as u8
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)*
                    other => {
                        let max = Self::ALL.iter().map(|v| v.code()).max().unwrap_or(0);
                        Err(ValidationError::range_error($parameter, 0, max, other))
                    }
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                i64::from(value.code())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }
    };
}

coded_setting! {
    /// Audio stream addressed by a volume command
    pub enum VolumeStream: "stream" {
        Ring = 0,
        Notification = 1,
        Alarm = 2,
        Music = 3,
    }
}

coded_setting! {
    /// Location mode
    pub enum GpsState: "gps_state" {
        HighAccuracy = 0,
        SensorsOnly = 1,
        BatterySaving = 2,
        Off = 3,
        On = 4,
    }
}

coded_setting! {
    /// Screen orientation lock
    pub enum RotationState: "rotate_state" {
        Auto = 0,
        PortraitOnly = 1,
        LandscapeOnly = 2,
    }
}

/// Idle time before the screen turns off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOffTimeout {
    /// Keep the screen on (`-1` on the wire)
    Never,
    /// Milliseconds, between 5 000 and 1 800 000
    Millis(u32),
}

impl ScreenOffTimeout {
    pub const MIN_MILLIS: i64 = 5_000;
    pub const MAX_MILLIS: i64 = 1_800_000;

    /// Build from the wire representation: `-1` or a millisecond count
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value == -1 {
            return Ok(ScreenOffTimeout::Never);
        }
        if !(Self::MIN_MILLIS..=Self::MAX_MILLIS).contains(&value) {
            return Err(ValidationError::invalid_value(
                "screen_off_timeout",
                value,
                "must be -1 or between 5000 and 1800000",
            ));
        }
        // The bounds above fit in a u32.
        Ok(ScreenOffTimeout::Millis(value as u32))
    }

    pub fn as_wire(&self) -> i64 {
        match self {
            ScreenOffTimeout::Never => -1,
            ScreenOffTimeout::Millis(ms) => i64::from(*ms),
        }
    }
}

impl Serialize for ScreenOffTimeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.as_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, true)]
    #[case(70, true)]
    #[case(100, true)]
    #[case(0, false)]
    #[case(101, false)]
    #[case(255, false)]
    fn test_brightness_range(#[case] value: u8, #[case] valid: bool) {
        assert_eq!(Brightness::new(value).is_ok(), valid);
    }

    #[rstest]
    #[case(-5)]
    #[case(-1)]
    #[case(256)]
    #[case(356)]
    #[case(i64::MAX)]
    fn test_wide_integers_do_not_wrap(#[case] value: i64) {
        assert!(matches!(
            Brightness::try_from(value),
            Err(ValidationError::RangeError { .. })
        ));
        assert!(matches!(
            VolumeLevel::try_from(value),
            Err(ValidationError::RangeError { .. })
        ));
        assert!(matches!(
            VolumeStream::try_from(value),
            Err(ValidationError::RangeError { .. })
        ));
        assert!(matches!(
            GpsState::try_from(value),
            Err(ValidationError::RangeError { .. })
        ));
        assert!(matches!(
            RotationState::try_from(value),
            Err(ValidationError::RangeError { .. })
        ));
    }

    #[test]
    fn test_wide_integers_in_range() {
        assert_eq!(Brightness::try_from(70i64).unwrap().value(), 70);
        assert_eq!(VolumeLevel::try_from(0i64).unwrap().value(), 0);
        assert_eq!(i64::from(VolumeStream::Music), 3);
    }

    #[test]
    fn test_volume_level_range() {
        assert_eq!(VolumeLevel::new(0).unwrap().value(), 0);
        assert_eq!(VolumeLevel::new(100).unwrap().value(), 100);
        assert!(VolumeLevel::new(101).is_err());
    }

    #[test]
    fn test_coded_settings_from_code() {
        assert_eq!(VolumeStream::try_from(3), Ok(VolumeStream::Music));
        assert_eq!(GpsState::try_from(0), Ok(GpsState::HighAccuracy));
        assert_eq!(RotationState::try_from(1), Ok(RotationState::PortraitOnly));

        assert_eq!(
            VolumeStream::try_from(4),
            Err(ValidationError::range_error("stream", 0, 3, 4))
        );
        assert_eq!(
            GpsState::try_from(5),
            Err(ValidationError::range_error("gps_state", 0, 4, 5))
        );
        assert_eq!(
            RotationState::try_from(3),
            Err(ValidationError::range_error("rotate_state", 0, 2, 3))
        );
    }

    #[test]
    fn test_coded_settings_serialize_as_integers() {
        assert_eq!(serde_json::to_value(VolumeStream::Alarm).unwrap(), 2);
        assert_eq!(serde_json::to_value(GpsState::On).unwrap(), 4);
        assert_eq!(u8::from(RotationState::LandscapeOnly), 2);
    }

    #[rstest]
    #[case(-1, Some(ScreenOffTimeout::Never))]
    #[case(5_000, Some(ScreenOffTimeout::Millis(5_000)))]
    #[case(1_800_000, Some(ScreenOffTimeout::Millis(1_800_000)))]
    #[case(0, None)]
    #[case(-2, None)]
    #[case(4_999, None)]
    #[case(1_800_001, None)]
    fn test_screen_off_timeout(#[case] value: i64, #[case] expected: Option<ScreenOffTimeout>) {
        assert_eq!(ScreenOffTimeout::new(value).ok(), expected);
    }

    #[test]
    fn test_screen_off_timeout_wire_value() {
        assert_eq!(serde_json::to_value(ScreenOffTimeout::Never).unwrap(), -1);
        assert_eq!(serde_json::to_value(ScreenOffTimeout::Millis(30_000)).unwrap(), 30_000);
    }
}

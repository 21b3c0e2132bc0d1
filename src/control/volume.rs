//! Volume and mute bookkeeping

/// Volume level (0.0 = silent, 1.0 = max)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Volume(f32);

impl Volume {
    /// Minimum volume (silent)
    pub const MIN: Self = Self(0.0);
    /// Maximum volume
    pub const MAX: Self = Self(1.0);
    /// Volume restored by unmute when nothing better is known
    pub const UNMUTE_DEFAULT: Self = Self(0.5);

    /// Create a new volume level, clamped to 0.0 - 1.0
    ///
    /// NaN is treated as silence.
    #[must_use]
    pub fn new(level: f32) -> Self {
        if level.is_nan() {
            Self::MIN
        } else {
            Self(level.clamp(0.0, 1.0))
        }
    }

    /// Get as f32 (0.0 - 1.0)
    #[must_use]
    pub fn as_f32(&self) -> f32 {
        self.0
    }

    /// Get as percentage (0 - 100)
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Volume percentage fits in u8"
    )]
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    /// Create from percentage
    #[must_use]
    pub fn from_percent(percent: u8) -> Self {
        Self::new(f32::from(percent) / 100.0)
    }

    /// Check if exactly zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Coarse level for volume indicators
    #[must_use]
    pub fn level(&self) -> VolumeLevel {
        if self.is_zero() {
            VolumeLevel::Muted
        } else if self.0 < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<f32> for Volume {
    fn from(v: f32) -> Self {
        Self::new(v)
    }
}

/// Coarse volume level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    /// Muted or zero
    Muted,
    /// Below half
    Low,
    /// Half or above
    High,
}

/// Volume, mute flag and the last audible volume
///
/// Invariant: `muted` is true exactly when the stored volume is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeState {
    volume: Volume,
    muted: bool,
    last_non_zero: Volume,
    unmute_default: Volume,
}

impl VolumeState {
    /// Create with an initial volume and the volume unmute falls back to
    #[must_use]
    pub fn new(initial: Volume, unmute_default: Volume) -> Self {
        Self {
            volume: initial,
            muted: initial.is_zero(),
            last_non_zero: initial,
            unmute_default,
        }
    }

    /// Stored volume
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Mute flag
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Last volume above zero, used by unmute
    #[must_use]
    pub fn last_non_zero(&self) -> Volume {
        self.last_non_zero
    }

    /// Volume the session should actually play at
    #[must_use]
    pub fn applied(&self) -> Volume {
        if self.muted { Volume::MIN } else { self.volume }
    }

    /// Clamp and store `level`, returning the stored value
    pub fn set(&mut self, level: f32) -> Volume {
        let clamped = Volume::new(level);
        self.volume = clamped;
        self.muted = clamped.is_zero();
        if !clamped.is_zero() {
            self.last_non_zero = clamped;
        }
        clamped
    }

    /// Flip mute, returning the volume now stored
    pub fn toggle_mute(&mut self) -> Volume {
        if self.muted {
            let restore = if self.last_non_zero.is_zero() {
                self.unmute_default
            } else {
                self.last_non_zero
            };
            self.set(restore.as_f32())
        } else {
            self.last_non_zero = self.volume;
            self.set(0.0)
        }
    }
}

impl Default for VolumeState {
    fn default() -> Self {
        Self::new(Volume::MAX, Volume::UNMUTE_DEFAULT)
    }
}

//! Volume control
//!
//! Linear 0.0-1.0 level with a mute flag. The stored level survives mute so
//! unmuting restores it exactly.

/// Default volume applied when no preference is stored
pub const DEFAULT_VOLUME: f32 = 0.7;

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume, clamped to 0.0-1.0 (non-finite falls back to default)
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::sanitize(level).unwrap_or(DEFAULT_VOLUME),
            muted: false,
        }
    }

    /// Set volume level, clamped to 0.0-1.0
    ///
    /// Non-finite input is ignored. Returns the stored level.
    pub fn set_level(&mut self, level: f32) -> f32 {
        if let Some(level) = Self::sanitize(level) {
            self.level = level;
        }
        self.level
    }

    /// Get current volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output volume
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn sanitize(level: f32) -> Option<f32> {
        level.is_finite().then(|| level.clamp(0.0, 1.0))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

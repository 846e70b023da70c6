//! Configuration for Cursor Trail RS
//! Trail tuning constants and light/dark theme palettes

use serde::{Deserialize, Serialize};

// ============================================================================
// Trail Configuration
// ============================================================================

#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
pub struct TrailConfig {
    pub enabled: bool,
    /// Minimum wall-clock gap between spawn bursts, in milliseconds.
    pub spawn_interval_ms: u64,
    /// Wall-clock lifetime of a particle, in milliseconds.
    pub lifetime_ms: u64,
    /// Simulated age added per animation frame, in milliseconds.
    pub frame_step_ms: f32,
    /// Spawn position jitter, +/- per axis, in pixels.
    pub jitter_px: f32,
    /// Peak opacity at spawn; fades linearly to zero over the lifetime.
    pub max_opacity: f32,
    /// Total downward drift over a full lifetime, in pixels.
    pub gravity_drift_px: f32,
    /// Speed range in pixels per millisecond of age, [min, max).
    pub min_speed: f32,
    pub max_speed: f32,
    /// Particle diameter range in pixels, [min, max).
    pub min_size: f32,
    pub max_size: f32,
    /// Glow radius grows linearly from min to max over the lifetime.
    pub min_glow: f32,
    pub max_glow: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval_ms: 25,
            lifetime_ms: 1000,
            frame_step_ms: 16.0,
            jitter_px: 10.0,
            max_opacity: 0.7,
            gravity_drift_px: 20.0,
            min_speed: 0.5,
            max_speed: 2.5,
            min_size: 2.0,
            max_size: 6.0,
            min_glow: 8.0,
            max_glow: 16.0,
        }
    }
}

// ============================================================================
// Theme Palettes
// ============================================================================

/// Base colors for trail particles; alpha is derived from particle age.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ThemePalette {
    pub name: String,
    pub particles: Vec<[u8; 3]>,
}

impl Default for ThemePalette {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemePalette {
    /// Soft orchid/plum tones for light backgrounds.
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            particles: vec![
                [186, 85, 211],  // medium orchid
                [221, 160, 221], // plum
                [230, 140, 230], // violet
                [255, 182, 193], // light pink
                [216, 191, 216], // thistle
            ],
        }
    }

    /// Pale pastel tones that read well on dark backgrounds.
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            particles: vec![
                [220, 180, 240], // light purple
                [255, 230, 255], // very light pink
                [200, 220, 255], // light blue
                [230, 200, 255], // lilac
                [255, 240, 245], // pale pink
            ],
        }
    }

    pub fn for_theme(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

// ============================================================================
// Theme Watching
// ============================================================================

/// Edge-detects flips of an external boolean theme flag. The first
/// observation always reports, so the engine gets an initial palette even
/// when the watcher is created before the flag is first read.
pub struct ThemeWatcher {
    last: Option<bool>,
}

impl ThemeWatcher {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Feed the current flag; returns `Some(dark_mode)` when it changed.
    pub fn observe(&mut self, dark_mode: bool) -> Option<bool> {
        if self.last == Some(dark_mode) {
            None
        } else {
            self.last = Some(dark_mode);
            Some(dark_mode)
        }
    }
}

impl Default for ThemeWatcher {
    fn default() -> Self {
        Self::new()
    }
}

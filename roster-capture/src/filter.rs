//! Capture settings and the still-image post-process.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::Frame;

pub const MIN_SHUTTER_MS: u64 = 500;
pub const MIN_BRIGHTNESS: f32 = 1.05;
pub const MAX_BRIGHTNESS: f32 = 1.1;

/// Tunables for a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Simulated shutter delay before the frame is sampled
    #[serde(default = "default_shutter_ms")]
    pub shutter_ms: u64,
    #[serde(default = "default_contrast")]
    pub contrast: f32,
    #[serde(default = "default_brightness")]
    pub brightness: f32,
}

fn default_shutter_ms() -> u64 { MIN_SHUTTER_MS }
fn default_contrast() -> f32 { 1.1 }
fn default_brightness() -> f32 { MAX_BRIGHTNESS }

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            shutter_ms: default_shutter_ms(),
            contrast: default_contrast(),
            brightness: default_brightness(),
        }
    }
}

impl CaptureSettings {
    /// Shutter delay, never shorter than [`MIN_SHUTTER_MS`].
    pub fn shutter(&self) -> Duration {
        Duration::from_millis(self.shutter_ms.max(MIN_SHUTTER_MS))
    }

    pub fn filter(&self) -> FrameFilter {
        FrameFilter::new(self.contrast, self.brightness)
    }
}

/// CSS-style `contrast(c) brightness(b)` applied per colour channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFilter {
    contrast: f32,
    brightness: f32,
}

impl FrameFilter {
    /// Brightness is clamped into `1.05..=1.1`.
    pub fn new(contrast: f32, brightness: f32) -> Self {
        Self {
            contrast,
            brightness: brightness.clamp(MIN_BRIGHTNESS, MAX_BRIGHTNESS),
        }
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Adjust one channel value: contrast about mid-grey, then brightness.
    pub fn channel(&self, value: u8) -> u8 {
        let contrasted = (value as f32 - 127.5) * self.contrast + 127.5;
        let brightened = contrasted * self.brightness;
        brightened.round().clamp(0.0, 255.0) as u8
    }

    /// Apply in place. Alpha is left untouched.
    pub fn apply(&self, frame: &mut Frame) {
        let lut: Vec<u8> = (0..=255u8).map(|v| self.channel(v)).collect();
        for pixel in frame.rgba.chunks_exact_mut(4) {
            for channel in &mut pixel[..3] {
                *channel = lut[*channel as usize];
            }
        }
    }
}

impl Default for FrameFilter {
    fn default() -> Self {
        CaptureSettings::default().filter()
    }
}

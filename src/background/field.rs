use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::noise::{mix, random};

/// Offset applied to the swapped seed of the second sparkle channel
const SPARKLE_SEED_OFFSET: DVec2 = DVec2::new(53.7842, 47.5134);

/// Exponent that keeps only hash values right at the top of the range
const SPARKLE_SHARPNESS: f64 = 999.0;

/// Share of the time-varying term in the sparkle mix
const SPARKLE_BLEND: f64 = 0.04;

/// Green channel of the band tint; pulls green below zero inside the band
const BAND_GREEN: f64 = 0.1 - 1.0;

/// Glow band sample for one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Band intensity in [0, 1]
    pub value: f64,
    /// Warp offset in [-1, 1]
    pub warp: f64,
}

/// Animated full-viewport color field.
///
/// Pure function of pixel position and time; the only state is the viewport
/// resolution used to normalize fragment coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundField {
    resolution: DVec2,
}

impl BackgroundField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            resolution: Self::clamp_resolution(width, height),
        }
    }

    fn clamp_resolution(width: u32, height: u32) -> DVec2 {
        DVec2::new(width.max(1) as f64, height.max(1) as f64)
    }

    /// New viewport size, e.g. after a window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.resolution = Self::clamp_resolution(width, height);
    }

    pub fn resolution(&self) -> DVec2 {
        self.resolution
    }

    /// Color at normalized coordinate `uv` (origin bottom-left)
    pub fn shade_uv(&self, uv: DVec2, time: f64) -> DVec3 {
        self.shade_fragment(uv * self.resolution, time)
    }

    /// Color at fragment coordinate `frag` in pixels (origin bottom-left)
    pub fn shade_fragment(&self, frag: DVec2, time: f64) -> DVec3 {
        let uv = frag / self.resolution;
        let band = Self::glow_band(uv, time);

        let x = 2.0 - uv.x * 0.1;
        let base = DVec3::new(x * 0.3, BAND_GREEN, x) * band.value;

        base + DVec3::splat(Self::sparkle(frag, time) * (1.0 - band.value))
    }

    /// Breathing horizontal band around the vertical center, warped by drifting noise
    pub fn glow_band(uv: DVec2, time: f64) -> Band {
        let scaled = uv * 0.25;
        let drift = random(scaled + DVec2::new(0.0, time * 0.025));
        let warp = random(scaled - DVec2::new(0.0, time * 0.02 + drift * 0.02)) * 2.0 - 1.0;

        let v = uv.y + warp * 0.1;
        // Tent peaks at mid-height; clamped so the power below stays real
        let tent = (1.0 - (v * 2.0 - 1.0).abs()).max(0.0);
        let exponent = 2.0 + ((time * 0.2 + warp * 0.25) * TAU).sin();

        Band {
            value: tent.powf(exponent),
            warp,
        }
    }

    /// Rare per-pixel twinkle seeded by the raw fragment coordinate
    pub fn sparkle(frag: DVec2, time: f64) -> f64 {
        let rx = random(frag);
        let ry = random(DVec2::new(frag.y, frag.x) + SPARKLE_SEED_OFFSET);

        let twinkle = (((time * 1.5 + 60.0) * ry).sin() * 0.5 + 0.5) * ry.powi(4);
        mix(rx, twinkle, SPARKLE_BLEND).powf(SPARKLE_SHARPNESS)
    }
}

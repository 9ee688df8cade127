use glam::DVec3;

/// Quantize a linear color to RGBA8 with full alpha.
///
/// Channels outside [0, 1] saturate, matching how a render target stores
/// out-of-range shader output.
pub fn to_rgba8(color: DVec3) -> [u8; 4] {
    let quantize = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

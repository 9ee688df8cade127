/// Display context - rendering dimensions shared by layers and the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayContext {
    pub width: u32,
    pub height: u32,
}

impl DisplayContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total size in bytes for RGBA buffer
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Width over height; 1.0 for a collapsed window
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// True when there is nothing to draw into (minimized window)
    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_size_rgba() {
        let ctx = DisplayContext::new(100, 100);
        assert_eq!(ctx.pixel_count(), 10_000);
        assert_eq!(ctx.buffer_size(), 40_000);
    }

    #[test]
    fn test_large_dimensions() {
        let ctx = DisplayContext::new(3840, 2160); // 4K
        assert_eq!(ctx.pixel_count(), 8_294_400);
        assert_eq!(ctx.buffer_size(), 33_177_600);
    }

    #[test]
    fn test_aspect() {
        assert_eq!(DisplayContext::new(800, 600).aspect(), 800.0 / 600.0);
        assert_eq!(DisplayContext::new(800, 0).aspect(), 1.0);
        assert!(DisplayContext::new(0, 600).is_empty());
    }
}

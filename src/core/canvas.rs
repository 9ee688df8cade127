use super::layer::LayerOutput;

/// RGBA color
pub type Rgba = [u8; 4];

/// 2D drawing operations for canvas.
///
/// Coordinates are signed pixels with the origin at the top-left; anything
/// outside the canvas is clipped rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color
    Clear(Rgba),

    Pixel { x: i32, y: i32, color: Rgba },

    /// Line from (x1, y1) to (x2, y2), endpoints included
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba },

    FilledCircle { cx: i32, cy: i32, radius: u32, color: Rgba },
}

/// Canvas state - pixel buffer with draw operations
#[derive(Debug, Clone)]
pub struct Canvas {
    /// RGBA pixel buffer
    pixels: Vec<u8>,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque)
    alpha: Vec<f32>,
    /// Pending draw operations
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = width as usize * height as usize;

        Self {
            pixels: vec![0; pixel_count * 4],
            alpha: vec![0.0; pixel_count],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Add draw operation - functional style
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue several operations at once
    pub fn draw_all(mut self, ops: impl IntoIterator<Item = DrawOp>) -> Self {
        self.operations.extend(ops);
        self
    }

    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Execute all pending operations in order
    pub fn execute_ops(mut self) -> Self {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.set_pixel(x, y, color),
            DrawOp::Line { x1, y1, x2, y2, color } => {
                if let Some((x1, y1, x2, y2)) = self.clip_line(x1, y1, x2, y2) {
                    self.draw_line(x1, y1, x2, y2, color);
                }
            }
            DrawOp::FilledCircle { cx, cy, radius, color } => {
                self.draw_filled_circle(cx, cy, radius, color)
            }
        }
    }

    fn clear(&mut self, color: Rgba) {
        let alpha = color[3] as f32 / 255.0;
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        self.alpha.fill(alpha);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }

        let index = y as usize * self.width as usize + x as usize;
        self.pixels[index * 4..index * 4 + 4].copy_from_slice(&color);
        self.alpha[index] = color[3] as f32 / 255.0;
    }

    /// Liang-Barsky clip of a segment against the canvas rectangle
    fn clip_line(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let (x1f, y1f) = (x1 as f64, y1 as f64);
        let dx = x2 as f64 - x1f;
        let dy = y2 as f64 - y1f;
        let (x_max, y_max) = ((self.width - 1) as f64, (self.height - 1) as f64);

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        let edges = [
            (-dx, x1f),
            (dx, x_max - x1f),
            (-dy, y1f),
            (dy, y_max - y1f),
        ];

        for (p, q) in edges {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((
            (x1f + t0 * dx).round() as i32,
            (y1f + t0 * dy).round() as i32,
            (x1f + t1 * dx).round() as i32,
            (y1f + t1 * dy).round() as i32,
        ))
    }

    /// Bresenham's algorithm
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_filled_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let radius = radius.min(self.width.max(self.height)) as i32;
        let r_sq = radius * radius;

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r_sq {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn alpha(&self) -> &[f32] {
        &self.alpha
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Hand the buffers over as a blendable layer output
    pub fn into_output(self) -> LayerOutput {
        LayerOutput::with_alpha(self.pixels, self.alpha)
    }
}


pub const BACKGROUND_COLOR: u32 = 0x00F0F0F0;

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;

// 3x5 glyphs for hexadecimal digits, one row per byte, high bit on the left
const HEX_GLYPHS: [[u8; 5]; 16] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
    [0b010, 0b101, 0b111, 0b101, 0b101], // a
    [0b110, 0b101, 0b110, 0b101, 0b110], // b
    [0b011, 0b100, 0b100, 0b100, 0b011], // c
    [0b110, 0b101, 0b101, 0b101, 0b110], // d
    [0b111, 0b100, 0b110, 0b100, 0b111], // e
    [0b111, 0b100, 0b110, 0b100, 0b100], // f
];

/// A `0RGB` pixel buffer the window presents as-is.
pub struct Canvas {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buffer: vec![BACKGROUND_COLOR; width * height],
            width,
            height,
        }
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width * height != self.buffer.len() {
            self.buffer = vec![BACKGROUND_COLOR; width * height];
        }
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self, color: u32) {
        for pixel in self.buffer.iter_mut() {
            *pixel = color;
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some(self.buffer[(y as usize) * self.width + (x as usize)])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buffer[(y as usize) * self.width + (x as usize)] = color;
        }
    }

    /// Scanline fill, clipped to the canvas. Points may lie far outside
    /// it; only the visible rows and spans are walked.
    pub fn fill_polygon(&mut self, points: &[(f64, f64)], color: u32) {
        if points.len() < 3 || points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return; // Need at least 3 points for a polygon
        }

        let mut min_y = f64::MAX;
        let mut max_y = f64::MIN;
        for &(_, y) in points {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let first_row = min_y.ceil().max(0.0);
        let last_row = max_y.floor().min(self.height as f64 - 1.0);
        if first_row > last_row {
            return;
        }
        let right_edge = self.width as f64 - 1.0;

        let mut nodes: Vec<f64> = Vec::new();
        for y in first_row as i32..=last_row as i32 {
            let yf = y as f64;
            nodes.clear();

            for i in 0..points.len() {
                let j = (i + 1) % points.len();
                let (x1, y1) = points[i];
                let (x2, y2) = points[j];

                if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                    nodes.push(x1 + (yf - y1) * (x2 - x1) / (y2 - y1));
                }
            }
            nodes.sort_unstable_by(|a, b| a.total_cmp(b));

            for pair in nodes.chunks_exact(2) {
                let start_x = pair[0].round().max(0.0);
                let end_x = pair[1].round().min(right_edge);
                if start_x > end_x {
                    continue;
                }
                for x in start_x as i32..=end_x as i32 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Bresenham line, thickened with a square brush.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: u32, width: u8) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;
        let thickness = width as i32 / 2;

        loop {
            for oy in -thickness..=thickness {
                for ox in -thickness..=thickness {
                    self.set_pixel(x + ox, y + oy, color);
                }
            }

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y1 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
    }

    /// Outline of a ring whose last point already repeats the first.
    ///
    /// Each edge is clipped to the canvas before rasterising, so vertices
    /// far off screen cost nothing.
    pub fn draw_ring(&mut self, points: &[(f64, f64)], color: u32, width: u8) {
        let margin = width as f64;
        let area = (
            -margin,
            -margin,
            self.width as f64 - 1.0 + margin,
            self.height as f64 - 1.0 + margin,
        );
        for edge in points.windows(2) {
            if let Some((from, to)) = clip_segment(edge[0], edge[1], area) {
                self.draw_line(from, to, color, width);
            }
        }
    }

    /// Whether a point lands on the canvas.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// Draw hexadecimal text centred on `(cx, cy)`. Other characters
    /// leave a gap.
    pub fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, color: u32, scale: i32) {
        let scale = scale.max(1);
        let advance = (GLYPH_WIDTH + 1) * scale;
        let total_width = text.chars().count() as i32 * advance - scale;
        let left = cx - total_width / 2;
        let top = cy - GLYPH_HEIGHT * scale / 2;

        for (i, ch) in text.chars().enumerate() {
            if let Some(glyph) = glyph_for(ch) {
                self.draw_glyph(glyph, left + i as i32 * advance, top, color, scale);
            }
        }
    }

    fn draw_glyph(&mut self, glyph: &[u8; 5], left: i32, top: i32, color: u32, scale: i32) {
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                for py in 0..scale {
                    for px in 0..scale {
                        self.set_pixel(
                            left + col * scale + px,
                            top + row as i32 * scale + py,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Liang-Barsky clip of a segment to `(min_x, min_y, max_x, max_y)`,
/// rounded to pixels. `None` when nothing of it is inside.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    area: (f64, f64, f64, f64),
) -> Option<((i32, i32), (i32, i32))> {
    let (x0, y0) = from;
    let dx = to.0 - x0;
    let dy = to.1 - y0;
    if !(x0.is_finite() && y0.is_finite() && dx.is_finite() && dy.is_finite()) {
        return None;
    }

    let (min_x, min_y, max_x, max_y) = area;
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    for (p, q) in [
        (-dx, x0 - min_x),
        (dx, max_x - x0),
        (-dy, y0 - min_y),
        (dy, max_y - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
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
    }

    let at = |t: f64| ((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

fn glyph_for(ch: char) -> Option<&'static [u8; 5]> {
    ch.to_digit(16).map(|digit| &HEX_GLYPHS[digit as usize])
}

pub fn darken_color(color: u32, factor: f64) -> u32 {
    let r = ((color >> 16) & 0xFF) as f64 * factor;
    let g = ((color >> 8) & 0xFF) as f64 * factor;
    let b = (color & 0xFF) as f64 * factor;

    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

//! Palette-indexed framebuffer and the raster primitives drawn into it.
//!
//! The buffer is an `ndarray::Array2<u8>` of palette indices in `[[y, x]]`
//! order. The horizon rasterizer writes rows and columns directly; the
//! star markers and the triangle overlay go through the clipped primitives
//! here. Everything clips, nothing anti-aliases.

use crate::config::DisplaySize;
use crate::projection::ScreenPoint;
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Array2<u8>,
}

impl FrameBuffer {
    /// Allocate a buffer of the display size, cleared to `fill`.
    pub fn new(display: DisplaySize, fill: u8) -> Self {
        Self {
            pixels: Array2::from_elem((display.height as usize, display.width as usize), fill),
        }
    }

    pub fn width(&self) -> i32 {
        self.pixels.ncols() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.nrows() as i32
    }

    pub fn fill(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Write one pixel; out-of-bounds coordinates are clipped away.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if x >= 0 && x < self.width() && y >= 0 && y < self.height() {
            self.pixels[[y as usize, x as usize]] = color;
        }
    }

    /// Read one pixel. Panics outside the buffer; tests and the PNG dump
    /// iterate the known rectangle.
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        self.pixels[[y as usize, x as usize]]
    }

    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut Array2<u8> {
        &mut self.pixels
    }

    /// Rectangle outline, clipped. This is the star dot marker shape.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u8) {
        if w <= 0 || h <= 0 {
            return;
        }
        for dx in 0..w {
            self.set_pixel(x + dx, y, color);
            self.set_pixel(x + dx, y + h - 1, color);
        }
        for dy in 0..h {
            self.set_pixel(x, y + dy, color);
            self.set_pixel(x + w - 1, y + dy, color);
        }
    }

    /// Bresenham line, clipped per pixel.
    pub fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, color: u8) {
        let (mut x, mut y) = (a.x, a.y);
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, color);
            if x == b.x && y == b.y {
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

    /// Filled triangle by horizontal scanline, clipped.
    pub fn fill_triangle(&mut self, vertices: [ScreenPoint; 3], color: u8) {
        let y_min = vertices.iter().map(|v| v.y).min().unwrap().max(0);
        let y_max = vertices
            .iter()
            .map(|v| v.y)
            .max()
            .unwrap()
            .min(self.height() - 1);

        let edges = [
            (vertices[0], vertices[1]),
            (vertices[1], vertices[2]),
            (vertices[2], vertices[0]),
        ];

        for y in y_min..=y_max {
            let mut span: Option<(i32, i32)> = None;
            for &(p, q) in &edges {
                let (top, bot) = if p.y <= q.y { (p, q) } else { (q, p) };
                if y < top.y || y > bot.y || top.y == bot.y {
                    continue;
                }
                let x = top.x as i64
                    + (y - top.y) as i64 * (bot.x - top.x) as i64 / (bot.y - top.y) as i64;
                let x = x as i32;
                span = Some(match span {
                    None => (x, x),
                    Some((lo, hi)) => (lo.min(x), hi.max(x)),
                });
            }
            if let Some((lo, hi)) = span {
                for x in lo.max(0)..=hi.min(self.width() - 1) {
                    self.set_pixel(x, y, color);
                }
            }
        }

        // A degenerate (horizontal) triangle never enters the scan loop;
        // its outline still comes from draw_line at the call site.
    }

    /// Count pixels holding a given palette index. Test/stat helper.
    pub fn count_color(&self, color: u8) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }
}

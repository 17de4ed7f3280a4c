//! Projection from the logical canvas onto the terminal's pixel grid.

use crate::entities::Rect;

/// Half-open pixel box `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Self {
            cols,
            rows,
            world_width,
            world_height,
        }
    }

    /// Logical x → pixel column.  Rounds toward negative infinity so
    /// off-screen sprites stay off-screen.
    pub fn pixel_x(&self, x: i32) -> i32 {
        scale(x, self.cols as i64, self.world_width)
    }

    /// Logical y → pixel row (two per text row).
    pub fn pixel_y(&self, y: i32) -> i32 {
        scale(y, self.rows as i64 * 2, self.world_height)
    }

    /// Logical point → text cell `(col, row)`.
    pub fn cell(&self, x: i32, y: i32) -> (i32, i32) {
        (self.pixel_x(x), self.pixel_y(y).div_euclid(2))
    }

    /// Pixel footprint of a box.  Never thinner than one pixel, so small
    /// sprites on small terminals stay visible.
    pub fn project(&self, rect: &Rect) -> PixelRect {
        let x0 = self.pixel_x(rect.left());
        let y0 = self.pixel_y(rect.top());
        PixelRect {
            x0,
            y0,
            x1: self.pixel_x(rect.right()).max(x0 + 1),
            y1: self.pixel_y(rect.bottom()).max(y0 + 1),
        }
    }
}

fn scale(v: i32, to: i64, from: i32) -> i32 {
    if from <= 0 {
        return 0;
    }
    (v as i64 * to).div_euclid(from as i64) as i32
}

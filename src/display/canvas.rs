//! Half-block frame buffer.
//!
//! Every terminal cell holds two vertically stacked pixels drawn with `▀`
//! (foreground = upper pixel, background = lower pixel).  Text is layered
//! on top of the pixels, one character per cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_color(self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Rgb,
    /// `None` keeps whatever pixel colour is underneath.
    bg: Option<Rgb>,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    /// `cols × rows*2` pixels, row-major.
    pixels: Vec<Rgb>,
    glyphs: Vec<Option<Glyph>>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, background: Rgb) -> Self {
        let cells = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            pixels: vec![background; cells * 2],
            glyphs: vec![None; cells],
        }
    }

    /// Height in pixels (two per text row).
    pub fn pixel_rows(&self) -> u16 {
        self.rows * 2
    }

    fn pixel_index(&self, x: i32, y: i32) -> Option<usize> {
        let in_range =
            x >= 0 && y >= 0 && x < self.cols as i32 && y < self.pixel_rows() as i32;
        in_range.then(|| y as usize * self.cols as usize + x as usize)
    }

    fn cell_index(&self, col: i32, row: i32) -> Option<usize> {
        let in_range = col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32;
        in_range.then(|| row as usize * self.cols as usize + col as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.pixel_index(x, y).map(|i| self.pixels[i])
    }

    /// Out-of-range writes are clipped silently.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.pixel_index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill the half-open pixel box `[x0, x1) × [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        for y in y0.max(0)..y1.min(self.pixel_rows() as i32) {
            for x in x0.max(0)..x1.min(self.cols as i32) {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// One-pixel border just inside `[x0, x1) × [y0, y1)`.
    pub fn outline_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for x in x0..x1 {
            self.set_pixel(x, y0, color);
            self.set_pixel(x, y1 - 1, color);
        }
        for y in y0..y1 {
            self.set_pixel(x0, y, color);
            self.set_pixel(x1 - 1, y, color);
        }
    }

    /// Write `text` starting at cell `(col, row)`, clipped to the grid.
    pub fn put_text(&mut self, col: i32, row: i32, text: &str, fg: Rgb, bg: Option<Rgb>) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.cell_index(col + i as i32, row) {
                self.glyphs[idx] = Some(Glyph { ch, fg, bg });
            }
        }
    }

    /// Character shown at a cell, `None` where only pixels are drawn.
    pub fn char_at(&self, col: i32, row: i32) -> Option<char> {
        self.cell_index(col, row)
            .and_then(|i| self.glyphs[i])
            .map(|g| g.ch)
    }

    /// Text of one row, with pixel-only cells as spaces.
    pub fn row_text(&self, row: i32) -> String {
        (0..self.cols as i32)
            .map(|col| self.char_at(col, row).unwrap_or(' '))
            .collect()
    }

    /// Emit the whole frame.  Colour changes are only queued when they differ
    /// from the previous cell.
    pub fn flush<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut last: Option<(Rgb, Rgb)> = None;

        for row in 0..self.rows as i32 {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols as i32 {
                let top = self.pixel(col, row * 2).unwrap_or(Rgb::BLACK);
                let bottom = self.pixel(col, row * 2 + 1).unwrap_or(Rgb::BLACK);
                let glyph = self.cell_index(col, row).and_then(|i| self.glyphs[i]);

                let (ch, fg, bg) = match glyph {
                    Some(g) => (g.ch, g.fg, g.bg.unwrap_or(top)),
                    None => ('▀', top, bottom),
                };

                if last != Some((fg, bg)) {
                    out.queue(style::SetForegroundColor(fg.to_color()))?;
                    out.queue(style::SetBackgroundColor(bg.to_color()))?;
                    last = Some((fg, bg));
                }
                out.queue(Print(ch))?;
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

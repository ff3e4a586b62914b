//! Packed 1bpp frame usable as an `embedded-graphics` draw target.

use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

/// 128x64 frame, the common SSD1306/ST7565 panel size.
pub type Frame128x64 = MonoFrame<16, 64>;

/// 1bpp frame of `LINE_BYTES * 8` by `HEIGHT` pixels.
///
/// Bit mapping within one line byte: bit 7 is the first pixel in that byte.
#[derive(Clone)]
pub struct MonoFrame<const LINE_BYTES: usize, const HEIGHT: usize> {
    lines: [[u8; LINE_BYTES]; HEIGHT],
}

impl<const LINE_BYTES: usize, const HEIGHT: usize> Default for MonoFrame<LINE_BYTES, HEIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINE_BYTES: usize, const HEIGHT: usize> MonoFrame<LINE_BYTES, HEIGHT> {
    pub const WIDTH: usize = LINE_BYTES * 8;

    /// Creates a blank frame.
    pub const fn new() -> Self {
        Self {
            lines: [[0u8; LINE_BYTES]; HEIGHT],
        }
    }

    /// Fills the frame with `on` pixels or clears it.
    pub fn clear(&mut self, on: bool) {
        for line in &mut self.lines {
            line.fill(if on { 0xFF } else { 0x00 });
        }
    }

    /// Returns `true` when the pixel is in bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= Self::WIDTH || y >= HEIGHT {
            return false;
        }

        let bit_mask = 1u8 << (7 - (x % 8));
        let byte = &mut self.lines[y][x / 8];
        if on {
            *byte |= bit_mask;
        } else {
            *byte &= !bit_mask;
        }

        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= Self::WIDTH || y >= HEIGHT {
            return None;
        }

        let bit_mask = 1u8 << (7 - (x % 8));
        Some((self.lines[y][x / 8] & bit_mask) != 0)
    }

    /// Packed pixels of line `y`, zero-based.
    pub fn line(&self, y: usize) -> Option<&[u8; LINE_BYTES]> {
        self.lines.get(y)
    }

    pub fn lines(&self) -> &[[u8; LINE_BYTES]; HEIGHT] {
        &self.lines
    }
}

impl<const LINE_BYTES: usize, const HEIGHT: usize> DrawTarget for MonoFrame<LINE_BYTES, HEIGHT> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }

            let _ = self.set_pixel(point.x as usize, point.y as usize, color.is_on());
        }

        Ok(())
    }
}

impl<const LINE_BYTES: usize, const HEIGHT: usize> OriginDimensions for MonoFrame<LINE_BYTES, HEIGHT> {
    fn size(&self) -> Size {
        Size::new(Self::WIDTH as u32, HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn pixel_bit_mapping_is_msb_first_within_byte() {
        let mut frame = Frame128x64::new();

        assert!(frame.set_pixel(0, 0, true));
        assert!(frame.set_pixel(7, 0, true));
        assert!(frame.set_pixel(8, 0, true));

        let line = frame.line(0).unwrap();
        assert_eq!(line[0], 0b1000_0001);
        assert_eq!(line[1], 0b1000_0000);
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut frame = Frame128x64::new();

        assert!(!frame.set_pixel(Frame128x64::WIDTH, 0, true));
        assert!(!frame.set_pixel(0, 64, true));
        assert_eq!(frame.pixel(128, 0), None);
        assert!(frame.lines().iter().all(|line| line.iter().all(|byte| *byte == 0)));
    }

    #[test]
    fn draw_target_skips_negative_coordinates() {
        let mut frame = MonoFrame::<2, 4>::new();
        frame
            .draw_iter([
                Pixel(Point::new(-1, 0), BinaryColor::On),
                Pixel(Point::new(15, 3), BinaryColor::On),
            ])
            .unwrap();

        assert_eq!(frame.size(), Size::new(16, 4));
        assert_eq!(frame.pixel(15, 3), Some(true));
        assert_eq!(frame.line(3).unwrap(), &[0x00, 0x01]);
    }
}

//! Display traits
//!
//! The master draws on a 240x320 TFT through [`DrawTarget`]; the slave
//! drives an 8-digit seven-segment module through [`NumericDisplay`].

/// Errors from display drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Position outside the display
    OutOfBounds,
}

/// RGB565 colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
}

/// Glyph-level drawing surface
pub trait DrawTarget {
    /// Fill a rectangle
    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Color)
        -> Result<(), DisplayError>;

    /// Draw one character cell with the built-in font
    fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Color,
        bg: Color,
        scale: u8,
    ) -> Result<(), DisplayError>;

    /// Draw a string, advancing `spacing` pixels per character
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Color,
        bg: Color,
        scale: u8,
        spacing: u16,
    ) -> Result<(), DisplayError> {
        let mut cx = x;
        for ch in text.chars() {
            self.draw_char(cx, y, ch, fg, bg, scale)?;
            cx = cx.saturating_add(spacing);
        }
        Ok(())
    }
}

/// Multi-digit numeric display
pub trait NumericDisplay {
    /// Number of digit positions
    const DIGITS: u8;

    /// Show a decimal digit at `position`, or blank it with `None`
    fn write_digit(&mut self, position: u8, digit: Option<u8>) -> Result<(), DisplayError>;

    /// Show `value` right-aligned across `width` digits starting at `start`
    ///
    /// Leading zeros are kept so odometer-style readouts keep their width.
    fn write_number(&mut self, start: u8, width: u8, value: u16) -> Result<(), DisplayError> {
        let mut rest = value;
        for i in (0..width).rev() {
            self.write_digit(start + i, Some((rest % 10) as u8))?;
            rest /= 10;
        }
        Ok(())
    }
}

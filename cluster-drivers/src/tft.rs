//! ILI9341 240x320 TFT panel
//!
//! Write-only SPI with a data/command select line. The panel is used in
//! portrait orientation with RGB565 pixels. Text is rendered from the
//! local 5x7 font, every font pixel drawn as a `scale` x `scale` block so
//! the background of a glyph cell is repainted along with it.

use cluster_core::traits::{Color, DisplayError, DrawTarget};
use cluster_hal::{OutputPin, SpiWrite};

use crate::font::{self, GLYPH_HEIGHT};

/// Panel width in portrait orientation
pub const WIDTH: u16 = 240;

/// Panel height in portrait orientation
pub const HEIGHT: u16 = 320;

/// ILI9341 commands
pub mod cmd {
    pub const SOFT_RESET: u8 = 0x01;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_ON: u8 = 0x29;
    pub const COLUMN_ADDR: u8 = 0x2A;
    pub const PAGE_ADDR: u8 = 0x2B;
    pub const MEMORY_WRITE: u8 = 0x2C;
    pub const MEMORY_ACCESS: u8 = 0x36;
    pub const PIXEL_FORMAT: u8 = 0x3A;
}

/// MADCTL: column order flipped, BGR panel
const PORTRAIT_BGR: u8 = 0x48;

/// 16 bits per pixel on the MCU interface
const RGB565: u8 = 0x55;

/// Pixels pushed per SPI frame while filling
const FILL_CHUNK: usize = 32;

/// ILI9341 display
pub struct Ili9341<S, DC> {
    spi: S,
    dc: DC,
}

impl<S: SpiWrite, DC: OutputPin> Ili9341<S, DC> {
    pub fn new(spi: S, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Reset the controller and switch the panel on
    ///
    /// # Arguments
    /// - `delay_ms`: blocking delay, called between the reset steps
    pub fn init(&mut self, mut delay_ms: impl FnMut(u32)) -> Result<(), DisplayError> {
        self.command(cmd::SOFT_RESET, &[])?;
        delay_ms(150);
        self.command(cmd::SLEEP_OUT, &[])?;
        delay_ms(120);
        self.command(cmd::PIXEL_FORMAT, &[RGB565])?;
        self.command(cmd::MEMORY_ACCESS, &[PORTRAIT_BGR])?;
        self.command(cmd::DISPLAY_ON, &[])?;
        self.fill_rect(0, 0, WIDTH, HEIGHT, Color::BLACK)
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low();
        self.spi
            .write_frame(&[command])
            .map_err(|_| DisplayError::Bus)?;
        if params.is_empty() {
            return Ok(());
        }
        self.dc.set_high();
        self.spi.write_frame(params).map_err(|_| DisplayError::Bus)
    }

    /// Open a drawing window and start a memory write
    fn window(&mut self, x: u16, y: u16, w: u16, h: u16) -> Result<(), DisplayError> {
        let [x0h, x0l] = x.to_be_bytes();
        let [x1h, x1l] = (x + w - 1).to_be_bytes();
        let [y0h, y0l] = y.to_be_bytes();
        let [y1h, y1l] = (y + h - 1).to_be_bytes();
        self.command(cmd::COLUMN_ADDR, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PAGE_ADDR, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::MEMORY_WRITE, &[])?;
        self.dc.set_high();
        Ok(())
    }
}

impl<S: SpiWrite, DC: OutputPin> DrawTarget for Ili9341<S, DC> {
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        if x as u32 + w as u32 > WIDTH as u32 || y as u32 + h as u32 > HEIGHT as u32 {
            return Err(DisplayError::OutOfBounds);
        }
        self.window(x, y, w, h)?;

        let [hi, lo] = color.0.to_be_bytes();
        let mut chunk = [0u8; FILL_CHUNK * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        let mut remaining = w as usize * h as usize;
        while remaining > 0 {
            let pixels = remaining.min(FILL_CHUNK);
            self.spi
                .write_frame(&chunk[..pixels * 2])
                .map_err(|_| DisplayError::Bus)?;
            remaining -= pixels;
        }
        Ok(())
    }

    fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Color,
        bg: Color,
        scale: u8,
    ) -> Result<(), DisplayError> {
        let scale = scale.max(1) as u16;
        // Unknown characters render as an empty cell
        let columns = font::glyph(ch).copied().unwrap_or([0; 5]);

        for (col, bits) in columns.iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                let color = if bits & (1 << row) != 0 { fg } else { bg };
                self.fill_rect(
                    x.saturating_add(col as u16 * scale),
                    y.saturating_add(row * scale),
                    scale,
                    scale,
                    color,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_hal::SpiError;
    use core::cell::Cell;
    use heapless::Vec;

    struct DcPin<'a>(&'a Cell<bool>);

    impl OutputPin for DcPin<'_> {
        fn set_high(&mut self) {
            self.0.set(true);
        }

        fn set_low(&mut self) {
            self.0.set(false);
        }

        fn is_set_high(&mut self) -> bool {
            self.0.get()
        }
    }

    /// Records commands and parameters, counts pixel bytes
    struct Frames<'a> {
        dc: &'a Cell<bool>,
        commands: Vec<u8, 512>,
        params: Vec<u8, 64>,
        data_bytes: usize,
    }

    impl SpiWrite for Frames<'_> {
        fn write_frame(&mut self, data: &[u8]) -> Result<(), SpiError> {
            if !self.dc.get() {
                return self.commands.push(data[0]).map_err(|_| SpiError::Transfer);
            }
            if self.commands.last() == Some(&cmd::MEMORY_WRITE) {
                self.data_bytes += data.len();
            } else {
                let _ = self.params.extend_from_slice(data);
            }
            Ok(())
        }
    }

    fn panel(dc: &Cell<bool>) -> Ili9341<Frames<'_>, DcPin<'_>> {
        Ili9341::new(
            Frames {
                dc,
                commands: Vec::new(),
                params: Vec::new(),
                data_bytes: 0,
            },
            DcPin(dc),
        )
    }

    #[test]
    fn test_init_sequence() {
        let dc = Cell::new(false);
        let mut tft = panel(&dc);
        let mut delays = 0;
        tft.init(|_| delays += 1).unwrap();
        assert_eq!(delays, 2);
        assert_eq!(&tft.spi.commands[..5], &[0x01, 0x11, 0x3A, 0x36, 0x29]);
        assert_eq!(tft.spi.data_bytes, 240 * 320 * 2);
    }

    #[test]
    fn test_fill_rect_window() {
        let dc = Cell::new(false);
        let mut tft = panel(&dc);
        tft.fill_rect(10, 300, 20, 5, Color::WHITE).unwrap();
        assert_eq!(tft.spi.commands.as_slice(), &[0x2A, 0x2B, 0x2C]);
        assert_eq!(tft.spi.params.as_slice(), &[0, 10, 0, 29, 1, 44, 1, 48]);
        assert_eq!(tft.spi.data_bytes, 200);
    }

    #[test]
    fn test_fill_rect_bounds() {
        let dc = Cell::new(false);
        let mut tft = panel(&dc);
        assert_eq!(
            tft.fill_rect(230, 0, 20, 1, Color::BLACK),
            Err(DisplayError::OutOfBounds)
        );
        assert!(tft.fill_rect(0, 0, 0, 10, Color::BLACK).is_ok());
        assert!(tft.spi.commands.is_empty());
    }

    #[test]
    fn test_char_covers_cell() {
        let dc = Cell::new(false);
        let mut tft = panel(&dc);
        tft.draw_char(0, 0, 'A', Color::WHITE, Color::BLACK, 2).unwrap();
        // 5x7 blocks of 2x2 pixels, two bytes each
        assert_eq!(tft.spi.data_bytes, 5 * 7 * 4 * 2);
    }
}

//! Screen layout for the 240x320 TFT
//!
//! ```text
//!  y=20   Time          <- menu items, scale 3
//!  y=70   Date
//!  y=110  TIME          <- screen title, scale 5
//!  y=120  Temp
//!  y=160  12:05 PM      <- value line, scale 3
//!  y=210  Bluetooth     <- banner
//! ```
//!
//! Menu items and screen titles never share a screen; the area above the
//! banner is cleared between them.

use core::fmt::Write;

use heapless::String;

use crate::clock::{CalendarDate, DateField, TimeField, TimeOfDay};
use crate::state::{DashboardState, MenuItem};
use crate::traits::{Color, DisplayError, DrawTarget};

const SCREEN_WIDTH: u16 = 240;
/// Everything above the banner row
const CONTENT_HEIGHT: u16 = 225;

const MENU_X: u16 = 90;
const MENU_Y: [u16; 3] = [20, 70, 120];
const MENU_SCALE: u8 = 3;
const MENU_SPACING: u16 = 25;
const MENU_ITEM_WIDTH: u16 = 100;
const MENU_ITEM_HEIGHT: u16 = 30;

const TITLE_Y: u16 = 110;
const TITLE_SCALE: u8 = 5;
const TITLE_SPACING: u16 = 35;

const VALUE_Y: u16 = 160;
const VALUE_SCALE: u8 = 3;
const VALUE_SPACING: u16 = 20;
const TIME_X: u16 = 50;
const DATE_X: u16 = 40;
const TEMP_X: u16 = 80;
const TEMP_SPACING: u16 = 25;

const BANNER_X: u16 = 30;
const BANNER_Y: u16 = 210;
const BANNER_TEXT: &str = "Bluetooth";

/// Characters per two-digit field plus its separator
const FIELD_STRIDE: u16 = 3 * VALUE_SPACING;

fn text_color(visible: bool) -> Color {
    if visible {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

fn menu_y(item: MenuItem) -> u16 {
    match item {
        MenuItem::Time => MENU_Y[0],
        MenuItem::Date => MENU_Y[1],
        MenuItem::Temp => MENU_Y[2],
    }
}

/// Clear everything above the banner
pub fn clear<D: DrawTarget>(display: &mut D) -> Result<(), DisplayError> {
    display.fill_rect(0, 0, SCREEN_WIDTH, CONTENT_HEIGHT, Color::BLACK)
}

/// Draw all menu items
pub fn draw_menu<D: DrawTarget>(display: &mut D) -> Result<(), DisplayError> {
    for item in MenuItem::ALL {
        draw_menu_item(display, item, true)?;
    }
    Ok(())
}

/// Draw or blank one menu item
pub fn draw_menu_item<D: DrawTarget>(
    display: &mut D,
    item: MenuItem,
    visible: bool,
) -> Result<(), DisplayError> {
    let y = menu_y(item);
    if visible {
        display.draw_text(
            MENU_X,
            y,
            item.label(),
            Color::WHITE,
            Color::BLACK,
            MENU_SCALE,
            MENU_SPACING,
        )
    } else {
        display.fill_rect(MENU_X, y, MENU_ITEM_WIDTH, MENU_ITEM_HEIGHT, Color::BLACK)
    }
}

/// Draw the title of a value screen
pub fn draw_title<D: DrawTarget>(
    display: &mut D,
    state: DashboardState,
) -> Result<(), DisplayError> {
    let (x, title) = match state {
        DashboardState::Time => (50, "TIME"),
        DashboardState::Date => (55, "DATE"),
        DashboardState::Temp => (55, "TEMP"),
        DashboardState::Menu => return Ok(()),
    };
    display.draw_text(
        x,
        TITLE_Y,
        title,
        Color::WHITE,
        Color::BLACK,
        TITLE_SCALE,
        TITLE_SPACING,
    )
}

fn draw_value<D: DrawTarget>(
    display: &mut D,
    x: u16,
    text: &str,
    fg: Color,
    spacing: u16,
) -> Result<(), DisplayError> {
    display.draw_text(x, VALUE_Y, text, fg, Color::BLACK, VALUE_SCALE, spacing)
}

fn two_digits(value: u8) -> Result<String<2>, DisplayError> {
    let mut text = String::new();
    write!(text, "{:02}", value % 100).map_err(|_| DisplayError::OutOfBounds)?;
    Ok(text)
}

/// Draw the full time line
pub fn draw_time<D: DrawTarget>(display: &mut D, time: &TimeOfDay) -> Result<(), DisplayError> {
    let mut text: String<8> = String::new();
    write!(
        text,
        "{:02}:{:02} {}",
        time.hour,
        time.minute,
        time.meridiem()
    )
    .map_err(|_| DisplayError::OutOfBounds)?;
    draw_value(display, TIME_X, &text, Color::WHITE, VALUE_SPACING)
}

/// Draw one time field, visible or blanked
pub fn draw_time_field<D: DrawTarget>(
    display: &mut D,
    time: &TimeOfDay,
    field: TimeField,
    visible: bool,
) -> Result<(), DisplayError> {
    let fg = text_color(visible);
    match field {
        TimeField::Hour => draw_value(display, TIME_X, &two_digits(time.hour)?, fg, VALUE_SPACING),
        TimeField::Minute => draw_value(
            display,
            TIME_X + FIELD_STRIDE,
            &two_digits(time.minute)?,
            fg,
            VALUE_SPACING,
        ),
        TimeField::Meridiem => draw_value(
            display,
            TIME_X + 2 * FIELD_STRIDE,
            time.meridiem(),
            fg,
            VALUE_SPACING,
        ),
    }
}

/// Draw the full date line
pub fn draw_date<D: DrawTarget>(display: &mut D, date: &CalendarDate) -> Result<(), DisplayError> {
    let mut text: String<8> = String::new();
    write!(
        text,
        "{:02}/{:02}/{:02}",
        date.month,
        date.day,
        date.year % 100
    )
    .map_err(|_| DisplayError::OutOfBounds)?;
    draw_value(display, DATE_X, &text, Color::WHITE, VALUE_SPACING)
}

/// Draw one date field, visible or blanked
pub fn draw_date_field<D: DrawTarget>(
    display: &mut D,
    date: &CalendarDate,
    field: DateField,
    visible: bool,
) -> Result<(), DisplayError> {
    let (offset, value) = match field {
        DateField::Month => (0, date.month),
        DateField::Day => (1, date.day),
        DateField::Year => (2, date.year),
    };
    draw_value(
        display,
        DATE_X + offset * FIELD_STRIDE,
        &two_digits(value)?,
        text_color(visible),
        VALUE_SPACING,
    )
}

/// Draw the temperature line
pub fn draw_temperature<D: DrawTarget>(display: &mut D, celsius: i8) -> Result<(), DisplayError> {
    let mut text: String<6> = String::new();
    write!(text, "{} C", celsius).map_err(|_| DisplayError::OutOfBounds)?;
    draw_value(display, TEMP_X, &text, Color::WHITE, TEMP_SPACING)
}

/// Show or hide the bluetooth banner
pub fn draw_banner<D: DrawTarget>(display: &mut D, visible: bool) -> Result<(), DisplayError> {
    display.draw_text(
        BANNER_X,
        BANNER_Y,
        BANNER_TEXT,
        text_color(visible),
        Color::BLACK,
        VALUE_SCALE,
        VALUE_SPACING,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Default)]
    struct Recorder {
        chars: Vec<(u16, u16, char, Color), 64>,
        rects: Vec<(u16, u16, u16, u16), 8>,
    }

    impl DrawTarget for Recorder {
        fn fill_rect(
            &mut self,
            x: u16,
            y: u16,
            w: u16,
            h: u16,
            _color: Color,
        ) -> Result<(), DisplayError> {
            self.rects.push((x, y, w, h)).map_err(|_| DisplayError::OutOfBounds)
        }

        fn draw_char(
            &mut self,
            x: u16,
            y: u16,
            ch: char,
            fg: Color,
            _bg: Color,
            _scale: u8,
        ) -> Result<(), DisplayError> {
            self.chars
                .push((x, y, ch, fg))
                .map_err(|_| DisplayError::OutOfBounds)
        }
    }

    #[test]
    fn test_time_line_layout() {
        let mut rec = Recorder::default();
        let time = TimeOfDay {
            hour: 9,
            minute: 5,
            pm: true,
        };
        draw_time(&mut rec, &time).unwrap();

        let text: heapless::String<16> = rec.chars.iter().map(|c| c.2).collect();
        assert_eq!(text.as_str(), "09:05 PM");
        assert_eq!(rec.chars[0].0, 50);
        assert_eq!(rec.chars[3].0, 110);
        assert_eq!(rec.chars[6].0, 170);
        assert!(rec.chars.iter().all(|c| c.1 == 160));
    }

    #[test]
    fn test_field_lines_up_with_full_line() {
        let time = TimeOfDay {
            hour: 11,
            minute: 42,
            pm: false,
        };
        let mut full = Recorder::default();
        draw_time(&mut full, &time).unwrap();

        let mut field = Recorder::default();
        draw_time_field(&mut field, &time, TimeField::Minute, true).unwrap();
        assert_eq!(field.chars[0], full.chars[3]);
        assert_eq!(field.chars[1], full.chars[4]);
    }

    #[test]
    fn test_hidden_field_draws_black() {
        let mut rec = Recorder::default();
        let date = CalendarDate {
            month: 6,
            day: 27,
            year: 24,
        };
        draw_date_field(&mut rec, &date, DateField::Year, false).unwrap();
        assert_eq!(rec.chars.len(), 2);
        assert_eq!(rec.chars[0].0, 160);
        assert!(rec.chars.iter().all(|c| c.3 == Color::BLACK));
    }

    #[test]
    fn test_hidden_menu_item_is_blanked() {
        let mut rec = Recorder::default();
        draw_menu_item(&mut rec, MenuItem::Date, false).unwrap();
        assert!(rec.chars.is_empty());
        assert_eq!(rec.rects[0], (90, 70, 100, 30));
    }
}

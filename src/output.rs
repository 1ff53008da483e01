//! Transmission side of the LED buffer
//!
//! The animation core only ever hands a full buffer to an
//! [`OutputDriver`](crate::OutputDriver). Global brightness is applied here,
//! once per send, so the buffer itself always holds unscaled colors.

use smart_leds::SmartLedsWrite;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{OutputDriver, Rgb};

/// Output brightness in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brightness(u8);

impl Brightness {
    /// No dimming
    pub const FULL: Self = Self(100);

    /// Create a brightness level, values above 100 are clamped
    pub const fn new(percent: u8) -> Self {
        if percent > 100 { Self(100) } else { Self(percent) }
    }

    /// Get the level in percent
    pub const fn percent(self) -> u8 {
        self.0
    }

    /// Scale every channel of a color
    pub const fn scale(self, color: Rgb) -> Rgb {
        Rgb {
            r: scale_percent(color.r, self.0),
            g: scale_percent(color.g, self.0),
            b: scale_percent(color.b, self.0),
        }
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::FULL
    }
}

#[inline]
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
const fn scale_percent(value: u8, percent: u8) -> u8 {
    (value as u16 * percent as u16 / 100) as u8
}

/// [`OutputDriver`] on top of any `smart-leds` writer
///
/// Colors are scaled by the configured [`Brightness`] on the way out.
/// Write errors are counted and otherwise dropped: the animation keeps
/// running and the next send carries the full buffer again.
pub struct SmartLedsOutput<W> {
    writer: W,
    brightness: Brightness,
    failed_writes: u32,
}

impl<W> SmartLedsOutput<W> {
    /// Wrap a `smart-leds` writer
    pub const fn new(writer: W, brightness: Brightness) -> Self {
        Self {
            writer,
            brightness,
            failed_writes: 0,
        }
    }

    /// Set the brightness applied from the next send on
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.brightness = brightness;
    }

    /// Get the current brightness
    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Get the number of writes the backend rejected
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    /// Get a reference to the wrapped writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: core::fmt::Debug,
{
    fn write(&mut self, colors: &[Rgb]) {
        let brightness = self.brightness;
        let result = self
            .writer
            .write(colors.iter().map(|color| brightness.scale(*color)));

        if let Err(_error) = result {
            #[cfg(feature = "esp32-log")]
            println!("[SmartLedsOutput.write] transmit failed: {:?}", _error);
            self.failed_writes = self.failed_writes.saturating_add(1);
        }
    }
}

//! A pixel buffer in wiring order, flushed as two equal halves on two data lines.
//!
//! [`PixelBuffer`] holds the channel bytes exactly as they go out on the wire, so a
//! flush is a straight copy to the [`Ws2812`] transmitter. [`Matrix`] pairs a buffer
//! with a transmitter and is also an `embedded-graphics` [`DrawTarget`].
//!
//! # Example
//!
//! ```rust,no_run
//! use critical_section::CriticalSection;
//! use ir_matrix::config::{CHANNEL_ORDER, MATRIX_LAYOUT};
//! use ir_matrix::matrix::{Matrix, colors};
//! use ir_matrix::ws2812::{BitEmitter, Line};
//!
//! # struct Pins;
//! # impl BitEmitter for Pins {
//! #     fn emit_bit(&mut self, _: CriticalSection<'_>, _: Line, _: bool) {}
//! # }
//! let mut matrix = Matrix::new(Pins, &MATRIX_LAYOUT, CHANNEL_ORDER);
//! matrix.clear(colors::BLACK);
//! matrix.set(0, 0, colors::RED);
//! matrix.set(99, -1, colors::RED); // off the matrix: ignored
//! matrix.flush();
//! ```

use core::convert::Infallible;

use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb888, prelude::*};

use crate::ws2812::{BitEmitter, Ws2812};

pub mod layout;

pub use layout::LedLayout;
pub use smart_leds::{RGB8, colors};

// ============================================================================
// ChannelOrder
// ============================================================================

/// Order of the three color bytes on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Green, red, blue (WS2812B).
    Grb,
    /// Blue, green, red.
    Bgr,
}

impl ChannelOrder {
    /// The wire bytes for `color`.
    #[must_use]
    pub const fn encode(self, color: RGB8) -> [u8; 3] {
        let RGB8 { r, g, b } = color;
        match self {
            Self::Rgb => [r, g, b],
            Self::Grb => [g, r, b],
            Self::Bgr => [b, g, r],
        }
    }

    /// The color stored in `bytes`.
    #[must_use]
    pub const fn decode(self, bytes: [u8; 3]) -> RGB8 {
        match (self, bytes) {
            (Self::Rgb, [r, g, b]) | (Self::Grb, [g, r, b]) | (Self::Bgr, [b, g, r]) => {
                RGB8 { r, g, b }
            }
        }
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// `N` color slots for a `W`×`H` matrix, stored in wiring order.
///
/// Coordinates are signed so callers can draw partly off the matrix; any `(x, y)`
/// outside `[0, W) × [0, H)` is ignored.
#[derive(Clone, Debug)]
pub struct PixelBuffer<const N: usize, const W: usize, const H: usize> {
    slots: [[u8; 3]; N],
    xy_to_index: [u16; N],
    order: ChannelOrder,
}

impl<const N: usize, const W: usize, const H: usize> PixelBuffer<N, W, H> {
    /// An all-off buffer wired as `layout`.
    #[must_use]
    pub const fn new(layout: &LedLayout<N, W, H>, order: ChannelOrder) -> Self {
        assert!(N % 2 == 0, "the matrix must split into two equal halves");
        Self {
            slots: [[0; 3]; N],
            xy_to_index: layout.xy_to_index(),
            order,
        }
    }

    /// Wiring index of `(x, y)`, or `None` off the matrix.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return None;
        };
        if x >= W || y >= H {
            return None;
        }
        self.xy_to_index.get(y * W + x).map(|&index| usize::from(index))
    }

    /// Set one pixel. Off-matrix coordinates are a no-op.
    pub fn set(&mut self, x: i32, y: i32, color: RGB8) {
        let bytes = self.order.encode(color);
        if let Some(slot) = self.index(x, y).and_then(|index| self.slots.get_mut(index)) {
            *slot = bytes;
        }
    }

    /// Read one pixel back, or `None` off the matrix.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<RGB8> {
        let slot = self.slots.get(self.index(x, y)?)?;
        Some(self.order.decode(*slot))
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: RGB8) {
        self.slots.fill(self.order.encode(color));
    }

    /// All channel bytes in wiring order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.slots.as_flattened()
    }

    /// The bytes for the first and second data lines, equal in length.
    #[must_use]
    pub fn halves(&self) -> (&[u8], &[u8]) {
        let bytes = self.as_bytes();
        bytes.split_at(bytes.len() / 2)
    }
}

// ============================================================================
// Matrix
// ============================================================================

/// A [`PixelBuffer`] with the transmitter that shows it.
pub struct Matrix<E, const N: usize, const W: usize, const H: usize> {
    buffer: PixelBuffer<N, W, H>,
    ws2812: Ws2812<E>,
}

impl<E: BitEmitter, const N: usize, const W: usize, const H: usize> Matrix<E, N, W, H> {
    /// An all-off matrix. Nothing is sent until [`flush`](Self::flush).
    #[must_use]
    pub const fn new(emitter: E, layout: &LedLayout<N, W, H>, order: ChannelOrder) -> Self {
        Self {
            buffer: PixelBuffer::new(layout, order),
            ws2812: Ws2812::new(emitter),
        }
    }

    /// Set one pixel. Off-matrix coordinates are a no-op.
    pub fn set(&mut self, x: i32, y: i32, color: RGB8) {
        self.buffer.set(x, y, color);
    }

    /// Read one pixel back, or `None` off the matrix.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<RGB8> {
        self.buffer.get(x, y)
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: RGB8) {
        self.buffer.clear(color);
    }

    /// Send the whole buffer: first half on the first line, second half on the second,
    /// under one critical section.
    pub fn flush(&mut self) {
        let (first, second) = self.buffer.halves();
        self.ws2812.flush(first, second);
    }

    /// The pixel buffer.
    #[must_use]
    pub const fn buffer(&self) -> &PixelBuffer<N, W, H> {
        &self.buffer
    }

    /// The transmitter's emitter.
    #[must_use]
    pub const fn emitter(&self) -> &E {
        self.ws2812.emitter()
    }
}

impl<E, const N: usize, const W: usize, const H: usize> OriginDimensions for Matrix<E, N, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<E: BitEmitter, const N: usize, const W: usize, const H: usize> DrawTarget
    for Matrix<E, N, W, H>
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.buffer
                .set(coord.x, coord.y, RGB8::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> core::result::Result<(), Self::Error> {
        self.buffer
            .clear(RGB8::new(color.r(), color.g(), color.b()));
        Ok(())
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Line discipline interface.
//!
//! The driver hands received bytes upward and tells the writer side when
//! the transmit queue has drained. Everything else about the terminal
//! (termios, echo, buffering policy) belongs to the implementor.

#[cfg(any(test, feature = "std"))]
mod mock;

#[cfg(any(test, feature = "std"))]
pub use mock::RecordingSink;

/// Consumer of received bytes and transmit wake-ups.
///
/// All methods may be called from interrupt context and must not block.
pub trait LineSink {
    /// Stage one received byte.
    fn insert_received_byte(&self, byte: u8);

    /// Deliver all staged bytes to the reader.
    fn flush_received(&self);

    /// The transmit queue went empty; a blocked writer may resume.
    fn notify_writable(&self);
}

impl<T: LineSink + ?Sized> LineSink for &T {
    #[inline]
    fn insert_received_byte(&self, byte: u8) {
        (**self).insert_received_byte(byte);
    }

    #[inline]
    fn flush_received(&self) {
        (**self).flush_received();
    }

    #[inline]
    fn notify_writable(&self) {
        (**self).notify_writable();
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register access for the UART block.
//!
//! A [`Bus`] moves raw 32-bit words. [`Registers`] sits on top of it and
//! converts between bus byte order and CPU values. The conversion is picked
//! once, when the device is attached, and stored as a pair of function
//! pointers, so no access branches on the byte order.
//!
//! Every access reaches the hardware and may have side effects (reading
//! `RDR` pops the receive FIFO), so callers must not cache or skip them.

#[cfg(test)]
mod mod_test;

#[cfg(any(test, feature = "std"))]
mod mock;
mod volatile;

#[cfg(any(test, feature = "std"))]
pub use mock::{Access, MockHardware};
pub use volatile::Mmio;

use wbu_abi::regs;
use wbu_abi::{Control, Endianness, Status};

/// Raw 32-bit access to the register block.
///
/// `load` and `store` move the word exactly as it sits on the bus, without
/// any byte swapping.
pub trait Bus {
    /// Load the word at `offset` bytes from the block base.
    fn load(&self, offset: usize) -> u32;

    /// Store `raw` at `offset` bytes from the block base.
    fn store(&self, offset: usize, raw: u32);
}

impl<T: Bus + ?Sized> Bus for &T {
    #[inline]
    fn load(&self, offset: usize) -> u32 {
        (**self).load(offset)
    }

    #[inline]
    fn store(&self, offset: usize, raw: u32) {
        (**self).store(offset, raw);
    }
}

type ReadFn<B> = fn(&B, usize) -> u32;
type WriteFn<B> = fn(&B, u32, usize);

fn read_le<B: Bus>(bus: &B, offset: usize) -> u32 {
    u32::from_le(bus.load(offset))
}

fn write_le<B: Bus>(bus: &B, value: u32, offset: usize) {
    bus.store(offset, value.to_le());
}

fn read_be<B: Bus>(bus: &B, offset: usize) -> u32 {
    u32::from_be(bus.load(offset))
}

fn write_be<B: Bus>(bus: &B, value: u32, offset: usize) {
    bus.store(offset, value.to_be());
}

/// Typed view of the UART registers.
pub struct Registers<B> {
    bus: B,
    read: ReadFn<B>,
    write: WriteFn<B>,
    endianness: Endianness,
}

impl<B: Bus> Registers<B> {
    /// Wrap `bus`, fixing the byte order for the lifetime of the device.
    #[inline]
    pub const fn new(bus: B, endianness: Endianness) -> Self {
        let (read, write): (ReadFn<B>, WriteFn<B>) = match endianness {
            Endianness::Little => (read_le::<B>, write_le::<B>),
            Endianness::Big => (read_be::<B>, write_be::<B>),
        };
        Self {
            bus,
            read,
            write,
            endianness,
        }
    }

    /// Read the register at `offset`.
    #[inline]
    #[must_use]
    pub fn read(&self, offset: usize) -> u32 {
        (self.read)(&self.bus, offset)
    }

    /// Write `value` to the register at `offset`.
    #[inline]
    pub fn write(&self, value: u32, offset: usize) {
        (self.write)(&self.bus, value, offset);
    }

    /// Byte order chosen at construction.
    #[inline]
    #[must_use]
    pub const fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Borrow the underlying bus.
    #[inline]
    #[must_use]
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Read the Status Register.
    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        Status::from_bits_retain(self.read(regs::SR))
    }

    /// Read the Control Register.
    #[inline]
    #[must_use]
    pub fn control(&self) -> Control {
        Control::from_bits_retain(self.read(regs::CR))
    }

    /// Set `bits` in the Control Register, keeping all other bits.
    #[inline]
    pub fn set_control(&self, bits: Control) {
        let cr = self.control().union(bits);
        self.write(cr.bits(), regs::CR);
    }

    /// Clear `bits` in the Control Register, keeping all other bits.
    #[inline]
    pub fn clear_control(&self, bits: Control) {
        let cr = self.control().difference(bits);
        self.write(cr.bits(), regs::CR);
    }

    /// True if the core identifies itself as a physical UART.
    #[inline]
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.status().is_physical()
    }

    /// Pop one byte from the receive register.
    #[inline]
    #[must_use]
    pub fn read_rx_byte(&self) -> u8 {
        u8::try_from(self.read(regs::RDR) & regs::DATA_MASK).unwrap_or_default()
    }

    /// Hand one byte to the transmitter unless it is busy.
    ///
    /// Returns `false`, without touching `TDR`, if `TX_BUSY` is set.
    #[inline]
    pub fn try_transmit(&self, byte: u8) -> bool {
        if self.status().tx_busy() {
            return false;
        }
        self.write(u32::from(byte), regs::TDR);
        true
    }
}

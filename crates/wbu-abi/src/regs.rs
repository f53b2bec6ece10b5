// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register map of the Wishbone simple UART.
//!
//! All registers are 32 bits wide. Offsets are in bytes from the start of
//! the mapped block.
//!
//! | Offset | Name       | Access | Description                        |
//! |--------|------------|--------|------------------------------------|
//! | 0x00   | `SR`       | RO     | Status Register                    |
//! | 0x04   | `BCR`      | RW     | Baud-rate Control Register         |
//! | 0x08   | `TDR`      | WO     | Transmit Data Register             |
//! | 0x0C   | `RDR`      | RO     | Receive Data Register              |
//! | 0x10   | `HOST_TDR` | RW     | Host-side TX (virtual UART only)   |
//! | 0x14   | `HOST_RDR` | RW     | Host-side RX (virtual UART only)   |
//! | 0x18   | `CR`       | RW     | Control Register                   |
//!
//! The driver never touches `BCR` or the host-side registers: line format
//! is fixed by the gateware, and the host-side pair belongs to the virtual
//! variant of the core, which the driver refuses to attach to.

use bitflags::bitflags;

/// Status Register offset.
pub const SR: usize = 0x00;

/// Baud-rate Control Register offset.
pub const BCR: usize = 0x04;

/// Transmit Data Register offset.
pub const TDR: usize = 0x08;

/// Receive Data Register offset.
pub const RDR: usize = 0x0C;

/// Host-side transmit register offset (virtual UART).
pub const HOST_TDR: usize = 0x10;

/// Host-side receive register offset (virtual UART).
pub const HOST_RDR: usize = 0x14;

/// Control Register offset.
pub const CR: usize = 0x18;

/// Size of the register block in bytes.
pub const BLOCK_SIZE: usize = 0x1C;

/// Mask selecting the data byte of `RDR` and `TDR`.
pub const DATA_MASK: u32 = 0xFF;

bitflags! {
    /// Status Register (`SR`) bits.
    ///
    /// Bits not named here report FIFO levels on cores built with FIFOs.
    /// They are kept when converting from a raw value but never interpreted.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Status: u32 {
        /// A transmission is in progress; a write to `TDR` would be lost.
        const TX_BUSY = 1 << 0;
        /// A received byte is waiting in `RDR`.
        const RX_RDY = 1 << 1;
        /// The core drives a physical line.
        const PHYSICAL_UART = 1 << 9;
        /// The core is a host-bridged virtual UART.
        const VIRTUAL_UART = 1 << 10;
    }
}

bitflags! {
    /// Control Register (`CR`) bits.
    ///
    /// Interrupt enables are independent; changing one must preserve the
    /// others, so `CR` is always updated read-modify-write.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Control: u32 {
        /// Drop everything in the receive FIFO.
        const RX_FIFO_PURGE = 1 << 0;
        /// Drop everything in the transmit FIFO.
        const TX_FIFO_PURGE = 1 << 1;
        /// Raise the interrupt line while `RX_RDY` is set.
        const RX_INTERRUPT_ENABLE = 1 << 2;
        /// Raise the interrupt line while the transmitter is idle.
        const TX_INTERRUPT_ENABLE = 1 << 3;
    }
}

impl Status {
    /// Returns true if a received byte is waiting.
    #[inline]
    #[must_use]
    pub const fn rx_ready(self) -> bool {
        self.contains(Self::RX_RDY)
    }

    /// Returns true if the transmitter cannot take a byte.
    #[inline]
    #[must_use]
    pub const fn tx_busy(self) -> bool {
        self.contains(Self::TX_BUSY)
    }

    /// Returns true if the core drives a physical line.
    #[inline]
    #[must_use]
    pub const fn is_physical(self) -> bool {
        self.contains(Self::PHYSICAL_UART)
    }
}

impl Control {
    /// Both interrupt enables.
    pub const ALL_INTERRUPTS: Self =
        Self::RX_INTERRUPT_ENABLE.union(Self::TX_INTERRUPT_ENABLE);
}

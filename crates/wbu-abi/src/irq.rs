// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Interrupt line identifier.

use core::fmt;

/// Interrupt line the UART is wired to.
///
/// The number is opaque to the driver: it is resolved by the bus layer and
/// only handed back to the host's interrupt dispatcher.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct IrqLine(u32);

impl IrqLine {
    /// Creates an interrupt line identifier.
    #[inline]
    #[must_use]
    pub const fn new(line: u32) -> Self {
        Self(line)
    }

    /// Returns the raw line number.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for IrqLine {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IrqLine({})", self.0)
    }
}

impl fmt::Display for IrqLine {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "irq:{}", self.0)
    }
}

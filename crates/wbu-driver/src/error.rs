// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Driver error types.
//!
//! A full transmit ring is not an error: `write` returns a short count.
//! An interrupt with no work is not an error either; see
//! [`IrqReturn`](crate::irq::IrqReturn).

use core::fmt;

/// Errors that prevent a device from being attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// The core is not a physical UART (or the byte order is wrong).
    DeviceMismatch,
    /// Transmit ring capacity is not a non-zero power of two.
    InvalidCapacity(usize),
    /// Per-interrupt budget is zero.
    InvalidBudget,
}

impl fmt::Display for AttachError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DeviceMismatch => write!(f, "driver supports only physical uart"),
            Self::InvalidCapacity(capacity) => {
                write!(f, "tx capacity {capacity} is not a power of two")
            }
            Self::InvalidBudget => write!(f, "per-interrupt budget must be at least 1"),
        }
    }
}

impl core::error::Error for AttachError {}

/// Errors from opening or closing the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortError {
    /// The line already has its one opener.
    AlreadyOpen,
    /// Close without a matching open.
    NotOpen,
}

impl fmt::Display for PortError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::AlreadyOpen => write!(f, "line is already open"),
            Self::NotOpen => write!(f, "line is not open"),
        }
    }
}

impl core::error::Error for PortError {}

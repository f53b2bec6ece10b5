// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Driver configuration.
//!
//! [`AttachConfig`] is what the bus layer resolved for one device: platform
//! data and interrupt line. [`DriverConfig`] holds the tunables, which
//! default to the values the gateware was validated with.

use wbu_abi::{IrqLine, PlatformData};

use crate::error::AttachError;

/// Transmit ring size: one 4 KiB page.
pub const PAGE_SIZE: usize = 4096;

/// Bytes moved per direction per interrupt.
pub const MAX_BYTES_PER_IRQ: usize = 32;

/// Tunables for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Transmit ring capacity in bytes. Must be a power of two.
    pub tx_capacity: usize,
    /// Upper bound on bytes received and on bytes sent per interrupt.
    pub irq_budget: usize,
}

impl DriverConfig {
    /// Default configuration.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tx_capacity: PAGE_SIZE,
            irq_budget: MAX_BYTES_PER_IRQ,
        }
    }

    /// Use a transmit ring of `capacity` bytes.
    #[inline]
    #[must_use]
    pub const fn with_tx_capacity(mut self, capacity: usize) -> Self {
        self.tx_capacity = capacity;
        self
    }

    /// Move at most `budget` bytes per direction per interrupt.
    #[inline]
    #[must_use]
    pub const fn with_irq_budget(mut self, budget: usize) -> Self {
        self.irq_budget = budget;
        self
    }

    /// Check the configuration without touching hardware.
    #[inline]
    pub const fn validate(&self) -> Result<(), AttachError> {
        if !self.tx_capacity.is_power_of_two() {
            return Err(AttachError::InvalidCapacity(self.tx_capacity));
        }
        if self.irq_budget == 0 {
            return Err(AttachError::InvalidBudget);
        }
        Ok(())
    }
}

impl Default for DriverConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Resources resolved by the bus layer for one device.
///
/// Immutable for the lifetime of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachConfig {
    /// Byte order and name.
    pub pdata: PlatformData,
    /// Interrupt line the handler is bound to.
    pub irq: IrqLine,
    /// Tunables.
    pub driver: DriverConfig,
}

impl AttachConfig {
    /// Resources with default tunables.
    #[inline]
    #[must_use]
    pub const fn new(pdata: PlatformData, irq: IrqLine) -> Self {
        Self {
            pdata,
            irq,
            driver: DriverConfig::new(),
        }
    }

    /// Replace the tunables.
    #[inline]
    #[must_use]
    pub const fn with_driver(mut self, driver: DriverConfig) -> Self {
        self.driver = driver;
        self
    }
}

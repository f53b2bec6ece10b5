// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The attached UART device.
//!
//! [`WbUart`] owns everything for one device: the register block, the
//! channel with its transmit ring, the line sink and the interrupt mask.
//! It is created by [`WbUart::attach`] once the bus layer has resolved the
//! device and consumed by [`WbUart::detach`]; nothing is allocated or freed
//! in between.
//!
//! Upward entry points (`open`, `close`, `write`, `room_available`,
//! `bytes_pending`) run in writer context under the interrupt mask.
//! [`WbUart::handle_irq`] is bound to the interrupt line by the host.

#[cfg(test)]
mod mod_test;

use alloc::string::String;

use tracing::{error, info};
use wbu_abi::{Control, Endianness, IrqLine};

use crate::config::AttachConfig;
use crate::error::{AttachError, PortError};
use crate::irq::{self, IrqReturn};
use crate::mmio::{Bus, Registers};
use crate::port::Channel;
use crate::sink::LineSink;
use crate::sync::{InterruptMask, Unmasked};

/// Names under which the line is registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceNames {
    driver: String,
    tty_prefix: String,
    node: String,
}

impl DeviceNames {
    /// Derive the names from the platform name.
    #[inline]
    #[must_use]
    pub fn new(name: &str) -> Self {
        let tty_prefix = alloc::format!("ttywbu-{name}-");
        // single channel, index 0
        let node = alloc::format!("{tty_prefix}0");
        Self {
            driver: alloc::format!("wbu-{name}-tty"),
            tty_prefix,
            node,
        }
    }

    /// Driver name, e.g. `wbu-fmc0-tty`.
    #[inline]
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Terminal name prefix, e.g. `ttywbu-fmc0-`.
    #[inline]
    #[must_use]
    pub fn tty_prefix(&self) -> &str {
        &self.tty_prefix
    }

    /// Device node of the single line, e.g. `ttywbu-fmc0-0`.
    #[inline]
    #[must_use]
    pub fn node(&self) -> &str {
        &self.node
    }
}

/// One attached Wishbone UART.
pub struct WbUart<B, S, M = Unmasked> {
    regs: Registers<B>,
    channel: Channel,
    sink: S,
    mask: M,
    irq: IrqLine,
    budget: usize,
    names: DeviceNames,
}

impl<B: Bus, S: LineSink, M: InterruptMask> WbUart<B, S, M> {
    /// Attach to the UART behind `bus`.
    ///
    /// Validates the configuration, selects register byte order from the
    /// platform flags, checks that the core is a physical UART and
    /// allocates the transmit ring. The line starts closed with all
    /// interrupts as the hardware left them.
    #[inline]
    pub fn attach(bus: B, sink: S, mask: M, config: &AttachConfig) -> Result<Self, AttachError> {
        config.driver.validate()?;

        let regs = Registers::new(bus, config.pdata.endianness());
        if !regs.is_physical() {
            error!(
                name = config.pdata.name(),
                endianness = %regs.endianness(),
                "driver supports only physical uart"
            );
            return Err(AttachError::DeviceMismatch);
        }

        let capacity = config.driver.tx_capacity;
        let channel = Channel::new(capacity).ok_or(AttachError::InvalidCapacity(capacity))?;
        let names = DeviceNames::new(config.pdata.name());

        info!(
            tty = names.tty_prefix(),
            irq = config.irq.as_u32(),
            endianness = %regs.endianness(),
            capacity,
            "uart attached"
        );

        Ok(Self {
            regs,
            channel,
            sink,
            mask,
            irq: config.irq,
            budget: config.driver.irq_budget,
            names,
        })
    }

    /// Detach from the hardware.
    ///
    /// Disables both interrupts whatever the open state and releases the
    /// transmit ring. Queued bytes are lost.
    #[inline]
    pub fn detach(self) {
        self.regs.clear_control(Control::ALL_INTERRUPTS);
        info!(tty = self.names.tty_prefix(), "uart detached");
    }

    /// Open the line. Only one opener at a time.
    #[inline]
    pub fn open(&self) -> Result<(), PortError> {
        self.mask
            .without_interrupts(|| self.channel.open(&self.regs))
    }

    /// Close the line. The last close silences the device.
    #[inline]
    pub fn close(&self) -> Result<(), PortError> {
        self.mask
            .without_interrupts(|| self.channel.close(&self.regs))
    }

    /// Queue bytes for transmission.
    ///
    /// Never blocks. Returns how many bytes were accepted, at most
    /// [`room_available`](Self::room_available) at the time of the call.
    /// A closed line accepts nothing.
    #[inline]
    pub fn write(&self, bytes: &[u8]) -> usize {
        self.mask
            .without_interrupts(|| self.channel.enqueue(&self.regs, bytes))
    }

    /// Bytes a `write` would accept right now.
    #[inline]
    #[must_use]
    pub fn room_available(&self) -> usize {
        self.mask.without_interrupts(|| self.channel.room())
    }

    /// Bytes queued and not yet handed to the transmitter.
    #[inline]
    #[must_use]
    pub fn bytes_pending(&self) -> usize {
        self.mask.without_interrupts(|| self.channel.pending())
    }

    /// Service one interrupt. Bind this to [`irq`](Self::irq).
    #[inline]
    pub fn handle_irq(&self) -> IrqReturn {
        irq::handle(&self.regs, &self.channel, &self.sink, self.budget)
    }

    /// True while the line is open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.mask.without_interrupts(|| self.channel.is_open())
    }

    /// Transmit ring capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.channel.capacity()
    }

    /// Interrupt line to bind [`handle_irq`](Self::handle_irq) to.
    #[inline]
    #[must_use]
    pub const fn irq(&self) -> IrqLine {
        self.irq
    }

    /// Register byte order selected at attach.
    #[inline]
    #[must_use]
    pub const fn endianness(&self) -> Endianness {
        self.regs.endianness()
    }

    /// Names derived from the platform data.
    #[inline]
    #[must_use]
    pub const fn names(&self) -> &DeviceNames {
        &self.names
    }
}

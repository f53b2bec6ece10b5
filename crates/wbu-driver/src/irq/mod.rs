// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Interrupt entry point.
//!
//! One call per interrupt signal. The handler reads `SR` once to decide
//! whether the interrupt is ours, then services receive before transmit so
//! the receive FIFO cannot overrun while the transmitter is being fed.
//! Both directions are bounded by the per-interrupt budget.
//!
//! Calls for the same device must be serialized (one interrupt line, one
//! handler invocation at a time). Concurrent writers are fine; the channel
//! lock covers them.


use tracing::trace;

use crate::mmio::{Bus, Registers};
use crate::port::Channel;
use crate::rx;
use crate::sink::LineSink;

/// Whether an interrupt was serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqReturn {
    /// Nothing to do: not our interrupt (the line may be shared).
    None,
    /// The device had work and it was serviced.
    Handled,
}

impl IrqReturn {
    /// True for [`IrqReturn::Handled`].
    #[inline]
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Service one interrupt.
#[inline]
pub fn handle<B: Bus, S: LineSink>(
    regs: &Registers<B>,
    channel: &Channel,
    sink: &S,
    budget: usize,
) -> IrqReturn {
    let status = regs.status();
    if !status.rx_ready() && channel.pending() == 0 {
        return IrqReturn::None;
    }

    let received = rx::pull_from(regs, sink, budget, status);
    let drained = channel.drain(regs, sink, budget);
    trace!(received, sent = drained.sent, "irq serviced");

    IrqReturn::Handled
}

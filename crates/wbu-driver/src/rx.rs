// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Receive relay: hardware FIFO to line discipline.
//!
//! There is no receive buffering in the driver. Bytes go straight from
//! `RDR` to [`LineSink::insert_received_byte`] and are delivered with a
//! single [`LineSink::flush_received`] per pass. A full sink is the sink's
//! problem; the driver applies no backpressure on this path.

use tracing::trace;
use wbu_abi::Status;

use crate::mmio::{Bus, Registers};
use crate::sink::LineSink;

/// Move up to `budget` received bytes to `sink`.
///
/// Returns the number of bytes moved. Anything left in the FIFO raises the
/// next interrupt.
#[inline]
pub fn pull<B: Bus, S: LineSink>(regs: &Registers<B>, sink: &S, budget: usize) -> usize {
    pull_from(regs, sink, budget, regs.status())
}

/// Like [`pull`], starting from an already-read status word.
///
/// The interrupt handler uses this to avoid a second `SR` read.
#[inline]
pub fn pull_from<B: Bus, S: LineSink>(
    regs: &Registers<B>,
    sink: &S,
    budget: usize,
    status: Status,
) -> usize {
    let mut received = 0;
    let mut ready = status.rx_ready();
    while ready && received < budget {
        sink.insert_received_byte(regs.read_rx_byte());
        received += 1;
        ready = received < budget && regs.status().rx_ready();
    }

    if received > 0 {
        sink.flush_received();
        trace!(received, "rx pull");
    }
    received
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The serial channel: open count and transmit queue under one lock.
//!
//! Lock discipline:
//! - The transmit ring and the open count are only touched with the lock
//!   held.
//! - The lock is held across register accesses only where the interrupt
//!   enables must stay consistent with the state it guards (activation,
//!   shutdown, disabling TX after the last byte).
//! - The line sink is never called with the lock held.
//!
//! Writer-context callers must mask local interrupts around these methods
//! (see [`crate::sync`]); the interrupt path calls them directly.


use spin::Mutex;
use tracing::{debug, trace, warn};
use wbu_abi::Control;

use crate::error::PortError;
use crate::mmio::{Bus, Registers};
use crate::ring::TxRing;
use crate::sink::LineSink;

struct ChannelState {
    /// 0 when closed, 1 while the single opener holds the line.
    open_count: u32,
    ring: TxRing,
}

/// Result of one drain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drained {
    /// Bytes handed to the transmitter.
    pub sent: usize,
    /// This pass took the ring from non-empty to empty.
    pub emptied: bool,
}

/// The single logical serial line of a device.
pub struct Channel {
    inner: Mutex<ChannelState>,
    capacity: usize,
}

impl Channel {
    /// A closed channel with an empty ring of `capacity` bytes.
    ///
    /// Returns `None` unless `capacity` is a non-zero power of two.
    #[inline]
    #[must_use]
    pub fn new(capacity: usize) -> Option<Self> {
        let ring = TxRing::new(capacity)?;
        Some(Self {
            inner: Mutex::new(ChannelState {
                open_count: 0,
                ring,
            }),
            capacity,
        })
    }

    /// Take the line. The first opener activates the port: RX interrupts on.
    #[inline]
    pub fn open<B: Bus>(&self, regs: &Registers<B>) -> Result<(), PortError> {
        let mut state = self.inner.lock();
        state.open_count += 1;
        if state.open_count > 1 {
            state.open_count -= 1;
            drop(state);
            warn!("open rejected: line already open");
            return Err(PortError::AlreadyOpen);
        }

        regs.set_control(Control::RX_INTERRUPT_ENABLE);
        drop(state);
        debug!("port activated");
        Ok(())
    }

    /// Release the line. The last close shuts the port down.
    ///
    /// Shutdown disables both interrupts and discards anything still queued
    /// for transmission.
    #[inline]
    pub fn close<B: Bus>(&self, regs: &Registers<B>) -> Result<(), PortError> {
        let mut state = self.inner.lock();
        if state.open_count == 0 {
            drop(state);
            warn!("close rejected: line not open");
            return Err(PortError::NotOpen);
        }

        state.open_count -= 1;
        if state.open_count == 0 {
            regs.clear_control(Control::ALL_INTERRUPTS);
            let abandoned = state.ring.pending();
            state.ring.clear();
            drop(state);
            debug!(abandoned, "port shut down");
        }
        Ok(())
    }

    /// True while the line has an opener.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.lock().open_count > 0
    }

    /// Queue as much of `bytes` as fits and kick the transmitter.
    ///
    /// Never blocks. Returns the number of bytes accepted; the rest is
    /// dropped. A closed line accepts nothing and leaves the registers
    /// alone.
    #[inline]
    pub fn enqueue<B: Bus>(&self, regs: &Registers<B>, bytes: &[u8]) -> usize {
        let mut state = self.inner.lock();
        let accepted = if state.open_count == 0 {
            0
        } else {
            state.ring.enqueue(bytes)
        };
        drop(state);

        if accepted > 0 {
            regs.set_control(Control::TX_INTERRUPT_ENABLE);
        }
        accepted
    }

    /// Feed the transmitter from the ring, at most `budget` bytes.
    ///
    /// Stops early when the transmitter reports busy; the refused byte is
    /// retried on the next interrupt. The pass that empties the ring
    /// disables the TX interrupt and then wakes the writer through `sink`.
    #[inline]
    pub fn drain<B: Bus, S: LineSink>(
        &self,
        regs: &Registers<B>,
        sink: &S,
        budget: usize,
    ) -> Drained {
        let mut state = self.inner.lock();
        if state.ring.is_empty() {
            return Drained {
                sent: 0,
                emptied: false,
            };
        }

        let sent = state
            .ring
            .drain_with(budget, |byte| regs.try_transmit(byte));
        let emptied = state.ring.is_empty();
        if emptied {
            regs.clear_control(Control::TX_INTERRUPT_ENABLE);
        }
        let left = state.ring.pending();
        drop(state);

        trace!(sent, left, "tx drain");
        if emptied {
            sink.notify_writable();
        }
        Drained { sent, emptied }
    }

    /// Bytes queued and not yet sent.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.lock().ring.pending()
    }

    /// Bytes a write would accept right now.
    #[inline]
    #[must_use]
    pub fn room(&self) -> usize {
        self.inner.lock().ring.room()
    }

    /// Ring capacity in bytes.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

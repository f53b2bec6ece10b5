// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Bounded transmit queue.
//!
//! A fixed-capacity circular byte buffer. Writers append with
//! [`TxRing::enqueue`], which never blocks and accepts at most
//! [`TxRing::room`] bytes. The interrupt path pops with
//! [`TxRing::drain_with`], which stops as soon as the transmitter refuses
//! a byte or the per-interrupt budget runs out.
//!
//! The valid data is always `pending` bytes starting at the read cursor,
//! wrapping at `capacity`. Capacity is a power of two so wrapping is a mask.


use alloc::boxed::Box;
use alloc::vec;

/// Circular transmit buffer.
pub struct TxRing {
    buf: Box<[u8]>,
    /// Index of the oldest unsent byte.
    read: usize,
    /// Index where the next accepted byte goes.
    write: usize,
    /// Number of unsent bytes.
    pending: usize,
}

impl TxRing {
    /// Allocate an empty ring of `capacity` bytes.
    ///
    /// Returns `None` unless `capacity` is a non-zero power of two.
    #[inline]
    #[must_use]
    pub fn new(capacity: usize) -> Option<Self> {
        if !capacity.is_power_of_two() {
            return None;
        }
        Some(Self {
            buf: vec![0_u8; capacity].into_boxed_slice(),
            read: 0,
            write: 0,
            pending: 0,
        })
    }

    /// Total number of bytes the ring can hold.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of queued, unsent bytes.
    #[inline]
    #[must_use]
    pub const fn pending(&self) -> usize {
        self.pending
    }

    /// Number of bytes `enqueue` would accept right now.
    #[inline]
    #[must_use]
    pub fn room(&self) -> usize {
        self.capacity() - self.pending
    }

    /// True if nothing is queued.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pending == 0
    }

    #[inline]
    fn wrap(&self, index: usize) -> usize {
        index & (self.capacity() - 1)
    }

    /// Append as much of `bytes` as fits.
    ///
    /// Returns the number of bytes accepted. The rest is dropped; it is the
    /// caller's job to check [`room`](Self::room) first if that matters.
    #[inline]
    pub fn enqueue(&mut self, bytes: &[u8]) -> usize {
        let accepted = bytes.len().min(self.room());
        let (head, tail) = bytes[..accepted].split_at(accepted.min(self.capacity() - self.write));

        self.buf[self.write..self.write + head.len()].copy_from_slice(head);
        self.buf[..tail.len()].copy_from_slice(tail);

        self.write = self.wrap(self.write + accepted);
        self.pending += accepted;
        accepted
    }

    /// Pop bytes into `send` until it refuses one, the ring is empty, or
    /// `budget` bytes have gone out.
    ///
    /// A refused byte stays at the head of the ring. Returns the number of
    /// bytes sent.
    #[inline]
    pub fn drain_with<F>(&mut self, budget: usize, mut send: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut sent = 0;
        while self.pending > 0 && sent < budget {
            if !send(self.buf[self.read]) {
                break;
            }
            self.read = self.wrap(self.read + 1);
            self.pending -= 1;
            sent += 1;
        }
        sent
    }

    /// Drop everything queued.
    #[inline]
    pub fn clear(&mut self) {
        self.read = 0;
        self.write = 0;
        self.pending = 0;
    }
}

impl core::fmt::Debug for TxRing {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TxRing")
            .field("capacity", &self.capacity())
            .field("read", &self.read)
            .field("write", &self.write)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

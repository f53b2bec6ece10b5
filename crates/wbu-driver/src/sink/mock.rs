// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Recording line sink for testing.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use spin::Mutex;

use super::LineSink;

/// Line sink that records everything it is told.
///
/// Inserted bytes are staged until `flush_received`, which moves them to
/// the delivered list, mirroring a flip buffer.
pub struct RecordingSink {
    staged: Mutex<Vec<u8>>,
    delivered: Mutex<Vec<u8>>,
    inserts: AtomicUsize,
    flushes: AtomicUsize,
    wakeups: AtomicUsize,
}

impl RecordingSink {
    /// Create an empty sink.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            staged: Mutex::new(Vec::new()),
            delivered: Mutex::new(Vec::new()),
            inserts: AtomicUsize::new(0),
            flushes: AtomicUsize::new(0),
            wakeups: AtomicUsize::new(0),
        }
    }

    /// Bytes delivered by a flush.
    #[inline]
    #[must_use]
    pub fn delivered(&self) -> Vec<u8> {
        self.delivered.lock().clone()
    }

    /// Bytes inserted but not yet flushed.
    #[inline]
    #[must_use]
    pub fn staged(&self) -> Vec<u8> {
        self.staged.lock().clone()
    }

    /// Number of `insert_received_byte` calls.
    #[inline]
    #[must_use]
    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::Acquire)
    }

    /// Number of `flush_received` calls.
    #[inline]
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::Acquire)
    }

    /// Number of `notify_writable` calls.
    #[inline]
    #[must_use]
    pub fn wakeup_count(&self) -> usize {
        self.wakeups.load(Ordering::Acquire)
    }
}

impl Default for RecordingSink {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for RecordingSink {
    #[inline]
    fn insert_received_byte(&self, byte: u8) {
        self.staged.lock().push(byte);
        self.inserts.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    fn flush_received(&self) {
        let mut staged = self.staged.lock();
        self.delivered.lock().append(&mut staged);
        drop(staged);
        self.flushes.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    fn notify_writable(&self) {
        self.wakeups.fetch_add(1, Ordering::AcqRel);
    }
}

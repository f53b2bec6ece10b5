// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock UART block for testing.
//!
//! Models the register semantics the driver relies on: `SR` reports
//! `RX_RDY` while the receive queue is non-empty and `TX_BUSY` while the
//! transmitter is stalled, reading `RDR` pops a byte, writing `TDR` emits
//! one. Other registers read as zero and ignore writes, but the access log
//! still records them. Words are stored on the "bus" in the configured
//! byte order, so a driver reading with the wrong order sees scrambled
//! registers.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use spin::Mutex;
use wbu_abi::regs;
use wbu_abi::{Control, Endianness, Status};

use super::Bus;

/// One register access as seen by the mock, with the decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Load from the register at this offset.
    Read(usize),
    /// Store of this value to the register at this offset.
    Write(usize, u32),
}

struct MockState {
    identity: Status,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    control: Control,
    tx_busy: bool,
    /// Accepted TDR writes left before the transmitter stalls.
    busy_after: Option<usize>,
    accesses: Vec<Access>,
}

impl MockState {
    fn status(&self) -> Status {
        let mut status = self.identity;
        if !self.rx.is_empty() {
            status |= Status::RX_RDY;
        }
        if self.tx_busy {
            status |= Status::TX_BUSY;
        }
        status
    }

    fn transmit(&mut self, byte: u8) {
        // A byte written while busy is lost, as on the real core.
        if self.tx_busy {
            return;
        }
        self.tx.push(byte);
        if let Some(left) = self.busy_after {
            if left <= 1 {
                self.tx_busy = true;
                self.busy_after = None;
            } else {
                self.busy_after = Some(left - 1);
            }
        }
    }
}

/// In-memory stand-in for the UART register block.
pub struct MockHardware {
    wiring: Endianness,
    state: Mutex<MockState>,
}

impl MockHardware {
    /// A little-endian physical UART with empty FIFOs and interrupts off.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_wiring(Endianness::Little)
    }

    /// A physical UART whose registers use `wiring` byte order.
    #[inline]
    #[must_use]
    pub const fn with_wiring(wiring: Endianness) -> Self {
        Self {
            wiring,
            state: Mutex::new(MockState {
                identity: Status::PHYSICAL_UART,
                rx: VecDeque::new(),
                tx: Vec::new(),
                control: Control::empty(),
                tx_busy: false,
                busy_after: None,
                accesses: Vec::new(),
            }),
        }
    }

    /// Turn this into a host-bridged virtual UART.
    #[inline]
    #[must_use]
    pub fn virtual_uart(self) -> Self {
        self.state.lock().identity = Status::VIRTUAL_UART;
        self
    }

    /// Queue bytes as if they arrived on the line.
    #[inline]
    pub fn push_rx(&self, bytes: &[u8]) {
        self.state.lock().rx.extend(bytes);
    }

    /// Number of received bytes not yet read by the driver.
    #[inline]
    #[must_use]
    pub fn rx_remaining(&self) -> usize {
        self.state.lock().rx.len()
    }

    /// Everything the transmitter has sent so far.
    #[inline]
    #[must_use]
    pub fn transmitted(&self) -> Vec<u8> {
        self.state.lock().tx.clone()
    }

    /// Current Control Register contents.
    #[inline]
    #[must_use]
    pub fn control(&self) -> Control {
        self.state.lock().control
    }

    /// Overwrite the Control Register without recording an access.
    #[inline]
    pub fn preset_control(&self, control: Control) {
        self.state.lock().control = control;
    }

    /// Stall or release the transmitter.
    #[inline]
    pub fn set_tx_busy(&self, busy: bool) {
        let mut state = self.state.lock();
        state.tx_busy = busy;
        state.busy_after = None;
    }

    /// Stall the transmitter once it has accepted `count` more bytes.
    #[inline]
    pub fn busy_after(&self, count: usize) {
        let mut state = self.state.lock();
        if count == 0 {
            state.tx_busy = true;
            state.busy_after = None;
        } else {
            state.busy_after = Some(count);
        }
    }

    /// All register accesses since creation or the last `clear_accesses`.
    #[inline]
    #[must_use]
    pub fn accesses(&self) -> Vec<Access> {
        self.state.lock().accesses.clone()
    }

    /// Number of register stores recorded.
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state
            .lock()
            .accesses
            .iter()
            .filter(|&&access| matches!(access, Access::Write(..)))
            .count()
    }

    /// Forget recorded accesses.
    #[inline]
    pub fn clear_accesses(&self) {
        self.state.lock().accesses.clear();
    }

    const fn encode(&self, value: u32) -> u32 {
        match self.wiring {
            Endianness::Little => value.to_le(),
            Endianness::Big => value.to_be(),
        }
    }

    const fn decode(&self, raw: u32) -> u32 {
        match self.wiring {
            Endianness::Little => u32::from_le(raw),
            Endianness::Big => u32::from_be(raw),
        }
    }
}

impl Default for MockHardware {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MockHardware {
    #[inline]
    fn load(&self, offset: usize) -> u32 {
        let mut state = self.state.lock();
        state.accesses.push(Access::Read(offset));
        let value = match offset {
            regs::SR => state.status().bits(),
            regs::RDR => state.rx.pop_front().map_or(0, u32::from),
            regs::CR => state.control.bits(),
            _ => 0,
        };
        drop(state);
        self.encode(value)
    }

    #[inline]
    fn store(&self, offset: usize, raw: u32) {
        let value = self.decode(raw);
        let mut state = self.state.lock();
        state.accesses.push(Access::Write(offset, value));
        match offset {
            regs::TDR => {
                let byte = u8::try_from(value & regs::DATA_MASK).unwrap_or_default();
                state.transmit(byte);
            }
            regs::CR => state.control = Control::from_bits_retain(value),
            _ => {}
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # Wishbone UART line driver
//!
//! Bridges the memory-mapped Wishbone simple UART to a byte-stream line
//! discipline.
//!
//! ## Architecture
//!
//! - [`mmio`]: register access with the byte order fixed at attach time
//! - [`ring`]: bounded transmit queue
//! - [`port`]: the channel: lock, open count, transmit queue
//! - [`rx`]: receive relay from the hardware FIFO to the line discipline
//! - [`irq`]: interrupt entry point, RX first, then TX
//! - [`device`]: the attached device and its upward entry points
//!
//! Transmit path: `write` queues bytes and enables the TX interrupt, the
//! interrupt drains the queue into `TDR`, and the drain that empties the
//! queue disables the TX interrupt and wakes the writer.
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` (with `alloc`) by default on targets. The `std`
//! feature, also enabled during testing, adds the mock bus and sink.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod device;
pub mod error;
pub mod irq;
pub mod mmio;
pub mod port;
pub mod ring;
pub mod rx;
pub mod sink;
pub mod sync;

pub use config::{AttachConfig, DriverConfig, MAX_BYTES_PER_IRQ, PAGE_SIZE};
pub use device::{DeviceNames, WbUart};
pub use error::{AttachError, PortError};
pub use irq::IrqReturn;
pub use mmio::{Bus, Mmio, Registers};
pub use sink::LineSink;
pub use sync::{InterruptMask, Unmasked};

#[cfg(any(test, feature = "std"))]
pub use mmio::{Access, MockHardware};
#[cfg(any(test, feature = "std"))]
pub use sink::RecordingSink;

pub use wbu_abi::{Control, Endianness, IrqLine, PlatformData, PlatformFlags, Status};

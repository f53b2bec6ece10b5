// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Register layout and platform data for the Wishbone simple UART.
//!
//! This crate defines the contract between the UART driver and the code
//! that discovers the device:
//! - Register offsets and bit layouts of the memory-mapped block
//! - The platform data record (byte order flag, device name)
//! - The interrupt line identifier
//!
//! # Design Principles
//!
//! - **Pure data**: no driver logic, 100% host-testable
//! - **Bit-exact**: register offsets and bits mirror the gateware
//!
//! # Modules
//!
//! - [`regs`]: register offsets, [`Status`] and [`Control`] bits
//! - [`pdata`]: [`PlatformData`], [`PlatformFlags`], [`Endianness`]
//! - [`irq`]: [`IrqLine`]

#![cfg_attr(not(test), no_std)]

pub mod irq;
pub mod pdata;
pub mod regs;

pub use irq::IrqLine;
pub use pdata::{Endianness, NAME_MAX_LEN, PdataError, PlatformData, PlatformFlags};
pub use regs::{Control, Status};

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for device attach, detach and the upward entry points.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests fail by panicking")]

use core::sync::atomic::{AtomicUsize, Ordering};

use wbu_abi::{Control, Endianness, IrqLine, PlatformData, PlatformFlags, regs};

use super::{DeviceNames, WbUart};
use crate::config::{AttachConfig, DriverConfig};
use crate::error::{AttachError, PortError};
use crate::irq::IrqReturn;
use crate::mmio::{Access, MockHardware};
use crate::sink::RecordingSink;
use crate::sync::{InterruptMask, Unmasked};

/// Counts critical sections entered.
#[derive(Default)]
struct CountingMask {
    entered: AtomicUsize,
}

impl InterruptMask for CountingMask {
    fn without_interrupts<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.entered.fetch_add(1, Ordering::SeqCst);
        f()
    }
}

fn config(flags: PlatformFlags) -> AttachConfig {
    AttachConfig::new(
        PlatformData::new(flags, "fmc0").unwrap(),
        IrqLine::new(17),
    )
}

fn small_config() -> AttachConfig {
    config(PlatformFlags::empty()).with_driver(DriverConfig::new().with_tx_capacity(8))
}

// ============================================================================
// Attach / detach
// ============================================================================

#[test]
fn attach_physical_uart() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();

    let uart = WbUart::attach(&hw, &sink, Unmasked, &config(PlatformFlags::empty())).unwrap();

    assert_eq!(uart.capacity(), 4096);
    assert_eq!(uart.room_available(), 4096);
    assert_eq!(uart.bytes_pending(), 0);
    assert_eq!(uart.irq(), IrqLine::new(17));
    assert_eq!(uart.endianness(), Endianness::Little);
    assert!(!uart.is_open());
    // identity check is the only access
    assert_eq!(hw.accesses(), [Access::Read(regs::SR)]);
}

#[test]
fn attach_big_endian_uart() {
    let hw = MockHardware::with_wiring(Endianness::Big);
    let sink = RecordingSink::new();

    let uart = WbUart::attach(&hw, &sink, Unmasked, &config(PlatformFlags::BIG_ENDIAN)).unwrap();

    assert_eq!(uart.endianness(), Endianness::Big);
    uart.open().unwrap();
    assert_eq!(hw.control(), Control::RX_INTERRUPT_ENABLE);
}

#[test]
fn virtual_uart_is_refused() {
    let hw = MockHardware::new().virtual_uart();
    let sink = RecordingSink::new();

    let result = WbUart::attach(&hw, &sink, Unmasked, &config(PlatformFlags::empty()));

    assert!(matches!(result, Err(AttachError::DeviceMismatch)));
}

#[test]
fn wrong_byte_order_is_refused() {
    let hw = MockHardware::with_wiring(Endianness::Big);
    let sink = RecordingSink::new();

    let result = WbUart::attach(&hw, &sink, Unmasked, &config(PlatformFlags::empty()));

    assert!(matches!(result, Err(AttachError::DeviceMismatch)));
}

#[test]
fn bad_config_is_refused_before_touching_hardware() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let bad = config(PlatformFlags::empty()).with_driver(DriverConfig::new().with_tx_capacity(100));

    let result = WbUart::attach(&hw, &sink, Unmasked, &bad);

    assert!(matches!(result, Err(AttachError::InvalidCapacity(100))));
    assert!(hw.accesses().is_empty());
}

#[test]
fn detach_silences_device_even_when_open() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    hw.preset_control(Control::RX_FIFO_PURGE);
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();
    uart.open().unwrap();
    uart.write(b"abc");
    assert!(hw.control().contains(Control::ALL_INTERRUPTS));

    uart.detach();

    assert_eq!(hw.control(), Control::RX_FIFO_PURGE);
    assert!(hw.transmitted().is_empty());
}

#[test]
fn names_follow_platform_name() {
    let names = DeviceNames::new("fmc0");
    assert_eq!(names.driver(), "wbu-fmc0-tty");
    assert_eq!(names.tty_prefix(), "ttywbu-fmc0-");
    assert_eq!(names.node(), "ttywbu-fmc0-0");

    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();
    assert_eq!(uart.names(), &names);
}

// ============================================================================
// Upward entry points
// ============================================================================

#[test]
fn single_opener_only() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();

    uart.open().unwrap();
    assert_eq!(uart.open(), Err(PortError::AlreadyOpen));
    uart.close().unwrap();
    assert_eq!(uart.close(), Err(PortError::NotOpen));
}

#[test]
fn room_and_pending_always_sum_to_capacity() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();
    uart.open().unwrap();

    let check = || assert_eq!(uart.room_available() + uart.bytes_pending(), uart.capacity());

    check();
    assert_eq!(uart.write(b"HELLOWORLD"), 8);
    check();
    hw.busy_after(3);
    uart.handle_irq();
    check();
    assert_eq!(uart.bytes_pending(), 5);
    hw.set_tx_busy(false);
    uart.handle_irq();
    check();
    assert_eq!(uart.bytes_pending(), 0);
}

#[test]
fn write_never_exceeds_room() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();
    uart.open().unwrap();

    assert_eq!(uart.write(b"12345"), 5);
    assert_eq!(uart.room_available(), 3);
    assert_eq!(uart.write(b"67890"), 3);
    assert_eq!(uart.write(b"x"), 0);
}

#[test]
fn closed_line_refuses_writes_and_stays_quiet() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();

    assert_eq!(uart.write(b"early"), 0);

    uart.open().unwrap();
    uart.close().unwrap();
    hw.clear_accesses();

    assert_eq!(uart.write(b"after-close"), 0);
    assert_eq!(uart.bytes_pending(), 0);
    assert!(hw.accesses().is_empty());
    assert_eq!(hw.control(), Control::empty());
    assert_eq!(uart.handle_irq(), IrqReturn::None);
    assert!(hw.transmitted().is_empty());
}

#[test]
fn session_never_touches_baud_or_host_registers() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let uart = WbUart::attach(&hw, &sink, Unmasked, &small_config()).unwrap();

    uart.open().unwrap();
    hw.push_rx(b"in");
    uart.write(b"out");
    while uart.handle_irq().is_handled() {}
    uart.close().unwrap();
    uart.detach();

    let untouched = [regs::BCR, regs::HOST_TDR, regs::HOST_RDR];
    assert!(hw.accesses().iter().all(|&access| match access {
        Access::Read(offset) | Access::Write(offset, _) => !untouched.contains(&offset),
    }));
    assert_eq!(hw.transmitted(), b"out");
    assert_eq!(sink.delivered(), b"in");
}

#[test]
fn writer_paths_run_masked_and_irq_path_does_not() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let mask = CountingMask::default();
    let uart = WbUart::attach(&hw, &sink, &mask, &small_config()).unwrap();

    uart.open().unwrap();
    uart.write(b"hi");
    assert_eq!(uart.room_available(), 6);
    assert_eq!(uart.bytes_pending(), 2);
    uart.close().unwrap();
    assert_eq!(mask.entered.load(Ordering::SeqCst), 5);

    hw.push_rx(b"x");
    uart.handle_irq();
    assert_eq!(mask.entered.load(Ordering::SeqCst), 5);
}

#[test]
fn handle_irq_uses_configured_budget() {
    let hw = MockHardware::new();
    let sink = RecordingSink::new();
    let cfg = config(PlatformFlags::empty()).with_driver(DriverConfig::new().with_irq_budget(4));
    let uart = WbUart::attach(&hw, &sink, Unmasked, &cfg).unwrap();
    hw.push_rx(b"abcdef");

    assert_eq!(uart.handle_irq(), IrqReturn::Handled);
    assert_eq!(sink.delivered(), b"abcd");
    assert_eq!(uart.handle_irq(), IrqReturn::Handled);
    assert_eq!(sink.delivered(), b"abcdef");
    assert_eq!(uart.handle_irq(), IrqReturn::None);
}

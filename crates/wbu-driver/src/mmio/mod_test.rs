// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for register access.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests fail by panicking")]

use wbu_abi::regs;
use wbu_abi::{Control, Endianness};

use super::{Access, MockHardware, Mmio, Registers};

/// Word-aligned backing store standing in for device memory.
const fn block() -> [u32; regs::BLOCK_SIZE / 4] {
    [0; regs::BLOCK_SIZE / 4]
}

#[test]
fn mmio_rejects_null_base() {
    // SAFETY: a null base is rejected before any access.
    let mmio = unsafe { Mmio::new(core::ptr::null_mut()) };
    assert!(mmio.is_none());
}

#[test]
fn little_endian_write_lands_in_bus_order() {
    let mut mem = block();
    let ptr = mem.as_mut_ptr();
    // SAFETY: `mem` is word aligned, covers the block and outlives the registers.
    let mmio = unsafe { Mmio::new(ptr.cast()) }.unwrap();
    let registers = Registers::new(mmio, Endianness::Little);

    registers.write(0x1234_5678, regs::CR);

    let cr = ptr.wrapping_byte_add(regs::CR);
    // SAFETY: `cr` points into `mem`.
    let raw = unsafe { cr.read_volatile() };
    assert_eq!(raw, 0x1234_5678_u32.to_le());
    assert_eq!(registers.read(regs::CR), 0x1234_5678);
}

#[test]
fn big_endian_write_lands_in_bus_order() {
    let mut mem = block();
    let ptr = mem.as_mut_ptr();
    // SAFETY: `mem` is word aligned, covers the block and outlives the registers.
    let mmio = unsafe { Mmio::new(ptr.cast()) }.unwrap();
    let registers = Registers::new(mmio, Endianness::Big);

    registers.write(0x1234_5678, regs::CR);

    let cr = ptr.wrapping_byte_add(regs::CR);
    // SAFETY: `cr` points into `mem`.
    let raw = unsafe { cr.read_volatile() };
    assert_eq!(raw, 0x1234_5678_u32.to_be());
    assert_eq!(registers.read(regs::CR), 0x1234_5678);
    assert_eq!(registers.endianness(), Endianness::Big);
}

#[test]
fn rx_byte_is_masked_to_low_eight_bits() {
    let mut mem = block();
    let ptr = mem.as_mut_ptr();
    let rdr = ptr.wrapping_byte_add(regs::RDR);
    // SAFETY: `rdr` points into `mem`.
    unsafe {
        rdr.write_volatile(0xABCD_EF12_u32.to_le());
    }
    // SAFETY: `mem` is word aligned, covers the block and outlives the registers.
    let mmio = unsafe { Mmio::new(ptr.cast()) }.unwrap();
    let registers = Registers::new(mmio, Endianness::Little);

    assert_eq!(registers.read_rx_byte(), 0x12);
}

#[test]
fn matching_wiring_sees_identity_bit() {
    let hw = MockHardware::with_wiring(Endianness::Big);
    let registers = Registers::new(&hw, Endianness::Big);
    assert!(registers.is_physical());
}

#[test]
fn wrong_wiring_scrambles_status() {
    let hw = MockHardware::with_wiring(Endianness::Big);
    let registers = Registers::new(&hw, Endianness::Little);
    assert!(!registers.is_physical());
}

#[test]
fn set_control_preserves_other_bits() {
    let hw = MockHardware::new();
    hw.preset_control(Control::RX_INTERRUPT_ENABLE | Control::RX_FIFO_PURGE);
    let registers = Registers::new(&hw, Endianness::Little);

    registers.set_control(Control::TX_INTERRUPT_ENABLE);
    assert_eq!(
        hw.control(),
        Control::RX_INTERRUPT_ENABLE | Control::TX_INTERRUPT_ENABLE | Control::RX_FIFO_PURGE
    );

    registers.clear_control(Control::RX_INTERRUPT_ENABLE);
    assert_eq!(
        hw.control(),
        Control::TX_INTERRUPT_ENABLE | Control::RX_FIFO_PURGE
    );
}

#[test]
fn control_update_is_read_modify_write() {
    let hw = MockHardware::new();
    let registers = Registers::new(&hw, Endianness::Little);

    registers.set_control(Control::TX_INTERRUPT_ENABLE);

    assert_eq!(
        hw.accesses(),
        [
            Access::Read(regs::CR),
            Access::Write(regs::CR, Control::TX_INTERRUPT_ENABLE.bits()),
        ]
    );
}

#[test]
fn try_transmit_checks_busy_first() {
    let hw = MockHardware::new();
    let registers = Registers::new(&hw, Endianness::Little);

    assert!(registers.try_transmit(b'A'));
    assert_eq!(
        hw.accesses(),
        [
            Access::Read(regs::SR),
            Access::Write(regs::TDR, u32::from(b'A')),
        ]
    );

    hw.clear_accesses();
    hw.set_tx_busy(true);
    assert!(!registers.try_transmit(b'B'));
    assert_eq!(hw.accesses(), [Access::Read(regs::SR)]);
    assert_eq!(hw.transmitted(), b"A");
}

#[test]
fn reading_rdr_pops_the_fifo() {
    let hw = MockHardware::new();
    hw.push_rx(b"xy");
    let registers = Registers::new(&hw, Endianness::Little);

    assert!(registers.status().rx_ready());
    assert_eq!(registers.read_rx_byte(), b'x');
    assert_eq!(registers.read_rx_byte(), b'y');
    assert!(!registers.status().rx_ready());
}

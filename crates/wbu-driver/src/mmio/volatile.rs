// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Volatile access to a mapped register block.

use core::ptr::NonNull;

use super::Bus;

/// A mapped UART register block.
pub struct Mmio {
    /// Virtual address of the block.
    base: NonNull<u32>,
}

// SAFETY: The block is device memory; every access is a single volatile
// word load or store, which the hardware serializes.
unsafe impl Send for Mmio {}
// SAFETY: As above, `&Mmio` only performs word-sized volatile accesses.
unsafe impl Sync for Mmio {}

impl Mmio {
    /// Wrap a mapped register block.
    ///
    /// Returns `None` if `base` is null.
    ///
    /// # Safety
    ///
    /// - `base` must point to the mapped UART block, at least
    ///   [`wbu_abi::regs::BLOCK_SIZE`] bytes long and 4-byte aligned
    /// - The mapping must outlive the returned value
    /// - Nothing else may drive the same block
    #[inline]
    #[expect(
        clippy::cast_ptr_alignment,
        reason = "register blocks are word aligned (page-aligned mapping)"
    )]
    #[must_use]
    pub unsafe fn new(base: *mut u8) -> Option<Self> {
        NonNull::new(base.cast::<u32>()).map(|word| Self { base: word })
    }

    /// Virtual address of the block.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> *mut u8 {
        self.base.as_ptr().cast::<u8>()
    }

    /// Address of the register at `offset`. Offsets come from `regs` and
    /// stay inside the block.
    const fn register(&self, offset: usize) -> *mut u32 {
        self.base.as_ptr().wrapping_byte_add(offset)
    }
}

impl Bus for Mmio {
    #[inline]
    fn load(&self, offset: usize) -> u32 {
        let reg = self.register(offset);
        // SAFETY: `new` requires a valid mapping and `reg` lies inside it.
        unsafe { reg.read_volatile() }
    }

    #[inline]
    fn store(&self, offset: usize, raw: u32) {
        let reg = self.register(offset);
        // SAFETY: As in `load`.
        unsafe {
            reg.write_volatile(raw);
        }
    }
}

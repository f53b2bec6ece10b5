// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Writer-side interrupt masking.
//!
//! The channel lock is a spin lock shared with the interrupt handler. If a
//! writer held it and the UART interrupt fired on the same CPU, the
//! handler would spin forever. Writer-context entry points therefore run
//! their critical section through [`InterruptMask::without_interrupts`],
//! which the host implements by masking local interrupts (or at least the
//! UART line) for the duration of the closure.

/// Host hook that masks local interrupts around a closure.
pub trait InterruptMask {
    /// Run `f` with local interrupts masked, restoring the previous state.
    fn without_interrupts<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R;
}

/// No masking.
///
/// For hosts whose writer context already runs with the UART line masked,
/// for hosts that never run the handler on the writer's CPU, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unmasked;

impl InterruptMask for Unmasked {
    #[inline]
    fn without_interrupts<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
}

impl<T: InterruptMask + ?Sized> InterruptMask for &T {
    #[inline]
    fn without_interrupts<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        (**self).without_interrupts(f)
    }
}

// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Platform data handed to the driver when the device is attached.
//!
//! The bus layer that discovers the UART resolves its resources and packs
//! the driver-specific part into a [`PlatformData`] record: the byte order
//! of the register block and a short name used to derive device names.

use core::fmt;

use bitflags::bitflags;

/// Maximum name length in bytes, excluding the terminator of the C layout.
pub const NAME_MAX_LEN: usize = 31;

bitflags! {
    /// Flags describing how the core is wired.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct PlatformFlags: u32 {
        /// Registers are big-endian on the bus.
        const BIG_ENDIAN = 1 << 0;
    }
}

/// Byte order of the register block as seen by the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Least significant byte at the lowest address.
    #[default]
    Little,
    /// Most significant byte at the lowest address.
    Big,
}

impl fmt::Display for Endianness {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Little => write!(f, "little-endian"),
            Self::Big => write!(f, "big-endian"),
        }
    }
}

/// Errors from validating platform data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdataError {
    /// The device name is empty.
    EmptyName,
    /// The device name is longer than [`NAME_MAX_LEN`] bytes.
    NameTooLong(usize),
    /// The device name contains a byte that cannot appear in a device node.
    InvalidChar(u8),
}

impl fmt::Display for PdataError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyName => write!(f, "device name is empty"),
            Self::NameTooLong(len) => {
                write!(f, "device name is {len} bytes, limit is {NAME_MAX_LEN}")
            }
            Self::InvalidChar(byte) => write!(f, "invalid byte 0x{byte:02x} in device name"),
        }
    }
}

impl core::error::Error for PdataError {}

/// Attach-time platform data for one UART.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformData {
    flags: PlatformFlags,
    name: [u8; NAME_MAX_LEN],
    name_len: usize,
}

impl PlatformData {
    /// Creates platform data, validating the name.
    ///
    /// Names are limited to ASCII alphanumerics, `-` and `_`.
    #[inline]
    pub fn new(flags: PlatformFlags, name: &str) -> Result<Self, PdataError> {
        let bytes = name.as_bytes();
        if bytes.is_empty() {
            return Err(PdataError::EmptyName);
        }
        if bytes.len() > NAME_MAX_LEN {
            return Err(PdataError::NameTooLong(bytes.len()));
        }
        if let Some(&bad) = bytes
            .iter()
            .find(|&&b| !matches!(b, b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'-' | b'_'))
        {
            return Err(PdataError::InvalidChar(bad));
        }

        let mut stored = [0_u8; NAME_MAX_LEN];
        stored[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            flags,
            name: stored,
            name_len: bytes.len(),
        })
    }

    /// Returns the wiring flags.
    #[inline]
    #[must_use]
    pub const fn flags(&self) -> PlatformFlags {
        self.flags
    }

    /// Returns the device name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        // Validated as ASCII in `new`.
        core::str::from_utf8(&self.name[..self.name_len]).unwrap_or_default()
    }

    /// Returns the byte order selected by the flags.
    #[inline]
    #[must_use]
    pub const fn endianness(&self) -> Endianness {
        if self.flags.contains(PlatformFlags::BIG_ENDIAN) {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

impl fmt::Debug for PlatformData {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformData")
            .field("flags", &self.flags)
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

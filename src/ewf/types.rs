//! Type definitions for EWF segment files

use std::fmt;
use std::ops::BitOr;

// =============================================================================
// Core Constants
// =============================================================================

pub(crate) const EWF1_SIGNATURE: &[u8; 8] = b"EVF\x09\x0d\x0a\xff\x00";
pub(crate) const LWF1_SIGNATURE: &[u8; 8] = b"LVF\x09\x0d\x0a\xff\x00";
pub(crate) const EWF2_SIGNATURE: &[u8; 8] = b"EVF2\x0d\x0a\x81\x00";
pub(crate) const LWF2_SIGNATURE: &[u8; 8] = b"LEF2\x0d\x0a\x81\x00";

pub(crate) const SIGNATURE_SIZE: usize = 8;
pub(crate) const FILE_HEADER_V1_SIZE: usize = 13;
pub(crate) const FILE_HEADER_V2_SIZE: usize = 32;

// =============================================================================
// Access Flags
// =============================================================================

/// Access mode requested when opening a handle (like LIBEWF_ACCESS_FLAG_*)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessFlags(u8);

impl AccessFlags {
    pub const READ: AccessFlags = AccessFlags(0x01);
    pub const WRITE: AccessFlags = AccessFlags(0x02);
    pub const RESUME: AccessFlags = AccessFlags(0x10);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn from_bits(bits: u8) -> Self {
        AccessFlags(bits)
    }

    pub const fn contains(self, other: AccessFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: AccessFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for AccessFlags {
    type Output = AccessFlags;

    fn bitor(self, rhs: AccessFlags) -> AccessFlags {
        AccessFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Flags for read-only access
pub fn get_access_flags_read() -> AccessFlags {
    AccessFlags::READ
}

// =============================================================================
// Segment Format - detected from the file signature
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentFormat {
    /// EnCase physical image (E01), also used by SMART (s01)
    Ewf1,
    /// EnCase logical evidence (L01)
    Lwf1,
    /// EnCase 7 physical image (Ex01)
    Ewf2,
    /// EnCase 7 logical evidence (Lx01)
    Lwf2,
}

impl SegmentFormat {
    pub fn from_signature(signature: &[u8]) -> Option<Self> {
        match signature.get(..SIGNATURE_SIZE)? {
            s if s == EWF1_SIGNATURE => Some(SegmentFormat::Ewf1),
            s if s == LWF1_SIGNATURE => Some(SegmentFormat::Lwf1),
            s if s == EWF2_SIGNATURE => Some(SegmentFormat::Ewf2),
            s if s == LWF2_SIGNATURE => Some(SegmentFormat::Lwf2),
            _ => None,
        }
    }

    pub fn is_v2(self) -> bool {
        matches!(self, SegmentFormat::Ewf2 | SegmentFormat::Lwf2)
    }

    /// Size of the file header that precedes the first section
    pub(crate) fn header_size(self) -> usize {
        if self.is_v2() {
            FILE_HEADER_V2_SIZE
        } else {
            FILE_HEADER_V1_SIZE
        }
    }
}

impl fmt::Display for SegmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SegmentFormat::Ewf1 => "EWF",
            SegmentFormat::Lwf1 => "LWF",
            SegmentFormat::Ewf2 => "EWF2",
            SegmentFormat::Lwf2 => "LWF2",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Segment File Header
// =============================================================================

/// Parsed file header of one segment file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmentFileHeader {
    pub format: SegmentFormat,
    /// Segment number (1 for E01, 2 for E02, etc.)
    pub segment_number: u32,
    /// v2 only
    pub major_version: Option<u8>,
    /// v2 only
    pub minor_version: Option<u8>,
    /// v2 only
    pub compression_method: Option<u16>,
    /// v2 only; identical across all segments of one set
    pub set_identifier: Option<[u8; 16]>,
}

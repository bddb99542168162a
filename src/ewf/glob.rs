// Segment filename expansion (like libewf_glob)
//
// EWF v1 extensions: .E01 ... .E99, .EAA ... .EZZ, .FAA ... .ZZZ
// EWF v2 extensions: .Ex01 ... .Ex99, .ExAA ... .ExZZ, .FxAA ... .ZxZZ
// Lowercase first characters (e01, l01, s01) use lowercase letters.

use std::path::Path;

use tracing::{debug, instrument, trace};

use super::error::{EwfError, Result};

/// Naming scheme of one segment set, derived from a segment file extension
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SegmentNaming {
    /// First extension character: E, e, L, l or s
    first: char,
    /// `true` for the Ex01/Lx01 layout
    v2: bool,
}

impl SegmentNaming {
    pub(crate) fn new(first: char, v2: bool) -> Option<Self> {
        let supported = if v2 {
            matches!(first, 'E' | 'e' | 'L' | 'l')
        } else {
            matches!(first, 'E' | 'e' | 'L' | 'l' | 's')
        };
        supported.then_some(Self { first, v2 })
    }

    /// Extension (without the dot) for a 1-based segment number
    pub(crate) fn extension(&self, segment_number: u32) -> Result<String> {
        if segment_number == 0 {
            return Err(EwfError::InvalidArgument("segment number 0".to_string()));
        }

        let infix = if self.v2 { "x" } else { "" };
        if segment_number <= 99 {
            return Ok(format!("{}{}{:02}", self.first, infix, segment_number));
        }

        let (letter_base, last_first) = if self.first.is_ascii_lowercase() {
            (b'a', b'z')
        } else {
            (b'A', b'Z')
        };

        let n = segment_number - 100;
        let third = (letter_base + (n % 26) as u8) as char;
        let second = (letter_base + ((n / 26) % 26) as u8) as char;
        let first = u32::from(self.first) + n / 676;
        if first > u32::from(last_first) {
            return Err(EwfError::TooManySegments(segment_number));
        }
        let first = char::from_u32(first).ok_or(EwfError::TooManySegments(segment_number))?;

        Ok(format!("{}{}{}{}", first, infix, second, third))
    }

    /// Highest segment number the naming scheme can express
    pub(crate) fn max_segments(&self) -> u32 {
        let last_first = if self.first.is_ascii_lowercase() { 'z' } else { 'Z' };
        let firsts = u32::from(last_first) - u32::from(self.first) + 1;
        99 + firsts * 676
    }
}

/// `true` for the two characters that follow the type letter of a segment
/// extension: 01..99, or a letter pair in the case of the type letter
fn is_segment_suffix(suffix: &str, lowercase: bool) -> bool {
    let bytes = suffix.as_bytes();
    if bytes.len() != 2 {
        return false;
    }
    if bytes.iter().all(u8::is_ascii_digit) {
        return suffix != "00";
    }
    if lowercase {
        bytes.iter().all(u8::is_ascii_lowercase)
    } else {
        bytes.iter().all(u8::is_ascii_uppercase)
    }
}

/// Split a pattern into (base path, naming scheme)
///
/// Any segment of a set names the whole set, so `image.E05` globs from
/// `image.E01`. A pattern without a segment extension is the base of an E01
/// set. Other three character extensions are rejected.
pub(crate) fn split_pattern(pattern: &str) -> Result<(&str, SegmentNaming)> {
    let default = SegmentNaming { first: 'E', v2: false };

    let Some((base, ext)) = pattern.rsplit_once('.') else {
        return Ok((pattern, default));
    };
    if base.is_empty() || base.ends_with(['/', '\\']) || ext.contains(['/', '\\']) {
        return Ok((pattern, default));
    }

    let mut chars = ext.chars();
    let Some(first) = chars.next() else {
        return Ok((pattern, default));
    };
    let unsupported = || EwfError::UnsupportedExtension(ext.to_string());
    let lowercase = first.is_ascii_lowercase();
    let rest = chars.as_str();

    let v2 = match rest.strip_prefix('x') {
        Some(suffix) if is_segment_suffix(suffix, lowercase) => true,
        _ if is_segment_suffix(rest, lowercase) => false,
        _ if ext.chars().count() == 3 => return Err(unsupported()),
        _ => return Ok((pattern, default)),
    };

    SegmentNaming::new(first, v2)
        .map(|naming| (base, naming))
        .ok_or_else(unsupported)
}

/// Expand a filename into the ordered list of existing segment files of one image
#[instrument]
pub fn glob(pattern: &str) -> Result<Vec<String>> {
    if pattern.is_empty() {
        return Err(EwfError::InvalidArgument("empty filename".to_string()));
    }

    let (base, naming) = split_pattern(pattern)?;
    trace!(base, ?naming, "Globbing segment files");

    let mut filenames = Vec::new();
    for segment_number in 1..=naming.max_segments() {
        let filename = format!("{}.{}", base, naming.extension(segment_number)?);
        if !Path::new(&filename).is_file() {
            trace!(segment_number, filename = %filename, "Segment not found, stopping");
            break;
        }
        filenames.push(filename);
    }

    debug!(segment_count = filenames.len(), "Segment files globbed");
    Ok(filenames)
}

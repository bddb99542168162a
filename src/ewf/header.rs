//! Segment file header parsing (EVF/LVF v1 and EVF2/LEF2 v2)

use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::Path;

use tracing::{instrument, trace};

use crate::common::{read_bytes, read_prefix_at, read_u16_le, read_u32_le, read_u8};

use super::error::{EwfError, Result};
use super::types::{SegmentFileHeader, SegmentFormat, SIGNATURE_SIZE};

/// Read and validate the file header at the start of a segment file
pub(crate) fn read_file_header<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
) -> Result<SegmentFileHeader> {
    let io_err = |e: io::Error| EwfError::io(path, e);
    let truncated = |_: io::Error| EwfError::InvalidHeader {
        path: path.to_path_buf(),
        reason: "file header is truncated".to_string(),
    };

    let signature = read_prefix_at(reader, 0, SIGNATURE_SIZE).map_err(io_err)?;
    let format =
        SegmentFormat::from_signature(&signature).ok_or_else(|| EwfError::InvalidSignature {
            path: path.to_path_buf(),
        })?;

    let header = if format.is_v2() {
        let major_version = read_u8(reader).map_err(truncated)?;
        let minor_version = read_u8(reader).map_err(truncated)?;
        let compression_method = read_u16_le(reader).map_err(truncated)?;
        let segment_number = read_u32_le(reader).map_err(truncated)?;
        let set_identifier: [u8; 16] = read_bytes(reader).map_err(truncated)?;

        SegmentFileHeader {
            format,
            segment_number,
            major_version: Some(major_version),
            minor_version: Some(minor_version),
            compression_method: Some(compression_method),
            set_identifier: Some(set_identifier),
        }
    } else {
        let fields_start = read_u8(reader).map_err(truncated)?;
        let segment_number = read_u16_le(reader).map_err(truncated)?;
        let fields_end = read_u16_le(reader).map_err(truncated)?;

        if fields_start != 1 || fields_end != 0 {
            return Err(EwfError::InvalidHeader {
                path: path.to_path_buf(),
                reason: format!(
                    "unexpected header fields (start={}, end={})",
                    fields_start, fields_end
                ),
            });
        }

        SegmentFileHeader {
            format,
            segment_number: u32::from(segment_number),
            major_version: None,
            minor_version: None,
            compression_method: None,
            set_identifier: None,
        }
    };

    if header.segment_number == 0 {
        return Err(EwfError::InvalidHeader {
            path: path.to_path_buf(),
            reason: "segment number 0".to_string(),
        });
    }

    trace!(
        ?path,
        format = %header.format,
        segment_number = header.segment_number,
        header_size = format.header_size(),
        "Parsed segment file header"
    );
    Ok(header)
}

/// Check whether a file starts with a known EWF signature
#[instrument]
pub fn check_file_signature(path: &Path) -> Result<bool> {
    let mut file = File::open(path).map_err(|e| EwfError::io(path, e))?;
    let signature =
        read_prefix_at(&mut file, 0, SIGNATURE_SIZE).map_err(|e| EwfError::io(path, e))?;
    Ok(SegmentFormat::from_signature(&signature).is_some())
}

// Shared binary reading utilities for segment file headers
//
// Provides consistent little-endian binary reading over any `Read` source

use std::io::{self, Read, Seek, SeekFrom};

// =============================================================================
// Basic Read Functions (from current position)
// =============================================================================

/// Read a fixed-size byte array from the current position
pub fn read_bytes<R: Read, const N: usize>(reader: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read a single byte from the current position
pub fn read_u8<R: Read>(reader: &mut R) -> io::Result<u8> {
    let [byte] = read_bytes::<R, 1>(reader)?;
    Ok(byte)
}

/// Read u16 little-endian from the current position
pub fn read_u16_le<R: Read>(reader: &mut R) -> io::Result<u16> {
    read_bytes(reader).map(u16::from_le_bytes)
}

/// Read u32 little-endian from the current position
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    read_bytes(reader).map(u32::from_le_bytes)
}

// =============================================================================
// Read at Offset Functions (seek + read)
// =============================================================================

/// Read up to `len` bytes at `offset`, returning fewer only at end of file
pub fn read_prefix_at<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    len: usize,
) -> io::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::with_capacity(len);
    reader.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_little_endian_reads() {
        let mut cursor = Cursor::new(vec![0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(read_u8(&mut cursor).unwrap(), 0x01);
        assert_eq!(read_u16_le(&mut cursor).unwrap(), 0x1234);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0x1234_5678);
    }

    #[test]
    fn test_short_read_is_error() {
        let mut cursor = Cursor::new(vec![0xAA]);
        assert!(read_u16_le(&mut cursor).is_err());
    }

    #[test]
    fn test_read_prefix_at_stops_at_eof() {
        let mut cursor = Cursor::new(b"EVF\x09".to_vec());
        assert_eq!(read_prefix_at(&mut cursor, 1, 8).unwrap(), b"VF\x09".to_vec());
        assert!(read_prefix_at(&mut cursor, 10, 8).unwrap().is_empty());
    }
}

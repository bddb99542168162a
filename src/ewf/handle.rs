//! EwfHandle - open/close access to one EWF segment set (like libewf_handle)

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::common::{FileIoPool, DEFAULT_MAX_OPEN_FILES};

use super::error::{EwfError, Result};
use super::header::read_file_header;
use super::types::{AccessFlags, SegmentFileHeader, SegmentFormat};

// =============================================================================
// Segment File - one physical E01/E02/... file of an open set
// =============================================================================

#[derive(Debug)]
pub(crate) struct SegmentFile {
    /// Index in the file pool
    pub file_index: usize,
    pub header: SegmentFileHeader,
}

#[derive(Debug)]
struct OpenSegments {
    file_pool: FileIoPool,
    /// Sorted by segment number
    segments: Vec<SegmentFile>,
    format: SegmentFormat,
}

// =============================================================================
// EWF Handle
// =============================================================================

/// Handle on an EWF segment set
///
/// A handle starts closed. `open` validates every segment file header and
/// keeps the files in a bounded pool until `close` or drop releases them.
#[derive(Debug)]
pub struct EwfHandle {
    max_open_files: usize,
    state: Option<OpenSegments>,
}

impl Default for EwfHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl EwfHandle {
    pub fn new() -> Self {
        Self::with_max_open_files(DEFAULT_MAX_OPEN_FILES)
    }

    /// Limit how many segment files are held open at once
    pub fn with_max_open_files(max_open_files: usize) -> Self {
        Self {
            max_open_files,
            state: None,
        }
    }

    /// Open a segment set (like libewf_handle_open)
    ///
    /// The filenames may be given in any order but must form one complete set:
    /// a single format, segment numbers 1..=N without gaps or duplicates, and
    /// for EWF2 a common set identifier.
    #[instrument(skip(self, filenames), fields(count = filenames.len()))]
    pub fn open<P: AsRef<Path>>(
        &mut self,
        filenames: &[P],
        access_flags: AccessFlags,
    ) -> Result<()> {
        if self.state.is_some() {
            return Err(EwfError::AlreadyOpen);
        }
        if filenames.is_empty() {
            return Err(EwfError::InvalidArgument("no filenames given".to_string()));
        }
        if !access_flags.contains(AccessFlags::READ)
            || access_flags.intersects(AccessFlags::WRITE | AccessFlags::RESUME)
        {
            return Err(EwfError::UnsupportedAccessFlags(access_flags));
        }

        let paths: Vec<PathBuf> = filenames.iter().map(|f| f.as_ref().to_path_buf()).collect();
        let mut file_pool = FileIoPool::new(paths, self.max_open_files);

        let mut segments = Vec::with_capacity(file_pool.get_file_count());
        for file_index in 0..file_pool.get_file_count() {
            let path = file_pool
                .get_path(file_index)
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let file = file_pool
                .get_file(file_index)
                .map_err(|e| EwfError::io(&path, e))?;
            let header = read_file_header(file, &path)?;
            segments.push(SegmentFile { file_index, header });
        }

        let (format, segments) = validate_segment_set(segments, &file_pool)?;
        debug!(%format, segment_count = segments.len(), "Opened segment set");

        self.state = Some(OpenSegments {
            file_pool,
            segments,
            format,
        });
        Ok(())
    }

    /// Close the segment set (like libewf_handle_close)
    pub fn close(&mut self) -> Result<()> {
        let open_files = self.release().ok_or(EwfError::NotOpen)?;
        debug!(open_files, "Closed segment set");
        Ok(())
    }

    /// Drop the open segment set, returning how many files were still open
    fn release(&mut self) -> Option<usize> {
        let mut state = self.state.take()?;
        let open_files = state.file_pool.open_count();
        state.file_pool.close_all();
        Some(open_files)
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn format(&self) -> Option<SegmentFormat> {
        self.state.as_ref().map(|s| s.format)
    }

    pub fn segment_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.segments.len())
    }

    /// Segment file paths ordered by segment number
    pub fn segment_paths(&self) -> Vec<&Path> {
        let Some(state) = &self.state else {
            return Vec::new();
        };
        state
            .segments
            .iter()
            .filter_map(|seg| state.file_pool.get_path(seg.file_index))
            .collect()
    }
}

impl Drop for EwfHandle {
    fn drop(&mut self) {
        if let Some(open_files) = self.release() {
            trace!(open_files, "Released unclosed segment set");
        }
    }
}

/// Check that the headers describe exactly one complete segment set
fn validate_segment_set(
    mut segments: Vec<SegmentFile>,
    file_pool: &FileIoPool,
) -> Result<(SegmentFormat, Vec<SegmentFile>)> {
    let path_of = |seg: &SegmentFile| {
        file_pool
            .get_path(seg.file_index)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    };

    let first = segments
        .first()
        .ok_or_else(|| EwfError::InvalidArgument("no segment files".to_string()))?;
    let format = first.header.format;
    let set_identifier = first.header.set_identifier;

    for seg in &segments[1..] {
        if seg.header.format != format {
            return Err(EwfError::MixedFormats {
                expected: format,
                found: seg.header.format,
                path: path_of(seg),
            });
        }
        if seg.header.set_identifier != set_identifier {
            return Err(EwfError::SetIdentifierMismatch { path: path_of(seg) });
        }
    }

    segments.sort_by_key(|seg| seg.header.segment_number);

    for pair in segments.windows(2) {
        if pair[0].header.segment_number == pair[1].header.segment_number {
            return Err(EwfError::DuplicateSegment {
                number: pair[1].header.segment_number,
                path: path_of(&pair[1]),
            });
        }
    }

    for (expected, seg) in (1u32..).zip(&segments) {
        if seg.header.segment_number != expected {
            return Err(EwfError::MissingSegment(expected));
        }
    }

    Ok((format, segments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ewf::types::{EWF1_SIGNATURE, EWF2_SIGNATURE, LWF1_SIGNATURE};
    use std::fs;
    use tempfile::TempDir;

    fn write_v1(dir: &TempDir, name: &str, signature: &[u8; 8], segment: u16) -> PathBuf {
        let mut data = signature.to_vec();
        data.push(1);
        data.extend_from_slice(&segment.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&[0u8; 64]);
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path
    }

    fn write_v2(dir: &TempDir, name: &str, segment: u32, set_identifier: [u8; 16]) -> PathBuf {
        let mut data = EWF2_SIGNATURE.to_vec();
        data.extend_from_slice(&[2, 1]);
        data.extend_from_slice(&1u16.to_le_bytes());
        data.extend_from_slice(&segment.to_le_bytes());
        data.extend_from_slice(&set_identifier);
        let path = dir.path().join(name);
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn test_open_close_single_segment() {
        let dir = TempDir::new().unwrap();
        let path = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);

        let mut handle = EwfHandle::new();
        assert!(!handle.is_open());
        handle.open(&[&path], AccessFlags::READ).unwrap();
        assert!(handle.is_open());
        assert_eq!(handle.segment_count(), 1);
        assert_eq!(handle.format(), Some(SegmentFormat::Ewf1));

        handle.close().unwrap();
        assert!(!handle.is_open());
        assert_eq!(handle.segment_count(), 0);
    }

    #[test]
    fn test_open_sorts_segments() {
        let dir = TempDir::new().unwrap();
        let e03 = write_v1(&dir, "image.E03", EWF1_SIGNATURE, 3);
        let e01 = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let e02 = write_v1(&dir, "image.E02", EWF1_SIGNATURE, 2);

        let mut handle = EwfHandle::with_max_open_files(2);
        handle.open(&[&e03, &e01, &e02], AccessFlags::READ).unwrap();
        assert_eq!(
            handle.segment_paths(),
            vec![e01.as_path(), e02.as_path(), e03.as_path()]
        );
        handle.close().unwrap();
    }

    #[test]
    fn test_release_empties_file_pool() {
        let dir = TempDir::new().unwrap();
        let e01 = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let e02 = write_v1(&dir, "image.E02", EWF1_SIGNATURE, 2);
        let e03 = write_v1(&dir, "image.E03", EWF1_SIGNATURE, 3);

        let mut handle = EwfHandle::with_max_open_files(2);
        assert_eq!(handle.release(), None);

        handle.open(&[e01, e02, e03], AccessFlags::READ).unwrap();
        assert_eq!(handle.release(), Some(2));
        assert!(!handle.is_open());
        assert_eq!(handle.release(), None);
    }

    /// Open descriptors of this process that point below `dir`
    #[cfg(target_os = "linux")]
    fn open_files_under(dir: &Path) -> usize {
        let dir = dir.canonicalize().unwrap();
        fs::read_dir("/proc/self/fd")
            .unwrap()
            .filter_map(|entry| fs::read_link(entry.ok()?.path()).ok())
            .filter(|target| target.starts_with(&dir))
            .count()
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_drop_closes_segment_files() {
        let dir = TempDir::new().unwrap();
        let e01 = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let e02 = write_v1(&dir, "image.E02", EWF1_SIGNATURE, 2);

        let mut handle = EwfHandle::new();
        handle.open(&[e01, e02], AccessFlags::READ).unwrap();
        assert_eq!(open_files_under(dir.path()), 2);

        drop(handle);
        assert_eq!(open_files_under(dir.path()), 0);
    }

    #[test]
    fn test_open_v2_set() {
        let dir = TempDir::new().unwrap();
        let a = write_v2(&dir, "image.Ex01", 1, [7; 16]);
        let b = write_v2(&dir, "image.Ex02", 2, [7; 16]);

        let mut handle = EwfHandle::new();
        handle.open(&[a, b], AccessFlags::READ).unwrap();
        assert_eq!(handle.format(), Some(SegmentFormat::Ewf2));
    }

    #[test]
    fn test_open_rejects_set_identifier_mismatch() {
        let dir = TempDir::new().unwrap();
        let a = write_v2(&dir, "image.Ex01", 1, [7; 16]);
        let b = write_v2(&dir, "image.Ex02", 2, [8; 16]);

        let mut handle = EwfHandle::new();
        let err = handle.open(&[a, b], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::SetIdentifierMismatch { .. }));
        assert!(!handle.is_open());
    }

    #[test]
    fn test_open_missing_segment() {
        let dir = TempDir::new().unwrap();
        let e01 = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let e03 = write_v1(&dir, "image.E03", EWF1_SIGNATURE, 3);

        let mut handle = EwfHandle::new();
        let err = handle.open(&[e01, e03], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::MissingSegment(2)));
    }

    #[test]
    fn test_open_without_first_segment() {
        let dir = TempDir::new().unwrap();
        let e02 = write_v1(&dir, "image.E02", EWF1_SIGNATURE, 2);

        let mut handle = EwfHandle::new();
        let err = handle.open(&[e02], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::MissingSegment(1)));
    }

    #[test]
    fn test_open_duplicate_segment() {
        let dir = TempDir::new().unwrap();
        let a = write_v1(&dir, "a.E01", EWF1_SIGNATURE, 1);
        let b = write_v1(&dir, "b.E01", EWF1_SIGNATURE, 1);

        let mut handle = EwfHandle::new();
        let err = handle.open(&[a, b], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::DuplicateSegment { number: 1, .. }));
    }

    #[test]
    fn test_open_mixed_formats() {
        let dir = TempDir::new().unwrap();
        let e01 = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let l02 = write_v1(&dir, "image.L02", LWF1_SIGNATURE, 2);

        let mut handle = EwfHandle::new();
        let err = handle.open(&[e01, l02], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::MixedFormats { .. }));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut handle = EwfHandle::new();
        let err = handle
            .open(&[dir.path().join("missing.E01")], AccessFlags::READ)
            .unwrap_err();
        assert!(matches!(err, EwfError::Io { .. }));
        assert!(err.to_string().contains("missing.E01"));
    }

    #[test]
    fn test_open_not_ewf() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("image.E01");
        fs::write(&path, [0u8; 512]).unwrap();

        let mut handle = EwfHandle::new();
        let err = handle.open(&[path], AccessFlags::READ).unwrap_err();
        assert!(matches!(err, EwfError::InvalidSignature { .. }));
    }

    #[test]
    fn test_open_argument_checks() {
        let dir = TempDir::new().unwrap();
        let path = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let mut handle = EwfHandle::new();

        let none: [&Path; 0] = [];
        assert!(matches!(
            handle.open(&none, AccessFlags::READ),
            Err(EwfError::InvalidArgument(_))
        ));
        assert!(matches!(
            handle.open(&[&path], AccessFlags::READ | AccessFlags::WRITE),
            Err(EwfError::UnsupportedAccessFlags(_))
        ));
        assert!(matches!(
            handle.open(&[&path], AccessFlags::default()),
            Err(EwfError::UnsupportedAccessFlags(_))
        ));

        handle.open(&[&path], AccessFlags::READ).unwrap();
        assert!(matches!(
            handle.open(&[&path], AccessFlags::READ),
            Err(EwfError::AlreadyOpen)
        ));
    }

    #[test]
    fn test_close_when_not_open() {
        let mut handle = EwfHandle::new();
        assert!(matches!(handle.close(), Err(EwfError::NotOpen)));

        let dir = TempDir::new().unwrap();
        let path = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        handle.open(&[&path], AccessFlags::READ).unwrap();
        handle.close().unwrap();
        assert!(matches!(handle.close(), Err(EwfError::NotOpen)));
    }

    #[test]
    fn test_handle_is_reusable_after_failed_open() {
        let dir = TempDir::new().unwrap();
        let good = write_v1(&dir, "image.E01", EWF1_SIGNATURE, 1);
        let mut handle = EwfHandle::new();

        assert!(handle.open(&[dir.path().join("nope.E01")], AccessFlags::READ).is_err());
        handle.open(&[good], AccessFlags::READ).unwrap();
        assert!(handle.is_open());
    }
}

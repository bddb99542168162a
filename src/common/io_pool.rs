// File I/O pool for the segment files of one image set
//
// Keeps at most `max_open` files open at a time so large segment sets do not
// exhaust OS file descriptors.

use std::collections::{HashMap, VecDeque};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default maximum number of simultaneously open file handles
pub const DEFAULT_MAX_OPEN_FILES: usize = 16;

// =============================================================================
// File I/O Pool - Like libbfio_pool
// =============================================================================

/// Manages multiple read-only file handles with LRU eviction
#[derive(Debug)]
pub struct FileIoPool {
    /// Paths to all files, in pool index order
    file_paths: Vec<PathBuf>,
    /// Currently open file handles (file_index -> File)
    open_handles: HashMap<usize, File>,
    /// Most recently used index at the front
    lru_queue: VecDeque<usize>,
    max_open: usize,
}

impl FileIoPool {
    /// Create a new pool; a `max_open` of zero is treated as one
    pub fn new(file_paths: Vec<PathBuf>, max_open: usize) -> Self {
        Self {
            file_paths,
            open_handles: HashMap::new(),
            lru_queue: VecDeque::new(),
            max_open: max_open.max(1),
        }
    }

    /// Get a file handle, opening it if necessary
    pub fn get_file(&mut self, file_index: usize) -> io::Result<&mut File> {
        let file_path = self.file_paths.get(file_index).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "file index {} out of range (have {} files)",
                    file_index,
                    self.file_paths.len()
                ),
            )
        })?;

        if self.open_handles.contains_key(&file_index) {
            self.lru_queue.retain(|&x| x != file_index);
            self.lru_queue.push_front(file_index);
            trace!(file_index, "File handle cache hit");
        } else {
            if self.open_handles.len() >= self.max_open {
                if let Some(lru_index) = self.lru_queue.pop_back() {
                    trace!(lru_index, "Evicting LRU file handle");
                    self.open_handles.remove(&lru_index);
                }
            }

            debug!(file_index, ?file_path, "Opening file handle");
            let file = File::open(file_path)?;
            self.open_handles.insert(file_index, file);
            self.lru_queue.push_front(file_index);
        }

        self.open_handles.get_mut(&file_index).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "file handle vanished from pool")
        })
    }

    pub fn get_file_count(&self) -> usize {
        self.file_paths.len()
    }

    pub fn get_path(&self, file_index: usize) -> Option<&Path> {
        self.file_paths.get(file_index).map(PathBuf::as_path)
    }

    /// Get the number of currently open handles
    pub fn open_count(&self) -> usize {
        self.open_handles.len()
    }

    /// Close all open file handles
    pub fn close_all(&mut self) {
        trace!(open = self.open_handles.len(), "Closing all file handles");
        self.open_handles.clear();
        self.lru_queue.clear();
    }
}

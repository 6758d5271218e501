//! Per-traversal statistics: entry counts and byte totals by type, plus
//! ignored/unsupported/invalid listings. Observation only; nothing here may
//! influence digests.

use crate::classify::EntryType;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct StatSummary {
    directories: Vec<PathBuf>,
    regulars: Vec<PathBuf>,
    devices: Vec<PathBuf>,
    symlinks: Vec<PathBuf>,
    unsupported: Vec<PathBuf>,
    invalid: Vec<PathBuf>,
    ignored: Vec<PathBuf>,

    written_directory: u64,
    written_regular: u64,
    written_device: u64,
    written_symlink: u64,
}

impl StatSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hashed entry and its consumed byte count under its resolved
    /// type. Only hashable types are accepted.
    pub fn record_hashed(&mut self, path: &Path, resolved: EntryType, written: u64) {
        match resolved {
            EntryType::Dir => {
                self.directories.push(path.to_path_buf());
                self.written_directory += written;
            }
            EntryType::Reg => {
                self.regulars.push(path.to_path_buf());
                self.written_regular += written;
            }
            EntryType::Device => {
                self.devices.push(path.to_path_buf());
                self.written_device += written;
            }
            EntryType::Symlink => {
                self.symlinks.push(path.to_path_buf());
                self.written_symlink += written;
            }
            EntryType::Unsupported | EntryType::Invalid => {
                unreachable!("{} recorded as hashed", resolved)
            }
        }
    }

    pub fn record_unsupported(&mut self, path: &Path) {
        self.unsupported.push(path.to_path_buf());
    }

    pub fn record_invalid(&mut self, path: &Path) {
        self.invalid.push(path.to_path_buf());
    }

    pub fn record_ignored(&mut self, path: &Path) {
        self.ignored.push(path.to_path_buf());
    }

    pub fn num_total(&self) -> u64 {
        self.num_directories() + self.num_regulars() + self.num_devices() + self.num_symlinks()
    }

    pub fn num_directories(&self) -> u64 {
        self.directories.len() as u64
    }

    pub fn num_regulars(&self) -> u64 {
        self.regulars.len() as u64
    }

    pub fn num_devices(&self) -> u64 {
        self.devices.len() as u64
    }

    pub fn num_symlinks(&self) -> u64 {
        self.symlinks.len() as u64
    }

    pub fn written_total(&self) -> u64 {
        self.written_directory + self.written_regular + self.written_device + self.written_symlink
    }

    pub fn written_directory(&self) -> u64 {
        self.written_directory
    }

    pub fn written_regular(&self) -> u64 {
        self.written_regular
    }

    pub fn written_device(&self) -> u64 {
        self.written_device
    }

    pub fn written_symlink(&self) -> u64 {
        self.written_symlink
    }

    pub fn unsupported(&self) -> &[PathBuf] {
        &self.unsupported
    }

    pub fn invalid(&self) -> &[PathBuf] {
        &self.invalid
    }

    pub fn ignored(&self) -> &[PathBuf] {
        &self.ignored
    }
}

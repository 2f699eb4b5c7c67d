//! Filesystem access for resource loading

use std::io;
use std::path::Path;

/// Where resource bytes come from
///
/// Validation only asks whether a path exists; decoders read it afterwards.
pub trait AssetSource {
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads resources straight from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSource;

impl AssetSource for DiskSource {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

//! Drive-identifier resolution: ordered filesystem probe chain.

use std::path::{Path, PathBuf};

use super::DeviceResolver;

/// Resolves drive identifiers by probing stable-name directories in a
/// fixed preference order, falling back to the raw device node.
///
/// First existing candidate wins. A drive that resolves nowhere cannot
/// be addressed by the indicator tool and is dropped by the monitor.
#[derive(Debug, Clone)]
pub struct FsDeviceResolver {
    stable_roots: Vec<PathBuf>,
    dev_root: PathBuf,
}

impl Default for FsDeviceResolver {
    fn default() -> Self {
        Self {
            stable_roots: vec![
                PathBuf::from("/dev/disk/by-id"),
                PathBuf::from("/dev/disk/by-uuid"),
                PathBuf::from("/dev/disk/by-path"),
            ],
            dev_root: PathBuf::from("/dev"),
        }
    }
}

impl FsDeviceResolver {
    /// Probe under explicit roots. Order of `stable_roots` is the
    /// preference order; `dev_root` is the raw-name fallback.
    #[must_use]
    pub const fn with_roots(stable_roots: Vec<PathBuf>, dev_root: PathBuf) -> Self {
        Self {
            stable_roots,
            dev_root,
        }
    }
}

impl DeviceResolver for FsDeviceResolver {
    fn resolve(&self, drive_id: &str) -> Option<PathBuf> {
        // Identifiers that already look like paths are taken as-is.
        if Path::new(drive_id).is_absolute() {
            let path = PathBuf::from(drive_id);
            return path.exists().then_some(path);
        }

        for root in &self.stable_roots {
            let candidate = root.join(drive_id);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        let raw = self.dev_root.join(drive_id);
        raw.exists().then_some(raw)
    }
}

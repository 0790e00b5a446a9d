// Asset loading functionality

use super::{AssetError, AssetId, FrameHandle};
use log::warn;
use std::path::{Path, PathBuf};

/// Supported asset kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Level,
    Chapter,
}

impl AssetKind {
    /// Get the default directory for this asset kind
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Level => "levels",
            AssetKind::Chapter => "chapters",
        }
    }

    /// Get supported file extensions for this asset kind
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetKind::Image => &["png", "jpg", "jpeg"],
            AssetKind::Level => &["json"],
            AssetKind::Chapter => &["json", "txt"],
        }
    }
}

/// Asset loader responsible for finding asset files under a root directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a loader rooted at `base_path`
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, kind: AssetKind, name: &str) -> PathBuf {
        self.base_path.join(kind.default_directory()).join(name)
    }

    /// Check if an asset exists
    pub fn exists(&self, kind: AssetKind, name: &str) -> bool {
        self.resolve_path(kind, name).exists()
    }

    /// Read a text asset (level files, dialog scripts)
    pub fn read_to_string(&self, kind: AssetKind, name: &str) -> Result<String, AssetError> {
        let path = self.resolve_path(kind, name);
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        Ok(std::fs::read_to_string(&path)?)
    }

    /// Load every frame image in an image sub-directory, sorted by file name
    ///
    /// Frames that cannot be decoded are skipped with a warning. A directory
    /// with no usable frames is reported as missing.
    pub fn load_frames(&self, folder: &str) -> Result<Vec<FrameHandle>, AssetError> {
        let dir = self.resolve_path(AssetKind::Image, folder);
        if !dir.is_dir() {
            return Err(AssetError::NotFound(dir.display().to_string()));
        }

        let extensions = AssetKind::Image.extensions();
        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let matches = path
                .extension()
                .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && matches {
                paths.push(path);
            }
        }
        paths.sort();

        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            match image::image_dimensions(&path) {
                Ok((width, height)) => {
                    let relative = path.strip_prefix(&self.base_path).unwrap_or(&path);
                    let id = AssetId::from_path(&relative.to_string_lossy());
                    frames.push(FrameHandle::new(id, width, height));
                }
                Err(e) => warn!("Skipping unreadable frame {}: {}", path.display(), e),
            }
        }

        if frames.is_empty() {
            return Err(AssetError::Empty(dir.display().to_string()));
        }
        Ok(frames)
    }

    /// Load a frame set, substituting a single placeholder frame on failure
    pub fn load_frames_or_placeholder(&self, folder: &str) -> Vec<FrameHandle> {
        match self.load_frames(folder) {
            Ok(frames) => frames,
            Err(e) => {
                warn!("Using placeholder frames for '{}': {}", folder, e);
                vec![FrameHandle::PLACEHOLDER]
            }
        }
    }

    /// Root directory assets resolve against
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

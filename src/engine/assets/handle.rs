// Asset identifiers and frame handles

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Unique identifier for an asset, derived from its relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Reserved id for generated stand-in assets
    pub const PLACEHOLDER: AssetId = AssetId(0);

    /// Create a new asset ID from a relative path
    pub fn from_path(path: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        // Never collide with the placeholder id
        Self(hasher.finish().max(1))
    }

    /// Raw hash value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Check if this is the missing-asset id
    pub fn is_placeholder(&self) -> bool {
        *self == Self::PLACEHOLDER
    }
}

/// Handle to a single animation frame image
///
/// The core never touches pixels; it only passes handles through to the
/// renderer along with the mirroring flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle {
    pub id: AssetId,
    pub width: u32,
    pub height: u32,
}

impl FrameHandle {
    /// Magenta 128x128 square drawn when a frame set is missing
    pub const PLACEHOLDER: FrameHandle = FrameHandle {
        id: AssetId::PLACEHOLDER,
        width: 128,
        height: 128,
    };

    /// Create a handle for a decoded image
    pub fn new(id: AssetId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Check if the image fell back to the placeholder
    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }
}

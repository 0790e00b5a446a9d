// Asset lookup
//
// Resolves asset paths under the game's asset root and turns frame folders
// into frame handles. Missing content is replaced with placeholders instead of
// aborting.

mod handle;
mod loader;

pub use handle::{AssetId, FrameHandle};
pub use loader::{AssetKind, AssetLoader};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("No usable frames in: {0}")]
    Empty(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("levels/level_9.json".to_string());
        assert_eq!(err.to_string(), "Asset not found: levels/level_9.json");
    }
}

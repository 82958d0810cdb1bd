use super::AssetError;
use std::path::{Path, PathBuf};

/// Image formats the loader will decode
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Finds and decodes image files relative to the asset directory
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Full path of an asset given relative to the base directory
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.base_path.join(relative)
    }

    /// Read and decode an image asset
    pub fn load_image(&self, relative: &str) -> Result<image::DynamicImage, AssetError> {
        let path = self.resolve_path(relative);

        if !Self::is_image(&path) {
            return Err(AssetError::LoadError(format!(
                "{} is not a supported image",
                path.display()
            )));
        }
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        let bytes = std::fs::read(&path)?;
        image::load_from_memory(&bytes)
            .map_err(|e| AssetError::LoadError(format!("Failed to decode {}: {}", relative, e)))
    }

    fn is_image(path: &Path) -> bool {
        path.extension()
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_string_lossy().to_lowercase().as_str()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game/assets");
        let path = loader.resolve_path("animations/player/idle/0003.png");

        assert_eq!(
            path,
            PathBuf::from("/game/assets/animations/player/idle/0003.png")
        );
    }

    #[test]
    fn test_missing_image_is_not_found() {
        let loader = AssetLoader::new("/nonexistent-asset-root");
        let err = loader.load_image("animations/player/idle/0000.png").unwrap_err();

        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let loader = AssetLoader::new(".");
        let err = loader.load_image("levels/level_1.json").unwrap_err();

        assert!(matches!(err, AssetError::LoadError(_)));
    }

    #[test]
    fn test_image_extension_is_case_insensitive() {
        assert!(AssetLoader::is_image(Path::new("frame.PNG")));
        assert!(!AssetLoader::is_image(Path::new("frame")));
    }
}

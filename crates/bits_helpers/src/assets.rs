use std::path::PathBuf;

use bevy::asset::LoadState;
use bevy::asset::io::file::FileAssetReader;
use bevy::prelude::*;
use thiserror::Error;

use crate::ASSETS_DIR;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("Asset not found: {}", path.display())]
    Missing { path: PathBuf },
}

/// Resolves relative asset paths against the on-disk asset directory.
///
/// Used where a caller must know up front whether an optional file exists,
/// instead of waiting for the asset server to report a failed load.
#[derive(Resource, Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self::new(FileAssetReader::get_base_path().join(ASSETS_DIR))
    }
}

impl AssetCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, relative: &str) -> Result<PathBuf, AssetError> {
        let path = self.root.join(relative);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::Missing { path })
        }
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.resolve(relative).is_ok()
    }
}

/// What to show when a sprite's image fails to load.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum ImageFallback {
    /// Solid rectangle of this color, keeping the sprite's size
    Placeholder(Color),
    /// The image is optional decoration
    Hide,
}

pub struct AssetFallbackPlugin;

impl Plugin for AssetFallbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetCatalog>()
            .add_systems(Update, (apply_image_fallbacks, apply_font_fallbacks));
    }
}

fn apply_image_fallbacks(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut sprites: Query<(Entity, &mut Sprite, &mut Visibility, &ImageFallback)>,
) {
    for (entity, mut sprite, mut visibility, fallback) in &mut sprites {
        match asset_server.get_load_state(sprite.image.id()) {
            Some(LoadState::Failed(err)) => {
                match *fallback {
                    ImageFallback::Placeholder(color) => {
                        warn!("Image unavailable, drawing a placeholder: {err}");
                        sprite.image = Handle::default();
                        sprite.color = color;
                    }
                    ImageFallback::Hide => {
                        warn!("Image unavailable, hiding it: {err}");
                        *visibility = Visibility::Hidden;
                    }
                }
                commands.entity(entity).remove::<ImageFallback>();
            }
            Some(LoadState::Loaded) => {
                commands.entity(entity).remove::<ImageFallback>();
            }
            _ => {}
        }
    }
}

// Handle::default() is Bevy's embedded font, which is always available.
fn apply_font_fallbacks(asset_server: Res<AssetServer>, mut fonts: Query<&mut TextFont>) {
    for mut text_font in &mut fonts {
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(text_font.font.id()) {
            warn!("Font unavailable, using the default font: {err}");
            text_font.font = Handle::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bits_helpers_{name}_{}", std::process::id()));
        fs::create_dir_all(dir.join("sounds")).expect("scratch dir should be creatable");
        dir
    }

    #[test]
    fn resolves_existing_files() {
        let root = scratch_dir("resolve");
        fs::write(root.join("sounds/intro.ogg"), b"").expect("file should be writable");

        let catalog = AssetCatalog::new(&root);
        assert_eq!(
            catalog.resolve("sounds/intro.ogg"),
            Ok(root.join("sounds/intro.ogg")),
            "existing file resolves to its full path"
        );
        assert!(catalog.contains("sounds/intro.ogg"), "existing file is listed");

        fs::remove_dir_all(root).ok();
    }

    #[test]
    fn reports_missing_files_and_directories() {
        let root = scratch_dir("missing");
        let catalog = AssetCatalog::new(&root);

        assert_eq!(
            catalog.resolve("sounds/absent.ogg"),
            Err(AssetError::Missing {
                path: root.join("sounds/absent.ogg")
            }),
            "absent file is reported with its path"
        );
        assert!(!catalog.contains("sounds"), "a directory is not an asset");

        fs::remove_dir_all(root).ok();
    }
}

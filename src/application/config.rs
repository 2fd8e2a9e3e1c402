use {
    crate::demo::SceneKind,
    std::{ffi::OsString, path::PathBuf},
};

/// Overrides the directory models and textures are loaded from.
pub const ASSETS_ENV_VAR: &str = "VK_FRAMES_ASSETS";

const DEFAULT_ASSET_DIR: &str = "assets";

/// Startup settings for a demo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub scene: SceneKind,
    pub asset_dir: PathBuf,

    /// Where build.rs writes the compiled shaders.
    pub shader_dir: PathBuf,

    /// Enable the Khronos validation layer and log its messages.
    pub enable_validation: bool,

    /// Cap the frame rate. Uncapped when `None`.
    pub fps_limit: Option<u32>,
}

impl AppConfig {
    /// The default configuration for the given scene.
    pub fn for_scene(scene: SceneKind) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Vulkan".to_owned(),
            width: 800,
            height: 600,
            resizable: true,
            scene: SceneKind::Triangle,
            asset_dir: asset_dir_from(std::env::var_os(ASSETS_ENV_VAR)),
            shader_dir: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/shaders"
            )),
            enable_validation: cfg!(debug_assertions),
            fps_limit: None,
        }
    }
}

/// An empty override is ignored.
fn asset_dir_from(value: Option<OsString>) -> PathBuf {
    match value {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_ASSET_DIR),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn asset_dir_defaults_to_assets() {
        assert_eq!(asset_dir_from(None), PathBuf::from("assets"));
        assert_eq!(asset_dir_from(Some("".into())), PathBuf::from("assets"));
    }

    #[test]
    fn asset_dir_uses_the_override() {
        assert_eq!(
            asset_dir_from(Some("/tmp/models".into())),
            PathBuf::from("/tmp/models")
        );
    }

    #[test]
    fn window_defaults_match_the_demo() {
        let config = AppConfig::for_scene(SceneKind::Quad);
        assert_eq!(config.title, "Vulkan");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(config.resizable);
        assert_eq!(config.scene, SceneKind::Quad);
        assert_eq!(config.fps_limit, None);
        assert!(config.shader_dir.ends_with("shaders"));
    }
}

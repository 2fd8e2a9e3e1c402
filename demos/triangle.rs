use {
    anyhow::Result,
    vk_frames::{
        application::{AppConfig, Application},
        demo::{SceneDemo, SceneKind},
    },
};

fn main() -> Result<()> {
    Application::<SceneDemo>::run(AppConfig::for_scene(SceneKind::Triangle))
}

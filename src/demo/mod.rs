//! The three demo scenes and the renderer which draws them.
//!
//! [DemoRenderer] owns every resource a scene needs and implements
//! [crate::graphics::FrameBackend], so a
//! [crate::graphics::FrameExecutor] can drive it one frame at a time.

mod descriptors;
mod model;
mod pipeline;
mod renderer;
mod scene;
mod scene_demo;
mod textures;
mod uniforms;
mod vertex;

pub use self::{
    descriptors::SceneDescriptors,
    model::{load_obj, parse_obj, Mesh},
    pipeline::{
        create_descriptor_set_layout, create_render_pass, ScenePipeline,
        ShaderBytes,
    },
    renderer::{DemoRenderer, SceneSetup},
    scene::{
        DemoScene, SceneKind, QUAD_INDICES, QUAD_VERTICES, TRIANGLE_DRAW_COUNT,
        TRIANGLE_VERTICES,
    },
    scene_demo::SceneDemo,
    textures::{load_scene_texture, scene_pixels, Pixels},
    uniforms::UniformMvp,
    vertex::Vertex,
};

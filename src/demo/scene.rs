use {
    crate::{
        demo::{model, Vertex},
        graphics::{
            vulkan_api::{
                create_device_local_buffer, Buffer, OneTimeSubmitCommandPool,
                RenderDevice,
            },
            GraphicsError,
        },
    },
    ash::vk,
    std::{path::Path, sync::Arc},
};

/// The model drawn by the Model scene, relative to the asset directory.
pub const MODEL_FILE: &str = "viking_room.obj";

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Two stacked triangles. Only the first is drawn.
pub const TRIANGLE_VERTICES: [Vertex; 6] = [
    Vertex::new([-0.5, 0.5, 0.0], RED, [0.0, 1.0]),
    Vertex::new([0.0, -0.5, 0.0], GREEN, [0.5, 0.0]),
    Vertex::new([0.5, 0.5, 0.0], BLUE, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, -0.5], RED, [0.0, 1.0]),
    Vertex::new([0.0, -0.5, -0.5], GREEN, [0.5, 0.0]),
    Vertex::new([0.5, 0.5, -0.5], BLUE, [1.0, 1.0]),
];

pub const TRIANGLE_DRAW_COUNT: u32 = 3;

/// Two textured quads, one half a unit below the other.
pub const QUAD_VERTICES: [Vertex; 8] = [
    Vertex::new([-0.5, -0.5, 0.0], RED, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.0], GREEN, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.0], BLUE, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.0], WHITE, [0.0, 1.0]),
    Vertex::new([-0.5, -0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, -0.5], GREEN, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, -0.5], BLUE, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, -0.5], WHITE, [0.0, 1.0]),
];

pub const QUAD_INDICES: [u32; 12] = [0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4];

/// Which scene a demo renders.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneKind {
    Triangle,
    Quad,
    Model,
}

impl std::fmt::Display for SceneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SceneKind::Triangle => "Triangle",
            SceneKind::Quad => "Quad",
            SceneKind::Model => "Model",
        };
        f.write_str(name)
    }
}

/// The geometry for one scene, resident in device-local buffers.
///
/// Chosen once at startup. Recording only binds what the variant carries.
#[derive(Debug)]
pub enum DemoScene {
    Triangle {
        vertices: Buffer,
        vertex_count: u32,
    },
    Quad {
        vertices: Buffer,
        indices: Buffer,
        index_count: u32,
    },
    Model {
        vertices: Buffer,
        indices: Buffer,
        index_count: u32,
    },
}

impl DemoScene {
    /// Upload the geometry for `kind`. The Model scene reads its OBJ from
    /// `asset_dir`.
    ///
    /// # Safety
    ///
    /// Unsafe because the scene must be dropped before the render device.
    pub unsafe fn load(
        render_device: Arc<RenderDevice>,
        one_time_submit: &OneTimeSubmitCommandPool,
        kind: SceneKind,
        asset_dir: &Path,
    ) -> Result<Self, GraphicsError> {
        let upload_vertices = |vertices: &[Vertex]| {
            let buffer = create_device_local_buffer(
                render_device.clone(),
                one_time_submit,
                vk::BufferUsageFlags::VERTEX_BUFFER,
                vertices,
            )?;
            buffer.set_debug_name(format!("{kind} Vertices"));
            Ok::<Buffer, GraphicsError>(buffer)
        };
        let upload_indices = |indices: &[u32]| {
            let buffer = create_device_local_buffer(
                render_device.clone(),
                one_time_submit,
                vk::BufferUsageFlags::INDEX_BUFFER,
                indices,
            )?;
            buffer.set_debug_name(format!("{kind} Indices"));
            Ok::<Buffer, GraphicsError>(buffer)
        };

        let scene = match kind {
            SceneKind::Triangle => DemoScene::Triangle {
                vertices: upload_vertices(&TRIANGLE_VERTICES)?,
                vertex_count: TRIANGLE_DRAW_COUNT,
            },
            SceneKind::Quad => DemoScene::Quad {
                vertices: upload_vertices(&QUAD_VERTICES)?,
                indices: upload_indices(&QUAD_INDICES)?,
                index_count: QUAD_INDICES.len() as u32,
            },
            SceneKind::Model => {
                let mesh = model::load_obj(&asset_dir.join(MODEL_FILE))?;
                DemoScene::Model {
                    vertices: upload_vertices(&mesh.vertices)?,
                    indices: upload_indices(&mesh.indices)?,
                    index_count: mesh.indices.len() as u32,
                }
            }
        };
        log::info!("Loaded the {kind} scene");
        Ok(scene)
    }

    pub fn kind(&self) -> SceneKind {
        match self {
            DemoScene::Triangle { .. } => SceneKind::Triangle,
            DemoScene::Quad { .. } => SceneKind::Quad,
            DemoScene::Model { .. } => SceneKind::Model,
        }
    }

    /// Bind the scene's buffers and issue its draw.
    ///
    /// # Safety
    ///
    /// Unsafe because the command buffer must be recording inside a render
    /// pass with a compatible pipeline bound.
    pub unsafe fn cmd_draw(
        &self,
        device: &ash::Device,
        command_buffer: vk::CommandBuffer,
    ) {
        match self {
            DemoScene::Triangle {
                vertices,
                vertex_count,
            } => {
                device.cmd_bind_vertex_buffers(
                    command_buffer,
                    0,
                    &[vertices.raw()],
                    &[0],
                );
                device.cmd_draw(command_buffer, *vertex_count, 1, 0, 0);
            }
            DemoScene::Quad {
                vertices,
                indices,
                index_count,
            }
            | DemoScene::Model {
                vertices,
                indices,
                index_count,
            } => {
                device.cmd_bind_vertex_buffers(
                    command_buffer,
                    0,
                    &[vertices.raw()],
                    &[0],
                );
                device.cmd_bind_index_buffer(
                    command_buffer,
                    indices.raw(),
                    0,
                    vk::IndexType::UINT32,
                );
                device.cmd_draw_indexed(
                    command_buffer,
                    *index_count,
                    1,
                    0,
                    0,
                    0,
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_draws_only_the_front_layer() {
        let drawn = &TRIANGLE_VERTICES[..TRIANGLE_DRAW_COUNT as usize];
        assert!(drawn.iter().all(|vertex| vertex.pos[2] == 0.0));
        assert!(TRIANGLE_VERTICES[3..]
            .iter()
            .all(|vertex| vertex.pos[2] == -0.5));
    }

    #[test]
    fn quad_indices_stay_in_bounds() {
        assert!(QUAD_INDICES
            .iter()
            .all(|&index| (index as usize) < QUAD_VERTICES.len()));
        assert_eq!(QUAD_INDICES.len() % 3, 0);
    }

    #[test]
    fn each_quad_layer_uses_its_own_vertices() {
        let (front, back) = QUAD_INDICES.split_at(6);
        assert!(front.iter().all(|&index| index < 4));
        assert!(back.iter().all(|&index| index >= 4));
        for &index in back {
            assert_eq!(QUAD_VERTICES[index as usize].pos[2], -0.5);
        }
    }

    #[test]
    fn quad_corners_span_the_whole_texture() {
        let uvs: Vec<[f32; 2]> =
            QUAD_VERTICES[..4].iter().map(|vertex| vertex.uv).collect();
        assert_eq!(uvs, vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
    }
}

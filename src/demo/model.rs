use {
    crate::{demo::Vertex, graphics::GraphicsError},
    std::{
        collections::HashMap,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// Vertices and triangle-list indices for a loaded mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Load every shape in a Wavefront OBJ file as one mesh.
pub fn load_obj(path: &Path) -> Result<Mesh, GraphicsError> {
    let file = File::open(path).map_err(|source| GraphicsError::AssetIo {
        path: path.to_owned(),
        source,
    })?;
    parse_obj(&mut BufReader::new(file), path)
}

/// Parse OBJ text into a mesh. Faces are triangulated, V is flipped to match
/// Vulkan's texture origin and identical vertices are shared.
///
/// Materials are ignored, every vertex is white.
pub fn parse_obj(
    reader: &mut impl BufRead,
    path: &Path,
) -> Result<Mesh, GraphicsError> {
    let (models, _materials) = tobj::load_obj_buf(
        reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )
    .map_err(|source| GraphicsError::ModelLoad {
        path: path.to_owned(),
        source,
    })?;

    let mut mesh = Mesh::default();
    let mut unique_vertices = HashMap::new();
    for model in &models {
        let positions = &model.mesh.positions;
        let texcoords = &model.mesh.texcoords;
        if texcoords.is_empty() && !model.mesh.indices.is_empty() {
            return Err(GraphicsError::ModelMissingTexCoords {
                path: path.to_owned(),
            });
        }

        for &index in &model.mesh.indices {
            let vertex = mesh_vertex(positions, texcoords, index as usize)
                .ok_or_else(|| GraphicsError::ModelMissingTexCoords {
                    path: path.to_owned(),
                })?;

            let next_index = mesh.vertices.len() as u32;
            let shared = *unique_vertices
                .entry(vertex_key(&vertex))
                .or_insert(next_index);
            if shared == next_index {
                mesh.vertices.push(vertex);
            }
            mesh.indices.push(shared);
        }
    }

    log::debug!(
        "Loaded {:?}: {} vertices, {} indices",
        path,
        mesh.vertices.len(),
        mesh.indices.len()
    );
    Ok(mesh)
}

/// The white vertex at `index`, or None when the mesh has fewer positions
/// or texture coordinates than its indices refer to. That happens when only
/// some faces carry texture coordinates.
fn mesh_vertex(
    positions: &[f32],
    texcoords: &[f32],
    index: usize,
) -> Option<Vertex> {
    let pos = positions.get(3 * index..3 * index + 3)?;
    let uv = texcoords.get(2 * index..2 * index + 2)?;
    Some(Vertex::new(
        [pos[0], pos[1], pos[2]],
        [1.0, 1.0, 1.0],
        [uv[0], 1.0 - uv[1]],
    ))
}

/// Floats aren't Hash, so vertices are keyed by their bit patterns. Color is
/// constant for loaded meshes and is left out.
fn vertex_key(vertex: &Vertex) -> [u32; 5] {
    [
        vertex.pos[0].to_bits(),
        vertex.pos[1].to_bits(),
        vertex.pos[2].to_bits(),
        vertex.uv[0].to_bits(),
        vertex.uv[1].to_bits(),
    ]
}

#[cfg(test)]
mod test {
    use {super::*, std::io::Cursor};

    const TWO_TRIANGLE_QUAD: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3
f 3/3 4/4 1/1
";

    fn parse(source: &str) -> Result<Mesh, GraphicsError> {
        parse_obj(&mut Cursor::new(source), Path::new("memory.obj"))
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        let mesh = parse(TWO_TRIANGLE_QUAD).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.indices[2], mesh.indices[3]);
        assert_eq!(mesh.indices[0], mesh.indices[5]);
    }

    #[test]
    fn texture_v_is_flipped_and_color_is_white() {
        let mesh = parse(TWO_TRIANGLE_QUAD).unwrap();
        let first = mesh.vertices[mesh.indices[0] as usize];
        assert_eq!(first.uv, [0.0, 1.0]);
        assert_eq!(first.color, [1.0, 1.0, 1.0]);
        let third = mesh.vertices[mesh.indices[2] as usize];
        assert_eq!(third.uv, [1.0, 0.0]);
    }

    #[test]
    fn polygons_are_triangulated() {
        let quad_face = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
f 1/1 2/2 3/3 4/4
";
        let mesh = parse(quad_face).unwrap();
        assert_eq!(mesh.indices.len(), 6);
        assert_eq!(mesh.vertices.len(), 4);
    }

    #[test]
    fn missing_texture_coordinates_are_an_error() {
        let result = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
        assert!(matches!(
            result,
            Err(GraphicsError::ModelMissingTexCoords { .. })
        ));
    }

    #[test]
    fn faces_without_texture_coordinates_are_an_error() {
        let partial = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
f 1/1 2/2 3/3
f 1 3 4
";
        let result = parse(partial);
        assert!(
            matches!(
                result,
                Err(GraphicsError::ModelMissingTexCoords { .. })
                    | Err(GraphicsError::ModelLoad { .. })
            ),
            "unexpected result {result:?}"
        );
    }

    #[test]
    fn short_attribute_arrays_have_no_vertex() {
        let positions = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let texcoords = [0.25, 0.75];

        let vertex = mesh_vertex(&positions, &texcoords, 0).unwrap();
        assert_eq!(vertex.pos, [0.0, 1.0, 2.0]);
        assert_eq!(vertex.uv, [0.25, 0.25]);

        assert_eq!(mesh_vertex(&positions, &texcoords, 1), None);
        assert_eq!(mesh_vertex(&positions, &[], 0), None);
        assert_eq!(mesh_vertex(&[0.0, 1.0], &texcoords, 0), None);
    }

    #[test]
    fn missing_files_report_the_path() {
        let result = load_obj(Path::new("does/not/exist.obj"));
        match result {
            Err(GraphicsError::AssetIo { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist.obj"))
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}

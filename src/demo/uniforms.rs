use {
    crate::math::{look_at, projections::perspective, rotation_about_z, Mat4, Vec3},
    ash::vk,
    std::time::Duration,
};

/// The per-frame transforms read by the vertex shader.
///
/// nalgebra matrices are column-major, which is what GLSL expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformMvp {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl UniformMvp {
    /// The transforms for a frame rendered `elapsed` after startup into a
    /// swapchain of the given size.
    ///
    /// The model spins about +Z, faster as time goes on.
    pub fn at(elapsed: Duration, extent: vk::Extent2D) -> Self {
        let t = elapsed.as_secs_f32();
        let aspect = extent.width as f32 / extent.height.max(1) as f32;

        let mut projection =
            perspective(45f32.to_radians(), aspect, 0.1, 100.0);
        projection[(1, 1)] *= -1.0;

        Self {
            model: rotation_about_z(t * t.to_radians()),
            view: look_at(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros(), Vec3::z()),
            projection,
        }
    }
}

#[cfg(test)]
mod test {
    use {super::*, nalgebra::Vector4};

    fn extent(width: u32, height: u32) -> vk::Extent2D {
        vk::Extent2D { width, height }
    }

    #[test]
    fn model_is_identity_at_startup() {
        let mvp = UniformMvp::at(Duration::ZERO, extent(800, 600));
        assert!((mvp.model - Mat4::identity()).norm() < 1e-6);
    }

    #[test]
    fn projection_flips_y_for_vulkan() {
        let mvp = UniformMvp::at(Duration::from_secs(1), extent(800, 600));
        assert!(mvp.projection[(1, 1)] < 0.0);
        assert!(mvp.projection[(0, 0)] > 0.0);
        let ratio = -mvp.projection[(1, 1)] / mvp.projection[(0, 0)];
        assert!((ratio - 800.0 / 600.0).abs() < 1e-5);
    }

    #[test]
    fn origin_lands_in_the_middle_of_the_screen() {
        let mvp = UniformMvp::at(Duration::from_secs(3), extent(1024, 768));
        let clip = mvp.projection
            * mvp.view
            * mvp.model
            * Vector4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn uniform_layout_matches_three_mat4s() {
        assert_eq!(std::mem::size_of::<UniformMvp>(), 3 * 64);
    }
}

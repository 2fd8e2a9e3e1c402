use nalgebra::{Point3, Unit};

pub type Mat4 = nalgebra::Matrix4<f32>;
pub type Vec3 = nalgebra::Vector3<f32>;

pub mod projections {
    use super::Mat4;

    /// Build a right-handed perspective projection which maps view-space
    /// depth into Vulkan's [0, 1] range.
    ///
    /// * `fov_y` - vertical field of view in radians
    /// * `aspect` - width / height of the render target
    ///
    /// Clip-space Y still points up. Vulkan's Y axis points down, so callers
    /// flip the sign of the `(1, 1)` element when that matters.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let focal = 1.0 / (fov_y / 2.0).tan();
        let mz = far / (near - far);
        let bz = -(far * near) / (far - near);
        Mat4::new(
            focal / aspect, 0.0, 0.0, 0.0, //
            0.0, focal, 0.0, 0.0, //
            0.0, 0.0, mz, bz, //
            0.0, 0.0, -1.0, 0.0,
        )
    }
}

/// A right-handed view matrix looking from `eye` toward `target`.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
}

/// A rotation of `angle` radians about the +Z axis.
pub fn rotation_about_z(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(&Unit::new_unchecked(Vec3::z()), angle)
}

#[cfg(test)]
mod test {
    use {
        super::{projections::*, *},
        nalgebra::Vector4,
    };

    fn ndc(m: &Mat4, p: Vector4<f32>) -> Vector4<f32> {
        let clip = m * p;
        clip / clip.w
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_vulkan_depth() {
        let proj = perspective(std::f32::consts::FRAC_PI_4, 1.5, 0.1, 100.0);

        let near = ndc(&proj, Vector4::new(0.0, 0.0, -0.1, 1.0));
        let far = ndc(&proj, Vector4::new(0.0, 0.0, -100.0, 1.0));

        assert!(near.z.abs() < 1e-5, "near z was {}", near.z);
        assert!((far.z - 1.0).abs() < 1e-5, "far z was {}", far.z);
    }

    #[test]
    fn perspective_accounts_for_aspect_ratio() {
        let proj = perspective(std::f32::consts::FRAC_PI_2, 2.0, 0.1, 10.0);
        assert!((proj[(0, 0)] - 0.5).abs() < 1e-6);
        assert!((proj[(1, 1)] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn look_at_moves_the_eye_to_the_origin() {
        let view = look_at(Vec3::new(2.0, 2.0, 2.0), Vec3::zeros(), Vec3::z());
        let eye = view * Vector4::new(2.0, 2.0, 2.0, 1.0);
        assert!(eye.xyz().norm() < 1e-5);

        let target = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(target.z < 0.0, "the target should be in front of the eye");
    }

    #[test]
    fn rotation_about_z_keeps_z_fixed() {
        let rotation = rotation_about_z(std::f32::consts::FRAC_PI_2);
        let x = rotation * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((x.y - 1.0).abs() < 1e-6);
        assert!(x.x.abs() < 1e-6);

        let z = rotation * Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert!((z.z - 1.0).abs() < 1e-6);
    }
}

//! Viewer/look-at camera, projection and the camera uniform.
//!
//! The camera is two free points rather than a position plus angles: moving
//! slides both along the line between them, looking around swings the look-at
//! point around the viewer.

use cgmath::{InnerSpace, Matrix3, Matrix4, MetricSpace, Point3, Rad, Vector3};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    viewer: Point3<f32>,
    look_at: Point3<f32>,
}

impl Camera {
    pub fn new(viewer: Point3<f32>, look_at: Point3<f32>) -> Self {
        assert!(
            viewer != look_at,
            "the viewer must not coincide with the look-at point"
        );
        Self { viewer, look_at }
    }

    pub fn viewer(&self) -> Point3<f32> {
        self.viewer
    }

    pub fn look_at(&self) -> Point3<f32> {
        self.look_at
    }

    /// Unit vector from the viewer towards the look-at point.
    pub fn direction(&self) -> Vector3<f32> {
        (self.look_at - self.viewer).normalize()
    }

    pub fn distance(&self) -> f32 {
        self.viewer.distance(self.look_at)
    }

    /// Step one unit along the view direction. Both points move, so the view
    /// direction and the viewer/look-at distance are unchanged.
    pub fn move_along_view(&mut self, direction: Direction) {
        let step = match direction {
            Direction::Forward => self.direction(),
            Direction::Backward => -self.direction(),
        };
        self.viewer += step;
        self.look_at += step;
    }

    /// Swing the look-at point around the viewer.
    ///
    /// Horizontal drag yaws around world up, vertical drag then pitches around
    /// world right; `sensitivity` is the drag distance per radian. The
    /// viewer/look-at distance is kept.
    pub fn orbit(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let yaw = Matrix3::from_angle_y(Rad(-dx / sensitivity));
        let pitch = Matrix3::from_angle_x(Rad(-dy / sensitivity));
        let rotated = pitch * (yaw * self.direction());
        let look_at = self.viewer + rotated * self.distance();
        if look_at != self.viewer {
            self.look_at = look_at;
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.viewer, self.look_at, Vector3::unit_y())
    }
}

/// Perspective frustum spanning [-aspect, aspect] x [-1, 1] at the near plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    aspect: f32,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new(width: u32, height: u32, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX
            * cgmath::frustum(-self.aspect, self.aspect, -1.0, 1.0, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.viewer().to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct CameraResources {
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn update(&mut self, queue: &wgpu::Queue, camera: &Camera, projection: &Projection) {
        self.uniform.update_view_proj(camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

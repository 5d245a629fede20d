//! Core rendering functions
//! Projection, line drawing and scanline triangle filling into an owned frame

use std::collections::TryReserveError;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::camera::Camera;
use super::lighting::{ShadingInput, ShadingModel};
use super::math::{lerp, Vec3};
use super::matrix::Mat4;
use super::types::{Color, Mesh, ProjectedVertex, RenderMode, RenderSettings, Vertex};

/// Depth every cell is reset to by [`Device::clear`]
pub const DEPTH_CLEAR: f32 = f32::INFINITY;

/// Failure to build a [`Device`]
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("invalid resolution {width}x{height}")]
    EmptyResolution { width: usize, height: usize },
    #[error("resolution {width}x{height} overflows the buffer size")]
    TooLarge { width: usize, height: usize },
    #[error("failed to allocate frame buffers: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Software rasterizer: owns a BGRA color buffer and a depth buffer of the same size.
///
/// Both buffers are allocated once in [`Device::new`]. A resolution change means
/// building a new device.
pub struct Device {
    back_buffer: Vec<u8>,    // BGRA, 4 bytes per pixel
    depth_buffer: Vec<f32>,
    width: usize,
    height: usize,
}

/// Read-only view of a finished frame
#[derive(Clone, Copy)]
pub struct FrameView<'a> {
    bytes: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> FrameView<'a> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width * 4
    }

    /// Raw B,G,R,A bytes, row-major
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut bgra = [0u8; 4];
        bgra.copy_from_slice(&self.bytes[idx..idx + 4]);
        Some(Color::from_bgra(bgra))
    }

    /// Swizzle into R,G,B,A order for texture upload or image export
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.bytes.len());
        for bgra in self.bytes.chunks_exact(4) {
            let color = Color::from_bgra([bgra[0], bgra[1], bgra[2], bgra[3]]);
            rgba.extend_from_slice(&color.to_rgba());
        }
        rgba
    }
}

/// One side of a scanline span, walked from `start` to `end` in screen Y
struct Edge {
    start: Vec3,
    end: Vec3,
    start_reflectivity: f32,
    end_reflectivity: f32,
}

impl Edge {
    fn new(start: Vec3, end: Vec3, start_reflectivity: f32, end_reflectivity: f32) -> Self {
        Self { start, end, start_reflectivity, end_reflectivity }
    }

    /// Position of scanline `y` along the edge.
    /// Horizontal edges report 1 so the span collapses onto the end point.
    fn gradient(&self, y: f32) -> f32 {
        if self.start.y != self.end.y {
            (y - self.start.y) / (self.end.y - self.start.y)
        } else {
            1.0
        }
    }
}

/// X step per unit of Y from `from` to `to`, zero for a horizontal edge
fn inverse_slope(from: Vec3, to: Vec3) -> f32 {
    if to.y - from.y > 0.0 {
        (to.x - from.x) / (to.y - from.y)
    } else {
        0.0
    }
}

/// Steps `i` in `0..=len` for which `start + step * i` lies in `0..size`
fn clip_steps(start: i64, step: i64, len: i64, size: i64) -> RangeInclusive<i64> {
    if step > 0 {
        (-start).max(0)..=(size - 1 - start).min(len)
    } else {
        (start - (size - 1)).max(0)..=start.min(len)
    }
}

/// Minor-axis offset after `i` major steps: `i * minor / major` rounded half up,
/// the pixel nearest the true line at that step
fn minor_offset(i: i64, minor: i64, major: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let (i, minor, major) = (i as i128, minor as i128, major as i128);
    ((2 * i * minor + major) / (2 * major)) as i64
}

impl Device {
    pub fn new(width: usize, height: usize) -> Result<Self, DeviceError> {
        if width == 0 || height == 0 {
            return Err(DeviceError::EmptyResolution { width, height });
        }
        let pixel_count = width
            .checked_mul(height)
            .ok_or(DeviceError::TooLarge { width, height })?;
        let byte_count = pixel_count
            .checked_mul(4)
            .ok_or(DeviceError::TooLarge { width, height })?;

        let mut back_buffer = Vec::new();
        back_buffer.try_reserve_exact(byte_count)?;
        back_buffer.resize(byte_count, 0);

        let mut depth_buffer = Vec::new();
        depth_buffer.try_reserve_exact(pixel_count)?;
        depth_buffer.resize(pixel_count, DEPTH_CLEAR);

        log::debug!("created {}x{} device", width, height);

        Ok(Self {
            back_buffer,
            depth_buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill the color buffer with `color` and reset every depth cell
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bgra();
        for pixel in self.back_buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    /// The finished frame, for the presentation layer to copy out
    pub fn present(&self) -> FrameView<'_> {
        FrameView {
            bytes: &self.back_buffer,
            width: self.width,
            height: self.height,
        }
    }

    /// Stored depth at a pixel, `None` outside the buffer
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depth_buffer[y * self.width + x])
        } else {
            None
        }
    }

    /// Draw every mesh as seen from `camera`
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh], settings: &RenderSettings) {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let shading = settings.mode.shading();
        let with_lighting = settings.mode.needs_lighting();

        for mesh in meshes {
            let world = Mat4::rotation_yaw_pitch_roll(mesh.rotation.y, mesh.rotation.x, mesh.rotation.z)
                * Mat4::translation(mesh.position);
            let transform = world * view * projection;

            for face in mesh.faces.iter() {
                let [v1, v2, v3] = face
                    .indices()
                    .map(|i| self.project(&mesh.vertices[i], &world, &transform, with_lighting));

                match (settings.mode, shading) {
                    (_, Some(model)) => {
                        self.draw_triangle(v1, v2, v3, settings.surface_color, model, settings.light_position);
                    }
                    (RenderMode::Point, None) => {
                        self.draw_point(v1.screen, settings.point_color);
                        self.draw_point(v2.screen, settings.point_color);
                        self.draw_point(v3.screen, settings.point_color);
                    }
                    (_, None) => {
                        self.draw_line(v1.screen, v2.screen, settings.line_color);
                        self.draw_line(v2.screen, v3.screen, settings.line_color);
                        self.draw_line(v3.screen, v1.screen, settings.line_color);
                    }
                }
            }
        }
    }

    /// Project a mesh vertex to screen space.
    ///
    /// `transform` is world * view * projection. When `with_lighting` is set the
    /// world-space position and normal are filled in as well. The normal goes through
    /// the full world matrix (translation included), which is only exact for meshes
    /// without non-uniform scale.
    pub fn project(&self, vertex: &Vertex, world: &Mat4, transform: &Mat4, with_lighting: bool) -> ProjectedVertex {
        let point = transform.transform_point(vertex.coordinates);

        // NDC has +Y up, screen row 0 is the top
        let w = self.width as f32;
        let h = self.height as f32;
        let screen = Vec3::new(point.x * w + w / 2.0, -point.y * h + h / 2.0, point.z);

        if !with_lighting {
            return ProjectedVertex { screen, ..ProjectedVertex::default() };
        }

        ProjectedVertex {
            screen,
            world_coordinates: world.transform_point(vertex.coordinates),
            world_normal: world.transform_point(vertex.normal),
        }
    }

    /// Write a pixel without consulting the depth buffer
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x < self.width && y < self.height {
            let idx = (y * self.width + x) * 4;
            self.back_buffer[idx..idx + 4].copy_from_slice(&color.to_bgra());
        }
    }

    /// Depth-tested pixel write. Returns false if the pixel is off screen or an
    /// equal-or-nearer value is already stored there.
    pub fn put_pixel(&mut self, x: usize, y: usize, z: f32, color: Color) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y * self.width + x;
        if self.depth_buffer[idx] <= z {
            return false;
        }
        self.depth_buffer[idx] = z;
        let pixel_idx = idx * 4;
        self.back_buffer[pixel_idx..pixel_idx + 4].copy_from_slice(&color.to_bgra());
        true
    }

    /// Plot a single screen point, culled if it falls outside the frame
    pub fn draw_point(&mut self, point: Vec3, color: Color) {
        if point.x >= 0.0 && point.y >= 0.0 && point.x < self.width as f32 && point.y < self.height as f32 {
            self.set_pixel(point.x as usize, point.y as usize, color);
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Draw a line between two screen points using Bresenham's algorithm.
    /// Depth is ignored; off-screen pixels are skipped.
    pub fn draw_line(&mut self, from: Vec3, to: Vec3, color: Color) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }

        // Always walk top to bottom so both endpoint orders give the same pixels
        let (mut x0, mut y0, mut x1, mut y1) = (
            from.x as i32 as i64,
            from.y as i32 as i64,
            to.x as i32 as i64,
            to.y as i32 as i64,
        );
        if (y1, x1) < (y0, x0) {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = (x1 - x0).abs();
        let dy = y1 - y0;
        let sx = if x1 < x0 { -1 } else { 1 };
        let width = self.width as i64;
        let height = self.height as i64;

        // One pixel per step along the major axis. Steps are clipped to the frame before
        // the walk and the minor coordinate comes from the step index, so a clipped line
        // keeps exactly the on-screen pixels of the full line.
        if dx >= dy {
            for i in clip_steps(x0, sx, dx, width) {
                let y = y0 + minor_offset(i, dy, dx);
                if y >= height {
                    break;
                }
                self.plot(x0 + sx * i, y, color);
            }
        } else {
            for i in clip_steps(y0, 1, dy, height) {
                self.plot(x0 + sx * minor_offset(i, dx, dy), y0 + i, color);
            }
        }
    }

    /// Fill a triangle scanline by scanline with depth testing and diffuse shading
    pub fn draw_triangle(
        &mut self,
        mut v1: ProjectedVertex,
        mut v2: ProjectedVertex,
        mut v3: ProjectedVertex,
        color: Color,
        model: ShadingModel,
        light_position: Vec3,
    ) {
        // Sort so v1 is the top vertex and v3 the bottom one
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        if v2.screen.y > v3.screen.y {
            std::mem::swap(&mut v2, &mut v3);
        }
        if v1.screen.y > v2.screen.y {
            std::mem::swap(&mut v1, &mut v2);
        }

        let shading = model.input(&v1, &v2, &v3, light_position);
        let [r1, r2, r3] = shading.per_vertex();
        let (p1, p2, p3) = (v1.screen, v2.screen, v3.screen);

        let long_edge = Edge::new(p1, p3, r1, r3);
        let upper_edge = Edge::new(p1, p2, r1, r2);
        let lower_edge = Edge::new(p2, p3, r2, r3);

        // Middle vertex on the right means the long edge bounds the left side.
        // A flat top has no slope to compare, so the side comes from X alone.
        let middle_on_right = if p1.y == p2.y {
            p2.x > p1.x
        } else {
            inverse_slope(p1, p2) > inverse_slope(p1, p3)
        };

        // Rows outside the frame would be culled pixel by pixel anyway
        let first_row = (p1.y as i32).max(0);
        let last_row = (p3.y as i32).min(self.height as i32 - 1);

        for y in first_row..=last_row {
            let short_edge = if (y as f32) < p2.y { &upper_edge } else { &lower_edge };
            let (left, right) = if middle_on_right {
                (&long_edge, short_edge)
            } else {
                (short_edge, &long_edge)
            };
            self.process_scan_line(y as usize, left, right, &shading, color);
        }
    }

    /// Fill one row between two edges, `[start_x, end_x)`
    fn process_scan_line(&mut self, y: usize, left: &Edge, right: &Edge, shading: &ShadingInput, color: Color) {
        let yf = y as f32;
        let gradient1 = left.gradient(yf);
        let gradient2 = right.gradient(yf);

        let start_x = lerp(left.start.x, left.end.x, gradient1) as i32 as i64;
        let end_x = lerp(right.start.x, right.end.x, gradient2) as i32 as i64;

        // Empty span: nothing to draw and nothing to divide by
        if end_x <= start_x {
            return;
        }

        let start_z = lerp(left.start.z, left.end.z, gradient1);
        let end_z = lerp(right.start.z, right.end.z, gradient2);
        let start_reflectivity = lerp(left.start_reflectivity, left.end_reflectivity, gradient1);
        let end_reflectivity = lerp(right.start_reflectivity, right.end_reflectivity, gradient2);

        let span = (end_x - start_x) as f32;
        let first = start_x.max(0);
        let last = end_x.min(self.width as i64);

        for x in first..last {
            let t = (x - start_x) as f32 / span;
            let z = lerp(start_z, end_z, t);
            let reflectivity = match *shading {
                ShadingInput::Flat(r) => r,
                ShadingInput::Smooth(..) => lerp(start_reflectivity, end_reflectivity, t),
            };
            self.put_pixel(x as usize, y, z, color.shade(reflectivity));
        }
    }
}

//! Orthographic 3D scenes drawn back to front.
//!
//! The camera follows the matplotlib `mplot3d` convention: `elev` is the
//! angle above the x–y plane and `azim` the rotation about z, both in
//! degrees. The defaults (30°, −60°) match matplotlib's initial view.

use nalgebra::{Point3, Vector3};

use crate::canvas::{Canvas, LineStyle};
use crate::glyphs::{draw_text, Align, TextStyle};
use crate::gradient::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub elev_deg: f64,
    pub azim_deg: f64,
    /// Canvas position of the world origin.
    pub center: (f32, f32),
    /// Pixels per world unit.
    pub scale: f32,
}

impl Camera {
    pub fn new(center: (f32, f32), scale: f32) -> Self {
        Self {
            elev_deg: 30.0,
            azim_deg: -60.0,
            center,
            scale,
        }
    }

    pub fn with_view(mut self, elev_deg: f64, azim_deg: f64) -> Self {
        self.elev_deg = elev_deg;
        self.azim_deg = azim_deg;
        self
    }

    /// Camera that fits the cube `[-extent, extent]³` into a viewport.
    pub fn fit(viewport: (f32, f32, f32, f32), extent: f64) -> Self {
        let (left, top, width, height) = viewport;
        // the cube's projected diagonal never exceeds 2·√3·extent
        let scale = width.min(height) / (2.0 * 3f32.sqrt() * extent as f32);
        Self::new((left + width / 2.0, top + height / 2.0), scale)
    }

    /// Unit vectors towards the viewer, to screen-right and to screen-up.
    pub fn basis(&self) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
        let (se, ce) = self.elev_deg.to_radians().sin_cos();
        let (sa, ca) = self.azim_deg.to_radians().sin_cos();
        let eye = Vector3::new(ce * ca, ce * sa, se);
        let right = Vector3::new(-sa, ca, 0.0);
        let up = Vector3::new(-se * ca, -se * sa, ce);
        (eye, right, up)
    }

    pub fn project(&self, p: &Point3<f64>) -> (f32, f32) {
        let (_, right, up) = self.basis();
        let v = p.coords;
        (
            self.center.0 + self.scale * v.dot(&right) as f32,
            self.center.1 - self.scale * v.dot(&up) as f32,
        )
    }

    /// Distance towards the viewer; larger is nearer.
    pub fn depth(&self, p: &Point3<f64>) -> f64 {
        p.coords.dot(&self.basis().0)
    }
}

#[derive(Debug, Clone)]
enum Primitive {
    Quad([Point3<f64>; 4], Color),
    Point(Point3<f64>, Color, f32),
}

impl Primitive {
    fn anchor(&self) -> Point3<f64> {
        match self {
            Primitive::Quad(q, _) => Point3::from((q[0].coords + q[1].coords + q[2].coords + q[3].coords) / 4.0),
            Primitive::Point(p, _, _) => *p,
        }
    }
}

/// Shaded quads and points, painted far to near.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn add_quads(&mut self, quads: impl IntoIterator<Item = [Point3<f64>; 4]>, color: Color) {
        self.primitives
            .extend(quads.into_iter().map(|q| Primitive::Quad(q, color)));
    }

    pub fn add_point(&mut self, p: Point3<f64>, color: Color, radius: f32) {
        self.primitives.push(Primitive::Point(p, color, radius));
    }

    /// Paint every primitive in depth order. Quads get Lambert shading from
    /// a light placed at the viewer's upper left.
    pub fn render(&self, canvas: &mut Canvas, camera: &Camera) {
        let (eye, right, up) = camera.basis();
        let light = (eye + up - right * 0.5).normalize();

        let mut order: Vec<(f64, &Primitive)> = self
            .primitives
            .iter()
            .map(|p| (camera.depth(&p.anchor()), p))
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, primitive) in order {
            match primitive {
                Primitive::Quad(q, color) => {
                    let normal = (q[2] - q[0]).cross(&(q[3] - q[1]));
                    let intensity = match normal.try_normalize(1e-12) {
                        Some(n) => 0.35 + 0.65 * n.dot(&light).abs(),
                        None => 1.0,
                    };
                    let pts: Vec<(f32, f32)> = q.iter().map(|p| camera.project(p)).collect();
                    canvas.polygon(&pts, shade(*color, intensity));
                }
                Primitive::Point(p, color, radius) => {
                    let (x, y) = camera.project(p);
                    canvas.circle(x, y, *radius, *color);
                }
            }
        }
    }
}

fn shade(color: Color, intensity: f64) -> Color {
    let s = |c: u8| (c as f64 * intensity.clamp(0.0, 1.0)).round() as u8;
    Color::new(s(color.r), s(color.g), s(color.b), color.a)
}

/// Wireframe of the cube `[-extent, extent]³` with axis labels on the
/// x, y and z edges nearest the viewer's bottom left.
pub fn draw_axes_box(canvas: &mut Canvas, camera: &Camera, extent: f64, labels: [&str; 3]) {
    let e = extent;
    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { -e } else { e },
            if i & 2 == 0 { -e } else { e },
            if i & 4 == 0 { -e } else { e },
        )
    };
    let line = Color::GRAY.with_alpha(0.7);
    for i in 0..8usize {
        for bit in [1usize, 2, 4] {
            let j = i | bit;
            if j != i {
                let a = camera.project(&corner(i));
                let b = camera.project(&corner(j));
                canvas.polyline(&[a, b], line, 0.8, LineStyle::Solid);
            }
        }
    }

    let style = TextStyle::new(11.0, Color::BLACK).align(Align::Center);
    let (eye, _, _) = camera.basis();
    // labels sit just outside the edges facing the viewer
    let sx = if eye.y >= 0.0 { e } else { -e };
    let sy = if eye.x >= 0.0 { e } else { -e };
    let anchors = [
        Point3::new(0.0, sx * 1.25, -e),
        Point3::new(sy * 1.25, 0.0, -e),
        Point3::new(-sy * 1.2, -sx * 1.2, 0.0),
    ];
    for (label, anchor) in labels.iter().zip(anchors.iter()) {
        let (x, y) = camera.project(anchor);
        draw_text(canvas, x, y - 5.5, label, &style);
    }
}

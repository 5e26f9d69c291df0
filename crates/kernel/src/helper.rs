use crate::entity::{Light, LightKind, LightShape};
use glam::Vec3;
use std::f32::consts::TAU;
use std::fmt;

/// Which light color a helper line is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// The light's main color.
    Primary,
    /// The hemisphere light's ground color.
    Ground,
}

/// One line of a helper wireframe, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub a: Vec3,
    pub b: Vec3,
    pub tint: Tint,
}

impl LineSegment {
    fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            a,
            b,
            tint: Tint::Primary,
        }
    }

    fn tinted(mut self, tint: Tint) -> Self {
        self.tint = tint;
        self
    }
}

/// Wireframe proxy describing a light's geometry.
///
/// Helpers are derived data: they hold no state of their own beyond the
/// segments produced by the last factory invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    pub light: String,
    pub segments: Vec<LineSegment>,
}

type BuildFn = dyn Fn(&Light) -> Vec<LineSegment>;

/// Re-invokable constructor for a light's helper geometry.
pub struct HelperFactory {
    label: &'static str,
    build: Box<BuildFn>,
}

impl fmt::Debug for HelperFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperFactory")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Default cone length for spot lights with no distance cutoff.
const UNBOUNDED_SPOT_LENGTH: f32 = 1000.0;
const CONE_RIM_SEGMENTS: usize = 32;

impl HelperFactory {
    pub fn custom(
        label: &'static str,
        build: impl Fn(&Light) -> Vec<LineSegment> + 'static,
    ) -> Self {
        Self {
            label,
            build: Box::new(build),
        }
    }

    /// Pick the stock factory for a light kind. Ambient lights have none.
    pub fn for_kind(kind: LightKind, size: f32) -> Option<Self> {
        match kind {
            LightKind::Ambient => None,
            LightKind::Directional => Some(Self::directional(size)),
            LightKind::Hemisphere => Some(Self::hemisphere(size)),
            LightKind::Point => Some(Self::point(size)),
            LightKind::RectArea => Some(Self::rect_area()),
            LightKind::Spot => Some(Self::spot()),
        }
    }

    /// Wire octahedron of radius `size` around the light.
    pub fn point(size: f32) -> Self {
        Self::custom("point", move |light| {
            let Some(p) = light.position() else {
                return Vec::new();
            };
            octahedron(p, size)
                .into_iter()
                .map(|(a, b)| LineSegment::new(a, b))
                .collect()
        })
    }

    /// Octahedron with the upper half in sky color and the lower half in
    /// ground color.
    pub fn hemisphere(size: f32) -> Self {
        Self::custom("hemisphere", move |light| {
            let Some(p) = light.position() else {
                return Vec::new();
            };
            octahedron(p, size)
                .into_iter()
                .map(|(a, b)| {
                    let below = a.y < p.y || b.y < p.y;
                    let seg = LineSegment::new(a, b);
                    if below { seg.tinted(Tint::Ground) } else { seg }
                })
                .collect()
        })
    }

    /// Square of half-extent `size` facing the target, plus a line to it.
    pub fn directional(size: f32) -> Self {
        Self::custom("directional", move |light| {
            let (Some(p), Some(t)) = (light.position(), light.target()) else {
                return Vec::new();
            };
            let (right, up) = basis(t - p);
            let mut segs = rectangle(p, right * size, up * size);
            segs.push(LineSegment::new(p, t));
            segs
        })
    }

    /// Cone from the light toward its target. The rim radius follows the
    /// cone angle at the cutoff distance.
    pub fn spot() -> Self {
        Self::custom("spot", |light| {
            let LightShape::Spot {
                position,
                target,
                distance,
                angle,
                ..
            } = light.shape
            else {
                return Vec::new();
            };
            let length = if distance > 0.0 {
                distance
            } else {
                UNBOUNDED_SPOT_LENGTH
            };
            let radius = length * angle.tan();
            let dir = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
            let (right, up) = basis(dir);
            let center = position + dir * length;

            let mut segs = vec![LineSegment::new(position, center)];
            for rim in [right, -right, up, -up] {
                segs.push(LineSegment::new(position, center + rim * radius));
            }
            let rim_point = |i: usize| {
                let a = TAU * i as f32 / CONE_RIM_SEGMENTS as f32;
                center + (right * a.cos() + up * a.sin()) * radius
            };
            for i in 0..CONE_RIM_SEGMENTS {
                segs.push(LineSegment::new(rim_point(i), rim_point(i + 1)));
            }
            segs
        })
    }

    /// Outline of the emitting rectangle, perpendicular to its facing.
    pub fn rect_area() -> Self {
        Self::custom("rect-area", |light| {
            let LightShape::RectArea {
                position,
                width,
                height,
                facing,
            } = light.shape
            else {
                return Vec::new();
            };
            let (right, up) = basis(facing);
            rectangle(position, right * (width * 0.5), up * (height * 0.5))
        })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn build(&self, light: &Light) -> Helper {
        Helper {
            light: light.name.clone(),
            segments: (self.build)(light),
        }
    }
}

/// Right and up vectors of a frame whose forward axis is `dir`.
fn basis(dir: Vec3) -> (Vec3, Vec3) {
    let fwd = dir.try_normalize().unwrap_or(Vec3::NEG_Z);
    let reference = if fwd.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let right = fwd.cross(reference).normalize();
    let up = right.cross(fwd).normalize();
    (right, up)
}

fn rectangle(center: Vec3, half_right: Vec3, half_up: Vec3) -> Vec<LineSegment> {
    let corners = [
        center - half_right + half_up,
        center + half_right + half_up,
        center + half_right - half_up,
        center - half_right - half_up,
    ];
    (0..4)
        .map(|i| LineSegment::new(corners[i], corners[(i + 1) % 4]))
        .collect()
}

fn octahedron(center: Vec3, r: f32) -> Vec<(Vec3, Vec3)> {
    let top = center + Vec3::Y * r;
    let bottom = center - Vec3::Y * r;
    let ring = [
        center + Vec3::X * r,
        center + Vec3::Z * r,
        center - Vec3::X * r,
        center - Vec3::Z * r,
    ];
    let mut edges = Vec::with_capacity(12);
    for i in 0..4 {
        let next = ring[(i + 1) % 4];
        edges.push((ring[i], next));
        edges.push((top, ring[i]));
        edges.push((bottom, ring[i]));
    }
    edges
}

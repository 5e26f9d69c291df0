use crate::camera::CameraView;
use lightlab_kernel::{LightShape, SceneRegistry};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::fmt::Write as _;

/// A surface the scene can be drawn to. All backends implement this trait.
///
/// The target reads the registry and a camera view. It never mutates the
/// scene: lights, meshes and materials are owned by the registry.
pub trait RenderTarget {
    type Error: std::error::Error + 'static;

    /// Drawable size in physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    fn set_pixel_ratio(&mut self, ratio: f32);

    /// Draw one frame.
    fn render(&mut self, scene: &SceneRegistry, camera: &CameraView) -> Result<(), Self::Error>;
}

/// Headless target that records each frame as text.
///
/// Used by the CLI and by tests to observe what a real backend would draw.
#[derive(Debug)]
pub struct DebugTextRenderer {
    size: (u32, u32),
    pixel_ratio: f32,
    resizes: usize,
    frames: VecDeque<String>,
    keep: usize,
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self {
            size: (0, 0),
            pixel_ratio: 1.0,
            resizes: 0,
            frames: VecDeque::new(),
            keep: usize::MAX,
        }
    }
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the most recent `n` frames.
    pub fn keep_last(mut self, n: usize) -> Self {
        self.keep = n.max(1);
        self
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Number of `set_size` calls received.
    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    pub fn frames(&self) -> &VecDeque<String> {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.back().map(String::as_str)
    }
}

impl RenderTarget for DebugTextRenderer {
    type Error = Infallible;

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes += 1;
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn render(&mut self, scene: &SceneRegistry, camera: &CameraView) -> Result<(), Infallible> {
        while self.frames.len() >= self.keep {
            self.frames.pop_front();
        }
        self.frames.push_back(describe(scene, camera));
        Ok(())
    }
}

/// Human-readable dump of the scene as seen through `camera`.
pub fn describe(scene: &SceneRegistry, camera: &CameraView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Scene ({} entities) ===", scene.len());
    let _ = writeln!(
        out,
        "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}",
        camera.eye.x,
        camera.eye.y,
        camera.eye.z,
        camera.target.x,
        camera.target.y,
        camera.target.z,
        camera.fov_degrees,
        camera.aspect,
    );

    for light in scene.lights() {
        let _ = write!(
            out,
            "  light {:<12} {:<12} {} i={:.2}",
            light.name,
            light.kind(),
            light.color,
            light.intensity
        );
        if let Some(p) = light.position() {
            let _ = write!(out, " pos=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        }
        match light.shape {
            LightShape::Hemisphere { ground_color, .. } => {
                let _ = write!(out, " ground={ground_color}");
            }
            LightShape::Point { distance, decay, .. } => {
                let _ = write!(out, " distance={distance:.2} decay={decay:.2}");
            }
            LightShape::RectArea { width, height, .. } => {
                let _ = write!(out, " size={width:.2}x{height:.2}");
            }
            LightShape::Spot {
                distance,
                angle,
                penumbra,
                decay,
                ..
            } => {
                let _ = write!(
                    out,
                    " distance={distance:.2} angle={angle:.4} penumbra={penumbra:.4} decay={decay:.3}"
                );
            }
            LightShape::Ambient | LightShape::Directional { .. } => {}
        }
        let _ = writeln!(out);
    }

    for mesh in scene.meshes() {
        let p = mesh.transform.position;
        let r = mesh.transform.rotation;
        let _ = writeln!(
            out,
            "  mesh  {:<12} pos=({:.2}, {:.2}, {:.2}) rot=({:.3}, {:.3}, {:.3})",
            mesh.name, p.x, p.y, p.z, r.x, r.y, r.z
        );
    }

    let segments: usize = scene.helpers().map(|h| h.segments.len()).sum();
    let _ = writeln!(
        out,
        "Helpers: {} ({segments} segments)",
        scene.helpers().count()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lightlab_common::Color;
    use lightlab_kernel::{Light, Material, Mesh, Shape};

    #[test]
    fn empty_scene() {
        let scene = SceneRegistry::new();
        let text = describe(&scene, &CameraView::default());
        assert!(text.contains("0 entities"));
        assert!(text.contains("fov=75"));
    }

    #[test]
    fn lights_and_meshes_are_listed() {
        let mut scene = SceneRegistry::new();
        scene
            .register(Light::point("point", Color::from_hex(0xff9000), 0.5, 10.0, 2.0))
            .unwrap();
        scene.register(Material::standard("standard")).unwrap();
        scene
            .register(Mesh::new(
                "cube",
                Shape::Box {
                    width: 0.75,
                    height: 0.75,
                    depth: 0.75,
                },
                "standard",
            ))
            .unwrap();
        let text = describe(&scene, &CameraView::default());
        assert!(text.contains("#ff9000"));
        assert!(text.contains("decay=2.00"));
        assert!(text.contains("mesh  cube"));
    }

    #[test]
    fn records_frames_and_size() {
        let scene = SceneRegistry::new();
        let mut target = DebugTextRenderer::new();
        target.set_size(800, 600);
        target.set_pixel_ratio(2.0);
        target.render(&scene, &CameraView::default()).unwrap();
        target.render(&scene, &CameraView::default()).unwrap();
        assert_eq!(target.size(), (800, 600));
        assert_eq!(target.pixel_ratio(), 2.0);
        assert_eq!(target.resize_count(), 1);
        assert_eq!(target.frames().len(), 2);
    }

    #[test]
    fn keep_last_bounds_history() {
        let scene = SceneRegistry::new();
        let mut target = DebugTextRenderer::new().keep_last(1);
        let mut view = CameraView::default();
        target.render(&scene, &view).unwrap();
        view.eye = Vec3::new(9.0, 9.0, 9.0);
        target.render(&scene, &view).unwrap();
        assert_eq!(target.frames().len(), 1);
        assert!(target.last_frame().unwrap().contains("9.00"));
    }

    #[test]
    fn default_matches_new_and_keeps_every_frame() {
        let scene = SceneRegistry::new();
        let mut target = DebugTextRenderer::default();
        assert_eq!(target.pixel_ratio(), 1.0);
        for _ in 0..3 {
            target.render(&scene, &CameraView::default()).unwrap();
        }
        assert_eq!(target.frames().len(), 3);
    }
}

use crate::camera::CameraControl;
use crate::renderer::RenderTarget;

/// Device pixel ratios above this are rendered at this ratio.
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Drawable area of the host window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio: cap_pixel_ratio(scale_factor),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Handle one resize notification: update the camera aspect and the
    /// target size and pixel ratio, once each. Zero dimensions are raised
    /// to one pixel.
    pub fn resize<T, C>(
        &mut self,
        width: u32,
        height: u32,
        scale_factor: f32,
        target: &mut T,
        camera: &mut C,
    ) where
        T: RenderTarget + ?Sized,
        C: CameraControl + ?Sized,
    {
        *self = Self::new(width, height, scale_factor);
        camera.set_aspect(self.aspect());
        target.set_size(self.width, self.height);
        target.set_pixel_ratio(self.pixel_ratio);
        tracing::debug!(
            width = self.width,
            height = self.height,
            pixel_ratio = self.pixel_ratio,
            "viewport resized"
        );
    }
}

fn cap_pixel_ratio(scale_factor: f32) -> f32 {
    if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::OrbitControls;
    use crate::renderer::DebugTextRenderer;
    use lightlab_kernel::preset::showcase;

    #[test]
    fn resize_applies_once_and_leaves_scene_alone() {
        let (scene, _) = showcase().unwrap();
        let before = format!("{:?}", scene.entities().collect::<Vec<_>>());

        let mut viewport = Viewport::new(1280, 720, 1.0);
        let mut target = DebugTextRenderer::new();
        let mut camera = OrbitControls::default();
        viewport.resize(800, 600, 1.0, &mut target, &mut camera);

        assert_eq!(target.resize_count(), 1);
        assert_eq!(target.size(), (800, 600));
        assert!((camera.view().aspect - 800.0 / 600.0).abs() < 1e-6);
        let after = format!("{:?}", scene.entities().collect::<Vec<_>>());
        assert_eq!(before, after);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let mut viewport = Viewport::new(100, 100, 1.0);
        let mut target = DebugTextRenderer::new();
        let mut camera = OrbitControls::default();
        viewport.resize(100, 100, 3.0, &mut target, &mut camera);
        assert_eq!(target.pixel_ratio(), MAX_PIXEL_RATIO);
        viewport.resize(100, 100, 1.5, &mut target, &mut camera);
        assert_eq!(target.pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(1, 1, f32::NAN).pixel_ratio, 1.0);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let v = Viewport::new(640, 0, 1.0);
        assert_eq!(v.height, 1);
        assert!(v.aspect().is_finite());
    }
}

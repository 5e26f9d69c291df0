use crate::camera::CameraControl;
use crate::renderer::RenderTarget;
use lightlab_kernel::{Animator, Clock, SceneError, SceneRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, thiserror::Error)]
pub enum StepError<E> {
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("render failed: {0}")]
    Render(#[source] E),
}

/// Cloneable flag that stops the frame loop at the top of the next step.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What to do when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return the error and stop the loop.
    Abort,
    /// Log the error, count it, and keep stepping.
    #[default]
    LogAndContinue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// A frame was drawn at elapsed time `t`.
    Rendered { t: f32 },
    /// The step failed and the failure was logged.
    Failed,
    /// The stop signal was raised; nothing was done.
    Stopped,
}

/// Per-frame step: read the clock, rotate animated meshes, update camera
/// controls, render once.
///
/// The host reschedules [`AnimationDriver::step`] once per display refresh.
/// Mesh orientation depends only on the clock, so edits made to other
/// fields between steps are never overwritten.
pub struct AnimationDriver<C> {
    clock: C,
    animator: Animator,
    state: DriverState,
    stop: StopSignal,
    policy: FailurePolicy,
    frames: u64,
    failures: u64,
}

impl<C: Clock> AnimationDriver<C> {
    pub fn new(clock: C, animator: Animator) -> Self {
        Self {
            clock,
            animator,
            state: DriverState::Idle,
            stop: StopSignal::new(),
            policy: FailurePolicy::default(),
            frames: 0,
            failures: 0,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Steps that failed under [`FailurePolicy::LogAndContinue`].
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Idle to Running. Elapsed time is zero at this transition.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            self.clock.start();
            self.state = DriverState::Running;
            tracing::info!(animated = self.animator.len(), "animation loop started");
        }
    }

    /// Run one frame. Starts the loop on first call.
    pub fn step<T, K>(
        &mut self,
        scene: &mut SceneRegistry,
        camera: &mut K,
        target: &mut T,
    ) -> Result<StepOutcome, StepError<T::Error>>
    where
        T: RenderTarget + ?Sized,
        K: CameraControl + ?Sized,
    {
        if self.stop.is_stopped() {
            if self.state == DriverState::Running {
                tracing::info!(frames = self.frames, "animation loop stopped");
            }
            self.state = DriverState::Idle;
            return Ok(StepOutcome::Stopped);
        }
        self.start();

        let t = self.clock.elapsed();
        match self.frame(t, scene, camera, target) {
            Ok(()) => {
                self.frames += 1;
                Ok(StepOutcome::Rendered { t })
            }
            Err(e) => match self.policy {
                FailurePolicy::Abort => {
                    self.state = DriverState::Idle;
                    Err(e)
                }
                FailurePolicy::LogAndContinue => {
                    self.failures += 1;
                    tracing::error!(t, failures = self.failures, "frame failed: {e}");
                    Ok(StepOutcome::Failed)
                }
            },
        }
    }

    /// Step until the stop signal is raised or `max_frames` steps have been
    /// taken. Returns the number of steps taken.
    pub fn run<T, K>(
        &mut self,
        scene: &mut SceneRegistry,
        camera: &mut K,
        target: &mut T,
        max_frames: Option<u64>,
    ) -> Result<u64, StepError<T::Error>>
    where
        T: RenderTarget + ?Sized,
        K: CameraControl + ?Sized,
    {
        let mut steps = 0;
        while max_frames.is_none_or(|max| steps < max) {
            if self.step(scene, camera, target)? == StepOutcome::Stopped {
                break;
            }
            steps += 1;
        }
        Ok(steps)
    }

    fn frame<T, K>(
        &mut self,
        t: f32,
        scene: &mut SceneRegistry,
        camera: &mut K,
        target: &mut T,
    ) -> Result<(), StepError<T::Error>>
    where
        T: RenderTarget + ?Sized,
        K: CameraControl + ?Sized,
    {
        self.animator.apply(scene, t)?;
        camera.update();
        target
            .render(scene, &camera.view())
            .map_err(StepError::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraView, OrbitControls};
    use crate::renderer::DebugTextRenderer;
    use glam::Vec2;
    use lightlab_common::Color;
    use lightlab_kernel::preset::{names, showcase, SPIN};
    use lightlab_kernel::{FixedStepClock, ManualClock};

    #[derive(Debug, thiserror::Error)]
    #[error("device lost")]
    struct DeviceLost;

    /// Fails every other frame.
    #[derive(Default)]
    struct FlakyTarget {
        calls: u32,
    }

    impl RenderTarget for FlakyTarget {
        type Error = DeviceLost;

        fn set_size(&mut self, _: u32, _: u32) {}
        fn set_pixel_ratio(&mut self, _: f32) {}

        fn render(&mut self, _: &SceneRegistry, _: &CameraView) -> Result<(), DeviceLost> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(DeviceLost)
            } else {
                Ok(())
            }
        }
    }

    fn light_state(scene: &SceneRegistry) -> Vec<(String, f32, Color)> {
        scene
            .lights()
            .map(|l| (l.name.clone(), l.intensity, l.color))
            .collect()
    }

    #[test]
    fn hundred_steps_rotate_meshes_and_leave_lights() {
        let (mut scene, animator) = showcase().unwrap();
        let lights_before = light_state(&scene);
        assert_eq!(lights_before.len(), 6);
        assert_eq!(animator.len(), 3);

        let mut driver = AnimationDriver::new(FixedStepClock::new(0.1), animator)
            .with_policy(FailurePolicy::Abort);
        let mut camera = OrbitControls::default();
        let mut target = DebugTextRenderer::new().keep_last(1);

        let mut previous = [f32::NEG_INFINITY; 3];
        for i in 0..100 {
            let outcome = driver.step(&mut scene, &mut camera, &mut target).unwrap();
            let StepOutcome::Rendered { t } = outcome else {
                panic!("step {i} did not render");
            };
            assert!((t - i as f32 * 0.1).abs() < 1e-4);
            for (k, name) in names::SPINNING.iter().enumerate() {
                let y = scene.mesh(name).unwrap().transform.rotation.y;
                assert!(y > previous[k] || i == 0);
                assert!((y - SPIN.y * t).abs() < 1e-4);
                previous[k] = y;
            }
        }

        assert_eq!(driver.frames(), 100);
        assert_eq!(light_state(&scene), lights_before);
        let last = previous[0];
        assert!((last - SPIN.y * 9.9).abs() < 1e-4);
    }

    #[test]
    fn first_step_is_at_time_zero() {
        let (mut scene, animator) = showcase().unwrap();
        let base = scene.mesh(names::CUBE).unwrap().transform.rotation;
        let clock = ManualClock::new();
        let mut driver = AnimationDriver::new(clock.clone(), animator);
        assert_eq!(driver.state(), DriverState::Idle);

        let mut target = DebugTextRenderer::new();
        let outcome = driver
            .step(&mut scene, &mut OrbitControls::default(), &mut target)
            .unwrap();
        assert_eq!(outcome, StepOutcome::Rendered { t: 0.0 });
        assert_eq!(driver.state(), DriverState::Running);
        assert_eq!(scene.mesh(names::CUBE).unwrap().transform.rotation, base);
    }

    #[test]
    fn replaying_a_time_gives_the_same_pose() {
        let (mut scene, animator) = showcase().unwrap();
        let clock = ManualClock::new();
        let mut driver = AnimationDriver::new(clock.clone(), animator);
        let mut camera = OrbitControls::default();
        let mut target = DebugTextRenderer::new();

        clock.set(2.5);
        driver.step(&mut scene, &mut camera, &mut target).unwrap();
        let first = scene.mesh(names::TORUS).unwrap().transform;
        driver.step(&mut scene, &mut camera, &mut target).unwrap();
        assert_eq!(scene.mesh(names::TORUS).unwrap().transform, first);
    }

    #[test]
    fn edits_between_steps_survive() {
        let (mut scene, animator) = showcase().unwrap();
        let clock = ManualClock::new();
        let mut driver = AnimationDriver::new(clock.clone(), animator);
        let mut camera = OrbitControls::default();
        let mut target = DebugTextRenderer::new();

        driver.step(&mut scene, &mut camera, &mut target).unwrap();
        scene.light_mut(names::SPOT).unwrap().intensity = 7.5;
        clock.advance(1.0);
        driver.step(&mut scene, &mut camera, &mut target).unwrap();
        assert_eq!(scene.light(names::SPOT).unwrap().intensity, 7.5);
        assert!(target.last_frame().unwrap().contains("i=7.50"));
    }

    #[test]
    fn camera_updates_once_per_step() {
        let (mut scene, animator) = showcase().unwrap();
        let mut driver = AnimationDriver::new(ManualClock::new(), animator);
        let mut camera = OrbitControls::default();
        camera.damping = 0.5;
        camera.handle(&lightlab_input::Action::Orbit(Vec2::new(100.0, 0.0)));
        let mut target = DebugTextRenderer::new();

        driver.step(&mut scene, &mut camera, &mut target).unwrap();
        let mut reference = OrbitControls::default();
        reference.damping = 0.5;
        reference.handle(&lightlab_input::Action::Orbit(Vec2::new(100.0, 0.0)));
        reference.update();
        assert_eq!(camera.view(), reference.view());
    }

    #[test]
    fn stop_signal_ends_run() {
        let (mut scene, animator) = showcase().unwrap();
        let mut driver = AnimationDriver::new(FixedStepClock::new(0.1), animator);
        let stop = driver.stop_signal();
        let mut target = DebugTextRenderer::new();
        let mut camera = OrbitControls::default();

        let steps = driver
            .run(&mut scene, &mut camera, &mut target, Some(5))
            .unwrap();
        assert_eq!(steps, 5);

        stop.stop();
        let steps = driver.run(&mut scene, &mut camera, &mut target, None).unwrap();
        assert_eq!(steps, 0);
        assert_eq!(driver.state(), DriverState::Idle);
        assert_eq!(target.frames().len(), 5);
    }

    #[test]
    fn log_and_continue_counts_failures() {
        let (mut scene, animator) = showcase().unwrap();
        let mut driver = AnimationDriver::new(FixedStepClock::new(0.1), animator)
            .with_policy(FailurePolicy::LogAndContinue);
        let mut target = FlakyTarget::default();
        let steps = driver
            .run(&mut scene, &mut OrbitControls::default(), &mut target, Some(10))
            .unwrap();
        assert_eq!(steps, 10);
        assert_eq!(driver.frames(), 5);
        assert_eq!(driver.failures(), 5);
        assert_eq!(driver.state(), DriverState::Running);
    }

    #[test]
    fn abort_propagates_the_render_error() {
        let (mut scene, animator) = showcase().unwrap();
        let mut driver = AnimationDriver::new(FixedStepClock::new(0.1), animator)
            .with_policy(FailurePolicy::Abort);
        let mut target = FlakyTarget::default();
        let err = driver
            .run(&mut scene, &mut OrbitControls::default(), &mut target, Some(10))
            .unwrap_err();
        assert!(matches!(err, StepError::Render(DeviceLost)));
        assert_eq!(driver.frames(), 1);
        assert_eq!(driver.state(), DriverState::Idle);
    }

    #[test]
    fn missing_animated_mesh_is_a_scene_error() {
        let (_, animator) = showcase().unwrap();
        let mut empty = SceneRegistry::new();
        let mut driver =
            AnimationDriver::new(ManualClock::new(), animator).with_policy(FailurePolicy::Abort);
        let err = driver
            .step(
                &mut empty,
                &mut OrbitControls::default(),
                &mut DebugTextRenderer::new(),
            )
            .unwrap_err();
        assert!(matches!(err, StepError::Scene(SceneError::NotFound(_))));
    }
}

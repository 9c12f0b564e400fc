use crate::scene::{Canvas, DisplayMode, Renderer};
use crate::time::{FrameHandle, FrameScheduler};
use crate::transform::{TransformError, TransformStack};

/// Content drawn by a [`FrameDriver`].
pub trait Scene {
    /// Advances animation parameters by one tick. Called once per frame, before `draw`.
    fn advance(&mut self);

    /// Draws one full frame through `canvas`.
    fn draw(&self, canvas: &mut Canvas<'_>) -> Result<(), TransformError>;
}

/// Drives a [`Scene`] one frame at a time and keeps exactly one frame scheduled.
///
/// Every `render` cancels the frame it previously scheduled before drawing and scheduling
/// the next one, so restarting the loop (e.g. on a mode change) never leaves two loops
/// running.
#[derive(Debug)]
pub struct FrameDriver<S> {
    scene: S,
    stack: TransformStack,
    mode: DisplayMode,
    pending: Option<FrameHandle>,
}

impl<S: Scene> FrameDriver<S> {
    pub fn new(scene: S) -> Self {
        Self::with_mode(scene, DisplayMode::default())
    }

    pub fn with_mode(scene: S, mode: DisplayMode) -> Self {
        Self {
            scene,
            stack: TransformStack::with_capacity(8),
            mode,
            pending: None,
        }
    }

    #[inline]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[inline]
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Handle of the frame this driver has scheduled, if any.
    #[inline]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Switches display mode and restarts the loop.
    pub fn set_mode(
        &mut self,
        mode: DisplayMode,
        scheduler: &mut FrameScheduler,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameHandle, TransformError> {
        if mode != self.mode {
            log::info!("display mode: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.render(scheduler, renderer)
    }

    /// Runs one frame: cancel pending, reset, advance, draw, verify balance, schedule next.
    ///
    /// On error nothing is scheduled; the loop stays stopped until `render` is called again.
    pub fn render(
        &mut self,
        scheduler: &mut FrameScheduler,
        renderer: &mut dyn Renderer,
    ) -> Result<FrameHandle, TransformError> {
        if let Some(prev) = self.pending.take() {
            if scheduler.cancel(prev) {
                log::trace!("cancelled pending frame {}", prev.id());
            }
        }

        self.stack.clear();
        self.scene.advance();

        let draws = {
            let mut canvas = Canvas::new(&mut self.stack, renderer);
            self.scene.draw(&mut canvas)?;
            canvas.draw_count()
        };

        if let Err(e) = self.stack.finish_frame() {
            log::error!("{e}");
            return Err(e);
        }

        let next = scheduler.request();
        self.pending = Some(next);
        log::trace!("frame drawn ({draws} primitives), next frame {}", next.id());
        Ok(next)
    }

    /// Handles a fired frame request.
    ///
    /// Renders only when `fired` is the frame this driver scheduled; returns whether a frame
    /// was drawn.
    pub fn on_frame(
        &mut self,
        fired: FrameHandle,
        scheduler: &mut FrameScheduler,
        renderer: &mut dyn Renderer,
    ) -> Result<bool, TransformError> {
        if self.pending != Some(fired) {
            log::trace!("ignoring stale frame {}", fired.id());
            return Ok(false);
        }
        // Already taken off the scheduler by the runtime.
        self.pending = None;
        self.render(scheduler, renderer)?;
        Ok(true)
    }

    /// Cancels the pending frame, stopping the loop.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        if let Some(prev) = self.pending.take() {
            scheduler.cancel(prev);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::scene::{DrawList, PrimitiveKind};
    use crate::transform::{Transform, Vec3};

    /// Two sibling squares offset by a per-tick counter.
    #[derive(Default)]
    struct Recorder {
        ticks: u32,
        leak_push: bool,
        extra_pop: bool,
    }

    impl Scene for Recorder {
        fn advance(&mut self) {
            self.ticks += 1;
        }

        fn draw(&self, canvas: &mut Canvas<'_>) -> Result<(), TransformError> {
            canvas.reset();
            canvas.branch(|c| {
                c.translate(Vec3::new(self.ticks as f32, 0.0, 0.0));
                c.draw(PrimitiveKind::Square, Color::black());
                Ok(())
            })?;
            canvas.branch(|c| {
                c.translate(Vec3::new(0.0, 1.0, 0.0));
                c.draw(PrimitiveKind::Circle, Color::white());
                Ok(())
            })?;
            if self.leak_push {
                canvas.push();
            }
            if self.extra_pop {
                canvas.pop()?;
            }
            Ok(())
        }
    }

    #[test]
    fn render_draws_and_schedules_next_frame() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        let h = driver.render(&mut scheduler, &mut list).unwrap();
        assert_eq!(scheduler.pending(), Some(h));
        assert_eq!(driver.pending(), Some(h));
        assert_eq!(list.len(), 2);
        assert_eq!(driver.scene().ticks, 1);
    }

    #[test]
    fn restart_cancels_previous_loop() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        let first = driver.render(&mut scheduler, &mut list).unwrap();
        let second = driver
            .set_mode(DisplayMode::Wireframe, &mut scheduler, &mut list)
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(scheduler.pending(), Some(second));
        assert_eq!(driver.mode(), DisplayMode::Wireframe);

        // The old loop's token no longer drives frames.
        list.clear();
        assert_eq!(driver.on_frame(first, &mut scheduler, &mut list), Ok(false));
        assert!(list.is_empty());
    }

    #[test]
    fn fired_frame_renders_and_reschedules() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        driver.render(&mut scheduler, &mut list).unwrap();
        for _ in 0..3 {
            let fired = scheduler.fire().unwrap();
            list.clear();
            assert_eq!(driver.on_frame(fired, &mut scheduler, &mut list), Ok(true));
            assert!(scheduler.is_pending());
        }
        assert_eq!(driver.scene().ticks, 4);

        let expected = Transform::identity().translate(Vec3::new(4.0, 0.0, 0.0));
        assert!(list.items()[0].transform.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn siblings_are_not_affected_by_earlier_branch() {
        let mut driver = FrameDriver::new(Recorder::default());
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        driver.render(&mut scheduler, &mut list).unwrap();
        let expected = Transform::identity().translate(Vec3::new(0.0, 1.0, 0.0));
        assert!(list.items()[1].transform.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn unbalanced_frame_is_an_error_and_stops_the_loop() {
        let scene = Recorder { leak_push: true, ..Recorder::default() };
        let mut driver = FrameDriver::new(scene);
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        let err = driver.render(&mut scheduler, &mut list).unwrap_err();
        assert_eq!(err, TransformError::Unbalanced { depth: 1 });
        assert!(!scheduler.is_pending());
        assert!(!driver.is_running());
    }

    #[test]
    fn underflow_propagates_out_of_render() {
        let scene = Recorder { extra_pop: true, ..Recorder::default() };
        let mut driver = FrameDriver::new(scene);
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        assert_eq!(
            driver.render(&mut scheduler, &mut list),
            Err(TransformError::Underflow)
        );
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn stop_cancels_pending_frame() {
        let mut driver = FrameDriver::with_mode(Recorder::default(), DisplayMode::Point);
        let mut scheduler = FrameScheduler::new();
        let mut list = DrawList::new();

        driver.render(&mut scheduler, &mut list).unwrap();
        driver.stop(&mut scheduler);
        assert!(!scheduler.is_pending());
        assert!(!driver.is_running());
        assert_eq!(driver.mode(), DisplayMode::Point);
    }
}

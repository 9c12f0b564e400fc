use meadow_engine::core::{App, AppControl, FrameCtx};
use meadow_engine::driver::FrameDriver;
use meadow_engine::input::{InputFrame, Key};
use meadow_engine::paint::Color;
use meadow_engine::render::PrimitiveRenderer;
use meadow_engine::scene::{DisplayMode, DrawList};

use crate::config::window_title;
use crate::landscape::Landscape;

const CLEAR: Color = Color::from_premul(0.95, 0.95, 0.95, 1.0);

/// Mode keys in priority order, for frames where several are pressed at once.
const MODE_KEYS: [(char, DisplayMode); 3] = [
    ('S', DisplayMode::Solid),
    ('W', DisplayMode::Wireframe),
    ('P', DisplayMode::Point),
];

pub struct StudioApp {
    driver: FrameDriver<Landscape>,
    draws: DrawList,
    renderer: PrimitiveRenderer,
}

impl StudioApp {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            driver: FrameDriver::with_mode(Landscape::new(), mode),
            draws: DrawList::new(),
            renderer: PrimitiveRenderer::new(),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.draws.clear();
        let previous_mode = self.driver.mode();

        let drawn = match (requested_mode(ctx.input_frame), ctx.fired) {
            (Some(mode), _) => self
                .driver
                .set_mode(mode, ctx.scheduler, &mut self.draws)
                .map(|_| true),
            (None, Some(fired)) => self.driver.on_frame(fired, ctx.scheduler, &mut self.draws),
            (None, None) if !self.driver.is_running() => {
                self.driver.render(ctx.scheduler, &mut self.draws).map(|_| true)
            }
            (None, None) => Ok(false),
        };

        match drawn {
            Ok(true) => {}
            Ok(false) => return AppControl::Continue,
            Err(e) => {
                log::error!("frame aborted: {e}");
                return AppControl::Exit;
            }
        }

        let mode = self.driver.mode();
        if mode != previous_mode {
            ctx.window.set_title(&window_title(mode));
        }

        if ctx.time.frame_index % 600 == 0 {
            log::debug!(
                "frame {} dt {:.2}ms, {} primitives",
                ctx.time.frame_index,
                ctx.time.dt * 1000.0,
                self.draws.len()
            );
        }

        let (draws, renderer) = (&self.draws, &mut self.renderer);
        ctx.render(CLEAR, |rctx, target| renderer.render(rctx, target, draws, mode))
    }
}

/// Display mode selected by this frame's key presses, if any.
fn requested_mode(input: &InputFrame) -> Option<DisplayMode> {
    MODE_KEYS
        .iter()
        .find(|(c, _)| Key::letter(*c).is_some_and(|k| input.pressed(k)))
        .map(|&(_, mode)| mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[Key]) -> InputFrame {
        let mut frame = InputFrame::default();
        frame.keys_pressed.extend(keys.iter().copied());
        frame
    }

    #[test]
    fn mode_keys_map_to_modes() {
        assert_eq!(requested_mode(&pressed(&[Key::Letter('S')])), Some(DisplayMode::Solid));
        assert_eq!(requested_mode(&pressed(&[Key::Letter('W')])), Some(DisplayMode::Wireframe));
        assert_eq!(requested_mode(&pressed(&[Key::Letter('P')])), Some(DisplayMode::Point));
        assert_eq!(requested_mode(&pressed(&[Key::Space])), None);
        assert_eq!(requested_mode(&pressed(&[])), None);
    }

    #[test]
    fn simultaneous_mode_keys_pick_by_priority() {
        let keys = [Key::Letter('P'), Key::Letter('W')];
        assert_eq!(requested_mode(&pressed(&keys)), Some(DisplayMode::Wireframe));
    }
}

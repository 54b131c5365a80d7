use vectra_engine::coords::Vec2;
use vectra_engine::input::{ButtonState, InputEvent, Key, MouseButton};
use vectra_engine::render::{GpuBackend, ShapeRenderer};

/// What a batch of input events asked for.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ToolOutcome {
    pub view_changed: bool,
    pub toggle_grid: bool,
    pub exit: bool,
}

/// Pan/zoom navigation for the canvas.
///
/// - right drag pans (content follows the pointer)
/// - wheel zooms about the point under the cursor
/// - `+` / `-` zoom about the surface center
/// - `r` resets the view, `g` toggles the grid, `Escape` quits
#[derive(Debug, Default)]
pub struct ViewTool {
    drag_from: Option<Vec2>,
}

impl ViewTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn handle<'e, B: GpuBackend>(
        &mut self,
        events: impl IntoIterator<Item = &'e InputEvent>,
        renderer: &mut ShapeRenderer<B>,
    ) -> ToolOutcome {
        let mut out = ToolOutcome::default();
        for ev in events {
            self.handle_one(ev, renderer, &mut out);
        }
        out
    }

    fn handle_one<B: GpuBackend>(&mut self, ev: &InputEvent, r: &mut ShapeRenderer<B>, out: &mut ToolOutcome) {
        match *ev {
            InputEvent::PointerButton { button: MouseButton::Right, state, position } => {
                self.drag_from = match state {
                    ButtonState::Pressed => Some(position),
                    ButtonState::Released => None,
                };
            }
            InputEvent::PointerMoved(p) => {
                let Some(from) = self.drag_from else { return };
                let d = p - from;
                self.drag_from = Some(p);
                if d.x == 0.0 && d.y == 0.0 {
                    return;
                }
                let k = r.coordinate_state().effective_scale();
                r.pan(-d.x / k, d.y / k);
                out.view_changed = true;
            }
            InputEvent::PointerLeft => self.drag_from = None,
            InputEvent::Wheel { delta, position } => {
                let steps = delta.vertical_steps();
                if steps == 0.0 || !steps.is_finite() {
                    return;
                }
                let anchor = r.screen_to_data(position);
                r.zoom(steps > 0.0, anchor);
                out.view_changed = true;
            }
            InputEvent::Key { key, state: ButtonState::Pressed, repeat } => match key {
                Key::Escape => out.exit = true,
                Key::Char('r') if !repeat => {
                    r.reset_view();
                    out.view_changed = true;
                }
                Key::Char('g') if !repeat => out.toggle_grid = !out.toggle_grid,
                Key::Char('=') | Key::Char('+') | Key::Char('-') => {
                    let center = r.screen_to_data(r.coordinate_system().viewport().center());
                    r.zoom(key != Key::Char('-'), center);
                    out.view_changed = true;
                }
                _ => {}
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectra_engine::coords::Viewport;
    use vectra_engine::input::WheelDelta;
    use vectra_engine::render::{EngineConfig, RecordingBackend};

    fn renderer() -> ShapeRenderer<RecordingBackend> {
        ShapeRenderer::new(RecordingBackend::new(), Viewport::new(800.0, 600.0), EngineConfig::default())
            .unwrap()
    }

    fn press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: ButtonState::Pressed, repeat: false }
    }

    fn right(state: ButtonState, x: f64, y: f64) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Right, state, position: Vec2::new(x, y) }
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-9
    }

    // ── panning ───────────────────────────────────────────────────────────

    #[test]
    fn right_drag_keeps_grabbed_point_under_pointer() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        let grabbed = r.screen_to_data(Vec2::new(100.0, 100.0));

        let events = [
            right(ButtonState::Pressed, 100.0, 100.0),
            InputEvent::PointerMoved(Vec2::new(130.0, 80.0)),
            InputEvent::PointerMoved(Vec2::new(150.0, 120.0)),
            right(ButtonState::Released, 150.0, 120.0),
        ];
        let out = tool.handle(&events, &mut r);

        assert!(out.view_changed);
        assert!(!tool.is_dragging());
        assert!(close(r.data_to_screen(grabbed), Vec2::new(150.0, 120.0)));
    }

    #[test]
    fn moves_without_drag_do_nothing() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        let out = tool.handle(&[InputEvent::PointerMoved(Vec2::new(5.0, 5.0))], &mut r);
        assert_eq!(out, ToolOutcome::default());
        assert_eq!(r.coordinate_state().pan_x, 0.0);
    }

    // ── zooming ───────────────────────────────────────────────────────────

    #[test]
    fn wheel_zoom_keeps_cursor_point_fixed() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        let cursor = Vec2::new(600.0, 150.0);
        let under = r.screen_to_data(cursor);

        let wheel = InputEvent::Wheel { delta: WheelDelta::Lines { x: 0.0, y: 1.0 }, position: cursor };
        assert!(tool.handle(&[wheel], &mut r).view_changed);

        assert!((r.coordinate_state().scale - 1.1).abs() < 1e-12);
        assert!(close(r.data_to_screen(under), cursor));
    }

    #[test]
    fn wheel_down_zooms_out_and_zero_delta_is_ignored() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        let at = Vec2::new(400.0, 300.0);

        let still = InputEvent::Wheel { delta: WheelDelta::Pixels { x: 3.0, y: 0.0 }, position: at };
        assert!(!tool.handle(&[still], &mut r).view_changed);

        let down = InputEvent::Wheel { delta: WheelDelta::Pixels { x: 0.0, y: -40.0 }, position: at };
        tool.handle(&[down], &mut r);
        assert!(r.coordinate_state().scale < 1.0);
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn reset_key_restores_default_view() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        r.pan(10.0, -4.0);
        r.zoom(true, Vec2::zero());

        assert!(tool.handle(&[press(Key::Char('r'))], &mut r).view_changed);
        let s = r.coordinate_state();
        assert_eq!((s.pan_x, s.pan_y, s.scale), (0.0, 0.0, 1.0));
    }

    #[test]
    fn grid_toggle_and_exit() {
        let mut r = renderer();
        let mut tool = ViewTool::new();

        let out = tool.handle(&[press(Key::Char('g'))], &mut r);
        assert!(out.toggle_grid && !out.view_changed);

        // Two presses in one frame cancel out.
        let out = tool.handle(&[press(Key::Char('g')), press(Key::Char('g'))], &mut r);
        assert!(!out.toggle_grid);

        assert!(tool.handle(&[press(Key::Escape)], &mut r).exit);
    }

    #[test]
    fn keyboard_zoom_uses_surface_center() {
        let mut r = renderer();
        let mut tool = ViewTool::new();
        r.pan(3.0, 7.0);

        tool.handle(&[press(Key::Char('='))], &mut r);
        let s = r.coordinate_state();
        assert!(s.scale > 1.0);
        assert!((s.pan_x - 3.0).abs() < 1e-12 && (s.pan_y - 7.0).abs() < 1e-12);
    }
}

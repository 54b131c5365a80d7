use anyhow::Context;
use vectra_engine::coords::Viewport;
use vectra_engine::core::{App, AppControl, FrameCtx};
use vectra_engine::paint::Color;
use vectra_engine::render::{EngineConfig, FramePolicy, RenderCtx, ShapeRenderer, WgpuBackend};
use vectra_engine::window::CursorIcon;

use crate::scene::Scene;
use crate::tool::ViewTool;

const STATS_EVERY: u64 = 600;

/// Studio window state: one renderer showing the demo scene.
pub struct Studio {
    config: EngineConfig,
    renderer: Option<ShapeRenderer<WgpuBackend>>,
    scene: Scene,
    tool: ViewTool,
    /// Scene must be re-submitted (view or content changed).
    stale: bool,
    grabbing: bool,
}

impl Studio {
    pub fn new() -> Self {
        Self {
            config: EngineConfig {
                background: Color::from_rgba8(18, 20, 26, 255),
                frame_policy: FramePolicy::Accumulate,
                ..EngineConfig::default()
            },
            renderer: None,
            scene: Scene::new(),
            tool: ViewTool::new(),
            stale: true,
            grabbing: false,
        }
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Studio {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let backend = WgpuBackend::new(ctx)?;
        let renderer = ShapeRenderer::new(backend, ctx.viewport, self.config)
            .context("invalid renderer configuration")?;

        log::info!("studio ready ({:?}, {}x{})", ctx.surface_format, ctx.viewport.width, ctx.viewport.height);
        self.renderer = Some(renderer);
        self.stale = true;
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if let Some(r) = self.renderer.as_mut() {
            r.resize(viewport);
            self.stale = true;
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        let outcome = self.tool.handle(ctx.events.iter(), renderer);
        if outcome.exit {
            log::info!("exit requested");
            return AppControl::Exit;
        }
        if outcome.toggle_grid {
            self.scene.show_grid = !self.scene.show_grid;
            log::debug!("grid {}", if self.scene.show_grid { "on" } else { "off" });
        }
        self.stale |= outcome.view_changed || outcome.toggle_grid;

        if self.tool.is_dragging() != self.grabbing {
            self.grabbing = self.tool.is_dragging();
            ctx.window.set_cursor(if self.grabbing { CursorIcon::Grabbing } else { CursorIcon::Default });
        }

        if self.stale {
            renderer.clear();
            self.scene.build(renderer);
            self.stale = false;
        }

        let dt = ctx.time.dt;
        let scene = &mut self.scene;
        let stats = renderer.render_with(|r| scene.animate(r, dt));
        if ctx.time.frame_index % STATS_EVERY == 0 {
            log::debug!(
                "frame {}: {} draws, {} indices, {} records",
                ctx.time.frame_index,
                stats.draw_calls,
                stats.indices,
                renderer.arena().vertex_len()
            );
        }

        ctx.render(|_, target| renderer.backend_mut().encode(target))
    }
}

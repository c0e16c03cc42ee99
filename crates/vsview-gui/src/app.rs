use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{info, warn};
use vsview_core::config::ViewerConfig;
use vsview_core::engine::DecodeEngine;
use vsview_core::job::{ImageJob, JobRequest, ViewerContext};
use vsview_core::script::{FilterChain, ScriptParams};
use vsview_core::source::StagedSource;
use vsview_core::store::{ProcessedImage, SlotState};
use vsview_core::viewport::ViewportController;

use crate::input;
use crate::panels;
use crate::textures::EguiTextures;

/// How often the render thread re-checks the slot while the job runs.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// The only job slot in a single-image session.
const IMAGE_SLOT: usize = 0;

/// Everything prepared before the window opens.
pub struct Session {
    pub engine: Arc<dyn DecodeEngine>,
    pub staged: StagedSource,
    pub chain: Arc<FilterChain>,
    pub config: ViewerConfig,
    /// Set when the session ends on an error; read by `main` for the exit code.
    pub fatal: Arc<OnceLock<String>>,
}

pub struct ViewerApp {
    pub viewer: ViewerContext<EguiTextures>,
    pub viewport: Option<ViewportController>,
    session: Session,
    job: Option<JoinHandle<()>>,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, session: Session) -> Self {
        // One point per physical pixel, so zoom 1.0 is 1:1.
        cc.egui_ctx.set_pixels_per_point(1.0);

        let textures = EguiTextures::new(
            cc.egui_ctx.clone(),
            session.config.view.linear_filtering,
        );
        let viewer = ViewerContext::new(textures, Arc::clone(&session.engine), 1);

        Self {
            viewer,
            viewport: None,
            session,
            job: None,
        }
    }

    pub fn image(&self) -> Option<&ProcessedImage<egui::TextureHandle>> {
        self.viewer.store().slot(IMAGE_SLOT).and_then(|slot| slot.image())
    }

    pub fn source_name(&self) -> String {
        self.session
            .staged
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn failure(&self) -> Option<&str> {
        self.session.fatal.get().map(String::as_str)
    }

    /// Start the decode once the display size is known.
    fn start_job(&mut self, ctx: &egui::Context) {
        if self.job.is_some() || self.failure().is_some() {
            return;
        }
        let Some((width, height)) = target_size(ctx) else {
            ctx.request_repaint_after(POLL_INTERVAL);
            return;
        };

        let request = JobRequest {
            slot: IMAGE_SLOT,
            params: ScriptParams {
                target_width: width,
                target_height: height,
                source: self.session.staged.path().to_path_buf(),
                plugin: self.session.config.plugin_path.clone(),
            },
            chain: Arc::clone(&self.session.chain),
        };
        info!(width, height, source = %request.params.source.display(), "Starting decode");

        match ImageJob::spawn(&self.viewer, request) {
            Ok(handle) => self.job = Some(handle),
            Err(e) => self.fail(ctx, e.to_string()),
        }
    }

    /// Pick up the job outcome. Builds the viewport the first time the image
    /// is seen ready.
    fn poll_slot(&mut self, ctx: &egui::Context) {
        if self.viewport.is_some() || self.job.is_none() {
            return;
        }
        let Some(slot) = self.viewer.store().slot(IMAGE_SLOT) else {
            return;
        };

        match slot.state() {
            Some(SlotState::Ready(image)) => {
                match ViewportController::new(
                    (image.width, image.height),
                    display_size(ctx),
                    &self.session.config.view,
                ) {
                    Ok(viewport) => {
                        info!(zoom = viewport.zoom(), "Image shown");
                        self.viewport = Some(viewport);
                    }
                    Err(e) => self.fail(ctx, e.to_string()),
                }
            }
            Some(SlotState::Failed(message)) => self.fail(ctx, message.clone()),
            None => ctx.request_repaint_after(POLL_INTERVAL),
        }
    }

    fn fail(&self, ctx: &egui::Context, message: String) {
        if self.session.fatal.set(message).is_ok() {
            warn!("Closing the viewer after a failure");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_input = input::collect(ctx);
        if frame_input.quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        self.start_job(ctx);
        self.poll_slot(ctx);

        if let Some(viewport) = self.viewport.as_mut() {
            let (w, h) = display_size(ctx);
            viewport.set_display_size(w, h);
            for view_input in frame_input.view {
                viewport.apply(view_input);
            }
        }

        panels::viewport::show(ctx, self);
    }
}

/// Current window size in physical pixels.
fn display_size(ctx: &egui::Context) -> (u32, u32) {
    let rect = ctx.screen_rect();
    (rect.width().round() as u32, rect.height().round() as u32)
}

/// Target size for the decode: the monitor's physical resolution, falling
/// back to the window once it has a size.
fn target_size(ctx: &egui::Context) -> Option<(u32, u32)> {
    let monitor = ctx.input(|i| {
        let viewport = i.viewport();
        let ppp = viewport.native_pixels_per_point.unwrap_or(1.0);
        viewport
            .monitor_size
            .map(|size| ((size.x * ppp).round() as u32, (size.y * ppp).round() as u32))
    });
    monitor
        .or_else(|| Some(display_size(ctx)))
        .filter(|&(w, h)| w > 0 && h > 0)
}

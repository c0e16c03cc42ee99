use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{info, warn};

use crate::convert::convert;
use crate::engine::{decode, DecodeEngine};
use crate::error::{Result, ViewerError};
use crate::frame::{PixelBuffer, PixelLayout};
use crate::script::{FilterChain, FilterScript, ScriptParams};
use crate::store::{ImageStore, ProcessedImage};

/// The rendering context's texture upload. Not safe to call from two threads
/// at once, so it is always reached through the context's lock.
pub trait TextureFactory: Send {
    type Texture: Send + Sync;

    /// Interleaved byte order this renderer consumes.
    const LAYOUT: PixelLayout = PixelLayout::Bgr24;

    /// Upload `pixels` into a texture. The buffer is consumed.
    fn create_texture(&mut self, pixels: PixelBuffer) -> Result<Self::Texture>;
}

/// Everything a job and the render loop share: the renderer behind its lock,
/// the decode engine and the image slots.
pub struct ViewerContext<R: TextureFactory> {
    renderer: Arc<Mutex<R>>,
    engine: Arc<dyn DecodeEngine>,
    store: Arc<ImageStore<R::Texture>>,
}

impl<R: TextureFactory> Clone for ViewerContext<R> {
    fn clone(&self) -> Self {
        Self {
            renderer: Arc::clone(&self.renderer),
            engine: Arc::clone(&self.engine),
            store: Arc::clone(&self.store),
        }
    }
}

impl<R: TextureFactory> ViewerContext<R> {
    pub fn new(renderer: R, engine: Arc<dyn DecodeEngine>, slots: usize) -> Self {
        Self {
            renderer: Arc::new(Mutex::new(renderer)),
            engine,
            store: Arc::new(ImageStore::with_slots(slots)),
        }
    }

    pub fn renderer(&self) -> &Arc<Mutex<R>> {
        &self.renderer
    }

    pub fn engine(&self) -> &dyn DecodeEngine {
        self.engine.as_ref()
    }

    pub fn store(&self) -> &ImageStore<R::Texture> {
        &self.store
    }
}

/// Inputs for one image job.
#[derive(Clone, Debug)]
pub struct JobRequest {
    /// Index of the slot the result is published into.
    pub slot: usize,
    pub params: ScriptParams,
    pub chain: Arc<FilterChain>,
}

pub struct ImageJob;

impl ImageJob {
    /// Run the job on its own thread. The outcome lands in the request's slot.
    pub fn spawn<R>(ctx: &ViewerContext<R>, request: JobRequest) -> Result<JoinHandle<()>>
    where
        R: TextureFactory + 'static,
    {
        if ctx.store().slot(request.slot).is_none() {
            return Err(ViewerError::Init(format!(
                "no image slot {} (store holds {})",
                request.slot,
                ctx.store().len()
            )));
        }

        let ctx = ctx.clone();
        let handle = std::thread::Builder::new()
            .name(format!("vsview-job-{}", request.slot))
            .spawn(move || Self::run_to_slot(&ctx, &request))?;
        Ok(handle)
    }

    fn run_to_slot<R: TextureFactory>(ctx: &ViewerContext<R>, request: &JobRequest) {
        let Some(slot) = ctx.store().slot(request.slot) else {
            return;
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| Self::run(ctx, request)));
        match outcome {
            Ok(Ok(image)) => {
                slot.publish(image);
            }
            Ok(Err(e)) => {
                warn!(slot = request.slot, "Image job failed: {e}");
                slot.fail(e.to_string());
            }
            Err(_) => {
                warn!(slot = request.slot, "Image job panicked");
                slot.fail("image job panicked");
            }
        }
    }

    /// Build, decode, convert and upload on the calling thread.
    pub fn run<R: TextureFactory>(
        ctx: &ViewerContext<R>,
        request: &JobRequest,
    ) -> Result<ProcessedImage<R::Texture>> {
        let start = Instant::now();

        let script = FilterScript::build(&request.params, &request.chain)?;
        let frame = decode(ctx.engine(), &script)?;
        drop(script);

        let pixels = convert(&frame, R::LAYOUT)?;
        drop(frame);

        let (width, height) = (pixels.width(), pixels.height());
        let texture = {
            let mut renderer = ctx.renderer.lock().unwrap_or_else(PoisonError::into_inner);
            renderer.create_texture(pixels)?
        };

        info!(
            slot = request.slot,
            width,
            height,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Image ready"
        );
        Ok(ProcessedImage {
            texture,
            width,
            height,
        })
    }
}

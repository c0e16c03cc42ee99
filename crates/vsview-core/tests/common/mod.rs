#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use vsview_core::engine::{DecodeEngine, EvaluatedScript, OutputNode};
use vsview_core::error::Result;
use vsview_core::frame::{DecodedFrame, NodeInfo, PixelBuffer, PixelLayout, Plane};
use vsview_core::job::TextureFactory;
use vsview_core::script::{FilterChain, FilterScript, ScriptParams};

/// Byte written into row padding so leaks show up in converted output.
pub const PADDING_BYTE: u8 = 0xEE;

pub fn red_at(x: usize, y: usize) -> u8 {
    (10 * y + x) as u8
}

pub fn green_at(x: usize, y: usize) -> u8 {
    (100 + 10 * y + x) as u8
}

pub fn blue_at(x: usize, y: usize) -> u8 {
    (200 + 10 * y + x) as u8
}

/// Synthetic planar frame with distinct per-channel values and padded rows.
pub fn synthetic_frame(width: usize, height: usize, stride: usize) -> DecodedFrame {
    let plane = |value: fn(usize, usize) -> u8| {
        let mut data = vec![PADDING_BYTE; stride * height];
        for y in 0..height {
            for x in 0..width {
                data[y * stride + x] = value(x, y);
            }
        }
        Plane::new(data, stride)
    };
    DecodedFrame::new(
        width as u32,
        height as u32,
        [plane(red_at), plane(green_at), plane(blue_at)],
    )
    .expect("valid synthetic frame")
}

// ---------------------------------------------------------------------------
// Fake decode engine
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub enum Behavior {
    Frame {
        width: usize,
        height: usize,
        stride: usize,
    },
    ScriptFails(String),
    NoOutput,
    FrameCount(Option<usize>),
    FetchFails(String),
}

pub struct FakeEngine {
    behavior: Behavior,
    delay: Duration,
    pub scripts: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            delay: Duration::ZERO,
            scripts: Mutex::new(Vec::new()),
        }
    }

    pub fn frame(width: usize, height: usize, stride: usize) -> Self {
        Self::new(Behavior::Frame {
            width,
            height,
            stride,
        })
    }

    /// Sleep inside evaluation, standing in for a slow engine call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl DecodeEngine for FakeEngine {
    fn evaluate(
        &self,
        script: &FilterScript,
    ) -> std::result::Result<Box<dyn EvaluatedScript + '_>, String> {
        self.scripts.lock().unwrap().push(script.as_str().to_string());
        std::thread::sleep(self.delay);
        match &self.behavior {
            Behavior::ScriptFails(msg) => Err(msg.clone()),
            _ => Ok(Box::new(FakeScript { engine: self })),
        }
    }
}

struct FakeScript<'a> {
    engine: &'a FakeEngine,
}

impl EvaluatedScript for FakeScript<'_> {
    fn output(&self) -> Option<Box<dyn OutputNode + '_>> {
        match self.engine.behavior {
            Behavior::NoOutput => None,
            _ => Some(Box::new(FakeNode {
                behavior: self.engine.behavior.clone(),
            })),
        }
    }
}

struct FakeNode {
    behavior: Behavior,
}

impl OutputNode for FakeNode {
    fn info(&self) -> NodeInfo {
        let (width, height, frame_count) = match self.behavior {
            Behavior::Frame { width, height, .. } => (width as u32, height as u32, Some(1)),
            Behavior::FrameCount(n) => (4, 4, n),
            _ => (4, 4, Some(1)),
        };
        NodeInfo {
            width,
            height,
            frame_count,
            format: "RGB24".to_string(),
        }
    }

    fn get_frame(&self, n: usize) -> std::result::Result<DecodedFrame, String> {
        assert_eq!(n, 0, "only the first frame is ever requested");
        match &self.behavior {
            Behavior::Frame {
                width,
                height,
                stride,
            } => Ok(synthetic_frame(*width, *height, *stride)),
            Behavior::FetchFails(msg) => Err(msg.clone()),
            _ => Ok(synthetic_frame(4, 4, 4)),
        }
    }
}

// ---------------------------------------------------------------------------
// Fake renderer
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeTexture {
    pub id: usize,
    pub width: u32,
    pub height: u32,
    pub top_left: [u8; 3],
}

#[derive(Default)]
pub struct FakeTextures {
    pub uploads: Arc<AtomicUsize>,
}

impl TextureFactory for FakeTextures {
    type Texture = FakeTexture;

    fn create_texture(&mut self, pixels: PixelBuffer) -> Result<FakeTexture> {
        assert_eq!(pixels.layout(), PixelLayout::Bgr24);
        let id = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(FakeTexture {
            id,
            width: pixels.width(),
            height: pixels.height(),
            top_left: pixels.rgb_at(0, 0),
        })
    }
}

// ---------------------------------------------------------------------------
// Script helpers
// ---------------------------------------------------------------------------

pub const CHAIN_TEXT: &str = "i = core.resize.Bicubic(i, target_width, target_height)\ni.set_output()\n";

pub fn test_chain() -> FilterChain {
    FilterChain::from_text(&PathBuf::from("chain.vpy"), CHAIN_TEXT).expect("non-empty chain")
}

pub fn test_params(source: &str) -> ScriptParams {
    ScriptParams {
        target_width: 1920,
        target_height: 1080,
        source: PathBuf::from(source),
        plugin: PathBuf::from("libvapoursynth-stbi.so"),
    }
}

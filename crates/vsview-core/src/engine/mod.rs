//! Decode engine seam.
//!
//! The engine evaluates a [`FilterScript`], exposes the designated output node
//! and yields planar frames from it. Engine-side failures are plain diagnostic
//! strings; [`decode`] maps each stage onto its [`ViewerError`] variant.

mod vspipe;

pub use vspipe::VsPipeEngine;

use tracing::{debug, info};

use crate::error::{Result, ViewerError};
use crate::frame::{DecodedFrame, NodeInfo};
use crate::script::FilterScript;

/// Evaluates scripts. Shared between the job threads.
pub trait DecodeEngine: Send + Sync {
    /// Evaluate `script`; `Err` carries the engine's diagnostic text.
    fn evaluate(
        &self,
        script: &FilterScript,
    ) -> std::result::Result<Box<dyn EvaluatedScript + '_>, String>;
}

/// An evaluated script environment. Dropping it releases the engine handles.
pub trait EvaluatedScript {
    /// The designated output node, `None` when the script never registered one.
    fn output(&self) -> Option<Box<dyn OutputNode + '_>>;
}

pub trait OutputNode {
    fn info(&self) -> NodeInfo;

    /// Fetch frame `n`; `Err` carries the engine's message.
    fn get_frame(&self, n: usize) -> std::result::Result<DecodedFrame, String>;
}

/// Evaluate `script` and report the output node's properties.
pub fn probe(engine: &dyn DecodeEngine, script: &FilterScript) -> Result<NodeInfo> {
    let env = engine.evaluate(script).map_err(ViewerError::Script)?;
    let node = env.output().ok_or(ViewerError::NoOutput)?;
    Ok(node.info())
}

/// Evaluate `script` and pull its first frame. Every failure is terminal.
pub fn decode(engine: &dyn DecodeEngine, script: &FilterScript) -> Result<DecodedFrame> {
    let env = engine.evaluate(script).map_err(ViewerError::Script)?;
    let node = env.output().ok_or(ViewerError::NoOutput)?;

    let node_info = node.info();
    match node_info.frame_count {
        Some(n) if n > 0 => debug!(frames = n, format = %node_info.format, "Output node ready"),
        _ => return Err(ViewerError::UnknownLength),
    }

    let frame = node.get_frame(0).map_err(ViewerError::FrameFetch)?;
    info!(
        width = frame.width(),
        height = frame.height(),
        "Frame decoded"
    );
    Ok(frame)
}

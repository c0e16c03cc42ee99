use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::consts::{PLANE_COUNT, RGB24_FORMAT, SCRIPT_NAME};
use crate::error::{Result, ViewerError};
use crate::frame::{DecodedFrame, NodeInfo, Plane};
use crate::script::FilterScript;

use super::{DecodeEngine, EvaluatedScript, OutputNode};

const MISSING_OUTPUT_MESSAGE: &str = "Failed to retrieve output node";
const SCRIPT_FAILED_MESSAGE: &str = "Script evaluation failed";

/// Runs scripts out-of-process through VapourSynth's `vspipe`.
///
/// `vspipe --info` evaluates the script and describes the output node;
/// frames come back as raw planes on stdout, one plane after another with
/// no row padding.
pub struct VsPipeEngine {
    program: PathBuf,
    output_index: usize,
}

impl VsPipeEngine {
    /// Check that `vspipe` can be launched.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let output = Command::new(&config.vspipe_path)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ViewerError::Init(format!(
                    "couldn't launch {}: {e}",
                    config.vspipe_path.display()
                ))
            })?;
        if !output.status.success() {
            return Err(ViewerError::Init(format!(
                "{} --version failed: {}",
                config.vspipe_path.display(),
                stderr_text(&output)
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        debug!(version = %version.lines().next().unwrap_or_default(), "vspipe found");

        Ok(Self {
            program: config.vspipe_path.clone(),
            output_index: config.output_index,
        })
    }

    /// Base invocation. Callers append their flags, then the script path and
    /// the output file ("-" = stdout).
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--outputindex")
            .arg(self.output_index.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl DecodeEngine for VsPipeEngine {
    fn evaluate(
        &self,
        script: &FilterScript,
    ) -> std::result::Result<Box<dyn EvaluatedScript + '_>, String> {
        let file = write_script(script).map_err(|e| format!("couldn't stage script: {e}"))?;

        let output = self
            .command()
            .arg("--info")
            .arg(file.path())
            .arg("-")
            .output()
            .map_err(|e| format!("couldn't run {}: {e}", self.program.display()))?;

        let node = if output.status.success() {
            Some(parse_info(&String::from_utf8_lossy(&output.stdout))?)
        } else {
            let diagnostic = stderr_text(&output);
            if !is_missing_output(&diagnostic) {
                return Err(diagnostic);
            }
            warn!("{diagnostic}");
            None
        };

        Ok(Box::new(VsPipeScript {
            engine: self,
            file,
            node,
        }))
    }
}

/// Script staged on disk for the lifetime of the evaluation.
struct VsPipeScript<'a> {
    engine: &'a VsPipeEngine,
    file: NamedTempFile,
    node: Option<NodeInfo>,
}

impl EvaluatedScript for VsPipeScript<'_> {
    fn output(&self) -> Option<Box<dyn OutputNode + '_>> {
        let info = self.node.clone()?;
        Some(Box::new(VsPipeNode {
            script: self,
            info,
        }))
    }
}

struct VsPipeNode<'a> {
    script: &'a VsPipeScript<'a>,
    info: NodeInfo,
}

impl OutputNode for VsPipeNode<'_> {
    fn info(&self) -> NodeInfo {
        self.info.clone()
    }

    fn get_frame(&self, n: usize) -> std::result::Result<DecodedFrame, String> {
        if self.info.format != RGB24_FORMAT {
            return Err(format!(
                "output format is {}, only {RGB24_FORMAT} is supported",
                self.info.format
            ));
        }

        let path = self.script.file.path();
        let output = self
            .script
            .engine
            .command()
            .arg("--start")
            .arg(n.to_string())
            .arg("--end")
            .arg(n.to_string())
            .arg(path)
            .arg("-")
            .output()
            .map_err(|e| format!("couldn't run vspipe: {e}"))?;
        if !output.status.success() {
            return Err(stderr_text(&output));
        }

        split_planes(self.info.width, self.info.height, output.stdout)
            .map_err(|e| e.to_string())
    }
}

fn write_script(script: &FilterScript) -> std::io::Result<NamedTempFile> {
    let stem = SCRIPT_NAME.trim_end_matches(".vpy");
    let mut file = tempfile::Builder::new()
        .prefix(stem)
        .suffix(".vpy")
        .tempfile()?;
    file.write_all(script.as_str().as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// `vspipe` reports a script that ran but registered no clip at the requested
/// index with this exact message. Python errors are prefixed with the
/// evaluation failure line and always stay script errors.
fn is_missing_output(diagnostic: &str) -> bool {
    !diagnostic.contains(SCRIPT_FAILED_MESSAGE) && diagnostic.contains(MISSING_OUTPUT_MESSAGE)
}

/// Parse the `Key: Value` lines printed by `vspipe --info`.
pub(crate) fn parse_info(text: &str) -> std::result::Result<NodeInfo, String> {
    let field = |key: &str| {
        text.lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(k, _)| k.trim() == key)
            .map(|(_, v)| v.trim().to_string())
    };
    let number = |key: &str| -> std::result::Result<u64, String> {
        let value = field(key).ok_or_else(|| format!("vspipe --info did not report {key}"))?;
        value
            .parse::<u64>()
            .map_err(|_| format!("vspipe --info reported an invalid {key}: {value}"))
    };

    let width = number("Width")?;
    let height = number("Height")?;
    let frames = number("Frames")?;
    let format = field("Format Name")
        .or_else(|| field("Format"))
        .unwrap_or_else(|| "unknown".to_string());

    Ok(NodeInfo {
        width: u32::try_from(width).map_err(|_| format!("width {width} out of range"))?,
        height: u32::try_from(height).map_err(|_| format!("height {height} out of range"))?,
        frame_count: usize::try_from(frames).ok().filter(|&n| n > 0),
        format,
    })
}

/// Cut a raw RGB24 frame (three unpadded planes back to back) into planes.
pub(crate) fn split_planes(width: u32, height: u32, mut raw: Vec<u8>) -> Result<DecodedFrame> {
    let plane_len = width as usize * height as usize;
    if raw.len() != plane_len * PLANE_COUNT {
        return Err(ViewerError::InvalidFrame(format!(
            "expected {} bytes from vspipe, got {}",
            plane_len * PLANE_COUNT,
            raw.len()
        )));
    }

    let blue = raw.split_off(plane_len * 2);
    let green = raw.split_off(plane_len);
    let red = raw;
    let stride = width as usize;

    DecodedFrame::new(
        width,
        height,
        [
            Plane::new(red, stride),
            Plane::new(green, stride),
            Plane::new(blue, stride),
        ],
    )
}

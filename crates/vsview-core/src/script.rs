use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ViewerError};

/// User-authored filter chain, appended verbatim after the generated header.
#[derive(Clone, Debug)]
pub struct FilterChain {
    path: PathBuf,
    text: String,
}

impl FilterChain {
    /// Read the chain file. An unreadable or blank file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ViewerError::ScriptLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_text(path, text)
    }

    pub fn from_text(path: &Path, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ViewerError::EmptyFilterChain(path.to_path_buf()));
        }
        debug!(path = %path.display(), bytes = text.len(), "Filter chain loaded");
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Values substituted into the script header.
#[derive(Clone, Debug)]
pub struct ScriptParams {
    pub target_width: u32,
    pub target_height: u32,
    pub source: PathBuf,
    pub plugin: PathBuf,
}

/// A complete script ready for evaluation. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterScript {
    text: String,
}

impl FilterScript {
    pub fn build(params: &ScriptParams, chain: &FilterChain) -> Result<Self> {
        let source = python_string_literal(&params.source)?;
        let plugin = python_string_literal(&params.plugin)?;

        let mut text = format!(
            "import vapoursynth as vs\n\
             from os.path import abspath\n\
             core = vs.core\n\
             core.std.LoadPlugin(abspath({plugin}))\n\
             target_width = {}\n\
             target_height = {}\n\
             filename = {source}\n\
             i = core.stb.Image(filename)\n",
            params.target_width, params.target_height,
        );
        text.push_str(chain.text());

        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Quote a path as a double-quoted Python string literal.
///
/// Paths that are not UTF-8 or contain NUL bytes are rejected.
fn python_string_literal(path: &Path) -> Result<String> {
    let raw = path
        .to_str()
        .ok_or_else(|| ViewerError::UnsupportedPath(path.to_string_lossy().into_owned()))?;
    if raw.contains('\0') {
        return Err(ViewerError::UnsupportedPath(raw.replace('\0', "\\0")));
    }

    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(out)
}

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of interleaved bytes per pixel in a converted buffer (8-bit R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Number of planes in a decoded frame (R, G, B).
pub const PLANE_COUNT: usize = 3;

/// Lower bound for the viewport zoom factor.
pub const MIN_ZOOM: f32 = 0.2;

/// Zoom change per wheel notch is `delta / WHEEL_STEP_DIVISOR`.
pub const WHEEL_STEP_DIVISOR: f32 = 10.0;

/// Default filter chain location, relative to the working directory.
pub const DEFAULT_CHAIN_FILE: &str = "chain.vpy";

/// Default decoder plugin, resolved by the script relative to the working directory.
pub const DEFAULT_PLUGIN_FILE: &str = if cfg!(windows) {
    "vapoursynth-stbi.dll"
} else {
    "libvapoursynth-stbi.so"
};

/// Name the script is evaluated under.
pub const SCRIPT_NAME: &str = "chain.vpy";

/// Sub-directory of the system temp dir used to stage source files.
pub const TEMP_DIR_NAME: &str = "crp";

/// Extensions treated as archives (not yet supported).
pub const ARCHIVE_EXTENSIONS: [&str; 5] = ["zip", "7z", "rar", "cbz", "cbr"];

/// Format name reported by the engine for planar 8-bit RGB.
pub const RGB24_FORMAT: &str = "RGB24";

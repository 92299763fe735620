pub const APP_NAME: &str = "frame-sampler";

pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Output file naming: `frame_000042.png`
pub const FRAME_FILE_PREFIX: &str = "frame_";
pub const FRAME_FILE_EXTENSION: &str = "png";
pub const FRAME_INDEX_WIDTH: usize = 6;
/// First index that no longer fits in `FRAME_INDEX_WIDTH` digits.
pub const FRAME_INDEX_LIMIT: u64 = 1_000_000;

/// Substituted when the requested rate is zero, negative or NaN.
pub const DEFAULT_FPS: f64 = 1.0;
/// CLI default, matches the usual 30fps sources.
pub const CLI_DEFAULT_FPS: f64 = 30.0;

pub mod frame_data;
#[cfg(feature = "opencv-backend")]
pub mod video;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::ExtractError;
pub use frame_data::FrameData;

/// Sequential stream of decoded frames.
///
/// The extractor only ever talks to this trait, so the concrete decoder can be
/// swapped (or replaced by a synthetic source in tests).
pub trait VideoSource {
    /// Nominal frames per second as reported by the container.
    fn frame_rate(&self) -> f64;

    /// Next frame in source order, `None` once the stream is exhausted.
    fn read_frame(&mut self) -> Result<Option<FrameData>, ExtractError>;

    /// Frees the underlying decoder. Must tolerate being called twice.
    fn release(&mut self) {}

    fn frame_count_hint(&self) -> Option<u64> {
        None
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        None
    }
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn frame_rate(&self) -> f64 {
        (**self).frame_rate()
    }

    fn read_frame(&mut self) -> Result<Option<FrameData>, ExtractError> {
        (**self).read_frame()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn frame_count_hint(&self) -> Option<u64> {
        (**self).frame_count_hint()
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        (**self).dimensions()
    }
}

/// Opens `path` with the compiled-in backend.
pub fn open_video(path: &Path) -> Result<Box<dyn VideoSource>, ExtractError> {
    #[cfg(feature = "opencv-backend")]
    {
        Ok(Box::new(video::VideoDecoder::new(path)?))
    }
    #[cfg(not(feature = "opencv-backend"))]
    {
        Err(ExtractError::open(
            path,
            "built without a video backend (enable the opencv-backend feature)",
        ))
    }
}

/// Container metadata, printed by the `probe` command.
#[derive(Debug, Serialize)]
pub struct VideoInfo {
    pub path: PathBuf,
    pub fps: f64,
    pub frame_count: Option<u64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

pub fn probe(path: &Path) -> Result<VideoInfo, ExtractError> {
    probe_with(path, open_video)
}

pub fn probe_with<S, F>(path: &Path, open: F) -> Result<VideoInfo, ExtractError>
where
    S: VideoSource,
    F: FnOnce(&Path) -> Result<S, ExtractError>,
{
    if !path.exists() {
        return Err(ExtractError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut source = open(path)?;
    let dimensions = source.dimensions();
    let info = VideoInfo {
        path: path.to_path_buf(),
        fps: source.frame_rate(),
        frame_count: source.frame_count_hint(),
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
    };
    source.release();
    Ok(info)
}

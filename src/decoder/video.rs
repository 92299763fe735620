use opencv::{core, imgproc, prelude::*, videoio};
use std::path::{Path, PathBuf};

use super::frame_data::{self, FrameData};
use super::VideoSource;
use crate::core::error::ExtractError;
use crate::utils::logger;

/// OpenCV `VideoCapture` behind the `VideoSource` seam.
pub struct VideoDecoder {
    capture: videoio::VideoCapture,
    path: PathBuf,
    fps: f64,
    frame_count: Option<u64>,
    width: u32,
    height: u32,
    read_index: u64,
    released: bool,
}

impl VideoDecoder {
    pub fn new(path: &Path) -> Result<Self, ExtractError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| ExtractError::open(path, "path is not valid UTF-8"))?;

        logger::debug(&format!("Opening video with OpenCV: {}", path_str));

        // CAP_ANY allows OpenCV to choose the best backend. HW acceleration is only
        // read while opening; backends without it fall back to software decode.
        let params = core::Vector::<i32>::from_slice(&[
            videoio::CAP_PROP_HW_ACCELERATION,
            videoio::VIDEO_ACCELERATION_ANY,
        ]);
        let capture =
            videoio::VideoCapture::from_file_with_params(path_str, videoio::CAP_ANY, &params)
                .map_err(|e| ExtractError::open(path, e))?;

        if !capture.is_opened().map_err(|e| ExtractError::open(path, e))? {
            return Err(ExtractError::open(path, "no backend could decode the file"));
        }

        let fps = capture
            .get(videoio::CAP_PROP_FPS)
            .map_err(|e| ExtractError::open(path, e))?;
        let acceleration = capture.get(videoio::CAP_PROP_HW_ACCELERATION).unwrap_or(0.0);
        let frame_count = capture
            .get(videoio::CAP_PROP_FRAME_COUNT)
            .ok()
            .filter(|n| n.is_finite() && *n > 0.0)
            .map(|n| n as u64);
        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0) as u32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0) as u32;

        logger::debug(&format!(
            "VideoCapture opened: {}x{} @ {} fps, {:?} frames, hw acceleration {}",
            width, height, fps, frame_count, acceleration
        ));

        Ok(Self {
            capture,
            path: path.to_path_buf(),
            fps,
            frame_count,
            width,
            height,
            read_index: 0,
            released: false,
        })
    }

    /// VideoCapture reports a failed decode the same way as EOF, so the only
    /// trace of a truncated stream is a read count below the container's.
    fn warn_if_short(&self) {
        if frame_data::ended_early(self.read_index, self.frame_count) {
            let msg = format!(
                "{} ended after {} of {} advertised frames",
                self.path.display(),
                self.read_index,
                self.frame_count.unwrap_or_default()
            );
            logger::warn(&msg);
            eprintln!("Warning: {}", msg);
        }
    }

    fn to_rgb(&self, frame: &Mat) -> opencv::Result<Mat> {
        let code = match frame.channels() {
            1 => imgproc::COLOR_GRAY2RGB,
            4 => imgproc::COLOR_BGRA2RGB,
            _ => imgproc::COLOR_BGR2RGB,
        };

        let mut rgb = Mat::default();
        #[cfg(target_os = "macos")]
        imgproc::cvt_color(frame, &mut rgb, code, 0, core::AlgorithmHint::ALGO_HINT_DEFAULT)?;

        #[cfg(not(target_os = "macos"))]
        imgproc::cvt_color(frame, &mut rgb, code, 0)?;

        Ok(rgb)
    }
}

impl VideoSource for VideoDecoder {
    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn read_frame(&mut self) -> Result<Option<FrameData>, ExtractError> {
        let index = self.read_index;
        let mut frame = Mat::default();

        let got_frame = self
            .capture
            .read(&mut frame)
            .map_err(|e| ExtractError::decode(index, e))?;
        if !got_frame || frame.empty() {
            self.warn_if_short();
            return Ok(None); // EOF
        }
        if frame.depth() != core::CV_8U {
            let reason = format!("unsupported pixel depth {}", frame.depth());
            return Err(ExtractError::decode(index, reason));
        }

        let rgb = self.to_rgb(&frame).map_err(|e| ExtractError::decode(index, e))?;
        if !rgb.is_continuous() {
            return Err(ExtractError::decode(index, "frame is not continuous"));
        }
        let bytes = rgb.data_bytes().map_err(|e| ExtractError::decode(index, e))?;

        self.read_index += 1;
        Ok(Some(FrameData::new(
            bytes.to_vec(),
            rgb.cols() as u32,
            rgb.rows() as u32,
            frame_data::timestamp_for(index, self.fps),
        )))
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.capture.release() {
            logger::error(&format!("Failed to release {}: {}", self.path.display(), e));
        } else {
            logger::debug(&format!("Released {}", self.path.display()));
        }
    }

    fn frame_count_hint(&self) -> Option<u64> {
        self.frame_count
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        if self.width > 0 && self.height > 0 {
            Some((self.width, self.height))
        } else {
            None
        }
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        self.release();
    }
}

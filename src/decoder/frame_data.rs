use image::RgbImage;
use std::time::Duration;

/// One decoded frame, RGB8 packed rows, no padding.
#[derive(Clone)]
pub struct FrameData {
    pub buffer: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: Duration,
}

impl FrameData {
    #[cfg_attr(not(feature = "opencv-backend"), allow(dead_code))]
    pub fn new(buffer: Vec<u8>, width: u32, height: u32, timestamp: Duration) -> Self {
        Self { buffer, width, height, timestamp }
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Moves the pixels into an encodable image; the error describes the bad shape.
    pub fn into_image(self) -> Result<RgbImage, String> {
        let expected = self.expected_len();
        if self.width == 0 || self.height == 0 || self.buffer.len() != expected {
            return Err(format!(
                "{}x{} frame carries {} bytes, expected {}",
                self.width,
                self.height,
                self.buffer.len(),
                expected
            ));
        }
        let (width, height) = (self.width, self.height);
        RgbImage::from_raw(width, height, self.buffer)
            .ok_or_else(|| format!("{}x{} frame does not fit its buffer", width, height))
    }
}

/// Presentation time of the `index`-th frame at a constant `fps`.
#[cfg_attr(not(feature = "opencv-backend"), allow(dead_code))]
pub fn timestamp_for(index: u64, fps: f64) -> Duration {
    if fps.is_finite() && fps > 0.0 {
        Duration::from_secs_f64(index as f64 / fps)
    } else {
        Duration::ZERO
    }
}

/// Whether a stream ended before the container's advertised frame count.
///
/// Counts from containers are estimates, so this is only worth a warning.
#[cfg_attr(not(feature = "opencv-backend"), allow(dead_code))]
pub fn ended_early(frames_read: u64, frame_count_hint: Option<u64>) -> bool {
    frame_count_hint.map_or(false, |total| frames_read < total)
}

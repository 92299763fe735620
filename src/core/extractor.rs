use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::ExtractError;
use super::output::OutputSink;
use super::sampling::{PlanWarning, SamplingPlan};
use crate::decoder::{self, VideoSource};
use crate::utils::{logger, time_utils};

/// Everything one run needs; built by the CLI.
#[derive(Clone, Debug)]
pub struct ExtractRequest {
    pub video_path: PathBuf,
    pub output_dir: PathBuf,
    pub desired_fps: f64,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub source_fps: f64,
    pub desired_fps: f64,
    pub step: u64,
    pub frames_read: u64,
    pub frames_saved: u64,
    pub warnings: Vec<PlanWarning>,
    pub elapsed: Duration,
}

/// Releases the wrapped source however the run ends.
struct SourceGuard<S: VideoSource> {
    source: S,
}

impl<S: VideoSource> Drop for SourceGuard<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Samples `request.video_path` into numbered PNGs using the OpenCV backend.
pub fn extract(request: &ExtractRequest) -> Result<ExtractSummary, ExtractError> {
    extract_with(request, decoder::open_video)
}

/// Same as [`extract`] with a caller-supplied way of opening the video.
///
/// Checks run in a fixed order: input exists, output directory, open. A
/// missing input therefore never creates the output directory.
pub fn extract_with<S, F>(
    request: &ExtractRequest,
    open: F,
) -> Result<ExtractSummary, ExtractError>
where
    S: VideoSource,
    F: FnOnce(&Path) -> Result<S, ExtractError>,
{
    let timer = time_utils::Timer::new();
    let video_path = request.video_path.as_path();

    if !video_path.exists() {
        logger::error(&format!("Video not found: {}", video_path.display()));
        return Err(ExtractError::NotFound { path: video_path.to_path_buf() });
    }

    let sink = OutputSink::prepare(&request.output_dir)?;

    let mut guard = SourceGuard { source: open(video_path)? };
    let source_fps = guard.source.frame_rate();

    let plan = SamplingPlan::new(source_fps, request.desired_fps);
    for warning in &plan.warnings {
        logger::warn(&warning.to_string());
        eprintln!("Warning: {}", warning);
    }

    println!("--- Starting extraction ---");
    println!("Source video: {}", video_path.display());
    println!("Original FPS: {:.2}", source_fps);
    println!(
        "Extraction FPS: {} (saving 1 frame every {} frames)",
        plan.desired_fps, plan.step
    );
    println!("Saving to: {}", sink.dir().display());
    logger::info(&format!(
        "extract start: video={} source_fps={} desired_fps={} step={} output={}",
        video_path.display(),
        source_fps,
        plan.desired_fps,
        plan.step,
        sink.dir().display()
    ));
    if let Some(total) = guard.source.frame_count_hint() {
        logger::debug(&format!(
            "container reports {} frames, expecting {} files",
            total,
            plan.expected_saved(total)
        ));
    }

    let (frames_read, frames_saved) = sample_frames(&mut guard.source, &sink, &plan)?;
    drop(guard);

    let elapsed = timer.elapsed();
    println!("\n--- Done ---");
    println!(
        "Saved {} frames to '{}' in {}.",
        frames_saved,
        sink.dir().display(),
        time_utils::format_secs(elapsed)
    );
    logger::info(&format!(
        "extract done: read={} saved={} elapsed={}",
        frames_read,
        frames_saved,
        time_utils::format_secs(elapsed)
    ));

    Ok(ExtractSummary {
        source_fps,
        desired_fps: plan.desired_fps,
        step: plan.step,
        frames_read,
        frames_saved,
        warnings: plan.warnings,
        elapsed,
    })
}

/// The read/decide/write loop. Returns `(frames_read, frames_saved)`.
///
/// `saved` only moves after a successful write, so an error leaves a
/// gap-free prefix of files behind.
fn sample_frames<S: VideoSource>(
    source: &mut S,
    sink: &OutputSink,
    plan: &SamplingPlan,
) -> Result<(u64, u64), ExtractError> {
    let mut read: u64 = 0;
    let mut saved: u64 = 0;

    while let Some(frame) = source.read_frame()? {
        let timestamp = frame.timestamp;
        let image = frame
            .into_image()
            .map_err(|reason| ExtractError::decode(read, reason))?;

        if plan.keeps(read) {
            let path = sink.write(saved, &image)?;
            logger::debug(&format!("frame {} @ {:?} -> {}", read, timestamp, path.display()));
            saved += 1;
        }
        read += 1;
    }

    Ok((read, saved))
}

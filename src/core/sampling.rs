use std::fmt;

use crate::shared::constants;

/// Notice raised while deriving the plan. The run continues after each one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanWarning {
    /// Requested rate was zero, negative or NaN and got replaced.
    InvalidDesiredFps { requested: f64, substituted: f64 },
    /// Requested rate is higher than the source can deliver.
    ExceedsSourceRate { requested: f64, source: f64 },
    /// Backend reported no usable rate (0, negative or non-finite).
    UnknownSourceRate { reported: f64 },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::InvalidDesiredFps {
                requested,
                substituted,
            } => write!(
                f,
                "invalid desired fps ({}), using {} fps instead",
                requested, substituted
            ),
            PlanWarning::ExceedsSourceRate { requested, source } => write!(
                f,
                "desired fps ({}) is higher than the source fps ({:.2}), keeping every frame",
                requested, source
            ),
            PlanWarning::UnknownSourceRate { reported } => write!(
                f,
                "source reports no usable frame rate ({}), keeping every frame",
                reported
            ),
        }
    }
}

/// Derived once per run, before the first frame is read.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    pub source_fps: f64,
    /// Desired rate after normalization.
    pub desired_fps: f64,
    /// Interval between kept frames, always >= 1.
    pub step: u64,
    pub warnings: Vec<PlanWarning>,
}

impl SamplingPlan {
    /// Ratios landing exactly on .5 round half to even: 2.5 -> 2, 3.5 -> 4.
    pub fn new(source_fps: f64, desired_fps: f64) -> Self {
        let mut warnings = Vec::new();

        // `!(x > 0.0)` also catches NaN
        let desired_fps = if !(desired_fps > 0.0) {
            warnings.push(PlanWarning::InvalidDesiredFps {
                requested: desired_fps,
                substituted: constants::DEFAULT_FPS,
            });
            constants::DEFAULT_FPS
        } else {
            desired_fps
        };

        let step = if !(source_fps.is_finite() && source_fps > 0.0) {
            warnings.push(PlanWarning::UnknownSourceRate {
                reported: source_fps,
            });
            1
        } else if desired_fps > source_fps {
            warnings.push(PlanWarning::ExceedsSourceRate {
                requested: desired_fps,
                source: source_fps,
            });
            1
        } else {
            ((source_fps / desired_fps).round_ties_even() as u64).max(1)
        };

        Self {
            source_fps,
            desired_fps,
            step,
            warnings,
        }
    }

    /// Whether the frame at `read_index` (0-based) is written.
    pub fn keeps(&self, read_index: u64) -> bool {
        read_index % self.step == 0
    }

    /// Files produced by a source holding `total_frames` frames.
    pub fn expected_saved(&self, total_frames: u64) -> u64 {
        total_frames.div_ceil(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_to_ten_keeps_every_sixth() {
        let plan = SamplingPlan::new(60.0, 10.0);
        assert_eq!(plan.step, 6);
        assert!(plan.warnings.is_empty());
        assert!(plan.keeps(0));
        assert!(!plan.keeps(5));
        assert!(plan.keeps(6));
        assert_eq!(plan.expected_saved(120), 20);
    }

    #[test]
    fn equal_rates_keep_every_frame_without_warning() {
        let plan = SamplingPlan::new(30.0, 30.0);
        assert_eq!(plan.step, 1);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn zero_and_negative_fall_back_to_one_fps() {
        for requested in [0.0, -5.0] {
            let plan = SamplingPlan::new(60.0, requested);
            assert_eq!(plan.desired_fps, 1.0);
            assert_eq!(plan.step, 60);
            assert_eq!(
                plan.warnings,
                vec![PlanWarning::InvalidDesiredFps {
                    requested,
                    substituted: 1.0
                }]
            );
        }
    }

    #[test]
    fn nan_request_is_normalized() {
        let plan = SamplingPlan::new(24.0, f64::NAN);
        assert_eq!(plan.desired_fps, 1.0);
        assert_eq!(plan.step, 24);
        assert_eq!(plan.warnings.len(), 1);
    }

    #[test]
    fn request_above_source_keeps_everything() {
        let plan = SamplingPlan::new(25.0, 60.0);
        assert_eq!(plan.step, 1);
        assert_eq!(
            plan.warnings,
            vec![PlanWarning::ExceedsSourceRate {
                requested: 60.0,
                source: 25.0
            }]
        );
        assert_eq!(plan.expected_saved(37), 37);
    }

    #[test]
    fn half_ratios_round_to_even() {
        assert_eq!(SamplingPlan::new(25.0, 10.0).step, 2);
        assert_eq!(SamplingPlan::new(35.0, 10.0).step, 4);
        assert_eq!(SamplingPlan::new(45.0, 10.0).step, 4);
        assert_eq!(SamplingPlan::new(15.0, 10.0).step, 2);
    }

    #[test]
    fn ntsc_rates_round_to_nearest() {
        assert_eq!(SamplingPlan::new(29.97, 10.0).step, 3);
        assert_eq!(SamplingPlan::new(59.94, 1.0).step, 60);
    }

    #[test]
    fn unknown_source_rate_keeps_every_frame() {
        for reported in [0.0, -1.0, f64::INFINITY] {
            let plan = SamplingPlan::new(reported, 10.0);
            assert_eq!(plan.step, 1);
            assert!(matches!(
                plan.warnings.as_slice(),
                [PlanWarning::UnknownSourceRate { .. }]
            ));
        }
    }

    #[test]
    fn both_warnings_can_stack() {
        let plan = SamplingPlan::new(0.0, -2.0);
        assert_eq!(plan.step, 1);
        assert_eq!(plan.warnings.len(), 2);
    }

    #[test]
    fn expected_saved_rounds_up_partial_groups() {
        let plan = SamplingPlan::new(60.0, 10.0);
        assert_eq!(plan.expected_saved(0), 0);
        assert_eq!(plan.expected_saved(1), 1);
        assert_eq!(plan.expected_saved(121), 21);
    }
}

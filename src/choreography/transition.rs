//! Time-based camera transitions.
//!
//! A transition is pure data: it is sampled at an absolute time and never
//! advances on its own. Progress is clamped, so sampling past the end yields
//! exactly the end state.

use bevy::prelude::*;
use std::time::Duration;

use crate::choreography::CameraState;

/// Ease-out curves used by the choreography. Both map 0 to 0 and 1 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    QuinticOut,
    CubicOut,
}

impl Easing {
    pub fn ease(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::QuinticOut => 1.0 - (1.0 - t).powi(5),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    IntroFlight,
    FocusOnRegion,
    ReturnToOverview,
    DistanceZoom,
}

/// How the camera moves between start and end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPath {
    /// Position and look-at target both interpolate linearly.
    Linear {
        start_position: Vec3,
        end_position: Vec3,
        start_target: Vec3,
        end_target: Vec3,
    },
    /// Distance from the origin changes along a fixed direction; the target is left alone.
    Radial {
        direction: Vec3,
        start_distance: f32,
        end_distance: f32,
    },
}

/// Work to run once a transition reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    RevealRegion,
    ResumeRotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub started_at: Duration,
    pub duration: Duration,
    pub path: CameraPath,
    /// Field of view in degrees, start and end.
    pub fov_deg: Option<(f32, f32)>,
    pub easing: Easing,
    pub on_complete: Option<Completion>,
}

impl Transition {
    /// Raw progress in [0, 1].
    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.started_at) >= self.duration
    }

    /// Camera state at `now`. `current` supplies anything the path doesn't drive.
    pub fn sample(&self, now: Duration, current: &CameraState) -> CameraState {
        if self.is_finished(now) {
            return self.end_state(current);
        }
        self.sample_eased(self.easing.ease(self.progress(now)), current)
    }

    /// Exact end values, with no interpolation error.
    pub fn end_state(&self, current: &CameraState) -> CameraState {
        let mut state = *current;
        match self.path {
            CameraPath::Linear {
                end_position,
                end_target,
                ..
            } => {
                state.position = end_position;
                state.target = end_target;
            }
            CameraPath::Radial {
                direction,
                end_distance,
                ..
            } => {
                state.position = direction * end_distance;
            }
        }
        if let Some((_, end_fov)) = self.fov_deg {
            state.fov_deg = end_fov;
        }
        state
    }

    fn sample_eased(&self, eased: f32, current: &CameraState) -> CameraState {
        let mut state = *current;
        match self.path {
            CameraPath::Linear {
                start_position,
                end_position,
                start_target,
                end_target,
            } => {
                state.position = start_position.lerp(end_position, eased);
                state.target = start_target.lerp(end_target, eased);
            }
            CameraPath::Radial {
                direction,
                start_distance,
                end_distance,
            } => {
                let distance = start_distance + (end_distance - start_distance) * eased;
                state.position = direction * distance;
            }
        }
        if let Some((start_fov, end_fov)) = self.fov_deg {
            state.fov_deg = start_fov + (end_fov - start_fov) * eased;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn linear(duration_ms: u64) -> Transition {
        Transition {
            kind: TransitionKind::FocusOnRegion,
            started_at: Duration::from_millis(1000),
            duration: Duration::from_millis(duration_ms),
            path: CameraPath::Linear {
                start_position: Vec3::new(0.0, 0.0, 3.6),
                end_position: Vec3::new(1.0, 0.5, 0.2),
                start_target: Vec3::ZERO,
                end_target: Vec3::new(0.9, 0.45, 0.18),
            },
            fov_deg: Some((25.0, 45.0)),
            easing: Easing::CubicOut,
            on_complete: None,
        }
    }

    fn camera() -> CameraState {
        CameraState {
            position: Vec3::new(0.0, 0.0, 3.6),
            target: Vec3::ZERO,
            fov_deg: 60.0,
        }
    }

    #[test]
    fn test_easing_endpoints_and_monotonic() {
        for easing in [Easing::QuinticOut, Easing::CubicOut] {
            assert_eq!(easing.ease(0.0), 0.0);
            assert_eq!(easing.ease(1.0), 1.0);
            assert_eq!(easing.ease(-0.5), 0.0);
            assert_eq!(easing.ease(1.5), 1.0);
            let mut previous = 0.0;
            for i in 1..=100 {
                let value = easing.ease(i as f32 / 100.0);
                assert!(value >= previous);
                previous = value;
            }
        }
        assert!((Easing::CubicOut.ease(0.5) - 0.875).abs() < EPSILON);
        assert!((Easing::QuinticOut.ease(0.5) - 0.96875).abs() < EPSILON);
    }

    #[test]
    fn test_sample_at_start_and_past_end() {
        let transition = linear(2500);
        let start = transition.sample(Duration::from_millis(1000), &camera());
        assert!((start.position - Vec3::new(0.0, 0.0, 3.6)).length() < EPSILON);
        assert!((start.fov_deg - 25.0).abs() < EPSILON);

        // Well past the end: exactly the end values
        let end = transition.sample(Duration::from_secs(60), &camera());
        assert_eq!(end.position, Vec3::new(1.0, 0.5, 0.2));
        assert_eq!(end.target, Vec3::new(0.9, 0.45, 0.18));
        assert_eq!(end.fov_deg, 45.0);
    }

    #[test]
    fn test_sample_before_start_is_clamped() {
        let transition = linear(2500);
        assert_eq!(transition.progress(Duration::ZERO), 0.0);
        assert!(!transition.is_finished(Duration::ZERO));
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let transition = linear(0);
        assert!(transition.is_finished(Duration::from_millis(1000)));
        assert_eq!(transition.progress(Duration::from_millis(1000)), 1.0);
    }

    #[test]
    fn test_radial_keeps_direction_and_target() {
        let direction = Vec3::new(0.0, 0.6, 0.8);
        let transition = Transition {
            kind: TransitionKind::DistanceZoom,
            started_at: Duration::ZERO,
            duration: Duration::from_millis(650),
            path: CameraPath::Radial {
                direction,
                start_distance: 3.0,
                end_distance: 2.4,
            },
            fov_deg: None,
            easing: Easing::CubicOut,
            on_complete: None,
        };
        let current = CameraState {
            position: direction * 3.0,
            target: Vec3::new(0.1, 0.0, 0.0),
            fov_deg: 45.0,
        };
        let mid = transition.sample(Duration::from_millis(300), &current);
        assert!(mid.position.normalize().abs_diff_eq(direction, EPSILON));
        assert!(mid.position.length() < 3.0 && mid.position.length() > 2.4);
        assert_eq!(mid.target, current.target);
        assert_eq!(mid.fov_deg, 45.0);
    }
}

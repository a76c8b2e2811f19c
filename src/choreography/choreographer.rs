//! Camera choreography: intro flight, focus, return and zoom.
//!
//! At most one transition is active. Starting a new one replaces the old one
//! outright, so the replaced transition's completion never runs. The new
//! transition starts from wherever the camera currently is.

use bevy::prelude::*;
use std::time::Duration;

use crate::choreography::transition::{CameraPath, Completion, Easing, Transition, TransitionKind};
use crate::choreography::{CameraState, ViewMode};
use crate::context::GlobeViewContext;
use crate::overlay::sync::{hide_region, reveal_region};

impl GlobeViewContext {
    /// Place the camera far out above the region and queue the intro flight.
    pub fn schedule_intro(&mut self, now: Duration) {
        let (start, _) = self.intro_endpoints();
        let region = self.region_world_point();
        self.camera = CameraState {
            position: start,
            target: region,
            fov_deg: self.config.intro_start_fov_deg,
        };
        self.suspend_rotation();
        self.scheduled_intro = Some(now + self.config.intro_delay);
        info!(
            "Intro flight scheduled in {:.1}s",
            self.config.intro_delay.as_secs_f32()
        );
    }

    pub fn start_intro_flight(&mut self, now: Duration) {
        self.scheduled_intro = None;
        let (start, end) = self.intro_endpoints();
        let region = self.region_world_point();
        self.suspend_rotation();
        self.begin(Transition {
            kind: TransitionKind::IntroFlight,
            started_at: now,
            duration: self.config.intro_duration,
            path: CameraPath::Linear {
                start_position: start,
                end_position: end,
                start_target: region,
                end_target: region,
            },
            fov_deg: Some((self.config.intro_start_fov_deg, self.config.intro_end_fov_deg)),
            easing: Easing::QuinticOut,
            on_complete: Some(Completion::ResumeRotation),
        });
    }

    /// Fly to just above the region. Only valid from the overview.
    pub fn focus_on_region(&mut self, now: Duration) -> bool {
        if self.view_mode != ViewMode::Overview {
            return false;
        }
        let region = self.region_world_point();
        self.suspend_rotation();
        self.view_mode = ViewMode::FocusedOnRegion;
        self.begin(Transition {
            kind: TransitionKind::FocusOnRegion,
            started_at: now,
            duration: self.config.focus_duration,
            path: CameraPath::Linear {
                start_position: self.camera.position,
                end_position: region * self.config.focus_offset_scale,
                start_target: self.camera.target,
                end_target: region,
            },
            fov_deg: None,
            easing: Easing::CubicOut,
            on_complete: Some(Completion::RevealRegion),
        });
        true
    }

    /// Hide the highlight and fly back out. Only valid while focused.
    pub fn return_to_overview(&mut self, now: Duration) -> bool {
        if self.view_mode != ViewMode::FocusedOnRegion {
            return false;
        }
        hide_region(self);
        self.view_mode = ViewMode::Overview;
        self.begin(Transition {
            kind: TransitionKind::ReturnToOverview,
            started_at: now,
            duration: self.config.return_duration,
            path: CameraPath::Linear {
                start_position: self.camera.position,
                end_position: self.config.overview_position,
                start_target: self.camera.target,
                end_target: self.config.overview_target,
            },
            fov_deg: None,
            easing: Easing::CubicOut,
            on_complete: Some(Completion::ResumeRotation),
        });
        true
    }

    pub fn toggle_focus(&mut self, now: Duration) {
        match self.view_mode {
            ViewMode::Overview => self.focus_on_region(now),
            ViewMode::FocusedOnRegion => self.return_to_overview(now),
        };
    }

    pub fn zoom_in(&mut self, now: Duration) {
        self.zoom_by(self.config.zoom_in_factor, now);
    }

    pub fn zoom_out(&mut self, now: Duration) {
        self.zoom_by(self.config.zoom_out_factor, now);
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.controls.auto_rotate = !self.controls.auto_rotate;
        info!("Auto-rotate {}", if self.controls.auto_rotate { "on" } else { "off" });
    }

    /// Step the choreography to `now` and return the camera state to apply.
    ///
    /// Completion work runs exactly once, on the tick that reaches the end.
    pub fn advance(&mut self, now: Duration) -> CameraState {
        if self.scheduled_intro.is_some_and(|at| now >= at) {
            self.start_intro_flight(now);
        }

        if let Some(finished) = self.active_transition.take_if(|t| t.is_finished(now)) {
            self.camera = finished.end_state(&self.camera);
            info!("{:?} complete", finished.kind);
            if let Some(completion) = finished.on_complete {
                self.run_completion(completion);
            }
        } else if let Some(active) = self.active_transition.as_ref() {
            self.camera = active.sample(now, &self.camera);
        }
        self.camera
    }

    fn zoom_by(&mut self, factor: f32, now: Duration) {
        let position = self.camera.position;
        let distance = position.length();
        let Some(direction) = position.try_normalize() else {
            return;
        };
        let target_distance = self.controls.clamp_distance(distance * factor);
        self.begin(Transition {
            kind: TransitionKind::DistanceZoom,
            started_at: now,
            duration: self.config.zoom_duration,
            path: CameraPath::Radial {
                direction,
                start_distance: distance,
                end_distance: target_distance,
            },
            fov_deg: None,
            easing: Easing::CubicOut,
            on_complete: None,
        });
    }

    fn begin(&mut self, transition: Transition) {
        if let Some(previous) = self.active_transition.as_ref() {
            debug!("{:?} superseded by {:?}", previous.kind, transition.kind);
        }
        if transition.kind != TransitionKind::IntroFlight && self.scheduled_intro.take().is_some() {
            debug!("Pending intro flight cancelled");
        }
        info!(
            "{:?} started ({:.2}s)",
            transition.kind,
            transition.duration.as_secs_f32()
        );
        self.active_transition = Some(transition);
    }

    fn run_completion(&mut self, completion: Completion) {
        match completion {
            Completion::RevealRegion => reveal_region(self),
            Completion::ResumeRotation => self.resume_rotation(),
        }
    }

    fn intro_endpoints(&self) -> (Vec3, Vec3) {
        let region = self.region_world_point();
        (
            region * self.config.intro_start_scale,
            region * self.config.intro_end_scale,
        )
    }
}

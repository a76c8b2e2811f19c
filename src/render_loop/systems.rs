use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::context::{GlobeViewContext, Viewport};

pub fn drive_frame(time: Res<Time>, mut ctx: ResMut<GlobeViewContext>) {
    ctx.tick(time.elapsed(), time.delta_secs());
}

/// Poll the primary window size and forward changes to the context.
pub fn track_viewport(
    window_q: Query<&Window, With<PrimaryWindow>>,
    mut ctx: ResMut<GlobeViewContext>,
) {
    let Ok(window) = window_q.single() else {
        return;
    };
    let size = Viewport {
        width: window.width(),
        height: window.height(),
    };
    if ctx.viewport == Some(size) {
        return;
    }
    debug!("Viewport {}x{}", size.width, size.height);
    ctx.on_resize(size.width, size.height);
}

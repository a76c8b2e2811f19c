//! Reveal and hide the region highlight: outlines, fills, label and insets.
//!
//! Both are idempotent and tolerate an empty overlay group and a missing inset host.

use bevy::prelude::*;

use crate::context::GlobeViewContext;

/// Show outlines and fills and bring up the inset maps.
pub fn reveal_region(ctx: &mut GlobeViewContext) {
    let outline = ctx.config.revealed_outline_opacity;
    let fill = ctx.config.highlighted_fill_opacity;
    ctx.overlays.set_opacity(outline, fill);
    ctx.label.opacity = fill;
    if let Some(insets) = ctx.insets.as_mut() {
        insets.reveal(&ctx.config);
    }
    info!(
        "Region revealed ({} outlines, {} fills)",
        ctx.overlays.outlines.len(),
        ctx.overlays.fills.len()
    );
}

pub fn hide_region(ctx: &mut GlobeViewContext) {
    ctx.overlays.set_opacity(0.0, 0.0);
    ctx.label.opacity = 0.0;
    if let Some(insets) = ctx.insets.as_mut() {
        insets.hide();
    }
    debug!("Region hidden");
}

/// Close the inset panels without touching the camera or the globe overlays.
pub fn dismiss_overlay(ctx: &mut GlobeViewContext) {
    if let Some(insets) = ctx.insets.as_mut() {
        insets.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{OverlayGroup, OverlayKind, OverlayMesh};

    fn context() -> GlobeViewContext {
        let mut ctx = GlobeViewContext::default();
        ctx.overlays = OverlayGroup {
            outlines: vec![
                OverlayMesh::new(OverlayKind::Outline, vec![Vec3::X; 4]),
                OverlayMesh::new(OverlayKind::Outline, vec![Vec3::Y; 4]),
            ],
            fills: vec![
                OverlayMesh::new(OverlayKind::Fill, vec![Vec3::X; 12]),
                OverlayMesh::new(OverlayKind::Fill, vec![Vec3::Y; 12]),
            ],
        };
        ctx
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let mut ctx = context();
        reveal_region(&mut ctx);
        let once = ctx.overlays.clone();
        reveal_region(&mut ctx);
        assert_eq!(ctx.overlays, once);
        assert!(ctx.overlays.outlines.iter().all(|o| o.opacity == 1.0));
        assert!(ctx.overlays.fills.iter().all(|f| f.opacity == 0.95));
        assert_eq!(ctx.label.opacity, 0.95);
        assert!(ctx.insets.as_ref().is_some_and(|i| i.is_visible()));
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut ctx = context();
        reveal_region(&mut ctx);
        hide_region(&mut ctx);
        hide_region(&mut ctx);
        assert!(ctx.overlays.outlines.iter().all(|o| o.opacity == 0.0));
        assert!(ctx.overlays.fills.iter().all(|f| f.opacity == 0.0));
        assert_eq!(ctx.label.opacity, 0.0);
        assert!(ctx.insets.as_ref().is_some_and(|i| !i.is_visible()));
    }

    #[test]
    fn test_reveal_and_hide_on_empty_group_without_insets() {
        let mut ctx = GlobeViewContext::default();
        ctx.insets = None;
        reveal_region(&mut ctx);
        // The label does not depend on boundary data
        assert_eq!(ctx.label.opacity, 0.95);
        hide_region(&mut ctx);
        dismiss_overlay(&mut ctx);
        assert!(ctx.overlays.is_empty());
        assert_eq!(ctx.label.opacity, 0.0);
    }

    #[test]
    fn test_dismiss_leaves_globe_overlays() {
        let mut ctx = context();
        reveal_region(&mut ctx);
        dismiss_overlay(&mut ctx);
        assert!(ctx.overlays.outlines.iter().all(|o| o.opacity == 1.0));
        assert!(ctx.insets.as_ref().is_some_and(|i| !i.is_visible()));
    }
}

//! Zoom state and the viewport/document coordinate transform.
//!
//! Fields are stored in unscaled document coordinates (pixels at 100% zoom).
//! A drop lands in viewport coordinates relative to the scaled canvas
//! container; mapping divides by the zoom factor, and rendering multiplies
//! back, so a field visually tracks the cursor at any zoom level.

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom factor clamped to `[0.5, 3.0]`, adjusted in 0.1 steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom(f64);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(1.0)
    }
}

impl Zoom {
    pub fn new(factor: f64) -> Self {
        Zoom(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Snap to the 0.1 grid so repeated steps never accumulate float
    /// drift (ten zoom-ins from 1.0 must land exactly on 2.0).
    fn snapped(factor: f64) -> Self {
        Zoom(((factor * 10.0).round() / 10.0).clamp(MIN_ZOOM, MAX_ZOOM))
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Zoom::snapped(self.0 + ZOOM_STEP)
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Zoom::snapped(self.0 - ZOOM_STEP)
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Zoom::default()
    }
}

/// The canvas container's bounding rectangle in viewport coordinates, as
/// reported by the host on each drop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
}

/// Map a drop event's viewport point into unscaled document space.
pub fn viewport_to_document(
    client_x: f64,
    client_y: f64,
    rect: ContainerRect,
    zoom: Zoom,
) -> (f64, f64) {
    (
        (client_x - rect.left) / zoom.factor(),
        (client_y - rect.top) / zoom.factor(),
    )
}

/// Inverse of [`viewport_to_document`]: where a document-space point lands
/// on screen at the current zoom.
pub fn document_to_viewport(
    doc_x: f64,
    doc_y: f64,
    rect: ContainerRect,
    zoom: Zoom,
) -> (f64, f64) {
    (
        doc_x * zoom.factor() + rect.left,
        doc_y * zoom.factor() + rect.top,
    )
}

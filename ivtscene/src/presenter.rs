//! Presentation adapter tracking the active projection surface.

use std::sync::Mutex;

use ivtplayback::PresentationAdapter;
use ivtplaylist::PlaylistEntry;
use tracing::debug;

use crate::geometry::ScreenGeometry;

/// What the render layer should currently be showing.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSurface {
    pub title: String,
    pub geometry: ScreenGeometry,
    pub playing: bool,
}

/// Consumes orchestrator notifications and keeps the active surface
/// selection current. A host engine reads [`GeometryPresenter::active`]
/// each frame (or on change) to decide which mesh is visible and where the
/// video texture is bound.
#[derive(Default)]
pub struct GeometryPresenter {
    active: Mutex<Option<ActiveSurface>>,
}

impl GeometryPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<ActiveSurface> {
        self.active.lock().unwrap().clone()
    }

    /// True when the panoramic sphere is the visible surface.
    pub fn sphere_active(&self) -> bool {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|surface| surface.geometry.is_panoramic())
            .unwrap_or(false)
    }
}

impl PresentationAdapter for GeometryPresenter {
    fn present(&self, entry: &PlaylistEntry, playing: bool) {
        let geometry = ScreenGeometry::for_mode(entry.mode);
        debug!(title = %entry.title, panoramic = geometry.is_panoramic(), playing, "surface updated");
        *self.active.lock().unwrap() = Some(ActiveSurface {
            title: entry.title.clone(),
            geometry,
            playing,
        });
    }
}

//! Screen and sphere parameter math.

use glam::Vec3;
use ivtplaylist::ProjectionMode;

/// Default physical screen size, in meters.
const DEFAULT_WIDTH: f32 = 3.2;
const DEFAULT_HEIGHT: f32 = 1.8;
/// Default horizontal field of view the screen subtends, in degrees.
const DEFAULT_FOV_DEG: f32 = 95.0;
/// Default distance from the viewer to the near edge of the screen arc.
const DEFAULT_DISTANCE: f32 = 2.2;
/// Seated eye height; the screen is centered on it.
const EYE_HEIGHT: f32 = 1.4;

const SPHERE_RADIUS: f32 = 10.0;
const SPHERE_SEGMENTS: u32 = 64;
const MIN_SCREEN_SEGMENTS: u32 = 12;

/// A cylinder-section screen wrapped around the viewer.
///
/// The radius follows from the requested width and subtended field of
/// view: an arc of angle θ and length `width` has radius `width / θ`. The
/// screen is pushed back so its arc sits `distance` in front of the viewer
/// and yawed half a turn to face them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvedScreen {
    pub width: f32,
    pub height: f32,
    /// Cylinder radius, in meters.
    pub radius: f32,
    /// Subtended arc, in radians.
    pub arc: f32,
    /// Horizontal tessellation.
    pub segments: u32,
    /// Cylinder axis position.
    pub center: Vec3,
    /// Rotation around the vertical axis, in radians.
    pub yaw: f32,
}

impl CurvedScreen {
    pub fn new(width: f32, height: f32, fov_deg: f32, distance: f32) -> Self {
        let arc = fov_deg.to_radians();
        let radius = width / arc;
        let segments = ((fov_deg / 2.0).floor() as u32).max(MIN_SCREEN_SEGMENTS);
        Self {
            width,
            height,
            radius,
            arc,
            segments,
            center: Vec3::new(0.0, EYE_HEIGHT, -(distance + radius)),
            yaw: std::f32::consts::PI,
        }
    }
}

impl Default for CurvedScreen {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_FOV_DEG, DEFAULT_DISTANCE)
    }
}

/// An inside-facing sphere for equirectangular panoramas. The viewer sits
/// at the center; the texture is mapped to the interior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanoSphere {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PanoSphere {
    fn default() -> Self {
        Self {
            radius: SPHERE_RADIUS,
            width_segments: SPHERE_SEGMENTS,
            height_segments: SPHERE_SEGMENTS,
        }
    }
}

/// The surface an entry is projected onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScreenGeometry {
    Curved(CurvedScreen),
    Sphere(PanoSphere),
}

impl ScreenGeometry {
    pub fn for_mode(mode: ProjectionMode) -> Self {
        match mode {
            ProjectionMode::Flat => Self::Curved(CurvedScreen::default()),
            ProjectionMode::Panoramic => Self::Sphere(PanoSphere::default()),
        }
    }

    pub fn is_panoramic(&self) -> bool {
        matches!(self, Self::Sphere(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curved_screen_radius_follows_from_width_and_fov() {
        let screen = CurvedScreen::default();
        let arc = 95.0_f32.to_radians();
        assert!((screen.arc - arc).abs() < 1e-6);
        assert!((screen.radius - 3.2 / arc).abs() < 1e-6);
        // Pushed back by distance + radius, centered at eye height.
        assert!((screen.center.z + (2.2 + screen.radius)).abs() < 1e-6);
        assert!((screen.center.y - 1.4).abs() < 1e-6);
        assert!((screen.yaw - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn screen_tessellation_scales_with_fov_but_never_degenerates() {
        assert_eq!(CurvedScreen::new(3.2, 1.8, 95.0, 2.2).segments, 47);
        assert_eq!(CurvedScreen::new(3.2, 1.8, 10.0, 2.2).segments, 12);
    }

    #[test]
    fn mode_selects_surface() {
        assert!(ScreenGeometry::for_mode(ProjectionMode::Panoramic).is_panoramic());
        assert!(!ScreenGeometry::for_mode(ProjectionMode::Flat).is_panoramic());
    }

    #[test]
    fn pano_sphere_surrounds_the_viewer() {
        let sphere = PanoSphere::default();
        assert_eq!(sphere.radius, 10.0);
        assert_eq!(sphere.width_segments, 64);
        assert_eq!(sphere.height_segments, 64);
    }
}

//=========================================================================
// Hit Testing
//=========================================================================
//
// The projection of a pointer ray into the scene belongs to the rendering
// collaborator (camera + target object). The core only asks one question:
// "does the pointer at this normalized position hit the target?"
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::pointer_state::ScreenPoint;

//=== HitTarget ===========================================================

/// Camera + target pair supplied by the rendering collaborator.
///
/// Implemented for any `Fn(ScreenPoint) -> bool`, so a raycaster closure can
/// be passed directly.
pub trait HitTarget {
    fn hit_test(&self, point: ScreenPoint) -> bool;
}

impl<F> HitTarget for F
where
    F: Fn(ScreenPoint) -> bool,
{
    fn hit_test(&self, point: ScreenPoint) -> bool {
        self(point)
    }
}

//=== ScreenRegion ========================================================

/// Axis-aligned region in normalized screen space.
///
/// Stands in for the screen projection of a flat card facing the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRegion {
    pub min: ScreenPoint,
    pub max: ScreenPoint,
}

impl ScreenRegion {
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(min.x.min(max.x), min.y.min(max.y)),
            max: ScreenPoint::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Region centered on `center` with half extents.
    pub fn centered(center: ScreenPoint, half_width: f32, half_height: f32) -> Self {
        Self::new(
            ScreenPoint::new(center.x - half_width, center.y - half_height),
            ScreenPoint::new(center.x + half_width, center.y + half_height),
        )
    }
}

impl HitTarget for ScreenRegion {
    fn hit_test(&self, point: ScreenPoint) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}

//=== HitTester ===========================================================

/// Optional hit target; without one every test fails.
#[derive(Default)]
pub struct HitTester {
    target: Option<Box<dyn HitTarget>>,
}

impl HitTester {
    pub fn new(target: Option<Box<dyn HitTarget>>) -> Self {
        Self { target }
    }

    pub fn is_configured(&self) -> bool {
        self.target.is_some()
    }

    pub fn test(&self, point: ScreenPoint) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.hit_test(point))
    }
}

impl fmt::Debug for HitTester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HitTester")
            .field("configured", &self.is_configured())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target_never_hits() {
        let tester = HitTester::default();
        assert!(!tester.is_configured());
        assert!(!tester.test(ScreenPoint::new(0.0, 0.0)));
    }

    #[test]
    fn closure_targets_are_accepted() {
        let tester = HitTester::new(Some(Box::new(|p: ScreenPoint| p.x > 0.0)));
        assert!(tester.test(ScreenPoint::new(0.5, 0.0)));
        assert!(!tester.test(ScreenPoint::new(-0.5, 0.0)));
    }

    #[test]
    fn region_contains_its_edges() {
        let region = ScreenRegion::centered(ScreenPoint::new(0.0, 0.0), 0.25, 0.5);

        assert!(region.hit_test(ScreenPoint::new(0.25, 0.5)));
        assert!(region.hit_test(ScreenPoint::new(0.0, 0.0)));
        assert!(!region.hit_test(ScreenPoint::new(0.26, 0.0)));
        assert!(!region.hit_test(ScreenPoint::new(0.0, -0.51)));
    }

    #[test]
    fn region_orders_corners() {
        let region = ScreenRegion::new(ScreenPoint::new(1.0, 1.0), ScreenPoint::new(-1.0, -1.0));
        assert_eq!(region.min, ScreenPoint::new(-1.0, -1.0));
        assert!(region.hit_test(ScreenPoint::new(0.0, 0.0)));
    }
}

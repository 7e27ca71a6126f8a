// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Screen-space utilities: the viewport transform and its inverse for mouse picking.
//!
//! Window coordinates handed to [`viewport_transform`] and [`pick_ray`] use the
//! screen-down convention (y grows downwards from the top of the viewport).
//! [`unproject`] takes the math-up convention (y grows upwards).

use super::error::{MathError, Result};
use super::matrix::Matrix4;
use super::vector::{normalize3, sub3, Triple};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A viewport rectangle in window pixels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Encode, Decode,
)]
pub struct Viewport {
    /// The x-coordinate of the viewport origin.
    pub x: i32,
    /// The y-coordinate of the viewport origin.
    pub y: i32,
    /// The width of the viewport.
    pub width: i32,
    /// The height of the viewport.
    pub height: i32,
}

impl Viewport {
    /// Creates a new viewport.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Width divided by height, suitable for [`Matrix4::perspective`].
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// The window depth range NDC depth is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct DepthRange {
    /// Depth assigned to NDC `z = -1`.
    pub near: f64,
    /// Depth assigned to NDC `z = 1`.
    pub far: f64,
}

impl Default for DepthRange {
    /// Returns the conventional `0.0..1.0` range.
    fn default() -> Self {
        Self {
            near: 0.0,
            far: 1.0,
        }
    }
}

/// A ray through a picked pixel, from the near plane to the far plane, in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct PickRay {
    /// Where the ray crosses the near clipping plane.
    pub near: Triple,
    /// Where the ray crosses the far clipping plane.
    pub far: Triple,
}

impl PickRay {
    /// Returns the unit direction from `near` to `far`.
    #[inline]
    pub fn direction(&self) -> Triple {
        normalize3(sub3(self.far, self.near))
    }
}

/// Maps normalized device coordinates to window coordinates.
///
/// Returns `(x, y, depth)`: `x` and `y` are rounded half away from zero and `y` is
/// flipped to the screen-down convention; `depth` lies in `depth_range`. Window
/// coordinates beyond the `i32` range saturate.
///
/// # Examples
///
/// ```
/// use glmath_core::math::{viewport_transform, DepthRange, Viewport};
///
/// let viewport = Viewport::new(0, 0, 640, 480);
/// let (x, y, depth) = viewport_transform(&viewport, &DepthRange::default(), [1.0, 1.0, 0.0]);
/// assert_eq!((x, y, depth), (640, 0, 0.5));
/// ```
pub fn viewport_transform(
    viewport: &Viewport,
    depth_range: &DepthRange,
    ndc: Triple,
) -> (i32, i32, f64) {
    let half_width = 0.5 * f64::from(viewport.width);
    let half_height = 0.5 * f64::from(viewport.height);
    // Offsets and the y flip stay in f64; the final casts saturate.
    let vx = (ndc[0] * half_width + half_width).round() + f64::from(viewport.x);
    let vy = (ndc[1] * half_height + half_height).round() + f64::from(viewport.y);
    let depth_span = depth_range.far - depth_range.near;
    let depth = 0.5 * (ndc[2] * depth_span + (depth_range.far + depth_range.near));

    (vx as i32, (f64::from(viewport.height) - vy) as i32, depth)
}

/// Maps a window point and a depth in `[0, 1]` back to world space.
///
/// `camera` is the full projection-times-view matrix. `pick` uses the math-up
/// convention (y grows upwards).
///
/// # Errors
///
/// - [`MathError::OutOfBounds`] if the point falls outside the clip cube.
/// - [`MathError::SingularMatrix`] if `camera` cannot be inverted.
/// - [`MathError::DegenerateProjection`] if the unprojected point has `w = 0`.
pub fn unproject(
    camera: &Matrix4,
    viewport: &Viewport,
    pick: (i32, i32),
    depth: f64,
) -> Result<Triple> {
    unproject_window(
        camera,
        viewport,
        [f64::from(pick.0), f64::from(pick.1)],
        depth,
    )
}

/// [`unproject`] over window coordinates already widened to `f64`, so that
/// offsets from the viewport origin cannot overflow.
fn unproject_window(
    camera: &Matrix4,
    viewport: &Viewport,
    pick: [f64; 2],
    depth: f64,
) -> Result<Triple> {
    // Window coordinates to clip coordinates.
    let clip = [
        2.0 * (pick[0] - f64::from(viewport.x)) / f64::from(viewport.width) - 1.0,
        2.0 * (pick[1] - f64::from(viewport.y)) / f64::from(viewport.height) - 1.0,
        2.0 * depth - 1.0,
    ];

    if !clip.iter().all(|c| (-1.0..=1.0).contains(c)) {
        log::debug!("unproject: pick point {pick:?} at depth {depth} outside unit cube");
        return Err(MathError::OutOfBounds { clip });
    }

    // Clip coord -> undo projection -> undo view -> world coord.
    let inverted_camera = camera.inverse()?;
    let [vx, vy, vz, vw] = inverted_camera.transform([clip[0], clip[1], clip[2], 1.0]);
    if vw == 0.0 {
        log::debug!("unproject: pick point {pick:?} unprojects with W=0");
        return Err(MathError::DegenerateProjection);
    }

    let inv_w = 1.0 / vw;
    Ok([vx * inv_w, vy * inv_w, vz * inv_w])
}

/// Computes where the pixel `(pick_x, pick_y)` meets the near and far planes.
///
/// `pick_y` uses the screen-down convention, as produced by window systems and by
/// [`viewport_transform`]. `camera` is the full projection-times-view matrix.
///
/// # Errors
///
/// Any [`unproject`] failure, unchanged.
///
/// # Examples
///
/// ```
/// use glmath_core::math::{pick_ray, Matrix4, Viewport};
///
/// let viewport = Viewport::new(0, 0, 100, 100);
/// let ray = pick_ray(&Matrix4::identity(), &viewport, 50, 50).unwrap();
/// assert_eq!(ray.near, [0.0, 0.0, -1.0]);
/// assert_eq!(ray.far, [0.0, 0.0, 1.0]);
/// ```
pub fn pick_ray(
    camera: &Matrix4,
    viewport: &Viewport,
    pick_x: i32,
    pick_y: i32,
) -> Result<PickRay> {
    let pick = [
        f64::from(pick_x),
        f64::from(viewport.height) - f64::from(pick_y),
    ];
    let near = unproject_window(camera, viewport, pick, 0.0)?;
    let far = unproject_window(camera, viewport, pick, 1.0)?;
    log::trace!("pick_ray: ({pick_x}, {pick_y}) -> {near:?}..{far:?}");
    Ok(PickRay { near, far })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap_z_w() -> Matrix4 {
        Matrix4::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0, //
            0.0, 0.0, 1.0, 0.0,
        ])
    }

    #[test]
    fn test_viewport_transform_corners() {
        let viewport = Viewport::new(0, 0, 640, 480);
        let range = DepthRange::default();
        assert_eq!(
            viewport_transform(&viewport, &range, [0.0, 0.0, 0.0]),
            (320, 240, 0.5)
        );
        assert_eq!(
            viewport_transform(&viewport, &range, [-1.0, -1.0, -1.0]),
            (0, 480, 0.0)
        );
        assert_eq!(
            viewport_transform(&viewport, &range, [1.0, 1.0, 1.0]),
            (640, 0, 1.0)
        );
    }

    #[test]
    fn test_viewport_transform_offset_and_depth_range() {
        let viewport = Viewport::new(10, 20, 200, 100);
        let range = DepthRange {
            near: 2.0,
            far: 4.0,
        };
        // x is offset by the origin; y = height - (ndc_y mapped + origin y).
        assert_eq!(
            viewport_transform(&viewport, &range, [0.0, 0.0, 0.0]),
            (110, 30, 3.0)
        );
        assert_eq!(
            viewport_transform(&viewport, &range, [-1.0, 1.0, 1.0]),
            (10, -20, 4.0)
        );
    }

    #[test]
    fn test_viewport_transform_rounds_half_away_from_zero() {
        let viewport = Viewport::new(0, 0, 1, 1);
        let range = DepthRange::default();
        // 0.5 rounds up, -0.5 rounds down.
        assert_eq!(viewport_transform(&viewport, &range, [0.0, 0.0, 0.0]).0, 1);
        assert_eq!(viewport_transform(&viewport, &range, [-2.0, 0.0, 0.0]).0, -1);
        // Halves round away from zero, not to even.
        let viewport = Viewport::new(0, 0, 5, 5);
        assert_eq!(viewport_transform(&viewport, &range, [-0.4, 0.0, 0.0]).0, 2);
        assert_eq!(viewport_transform(&viewport, &range, [-0.8, 0.0, 0.0]).0, 1);
    }

    #[test]
    fn test_viewport_transform_saturates_far_outside_ndc() {
        let viewport = Viewport::new(10, 0, 100, 100);
        let range = DepthRange::default();
        let (x, y, _) = viewport_transform(&viewport, &range, [1e12, 0.0, 0.0]);
        assert_eq!((x, y), (i32::MAX, 50));

        let (x, y, _) = viewport_transform(&viewport, &range, [-1e12, -1e12, 0.0]);
        assert_eq!((x, y), (i32::MIN, i32::MAX));

        let viewport = Viewport::new(i32::MAX, i32::MIN, 100, 100);
        let (x, y, _) = viewport_transform(&viewport, &range, [1.0, 1.0, 0.0]);
        assert_eq!((x, y), (i32::MAX, i32::MAX));
    }

    #[test]
    fn test_unproject_identity_camera() {
        let viewport = Viewport::new(0, 0, 100, 100);
        let camera = Matrix4::identity();
        assert_eq!(
            unproject(&camera, &viewport, (50, 50), 0.5),
            Ok([0.0, 0.0, 0.0])
        );
        assert_eq!(
            unproject(&camera, &viewport, (0, 100), 1.0),
            Ok([-1.0, 1.0, 1.0])
        );
        assert_eq!(
            unproject(&camera, &viewport, (75, 25), 0.0),
            Ok([0.5, -0.5, -1.0])
        );
    }

    #[test]
    fn test_unproject_out_of_bounds() {
        let viewport = Viewport::new(0, 0, 100, 100);
        let camera = Matrix4::identity();
        assert_eq!(
            unproject(&camera, &viewport, (150, 50), 0.5),
            Err(MathError::OutOfBounds {
                clip: [2.0, 0.0, 0.0]
            })
        );
        assert!(matches!(
            unproject(&camera, &viewport, (50, -1), 0.5),
            Err(MathError::OutOfBounds { .. })
        ));
        assert!(matches!(
            unproject(&camera, &viewport, (50, 50), 1.5),
            Err(MathError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_extreme_pick_coordinates_are_out_of_bounds() {
        let camera = Matrix4::identity();
        let viewport = Viewport::new(10, 0, 100, 100);
        for pick in [(i32::MIN, 50), (i32::MAX, 50), (50, i32::MIN), (50, i32::MAX)] {
            assert!(matches!(
                unproject(&camera, &viewport, pick, 0.5),
                Err(MathError::OutOfBounds { .. })
            ));
        }

        let viewport = Viewport::new(0, 0, 100, 100);
        for (x, y) in [(50, i32::MIN), (50, i32::MAX), (i32::MIN, 50), (i32::MAX, 50)] {
            assert!(matches!(
                pick_ray(&camera, &viewport, x, y),
                Err(MathError::OutOfBounds { .. })
            ));
        }
    }

    #[test]
    fn test_unproject_singular_camera() {
        let viewport = Viewport::new(0, 0, 100, 100);
        assert_eq!(
            unproject(&Matrix4::null(), &viewport, (50, 50), 0.5),
            Err(MathError::SingularMatrix)
        );
    }

    #[test]
    fn test_unproject_point_at_infinity() {
        let viewport = Viewport::new(0, 0, 100, 100);
        // Clip z = 0 becomes w = 0 once z and w are swapped back.
        assert_eq!(
            unproject(&swap_z_w(), &viewport, (50, 50), 0.5),
            Err(MathError::DegenerateProjection)
        );
        assert!(unproject(&swap_z_w(), &viewport, (50, 50), 1.0).is_ok());
    }

    #[test]
    fn test_pick_ray_flips_y() {
        let viewport = Viewport::new(0, 0, 100, 100);
        let ray = pick_ray(&Matrix4::identity(), &viewport, 75, 25).unwrap();
        // Screen-down y = 25 is the upper half of the viewport.
        assert_eq!(ray.near, [0.5, 0.5, -1.0]);
        assert_eq!(ray.far, [0.5, 0.5, 1.0]);
        assert_eq!(ray.direction(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_pick_ray_propagates_errors() {
        let viewport = Viewport::new(0, 0, 100, 100);
        assert!(matches!(
            pick_ray(&Matrix4::identity(), &viewport, 101, 50),
            Err(MathError::OutOfBounds { .. })
        ));
        assert_eq!(
            pick_ray(&Matrix4::null(), &viewport, 50, 50),
            Err(MathError::SingularMatrix)
        );
        // Depth 0 is fine, depth 1 is not: no partial ray is produced.
        let camera = Matrix4::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        assert_eq!(
            pick_ray(&camera, &viewport, 50, 50),
            Err(MathError::DegenerateProjection)
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DepthRange::default(), DepthRange { near: 0.0, far: 1.0 });
        assert_eq!(Viewport::new(0, 0, 1920, 1080).aspect_ratio(), 1920.0 / 1080.0);
    }
}

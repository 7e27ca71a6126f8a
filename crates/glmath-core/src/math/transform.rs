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

//! Builders for the model, view and projection matrices.
//!
//! A point travels through the pipeline as:
//!
//! ```text
//! object coord -> P * V * T * R * U * S -> clip coord -> divide by w -> NDC -> viewport transform -> window coord
//! ```
//!
//! - `P`: perspective or orthographic projection ([`Matrix4::set_perspective_matrix`],
//!   [`Matrix4::set_ortho_matrix`])
//! - `V`: view, the inverse of the camera transform ([`Matrix4::set_view_matrix`])
//! - `T * R`: model transform ([`Matrix4::set_model_matrix`])
//! - `U`: undo of the model's local rotation
//! - `S`: scaling
//!
//! Every builder overwrites all 16 elements of its target. Directions and positions
//! are taken in `f64` and narrowed to `f32` on store.

use super::matrix::Matrix4;
use super::vector::{cross3, dot3, normalize3, sub3, Triple};
use std::f64::consts::FRAC_PI_2;

impl Matrix4 {
    /// Builds a model (object to world) matrix in place.
    ///
    /// The columns are `[right | up | -forward | translation]` where
    /// `right = normalize(forward x up)`. The null model (forward `(0, 0, -1)`,
    /// up `(0, 1, 0)`, translation `(0, 0, 0)`) is the identity.
    ///
    /// The model transform is the inverse of the view transform.
    pub fn set_model_matrix(&mut self, forward: Triple, up: Triple, translation: Triple) {
        let [rx, ry, rz] = narrow(normalize3(cross3(forward, up)));
        let [ux, uy, uz] = narrow(up);
        let [bx, by, bz] = narrow(forward).map(|c| -c);
        let [ox, oy, oz] = narrow(translation);

        *self = Self::from_cols_array([
            rx, ry, rz, 0.0, //
            ux, uy, uz, 0.0, //
            bx, by, bz, 0.0, //
            ox, oy, oz, 1.0,
        ]);
    }

    /// Creates a model matrix. See [`Matrix4::set_model_matrix`].
    ///
    /// # Examples
    ///
    /// ```
    /// use glmath_core::math::Matrix4;
    ///
    /// let m = Matrix4::model([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 2.0, 3.0]);
    /// assert_eq!(m.transform([0.0, 0.0, 0.0, 1.0]), [1.0, 2.0, 3.0, 1.0]);
    /// ```
    pub fn model(forward: Triple, up: Triple, translation: Triple) -> Self {
        let mut m = Self::NULL;
        m.set_model_matrix(forward, up, translation);
        m
    }

    /// Builds a rotation matrix in place.
    ///
    /// The rotation takes a point from the null orientation (forward `(0, 0, -1)`,
    /// up `(0, 1, 0)`) to the orientation given by `forward` and `up`. It is the
    /// model matrix with zero translation.
    pub fn set_rotation_matrix(&mut self, forward: Triple, up: Triple) {
        self.set_model_matrix(forward, up, [0.0; 3]);
    }

    /// Creates a rotation matrix. See [`Matrix4::set_rotation_matrix`].
    pub fn rotation(forward: Triple, up: Triple) -> Self {
        let mut m = Self::NULL;
        m.set_rotation_matrix(forward, up);
        m
    }

    /// Builds a "look-at" view (world to camera) matrix in place.
    ///
    /// The camera sits at `position`, looks towards `focus`, and `up` picks the
    /// roll. The rotation rows are the orthonormal basis `right`, `new_up`,
    /// `back` and the translation is `position` expressed in that basis, negated.
    ///
    /// The null view matrix (focus `(0, 0, -1)`, up `(0, 1, 0)`, position at the
    /// origin) is the identity.
    pub fn set_view_matrix(&mut self, focus: Triple, up: Triple, position: Triple) {
        let back = normalize3(sub3(position, focus));
        let right = normalize3(cross3(up, back));
        let new_up = normalize3(cross3(back, right));

        let eye = [
            -dot3(right, position),
            -dot3(new_up, position),
            -dot3(back, position),
        ];

        let [rx, ry, rz] = narrow(right);
        let [ux, uy, uz] = narrow(new_up);
        let [bx, by, bz] = narrow(back);
        let [ex, ey, ez] = narrow(eye);

        *self = Self::from_cols_array([
            rx, ux, bx, 0.0, //
            ry, uy, by, 0.0, //
            rz, uz, bz, 0.0, //
            ex, ey, ez, 1.0,
        ]);
    }

    /// Creates a view matrix. See [`Matrix4::set_view_matrix`].
    pub fn look_at(focus: Triple, up: Triple, position: Triple) -> Self {
        let mut m = Self::NULL;
        m.set_view_matrix(focus, up, position);
        m
    }

    /// Builds a symmetric-frustum perspective projection in place.
    ///
    /// Maps right-handed view space (camera looking down `-Z`) to clip space with
    /// depth in `[-1, 1]`; element 11 is `-1` so that `w_clip = -z_view`.
    ///
    /// # Arguments
    ///
    /// * `fov_y`: Vertical field of view in radians.
    /// * `aspect`: Width divided by height of the viewport.
    /// * `z_near`, `z_far`: Distances to the clipping planes.
    pub fn set_perspective_matrix(&mut self, fov_y: f64, aspect: f64, z_near: f64, z_far: f64) {
        // cot(fov_y / 2)
        let f = (FRAC_PI_2 - fov_y * 0.5).tan();
        let range_inv = 1.0 / (z_near - z_far);

        let d0 = (f / aspect) as f32;
        let d5 = f as f32;
        let d10 = ((z_near + z_far) * range_inv) as f32;
        let d14 = (z_near * z_far * range_inv * 2.0) as f32;

        *self = Self::from_cols_array([
            d0, 0.0, 0.0, 0.0, //
            0.0, d5, 0.0, 0.0, //
            0.0, 0.0, d10, -1.0, //
            0.0, 0.0, d14, 0.0,
        ]);
    }

    /// Creates a perspective projection. See [`Matrix4::set_perspective_matrix`].
    pub fn perspective(fov_y: f64, aspect: f64, z_near: f64, z_far: f64) -> Self {
        let mut m = Self::NULL;
        m.set_perspective_matrix(fov_y, aspect, z_near, z_far);
        m
    }

    /// Builds an orthographic projection in place.
    ///
    /// `near = -1, far = 1` flips Z, which is the usual orthographic projection.
    /// `near = 1, far = -1` keeps Z, so `(-1, 1, -1, 1, 1, -1)` yields the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use glmath_core::math::Matrix4;
    ///
    /// assert_eq!(Matrix4::ortho(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0), Matrix4::identity());
    /// ```
    pub fn set_ortho_matrix(
        &mut self,
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
        near: f64,
        far: f64,
    ) {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        *self = Self::from_cols_array([
            (-2.0 * lr) as f32,
            0.0,
            0.0,
            0.0,
            0.0,
            (-2.0 * bt) as f32,
            0.0,
            0.0,
            0.0,
            0.0,
            (2.0 * nf) as f32,
            0.0,
            ((left + right) * lr) as f32,
            ((top + bottom) * bt) as f32,
            ((far + near) * nf) as f32,
            1.0,
        ]);
    }

    /// Creates an orthographic projection. See [`Matrix4::set_ortho_matrix`].
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let mut m = Self::NULL;
        m.set_ortho_matrix(left, right, bottom, top, near, far);
        m
    }
}

#[inline]
fn narrow(v: Triple) -> [f32; 3] {
    v.map(|c| c as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::PI;

    #[test]
    fn test_null_model_is_identity() {
        let m = Matrix4::model([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]);
        assert!(m.is_identity());
    }

    #[test]
    fn test_model_columns() {
        // Facing +X with +Y up, so right = forward x up = +Z.
        let m = Matrix4::model([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [5.0, 6.0, 7.0]);
        assert_eq!(&m.data()[0..4], &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(&m.data()[4..8], &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(&m.data()[8..12], &[-1.0, 0.0, 0.0, 0.0]);
        assert_eq!(&m.data()[12..16], &[5.0, 6.0, 7.0, 1.0]);

        // An object-space point straight ahead (-Z) ends up along +X in world space.
        let p = m.transform([0.0, 0.0, -2.0, 1.0]);
        assert_eq!(p, [7.0, 6.0, 7.0, 1.0]);
    }

    #[test]
    fn test_model_right_is_normalized() {
        let m = Matrix4::model([0.0, 0.0, -3.0], [0.0, 2.0, 0.0], [0.0; 3]);
        assert_eq!(&m.data()[0..3], &[1.0, 0.0, 0.0]);
        // Up and forward are stored as given.
        assert_eq!(m[5], 2.0);
        assert_eq!(m[10], 3.0);
    }

    #[test]
    fn test_rotation_has_no_translation() {
        let mut m = Matrix4::identity();
        m.translate([9.0, 9.0, 9.0, 1.0]);
        m.set_rotation_matrix([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        assert_eq!(&m.data()[12..16], &[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            m,
            Matrix4::model([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0])
        );
    }

    #[test]
    fn test_null_view_is_identity() {
        let v = Matrix4::look_at([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]);
        assert!(v.is_identity());
    }

    #[test]
    fn test_view_translation() {
        let v = Matrix4::look_at([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 5.0]);
        assert_eq!(v[10], 1.0);
        assert_eq!(v[14], -5.0);

        // The camera position maps to the view-space origin.
        assert_eq!(v.transform([0.0, 0.0, 5.0, 1.0]), [0.0, 0.0, 0.0, 1.0]);
        // The focus point lies straight ahead, down -Z.
        assert_eq!(v.transform([0.0, 0.0, 0.0, 1.0]), [0.0, 0.0, -5.0, 1.0]);
    }

    #[test]
    fn test_view_is_inverse_of_model() {
        let position = [3.0, 2.0, -4.0];
        let focus = [0.0, 1.0, 0.0];
        let view = Matrix4::look_at(focus, [0.0, 1.0, 0.0], position);

        // The model matrix of the camera, with an orthogonalized up vector.
        let forward = normalize3(sub3(focus, position));
        let right = normalize3(cross3(forward, [0.0, 1.0, 0.0]));
        let up = cross3(right, forward);
        let model = Matrix4::model(forward, up, position);

        assert_relative_eq!(view * model, Matrix4::identity(), epsilon = 1e-5);
        assert_relative_eq!(view.inverse().unwrap(), model, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective() {
        let m = Matrix4::perspective(PI / 2.0, 2.0, 1.0, 3.0);
        assert_relative_eq!(m[0], 0.5, epsilon = 1e-6);
        assert_relative_eq!(m[5], 1.0, epsilon = 1e-6);
        assert_eq!(m[10], -2.0);
        assert_eq!(m[11], -1.0);
        assert_eq!(m[14], -3.0);
        assert_eq!(m[15], 0.0);
        for i in [1, 2, 3, 4, 6, 7, 8, 9, 12, 13] {
            assert_eq!(m[i], 0.0, "element {i}");
        }
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let (near, far) = (0.5, 50.0);
        let m = Matrix4::perspective(60f64.to_radians(), 16.0 / 9.0, near, far);

        let [_, _, z, w] = m.transform([0.0, 0.0, -near, 1.0]);
        assert_abs_diff_eq!(z / w, -1.0, epsilon = 1e-5);
        let [_, _, z, w] = m.transform([0.0, 0.0, -far, 1.0]);
        assert_abs_diff_eq!(z / w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ortho_identity() {
        let mut m = Matrix4::null();
        m.set_ortho_matrix(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0);
        assert_eq!(m, Matrix4::identity());
        assert!(m.is_identity());
    }

    #[test]
    fn test_ortho_flips_z() {
        let m = Matrix4::ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0);
        assert_eq!(m[0], 1.0);
        assert_eq!(m[5], 1.0);
        assert_eq!(m[10], -1.0);
        assert_eq!(m.transform([0.25, 0.5, 0.75, 1.0]), [0.25, 0.5, -0.75, 1.0]);
    }

    #[test]
    fn test_ortho_box_maps_to_unit_cube() {
        let m = Matrix4::ortho(0.0, 512.0, 0.0, 256.0, -1.0, 1.0);
        assert_eq!(m.transform([0.0, 0.0, 0.0, 1.0]), [-1.0, -1.0, 0.0, 1.0]);
        assert_eq!(m.transform([512.0, 256.0, 0.0, 1.0]), [1.0, 1.0, 0.0, 1.0]);
        assert_eq!(m.transform([256.0, 128.0, 0.0, 1.0]), [0.0, 0.0, 0.0, 1.0]);
    }
}

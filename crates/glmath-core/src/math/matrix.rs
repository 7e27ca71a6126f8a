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

//! Defines the `Matrix4` type and its algebra.

use super::error::{MathError, Result};
use super::vector::{Quad, Triple};
use approx::{AbsDiffEq, RelativeEq};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut, Mul, MulAssign};

/// A 4x4 column-major matrix of `f32`.
///
/// The 16 elements are stored contiguously in column-major order, which is the
/// layout expected by GPU uniform and constant buffers, so [`Matrix4::data`] and
/// [`Matrix4::as_bytes`] can be uploaded as-is.
///
/// Equality is exact: two matrices are equal when all 16 elements compare equal
/// with `==`. Use the [`approx`] traits when a tolerance is wanted.
///
/// The default value is the null (all zeros) matrix.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Matrix4 {
    data: [f32; 16],
}

impl Matrix4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// A 4x4 matrix with all elements set to 0.
    pub const NULL: Self = Self { data: [0.0; 16] };

    /// Returns a new identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns a new null matrix.
    #[inline]
    pub const fn null() -> Self {
        Self::NULL
    }

    /// Creates a matrix from 16 elements in column-major order.
    #[inline]
    pub const fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the 16 elements in column-major order.
    #[inline]
    pub const fn to_cols_array(&self) -> [f32; 16] {
        self.data
    }

    /// Returns the backing storage, ready for upload to a rendering device.
    #[inline]
    pub fn data(&self) -> &[f32; 16] {
        &self.data
    }

    /// Returns the backing storage mutably. Writes go straight into the matrix.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32; 16] {
        &mut self.data
    }

    /// Returns the backing storage as raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Reports whether this matrix is exactly the identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.data == Self::IDENTITY.data
    }

    /// Reports whether this matrix is exactly the null matrix.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.data == Self::NULL.data
    }

    /// Copies all elements from `src`.
    #[inline]
    pub fn copy_from(&mut self, src: &Matrix4) {
        self.data = src.data;
    }

    /// Sets this matrix to the identity.
    #[inline]
    pub fn set_identity(&mut self) {
        self.data = Self::IDENTITY.data;
    }

    /// Sets all elements to zero.
    #[inline]
    pub fn set_null(&mut self) {
        self.data = Self::NULL.data;
    }

    /// Computes the determinant from the twelve 2x2 minors used by
    /// [`Matrix4::copy_inverse_from`].
    pub fn determinant(&self) -> f32 {
        let b = Minors::of(&self.data);
        b.determinant()
    }

    /// Inverts this matrix in place.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the determinant is exactly zero, in
    /// which case the matrix is left unchanged.
    pub fn invert(&mut self) -> Result<()> {
        let src = *self;
        self.copy_inverse_from(&src)
    }

    /// Sets this matrix to the inverse of `src`.
    ///
    /// Uses the closed-form adjugate expansion over twelve 2x2 minors
    /// (`b00..b11`), scaling each cofactor by `1 / det`.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the determinant is exactly zero.
    /// `self` then holds a copy of `src`.
    pub fn copy_inverse_from(&mut self, src: &Matrix4) -> Result<()> {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            src.data;
        let b = Minors::of(&src.data);

        let det = b.determinant();
        if det == 0.0 {
            log::debug!("copy_inverse_from: null determinant, keeping source matrix");
            self.copy_from(src);
            return Err(MathError::SingularMatrix);
        }
        let inv_det = 1.0 / det;

        self.data = [
            (a11 * b.b11 - a12 * b.b10 + a13 * b.b09) * inv_det,
            (-a01 * b.b11 + a02 * b.b10 - a03 * b.b09) * inv_det,
            (a31 * b.b05 - a32 * b.b04 + a33 * b.b03) * inv_det,
            (-a21 * b.b05 + a22 * b.b04 - a23 * b.b03) * inv_det,
            (-a10 * b.b11 + a12 * b.b08 - a13 * b.b07) * inv_det,
            (a00 * b.b11 - a02 * b.b08 + a03 * b.b07) * inv_det,
            (-a30 * b.b05 + a32 * b.b02 - a33 * b.b01) * inv_det,
            (a20 * b.b05 - a22 * b.b02 + a23 * b.b01) * inv_det,
            (a10 * b.b10 - a11 * b.b08 + a13 * b.b06) * inv_det,
            (-a00 * b.b10 + a01 * b.b08 - a03 * b.b06) * inv_det,
            (a30 * b.b04 - a31 * b.b02 + a33 * b.b00) * inv_det,
            (-a20 * b.b04 + a21 * b.b02 - a23 * b.b00) * inv_det,
            (-a10 * b.b09 + a11 * b.b07 - a12 * b.b06) * inv_det,
            (a00 * b.b09 - a01 * b.b07 + a02 * b.b06) * inv_det,
            (-a30 * b.b03 + a31 * b.b01 - a32 * b.b00) * inv_det,
            (a20 * b.b03 - a21 * b.b01 + a22 * b.b00) * inv_det,
        ];
        Ok(())
    }

    /// Returns the inverse of this matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MathError::SingularMatrix`] if the determinant is exactly zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use glmath_core::math::Matrix4;
    ///
    /// let mut m = Matrix4::identity();
    /// m.scale([2.0, 4.0, 8.0, 1.0]);
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(inv.transform([2.0, 4.0, 8.0, 1.0]), [1.0, 1.0, 1.0, 1.0]);
    /// assert!(Matrix4::null().inverse().is_err());
    /// ```
    pub fn inverse(&self) -> Result<Matrix4> {
        let mut inverse = Matrix4::NULL;
        inverse.copy_inverse_from(self)?;
        Ok(inverse)
    }

    /// Applies this matrix to the homogeneous vector `[x, y, z, w]`, returning
    /// `self * v`. The computation is carried out in `f64`.
    pub fn transform(&self, v: Quad) -> Quad {
        let m = self.data.map(f64::from);
        let [x, y, z, w] = v;
        [
            m[0] * x + m[4] * y + m[8] * z + m[12] * w,
            m[1] * x + m[5] * y + m[9] * z + m[13] * w,
            m[2] * x + m[6] * y + m[10] * z + m[14] * w,
            m[3] * x + m[7] * y + m[11] * z + m[15] * w,
        ]
    }

    /// Right-multiplies this matrix by `n`, i.e. `self = self * n`.
    ///
    /// `n` is applied first when the result transforms a vector.
    pub fn multiply(&mut self, n: &Matrix4) {
        // Both operands are fully read before any element is overwritten.
        let [m00, m10, m20, m30, m01, m11, m21, m31, m02, m12, m22, m32, m03, m13, m23, m33] =
            self.data;
        let [n00, n10, n20, n30, n01, n11, n21, n31, n02, n12, n22, n32, n03, n13, n23, n33] =
            n.data;

        self.data = [
            (m00 * n00) + (m01 * n10) + (m02 * n20) + (m03 * n30),
            (m10 * n00) + (m11 * n10) + (m12 * n20) + (m13 * n30),
            (m20 * n00) + (m21 * n10) + (m22 * n20) + (m23 * n30),
            (m30 * n00) + (m31 * n10) + (m32 * n20) + (m33 * n30),
            (m00 * n01) + (m01 * n11) + (m02 * n21) + (m03 * n31),
            (m10 * n01) + (m11 * n11) + (m12 * n21) + (m13 * n31),
            (m20 * n01) + (m21 * n11) + (m22 * n21) + (m23 * n31),
            (m30 * n01) + (m31 * n11) + (m32 * n21) + (m33 * n31),
            (m00 * n02) + (m01 * n12) + (m02 * n22) + (m03 * n32),
            (m10 * n02) + (m11 * n12) + (m12 * n22) + (m13 * n32),
            (m20 * n02) + (m21 * n12) + (m22 * n22) + (m23 * n32),
            (m30 * n02) + (m31 * n12) + (m32 * n22) + (m33 * n32),
            (m00 * n03) + (m01 * n13) + (m02 * n23) + (m03 * n33),
            (m10 * n03) + (m11 * n13) + (m12 * n23) + (m13 * n33),
            (m20 * n03) + (m21 * n13) + (m22 * n23) + (m23 * n33),
            (m30 * n03) + (m31 * n13) + (m32 * n23) + (m33 * n33),
        ];
    }

    /// Right-multiplies this matrix by a translation matrix built from `t`.
    ///
    /// Only the last column changes. `t[3]` is usually `1.0`.
    pub fn translate(&mut self, t: Quad) {
        let [x, y, z, w] = t.map(|c| c as f32);
        let d = &self.data;
        let t1 = d[0] * x + d[4] * y + d[8] * z + d[12] * w;
        let t2 = d[1] * x + d[5] * y + d[9] * z + d[13] * w;
        let t3 = d[2] * x + d[6] * y + d[10] * z + d[14] * w;
        let t4 = d[3] * x + d[7] * y + d[11] * z + d[15] * w;
        self.data[12] = t1;
        self.data[13] = t2;
        self.data[14] = t3;
        self.data[15] = t4;
    }

    /// Right-multiplies this matrix by a scaling matrix, scaling column `i` by
    /// `s[i]`. `s[3]` is usually `1.0`.
    pub fn scale(&mut self, s: Quad) {
        let factors = s.map(|c| c as f32);
        for (column, factor) in self.data.chunks_exact_mut(4).zip(factors) {
            for element in column {
                *element *= factor;
            }
        }
    }

    /// Right-multiplies this matrix by the rotation taking the null orientation
    /// (forward `-Z`, up `+Y`) to the orientation given by `forward` and `up`.
    ///
    /// See [`Matrix4::set_rotation_matrix`].
    pub fn rotate(&mut self, forward: Triple, up: Triple) {
        let rotation = Matrix4::rotation(forward, up);
        self.multiply(&rotation);
    }
}

/// The twelve 2x2 minors of the upper and lower row pairs of a column-major 4x4
/// matrix.
struct Minors {
    b00: f32,
    b01: f32,
    b02: f32,
    b03: f32,
    b04: f32,
    b05: f32,
    b06: f32,
    b07: f32,
    b08: f32,
    b09: f32,
    b10: f32,
    b11: f32,
}

impl Minors {
    #[inline]
    fn of(data: &[f32; 16]) -> Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            *data;
        Self {
            b00: a00 * a11 - a01 * a10,
            b01: a00 * a12 - a02 * a10,
            b02: a00 * a13 - a03 * a10,
            b03: a01 * a12 - a02 * a11,
            b04: a01 * a13 - a03 * a11,
            b05: a02 * a13 - a03 * a12,
            b06: a20 * a31 - a21 * a30,
            b07: a20 * a32 - a22 * a30,
            b08: a20 * a33 - a23 * a30,
            b09: a21 * a32 - a22 * a31,
            b10: a21 * a33 - a23 * a31,
            b11: a22 * a33 - a23 * a32,
        }
    }

    #[inline]
    fn determinant(&self) -> f32 {
        self.b00 * self.b11 - self.b01 * self.b10 + self.b02 * self.b09 + self.b03 * self.b08
            - self.b04 * self.b07
            + self.b05 * self.b06
    }
}

// --- Operator Overloads ---

impl Mul<Matrix4> for Matrix4 {
    type Output = Self;
    /// Multiplies this matrix by another `Matrix4`. Matrix multiplication is not commutative.
    #[inline]
    fn mul(mut self, rhs: Matrix4) -> Self::Output {
        self.multiply(&rhs);
        self
    }
}

impl MulAssign<Matrix4> for Matrix4 {
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix4) {
        self.multiply(&rhs);
    }
}

impl Index<usize> for Matrix4 {
    type Output = f32;
    /// Accesses an element by its column-major index (`0..16`).
    ///
    /// # Panics
    /// Panics if `index >= 16`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Matrix4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> Self::Epsilon {
        f32::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

// --- Tests ---

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

//! Scalar 3-component vector operations.
//!
//! Vectors are not stored anywhere in this crate: they are plain `[f64; 3]`
//! triples passed and returned by value, so every function here is pure and
//! allocation-free.

/// A 3-component vector or point, in double precision.
pub type Triple = [f64; 3];

/// A homogeneous 4-component vector `(x, y, z, w)`, in double precision.
pub type Quad = [f64; 4];

/// Absolute tolerance used by [`orthogonal3`].
pub const ORTHOGONAL_TOLERANCE: f64 = 1e-6;

/// Calculates the dot (scalar) product of two vectors.
#[inline]
pub fn dot3(a: Triple, b: Triple) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Calculates the right-handed cross product of two vectors.
///
/// The result is not normalized.
///
/// # Examples
///
/// ```
/// use glmath_core::math::vector::cross3;
/// assert_eq!(cross3([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
/// ```
#[inline]
pub fn cross3(a: Triple, b: Triple) -> Triple {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Calculates the squared length of a vector.
/// This is cheaper than [`length3`] as it avoids a square root.
#[inline]
pub fn length_squared3(v: Triple) -> f64 {
    v[0] * v[0] + v[1] * v[1] + v[2] * v[2]
}

/// Calculates the length (magnitude) of a vector.
#[inline]
pub fn length3(v: Triple) -> f64 {
    length_squared3(v).sqrt()
}

/// Returns a copy of `v` scaled to unit length.
///
/// A vector whose length is exactly zero is returned unchanged rather than
/// producing NaNs or an error.
///
/// # Examples
///
/// ```
/// use glmath_core::math::vector::normalize3;
/// assert_eq!(normalize3([0.0, 3.0, 4.0]), [0.0, 0.6, 0.8]);
/// assert_eq!(normalize3([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
/// ```
#[inline]
pub fn normalize3(v: Triple) -> Triple {
    let length = length3(v);
    if length == 0.0 {
        return v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

/// Calculates the squared distance between two points.
#[inline]
pub fn distance_squared3(a: Triple, b: Triple) -> f64 {
    length_squared3(sub3(b, a))
}

/// Calculates the distance between two points.
#[inline]
pub fn distance3(a: Triple, b: Triple) -> f64 {
    length3(sub3(b, a))
}

/// Reports whether two vectors are orthogonal, i.e. their dot product is within
/// [`ORTHOGONAL_TOLERANCE`] of zero.
#[inline]
pub fn orthogonal3(a: Triple, b: Triple) -> bool {
    dot3(a, b).abs() < ORTHOGONAL_TOLERANCE
}

#[inline]
pub(crate) fn sub3(a: Triple, b: Triple) -> Triple {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

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

//! Defines the error type shared by matrix inversion and unprojection.

use super::vector::Triple;
use std::fmt;

/// A recoverable failure reported by one of the matrix or screen-space operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// The matrix determinant is exactly zero, so it has no inverse.
    ///
    /// The destination of the failed inversion holds a copy of the source matrix.
    SingularMatrix,
    /// A pick point, once converted to clip space, falls outside the `[-1, 1]` cube.
    OutOfBounds {
        /// The offending clip-space coordinates.
        clip: Triple,
    },
    /// The unprojected point has a homogeneous `w` of zero (a point at infinity).
    DegenerateProjection,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::SingularMatrix => write!(f, "Matrix is singular: null determinant"),
            MathError::OutOfBounds { clip } => write!(
                f,
                "Pick point outside unit cube: clip coordinates ({}, {}, {})",
                clip[0], clip[1], clip[2]
            ),
            MathError::DegenerateProjection => {
                write!(f, "Unprojected pick point has W=0")
            }
        }
    }
}

impl std::error::Error for MathError {}

/// A specialized `Result` type for math operations.
pub type Result<T> = std::result::Result<T, MathError>;

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

//! Provides the matrix and vector algebra behind model, view and projection
//! transforms, and the screen-space routines used for mouse picking.
//!
//! Matrices are stored as 32-bit floats, ready for GPU upload. Vector inputs and
//! outputs are double-precision `[f64; 3]` / `[f64; 4]` arrays rather than a
//! dedicated type.
//!
//! All angular functions in this module operate in **radians**.

// --- Declare Sub-Modules ---

pub mod error;
pub mod matrix;
pub mod transform;
pub mod vector;
pub mod viewport;

// --- Re-export Principal Types ---

pub use self::error::MathError;
pub use self::matrix::Matrix4;
pub use self::vector::{
    cross3, distance3, distance_squared3, dot3, length3, length_squared3, normalize3,
    orthogonal3, Quad, Triple,
};
pub use self::viewport::{pick_ray, unproject, viewport_transform, DepthRange, PickRay, Viewport};


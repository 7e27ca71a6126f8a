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

//! # glmath core
//!
//! A small 4x4 matrix / 3-vector algebra library for real-time 3D graphics.
//!
//! It builds the transforms that carry object-space points through the model,
//! view and projection stages to the screen, and inverts that pipeline to turn a
//! mouse position into a world-space pick ray.
//!
//! ```
//! use glmath_core::math::{pick_ray, Matrix4, Viewport};
//!
//! let viewport = Viewport::new(0, 0, 800, 600);
//! let projection = Matrix4::perspective(
//!     60f64.to_radians(),
//!     viewport.aspect_ratio(),
//!     0.1,
//!     100.0,
//! );
//! let view = Matrix4::look_at([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 10.0]);
//!
//! let ray = pick_ray(&(projection * view), &viewport, 400, 300)?;
//! assert!(ray.near[2] > ray.far[2]);
//! # Ok::<(), glmath_core::math::MathError>(())
//! ```

#![warn(missing_docs)]

pub mod math;

pub use math::{MathError, Matrix4};

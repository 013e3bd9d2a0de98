// Copyright 2025 John Brosnihan
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
//! Error types
//!
//! Failures are precondition violations surfaced at construction time.
//! Near-parallel lines and near-zero determinants are handled by the
//! epsilon policy in [`crate::geometry`] and never produce an error.

use crate::geometry::Float;
use thiserror::Error;

/// Degenerate geometry detected while building or transforming a shape
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// A vector of (nearly) zero length cannot be normalized
    #[error("cannot normalize a zero-length vector")]
    ZeroLengthVector,
    /// Two points that must be distinct coincide
    #[error("defining points coincide")]
    CoincidentPoints,
    /// Circle or stadium radius below zero
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(Float),
    /// Matrix with (nearly) zero determinant has no inverse
    #[error("matrix is singular")]
    SingularMatrix,
    /// A coordinate or scalar is NaN or infinite
    #[error("non-finite value")]
    NonFinite,
}

/// Invalid rigid-body parameters
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BodyError {
    /// Mass must be strictly positive and finite
    #[error("mass must be positive and finite, got {0}")]
    NonPositiveMass(Float),
    /// Ball radius must be strictly positive and finite
    #[error("radius must be positive and finite, got {0}")]
    NonPositiveRadius(Float),
    /// Underlying shape is degenerate
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors reported by the simulation driver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Elapsed time was negative, NaN, or infinite
    #[error("invalid timestep {0}: must be non-negative and finite")]
    InvalidTimestep(Float),
    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Body construction failed
    #[error(transparent)]
    Body(#[from] BodyError),
    /// Geometry construction failed
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

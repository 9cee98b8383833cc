//! stresskit core - strain rosette and stress tensor analysis
//!
//! Mechanical stress and strain quantities from sensor and tensor data:
//! - 0°/45°/90° strain gauge rosette reduction to strains and plane stresses
//! - Principal values, maximum shear and principal angle, in any rotated frame
//! - Symmetric 3D stress tensors with von Mises, Tresca and signed variants
//! - Euler-angle and matrix rotation of stress tensors
//! - Timestamp-indexed stress histories
//!
//! # Architecture
//!
//! - [`rosette`]: Pure functions over scalar gauge readings and equal-length
//!   gauge signals (parallelised with Rayon)
//! - [`StressTensor`]: Eigen-based invariants and rotation of a 3x3 stress state
//! - [`StressTimeSeries`]: Ordered store replaying tensor operations per timestamp
//! - [`Material`]: Plane-stress elastic constants with common presets
//!
//! Structural input problems (wrong tensor shape, unknown component,
//! missing timestamp) are reported through [`Error`]. Physical plausibility
//! of material constants and rotation matrices is left to the caller.
//!
//! # Example
//!
//! ```
//! use stresskit_core::{rosette, StressTensor};
//!
//! let strain = rosette::strain_calcs(0.001, 0.0015, 0.002);
//! assert!(strain.principal.principal1 >= strain.principal.principal2);
//!
//! let tensor = StressTensor::new([-100.0, -50.0, -30.0, -20.0, -10.0, -5.0]);
//! let rotated = tensor.rotated_by_euler_angles([0.1, 0.2, 0.3]);
//! assert!((rotated.von_mises() - tensor.von_mises()).abs() < 1e-9);
//! ```

pub mod types;
pub mod material;
pub mod rosette;
pub mod stress;
pub mod error;

pub use types::{euler_rotation_matrix, Component, PrincipalStresses, StressTensor};
pub use material::Material;
pub use rosette::{PrincipalResult, StrainState, StressState};
pub use stress::{HistoryConfig, PrincipalStressRow, StressTimeSeries};
pub use error::{Error, Result};

//! Material property definitions.
//!
//! Isotropic linear elastic materials under plane stress, the assumption
//! behind rosette stress reduction.

use crate::error::{Error, Result};
use crate::rosette::{self, StrainState, StressState};
use nalgebra::{Matrix3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Material properties for plane-stress reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Young's modulus (Pa).
    pub youngs_modulus: f64,
    /// Poisson's ratio (dimensionless).
    pub poissons_ratio: f64,
}

impl Material {
    /// Create a new isotropic linear elastic material.
    ///
    /// # Arguments
    ///
    /// * `youngs_modulus` - Young's modulus E (Pa)
    /// * `poissons_ratio` - Poisson's ratio ν (dimensionless, -1 < ν < 0.5)
    ///
    /// # Errors
    ///
    /// Returns error if material properties are physically invalid.
    /// [`rosette::stress_calcs`] performs no such check.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64) -> Result<Self> {
        if youngs_modulus <= 0.0 || !youngs_modulus.is_finite() {
            return Err(Error::InvalidMaterial(
                "Young's modulus must be positive".into(),
            ));
        }
        if poissons_ratio <= -1.0 || poissons_ratio >= 0.5 || poissons_ratio.is_nan() {
            return Err(Error::InvalidMaterial(
                "Poisson's ratio must be in range (-1, 0.5)".into(),
            ));
        }
        Ok(Self::unchecked(youngs_modulus, poissons_ratio))
    }

    /// Create a material without validating its properties.
    pub const fn unchecked(youngs_modulus: f64, poissons_ratio: f64) -> Self {
        Self {
            youngs_modulus,
            poissons_ratio,
        }
    }

    /// Shear modulus G = E / (2(1 + ν)).
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }

    /// Plane stress modulus E / (1 - ν²).
    pub fn plane_stress_modulus(&self) -> f64 {
        self.youngs_modulus / (1.0 - self.poissons_ratio * self.poissons_ratio)
    }

    /// Plane stress constitutive matrix.
    ///
    /// Returns a 3x3 matrix for [σ_xx, σ_yy, τ_xy] = D * [ε_xx, ε_yy, γ_xy].
    pub fn constitutive_plane_stress(&self) -> Matrix3<f64> {
        let nu = self.poissons_ratio;
        let factor = self.plane_stress_modulus();

        Matrix3::new(
            factor,         factor * nu, 0.0,
            factor * nu,    factor,      0.0,
            0.0,            0.0,         self.shear_modulus(),
        )
    }

    /// Apply plane-stress Hooke's law to a strain state.
    pub fn plane_stress(&self, strain: &StrainState) -> StressState {
        let nu = self.poissons_ratio;
        let factor = self.plane_stress_modulus();

        let sx = factor * (strain.ex + nu * strain.ey);
        let sy = factor * (strain.ey + nu * strain.ex);
        let txy = self.shear_modulus() * strain.gamma_xy;

        StressState::new(sx, sy, txy)
    }

    /// Plane stress from a 0/45/90 rosette reading.
    pub fn stress_from_rosette(&self, e0: f64, e45: f64, e90: f64) -> StressState {
        self.plane_stress(&rosette::strain_calcs(e0, e45, e90))
    }

    /// Plane stress as a vector product D·ε, for use with other 2D tooling.
    pub fn stress_vector(&self, strain: &StrainState) -> Vector3<f64> {
        self.constitutive_plane_stress() * Vector3::new(strain.ex, strain.ey, strain.gamma_xy)
    }
}

/// Common material presets.
impl Material {
    /// Structural steel (E = 200 GPa, ν = 0.3).
    pub const fn steel() -> Self {
        Self::unchecked(200e9, 0.3)
    }

    /// Aluminum 6061-T6 (E = 68.9 GPa, ν = 0.33).
    pub const fn aluminum() -> Self {
        Self::unchecked(68.9e9, 0.33)
    }

    /// Titanium Ti-6Al-4V (E = 113.8 GPa, ν = 0.342).
    pub const fn titanium() -> Self {
        Self::unchecked(113.8e9, 0.342)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}

//! Rectangular (0°/45°/90°) strain gauge rosette reduction.
//!
//! Gauge 1 lies along x, gauge 3 along y and gauge 2 at 45° between them.
//! The shear strain is recovered from how far the 45° reading deviates from
//! the mean of the two axis readings:
//!
//! ```text
//! ε_x = ε_0    ε_y = ε_90    γ_xy = 2·(ε_45 − (ε_0 + ε_90)/2)
//! ```
//!
//! Principal values come from Mohr's circle. Strains use engineering shear
//! (γ = 2ε_xy), so the circle radius is built from γ/2 and the reported
//! maximum shear strain is twice the radius. Stresses use τ directly and the
//! maximum shear stress equals the radius.
//!
//! Every function here is total over real inputs. Material constants are not
//! validated; see [`Material::new`] for a checked constructor.
//!
//! The `*_series` variants process equal-length slices element-wise in
//! parallel and return results in input order.

use crate::error::{Error, Result};
use crate::material::Material;
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Principal values of a 2D strain or stress state.
///
/// `principal1 >= principal2` always holds. `principal_angle` is measured
/// from the 0° gauge axis in radians and lies within (-π/2, π/2].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrincipalResult {
    /// Larger principal value.
    pub principal1: f64,
    /// Smaller principal value.
    pub principal2: f64,
    /// Maximum in-plane shear (engineering γ for strain, τ for stress).
    pub max_shear: f64,
    /// Principal orientation (radians).
    pub principal_angle: f64,
}

impl PrincipalResult {
    /// Mean of the two principal values (centre of Mohr's circle).
    pub fn mean(&self) -> f64 {
        (self.principal1 + self.principal2) / 2.0
    }

    /// Principal orientation in degrees.
    pub fn principal_angle_degrees(&self) -> f64 {
        self.principal_angle.to_degrees()
    }
}

/// In-plane strain state with its principal values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrainState {
    /// Normal strain along x.
    pub ex: f64,
    /// Normal strain along y.
    pub ey: f64,
    /// Engineering shear strain.
    pub gamma_xy: f64,
    /// Principal strains derived from the components above.
    pub principal: PrincipalResult,
}

impl StrainState {
    /// Build a strain state and derive its principal values.
    pub fn new(ex: f64, ey: f64, gamma_xy: f64) -> Self {
        Self {
            ex,
            ey,
            gamma_xy,
            principal: principal_strains(ex, ey, gamma_xy),
        }
    }

    /// This strain field expressed in a frame rotated by `angle` (radians, CCW).
    pub fn rotated(&self, angle: f64) -> StrainState {
        rotate_strain_field(self.ex, self.ey, self.gamma_xy, angle)
    }
}

/// In-plane stress state with its principal values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StressState {
    /// Normal stress along x.
    pub sx: f64,
    /// Normal stress along y.
    pub sy: f64,
    /// Shear stress.
    pub txy: f64,
    /// Principal stresses derived from the components above.
    pub principal: PrincipalResult,
}

impl StressState {
    /// Build a stress state and derive its principal values.
    pub fn new(sx: f64, sy: f64, txy: f64) -> Self {
        Self {
            sx,
            sy,
            txy,
            principal: principal_stresses(sx, sy, txy),
        }
    }

    /// This stress field expressed in a frame rotated by `angle` (radians, CCW).
    pub fn rotated(&self, angle: f64) -> StressState {
        rotate_stress_field(self.sx, self.sy, self.txy, angle)
    }
}

/// Reduce a 0/45/90 rosette reading to strain components and principals.
pub fn strain_calcs(e0: f64, e45: f64, e90: f64) -> StrainState {
    let gamma_xy = 2.0 * (e45 - (e0 + e90) / 2.0);
    StrainState::new(e0, e90, gamma_xy)
}

/// Principal strains from strain components.
pub fn principal_strains(ex: f64, ey: f64, gamma_xy: f64) -> PrincipalResult {
    let avg = (ex + ey) / 2.0;
    let radius = (((ex - ey) / 2.0).powi(2) + (gamma_xy / 2.0).powi(2)).sqrt();

    PrincipalResult {
        principal1: avg + radius,
        principal2: avg - radius,
        max_shear: 2.0 * radius,
        principal_angle: 0.5 * gamma_xy.atan2(ex - ey),
    }
}

/// Reduce a rosette reading to plane stress via Hooke's law.
///
/// # Arguments
///
/// * `e0`, `e45`, `e90` - Gauge strains
/// * `youngs_modulus` - Young's modulus E (Pa)
/// * `poissons_ratio` - Poisson's ratio ν, used as given
pub fn stress_calcs(
    e0: f64,
    e45: f64,
    e90: f64,
    youngs_modulus: f64,
    poissons_ratio: f64,
) -> StressState {
    Material::unchecked(youngs_modulus, poissons_ratio).stress_from_rosette(e0, e45, e90)
}

/// Principal stresses from stress components.
///
/// `principal_angle` is `0.5·atan2(τ_xy, σ_x − σ_y)`, the same half-angle form
/// as the strain case with τ in place of γ. The in-plane direction that
/// zeroes τ is `0.5·atan2(2τ_xy, σ_x − σ_y)`.
pub fn principal_stresses(sx: f64, sy: f64, txy: f64) -> PrincipalResult {
    let avg = (sx + sy) / 2.0;
    let radius = (((sx - sy) / 2.0).powi(2) + txy.powi(2)).sqrt();

    PrincipalResult {
        principal1: avg + radius,
        principal2: avg - radius,
        max_shear: radius,
        principal_angle: 0.5 * txy.atan2(sx - sy),
    }
}

/// Express a strain field in a frame rotated by `angle` (radians, CCW).
pub fn rotate_strain_field(ex: f64, ey: f64, gamma_xy: f64, angle: f64) -> StrainState {
    let (sin2, cos2) = (2.0 * angle).sin_cos();
    let avg = (ex + ey) / 2.0;
    let half_diff = (ex - ey) / 2.0;

    let ex_prime = avg + half_diff * cos2 + gamma_xy / 2.0 * sin2;
    let ey_prime = avg - half_diff * cos2 - gamma_xy / 2.0 * sin2;
    let gamma_prime = -(ex - ey) * sin2 + gamma_xy * cos2;

    StrainState::new(ex_prime, ey_prime, gamma_prime)
}

/// Express a stress field in a frame rotated by `angle` (radians, CCW).
pub fn rotate_stress_field(sx: f64, sy: f64, txy: f64, angle: f64) -> StressState {
    let (sin2, cos2) = (2.0 * angle).sin_cos();
    let avg = (sx + sy) / 2.0;
    let half_diff = (sx - sy) / 2.0;

    let sx_prime = avg + half_diff * cos2 + txy * sin2;
    let sy_prime = avg - half_diff * cos2 - txy * sin2;
    let txy_prime = -half_diff * sin2 + txy * cos2;

    StressState::new(sx_prime, sy_prime, txy_prime)
}

/// [`strain_calcs`] over equal-length gauge signals.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the slices differ in length.
pub fn strain_calcs_series(e0: &[f64], e45: &[f64], e90: &[f64]) -> Result<Vec<StrainState>> {
    check_lengths(e0, e45, e90)?;
    Ok(e0
        .par_iter()
        .zip(e45.par_iter())
        .zip(e90.par_iter())
        .map(|((&a, &b), &c)| strain_calcs(a, b, c))
        .collect())
}

/// [`stress_calcs`] over equal-length gauge signals.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the slices differ in length.
pub fn stress_calcs_series(
    e0: &[f64],
    e45: &[f64],
    e90: &[f64],
    youngs_modulus: f64,
    poissons_ratio: f64,
) -> Result<Vec<StressState>> {
    check_lengths(e0, e45, e90)?;
    let material = Material::unchecked(youngs_modulus, poissons_ratio);
    Ok(e0
        .par_iter()
        .zip(e45.par_iter())
        .zip(e90.par_iter())
        .map(|((&a, &b), &c)| material.stress_from_rosette(a, b, c))
        .collect())
}

/// Rotate every strain state by the same angle.
pub fn rotate_strain_series(states: &[StrainState], angle: f64) -> Vec<StrainState> {
    states.par_iter().map(|s| s.rotated(angle)).collect()
}

/// Rotate every stress state by the same angle.
pub fn rotate_stress_series(states: &[StressState], angle: f64) -> Vec<StressState> {
    states.par_iter().map(|s| s.rotated(angle)).collect()
}

fn check_lengths(e0: &[f64], e45: &[f64], e90: &[f64]) -> Result<()> {
    for other in [e45, e90] {
        if other.len() != e0.len() {
            return Err(Error::LengthMismatch {
                expected: e0.len(),
                found: other.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    #[test]
    fn test_rosette_equal_biaxial_gradient() {
        // e45 sits exactly between e0 and e90, so there is no shear
        let s = strain_calcs(0.001, 0.0015, 0.002);
        assert_relative_eq!(s.ex, 0.001);
        assert_relative_eq!(s.ey, 0.002);
        assert_relative_eq!(s.gamma_xy, 0.0, epsilon = 1e-18);

        // avg = 0.0015, radius = 0.0005
        assert_relative_eq!(s.principal.principal1, 0.002, epsilon = 1e-15);
        assert_relative_eq!(s.principal.principal2, 0.001, epsilon = 1e-15);
        assert_relative_eq!(s.principal.max_shear, 0.001, epsilon = 1e-15);
        // 0.5·atan2(0, -0.001): principal axis 1 is the y gauge
        assert_relative_eq!(s.principal.principal_angle, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_pure_shear_strain() {
        // e0 = e90 = 0, e45 = 0.0005 gives γ = 0.001 and principals at 45°
        let s = strain_calcs(0.0, 0.0005, 0.0);
        assert_relative_eq!(s.gamma_xy, 0.001);
        assert_relative_eq!(s.principal.principal1, 0.0005, epsilon = 1e-15);
        assert_relative_eq!(s.principal.principal2, -0.0005, epsilon = 1e-15);
        assert_relative_eq!(s.principal.max_shear, 0.001, epsilon = 1e-15);
        assert_relative_eq!(s.principal.principal_angle, FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_principal_stresses_mohr_circle() {
        let p = principal_stresses(-80.0, 50.0, -25.0);
        let radius = (65.0_f64.powi(2) + 25.0_f64.powi(2)).sqrt();
        assert_relative_eq!(p.principal1, -15.0 + radius, epsilon = 1e-10);
        assert_relative_eq!(p.principal2, -15.0 - radius, epsilon = 1e-10);
        assert_relative_eq!(p.max_shear, radius, epsilon = 1e-10);
        assert_relative_eq!(p.mean(), -15.0, epsilon = 1e-10);
        assert_relative_eq!(p.principal_angle, 0.5 * (-25.0_f64).atan2(-130.0), epsilon = 1e-12);
    }

    #[test]
    fn test_stress_calcs_hookes_law() {
        let e = 200e9;
        let nu = 0.3;
        let s = stress_calcs(0.001, 0.0015, 0.002, e, nu);
        assert_relative_eq!(s.sx, e / (1.0 - nu * nu) * (0.001 + nu * 0.002), max_relative = 1e-12);
        assert_relative_eq!(s.sy, e / (1.0 - nu * nu) * (0.002 + nu * 0.001), max_relative = 1e-12);
        assert_relative_eq!(s.txy, 0.0, epsilon = 1e-3);
        assert!(s.principal.principal1 >= s.principal.principal2);
    }

    #[test]
    fn test_out_of_range_poisson_is_not_rejected() {
        // Non-physical but numerically defined
        let s = stress_calcs(0.001, 0.0, 0.0, 1.0, 0.7);
        assert!(s.sx.is_finite());
        assert!(s.sy.is_finite());
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let s = rotate_stress_field(-80.0, 50.0, -25.0, 0.0);
        assert_relative_eq!(s.sx, -80.0, epsilon = 1e-12);
        assert_relative_eq!(s.sy, 50.0, epsilon = 1e-12);
        assert_relative_eq!(s.txy, -25.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_strain_into_principal_frame() {
        let original = strain_calcs(0.0012, 0.0003, -0.0004);
        let rotated = original.rotated(original.principal.principal_angle);
        assert_relative_eq!(rotated.gamma_xy, 0.0, epsilon = 1e-15);
        assert_relative_eq!(rotated.ex, original.principal.principal1, epsilon = 1e-15);
        assert_relative_eq!(rotated.ey, original.principal.principal2, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate_strain_by_ninety_degrees_swaps_axes() {
        let s = rotate_strain_field(0.001, 0.0015, 0.002, FRAC_PI_2);
        assert_relative_eq!(s.ex, 0.0015, epsilon = 1e-15);
        assert_relative_eq!(s.ey, 0.001, epsilon = 1e-15);
        assert_relative_eq!(s.gamma_xy, -0.002, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate_strain_preserves_principals() {
        let original = StrainState::new(0.001, 0.0015, 0.002);
        let rotated = original.rotated(FRAC_PI_6);
        assert_relative_eq!(rotated.principal.principal1, original.principal.principal1, epsilon = 1e-15);
        assert_relative_eq!(rotated.principal.principal2, original.principal.principal2, epsilon = 1e-15);
        assert_relative_eq!(rotated.principal.max_shear, original.principal.max_shear, epsilon = 1e-15);
        // The principal axis stays fixed in space, so it moves by -θ in the new frame
        assert_relative_eq!(
            rotated.principal.principal_angle,
            original.principal.principal_angle - FRAC_PI_6,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_series_matches_scalar() {
        let e0 = [0.001, 0.002, 0.003];
        let e45 = [0.0015, 0.0025, 0.0035];
        let e90 = [0.002, 0.003, 0.004];
        let series = strain_calcs_series(&e0, &e45, &e90).unwrap();
        assert_eq!(series.len(), 3);
        for i in 0..3 {
            assert_eq!(series[i], strain_calcs(e0[i], e45[i], e90[i]));
        }

        let stresses = stress_calcs_series(&e0, &e45, &e90, 200e9, 0.3).unwrap();
        for i in 0..3 {
            assert_eq!(stresses[i], stress_calcs(e0[i], e45[i], e90[i], 200e9, 0.3));
        }
    }

    #[test]
    fn test_series_length_mismatch() {
        let err = strain_calcs_series(&[0.0, 1.0], &[0.0, 1.0], &[0.0]).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { expected: 2, found: 1 });

        let err = stress_calcs_series(&[0.0], &[], &[0.0], 1.0, 0.3).unwrap_err();
        assert_eq!(err, Error::LengthMismatch { expected: 1, found: 0 });
    }

    #[test]
    fn test_empty_series() {
        assert!(strain_calcs_series(&[], &[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_rotate_series_preserves_order() {
        let states: Vec<StressState> = (0..50)
            .map(|i| StressState::new(i as f64, -(i as f64), 0.5 * i as f64))
            .collect();
        let rotated = rotate_stress_series(&states, 0.4);
        for (r, s) in rotated.iter().zip(&states) {
            assert_eq!(*r, s.rotated(0.4));
        }

        let strains = vec![StrainState::new(0.001, 0.0, 0.0002); 4];
        assert_eq!(rotate_strain_series(&strains, 0.0).len(), 4);
    }

    #[test]
    fn test_principal_angle_degrees() {
        let p = principal_strains(0.0, 0.0, 0.001);
        assert_relative_eq!(p.principal_angle_degrees(), 45.0, epsilon = 1e-10);
    }
}

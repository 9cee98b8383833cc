//! Core data types for stress tensor operations.
//!
//! This module defines:
//! - The symmetric 3D [`StressTensor`] and its invariants
//! - [`Component`] names for the six independent tensor values
//! - [`PrincipalStresses`], the sorted eigen-decomposition of a tensor

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};

/// Relative tolerance for accepting a 3x3 matrix as symmetric.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// One of the six independent components of a symmetric stress tensor.
///
/// The declaration order is the six-vector (Voigt) order used everywhere in
/// this crate: `[xx, yy, zz, xy, yz, xz]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Component {
    Xx,
    Yy,
    Zz,
    Xy,
    Yz,
    Xz,
}

impl Component {
    /// All components in six-vector order.
    pub const ALL: [Component; 6] = [
        Component::Xx,
        Component::Yy,
        Component::Zz,
        Component::Xy,
        Component::Yz,
        Component::Xz,
    ];

    /// Column name used in time-series tables.
    pub const fn name(self) -> &'static str {
        match self {
            Component::Xx => "xx",
            Component::Yy => "yy",
            Component::Zz => "zz",
            Component::Xy => "xy",
            Component::Yz => "yz",
            Component::Xz => "xz",
        }
    }

    /// Position of this component in the six-vector form.
    pub const fn voigt_index(self) -> usize {
        match self {
            Component::Xx => 0,
            Component::Yy => 1,
            Component::Zz => 2,
            Component::Xy => 3,
            Component::Yz => 4,
            Component::Xz => 5,
        }
    }

    /// Row/column of this component in the 3x3 matrix (upper triangle).
    pub const fn matrix_index(self) -> (usize, usize) {
        match self {
            Component::Xx => (0, 0),
            Component::Yy => (1, 1),
            Component::Zz => (2, 2),
            Component::Xy => (0, 1),
            Component::Yz => (1, 2),
            Component::Xz => (0, 2),
        }
    }
}

impl FromStr for Component {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Component::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::InvalidComponent(s.to_string()))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Principal stresses and directions of a stress tensor.
///
/// Values are sorted ascending: `values[0] <= values[1] <= values[2]`.
/// Column `i` of `vectors` is the unit eigenvector belonging to `values[i]`.
/// The sign of each eigenvector is whatever the eigen-solver produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalStresses {
    /// Principal stresses, ascending.
    pub values: Vector3<f64>,
    /// Principal directions as columns, matching `values`.
    pub vectors: Matrix3<f64>,
}

impl PrincipalStresses {
    /// Smallest (most compressive) principal stress.
    pub fn min(&self) -> f64 {
        self.values[0]
    }

    /// Largest (most tensile) principal stress.
    pub fn max(&self) -> f64 {
        self.values[2]
    }

    /// Principal direction `i` (0, 1 or 2).
    pub fn vector(&self, i: usize) -> Vector3<f64> {
        self.vectors.column(i).into_owned()
    }
}

/// Symmetric 3D stress tensor.
///
/// Stored as a full 3x3 matrix whose off-diagonal terms are always mirrored
/// (σ_ij = σ_ji). The six-vector form is ordered as
/// `[σ_xx, σ_yy, σ_zz, τ_xy, τ_yz, τ_xz]`.
///
/// A tensor is only ever mutated by the in-place rotation methods; the
/// `rotated_*` counterparts leave `self` untouched and return a new tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StressTensor {
    components: Matrix3<f64>,
}

impl StressTensor {
    /// Create a stress tensor from its six-vector form.
    pub fn new(components: [f64; 6]) -> Self {
        let [xx, yy, zz, xy, yz, xz] = components;
        Self {
            components: Matrix3::new(
                xx, xy, xz,
                xy, yy, yz,
                xz, yz, zz,
            ),
        }
    }

    /// Zero stress state.
    pub fn zero() -> Self {
        Self {
            components: Matrix3::zeros(),
        }
    }

    /// Create a stress tensor from a full 3x3 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] if the matrix is not symmetric.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self> {
        let scale = matrix.amax().max(1.0);
        for (i, j) in [(0, 1), (1, 2), (0, 2)] {
            if (matrix[(i, j)] - matrix[(j, i)]).abs() > SYMMETRY_TOLERANCE * scale {
                return Err(Error::Construction(format!(
                    "3x3 matrix is not symmetric at ({i}, {j}): {} != {}",
                    matrix[(i, j)],
                    matrix[(j, i)]
                )));
            }
        }
        Ok(Self {
            components: mirror_upper(&matrix),
        })
    }

    /// Create a stress tensor from a runtime-sized six-vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] unless `components` has exactly six values.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        let voigt: [f64; 6] = components.try_into().map_err(|_| Error::shape())?;
        Ok(Self::new(voigt))
    }

    /// Create a stress tensor from runtime-sized matrix rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] unless `rows` is exactly 3x3 and symmetric.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != 3 || rows.iter().any(|r| r.as_ref().len() != 3) {
            return Err(Error::shape());
        }
        Self::from_matrix(Matrix3::from_fn(|i, j| rows[i].as_ref()[j]))
    }

    /// The full symmetric 3x3 matrix.
    pub fn components(&self) -> &Matrix3<f64> {
        &self.components
    }

    /// Six-vector form `[xx, yy, zz, xy, yz, xz]`.
    pub fn to_voigt(&self) -> [f64; 6] {
        Component::ALL.map(|c| self.component(c))
    }

    /// A single named component.
    pub fn component(&self, component: Component) -> f64 {
        self.components[component.matrix_index()]
    }

    /// Principal stresses and directions, sorted ascending by value.
    pub fn principal_stresses(&self) -> PrincipalStresses {
        let eigen = self.components.symmetric_eigen();

        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let values = Vector3::from_fn(|i, _| eigen.eigenvalues[order[i]]);
        let vectors = Matrix3::from_columns(&order.map(|i| eigen.eigenvectors.column(i).into_owned()));

        PrincipalStresses { values, vectors }
    }

    /// Compute von Mises equivalent stress.
    pub fn von_mises(&self) -> f64 {
        let s = &self.components;
        let s_xx = s[(0, 0)];
        let s_yy = s[(1, 1)];
        let s_zz = s[(2, 2)];
        let t_xy = s[(0, 1)];
        let t_yz = s[(1, 2)];
        let t_xz = s[(0, 2)];

        let term1 = (s_xx - s_yy).powi(2) + (s_yy - s_zz).powi(2) + (s_zz - s_xx).powi(2);
        let term2 = 6.0 * (t_xy.powi(2) + t_yz.powi(2) + t_xz.powi(2));

        (0.5 * (term1 + term2)).sqrt()
    }

    /// Compute Tresca equivalent stress (largest principal stress difference).
    pub fn tresca(&self) -> f64 {
        let p = self.principal_stresses().values;
        (p[0] - p[1])
            .abs()
            .max((p[1] - p[2]).abs())
            .max((p[2] - p[0]).abs())
    }

    /// Maximum shear stress, half the Tresca stress.
    pub fn max_shear(&self) -> f64 {
        self.tresca() / 2.0
    }

    /// Compute hydrostatic (mean) stress.
    pub fn hydrostatic(&self) -> f64 {
        self.components.trace() / 3.0
    }

    /// von Mises stress carrying the sign of the hydrostatic stress.
    ///
    /// Positive for tensile-dominated states, negative for compressive ones,
    /// zero when the hydrostatic stress is exactly zero.
    pub fn signed_von_mises(&self) -> f64 {
        sign(self.hydrostatic()) * self.von_mises()
    }

    /// Tresca stress carrying the sign of the hydrostatic stress.
    pub fn signed_tresca(&self) -> f64 {
        sign(self.hydrostatic()) * self.tresca()
    }

    /// Deviatoric part σ - p·I.
    pub fn deviatoric(&self) -> StressTensor {
        let p = self.hydrostatic();
        Self {
            components: self.components - Matrix3::identity() * p,
        }
    }

    /// Stress invariants (I1, I2, I3).
    pub fn invariants(&self) -> (f64, f64, f64) {
        let s = &self.components;
        let i1 = s.trace();
        let i2 = s[(0, 0)] * s[(1, 1)] + s[(1, 1)] * s[(2, 2)] + s[(2, 2)] * s[(0, 0)]
            - s[(0, 1)].powi(2)
            - s[(1, 2)].powi(2)
            - s[(0, 2)].powi(2);
        let i3 = s.determinant();
        (i1, i2, i3)
    }

    /// Rotate in place by Euler angles `[θx, θy, θz]` (radians).
    ///
    /// See [`euler_rotation_matrix`] for the composition order.
    pub fn rotate_by_euler_angles(&mut self, angles: [f64; 3]) -> &mut Self {
        self.rotate_by_matrix(&euler_rotation_matrix(angles))
    }

    /// Copy of this tensor rotated by Euler angles `[θx, θy, θz]` (radians).
    pub fn rotated_by_euler_angles(&self, angles: [f64; 3]) -> StressTensor {
        self.rotated_by_matrix(&euler_rotation_matrix(angles))
    }

    /// Rotate in place: σ ← R·σ·Rᵗ.
    ///
    /// `rotation` is not checked for orthonormality.
    pub fn rotate_by_matrix(&mut self, rotation: &Matrix3<f64>) -> &mut Self {
        trace!(?rotation, "rotating stress tensor in place");
        self.components = congruence(rotation, &self.components);
        self
    }

    /// Copy of this tensor transformed by R·σ·Rᵗ.
    pub fn rotated_by_matrix(&self, rotation: &Matrix3<f64>) -> StressTensor {
        let mut rotated = *self;
        rotated.rotate_by_matrix(rotation);
        rotated
    }
}

impl Default for StressTensor {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 6]> for StressTensor {
    fn from(components: [f64; 6]) -> Self {
        Self::new(components)
    }
}

impl TryFrom<&[f64]> for StressTensor {
    type Error = Error;

    fn try_from(components: &[f64]) -> Result<Self> {
        Self::from_slice(components)
    }
}

impl TryFrom<Matrix3<f64>> for StressTensor {
    type Error = Error;

    fn try_from(matrix: Matrix3<f64>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl fmt::Display for StressTensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.components;
        let brackets = [('⎡', '⎤'), ('⎢', '⎥'), ('⎣', '⎦')];
        for (i, (open, close)) in brackets.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{open}{:8.2} {:8.2} {:8.2}{close}",
                s[(i, 0)],
                s[(i, 1)],
                s[(i, 2)]
            )?;
        }
        Ok(())
    }
}

/// Rotation matrix for Euler angles `[θx, θy, θz]` in radians.
///
/// Composed as R = Rz·Ry·Rx, so a vector is rotated about x first, then y,
/// then z (all about the fixed axes).
pub fn euler_rotation_matrix(angles: [f64; 3]) -> Matrix3<f64> {
    let [theta_x, theta_y, theta_z] = angles;
    let (sx, cx) = theta_x.sin_cos();
    let (sy, cy) = theta_y.sin_cos();
    let (sz, cz) = theta_z.sin_cos();

    let rx = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cx,  -sx,
        0.0, sx,  cx,
    );
    let ry = Matrix3::new(
        cy,  0.0, sy,
        0.0, 1.0, 0.0,
        -sy, 0.0, cy,
    );
    let rz = Matrix3::new(
        cz,  -sz, 0.0,
        sz,  cz,  0.0,
        0.0, 0.0, 1.0,
    );

    rz * ry * rx
}

/// R·σ·Rᵗ, made exactly symmetric from its upper triangle.
fn congruence(rotation: &Matrix3<f64>, stress: &Matrix3<f64>) -> Matrix3<f64> {
    mirror_upper(&(rotation * stress * rotation.transpose()))
}

/// Symmetric matrix taken from the upper triangle of `m`. Never adds entries,
/// so values near `f64::MAX` survive unchanged.
#[rustfmt::skip]
fn mirror_upper(m: &Matrix3<f64>) -> Matrix3<f64> {
    Matrix3::new(
        m[(0, 0)], m[(0, 1)], m[(0, 2)],
        m[(0, 1)], m[(1, 1)], m[(1, 2)],
        m[(0, 2)], m[(1, 2)], m[(2, 2)],
    )
}

/// Sign with `sign(0) == 0`.
fn sign(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        x.signum()
    }
}

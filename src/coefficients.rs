//! Scalar point functions defined over a lattice: Fourier modes of the reciprocal lattice, Bloch
//! phases, and a rod-lattice indicator useful as a material coefficient.

use nalgebra::DVector;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::lattice::BravaisLattice;

/// The plane wave `a exp(i (n0 b0 + n1 b1 + n2 b2)·x)`, where the `b_i` are reciprocal lattice
/// vectors. Every mode is periodic on the direct lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeFunction {
    amplitude: f64,
    indices: [i32; 3],
    reciprocal_vectors: Vec<DVector<f64>>,
}

impl ModeFunction {
    /// The constant mode of unit amplitude over the reciprocal vectors of `lat`.
    pub fn new(lat: &BravaisLattice) -> Self {
        Self {
            amplitude: 1.0,
            indices: [0; 3],
            reciprocal_vectors: lat.reciprocal_vectors(),
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Sets the mode indices. Indices past the lattice dimension are ignored.
    pub fn with_indices(mut self, n0: i32, n1: i32, n2: i32) -> Self {
        self.indices = [n0, n1, n2];
        self
    }

    pub fn set_reciprocal_vectors(&mut self, rec: &[DVector<f64>]) {
        self.reciprocal_vectors = rec.to_vec();
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn indices(&self) -> [i32; 3] {
        self.indices
    }

    /// `n0 b0 + n1 b1 + n2 b2`.
    pub fn wave_vector(&self) -> DVector<f64> {
        let dim = self.reciprocal_vectors.first().map_or(0, |b| b.len());
        self.reciprocal_vectors
            .iter()
            .zip(self.indices)
            .fold(DVector::zeros(dim), |k, (b, n)| k + b * f64::from(n))
    }

    /// # Panics
    /// If `x` does not have as many components as the reciprocal vectors.
    pub fn eval(&self, x: &DVector<f64>) -> Complex<f64> {
        Complex::from_polar(self.amplitude, self.wave_vector().dot(x))
    }

    pub fn real(&self, x: &DVector<f64>) -> f64 {
        self.eval(x).re
    }

    pub fn imag(&self, x: &DVector<f64>) -> f64 {
        self.eval(x).im
    }
}

/// The Bloch phase `a exp(i κ·x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseFunction {
    amplitude: f64,
    kappa: DVector<f64>,
}

impl PhaseFunction {
    pub fn new(kappa: DVector<f64>) -> Self {
        Self {
            amplitude: 1.0,
            kappa,
        }
    }

    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn set_kappa(&mut self, kappa: DVector<f64>) {
        self.kappa = kappa;
    }

    pub fn kappa(&self) -> &DVector<f64> {
        &self.kappa
    }

    /// # Panics
    /// If `x` and κ differ in length.
    pub fn eval(&self, x: &DVector<f64>) -> Complex<f64> {
        Complex::from_polar(self.amplitude, self.kappa.dot(x))
    }

    pub fn real(&self, x: &DVector<f64>) -> f64 {
        self.eval(x).re
    }

    pub fn imag(&self, x: &DVector<f64>) -> f64 {
        self.eval(x).im
    }
}

/// Indicator of a lattice of rods: every lattice point is joined to its Wigner-Seitz neighbors by
/// a cylinder (a strip in 2D) whose radius is `frac` times the face radius of that neighbor's
/// face. Points inside a rod get `val1`, all others `val0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeCoefficient<'a> {
    lattice: &'a BravaisLattice,
    axes: Vec<DVector<f64>>,
    radii: Vec<f64>,
    val0: f64,
    val1: f64,
}

impl<'a> LatticeCoefficient<'a> {
    pub fn new(lat: &'a BravaisLattice, frac: f64, val0: f64, val1: f64) -> Self {
        let axes = lat
            .translation_vectors()
            .into_iter()
            .map(|t| t.normalize())
            .collect();
        let radii = lat.face_radii().iter().map(|r| frac * r).collect();
        Self {
            lattice: lat,
            axes,
            radii,
            val0,
            val1,
        }
    }

    /// Rods of half the face radius, valued 1 in a background of 0.
    pub fn with_defaults(lat: &'a BravaisLattice) -> Self {
        Self::new(lat, 0.5, 0.0, 1.0)
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Whether `x` lies inside a rod, boundary included.
    pub fn in_rod(&self, x: &DVector<f64>) -> bool {
        let (xp, _) = self.lattice.map_to_primitive_cell(x);
        self.axes.iter().zip(&self.radii).any(|(u, r)| {
            let along = xp.dot(u);
            (xp.norm_squared() - along * along).max(0.0).sqrt() <= *r
        })
    }

    pub fn eval(&self, x: &DVector<f64>) -> f64 {
        if self.in_rod(x) {
            self.val1
        } else {
            self.val0
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn v(xs: &[f64]) -> DVector<f64> {
        DVector::from_column_slice(xs)
    }

    #[test]
    fn test_constant_mode() {
        let lat = BravaisLattice::cubic(1.0).unwrap();
        let m = ModeFunction::new(&lat).with_amplitude(2.5);
        assert_relative_eq!(m.real(&v(&[0.3, -0.7, 0.1])), 2.5);
        assert_abs_diff_eq!(m.imag(&v(&[0.3, -0.7, 0.1])), 0.0);
        assert_eq!(m.wave_vector(), DVector::zeros(3));
    }

    #[test]
    fn test_quarter_wave() {
        let lat = BravaisLattice::cubic(1.0).unwrap();
        let m = ModeFunction::new(&lat).with_indices(1, 0, 0);
        assert_relative_eq!(m.wave_vector(), v(&[2.0 * PI, 0.0, 0.0]), epsilon = 1e-12);
        let x = v(&[0.25, 0.4, 0.9]);
        assert_abs_diff_eq!(m.real(&x), 0.0, epsilon = 1e-12);
        assert_relative_eq!(m.imag(&x), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_planar_mode_ignores_third_index() {
        let lat = BravaisLattice::square(2.0).unwrap();
        let m = ModeFunction::new(&lat).with_indices(0, 1, 7);
        assert_relative_eq!(m.wave_vector(), v(&[0.0, PI]), epsilon = 1e-12);
    }

    #[test]
    fn test_phase() {
        let p = PhaseFunction::new(v(&[PI, 0.0])).with_amplitude(3.0);
        assert_relative_eq!(p.real(&v(&[1.0, 5.0])), -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.imag(&v(&[1.0, 5.0])), 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.eval(&v(&[0.5, 0.0])).im, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cubic_rods() {
        let lat = BravaisLattice::cubic(1.0).unwrap();
        let rods = LatticeCoefficient::new(&lat, 0.5, 2.0, 7.0);
        for r in rods.radii() {
            assert_relative_eq!(*r, 0.25, epsilon = 1e-12);
        }
        assert_eq!(rods.eval(&v(&[0.1, 0.1, 0.0])), 7.0);
        assert_eq!(rods.eval(&v(&[0.4, 0.4, 0.4])), 2.0);
        // periodic images land in the same rod
        assert_eq!(rods.eval(&v(&[1.05, 0.02, -3.0])), 7.0);
        assert_eq!(rods.eval(&v(&[2.4, -0.6, 0.4])), 2.0);
    }

    #[test]
    fn test_hexagonal_strips() {
        let lat = BravaisLattice::hexagonal_2d(1.0).unwrap();
        let rods = LatticeCoefficient::with_defaults(&lat);
        assert_eq!(rods.radii().len(), 3);
        assert_eq!(rods.eval(&v(&[0.0, 0.0])), 1.0);
        // a vertex of the hexagonal cell is far from every axis
        let vertex = v(&[0.5, 0.5 / 3f64.sqrt()]);
        assert_eq!(rods.eval(&(vertex * 0.99)), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_modes_periodic(
            n0 in -3i32..=3, n1 in -3i32..=3, n2 in -3i32..=3,
            x in prop::array::uniform3(-1.0f64..1.0),
        ) {
            let lat = BravaisLattice::body_centered_tetragonal(1.0, 0.7).unwrap();
            let m = ModeFunction::new(&lat).with_indices(n0, n1, n2);
            let x = v(&x);
            for a in lat.lattice_vectors() {
                let shifted = m.eval(&(&x + a));
                prop_assert!((shifted - m.eval(&x)).norm() < 1e-9);
            }
        }
    }
}

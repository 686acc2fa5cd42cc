//! Geometry primitives shared by every lattice: the dual basis, cell volumes and conversions
//! between Cartesian and fractional coordinates.
//!
//! Internally everything is done with [`Vector3`]. Planar lattices are embedded in the `z = 0`
//! plane; the public API hands out [`DVector`]s with exactly `dim` components.

use std::f64::consts::PI;

use nalgebra::{DVector, Vector3};
use num_traits::Zero;

/// Relative tolerance for geometric comparisons, scaled by the lattice length scale.
pub const TOL: f64 = 1e-10;

/// Embeds a `dim`-component point into 3D space.
///
/// # Panics
/// If the point does not have exactly `dim` components.
pub fn embed(pt: &DVector<f64>, dim: usize) -> Vector3<f64> {
    assert_eq!(
        pt.len(),
        dim,
        "expected a point with {} components, got {}",
        dim,
        pt.len()
    );
    let mut out = Vector3::zero();
    for (i, x) in pt.iter().enumerate() {
        out[i] = *x;
    }
    out
}

/// Drops the components of `v` beyond `dim`.
pub fn project(v: &Vector3<f64>, dim: usize) -> DVector<f64> {
    DVector::from_iterator(dim, v.iter().copied().take(dim))
}

/// The reciprocal basis, satisfying `a_i · b_j = 2π δ_ij`. In 2D the perpendicular-vector
/// formula is used, in 3D the cross-product formula.
pub fn reciprocal_vectors(lat: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    match lat {
        [a1, a2] => {
            let cz = a1.x * a2.y - a1.y * a2.x;
            let scale = 2.0 * PI / cz;
            vec![
                Vector3::new(a2.y, -a2.x, 0.0).scale(scale),
                Vector3::new(-a1.y, a1.x, 0.0).scale(scale),
            ]
        }
        [a1, a2, a3] => {
            let scale = 2.0 * PI / a1.dot(&a2.cross(a3));
            vec![
                a2.cross(a3).scale(scale),
                a3.cross(a1).scale(scale),
                a1.cross(a2).scale(scale),
            ]
        }
        _ => panic!("Lattices have 2 or 3 basis vectors, got {}", lat.len()),
    }
}

/// Volume (area in 2D) spanned by the vectors: the absolute scalar triple product, or the
/// magnitude of the cross product in 2D.
pub fn cell_volume(vecs: &[Vector3<f64>]) -> f64 {
    match vecs {
        [a1, a2] => a1.cross(a2).norm(),
        [a1, a2, a3] => a1.dot(&a2.cross(a3)).abs(),
        _ => panic!("Cells are spanned by 2 or 3 vectors, got {}", vecs.len()),
    }
}

/// The volume of the first Brillouin zone, `(2π)^dim / V`.
pub fn brillouin_zone_volume(unit_cell_volume: f64, dim: usize) -> f64 {
    (2.0 * PI).powi(dim as i32) / unit_cell_volume
}

/// Fractional coordinates of a Cartesian point with respect to the direct basis whose dual basis
/// is `rec`.
pub fn fractional(pt: &Vector3<f64>, rec: &[Vector3<f64>]) -> Vec<f64> {
    rec.iter().map(|b| pt.dot(b) / (2.0 * PI)).collect()
}

/// Linear combination `Σ f_i v_i`.
pub fn combine(coefs: &[f64], vecs: &[Vector3<f64>]) -> Vector3<f64> {
    coefs
        .iter()
        .zip(vecs)
        .fold(Vector3::zero(), |acc, (f, v)| acc + v.scale(*f))
}

/// Integer linear combination `Σ n_i v_i`.
pub fn lattice_point(n: &[i32], vecs: &[Vector3<f64>]) -> Vector3<f64> {
    n.iter()
        .zip(vecs)
        .fold(Vector3::zero(), |acc, (k, v)| acc + v.scale(*k as f64))
}

/// The largest basis vector length, used to scale tolerances.
pub fn length_scale(vecs: &[Vector3<f64>]) -> f64 {
    vecs.iter().map(|v| v.norm()).fold(0.0, f64::max)
}

/// Every integer vector of length `dim` with entries in `-range..=range`, in lexicographic
/// order.
pub fn integer_box(dim: usize, range: i32) -> Vec<Vec<i32>> {
    let mut out = vec![];
    let mut n = vec![-range; dim];
    loop {
        out.push(n.clone());
        // odometer increment, last coordinate fastest
        let mut i = dim;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if n[i] < range {
                n[i] += 1;
                break;
            }
            n[i] = -range;
        }
    }
}

/// A reduced basis of a lattice, with the unimodular integer matrix relating it to the basis it
/// was computed from: `vectors[i] = Σ_j transform[i][j] original[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedBasis {
    pub vectors: Vec<Vector3<f64>>,
    pub transform: Vec<Vec<i32>>,
}

impl ReducedBasis {
    /// Converts integer coordinates in the reduced basis to coordinates in the original one.
    pub fn to_original(&self, n: &[i32]) -> Vec<i32> {
        let dim = self.vectors.len();
        (0..dim)
            .map(|j| n.iter().zip(&self.transform).map(|(k, row)| k * row[j]).sum())
            .collect()
    }
}

/// Greedy reduction: each vector is shortened by integer combinations of the others until no
/// such step helps. In two and three dimensions this ends in a Minkowski-reduced basis, whose
/// Voronoi-relevant vectors have coordinates in `{-1, 0, 1}`.
pub fn reduce_basis(vecs: &[Vector3<f64>]) -> ReducedBasis {
    let dim = vecs.len();
    let scale = length_scale(vecs);
    let tol = TOL * scale * scale;
    let mut basis = vecs.to_vec();
    let mut transform: Vec<Vec<i32>> = (0..dim)
        .map(|i| (0..dim).map(|j| i32::from(i == j)).collect())
        .collect();
    let combos = integer_box(dim - 1, 2);

    loop {
        let mut changed = false;
        for i in 0..dim {
            let others: Vec<usize> = (0..dim).filter(|&j| j != i).collect();
            // size reduction against each other vector, then a small search over combinations
            let mut steps: Vec<Vec<i32>> = others
                .iter()
                .enumerate()
                .map(|(k, &j)| {
                    let m = (basis[i].dot(&basis[j]) / basis[j].norm_squared()).round() as i32;
                    let mut step = vec![0; others.len()];
                    step[k] = m;
                    step
                })
                .collect();
            steps.extend(combos.iter().cloned());
            for step in steps {
                if step.iter().all(|&m| m == 0) {
                    continue;
                }
                let shorter = others
                    .iter()
                    .zip(&step)
                    .fold(basis[i], |acc, (&j, &m)| acc - basis[j].scale(m as f64));
                if shorter.norm_squared() < basis[i].norm_squared() - tol {
                    basis[i] = shorter;
                    for (&j, &m) in others.iter().zip(&step) {
                        for col in 0..dim {
                            let delta = m * transform[j][col];
                            transform[i][col] -= delta;
                        }
                    }
                    changed = true;
                }
            }
        }
        if !changed {
            return ReducedBasis {
                vectors: basis,
                transform,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_dual_basis_3d() {
        let lat = vec![
            Vector3::new(1.0, 0.2, 0.0),
            Vector3::new(-0.3, 1.1, 0.1),
            Vector3::new(0.2, 0.4, 0.9),
        ];
        let rec = reciprocal_vectors(&lat);
        for (i, b) in rec.iter().enumerate() {
            for (j, a) in lat.iter().enumerate() {
                let expected = if i == j { 2.0 * PI } else { 0.0 };
                assert_relative_eq!(b.dot(a), expected, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(
            cell_volume(&rec),
            brillouin_zone_volume(cell_volume(&lat), 3),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_dual_basis_2d() {
        let lat = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)];
        let rec = reciprocal_vectors(&lat);
        assert_relative_eq!(rec[0], Vector3::new(2.0 * PI, 0.0, 0.0));
        assert_relative_eq!(rec[1], Vector3::new(0.0, 2.0 * PI, 0.0));
        assert_relative_eq!(cell_volume(&lat), 1.0);
    }

    #[test]
    fn test_fractional_roundtrip() {
        let lat = vec![
            Vector3::new(0.5, -0.8, 0.0),
            Vector3::new(0.5, 0.8, 0.0),
            Vector3::new(0.0, 0.0, 2.0),
        ];
        let rec = reciprocal_vectors(&lat);
        let pt = Vector3::new(0.3, -1.7, 4.2);
        let f = fractional(&pt, &rec);
        assert_relative_eq!(combine(&f, &lat), pt, epsilon = 1e-12);
        assert_relative_eq!(
            lattice_point(&[1, -2, 3], &lat),
            Vector3::new(-0.5, -2.4, 6.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_embed_project() {
        let p = DVector::from_vec(vec![1.0, 2.0]);
        let v = embed(&p, 2);
        assert_eq!(v, Vector3::new(1.0, 2.0, 0.0));
        assert_eq!(project(&v, 2), p);
    }

    #[test]
    fn test_integer_box() {
        let pts = integer_box(2, 1);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], vec![-1, -1]);
        assert_eq!(pts[1], vec![-1, 0]);
        assert_eq!(pts[8], vec![1, 1]);
    }

    /// The reduced vectors are the stated combinations of the originals, span the same cell and
    /// cannot be shortened by adding or subtracting another basis vector.
    fn assert_reduced(lat: &[Vector3<f64>], red: &ReducedBasis) {
        for (v, row) in red.vectors.iter().zip(&red.transform) {
            assert_relative_eq!(*v, lattice_point(row, lat), epsilon = 1e-9);
        }
        assert_relative_eq!(cell_volume(&red.vectors), cell_volume(lat), max_relative = 1e-9);
        for (i, u) in red.vectors.iter().enumerate() {
            for (j, w) in red.vectors.iter().enumerate() {
                if i != j {
                    assert!(u.norm() <= (u - w).norm() + 1e-9);
                    assert!(u.norm() <= (u + w).norm() + 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_reduce_skewed_2d() {
        // a2 is nearly 5 a1
        let lat = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(5.1, 0.2, 0.0)];
        let red = reduce_basis(&lat);
        assert_reduced(&lat, &red);
        let shortest = red.vectors.iter().map(|v| v.norm_squared()).fold(f64::INFINITY, f64::min);
        assert_relative_eq!(shortest, 0.05, epsilon = 1e-12);
        assert_eq!(red.to_original(&[1, 0]), red.transform[0]);
        assert_eq!(red.to_original(&[0, 0]), vec![0, 0]);
    }

    #[test]
    fn test_reduce_keeps_reduced() {
        let lat = vec![
            Vector3::new(-0.5, 0.5, 0.5),
            Vector3::new(0.5, -0.5, 0.5),
            Vector3::new(0.5, 0.5, -0.5),
        ];
        let red = reduce_basis(&lat);
        assert_eq!(red.vectors, lat);
        assert_eq!(red.transform, vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]);
    }

    #[test]
    fn test_reduce_skewed_3d() {
        let lat = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(3.3, -4.6, 0.4),
        ];
        let red = reduce_basis(&lat);
        assert_reduced(&lat, &red);
        // (0.3, 0.4, 0.4) = a3 - 3 a1 + 5 a2 is the shortest lattice vector
        let shortest = red.vectors.iter().map(|v| v.norm_squared()).fold(f64::INFINITY, f64::min);
        assert_relative_eq!(shortest, 0.41, epsilon = 1e-12);
    }

    #[test]
    #[should_panic]
    fn test_embed_wrong_dim() {
        embed(&DVector::from_vec(vec![1.0, 2.0]), 3);
    }
}

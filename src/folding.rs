//! Point-group folding of Brillouin-zone points into the irreducible wedge.
//!
//! Each lattice type gets a set of mirror normals, the simple roots of its point group, and, when
//! the point group holds no mirror that flips the wedge's orientation, an inversion axis.
//! A point is folded by inverting it into the half-space of the axis and then reflecting it
//! across any mirror it lies behind until it is on the positive side of all of them.

use std::f64::consts::FRAC_1_SQRT_2;

use log::warn;
use nalgebra::Vector3;

use crate::lattice_type::LatticeType;

/// Reflection passes before giving up. The wedges of the crystallographic point groups are
/// reached in far fewer.
const MAX_PASSES: usize = 64;

/// The folding data of one lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Folding {
    inversion: Option<Vector3<f64>>,
    mirrors: Vec<Vector3<f64>>,
}

impl Folding {
    /// The folding for a lattice of type `kind` whose primitive vectors are `lat`. Only the
    /// rhombohedral mirrors depend on the vectors; every other set is fixed by the orientation
    /// of the primitive vectors.
    pub fn new(kind: LatticeType, lat: &[Vector3<f64>]) -> Self {
        let r2 = FRAC_1_SQRT_2;
        let half_s3 = 0.75f64.sqrt();
        let x = Vector3::x();
        let y = Vector3::y();
        let z = Vector3::z();
        let (inversion, mirrors) = match kind {
            LatticeType::PrimitiveSquare => (None, vec![Vector3::new(r2, -r2, 0.0), y]),
            LatticeType::PrimitiveRectangular | LatticeType::CenteredRectangular => {
                (None, vec![x, y])
            }
            LatticeType::PrimitiveHexagonal => (None, vec![y, Vector3::new(0.5, -half_s3, 0.0)]),
            LatticeType::PrimitiveOblique => (Some(y), vec![]),
            LatticeType::PrimitiveCubic
            | LatticeType::FaceCenteredCubic
            | LatticeType::BodyCenteredCubic => (
                None,
                vec![Vector3::new(r2, -r2, 0.0), Vector3::new(0.0, r2, -r2), z],
            ),
            LatticeType::PrimitiveTetragonal | LatticeType::BodyCenteredTetragonal => {
                (None, vec![Vector3::new(r2, -r2, 0.0), y, z])
            }
            LatticeType::PrimitiveOrthorhombic
            | LatticeType::FaceCenteredOrthorhombic
            | LatticeType::BodyCenteredOrthorhombic
            | LatticeType::BaseCenteredOrthorhombic => (None, vec![x, y, z]),
            LatticeType::PrimitiveHexagonalPrism => {
                (None, vec![y, Vector3::new(0.5, -half_s3, 0.0), z])
            }
            LatticeType::PrimitiveRhombohedral => {
                let (a1, a2, a3) = (lat[0], lat[1], lat[2]);
                (
                    Some((a1 + a2 + a3).normalize()),
                    vec![(a1 - a2).normalize(), (a2 - a3).normalize()],
                )
            }
            LatticeType::PrimitiveMonoclinic | LatticeType::BaseCenteredMonoclinic => {
                (Some(z), vec![x])
            }
            LatticeType::PrimitiveTriclinic => (Some(z), vec![]),
        };
        Self { inversion, mirrors }
    }

    pub fn inversion_axis(&self) -> Option<&Vector3<f64>> {
        self.inversion.as_ref()
    }

    pub fn mirrors(&self) -> &[Vector3<f64>] {
        &self.mirrors
    }

    /// Folds a point into the wedge. Points already inside, including those on a wedge boundary
    /// to within `tol`, come back unchanged.
    pub fn fold(&self, pt: &Vector3<f64>, tol: f64) -> Vector3<f64> {
        let mut q = *pt;
        if let Some(axis) = &self.inversion {
            if q.dot(axis) < -tol {
                q = -q;
            }
        }
        for _ in 0..MAX_PASSES {
            let mut reflected = false;
            for n in &self.mirrors {
                let s = q.dot(n);
                if s < -tol {
                    q -= n.scale(2.0 * s);
                    reflected = true;
                }
            }
            if !reflected {
                return q;
            }
        }
        warn!("Folding of {:?} did not settle after {} passes", pt, MAX_PASSES);
        q
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    use super::*;

    fn cubic() -> Folding {
        Folding::new(
            LatticeType::PrimitiveCubic,
            &[Vector3::x(), Vector3::y(), Vector3::z()],
        )
    }

    #[test]
    fn test_cubic_wedge() {
        let q = cubic().fold(&Vector3::new(-0.1, 0.4, -0.3), 1e-12);
        // the wedge is x >= y >= z >= 0, so folding sorts the absolute values
        assert_relative_eq!(q, Vector3::new(0.4, 0.3, 0.1), epsilon = 1e-12);
    }

    #[test]
    fn test_triclinic_inversion() {
        let f = Folding::new(
            LatticeType::PrimitiveTriclinic,
            &[Vector3::x(), Vector3::y(), Vector3::z()],
        );
        assert_relative_eq!(
            f.fold(&Vector3::new(0.1, 0.2, -0.3), 1e-12),
            Vector3::new(-0.1, -0.2, 0.3)
        );
        assert!(f.mirrors().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]
        #[test]
        fn test_fold_idempotent(x in -1.0..1.0f64, y in -1.0..1.0f64, z in -1.0..1.0f64) {
            let f = cubic();
            let q = f.fold(&Vector3::new(x, y, z), 1e-12);
            assert_relative_eq!(f.fold(&q, 1e-12), q);
            for n in f.mirrors() {
                prop_assert!(q.dot(n) >= -1e-12);
            }
        }
    }
}

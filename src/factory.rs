//! Construction of lattices from a type and the six raw parameters, the way callers holding a
//! numeric type code and a parameter array want it.

use log::{debug, info};

use crate::{
    lattice::{BravaisLattice, LatticeError},
    lattice_type::LatticeType,
    params::LatticeParams,
};

/// Builds a lattice of type `kind`. Only the parameters the type consults are read; any of those
/// that is negative takes the type default (see [`LatticeParams::default_for`]).
///
/// `logging > 0` logs a summary of the lattice at info level, `logging > 1` adds detail at debug
/// level.
#[allow(clippy::too_many_arguments)]
pub fn bravais_lattice_factory(
    kind: LatticeType,
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    logging: i32,
) -> Result<BravaisLattice, LatticeError> {
    let raw = LatticeParams::new(a, b, c, alpha, beta, gamma);
    let lat = BravaisLattice::new(kind, &raw)?;
    if logging > 0 {
        info!(
            "Created {} lattice ({}) with volume {:.6}",
            lat.lattice_type_label(),
            lat.regime(),
            lat.unit_cell_volume()
        );
    }
    if logging > 1 {
        debug!("Parameters: {:?}", lat.params());
        for (t, r) in lat.translation_vectors().iter().zip(lat.face_radii()) {
            debug!("Translation {:?} with face radius {:.6}", t.as_slice(), r);
        }
        let mesh = lat.coarse_wigner_seitz_mesh();
        debug!(
            "Coarse mesh: {:?} with {} vertices, {} elements and {} boundary elements",
            mesh.shape,
            mesh.vertices.len(),
            mesh.elements.len(),
            mesh.boundary.len()
        );
    }
    Ok(lat)
}

/// Like [`bravais_lattice_factory`], with the type given by its integer code. Code 0 and unknown
/// codes are rejected.
#[allow(clippy::too_many_arguments)]
pub fn bravais_lattice_factory_from_code(
    code: i32,
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
    logging: i32,
) -> Result<BravaisLattice, LatticeError> {
    let kind = LatticeType::from_code(code)?;
    bravais_lattice_factory(kind, a, b, c, alpha, beta, gamma, logging)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_substituted() {
        let lat = bravais_lattice_factory(LatticeType::PrimitiveCubic, -1., 0., 0., 0., 0., 0., 0)
            .unwrap();
        assert_eq!(lat.lattice_type(), LatticeType::PrimitiveCubic);
        assert_relative_eq!(lat.unit_cell_volume(), 1.0);
        assert_eq!(lat.num_symmetry_points(), 4);
    }

    #[test]
    fn test_unconsulted_ignored() {
        let lat = bravais_lattice_factory(
            LatticeType::BodyCenteredTetragonal,
            1.0,
            123.0,
            0.5,
            -7.0,
            0.0,
            99.0,
            2,
        )
        .unwrap();
        assert_eq!(lat.regime(), "BCT1");
        assert_eq!(lat.axial_lengths(), vec![1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_codes() {
        assert!(matches!(
            bravais_lattice_factory_from_code(0, 1., 1., 1., 1., 1., 1., 0),
            Err(LatticeError::InvalidType(0))
        ));
        assert!(bravais_lattice_factory_from_code(42, 1., 1., 1., 1., 1., 1., 0).is_err());
        let lat = bravais_lattice_factory_from_code(7, -1., -1., -1., -1., -1., -1., 1).unwrap();
        assert_eq!(lat.lattice_type(), LatticeType::FaceCenteredCubic);
    }

    #[test]
    fn test_invalid_rejected() {
        // zero is not negative, so it is taken literally and rejected
        assert!(bravais_lattice_factory(LatticeType::PrimitiveSquare, 0., 0., 0., 0., 0., 0., 0)
            .is_err());
        assert!(bravais_lattice_factory(
            LatticeType::PrimitiveRhombohedral,
            1.0,
            -1.,
            -1.,
            2.5,
            -1.,
            -1.,
            0
        )
        .is_err());
    }
}

//! The 19 Bravais lattices of two and three dimensions: primitive and reciprocal bases,
//! Wigner-Seitz cells, Brillouin-zone symmetry points and paths, folding into the irreducible
//! wedge, and coarse meshes of the Wigner-Seitz cell.

pub mod coefficients;
pub mod factory;
pub mod folding;
pub mod geometry;
pub mod lattice;
pub mod lattice_type;
pub mod mesh;
pub mod params;
pub mod parsing;
pub mod special_points;
pub mod summary;
pub mod symbols;
pub mod voronoi;

pub use factory::{bravais_lattice_factory, bravais_lattice_factory_from_code};
pub use lattice::{BravaisLattice, LatticeError};
pub use lattice_type::LatticeType;
pub use params::{LatticeParams, Param};

//! Bravais lattices. A [`Geometry`] is the idealized lattice: its type and the parameters that
//! type consults. A [`BravaisLattice`] is that geometry realized in a fixed orientation, with
//! everything derived from it (reciprocal basis, Wigner-Seitz cell, symmetry tables, coarse mesh)
//! computed once on construction. Lattices are immutable afterwards.

use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    folding::Folding,
    geometry::{
        brillouin_zone_volume, cell_volume, combine, embed, fractional, length_scale, project,
        reciprocal_vectors, TOL,
    },
    lattice_type::LatticeType,
    mesh::CoarseMesh,
    params::LatticeParams,
    special_points::{self, Catalog},
    voronoi::WignerSeitzCell,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatticeError {
    #[error("Invalid lattice type code: {0}")]
    InvalidType(i32),
    #[error("Unknown lattice type name: {0}")]
    UnknownTypeName(String),
    #[error("Invalid length {name} = {value}: lengths must be finite and positive")]
    InvalidLength { name: &'static str, value: f64 },
    #[error("Invalid angle {name} = {value}")]
    InvalidAngle { name: &'static str, value: f64 },
    #[error("Angles cannot be satisfied: {0}, {1}, {2}")]
    InvalidAngles(f64, f64, f64),
    #[error("Monoclinic cell b = {b}, c = {c}, alpha = {alpha} is not reduced: need c >= b and 2c cos(alpha) < b")]
    UnreducedMonoclinic { b: f64, c: f64, alpha: f64 },
    #[error("Cannot mesh a Wigner-Seitz cell face with {0} corners")]
    UnmeshableCell(usize),
    #[error("Could not parse lattice descriptor: {0}")]
    Parse(String),
}

/// A lattice type together with the parameters it consults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Square { a: f64 },
    Hexagonal2D { a: f64 },
    Rectangular { a: f64, b: f64 },
    CenteredRectangular { a: f64, b: f64 },
    Oblique { a: f64, b: f64, gamma: f64 },
    Cubic { a: f64 },
    FaceCenteredCubic { a: f64 },
    BodyCenteredCubic { a: f64 },
    Tetragonal { a: f64, c: f64 },
    BodyCenteredTetragonal { a: f64, c: f64 },
    Orthorhombic { a: f64, b: f64, c: f64 },
    FaceCenteredOrthorhombic { a: f64, b: f64, c: f64 },
    BodyCenteredOrthorhombic { a: f64, b: f64, c: f64 },
    BaseCenteredOrthorhombic { a: f64, b: f64, c: f64 },
    HexagonalPrism { a: f64, c: f64 },
    Rhombohedral { a: f64, alpha: f64 },
    Monoclinic { a: f64, b: f64, c: f64, alpha: f64 },
    BaseCenteredMonoclinic { a: f64, b: f64, c: f64, alpha: f64 },
    Triclinic {
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    },
}

impl Geometry {
    /// Picks the consulted parameters of `kind` out of `p`. `p` should already be resolved.
    pub fn new(kind: LatticeType, p: &LatticeParams) -> Self {
        let LatticeParams {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        } = *p;
        match kind {
            LatticeType::PrimitiveSquare => Self::Square { a },
            LatticeType::PrimitiveHexagonal => Self::Hexagonal2D { a },
            LatticeType::PrimitiveRectangular => Self::Rectangular { a, b },
            LatticeType::CenteredRectangular => Self::CenteredRectangular { a, b },
            LatticeType::PrimitiveOblique => Self::Oblique { a, b, gamma },
            LatticeType::PrimitiveCubic => Self::Cubic { a },
            LatticeType::FaceCenteredCubic => Self::FaceCenteredCubic { a },
            LatticeType::BodyCenteredCubic => Self::BodyCenteredCubic { a },
            LatticeType::PrimitiveTetragonal => Self::Tetragonal { a, c },
            LatticeType::BodyCenteredTetragonal => Self::BodyCenteredTetragonal { a, c },
            LatticeType::PrimitiveOrthorhombic => Self::Orthorhombic { a, b, c },
            LatticeType::FaceCenteredOrthorhombic => Self::FaceCenteredOrthorhombic { a, b, c },
            LatticeType::BodyCenteredOrthorhombic => Self::BodyCenteredOrthorhombic { a, b, c },
            LatticeType::BaseCenteredOrthorhombic => Self::BaseCenteredOrthorhombic { a, b, c },
            LatticeType::PrimitiveHexagonalPrism => Self::HexagonalPrism { a, c },
            LatticeType::PrimitiveRhombohedral => Self::Rhombohedral { a, alpha },
            LatticeType::PrimitiveMonoclinic => Self::Monoclinic { a, b, c, alpha },
            LatticeType::BaseCenteredMonoclinic => Self::BaseCenteredMonoclinic { a, b, c, alpha },
            LatticeType::PrimitiveTriclinic => Self::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            },
        }
    }

    pub fn lattice_type(&self) -> LatticeType {
        match self {
            Self::Square { .. } => LatticeType::PrimitiveSquare,
            Self::Hexagonal2D { .. } => LatticeType::PrimitiveHexagonal,
            Self::Rectangular { .. } => LatticeType::PrimitiveRectangular,
            Self::CenteredRectangular { .. } => LatticeType::CenteredRectangular,
            Self::Oblique { .. } => LatticeType::PrimitiveOblique,
            Self::Cubic { .. } => LatticeType::PrimitiveCubic,
            Self::FaceCenteredCubic { .. } => LatticeType::FaceCenteredCubic,
            Self::BodyCenteredCubic { .. } => LatticeType::BodyCenteredCubic,
            Self::Tetragonal { .. } => LatticeType::PrimitiveTetragonal,
            Self::BodyCenteredTetragonal { .. } => LatticeType::BodyCenteredTetragonal,
            Self::Orthorhombic { .. } => LatticeType::PrimitiveOrthorhombic,
            Self::FaceCenteredOrthorhombic { .. } => LatticeType::FaceCenteredOrthorhombic,
            Self::BodyCenteredOrthorhombic { .. } => LatticeType::BodyCenteredOrthorhombic,
            Self::BaseCenteredOrthorhombic { .. } => LatticeType::BaseCenteredOrthorhombic,
            Self::HexagonalPrism { .. } => LatticeType::PrimitiveHexagonalPrism,
            Self::Rhombohedral { .. } => LatticeType::PrimitiveRhombohedral,
            Self::Monoclinic { .. } => LatticeType::PrimitiveMonoclinic,
            Self::BaseCenteredMonoclinic { .. } => LatticeType::BaseCenteredMonoclinic,
            Self::Triclinic { .. } => LatticeType::PrimitiveTriclinic,
        }
    }

    /// The primitive vectors in the canonical orientation of the type. Planar lattices lie in the
    /// `z = 0` plane.
    pub fn primitive_vectors(&self) -> Result<Vec<Vector3<f64>>, LatticeError> {
        let s3 = 3f64.sqrt();
        let v = |x: f64, y: f64, z: f64| Vector3::new(x, y, z);
        let vecs = match *self {
            Self::Square { a } => vec![v(a, 0., 0.), v(0., a, 0.)],
            Self::Hexagonal2D { a } => vec![v(a / 2., -a * s3 / 2., 0.), v(a / 2., a * s3 / 2., 0.)],
            Self::Rectangular { a, b } => vec![v(a, 0., 0.), v(0., b, 0.)],
            Self::CenteredRectangular { a, b } => vec![v(a / 2., -b / 2., 0.), v(a / 2., b / 2., 0.)],
            Self::Oblique { a, b, gamma } => {
                let (sin_y, cos_y) = gamma.sin_cos();
                vec![v(a, 0., 0.), v(b * cos_y, b * sin_y, 0.)]
            }
            Self::Cubic { a } => vec![v(a, 0., 0.), v(0., a, 0.), v(0., 0., a)],
            Self::FaceCenteredCubic { a } => face_centered(a, a, a),
            Self::BodyCenteredCubic { a } => body_centered(a, a, a),
            Self::Tetragonal { a, c } => vec![v(a, 0., 0.), v(0., a, 0.), v(0., 0., c)],
            Self::BodyCenteredTetragonal { a, c } => body_centered(a, a, c),
            Self::Orthorhombic { a, b, c } => vec![v(a, 0., 0.), v(0., b, 0.), v(0., 0., c)],
            Self::FaceCenteredOrthorhombic { a, b, c } => face_centered(a, b, c),
            Self::BodyCenteredOrthorhombic { a, b, c } => body_centered(a, b, c),
            Self::BaseCenteredOrthorhombic { a, b, c } => {
                vec![v(a / 2., -b / 2., 0.), v(a / 2., b / 2., 0.), v(0., 0., c)]
            }
            Self::HexagonalPrism { a, c } => vec![
                v(a / 2., -a * s3 / 2., 0.),
                v(a / 2., a * s3 / 2., 0.),
                v(0., 0., c),
            ],
            Self::Rhombohedral { a, alpha } => {
                let (sin_h, cos_h) = (alpha / 2.).sin_cos();
                let cos_a = alpha.cos();
                let x = cos_a / cos_h;
                vec![
                    v(a * cos_h, -a * sin_h, 0.),
                    v(a * cos_h, a * sin_h, 0.),
                    v(a * x, 0., a * (1. - x * x).sqrt()),
                ]
            }
            Self::Monoclinic { a, b, c, alpha } => {
                let (sin_a, cos_a) = alpha.sin_cos();
                vec![v(a, 0., 0.), v(0., b, 0.), v(0., c * cos_a, c * sin_a)]
            }
            Self::BaseCenteredMonoclinic { a, b, c, alpha } => {
                let (sin_a, cos_a) = alpha.sin_cos();
                vec![
                    v(a / 2., b / 2., 0.),
                    v(-a / 2., b / 2., 0.),
                    v(0., c * cos_a, c * sin_a),
                ]
            }
            Self::Triclinic {
                a,
                b,
                c,
                alpha,
                beta,
                gamma,
            } => triclinic(a, b, c, alpha, beta, gamma)?,
        };
        Ok(vecs)
    }
}

fn face_centered(a: f64, b: f64, c: f64) -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(0., b / 2., c / 2.),
        Vector3::new(a / 2., 0., c / 2.),
        Vector3::new(a / 2., b / 2., 0.),
    ]
}

fn body_centered(a: f64, b: f64, c: f64) -> Vec<Vector3<f64>> {
    vec![
        Vector3::new(-a / 2., b / 2., c / 2.),
        Vector3::new(a / 2., -b / 2., c / 2.),
        Vector3::new(a / 2., b / 2., -c / 2.),
    ]
}

/// Out of all rotations of a lattice that satisfy the parameters, chooses the upper-triangular
/// one: a along x and b in the xy plane. [AFlow](https://aflow.org/prototype-encyclopedia/triclinic_lattice.html)
/// gives the formulae.
///
/// This is fallible: [not all combinations give valid unit
/// cells.](https://journals.iucr.org/a/issues/2011/01/00/au5114/au5114.pdf)
fn triclinic(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<Vec<Vector3<f64>>, LatticeError> {
    let cos_a = alpha.cos();
    let cos_b = beta.cos();
    let (sin_y, cos_y) = gamma.sin_cos();

    let a_vec = Vector3::x().scale(a);
    let b_vec = Vector3::new(cos_y, sin_y, 0.).scale(b);
    let cx = cos_b;
    let cy = (cos_a - cos_b * cos_y) / sin_y;
    let cz2 = 1. - cx * cx - cy * cy;
    if cz2 <= 0. {
        return Err(LatticeError::InvalidAngles(alpha, beta, gamma));
    }
    let c_vec = Vector3::new(cx, cy, cz2.sqrt()).scale(c);
    Ok(vec![a_vec, b_vec, c_vec])
}

/// A lattice realized in space, with all derived data.
#[derive(Debug, Clone, PartialEq)]
pub struct BravaisLattice {
    geometry: Geometry,
    params: LatticeParams,
    lattice_vectors: Vec<Vector3<f64>>,
    reciprocal_vectors: Vec<Vector3<f64>>,
    unit_cell_volume: f64,
    cell: WignerSeitzCell,
    folding: Folding,
    catalog: Catalog,
    mesh: CoarseMesh,
}

impl BravaisLattice {
    /// Builds a lattice from raw parameters: negative consulted values take the type default,
    /// then the set is normalized and validated.
    pub fn new(kind: LatticeType, raw: &LatticeParams) -> Result<Self, LatticeError> {
        Self::from_params(kind, LatticeParams::resolve(kind, raw)?)
    }

    /// Builds a lattice from parameters taken as given, with no default substitution.
    pub fn exact(kind: LatticeType, raw: &LatticeParams) -> Result<Self, LatticeError> {
        Self::from_params(kind, LatticeParams::exact(kind, raw)?)
    }

    fn from_params(kind: LatticeType, params: LatticeParams) -> Result<Self, LatticeError> {
        let geometry = Geometry::new(kind, &params);
        let lattice_vectors = geometry.primitive_vectors()?;
        let reciprocal_vectors = reciprocal_vectors(&lattice_vectors);
        let unit_cell_volume = cell_volume(&lattice_vectors);
        let cell = WignerSeitzCell::new(&lattice_vectors);
        let folding = Folding::new(kind, &lattice_vectors);
        let catalog = Catalog::from_table(
            special_points::table(kind, &params, &reciprocal_vectors),
            &reciprocal_vectors,
        );
        let mesh = CoarseMesh::new(&cell)?;
        Ok(Self {
            geometry,
            params,
            lattice_vectors,
            reciprocal_vectors,
            unit_cell_volume,
            cell,
            folding,
            catalog,
            mesh,
        })
    }

    fn build(kind: LatticeType, p: LatticeParams) -> Result<Self, LatticeError> {
        Self::exact(kind, &p)
    }

    fn lengths(a: f64, b: f64, c: f64) -> LatticeParams {
        LatticeParams {
            a,
            b,
            c,
            ..LatticeParams::default()
        }
    }

    pub fn square(a: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveSquare, Self::lengths(a, a, a))
    }

    pub fn hexagonal_2d(a: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveHexagonal, Self::lengths(a, a, a))
    }

    pub fn rectangular(a: f64, b: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveRectangular, Self::lengths(a, b, a))
    }

    pub fn centered_rectangular(a: f64, b: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::CenteredRectangular, Self::lengths(a, b, a))
    }

    /// `gamma` is the angle between the two primitive vectors.
    pub fn oblique(a: f64, b: f64, gamma: f64) -> Result<Self, LatticeError> {
        let p = LatticeParams {
            gamma,
            ..Self::lengths(a, b, a)
        };
        Self::build(LatticeType::PrimitiveOblique, p)
    }

    pub fn cubic(a: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveCubic, Self::lengths(a, a, a))
    }

    pub fn face_centered_cubic(a: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::FaceCenteredCubic, Self::lengths(a, a, a))
    }

    pub fn body_centered_cubic(a: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::BodyCenteredCubic, Self::lengths(a, a, a))
    }

    pub fn tetragonal(a: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveTetragonal, Self::lengths(a, a, c))
    }

    pub fn body_centered_tetragonal(a: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::BodyCenteredTetragonal, Self::lengths(a, a, c))
    }

    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveOrthorhombic, Self::lengths(a, b, c))
    }

    pub fn face_centered_orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::FaceCenteredOrthorhombic, Self::lengths(a, b, c))
    }

    pub fn body_centered_orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::BodyCenteredOrthorhombic, Self::lengths(a, b, c))
    }

    /// Centered on the face spanned by a and b.
    pub fn base_centered_orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::BaseCenteredOrthorhombic, Self::lengths(a, b, c))
    }

    pub fn hexagonal_prism(a: f64, c: f64) -> Result<Self, LatticeError> {
        Self::build(LatticeType::PrimitiveHexagonalPrism, Self::lengths(a, a, c))
    }

    /// `alpha` is the angle between any two primitive vectors, below 2π/3.
    pub fn rhombohedral(a: f64, alpha: f64) -> Result<Self, LatticeError> {
        let p = LatticeParams {
            alpha,
            ..Self::lengths(a, a, a)
        };
        Self::build(LatticeType::PrimitiveRhombohedral, p)
    }

    /// `alpha` is the angle between b and c; a is perpendicular to both.
    pub fn monoclinic(a: f64, b: f64, c: f64, alpha: f64) -> Result<Self, LatticeError> {
        let p = LatticeParams {
            alpha,
            ..Self::lengths(a, b, c)
        };
        Self::build(LatticeType::PrimitiveMonoclinic, p)
    }

    pub fn base_centered_monoclinic(a: f64, b: f64, c: f64, alpha: f64) -> Result<Self, LatticeError> {
        let p = LatticeParams {
            alpha,
            ..Self::lengths(a, b, c)
        };
        Self::build(LatticeType::BaseCenteredMonoclinic, p)
    }

    pub fn triclinic(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, LatticeError> {
        Self::build(
            LatticeType::PrimitiveTriclinic,
            LatticeParams::new(a, b, c, alpha, beta, gamma),
        )
    }

    pub fn lattice_type(&self) -> LatticeType {
        self.geometry.lattice_type()
    }

    /// The human name of the type, e.g. "Body-Centered Tetragonal".
    pub fn lattice_type_label(&self) -> &'static str {
        self.lattice_type().label()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The resolved parameters, including the ones fixed by symmetry.
    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    pub fn dim(&self) -> usize {
        self.lattice_vectors.len()
    }

    /// The conventional axial lengths: (a, b) in 2D, (a, b, c) in 3D.
    pub fn axial_lengths(&self) -> Vec<f64> {
        let p = &self.params;
        [p.a, p.b, p.c][..self.dim()].to_vec()
    }

    /// The conventional interaxial angles: γ in 2D, (α, β, γ) in 3D.
    pub fn interaxial_angles(&self) -> Vec<f64> {
        let p = &self.params;
        if self.dim() == 2 {
            vec![p.gamma]
        } else {
            vec![p.alpha, p.beta, p.gamma]
        }
    }

    pub fn unit_cell_volume(&self) -> f64 {
        self.unit_cell_volume
    }

    pub fn brillouin_zone_volume(&self) -> f64 {
        brillouin_zone_volume(self.unit_cell_volume, self.dim())
    }

    fn to_public(&self, vecs: &[Vector3<f64>]) -> Vec<DVector<f64>> {
        vecs.iter().map(|v| project(v, self.dim())).collect()
    }

    pub fn lattice_vectors(&self) -> Vec<DVector<f64>> {
        self.to_public(&self.lattice_vectors)
    }

    pub fn reciprocal_vectors(&self) -> Vec<DVector<f64>> {
        self.to_public(&self.reciprocal_vectors)
    }

    /// One vector per pair of opposite Wigner-Seitz faces, pointing to the neighbor across it.
    pub fn translation_vectors(&self) -> Vec<DVector<f64>> {
        self.to_public(self.cell.translations())
    }

    /// Inscribed radius of each face pair, paired with [`Self::translation_vectors`].
    pub fn face_radii(&self) -> &[f64] {
        self.cell.face_radii()
    }

    pub fn wigner_seitz_cell(&self) -> &WignerSeitzCell {
        &self.cell
    }

    pub fn folding(&self) -> &Folding {
        &self.folding
    }

    fn tol(&self) -> f64 {
        TOL * length_scale(&self.lattice_vectors)
    }

    fn primitive_cell_image(&self, q: &Vector3<f64>) -> Option<Vector3<f64>> {
        let f = fractional(q, &self.reciprocal_vectors);
        let tol = TOL * 10.;
        if f.iter().all(|x| x.abs() <= 0.5 + tol) {
            return None;
        }
        let g: Vec<f64> = f.iter().map(|x| x - (x + 0.5).floor()).collect();
        Some(combine(&g, &self.lattice_vectors))
    }

    /// Translates a point into the primitive parallelepiped centered on the origin by reducing
    /// each fractional coordinate into [-1/2, 1/2). Points already in the closed cell are left
    /// alone. Returns the mapped point and whether it moved.
    ///
    /// # Panics
    /// If the point does not have [`Self::dim`] components.
    pub fn map_to_primitive_cell(&self, pt: &DVector<f64>) -> (DVector<f64>, bool) {
        let p = embed(pt, self.dim());
        match self.primitive_cell_image(&p) {
            None => (pt.clone(), false),
            Some(q) => (project(&q, self.dim()), (q - p).norm() > self.tol()),
        }
    }

    /// Maps a point into the irreducible wedge: reduce it into the Wigner-Seitz cell, fold it with
    /// the point group, and translate any part of the wedge that pokes out of the primitive
    /// parallelepiped back in. Returns the mapped point and whether it moved.
    ///
    /// # Panics
    /// If the point does not have [`Self::dim`] components.
    pub fn map_to_fundamental_domain(&self, pt: &DVector<f64>) -> (DVector<f64>, bool) {
        let p = embed(pt, self.dim());
        let q = self.cell.reduce(&p);
        let q = self.folding.fold(&q, self.tol());
        let q = self.primitive_cell_image(&q).unwrap_or(q);
        let moved = (q - p).norm() > self.tol();
        (project(&q, self.dim()), moved)
    }

    /// The symmetry tables of the lattice.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The table variant chosen for the parameters, e.g. `BCT1`.
    pub fn regime(&self) -> &str {
        self.catalog.regime()
    }

    pub fn num_symmetry_points(&self) -> usize {
        self.catalog.num_symmetry_points()
    }

    pub fn symmetry_point(&self, i: usize) -> DVector<f64> {
        self.catalog.symmetry_point(i)
    }

    pub fn symmetry_point_label(&self, i: usize) -> &str {
        self.catalog.symmetry_point_label(i)
    }

    pub fn symmetry_point_index(&self, label: &str) -> Option<usize> {
        self.catalog.symmetry_point_index(label)
    }

    pub fn num_intermediate_points(&self, path: usize) -> usize {
        self.catalog.num_intermediate_points(path)
    }

    pub fn intermediate_point(&self, path: usize, segment: usize) -> DVector<f64> {
        self.catalog.intermediate_point(path, segment)
    }

    pub fn intermediate_point_label(&self, path: usize, segment: usize) -> &str {
        self.catalog.intermediate_point_label(path, segment)
    }

    pub fn num_paths(&self) -> usize {
        self.catalog.num_paths()
    }

    pub fn num_path_segments(&self, path: usize) -> usize {
        self.catalog.num_path_segments(path)
    }

    pub fn path_segment_end_point_indices(&self, path: usize, segment: usize) -> (usize, usize) {
        self.catalog.path_segment_end_point_indices(path, segment)
    }

    /// A coarse mesh of the Wigner-Seitz cell.
    pub fn coarse_wigner_seitz_mesh(&self) -> &CoarseMesh {
        &self.mesh
    }
}

//! The Wigner-Seitz cell of a lattice: the Voronoi cell of the origin among the lattice points.
//!
//! A lattice vector `t` contributes a facet (the plane `x · t = |t|²/2`) exactly when `±t` are
//! the unique shortest vectors of the coset `t + 2L` (Voronoi's criterion). Ties mean the facet
//! has zero area, so tied vectors are dropped: at a bifurcation between two cell shapes the cell
//! with fewer facets is produced.

use std::cmp::Ordering;

use log::debug;
use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::{integer_box, lattice_point, length_scale, reduce_basis, TOL};

/// Range of integer coefficients, in the reduced basis, searched for relevant vectors.
const SEARCH_RANGE: i32 = 3;

/// Relative tolerance used when deciding whether a point lies on a facet plane.
const PLANE_TOL: f64 = 1e-8;

/// The combinatorial type of a Wigner-Seitz cell.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum WignerSeitzShape {
    /// 4 edges: square, rectangle.
    Parallelogram,
    /// 6 edges.
    Hexagon,
    /// 6 faces: cube, tetragonal and orthorhombic boxes.
    Parallelepiped,
    /// 8 faces: two hexagons and six parallelograms.
    HexagonalPrism,
    /// 12 parallelogram faces.
    RhombicDodecahedron,
    /// 12 faces, some of them hexagons.
    ElongatedDodecahedron,
    /// 14 faces.
    TruncatedOctahedron,
}

impl WignerSeitzShape {
    pub fn num_faces(&self) -> usize {
        match *self {
            Self::Parallelogram => 4,
            Self::Hexagon | Self::Parallelepiped => 6,
            Self::HexagonalPrism => 8,
            Self::RhombicDodecahedron | Self::ElongatedDodecahedron => 12,
            Self::TruncatedOctahedron => 14,
        }
    }

    /// Whether the cell is a prism over one of its faces, so that it can be meshed by extrusion.
    pub fn is_prism(&self) -> bool {
        matches!(
            self,
            Self::Parallelogram | Self::Hexagon | Self::Parallelepiped | Self::HexagonalPrism
        )
    }
}

/// A lattice vector whose perpendicular bisector carries a facet of the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct RelevantVector {
    /// Integer coordinates with respect to the lattice basis.
    pub coords: Vec<i32>,
    /// Cartesian vector.
    pub vec: Vector3<f64>,
}

impl RelevantVector {
    /// Canonical sign: the first non-zero integer coordinate is positive.
    fn is_canonical(&self) -> bool {
        self.coords.iter().find(|&&n| n != 0).is_some_and(|&n| n > 0)
    }
}

/// One facet of the cell (an edge in 2D).
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    /// The lattice vector to the neighbor across this facet.
    pub translation: Vector3<f64>,
    /// Index of the opposite-facet pair, shared by the facets of `t` and `-t`.
    pub pair: usize,
    /// Indices into the cell vertices. Counterclockwise around the outward normal in 3D, in
    /// counterclockwise cell order in 2D.
    pub vertices: Vec<usize>,
}

impl Facet {
    /// The facet center, which is the midpoint to the neighbor.
    pub fn center(&self) -> Vector3<f64> {
        self.translation.scale(0.5)
    }
}

/// The Wigner-Seitz cell of a lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct WignerSeitzCell {
    dim: usize,
    relevant: Vec<RelevantVector>,
    vertices: Vec<Vector3<f64>>,
    facets: Vec<Facet>,
    /// One translation per facet pair, in pair order.
    translations: Vec<Vector3<f64>>,
    face_radii: Vec<f64>,
}

/// Finds the Voronoi-relevant vectors of the lattice spanned by `lat`. The search runs over a
/// reduced basis, so arbitrarily skewed bases are handled; coordinates are reported in `lat`.
pub fn relevant_vectors(lat: &[Vector3<f64>]) -> Vec<RelevantVector> {
    let dim = lat.len();
    let scale = length_scale(lat);
    let tol = TOL * scale * scale;
    let reduced = reduce_basis(lat);

    let candidates: Vec<(Vec<i32>, Vector3<f64>)> = integer_box(dim, SEARCH_RANGE)
        .into_iter()
        .filter(|n| n.iter().any(|&k| k != 0))
        .map(|n| {
            let v = lattice_point(&n, &reduced.vectors);
            (n, v)
        })
        .collect();

    let mut out = vec![];
    for (n, v) in &candidates {
        // members of 2L are never relevant: 0 is in their coset
        if n.iter().all(|k| k % 2 == 0) {
            continue;
        }
        let len2 = v.norm_squared();
        let shadowed = candidates.iter().any(|(m, w)| {
            let same_coset = m.iter().zip(n).all(|(mi, ni)| (mi - ni) % 2 == 0);
            let is_pm = m == n || m.iter().zip(n).all(|(mi, ni)| *mi == -ni);
            same_coset && !is_pm && w.norm_squared() <= len2 + tol
        });
        if !shadowed {
            out.push(RelevantVector {
                coords: reduced.to_original(n),
                vec: *v,
            });
        }
    }
    out
}

/// Orders canonical relevant vectors by length, breaking ties by integer coordinates so that
/// e.g. the cubic translations come out as a, b, c.
fn compare_translations(x: &RelevantVector, y: &RelevantVector, tol: f64) -> Ordering {
    let (lx, ly) = (x.vec.norm(), y.vec.norm());
    if (lx - ly).abs() > tol {
        lx.total_cmp(&ly)
    } else {
        y.coords.cmp(&x.coords)
    }
}

impl WignerSeitzCell {
    /// Builds the cell of the lattice spanned by `lat` (2 or 3 vectors).
    pub fn new(lat: &[Vector3<f64>]) -> Self {
        let dim = lat.len();
        let scale = length_scale(lat);
        let mut relevant = relevant_vectors(lat);

        // canonical representatives first, in translation order; the negatives follow in the
        // same order
        let mut canonical: Vec<RelevantVector> =
            relevant.iter().filter(|r| r.is_canonical()).cloned().collect();
        canonical.sort_by(|x, y| compare_translations(x, y, TOL * scale));
        let negatives = canonical.iter().map(|r| RelevantVector {
            coords: r.coords.iter().map(|n| -n).collect(),
            vec: -r.vec,
        });
        relevant = canonical.iter().cloned().chain(negatives).collect();
        let num_pairs = canonical.len();

        let vertices = match dim {
            2 => Self::polygon_vertices(&relevant, scale),
            _ => Self::polyhedron_vertices(&relevant, scale),
        };

        let facets: Vec<Facet> = relevant
            .iter()
            .enumerate()
            .map(|(i, r)| Facet {
                translation: r.vec,
                pair: i % num_pairs,
                vertices: Self::facet_vertices(&vertices, &r.vec, dim, scale),
            })
            .collect();

        let translations: Vec<Vector3<f64>> = canonical.iter().map(|r| r.vec).collect();
        let face_radii = translations
            .iter()
            .map(|t| Self::inscribed_radius(t, &relevant, scale))
            .collect();

        debug!(
            "Wigner-Seitz cell: {} facets, {} vertices",
            facets.len(),
            vertices.len()
        );

        Self {
            dim,
            relevant,
            vertices,
            facets,
            translations,
            face_radii,
        }
    }

    fn is_inside(pt: &Vector3<f64>, relevant: &[RelevantVector], scale: f64) -> bool {
        let tol = PLANE_TOL * scale * scale;
        relevant
            .iter()
            .all(|r| pt.dot(&r.vec) <= 0.5 * r.vec.norm_squared() + tol)
    }

    fn push_unique(pts: &mut Vec<Vector3<f64>>, pt: Vector3<f64>, scale: f64) {
        if !pts.iter().any(|q| (q - pt).norm() <= PLANE_TOL * scale) {
            pts.push(pt);
        }
    }

    /// Corners of a 2D cell: intersections of pairs of edge lines, sorted counterclockwise.
    fn polygon_vertices(relevant: &[RelevantVector], scale: f64) -> Vec<Vector3<f64>> {
        let mut pts = vec![];
        for (i, ri) in relevant.iter().enumerate() {
            for rj in &relevant[i + 1..] {
                let (ti, tj) = (ri.vec, rj.vec);
                let m = Matrix2::new(ti.x, ti.y, tj.x, tj.y);
                let rhs = Vector2::new(0.5 * ti.norm_squared(), 0.5 * tj.norm_squared());
                if let Some(x) = m.lu().solve(&rhs) {
                    let pt = Vector3::new(x.x, x.y, 0.0);
                    if Self::is_inside(&pt, relevant, scale) {
                        Self::push_unique(&mut pts, pt, scale);
                    }
                }
            }
        }
        pts.sort_by(|p, q| p.y.atan2(p.x).total_cmp(&q.y.atan2(q.x)));
        pts
    }

    /// Corners of a 3D cell: intersections of triples of facet planes.
    fn polyhedron_vertices(relevant: &[RelevantVector], scale: f64) -> Vec<Vector3<f64>> {
        let mut pts = vec![];
        for (i, ri) in relevant.iter().enumerate() {
            for (j, rj) in relevant.iter().enumerate().skip(i + 1) {
                for rk in &relevant[j + 1..] {
                    let m = Matrix3::from_rows(&[
                        ri.vec.transpose(),
                        rj.vec.transpose(),
                        rk.vec.transpose(),
                    ]);
                    if m.determinant().abs() <= PLANE_TOL * scale.powi(3) {
                        continue;
                    }
                    let rhs = Vector3::new(
                        0.5 * ri.vec.norm_squared(),
                        0.5 * rj.vec.norm_squared(),
                        0.5 * rk.vec.norm_squared(),
                    );
                    if let Some(pt) = m.lu().solve(&rhs) {
                        if Self::is_inside(&pt, relevant, scale) {
                            Self::push_unique(&mut pts, pt, scale);
                        }
                    }
                }
            }
        }
        pts
    }

    /// The vertices on the facet of `t`, ordered counterclockwise around `t`.
    fn facet_vertices(verts: &[Vector3<f64>], t: &Vector3<f64>, dim: usize, scale: f64) -> Vec<usize> {
        let tol = PLANE_TOL * scale * scale;
        let center = t.scale(0.5);
        let mut on: Vec<usize> = (0..verts.len())
            .filter(|&i| (verts[i].dot(t) - 0.5 * t.norm_squared()).abs() <= tol)
            .collect();
        if on.is_empty() {
            return on;
        }

        let normal = t.normalize();
        let (u, w) = if dim == 2 {
            // the in-plane direction obtained by turning the outward normal counterclockwise
            (Vector3::new(-normal.y, normal.x, 0.0), Vector3::zeros())
        } else {
            let u = (verts[on[0]] - center).normalize();
            (u, normal.cross(&u))
        };
        let angle = |i: usize| {
            let d = verts[i] - center;
            if dim == 2 {
                d.dot(&u)
            } else {
                d.dot(&w).atan2(d.dot(&u))
            }
        };
        on.sort_by(|&i, &j| angle(i).total_cmp(&angle(j)));
        on
    }

    /// Radius of the largest circle centered at `t/2` that fits in the facet of `t`: the
    /// in-plane distance to the nearest line where another bisector cuts the facet plane.
    fn inscribed_radius(t: &Vector3<f64>, relevant: &[RelevantVector], scale: f64) -> f64 {
        let normal = t.normalize();
        let center = t.scale(0.5);
        relevant
            .iter()
            .filter_map(|r| {
                let perp = r.vec - normal.scale(r.vec.dot(&normal));
                let perp_len = perp.norm();
                if perp_len <= PLANE_TOL * scale {
                    return None;
                }
                Some((0.5 * r.vec.norm_squared() - center.dot(&r.vec)) / perp_len)
            })
            .fold(f64::INFINITY, f64::min)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// All relevant vectors: the canonical ones in translation order, then their negatives.
    pub fn relevant(&self) -> &[RelevantVector] {
        &self.relevant
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// One translation vector per pair of opposite facets.
    pub fn translations(&self) -> &[Vector3<f64>] {
        &self.translations
    }

    /// Inscribed radius of the facets of each translation vector.
    pub fn face_radii(&self) -> &[f64] {
        &self.face_radii
    }

    /// Classifies the cell by its facets.
    pub fn shape(&self) -> WignerSeitzShape {
        match (self.dim, self.facets.len()) {
            (2, 4) => WignerSeitzShape::Parallelogram,
            (2, _) => WignerSeitzShape::Hexagon,
            (_, 6) => WignerSeitzShape::Parallelepiped,
            (_, 8) => WignerSeitzShape::HexagonalPrism,
            (_, 12) if self.facets.iter().all(|f| f.vertices.len() == 4) => {
                WignerSeitzShape::RhombicDodecahedron
            }
            (_, 12) => WignerSeitzShape::ElongatedDodecahedron,
            _ => WignerSeitzShape::TruncatedOctahedron,
        }
    }

    /// Whether the point lies in the closed cell, to tolerance.
    pub fn contains(&self, pt: &Vector3<f64>) -> bool {
        Self::is_inside(pt, &self.relevant, length_scale(&self.translations))
    }

    /// Maps a point into the cell by repeatedly translating it across any facet it lies beyond.
    /// Every step strictly shortens the point, so this terminates.
    pub fn reduce(&self, pt: &Vector3<f64>) -> Vector3<f64> {
        let scale = length_scale(&self.translations);
        let tol = TOL * scale * scale;
        let mut q = *pt;
        loop {
            let mut moved = false;
            for r in &self.relevant {
                let t = &r.vec;
                let proj = q.dot(t);
                let half = 0.5 * t.norm_squared();
                if proj > half + tol {
                    let k = (proj / t.norm_squared()).round().max(1.0);
                    q -= t.scale(k);
                    moved = true;
                }
            }
            if !moved {
                return q;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geometry::cell_volume;

    fn cubic(a: f64) -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(a, 0.0, 0.0),
            Vector3::new(0.0, a, 0.0),
            Vector3::new(0.0, 0.0, a),
        ]
    }

    fn fcc(a: f64) -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(0.0, 0.5 * a, 0.5 * a),
            Vector3::new(0.5 * a, 0.0, 0.5 * a),
            Vector3::new(0.5 * a, 0.5 * a, 0.0),
        ]
    }

    fn bcc(a: f64) -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(-0.5 * a, 0.5 * a, 0.5 * a),
            Vector3::new(0.5 * a, -0.5 * a, 0.5 * a),
            Vector3::new(0.5 * a, 0.5 * a, -0.5 * a),
        ]
    }

    #[test]
    fn test_cube() {
        let cell = WignerSeitzCell::new(&cubic(2.0));
        assert_eq!(cell.shape(), WignerSeitzShape::Parallelepiped);
        assert_eq!(cell.vertices().len(), 8);
        assert_eq!(
            cell.translations().to_vec(),
            cubic(2.0),
            "translations should come out as the basis"
        );
        for r in cell.face_radii() {
            assert_relative_eq!(*r, 1.0, epsilon = 1e-12);
        }
        for f in cell.facets() {
            assert_eq!(f.vertices.len(), 4);
        }
    }

    #[test]
    fn test_fcc_rhombic_dodecahedron() {
        let cell = WignerSeitzCell::new(&fcc(1.0));
        assert_eq!(cell.shape(), WignerSeitzShape::RhombicDodecahedron);
        assert_eq!(cell.vertices().len(), 14);
        assert_eq!(cell.translations().len(), 6);
    }

    #[test]
    fn test_bcc_truncated_octahedron() {
        let cell = WignerSeitzCell::new(&bcc(1.0));
        assert_eq!(cell.shape(), WignerSeitzShape::TruncatedOctahedron);
        assert_eq!(cell.vertices().len(), 24);
        assert_eq!(cell.translations().len(), 7);
        let squares = cell.facets().iter().filter(|f| f.vertices.len() == 4).count();
        let hexagons = cell.facets().iter().filter(|f| f.vertices.len() == 6).count();
        assert_eq!((squares, hexagons), (6, 8));
    }

    #[test]
    fn test_hexagon_2d() {
        let s3 = 3f64.sqrt();
        let lat = vec![
            Vector3::new(0.5, -0.5 * s3, 0.0),
            Vector3::new(0.5, 0.5 * s3, 0.0),
        ];
        let cell = WignerSeitzCell::new(&lat);
        assert_eq!(cell.shape(), WignerSeitzShape::Hexagon);
        assert_eq!(cell.vertices().len(), 6);
        for r in cell.face_radii() {
            // half the edge of a regular hexagon with inradius 1/2
            assert_relative_eq!(*r, 0.5 / s3, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_skewed_basis() {
        // a2 is nearly 5 a1, so the short vectors are far from the basis
        let gamma = 0.05 * PI;
        let lat = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(5.0 * gamma.cos(), 5.0 * gamma.sin(), 0.0),
        ];
        let cell = WignerSeitzCell::new(&lat);
        assert_eq!(cell.shape(), WignerSeitzShape::Hexagon);
        assert_eq!(cell.vertices().len(), 6);
        for f in cell.facets() {
            assert_eq!(f.vertices.len(), 2);
        }
        for r in cell.relevant() {
            assert_relative_eq!(lattice_point(&r.coords, &lat), r.vec, epsilon = 1e-9);
        }
        let v = cell.vertices();
        let area: f64 = (0..v.len())
            .map(|i| {
                let (p, q) = (v[i], v[(i + 1) % v.len()]);
                0.5 * (p.x * q.y - p.y * q.x)
            })
            .sum();
        assert_relative_eq!(area, cell_volume(&lat), max_relative = 1e-9);
    }

    #[test]
    fn test_skewed_prism() {
        let alpha = 0.1 * PI;
        let lat = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 5.0 * alpha.cos(), 5.0 * alpha.sin()),
        ];
        let cell = WignerSeitzCell::new(&lat);
        assert_eq!(cell.shape(), WignerSeitzShape::HexagonalPrism);
        assert_eq!(cell.vertices().len(), 12);
        // a1 and a2 stay, the other two come from the reduced b-c plane
        assert_relative_eq!(cell.translations()[0], lat[0]);
        assert_relative_eq!(cell.translations()[1], lat[1]);
        for t in cell.translations() {
            assert!(t.norm() < 1.8, "spurious translation {}", t);
        }
    }

    #[test]
    fn test_reduce() {
        let cell = WignerSeitzCell::new(&bcc(1.0));
        let p = Vector3::new(3.3, -2.1, 0.7);
        let q = cell.reduce(&p);
        assert!(cell.contains(&q));
        assert!(q.norm() <= p.norm());
        assert_relative_eq!(cell.reduce(&q), q);
    }
}

//! Coarse meshes of the Wigner-Seitz cell.
//!
//! The mesh is only a topological seed for a refining mesh layer: a handful of elements whose
//! union is the cell. Cells that are prisms (parallelograms, hexagons and their extrusions) are
//! split into quadrilaterals or hexahedra around the cell axis. Every other cell is split into a
//! fan of tetrahedra running from the cell center through the center of each face.
//!
//! Boundary elements carry the index of their face pair plus one, so opposite faces share an
//! attribute and can be identified periodically.

use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{length_scale, project},
    lattice::LatticeError,
    voronoi::{Facet, WignerSeitzCell, WignerSeitzShape},
};

/// Attribute of every volume element.
pub const ELEMENT_ATTRIBUTE: i32 = 1;

/// The vertex indices of an element, by element kind. Volume elements are positively oriented;
/// boundary elements wind counterclockwise around the outward normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    Segment([usize; 2]),
    Triangle([usize; 3]),
    Quadrilateral([usize; 4]),
    Tetrahedron([usize; 4]),
    Hexahedron([usize; 8]),
}

impl Topology {
    pub fn vertices(&self) -> &[usize] {
        match self {
            Topology::Segment(v) => v.as_slice(),
            Topology::Triangle(v) => v.as_slice(),
            Topology::Quadrilateral(v) => v.as_slice(),
            Topology::Tetrahedron(v) => v.as_slice(),
            Topology::Hexahedron(v) => v.as_slice(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshElement {
    pub topology: Topology,
    pub attribute: i32,
}

/// A coarse mesh of a Wigner-Seitz cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseMesh {
    pub dim: usize,
    pub shape: WignerSeitzShape,
    pub vertices: Vec<DVector<f64>>,
    pub elements: Vec<MeshElement>,
    pub boundary: Vec<MeshElement>,
}

fn signed_tet_volume(p: [Vector3<f64>; 4]) -> f64 {
    (p[1] - p[0]).dot(&(p[2] - p[0]).cross(&(p[3] - p[0]))) / 6.0
}

fn signed_tri_area(p: [Vector3<f64>; 3]) -> f64 {
    0.5 * (p[1] - p[0]).cross(&(p[2] - p[0])).z
}

/// Accumulates vertices and elements, working in 3D coordinates throughout.
struct Builder {
    dim: usize,
    scale: f64,
    vertices: Vec<Vector3<f64>>,
    elements: Vec<MeshElement>,
    boundary: Vec<MeshElement>,
}

impl Builder {
    fn new(cell: &WignerSeitzCell) -> Self {
        Self {
            dim: cell.dim(),
            scale: length_scale(cell.translations()),
            vertices: vec![],
            elements: vec![],
            boundary: vec![],
        }
    }

    /// Index of the vertex at `pt`, adding it if needed.
    fn vertex(&mut self, pt: Vector3<f64>) -> usize {
        let tol = 1e-8 * self.scale;
        match self.vertices.iter().position(|v| (v - pt).norm() <= tol) {
            Some(i) => i,
            None => {
                self.vertices.push(pt);
                self.vertices.len() - 1
            }
        }
    }

    fn element(&mut self, topology: Topology) {
        self.elements.push(MeshElement {
            topology,
            attribute: ELEMENT_ATTRIBUTE,
        });
    }

    fn boundary(&mut self, topology: Topology, facet: &Facet) {
        self.boundary.push(MeshElement {
            topology,
            attribute: facet.pair as i32 + 1,
        });
    }

    fn finish(self, shape: WignerSeitzShape) -> CoarseMesh {
        CoarseMesh {
            dim: self.dim,
            shape,
            vertices: self.vertices.iter().map(|v| project(v, self.dim)).collect(),
            elements: self.elements,
            boundary: self.boundary,
        }
    }
}

/// The facet of the cell whose plane contains every point given.
fn facet_through<'a>(cell: &'a WignerSeitzCell, pts: &[Vector3<f64>]) -> Option<&'a Facet> {
    let scale = length_scale(cell.translations());
    let tol = 1e-8 * scale * scale;
    cell.facets().iter().find(|f| {
        let t = &f.translation;
        pts.iter()
            .all(|p| (p.dot(t) - 0.5 * t.norm_squared()).abs() <= tol)
    })
}

/// Splits a convex polygon, given counterclockwise, into quadrilaterals: a parallelogram is kept
/// whole, a hexagon becomes three quadrilaterals around its center.
fn polygon_quads(polygon: &[usize], center: usize) -> Result<Vec<[usize; 4]>, LatticeError> {
    match polygon {
        [a, b, c, d] => Ok(vec![[*a, *b, *c, *d]]),
        [h0, h1, h2, h3, h4, h5] => Ok(vec![
            [center, *h0, *h1, *h2],
            [center, *h2, *h3, *h4],
            [center, *h4, *h5, *h0],
        ]),
        _ => Err(LatticeError::UnmeshableCell(polygon.len())),
    }
}

impl CoarseMesh {
    /// Meshes the cell. Fails if a face the construction splits into quadrilaterals is neither a
    /// parallelogram nor a hexagon.
    pub fn new(cell: &WignerSeitzCell) -> Result<Self, LatticeError> {
        let shape = cell.shape();
        match (cell.dim(), shape.is_prism()) {
            (2, _) => Self::planar(cell, shape),
            (_, true) => Self::extruded(cell, shape),
            _ => Ok(Self::fan(cell, shape)),
        }
    }

    fn planar(cell: &WignerSeitzCell, shape: WignerSeitzShape) -> Result<Self, LatticeError> {
        let mut b = Builder::new(cell);
        // cell corners are already counterclockwise
        let polygon: Vec<usize> = cell.vertices().iter().map(|v| b.vertex(*v)).collect();
        let center = if polygon.len() == 6 {
            b.vertex(Vector3::zeros())
        } else {
            usize::MAX
        };
        for q in polygon_quads(&polygon, center)? {
            b.element(Topology::Quadrilateral(q));
        }
        for f in cell.facets() {
            let &[start, end] = f.vertices.as_slice() else {
                return Err(LatticeError::UnmeshableCell(f.vertices.len()));
            };
            let start = b.vertex(cell.vertices()[start]);
            let end = b.vertex(cell.vertices()[end]);
            b.boundary(Topology::Segment([start, end]), f);
        }
        Ok(b.finish(shape))
    }

    /// Extrudes the cross-section along the translation orthogonal to all the others: the box
    /// and the hexagonal prism are both prisms over the facet of that translation.
    fn extruded(cell: &WignerSeitzCell, shape: WignerSeitzShape) -> Result<Self, LatticeError> {
        let scale = length_scale(cell.translations());
        let axis_pair = cell
            .translations()
            .iter()
            .enumerate()
            .rev()
            .find(|(i, t)| {
                cell.translations()
                    .iter()
                    .enumerate()
                    .all(|(j, u)| j == *i || t.dot(u).abs() <= 1e-8 * scale * scale)
                    && (shape != WignerSeitzShape::HexagonalPrism
                        || cell
                            .facets()
                            .iter()
                            .any(|f| f.pair == *i && f.vertices.len() == 6))
            })
            .map(|(i, _)| i);
        let Some(axis_pair) = axis_pair else {
            // no facet to extrude: fall back to the general construction
            return Ok(Self::fan(cell, shape));
        };
        let t = cell.translations()[axis_pair];

        // the facet of -t, reversed so it winds counterclockwise around +t
        let Some(bottom_facet) = cell
            .facets()
            .iter()
            .find(|f| f.pair == axis_pair && f.translation.dot(&t) < 0.0)
        else {
            return Ok(Self::fan(cell, shape));
        };
        let bottom_pts: Vec<Vector3<f64>> = bottom_facet
            .vertices
            .iter()
            .rev()
            .map(|&i| cell.vertices()[i])
            .collect();

        let mut b = Builder::new(cell);
        let bottom: Vec<usize> = bottom_pts.iter().map(|p| b.vertex(*p)).collect();
        let top: Vec<usize> = bottom_pts.iter().map(|p| b.vertex(p + t)).collect();
        let lift = |i: usize| top[bottom.iter().position(|&j| j == i).unwrap_or(0)];
        let (c_bottom, c_top) = if bottom.len() == 6 {
            (b.vertex(-t.scale(0.5)), b.vertex(t.scale(0.5)))
        } else {
            (usize::MAX, usize::MAX)
        };
        let lift_center = |i: usize| if i == c_bottom { c_top } else { lift(i) };

        for q in polygon_quads(&bottom, c_bottom)? {
            let hex = [
                q[0],
                q[1],
                q[2],
                q[3],
                lift_center(q[0]),
                lift_center(q[1]),
                lift_center(q[2]),
                lift_center(q[3]),
            ];
            b.element(Topology::Hexahedron(hex));
        }

        // caps: the bottom winds around +t, so it is reversed to face outward
        let bottom_cap: Vec<usize> = bottom.iter().rev().copied().collect();
        let top_facet = cell
            .facets()
            .iter()
            .find(|f| f.pair == axis_pair && f.translation.dot(&t) > 0.0);
        for (cap, facet) in [(bottom_cap, Some(bottom_facet)), (top.clone(), top_facet)] {
            let Some(facet) = facet else { continue };
            let center = if cap.len() == 6 {
                b.vertex(facet.center())
            } else {
                usize::MAX
            };
            for q in polygon_quads(&cap, center)? {
                b.boundary(Topology::Quadrilateral(q), facet);
            }
        }

        // sides: (q_i, q_i+1, q'_i+1, q'_i) has normal (q_i+1 - q_i) x t, which points out
        let n = bottom.len();
        for i in 0..n {
            let quad = [bottom[i], bottom[(i + 1) % n], top[(i + 1) % n], top[i]];
            let pts: Vec<Vector3<f64>> = quad.iter().map(|&k| b.vertices[k]).collect();
            if let Some(facet) = facet_through(cell, &pts) {
                b.boundary(Topology::Quadrilateral(quad), facet);
            }
        }
        Ok(b.finish(shape))
    }

    /// Tetrahedra from the cell center through each face center and each face edge.
    fn fan(cell: &WignerSeitzCell, shape: WignerSeitzShape) -> Self {
        let mut b = Builder::new(cell);
        for v in cell.vertices() {
            b.vertex(*v);
        }
        let centers: Vec<usize> = cell.facets().iter().map(|f| b.vertex(f.center())).collect();
        let origin = b.vertex(Vector3::zeros());

        for (f, &fc) in cell.facets().iter().zip(&centers) {
            let k = f.vertices.len();
            for i in 0..k {
                let (v0, v1) = (f.vertices[i], f.vertices[(i + 1) % k]);
                b.boundary(Topology::Triangle([fc, v0, v1]), f);

                let mut tet = [origin, fc, v0, v1];
                let pts = tet.map(|j| b.vertices[j]);
                if signed_tet_volume(pts) < 0.0 {
                    tet.swap(2, 3);
                }
                b.element(Topology::Tetrahedron(tet));
            }
        }
        b.finish(shape)
    }

    fn point(&self, i: usize) -> Vector3<f64> {
        let mut out = Vector3::zeros();
        for (k, x) in self.vertices[i].iter().enumerate() {
            out[k] = *x;
        }
        out
    }

    /// Signed measure of an element: area in 2D, volume in 3D. Hexahedra are split into six
    /// tetrahedra around their main diagonal, which is exact for planar faces.
    pub fn element_measure(&self, e: &MeshElement) -> f64 {
        let p = |i: usize| self.point(i);
        match e.topology {
            Topology::Segment([a, b]) => (p(b) - p(a)).norm(),
            Topology::Triangle([a, b, c]) => signed_tri_area([p(a), p(b), p(c)]),
            Topology::Quadrilateral([a, b, c, d]) => {
                signed_tri_area([p(a), p(b), p(c)]) + signed_tri_area([p(a), p(c), p(d)])
            }
            Topology::Tetrahedron([a, b, c, d]) => signed_tet_volume([p(a), p(b), p(c), p(d)]),
            Topology::Hexahedron(h) => [
                [0, 1, 2, 6],
                [0, 2, 3, 6],
                [0, 3, 7, 6],
                [0, 7, 4, 6],
                [0, 4, 5, 6],
                [0, 5, 1, 6],
            ]
            .iter()
            .map(|t| signed_tet_volume(t.map(|k| p(h[k]))))
            .sum(),
        }
    }

    /// Total measure of the volume elements, which equals the unit cell volume.
    pub fn measure(&self) -> f64 {
        self.elements.iter().map(|e| self.element_measure(e)).sum()
    }

    /// The distinct boundary attributes, in increasing order.
    pub fn boundary_attributes(&self) -> Vec<i32> {
        let mut attrs: Vec<i32> = self.boundary.iter().map(|e| e.attribute).collect();
        attrs.sort_unstable();
        attrs.dedup();
        attrs
    }
}

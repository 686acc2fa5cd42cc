//! High-symmetry points of the Brillouin zone and the paths through them.
//!
//! Points are tabulated in fractional coordinates of the reciprocal basis, following Setyawan and
//! Curtarolo, *High-throughput electronic band structure calculations: challenges and tools*
//! (2010), which uses the same primitive vectors as this crate. Where the table depends on the
//! parameters the applicable variant (the *regime*) is picked once, when the catalog is built.

use std::{cmp::Ordering, f64::consts::PI};

use nalgebra::{DVector, Vector3};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{combine, integer_box, length_scale, project, reduce_basis, TOL},
    lattice_type::LatticeType,
    params::LatticeParams,
    symbols::{ascii_label, unicode_label},
};

/// Tolerance on angles and on dimensionless ratios when choosing a regime.
const REGIME_TOL: f64 = 1e-9;

/// A labelled point in reciprocal space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymmetryPoint {
    /// ASCII label, e.g. `Gamma`, `X1` or, for intermediate points, `Gamma-X`.
    pub label: String,
    /// Coordinates with respect to the reciprocal basis.
    pub fractional: Vec<f64>,
    /// Cartesian coordinates.
    pub coords: DVector<f64>,
}

impl SymmetryPoint {
    /// The label rendered with Greek letters and subscripts.
    pub fn display_label(&self) -> String {
        unicode_label(&self.label)
    }
}

/// The literature table for one regime, before it is placed in a concrete reciprocal basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub regime: &'static str,
    pub points: Vec<(&'static str, Vec<f64>)>,
    pub paths: Vec<Vec<&'static str>>,
}

/// The symmetry points, paths and path midpoints of one lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    regime: String,
    points: Vec<SymmetryPoint>,
    paths: Vec<Vec<usize>>,
    intermediate: Vec<Vec<SymmetryPoint>>,
}

fn point(label: &str, fractional: Vec<f64>, rec: &[Vector3<f64>]) -> SymmetryPoint {
    let coords = project(&combine(&fractional, rec), rec.len());
    SymmetryPoint {
        label: label.to_string(),
        fractional,
        coords,
    }
}

impl Catalog {
    /// Places a table in the reciprocal basis `rec`.
    ///
    /// # Panics
    /// If a path names a label the table does not define. The tables are static, so this is a
    /// bug, not an input error.
    pub fn from_table(table: Table, rec: &[Vector3<f64>]) -> Self {
        let points: Vec<SymmetryPoint> = table
            .points
            .into_iter()
            .map(|(label, f)| point(label, f, rec))
            .collect();

        let index_of = |label: &str| {
            points
                .iter()
                .position(|p| p.label == label)
                .unwrap_or_else(|| panic!("{} table has no point {}", table.regime, label))
        };
        let paths: Vec<Vec<usize>> = table
            .paths
            .iter()
            .map(|path| path.iter().map(|l| index_of(*l)).collect())
            .collect();

        let intermediate = paths
            .iter()
            .map(|path| {
                path.windows(2)
                    .map(|w| {
                        let (p, q) = (&points[w[0]], &points[w[1]]);
                        let mid = p
                            .fractional
                            .iter()
                            .zip(&q.fractional)
                            .map(|(x, y)| 0.5 * (x + y))
                            .collect();
                        point(&format!("{}-{}", p.label, q.label), mid, rec)
                    })
                    .collect()
            })
            .collect();

        Self {
            regime: table.regime.to_string(),
            points,
            paths,
            intermediate,
        }
    }

    /// The name of the table variant in use, e.g. `BCT1` or `MCLC3`.
    pub fn regime(&self) -> &str {
        &self.regime
    }

    pub fn points(&self) -> &[SymmetryPoint] {
        &self.points
    }

    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }

    pub fn num_symmetry_points(&self) -> usize {
        self.points.len()
    }

    fn checked_point(&self, i: usize) -> &SymmetryPoint {
        assert!(
            i < self.points.len(),
            "symmetry point index {} out of range, the {} table has {} points",
            i,
            self.regime,
            self.points.len()
        );
        &self.points[i]
    }

    pub fn symmetry_point(&self, i: usize) -> DVector<f64> {
        self.checked_point(i).coords.clone()
    }

    pub fn symmetry_point_label(&self, i: usize) -> &str {
        &self.checked_point(i).label
    }

    /// Finds a point by label, given either in ASCII (`Sigma1`) or with Unicode glyphs (`Σ₁`).
    pub fn symmetry_point_index(&self, label: &str) -> Option<usize> {
        let label = ascii_label(label);
        self.points.iter().position(|p| p.label == label)
    }

    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    fn checked_path(&self, path: usize) -> &[usize] {
        assert!(
            path < self.paths.len(),
            "path index {} out of range, the {} table has {} paths",
            path,
            self.regime,
            self.paths.len()
        );
        &self.paths[path]
    }

    pub fn num_path_segments(&self, path: usize) -> usize {
        self.checked_path(path).len() - 1
    }

    /// The symmetry-point indices joined by a segment of a path.
    pub fn path_segment_end_point_indices(&self, path: usize, segment: usize) -> (usize, usize) {
        let p = self.checked_path(path);
        assert!(
            segment + 1 < p.len(),
            "segment index {} out of range, path {} has {} segments",
            segment,
            path,
            p.len() - 1
        );
        (p[segment], p[segment + 1])
    }

    /// The number of intermediate points on a path, one per segment.
    pub fn num_intermediate_points(&self, path: usize) -> usize {
        self.num_path_segments(path)
    }

    fn checked_intermediate(&self, path: usize, segment: usize) -> &SymmetryPoint {
        let _ = self.path_segment_end_point_indices(path, segment);
        &self.intermediate[path][segment]
    }

    /// The midpoint of a path segment.
    pub fn intermediate_point(&self, path: usize, segment: usize) -> DVector<f64> {
        self.checked_intermediate(path, segment).coords.clone()
    }

    pub fn intermediate_point_label(&self, path: usize, segment: usize) -> &str {
        &self.checked_intermediate(path, segment).label
    }
}

/// Builds a [`Table`] from `(label, coords)` pairs and label paths.
macro_rules! table {
    ($regime:expr; [$(($l:expr, [$($x:expr),+ $(,)?])),+ $(,)?]; [$([$($p:expr),+]),+ $(,)?]) => {
        Table {
            regime: $regime,
            points: vec![$(($l, vec![$($x as f64),+])),+],
            paths: vec![$(vec![$($p),+]),+],
        }
    };
}

fn angle(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    (u.dot(v) / (u.norm() * v.norm())).clamp(-1.0, 1.0).acos()
}

/// The shortest member of the coset `h/2 + L*`, in fractional coordinates. Ties go to the
/// candidate with the largest coordinates. The search runs over a reduced basis, where the
/// shortest member of every coset has small coefficients.
fn shortest_half_vector(h: &[i32], rec: &[Vector3<f64>]) -> Vec<f64> {
    let dim = h.len();
    let scale = length_scale(rec);
    let reduced = reduce_basis(rec);
    let mut best: Option<(f64, Vec<f64>)> = None;
    for m in integer_box(dim, 3) {
        let n = reduced.to_original(&m);
        if n.iter().zip(h).any(|(ni, hi)| (ni - hi) % 2 != 0) {
            continue;
        }
        let f: Vec<f64> = n.iter().map(|&k| 0.5 * k as f64).collect();
        let len = combine(&f, rec).norm();
        let better = match &best {
            None => true,
            Some((b, bf)) => {
                len < b - TOL * scale
                    || (len <= b + TOL * scale && f.partial_cmp(bf) == Some(Ordering::Greater))
            }
        };
        if better {
            best = Some((len, f));
        }
    }
    best.map(|(_, f)| f).unwrap_or_default()
}

/// The table for a lattice with normalized parameters `p` and reciprocal basis `rec`.
pub fn table(kind: LatticeType, p: &LatticeParams, rec: &[Vector3<f64>]) -> Table {
    use LatticeType::*;
    let h = 0.5;
    let (a, b, c, alpha) = (p.a, p.b, p.c, p.alpha);
    let g = "Gamma";
    match kind {
        PrimitiveSquare => table!("SQR";
            [(g, [0, 0]), ("X", [h, 0]), ("M", [h, h])];
            [[g, "X", "M", g]]),
        PrimitiveHexagonal => table!("HEX2D";
            [(g, [0, 0]), ("M", [h, 0]), ("K", [1. / 3., 1. / 3.])];
            [[g, "M", "K", g]]),
        PrimitiveRectangular => table!("RECT";
            [(g, [0, 0]), ("X", [h, 0]), ("Y", [0, h]), ("S", [h, h])];
            [[g, "X", "S", "Y", g]]),
        CenteredRectangular => {
            let z = (1.0 + a * a / (b * b)) / 4.0;
            table!("CRECT";
                [(g, [0, 0]), ("X", [z, z]), ("S", [0, h]), ("X1", [-z, 1.0 - z]), ("Y", [-h, h])];
                [[g, "X", "S", "X1", "Y", g]])
        }
        PrimitiveOblique => Table {
            regime: "OBL",
            points: vec![
                (g, vec![0.0, 0.0]),
                ("X", shortest_half_vector(&[1, 0], rec)),
                ("Y", shortest_half_vector(&[0, 1], rec)),
                ("S", shortest_half_vector(&[1, 1], rec)),
            ],
            paths: vec![vec!["X", g, "Y"], vec!["S", g]],
        },
        PrimitiveCubic => table!("CUB";
            [(g, [0, 0, 0]), ("M", [h, h, 0]), ("R", [h, h, h]), ("X", [0, h, 0])];
            [[g, "X", "M", g, "R", "X"], ["M", "R"]]),
        FaceCenteredCubic => table!("FCC";
            [
                (g, [0, 0, 0]),
                ("K", [3. / 8., 3. / 8., 3. / 4.]),
                ("L", [h, h, h]),
                ("U", [5. / 8., 1. / 4., 5. / 8.]),
                ("W", [h, 1. / 4., 3. / 4.]),
                ("X", [h, 0, h]),
            ];
            [[g, "X", "W", "K", g, "L", "U", "W", "L", "K"], ["U", "X"]]),
        BodyCenteredCubic => table!("BCC";
            [(g, [0, 0, 0]), ("H", [h, -h, h]), ("P", [0.25, 0.25, 0.25]), ("N", [0, 0, h])];
            [[g, "H", "N", g, "P", "H"], ["P", "N"]]),
        PrimitiveTetragonal => table!("TET";
            [
                (g, [0, 0, 0]),
                ("A", [h, h, h]),
                ("M", [h, h, 0]),
                ("R", [0, h, h]),
                ("X", [0, h, 0]),
                ("Z", [0, 0, h]),
            ];
            [[g, "X", "M", g, "Z", "R", "A", "Z"], ["X", "R"], ["M", "A"]]),
        BodyCenteredTetragonal => bct_table(a, c),
        PrimitiveOrthorhombic => table!("ORC";
            [
                (g, [0, 0, 0]),
                ("R", [h, h, h]),
                ("S", [h, h, 0]),
                ("T", [0, h, h]),
                ("U", [h, 0, h]),
                ("X", [h, 0, 0]),
                ("Y", [0, h, 0]),
                ("Z", [0, 0, h]),
            ];
            [[g, "X", "S", "Y", g, "Z", "U", "R", "T", "Z"], ["Y", "T"], ["U", "X"], ["S", "R"]]),
        FaceCenteredOrthorhombic => orcf_table(a, b, c),
        BodyCenteredOrthorhombic => {
            let z = (1.0 + a * a / (c * c)) / 4.0;
            let e = (1.0 + b * b / (c * c)) / 4.0;
            let d = (b * b - a * a) / (4.0 * c * c);
            let m = (a * a + b * b) / (4.0 * c * c);
            table!("ORCI";
                [
                    (g, [0, 0, 0]),
                    ("L", [-m, m, h - d]),
                    ("L1", [m, -m, h + d]),
                    ("L2", [h - d, h + d, -m]),
                    ("R", [0, h, 0]),
                    ("S", [h, 0, 0]),
                    ("T", [0, 0, h]),
                    ("W", [0.25, 0.25, 0.25]),
                    ("X", [-z, z, z]),
                    ("X1", [z, 1.0 - z, -z]),
                    ("Y", [e, -e, e]),
                    ("Y1", [1.0 - e, e, -e]),
                    ("Z", [h, h, -h]),
                ];
                [[g, "X", "L", "T", "W", "R", "X1", "Z", g, "Y", "S", "W"], ["L1", "Y"], ["Y1", "Z"]])
        }
        BaseCenteredOrthorhombic => {
            let z = (1.0 + a * a / (b * b)) / 4.0;
            table!("ORCC";
                [
                    (g, [0, 0, 0]),
                    ("A", [z, z, h]),
                    ("A1", [-z, 1.0 - z, h]),
                    ("R", [0, h, h]),
                    ("S", [0, h, 0]),
                    ("T", [-h, h, h]),
                    ("X", [z, z, 0]),
                    ("X1", [-z, 1.0 - z, 0]),
                    ("Y", [-h, h, 0]),
                    ("Z", [0, 0, h]),
                ];
                [[g, "X", "S", "R", "A", "Z", g, "Y", "X1", "A1", "T", "Y"], ["Z", "T"]])
        }
        PrimitiveHexagonalPrism => table!("HEX";
            [
                (g, [0, 0, 0]),
                ("A", [0, 0, h]),
                ("H", [1. / 3., 1. / 3., h]),
                ("K", [1. / 3., 1. / 3., 0]),
                ("L", [h, 0, h]),
                ("M", [h, 0, 0]),
            ];
            [[g, "M", "K", g, "A", "L", "H", "A"], ["L", "M"], ["K", "H"]]),
        PrimitiveRhombohedral => rhl_table(alpha),
        PrimitiveMonoclinic => {
            let e = (1.0 - b * alpha.cos() / c) / (2.0 * alpha.sin().powi(2));
            let n = h - e * c * alpha.cos() / b;
            table!("MCL";
                [
                    (g, [0, 0, 0]),
                    ("A", [h, h, 0]),
                    ("C", [0, h, h]),
                    ("D", [h, 0, h]),
                    ("D1", [h, 0, -h]),
                    ("E", [h, h, h]),
                    ("H", [0, e, 1.0 - n]),
                    ("H1", [0, 1.0 - e, n]),
                    ("H2", [0, e, -n]),
                    ("M", [h, e, 1.0 - n]),
                    ("M1", [h, 1.0 - e, n]),
                    ("M2", [h, e, -n]),
                    ("X", [0, h, 0]),
                    ("Y", [0, 0, h]),
                    ("Y1", [0, 0, -h]),
                    ("Z", [h, 0, 0]),
                ];
                [[g, "Y", "H", "C", "E", "M1", "A", "X", "H1"], ["M", "D", "Z"], ["Y", "D"]])
        }
        BaseCenteredMonoclinic => mclc_table(a, b, c, alpha, rec),
        PrimitiveTriclinic => {
            let classes: [(&'static str, [i32; 3]); 7] = [
                ("X", [1, 0, 0]),
                ("Y", [0, 1, 0]),
                ("Z", [0, 0, 1]),
                ("L", [1, 1, 0]),
                ("M", [0, 1, 1]),
                ("N", [1, 0, 1]),
                ("R", [1, 1, 1]),
            ];
            let mut points = vec![(g, vec![0.0; 3])];
            points.extend(
                classes
                    .iter()
                    .map(|(l, hv)| (*l, shortest_half_vector(hv, rec))),
            );
            Table {
                regime: "TRI",
                points,
                paths: vec![
                    vec!["X", g, "Y"],
                    vec!["L", g, "Z"],
                    vec!["N", g, "M"],
                    vec!["R", g],
                ],
            }
        }
    }
}

/// BCT1 for `c < a`, BCT2 otherwise. At `c == a` the lattice is body-centered cubic and the BCT2
/// points are still inside the zone.
fn bct_table(a: f64, c: f64) -> Table {
    let h = 0.5;
    let g = "Gamma";
    if c < a {
        let e = (1.0 + c * c / (a * a)) / 4.0;
        table!("BCT1";
            [
                (g, [0, 0, 0]),
                ("M", [-h, h, h]),
                ("N", [0, h, 0]),
                ("P", [0.25, 0.25, 0.25]),
                ("X", [0, 0, h]),
                ("Z", [e, e, -e]),
                ("Z1", [-e, 1.0 - e, e]),
            ];
            [[g, "X", "M", g, "Z", "P", "N", "Z1", "M"], ["X", "P"]])
    } else {
        let e = (1.0 + a * a / (c * c)) / 4.0;
        let z = a * a / (2.0 * c * c);
        table!("BCT2";
            [
                (g, [0, 0, 0]),
                ("N", [0, h, 0]),
                ("P", [0.25, 0.25, 0.25]),
                ("Sigma", [-e, e, e]),
                ("Sigma1", [e, 1.0 - e, -e]),
                ("X", [0, 0, h]),
                ("Y", [-z, z, h]),
                ("Y1", [h, h, -z]),
                ("Z", [h, h, -h]),
            ];
            [[g, "X", "Y", "Sigma", g, "Z", "Sigma1", "N", "P", "Y1", "Z"], ["X", "P"]])
    }
}

/// ORCF1, ORCF2 or ORCF3 by the sign of `1/a² - 1/b² - 1/c²`.
fn orcf_table(a: f64, b: f64, c: f64) -> Table {
    let h = 0.5;
    let g = "Gamma";
    let k = 1.0 / (a * a) - 1.0 / (b * b) - 1.0 / (c * c);
    if k.abs() * a * a <= REGIME_TOL {
        let z = (1.0 + a * a / (b * b) - a * a / (c * c)) / 4.0;
        let e = (1.0 + a * a / (b * b) + a * a / (c * c)) / 4.0;
        table!("ORCF3";
            [
                (g, [0, 0, 0]),
                ("A", [h, h + z, z]),
                ("A1", [h, h - z, 1.0 - z]),
                ("L", [h, h, h]),
                ("T", [1, h, h]),
                ("X", [0, e, e]),
                ("Y", [h, 0, h]),
                ("Z", [h, h, 0]),
            ];
            [[g, "Y", "T", "Z", g, "X", "A1", "Y"], ["X", "A", "Z"], ["L", g]])
    } else if k > 0.0 {
        let z = (1.0 + a * a / (b * b) - a * a / (c * c)) / 4.0;
        let e = (1.0 + a * a / (b * b) + a * a / (c * c)) / 4.0;
        table!("ORCF1";
            [
                (g, [0, 0, 0]),
                ("A", [h, h + z, z]),
                ("A1", [h, h - z, 1.0 - z]),
                ("L", [h, h, h]),
                ("T", [1, h, h]),
                ("X", [0, e, e]),
                ("X1", [1.0, 1.0 - e, 1.0 - e]),
                ("Y", [h, 0, h]),
                ("Z", [h, h, 0]),
            ];
            [[g, "Y", "T", "Z", g, "X", "A1", "Y"], ["T", "X1"], ["X", "A", "Z"], ["L", g]])
    } else {
        let e = (1.0 + a * a / (b * b) - a * a / (c * c)) / 4.0;
        let f = (1.0 + c * c / (b * b) - c * c / (a * a)) / 4.0;
        let d = (1.0 + b * b / (a * a) - b * b / (c * c)) / 4.0;
        table!("ORCF2";
            [
                (g, [0, 0, 0]),
                ("C", [h, h - e, 1.0 - e]),
                ("C1", [h, h + e, e]),
                ("D", [h - d, h, 1.0 - d]),
                ("D1", [h + d, h, d]),
                ("L", [h, h, h]),
                ("H", [1.0 - f, h - f, h]),
                ("H1", [f, h + f, h]),
                ("X", [0, h, h]),
                ("Y", [h, 0, h]),
                ("Z", [h, h, 0]),
            ];
            [
                [g, "Y", "C", "D", "X", g, "Z", "D1", "H", "C"],
                ["C1", "Z"],
                ["X", "H1"],
                ["H", "Y"],
                ["L", g]
            ])
    }
}

/// RHL1 for `α < π/2`, RHL2 otherwise.
fn rhl_table(alpha: f64) -> Table {
    let h = 0.5;
    let g = "Gamma";
    if alpha < 0.5 * PI {
        let e = (1.0 + 4.0 * alpha.cos()) / (2.0 + 4.0 * alpha.cos());
        let n = 0.75 - e / 2.0;
        table!("RHL1";
            [
                (g, [0, 0, 0]),
                ("B", [e, h, 1.0 - e]),
                ("B1", [h, 1.0 - e, e - 1.0]),
                ("F", [h, h, 0]),
                ("L", [h, 0, 0]),
                ("L1", [0, 0, -h]),
                ("P", [e, n, n]),
                ("P1", [1.0 - n, 1.0 - n, 1.0 - e]),
                ("P2", [n, n, e - 1.0]),
                ("Q", [1.0 - n, n, 0]),
                ("X", [n, 0, -n]),
                ("Z", [h, h, h]),
            ];
            [[g, "L", "B1"], ["B", "Z", g, "X"], ["Q", "F", "P1", "Z"], ["L", "P"]])
    } else {
        let e = 1.0 / (2.0 * (0.5 * alpha).tan().powi(2));
        let n = 0.75 - e / 2.0;
        table!("RHL2";
            [
                (g, [0, 0, 0]),
                ("F", [h, -h, 0]),
                ("L", [h, 0, 0]),
                ("P", [1.0 - n, -n, 1.0 - n]),
                ("P1", [n, n - 1.0, n - 1.0]),
                ("Q", [e, e, e]),
                ("Q1", [1.0 - e, -e, -e]),
                ("Z", [h, -h, h]),
            ];
            [[g, "P", "Z", "Q", g, "F", "P1", "Q1", "L", "Z"]])
    }
}

/// The five base-centered monoclinic variants: MCLC1/2 by the reciprocal angle `k_γ` (obtuse or
/// right), MCLC3/4/5 by `b cos α / c + b² sin² α / a²` (below, at or above 1).
fn mclc_table(a: f64, b: f64, c: f64, alpha: f64, rec: &[Vector3<f64>]) -> Table {
    let h = 0.5;
    let g = "Gamma";
    let (ca, sa) = (alpha.cos(), alpha.sin());
    let k_gamma = angle(&rec[0], &rec[1]);

    if k_gamma >= 0.5 * PI - REGIME_TOL {
        let z = (2.0 - b * ca / c) / (4.0 * sa * sa);
        let e = h + 2.0 * z * c * ca / b;
        let p = 0.75 - a * a / (4.0 * b * b * sa * sa);
        let f = p + (0.75 - p) * b * ca / c;
        let mut t = table!("MCLC1";
            [
                (g, [0, 0, 0]),
                ("N", [h, 0, 0]),
                ("N1", [0, -h, 0]),
                ("F", [1.0 - z, 1.0 - z, 1.0 - e]),
                ("F1", [z, z, e]),
                ("F2", [-z, -z, 1.0 - e]),
                ("I", [f, 1.0 - f, h]),
                ("I1", [1.0 - f, f - 1.0, h]),
                ("L", [h, h, h]),
                ("M", [h, 0, h]),
                ("X", [1.0 - p, p - 1.0, 0]),
                ("X1", [p, 1.0 - p, 0]),
                ("X2", [p - 1.0, -p, 0]),
                ("Y", [h, h, 0]),
                ("Y1", [-h, -h, 0]),
                ("Z", [0, 0, h]),
            ];
            [[g, "Y", "F", "L", "I"], ["I1", "Z", "F1"], ["Y", "X1"], ["X", g, "N"], ["M", g]]);
        if k_gamma <= 0.5 * PI + REGIME_TOL {
            t.regime = "MCLC2";
            t.paths = vec![
                vec![g, "Y", "F", "L", "I"],
                vec!["I1", "Z", "F1"],
                vec!["N", g, "M"],
            ];
        }
        return t;
    }

    let q = b * ca / c + b * b * sa * sa / (a * a);
    if q <= 1.0 + REGIME_TOL {
        let m = (1.0 + b * b / (a * a)) / 4.0;
        let d = b * c * ca / (2.0 * a * a);
        let z = m - 0.25 + (1.0 - b * ca / c) / (4.0 * sa * sa);
        let e = h + 2.0 * z * c * ca / b;
        let f = 1.0 + z - 2.0 * m;
        let p = e - 2.0 * d;
        let mut t = table!("MCLC3";
            [
                (g, [0, 0, 0]),
                ("F", [1.0 - f, 1.0 - f, 1.0 - p]),
                ("F1", [f, f - 1.0, p]),
                ("F2", [1.0 - f, -f, 1.0 - p]),
                ("H", [z, z, e]),
                ("H1", [1.0 - z, -z, 1.0 - e]),
                ("H2", [-z, -z, 1.0 - e]),
                ("I", [h, -h, h]),
                ("M", [h, 0, h]),
                ("N", [h, 0, 0]),
                ("N1", [0, -h, 0]),
                ("X", [h, -h, 0]),
                ("Y", [m, m, d]),
                ("Y1", [1.0 - m, -m, -d]),
                ("Y2", [-m, -m, -d]),
                ("Y3", [m, m - 1.0, d]),
                ("Z", [0, 0, h]),
            ];
            [[g, "Y", "F", "H", "Z", "I", "F1"], ["H1", "Y1", "X", g, "N"], ["M", g]]);
        if q >= 1.0 - REGIME_TOL {
            t.regime = "MCLC4";
            t.paths[0] = vec![g, "Y", "F", "H", "Z", "I"];
        }
        return t;
    }

    let z = (b * b / (a * a) + (1.0 - b * ca / c) / (sa * sa)) / 4.0;
    let e = h + 2.0 * z * c * ca / b;
    let m = e / 2.0 + b * b / (4.0 * a * a) - b * c * ca / (2.0 * a * a);
    let n = 2.0 * m - z;
    let w = (4.0 * n - 1.0 - b * b * sa * sa / (a * a)) * c / (2.0 * b * ca);
    let d = z * c * ca / b + w / 2.0 - 0.25;
    let r = 1.0 - z * a * a / (b * b);
    table!("MCLC5";
        [
            (g, [0, 0, 0]),
            ("F", [n, n, w]),
            ("F1", [1.0 - n, 1.0 - n, 1.0 - w]),
            ("F2", [n, n - 1.0, w]),
            ("H", [z, z, e]),
            ("H1", [1.0 - z, -z, 1.0 - e]),
            ("H2", [-z, -z, 1.0 - e]),
            ("I", [r, 1.0 - r, h]),
            ("I1", [1.0 - r, r - 1.0, h]),
            ("L", [h, h, h]),
            ("M", [h, 0, h]),
            ("N", [h, 0, 0]),
            ("N1", [0, -h, 0]),
            ("X", [h, -h, 0]),
            ("Y", [m, m, d]),
            ("Y1", [1.0 - m, -m, -d]),
            ("Y2", [-m, -m, -d]),
            ("Y3", [m, m - 1.0, d]),
            ("Z", [0, 0, h]),
        ];
        [[g, "Y", "F", "L", "I"], ["I1", "Z", "H", "F1"], ["H1", "Y1", "X", g, "N"], ["M", g]])
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    use super::*;

    fn cubic_catalog(a: f64) -> Catalog {
        let rec: Vec<Vector3<f64>> = (0..3)
            .map(|i| Vector3::ith(i, 2.0 * PI / a))
            .collect();
        let p = LatticeParams::new(a, a, a, 0.5 * PI, 0.5 * PI, 0.5 * PI);
        Catalog::from_table(table(LatticeType::PrimitiveCubic, &p, &rec), &rec)
    }

    #[test]
    fn test_cubic_catalog() {
        let cat = cubic_catalog(1.0);
        assert_eq!(cat.regime(), "CUB");
        assert_eq!(cat.num_symmetry_points(), 4);
        assert_eq!(cat.num_paths(), 2);
        assert_eq!(cat.num_path_segments(0), 5);
        assert_eq!(cat.path_segment_end_point_indices(1, 0), (1, 2));
        assert_relative_eq!(
            cat.symmetry_point(2),
            DVector::from_vec(vec![PI, PI, PI])
        );
    }

    #[test]
    fn test_label_lookup() {
        let cat = cubic_catalog(1.0);
        assert_eq!(cat.symmetry_point_index("Gamma"), Some(0));
        assert_eq!(cat.symmetry_point_index("Γ"), Some(0));
        assert_eq!(cat.symmetry_point_index("R"), Some(2));
        assert_eq!(cat.symmetry_point_index("Q"), None);
        assert_eq!(cat.points()[0].display_label(), "Γ");
    }

    #[test]
    fn test_intermediate_points() {
        let cat = cubic_catalog(2.0);
        assert_eq!(cat.num_intermediate_points(0), 5);
        assert_eq!(cat.intermediate_point_label(0, 0), "Gamma-X");
        assert_relative_eq!(
            cat.intermediate_point(0, 0),
            DVector::from_vec(vec![0.0, 0.25 * PI, 0.0])
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bad_path_panics() {
        cubic_catalog(1.0).num_path_segments(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bad_segment_panics() {
        cubic_catalog(1.0).path_segment_end_point_indices(1, 1);
    }

    #[test]
    fn test_shortest_half_vector() {
        let rec = vec![Vector3::x(), Vector3::new(0.9, 0.4, 0.0)];
        // (1/2)(b0 + b1) is longer than (1/2)(b0 - b1)
        let f = shortest_half_vector(&[1, 1], &rec);
        assert_eq!(f, vec![0.5, -0.5]);
        assert_eq!(shortest_half_vector(&[1, 0], &rec), vec![0.5, 0.0]);
    }

    #[test]
    fn test_shortest_half_vector_skewed() {
        let rec = vec![Vector3::x(), Vector3::new(5.1, 0.2, 0.0)];
        for h in [[1, 0], [0, 1], [1, 1]] {
            let f = shortest_half_vector(&h, &rec);
            let len = combine(&f, &rec).norm();
            for n in integer_box(2, 12) {
                if (n[0] - h[0]) % 2 != 0 || (n[1] - h[1]) % 2 != 0 {
                    continue;
                }
                let g = [0.5 * n[0] as f64, 0.5 * n[1] as f64];
                assert!(len <= combine(&g, &rec).norm() + 1e-12, "{:?}: {:?} beats {:?}", h, g, f);
            }
        }
    }
}

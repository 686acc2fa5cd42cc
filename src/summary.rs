//! Human-readable tables describing a lattice.

use nalgebra::DVector;
use tabled::{settings::Style, Table, Tabled};

use crate::lattice::BravaisLattice;

#[derive(Debug, Clone, PartialEq, Tabled)]
struct VectorRow {
    name: String,
    components: String,
    length: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
struct TranslationRow {
    #[tabled(rename = "face pair")]
    pair: usize,
    translation: String,
    #[tabled(rename = "face radius")]
    radius: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
struct PointRow {
    #[tabled(rename = "#")]
    index: usize,
    label: String,
    fractional: String,
    cartesian: String,
}

#[derive(Debug, Clone, PartialEq, Tabled)]
struct PathRow {
    path: usize,
    points: String,
}

fn fmt_components(xs: &[f64]) -> String {
    let parts: Vec<String> = xs.iter().map(|x| format!("{:.4}", x + 0.0)).collect();
    format!("({})", parts.join(", "))
}

fn vector_rows(prefix: &str, vecs: &[DVector<f64>]) -> Vec<VectorRow> {
    vecs.iter()
        .enumerate()
        .map(|(i, v)| VectorRow {
            name: format!("{}{}", prefix, i + 1),
            components: fmt_components(v.as_slice()),
            length: format!("{:.4}", v.norm()),
        })
        .collect()
}

/// The direct (`a1`, ...) and reciprocal (`b1`, ...) basis vectors.
pub fn basis_table(lat: &BravaisLattice) -> Table {
    let mut rows = vector_rows("a", &lat.lattice_vectors());
    rows.extend(vector_rows("b", &lat.reciprocal_vectors()));
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

/// One row per pair of opposite Wigner-Seitz faces.
pub fn translation_table(lat: &BravaisLattice) -> Table {
    let translations = lat.translation_vectors();
    let rows = translations
        .iter()
        .zip(lat.face_radii())
        .enumerate()
        .map(|(i, (t, r))| TranslationRow {
            pair: i + 1,
            translation: fmt_components(t.as_slice()),
            radius: format!("{:.4}", r),
        });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

pub fn symmetry_point_table(lat: &BravaisLattice) -> Table {
    let rows = lat
        .catalog()
        .points()
        .iter()
        .enumerate()
        .map(|(i, p)| PointRow {
            index: i,
            label: p.display_label(),
            fractional: fmt_components(&p.fractional),
            cartesian: fmt_components(p.coords.as_slice()),
        });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

pub fn path_table(lat: &BravaisLattice) -> Table {
    let catalog = lat.catalog();
    let rows = catalog.paths().iter().enumerate().map(|(i, path)| PathRow {
        path: i,
        points: path
            .iter()
            .map(|&p| catalog.points()[p].display_label())
            .collect::<Vec<_>>()
            .join("-"),
    });
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table
}

/// Everything above, under a short header.
pub fn summary(lat: &BravaisLattice) -> String {
    let cell = lat.wigner_seitz_cell();
    let header = format!(
        "{} lattice ({})\nunit cell volume: {:.6}\nBrillouin zone volume: {:.6}\nWigner-Seitz cell: {:?} with {} faces",
        lat.lattice_type_label(),
        lat.regime(),
        lat.unit_cell_volume(),
        lat.brillouin_zone_volume(),
        cell.shape(),
        cell.facets().len(),
    );
    [
        header,
        basis_table(lat).to_string(),
        translation_table(lat).to_string(),
        symmetry_point_table(lat).to_string(),
        path_table(lat).to_string(),
    ]
    .join("\n\n")
}

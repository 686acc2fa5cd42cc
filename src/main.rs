use std::error::Error;

use bravais::{
    mesh::CoarseMesh, parsing::LatticeDescriptor, special_points::Catalog, summary::summary,
};
use clap::Parser;
use env_logger::Env;
use log::info;
use nalgebra::DVector;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bravais")]
#[command(about = "Describe a Bravais lattice, its Brillouin zone and its Wigner-Seitz mesh")]
#[command(version)]
struct Cli {
    /// Lattice descriptor, e.g. `bct a=1 c=0.5` or `hR alpha=45deg`
    #[arg(required = true)]
    descriptor: Vec<String>,

    /// Print the lattice, catalog and coarse mesh as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Map a comma-separated point into the primitive cell and the fundamental domain
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    point: Option<Vec<f64>>,

    /// Verbose output, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Export<'a> {
    descriptor: &'a LatticeDescriptor,
    label: &'a str,
    regime: &'a str,
    lattice_vectors: Vec<DVector<f64>>,
    reciprocal_vectors: Vec<DVector<f64>>,
    translation_vectors: Vec<DVector<f64>>,
    face_radii: &'a [f64],
    catalog: &'a Catalog,
    mesh: &'a CoarseMesh,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let descriptor: LatticeDescriptor = cli.descriptor.join(" ").parse()?;
    let lat = descriptor.build(i32::from(cli.verbose))?;

    if cli.json {
        let export = Export {
            descriptor: &descriptor,
            label: lat.lattice_type_label(),
            regime: lat.regime(),
            lattice_vectors: lat.lattice_vectors(),
            reciprocal_vectors: lat.reciprocal_vectors(),
            translation_vectors: lat.translation_vectors(),
            face_radii: lat.face_radii(),
            catalog: lat.catalog(),
            mesh: lat.coarse_wigner_seitz_mesh(),
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
    } else {
        println!("{}", summary(&lat));
    }

    if let Some(coords) = cli.point {
        if coords.len() != lat.dim() {
            return Err(format!(
                "point has {} coordinates, the lattice is {}-dimensional",
                coords.len(),
                lat.dim()
            )
            .into());
        }
        let pt = DVector::from_vec(coords);
        let (primitive, moved) = lat.map_to_primitive_cell(&pt);
        info!("Primitive cell image moved: {}", moved);
        let (wedge, moved) = lat.map_to_fundamental_domain(&pt);
        info!("Fundamental domain image moved: {}", moved);
        println!("primitive cell:     {:?}", primitive.as_slice());
        println!("fundamental domain: {:?}", wedge.as_slice());
    }

    Ok(())
}

//! Tessera CLI - meshes the sample domains and renders each to EPS.
//!
//! Usage: tessera <MAX_AREA> [OPTIONS]
//!
//! Run `tessera --help` for available options.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use tessera::domain::{samples, DomainDescription};
use tessera::io::eps::{self, RenderOptions};
use tessera::mesh::AssembleOptions;
use tessera::mesh_domain;
use tessera::triangulate::{SpadeTriangulator, TriangulateOptions};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Planar mesh generation demo", long_about = None)]
struct Cli {
    /// Maximum triangle area
    #[arg(value_parser = parse_positive)]
    max_area: f64,

    /// Directory receiving the EPS files
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Minimum interior angle in degrees (0 disables the quality constraint)
    #[arg(long, default_value = "30", value_parser = parse_non_negative)]
    min_angle: f64,

    /// Number of sides of each annulus polygon
    #[arg(long, default_value = "24", value_parser = RangedU64ValueParser::<usize>::new().range(3..))]
    annulus_sides: usize,

    /// Canvas size cap in points
    #[arg(long, default_value = "400")]
    max_dimension: f64,

    /// Margin as a fraction of the mesh extent
    #[arg(long, default_value = "0.01")]
    margin: f64,

    /// Use single-threaded assembly
    #[arg(long)]
    sequential: bool,
}

fn parse_number(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("`{}` is not a finite number", s)),
    }
}

fn parse_positive(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("`{}` must be a positive number", s))
    }
}

fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value = parse_number(s)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("`{}` must not be negative", s))
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let triangulate = TriangulateOptions::new(cli.max_area);
    let triangulate = if cli.min_angle > 0.0 {
        triangulate.with_min_angle(cli.min_angle)
    } else {
        triangulate.without_min_angle()
    };

    let assemble = AssembleOptions::default().with_parallel(!cli.sequential);

    let render = RenderOptions::default()
        .with_max_dimension(cli.max_dimension)
        .with_margin_fraction(cli.margin);

    let demos = [
        ("triangle-with-hole", samples::triangle_with_hole()),
        ("annulus", samples::annulus(cli.annulus_sides)),
        ("square", samples::square()),
    ];

    for (name, domain) in &demos {
        let output = cli.out_dir.join(format!("{}.eps", name));
        run_demo(name, domain, &output, &triangulate, &assemble, &render)?;
    }

    Ok(())
}

fn run_demo(
    name: &str,
    domain: &DomainDescription,
    output: &Path,
    triangulate: &TriangulateOptions,
    assemble: &AssembleOptions,
    render: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mesh = mesh_domain(domain, &SpadeTriangulator, triangulate, assemble)?;
    let elapsed = start.elapsed();

    println!("{}:", name);
    println!("  Nodes:    {}", mesh.num_nodes());
    println!("  Edges:    {}", mesh.num_edges());
    println!("  Elements: {}", mesh.num_elements());
    println!("  Area:     {:.6} ({:.2?})", mesh.total_area(), elapsed);

    eps::save(&mesh, output, render)?;
    log::info!("wrote {}", output.display());

    Ok(())
}

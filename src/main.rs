//! Resource Forge CLI
//!
//! Usage:
//!   resource-forge [OPTIONS] <MANIFEST>
//!
//! Options:
//!   -i, --instance <NAME>   Create an instance and print its geometry (repeatable)
//!   -a, --align <ANCHOR>    Anchor to apply to printed instances (center, n, ne, ...)
//!   -v, --verbose           Debug logging
//!   -h, --help              Print help

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use resource_forge::{Align, ProjectManifest, TemplateManager};

#[derive(Parser)]
#[command(name = "resource-forge")]
#[command(about = "Validate, load, and instance game resources from a manifest")]
struct Cli {
    /// Project manifest (TOML)
    manifest: PathBuf,

    /// Create an instance of this resource and print its geometry
    #[arg(short, long = "instance", value_name = "NAME")]
    instances: Vec<String>,

    /// Anchor to apply to printed instances
    #[arg(short, long, value_name = "ANCHOR")]
    align: Option<Align>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let manifest = match ProjectManifest::from_file(&cli.manifest) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", cli.manifest.display(), e);
            std::process::exit(1);
        }
    };

    let manager = match manifest.build_manager() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    print_resources(&manager);

    for name in &cli.instances {
        let mut instance = match manager.create_resource_instance(name) {
            Ok(i) => i,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        if let Some(align) = cli.align {
            instance.set_align(align);
        }

        let rect = instance.rect();
        println!(
            "instance {} {}: pos=({}, {}) align={} rect=({}, {}, {}x{})",
            instance.id(),
            instance.name(),
            instance.position().x,
            instance.position().y,
            instance.align(),
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );
        if let Some(action) = instance.action() {
            println!("  action: {}", action);
        }
    }
}

fn print_resources(manager: &TemplateManager) {
    println!("{} resources loaded", manager.len());
    for name in manager.names() {
        if let Some(entry) = manager.get(name) {
            println!("  {:<20} {:<16} {}", entry.name, entry.type_tag, entry.data.summary());
        }
    }
}

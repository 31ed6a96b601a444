#![warn(clippy::pedantic)]
#![cfg_attr(feature = "precommit-checks", deny(warnings, clippy::pedantic, clippy::dbg_macro))]
#![cfg_attr(not(feature = "precommit-checks"), allow(dead_code, unused_variables, unused_imports))]

use std::path::PathBuf;

use anyhow::Result;

#[derive(clap::Parser)]
#[clap(version, about)]
struct Options {
    #[clap(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand)]
enum Action {
    /// Writes all built-in maps into a directory.
    Build {
        #[clap(long, default_value = "assets/maps")]
        maps_dir: PathBuf,
    },
    /// Writes the JSON schema of map files.
    Schema {
        output: PathBuf,
        /// Compresses the schema with gzip.
        #[clap(long)]
        gzip:   bool,
    },
    /// Converts a JSON map into an .avmap file.
    FromJson { input: PathBuf, output: PathBuf },
    /// Converts an .avmap file into JSON.
    ToJson { input: PathBuf, output: PathBuf },
}

fn main() -> Result<()> {
    let options = <Options as clap::Parser>::parse();
    match options.action {
        Action::Build { maps_dir } => {
            for path in avmap_maps::build_assets(&maps_dir)? {
                println!("{}", path.display());
            }
            Ok(())
        }
        Action::Schema { output, gzip } => avmap_maps::json_schema(&output, gzip),
        Action::FromJson { input, output } => avmap_maps::from_json(&input, &output),
        Action::ToJson { input, output } => avmap_maps::to_json(&input, &output),
    }
}

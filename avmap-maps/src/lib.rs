use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use anyhow::{Context, Result};

pub mod victoria;

/// Map file extension.
pub const EXTENSION: &str = "avmap";

pub fn builtins()
-> impl Iterator<Item = (impl AsRef<str> + Into<String> + fmt::Display, store::File)> {
    [("victoria", victoria::file())].into_iter()
}

/// Writes every built-in map into `maps_dir`, returning the written paths.
pub fn build_assets(maps_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(maps_dir).context("mkdir maps")?;

    builtins()
        .map(|(name, data)| {
            let path = maps_dir.join(format!("{name}.{EXTENSION}"));
            write_avmap(&data, &path).with_context(|| format!("build {name}"))?;
            Ok(path)
        })
        .collect()
}

pub fn json_schema(output: &Path, gzip: bool) -> Result<()> {
    let schema = schemars::schema_for!(store::File);
    let file = create(output)?;
    let result = if gzip {
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::best());
        serde_json::to_writer(BufWriter::new(encoder), &schema)
    } else {
        serde_json::to_writer(BufWriter::new(file), &schema)
    };
    result.context("write schema")
}

pub fn from_json(input: &Path, output: &Path) -> Result<()> {
    let file: store::File =
        serde_json::from_reader(BufReader::new(open(input)?)).context("parse json")?;
    write_avmap(&file, output)
}

pub fn to_json(input: &Path, output: &Path) -> Result<()> {
    let file = read_avmap(input)?;
    serde_json::to_writer_pretty(BufWriter::new(create(output)?), &file).context("write json")
}

pub fn read_avmap(path: &Path) -> Result<store::File> {
    ciborium::from_reader(BufReader::new(open(path)?))
        .with_context(|| format!("parse {}", path.display()))
}

pub fn write_avmap(file: &store::File, path: &Path) -> Result<()> {
    ciborium::into_writer(file, BufWriter::new(create(path)?))
        .with_context(|| format!("write {}", path.display()))
}

fn open(path: &Path) -> Result<fs::File> {
    fs::File::open(path).with_context(|| format!("open {}", path.display()))
}

fn create(path: &Path) -> Result<fs::File> {
    fs::File::create(path).with_context(|| format!("create {}", path.display()))
}

//! Functions that wrap up loading topology descriptions from JSON.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{Error, Topology};

/// Loads a topology description from a string.
pub(crate) fn load_str(s: &str) -> Result<Topology, Error> {
    serde_json::from_str(s).map_err(Into::into)
}

/// Loads a topology description from a file.
pub(crate) fn load_file<P: AsRef<Path>>(path: P) -> Result<Topology, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(Into::into)
}

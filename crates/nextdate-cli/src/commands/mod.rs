//! Command implementations.
//!
//! Every command returns the text it wants printed on stdout, so callers
//! decide where it goes and tests can inspect it.

pub mod config;
pub mod next;
pub mod task;

use std::io::Read;
use std::path::Path;

use crate::error::CliResult;

/// Reads a whole input file; `-` means standard input.
pub(crate) fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

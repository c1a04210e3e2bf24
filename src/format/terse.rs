//! Terse output (`-T`): one line per run, no source excerpts.

use std::io::{self, Write};

use super::headers;
use crate::runs::Run;
use crate::store::TokenStore;

pub fn write(out: &mut dyn Write, store: &TokenStore, runs: &[Run]) -> io::Result<()> {
    for run in runs {
        let ((f0, l0a, l0b), (f1, l1a, l1b)) = headers(store, run);
        writeln!(out, "{f0}:{l0a}-{l0b} {f1}:{l1a}-{l1b} size={}", run.size)?;
    }
    Ok(())
}

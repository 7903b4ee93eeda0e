//! Human-readable run manifest: one record per batch with the resolved
//! archive name and the member list.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::StagedMember;
use crate::engine::tools::format_size;

/// Appends one record per batch. Generic over the sink so tests can write
/// to memory; the CLI writes through a buffered file.
pub struct ManifestWriter<W: Write> {
    out: W,
    detail_level: u8,
}

impl ManifestWriter<BufWriter<File>> {
    /// Create (truncate) the manifest file at `path`.
    pub fn create(path: &Path, detail_level: u8) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("create manifest file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file), detail_level))
    }
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(out: W, detail_level: u8) -> Self {
        Self { out, detail_level }
    }

    /// Record one batch: archive name, member count, then one line per
    /// member with its relative path and, at detail level >= 1, a
    /// parenthesized human-readable size.
    pub fn record_batch(&mut self, archive_name: &str, members: &[StagedMember]) -> Result<()> {
        writeln!(self.out, "{archive_name}")?;
        writeln!(self.out, "{}", members.len())?;
        for member in members {
            if self.detail_level >= 1 {
                writeln!(
                    self.out,
                    "{} ({})",
                    member.rel_path.display(),
                    format_size(member.size)
                )?;
            } else {
                writeln!(self.out, "{}", member.rel_path.display())?;
            }
        }
        Ok(())
    }

    /// Flush and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().context("flush manifest")?;
        Ok(self.out)
    }
}

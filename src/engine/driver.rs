//! External archiver collaborator: locate the executable, build the
//! command line, invoke it once per batch.
//!
//! The archiver's output is not parsed and its exit status is not checked
//! beyond the process completing; a non-zero status is logged.

use anyhow::{Result, bail};
use log::{debug, warn};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::utils::config::{ARCHIVER_CANDIDATES, ARCHIVER_ENV_KEY};
use crate::{ArchiveFormat, Opts};

fn find_in_path_dir(dir: &Path, name: &Path) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }
    #[cfg(windows)]
    {
        let exe = candidate.with_extension("exe");
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}

fn search_path(name: &Path) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| find_in_path_dir(&dir, name))
}

/// Resolve the archiver executable: explicit path, then the
/// `SPLITARC_ARCHIVER` environment variable, then PATH candidates
/// (7zz, 7za, 7z). An unresolvable archiver is configuration-fatal.
pub fn resolve_archiver(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
        if let Some(found) = search_path(p) {
            return Ok(found);
        }
        bail!("archiver '{}' could not be found", p.display());
    }
    if let Some(from_env) = std::env::var_os(ARCHIVER_ENV_KEY) {
        let p = PathBuf::from(from_env);
        if p.is_file() {
            return Ok(p);
        }
        if let Some(found) = search_path(&p) {
            return Ok(found);
        }
        bail!(
            "{} points to '{}', which could not be found",
            ARCHIVER_ENV_KEY,
            p.display()
        );
    }
    for candidate in ARCHIVER_CANDIDATES {
        if let Some(found) = search_path(Path::new(candidate)) {
            debug!("Using archiver {}", found.display());
            return Ok(found);
        }
    }
    bail!(
        "no 7-Zip command-line executable found; install one of {:?} or pass --archiver",
        ARCHIVER_CANDIDATES
    );
}

/// Build the argument vector for one batch: `a -t<fmt> <out> -r [-mx=0]
/// [-p<pw> [-mhe]] <scratch>/*`. Header encryption is only available in
/// the 7z container.
pub fn build_archiver_args(opts: &Opts, archive_path: &Path, scratch: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["a".into(), opts.format.type_arg().into()];
    args.push(archive_path.as_os_str().to_os_string());
    // Recurse so the staged directory structure is stored.
    args.push("-r".into());
    if !opts.compress {
        args.push("-mx=0".into());
    }
    if let Some(password) = opts.password.as_deref()
        && !password.is_empty()
    {
        args.push(format!("-p{password}").into());
        if opts.format == ArchiveFormat::SevenZ {
            args.push("-mhe".into());
        }
    }
    args.push(scratch.join("*").into_os_string());
    args
}

/// Invoke the archiver and wait for it. Failures are diagnostics, not
/// aborts: a bad exit status or a spawn error never stops the run.
pub fn run_archiver(archiver: &Path, args: &[OsString]) {
    debug!("Invoking {} {:?}", archiver.display(), args);
    match Command::new(archiver).args(args).status() {
        Ok(status) if !status.success() => {
            warn!("{} exited with {status}", archiver.display());
        }
        Ok(_) => {}
        Err(e) => {
            warn!("failed to run {}: {e}", archiver.display());
        }
    }
}

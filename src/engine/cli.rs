//! CLI command handler: merge file config and arguments, validate the
//! configuration, and run the split.

use anyhow::{Result, bail};
use log::info;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::engine::tools::{format_size, running_as_root};
use crate::pipeline::run_split;
use crate::utils::splitarc_toml::{apply_file_to_opts, load_splitarc_toml};
use crate::utils::{get_password, setup_logging};

/// Overwrite an opts field from a CLI value when given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Build Opts: defaults, then `.splitarc.toml` in DIR, then CLI overrides.
fn setup_opts(cli: &Cli) -> Result<Opts> {
    let mut opts = Opts::default();
    if let Some(file) = load_splitarc_toml(&cli.dir) {
        apply_file_to_opts(&file, &mut opts);
    }

    opts.out_dir = cli.out.clone();
    apply_cli_opt!(cli, opts, name => naming_convention);
    apply_cli_opt!(cli, opts, format => format);
    apply_cli_opt!(cli, opts, max_size => max_batch_size);
    apply_cli_opt!(cli, opts, compress => compress);
    apply_cli_opt!(cli, opts, order => policy);
    apply_cli_opt!(cli, opts, start_at => start_at);
    apply_cli_opt!(cli, opts, summary_only => summary_only);
    apply_cli_opt!(cli, opts, detail => detail_level);
    apply_cli_opt!(cli, opts, pad_width => pad_width);
    apply_cli_opt!(cli, opts, follow_links => follow_links);
    apply_cli_opt!(cli, opts, strict => strict);
    apply_cli_opt!(cli, opts, verbose => verbose);
    if let Some(p) = cli.archiver.clone() {
        opts.archiver = Some(p);
    }
    if let Some(p) = cli.manifest.clone() {
        opts.manifest_path = Some(p);
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }

    if let Some(pw) = cli.password.clone() {
        opts.password = Some(pw);
    } else if cli.ask_password {
        opts.password = Some(get_password(&cli.dir)?);
    }

    // Configuration-fatal checks, before any batch work begins.
    if opts.max_batch_size == 0 {
        bail!("maximum archive size must be greater than zero");
    }
    if opts.start_at == 0 {
        bail!("start-at is 1-based; use 1 for a complete run");
    }
    Ok(opts)
}

/// Run the split (default) or plan-only when --summary-only.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose.unwrap_or(false));
    let opts = setup_opts(cli)?;
    if running_as_root() {
        info!("Running as root; archives and staged copies will be root-owned.");
    }
    if opts.summary_only {
        info!("Summary-only run: no archives will be produced.");
    }
    let summary = run_split(&cli.dir, &opts)?;
    info!(
        "{} files ({}) in {} archive(s), {} created",
        summary.total_files,
        format_size(summary.total_bytes),
        summary.batch_count,
        summary.archives_created
    );
    Ok(())
}

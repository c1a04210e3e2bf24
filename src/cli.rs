//! CLI argument definitions and validation.
//!
//! Built with `clap`'s derive API; the flag table is reproduced exactly
//! from the spec — every flag is single-character, long-form aliases are
//! not part of the contract. Two flags fall outside clap's ordinary
//! handling and are special-cased in [`parse`]: `-v` (a narrower "print
//! version, exit 0" flag, kept distinct from clap's own `-V`/`--version`)
//! and `--` (lexical-scan-only mode, which clap would otherwise swallow as
//! its own end-of-options marker before `RawArgs` ever sees it).

use std::path::PathBuf;

use clap::Parser;

use crate::enumerate::split_new_old;
use crate::error::{Result, SimError};
use crate::scan::CompareMode;

const DEFAULT_MIN_RUN: usize = 24;
const DEFAULT_THRESHOLD: u32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "simrs",
    version,
    about = "Find near-duplicate runs of text across a set of tokenized files"
)]
struct RawArgs {
    /// Minimum run size R, in tokens (default 24). 0 is invalid.
    #[arg(short = 'r', value_name = "N")]
    min_run: Option<usize>,

    /// Output page width, in columns.
    #[arg(short = 'w', value_name = "N")]
    width: Option<usize>,

    /// Function-like forms only (language-scanner toggle).
    #[arg(short = 'f')]
    functions_only: bool,

    /// Keep function identifiers intact (language-scanner toggle).
    #[arg(short = 'F')]
    keep_function_ids: bool,

    /// Diff-style output.
    #[arg(short = 'd')]
    diff: bool,

    /// Terse output: one line per run.
    #[arg(short = 'T')]
    terse: bool,

    /// Headings only, no source excerpts.
    #[arg(short = 'n')]
    headings_only: bool,

    /// Percentage output (implies -e -s).
    #[arg(short = 'p')]
    percentage: bool,

    /// Percentage output, main contributor only (implies -p).
    #[arg(short = 'P')]
    percentage_main_only: bool,

    /// Threshold percentage, 1..100 (requires -p or -P).
    #[arg(short = 't', value_name = "N")]
    threshold: Option<u32>,

    /// Compare every file against every other file. Without this, only
    /// adjacent files in the input list are compared.
    #[arg(short = 'e')]
    each_to_each: bool,

    /// Suppress self-comparison.
    #[arg(short = 's')]
    no_self: bool,

    /// New-vs-old only; uses a `/` or `|` separator in the file list.
    #[arg(short = 'S')]
    new_vs_old: bool,

    /// Recurse into directories.
    #[arg(short = 'R')]
    recurse: bool,

    /// Read filenames from standard input instead of arguments.
    #[arg(short = 'i')]
    stdin_list: bool,

    /// Write output to file F instead of stdout.
    #[arg(short = 'o', value_name = "F")]
    output: Option<PathBuf>,

    /// Print version and exit 0. Distinct from clap's own `-V`/`--version`.
    #[arg(short = 'v')]
    terse_version: bool,

    /// Report memory usage after the run.
    #[arg(short = 'M')]
    memory_report: bool,

    /// Files to compare; under `-S`, a bare `/` or `|` separates the
    /// "new" prefix from the "old" suffix.
    file_args: Vec<String>,
}

/// One of the four mutually exclusive output formats (§6: "at most one of
/// `{-d, -n, -p, -P, -T}`").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Default: run listing with source excerpts.
    Default,
    Diff,
    Terse,
    HeadingsOnly,
    Percentage { main_contributor_only: bool },
}

/// Fully validated, ready-to-drive options.
#[derive(Debug, Clone)]
pub struct Options {
    pub min_run: usize,
    pub width: Option<usize>,
    /// `-f`: function-like forms only. A language-scanner toggle the
    /// generic word/punctuation lexer does not act on; accepted and
    /// threaded through for forward compatibility with a future
    /// function-aware scanner, per the distilled spec's external-
    /// collaborator boundary.
    pub functions_only: bool,
    /// `-F`: keep function identifiers intact. Same status as `functions_only`.
    pub keep_function_ids: bool,
    pub format: OutputFormat,
    pub threshold: u32,
    pub compare: CompareMode,
    pub recurse: bool,
    pub stdin_list: bool,
    pub output: Option<PathBuf>,
    pub memory_report: bool,
    pub lex_scan_only: bool,
    pub print_version: bool,
    pub new_files: Vec<String>,
    pub old_files: Vec<String>,
}

/// Parse `argv` (not including the program name) into validated
/// [`Options`], pre-scanning for a literal `--` token (lexical-scan-only)
/// since clap would otherwise consume it as its own end-of-options marker.
pub fn parse(argv: &[String]) -> Result<Options> {
    let mut filtered: Vec<String> = Vec::with_capacity(argv.len());
    let mut lex_scan_only = false;
    for arg in argv {
        if arg == "--" {
            lex_scan_only = true;
        } else {
            filtered.push(arg.clone());
        }
    }

    let mut full = vec!["sim".to_string()];
    full.extend(filtered);
    let raw = RawArgs::try_parse_from(&full)
        .map_err(|e| SimError::Usage(e.to_string().trim_end().to_string()))?;

    validate(raw, lex_scan_only)
}

fn validate(raw: RawArgs, lex_scan_only: bool) -> Result<Options> {
    let min_run = raw.min_run.unwrap_or(DEFAULT_MIN_RUN);
    if min_run == 0 {
        return Err(SimError::Usage("minimum run size (-r) must be greater than 0".into()));
    }

    if let Some(w) = raw.width {
        if w == 0 {
            return Err(SimError::Usage("output width (-w) must be greater than 0".into()));
        }
    }

    let format_flags = [raw.diff, raw.headings_only, raw.percentage, raw.percentage_main_only, raw.terse];
    if format_flags.iter().filter(|&&f| f).count() > 1 {
        return Err(SimError::Usage(
            "at most one of -d, -n, -p, -P, -T may be given".into(),
        ));
    }

    if raw.stdin_list && !raw.file_args.is_empty() {
        return Err(SimError::Usage("-i conflicts with file arguments".into()));
    }

    let percentage = raw.percentage || raw.percentage_main_only;
    if let Some(t) = raw.threshold {
        if !percentage {
            return Err(SimError::Usage("-t requires -p or -P".into()));
        }
        if t == 0 || t > 100 {
            return Err(SimError::Usage("threshold (-t) must be between 1 and 100".into()));
        }
    }
    let threshold = raw.threshold.unwrap_or(DEFAULT_THRESHOLD);

    let format = if raw.percentage_main_only {
        OutputFormat::Percentage { main_contributor_only: true }
    } else if raw.percentage {
        OutputFormat::Percentage { main_contributor_only: false }
    } else if raw.diff {
        OutputFormat::Diff
    } else if raw.terse {
        OutputFormat::Terse
    } else if raw.headings_only {
        OutputFormat::HeadingsOnly
    } else {
        OutputFormat::Default
    };

    let compare = CompareMode {
        each_to_each: raw.each_to_each || percentage,
        no_self: raw.no_self || percentage,
        new_vs_old: raw.new_vs_old,
    };

    let (new_files, old_files) = split_new_old(&raw.file_args);

    Ok(Options {
        min_run,
        width: raw.width,
        functions_only: raw.functions_only,
        keep_function_ids: raw.keep_function_ids,
        format,
        threshold,
        compare,
        recurse: raw.recurse,
        stdin_list: raw.stdin_list,
        output: raw.output,
        memory_report: raw.memory_report,
        lex_scan_only,
        print_version: raw.terse_version,
        new_files: new_files.into_iter().map(str::to_string).collect(),
        old_files: old_files.into_iter().map(str::to_string).collect(),
    })
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

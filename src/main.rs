//! `sim` — finds near-duplicate runs of text across a set of tokenized
//! files, in the tradition of Dick Grune's `sim` family of similarity
//! detectors.
//!
//! The driver wires the pipeline together: parse argv into [`cli::Options`],
//! enumerate the files named on the command line (or read from stdin under
//! `-i`), lex each one into the shared [`store::TokenStore`], build the
//! forward-reference index, run the scanner, and hand its output to the
//! formatter selected by the output-mode flags.

mod cli;
mod enumerate;
mod error;
mod format;
mod index;
mod lex;
mod percent;
mod report_helpers;
mod runs;
mod scan;
mod store;

use std::io::Write;
use std::sync::Arc;

use cli::{OutputFormat, Options};
use enumerate::NamedFile;
use error::{Result, SimError};
use index::ForwardIndex;
use percent::PercentageAggregator;
use store::{Token, TokenStore};

const PROGNAME: &str = env!("CARGO_BIN_NAME");

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let opts = match cli::parse(&argv) {
        Ok(opts) => opts,
        Err(err) => fail(&err),
    };
    match run(&opts) {
        Ok(code) => std::process::exit(code),
        Err(err) => fail(&err),
    }
}

fn fail(err: &SimError) -> ! {
    eprintln!("{PROGNAME}: {err}");
    std::process::exit(1);
}

/// The driver's core loop (§4.6): resolve the file list, lex every file
/// into one shared token store, build F, scan, and emit via the selected
/// formatter. Returns the process exit code.
fn run(opts: &Options) -> Result<i32> {
    if opts.print_version {
        println!("{PROGNAME} {}", env!("CARGO_PKG_VERSION"));
        return Ok(0);
    }

    let files = resolve_files(opts)?;
    let store = build_store(&files)?;
    let width = format::effective_width(opts.width);
    let mut writer = open_output(opts)?;

    if opts.lex_scan_only {
        format::dump_tokens(&mut *writer, &store).map_err(io_as_usage)?;
        return Ok(0);
    }

    let index = ForwardIndex::build(&store, opts.min_run)?;
    let run_store = scan::scan(&store, &index, opts.min_run, opts.compare)?;

    match opts.format {
        OutputFormat::Percentage { main_contributor_only } => {
            let mut aggregator = PercentageAggregator::new();
            for run in &run_store.retrieve() {
                aggregator.add_run(&store, run);
            }
            let records = aggregator.show(opts.threshold, main_contributor_only);
            format::write_percentages(&mut *writer, &records, width).map_err(io_as_usage)?;
        }
        other => {
            let runs = run_store.retrieve();
            format::write_runs(&mut *writer, &store, &runs, other, width).map_err(io_as_usage)?;
        }
    }

    if opts.memory_report {
        let stats = index.stats();
        eprintln!(
            "tokens={} t_bytes={} prime={} f_bytes={}",
            stats.token_count, stats.t_bytes, stats.prime_table_size, stats.f_bytes
        );
    }
    index.free();

    Ok(0)
}

fn io_as_usage(e: std::io::Error) -> SimError {
    SimError::Usage(format!("write error: {e}"))
}

/// File enumeration (§4.6 step 2): from stdin under `-i`, else from the
/// new/old groups `cli::parse` already split on the `/`/`|` separator.
fn resolve_files(opts: &Options) -> Result<Vec<NamedFile>> {
    if opts.stdin_list {
        let lines = enumerate::read_stdin_paths()?;
        let (new, old) = enumerate::split_new_old(&lines);
        enumerate::expand_all(&new, &old, opts.recurse)
    } else {
        let new: Vec<&str> = opts.new_files.iter().map(String::as_str).collect();
        let old: Vec<&str> = opts.old_files.iter().map(String::as_str).collect();
        enumerate::expand_all(&new, &old, opts.recurse)
    }
}

/// Lexing (§4.6 step 3): one shared interner across every file so the same
/// lexeme anywhere gets the same id, which is what lets the index find
/// matches across file boundaries.
fn build_store(files: &[NamedFile]) -> Result<TokenStore> {
    let mut store = TokenStore::new();
    let mut interner = lex::Interner::new();

    for file in files {
        let content = std::fs::read_to_string(&file.path)
            .map_err(|source| SimError::FileRead { path: file.path.clone(), source })?;
        let lang = lex::detect(&file.path)
            .or_else(|| content.lines().next().and_then(lex::detect_by_shebang));

        let filename: Arc<str> = Arc::from(file.path.to_string_lossy().into_owned());
        let handle = store.begin_text(filename, file.is_old);
        for scanned in lex::scan(&content, lang, &mut interner) {
            store.append(Token { id: scanned.id, may_start_run: scanned.may_start_run });
            store.push_line(handle, scanned.line);
        }
        store.end_text(handle);
    }

    Ok(store)
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>> {
    match &opts.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|source| SimError::FileRead { path: path.clone(), source })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

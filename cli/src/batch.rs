//! Batch driver: evaluates every cell of a tab-separated file.
//!
//! Each row gets a fresh root scope. Cells run left to right and each
//! result is bound under its column label (`A`..`Z`), so later cells can
//! refer to earlier ones. An empty cell yields `nil` and leaves its label
//! unbound. Rows run in parallel on a rayon pool; every row
//! builds its own interpreter, since scopes cannot cross threads.

use miette::Diagnostic;
use paxl::{Error, EvaluatorOptions, Interpreter, Value};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

const COLUMN_LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum BatchError {
    #[error("Cannot read batch input `{path}`")]
    #[diagnostic(code(paxl::batch::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot start {threads} worker thread(s)")]
    #[diagnostic(code(paxl::batch::threads), help("Pass a smaller --threads value"))]
    ThreadPool {
        threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub threads: usize,
    pub evaluator: EvaluatorOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threads: 4,
            evaluator: EvaluatorOptions::default(),
        }
    }
}

/// Read `path` and evaluate it, returning one output line per row.
pub fn run_file(path: &Path, options: &BatchOptions) -> Result<Vec<String>, BatchError> {
    let input = std::fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    run(&input, options)
}

/// Evaluate every row of `input`, returning output lines in input order.
pub fn run(input: &str, options: &BatchOptions) -> Result<Vec<String>, BatchError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .map_err(|source| BatchError::ThreadPool {
            threads: options.threads,
            source,
        })?;

    let rows: Vec<&str> = input.lines().collect();
    debug!(rows = rows.len(), threads = options.threads, "starting batch");

    Ok(pool.install(|| {
        rows.par_iter()
            .enumerate()
            .map(|(idx, row)| evaluate_row(idx, row, &options.evaluator))
            .collect()
    }))
}

/// Evaluate one row in a fresh interpreter and format it as
/// `idx,value,value,…`.
pub fn evaluate_row(idx: usize, row: &str, options: &EvaluatorOptions) -> String {
    let mut interpreter = Interpreter::with_options(options.clone());
    let mut values = Vec::new();

    for (column, cell) in row.split('\t').enumerate() {
        let Some(&label) = COLUMN_LABELS.get(column) else {
            values.push(format!("#ERROR: no column label for cell {}", column + 1));
            continue;
        };
        if cell.trim().is_empty() {
            values.push(Value::Absent.to_string());
            continue;
        }
        match interpreter.run(cell) {
            Ok(value) => {
                values.push(value.to_string());
                interpreter.scope().bind(&char::from(label).to_string(), value);
            }
            Err(e) => {
                debug!(row = idx, column, error = %e, "cell failed");
                values.push(format!("#ERROR: {}", cell_error_message(&e)));
            }
        }
    }

    format!("{},{}", idx, values.join(","))
}

fn cell_error_message(error: &Error) -> String {
    match error.diagnostic() {
        Some(diagnostic) => diagnostic.message,
        None => error.to_string(),
    }
}

//! Adapters from the shapes users have their data in to ordered groups.
//!
//! Supported inputs:
//! - one file per group (whitespace, comma or semicolon separated numbers)
//! - inline groups on the command line, `label:1.0,2.0` or `1.0 2.0`
//! - a pooled `value,group` table, split on the group column
//! - a JSON [`AnalysisRequest`] document

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use holm_sidak_core::{AnalysisRequest, GroupInput, HolmSidakError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading group data.
#[derive(Debug, Error)]
pub enum InputError {
    /// A data file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A token could not be parsed as a number.
    #[error("{context}: '{token}' is not a number")]
    Parse { context: String, token: String },

    /// A line of a pooled table is malformed.
    #[error("{path}, line {line}: {message}")]
    Table {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A JSON request document is malformed.
    #[error("Failed to parse request {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The data is readable but not usable as groups.
    #[error(transparent)]
    Invalid(#[from] HolmSidakError),
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a list of numbers separated by whitespace, commas or semicolons.
///
/// Anything after a `#` on a line is a comment.
pub fn parse_values(text: &str, context: &str) -> Result<Vec<f64>, InputError> {
    text.lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ',' || c == ';'))
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| InputError::Parse {
                context: context.to_string(),
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a command-line group, optionally prefixed with `label:`.
pub fn parse_inline_group(arg: &str) -> Result<GroupInput, InputError> {
    match arg.split_once(':') {
        Some((label, values)) => {
            let label = label.trim();
            let data = parse_values(values, &format!("group '{}'", label))?;
            Ok(GroupInput::labeled(label, data))
        }
        None => Ok(GroupInput::new(parse_values(arg, "inline group")?)),
    }
}

/// Read one group from a file, labeled with the file stem.
pub fn read_group_file(path: &Path) -> Result<GroupInput, InputError> {
    let content = read_file(path)?;
    let data = parse_values(&content, &path.display().to_string())?;
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    debug!(path = %path.display(), observations = data.len(), "read group file");

    Ok(GroupInput { label, data })
}

/// Split a pooled data vector into groups using a parallel group-id vector.
///
/// Groups are ordered by ascending group id and labeled with it.
///
/// # Errors
///
/// Returns `InvalidInput` if the two vectors differ in length.
pub fn split_grouped(values: &[f64], group_ids: &[i64]) -> Result<Vec<GroupInput>, HolmSidakError> {
    if values.len() != group_ids.len() {
        return Err(HolmSidakError::InvalidInput(format!(
            "{} values but {} group ids",
            values.len(),
            group_ids.len()
        )));
    }

    let mut grouped: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for (&value, &id) in values.iter().zip(group_ids) {
        grouped.entry(id).or_default().push(value);
    }

    Ok(grouped
        .into_iter()
        .map(|(id, data)| GroupInput::labeled(id.to_string(), data))
        .collect())
}

/// Read a two-column `value,group` table and split it into groups.
///
/// Blank lines and `#` comments are skipped, as is a non-numeric first row
/// (a header).
pub fn read_grouped_table(path: &Path) -> Result<Vec<GroupInput>, InputError> {
    let content = read_file(path)?;
    let mut values = Vec::new();
    let mut group_ids = Vec::new();
    let mut first_row = true;

    let table_error = |line: usize, message: String| InputError::Table {
        path: path.to_path_buf(),
        line,
        message,
    };

    for (i, raw) in content.lines().enumerate() {
        let line_number = i + 1;
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c == ';' || c == '\t')
            .map(str::trim)
            .collect();
        if fields.len() != 2 {
            return Err(table_error(
                line_number,
                format!("expected 2 columns (value, group), found {}", fields.len()),
            ));
        }

        let is_first_row = std::mem::replace(&mut first_row, false);
        match (fields[0].parse::<f64>(), fields[1].parse::<i64>()) {
            (Ok(value), Ok(id)) => {
                values.push(value);
                group_ids.push(id);
            }
            (Err(_), _) if is_first_row => {
                debug!(path = %path.display(), header = line, "skipping header row");
            }
            (Err(_), _) => {
                return Err(table_error(
                    line_number,
                    format!("'{}' is not a number", fields[0]),
                ))
            }
            (_, Err(_)) => {
                return Err(table_error(
                    line_number,
                    format!("'{}' is not an integer group id", fields[1]),
                ))
            }
        }
    }

    Ok(split_grouped(&values, &group_ids)?)
}

/// Read a JSON analysis request.
pub fn read_request(path: &Path) -> Result<AnalysisRequest, InputError> {
    let content = read_file(path)?;
    AnalysisRequest::from_json(&content).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Interpret a boolean-like command-line value.
///
/// Accepts `true/false`, `yes/no`, `on/off`, `1/0`, `y/n` and `t/f` in any case.
pub fn parse_switch(value: &str) -> Result<bool, HolmSidakError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
        other => Err(HolmSidakError::ConfigurationError(format!(
            "'{}' is not a recognized on/off value",
            other
        ))),
    }
}

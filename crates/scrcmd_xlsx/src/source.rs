//! Source database discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::conf::{C_SOURCE_COMMAND_KEY, C_SOURCE_STEM_SUFFIX, TUP_SOURCE_ALIASES};
use crate::error::{Result, ScrcmdXlsxError};
use crate::spec::{SpecCommandRecord, SpecSourceTable};

////////////////////////////////////////////////////////////////////////////////
// #region Discovery

fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|err| ScrcmdXlsxError::InvalidPattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// List files in `dir_sources` whose file name matches `pattern`, sorted by path.
///
/// Directories are not descended into.
pub fn discover_source_files(dir_sources: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile_pattern(pattern)?;
    let map_io_err = |source| ScrcmdXlsxError::Io {
        path: dir_sources.to_path_buf(),
        source,
    };

    let mut l_paths = Vec::new();
    for entry in fs::read_dir(dir_sources).map_err(map_io_err)? {
        let entry = entry.map_err(map_io_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let if_is_match = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.is_match(name));
        if if_is_match {
            l_paths.push(path);
        }
    }
    l_paths.sort();

    log::debug!(
        "discovered {} source file(s) matching {pattern:?} in {}",
        l_paths.len(),
        dir_sources.display()
    );
    Ok(l_paths)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Naming

/// Sheet name for a source file: stem minus `_scrcmd_database`, then aliased.
///
/// `diamond_pearl_scrcmd_database.json` gives `DP`; stems without an alias are
/// upper-cased (`foo_scrcmd_database.json` gives `FOO`).
pub fn derive_source_code(path: &Path) -> String {
    let c_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();
    let c_base = c_stem.replace(C_SOURCE_STEM_SUFFIX, "");

    TUP_SOURCE_ALIASES
        .iter()
        .find(|(c_alias_from, _)| *c_alias_from == c_base)
        .map(|(_, c_alias_to)| (*c_alias_to).to_string())
        .unwrap_or_else(|| c_base.to_uppercase())
}

/// Display code for a raw opcode key: prefix dropped, upper-cased, zero-padded to 4.
///
/// `0xA` gives `000A`; `0x1234` gives `1234`. Longer keys are kept whole.
pub fn derive_opcode_code(key_raw: &str) -> String {
    let c_digits: String = key_raw.chars().skip(2).collect::<String>().to_uppercase();
    format!("{c_digits:0>4}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Loading

fn derive_str_field(record: &JsonMap<String, JsonValue>, key: &str) -> String {
    record
        .get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Build one record from its JSON value; missing or mistyped fields become empty.
pub fn derive_command_record(key_raw: &str, value: &JsonValue) -> SpecCommandRecord {
    let empty = JsonMap::new();
    let record = value.as_object().unwrap_or(&empty);

    let parameter_values = record
        .get("parameter_values")
        .and_then(JsonValue::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(JsonValue::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    SpecCommandRecord {
        code: derive_opcode_code(key_raw),
        decomp_name: derive_str_field(record, "decomp_name"),
        name: derive_str_field(record, "name"),
        parameter_values,
        description: derive_str_field(record, "description"),
    }
}

/// Parse one source document, keeping record order as written.
pub fn parse_source_table(path: &Path, text: &str) -> Result<SpecSourceTable> {
    let document: JsonValue =
        serde_json::from_str(text).map_err(|source| ScrcmdXlsxError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let Some(commands) = document
        .get(C_SOURCE_COMMAND_KEY)
        .and_then(JsonValue::as_object)
    else {
        return Err(ScrcmdXlsxError::MissingCommandTable {
            path: path.to_path_buf(),
        });
    };

    let records = commands
        .iter()
        .map(|(key_raw, value)| derive_command_record(key_raw, value))
        .collect();

    Ok(SpecSourceTable {
        path_source: path.to_path_buf(),
        code: derive_source_code(path),
        records,
    })
}

/// Read and parse one source database file.
pub fn load_source_table(path: &Path) -> Result<SpecSourceTable> {
    let c_text = fs::read_to_string(path).map_err(|source| ScrcmdXlsxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_source_table(path, &c_text)?;
    log::debug!(
        "loaded {} command(s) from {} as {:?}",
        table.records.len(),
        path.display(),
        table.code
    );
    Ok(table)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

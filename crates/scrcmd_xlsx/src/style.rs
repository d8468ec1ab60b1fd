//! Style table loading and per-column style resolution.
//!
//! `styles.json` is free-form; it is read into a fixed schema here, with every
//! absent or malformed attribute replaced by the defaults in [`crate::conf`].
//! Style problems never fail a run, they only change appearance.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::conf::{C_FILL_DEFAULT, C_FONT_NAME_DEFAULT, derive_default_cell_format};
use crate::error::{Result, ScrcmdXlsxError};
use crate::spec::{EnumStyleSection, SpecCellFormat, SpecStyleEntry, SpecStyleTable};

////////////////////////////////////////////////////////////////////////////////
// #region RawStyleDocument

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyleDocument {
    header: JsonMap<String, JsonValue>,
    data: JsonMap<String, JsonValue>,
    widths: JsonMap<String, JsonValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyleEntry {
    value: Option<String>,
    font: Option<RawStyleFont>,
    fill: Option<RawStyleFill>,
    align: Option<RawStyleAlign>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyleFont {
    name: Option<String>,
    size: Option<f64>,
    bold: Option<bool>,
    italic: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyleFill {
    fg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyleAlign {
    wrap: Option<bool>,
    vert: Option<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleTableLoading

/// Read and normalize a style configuration file.
///
/// A missing file or invalid JSON is fatal; anything wrong inside a column
/// entry falls back to defaults with a warning.
pub fn load_style_table(path: &Path) -> Result<SpecStyleTable> {
    let c_text = std::fs::read_to_string(path).map_err(|source| ScrcmdXlsxError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_style_table(&c_text).map_err(|source| ScrcmdXlsxError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "loaded style table {}: {} header, {} data, {} width entries",
        path.display(),
        table.header.len(),
        table.data.len(),
        table.widths.len()
    );
    Ok(table)
}

/// Normalize style configuration text into a [`SpecStyleTable`].
pub fn parse_style_table(text: &str) -> std::result::Result<SpecStyleTable, serde_json::Error> {
    let raw: RawStyleDocument = serde_json::from_str(text)?;

    let mut widths = BTreeMap::new();
    for (c_key, value) in &raw.widths {
        let Some(n_col) = parse_column_key(c_key, "widths") else {
            continue;
        };
        match value.as_f64() {
            Some(n_width) => {
                widths.insert(n_col, n_width);
            }
            None => log::warn!("style widths[{c_key}] is not a number; column width left unset"),
        }
    }

    Ok(SpecStyleTable {
        header: derive_section_entries(&raw.header, "header"),
        data: derive_section_entries(&raw.data, "data"),
        widths,
    })
}

fn derive_section_entries(
    section: &JsonMap<String, JsonValue>,
    section_name: &str,
) -> BTreeMap<u16, SpecStyleEntry> {
    let mut dict_entries = BTreeMap::new();
    for (c_key, value) in section {
        let Some(n_col) = parse_column_key(c_key, section_name) else {
            continue;
        };
        let entry = match serde_json::from_value::<RawStyleEntry>(value.clone()) {
            Ok(raw) => derive_style_entry(raw, section_name, n_col),
            Err(err) => {
                log::warn!("style {section_name}[{n_col}] is malformed ({err}); using defaults");
                SpecStyleEntry::default()
            }
        };
        dict_entries.insert(n_col, entry);
    }
    dict_entries
}

fn parse_column_key(c_key: &str, section_name: &str) -> Option<u16> {
    match c_key.trim().parse::<u16>() {
        Ok(n_col) if n_col >= 1 => Some(n_col),
        _ => {
            log::warn!("style {section_name} key {c_key:?} is not a 1-based column; ignored");
            None
        }
    }
}

fn derive_style_entry(raw: RawStyleEntry, section_name: &str, n_col: u16) -> SpecStyleEntry {
    let fallback = SpecStyleEntry::default();
    let font = raw.font.unwrap_or_default();
    let align = raw.align.unwrap_or_default();

    let fill = match raw.fill.and_then(|fill| fill.fg) {
        None => fallback.fill.clone(),
        Some(c_fg) => derive_rgb_hex(&c_fg).unwrap_or_else(|| {
            log::warn!(
                "style {section_name}[{n_col}] fill {c_fg:?} is not a hex colour; using {C_FILL_DEFAULT}"
            );
            fallback.fill.clone()
        }),
    };

    SpecStyleEntry {
        value: raw.value.unwrap_or_default(),
        font_name: font.name.unwrap_or(fallback.font_name),
        font_size: font.size.unwrap_or(fallback.font_size),
        bold: font.bold.unwrap_or(fallback.bold),
        italic: font.italic.unwrap_or(fallback.italic),
        fill,
        wrap: align.wrap.unwrap_or(fallback.wrap),
        valign: align.vert.unwrap_or(fallback.valign),
    }
}

/// Normalize an `AARRGGBB` or `RRGGBB` colour (optional `#`) to `RRGGBB`.
pub fn derive_rgb_hex(raw: &str) -> Option<String> {
    let c_hex = raw.trim().trim_start_matches('#');
    if !c_hex.chars().all(|chr| chr.is_ascii_hexdigit()) {
        return None;
    }
    match c_hex.len() {
        8 => Some(c_hex[2..].to_ascii_uppercase()),
        6 => Some(c_hex.to_ascii_uppercase()),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleResolver

/// Maps `(section, column)` to a concrete cell format.
#[derive(Debug, Clone)]
pub struct StyleResolver {
    table: SpecStyleTable,
    fmt_base: SpecCellFormat,
}

impl StyleResolver {
    /// Create a resolver over an immutable style table.
    pub fn new(table: SpecStyleTable) -> Self {
        Self {
            table,
            fmt_base: derive_default_cell_format(),
        }
    }

    /// Underlying style table.
    pub fn table(&self) -> &SpecStyleTable {
        &self.table
    }

    fn entry(&self, section: EnumStyleSection, column: u16) -> SpecStyleEntry {
        self.table
            .get(section, column)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve the format of 1-based `column` in `section`.
    ///
    /// Data cells are always left aligned. Header cells are always wrapped and
    /// centred both ways, whatever the table says.
    pub fn resolve(&self, section: EnumStyleSection, column: u16) -> SpecCellFormat {
        let entry = self.entry(section, column);
        let (c_align, c_valign, if_wrap) = match section {
            EnumStyleSection::Header => ("center".to_string(), "center".to_string(), true),
            EnumStyleSection::Data => ("left".to_string(), entry.valign, entry.wrap),
        };

        self.fmt_base.with_(SpecCellFormat {
            font_name: Some(entry.font_name),
            font_size: Some(entry.font_size),
            bold: Some(entry.bold),
            italic: Some(entry.italic),
            align: Some(c_align),
            valign: Some(c_valign),
            text_wrap: Some(if_wrap),
            bg_color: Some(entry.fill),
            ..Default::default()
        })
    }

    /// Bold variant of the data style of `column`, used for emphasized runs.
    pub fn resolve_emphasis(&self, column: u16) -> SpecCellFormat {
        let entry = self.entry(EnumStyleSection::Data, column);
        self.fmt_base.with_(SpecCellFormat {
            font_name: Some(C_FONT_NAME_DEFAULT.to_string()),
            font_size: Some(entry.font_size),
            bold: Some(true),
            italic: Some(false),
            valign: Some(entry.valign),
            text_wrap: Some(true),
            bg_color: Some(entry.fill),
            ..Default::default()
        })
    }

    /// Header title of `column`, or `fallback` when the table has none.
    pub fn header_title(&self, column: u16, fallback: &str) -> String {
        match self.table.get(EnumStyleSection::Header, column) {
            Some(entry) if !entry.value.is_empty() => entry.value.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Configured `(column, width)` pairs in column order.
    pub fn column_widths(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.table
            .widths
            .iter()
            .map(|(n_col, n_width)| (*n_col, *n_width))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

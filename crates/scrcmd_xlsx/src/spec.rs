//! Shared models: formats, style table, records, rendered cells, options, reports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::conf::{
    C_FILE_OUT, C_FILE_STYLES, C_FILL_DEFAULT, C_FONT_NAME_DEFAULT, C_SOURCE_FILE_PATTERN,
    C_VALIGN_DEFAULT, N_COL_FREEZE, N_FONT_SIZE_DEFAULT, N_HEIGHT_HEADER_ROW,
    N_PARAM_WRAP_THRESHOLD, N_ROW_FREEZE,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification handed to the workbook sink.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<f64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Border colour (RGB hex).
    pub border_color: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Background fill colour (RGB hex).
    pub bg_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            border_color: other
                .border_color
                .clone()
                .or_else(|| self.border_color.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleTableSpecification

/// Style table section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnumStyleSection {
    /// Header row (row 0).
    Header,
    /// Every data row.
    Data,
}

/// One column's visual attributes with defaults already substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecStyleEntry {
    /// Header title text (`value`); empty for data entries.
    pub value: String,
    /// Font family name.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f64,
    /// Bold style.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
    /// Fill colour (RGB hex, no alpha).
    pub fill: String,
    /// Text wrap.
    pub wrap: bool,
    /// Vertical alignment.
    pub valign: String,
}

impl Default for SpecStyleEntry {
    fn default() -> Self {
        Self {
            value: String::new(),
            font_name: C_FONT_NAME_DEFAULT.to_string(),
            font_size: N_FONT_SIZE_DEFAULT,
            bold: false,
            italic: false,
            fill: C_FILL_DEFAULT.to_string(),
            wrap: false,
            valign: C_VALIGN_DEFAULT.to_string(),
        }
    }
}

/// Process-wide style table keyed by 1-based column index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecStyleTable {
    /// Header styles by column.
    pub header: BTreeMap<u16, SpecStyleEntry>,
    /// Data styles by column.
    pub data: BTreeMap<u16, SpecStyleEntry>,
    /// Column widths by column.
    pub widths: BTreeMap<u16, f64>,
}

impl SpecStyleTable {
    /// Look up one column entry of `section`.
    pub fn get(&self, section: EnumStyleSection, column: u16) -> Option<&SpecStyleEntry> {
        match section {
            EnumStyleSection::Header => self.header.get(&column),
            EnumStyleSection::Data => self.data.get(&column),
        }
    }
}

/// Horizontal merge of adjacent header cells sharing one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecHeaderMerge {
    /// Start column index, zero-based (inclusive).
    pub col_idx_start: usize,
    /// End column index, zero-based (inclusive).
    pub col_idx_end: usize,
    /// Merge display text.
    pub text: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSpecification

/// One script command as read from a source database.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCommandRecord {
    /// Display code derived from the raw key, 4 upper-case hex digits.
    pub code: String,
    /// Implementation-level identifier.
    pub decomp_name: String,
    /// Human label.
    pub name: String,
    /// Parameters, each bare or `type:name`.
    pub parameter_values: Vec<String>,
    /// Free-text description.
    pub description: String,
}

/// All records of one source file; becomes one worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSourceTable {
    /// File the records were read from.
    pub path_source: PathBuf,
    /// Sheet name derived from the file name.
    pub code: String,
    /// Records in file order.
    pub records: Vec<SpecCommandRecord>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderedCellSpecification

/// Style class of one formatted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumRunStyle {
    /// Column data style.
    #[default]
    Base,
    /// Bold variant of the column data style.
    Emphasized,
}

/// One `(text, style)` segment of a rich cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFormattedRun {
    /// Segment text, including any separator it carries.
    pub text: String,
    /// Segment style.
    pub style: EnumRunStyle,
}

impl SpecFormattedRun {
    /// Base-style run.
    pub fn base(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: EnumRunStyle::Base,
        }
    }

    /// Emphasized run.
    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: EnumRunStyle::Emphasized,
        }
    }
}

/// Rendered content of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecCellContent {
    /// Single string in one style.
    Plain {
        /// Cell text.
        text: String,
        /// Cell style.
        style: EnumRunStyle,
    },
    /// Runs concatenated left to right.
    Rich(Vec<SpecFormattedRun>),
}

impl SpecCellContent {
    /// Plain base-style cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain {
            text: text.into(),
            style: EnumRunStyle::Base,
        }
    }

    /// Concatenated display text.
    pub fn text(&self) -> String {
        match self {
            Self::Plain { text, .. } => text.clone(),
            Self::Rich(runs) => runs.iter().map(|run| run.text.as_str()).collect(),
        }
    }

    /// Whether the sink needs the rich-string write path.
    pub fn is_rich(&self) -> bool {
        matches!(self, Self::Rich(_))
    }
}

/// Parameters cell plus the names later matched inside the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecParameterSegments {
    /// Parameters cell content.
    pub cell: SpecCellContent,
    /// Parameter name set (full names and their words, first occurrence order).
    pub names: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteOptions

/// Options for one full workbook generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecWorkbookOptions {
    /// Directory scanned for source databases.
    pub dir_sources: PathBuf,
    /// Glob matched against source file names.
    pub pattern_source_files: String,
    /// Style configuration file.
    pub path_file_styles: PathBuf,
    /// Workbook output file.
    pub path_file_out: PathBuf,
    /// Parameter separator compaction threshold (characters).
    pub param_wrap_threshold: usize,
    /// Header row height in points.
    pub height_header_row: f64,
    /// Frozen rows.
    pub row_freeze: u32,
    /// Frozen columns.
    pub col_freeze: u16,
}

impl Default for SpecWorkbookOptions {
    fn default() -> Self {
        Self {
            dir_sources: PathBuf::from("."),
            pattern_source_files: C_SOURCE_FILE_PATTERN.to_string(),
            path_file_styles: PathBuf::from(C_FILE_STYLES),
            path_file_out: PathBuf::from(C_FILE_OUT),
            param_wrap_threshold: N_PARAM_WRAP_THRESHOLD,
            height_header_row: N_HEIGHT_HEADER_ROW,
            row_freeze: N_ROW_FREEZE,
            col_freeze: N_COL_FREEZE,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Actual sheet name in the workbook.
    pub sheet_name: String,
    /// Source file of the sheet.
    pub path_source: PathBuf,
    /// Data rows written (header excluded).
    pub cnt_rows: usize,
    /// Cells written through the rich-string path.
    pub cnt_cells_rich: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Whole-run report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecWorkbookReport {
    /// Saved workbook path.
    pub path_file_out: PathBuf,
    /// Sheets in write order.
    pub sheets: Vec<SpecSheetReport>,
}

impl SpecWorkbookReport {
    /// Total data rows across sheets.
    pub fn row_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.cnt_rows).sum()
    }

    /// Total warnings across sheets.
    pub fn warning_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.warnings.len()).sum()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} file={} sheets={} rows={} warnings={}",
            self.path_file_out.display(),
            self.sheets.len(),
            self.row_count(),
            self.warning_count()
        )
    }
}

impl fmt::Display for SpecWorkbookReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[XLSX]"))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_format_merge_prefers_right_side_values() {
        let base = SpecCellFormat {
            font_name: Some("Courier New".to_string()),
            font_size: Some(11.0),
            bold: Some(false),
            ..Default::default()
        };
        let merged = base.with_(SpecCellFormat {
            bold: Some(true),
            text_wrap: Some(true),
            ..Default::default()
        });

        assert_eq!(merged.font_name.as_deref(), Some("Courier New"));
        assert_eq!(merged.font_size, Some(11.0));
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.text_wrap, Some(true));
        assert_eq!(merged.bg_color, None);
    }

    #[test]
    fn cell_content_text_concatenates_runs() {
        let cell = SpecCellContent::Rich(vec![
            SpecFormattedRun::emphasized("u8"),
            SpecFormattedRun::base(":item; "),
            SpecFormattedRun::base("flag"),
        ]);
        assert_eq!(cell.text(), "u8:item; flag");
        assert!(cell.is_rich());
        assert!(!SpecCellContent::plain("").is_rich());
    }

    #[test]
    fn workbook_report_format_summarizes_sheets() {
        let report = SpecWorkbookReport {
            path_file_out: PathBuf::from("out.xlsx"),
            sheets: vec![
                SpecSheetReport {
                    sheet_name: "DP".to_string(),
                    cnt_rows: 3,
                    ..Default::default()
                },
                SpecSheetReport {
                    sheet_name: "Pt".to_string(),
                    cnt_rows: 2,
                    warnings: vec!["w".to_string()],
                    ..Default::default()
                },
            ],
        };

        assert_eq!(
            report.to_string(),
            "[XLSX] file=out.xlsx sheets=2 rows=5 warnings=1"
        );
    }
}

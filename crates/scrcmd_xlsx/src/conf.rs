//! Constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecWorkbookOptions};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Joined parameter text longer than this is concatenated without separators.
pub const N_PARAM_WRAP_THRESHOLD: usize = 50;
/// Separator between parameters in the Parameters cell.
pub const C_PARAM_SEPARATOR: &str = "; ";
/// Trailing characters ignored when comparing a description span to a name.
pub const TUP_TRAILING_PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

/// Source file name suffix stripped before alias lookup.
pub const C_SOURCE_STEM_SUFFIX: &str = "_scrcmd_database";
/// Glob selecting source databases by file name.
pub const C_SOURCE_FILE_PATTERN: &str = "*_scrcmd_database.json";
/// Top-level key holding the command table inside a source document.
pub const C_SOURCE_COMMAND_KEY: &str = "scrcmd";
/// Fixed source-stem to sheet-name aliases; unlisted stems are upper-cased.
pub const TUP_SOURCE_ALIASES: [(&str, &str); 3] = [
    ("diamond_pearl", "DP"),
    ("platinum", "Pt"),
    ("hgss", "HGSS"),
];

/// Default style configuration file.
pub const C_FILE_STYLES: &str = "styles.json";
/// Default workbook output file.
pub const C_FILE_OUT: &str = "scrcmd_commands.xlsx";

/// Number of written columns.
pub const N_NCOLS_SHEET: u16 = 5;
/// 1-based column holding the parameter list.
pub const N_COL_PARAMETERS: u16 = 4;
/// 1-based column holding the description.
pub const N_COL_DESCRIPTION: u16 = 5;
/// Header titles used when the style table carries no `value`.
pub const TUP_COLUMN_TITLES: [&str; 5] =
    ["Code", "Decomp Name", "Name", "Parameters", "Description"];

/// Header row height in points.
pub const N_HEIGHT_HEADER_ROW: f64 = 30.0;
/// Rows kept visible above the scroll area.
pub const N_ROW_FREEZE: u32 = 1;
/// Columns kept visible left of the scroll area.
pub const N_COL_FREEZE: u16 = 3;

/// Default font family.
pub const C_FONT_NAME_DEFAULT: &str = "Courier New";
/// Default font size in points.
pub const N_FONT_SIZE_DEFAULT: f64 = 11.0;
/// Default fill colour (RGB hex).
pub const C_FILL_DEFAULT: &str = "FFFFFF";
/// Default vertical alignment.
pub const C_VALIGN_DEFAULT: &str = "top";
/// Border style applied to every written cell (thin).
pub const N_BORDER_DEFAULT: i64 = 1;
/// Border colour applied to every written cell (RGB hex).
pub const C_BORDER_COLOR_DEFAULT: &str = "CCCCCC";

/// Build the base format every resolved style starts from.
pub fn derive_default_cell_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some(C_FONT_NAME_DEFAULT.to_string()),
        font_size: Some(N_FONT_SIZE_DEFAULT),
        bold: Some(false),
        italic: Some(false),
        align: Some("left".to_string()),
        valign: Some(C_VALIGN_DEFAULT.to_string()),
        border: Some(N_BORDER_DEFAULT),
        border_color: Some(C_BORDER_COLOR_DEFAULT.to_string()),
        text_wrap: Some(false),
        bg_color: Some(C_FILL_DEFAULT.to_string()),
    }
}

/// Build default workbook options.
pub fn derive_default_workbook_options() -> SpecWorkbookOptions {
    SpecWorkbookOptions::default()
}

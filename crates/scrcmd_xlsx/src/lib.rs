//! `scrcmd_xlsx` v1:
//! Script-command database to XLSX workbook renderer.
//!
//! Module layout:
//! - `conf`     : constants and default presets
//! - `spec`     : specs/models/options/reports
//! - `error`    : top-level error type
//! - `style`    : style table loading and per-column style resolution
//! - `params`   : Parameters cell segmentation and parameter-name extraction
//! - `describe` : parameter-name highlighting inside descriptions
//! - `source`   : source discovery, naming and loading
//! - `util`     : pure helper functions
//! - `writer`   : sheet assembly and workbook writer kernel
pub mod conf;
pub mod describe;
pub mod error;
pub mod params;
pub mod source;
pub mod spec;
pub mod style;
pub mod util;
pub mod writer;

pub use conf::{
    C_FILE_OUT, C_FILE_STYLES, C_SOURCE_FILE_PATTERN, N_PARAM_WRAP_THRESHOLD,
    TUP_SOURCE_ALIASES,
};
pub use describe::{highlight_description, plan_name_candidates};
pub use error::{Result, ScrcmdXlsxError};
pub use params::{derive_parameter_separator, extract_parameter_names, segment_parameters};
pub use source::{
    derive_opcode_code, derive_source_code, discover_source_files, load_source_table,
    parse_source_table,
};
pub use spec::{
    EnumRunStyle, EnumStyleSection, SpecCellContent, SpecCellFormat, SpecCommandRecord,
    SpecFormattedRun, SpecParameterSegments, SpecSheetReport, SpecSourceTable, SpecStyleEntry,
    SpecStyleTable, SpecWorkbookOptions, SpecWorkbookReport,
};
pub use style::{StyleResolver, load_style_table, parse_style_table};
pub use writer::{XlsxWriter, generate_workbook, render_record};

//! Sheet assembly and the workbook writer kernel.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::conf::{N_COL_DESCRIPTION, N_COL_PARAMETERS, N_NCOLS_SHEET, TUP_COLUMN_TITLES};
use crate::describe::highlight_description;
use crate::error::{Result, ScrcmdXlsxError};
use crate::params::segment_parameters;
use crate::source::{discover_source_files, load_source_table};
use crate::spec::{
    EnumRunStyle, EnumStyleSection, SpecCellContent, SpecCellFormat, SpecCommandRecord,
    SpecSheetReport, SpecSourceTable, SpecWorkbookOptions, SpecWorkbookReport,
};
use crate::style::{StyleResolver, load_style_table};
use crate::util::{
    create_sheet_identifier, is_merge_covered, plan_header_merges, sanitize_sheet_name,
};

////////////////////////////////////////////////////////////////////////////////
// #region RecordRendering

/// Render one record into its five cells: code, decomp name, name, parameters,
/// description.
pub fn render_record(
    record: &SpecCommandRecord,
    param_wrap_threshold: usize,
) -> Vec<SpecCellContent> {
    let segments = segment_parameters(&record.parameter_values, param_wrap_threshold);
    let cell_description = highlight_description(&record.description, &segments.names);

    vec![
        SpecCellContent::plain(record.code.as_str()),
        SpecCellContent::plain(record.decomp_name.as_str()),
        SpecCellContent::plain(record.name.as_str()),
        segments.cell,
        cell_description,
    ]
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FormatCache

/// Formats resolved once per writer, indexed by zero-based column.
struct SpecSheetFormats {
    header: Vec<Format>,
    data: Vec<Format>,
    emphasis: Vec<Format>,
}

impl SpecSheetFormats {
    fn new(resolver: &StyleResolver) -> Self {
        Self {
            header: derive_column_formats(|n_col| {
                resolver.resolve(EnumStyleSection::Header, n_col)
            }),
            data: derive_column_formats(|n_col| resolver.resolve(EnumStyleSection::Data, n_col)),
            emphasis: derive_column_formats(|n_col| resolver.resolve_emphasis(n_col)),
        }
    }

    fn select(&self, n_idx_col: usize, style: EnumRunStyle) -> &Format {
        match style {
            EnumRunStyle::Base => &self.data[n_idx_col],
            EnumRunStyle::Emphasized => &self.emphasis[n_idx_col],
        }
    }
}

fn derive_column_formats(resolve: impl Fn(u16) -> SpecCellFormat) -> Vec<Format> {
    (1..=N_NCOLS_SHEET)
        .map(|n_col| derive_rust_xlsx_format(&resolve(n_col)))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Writer

/// Stateful workbook writer: one worksheet per source table.
pub struct XlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    resolver: StyleResolver,
    formats: SpecSheetFormats,
    options: SpecWorkbookOptions,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecSheetReport>,
    if_closed: bool,
}

impl XlsxWriter {
    /// Create writer bound to output path, style table and options.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        resolver: StyleResolver,
        options: SpecWorkbookOptions,
    ) -> Self {
        let formats = SpecSheetFormats::new(&resolver);
        Self {
            path_file_out,
            workbook: Workbook::new(),
            resolver,
            formats,
            options,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecSheetReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        log::info!("saved workbook {}", self.path_file_out.display());
        Ok(())
    }

    /// Serialize the workbook without touching the output path.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Write one source table as one worksheet.
    pub fn write_source_table(&mut self, table: &SpecSourceTable) -> Result<()> {
        if self.if_closed {
            return Err(ScrcmdXlsxError::WriterClosed);
        }

        let mut report = SpecSheetReport {
            path_source: table.path_source.clone(),
            ..Default::default()
        };

        let c_sheet_name_safe = sanitize_sheet_name(&table.code, "_");
        if c_sheet_name_safe != table.code {
            report.warn(format!(
                "Sheet name {:?} sanitized to {c_sheet_name_safe:?}.",
                table.code
            ));
        }
        let sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_safe);
        if sheet_name_unique != c_sheet_name_safe {
            report.warn(format!(
                "Sheet name {c_sheet_name_safe:?} already used; renamed to {sheet_name_unique:?}."
            ));
        }

        let l_titles: Vec<String> = (1..=N_NCOLS_SHEET)
            .zip(TUP_COLUMN_TITLES)
            .map(|(n_col, c_title)| self.resolver.header_title(n_col, c_title))
            .collect();
        let n_threshold = self.options.param_wrap_threshold;

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        for (n_col, n_width) in self.resolver.column_widths() {
            let Some(n_idx_col) = n_col.checked_sub(1) else {
                continue;
            };
            worksheet.set_column_width(n_idx_col, n_width)?;
        }
        worksheet.set_row_height(0, self.options.height_header_row)?;

        write_header(worksheet, &l_titles, &self.formats.header)?;

        worksheet.set_freeze_panes(self.options.row_freeze, self.options.col_freeze)?;

        for (n_idx_record, record) in table.records.iter().enumerate() {
            let n_row = cast_row_num(n_idx_record + 1)?;
            for (n_idx_col, cell) in render_record(record, n_threshold).iter().enumerate() {
                if cell.is_rich() {
                    report.cnt_cells_rich += 1;
                }
                write_cell_content(worksheet, n_row, n_idx_col, cell, &self.formats)?;
            }
            report.cnt_rows += 1;
        }

        log::info!(
            "wrote sheet {sheet_name_unique:?} from {}: {} row(s), {} rich cell(s)",
            table.path_source.display(),
            report.cnt_rows,
            report.cnt_cells_rich
        );
        for c_warning in &report.warnings {
            log::warn!("{c_warning}");
        }

        report.sheet_name = sheet_name_unique;
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str) -> String {
        // Excel compares sheet names case-insensitively.
        if self.set_sheet_names_existing.insert(name.to_lowercase()) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if self.set_sheet_names_existing.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Run the whole pipeline: discover sources, load styles, write, save.
pub fn generate_workbook(options: &SpecWorkbookOptions) -> Result<SpecWorkbookReport> {
    let l_paths = discover_source_files(&options.dir_sources, &options.pattern_source_files)?;
    if l_paths.is_empty() {
        return Err(ScrcmdXlsxError::NoSources {
            dir: options.dir_sources.clone(),
            pattern: options.pattern_source_files.clone(),
        });
    }

    let resolver = StyleResolver::new(load_style_table(&options.path_file_styles)?);
    let mut writer = XlsxWriter::new(options.path_file_out.clone(), resolver, options.clone());

    for path in &l_paths {
        let table = load_source_table(path)?;
        writer.write_source_table(&table)?;
    }
    writer.close()?;

    Ok(SpecWorkbookReport {
        path_file_out: options.path_file_out.clone(),
        sheets: writer.report(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SinkHelpers

fn write_header(worksheet: &mut Worksheet, titles: &[String], formats: &[Format]) -> Result<()> {
    let l_merges = plan_header_merges(titles);

    for (n_idx_col, c_title) in titles.iter().enumerate() {
        if is_merge_covered(&l_merges, n_idx_col) {
            continue;
        }
        let n_col = cast_col_num(n_idx_col)?;
        if c_title.is_empty() {
            worksheet.write_blank(0, n_col, &formats[n_idx_col])?;
        } else {
            worksheet.write_string_with_format(0, n_col, c_title, &formats[n_idx_col])?;
        }
    }

    for merge in &l_merges {
        worksheet.merge_range(
            0,
            cast_col_num(merge.col_idx_start)?,
            0,
            cast_col_num(merge.col_idx_end)?,
            &merge.text,
            &formats[merge.col_idx_start],
        )?;
    }

    Ok(())
}

fn write_cell_content(
    worksheet: &mut Worksheet,
    row: u32,
    n_idx_col: usize,
    cell: &SpecCellContent,
    formats: &SpecSheetFormats,
) -> Result<()> {
    let n_col = cast_col_num(n_idx_col)?;
    let fmt_cell = formats.select(n_idx_col, EnumRunStyle::Base);

    match cell {
        SpecCellContent::Plain { text, style } => {
            let fmt_plain = formats.select(n_idx_col, *style);
            if text.is_empty() {
                worksheet.write_blank(row, n_col, fmt_plain)?;
            } else {
                worksheet.write_string_with_format(row, n_col, text, fmt_plain)?;
            }
        }
        SpecCellContent::Rich(runs) => {
            // The sink rejects empty segments.
            let l_segments: Vec<(&Format, &str)> = runs
                .iter()
                .filter(|run| !run.text.is_empty())
                .map(|run| (formats.select(n_idx_col, run.style), run.text.as_str()))
                .collect();
            if l_segments.is_empty() {
                worksheet.write_blank(row, n_col, fmt_cell)?;
            } else {
                worksheet.write_rich_string_with_format(row, n_col, &l_segments, fmt_cell)?;
            }
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_valign(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color
        && let Some(color) = derive_color(val)
    {
        format = format.set_background_color(color);
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = &spec.border_color
        && let Some(color) = derive_color(val)
    {
        format = format.set_border_color(color);
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_color(hex: &str) -> Option<Color> {
    u32::from_str_radix(hex.trim_start_matches('#'), 16)
        .ok()
        .map(Color::RGB)
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" | "centre" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" | "centercontinuous" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        _ => None,
    }
}

fn derive_format_valign(valign: &str) -> Option<FormatAlign> {
    let value = valign.trim().to_ascii_lowercase();
    match value.as_str() {
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "center" | "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        "justify" | "vjustify" => Some(FormatAlign::VerticalJustify),
        "distributed" | "vdistributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| ScrcmdXlsxError::IndexOverflow { axis: "row", value })
}

fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| ScrcmdXlsxError::IndexOverflow {
        axis: "column",
        value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

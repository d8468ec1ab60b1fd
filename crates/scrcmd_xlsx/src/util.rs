//! Stateless helper utilities shared by the renderers and the writer.

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL, TUP_TRAILING_PUNCTUATION};
use crate::spec::SpecHeaderMerge;

////////////////////////////////////////////////////////////////////////////////
// #region TextUtils

/// Strip trailing `. , ; : ! ?` characters.
pub fn trim_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(TUP_TRAILING_PUNCTUATION)
}

/// Append `value` unless already present, keeping first-occurrence order.
pub fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base__2`, `base__3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, n_idx: usize) -> String {
    let c_sheet_name_suffix = format!("__{n_idx}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region HeaderMergeUtils

/// Plan horizontal merges for runs of repeated non-empty header titles.
pub fn plan_header_merges(titles: &[String]) -> Vec<SpecHeaderMerge> {
    let mut l_merges = Vec::new();
    let n_cols = titles.len();
    let mut n_col_idx = 0;

    while n_col_idx < n_cols {
        let c_title = &titles[n_col_idx];
        if c_title.is_empty() {
            n_col_idx += 1;
            continue;
        }

        let mut n_col_idx_end = n_col_idx + 1;
        while n_col_idx_end < n_cols && titles[n_col_idx_end] == *c_title {
            n_col_idx_end += 1;
        }

        if n_col_idx_end - n_col_idx > 1 {
            l_merges.push(SpecHeaderMerge {
                col_idx_start: n_col_idx,
                col_idx_end: n_col_idx_end - 1,
                text: c_title.clone(),
            });
        }
        n_col_idx = n_col_idx_end;
    }

    l_merges
}

/// Whether `col_idx` is covered by a merge without being its anchor cell.
pub fn is_merge_covered(merges: &[SpecHeaderMerge], col_idx: usize) -> bool {
    merges
        .iter()
        .any(|merge| col_idx > merge.col_idx_start && col_idx <= merge.col_idx_end)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

//! Parameter list segmentation for the Parameters cell.

use crate::conf::C_PARAM_SEPARATOR;
use crate::spec::{SpecCellContent, SpecFormattedRun, SpecParameterSegments};
use crate::util::push_unique;

/// Separator placed between parameters.
///
/// `"; "` while the `"; "`-joined text fits in `threshold` characters, nothing
/// otherwise.
pub fn derive_parameter_separator<S: AsRef<str>>(params: &[S], threshold: usize) -> &'static str {
    let n_len_joined = params
        .iter()
        .map(|param| param.as_ref().chars().count())
        .sum::<usize>()
        + C_PARAM_SEPARATOR.chars().count() * params.len().saturating_sub(1);

    if n_len_joined <= threshold {
        C_PARAM_SEPARATOR
    } else {
        ""
    }
}

/// Split `type:name` parameters into emphasized type tokens and base remainders.
///
/// The first `:` splits a parameter; one without `:` stays a single base run.
/// Runs carry the separator chosen by [`derive_parameter_separator`], so the
/// concatenated cell text always equals the joined parameter text. The cell is
/// rich as soon as one parameter contains `:`, plain otherwise.
pub fn segment_parameters<S: AsRef<str>>(params: &[S], threshold: usize) -> SpecParameterSegments {
    let c_sep = derive_parameter_separator(params, threshold);
    let n_params = params.len();

    let mut l_runs = Vec::with_capacity(n_params * 2);
    let mut l_names = Vec::new();
    let mut if_typed = false;

    for (n_idx, param) in params.iter().enumerate() {
        let param = param.as_ref();
        let c_sep_after = if n_idx + 1 < n_params { c_sep } else { "" };

        match param.split_once(':') {
            Some((c_type, c_rest)) => {
                if_typed = true;
                if !c_type.is_empty() {
                    l_runs.push(SpecFormattedRun::emphasized(c_type));
                }
                l_runs.push(SpecFormattedRun::base(format!(":{c_rest}{c_sep_after}")));
                register_parameter_name(&mut l_names, c_rest);
            }
            None => {
                let c_text = format!("{param}{c_sep_after}");
                if !c_text.is_empty() {
                    l_runs.push(SpecFormattedRun::base(c_text));
                }
            }
        }
    }

    SpecParameterSegments {
        cell: collapse_runs(l_runs, if_typed),
        names: l_names,
    }
}

/// Extract the parameter name set without building runs.
pub fn extract_parameter_names<S: AsRef<str>>(params: &[S]) -> Vec<String> {
    let mut l_names = Vec::new();
    for param in params {
        if let Some((_, c_rest)) = param.as_ref().split_once(':') {
            register_parameter_name(&mut l_names, c_rest);
        }
    }
    l_names
}

fn register_parameter_name(names: &mut Vec<String>, c_rest: &str) {
    let c_name = c_rest.trim();
    if c_name.is_empty() {
        return;
    }
    push_unique(names, c_name);
    for c_word in c_name.split_whitespace() {
        push_unique(names, c_word);
    }
}

fn collapse_runs(runs: Vec<SpecFormattedRun>, if_typed: bool) -> SpecCellContent {
    if !if_typed {
        let c_text: String = runs.iter().map(|run| run.text.as_str()).collect();
        return SpecCellContent::plain(c_text);
    }
    SpecCellContent::Rich(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::N_PARAM_WRAP_THRESHOLD;
    use crate::spec::EnumRunStyle;

    #[test]
    fn empty_parameter_list_yields_plain_empty_cell() {
        let segments = segment_parameters::<&str>(&[], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(segments.cell, SpecCellContent::plain(""));
        assert!(segments.names.is_empty());
    }

    #[test]
    fn bare_parameters_render_as_one_plain_joined_cell() {
        let segments = segment_parameters(&["var", "flag", "value"], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(segments.cell, SpecCellContent::plain("var; flag; value"));
        assert!(segments.names.is_empty());
    }

    #[test]
    fn single_bare_parameter_is_plain() {
        let segments = segment_parameters(&["var"], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(segments.cell, SpecCellContent::plain("var"));
    }

    #[test]
    fn typed_parameters_emphasize_type_tokens() {
        let segments = segment_parameters(&["u8:item index", "u16:count"], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(
            segments.cell,
            SpecCellContent::Rich(vec![
                SpecFormattedRun::emphasized("u8"),
                SpecFormattedRun::base(":item index; "),
                SpecFormattedRun::emphasized("u16"),
                SpecFormattedRun::base(":count"),
            ])
        );
        assert_eq!(segments.cell.text(), "u8:item index; u16:count");
        assert_eq!(segments.names, vec!["item index", "item", "index", "count"]);
    }

    #[test]
    fn mixed_parameters_keep_bare_entries_in_base_style() {
        let segments = segment_parameters(&["var", "u16:flag id"], N_PARAM_WRAP_THRESHOLD);
        let SpecCellContent::Rich(runs) = &segments.cell else {
            panic!("expected rich cell");
        };
        assert_eq!(runs[0], SpecFormattedRun::base("var; "));
        assert_eq!(runs[1], SpecFormattedRun::emphasized("u16"));
        assert_eq!(runs[2], SpecFormattedRun::base(":flag id"));
        assert_eq!(segments.names, vec!["flag id", "flag", "id"]);
    }

    #[test]
    fn split_happens_on_first_colon_only() {
        let segments = segment_parameters(&["u32:ptr:target"], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(
            segments.cell,
            SpecCellContent::Rich(vec![
                SpecFormattedRun::emphasized("u32"),
                SpecFormattedRun::base(":ptr:target"),
            ])
        );
        assert_eq!(segments.names, vec!["ptr:target"]);
    }

    #[test]
    fn joined_text_at_threshold_keeps_separators() {
        // 24 + 2 + 24 = 50 characters joined.
        let params = ["a".repeat(24), "b".repeat(24)];
        assert_eq!(derive_parameter_separator(&params, N_PARAM_WRAP_THRESHOLD), "; ");
        let segments = segment_parameters(&params, N_PARAM_WRAP_THRESHOLD);
        assert_eq!(segments.cell.text().chars().count(), 50);
    }

    #[test]
    fn joined_text_over_threshold_drops_separators() {
        // 25 + 2 + 24 = 51 characters joined.
        let params = ["u8:".to_string() + &"a".repeat(22), "b".repeat(24)];
        assert_eq!(derive_parameter_separator(&params, N_PARAM_WRAP_THRESHOLD), "");

        let segments = segment_parameters(&params, N_PARAM_WRAP_THRESHOLD);
        assert!(segments.cell.is_rich());
        assert_eq!(segments.cell.text(), params.concat());
    }

    #[test]
    fn bare_parameters_over_threshold_concatenate_into_plain_cell() {
        let params = ["x".repeat(30), "y".repeat(30)];
        let segments = segment_parameters(&params, N_PARAM_WRAP_THRESHOLD);
        assert_eq!(segments.cell, SpecCellContent::plain(params.concat()));
    }

    #[test]
    fn threshold_counts_characters_not_bytes() {
        let params = ["é".repeat(24), "ü".repeat(24)];
        assert_eq!(derive_parameter_separator(&params, N_PARAM_WRAP_THRESHOLD), "; ");
    }

    #[test]
    fn empty_type_token_is_not_emitted() {
        let segments = segment_parameters(&[":value"], N_PARAM_WRAP_THRESHOLD);
        assert_eq!(
            segments.cell,
            SpecCellContent::Rich(vec![SpecFormattedRun::base(":value")])
        );
        assert_eq!(segments.names, vec!["value"]);
    }

    #[test]
    fn name_extraction_is_order_preserving_and_idempotent() {
        let params = ["u8:item index", "u16:count", "u8:item", "var"];
        let l_names = extract_parameter_names(&params);
        assert_eq!(l_names, vec!["item index", "item", "index", "count"]);
        assert_eq!(extract_parameter_names(&params), l_names);
        assert_eq!(
            segment_parameters(&params, N_PARAM_WRAP_THRESHOLD).names,
            l_names
        );
    }

    #[test]
    fn blank_names_are_skipped() {
        assert!(extract_parameter_names(&["u8:", "u8:   "]).is_empty());
    }

    #[test]
    fn type_tokens_are_the_only_emphasized_runs() {
        let segments = segment_parameters(&["u8:a", "b", "u16:c"], N_PARAM_WRAP_THRESHOLD);
        let SpecCellContent::Rich(runs) = segments.cell else {
            panic!("expected rich cell");
        };
        let l_emphasized: Vec<&str> = runs
            .iter()
            .filter(|run| run.style == EnumRunStyle::Emphasized)
            .map(|run| run.text.as_str())
            .collect();
        assert_eq!(l_emphasized, vec!["u8", "u16"]);
    }
}

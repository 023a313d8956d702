//! Property-based tests for batch edit application
//!
//! The single-pass application must agree with the straightforward
//! back-to-front splice for every non-overlapping batch.

use modelica_transformer::{apply_edits, Edit};
use proptest::prelude::*;

/// Reference: stable sort by start (zero-width edits first on ties), then
/// apply from the last edit to the first, each removing its range and
/// inserting its text at its start.
fn naive_apply(source: &str, edits: &[Edit]) -> String {
    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.byte_start, !e.is_insertion()));

    let mut document = source.to_string();
    for edit in ordered.into_iter().rev() {
        document.replace_range(edit.byte_start..edit.byte_end, "");
        if let Some(text) = &edit.new_text {
            document.insert_str(edit.byte_start, text);
        }
    }
    document
}

/// Lay edits out left to right so that none overlap.
fn layout(source: &str, plan: &[(usize, usize, u8, String)]) -> Vec<Edit> {
    let mut edits = Vec::new();
    let mut pos = 0;
    for (gap, len, kind, text) in plan {
        pos += gap;
        if pos > source.len() {
            break;
        }
        let end = (pos + len).min(source.len());
        let edit = match kind % 3 {
            0 => Edit::new(pos, end, None, &source[pos..end]),
            1 => Edit::new(pos, end, Some(text.clone()), &source[pos..end]),
            _ => Edit::new(pos, pos, Some(text.clone()), ""),
        };
        pos = edit.byte_end;
        edits.push(edit);
    }
    edits
}

fn source_strategy() -> impl Strategy<Value = String> {
    "[a-z ;=()]{0,80}"
}

fn plan_strategy(min_gap: usize) -> impl Strategy<Value = Vec<(usize, usize, u8, String)>> {
    prop::collection::vec(
        (min_gap..6usize, 0..5usize, any::<u8>(), "[A-Z0-9]{0,4}"),
        0..12,
    )
}

proptest! {
    #[test]
    fn linear_apply_matches_naive(source in source_strategy(), plan in plan_strategy(0)) {
        let edits = layout(&source, &plan);
        let linear = apply_edits(&source, &edits).unwrap();
        prop_assert_eq!(linear, naive_apply(&source, &edits));
    }

    #[test]
    fn disjoint_edits_are_order_independent(
        source in source_strategy(),
        plan in plan_strategy(1),
        rotate in 0..12usize,
    ) {
        let edits = layout(&source, &plan);
        let expected = apply_edits(&source, &edits).unwrap();

        let mut reversed = edits.clone();
        reversed.reverse();
        prop_assert_eq!(&apply_edits(&source, &reversed).unwrap(), &expected);

        let mut rotated = edits.clone();
        if !rotated.is_empty() {
            let by = rotate % rotated.len();
            rotated.rotate_left(by);
        }
        prop_assert_eq!(&apply_edits(&source, &rotated).unwrap(), &expected);
    }

    #[test]
    fn no_edits_is_identity(source in source_strategy()) {
        prop_assert_eq!(apply_edits(&source, &[]).unwrap(), source);
    }

    #[test]
    fn replacing_with_same_text_is_identity(source in source_strategy(), plan in plan_strategy(1)) {
        let edits: Vec<Edit> = layout(&source, &plan)
            .into_iter()
            .map(|e| {
                let same = source[e.byte_start..e.byte_end].to_string();
                Edit::new(e.byte_start, e.byte_end, Some(same.clone()), same)
            })
            .collect();
        prop_assert_eq!(apply_edits(&source, &edits).unwrap(), source);
    }
}

//! Option filtering for the dropdown search box
//!
//! Matching is a case-insensitive substring test against an option's `text`.
//! Groups without a single matching option drop out; everything else keeps
//! its original order.
//!
//! The widget stores the result as a [`FilterIndex`] (positions into the
//! model) so the filtered view always shows the current selection flags
//! without re-running the query. [`filter`] materializes the same result as
//! plain optgroups.

use crate::data::{Optgroup, SelectOption};

/// Positions of matching options, grouped by optgroup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterIndex {
    groups: Vec<(usize, Vec<usize>)>,
}

impl FilterIndex {
    /// Index that keeps every group and option
    #[must_use]
    pub fn identity(groups: &[Optgroup]) -> Self {
        Self {
            groups: groups
                .iter()
                .enumerate()
                .map(|(g, group)| (g, (0..group.options.len()).collect()))
                .collect(),
        }
    }

    /// Index of options whose text contains `query`
    #[must_use]
    pub fn build(groups: &[Optgroup], query: &str) -> Self {
        if is_blank(query) {
            return Self::identity(groups);
        }

        let needle = query.to_lowercase();
        let groups = groups
            .iter()
            .enumerate()
            .filter_map(|(g, group)| {
                let hits: Vec<usize> = group
                    .options
                    .iter()
                    .enumerate()
                    .filter(|(_, option)| text_matches(option, &needle))
                    .map(|(o, _)| o)
                    .collect();
                (!hits.is_empty()).then_some((g, hits))
            })
            .collect();
        Self { groups }
    }

    /// Number of options that survived the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, hits)| hits.len()).sum()
    }

    /// Check whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the index against the groups it was built from
    ///
    /// Positions that no longer exist are skipped.
    #[must_use]
    pub fn materialize(&self, groups: &[Optgroup]) -> Vec<Optgroup> {
        self.groups
            .iter()
            .filter_map(|(g, hits)| {
                let group = groups.get(*g)?;
                let options: Vec<SelectOption> = hits
                    .iter()
                    .filter_map(|&o| group.options.get(o).cloned())
                    .collect();
                Some(Optgroup {
                    label: group.label.clone(),
                    disabled: group.disabled,
                    options,
                })
            })
            .collect()
    }
}

/// Filter `groups` by `query`
///
/// An empty or whitespace-only query returns the groups unchanged.
#[must_use]
pub fn filter(groups: &[Optgroup], query: &str) -> Vec<Optgroup> {
    FilterIndex::build(groups, query).materialize(groups)
}

/// Queries that do not filter anything
#[must_use]
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

fn text_matches(option: &SelectOption, needle: &str) -> bool {
    option.text.to_lowercase().contains(needle)
}

/// Extension trait adding search to option group collections
pub trait OptgroupFilterExt {
    /// Filter groups by a search query
    fn filter_query(&self, query: &str) -> Vec<Optgroup>;
}

impl OptgroupFilterExt for [Optgroup] {
    fn filter_query(&self, query: &str) -> Vec<Optgroup> {
        filter(self, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn colors() -> Vec<Optgroup> {
        vec![Optgroup::implicit(vec![
            SelectOption::new("red", "Red"),
            SelectOption::new("green", "Green"),
            SelectOption::new("blue", "Blue"),
        ])]
    }

    fn texts(groups: &[Optgroup]) -> Vec<&str> {
        groups
            .iter()
            .flat_map(|g| g.options.iter().map(|o| o.text.as_str()))
            .collect()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let filtered = filter(&colors(), "re");
        assert_eq!(texts(&filtered), vec!["Red", "Green"]);

        let filtered = filter(&colors(), "RE");
        assert_eq!(texts(&filtered), vec!["Red", "Green"]);
    }

    #[test]
    fn test_empty_query_is_identity() {
        let groups = colors();
        assert_eq!(filter(&groups, ""), groups);
        assert_eq!(filter(&groups, "   "), groups);
    }

    #[test]
    fn test_groups_without_matches_are_dropped() {
        let groups = vec![
            Optgroup::new("Warm", vec![SelectOption::new("r", "Red"), SelectOption::new("o", "Orange")]),
            Optgroup::new("Cold", vec![SelectOption::new("b", "Blue")]),
            Optgroup::new("Other", vec![SelectOption::new("g", "Grey"), SelectOption::new("w", "White")]),
        ];
        let filtered = groups.filter_query("e");
        let labels: Vec<&str> = filtered.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Warm", "Cold", "Other"]);
        assert_eq!(texts(&filtered), vec!["Red", "Orange", "Blue", "Grey", "White"]);

        let filtered = groups.filter_query("bl");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].label, "Cold");
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let index = FilterIndex::build(&colors(), "purple");
        assert!(index.is_empty());
        assert!(index.materialize(&colors()).is_empty());
    }

    #[test]
    fn test_index_sees_later_flag_changes() {
        let mut groups = colors();
        let index = FilterIndex::build(&groups, "green");
        groups[0].options[1].selected = true;
        let view = index.materialize(&groups);
        assert!(view[0].options[0].selected);
    }

    fn arb_groups() -> impl Strategy<Value = Vec<Optgroup>> {
        prop::collection::vec(
            ("[a-z]{0,4}", prop::collection::vec("[a-zA-Z ]{0,6}", 0..5)),
            0..4,
        )
        .prop_map(|groups| {
            groups
                .into_iter()
                .map(|(label, texts)| {
                    let options = texts
                        .into_iter()
                        .enumerate()
                        .map(|(i, text)| SelectOption::new(format!("{label}{i}"), text))
                        .collect();
                    Optgroup::new(label, options)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(groups in arb_groups(), query in "[a-zA-Z]{0,3}") {
            let once = filter(&groups, &query);
            let twice = filter(&once, &query);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_empty_query_is_identity(groups in arb_groups()) {
            prop_assert_eq!(filter(&groups, ""), groups);
        }

        #[test]
        fn prop_every_kept_option_matches(groups in arb_groups(), query in "[a-z]{1,2}") {
            for option in filter(&groups, &query).iter().flat_map(|g| g.options.iter()) {
                prop_assert!(option.text.to_lowercase().contains(&query));
            }
        }
    }
}

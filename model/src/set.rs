use std::slice;

use crate::{Filter, LogicExpression};

/// An ordered collection of filters.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self {
            filters: Default::default(),
        }
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Splits every filter whose only condition is a `has_word` disjunction
    /// into one filter per clause, then sorts the result.
    ///
    /// Filters with any other condition set pass through untouched. A filter
    /// with no condition at all, including a `has_word` that renders empty,
    /// produces no row, and neither does a blank clause.
    pub fn expand(&self) -> FilterSet {
        let mut filters = Vec::with_capacity(self.filters.len());

        for filter in &self.filters {
            if filter.r#match.is_empty() {
                tracing::debug!("Dropping filter without conditions.");
                continue;
            }

            if !filter.r#match.has_only_word() {
                filters.push(filter.clone());
                continue;
            }

            tracing::debug!(
                clauses = filter.r#match.has_word.len(),
                "Expanding {:?}.",
                filter.r#match.has_word.render(),
            );

            for clause in filter.r#match.has_word.clauses() {
                if clause.is_empty() {
                    continue;
                }

                let mut single = filter.clone();

                single.r#match.has_word = LogicExpression::single(clause.as_str());
                filters.push(single);
            }
        }

        filters.sort();

        tracing::info!("Expanded {} filters into {}.", self.filters.len(), filters.len());

        FilterSet { filters }
    }

    /// Merging redundant adjacent filters is not supported yet; the set is
    /// returned unchanged.
    pub fn compact(self) -> FilterSet {
        tracing::debug!("Compaction is not implemented, keeping {} filters.", self.filters.len());

        self
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<T: IntoIterator<Item = Filter>>(iter: T) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FilterSet {
    type IntoIter = std::vec::IntoIter<Filter>;
    type Item = Filter;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}

impl<'s> IntoIterator for &'s FilterSet {
    type IntoIter = slice::Iter<'s, Filter>;
    type Item = &'s Filter;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Actions, Match};

    fn filter(r#match: Match, label: &str) -> Filter {
        Filter::new(r#match, Actions::default().with_label(label))
    }

    fn has_word(raw: &str) -> Match {
        Match {
            has_word: LogicExpression::parse(raw),
            ..Default::default()
        }
    }

    #[test]
    fn splits_sole_has_word() {
        let set: FilterSet = [filter(has_word("c OR a OR b"), "x")].into_iter().collect();
        let expanded = set.expand();
        let clauses: Vec<_> = expanded
            .iter()
            .map(|f| f.r#match.has_word.clauses().to_vec())
            .collect();

        assert_eq!(clauses, vec![vec!["a"], vec!["b"], vec!["c"]]);
        assert!(expanded.iter().all(|f| f.actions.labels() == ["x"]));
    }

    #[test]
    fn other_conditions_block_expansion() {
        let conditions = [
            Match {
                from: "me".to_owned(),
                ..has_word("a OR b")
            },
            Match {
                to: "me".to_owned(),
                ..has_word("a OR b")
            },
            Match {
                subject: "hi".to_owned(),
                ..has_word("a OR b")
            },
            Match {
                not_have_word: "spam".to_owned(),
                ..has_word("a OR b")
            },
        ];

        for condition in conditions {
            let set: FilterSet = [filter(condition.clone(), "x")].into_iter().collect();
            let expanded = set.expand();

            assert_eq!(expanded.len(), 1);
            assert_eq!(expanded.filters()[0].r#match, condition);
        }
    }

    #[test]
    fn no_condition_produces_no_rows() {
        let mut set = FilterSet::new();

        set.push(filter(Match::default(), "x"));
        set.push(filter(has_word(""), "y"));

        assert_eq!(set.len(), 2);
        assert!(set.expand().is_empty());
    }

    #[test]
    fn empty_has_word_expands_like_absent_has_word() {
        let mut absent = FilterSet::new();
        let mut blank = FilterSet::new();

        absent.push(filter(Match::default(), "x"));
        blank.push(filter(has_word(""), "x"));

        assert_eq!(blank.expand(), absent.expand());

        let mut blank_with_sender = FilterSet::new();

        blank_with_sender.push(filter(
            Match {
                from: "me".to_owned(),
                ..has_word("")
            },
            "x",
        ));

        assert_eq!(blank_with_sender.expand().len(), 1);
    }

    #[test]
    fn blank_clauses_are_skipped() {
        let set: FilterSet = [filter(has_word("a OR "), "x")].into_iter().collect();
        let expanded = set.expand();

        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded.filters()[0].r#match.has_word.clauses(), ["a"]);
        assert_eq!(expanded.expand(), expanded);
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let a = filter(has_word("one"), "b");
        let b = filter(has_word("two"), "a");
        let forward: FilterSet = [a.clone(), b.clone()].into_iter().collect();
        let backward: FilterSet = [b.clone(), a.clone()].into_iter().collect();

        assert_eq!(forward.expand(), backward.expand());
        assert_eq!(forward.expand().filters(), &[b, a]);
    }

    #[test]
    fn expand_is_idempotent_on_single_clauses() {
        let set: FilterSet = [
            filter(has_word("x OR y OR z"), "a"),
            filter(has_word("w"), "b"),
            filter(
                Match {
                    from: "me".to_owned(),
                    ..has_word("p OR q")
                },
                "c",
            ),
        ]
        .into_iter()
        .collect();
        let once = set.expand();

        assert_eq!(once.len(), 5);
        assert_eq!(once.expand(), once);
    }

    #[test]
    fn compact_is_a_no_op() {
        let set: FilterSet = [
            filter(has_word("a"), "x"),
            filter(has_word("a"), "x"),
            filter(has_word("b"), "x"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.clone().compact(), set);
    }
}

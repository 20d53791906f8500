use std::cmp::Ordering;

use arbitrary::Unstructured;
use gmailfilter_model::{Filter, FilterSet};
use rand::{thread_rng, RngCore};

const ROUNDS: usize = 64;

fn random_filters(count: usize) -> Vec<Filter> {
    let mut data = vec![0u8; 16384];

    thread_rng().fill_bytes(&mut data);

    let mut u = Unstructured::new(&data);

    (0..count)
        .map(|_| u.arbitrary::<Filter>().unwrap())
        .collect()
}

#[test]
fn irreflexive_and_consistent_with_eq() {
    for _ in 0..ROUNDS {
        let filters = random_filters(32);

        for a in &filters {
            assert!(!(a < a));
            assert_eq!(a.cmp(&a.clone()), Ordering::Equal);

            for b in &filters {
                assert_eq!(a == b, a.cmp(b) == Ordering::Equal, "{a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn antisymmetric() {
    for _ in 0..ROUNDS {
        let filters = random_filters(32);

        for a in &filters {
            for b in &filters {
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a:?} vs {b:?}");
            }
        }
    }
}

#[test]
fn transitive() {
    for _ in 0..ROUNDS {
        let filters = random_filters(16);

        for a in &filters {
            for b in &filters {
                for c in &filters {
                    if a < b && b < c {
                        assert!(a < c, "{a:?} < {b:?} < {c:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn expand_leaves_conditioned_filters_alone() {
    for _ in 0..ROUNDS {
        let set: FilterSet = random_filters(24).into_iter().collect();
        let expanded = set.expand();
        let conditioned = |set: &FilterSet| {
            let mut filters: Vec<_> = set
                .iter()
                .filter(|f| {
                    !f.r#match.from.is_empty() || !f.r#match.to.is_empty() || !f.r#match.subject.is_empty()
                })
                .cloned()
                .collect();

            filters.sort();
            filters
        };

        assert_eq!(conditioned(&set), conditioned(&expanded));
    }
}

#[test]
fn expand_output_is_sorted_and_stable() {
    for _ in 0..ROUNDS {
        let set: FilterSet = random_filters(24).into_iter().collect();
        let expanded = set.expand();

        assert!(expanded.filters().windows(2).all(|w| w[0] <= w[1]));
        assert!(expanded
            .iter()
            .filter(|f| f.r#match.has_only_word())
            .all(|f| f.r#match.has_word.len() == 1));
        assert_eq!(expanded.expand(), expanded);
    }
}

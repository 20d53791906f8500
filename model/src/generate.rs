//! [`Arbitrary`] generators producing filters shaped like Gmail exports.
//!
//! Text is drawn from a small vocabulary so that generated filters collide
//! often, which is what comparison and expansion properties need to be
//! meaningful.

use arbitrary::{Arbitrary, Unstructured};

use crate::{Actions, Filter, FilterSet, LogicExpression, Match};

const CONDITIONS: &[&str] = &[
    "",
    "-maruel",
    "alice@example.com",
    "bob@example.com",
    "vacation",
    "has:attachment",
];

const CLAUSES: &[&str] = &[
    "subject:vacation",
    "subject:ooo",
    "subject:sick",
    "(subject:out of office)",
    "list:(noise.example.com)",
    "has:attachment",
];

const LABELS: &[&str] = &["autre", "noise", "vacation", "work", "work/reports"];

fn condition(u: &mut Unstructured) -> arbitrary::Result<String> {
    Ok(u.choose(CONDITIONS)?.to_string())
}

impl<'a> Arbitrary<'a> for LogicExpression {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut clauses = Vec::new();

        for _ in 0..u.int_in_range(0..=3u32)? {
            clauses.push(u.choose(CLAUSES)?.to_string());
        }

        Ok(clauses.into_iter().collect())
    }
}

impl<'a> Arbitrary<'a> for Match {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self {
            from:          condition(u)?,
            to:            condition(u)?,
            subject:       condition(u)?,
            has_word:      u.arbitrary()?,
            not_have_word: condition(u)?,
        })
    }
}

impl<'a> Arbitrary<'a> for Actions {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut actions = Actions::default();

        for _ in 0..u.int_in_range(0..=2u32)? {
            actions.add_label(*u.choose(LABELS)?);
        }

        actions.mark_as_read = u.arbitrary()?;
        actions.archive = u.arbitrary()?;
        actions.never_spam = u.arbitrary()?;
        actions.trash = u.arbitrary()?;
        actions.never_important = u.arbitrary()?;

        Ok(actions)
    }
}

impl<'a> Arbitrary<'a> for Filter {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new(u.arbitrary()?, u.arbitrary()?))
    }
}

impl<'a> Arbitrary<'a> for FilterSet {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        u.arbitrary_iter::<Filter>()?.collect()
    }
}

use std::{cmp::Ordering, convert::Infallible, fmt, str::FromStr};

/// Separator Gmail uses between the clauses of a disjunction.
pub const SEPARATOR: &str = " OR ";

/// A disjunction of plain-text search clauses, as found in a `hasTheWord`
/// property.
///
/// Splitting is purely textual: parentheses are not balanced, so a clause
/// like `list:(a OR b)` is split in the middle. Such inputs still render back
/// to the exact same string.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct LogicExpression {
    clauses: Vec<String>,
}

impl LogicExpression {
    pub fn new() -> Self {
        Self {
            clauses: Default::default(),
        }
    }

    pub fn single(clause: impl Into<String>) -> Self {
        Self {
            clauses: vec![clause.into()],
        }
    }

    /// Splits `raw` on [`SEPARATOR`]. The empty string yields one empty
    /// clause.
    pub fn parse(raw: &str) -> Self {
        Self {
            clauses: raw.split(SEPARATOR).map(ToOwned::to_owned).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.clauses.join(SEPARATOR)
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when the expression renders to the empty string.
    pub fn is_empty(&self) -> bool {
        self.clauses.iter().all(String::is_empty) && self.clauses.len() <= 1
    }
}

impl fmt::Display for LogicExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for LogicExpression {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl FromIterator<String> for LogicExpression {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            clauses: iter.into_iter().collect(),
        }
    }
}

impl PartialOrd for LogicExpression {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Rendered text first; clauses break ties between expressions that render
// identically but were split differently.
impl Ord for LogicExpression {
    fn cmp(&self, other: &Self) -> Ordering {
        self.render()
            .cmp(&other.render())
            .then_with(|| self.clauses.cmp(&other.clauses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_in_order() {
        let expr = LogicExpression::parse(
            "subject:vacation OR subject:ooo OR subject:sick OR (subject:out of office)",
        );

        assert_eq!(
            expr.clauses(),
            &[
                "subject:vacation",
                "subject:ooo",
                "subject:sick",
                "(subject:out of office)"
            ]
        );
    }

    #[test]
    fn render_is_inverse_of_parse() {
        let cases = vec![
            "",
            "a",
            "a OR b",
            "list:(noise.example.com)",
            " OR ",
            "a OR  OR b",
            "a or b",
            "a ORb",
        ];

        for case in cases {
            assert_eq!(LogicExpression::parse(case).render(), case, "case `{case}`");
        }
    }

    #[test]
    fn separator_is_case_sensitive() {
        assert_eq!(LogicExpression::parse("a or b").len(), 1);
        assert_eq!(LogicExpression::parse("a OR b").len(), 2);
        assert_eq!(LogicExpression::parse("aORb").len(), 1);
    }

    #[test]
    fn empty_string_is_one_empty_clause() {
        let expr = LogicExpression::parse("");

        assert_eq!(expr.clauses(), &[""]);
        assert!(expr.is_empty());
        assert!(LogicExpression::new().is_empty());
        assert!(!LogicExpression::parse(" OR ").is_empty());
    }

    #[test]
    fn nested_or_is_split_textually() {
        let expr = LogicExpression::parse("list:(a OR b)");

        assert_eq!(expr.clauses(), &["list:(a", "b)"]);
        assert_eq!(expr.render(), "list:(a OR b)");
    }

    #[test]
    fn equality_is_element_wise() {
        assert_eq!(LogicExpression::parse("a OR b"), LogicExpression::parse("a OR b"));
        assert_ne!(LogicExpression::parse("a OR b"), LogicExpression::parse("b OR a"));
        assert_ne!(LogicExpression::parse("a"), LogicExpression::parse("a OR a"));
        assert_ne!(LogicExpression::parse(""), LogicExpression::new());
    }

    #[test]
    fn ordering_agrees_with_equality() {
        let joined = LogicExpression::single("a OR b");
        let split = LogicExpression::parse("a OR b");

        assert_eq!(joined.render(), split.render());
        assert_ne!(joined.cmp(&split), Ordering::Equal);
        assert_eq!(joined.cmp(&split), split.cmp(&joined).reverse());
    }
}

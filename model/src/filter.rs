use std::cmp::Ordering;

use crate::LogicExpression;

/// Trigger conditions of a filter. An empty string means the condition is not
/// set.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct Match {
    pub from:          String,
    pub to:            String,
    pub subject:       String,
    pub has_word:      LogicExpression,
    pub not_have_word: String,
}

impl Match {
    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
            && self.to.is_empty()
            && self.subject.is_empty()
            && self.has_word.is_empty()
            && self.not_have_word.is_empty()
    }

    /// Whether `has_word` is the only condition that may be set.
    ///
    /// Only then is a disjunction in `has_word` equivalent to one filter per
    /// clause.
    pub fn has_only_word(&self) -> bool {
        self.from.is_empty()
            && self.to.is_empty()
            && self.subject.is_empty()
            && self.not_have_word.is_empty()
    }

    /// Display cells in column order: From, To, Subject, HasWord, NotHaveWord.
    pub fn columns(&self) -> [String; 5] {
        [
            self.from.clone(),
            self.to.clone(),
            self.subject.clone(),
            self.has_word.render(),
            self.not_have_word.clone(),
        ]
    }
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Match {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from
            .cmp(&other.from)
            .then_with(|| self.to.cmp(&other.to))
            .then_with(|| self.subject.cmp(&other.subject))
            .then_with(|| self.has_word.cmp(&other.has_word))
            .then_with(|| self.not_have_word.cmp(&other.not_have_word))
    }
}

/// Effects of a filter.
///
/// Labels are kept sorted at all times. Duplicates are preserved.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct Actions {
    labels: Vec<String>,

    pub mark_as_read:    bool,
    pub archive:         bool,
    pub never_spam:      bool,
    pub trash:           bool,
    pub never_important: bool,
}

impl Actions {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Inserts `label` after any equal labels, keeping the collection sorted.
    /// An empty label is the same as no label and is not stored.
    pub fn add_label(&mut self, label: impl Into<String>) {
        let label = label.into();

        if label.is_empty() {
            return;
        }

        let idx = self.labels.partition_point(|existing| existing <= &label);

        self.labels.insert(idx, label);
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.add_label(label);
        self
    }

    /// Flags in priority order: MarkAsRead, Archive, NeverSpam, Trash,
    /// NeverImportant.
    pub fn flags(&self) -> [bool; 5] {
        [
            self.mark_as_read,
            self.archive,
            self.never_spam,
            self.trash,
            self.never_important,
        ]
    }

    /// Display cells in column order: Labels, MarkAsRead, Archive, NeverSpam,
    /// Trash, NeverImportant.
    pub fn columns(&self) -> [String; 6] {
        let [mark_as_read, archive, never_spam, trash, never_important] = self.flags().map(flag_cell);

        [
            self.labels.join(","),
            mark_as_read,
            archive,
            never_spam,
            trash,
            never_important,
        ]
    }
}

fn flag_cell(value: bool) -> String {
    let cell = if value { "TRUE" } else { "FALSE" };

    cell.to_owned()
}

impl PartialOrd for Actions {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Actions {
    fn cmp(&self, other: &Self) -> Ordering {
        self.labels
            .len()
            .cmp(&other.labels.len())
            .then_with(|| self.labels.cmp(&other.labels))
            .then_with(|| self.flags().cmp(&other.flags()))
    }
}

/// One Gmail filter rule.
#[derive(PartialEq, Eq, Hash, Clone, Debug, Default)]
pub struct Filter {
    pub r#match: Match,
    pub actions: Actions,
}

impl Filter {
    pub fn new(r#match: Match, actions: Actions) -> Self {
        Self { r#match, actions }
    }

    pub fn columns(&self) -> Vec<String> {
        self.r#match
            .columns()
            .into_iter()
            .chain(self.actions.columns())
            .collect()
    }
}

impl PartialOrd for Filter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Actions first so that filters with the same effect end up adjacent.
impl Ord for Filter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.actions
            .cmp(&other.actions)
            .then_with(|| self.r#match.cmp(&other.r#match))
    }
}

//! Mapping between the property bag of a feed entry and [`Filter`].

use std::{fmt, str::FromStr};

use gmailfilter_model::{Filter, FilterSet, LogicExpression};

use crate::{
    feed::{Entry, Feed, Property},
    Error,
};

/// Every property name Gmail writes into a filter entry.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum PropertyName {
    From,
    To,
    Subject,
    HasTheWord,
    DoesNotHaveTheWord,
    Label,
    ShouldMarkAsRead,
    ShouldArchive,
    ShouldNeverSpam,
    ShouldTrash,
    ShouldNeverMarkAsImportant,
    SizeOperator,
    SizeUnit,
}

impl PropertyName {
    pub const ALL: [PropertyName; 13] = [
        Self::From,
        Self::To,
        Self::Subject,
        Self::HasTheWord,
        Self::DoesNotHaveTheWord,
        Self::Label,
        Self::ShouldMarkAsRead,
        Self::ShouldArchive,
        Self::ShouldNeverSpam,
        Self::ShouldTrash,
        Self::ShouldNeverMarkAsImportant,
        Self::SizeOperator,
        Self::SizeUnit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            | Self::From => "from",
            | Self::To => "to",
            | Self::Subject => "subject",
            | Self::HasTheWord => "hasTheWord",
            | Self::DoesNotHaveTheWord => "doesNotHaveTheWord",
            | Self::Label => "label",
            | Self::ShouldMarkAsRead => "shouldMarkAsRead",
            | Self::ShouldArchive => "shouldArchive",
            | Self::ShouldNeverSpam => "shouldNeverSpam",
            | Self::ShouldTrash => "shouldTrash",
            | Self::ShouldNeverMarkAsImportant => "shouldNeverMarkAsImportant",
            | Self::SizeOperator => "sizeOperator",
            | Self::SizeUnit => "sizeUnit",
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::UnknownProperty(s.to_owned()))
    }
}

fn flag(name: PropertyName, value: &str) -> Result<bool, Error> {
    if value != "true" {
        return Err(Error::UnexpectedValue {
            property: name.to_string(),
            value:    value.to_owned(),
        });
    }

    Ok(true)
}

impl Entry {
    /// Builds a filter from the properties in document order.
    ///
    /// Single-valued conditions take the last occurrence. Size properties are
    /// accepted and dropped.
    pub fn to_filter(&self) -> Result<Filter, Error> {
        let mut filter = Filter::default();
        let (r#match, actions) = (&mut filter.r#match, &mut filter.actions);

        for Property { name, value } in &self.properties {
            let name: PropertyName = name.parse()?;

            match name {
                | PropertyName::From => r#match.from = value.clone(),
                | PropertyName::To => r#match.to = value.clone(),
                | PropertyName::Subject => r#match.subject = value.clone(),
                | PropertyName::HasTheWord => r#match.has_word = LogicExpression::parse(value),
                | PropertyName::DoesNotHaveTheWord => r#match.not_have_word = value.clone(),
                | PropertyName::Label => actions.add_label(value.as_str()),
                | PropertyName::ShouldMarkAsRead => actions.mark_as_read = flag(name, value)?,
                | PropertyName::ShouldArchive => actions.archive = flag(name, value)?,
                | PropertyName::ShouldNeverSpam => actions.never_spam = flag(name, value)?,
                | PropertyName::ShouldTrash => actions.trash = flag(name, value)?,
                | PropertyName::ShouldNeverMarkAsImportant => actions.never_important = flag(name, value)?,
                | PropertyName::SizeOperator | PropertyName::SizeUnit => {
                    tracing::debug!("Ignoring {name}={value:?}.");
                },
            }
        }

        Ok(filter)
    }

    /// Emits non-empty conditions, the labels, then set flags.
    pub fn from_filter(filter: &Filter) -> Self {
        let mut properties = Vec::new();
        let mut condition = |name: PropertyName, value: String| {
            if !value.is_empty() {
                properties.push(Property::new(name.as_str(), value));
            }
        };
        let r#match = &filter.r#match;

        condition(PropertyName::From, r#match.from.clone());
        condition(PropertyName::To, r#match.to.clone());
        condition(PropertyName::Subject, r#match.subject.clone());
        condition(PropertyName::HasTheWord, r#match.has_word.render());
        condition(PropertyName::DoesNotHaveTheWord, r#match.not_have_word.clone());

        let actions = &filter.actions;

        for label in actions.labels() {
            properties.push(Property::new(PropertyName::Label.as_str(), label.as_str()));
        }

        let flags = [
            PropertyName::ShouldMarkAsRead,
            PropertyName::ShouldArchive,
            PropertyName::ShouldNeverSpam,
            PropertyName::ShouldTrash,
            PropertyName::ShouldNeverMarkAsImportant,
        ];

        for (name, set) in flags.into_iter().zip(actions.flags()) {
            if set {
                properties.push(Property::new(name.as_str(), "true"));
            }
        }

        Self {
            properties,
            ..Default::default()
        }
    }
}

impl Feed {
    pub fn to_filters(&self) -> Result<FilterSet, Error> {
        self.entries.iter().map(Entry::to_filter).collect()
    }

    pub fn from_filters(title: &str, filters: &FilterSet) -> Self {
        Self {
            title: title.to_owned(),
            entries: filters.iter().map(Entry::from_filter).collect(),
            ..Default::default()
        }
    }
}

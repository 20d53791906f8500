//! The flattened CSV form: one row per filter.

use std::io;

use gmailfilter_model::{Actions, Filter, FilterSet, LogicExpression, Match};
use serde::{de, Deserialize, Deserializer};

use crate::Error;

pub const HEADER: [&str; 11] = [
    "From",
    "To",
    "Subject",
    "HasWord",
    "NotHaveWord",
    "Labels",
    "MarkAsRead",
    "Archive",
    "NeverSpam",
    "Trash",
    "NeverImportant",
];

pub fn write_csv<W: io::Write>(filters: &FilterSet, out: W) -> Result<(), Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(HEADER).map_err(output)?;

    for filter in filters {
        writer.write_record(filter.columns()).map_err(output)?;
    }

    writer.flush().map_err(Error::Output)
}

/// Reads rows written by [`write_csv`] back into filters, in row order.
///
/// Labels are split on commas, so a label containing a comma does not
/// survive the trip.
pub fn read_csv<R: io::Read>(input: R) -> Result<FilterSet, Error> {
    let mut reader = csv::ReaderBuilder::new().from_reader(input);
    let headers = reader.headers()?;

    if !headers.iter().eq(HEADER) {
        return Err(Error::malformed(format!(
            "expected header {:?}, found {:?}",
            HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(","),
        )));
    }

    let filters = reader
        .deserialize::<Row>()
        .map(|row| row.map(Filter::from))
        .collect::<Result<FilterSet, csv::Error>>()?;

    tracing::info!("Read {} filters from CSV.", filters.len());

    Ok(filters)
}

fn output(err: csv::Error) -> Error {
    Error::Output(err.into())
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct Row {
    from:            String,
    to:              String,
    subject:         String,
    has_word:        String,
    not_have_word:   String,
    labels:          String,
    mark_as_read:    Flag,
    archive:         Flag,
    never_spam:      Flag,
    trash:           Flag,
    never_important: Flag,
}

impl From<Row> for Filter {
    fn from(row: Row) -> Self {
        let has_word = if row.has_word.is_empty() {
            LogicExpression::new()
        } else {
            LogicExpression::parse(&row.has_word)
        };
        let mut actions = Actions::default();

        if !row.labels.is_empty() {
            for label in row.labels.split(',') {
                actions.add_label(label);
            }
        }

        actions.mark_as_read = row.mark_as_read.0;
        actions.archive = row.archive.0;
        actions.never_spam = row.never_spam.0;
        actions.trash = row.trash.0;
        actions.never_important = row.never_important.0;

        Filter::new(
            Match {
                from: row.from,
                to: row.to,
                subject: row.subject,
                has_word,
                not_have_word: row.not_have_word,
            },
            actions,
        )
    }
}

/// A `TRUE`/`FALSE` cell.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
struct Flag(bool);

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cell = String::deserialize(deserializer)?;

        match cell.as_str() {
            | "TRUE" => Ok(Flag(true)),
            | "FALSE" => Ok(Flag(false)),
            | other => Err(de::Error::invalid_value(de::Unexpected::Str(other), &"TRUE or FALSE")),
        }
    }
}

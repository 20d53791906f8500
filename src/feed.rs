//! The Atom document Gmail exports filters as.
//!
//! Only the parts that matter for filters are modeled: feed metadata, and per
//! entry its identity plus the ordered `apps:property` name/value pairs.

use std::{fs, io::Write, path::Path};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    name::{Namespace, ResolveResult},
    reader::NsReader,
    writer::Writer,
};

use crate::Error;

pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
pub const APPS_NS: &str = "http://schemas.google.com/apps/2006";

const ENTRY_TITLE: &str = "Mail Filter";

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Feed {
    pub title:   String,
    pub id:      String,
    pub updated: String,
    pub author:  Option<Author>,
    pub entries: Vec<Entry>,
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Author {
    pub name:  String,
    pub email: String,
}

#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Entry {
    pub id:         String,
    pub title:      String,
    pub updated:    String,
    pub properties: Vec<Property>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Property {
    pub name:  String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            value: value.into(),
        }
    }
}

impl Feed {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|err| Error::malformed(format!("{} is not UTF-8: {err}", path.display())))?;

        Self::parse(&content)
    }

    pub fn parse(input: &str) -> Result<Self, Error> {
        let mut reader = NsReader::from_str(input);
        let mut feed: Option<Feed> = None;
        let mut stack: Vec<String> = Vec::new();

        loop {
            let (ns, event) = reader.read_resolved_event()?;

            match event {
                | Event::Start(e) => {
                    let name = local_name(&e);

                    open(&mut feed, &stack, &ns, &name, &e)?;
                    stack.push(name);
                },
                | Event::Empty(e) => {
                    let name = local_name(&e);

                    open(&mut feed, &stack, &ns, &name, &e)?;
                },
                | Event::End(_) => {
                    stack.pop();
                },
                | Event::Text(e) => {
                    if let Some(feed) = feed.as_mut() {
                        if let Some(field) = feed.text_field(&stack) {
                            field.push_str(&e.unescape()?);
                        }
                    }
                },
                | Event::CData(e) => {
                    if let Some(feed) = feed.as_mut() {
                        if let Some(field) = feed.text_field(&stack) {
                            let bytes = e.into_inner();
                            let text = std::str::from_utf8(&bytes)
                                .map_err(|_| Error::malformed("CDATA section is not valid UTF-8"))?;

                            field.push_str(text);
                        }
                    }
                },
                | Event::Eof => break,
                | _ => (),
            }
        }

        if let Some(name) = stack.last() {
            return Err(Error::malformed(format!("unexpected end of document inside <{name}>")));
        }

        let feed = feed.ok_or_else(|| Error::malformed("missing <feed> root element"))?;

        tracing::info!("Read {} entries from feed {:?}.", feed.entries.len(), feed.title);

        Ok(feed)
    }

    pub fn write<W: Write>(&self, mut out: W) -> Result<(), Error> {
        let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("feed").with_attributes([("xmlns", ATOM_NS), ("xmlns:apps", APPS_NS)]),
        ))?;
        text_element(&mut writer, "title", &self.title)?;
        optional_text_element(&mut writer, "id", &self.id)?;
        optional_text_element(&mut writer, "updated", &self.updated)?;

        if let Some(author) = &self.author {
            writer.write_event(Event::Start(BytesStart::new("author")))?;
            text_element(&mut writer, "name", &author.name)?;
            text_element(&mut writer, "email", &author.email)?;
            writer.write_event(Event::End(BytesEnd::new("author")))?;
        }

        for entry in &self.entries {
            entry.write(&mut writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;

        let mut buf = writer.into_inner();

        buf.push(b'\n');
        out.write_all(&buf).map_err(Error::Output)?;
        out.flush().map_err(Error::Output)
    }

    fn text_field(&mut self, stack: &[String]) -> Option<&mut String> {
        let path: Vec<&str> = stack.iter().map(String::as_str).collect();

        match path.as_slice() {
            | ["feed", "title"] => Some(&mut self.title),
            | ["feed", "id"] => Some(&mut self.id),
            | ["feed", "updated"] => Some(&mut self.updated),
            | ["feed", "author", "name"] => self.author.as_mut().map(|author| &mut author.name),
            | ["feed", "author", "email"] => self.author.as_mut().map(|author| &mut author.email),
            | ["feed", "entry", leaf] => {
                let entry = self.entries.last_mut()?;

                match *leaf {
                    | "id" => Some(&mut entry.id),
                    | "title" => Some(&mut entry.title),
                    | "updated" => Some(&mut entry.updated),
                    | _ => None,
                }
            },
            | _ => None,
        }
    }
}

impl Entry {
    fn write(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), Error> {
        let title = if self.title.is_empty() {
            ENTRY_TITLE
        } else {
            self.title.as_str()
        };

        writer.write_event(Event::Start(BytesStart::new("entry")))?;
        writer
            .create_element("category")
            .with_attribute(("term", "filter"))
            .write_empty()?;
        text_element(writer, "title", title)?;
        optional_text_element(writer, "id", &self.id)?;
        optional_text_element(writer, "updated", &self.updated)?;
        writer.create_element("content").write_empty()?;

        for property in &self.properties {
            writer
                .create_element("apps:property")
                .with_attribute(("name", property.name.as_str()))
                .with_attribute(("value", property.value.as_str()))
                .write_empty()?;
        }

        writer.write_event(Event::End(BytesEnd::new("entry")))?;

        Ok(())
    }
}

fn local_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn open(
    feed: &mut Option<Feed>,
    stack: &[String],
    ns: &ResolveResult,
    name: &str,
    e: &BytesStart,
) -> Result<(), Error> {
    if stack.is_empty() {
        if feed.is_some() {
            return Err(Error::malformed(format!("unexpected second root element <{name}>")));
        }

        if name != "feed" {
            return Err(Error::malformed(format!("expected <feed> root element, found <{name}>")));
        }

        *feed = Some(Feed::default());

        return Ok(());
    }

    let Some(feed) = feed.as_mut() else {
        return Ok(());
    };
    let parent: Vec<&str> = stack.iter().map(String::as_str).collect();

    match (parent.as_slice(), name) {
        | (["feed"], "entry") => feed.entries.push(Entry::default()),
        | (["feed"], "author") => feed.author = Some(Author::default()),
        | (["feed", "entry"], "property") if is_apps(ns) => {
            let name = e
                .try_get_attribute("name")?
                .ok_or_else(|| Error::malformed("property without a name attribute"))?
                .unescape_value()?
                .into_owned();
            let value = match e.try_get_attribute("value")? {
                | Some(attr) => attr.unescape_value()?.into_owned(),
                | None => String::new(),
            };

            tracing::trace!(name = %name, value = %value, "Read property.");

            if let Some(entry) = feed.entries.last_mut() {
                entry.properties.push(Property { name, value });
            }
        },
        | _ => (),
    }

    Ok(())
}

fn is_apps(ns: &ResolveResult) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(ns)) if *ns == APPS_NS.as_bytes())
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), Error> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))?;

    Ok(())
}

fn optional_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<(), Error> {
    if text.is_empty() {
        return Ok(());
    }

    text_element(writer, name, text)
}

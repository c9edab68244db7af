//! A small owned XML tree for EVE API responses.
//!
//! EVE API documents are shallow and attribute-heavy, so the whole response is read into an
//! [`Element`] tree with `quick-xml` and then walked with the typed accessors below.
use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{Error, Result};

/// Timestamp format used across the EVE API. All timestamps are UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An XML element with its attributes, trimmed text and child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    /// Parse a document and return its root element.
    ///
    /// ```
    /// # use evelink::Element;
    /// let root = Element::parse(r#"<result><pilots>12</pilots></result>"#).unwrap();
    /// assert_eq!(root.child_i64("pilots").unwrap(), 12);
    /// ```
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Elements that have been opened but not closed yet. The bottom of the stack is a
        // synthetic document node collecting the root.
        let mut stack = vec![Element::default()];

        loop {
            match reader.read_event()? {
                Event::Start(start) => stack.push(Element::from_start(&start)?),
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    push_child(&mut stack, element);
                }
                Event::End(_) => {
                    // Mismatched end tags are rejected by the reader, so the stack always holds
                    // the element being closed here.
                    if stack.len() > 1 {
                        if let Some(element) = stack.pop() {
                            push_child(&mut stack, element);
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.len() > 1 {
            let unclosed = stack.pop().map(|e| e.tag).unwrap_or_default();
            return Err(Error::UnclosedElement(unclosed));
        }

        stack
            .pop()
            .and_then(|document| document.children.into_iter().next())
            .ok_or_else(|| Error::MissingElement("document root".to_owned()))
    }

    fn from_start(start: &BytesStart) -> Result<Element> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Element {
            tag,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Tag name of the element.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content of the element, with surrounding whitespace trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First direct child with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// Text of the first direct child with the given tag.
    pub fn find_text(&self, tag: &str) -> Option<&str> {
        self.find(tag).map(Element::text)
    }

    /// Like [`Element::find`], but a missing child is an error.
    pub fn child(&self, tag: &str) -> Result<&Element> {
        self.find(tag)
            .ok_or_else(|| Error::MissingElement(tag.to_owned()))
    }

    /// `<row>` children of a rowset.
    pub fn rows(&self) -> impl Iterator<Item = &Element> {
        self.find_all("row")
    }

    /// The first `<rowset>` child. Most endpoints return exactly one.
    pub fn rowset(&self) -> Result<&Element> {
        self.child("rowset")
    }

    /// `<rowset>` children indexed by their `name` attribute.
    pub fn rowsets(&self) -> Rowsets<'_> {
        Rowsets(
            self.find_all("rowset")
                .filter_map(|rowset| rowset.attr("name").map(|name| (name, rowset)))
                .collect(),
        )
    }

    /// Like [`Element::attr`], but a missing attribute is an error.
    pub fn require_attr(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| Error::MissingAttribute {
            element: self.tag.clone(),
            attribute: name.to_owned(),
        })
    }

    /// Owned value of a required attribute.
    pub fn attr_str(&self, name: &str) -> Result<String> {
        self.require_attr(name).map(str::to_owned)
    }

    /// Required integer attribute.
    pub fn attr_i64(&self, name: &str) -> Result<i64> {
        parse_i64(self.require_attr(name)?)
    }

    /// Integer attribute that may be absent or empty.
    pub fn attr_opt_i64(&self, name: &str) -> Result<Option<i64>> {
        match self.attr(name) {
            None | Some("") => Ok(None),
            Some(value) => parse_i64(value).map(Some),
        }
    }

    /// Required float attribute.
    pub fn attr_f64(&self, name: &str) -> Result<f64> {
        parse_f64(self.require_attr(name)?)
    }

    /// Float attribute that may be absent or empty.
    pub fn attr_opt_f64(&self, name: &str) -> Result<Option<f64>> {
        match self.attr(name) {
            None | Some("") => Ok(None),
            Some(value) => parse_f64(value).map(Some),
        }
    }

    /// `"1"` flag attribute. Any other value is `false`.
    pub fn attr_flag(&self, name: &str) -> Result<bool> {
        Ok(self.require_attr(name)? == "1")
    }

    /// Required timestamp attribute.
    pub fn attr_ts(&self, name: &str) -> Result<DateTime<Utc>> {
        parse_required_ts(self.require_attr(name)?)
    }

    /// Timestamp attribute where an empty value means "never".
    pub fn attr_opt_ts(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        parse_ts(self.require_attr(name)?)
    }

    /// Text of a required child element.
    pub fn child_str(&self, tag: &str) -> Result<String> {
        self.child(tag).map(|child| child.text.clone())
    }

    /// Integer text of a required child element.
    pub fn child_i64(&self, tag: &str) -> Result<i64> {
        parse_i64(self.child(tag)?.text())
    }

    /// Float text of a required child element.
    pub fn child_f64(&self, tag: &str) -> Result<f64> {
        parse_f64(self.child(tag)?.text())
    }

    /// Boolean child element, written as `1`/`0` or `True`/`False`.
    pub fn child_bool(&self, tag: &str) -> Result<bool> {
        parse_bool(self.child(tag)?.text())
    }

    /// Timestamp text of a required child element.
    pub fn child_ts(&self, tag: &str) -> Result<DateTime<Utc>> {
        parse_required_ts(self.child(tag)?.text())
    }

    /// Timestamp element where empty text means "never".
    pub fn child_opt_ts(&self, tag: &str) -> Result<Option<DateTime<Utc>>> {
        parse_ts(self.child(tag)?.text())
    }
}

fn push_child(stack: &mut [Element], element: Element) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    }
}

/// Named `<rowset>` children of one element.
#[derive(Debug)]
pub struct Rowsets<'a>(HashMap<&'a str, &'a Element>);

impl<'a> Rowsets<'a> {
    /// The rowset with the given name. A missing rowset is an error.
    pub fn get(&self, name: &str) -> Result<&'a Element> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| Error::MissingRowset(name.to_owned()))
    }

    /// All named rowsets, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Element)> + '_ {
        self.0.iter().map(|(name, rowset)| (*name, *rowset))
    }
}

/// Parse an EVE API timestamp. Empty strings are `None`.
pub fn parse_ts(value: &str) -> Result<Option<DateTime<Utc>>> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|ts| Some(ts.and_utc()))
        .map_err(|_| Error::InvalidTimestamp {
            value: value.to_owned(),
        })
}

fn parse_required_ts(value: &str) -> Result<DateTime<Utc>> {
    parse_ts(value)?.ok_or_else(|| Error::InvalidTimestamp {
        value: value.to_owned(),
    })
}

fn parse_i64(value: &str) -> Result<i64> {
    value.parse().map_err(|_| Error::InvalidNumber {
        value: value.to_owned(),
    })
}

fn parse_f64(value: &str) -> Result<f64> {
    value.parse().map_err(|_| Error::InvalidNumber {
        value: value.to_owned(),
    })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "1" | "True" | "true" => Ok(true),
        "0" | "False" | "false" => Ok(false),
        _ => Err(Error::InvalidBoolean {
            value: value.to_owned(),
        }),
    }
}

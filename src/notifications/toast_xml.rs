//! Toast XML population.
//!
//! The OS hands out the `ToastImageAndText02` template as a serialized XML
//! document. The title and body go into the first two `<text>` nodes in
//! document order and the launch arguments into the `launch` attribute of the
//! `<toast>` root.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{NotificationError, Result};

pub const ROOT_ELEMENT: &str = "toast";
pub const TEXT_ELEMENT: &str = "text";
pub const LAUNCH_ATTRIBUTE: &str = "launch";

fn xml_err(e: impl std::fmt::Display) -> NotificationError {
    NotificationError::Xml(e.to_string())
}

/// Fill `template` with the title, body and launch attribute.
///
/// Fails if the template has no `<toast>` root or fewer than two `<text>`
/// nodes. Text nodes past the second are left untouched.
pub fn populate(template: &str, title: &str, body: &str, launch: &str) -> Result<String> {
    let mut reader = Reader::from_str(template);
    let mut writer = Writer::new(Vec::new());
    let mut saw_root = false;
    let mut text_nodes = 0usize;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                saw_root = true;
                writer
                    .write_event(Event::Start(with_launch(&e, launch)?))
                    .map_err(xml_err)?;
            }
            Event::Empty(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                saw_root = true;
                writer
                    .write_event(Event::Empty(with_launch(&e, launch)?))
                    .map_err(xml_err)?;
            }
            Event::Start(e) if e.name().as_ref() == TEXT_ELEMENT.as_bytes() && text_nodes < 2 => {
                reader.read_to_end(e.name()).map_err(xml_err)?;
                write_text(&mut writer, &e, text_value(text_nodes, title, body))?;
                text_nodes += 1;
            }
            Event::Empty(e) if e.name().as_ref() == TEXT_ELEMENT.as_bytes() && text_nodes < 2 => {
                write_text(&mut writer, &e, text_value(text_nodes, title, body))?;
                text_nodes += 1;
            }
            event => writer.write_event(event).map_err(xml_err)?,
        }
    }

    if !saw_root {
        return Err(NotificationError::Xml(format!(
            "missing <{}> root element",
            ROOT_ELEMENT
        )));
    }
    if text_nodes < 2 {
        return Err(NotificationError::MissingTextNodes(text_nodes));
    }

    String::from_utf8(writer.into_inner()).map_err(xml_err)
}

fn text_value<'a>(index: usize, title: &'a str, body: &'a str) -> &'a str {
    if index == 0 {
        title
    } else {
        body
    }
}

fn with_launch(root: &BytesStart<'_>, launch: &str) -> Result<BytesStart<'static>> {
    let name = String::from_utf8_lossy(root.name().as_ref()).into_owned();
    let mut element = BytesStart::new(name);
    for attr in root.attributes() {
        let attr = attr.map_err(xml_err)?;
        if attr.key.as_ref() != LAUNCH_ATTRIBUTE.as_bytes() {
            element.push_attribute(attr);
        }
    }
    element.push_attribute((LAUNCH_ATTRIBUTE, launch));
    Ok(element)
}

fn write_text(writer: &mut Writer<Vec<u8>>, element: &BytesStart<'_>, value: &str) -> Result<()> {
    writer
        .write_event(Event::Start(element.clone()))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_err)?;
    writer
        .write_event(Event::End(element.to_end()))
        .map_err(xml_err)?;
    Ok(())
}

/// Value of the `launch` attribute on the `<toast>` root, if present.
pub fn launch_attribute(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == ROOT_ELEMENT.as_bytes() => {
                for attr in e.attributes() {
                    let attr = attr.map_err(xml_err)?;
                    if attr.key.as_ref() == LAUNCH_ATTRIBUTE.as_bytes() {
                        let raw = String::from_utf8_lossy(&attr.value);
                        return Ok(Some(unescape(&raw).map_err(xml_err)?.into_owned()));
                    }
                }
                return Ok(None);
            }
            Event::Eof => {
                return Err(NotificationError::Xml(format!(
                    "missing <{}> root element",
                    ROOT_ELEMENT
                )))
            }
            _ => {}
        }
    }
}

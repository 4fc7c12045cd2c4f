//! A minimal element tree between the OWL/XML codec and quick-xml.

use crate::error::OwlXmlError;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn require(&self, key: &'static str) -> Result<&str, OwlXmlError> {
        self.get(key)
            .ok_or_else(|| OwlXmlError::missing_attribute(&self.name, key))
    }

    /// The trimmed text content.
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map_or("", str::trim)
    }

    /// Writes the element. `indent` is the number of spaces per level, 0 for a single line.
    pub fn render(&self, indent: usize) -> Result<String, OwlXmlError> {
        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer, indent, 0)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write(
        &self,
        writer: &mut Writer<Vec<u8>>,
        indent: usize,
        depth: usize,
    ) -> Result<(), OwlXmlError> {
        let start = BytesStart::new(self.name.as_str())
            .with_attributes(self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if self.children.is_empty() && self.text.is_none() {
            // Self-closing tags are written `<name ... />`.
            let out = writer.get_mut();
            out.push(b'<');
            out.extend_from_slice(&start);
            out.extend_from_slice(b" />");
            return Ok(());
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = self.text.as_deref().filter(|_| self.children.is_empty()) {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for child in &self.children {
            write_indentation(writer, indent, depth + 1)?;
            child.write(writer, indent, depth + 1)?;
        }
        if !self.children.is_empty() {
            write_indentation(writer, indent, depth)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    /// Parses a document or fragment with a single root element.
    pub fn parse(input: &str) -> Result<Self, OwlXmlError> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;
        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    stack.push(start_element(&reader, &start)?);
                }
                Event::Empty(start) => {
                    let element = start_element(&reader, &start)?;
                    close(element, &mut stack, &mut root)?;
                }
                Event::End(end) => {
                    let end_name = end.name();
                    let name = reader
                        .decoder()
                        .decode(end_name.as_ref())
                        .map_err(quick_xml::Error::from)?;
                    let Some(element) = stack.pop() else {
                        return Err(OwlXmlError::malformed(format!("unexpected </{name}>")));
                    };
                    if element.name != name {
                        return Err(OwlXmlError::malformed(format!(
                            "</{name}> closes <{}>",
                            element.name
                        )));
                    }
                    close(element, &mut stack, &mut root)?;
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let text = text.unescape()?;
                        current.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        let data = reader
                            .decoder()
                            .decode(&data)
                            .map_err(quick_xml::Error::from)?;
                        current.text.get_or_insert_with(String::new).push_str(&data);
                    }
                }
                Event::Eof => break,
                _ => (),
            }
        }
        if let Some(open) = stack.last() {
            return Err(OwlXmlError::malformed(format!("<{}> is never closed", open.name)));
        }
        root.ok_or_else(|| OwlXmlError::malformed("the document has no root element"))
    }
}

fn write_indentation(
    writer: &mut Writer<Vec<u8>>,
    indent: usize,
    depth: usize,
) -> Result<(), OwlXmlError> {
    if indent > 0 {
        let whitespace = format!("\n{}", " ".repeat(indent * depth));
        writer.write_event(Event::Text(BytesText::from_escaped(whitespace)))?;
    }
    Ok(())
}

fn start_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, OwlXmlError> {
    let decoder = reader.decoder();
    let start_name = start.name();
    let name = decoder
        .decode(start_name.as_ref())
        .map_err(quick_xml::Error::from)?;
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::InvalidAttr)?;
        let key = decoder
            .decode(attribute.key.as_ref())
            .map_err(quick_xml::Error::from)?
            .into_owned();
        let value = attribute.decode_and_unescape_value(decoder)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn close(
    mut element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), OwlXmlError> {
    // Indentation between child elements.
    if !element.children.is_empty() && element.text.as_deref().is_some_and(|t| t.trim().is_empty())
    {
        element.text = None;
    }
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(OwlXmlError::malformed("several root elements")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_rendering_uses_spaced_self_closing_tags() {
        let element = Element::new("DataMaxCardinality")
            .attribute("cardinality", "1")
            .child(Element::new("DataProperty").attribute("IRI", "http://example.org/p"));
        assert_eq!(
            element.render(0).unwrap(),
            "<DataMaxCardinality cardinality=\"1\"><DataProperty IRI=\"http://example.org/p\" /></DataMaxCardinality>"
        );
    }

    #[test]
    fn text_is_escaped_and_read_back() {
        let element = Element::new("Literal").text("a < b & \"c\"");
        let out = element.render(2).unwrap();
        assert!(out.contains("a &lt; b &amp;"));
        assert_eq!(Element::parse(&out).unwrap(), element);
    }

    #[test]
    fn indented_rendering_parses_to_the_same_tree() {
        let element = Element::new("Ontology").child(
            Element::new("Declaration").child(Element::new("Class").attribute("IRI", "http://example.org/A")),
        );
        let out = element.render(4).unwrap();
        assert!(out.contains("\n    <Declaration>"));
        let parsed = Element::parse(&out).unwrap();
        assert_eq!(parsed.children, element.children);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        assert!(Element::parse("<A><B></A>").is_err());
        assert!(Element::parse("<A>").is_err());
        assert!(Element::parse("").is_err());
    }
}

//! A minimal element tree built with `quick-xml`'s pull reader.
//!
//! The service's payloads are small and their schema is not trusted, so the
//! parser keeps every element and lets callers search by local name instead
//! of mapping onto a fixed schema.

use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Element(Element),
  Text(String),
}

/// An XML element with its children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
  /// Local name, with any `prefix:` stripped.
  pub name:     String,
  pub children: Vec<Node>,
}

impl Element {
  fn named(name: String) -> Self {
    Self {
      name,
      children: Vec::new(),
    }
  }

  /// Direct child elements.
  pub fn elements(&self) -> impl Iterator<Item = &Element> {
    self.children.iter().filter_map(|node| match node {
      Node::Element(e) => Some(e),
      Node::Text(_) => None,
    })
  }

  /// All descendant elements (excluding `self`) in document order.
  pub fn descendants(&self) -> Vec<&Element> {
    let mut out = Vec::new();
    collect_descendants(self, &mut out);
    out
  }

  /// Descendant elements called `name`, in document order.
  pub fn find_all(&self, name: &str) -> Vec<&Element> {
    self
      .descendants()
      .into_iter()
      .filter(|e| e.name == name)
      .collect()
  }

  /// First descendant element called `name`.
  pub fn find(&self, name: &str) -> Option<&Element> {
    self.find_all(name).into_iter().next()
  }

  /// Text of the first descendant called `name`, or `""` when absent.
  pub fn text_of(&self, name: &str) -> String {
    self.find(name).map(Element::inner_text).unwrap_or_default()
  }

  /// Concatenated text of every descendant text node.
  pub fn inner_text(&self) -> String {
    let mut out = String::new();
    collect_text(self, &mut out);
    out
  }
}

fn collect_descendants<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
  for child in element.elements() {
    out.push(child);
    collect_descendants(child, out);
  }
}

fn collect_text(element: &Element, out: &mut String) {
  for node in &element.children {
    match node {
      Node::Text(t) => out.push_str(t),
      Node::Element(e) => collect_text(e, out),
    }
  }
}

/// Deepest element nesting accepted. The tree is walked recursively, so
/// anything deeper is rejected as malformed.
pub const MAX_DEPTH: usize = 256;

/// Parse `xml` into a synthetic document element whose children are the
/// top-level nodes. Fails on syntax errors, on nesting deeper than
/// [`MAX_DEPTH`], or when there is no element at all.
///
/// Text is kept exactly as sent; only whitespace-only runs between elements
/// are dropped.
pub fn parse(xml: &str) -> Result<Element> {
  let mut reader = quick_xml::Reader::from_str(xml);

  // stack[0] is the synthetic document node.
  let mut stack: Vec<Element> = vec![Element::default()];

  loop {
    match reader.read_event() {
      Ok(Event::Start(ref e)) => {
        if stack.len() > MAX_DEPTH {
          return Err(Error::MalformedPayload(format!(
            "nesting deeper than {MAX_DEPTH} elements"
          )));
        }
        stack.push(Element::named(element_name(e)));
      }
      Ok(Event::Empty(ref e)) => {
        let element = Element::named(element_name(e));
        push_node(&mut stack, Node::Element(element));
      }
      Ok(Event::End(_)) => {
        let element = stack
          .pop()
          .filter(|_| !stack.is_empty())
          .ok_or_else(|| Error::MalformedPayload("unbalanced end tag".into()))?;
        push_node(&mut stack, Node::Element(element));
      }
      Ok(Event::Text(ref e)) => {
        // Undefined entities (`&eacute;`) keep their raw text.
        let text = match e.unescape() {
          Ok(text) => text.into_owned(),
          Err(_) => String::from_utf8_lossy(e).into_owned(),
        };
        if stack.len() > 1 && !text.trim().is_empty() {
          push_node(&mut stack, Node::Text(text));
        }
      }
      Ok(Event::CData(e)) => {
        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
        if stack.len() > 1 {
          push_node(&mut stack, Node::Text(text));
        }
      }
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::MalformedPayload(e.to_string())),
      _ => {}
    }
  }

  if stack.len() != 1 {
    let open = stack.last().map(|e| e.name.clone()).unwrap_or_default();
    return Err(Error::MalformedPayload(format!("unclosed element <{open}>")));
  }
  let document = stack.pop().unwrap_or_default();
  if document.elements().next().is_none() {
    return Err(Error::MalformedPayload("no root element".into()));
  }
  Ok(document)
}

fn push_node(stack: &mut [Element], node: Node) {
  if let Some(parent) = stack.last_mut() {
    parent.children.push(node);
  }
}

fn element_name(e: &BytesStart<'_>) -> String {
  let name = e.name();
  String::from_utf8_lossy(local_name(name.as_ref())).into_owned()
}

fn local_name(name: &[u8]) -> &[u8] {
  // strip "prefix:" if present
  if let Some(pos) = name.iter().rposition(|&b| b == b':') {
    &name[pos + 1..]
  } else {
    name
  }
}

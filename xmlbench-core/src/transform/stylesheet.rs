//! A compiled XSLT 1.0 subset: enough to turn a record document into HTML.
//!
//! Supported: `xsl:output`, top-level `xsl:param`, `xsl:template match`,
//! `xsl:value-of`, `xsl:apply-templates`, `xsl:text` and literal result elements.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::Source;
use crate::dom::{read_element, XmlDocument, XmlElement, XmlNode};
use crate::reader::TransformError;

const XSL_PREFIX: &str = "xsl:";

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn stylesheet_error(msg: impl Into<String>) -> TransformError {
    TransformError::Stylesheet(msg.into())
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMethod {
    #[default]
    Html,
    Xml,
}

#[derive(Debug, Clone, PartialEq)]
enum Pattern {
    /// `/`
    Document,
    /// `/name`: the top-level element
    Root(String),
    /// `name`
    Element(String),
    /// `*`
    AnyElement,
}

impl Pattern {
    fn parse(s: &str) -> Result<Self, TransformError> {
        let s = s.trim();
        match s {
            "/" => Ok(Pattern::Document),
            "*" => Ok(Pattern::AnyElement),
            _ => match s.strip_prefix('/') {
                Some(name) if is_name(name) => Ok(Pattern::Root(name.to_string())),
                None if is_name(s) => Ok(Pattern::Element(s.to_string())),
                _ => Err(stylesheet_error(format!("unsupported match pattern: {s}"))),
            },
        }
    }

    fn matches(&self, node: Node) -> bool {
        match (self, node) {
            (Pattern::Document, Node::Document(_)) => true,
            (Pattern::Root(name), Node::Element(e, true)) => e.name == *name,
            (Pattern::Element(name), Node::Element(e, _)) => e.name == *name,
            (Pattern::AnyElement, Node::Element(..)) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Select {
    /// `.`
    Context,
    /// `$name`
    Param(String),
    /// `a/b`, `@x`, `a/@x`
    Path {
        steps: Vec<String>,
        attribute: Option<String>,
    },
}

impl Select {
    fn parse(s: &str) -> Result<Self, TransformError> {
        let s = s.trim();
        if s == "." {
            return Ok(Select::Context);
        }
        if let Some(name) = s.strip_prefix('$') {
            if !is_name(name) {
                return Err(stylesheet_error(format!("invalid parameter reference: {s}")));
            }
            return Ok(Select::Param(name.to_string()));
        }

        let mut steps: Vec<String> = s.split('/').map(|p| p.trim().to_string()).collect();
        let attribute = steps
            .last()
            .and_then(|last| last.strip_prefix('@'))
            .map(str::to_string);
        if attribute.is_some() {
            steps.pop();
        }
        let valid = steps.iter().all(|step| step == "*" || is_name(step))
            && attribute.as_deref().map_or(true, is_name)
            && (!steps.is_empty() || attribute.is_some());
        if !valid {
            return Err(stylesheet_error(format!("unsupported select expression: {s}")));
        }
        Ok(Select::Path { steps, attribute })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Instruction {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        body: Vec<Instruction>,
    },
    Text(String),
    ValueOf(Select),
    ApplyTemplates(Option<Select>),
}

#[derive(Debug, Clone, PartialEq)]
struct Template {
    pattern: Pattern,
    body: Vec<Instruction>,
}

/// A node of the input tree: the document itself, an element flagged
/// with whether it is top-level, or a text run.
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Document(&'a XmlDocument),
    Element(&'a XmlElement, bool),
    Text(&'a str),
}

impl<'a> Node<'a> {
    fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::Document(doc) => doc.roots.iter().map(|e| Node::Element(e, true)).collect(),
            Node::Element(e, _) => e
                .children
                .iter()
                .map(|c| match c {
                    XmlNode::Element(c) => Node::Element(c, false),
                    XmlNode::Text(t) => Node::Text(t),
                })
                .collect(),
            Node::Text(_) => Vec::new(),
        }
    }

    fn string_value(self) -> String {
        match self {
            Node::Document(doc) => doc.root().map(|r| r.text_content()).unwrap_or_default(),
            Node::Element(e, _) => e.text_content(),
            Node::Text(t) => t.to_string(),
        }
    }
}

/// An immutable, compiled stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    method: OutputMethod,
    params: Vec<String>,
    templates: Vec<Template>,
}

enum Frame {
    Stylesheet,
    Template(Template),
    Literal {
        name: String,
        attributes: Vec<(String, String)>,
        body: Vec<Instruction>,
    },
    Text(String),
    Leaf,
}

impl Frame {
    fn body_mut(&mut self) -> Option<&mut Vec<Instruction>> {
        match self {
            Frame::Template(t) => Some(&mut t.body),
            Frame::Literal { body, .. } => Some(body),
            _ => None,
        }
    }
}

fn required<'a>(
    attributes: &'a [(String, String)],
    key: &str,
    element: &str,
) -> Result<&'a str, TransformError> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| stylesheet_error(format!("<{element}> requires a {key} attribute")))
}

fn optional<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[derive(Default)]
struct Compiler {
    stack: Vec<Frame>,
    sheet: Option<Stylesheet>,
    method: OutputMethod,
    params: Vec<String>,
    templates: Vec<Template>,
}

impl Compiler {
    fn parent_body(&mut self, what: &str) -> Result<&mut Vec<Instruction>, TransformError> {
        self.stack
            .last_mut()
            .and_then(Frame::body_mut)
            .ok_or_else(|| stylesheet_error(format!("{what} is only allowed inside a template")))
    }

    fn at_top_level(&self) -> bool {
        matches!(self.stack.last(), Some(Frame::Stylesheet))
    }

    fn start(&mut self, name: String, attributes: Vec<(String, String)>) -> Result<(), TransformError> {
        if self.stack.is_empty() {
            if name != "xsl:stylesheet" && name != "xsl:transform" {
                return Err(stylesheet_error(format!(
                    "root element must be xsl:stylesheet, found <{name}>"
                )));
            }
            self.stack.push(Frame::Stylesheet);
            return Ok(());
        }

        let Some(instruction) = name.strip_prefix(XSL_PREFIX) else {
            let attributes = attributes
                .into_iter()
                .filter(|(k, _)| k != "xmlns" && !k.starts_with("xmlns:"))
                .collect();
            self.parent_body(&format!("literal element <{name}>"))?;
            self.stack.push(Frame::Literal {
                name,
                attributes,
                body: Vec::new(),
            });
            return Ok(());
        };

        let frame = match instruction {
            "output" | "param" | "template" if !self.at_top_level() => {
                return Err(stylesheet_error(format!("<{name}> must be a top-level element")));
            }
            "output" => {
                self.method = match optional(&attributes, "method").unwrap_or("html") {
                    "html" => OutputMethod::Html,
                    "xml" => OutputMethod::Xml,
                    other => {
                        return Err(stylesheet_error(format!("unsupported output method: {other}")))
                    }
                };
                Frame::Leaf
            }
            "param" => {
                let param = required(&attributes, "name", &name)?;
                self.params.push(param.to_string());
                Frame::Leaf
            }
            "template" => {
                let pattern = Pattern::parse(required(&attributes, "match", &name)?)?;
                Frame::Template(Template {
                    pattern,
                    body: Vec::new(),
                })
            }
            "value-of" => {
                let select = Select::parse(required(&attributes, "select", &name)?)?;
                self.parent_body(&name)?.push(Instruction::ValueOf(select));
                Frame::Leaf
            }
            "apply-templates" => {
                let select = optional(&attributes, "select").map(Select::parse).transpose()?;
                self.parent_body(&name)?
                    .push(Instruction::ApplyTemplates(select));
                Frame::Leaf
            }
            "text" => {
                self.parent_body(&name)?;
                Frame::Text(String::new())
            }
            _ => return Err(stylesheet_error(format!("unsupported instruction <{name}>"))),
        };
        self.stack.push(frame);
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), TransformError> {
        match self.stack.last_mut() {
            Some(Frame::Text(buf)) => buf.push_str(text),
            Some(frame @ (Frame::Template(_) | Frame::Literal { .. })) => {
                if !text.trim().is_empty() {
                    if let Some(body) = frame.body_mut() {
                        body.push(Instruction::Text(text.to_string()));
                    }
                }
            }
            _ if text.trim().is_empty() => {}
            _ => return Err(stylesheet_error(format!("unexpected text: {}", text.trim()))),
        }
        Ok(())
    }

    fn end(&mut self) -> Result<(), TransformError> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| stylesheet_error("unbalanced end tag"))?;
        match frame {
            Frame::Stylesheet => {
                self.sheet = Some(Stylesheet {
                    method: self.method,
                    params: std::mem::take(&mut self.params),
                    templates: std::mem::take(&mut self.templates),
                });
            }
            Frame::Template(t) => self.templates.push(t),
            Frame::Literal {
                name,
                attributes,
                body,
            } => {
                self.parent_body("literal element")?.push(Instruction::Element {
                    name,
                    attributes,
                    body,
                });
            }
            Frame::Text(text) => self.parent_body("xsl:text")?.push(Instruction::Text(text)),
            Frame::Leaf => {}
        }
        Ok(())
    }
}

/// HTML/XML serializer for the result tree.
struct Output {
    method: OutputMethod,
    buf: String,
    raw_depth: usize,
}

impl Output {
    fn open(&mut self, name: &str, attributes: &[(String, String)]) {
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, val) in attributes {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(val.as_str()));
            self.buf.push('"');
        }
        self.buf.push('>');
        if self.method == OutputMethod::Html && RAW_TEXT_ELEMENTS.contains(&name) {
            self.raw_depth += 1;
        }
    }

    fn close(&mut self, name: &str) {
        if self.method == OutputMethod::Html {
            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            if RAW_TEXT_ELEMENTS.contains(&name) {
                self.raw_depth = self.raw_depth.saturating_sub(1);
            }
        }
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    fn text(&mut self, text: &str) {
        if self.raw_depth > 0 {
            self.buf.push_str(text);
        } else {
            self.buf.push_str(&escape(text));
        }
    }
}

struct Run<'s, 'p> {
    sheet: &'s Stylesheet,
    params: &'p [(&'p str, &'p str)],
    out: Output,
}

impl Run<'_, '_> {
    fn param(&self, name: &str) -> Result<String, TransformError> {
        if let Some((_, v)) = self.params.iter().find(|(k, _)| *k == name) {
            return Ok(v.to_string());
        }
        if self.sheet.params.iter().any(|p| p == name) {
            return Ok(String::new());
        }
        Err(stylesheet_error(format!("undeclared parameter ${name}")))
    }

    fn select<'a>(&self, node: Node<'a>, steps: &[String]) -> Vec<Node<'a>> {
        let mut current = vec![node];
        for step in steps {
            current = current
                .into_iter()
                .flat_map(|n| n.children())
                .filter(|n| match n {
                    Node::Element(e, _) => step == "*" || e.name == *step,
                    Node::Document(_) | Node::Text(_) => false,
                })
                .collect();
        }
        current
    }

    fn value_of(&self, select: &Select, node: Node) -> Result<String, TransformError> {
        Ok(match select {
            Select::Context => node.string_value(),
            Select::Param(name) => self.param(name)?,
            Select::Path { steps, attribute } => {
                let nodes = self.select(node, steps);
                match attribute {
                    Some(attr) => nodes
                        .into_iter()
                        .find_map(|n| match n {
                            Node::Element(e, _) => e.attribute(attr).map(str::to_string),
                            Node::Document(_) | Node::Text(_) => None,
                        })
                        .unwrap_or_default(),
                    None => nodes
                        .into_iter()
                        .next()
                        .map(Node::string_value)
                        .unwrap_or_default(),
                }
            }
        })
    }

    fn apply(&mut self, node: Node) -> Result<(), TransformError> {
        let sheet = self.sheet;
        match sheet.templates.iter().rev().find(|t| t.pattern.matches(node)) {
            Some(template) => self.execute(&template.body, node),
            None => self.builtin(node),
        }
    }

    fn builtin(&mut self, node: Node) -> Result<(), TransformError> {
        if let Node::Text(text) = node {
            self.out.text(text);
            return Ok(());
        }
        for child in node.children() {
            self.apply(child)?;
        }
        Ok(())
    }

    fn execute(&mut self, body: &[Instruction], node: Node) -> Result<(), TransformError> {
        for instruction in body {
            match instruction {
                Instruction::Element {
                    name,
                    attributes,
                    body,
                } => {
                    self.out.open(name, attributes);
                    self.execute(body, node)?;
                    self.out.close(name);
                }
                Instruction::Text(text) => self.out.text(text),
                Instruction::ValueOf(select) => {
                    let value = self.value_of(select, node)?;
                    self.out.text(&value);
                }
                Instruction::ApplyTemplates(None) => self.builtin(node)?,
                Instruction::ApplyTemplates(Some(Select::Path {
                    steps,
                    attribute: None,
                })) => {
                    for selected in self.select(node, steps) {
                        self.apply(selected)?;
                    }
                }
                Instruction::ApplyTemplates(Some(select)) => {
                    return Err(stylesheet_error(format!(
                        "apply-templates cannot select {select:?}"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Stylesheet {
    /// Compiles stylesheet source text.
    pub fn parse(source: &str) -> Result<Self, TransformError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(false);
        let mut compiler = Compiler::default();

        loop {
            match reader.read_event().map_err(|e| stylesheet_error(e.to_string()))? {
                Event::Start(e) => {
                    let (name, attributes) = read_element(&e)?;
                    compiler.start(name, attributes)?;
                }
                Event::Empty(e) => {
                    let (name, attributes) = read_element(&e)?;
                    compiler.start(name, attributes)?;
                    compiler.end()?;
                }
                Event::End(_) => compiler.end()?,
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| stylesheet_error(e.to_string()))?;
                    compiler.text(&text)?;
                }
                Event::CData(t) => {
                    let text = std::str::from_utf8(&t)
                        .map_err(|e| stylesheet_error(e.to_string()))?;
                    compiler.text(text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        compiler
            .sheet
            .ok_or_else(|| stylesheet_error("missing or unclosed xsl:stylesheet element"))
    }

    pub fn method(&self) -> OutputMethod {
        self.method
    }

    /// Names of the declared top-level parameters.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Converts `source` into the input model and applies the stylesheet to it.
    pub fn transform(
        &self,
        source: Source<'_>,
        params: &[(&str, &str)],
    ) -> Result<String, TransformError> {
        let doc = source.into_tree()?;
        self.transform_tree(&doc, params)
    }

    pub fn transform_tree(
        &self,
        doc: &XmlDocument,
        params: &[(&str, &str)],
    ) -> Result<String, TransformError> {
        let mut run = Run {
            sheet: self,
            params,
            out: Output {
                method: self.method,
                buf: String::new(),
                raw_depth: 0,
            },
        };
        run.apply(Node::Document(doc))?;
        Ok(run.out.buf)
    }
}

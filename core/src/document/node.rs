//! The document tree as the rich-text editor stores it.
//!
//! # Design
//! `Node` is an internally tagged enum, so each variant serialises to
//! `{"type": "<wire name>", ...fields}` exactly as the editor expects.
//! Containers hold `content: Vec<Node>`; leaf and optional fields are
//! skipped when empty so the output matches what the editor itself writes.
//!
//! The special blocks (`image-block`, `files`, `doc-siblings`, `embed`) keep
//! their payload in a typed struct. On the wire that payload travels as a
//! JSON string inside a single `text` child; the `stringified` helper does
//! the encoding at serialisation time and the decoding when reading back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::embed::{EmbedSize, EmbedType};
use crate::types::upload::UploadFileType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    #[serde(rename = "text")]
    Text(TextNode),
    #[serde(rename = "paragraph")]
    Paragraph(Block),
    #[serde(rename = "heading")]
    Heading(Heading),
    #[serde(rename = "bulletList")]
    BulletList(Block),
    #[serde(rename = "orderedList")]
    OrderedList(OrderedListNode),
    #[serde(rename = "listItem")]
    ListItem(Block),
    #[serde(rename = "extension-table")]
    Table(TableNode),
    #[serde(rename = "tableRow")]
    TableRow(TableRowNode),
    #[serde(rename = "tableCell")]
    TableCell(Cell),
    #[serde(rename = "tableHeader")]
    TableHeader(Cell),
    #[serde(rename = "horizontalRule")]
    HorizontalRule,
    #[serde(rename = "blockquote")]
    Blockquote(Block),
    #[serde(rename = "details")]
    Details(Block),
    #[serde(rename = "detailsSummary")]
    DetailsSummary(Block),
    #[serde(rename = "detailsContent")]
    DetailsContent(Block),
    #[serde(rename = "image-block")]
    ImageBlock(ImageBlockNode),
    #[serde(rename = "files")]
    Files(FilesNode),
    #[serde(rename = "custom-mention")]
    Mention(MentionNode),
    #[serde(rename = "doc-siblings")]
    DocSiblings(DocSiblingsNode),
    #[serde(rename = "codeBlock")]
    CodeBlock(CodeBlockNode),
    #[serde(rename = "embed")]
    Embed(EmbedNode),
    #[serde(rename = "taskList")]
    TaskList(TaskListNode),
    #[serde(rename = "taskItem")]
    TaskItem(TaskItemNode),
}

impl Node {
    /// The wire `type` discriminator.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Text(_) => "text",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList(_) => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::Table(_) => "extension-table",
            Node::TableRow(_) => "tableRow",
            Node::TableCell(_) => "tableCell",
            Node::TableHeader(_) => "tableHeader",
            Node::HorizontalRule => "horizontalRule",
            Node::Blockquote(_) => "blockquote",
            Node::Details(_) => "details",
            Node::DetailsSummary(_) => "detailsSummary",
            Node::DetailsContent(_) => "detailsContent",
            Node::ImageBlock(_) => "image-block",
            Node::Files(_) => "files",
            Node::Mention(_) => "custom-mention",
            Node::DocSiblings(_) => "doc-siblings",
            Node::CodeBlock(_) => "codeBlock",
            Node::Embed(_) => "embed",
            Node::TaskList(_) => "taskList",
            Node::TaskItem(_) => "taskItem",
        }
    }

    /// Structured children. Text runs, rules and envelope blocks have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph(b)
            | Node::BulletList(b)
            | Node::ListItem(b)
            | Node::Blockquote(b)
            | Node::Details(b)
            | Node::DetailsSummary(b)
            | Node::DetailsContent(b) => &b.content,
            Node::Heading(h) => &h.content,
            Node::OrderedList(l) => &l.content,
            Node::Table(t) => &t.content,
            Node::TableRow(r) => &r.content,
            Node::TableCell(c) | Node::TableHeader(c) => &c.content,
            Node::CodeBlock(c) => &c.content,
            Node::TaskList(l) => &l.content,
            Node::TaskItem(i) => &i.content,
            Node::Mention(m) => &m.content,
            Node::Text(_)
            | Node::HorizontalRule
            | Node::ImageBlock(_)
            | Node::Files(_)
            | Node::DocSiblings(_)
            | Node::Embed(_) => &[],
        }
    }

    /// The uid carried in `attrs`, for node types that have one.
    pub fn uid(&self) -> Option<&str> {
        match self {
            Node::Heading(h) => Some(&h.attrs.uid),
            Node::Table(t) => Some(&t.attrs.uid),
            Node::CodeBlock(c) => Some(&c.attrs.uid),
            Node::TaskList(l) => Some(&l.attrs.uid),
            Node::Mention(m) => Some(&m.attrs.uid),
            Node::ImageBlock(i) => Some(&i.attrs.base.uid),
            Node::Files(f) => Some(&f.attrs.uid),
            Node::DocSiblings(d) => Some(&d.attrs.uid),
            Node::Embed(e) => Some(&e.attrs.base.uid),
            _ => None,
        }
    }

    /// Concatenated text of every text run below this node.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(node: &Node, out: &mut String) {
    if let Node::Text(t) = node {
        out.push_str(&t.text);
    }
    for child in node.children() {
        collect_text(child, out);
    }
}

// ---------------------------------------------------------------------------
// Text and marks
// ---------------------------------------------------------------------------

/// A run of text with its formatting marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

/// Inline formatting on a text run.
///
/// Marks the editor supports but this crate does not build (`underline`,
/// `strike`, `highlight`...) read back as `Unknown` so a fetched document
/// still decodes. Their attrs are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Link { attrs: LinkAttrs },
    #[serde(other)]
    Unknown,
}

impl Mark {
    pub fn same_kind(&self, other: &Mark) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

// ---------------------------------------------------------------------------
// Containers
// ---------------------------------------------------------------------------

/// A node whose only payload is its children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

impl Block {
    pub fn new(content: Vec<Node>) -> Self {
        Self { content }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub attrs: HeadingAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingAttrs {
    pub level: u8,
    /// Empty when read back from a heading the editor stored without one.
    #[serde(default)]
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedListNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<OrderedListAttrs>,
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    pub start: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableNode {
    pub attrs: TableAttrs,
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttrs {
    pub uid: String,
    #[serde(default)]
    pub show_row_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRowNode {
    pub attrs: TableRowAttrs,
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRowAttrs {
    #[serde(default)]
    pub show_row_numbers: bool,
}

/// Body of both `tableCell` and `tableHeader`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub attrs: CellAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAttrs {
    pub colspan: u32,
    pub rowspan: u32,
}

impl Default for CellAttrs {
    fn default() -> Self {
        Self { colspan: 1, rowspan: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlockNode {
    pub attrs: CodeBlockAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    pub uid: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListNode {
    pub attrs: UidAttrs,
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UidAttrs {
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskItemNode {
    pub attrs: TaskItemAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItemAttrs {
    pub checked: bool,
}

// ---------------------------------------------------------------------------
// Mentions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionKind {
    User,
    Document,
    Task,
    Milestone,
}

/// An inline reference to a user, document, task or milestone. The target
/// lives in `attrs.data.item`; the single text child is a placeholder space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentionNode {
    pub attrs: MentionAttrs,
    #[serde(default)]
    pub content: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionAttrs {
    pub uid: String,
    pub custom: u8,
    pub inline: bool,
    pub data: MentionData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionData {
    pub item: MentionItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionItem {
    pub id: String,
    pub kind: MentionKind,
}

// ---------------------------------------------------------------------------
// Envelope blocks
// ---------------------------------------------------------------------------

/// Attributes shared by every envelope block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeAttrs {
    pub uid: String,
    pub custom: u8,
    pub contenteditable: String,
}

impl EnvelopeAttrs {
    pub fn fresh() -> Self {
        Self {
            uid: super::uid::next_uid(),
            custom: 1,
            contenteditable: "false".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlockNode {
    pub attrs: ImageAttrs,
    #[serde(rename = "content", with = "stringified")]
    pub data: ImageData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttrs {
    #[serde(flatten)]
    pub base: EnvelopeAttrs,
    pub width_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub file_id: String,
    pub src: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    pub extension: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_color: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesNode {
    pub attrs: EnvelopeAttrs,
    #[serde(rename = "content", with = "stringified")]
    pub data: FilesData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesData {
    pub files: Vec<FileEntry>,
}

/// One attachment inside a `files` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: String,
    pub file_id: String,
    pub url: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    #[serde(rename = "type")]
    pub file_type: UploadFileType,
    pub create_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocSiblingsNode {
    pub attrs: EnvelopeAttrs,
    #[serde(rename = "content", with = "stringified")]
    pub data: SiblingsData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiblingsData {
    #[serde(rename = "type")]
    pub kind: SiblingsKind,
}

/// What the server renders into a `doc-siblings` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiblingsKind {
    Toc,
    Anchors,
    Siblings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedNode {
    pub attrs: EmbedAttrs,
    #[serde(rename = "content", with = "stringified")]
    pub data: EmbedData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedAttrs {
    #[serde(flatten)]
    pub base: EnvelopeAttrs,
    pub size: EmbedSize,
    pub is_content_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedData {
    #[serde(rename = "type")]
    pub embed_type: EmbedType,
    pub url: String,
    pub extracted_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_content_hidden: Option<bool>,
}

/// Encodes a payload as `[{"type": "text", "text": "<payload as JSON>"}]`.
mod stringified {
    use serde::de::{DeserializeOwned, Error as _};
    use serde::ser::{Error as _, SerializeSeq};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    struct TextChildRef<'a> {
        #[serde(rename = "type")]
        kind: &'static str,
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct TextChild {
        text: String,
    }

    pub fn serialize<T: Serialize, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        let json = serde_json::to_string(value).map_err(S::Error::custom)?;
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&TextChildRef {
            kind: "text",
            text: &json,
        })?;
        seq.end()
    }

    pub fn deserialize<'de, T: DeserializeOwned, D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        let children = Vec::<TextChild>::deserialize(deserializer)?;
        let child = children
            .into_iter()
            .next()
            .ok_or_else(|| D::Error::custom("envelope block has no text child"))?;
        serde_json::from_str(&child.text).map_err(D::Error::custom)
    }
}

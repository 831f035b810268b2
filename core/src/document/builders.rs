//! Constructors for every node type.
//!
//! # Design
//! Builders are pure: they never fail and never perform I/O. Arguments that
//! accept "a string or an already built node" take `impl Into<Content>`, and
//! each builder decides how a bare string is wrapped:
//!
//! | builder                              | bare string becomes            |
//! |--------------------------------------|--------------------------------|
//! | `paragraph`, `heading`, `blockquote`, `details_summary` | `text(s)`   |
//! | `list_item`, `table_cell`, `table_header`, `task_item`, `details_content` | `paragraph(s)` |
//! | `bullet_list`, `ordered_list`        | `list_item(paragraph(s))`      |
//! | `table_row`                          | `table_cell(s)`                |
//! | `task_list`                          | unchecked `task_item(s)`       |
//!
//! Builders with options return a small builder value (`OrderedList`,
//! `TableBuilder`, `CellBuilder`, ...) that converts into `Node`. Inputs are
//! passed through uncritically; see `validate` for an opt-in structural check.

use chrono::Utc;
use serde_json::Value;

use super::embed::{extract_url, EmbedSize, EmbedType};
use super::node::*;
use super::uid::next_uid;
use super::Content;
use crate::types::upload::{UploadFileType, UploadedFile};

fn wrap_all<I, C>(items: I, wrap: impl Fn(String) -> Node) -> Vec<Node>
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    items
        .into_iter()
        .map(|item| match item.into() {
            Content::Text(s) => wrap(s),
            Content::Node(node) => node,
        })
        .collect()
}

fn text_node(s: String) -> Node {
    Node::Text(text(s))
}

fn paragraph_node(s: String) -> Node {
    paragraph([s])
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// A text run. An empty string becomes a single space, since the editor
/// rejects zero-length text nodes.
pub fn text(content: impl Into<String>) -> TextNode {
    let mut text = content.into();
    if text.is_empty() {
        text.push(' ');
    }
    TextNode { text, marks: Vec::new() }
}

/// A text run linked to `href`, opening in a new tab.
pub fn link_text(content: impl Into<String>, href: impl Into<String>) -> TextNode {
    text(content).link(href)
}

fn mark_rank(mark: &Mark) -> u8 {
    match mark {
        Mark::Bold => 0,
        Mark::Italic => 1,
        Mark::Code => 2,
        Mark::Link { .. } => 3,
        Mark::Unknown => 4,
    }
}

impl TextNode {
    /// Add `mark`, replacing any mark of the same kind. Marks are kept in
    /// bold, italic, code, link order.
    pub fn mark(mut self, mark: Mark) -> Self {
        self.marks.retain(|m| !m.same_kind(&mark));
        self.marks.push(mark);
        self.marks.sort_by_key(mark_rank);
        self
    }

    pub fn bold(self) -> Self {
        self.mark(Mark::Bold)
    }

    pub fn italic(self) -> Self {
        self.mark(Mark::Italic)
    }

    pub fn code(self) -> Self {
        self.mark(Mark::Code)
    }

    pub fn link(self, href: impl Into<String>) -> Self {
        self.link_with_target(href, "_blank")
    }

    pub fn link_with_target(self, href: impl Into<String>, target: impl Into<String>) -> Self {
        self.mark(Mark::Link {
            attrs: LinkAttrs {
                href: href.into(),
                target: Some(target.into()),
            },
        })
    }

    pub fn has_mark(&self, kind: &Mark) -> bool {
        self.marks.iter().any(|m| m.same_kind(kind))
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

pub fn paragraph<I, C>(content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::Paragraph(Block::new(wrap_all(content, text_node)))
}

/// A heading with a fresh uid. `level` is not clamped; headings outside
/// 1..=6 are reported by `validate`.
pub fn heading<I, C>(level: u8, content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::Heading(Heading {
        attrs: HeadingAttrs { level, uid: next_uid() },
        content: wrap_all(content, text_node),
    })
}

pub fn blockquote<I, C>(content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::Blockquote(Block::new(wrap_all(content, text_node)))
}

pub fn horizontal_rule() -> Node {
    Node::HorizontalRule
}

/// A paragraph holding a line of 43 `━`.
pub fn separator() -> Node {
    separator_with('━', 43)
}

pub fn separator_with(ch: char, length: usize) -> Node {
    paragraph([std::iter::repeat(ch).take(length).collect::<String>()])
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// A list item. Pass a list node among `content` to nest.
pub fn list_item<I, C>(content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::ListItem(Block::new(wrap_all(content, paragraph_node)))
}

fn list_entry(s: String) -> Node {
    list_item([paragraph([s])])
}

pub fn bullet_list<I, C>(items: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::BulletList(Block {
        content: wrap_all(items, list_entry),
    })
}

pub fn ordered_list<I, C>(items: I) -> OrderedList
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    OrderedList {
        items: wrap_all(items, list_entry),
        start: 1,
    }
}

/// Numbered list; `start` is written only when it is not 1.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList {
    items: Vec<Node>,
    start: i64,
}

impl OrderedList {
    pub fn start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }
}

impl From<OrderedList> for Node {
    fn from(list: OrderedList) -> Self {
        Node::OrderedList(OrderedListNode {
            attrs: (list.start != 1).then_some(OrderedListAttrs { start: list.start }),
            content: list.items,
        })
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Rows are placed as given; row widths are not reconciled.
pub fn table<I, C>(rows: I) -> TableBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    TableBuilder {
        rows: wrap_all(rows, |s| table_row([s]).into()),
        show_row_numbers: false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBuilder {
    rows: Vec<Node>,
    show_row_numbers: bool,
}

impl TableBuilder {
    pub fn show_row_numbers(mut self, show: bool) -> Self {
        self.show_row_numbers = show;
        self
    }
}

impl From<TableBuilder> for Node {
    fn from(table: TableBuilder) -> Self {
        Node::Table(TableNode {
            attrs: TableAttrs {
                uid: next_uid(),
                show_row_numbers: table.show_row_numbers,
            },
            content: table.rows,
        })
    }
}

/// A row of cells and headers, mixed freely.
pub fn table_row<I, C>(cells: I) -> RowBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    RowBuilder {
        cells: wrap_all(cells, |s| table_cell([s]).into()),
        show_row_numbers: false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowBuilder {
    cells: Vec<Node>,
    show_row_numbers: bool,
}

impl RowBuilder {
    pub fn show_row_numbers(mut self, show: bool) -> Self {
        self.show_row_numbers = show;
        self
    }
}

impl From<RowBuilder> for Node {
    fn from(row: RowBuilder) -> Self {
        Node::TableRow(TableRowNode {
            attrs: TableRowAttrs {
                show_row_numbers: row.show_row_numbers,
            },
            content: row.cells,
        })
    }
}

pub fn table_cell<I, C>(content: I) -> CellBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    CellBuilder::new(false, wrap_all(content, paragraph_node))
}

pub fn table_header<I, C>(content: I) -> CellBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    CellBuilder::new(true, wrap_all(content, paragraph_node))
}

/// A `tableCell` or `tableHeader`; spans default to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBuilder {
    header: bool,
    attrs: CellAttrs,
    content: Vec<Node>,
}

impl CellBuilder {
    fn new(header: bool, content: Vec<Node>) -> Self {
        Self {
            header,
            attrs: CellAttrs::default(),
            content,
        }
    }

    pub fn colspan(mut self, colspan: u32) -> Self {
        self.attrs.colspan = colspan;
        self
    }

    pub fn rowspan(mut self, rowspan: u32) -> Self {
        self.attrs.rowspan = rowspan;
        self
    }
}

impl From<CellBuilder> for Node {
    fn from(cell: CellBuilder) -> Self {
        let body = Cell {
            attrs: cell.attrs,
            content: cell.content,
        };
        if cell.header {
            Node::TableHeader(body)
        } else {
            Node::TableCell(body)
        }
    }
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

pub fn details_summary<I, C>(content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::DetailsSummary(Block::new(wrap_all(content, text_node)))
}

pub fn details_content<I, C>(content: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::DetailsContent(Block::new(wrap_all(content, paragraph_node)))
}

/// A collapsible section, always shaped `[detailsSummary, detailsContent]`.
///
/// A string summary is wrapped in `details_summary`; any other node is
/// used as the summary as given. Body strings become paragraphs, and the
/// children of a `detailsContent` passed in the body are merged into the
/// single content node.
pub fn details<S, I, C>(summary: S, content: I) -> Node
where
    S: Into<Content>,
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    let summary = match summary.into() {
        Content::Text(s) => details_summary([s]),
        Content::Node(node) => node,
    };

    let mut body = Vec::new();
    for item in content {
        match item.into() {
            Content::Text(s) => body.push(paragraph([s])),
            Content::Node(Node::DetailsContent(block)) => body.extend(block.content),
            Content::Node(node) => body.push(node),
        }
    }

    Node::Details(Block::new(vec![summary, Node::DetailsContent(Block::new(body))]))
}

// ---------------------------------------------------------------------------
// Mentions
// ---------------------------------------------------------------------------

/// Inline reference to `item_id`. The server checks that the target exists.
pub fn mention(item_id: impl Into<String>, kind: MentionKind) -> Node {
    Node::Mention(MentionNode {
        attrs: MentionAttrs {
            uid: next_uid(),
            custom: 1,
            inline: true,
            data: MentionData {
                item: MentionItem {
                    id: item_id.into(),
                    kind,
                },
            },
        },
        content: vec![Node::Text(text(" "))],
    })
}

pub fn mention_user(member_id: impl Into<String>) -> Node {
    mention(member_id, MentionKind::User)
}

pub fn mention_document(document_id: impl Into<String>) -> Node {
    mention(document_id, MentionKind::Document)
}

pub fn mention_task(task_id: impl Into<String>) -> Node {
    mention(task_id, MentionKind::Task)
}

pub fn mention_milestone(milestone_id: impl Into<String>) -> Node {
    mention(milestone_id, MentionKind::Milestone)
}

// ---------------------------------------------------------------------------
// Images and files
// ---------------------------------------------------------------------------

/// MIME type for an image extension, if it is one the editor previews.
pub fn image_mime_type(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

pub fn image_block(
    file_id: impl Into<String>,
    src: impl Into<String>,
    file_name: impl Into<String>,
    file_size: u64,
) -> ImageBlock {
    ImageBlock {
        data: ImageData {
            file_id: file_id.into(),
            src: src.into(),
            file_name: file_name.into(),
            file_size,
            file_type: "image/png".to_string(),
            extension: "png".to_string(),
            dimensions: None,
            aspect_ratio: None,
            caption: String::new(),
            dominant_color: None,
        },
        width_percent: 100,
    }
}

/// An image block describing an uploaded file, with its measured
/// dimensions and dominant color when the server reported them.
pub fn image_block_from_file(file: &UploadedFile) -> ImageBlock {
    let file_type = if file.mime.is_empty() {
        image_mime_type(&file.ext)
            .map(str::to_string)
            .unwrap_or_else(|| format!("image/{}", file.ext.to_ascii_lowercase()))
    } else {
        file.mime.clone()
    };

    let mut block = image_block(&file.id, &file.url, &file.name, file.size)
        .file_type(file_type)
        .extension(&file.ext);
    if let Some([w, h]) = file.dimensions() {
        block = block.dimensions(w, h);
    }
    if let Some(color) = &file.dominant_color {
        block = block.dominant_color(color.clone());
    }
    block
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    data: ImageData,
    width_percent: u32,
}

impl ImageBlock {
    pub fn file_type(mut self, mime: impl Into<String>) -> Self {
        self.data.file_type = mime.into();
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.data.extension = extension.into();
        self
    }

    pub fn width_percent(mut self, percent: u32) -> Self {
        self.width_percent = percent;
        self
    }

    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.data.dimensions = Some([width, height]);
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.data.caption = caption.into();
        self
    }

    /// Overrides the ratio otherwise derived from `dimensions`.
    pub fn aspect_ratio(mut self, ratio: f64) -> Self {
        self.data.aspect_ratio = Some(ratio);
        self
    }

    pub fn dominant_color(mut self, color: Value) -> Self {
        self.data.dominant_color = Some(color);
        self
    }
}

impl From<ImageBlock> for Node {
    fn from(block: ImageBlock) -> Self {
        let mut data = block.data;
        if data.aspect_ratio.is_none() {
            if let Some([w, h]) = data.dimensions {
                if h > 0 {
                    data.aspect_ratio = Some(f64::from(w) / f64::from(h));
                }
            }
        }
        Node::ImageBlock(ImageBlockNode {
            attrs: ImageAttrs {
                base: EnvelopeAttrs::fresh(),
                width_percent: block.width_percent,
            },
            data,
        })
    }
}

/// One attachment for `files_block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub file_id: String,
    pub url: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    pub file_type: UploadFileType,
}

impl FileItem {
    pub fn from_uploaded(file: &UploadedFile) -> Self {
        Self {
            file_id: file.id.clone(),
            url: file.url.clone(),
            name: file.name.clone(),
            size: file.size,
            extension: file.ext.clone(),
            file_type: file.file_type,
        }
    }
}

/// A file list. Each entry gets a fresh id, and all entries share one
/// millisecond `createAt` stamp.
pub fn files_block(items: impl IntoIterator<Item = FileItem>) -> Node {
    let created = Utc::now().timestamp_millis();
    let files = items
        .into_iter()
        .map(|item| FileEntry {
            id: next_uid(),
            file_id: item.file_id,
            url: item.url,
            name: item.name,
            size: item.size,
            extension: item.extension,
            file_type: item.file_type,
            create_at: created,
        })
        .collect();

    Node::Files(FilesNode {
        attrs: EnvelopeAttrs::fresh(),
        data: FilesData { files },
    })
}

// ---------------------------------------------------------------------------
// Server-rendered blocks
// ---------------------------------------------------------------------------

fn doc_siblings(kind: SiblingsKind) -> Node {
    Node::DocSiblings(DocSiblingsNode {
        attrs: EnvelopeAttrs::fresh(),
        data: SiblingsData { kind },
    })
}

/// Table of contents, rendered by the server from the document's headings.
pub fn toc_block() -> Node {
    doc_siblings(SiblingsKind::Toc)
}

pub fn anchors_block() -> Node {
    doc_siblings(SiblingsKind::Anchors)
}

pub fn siblings_block() -> Node {
    doc_siblings(SiblingsKind::Siblings)
}

// ---------------------------------------------------------------------------
// Code
// ---------------------------------------------------------------------------

/// A code block. An empty `code` yields a block with no `content` at all.
pub fn code_block(code: impl Into<String>, language: impl Into<String>) -> Node {
    let code = code.into();
    let content = if code.is_empty() {
        Vec::new()
    } else {
        vec![Node::Text(TextNode {
            text: code,
            marks: Vec::new(),
        })]
    };
    Node::CodeBlock(CodeBlockNode {
        attrs: CodeBlockAttrs {
            uid: next_uid(),
            language: language.into(),
        },
        content,
    })
}

// ---------------------------------------------------------------------------
// Embeds
// ---------------------------------------------------------------------------

pub fn embed_block(url: impl Into<String>, embed_type: EmbedType) -> EmbedBlock {
    EmbedBlock {
        url: url.into(),
        embed_type,
        size: EmbedSize::default(),
        content_hidden: false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedBlock {
    url: String,
    embed_type: EmbedType,
    size: EmbedSize,
    content_hidden: bool,
}

impl EmbedBlock {
    pub fn size(mut self, size: EmbedSize) -> Self {
        self.size = size;
        self
    }

    /// Collapse the embed. Always reflected in `attrs`; in the payload only
    /// for types that carry the flag.
    pub fn content_hidden(mut self, hidden: bool) -> Self {
        self.content_hidden = hidden;
        self
    }
}

impl From<EmbedBlock> for Node {
    fn from(block: EmbedBlock) -> Self {
        let extracted_url = extract_url(&block.url, block.embed_type);
        Node::Embed(EmbedNode {
            attrs: EmbedAttrs {
                base: EnvelopeAttrs::fresh(),
                size: block.size,
                is_content_hidden: block.content_hidden,
            },
            data: EmbedData {
                embed_type: block.embed_type,
                is_content_hidden: block.embed_type.payload_hidden_flag(block.content_hidden),
                url: block.url,
                extracted_url,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Checklists
// ---------------------------------------------------------------------------

pub fn task_list<I, C>(items: I) -> Node
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    Node::TaskList(TaskListNode {
        attrs: UidAttrs { uid: next_uid() },
        content: wrap_all(items, |s| task_item([s]).into()),
    })
}

/// A checklist entry, unchecked unless `.checked(true)`.
pub fn task_item<I, C>(content: I) -> TaskItemBuilder
where
    I: IntoIterator<Item = C>,
    C: Into<Content>,
{
    TaskItemBuilder {
        checked: false,
        content: wrap_all(content, paragraph_node),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskItemBuilder {
    checked: bool,
    content: Vec<Node>,
}

impl TaskItemBuilder {
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

impl From<TaskItemBuilder> for Node {
    fn from(item: TaskItemBuilder) -> Self {
        Node::TaskItem(TaskItemNode {
            attrs: TaskItemAttrs { checked: item.checked },
            content: item.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use serde_json::{json, Value};

    use super::*;
    use crate::content;

    fn wire(node: impl Into<Node>) -> Value {
        serde_json::to_value(node.into()).unwrap()
    }

    fn payload(node: &Value) -> Value {
        serde_json::from_str(node["content"][0]["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn text_marks_in_canonical_order() {
        let node = text("hi").link("https://vaiz.app").code().bold().italic().bold();
        assert_eq!(
            wire(node),
            json!({
                "type": "text",
                "text": "hi",
                "marks": [
                    {"type": "bold"},
                    {"type": "italic"},
                    {"type": "code"},
                    {"type": "link", "attrs": {"href": "https://vaiz.app", "target": "_blank"}}
                ]
            })
        );
    }

    #[test]
    fn empty_text_becomes_space() {
        assert_eq!(text("").text, " ");
        assert_eq!(wire(text("x")), json!({"type": "text", "text": "x"}));
    }

    #[test]
    fn paragraph_wraps_strings_and_omits_empty_content() {
        assert_eq!(
            wire(paragraph(content!["x", text("y").bold()])),
            json!({"type": "paragraph", "content": [
                {"type": "text", "text": "x"},
                {"type": "text", "text": "y", "marks": [{"type": "bold"}]}
            ]})
        );
        assert_eq!(wire(paragraph(Vec::<Content>::new())), json!({"type": "paragraph"}));
    }

    #[test]
    fn heading_uids_are_unique() {
        let uids: HashSet<String> = (0..500)
            .map(|i| heading(1 + (i % 6) as u8, ["h"]).uid().unwrap().to_string())
            .collect();
        assert_eq!(uids.len(), 500);

        let json = wire(heading(3, ["Title"]));
        assert_eq!(json["attrs"]["level"], 3);
        assert_eq!(json["attrs"]["uid"].as_str().unwrap().len(), 12);
    }

    #[test]
    fn lists_wrap_strings_and_nest() {
        let nested = bullet_list(content![
            "a",
            list_item(content![paragraph(["b"]), bullet_list(["b.1"])])
        ]);
        assert_eq!(
            wire(nested),
            json!({"type": "bulletList", "content": [
                {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "a"}]}]},
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "b"}]},
                    {"type": "bulletList", "content": [
                        {"type": "listItem", "content": [{"type": "paragraph", "content": [{"type": "text", "text": "b.1"}]}]}
                    ]}
                ]}
            ]})
        );
    }

    #[test]
    fn ordered_list_start_only_when_not_one() {
        assert!(wire(ordered_list(["a"])).get("attrs").is_none());
        assert_eq!(wire(ordered_list(["a"]).start(5))["attrs"], json!({"start": 5}));
    }

    #[test]
    fn table_shape() {
        let t = table([
            table_row(content![table_header(["Name"]), table_header(["Status"])]),
            table_row(content!["Task", table_cell(["Done"]).colspan(2)]),
        ]);
        let json = wire(t);
        assert_eq!(json["type"], "extension-table");
        assert_eq!(json["attrs"]["showRowNumbers"], false);
        assert_eq!(json["attrs"]["uid"].as_str().unwrap().len(), 12);
        let rows = json["content"].as_array().unwrap();
        assert_eq!(rows[0]["attrs"], json!({"showRowNumbers": false}));
        assert_eq!(rows[0]["content"][0]["type"], "tableHeader");
        assert_eq!(
            rows[1]["content"][0],
            json!({"type": "tableCell", "attrs": {"colspan": 1, "rowspan": 1},
                   "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Task"}]}]})
        );
        assert_eq!(rows[1]["content"][1]["attrs"], json!({"colspan": 2, "rowspan": 1}));
    }

    #[test]
    fn horizontal_rule_and_separator() {
        assert_eq!(wire(horizontal_rule()), json!({"type": "horizontalRule"}));
        let sep = separator().plain_text();
        assert_eq!(sep.chars().count(), 43);
        assert!(sep.chars().all(|c| c == '━'));
        assert_eq!(separator_with('-', 3).plain_text(), "---");
    }

    #[test]
    fn details_normalises_to_summary_and_content() {
        let node = details("More", content!["first", details_content(["second"]), bullet_list(["x"])]);
        let json = wire(node);
        let parts = json["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], json!({"type": "detailsSummary", "content": [{"type": "text", "text": "More"}]}));
        let body = parts[1]["content"].as_array().unwrap();
        assert_eq!(parts[1]["type"], "detailsContent");
        let types: Vec<&str> = body.iter().map(|n| n["type"].as_str().unwrap()).collect();
        assert_eq!(types, vec!["paragraph", "paragraph", "bulletList"]);
    }

    #[test]
    fn details_keeps_prebuilt_summary() {
        let summary = details_summary(content![text("Bold").bold()]);
        let node = details(summary.clone(), Vec::<Content>::new());
        assert_eq!(node.children()[0], summary);
    }

    #[test]
    fn mention_envelope() {
        let json = wire(mention_task("t1"));
        assert_eq!(json["type"], "custom-mention");
        assert_eq!(json["attrs"]["custom"], 1);
        assert_eq!(json["attrs"]["inline"], true);
        assert_eq!(json["attrs"]["data"], json!({"item": {"id": "t1", "kind": "Task"}}));
        assert_eq!(json["content"], json!([{"type": "text", "text": " "}]));
        assert_eq!(wire(mention_user("u"))["attrs"]["data"]["item"]["kind"], "User");
        assert_eq!(wire(mention_document("d"))["attrs"]["data"]["item"]["kind"], "Document");
        assert_eq!(wire(mention_milestone("m"))["attrs"]["data"]["item"]["kind"], "Milestone");
    }

    #[test]
    fn image_block_derives_aspect_ratio() {
        let json = wire(image_block("f1", "https://cdn/x.png", "x.png", 100).dimensions(800, 400));
        assert_eq!(json["attrs"]["widthPercent"], 100);
        assert_eq!(json["attrs"]["contenteditable"], "false");
        let data = payload(&json);
        assert_eq!(data["aspectRatio"], 2.0);
        assert_eq!(data["fileType"], "image/png");
        assert_eq!(data["dimensions"], json!([800, 400]));
        assert_eq!(data["caption"], "");
    }

    #[test]
    fn image_block_zero_height_has_no_ratio() {
        let data = payload(&wire(image_block("f", "s", "n", 1).dimensions(10, 0)));
        assert!(data.get("aspectRatio").is_none());
        let data = payload(&wire(image_block("f", "s", "n", 1).dimensions(10, 0).aspect_ratio(1.5)));
        assert_eq!(data["aspectRatio"], 1.5);
    }

    #[test]
    fn image_block_from_file_falls_back_to_extension() {
        let file: UploadedFile = serde_json::from_value(json!({
            "_id": "f1", "url": "https://cdn/p.jpg", "name": "p.jpg", "type": "Image",
            "ext": "jpg", "size": 5, "mime": "", "originalName": "p.jpg", "dimension": [3, 2]
        }))
        .unwrap();
        let data = payload(&wire(image_block_from_file(&file)));
        assert_eq!(data["fileType"], "image/jpeg");
        assert_eq!(data["extension"], "jpg");
        assert_eq!(data["fileId"], "f1");
        assert_eq!(data["aspectRatio"], 1.5);
    }

    #[test]
    fn files_block_stamps_ids_and_shared_time() {
        let item = |name: &str| FileItem {
            file_id: format!("id-{name}"),
            url: format!("https://cdn/{name}"),
            name: name.to_string(),
            size: 1,
            extension: "pdf".into(),
            file_type: UploadFileType::Pdf,
        };
        let data = payload(&wire(files_block([item("a.pdf"), item("b.pdf")])));
        let files = data["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert_ne!(files[0]["id"], files[1]["id"]);
        assert_eq!(files[0]["createAt"], files[1]["createAt"]);
        assert_eq!(files[1]["type"], "Pdf");
        assert_eq!(files[0]["fileId"], "id-a.pdf");
    }

    #[test]
    fn siblings_blocks_differ_only_in_type() {
        assert_eq!(payload(&wire(toc_block())), json!({"type": "toc"}));
        assert_eq!(payload(&wire(anchors_block())), json!({"type": "anchors"}));
        assert_eq!(payload(&wire(siblings_block())), json!({"type": "siblings"}));
        assert_eq!(wire(toc_block())["type"], "doc-siblings");
    }

    #[test]
    fn empty_code_block_has_no_content() {
        let json = wire(code_block("", ""));
        assert!(json.get("content").is_none());
        assert_eq!(json["attrs"]["language"], "");

        let json = wire(code_block("fn main() {}", "rust"));
        assert_eq!(json["content"], json!([{"type": "text", "text": "fn main() {}"}]));
    }

    #[test]
    fn figma_payload_always_hidden() {
        let json = wire(embed_block("https://www.figma.com/design/abc/F", EmbedType::Figma).content_hidden(false));
        assert_eq!(json["attrs"]["isContentHidden"], false);
        assert_eq!(json["attrs"]["size"], "medium");
        let data = payload(&json);
        assert_eq!(data["isContentHidden"], true);
        assert_eq!(data["type"], "Figma");
        assert_eq!(data["url"], "https://www.figma.com/design/abc/F");
    }

    #[test]
    fn embed_hidden_flag_per_type() {
        let miro = wire(embed_block("https://miro.com/app/board/x", EmbedType::Miro).content_hidden(true));
        assert_eq!(payload(&miro)["isContentHidden"], true);

        let youtube = wire(embed_block("https://youtu.be/abc", EmbedType::YouTube).content_hidden(true));
        assert_eq!(youtube["attrs"]["isContentHidden"], true);
        let data = payload(&youtube);
        assert!(data.get("isContentHidden").is_none());
        assert_eq!(data["extractedUrl"], "https://www.youtube.com/embed/abc");
    }

    #[test]
    fn task_list_wraps_strings_as_unchecked() {
        let json = wire(task_list(content!["open", task_item(["done"]).checked(true)]));
        let items = json["content"].as_array().unwrap();
        assert_eq!(json["attrs"]["uid"].as_str().unwrap().len(), 12);
        assert_eq!(items[0]["attrs"], json!({"checked": false}));
        assert_eq!(items[0]["content"][0]["type"], "paragraph");
        assert_eq!(items[1]["attrs"], json!({"checked": true}));
    }

    #[test]
    fn builders_round_trip_through_serde() {
        let nodes = vec![
            heading(1, ["T"]),
            table([table_row(["a"])]).into(),
            embed_block("https://gist.github.com/u/1", EmbedType::GitHubGist).into(),
            image_block("f", "s", "n", 1).into(),
            mention_user("u"),
            task_list(["x"]),
        ];
        let json = serde_json::to_string(&nodes).unwrap();
        let back: Vec<Node> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, nodes);
    }
}

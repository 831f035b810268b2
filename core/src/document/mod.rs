//! Rich-text document trees.
//!
//! Build a tree with the functions in `builders` (re-exported here), hand the
//! node list to `Session::replace_json_document` or `append_json_document`,
//! and read it back with `get_json_document`.
//!
//! ```
//! use vaiz_core::content;
//! use vaiz_core::document::*;
//!
//! let doc = vec![
//!     heading(1, ["Release notes"]),
//!     paragraph(content!["Shipped ", text("today").bold()]),
//!     bullet_list(["faster sync", "fewer bugs"]),
//!     table([table_row(["Area", "Owner"]), table_row(["Docs", "Ana"])]).into(),
//! ];
//! assert!(validate(&doc).is_empty());
//! ```

pub mod builders;
pub mod embed;
pub mod node;
pub mod uid;
pub mod validate;

pub use builders::*;
pub use embed::{extract_url, EmbedSize, EmbedType};
pub use node::*;
pub use uid::next_uid;
pub use validate::{validate, Violation};

/// A builder argument: a bare string, wrapped by the receiving builder, or
/// a node used as is.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Node(Node),
}

impl From<&str> for Content {
    fn from(s: &str) -> Self {
        Content::Text(s.to_string())
    }
}

impl From<String> for Content {
    fn from(s: String) -> Self {
        Content::Text(s)
    }
}

impl From<&String> for Content {
    fn from(s: &String) -> Self {
        Content::Text(s.clone())
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Node(node)
    }
}

macro_rules! content_from_builder {
    ($($builder:ty),* $(,)?) => {
        $(
            impl From<$builder> for Content {
                fn from(builder: $builder) -> Self {
                    Content::Node(builder.into())
                }
            }
        )*
    };
}

content_from_builder!(
    TextNode,
    OrderedList,
    TableBuilder,
    RowBuilder,
    CellBuilder,
    ImageBlock,
    EmbedBlock,
    TaskItemBuilder,
);

/// A `Vec<Content>` from a mix of strings, nodes and builders.
#[macro_export]
macro_rules! content {
    ($($item:expr),* $(,)?) => {{
        let items: ::std::vec::Vec<$crate::document::Content> =
            ::std::vec![$($crate::document::Content::from($item)),*];
        items
    }};
}

/// A `Vec<Node>` from nodes and builders.
#[macro_export]
macro_rules! nodes {
    ($($item:expr),* $(,)?) => {{
        let items: ::std::vec::Vec<$crate::document::Node> =
            ::std::vec![$($crate::document::Node::from($item)),*];
        items
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_macro_mixes_kinds() {
        let items = crate::content!["a", String::from("b"), text("c").italic(), horizontal_rule()];
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], Content::Text("a".into()));
        assert!(matches!(items[2], Content::Node(Node::Text(_))));
        assert!(matches!(items[3], Content::Node(Node::HorizontalRule)));
    }

    #[test]
    fn nodes_macro_converts_builders() {
        let nodes = crate::nodes![
            heading(2, ["H"]),
            ordered_list(["a"]).start(3),
            code_block("", ""),
            embed_block("https://vimeo.com/1", EmbedType::Vimeo),
        ];
        let types: Vec<&str> = nodes.iter().map(Node::type_name).collect();
        assert_eq!(types, vec!["heading", "orderedList", "codeBlock", "embed"]);
    }
}

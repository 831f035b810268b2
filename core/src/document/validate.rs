//! Opt-in structural checks for a node list.
//!
//! Builders accept anything and the server is the final authority, so
//! nothing in the crate calls this on its own. It is meant for tests and
//! for callers that assemble trees from untrusted input.

use std::collections::HashSet;

use thiserror::Error;

use super::node::Node;

/// One structural problem, located by a path of child indices from the
/// top-level list (`[2, 0]` is the first child of the third block).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{path:?}: heading level {level} is outside 1..=6")]
    HeadingLevel { path: Vec<usize>, level: u8 },

    #[error("{path:?}: heading has no uid")]
    MissingHeadingUid { path: Vec<usize> },

    #[error("{path:?}: heading uid {uid} is already used")]
    DuplicateHeadingUid { path: Vec<usize>, uid: String },

    #[error("{path:?}: {parent} may not contain {child}")]
    UnexpectedChild {
        path: Vec<usize>,
        parent: &'static str,
        child: &'static str,
    },

    #[error("{path:?}: cell span must be at least 1")]
    ZeroSpan { path: Vec<usize> },

    #[error("{path:?}: details must hold exactly a detailsSummary then a detailsContent")]
    DetailsShape { path: Vec<usize> },

    #[error("{path:?}: text run is empty")]
    EmptyText { path: Vec<usize> },
}

/// Walk `nodes` and report every violation found, in document order.
pub fn validate(nodes: &[Node]) -> Vec<Violation> {
    let mut walker = Walker::default();
    for (i, node) in nodes.iter().enumerate() {
        walker.visit(node, &mut vec![i]);
    }
    walker.violations
}

#[derive(Default)]
struct Walker {
    heading_uids: HashSet<String>,
    violations: Vec<Violation>,
}

impl Walker {
    fn visit(&mut self, node: &Node, path: &mut Vec<usize>) {
        match node {
            Node::Text(text) if text.text.is_empty() => {
                self.violations.push(Violation::EmptyText { path: path.clone() });
            }
            Node::Heading(heading) => {
                if !(1..=6).contains(&heading.attrs.level) {
                    self.violations.push(Violation::HeadingLevel {
                        path: path.clone(),
                        level: heading.attrs.level,
                    });
                }
                if heading.attrs.uid.is_empty() {
                    self.violations.push(Violation::MissingHeadingUid { path: path.clone() });
                } else if !self.heading_uids.insert(heading.attrs.uid.clone()) {
                    self.violations.push(Violation::DuplicateHeadingUid {
                        path: path.clone(),
                        uid: heading.attrs.uid.clone(),
                    });
                }
            }
            Node::BulletList(_) | Node::OrderedList(_) => self.only(node, path, &["listItem"]),
            Node::TaskList(_) => self.only(node, path, &["taskItem"]),
            Node::Table(_) => self.only(node, path, &["tableRow"]),
            Node::TableRow(_) => self.only(node, path, &["tableCell", "tableHeader"]),
            Node::TableCell(cell) | Node::TableHeader(cell) => {
                if cell.attrs.colspan == 0 || cell.attrs.rowspan == 0 {
                    self.violations.push(Violation::ZeroSpan { path: path.clone() });
                }
            }
            Node::Details(block) => {
                let shaped = matches!(
                    block.content.as_slice(),
                    [Node::DetailsSummary(_), Node::DetailsContent(_)]
                );
                if !shaped {
                    self.violations.push(Violation::DetailsShape { path: path.clone() });
                }
            }
            _ => {}
        }

        for (i, child) in node.children().iter().enumerate() {
            path.push(i);
            self.visit(child, path);
            path.pop();
        }
    }

    fn only(&mut self, parent: &Node, path: &[usize], allowed: &[&str]) {
        for (i, child) in parent.children().iter().enumerate() {
            if !allowed.contains(&child.type_name()) {
                let mut at = path.to_vec();
                at.push(i);
                self.violations.push(Violation::UnexpectedChild {
                    path: at,
                    parent: parent.type_name(),
                    child: child.type_name(),
                });
            }
        }
    }
}

use crate::parsing::{blocks::parse_blocks, serialize::serialize};

use super::{
    indent::IndentStyle,
    node::{ListMarker, Node, NodeId, NodeKind},
};

/// Ordered sequence of top-level block nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    pub indent_style: IndentStyle,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            indent_style: IndentStyle::default(),
        }
    }

    pub fn with_indent_style(mut self, style: IndentStyle) -> Self {
        self.indent_style = style;
        self
    }

    /// Parses markdown text into a tree with fresh node ids.
    pub fn parse(text: &str) -> Self {
        let indent_style = IndentStyle::detect(text);
        Self {
            nodes: parse_blocks(text, indent_style),
            indent_style,
        }
    }

    pub fn to_markdown(&self) -> String {
        serialize(self)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn previous(&self, id: NodeId) -> Option<&Node> {
        let i = self.index_of(id)?;
        i.checked_sub(1).and_then(|p| self.nodes.get(p))
    }

    pub fn next(&self, id: NodeId) -> Option<&Node> {
        let i = self.index_of(id)?;
        self.nodes.get(i + 1)
    }

    /// Inserts at `index`, clamped to the end.
    pub fn insert(&mut self, index: usize, node: Node) {
        let at = index.min(self.nodes.len());
        self.nodes.insert(at, node);
    }

    /// Inserts `node` right after `id`. Returns false when `id` is absent.
    pub fn insert_after(&mut self, id: NodeId, node: Node) -> bool {
        match self.index_of(id) {
            Some(i) => {
                self.nodes.insert(i + 1, node);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let i = self.index_of(id)?;
        Some(self.nodes.remove(i))
    }

    pub fn replace_content(&mut self, id: NodeId, content: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(node) => {
                node.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Renumbers the run of ordered items at `id`'s indent level.
    ///
    /// The run is bounded by any non-list node, any list item at a shallower
    /// level, or a non-ordered item at the same level; deeper items inside it
    /// are skipped over. Numbering continues from the first item of the run.
    pub fn renumber_ordered(&mut self, id: NodeId) {
        let Some(i) = self.index_of(id) else {
            return;
        };
        let Some(level) = ordered_level(&self.nodes[i]) else {
            return;
        };

        let in_run = |node: &Node| match &node.kind {
            NodeKind::ListItem { marker, indent } => {
                *indent > level || (*indent == level && marker.is_ordered())
            }
            _ => false,
        };

        let mut start = i;
        while start > 0 && in_run(&self.nodes[start - 1]) {
            start -= 1;
        }

        let mut next_number = None;
        for node in self.nodes[start..].iter_mut() {
            if !in_run(node) {
                break;
            }
            if let NodeKind::ListItem {
                marker: ListMarker::Ordered { number, .. },
                indent,
            } = &mut node.kind
                && *indent == level
            {
                let n = *next_number.get_or_insert(*number);
                *number = n;
                next_number = Some(n + 1);
            }
        }
    }
}

fn ordered_level(node: &Node) -> Option<usize> {
    match &node.kind {
        NodeKind::ListItem {
            marker: ListMarker::Ordered { .. },
            indent,
        } => Some(*indent),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn numbers(tree: &Tree) -> Vec<Option<u64>> {
        tree.nodes()
            .iter()
            .map(|n| match &n.kind {
                NodeKind::ListItem {
                    marker: ListMarker::Ordered { number, .. },
                    ..
                } => Some(*number),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn lookup_and_neighbours() {
        let tree = Tree::new(vec![Node::paragraph("a"), Node::paragraph("b")]);
        let a = tree.nodes()[0].id;
        let b = tree.nodes()[1].id;
        assert_eq!(tree.index_of(b), Some(1));
        assert_eq!(tree.next(a).map(|n| n.id), Some(b));
        assert_eq!(tree.previous(a), None);
        assert_eq!(tree.get(b).map(|n| n.content.as_str()), Some("b"));
    }

    #[test]
    fn insert_and_remove() {
        let mut tree = Tree::new(vec![Node::paragraph("a")]);
        let a = tree.nodes()[0].id;
        assert!(tree.insert_after(a, Node::paragraph("b")));
        assert!(!tree.insert_after(NodeId::new(), Node::paragraph("x")));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.remove(a).map(|n| n.content), Some("a".to_string()));
        assert!(!tree.contains(a));
    }

    #[test]
    fn renumber_skips_nested_items() {
        let mut tree = Tree::parse("1. a\n5. b\n  - nested\n9. c\n\npara\n\n3. other");
        let first = tree.nodes()[0].id;
        tree.renumber_ordered(first);
        assert_eq!(
            numbers(&tree),
            vec![Some(1), Some(2), None, Some(3), None, Some(3)]
        );
    }

    #[test]
    fn renumber_from_middle_of_run_uses_run_start() {
        let mut tree = Tree::parse("4. a\n4. b\n4. c");
        let last = tree.nodes()[2].id;
        tree.renumber_ordered(last);
        assert_eq!(numbers(&tree), vec![Some(4), Some(5), Some(6)]);
    }
}

use std::collections::HashMap;

use crate::{
    mapping::OBJECT_REPLACEMENT,
    model::{ListMarker, Node, NodeId, NodeKind, Tree},
    parsing::blocks::kinds::{Heading, ImageLine, ThematicBreak},
    selection::{TagPart, ViewMode},
    sync::{DisplaySurface, Region, Role},
};

use super::styled::{StyledRun, TextStyle, styled_runs};

/// Index of an element in a [`ProjectedSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
struct Element {
    parent: Option<ElementId>,
    role: Role,
    children: Vec<ElementId>,
    /// Present on text leaves only.
    text: Option<String>,
    style: TextStyle,
}

type Position = (ElementId, usize);

/// An in-memory display projection of a tree.
///
/// Node roots hold decorations and editable regions; regions hold text
/// leaves. In the rendered view each content leaf is one styled run, so
/// hidden markers are absent from the text just as in a real display.
#[derive(Debug, Clone)]
pub struct ProjectedSurface {
    elements: Vec<Element>,
    roots: Vec<ElementId>,
    by_node: HashMap<NodeId, ElementId>,
    view: ViewMode,
    selection: Option<(Position, Position)>,
}

impl ProjectedSurface {
    pub fn build(tree: &Tree, view: ViewMode) -> Self {
        let mut s = Self {
            elements: Vec::new(),
            roots: Vec::new(),
            by_node: HashMap::new(),
            view,
            selection: None,
        };
        for node in tree.nodes() {
            let root = s.add(None, Role::NodeRoot(node.id), None, TextStyle::default());
            s.roots.push(root);
            s.by_node.insert(node.id, root);
            s.project_node(root, node, tree);
        }
        s
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.elements[el.0].children
    }

    /// Text of a leaf; `None` for container elements.
    pub fn text(&self, el: ElementId) -> Option<&str> {
        self.elements[el.0].text.as_deref()
    }

    pub fn style(&self, el: ElementId) -> TextStyle {
        self.elements[el.0].style
    }

    /// All text under `el`, in display order.
    pub fn text_content(&self, el: ElementId) -> String {
        self.leaves(el)
            .into_iter()
            .filter_map(|l| self.text(l))
            .collect()
    }

    /// Text leaves under `el` in document order.
    pub fn leaves(&self, el: ElementId) -> Vec<ElementId> {
        self.preorder(el)
            .into_iter()
            .filter(|e| self.elements[e.0].text.is_some())
            .collect()
    }

    fn preorder(&self, el: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![el];
        while let Some(e) = stack.pop() {
            out.push(e);
            stack.extend(self.elements[e.0].children.iter().rev());
        }
        out
    }

    fn is_within(&self, el: ElementId, ancestor: ElementId) -> bool {
        let mut cur = Some(el);
        while let Some(e) = cur {
            if e == ancestor {
                return true;
            }
            cur = self.elements[e.0].parent;
        }
        false
    }

    fn add(
        &mut self,
        parent: Option<ElementId>,
        role: Role,
        text: Option<String>,
        style: TextStyle,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            parent,
            role,
            children: Vec::new(),
            text,
            style,
        });
        if let Some(p) = parent {
            self.elements[p.0].children.push(id);
        }
        id
    }

    fn leaf(&mut self, parent: ElementId, role: Role, text: impl Into<String>) -> ElementId {
        self.add(Some(parent), role, Some(text.into()), TextStyle::default())
    }

    fn region(&mut self, parent: ElementId, role: Role) -> ElementId {
        self.add(Some(parent), role, None, TextStyle::default())
    }

    fn project_node(&mut self, root: ElementId, node: &Node, tree: &Tree) {
        let source = self.view == ViewMode::Source;
        match &node.kind {
            NodeKind::Paragraph => self.content(root, node),
            NodeKind::Heading { level } => {
                if source {
                    self.leaf(root, Role::Decoration, format!("{} ", Heading::prefix(*level)));
                }
                self.content(root, node);
            }
            NodeKind::ListItem { marker, indent } => {
                let shown = if source {
                    marker.text()
                } else {
                    match marker {
                        ListMarker::Bullet(_) => "•".to_string(),
                        ListMarker::Ordered { .. } => marker.text(),
                        ListMarker::Checklist { checked: true, .. } => "☑".to_string(),
                        ListMarker::Checklist { checked: false, .. } => "☐".to_string(),
                    }
                };
                let lead = tree.indent_style.indent_string(*indent);
                self.leaf(root, Role::Decoration, format!("{lead}{shown} "));
                self.content(root, node);
            }
            NodeKind::BlockQuote => {
                self.leaf(root, Role::Decoration, if source { "> " } else { "│ " });
                self.content(root, node);
            }
            NodeKind::CodeBlock { language, fence } => {
                if source {
                    self.leaf(root, Role::Decoration, format!("{fence}{language}"));
                }
                self.content(root, node);
                if source {
                    self.leaf(root, Role::Decoration, fence.clone());
                }
            }
            NodeKind::Table(table) => {
                for (r, row) in table.rows.iter().enumerate() {
                    for (c, cell) in row.iter().enumerate() {
                        let region = self.region(root, Role::Cell { row: r, col: c });
                        if !cell.is_empty() {
                            self.leaf(region, Role::Inline, cell.clone());
                        }
                    }
                }
            }
            NodeKind::Image { alt, url } => {
                let shown = if source {
                    ImageLine::line(alt, url)
                } else {
                    OBJECT_REPLACEMENT.to_string()
                };
                self.leaf(root, Role::Decoration, shown);
            }
            NodeKind::HorizontalRule { marker } => {
                let shown = if source {
                    ThematicBreak::line(*marker)
                } else {
                    "───".to_string()
                };
                self.leaf(root, Role::Decoration, shown);
            }
            NodeKind::HtmlBlock { opening, closing } => {
                let open = self.region(root, Role::Tag(TagPart::Opening));
                self.leaf(open, Role::Inline, opening.clone());
                self.content(root, node);
                let close = self.region(root, Role::Tag(TagPart::Closing));
                self.leaf(close, Role::Inline, closing.clone());
            }
        }
    }

    /// The content region: styled runs in the rendered view, one literal
    /// leaf otherwise. Empty content gets a region without leaves.
    fn content(&mut self, root: ElementId, node: &Node) {
        let region = self.region(root, Role::Content);
        let runs = if self.view == ViewMode::Rendered && node.kind.supports_inline() {
            styled_runs(&node.content)
        } else if node.content.is_empty() {
            Vec::new()
        } else {
            vec![StyledRun {
                text: node.content.clone(),
                style: TextStyle {
                    code: matches!(node.kind, NodeKind::CodeBlock { .. }),
                    ..TextStyle::default()
                },
            }]
        };
        for run in runs {
            self.add(Some(region), Role::Inline, Some(run.text), run.style);
        }
    }

    fn len_of(&self, el: ElementId) -> usize {
        self.elements[el.0]
            .text
            .as_ref()
            .map_or(0, |t| t.chars().count())
    }

    /// Normalizes a character offset within `el` to a leaf position.
    ///
    /// A boundary between two leaves goes to the end of the earlier one.
    fn descend(&self, el: ElementId, offset: usize) -> Position {
        if self.elements[el.0].text.is_some() {
            return (el, offset.min(self.len_of(el)));
        }
        let mut acc = 0;
        let mut last = None;
        for leaf in self.leaves(el) {
            let len = self.len_of(leaf);
            if offset <= acc + len {
                return (leaf, offset - acc);
            }
            acc += len;
            last = Some((leaf, len));
        }
        last.unwrap_or((el, 0))
    }
}

impl DisplaySurface for ProjectedSurface {
    type Element = ElementId;

    fn anchor(&self) -> Option<Position> {
        self.selection.map(|(a, _)| a)
    }

    fn extent(&self) -> Option<Position> {
        self.selection.map(|(_, f)| f)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(element.0)?.parent
    }

    fn role(&self, element: ElementId) -> Role {
        self.elements
            .get(element.0)
            .map_or(Role::Inline, |e| e.role)
    }

    fn offset_in(&self, container: ElementId, element: ElementId, offset: usize) -> Option<usize> {
        if element.0 >= self.elements.len() || !self.is_within(element, container) {
            return None;
        }
        let mut before = 0;
        for e in self.preorder(container) {
            if e == element {
                break;
            }
            before += self.len_of(e);
        }
        let within = if self.elements[element.0].text.is_some() {
            offset.min(self.len_of(element))
        } else {
            self.elements[element.0]
                .children
                .iter()
                .take(offset)
                .map(|c| self.text_len(*c))
                .sum()
        };
        Some(before + within)
    }

    fn node_root(&self, id: NodeId) -> Option<ElementId> {
        self.by_node.get(&id).copied()
    }

    fn find_region(&self, root: ElementId, region: Region) -> Option<ElementId> {
        let want = match region {
            Region::Content => Role::Content,
            Region::Cell { row, col } => Role::Cell { row, col },
            Region::Tag(part) => Role::Tag(part),
        };
        self.elements
            .get(root.0)?
            .children
            .iter()
            .copied()
            .find(|c| self.elements[c.0].role == want)
    }

    fn text_len(&self, element: ElementId) -> usize {
        self.leaves(element).iter().map(|l| self.len_of(*l)).sum()
    }

    fn set_collapsed(&mut self, element: ElementId, offset: usize) {
        let at = self.descend(element, offset);
        self.selection = Some((at, at));
    }

    fn set_extended(&mut self, anchor: Position, focus: Position) {
        let a = self.descend(anchor.0, anchor.1);
        let f = self.descend(focus.0, focus.1);
        self.selection = Some((a, f));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rendered_content_hides_markers() {
        let tree = Tree::parse("a **b** c");
        let surface = ProjectedSurface::build(&tree, ViewMode::Rendered);
        let root = surface.roots()[0];
        assert_eq!(surface.text_content(root), "a b c");
        let content = surface.find_region(root, Region::Content).unwrap();
        assert_eq!(surface.children(content).len(), 3);
    }

    #[test]
    fn source_view_shows_block_syntax_as_decoration() {
        let tree = Tree::parse("## Title **x**");
        let surface = ProjectedSurface::build(&tree, ViewMode::Source);
        assert_eq!(surface.text_content(surface.roots()[0]), "## Title **x**");
    }

    #[test]
    fn boundary_offsets_land_at_end_of_earlier_leaf() {
        let tree = Tree::parse("a **b** c");
        let mut surface = ProjectedSurface::build(&tree, ViewMode::Rendered);
        let content = surface
            .find_region(surface.roots()[0], Region::Content)
            .unwrap();
        surface.set_collapsed(content, 3);
        let (leaf, off) = surface.anchor().unwrap();
        assert_eq!(surface.text(leaf), Some("b"));
        assert_eq!(off, 1);
        assert_eq!(surface.offset_in(content, leaf, off), Some(3));
    }

    #[test]
    fn offsets_in_containers_count_children() {
        let tree = Tree::parse("a **b** c");
        let surface = ProjectedSurface::build(&tree, ViewMode::Rendered);
        let root = surface.roots()[0];
        let content = surface.find_region(root, Region::Content).unwrap();
        assert_eq!(surface.offset_in(content, content, 2), Some(3));
        assert_eq!(surface.offset_in(content, root, 0), None);
    }

    #[test]
    fn empty_content_region_holds_the_caret() {
        let tree = Tree::parse("-");
        let mut surface = ProjectedSurface::build(&tree, ViewMode::Rendered);
        let content = surface
            .find_region(surface.roots()[0], Region::Content)
            .unwrap();
        surface.set_collapsed(content, 5);
        assert_eq!(surface.anchor(), Some((content, 0)));
    }

    #[test]
    fn table_cells_are_regions() {
        let tree = Tree::parse("| a | b |\n| --- | --- |\n| 1 | 2 |");
        let surface = ProjectedSurface::build(&tree, ViewMode::Rendered);
        let cell = surface
            .find_region(surface.roots()[0], Region::Cell { row: 1, col: 1 })
            .unwrap();
        assert_eq!(surface.text_content(cell), "2");
    }
}

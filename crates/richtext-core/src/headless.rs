//! Headless reference document.
//!
//! [`HeadlessDocument`] is an in-memory implementation of [`EditorModel`]:
//! a flat arena of nodes holding a root, one tier of block nodes, and one
//! text child per block. It exists so the whole pipeline (normalizer,
//! dispatcher, lifecycle) can be exercised in tests, examples, and benches
//! without a host document tree; embedders bring their own model in
//! production.
//!
//! Reference simplifications: blocks never nest below the root, each block
//! owns exactly one text node, and inline formats toggle on the whole text
//! node rather than splitting it. All offsets are `char` positions.

use unicode_segmentation::UnicodeSegmentation;

use crate::model::{
    Anchor, BlockKind, Direction, EditorModel, ElementFormat, FormatSet, NodeId, PointKind,
    TextFormat,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Root,
    Block(BlockKind),
    Text,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    formats: FormatSet,
    indent: u8,
    element_format: Option<ElementFormat>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            formats: FormatSet::new(),
            indent: 0,
            element_format: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Caret {
    anchor: Anchor,
    focus: Anchor,
}

/// In-memory reference implementation of [`EditorModel`].
#[derive(Debug, Clone)]
pub struct HeadlessDocument {
    nodes: Vec<NodeData>,
    root: NodeId,
    caret: Option<Caret>,
    focused: bool,
    registered: Vec<BlockKind>,
}

impl HeadlessDocument {
    /// An empty document: a root with no children and no selection.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Root)],
            root: NodeId(0),
            caret: None,
            focused: false,
            registered: Vec::new(),
        }
    }

    /// Append a block of `kind` under the root, seeded with `text`.
    pub fn append_block(&mut self, kind: BlockKind, text: &str) -> NodeId {
        let block = self.alloc(NodeData::new(NodeKind::Block(kind)));
        let text_node = self.alloc(NodeData {
            text: text.to_string(),
            ..NodeData::new(NodeKind::Text)
        });
        self.attach(block, self.root);
        self.attach(text_node, block);
        block
    }

    /// The single text node of `block`.
    pub fn text_node_of(&self, block: NodeId) -> Option<NodeId> {
        self.nodes[block.0]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].kind == NodeKind::Text)
    }

    /// Text content of `block`, empty when it has no text child.
    pub fn text_of(&self, block: NodeId) -> &str {
        match self.text_node_of(block) {
            Some(text_node) => &self.nodes[text_node.0].text,
            None => "",
        }
    }

    /// Block kind of `node`, `None` for the root and text nodes.
    pub fn kind_of(&self, node: NodeId) -> Option<BlockKind> {
        match self.nodes[node.0].kind {
            NodeKind::Block(kind) => Some(kind),
            _ => None,
        }
    }

    /// Number of children of `node`.
    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node.0].children.len()
    }

    /// Inline formats of the text inside `block`.
    pub fn formats_of(&self, block: NodeId) -> FormatSet {
        match self.text_node_of(block) {
            Some(text_node) => self.nodes[text_node.0].formats,
            None => FormatSet::new(),
        }
    }

    /// Alignment format of `block`, if one was set.
    pub fn element_format_of(&self, block: NodeId) -> Option<ElementFormat> {
        self.nodes[block.0].element_format
    }

    /// Block kinds registered through [`EditorModel::register_block_kinds`].
    pub fn registered_kinds(&self) -> &[BlockKind] {
        &self.registered
    }

    /// Collapse the selection to a text point at `offset` inside `block`.
    pub fn select_at(&mut self, block: NodeId, offset: usize) {
        if let Some(text_node) = self.text_node_of(block) {
            self.set_collapsed(text_node, offset);
        }
    }

    /// Select the text range `[start, end)` inside `block`.
    pub fn select_range(&mut self, block: NodeId, start: usize, end: usize) {
        if let Some(text_node) = self.text_node_of(block) {
            self.caret = Some(Caret {
                anchor: Anchor::text(text_node, start),
                focus: Anchor::text(text_node, end),
            });
        }
    }

    /// Place an element-point selection at the start of `block`.
    pub fn select_block(&mut self, block: NodeId) {
        let point = Anchor::element(block, 0);
        self.caret = Some(Caret {
            anchor: point,
            focus: point,
        });
    }

    /// Drop the selection.
    pub fn clear_selection(&mut self) {
        self.caret = None;
    }

    /// Set whether the editing surface has input focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    fn attach(&mut self, node: NodeId, parent: NodeId) {
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn set_collapsed(&mut self, text_node: NodeId, offset: usize) {
        let offset = offset.min(char_len(&self.nodes[text_node.0].text));
        let point = Anchor::text(text_node, offset);
        self.caret = Some(Caret {
            anchor: point,
            focus: point,
        });
    }

    /// Resolve a selection point onto its text node and `char` offset.
    ///
    /// Element points map to the start of the element's text content:
    /// child index 0 resolves to offset 0, anything later to the text end.
    fn resolve(&self, point: Anchor) -> Option<(NodeId, usize)> {
        match point.kind {
            PointKind::Text => {
                let text = &self.nodes[point.node.0].text;
                Some((point.node, point.offset.min(char_len(text))))
            }
            PointKind::Element => {
                let block = match self.nodes[point.node.0].kind {
                    NodeKind::Block(_) => point.node,
                    NodeKind::Root => self.nodes[point.node.0].children.first().copied()?,
                    NodeKind::Text => return None,
                };
                let text_node = self.text_node_of(block)?;
                if point.offset == 0 {
                    Some((text_node, 0))
                } else {
                    Some((text_node, char_len(&self.nodes[text_node.0].text)))
                }
            }
        }
    }

    fn resolved_caret(&self) -> Option<((NodeId, usize), (NodeId, usize))> {
        let caret = self.caret?;
        Some((self.resolve(caret.anchor)?, self.resolve(caret.focus)?))
    }

    /// Delete the selected range if it is not collapsed. Returns whether
    /// anything was removed; the caret ends collapsed at the range start.
    fn delete_selection_range(&mut self) -> bool {
        let Some((anchor, focus)) = self.resolved_caret() else {
            return false;
        };
        if anchor == focus {
            return false;
        }

        if anchor.0 == focus.0 {
            let (node, _) = anchor;
            let start = anchor.1.min(focus.1);
            let end = anchor.1.max(focus.1);
            remove_chars(&mut self.nodes[node.0].text, start, end);
            self.set_collapsed(node, start);
            return true;
        }

        // Range spans two blocks: truncate the first, keep the tail of the
        // last, drop everything in between, then merge.
        let block_a = self.block_of(anchor.0);
        let block_f = self.block_of(focus.0);
        let parent = self.root;
        let index_a = self.child_index(parent, block_a);
        let index_f = self.child_index(parent, block_f);
        let (first, last, first_index, last_index) = if index_a <= index_f {
            (anchor, focus, index_a, index_f)
        } else {
            (focus, anchor, index_f, index_a)
        };

        let (first_text, first_offset) = first;
        let (last_text, last_offset) = last;
        let tail = {
            let text = &self.nodes[last_text.0].text;
            text[byte_at(text, last_offset)..].to_string()
        };
        {
            let text = &mut self.nodes[first_text.0].text;
            let keep = byte_at(text, first_offset);
            text.truncate(keep);
            text.push_str(&tail);
        }
        let dropped: Vec<NodeId> = self.nodes[parent.0].children[first_index + 1..=last_index]
            .to_vec();
        for block in dropped {
            self.detach(block);
        }
        self.set_collapsed(first_text, first_offset);
        true
    }

    fn block_of(&self, text_node: NodeId) -> NodeId {
        match self.nodes[text_node.0].parent {
            Some(parent) => parent,
            None => text_node,
        }
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> usize {
        self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == child)
            .unwrap_or(0)
    }

    fn sibling_block(&self, block: NodeId, direction: Direction) -> Option<NodeId> {
        let parent = self.nodes[block.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let index = siblings.iter().position(|&c| c == block)?;
        match direction {
            Direction::Backward => index.checked_sub(1).map(|i| siblings[i]),
            Direction::Forward => siblings.get(index + 1).copied(),
        }
    }

    /// Merge the block after `block` into it; the caret lands on the seam.
    fn merge_forward(&mut self, block: NodeId, place_caret_at_seam: bool) {
        let Some(next) = self.sibling_block(block, Direction::Forward) else {
            return;
        };
        let (Some(text_node), Some(next_text)) =
            (self.text_node_of(block), self.text_node_of(next))
        else {
            return;
        };
        let seam = char_len(&self.nodes[text_node.0].text);
        let tail = std::mem::take(&mut self.nodes[next_text.0].text);
        self.nodes[text_node.0].text.push_str(&tail);
        self.detach(next);
        if place_caret_at_seam {
            self.set_collapsed(text_node, seam);
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorModel for HeadlessDocument {
    fn root(&self) -> NodeId {
        self.root
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].children.first().copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn is_block(&self, node: NodeId) -> bool {
        matches!(self.nodes[node.0].kind, NodeKind::Block(_))
    }

    fn accepts_tab(&self, block: NodeId) -> bool {
        match self.nodes[block.0].kind {
            NodeKind::Block(kind) => kind.accepts_tab(),
            _ => false,
        }
    }

    fn indent_of(&self, block: NodeId) -> u8 {
        self.nodes[block.0].indent
    }

    fn set_indent(&mut self, block: NodeId, level: u8) {
        self.nodes[block.0].indent = level;
    }

    fn set_element_format(&mut self, block: NodeId, format: ElementFormat) {
        self.nodes[block.0].element_format = Some(format);
    }

    fn register_block_kinds(&mut self, kinds: &[BlockKind]) {
        for &kind in kinds {
            if !self.registered.contains(&kind) {
                self.registered.push(kind);
            }
        }
    }

    fn selection_anchor(&self) -> Option<Anchor> {
        self.caret.map(|caret| caret.anchor)
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn select_inside(&mut self, block: NodeId) {
        let text_node = match self.text_node_of(block) {
            Some(text_node) => text_node,
            None => {
                let text_node = self.alloc(NodeData::new(NodeKind::Text));
                self.attach(text_node, block);
                text_node
            }
        };
        self.set_collapsed(text_node, 0);
    }

    fn char_before_anchor(&self) -> Option<char> {
        let caret = self.caret?;
        let (node, offset) = self.resolve(caret.anchor)?;
        if offset == 0 {
            return None;
        }
        self.nodes[node.0].text.chars().nth(offset - 1)
    }

    fn insert_text(&mut self, text: &str) {
        self.delete_selection_range();
        let Some(caret) = self.caret else {
            return;
        };
        let Some((node, offset)) = self.resolve(caret.anchor) else {
            return;
        };
        let byte = byte_at(&self.nodes[node.0].text, offset);
        self.nodes[node.0].text.insert_str(byte, text);
        self.set_collapsed(node, offset + char_len(text));
    }

    fn remove_text(&mut self) {
        self.delete_selection_range();
    }

    fn delete_character(&mut self, backward: bool) {
        if self.delete_selection_range() {
            return;
        }
        let Some(((node, offset), _)) = self.resolved_caret() else {
            return;
        };
        let len = char_len(&self.nodes[node.0].text);
        if backward {
            if offset > 0 {
                remove_chars(&mut self.nodes[node.0].text, offset - 1, offset);
                self.set_collapsed(node, offset - 1);
            } else if let Some(previous) = self.sibling_block(self.block_of(node), Direction::Backward)
            {
                self.merge_forward(previous, true);
            }
        } else if offset < len {
            remove_chars(&mut self.nodes[node.0].text, offset, offset + 1);
            self.set_collapsed(node, offset);
        } else {
            self.merge_forward(self.block_of(node), false);
        }
    }

    fn delete_word(&mut self, backward: bool) {
        if self.delete_selection_range() {
            return;
        }
        let Some(((node, offset), _)) = self.resolved_caret() else {
            return;
        };
        let text = self.nodes[node.0].text.clone();
        if backward {
            if offset == 0 {
                self.delete_character(true);
                return;
            }
            let head = &text[..byte_at(&text, offset)];
            let mut start_byte = 0;
            for (index, segment) in head.split_word_bound_indices().rev() {
                start_byte = index;
                if !segment.chars().all(char::is_whitespace) {
                    break;
                }
            }
            let start = char_len(&head[..start_byte]);
            remove_chars(&mut self.nodes[node.0].text, start, offset);
            self.set_collapsed(node, start);
        } else {
            if offset == char_len(&text) {
                self.delete_character(false);
                return;
            }
            let tail = &text[byte_at(&text, offset)..];
            let mut consumed = tail.len();
            for (index, segment) in tail.split_word_bound_indices() {
                consumed = index + segment.len();
                if !segment.chars().all(char::is_whitespace) {
                    break;
                }
            }
            let end = offset + char_len(&tail[..consumed]);
            remove_chars(&mut self.nodes[node.0].text, offset, end);
            self.set_collapsed(node, offset);
        }
    }

    fn delete_line(&mut self, backward: bool) {
        if self.delete_selection_range() {
            return;
        }
        let Some(((node, offset), _)) = self.resolved_caret() else {
            return;
        };
        let text = &self.nodes[node.0].text;
        if backward {
            let head = &text[..byte_at(text, offset)];
            let line_start = match head.rfind('\n') {
                Some(newline) => char_len(&head[..newline]) + 1,
                None => 0,
            };
            if line_start < offset {
                remove_chars(&mut self.nodes[node.0].text, line_start, offset);
                self.set_collapsed(node, line_start);
            }
        } else {
            let tail = &text[byte_at(text, offset)..];
            let line_len = match tail.find('\n') {
                Some(newline) => char_len(&tail[..newline]),
                None => char_len(tail),
            };
            // Sitting right on the newline: consume it and join the lines.
            let span = if line_len == 0 && !tail.is_empty() {
                1
            } else {
                line_len
            };
            if span > 0 {
                remove_chars(&mut self.nodes[node.0].text, offset, offset + span);
                self.set_collapsed(node, offset);
            }
        }
    }

    fn format_text(&mut self, format: TextFormat) {
        let Some(caret) = self.caret else {
            return;
        };
        let Some((node, _)) = self.resolve(caret.anchor) else {
            return;
        };
        self.nodes[node.0].formats.toggle(format);
    }

    fn insert_line_break(&mut self, select_start: bool) {
        self.delete_selection_range();
        let Some(caret) = self.caret else {
            return;
        };
        let Some((node, offset)) = self.resolve(caret.anchor) else {
            return;
        };
        let byte = byte_at(&self.nodes[node.0].text, offset);
        self.nodes[node.0].text.insert(byte, '\n');
        let resting = if select_start { offset } else { offset + 1 };
        self.set_collapsed(node, resting);
    }

    fn insert_paragraph(&mut self) {
        self.delete_selection_range();
        let Some(caret) = self.caret else {
            return;
        };
        let Some((node, offset)) = self.resolve(caret.anchor) else {
            return;
        };
        let block = self.block_of(node);
        let byte = byte_at(&self.nodes[node.0].text, offset);
        let tail = self.nodes[node.0].text.split_off(byte);

        let indent = self.nodes[block.0].indent;
        let element_format = self.nodes[block.0].element_format;
        let new_block = self.alloc(NodeData {
            indent,
            element_format,
            ..NodeData::new(NodeKind::Block(BlockKind::Paragraph))
        });
        let new_text = self.alloc(NodeData {
            text: tail,
            ..NodeData::new(NodeKind::Text)
        });
        self.nodes[new_text.0].parent = Some(new_block);
        self.nodes[new_block.0].children.push(new_text);

        let parent = match self.nodes[block.0].parent {
            Some(parent) => parent,
            None => self.root,
        };
        let index = self.child_index(parent, block);
        self.nodes[new_block.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(index + 1, new_block);

        self.set_collapsed(new_text, 0);
    }

    fn move_caret(&mut self, direction: Direction, extend: bool) {
        let Some(caret) = self.caret else {
            return;
        };
        let Some((node, offset)) = self.resolve(caret.focus) else {
            return;
        };
        let moved = match direction {
            Direction::Backward => {
                if offset > 0 {
                    Some((node, offset - 1))
                } else {
                    self.sibling_block(self.block_of(node), Direction::Backward)
                        .and_then(|previous| self.text_node_of(previous))
                        .map(|text_node| (text_node, char_len(&self.nodes[text_node.0].text)))
                }
            }
            Direction::Forward => {
                if offset < char_len(&self.nodes[node.0].text) {
                    Some((node, offset + 1))
                } else {
                    self.sibling_block(self.block_of(node), Direction::Forward)
                        .and_then(|next| self.text_node_of(next))
                        .map(|text_node| (text_node, 0))
                }
            }
        };
        let Some((new_node, new_offset)) = moved else {
            return;
        };
        let point = Anchor::text(new_node, new_offset);
        if extend {
            self.caret = Some(Caret {
                anchor: caret.anchor,
                focus: point,
            });
        } else {
            self.caret = Some(Caret {
                anchor: point,
                focus: point,
            });
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        if self.nodes[node.0].kind != NodeKind::Text {
            return;
        }
        self.nodes[node.0].text = text.to_string();
        let len = char_len(text);
        if let Some(caret) = &mut self.caret {
            for point in [&mut caret.anchor, &mut caret.focus] {
                if point.node == node && point.offset > len {
                    point.offset = len;
                }
            }
        }
    }

    fn append_paragraph(&mut self, parent: NodeId) -> NodeId {
        let block = self.alloc(NodeData::new(NodeKind::Block(BlockKind::Paragraph)));
        let text_node = self.alloc(NodeData::new(NodeKind::Text));
        self.attach(block, parent);
        self.attach(text_node, block);
        block
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        if let Some(caret) = self.caret {
            if !self.is_attached(caret.anchor.node) || !self.is_attached(caret.focus.node) {
                self.caret = None;
            }
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn byte_at(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

fn remove_chars(text: &mut String, start: usize, end: usize) {
    let start_byte = byte_at(text, start);
    let end_byte = byte_at(text, end);
    text.replace_range(start_byte..end_byte, "");
}

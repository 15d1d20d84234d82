//! Document-model boundary.
//!
//! The document tree, its selection object, and its block nodes are owned by
//! the host document session, not by this crate. [`EditorModel`] is that
//! boundary: a handle-based trait covering the session surface (root access,
//! node registration, scoped text reconciliation), the selection surface
//! (anchor lookup, mutation around the anchor), and the block-node surface
//! (indent, tab capability, element format).
//!
//! Nodes are addressed by opaque [`NodeId`] handles rather than references,
//! so the command layer never holds aliased borrows into the tree. All
//! offsets are `char` positions, not bytes.

/// Opaque handle to a node in the host document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index, for host-side logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether a selection point sits inside a text node or between the
/// children of an element node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// A `char` offset inside a text node.
    Text,
    /// A child index inside an element node.
    Element,
}

/// The reference point defining where the selection is positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    /// Node the point lives in.
    pub node: NodeId,
    /// Offset within the node (`char` position or child index, per `kind`).
    pub offset: usize,
    /// Interpretation of `offset`.
    pub kind: PointKind,
}

impl Anchor {
    /// Create a text-point anchor.
    pub fn text(node: NodeId, offset: usize) -> Self {
        Self {
            node,
            offset,
            kind: PointKind::Text,
        }
    }

    /// Create an element-point anchor.
    pub fn element(node: NodeId, offset: usize) -> Self {
        Self {
            node,
            offset,
            kind: PointKind::Element,
        }
    }
}

/// Structural unit kinds understood by the rich-text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Plain paragraph.
    Paragraph,
    /// Heading.
    Heading,
    /// List item.
    ListItem,
    /// Block quote.
    Quote,
    /// Code block; stores literal tab characters instead of indent levels.
    CodeBlock,
}

impl BlockKind {
    /// Whether blocks of this kind consume literal tab characters as
    /// content rather than using structural indent levels.
    pub fn accepts_tab(self) -> bool {
        matches!(self, BlockKind::CodeBlock)
    }
}

/// Inline text formats, toggled on the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    /// Bold.
    Bold,
    /// Italic.
    Italic,
    /// Underline.
    Underline,
    /// Strikethrough.
    Strikethrough,
    /// Inline code.
    Code,
    /// Subscript.
    Subscript,
    /// Superscript.
    Superscript,
    /// Highlight.
    Highlight,
}

impl TextFormat {
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of inline formats carried by a text node, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSet(u16);

impl FormatSet {
    /// The empty format set.
    pub fn new() -> Self {
        Self(0)
    }

    /// Whether `format` is present.
    pub fn contains(self, format: TextFormat) -> bool {
        self.0 & format.bit() != 0
    }

    /// Flip `format` on or off.
    pub fn toggle(&mut self, format: TextFormat) {
        self.0 ^= format.bit();
    }

    /// Whether no format is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Block-level alignment formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementFormat {
    /// Align to the left edge.
    Left,
    /// Align to the writing-direction start.
    Start,
    /// Center.
    Center,
    /// Align to the right edge.
    Right,
    /// Align to the writing-direction end.
    End,
    /// Justify.
    Justify,
}

/// Caret movement direction relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the document start.
    Backward,
    /// Toward the document end.
    Forward,
}

/// Upper bound for structural indent levels. Increments clamp here;
/// decrements clamp at zero.
pub const MAX_INDENT: u8 = 10;

/// The document session, selection, and block-node surface the command core
/// runs against.
///
/// At most one selection is active per editing surface; every selection
/// mutation method acts relative to that selection and is a no-op when none
/// exists (the dispatcher never calls them without one). Implementations
/// guarantee that every text position lies within some block; the command
/// layer treats a violation as document corruption and panics.
pub trait EditorModel {
    /// The document's top-level container.
    fn root(&self) -> NodeId;

    /// First child of `node`, if any.
    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    /// Parent of `node`, `None` for the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is a block-level node.
    fn is_block(&self, node: NodeId) -> bool;

    /// Whether `block` consumes literal tabs instead of indent levels.
    fn accepts_tab(&self, block: NodeId) -> bool;

    /// Current indent level of `block`.
    fn indent_of(&self, block: NodeId) -> u8;

    /// Set the indent level of `block`. Callers clamp to `[0, MAX_INDENT]`.
    fn set_indent(&mut self, block: NodeId, level: u8);

    /// Set the alignment format of `block`.
    fn set_element_format(&mut self, block: NodeId, format: ElementFormat);

    /// Declare the block kinds the mounted editing mode understands.
    fn register_block_kinds(&mut self, kinds: &[BlockKind]);

    /// Anchor of the active selection, `None` when no selection exists.
    fn selection_anchor(&self) -> Option<Anchor>;

    /// Whether the editing surface currently has input focus.
    fn has_focus(&self) -> bool;

    /// Collapse the selection to offset 0 inside `block`.
    fn select_inside(&mut self, block: NodeId);

    /// The character immediately before the anchor offset in the anchor's
    /// text node. `None` at offset 0 or for an element-point anchor.
    fn char_before_anchor(&self) -> Option<char>;

    /// Insert literal text at the anchor, replacing the selected range
    /// first if the selection is not collapsed.
    fn insert_text(&mut self, text: &str);

    /// Delete the contents of the selected range.
    fn remove_text(&mut self);

    /// Delete one character relative to the anchor.
    fn delete_character(&mut self, backward: bool);

    /// Delete one word relative to the anchor.
    fn delete_word(&mut self, backward: bool);

    /// Delete to the line boundary relative to the anchor.
    fn delete_line(&mut self, backward: bool);

    /// Toggle an inline format on the selection.
    fn format_text(&mut self, format: TextFormat);

    /// Insert a soft line break. With `select_start`, the selection ends up
    /// before the break, otherwise after it.
    fn insert_line_break(&mut self, select_start: bool);

    /// Split the current block into a new paragraph at the anchor.
    fn insert_paragraph(&mut self);

    /// Move the caret one character in `direction`, extending the selection
    /// instead of collapsing it when `extend` is set.
    fn move_caret(&mut self, direction: Direction, extend: bool);

    /// Replace the text content of `node`, reconciling an out-of-band
    /// mutation observed on the input surface.
    fn set_text_content(&mut self, node: NodeId, text: &str);

    /// Append an empty paragraph block under `parent` and return it.
    fn append_paragraph(&mut self, parent: NodeId) -> NodeId;

    /// Detach all children of `node`.
    fn clear_children(&mut self, node: NodeId);
}

//! Rich-text command handling.
//!
//! # Overview
//!
//! [`RichTextHandler`] is the single source of truth mapping an
//! [`EditorCommand`] to its model effect. It is registered by the lifecycle
//! adapter at [`CommandPriority::Editor`], the lowest tier, so any host
//! handler for the same command runs first and may short-circuit.
//!
//! Per invocation the handler resolves the current selection anchor; without
//! one it declines every command so the originating event is not suppressed.
//! Key commands (`keyBackspace`, `keyEnter`, …) delegate to their target
//! handlers as direct function calls, so the synchronous call chain is
//! visible in this file, and a delegate's result propagates unchanged.
//!
//! # Fatal invariants
//!
//! The document model guarantees that every text position lies within some
//! block. A text anchor with no block ancestor therefore signals model
//! corruption, and block resolution panics rather than returning an error.
//!
//! [`CommandPriority::Editor`]: crate::CommandPriority::Editor

use crate::commands::{Dispatch, EditorCommand};
use crate::model::{Anchor, Direction, EditorModel, MAX_INDENT, NodeId};

/// Predicate deciding whether the default platform caret motion would be
/// wrong for the current selection shape.
///
/// The decision rule depends on environment capabilities the host detects;
/// it is injected at mount time rather than reimplemented here. When the
/// policy declines, arrow commands return unhandled and native caret motion
/// proceeds untouched.
pub trait CaretPolicy {
    /// Whether the editor should take over caret motion in `direction`.
    fn overrides_native_motion(&self, direction: Direction) -> bool;
}

/// The default policy: native caret motion is always trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustNative;

impl CaretPolicy for TrustNative {
    fn overrides_native_motion(&self, _direction: Direction) -> bool {
        false
    }
}

/// Executes normalized commands against the document model.
pub struct RichTextHandler {
    caret_policy: Box<dyn CaretPolicy>,
}

impl RichTextHandler {
    /// A handler with the [`TrustNative`] caret policy.
    pub fn new() -> Self {
        Self::with_policy(Box::new(TrustNative))
    }

    /// A handler with an injected caret policy.
    pub fn with_policy(caret_policy: Box<dyn CaretPolicy>) -> Self {
        Self { caret_policy }
    }

    /// Execute `command` against `model`.
    ///
    /// Returns [`Dispatch::Unhandled`] without touching the model when no
    /// selection exists, or when the caret policy declines an arrow
    /// override.
    pub fn handle<M: EditorModel>(&self, model: &mut M, command: &EditorCommand) -> Dispatch {
        let Some(anchor) = model.selection_anchor() else {
            return Dispatch::Unhandled;
        };

        match command {
            EditorCommand::DeleteCharacter { backward } => {
                Self::delete_character(model, *backward)
            }
            EditorCommand::DeleteWord { backward } => {
                model.delete_word(*backward);
                Dispatch::Handled
            }
            EditorCommand::DeleteLine { backward } => {
                model.delete_line(*backward);
                Dispatch::Handled
            }
            EditorCommand::InsertText { text } => Self::insert_text(model, text),
            EditorCommand::RemoveText => {
                model.remove_text();
                Dispatch::Handled
            }
            EditorCommand::FormatText { format } => {
                model.format_text(*format);
                Dispatch::Handled
            }
            EditorCommand::FormatElement { format } => {
                let element = element_of(model, &anchor);
                model.set_element_format(element, *format);
                Dispatch::Handled
            }
            EditorCommand::InsertLineBreak { select_start } => {
                Self::insert_line_break(model, *select_start)
            }
            EditorCommand::InsertParagraph => Self::insert_paragraph(model),
            EditorCommand::IndentContent => Self::indent(model, &anchor),
            EditorCommand::OutdentContent => Self::outdent(model, &anchor),
            EditorCommand::KeyArrow { direction, stroke } => {
                if !self.caret_policy.overrides_native_motion(*direction) {
                    return Dispatch::Unhandled;
                }
                model.move_caret(*direction, stroke.shift);
                Dispatch::Handled
            }
            EditorCommand::KeyBackspace { .. } => Self::delete_character(model, true),
            EditorCommand::KeyDelete { .. } => Self::delete_character(model, false),
            EditorCommand::KeyEnter { stroke } => {
                if stroke.shift {
                    Self::insert_line_break(model, false)
                } else {
                    Self::insert_paragraph(model)
                }
            }
            EditorCommand::KeyTab { stroke } => {
                if stroke.shift {
                    Self::outdent(model, &anchor)
                } else {
                    Self::indent(model, &anchor)
                }
            }
        }
    }

    fn delete_character<M: EditorModel>(model: &mut M, backward: bool) -> Dispatch {
        model.delete_character(backward);
        Dispatch::Handled
    }

    fn insert_text<M: EditorModel>(model: &mut M, text: &str) -> Dispatch {
        model.insert_text(text);
        Dispatch::Handled
    }

    fn insert_line_break<M: EditorModel>(model: &mut M, select_start: bool) -> Dispatch {
        model.insert_line_break(select_start);
        Dispatch::Handled
    }

    fn insert_paragraph<M: EditorModel>(model: &mut M) -> Dispatch {
        model.insert_paragraph();
        Dispatch::Handled
    }

    /// Tab-accepting blocks take a literal tab; everything else moves one
    /// structural indent level, clamped at [`MAX_INDENT`].
    fn indent<M: EditorModel>(model: &mut M, anchor: &Anchor) -> Dispatch {
        let block = nearest_block(model, anchor.node);
        if model.accepts_tab(block) {
            return Self::insert_text(model, "\t");
        }
        let level = model.indent_of(block);
        if level < MAX_INDENT {
            model.set_indent(block, level + 1);
        }
        Dispatch::Handled
    }

    /// In tab-accepting blocks, only a literal tab directly before the
    /// anchor is consumed; everything else moves one structural indent
    /// level, clamped at zero.
    fn outdent<M: EditorModel>(model: &mut M, anchor: &Anchor) -> Dispatch {
        let block = nearest_block(model, anchor.node);
        if model.accepts_tab(block) {
            if model.char_before_anchor() == Some('\t') {
                return Self::delete_character(model, true);
            }
            return Dispatch::Handled;
        }
        let level = model.indent_of(block);
        if level > 0 {
            model.set_indent(block, level - 1);
        }
        Dispatch::Handled
    }
}

impl Default for RichTextHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// The anchor node itself when block-level, else its parent block.
///
/// # Panics
///
/// Panics when the node has no parent: every non-block node must be
/// block-contained, so a missing parent means the tree is corrupt.
fn element_of<M: EditorModel>(model: &M, anchor: &Anchor) -> NodeId {
    if model.is_block(anchor.node) {
        return anchor.node;
    }
    match model.parent(anchor.node) {
        Some(parent) => parent,
        None => panic!(
            "node {:?} has no parent element; the document tree is corrupt",
            anchor.node
        ),
    }
}

/// Nearest block-level ancestor of `node`, or `node` itself when it is
/// already block-level.
///
/// # Panics
///
/// Panics when no block ancestor exists; the document model guarantees
/// every text position is block-contained, so this signals corruption.
fn nearest_block<M: EditorModel>(model: &M, node: NodeId) -> NodeId {
    let mut current = node;
    loop {
        if model.is_block(current) {
            return current;
        }
        match model.parent(current) {
            Some(parent) => current = parent,
            None => panic!(
                "node {current:?} has no enclosing block; the document tree is corrupt"
            ),
        }
    }
}

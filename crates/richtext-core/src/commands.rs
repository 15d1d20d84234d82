//! Normalized editing commands.
//!
//! # Overview
//!
//! Every raw input signal the editing surface produces collapses to a value
//! of [`EditorCommand`] before it touches the document. The set is closed:
//! the dispatcher matches exhaustively over it, so adding a command is a
//! compile-time event, not a runtime string lookup.
//!
//! Commands are transient. They are constructed by the input normalizer (or
//! by the host through [`EditorSession::dispatch`]), executed synchronously,
//! and discarded; nothing persists them.
//!
//! The wire names returned by [`EditorCommand::name`] are the stable
//! contract between the normalizer and the dispatcher, useful for host-side
//! logging and for bridging to surfaces that speak string command names.
//!
//! [`EditorSession::dispatch`]: crate::EditorSession::dispatch

use crate::input::KeyStroke;
use crate::model::{Direction, ElementFormat, TextFormat};

/// A normalized (name, payload) editing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Delete one character relative to the anchor, direction per flag.
    DeleteCharacter {
        /// Delete toward the document start when set.
        backward: bool,
    },
    /// Delete one word relative to the anchor.
    DeleteWord {
        /// Delete toward the document start when set.
        backward: bool,
    },
    /// Delete to the line boundary relative to the anchor.
    DeleteLine {
        /// Delete toward the document start when set.
        backward: bool,
    },
    /// Insert literal text at the anchor.
    InsertText {
        /// Text to insert.
        text: String,
    },
    /// Delete the current selection range contents.
    RemoveText,
    /// Toggle an inline format on the selection.
    FormatText {
        /// Format to toggle.
        format: TextFormat,
    },
    /// Set the alignment format of the anchor's element.
    FormatElement {
        /// Format to set.
        format: ElementFormat,
    },
    /// Insert a soft line break.
    InsertLineBreak {
        /// Place the resulting selection before the break instead of after.
        select_start: bool,
    },
    /// Split the current block into a new paragraph at the anchor.
    InsertParagraph,
    /// Increase structural indent, or insert a literal tab in blocks that
    /// accept one.
    IndentContent,
    /// Decrease structural indent, or delete a preceding literal tab in
    /// blocks that accept one.
    OutdentContent,
    /// Arrow key in the given direction; may override native caret motion.
    KeyArrow {
        /// Caret direction the arrow maps to.
        direction: Direction,
        /// The raw key event, consulted for the shift modifier.
        stroke: KeyStroke,
    },
    /// Backspace key; delegates to backward character deletion.
    KeyBackspace {
        /// The raw key event.
        stroke: KeyStroke,
    },
    /// Delete key; delegates to forward character deletion.
    KeyDelete {
        /// The raw key event.
        stroke: KeyStroke,
    },
    /// Enter key; delegates to line break (shift held) or paragraph split.
    KeyEnter {
        /// The raw key event, consulted for the shift modifier.
        stroke: KeyStroke,
    },
    /// Tab key; delegates to indent (no shift) or outdent (shift held).
    KeyTab {
        /// The raw key event, consulted for the shift modifier.
        stroke: KeyStroke,
    },
}

impl EditorCommand {
    /// Stable wire name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            EditorCommand::DeleteCharacter { .. } => "deleteCharacter",
            EditorCommand::DeleteWord { .. } => "deleteWord",
            EditorCommand::DeleteLine { .. } => "deleteLine",
            EditorCommand::InsertText { .. } => "insertText",
            EditorCommand::RemoveText => "removeText",
            EditorCommand::FormatText { .. } => "formatText",
            EditorCommand::FormatElement { .. } => "formatElement",
            EditorCommand::InsertLineBreak { .. } => "insertLineBreak",
            EditorCommand::InsertParagraph => "insertParagraph",
            EditorCommand::IndentContent => "indentContent",
            EditorCommand::OutdentContent => "outdentContent",
            EditorCommand::KeyArrow {
                direction: Direction::Backward,
                ..
            } => "keyArrowLeft",
            EditorCommand::KeyArrow {
                direction: Direction::Forward,
                ..
            } => "keyArrowRight",
            EditorCommand::KeyBackspace { .. } => "keyBackspace",
            EditorCommand::KeyDelete { .. } => "keyDelete",
            EditorCommand::KeyEnter { .. } => "keyEnter",
            EditorCommand::KeyTab { .. } => "keyTab",
        }
    }
}

/// Whether a handler claimed a command.
///
/// `Handled` tells the caller to suppress the default platform behavior for
/// the originating event; `Unhandled` lets the platform proceed. Unhandled
/// is the expected local-recovery path, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The command was claimed and executed.
    Handled,
    /// No handler claimed the command.
    Unhandled,
}

impl Dispatch {
    /// Whether the command was claimed.
    pub fn is_handled(self) -> bool {
        matches!(self, Dispatch::Handled)
    }
}

/// Priority tier of a registered command handler.
///
/// Handlers run from highest to lowest tier; the first to claim a command
/// short-circuits the rest. The built-in rich-text handler registers at
/// `Editor`, the lowest tier, so any host handler runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandPriority {
    /// Built-in editing behavior. Lowest.
    Editor,
    /// Low.
    Low,
    /// Normal.
    Normal,
    /// High.
    High,
    /// Critical. Highest.
    Critical,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyCode, KeyStroke};

    #[test]
    fn test_wire_names_are_stable() {
        assert_eq!(
            EditorCommand::DeleteCharacter { backward: true }.name(),
            "deleteCharacter"
        );
        assert_eq!(
            EditorCommand::InsertText {
                text: "x".to_string()
            }
            .name(),
            "insertText"
        );
        assert_eq!(EditorCommand::IndentContent.name(), "indentContent");
        assert_eq!(
            EditorCommand::KeyTab {
                stroke: KeyStroke::plain(KeyCode::Tab)
            }
            .name(),
            "keyTab"
        );
    }

    #[test]
    fn test_arrow_wire_name_follows_direction() {
        let left = EditorCommand::KeyArrow {
            direction: Direction::Backward,
            stroke: KeyStroke::plain(KeyCode::ArrowLeft),
        };
        let right = EditorCommand::KeyArrow {
            direction: Direction::Forward,
            stroke: KeyStroke::plain(KeyCode::ArrowRight),
        };
        assert_eq!(left.name(), "keyArrowLeft");
        assert_eq!(right.name(), "keyArrowRight");
    }

    #[test]
    fn test_priority_tiers_are_ordered() {
        assert!(CommandPriority::Editor < CommandPriority::Low);
        assert!(CommandPriority::Low < CommandPriority::Normal);
        assert!(CommandPriority::Normal < CommandPriority::High);
        assert!(CommandPriority::High < CommandPriority::Critical);
    }
}

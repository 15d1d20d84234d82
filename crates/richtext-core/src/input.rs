//! Input normalization.
//!
//! The editing surface delivers raw, platform-shaped events: key strokes,
//! IME composition spans, clipboard actions, drops. [`InputNormalizer`]
//! collapses each of them to a [`Normalized`] action: exactly one
//! [`EditorCommand`], a composition bookkeeping step, or nothing.
//!
//! Surfaces differ in one structural way: some deliver a composition-aware
//! `beforeinput` event, some only a legacy `drop`. The two cases are two
//! concrete normalizer configurations, selected once from
//! [`SurfaceCapabilities`] at mount time; an event belonging to the inactive
//! configuration is ignored so the same logical insertion is never handled
//! twice.

use crate::commands::EditorCommand;
use crate::model::Direction;

/// Key identity of a raw key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Escape.
    Escape,
    /// A printable character.
    Char(char),
}

/// A raw key event as delivered by the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    /// Key identity.
    pub code: KeyCode,
    /// Shift held.
    pub shift: bool,
    /// Control held.
    pub ctrl: bool,
    /// Alt / Option held.
    pub alt: bool,
    /// Meta / Command held.
    pub meta: bool,
}

impl KeyStroke {
    /// A key stroke with no modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    /// A key stroke with shift held.
    pub fn shifted(code: KeyCode) -> Self {
        Self {
            shift: true,
            ..Self::plain(code)
        }
    }
}

/// Pre-classified intent of a composition-aware `beforeinput` event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    /// Insert the given text (typing, paste, drop on native surfaces).
    InsertText(String),
    /// Insert a paragraph break.
    InsertParagraph,
    /// Insert a soft line break.
    InsertLineBreak,
    /// Delete backward.
    DeleteBackward,
    /// Delete forward.
    DeleteForward,
}

/// A raw event delivered by the input surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// The platform selection changed.
    SelectionChange,
    /// A key went down.
    KeyDown(KeyStroke),
    /// An IME composition span opened.
    CompositionStart,
    /// The IME composition span closed.
    CompositionEnd,
    /// Cut to clipboard; the host performs the copy half.
    Cut,
    /// Copy to clipboard.
    Copy,
    /// A drag gesture started.
    DragStart,
    /// Paste from clipboard.
    Paste {
        /// Plain-text clipboard payload.
        text: String,
    },
    /// Low-level input notification.
    Input,
    /// Pointer click.
    Click,
    /// Composition-aware input intent; only on surfaces that support it.
    BeforeInput(EditIntent),
    /// Drop of dragged content; only on surfaces without `beforeinput`.
    Drop {
        /// Plain-text drop payload.
        text: String,
    },
}

impl SurfaceEvent {
    /// The subscription kind this event belongs to.
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::SelectionChange => EventKind::SelectionChange,
            SurfaceEvent::KeyDown(_) => EventKind::KeyDown,
            SurfaceEvent::CompositionStart => EventKind::CompositionStart,
            SurfaceEvent::CompositionEnd => EventKind::CompositionEnd,
            SurfaceEvent::Cut => EventKind::Cut,
            SurfaceEvent::Copy => EventKind::Copy,
            SurfaceEvent::DragStart => EventKind::DragStart,
            SurfaceEvent::Paste { .. } => EventKind::Paste,
            SurfaceEvent::Input => EventKind::Input,
            SurfaceEvent::Click => EventKind::Click,
            SurfaceEvent::BeforeInput(_) => EventKind::BeforeInput,
            SurfaceEvent::Drop { .. } => EventKind::Drop,
        }
    }
}

/// Named event subscriptions an editing surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `selectionchange`
    SelectionChange,
    /// `keydown`
    KeyDown,
    /// `compositionstart`
    CompositionStart,
    /// `compositionend`
    CompositionEnd,
    /// `cut`
    Cut,
    /// `copy`
    Copy,
    /// `dragstart`
    DragStart,
    /// `paste`
    Paste,
    /// `input`
    Input,
    /// `click`
    Click,
    /// `beforeinput`
    BeforeInput,
    /// `drop`
    Drop,
}

impl EventKind {
    /// Stable wire name of the event subscription.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::SelectionChange => "selectionchange",
            EventKind::KeyDown => "keydown",
            EventKind::CompositionStart => "compositionstart",
            EventKind::CompositionEnd => "compositionend",
            EventKind::Cut => "cut",
            EventKind::Copy => "copy",
            EventKind::DragStart => "dragstart",
            EventKind::Paste => "paste",
            EventKind::Input => "input",
            EventKind::Click => "click",
            EventKind::BeforeInput => "beforeinput",
            EventKind::Drop => "drop",
        }
    }
}

/// What the input surface can deliver, detected once by the host at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    /// The surface delivers a composition-aware `beforeinput` event.
    pub before_input: bool,
}

impl SurfaceCapabilities {
    /// A surface with native `beforeinput` support.
    pub fn native() -> Self {
        Self { before_input: true }
    }

    /// A surface that needs the drop polyfill.
    pub fn polyfilled() -> Self {
        Self {
            before_input: false,
        }
    }
}

/// Which insertion pathway the active configuration binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionBinding {
    /// Bind `beforeinput`; no drop polyfill.
    BeforeInput,
    /// Bind the `drop` polyfill; `beforeinput` is absent.
    DropPolyfill,
}

/// Outcome of normalizing one surface event.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Dispatch exactly this command.
    Command(EditorCommand),
    /// Bookkeeping: an IME composition span opened.
    BeginComposition,
    /// Bookkeeping: the IME composition span closed.
    EndComposition,
    /// Nothing to do; the platform default proceeds.
    Ignored,
}

/// Maps raw surface events to normalized actions.
///
/// The normalizer is a pure mapping: it holds the binding configuration and
/// nothing else. Composition state lives on the session that owns the
/// editing surface, scoped to that surface's lifecycle.
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    insertion: InsertionBinding,
    bindings: Vec<EventKind>,
}

impl InputNormalizer {
    /// Build the configuration for a surface's capabilities.
    pub fn for_surface(capabilities: SurfaceCapabilities) -> Self {
        let insertion = if capabilities.before_input {
            InsertionBinding::BeforeInput
        } else {
            InsertionBinding::DropPolyfill
        };
        let mut bindings = vec![
            EventKind::SelectionChange,
            EventKind::KeyDown,
            EventKind::CompositionStart,
            EventKind::CompositionEnd,
            EventKind::Cut,
            EventKind::Copy,
            EventKind::DragStart,
            EventKind::Paste,
            EventKind::Input,
            EventKind::Click,
        ];
        bindings.push(match insertion {
            InsertionBinding::BeforeInput => EventKind::BeforeInput,
            InsertionBinding::DropPolyfill => EventKind::Drop,
        });
        Self {
            insertion,
            bindings,
        }
    }

    /// The insertion pathway this configuration binds.
    pub fn insertion(&self) -> InsertionBinding {
        self.insertion
    }

    /// The ordered event subscriptions the host surface should register.
    pub fn bindings(&self) -> &[EventKind] {
        &self.bindings
    }

    /// Collapse one raw event to its normalized action.
    ///
    /// `composing` is the owning session's composition flag; while it is
    /// set, key strokes belong to the IME and are ignored here.
    pub fn normalize(&self, composing: bool, event: SurfaceEvent) -> Normalized {
        match event {
            SurfaceEvent::KeyDown(_) if composing => Normalized::Ignored,
            SurfaceEvent::KeyDown(stroke) => Self::normalize_key(stroke),
            SurfaceEvent::CompositionStart => Normalized::BeginComposition,
            SurfaceEvent::CompositionEnd => Normalized::EndComposition,
            SurfaceEvent::Cut => Normalized::Command(EditorCommand::RemoveText),
            SurfaceEvent::Paste { text } => {
                Normalized::Command(EditorCommand::InsertText { text })
            }
            SurfaceEvent::BeforeInput(intent) => {
                if self.insertion == InsertionBinding::BeforeInput {
                    Normalized::Command(Self::intent_command(intent))
                } else {
                    Normalized::Ignored
                }
            }
            SurfaceEvent::Drop { text } => {
                if self.insertion == InsertionBinding::DropPolyfill {
                    Normalized::Command(EditorCommand::InsertText { text })
                } else {
                    Normalized::Ignored
                }
            }
            SurfaceEvent::SelectionChange
            | SurfaceEvent::Copy
            | SurfaceEvent::DragStart
            | SurfaceEvent::Input
            | SurfaceEvent::Click => Normalized::Ignored,
        }
    }

    fn normalize_key(stroke: KeyStroke) -> Normalized {
        let command = match stroke.code {
            KeyCode::Backspace => EditorCommand::KeyBackspace { stroke },
            KeyCode::Delete => EditorCommand::KeyDelete { stroke },
            KeyCode::Enter => EditorCommand::KeyEnter { stroke },
            KeyCode::Tab => EditorCommand::KeyTab { stroke },
            KeyCode::ArrowLeft => EditorCommand::KeyArrow {
                direction: Direction::Backward,
                stroke,
            },
            KeyCode::ArrowRight => EditorCommand::KeyArrow {
                direction: Direction::Forward,
                stroke,
            },
            // Printable keys arrive through the insertion binding.
            KeyCode::Escape | KeyCode::Char(_) => return Normalized::Ignored,
        };
        Normalized::Command(command)
    }

    fn intent_command(intent: EditIntent) -> EditorCommand {
        match intent {
            EditIntent::InsertText(text) => EditorCommand::InsertText { text },
            EditIntent::InsertParagraph => EditorCommand::InsertParagraph,
            EditIntent::InsertLineBreak => EditorCommand::InsertLineBreak {
                select_start: false,
            },
            EditIntent::DeleteBackward => EditorCommand::DeleteCharacter { backward: true },
            EditIntent::DeleteForward => EditorCommand::DeleteCharacter { backward: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_surface_binds_beforeinput_not_drop() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::native());
        assert_eq!(normalizer.insertion(), InsertionBinding::BeforeInput);
        assert!(normalizer.bindings().contains(&EventKind::BeforeInput));
        assert!(!normalizer.bindings().contains(&EventKind::Drop));
    }

    #[test]
    fn test_polyfilled_surface_binds_drop_not_beforeinput() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::polyfilled());
        assert_eq!(normalizer.insertion(), InsertionBinding::DropPolyfill);
        assert!(normalizer.bindings().contains(&EventKind::Drop));
        assert!(!normalizer.bindings().contains(&EventKind::BeforeInput));
    }

    #[test]
    fn test_keydown_maps_to_key_commands() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::native());
        let stroke = KeyStroke::plain(KeyCode::Backspace);
        assert_eq!(
            normalizer.normalize(false, SurfaceEvent::KeyDown(stroke)),
            Normalized::Command(EditorCommand::KeyBackspace { stroke })
        );
    }

    #[test]
    fn test_keydown_is_ignored_while_composing() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::native());
        let stroke = KeyStroke::plain(KeyCode::Enter);
        assert_eq!(
            normalizer.normalize(true, SurfaceEvent::KeyDown(stroke)),
            Normalized::Ignored
        );
    }

    #[test]
    fn test_printable_keydown_is_ignored() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::native());
        let stroke = KeyStroke::plain(KeyCode::Char('a'));
        assert_eq!(
            normalizer.normalize(false, SurfaceEvent::KeyDown(stroke)),
            Normalized::Ignored
        );
    }

    #[test]
    fn test_inactive_insertion_binding_never_double_handles() {
        let native = InputNormalizer::for_surface(SurfaceCapabilities::native());
        assert_eq!(
            native.normalize(
                false,
                SurfaceEvent::Drop {
                    text: "x".to_string()
                }
            ),
            Normalized::Ignored
        );

        let polyfilled = InputNormalizer::for_surface(SurfaceCapabilities::polyfilled());
        assert_eq!(
            polyfilled.normalize(
                false,
                SurfaceEvent::BeforeInput(EditIntent::InsertText("x".to_string()))
            ),
            Normalized::Ignored
        );
    }

    #[test]
    fn test_composition_events_are_bookkeeping_only() {
        let normalizer = InputNormalizer::for_surface(SurfaceCapabilities::native());
        assert_eq!(
            normalizer.normalize(false, SurfaceEvent::CompositionStart),
            Normalized::BeginComposition
        );
        assert_eq!(
            normalizer.normalize(true, SurfaceEvent::CompositionEnd),
            Normalized::EndComposition
        );
    }

    #[test]
    fn test_event_wire_names() {
        assert_eq!(EventKind::SelectionChange.name(), "selectionchange");
        assert_eq!(EventKind::BeforeInput.name(), "beforeinput");
        assert_eq!(EventKind::Drop.name(), "drop");
    }
}

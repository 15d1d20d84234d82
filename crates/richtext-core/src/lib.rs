#![warn(missing_docs)]
//! Rich-Text Command Core - Headless Input Normalization and Dispatch
//!
//! # Overview
//!
//! `richtext-core` is the command-dispatch kernel of a rich-text editing
//! surface. It translates raw, inconsistent input signals (key strokes,
//! IME composition spans, clipboard actions, drops) into a small closed
//! set of normalized editing commands, and executes each command against a
//! document/selection model with well-defined boundary behavior (indent
//! clamping, literal tabs in code blocks, paragraph splitting).
//!
//! The crate is headless: it owns no document tree, performs no rendering,
//! and does no I/O. The host document session is reached through the
//! [`EditorModel`] trait; [`HeadlessDocument`] is an in-memory reference
//! implementation for tests, examples, and embedders without a tree of
//! their own.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Lifecycle (mount / unmount / clear)        │  ← Setup & teardown
//! ├─────────────────────────────────────────────┤
//! │  Input Normalizer (SurfaceEvent → Command)  │  ← Raw event mapping
//! ├─────────────────────────────────────────────┤
//! │  Session (priority registry, dispatch)      │  ← Command routing
//! ├─────────────────────────────────────────────┤
//! │  Rich-Text Handler (exhaustive match)       │  ← Editing semantics
//! ├─────────────────────────────────────────────┤
//! │  EditorModel trait (host document tree)     │  ← Model boundary
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use richtext_core::{
//!     EditorCommand, EditorModel, EditorSession, HeadlessDocument, MountOptions,
//! };
//!
//! let mut document = HeadlessDocument::new();
//! document.set_focused(true);
//!
//! let mut session = EditorSession::new(document);
//! session
//!     .mount(MountOptions {
//!         init_empty_document: true,
//!         ..MountOptions::default()
//!     })
//!     .unwrap();
//!
//! // Mounting an empty document seeds a single paragraph and places the
//! // selection inside it.
//! let root = session.model().root();
//! let paragraph = session.model().first_child(root).expect("seeded paragraph");
//!
//! let handled = session.dispatch(&EditorCommand::InsertText {
//!     text: "Hello".to_string(),
//! });
//! assert!(handled.is_handled());
//! assert_eq!(session.model().text_of(paragraph), "Hello");
//! ```
//!
//! ## Driving the pipeline with raw events
//!
//! ```rust
//! use richtext_core::{
//!     EditorModel, EditorSession, HeadlessDocument, KeyCode, KeyStroke, MountOptions,
//!     SurfaceEvent,
//! };
//!
//! let mut document = HeadlessDocument::new();
//! document.set_focused(true);
//! let mut session = EditorSession::new(document);
//! session
//!     .mount(MountOptions {
//!         init_empty_document: true,
//!         ..MountOptions::default()
//!     })
//!     .unwrap();
//!
//! session.process_event(SurfaceEvent::Paste {
//!     text: "Hello".to_string(),
//! });
//! let handled = session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Enter)));
//!
//! // Enter split the paragraph; the caller suppresses the platform default.
//! assert!(handled.is_handled());
//! let root = session.model().root();
//! assert_eq!(session.model().child_count(root), 2);
//! ```
//!
//! # Module Description
//!
//! - [`commands`] - the closed command set and dispatch vocabulary
//! - [`input`] - raw surface events and the input normalizer
//! - [`dispatch`] - the rich-text command handler and caret policy
//! - [`session`] - the per-surface session: update boundary and registry
//! - [`lifecycle`] - mount / unmount / clear
//! - [`model`] - the document-model boundary trait
//! - [`headless`] - in-memory reference document

pub mod commands;
pub mod dispatch;
pub mod headless;
pub mod input;
pub mod lifecycle;
pub mod model;
pub mod session;

pub use commands::{CommandPriority, Dispatch, EditorCommand};
pub use dispatch::{CaretPolicy, RichTextHandler, TrustNative};
pub use headless::HeadlessDocument;
pub use input::{
    EditIntent, EventKind, InputNormalizer, InsertionBinding, KeyCode, KeyStroke, Normalized,
    SurfaceCapabilities, SurfaceEvent,
};
pub use lifecycle::{LifecycleError, LifecycleState, MountOptions, RECOGNIZED_BLOCKS};
pub use model::{
    Anchor, BlockKind, Direction, EditorModel, ElementFormat, FormatSet, MAX_INDENT, NodeId,
    PointKind, TextFormat,
};
pub use session::{EditorSession, HandlerId};

//! Mount / unmount / clear behavior.

use std::cell::Cell;

use pretty_assertions::assert_eq;
use richtext_core::{
    BlockKind, Dispatch, EditorCommand, EditorModel, EditorSession, HeadlessDocument,
    LifecycleError, LifecycleState, MountOptions, RECOGNIZED_BLOCKS, SurfaceEvent,
};

fn init_options() -> MountOptions {
    MountOptions {
        init_empty_document: true,
        ..MountOptions::default()
    }
}

#[test]
fn test_mount_seeds_empty_document_with_one_paragraph() {
    let mut document = HeadlessDocument::new();
    document.set_focused(true);
    let mut session = EditorSession::new(document);

    session.mount(init_options()).unwrap();
    assert_eq!(session.lifecycle(), LifecycleState::Mounted);

    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 1);
    let paragraph = session.model().first_child(root).unwrap();
    assert_eq!(session.model().kind_of(paragraph), Some(BlockKind::Paragraph));
    assert_eq!(session.model().text_of(paragraph), "");

    // The surface is focused, so the selection lands inside the paragraph.
    let anchor = session.model().selection_anchor().expect("selection placed");
    assert_eq!(anchor.offset, 0);
    assert_eq!(session.model().parent(anchor.node), Some(paragraph));
}

#[test]
fn test_mount_without_focus_or_selection_leaves_selection_unset() {
    let mut session = EditorSession::new(HeadlessDocument::new());
    session.mount(init_options()).unwrap();

    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 1);
    assert!(session.model().selection_anchor().is_none());
}

#[test]
fn test_init_paragraph_is_noop_on_non_empty_root() {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Heading, "title");
    document.select_at(block, 0);
    let mut session = EditorSession::new(document);

    session.mount(init_options()).unwrap();

    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 1);
    assert_eq!(session.model().text_of(block), "title");
}

#[test]
fn test_mount_registers_recognized_block_kinds() {
    let mut session = EditorSession::new(HeadlessDocument::new());
    session.mount(MountOptions::default()).unwrap();

    for kind in RECOGNIZED_BLOCKS {
        assert!(session.model().registered_kinds().contains(&kind));
    }
}

#[test]
fn test_double_mount_is_an_error() {
    let mut session = EditorSession::new(HeadlessDocument::new());
    session.mount(MountOptions::default()).unwrap();
    assert!(matches!(
        session.mount(MountOptions::default()),
        Err(LifecycleError::AlreadyMounted)
    ));
}

#[test]
fn test_unmount_tears_down_event_processing_and_handler() {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "hello");
    document.select_at(block, 5);
    let mut session = EditorSession::new(document);
    session.mount(MountOptions::default()).unwrap();

    session.unmount().unwrap();
    assert_eq!(session.lifecycle(), LifecycleState::Unmounted);

    // Events fall through to the platform again...
    let handled = session.process_event(SurfaceEvent::Paste {
        text: "x".to_string(),
    });
    assert_eq!(handled, Dispatch::Unhandled);
    // ...and the mount-installed command handler is gone with them.
    let handled = session.dispatch(&EditorCommand::InsertText {
        text: "x".to_string(),
    });
    assert_eq!(handled, Dispatch::Unhandled);
    assert_eq!(session.model().text_of(block), "hello");
}

#[test]
fn test_unmount_without_mount_is_an_error() {
    let mut session = EditorSession::new(HeadlessDocument::new());
    assert!(matches!(session.unmount(), Err(LifecycleError::NotMounted)));
}

#[test]
fn test_remount_after_unmount() {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "hello");
    document.select_at(block, 5);
    let mut session = EditorSession::new(document);

    session.mount(MountOptions::default()).unwrap();
    session.unmount().unwrap();
    session.mount(MountOptions::default()).unwrap();

    let handled = session.process_event(SurfaceEvent::Paste {
        text: "!".to_string(),
    });
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "hello!");
}

#[test]
fn test_unmount_closes_open_composition_span() {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "hello");
    document.select_at(block, 5);
    let mut session = EditorSession::new(document);
    session.mount(MountOptions::default()).unwrap();

    session.process_event(SurfaceEvent::CompositionStart);
    assert!(session.is_composing());
    session.unmount().unwrap();
    assert!(!session.is_composing());
}

#[test]
fn test_clear_resets_any_document_to_one_empty_paragraph() {
    let mut document = HeadlessDocument::new();
    let first = document.append_block(BlockKind::Heading, "title");
    document.append_block(BlockKind::Paragraph, "body");
    document.append_block(BlockKind::CodeBlock, "\tcode");
    document.select_at(first, 2);
    let mut session = EditorSession::new(document);
    session.mount(MountOptions::default()).unwrap();

    session.clear();

    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 1);
    let paragraph = session.model().first_child(root).unwrap();
    assert_eq!(session.model().kind_of(paragraph), Some(BlockKind::Paragraph));
    assert_eq!(session.model().text_of(paragraph), "");

    // There was an active selection, so it survives into the new paragraph.
    let anchor = session.model().selection_anchor().expect("selection kept");
    assert_eq!(anchor.offset, 0);
    assert_eq!(session.model().parent(anchor.node), Some(paragraph));
}

#[test]
fn test_clear_invokes_completion_callback_once_after_commit() {
    let mut document = HeadlessDocument::new();
    document.append_block(BlockKind::Paragraph, "body");
    let mut session = EditorSession::new(document);
    session.mount(MountOptions::default()).unwrap();
    let version_before = session.version();

    let calls = Cell::new(0u32);
    session.clear_with(|| calls.set(calls.get() + 1));

    assert_eq!(calls.get(), 1);
    assert_eq!(session.version(), version_before + 1);
}

#[test]
fn test_clear_works_without_mount() {
    let mut document = HeadlessDocument::new();
    document.append_block(BlockKind::Paragraph, "body");
    let mut session = EditorSession::new(document);

    session.clear();
    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 1);
    assert_eq!(
        session.model().text_of(session.model().first_child(root).unwrap()),
        ""
    );
}

#[test]
fn test_end_to_end_typing_after_fresh_mount() {
    let mut document = HeadlessDocument::new();
    document.set_focused(true);
    let mut session = EditorSession::new(document);
    session.mount(init_options()).unwrap();

    session.process_event(SurfaceEvent::Paste {
        text: "hello".to_string(),
    });
    let root = session.model().root();
    let paragraph = session.model().first_child(root).unwrap();
    assert_eq!(session.model().text_of(paragraph), "hello");
}

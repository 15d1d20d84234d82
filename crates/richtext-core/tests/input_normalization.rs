//! End-to-end event processing: raw surface events through the normalizer
//! into the dispatcher, including composition gating and the
//! capability-conditional insertion binding.

use pretty_assertions::assert_eq;
use richtext_core::{
    BlockKind, Dispatch, EditIntent, EditorModel, EditorSession, HeadlessDocument, KeyCode,
    KeyStroke, MountOptions, NodeId, SurfaceCapabilities, SurfaceEvent,
};

fn mounted(capabilities: SurfaceCapabilities) -> (EditorSession<HeadlessDocument>, NodeId) {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "seed");
    document.select_at(block, 4);
    let mut session = EditorSession::new(document);
    session
        .mount(MountOptions {
            capabilities,
            ..MountOptions::default()
        })
        .expect("fresh session mounts");
    (session, block)
}

#[test]
fn test_paste_inserts_clipboard_text() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());

    let handled = session.process_event(SurfaceEvent::Paste {
        text: "ling".to_string(),
    });
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "seedling");
}

#[test]
fn test_cut_removes_selected_range() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());
    session.update(|model| model.select_range(block, 0, 2));

    let handled = session.process_event(SurfaceEvent::Cut);
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "ed");
}

#[test]
fn test_before_input_intents_reach_the_model() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());

    session.process_event(SurfaceEvent::BeforeInput(EditIntent::InsertText(
        "!".to_string(),
    )));
    assert_eq!(session.model().text_of(block), "seed!");

    session.process_event(SurfaceEvent::BeforeInput(EditIntent::DeleteBackward));
    assert_eq!(session.model().text_of(block), "seed");

    session.process_event(SurfaceEvent::BeforeInput(EditIntent::InsertLineBreak));
    assert_eq!(session.model().text_of(block), "seed\n");

    session.process_event(SurfaceEvent::BeforeInput(EditIntent::InsertParagraph));
    let root = session.model().root();
    assert_eq!(session.model().child_count(root), 2);
}

#[test]
fn test_drop_is_inert_on_native_surfaces() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());

    let handled = session.process_event(SurfaceEvent::Drop {
        text: "dragged".to_string(),
    });
    assert_eq!(handled, Dispatch::Unhandled);
    assert_eq!(session.model().text_of(block), "seed");
}

#[test]
fn test_drop_polyfill_inserts_on_legacy_surfaces() {
    let (mut session, block) = mounted(SurfaceCapabilities::polyfilled());

    let handled = session.process_event(SurfaceEvent::Drop {
        text: " dragged".to_string(),
    });
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "seed dragged");

    // And the reverse: beforeinput never fires on these surfaces, so a
    // stray one is dropped rather than double-handled.
    let handled = session.process_event(SurfaceEvent::BeforeInput(EditIntent::InsertText(
        "x".to_string(),
    )));
    assert_eq!(handled, Dispatch::Unhandled);
    assert_eq!(session.model().text_of(block), "seed dragged");
}

#[test]
fn test_keydown_flows_through_to_editing_semantics() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());

    let handled = session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Backspace)));
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "see");

    let handled = session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Tab)));
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().indent_of(block), 1);
}

#[test]
fn test_arrow_keydown_is_not_suppressed_by_default() {
    let (mut session, _block) = mounted(SurfaceCapabilities::native());

    let handled =
        session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::ArrowLeft)));
    assert_eq!(handled, Dispatch::Unhandled);
}

#[test]
fn test_composition_span_gates_key_events() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());

    session.process_event(SurfaceEvent::CompositionStart);
    assert!(session.is_composing());

    // The IME owns key strokes for the duration of the span.
    let handled = session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Backspace)));
    assert_eq!(handled, Dispatch::Unhandled);
    assert_eq!(session.model().text_of(block), "seed");

    session.process_event(SurfaceEvent::CompositionEnd);
    assert!(!session.is_composing());

    let handled = session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Backspace)));
    assert_eq!(handled, Dispatch::Handled);
    assert_eq!(session.model().text_of(block), "see");
}

#[test]
fn test_mutation_observer_reconciles_text() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());
    let text_node = session.model().text_node_of(block).expect("block has text");

    // Spell correction rewrote the node behind the editor's back.
    assert!(session.observe_mutation(text_node, "sled"));
    assert_eq!(session.model().text_of(block), "sled");
}

#[test]
fn test_mutation_observer_is_inert_while_composing() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());
    let text_node = session.model().text_node_of(block).expect("block has text");

    session.process_event(SurfaceEvent::CompositionStart);
    assert!(!session.observe_mutation(text_node, "sled"));
    assert_eq!(session.model().text_of(block), "seed");
}

#[test]
fn test_bookkeeping_events_do_not_claim_or_mutate() {
    let (mut session, block) = mounted(SurfaceCapabilities::native());
    let version_before = session.version();

    for event in [
        SurfaceEvent::SelectionChange,
        SurfaceEvent::Copy,
        SurfaceEvent::DragStart,
        SurfaceEvent::Input,
        SurfaceEvent::Click,
    ] {
        assert_eq!(session.process_event(event), Dispatch::Unhandled);
    }
    assert_eq!(session.model().text_of(block), "seed");
    assert_eq!(session.version(), version_before);
}

#[test]
fn test_events_pass_through_on_unmounted_session() {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "seed");
    document.select_at(block, 4);
    let mut session = EditorSession::new(document);

    let handled = session.process_event(SurfaceEvent::Paste {
        text: "x".to_string(),
    });
    assert_eq!(handled, Dispatch::Unhandled);
    assert_eq!(session.model().text_of(block), "seed");
}

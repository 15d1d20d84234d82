//! Command pipeline example
//!
//! Drives the full normalize → dispatch → mutate pipeline over the
//! headless reference document, the way a host input surface would.

use richtext_core::{
    BlockKind, EditorModel, EditorSession, HeadlessDocument, KeyCode, KeyStroke, MountOptions,
    SurfaceCapabilities, SurfaceEvent,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut document = HeadlessDocument::new();
    document.set_focused(true);
    let mut session = EditorSession::new(document);
    session
        .mount(MountOptions {
            init_empty_document: true,
            capabilities: SurfaceCapabilities::native(),
            ..MountOptions::default()
        })
        .unwrap();

    println!("=== Rich-text command pipeline ===\n");

    // Typed text arrives through the insertion binding.
    session.process_event(SurfaceEvent::Paste {
        text: "Command pipelines".to_string(),
    });
    let root = session.model().root();
    let paragraph = session.model().first_child(root).unwrap();
    println!("after paste:        {:?}", session.model().text_of(paragraph));

    // Backspace is a keydown; the handler claims it so the host would
    // suppress the platform default.
    let handled =
        session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Backspace)));
    println!(
        "after backspace:    {:?} (handled: {})",
        session.model().text_of(paragraph),
        handled.is_handled()
    );

    // Enter splits the paragraph.
    session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Enter)));
    println!("paragraphs now:     {}", session.model().child_count(root));

    // Tab indents a plain paragraph structurally...
    session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Tab)));
    let anchor = session.model().selection_anchor().unwrap();
    let current = session.model().parent(anchor.node).unwrap();
    println!("indent level:       {}", session.model().indent_of(current));

    // ...but inserts a literal tab inside a code block.
    let code = session.update(|model| {
        let code = model.append_block(BlockKind::CodeBlock, "fn main() {");
        model.select_at(code, 11);
        code
    });
    session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(KeyCode::Tab)));
    println!("code block text:    {:?}", session.model().text_of(code));

    session.unmount().unwrap();
    println!("\nunmounted; events pass through untouched again");
}

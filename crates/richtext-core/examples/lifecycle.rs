//! Lifecycle example
//!
//! Mount with document initialization, edit, then wipe back to the
//! canonical single-empty-paragraph state.

use richtext_core::{
    EditorCommand, EditorModel, EditorSession, HeadlessDocument, MountOptions,
};

fn main() {
    let mut document = HeadlessDocument::new();
    document.set_focused(true);
    let mut session = EditorSession::new(document);

    session
        .mount(MountOptions {
            init_empty_document: true,
            ..MountOptions::default()
        })
        .unwrap();

    let root = session.model().root();
    println!("after mount: {} child(ren)", session.model().child_count(root));

    session.dispatch(&EditorCommand::InsertText {
        text: "first".to_string(),
    });
    session.dispatch(&EditorCommand::InsertParagraph);
    session.dispatch(&EditorCommand::InsertText {
        text: "second".to_string(),
    });
    println!("after edits: {} child(ren)", session.model().child_count(root));

    session.clear_with(|| println!("clear committed"));
    let paragraph = session.model().first_child(root).unwrap();
    println!(
        "after clear: {} child(ren), text {:?}",
        session.model().child_count(root),
        session.model().text_of(paragraph)
    );
}

//! Dispatch throughput over the headless reference document.

use criterion::{Criterion, criterion_group, criterion_main};
use richtext_core::{
    BlockKind, EditorCommand, EditorSession, HeadlessDocument, KeyCode, KeyStroke, MountOptions,
    SurfaceEvent,
};

fn mounted_session() -> EditorSession<HeadlessDocument> {
    let mut document = HeadlessDocument::new();
    let block = document.append_block(BlockKind::Paragraph, "");
    document.select_at(block, 0);
    let mut session = EditorSession::new(document);
    session.mount(MountOptions::default()).unwrap();
    session
}

fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("dispatch_insert_text", |b| {
        b.iter_batched(
            mounted_session,
            |mut session| {
                for _ in 0..100 {
                    session.dispatch(&EditorCommand::InsertText {
                        text: "x".to_string(),
                    });
                }
                session
            },
            criterion::BatchSize::SmallInput,
        );
    });

    c.bench_function("process_event_typing_burst", |b| {
        b.iter_batched(
            mounted_session,
            |mut session| {
                for _ in 0..50 {
                    session.process_event(SurfaceEvent::Paste {
                        text: "word ".to_string(),
                    });
                    session.process_event(SurfaceEvent::KeyDown(KeyStroke::plain(
                        KeyCode::Backspace,
                    )));
                }
                session
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_dispatch);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kokoro_core::emotion::parse_tagged_reply;
use kokoro_core::types::{derive_title, Emotion, Role, Session};

fn bench_parse_tagged_reply(c: &mut Criterion) {
    c.bench_function("parse_tagged_reply_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(parse_tagged_reply("[EMOTION:thinking] Let me work through that step by step for you."));
            }
        })
    });

    c.bench_function("parse_untagged_reply_1000", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                black_box(parse_tagged_reply("A reply that forgot its tag entirely, degrading to the default."));
            }
        })
    });
}

fn bench_session_append(c: &mut Criterion) {
    c.bench_function("session_append_100_exchanges", |b| {
        b.iter(|| {
            let mut s = Session::new();
            for i in 0..100 {
                s.append(Role::User, format!("Question {i}: how does the emotion tag protocol interact with session titles?"), None);
                s.append(Role::Assistant, format!("Answer {i}: the tag is stripped before storage, the title comes from the first user turn."), Some(Emotion::Thinking));
            }
            black_box(&s);
        })
    });
}

fn bench_derive_title(c: &mut Criterion) {
    let long = "สวัสดีค่ะ ".repeat(20);
    c.bench_function("derive_title_multibyte", |b| {
        b.iter(|| black_box(derive_title(&long)))
    });
}

criterion_group!(benches, bench_parse_tagged_reply, bench_session_append, bench_derive_title);
criterion_main!(benches);

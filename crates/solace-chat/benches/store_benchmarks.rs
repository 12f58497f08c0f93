//! Benchmarks for the synchronous conversation paths.
//!
//! Appends and renders run on the UI's event loop, so they must stay well
//! under a frame even for long conversations. Replies never resolve here;
//! the store queues every request behind the first.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use solace_chat::{
    compose_reply, ConversationStore, ReplyError, ReplyRequest, ReplyResponse, ReplyService,
};
use solace_core::config::ChatConfig;
use solace_core::types::SequenceIndex;

/// Reply service whose replies never arrive.
struct Stalled;

#[async_trait]
impl ReplyService for Stalled {
    async fn generate_reply(&self, _request: &ReplyRequest) -> Result<ReplyResponse, ReplyError> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "stalled"
    }
}

fn store_with(messages: usize) -> ConversationStore {
    let store = ConversationStore::new(ChatConfig::default(), Arc::new(Stalled));
    for i in 0..messages {
        let _ = store.append_user_message(&format!("message number {}", i));
    }
    store
}

fn bench_append(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let _guard = rt.enter();

    let mut group = c.benchmark_group("conversation_append");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("append_100_queued", |b| {
        b.iter_batched(
            || ConversationStore::new(ChatConfig::default(), Arc::new(Stalled)),
            |store| {
                for i in 0..100 {
                    let _ = store.append_user_message(&format!("I feel {}", i));
                }
                store
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_render_reads(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let _guard = rt.enter();

    let store = store_with(1000);
    let view = store.view();
    let tail = SequenceIndex(990);

    let mut group = c.benchmark_group("conversation_reads");
    group.bench_function("messages_full_1000", |b| b.iter(|| view.messages()));
    group.bench_function("messages_after_tail", |b| {
        b.iter(|| view.messages_after(Some(tail)))
    });
    group.finish();
}

fn bench_compose_reply(c: &mut Criterion) {
    let inputs: Vec<String> = (0..100)
        .map(|i| format!("I have been feeling anxious about work, day {}.", i))
        .collect();

    c.bench_function("compose_reply", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let reply = compose_reply(&inputs[idx % inputs.len()]);
            idx += 1;
            reply
        });
    });
}

criterion_group!(benches, bench_append, bench_render_reads, bench_compose_reply);
criterion_main!(benches);

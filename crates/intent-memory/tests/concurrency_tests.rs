//! Concurrency checks for Fast Memory: single-writer-many-reader, no torn
//! reads, consistent counts under contention.

use std::sync::Arc;
use std::thread;

use chrono::Utc;
use intent_memory::{EvictionPolicy, FastMemory, NullBackend};
use intent_types::GoldenRecord;
use uuid::Uuid;

fn record(n: u128) -> GoldenRecord {
    GoldenRecord {
        record_id: Uuid::from_u128(n),
        original_input: format!("input {n}"),
        embedding: vec![(n as f32).sin(), (n as f32).cos()],
        resolved_intent_id: "transfer_to_account".into(),
        confidence_at_time: 0.9,
        context_fingerprint: "loc=_|purpose=_|user=_".into(),
        created_at: Utc::now(),
    }
}

#[test]
fn concurrent_inserts_all_land_and_counts_agree() {
    let memory = Arc::new(FastMemory::new(Box::new(NullBackend), EvictionPolicy::Unbounded).unwrap());

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let memory = Arc::clone(&memory);
            thread::spawn(move || memory.insert(record(i)).expect("insert should succeed"))
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(memory.count(), 50);
}

#[test]
fn concurrent_readers_never_observe_a_torn_store() {
    let memory = Arc::new(FastMemory::new(Box::new(NullBackend), EvictionPolicy::Unbounded).unwrap());
    for i in 0..20 {
        memory.insert(record(i)).unwrap();
    }

    let reader_handles: Vec<_> = (0..10)
        .map(|_| {
            let memory = Arc::clone(&memory);
            thread::spawn(move || {
                for _ in 0..50 {
                    let results = memory.query(&[1.0, 0.0], 5);
                    assert!(results.len() <= memory.count());
                }
            })
        })
        .collect();

    let writer_handles: Vec<_> = (20..30)
        .map(|i| {
            let memory = Arc::clone(&memory);
            thread::spawn(move || memory.insert(record(i)).unwrap())
        })
        .collect();

    for h in reader_handles {
        h.join().unwrap();
    }
    for h in writer_handles {
        h.join().unwrap();
    }

    assert_eq!(memory.count(), 30);
}

#[test]
fn query_ranking_is_stable_under_concurrent_writes_to_unrelated_records() {
    let memory = Arc::new(FastMemory::new(Box::new(NullBackend), EvictionPolicy::Unbounded).unwrap());
    memory
        .insert(GoldenRecord {
            embedding: vec![1.0, 0.0],
            ..record(1)
        })
        .unwrap();

    let writers: Vec<_> = (2..12)
        .map(|i| {
            let memory = Arc::clone(&memory);
            thread::spawn(move || {
                memory
                    .insert(GoldenRecord {
                        embedding: vec![0.0, 1.0],
                        ..record(i)
                    })
                    .unwrap()
            })
        })
        .collect();
    for w in writers {
        w.join().unwrap();
    }

    let top = memory.query(&[1.0, 0.0], 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0.record_id, Uuid::from_u128(1));
}

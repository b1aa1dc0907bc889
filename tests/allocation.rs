//! Concurrency properties of counter allocation.

use std::collections::HashSet;
use std::sync::Arc;

use linklet::application::services::allocator::{COUNTER_KEY, CounterAllocator, public_code};
use linklet::domain::repositories::RecordRepository;
use linklet::infrastructure::persistence::KvRecordRepository;
use linklet::infrastructure::store::{InMemoryKvStore, KvStore};

const SEED: u64 = 1000;

#[tokio::test]
async fn test_concurrent_allocations_are_exactly_once() {
    let store = Arc::new(InMemoryKvStore::new());
    let kv: Arc<dyn KvStore> = store.clone();

    let allocator = Arc::new(CounterAllocator::new(kv.clone(), SEED));
    allocator.ensure_seeded().await.unwrap();

    const K: usize = 32;
    let mut handles = Vec::new();
    for i in 0..K {
        let allocator = allocator.clone();
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/{}", i);
            allocator.allocate(&url).await.unwrap()
        }));
    }

    let mut codes = HashSet::new();
    for handle in handles {
        let (code, _record) = handle.await.unwrap();
        assert!(codes.insert(code), "a code was allocated twice");
    }

    // Exactly the values {SEED+1, ..., SEED+K}, each used once.
    let expected: HashSet<String> =
        (1..=K as u64).map(|i| public_code(SEED + i)).collect();
    assert_eq!(codes, expected);

    // The counter landed on SEED+K.
    assert_eq!(
        store.get(COUNTER_KEY).await.unwrap(),
        Some((SEED + K as u64).to_string())
    );

    // Every allocation left a retrievable record.
    let records = KvRecordRepository::new(kv);
    for code in &codes {
        let record = records.get(code).await.unwrap();
        assert!(record.is_some(), "record missing for {}", code);
        assert!(record.unwrap().clicks.is_empty());
    }
}

#[tokio::test]
async fn test_counter_and_record_commit_together() {
    let store = Arc::new(InMemoryKvStore::new());
    let kv: Arc<dyn KvStore> = store.clone();

    let allocator = CounterAllocator::new(kv.clone(), SEED);
    allocator.ensure_seeded().await.unwrap();

    let (code, _) = allocator.allocate("https://example.com").await.unwrap();

    // Both writes are visible: no counter advance without its record.
    assert_eq!(
        store.get(COUNTER_KEY).await.unwrap(),
        Some((SEED + 1).to_string())
    );
    assert!(store.get(&code).await.unwrap().is_some());
}

//! The batch pipeline against a real redb database.

use jiff::SignedDuration;
use linkhop_core::{Clock, ShortCode, Store};
use linkhop_generator::RandomGenerator;
use linkhop_shortener::{BatchError, ShortenRequest, Shortener, ShortenerError, ShortenerService};
use linkhop_storage::{LinkRegistry, RedbStore};
use linkhop_test_infra::{LinkFixture, TempRedbStore, TestClock};
use std::sync::Arc;

type Service = ShortenerService<Arc<RedbStore>, RandomGenerator, TestClock>;

fn service(temp: &TempRedbStore, clock: &TestClock) -> Service {
    ShortenerService::new(
        LinkRegistry::new(temp.store()),
        RandomGenerator::default(),
        clock.clone(),
    )
}

#[test]
fn aliased_link_is_persisted() {
    let temp = TempRedbStore::new().unwrap();
    let clock = TestClock::at_second(1_700_000_000);
    let service = service(&temp, &clock);

    let record = service
        .shorten(
            ShortenRequest::builder()
                .original_url("https://example.com")
                .alias("ex1")
                .build(),
        )
        .unwrap();

    assert_eq!(record.shortcode().as_str(), "ex1");
    assert_eq!(record.clicks(), 0);
    assert_eq!(
        record.expiry_time(),
        clock.now() + SignedDuration::from_mins(30)
    );

    let stored = temp.load().unwrap();
    assert_eq!(stored.records, vec![record]);
}

#[test]
fn invalid_third_entry_commits_nothing() {
    let temp = TempRedbStore::new().unwrap();
    let clock = TestClock::at_second(1_700_000_000);
    let service = service(&temp, &clock);

    let batch: Vec<ShortenRequest> = [
        "https://one.example",
        "https://two.example",
        "not-a-valid-url",
        "https://four.example",
        "https://five.example",
    ]
    .into_iter()
    .map(|url| ShortenRequest::builder().original_url(url).build())
    .collect();

    let err = service.submit(&batch).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Entry {
            index: 2,
            source: ShortenerError::InvalidUrl { .. }
        }
    ));

    let snapshot = temp.load().unwrap();
    assert!(snapshot.records.is_empty());
    assert_eq!(snapshot.version, 0);
}

#[test]
fn alias_of_seeded_link_is_taken() {
    let temp = TempRedbStore::new().unwrap();
    temp.save(&[LinkFixture::builder().shortcode("ex1").build().record()])
        .unwrap();

    let clock = TestClock::at_second(1_700_000_000);
    let err = service(&temp, &clock)
        .shorten(
            ShortenRequest::builder()
                .original_url("https://other.example")
                .alias("ex1")
                .build(),
        )
        .unwrap_err();

    assert_eq!(
        err.entry_error(),
        Some(&ShortenerError::AliasTaken(ShortCode::new_unchecked("ex1")))
    );
    assert_eq!(temp.load().unwrap().records.len(), 1);
}

#[test]
fn generated_codes_are_unique_across_batches() {
    let temp = TempRedbStore::new().unwrap();
    let clock = TestClock::at_second(1_700_000_000);
    let service = service(&temp, &clock);

    for round in 0..4 {
        let batch: Vec<ShortenRequest> = (0..5)
            .map(|i| {
                ShortenRequest::builder()
                    .original_url(format!("https://example.com/{round}/{i}"))
                    .build()
            })
            .collect();
        service.submit(&batch).unwrap();
    }

    let codes = LinkRegistry::new(temp.store()).shortcodes().unwrap();
    assert_eq!(codes.len(), 20);
    assert!(codes.iter().all(|c| c.as_str().len() == 6));
}

//! A link created by the batch pipeline, visited until it expires.

use jiff::SignedDuration;
use linkhop_core::{ShortCode, Store};
use linkhop_generator::RandomGenerator;
use linkhop_redirector::{RedirectError, Redirector, RedirectorService, Visit};
use linkhop_shortener::{ShortenRequest, Shortener, ShortenerService};
use linkhop_storage::LinkRegistry;
use linkhop_test_infra::{TempRedbStore, TestClock};

#[test]
fn visit_until_expired() {
    let temp = TempRedbStore::new().unwrap();
    let clock = TestClock::at_second(1_700_000_000);

    let shortener = ShortenerService::new(
        LinkRegistry::new(temp.store()),
        RandomGenerator::default(),
        clock.clone(),
    );
    let redirector = RedirectorService::new(LinkRegistry::new(temp.store()), clock.clone());

    shortener
        .shorten(
            ShortenRequest::builder()
                .original_url("https://example.com")
                .alias("ex1")
                .validity_minutes(1)
                .build(),
        )
        .unwrap();

    let code = ShortCode::new_unchecked("ex1");
    let url = redirector.resolve(&code, &Visit::direct()).unwrap();
    assert_eq!(url, "https://example.com");

    let clicks = |temp: &TempRedbStore| temp.load().unwrap().records[0].clicks();
    assert_eq!(clicks(&temp), 1);

    clock.advance(SignedDuration::from_mins(1));
    let err = redirector.resolve(&code, &Visit::direct()).unwrap_err();
    assert!(matches!(err, RedirectError::Expired { .. }));
    assert_eq!(clicks(&temp), 1);
}

#[test]
fn expired_links_stay_stored() {
    let temp = TempRedbStore::new().unwrap();
    let clock = TestClock::at_second(1_700_000_000);

    let shortener = ShortenerService::new(
        LinkRegistry::new(temp.store()),
        RandomGenerator::default(),
        clock.clone(),
    );
    let record = shortener
        .shorten(
            ShortenRequest::builder()
                .original_url("https://example.com")
                .build(),
        )
        .unwrap();

    clock.advance(SignedDuration::from_hours(2));
    let redirector = RedirectorService::new(LinkRegistry::new(temp.store()), clock.clone());
    assert!(redirector
        .resolve(record.shortcode(), &Visit::direct())
        .is_err());

    assert_eq!(temp.load().unwrap().records, vec![record]);
}

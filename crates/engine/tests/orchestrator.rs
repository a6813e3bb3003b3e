//! End-to-end search flows against an in-memory catalog

mod common;

use common::{element, test_config, Gate, MockCatalog};
use dictsearch_api_client::FullTextHit;
use dictsearch_core::history::RecentSearchHistory;
use dictsearch_core::Element;
use dictsearch_engine::{SearchOrchestrator, SearchState, Superseded};
use dictsearch_search::MatchType;
use std::sync::atomic::Ordering;
use std::sync::Arc;

fn orchestrator(catalog: &Arc<MockCatalog>) -> SearchOrchestrator {
    SearchOrchestrator::new(catalog.clone(), test_config())
}

fn names(state: &SearchState) -> Vec<String> {
    match state {
        SearchState::PartialResult { records } => records.iter().map(|r| r.element.name.clone()).collect(),
        other => panic!("expected PartialResult, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exact_hit_skips_fuzzy_search() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_exact(element("subjectkey", "The NDAR Global Unique Identifier (GUID)").with_type("GUID"))
            .with_default_keyword(&["ndar_subject01"])
            .with_structure("ndar_subject01", vec![element("subjectkey", "GUID")]),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("subjectkey").await.unwrap();

    match &state {
        SearchState::ExactHit { element } => {
            assert_eq!(element.name, "subjectkey");
            assert_eq!(element.data_type, "GUID");
        }
        other => panic!("expected ExactHit, got {other:?}"),
    }
    assert_eq!(engine.state(), state);
    assert_eq!(catalog.keyword_calls.load(Ordering::SeqCst), 0);
    assert_eq!(catalog.total_fetches(), 0);
    assert_eq!(engine.history().entries(), &["subjectkey".to_string()]);
}

#[tokio::test]
async fn test_no_match_names_query() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["s01", "s02"])
            .with_structure("s01", vec![element("interview_age", "Age in months")])
            .with_structure("s02", vec![element("sex", "Sex of subject")]),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("nonexistentzzz").await.unwrap();

    match state {
        SearchState::NoMatch { query, message } => {
            assert_eq!(query, "nonexistentzzz");
            assert!(message.contains("nonexistentzzz"));
        }
        other => panic!("expected NoMatch, got {other:?}"),
    }
    assert_eq!(engine.history().entries(), &["nonexistentzzz".to_string()]);
}

#[tokio::test]
async fn test_single_match_promoted_to_exact_hit() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_exact(element("tap_count", "Count of finger taps").with_value_range("0::500"))
            .with_keyword("taps", &["fmri01", "motor01"])
            .with_structure("fmri01", vec![element("scan_type", "Type of scan")])
            .with_structure(
                "motor01",
                vec![
                    element("tap_count", "Count of finger taps"),
                    element("tapping_rate", "Finger tapping speed"),
                ],
            ),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("taps").await.unwrap();

    match state {
        SearchState::ExactHit { element } => {
            assert_eq!(element.name, "tap_count");
            // Detail came from the exact lookup, not the match record
            assert_eq!(element.value_range, "0::500");
        }
        other => panic!("expected ExactHit, got {other:?}"),
    }
    let calls = catalog.element_calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["taps".to_string(), "tap_count".to_string()]);
}

#[tokio::test]
async fn test_single_match_keeps_record_when_detail_fails() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_keyword("taps", &["motor01"])
            .with_structure("motor01", vec![element("tap_count", "Count of finger taps")]),
    );
    let engine = orchestrator(&catalog);

    match engine.search("taps").await.unwrap() {
        SearchState::ExactHit { element } => assert_eq!(element.description, "Count of finger taps"),
        other => panic!("expected ExactHit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_multiple_matches_ranked() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["s01", "s02"])
            .with_structure(
                "s01",
                vec![
                    element("visit_age", "Unrelated"),
                    element("weight", "Weight at visit age"),
                ],
            )
            .with_structure("s02", vec![element("age", "Age of subject")]),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("Age").await.unwrap();

    assert_eq!(names(&state), vec!["age", "visit_age", "weight"]);
    if let SearchState::PartialResult { records } = &state {
        assert_eq!(records[0].match_type, MatchType::Both);
        assert_eq!(records[0].source_structure, "s02");
        assert!(records.windows(2).all(|w| w[0].relevance_score >= w[1].relevance_score));
    }
}

#[tokio::test]
async fn test_duplicate_element_reported_once() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["s01", "s02"])
            .with_structure("s01", vec![element("handedness", "Dominant hand"), element("hand_size", "x")])
            .with_structure("s02", vec![element("handedness", "Dominant hand used")]),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("hand").await.unwrap();
    let found = names(&state);
    assert_eq!(found.iter().filter(|n| *n == "handedness").count(), 1);
}

#[tokio::test]
async fn test_failed_structure_is_skipped() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["broken01", "s01"])
            .with_failing_structure("broken01")
            .with_structure("s01", vec![element("bmi", "Body mass index"), element("bmi_z", "BMI z-score")]),
    );
    let engine = orchestrator(&catalog);

    let state = engine.search("bmi").await.unwrap();
    assert_eq!(names(&state), vec!["bmi", "bmi_z"]);
}

#[tokio::test]
async fn test_cache_fetches_each_structure_once() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["s01", "s02", "s03"])
            .with_structure("s01", vec![element("age", "Age"), element("age_unit", "Unit")])
            .with_structure("s02", vec![element("height", "Height")])
            .with_structure("s03", vec![element("weight", "Weight")]),
    );
    let engine = orchestrator(&catalog);

    engine.search("age").await.unwrap();
    engine.search("height").await.unwrap();

    for id in ["s01", "s02", "s03"] {
        assert_eq!(catalog.fetches(id), 1, "{id} fetched more than once");
    }
    let stats = engine.cache_stats();
    assert_eq!(stats.entries, 3);
    assert_eq!(stats.hits, 3);

    engine.clear_cache();
    engine.search("age").await.unwrap();
    assert_eq!(catalog.fetches("s01"), 2);
}

#[tokio::test]
async fn test_oversized_structure_not_cached() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["big01"])
            .with_structure(
                "big01",
                vec![element("age", "Age"), element("age_unit", "Unit"), element("sex", "Sex")],
            ),
    );
    let engine = SearchOrchestrator::new(catalog.clone(), test_config().with_max_cacheable_elements(3));

    engine.search("age").await.unwrap();
    engine.search("age").await.unwrap();

    assert_eq!(catalog.fetches("big01"), 2);
    assert_eq!(engine.cache_stats().skipped_oversized, 2);
}

#[tokio::test]
async fn test_supplementary_category_adds_candidates() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_keyword("moca", &[])
            .with_category("Clinical Assessments", &["moca01"])
            .with_structure("moca01", vec![element("moca_total", "MoCA total"), element("moca_visuo", "x")]),
    );
    let config = test_config().with_supplementary_categories(["Clinical Assessments", "Missing Category"]);
    let engine = SearchOrchestrator::new(catalog.clone(), config);

    let state = engine.search("moca").await.unwrap();
    assert_eq!(names(&state), vec!["moca_total", "moca_visuo"]);
}

#[tokio::test]
async fn test_discovery_failure() {
    let catalog = Arc::new(MockCatalog::new().with_failing_keyword_search());
    let engine = orchestrator(&catalog);

    match engine.search("anything").await.unwrap() {
        SearchState::Failed { reason } => assert!(reason.starts_with("Discovery error"), "{reason}"),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_discovery_fails() {
    let catalog = Arc::new(MockCatalog::new());
    let engine = orchestrator(&catalog);

    match engine.search("anything").await.unwrap() {
        SearchState::Failed { reason } => assert!(reason.contains("no data structures")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exact_lookup_transport_error_fails() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_exact_transport_failure("age")
            .with_default_keyword(&["s01"]),
    );
    let engine = orchestrator(&catalog);

    match engine.search("age").await.unwrap() {
        SearchState::Failed { reason } => assert!(reason.starts_with("Lookup error")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(catalog.keyword_calls.load(Ordering::SeqCst), 0);
    assert!(engine.history().is_empty());
}

#[tokio::test]
async fn test_blank_query_fails_without_calls() {
    let catalog = Arc::new(MockCatalog::new());
    let engine = orchestrator(&catalog);

    assert_eq!(
        engine.search("   ").await.unwrap(),
        SearchState::Failed {
            reason: "empty query".into()
        }
    );
    assert!(catalog.element_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_newer_search_supersedes_older() {
    let gate = Arc::new(Gate::default());
    let catalog = Arc::new(
        MockCatalog::new()
            .with_keyword("alpha", &["slow01"])
            .with_keyword("beta", &["fast01"])
            .with_gate("slow01", gate.clone())
            .with_structure("slow01", vec![element("alpha_x", "Alpha")])
            .with_structure(
                "fast01",
                vec![element("beta_one", "First beta"), element("beta_two", "Second beta")],
            ),
    );
    let engine = Arc::new(orchestrator(&catalog));

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.search("alpha").await })
    };
    gate.entered.notified().await;

    let second = engine.search("beta").await.unwrap();
    assert_eq!(names(&second), vec!["beta_one", "beta_two"]);

    gate.release.notify_one();
    assert_eq!(first.await.unwrap(), Err(Superseded));

    assert_eq!(engine.state(), second);
    assert_eq!(engine.history().entries(), &["beta".to_string()]);
}

#[tokio::test]
async fn test_overlapping_searches_share_structure_fetch() {
    let gate = Arc::new(Gate::default());
    let catalog = Arc::new(
        MockCatalog::new()
            .with_default_keyword(&["shared01"])
            .with_gate("shared01", gate.clone())
            .with_structure(
                "shared01",
                vec![element("tap_count", "Number of taps"), element("tap_side", "Side tapped")],
            ),
    );
    let engine = Arc::new(orchestrator(&catalog));

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.search("tap").await })
    };
    gate.entered.notified().await;

    let second = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.search("taps").await })
    };
    // Wait until the newer search is parked on the same structure
    while engine.cache_stats().misses < 2 {
        tokio::task::yield_now().await;
    }
    gate.release.notify_one();

    assert_eq!(first.await.unwrap(), Err(Superseded));
    let second = second.await.unwrap().unwrap();
    assert_eq!(names(&second), vec!["tap_count", "tap_side"]);
    assert_eq!(catalog.fetches("shared01"), 1);
}

#[tokio::test]
async fn test_discovery_runs_in_progress_state() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_keyword("age", &["s01"])
            .with_structure("s01", vec![element("age", "Age"), element("age_unit", "Unit of age")]),
    );
    let engine = orchestrator(&catalog);
    catalog.observe(engine.subscribe());

    engine.search("age").await.unwrap();

    assert_eq!(
        *catalog.discovery_states.lock().unwrap(),
        vec![SearchState::PartialInProgress {
            batch_index: 0,
            total_batches: 0,
            matches_so_far: 0,
        }]
    );
}

#[tokio::test]
async fn test_subscriber_sees_final_state() {
    let catalog = Arc::new(
        MockCatalog::new().with_exact(element("subjectkey", "GUID")),
    );
    let engine = orchestrator(&catalog);
    let mut rx = engine.subscribe();
    assert_eq!(*rx.borrow_and_update(), SearchState::Idle);

    engine.search("subjectkey").await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert!(matches!(*rx.borrow_and_update(), SearchState::ExactHit { .. }));
}

#[tokio::test]
async fn test_select_result_fetches_detail() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_exact(element("age", "Age in months").with_notes("Rounded"))
            .with_default_keyword(&["s01"])
            .with_structure("s01", vec![element("age", "Age"), element("age_unit", "Unit")]),
    );
    let engine = orchestrator(&catalog);

    // "ages" misses the exact lookup and matches both elements
    let state = engine.search("ages").await.unwrap();
    let SearchState::PartialResult { records } = state else {
        panic!("expected PartialResult");
    };

    match engine.select_result(&records[0]).await.unwrap() {
        SearchState::ExactHit { element } => assert_eq!(element.notes, "Rounded"),
        other => panic!("expected ExactHit, got {other:?}"),
    }

    // No exact entry for age_unit: the record itself is shown
    let unit = records.iter().find(|r| r.element.name == "age_unit").unwrap();
    match engine.select_result(unit).await.unwrap() {
        SearchState::ExactHit { element } => assert_eq!(element, unit.element),
        other => panic!("expected ExactHit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_history_bounded_and_seeded() {
    let catalog = Arc::new(
        MockCatalog::new()
            .with_exact(element("a", "x"))
            .with_exact(element("b", "x"))
            .with_exact(element("c", "x")),
    );
    let mut config = test_config();
    config.history_capacity = 2;
    let seeded = RecentSearchHistory::from_entries(2, ["old"]);
    let engine = SearchOrchestrator::new(catalog.clone(), config).with_history(seeded);

    engine.search("a").await.unwrap();
    engine.search("b").await.unwrap();
    engine.search("a").await.unwrap();

    assert_eq!(engine.history().entries(), &["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_full_text_reranked() {
    let catalog = Arc::new(MockCatalog::new().with_full_text(vec![
        FullTextHit {
            element: Element::named("finger_tap_rate"),
            score: 12.0,
        },
        FullTextHit {
            element: Element::named("tap"),
            score: 3.0,
        },
        FullTextHit {
            element: Element::named("unrelated"),
            score: 2.0,
        },
    ]));
    let engine = orchestrator(&catalog);

    let ranked = engine.full_text("TAP", Some(2)).await.unwrap();
    let names: Vec<&str> = ranked.iter().map(|h| h.element.name.as_str()).collect();
    assert_eq!(names, vec!["tap", "finger_tap_rate"]);

    assert!(engine.full_text("  ", None).await.unwrap().is_empty());
    assert_eq!(engine.state(), SearchState::Idle);
}

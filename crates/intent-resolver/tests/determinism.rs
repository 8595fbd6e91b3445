//! Cross-crate determinism check: the same `(input, context)` against the
//! same corpus/memory state returns bit-identical results regardless of how
//! many times `resolve` is called or what else has happened in between.

use std::collections::BTreeSet;

use intent_corpus::Corpus;
use intent_crm::CrmConfig;
use intent_embed::{Embedder, EmbedderConfig};
use intent_memory::FastMemory;
use intent_normalize::SlangMap;
use intent_resolver::{Resolver, ResolverConfig, SeededRequestIds};
use intent_types::{ContextSnapshot, Intent};

fn corpus(embedder: &Embedder) -> Corpus {
    let intents = vec![
        Intent {
            id: "transfer_to_account".into(),
            pure_text: "transfer money between accounts".into(),
            examples: vec!["transfer 500 to john".into(), "send money to jane".into()],
            required_location: None,
            helpful_location: Some("bank_branch".into()),
            required_purpose: Some("finance".into()),
            required_situation: None,
            associated_intents: BTreeSet::new(),
            forbidden_when_conflicts: BTreeSet::new(),
            preferred_linguistic_indicator: None,
            valid_time_window: None,
            required_user_profile: None,
            preferred_user_profiles: BTreeSet::new(),
            preferred_prosodic_feature: None,
        },
        Intent {
            id: "navigate_home".into(),
            pure_text: "navigate to home address".into(),
            examples: vec!["take me home".into(), "navigate home".into()],
            required_location: None,
            helpful_location: Some("vehicle_interior".into()),
            required_purpose: Some("navigate".into()),
            required_situation: None,
            associated_intents: BTreeSet::new(),
            forbidden_when_conflicts: BTreeSet::new(),
            preferred_linguistic_indicator: None,
            valid_time_window: None,
            required_user_profile: None,
            preferred_user_profiles: BTreeSet::new(),
            preferred_prosodic_feature: None,
        },
    ];
    Corpus::from_intents(intents, embedder).unwrap()
}

fn build_resolver<'a>(
    corpus: &'a Corpus,
    memory: &'a FastMemory,
    embedder: &'a Embedder,
    slang: &'a SlangMap,
    request_ids: &'a SeededRequestIds,
) -> Resolver<'a> {
    Resolver {
        corpus,
        memory,
        embedder,
        slang,
        crm_config: CrmConfig::default(),
        resolver_config: ResolverConfig::default(),
        request_ids,
    }
}

#[test]
fn repeated_resolve_calls_are_identical() {
    let embedder = Embedder::new(EmbedderConfig::default());
    let corpus = corpus(&embedder);
    let memory = FastMemory::in_memory();
    let slang = SlangMap::empty();
    let request_ids = SeededRequestIds::default();
    let resolver = build_resolver(&corpus, &memory, &embedder, &slang, &request_ids);

    let context = ContextSnapshot {
        goal_alignment: Some("finance".into()),
        location_context: Some("bank_branch".into()),
        ..Default::default()
    };

    let first = resolver.resolve("Transfer 500 to John", context.clone()).unwrap();
    let second = resolver.resolve("Transfer 500 to John", context).unwrap();

    assert_eq!(first.verified.intent_id, second.verified.intent_id);
    assert_eq!(first.verified.confidence, second.verified.confidence);
    assert_eq!(first.verified.active_factors, second.verified.active_factors);
    assert_eq!(first.verified.fallback_used, second.verified.fallback_used);
}

#[test]
fn determinism_is_unaffected_by_request_id() {
    // Two independent resolvers (hence two independent request-id counters)
    // must still agree on every field except request_id.
    let embedder = Embedder::new(EmbedderConfig::default());
    let corpus = corpus(&embedder);
    let memory_a = FastMemory::in_memory();
    let memory_b = FastMemory::in_memory();
    let slang = SlangMap::empty();
    let ids_a = SeededRequestIds::default();
    let ids_b = SeededRequestIds::default();

    let resolver_a = build_resolver(&corpus, &memory_a, &embedder, &slang, &ids_a);
    let resolver_b = build_resolver(&corpus, &memory_b, &embedder, &slang, &ids_b);

    let context = ContextSnapshot {
        goal_alignment: Some("navigate".into()),
        ..Default::default()
    };

    let a = resolver_a.resolve("take me home", context.clone()).unwrap();
    let b = resolver_b.resolve("take me home", context).unwrap();

    assert_eq!(a.verified.intent_id, b.verified.intent_id);
    assert_eq!(a.verified.confidence, b.verified.confidence);
    assert_eq!(a.verified.stage1_candidates, b.verified.stage1_candidates);
}

#[test]
fn determinism_survives_an_unrelated_memory_insert() {
    // Stage 2 of an in-flight resolution observes the Stage-1 snapshot; an
    // insert for a *different* intent must not perturb this resolution.
    let embedder = Embedder::new(EmbedderConfig::default());
    let corpus = corpus(&embedder);
    let memory = FastMemory::in_memory();
    let slang = SlangMap::empty();
    let request_ids = SeededRequestIds::default();
    let resolver = build_resolver(&corpus, &memory, &embedder, &slang, &request_ids);

    let context = ContextSnapshot {
        goal_alignment: Some("finance".into()),
        ..Default::default()
    };

    let before = resolver.resolve("transfer 500 to john", context.clone()).unwrap();

    memory
        .insert(intent_types::GoldenRecord {
            record_id: uuid::Uuid::from_u128(7),
            original_input: "take me home".into(),
            embedding: embedder.embed("take me home"),
            resolved_intent_id: "navigate_home".into(),
            confidence_at_time: 0.8,
            context_fingerprint: "loc=_|purpose=_|user=_".into(),
            created_at: intent_memory::now(),
        })
        .unwrap();

    let after = resolver.resolve("transfer 500 to john", context).unwrap();
    assert_eq!(before.verified.intent_id, after.verified.intent_id);
    assert_eq!(before.verified.confidence, after.verified.confidence);
}

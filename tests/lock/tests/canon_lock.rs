//! Locks on the canonical surfaces: hash domains, key rendering, state
//! fingerprints and canonical JSON of exported graphs.

use blocks_kernel::canon::hash::{
    canonical_hash, ContentHash, DOMAIN_GRAPH_EXPORT, DOMAIN_STATE_KEY,
};
use blocks_kernel::canon::json::canonical_json_bytes;
use blocks_kernel::canon::key::{state_fingerprint, CanonicalKey};
use blocks_kernel::domain::state::BlocksState;
use blocks_search::{bfs, SearchPolicy};
use lock_tests::{context, scenario_a, scenario_b};

#[test]
fn hash_domains_are_distinct_and_null_terminated() {
    let domains = [DOMAIN_STATE_KEY, DOMAIN_GRAPH_EXPORT];
    for d in domains {
        assert!(d.starts_with(b"BLOCKS::"));
        assert_eq!(d.last(), Some(&0));
        assert_eq!(d.iter().filter(|&&b| b == 0).count(), 1);
    }
    assert_ne!(domains[0], domains[1]);
    assert_ne!(
        canonical_hash(DOMAIN_STATE_KEY, b"x"),
        canonical_hash(DOMAIN_GRAPH_EXPORT, b"x")
    );
}

#[test]
fn canonical_key_rendering_is_locked() {
    let problem = scenario_a();
    assert_eq!(CanonicalKey::of(problem.start()).to_string(), "0:-:0|1:0:0|2:1:0");
    let b = scenario_b();
    assert_eq!(CanonicalKey::of(b.goal()).to_string(), "0:-:0|3:4:0|4:0:1");
}

#[test]
fn fingerprint_ignores_record_order_and_names_the_algorithm() {
    let state = scenario_b().start().clone();
    let mut records = state.to_records();
    records.reverse();
    let shuffled = BlocksState::from_records(&records).unwrap();
    let fp = state_fingerprint(&state);
    assert_eq!(fp, state_fingerprint(&shuffled));
    assert_eq!(fp.algorithm(), "sha256");
    assert_eq!(ContentHash::parse(fp.as_str()), Some(fp.clone()));
    assert_ne!(fp, state_fingerprint(scenario_b().goal()));
}

#[test]
fn exported_graph_bytes_are_canonical() {
    let out = bfs(&context(scenario_b(), SearchPolicy::with_depth(3))).unwrap();
    let bytes = out.recorder.export_graph(true).to_canonical_bytes().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(canonical_json_bytes(&value).unwrap(), bytes);
    assert!(!bytes.contains(&b'\n'));
}

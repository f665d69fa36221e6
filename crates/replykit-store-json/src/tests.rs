//! Integration tests for `JsonStore` against a temporary data directory.

use replykit_core::{
  id::{ResponseId, TriggerId},
  mapping::NewMapping,
  render::Context,
  resolver::Resolver,
  response::{NewResponse, ResponseKind},
  store::RuleStore,
  trigger::{MatchStrategy, NewTrigger},
};
use tempfile::TempDir;

use crate::JsonStore;

async fn store() -> (TempDir, JsonStore) {
  let dir = tempfile::tempdir().expect("tempdir");
  let store = JsonStore::open(dir.path()).await.expect("open store");
  (dir, store)
}

// ─── Creation & ids ──────────────────────────────────────────────────────────

#[tokio::test]
async fn trigger_ids_are_sequential() {
  let (_dir, s) = store().await;

  let first = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();
  let second = s
    .add_trigger(NewTrigger::new("bye", MatchStrategy::Exact))
    .await
    .unwrap();

  assert_eq!(first.id.as_str(), "TRG_001");
  assert_eq!(second.id.as_str(), "TRG_002");
}

#[tokio::test]
async fn response_defaults_applied() {
  let (_dir, s) = store().await;

  let response = s.add_response(NewResponse::new("hi")).await.unwrap();

  assert_eq!(response.id.as_str(), "RES_001");
  assert_eq!(response.kind, ResponseKind::PlainText);
  assert!(response.attachments.is_empty());
  assert!(response.follow_up_id.is_none());
  assert!(response.active);
}

#[tokio::test]
async fn add_mapping_links_existing_entries() {
  let (_dir, s) = store().await;

  let trigger = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();
  let response = s.add_response(NewResponse::new("hi")).await.unwrap();

  let mapping = s
    .add_mapping(NewMapping::new(trigger.id.clone(), response.id.clone()))
    .await
    .unwrap();

  assert_eq!(mapping.id.as_str(), "MAP_001");
  assert_eq!(mapping.trigger_id, trigger.id);
  assert_eq!(mapping.response_id, response.id);
  assert_eq!(mapping.sequence_order, 1);
}

#[tokio::test]
async fn add_mapping_unknown_trigger_errors_without_mutation() {
  let (_dir, s) = store().await;

  let response = s.add_response(NewResponse::new("hi")).await.unwrap();

  let err = s
    .add_mapping(NewMapping::new(
      TriggerId::new("TRG_404"),
      response.id.clone(),
    ))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::TriggerNotFound(_)));

  // The store was not mutated: a later valid mapping still gets MAP_001.
  let trigger = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();
  let mapping = s
    .add_mapping(NewMapping::new(trigger.id, response.id))
    .await
    .unwrap();
  assert_eq!(mapping.id.as_str(), "MAP_001");
}

#[tokio::test]
async fn add_mapping_unknown_response_errors() {
  let (_dir, s) = store().await;

  let trigger = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();

  let err = s
    .add_mapping(NewMapping::new(trigger.id, ResponseId::new("RES_404")))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::ResponseNotFound(_)));
}

// ─── Load behaviour ──────────────────────────────────────────────────────────

#[tokio::test]
async fn open_creates_missing_files_empty() {
  let dir = tempfile::tempdir().unwrap();
  let s = JsonStore::open(dir.path()).await.unwrap();

  assert!(s.list_triggers().await.unwrap().is_empty());
  assert_eq!(
    std::fs::read_to_string(dir.path().join("triggers.json")).unwrap(),
    "{}"
  );
  assert_eq!(
    std::fs::read_to_string(dir.path().join("mappings.json")).unwrap(),
    "[]"
  );
}

#[tokio::test]
async fn malformed_file_is_treated_as_empty() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("triggers.json"), "not json at all {{{")
    .unwrap();

  let s = JsonStore::open(dir.path()).await.unwrap();
  assert!(s.list_triggers().await.unwrap().is_empty());

  // The store is usable afterwards and ids restart from 1.
  let trigger = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();
  assert_eq!(trigger.id.as_str(), "TRG_001");
}

#[tokio::test]
async fn reload_round_trips_all_collections() {
  let dir = tempfile::tempdir().unwrap();

  let trigger;
  let response;
  let mapping;
  {
    let s = JsonStore::open(dir.path()).await.unwrap();
    trigger = s
      .add_trigger(
        NewTrigger::new("how much is (.+)", MatchStrategy::Regex)
          .with_intent("pricing_query")
          .with_priority(5),
      )
      .await
      .unwrap();
    response = s
      .add_response(
        NewResponse::new("The price for {regex_group_1} is $5")
          .with_kind(ResponseKind::Markdown),
      )
      .await
      .unwrap();
    mapping = s
      .add_mapping(
        NewMapping::new(trigger.id.clone(), response.id.clone())
          .with_sequence_order(3),
      )
      .await
      .unwrap();
  }

  let reopened = JsonStore::open(dir.path()).await.unwrap();

  let triggers = reopened.list_triggers().await.unwrap();
  assert_eq!(triggers.len(), 1);
  assert_eq!(triggers[0].id, trigger.id);
  assert_eq!(triggers[0].phrase, trigger.phrase);
  assert_eq!(triggers[0].match_strategy, MatchStrategy::Regex);
  assert_eq!(triggers[0].intent.as_deref(), Some("pricing_query"));
  assert_eq!(triggers[0].priority, 5);
  assert_eq!(triggers[0].created_at, trigger.created_at);

  let got = reopened.get_response(&response.id).await.unwrap().unwrap();
  assert_eq!(got.text, response.text);
  assert_eq!(got.kind, ResponseKind::Markdown);

  let mappings = reopened.list_mappings(&trigger.id).await.unwrap();
  assert_eq!(mappings.len(), 1);
  assert_eq!(mappings[0].id, mapping.id);
  assert_eq!(mappings[0].sequence_order, 3);
}

#[tokio::test]
async fn id_sequence_resumes_after_reload() {
  let dir = tempfile::tempdir().unwrap();

  {
    let s = JsonStore::open(dir.path()).await.unwrap();
    s.add_trigger(NewTrigger::new("one", MatchStrategy::Exact))
      .await
      .unwrap();
    s.add_trigger(NewTrigger::new("two", MatchStrategy::Exact))
      .await
      .unwrap();
  }

  let reopened = JsonStore::open(dir.path()).await.unwrap();
  let third = reopened
    .add_trigger(NewTrigger::new("three", MatchStrategy::Exact))
    .await
    .unwrap();
  assert_eq!(third.id.as_str(), "TRG_003");
}

// ─── End-to-end resolution ───────────────────────────────────────────────────

#[tokio::test]
async fn hello_scenario_renders_customer_name() {
  let (_dir, s) = store().await;

  let trigger = s
    .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
    .await
    .unwrap();
  let response = s
    .add_response(NewResponse::new("Hello there {crm_name}!"))
    .await
    .unwrap();
  s.add_mapping(NewMapping::new(trigger.id, response.id))
    .await
    .unwrap();

  let resolver = Resolver::new(std::sync::Arc::new(s));
  let context: Context =
    [("name".to_string(), "Test User".to_string())].into();

  let reply = resolver
    .resolve("hello", Some(&context))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(reply.text, "Hello there Test User!");
  assert_eq!(reply.kind, ResponseKind::PlainText);
}

#[tokio::test]
async fn empty_store_resolves_to_no_reply() {
  let (_dir, s) = store().await;
  let resolver = Resolver::new(std::sync::Arc::new(s));

  assert!(resolver.resolve("anything", None).await.unwrap().is_none());
}

#[tokio::test]
async fn dangling_response_reference_degrades_to_no_reply() {
  let dir = tempfile::tempdir().unwrap();

  {
    let s = JsonStore::open(dir.path()).await.unwrap();
    let trigger = s
      .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
      .await
      .unwrap();
    let response = s.add_response(NewResponse::new("hi")).await.unwrap();
    s.add_mapping(NewMapping::new(trigger.id, response.id))
      .await
      .unwrap();
  }

  // Simulate an out-of-band deletion by emptying the responses file.
  std::fs::write(dir.path().join("responses.json"), "{}").unwrap();

  let s = JsonStore::open(dir.path()).await.unwrap();
  let resolver = Resolver::new(std::sync::Arc::new(s));
  assert!(resolver.resolve("hello", None).await.unwrap().is_none());
}

#[tokio::test]
async fn insertion_order_survives_reload_for_tie_breaking() {
  let dir = tempfile::tempdir().unwrap();

  {
    let s = JsonStore::open(dir.path()).await.unwrap();
    let first = s
      .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
      .await
      .unwrap();
    let second = s
      .add_trigger(NewTrigger::new("hello", MatchStrategy::Exact))
      .await
      .unwrap();
    let a = s.add_response(NewResponse::new("first wins")).await.unwrap();
    let b = s.add_response(NewResponse::new("second wins")).await.unwrap();
    s.add_mapping(NewMapping::new(second.id, b.id)).await.unwrap();
    s.add_mapping(NewMapping::new(first.id, a.id)).await.unwrap();
  }

  let s = JsonStore::open(dir.path()).await.unwrap();
  let resolver = Resolver::new(std::sync::Arc::new(s));
  let reply = resolver.resolve("hello", None).await.unwrap().unwrap();
  assert_eq!(reply.text, "first wins");
}

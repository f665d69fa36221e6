//! [`JsonStore`] — the JSON-file implementation of [`RuleStore`].

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Utc;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use replykit_core::{
  id::{MappingId, ResponseId, TriggerId},
  mapping::{Mapping, NewMapping},
  response::{NewResponse, Response},
  store::RuleStore,
  trigger::{NewTrigger, Trigger},
};

use crate::{Error, Result};

const TRIGGERS_FILE: &str = "triggers.json";
const RESPONSES_FILE: &str = "responses.json";
const MAPPINGS_FILE: &str = "mappings.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A rule store backed by three JSON files in a single directory.
///
/// The collections are loaded fully into memory at open and each file is
/// rewritten after every mutation. Cloning is cheap — the inner state is
/// reference-counted, and a `tokio` reader-writer lock keeps concurrent
/// callers from observing a torn state.
#[derive(Clone)]
pub struct JsonStore {
  dir:   PathBuf,
  inner: Arc<RwLock<Inner>>,
}

struct Inner {
  triggers:      BTreeMap<TriggerId, Trigger>,
  responses:     BTreeMap<ResponseId, Response>,
  mappings:      Vec<Mapping>,
  next_trigger:  u64,
  next_response: u64,
  next_mapping:  u64,
}

impl JsonStore {
  /// Open (or create) a store rooted at `dir`.
  ///
  /// Missing backing files are created holding the empty collection;
  /// malformed files are logged and treated as empty rather than failing
  /// the open.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    tokio::fs::create_dir_all(&dir).await?;

    let triggers: BTreeMap<TriggerId, Trigger> =
      load_or_init(&dir.join(TRIGGERS_FILE), "{}").await?;
    let responses: BTreeMap<ResponseId, Response> =
      load_or_init(&dir.join(RESPONSES_FILE), "{}").await?;
    let mappings: Vec<Mapping> =
      load_or_init(&dir.join(MAPPINGS_FILE), "[]").await?;

    // Monotonic counters resume from the highest persisted ordinal, not the
    // collection length.
    let next_trigger = next_ordinal(triggers.keys().map(TriggerId::ordinal));
    let next_response = next_ordinal(responses.keys().map(ResponseId::ordinal));
    let next_mapping =
      next_ordinal(mappings.iter().map(|m| m.id.ordinal()));

    Ok(Self {
      dir,
      inner: Arc::new(RwLock::new(Inner {
        triggers,
        responses,
        mappings,
        next_trigger,
        next_response,
        next_mapping,
      })),
    })
  }

  async fn save_triggers(&self, inner: &Inner) -> Result<()> {
    let json = serde_json::to_vec_pretty(&inner.triggers)?;
    tokio::fs::write(self.dir.join(TRIGGERS_FILE), json).await?;
    Ok(())
  }

  async fn save_responses(&self, inner: &Inner) -> Result<()> {
    let json = serde_json::to_vec_pretty(&inner.responses)?;
    tokio::fs::write(self.dir.join(RESPONSES_FILE), json).await?;
    Ok(())
  }

  async fn save_mappings(&self, inner: &Inner) -> Result<()> {
    let json = serde_json::to_vec_pretty(&inner.mappings)?;
    tokio::fs::write(self.dir.join(MAPPINGS_FILE), json).await?;
    Ok(())
  }
}

// ─── Loading helpers ─────────────────────────────────────────────────────────

/// Read and parse a backing file. A missing file is created holding
/// `empty_doc`; a parse failure is logged and yields the empty collection.
async fn load_or_init<T>(path: &Path, empty_doc: &'static str) -> Result<T>
where
  T: DeserializeOwned + Default,
{
  match tokio::fs::read(path).await {
    Ok(bytes) => match serde_json::from_slice(&bytes) {
      Ok(value) => Ok(value),
      Err(error) => {
        tracing::warn!(
          path = %path.display(),
          %error,
          "malformed store file, starting empty"
        );
        Ok(T::default())
      }
    },
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      tokio::fs::write(path, empty_doc).await?;
      Ok(T::default())
    }
    Err(e) => Err(e.into()),
  }
}

/// Highest parseable ordinal plus one; 1 for an empty collection.
fn next_ordinal(ordinals: impl Iterator<Item = Option<u64>>) -> u64 {
  ordinals.flatten().max().unwrap_or(0) + 1
}

// ─── RuleStore impl ──────────────────────────────────────────────────────────

impl RuleStore for JsonStore {
  type Error = Error;

  async fn add_trigger(&self, input: NewTrigger) -> Result<Trigger> {
    let mut inner = self.inner.write().await;
    let now = Utc::now();
    let trigger = Trigger {
      id:             TriggerId::from_ordinal(inner.next_trigger),
      phrase:         input.phrase,
      match_strategy: input.match_strategy,
      intent:         input.intent,
      priority:       input.priority,
      active:         input.active,
      created_at:     now,
      updated_at:     now,
    };
    inner.triggers.insert(trigger.id.clone(), trigger.clone());
    inner.next_trigger += 1;
    self.save_triggers(&inner).await?;
    Ok(trigger)
  }

  async fn add_response(&self, input: NewResponse) -> Result<Response> {
    let mut inner = self.inner.write().await;
    let now = Utc::now();
    let response = Response {
      id:           ResponseId::from_ordinal(inner.next_response),
      text:         input.text,
      kind:         input.kind,
      attachments:  input.attachments,
      follow_up_id: input.follow_up_id,
      active:       input.active,
      created_at:   now,
      updated_at:   now,
    };
    inner.responses.insert(response.id.clone(), response.clone());
    inner.next_response += 1;
    self.save_responses(&inner).await?;
    Ok(response)
  }

  async fn add_mapping(&self, input: NewMapping) -> Result<Mapping> {
    let mut inner = self.inner.write().await;

    // Both references must exist at creation time; on failure nothing is
    // appended and nothing is written.
    if !inner.triggers.contains_key(&input.trigger_id) {
      return Err(Error::TriggerNotFound(input.trigger_id));
    }
    if !inner.responses.contains_key(&input.response_id) {
      return Err(Error::ResponseNotFound(input.response_id));
    }

    let now = Utc::now();
    let mapping = Mapping {
      id:             MappingId::from_ordinal(inner.next_mapping),
      trigger_id:     input.trigger_id,
      response_id:    input.response_id,
      conditions:     input.conditions,
      sequence_order: input.sequence_order,
      active:         input.active,
      created_at:     now,
      updated_at:     now,
    };
    inner.mappings.push(mapping.clone());
    inner.next_mapping += 1;
    self.save_mappings(&inner).await?;
    Ok(mapping)
  }

  async fn get_trigger(&self, id: &TriggerId) -> Result<Option<Trigger>> {
    let inner = self.inner.read().await;
    Ok(inner.triggers.get(id).cloned())
  }

  async fn get_response(&self, id: &ResponseId) -> Result<Option<Response>> {
    let inner = self.inner.read().await;
    Ok(inner.responses.get(id).cloned())
  }

  async fn list_triggers(&self) -> Result<Vec<Trigger>> {
    let inner = self.inner.read().await;
    let mut triggers: Vec<Trigger> = inner.triggers.values().cloned().collect();
    // Insertion order is id-ordinal order; ids that don't parse (hand-edited
    // files) sort after the canonical ones, keyed by the raw string.
    triggers
      .sort_by_key(|t| (t.id.ordinal().unwrap_or(u64::MAX), t.id.clone()));
    Ok(triggers)
  }

  async fn list_responses(&self) -> Result<Vec<Response>> {
    let inner = self.inner.read().await;
    let mut responses: Vec<Response> =
      inner.responses.values().cloned().collect();
    responses
      .sort_by_key(|r| (r.id.ordinal().unwrap_or(u64::MAX), r.id.clone()));
    Ok(responses)
  }

  async fn list_mappings(&self, trigger_id: &TriggerId) -> Result<Vec<Mapping>> {
    let inner = self.inner.read().await;
    Ok(
      inner
        .mappings
        .iter()
        .filter(|m| &m.trigger_id == trigger_id)
        .cloned()
        .collect(),
    )
  }
}

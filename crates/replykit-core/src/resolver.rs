//! [`Resolver`] — resolves an inbound message to at most one rendered reply.
//!
//! The resolver owns no state of its own: every call reads the store afresh,
//! so rule mutations are visible immediately and two calls with identical
//! store contents, message, and context produce identical output.

use std::sync::Arc;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use crate::{
  render::{Context, render},
  response::{Attachment, ResponseKind},
  store::RuleStore,
  trigger::{MatchStrategy, Trigger},
};

// ─── Output ──────────────────────────────────────────────────────────────────

/// The fully-rendered outcome of a successful resolution: the text to send,
/// how the transport should interpret it, and any attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReply {
  pub text:        String,
  pub kind:        ResponseKind,
  pub attachments: Vec<Attachment>,
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Stateless reply resolution over any [`RuleStore`].
///
/// Cloning is cheap — the store handle is reference-counted.
pub struct Resolver<S> {
  store: Arc<S>,
}

impl<S> Clone for Resolver<S> {
  fn clone(&self) -> Self { Self { store: self.store.clone() } }
}

impl<S: RuleStore> Resolver<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Resolve `message_text` to a rendered reply, or `None` if no active
  /// trigger/mapping/response chain produces one.
  ///
  /// Only store errors propagate. A trigger whose regex fails to compile is
  /// skipped; a mapping whose response is missing or inactive degrades to
  /// `None`.
  pub async fn resolve(
    &self,
    message_text: &str,
    context: Option<&Context>,
  ) -> Result<Option<RenderedReply>, S::Error> {
    let normalized = normalize(message_text);

    // Active triggers, ascending priority. The sort is stable, so equal
    // priorities keep the store's insertion order.
    let mut triggers = self.store.list_triggers().await?;
    triggers.retain(|t| t.active);
    triggers.sort_by_key(|t| t.priority);

    // First-match-wins scan.
    let Some((trigger, groups)) = triggers.iter().find_map(|t| {
      match_trigger(t, &normalized).map(|groups| (t, groups))
    }) else {
      return Ok(None);
    };

    // Active mappings whose condition passes, ascending sequence order
    // (stable again — ties keep insertion order). Conditions today are all
    // `Always`, so this filters nothing in practice.
    let mut mappings = self.store.list_mappings(&trigger.id).await?;
    mappings.retain(|m| m.active && m.conditions.evaluate(context));
    mappings.sort_by_key(|m| m.sequence_order);

    let Some(mapping) = mappings.first() else {
      return Ok(None);
    };

    // A dangling or inactive response yields no reply rather than an error.
    let Some(response) = self.store.get_response(&mapping.response_id).await?
    else {
      return Ok(None);
    };
    if !response.active {
      return Ok(None);
    }

    Ok(Some(RenderedReply {
      text:        render(&response.text, context, &groups),
      kind:        response.kind,
      attachments: response.attachments.clone(),
    }))
  }
}

// ─── Matching ────────────────────────────────────────────────────────────────

/// Normalised form used for matching: trimmed and lowercased.
fn normalize(text: &str) -> String { text.trim().to_lowercase() }

/// Test `trigger` against the normalised message. Returns the regex capture
/// groups on a `Regex` match (empty for the other strategies), or `None` if
/// the trigger does not match.
fn match_trigger(
  trigger: &Trigger,
  normalized: &str,
) -> Option<Vec<Option<String>>> {
  match trigger.match_strategy {
    MatchStrategy::Exact => {
      (normalized == normalize(&trigger.phrase)).then(Vec::new)
    }
    MatchStrategy::Contains => normalized
      .contains(&normalize(&trigger.phrase))
      .then(Vec::new),
    MatchStrategy::Regex => {
      let re = match RegexBuilder::new(&trigger.phrase)
        .case_insensitive(true)
        .build()
      {
        Ok(re) => re,
        Err(error) => {
          tracing::warn!(trigger = %trigger.id, %error, "invalid regex pattern, skipping trigger");
          return None;
        }
      };
      re.captures(normalized).map(|caps| {
        caps
          .iter()
          .skip(1) // group 0 is the whole match
          .map(|m| m.map(|m| m.as_str().to_owned()))
          .collect()
      })
    }
  }
}

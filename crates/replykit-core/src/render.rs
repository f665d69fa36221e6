//! Placeholder substitution for response templates.
//!
//! Two token families are recognised:
//!
//! - `{crm_<field>}` — replaced with the matching field from the external
//!   context (e.g. a customer record flattened to string pairs).
//! - `{regex_group_<n>}` — replaced with the nth capture group (1-indexed)
//!   of a `Regex`-strategy match.
//!
//! Tokens with no corresponding value are left literal; rendering never
//! fails.

use std::collections::BTreeMap;

/// External context for rendering — a flat string-keyed record, e.g. a
/// customer profile. `BTreeMap` keeps substitution order deterministic.
pub type Context = BTreeMap<String, String>;

/// Substitute `{crm_<field>}` and `{regex_group_<n>}` tokens in `template`.
///
/// `groups` holds the capture groups of a regex match, in order; a `None`
/// entry is a group that did not participate in the match and leaves its
/// token literal.
pub fn render(
  template: &str,
  context: Option<&Context>,
  groups: &[Option<String>],
) -> String {
  let mut out = template.to_owned();

  if let Some(ctx) = context {
    for (field, value) in ctx {
      out = out.replace(&format!("{{crm_{field}}}"), value);
    }
  }

  for (i, group) in groups.iter().enumerate() {
    if let Some(text) = group {
      out = out.replace(&format!("{{regex_group_{}}}", i + 1), text);
    }
  }

  out
}

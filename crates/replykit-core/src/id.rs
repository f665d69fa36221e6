//! Typed entity identifiers.
//!
//! Ids are human-readable sequential strings (`TRG_001`, `RES_014`, …): a
//! fixed prefix plus a zero-padded ordinal. The newtype keeps the display
//! format while letting stores assign ordinals from a monotonic counter
//! rather than trusting the string shape. Ordinals wider than three digits
//! are legal; padding is a formatting floor, not a ceiling.

/// Define an id newtype with a fixed prefix.
#[macro_export]
macro_rules! entity_id {
  ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
    $(#[$doc])*
    #[derive(
      Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
      serde::Serialize, serde::Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub const PREFIX: &'static str = $prefix;

      /// Build an id from an ordinal, e.g. `1` → `TRG_001`.
      pub fn from_ordinal(n: u64) -> Self {
        Self(format!(concat!($prefix, "_{:03}"), n))
      }

      /// Wrap a raw id string, e.g. one received over the wire.
      pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }

      /// Parse the ordinal back out of the id, if it has the canonical
      /// `PREFIX_NNN` shape.
      pub fn ordinal(&self) -> Option<u64> {
        self
          .0
          .strip_prefix(concat!($prefix, "_"))
          .and_then(|s| s.parse().ok())
      }

      pub fn as_str(&self) -> &str { &self.0 }
    }

    impl std::fmt::Display for $name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
      }
    }
  };
}

entity_id!(
  /// Identifier of a [`Trigger`](crate::trigger::Trigger).
  TriggerId,
  "TRG"
);

entity_id!(
  /// Identifier of a [`Response`](crate::response::Response).
  ResponseId,
  "RES"
);

entity_id!(
  /// Identifier of a [`Mapping`](crate::mapping::Mapping).
  MappingId,
  "MAP"
);

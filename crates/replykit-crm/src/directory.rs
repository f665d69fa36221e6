//! [`CustomerDirectory`] — the JSON-file customer collection.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
  sync::Arc,
};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
  Error, Result,
  customer::{Customer, CustomerId, NewCustomer},
};

const CUSTOMERS_FILE: &str = "customers.json";

/// A customer directory backed by a single `customers.json` document, an
/// object keyed by messenger handle.
///
/// Same persistence contract as the rule store: loaded fully at open,
/// rewritten after every mutation, missing file created empty, malformed
/// file recovered as empty. Cloning is cheap — state is reference-counted.
#[derive(Clone)]
pub struct CustomerDirectory {
  path:  PathBuf,
  inner: Arc<RwLock<Inner>>,
}

struct Inner {
  customers: BTreeMap<String, Customer>,
  next_id:   u64,
}

impl CustomerDirectory {
  /// Open (or create) the directory under `dir`.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(CUSTOMERS_FILE);

    let customers: BTreeMap<String, Customer> = match tokio::fs::read(&path)
      .await
    {
      Ok(bytes) => match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(error) => {
          tracing::warn!(
            path = %path.display(),
            %error,
            "malformed customer file, starting empty"
          );
          BTreeMap::new()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        tokio::fs::write(&path, "{}").await?;
        BTreeMap::new()
      }
      Err(e) => return Err(e.into()),
    };

    let next_id = customers
      .values()
      .filter_map(|c| c.id.ordinal())
      .max()
      .unwrap_or(0)
      + 1;

    Ok(Self {
      path,
      inner: Arc::new(RwLock::new(Inner { customers, next_id })),
    })
  }

  async fn save(&self, inner: &Inner) -> Result<()> {
    let json = serde_json::to_vec_pretty(&inner.customers)?;
    tokio::fs::write(&self.path, json).await?;
    Ok(())
  }

  /// Create and persist a new customer. The handle must be unused.
  pub async fn add_customer(&self, input: NewCustomer) -> Result<Customer> {
    let mut inner = self.inner.write().await;
    if inner.customers.contains_key(&input.handle) {
      return Err(Error::DuplicateHandle(input.handle));
    }

    let now = Utc::now();
    let customer = Customer {
      id:         CustomerId::from_ordinal(inner.next_id),
      name:       input.name,
      email:      input.email,
      handle:     input.handle,
      status:     input.status,
      projects:   input.projects,
      notes:      input.notes,
      created_at: now,
      updated_at: now,
    };
    inner
      .customers
      .insert(customer.handle.clone(), customer.clone());
    inner.next_id += 1;
    self.save(&inner).await?;
    Ok(customer)
  }

  /// Look up a customer by messenger handle.
  pub async fn find_customer(&self, handle: &str) -> Option<Customer> {
    let inner = self.inner.read().await;
    inner.customers.get(handle).cloned()
  }

  /// Look up a customer by email address (exact match).
  pub async fn find_by_email(&self, email: &str) -> Option<Customer> {
    let inner = self.inner.read().await;
    inner.customers.values().find(|c| c.email == email).cloned()
  }

  /// Replace a customer's status and bump `updated_at`.
  pub async fn update_status(
    &self,
    handle: &str,
    status: impl Into<String>,
  ) -> Result<Customer> {
    let mut inner = self.inner.write().await;
    let customer = inner
      .customers
      .get_mut(handle)
      .ok_or_else(|| Error::CustomerNotFound(handle.to_owned()))?;
    customer.status = status.into();
    customer.updated_at = Utc::now();
    let customer = customer.clone();
    self.save(&inner).await?;
    Ok(customer)
  }

  /// Append a timestamped line to a customer's note log.
  pub async fn add_note(
    &self,
    handle: &str,
    note: &str,
  ) -> Result<Customer> {
    let mut inner = self.inner.write().await;
    let customer = inner
      .customers
      .get_mut(handle)
      .ok_or_else(|| Error::CustomerNotFound(handle.to_owned()))?;

    let now = Utc::now();
    let entry = format!("[{}] {note}", now.format("%Y-%m-%d %H:%M:%S"));
    if customer.notes.is_empty() {
      customer.notes = entry;
    } else {
      customer.notes.push('\n');
      customer.notes.push_str(&entry);
    }
    customer.updated_at = now;
    let customer = customer.clone();
    self.save(&inner).await?;
    Ok(customer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn directory() -> (tempfile::TempDir, CustomerDirectory) {
    let dir = tempfile::tempdir().expect("tempdir");
    let directory = CustomerDirectory::open(dir.path())
      .await
      .expect("open directory");
    (dir, directory)
  }

  fn test_user() -> NewCustomer {
    NewCustomer::new("Test User", "test@example.com", "123", "Lead")
  }

  #[tokio::test]
  async fn add_and_find_customer() {
    let (_dir, d) = directory().await;

    let added = d.add_customer(test_user()).await.unwrap();
    assert_eq!(added.id.as_str(), "CUST_001");

    let found = d.find_customer("123").await.unwrap();
    assert_eq!(found.name, "Test User");
    assert_eq!(found.status, "Lead");
  }

  #[tokio::test]
  async fn duplicate_handle_is_rejected() {
    let (_dir, d) = directory().await;
    d.add_customer(test_user()).await.unwrap();

    let err = d.add_customer(test_user()).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateHandle(_)));
  }

  #[tokio::test]
  async fn find_by_email_matches_exactly() {
    let (_dir, d) = directory().await;
    d.add_customer(test_user()).await.unwrap();

    assert!(d.find_by_email("test@example.com").await.is_some());
    assert!(d.find_by_email("other@example.com").await.is_none());
  }

  #[tokio::test]
  async fn update_status_bumps_updated_at() {
    let (_dir, d) = directory().await;
    let added = d.add_customer(test_user()).await.unwrap();

    let updated = d.update_status("123", "Active Client").await.unwrap();
    assert_eq!(updated.status, "Active Client");
    assert!(updated.updated_at >= added.updated_at);

    let err = d.update_status("999", "VIP").await.unwrap_err();
    assert!(matches!(err, Error::CustomerNotFound(_)));
  }

  #[tokio::test]
  async fn notes_accumulate_with_timestamps() {
    let (_dir, d) = directory().await;
    d.add_customer(test_user()).await.unwrap();

    d.add_note("123", "first contact").await.unwrap();
    let customer = d.add_note("123", "sent brochure").await.unwrap();

    let lines: Vec<&str> = customer.notes.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("first contact"));
    assert!(lines[1].ends_with("sent brochure"));
    assert!(lines[0].starts_with('['));
  }

  #[tokio::test]
  async fn to_context_exposes_template_fields() {
    let (_dir, d) = directory().await;
    let customer = d.add_customer(test_user()).await.unwrap();

    let ctx = customer.to_context();
    assert_eq!(ctx.get("name").map(String::as_str), Some("Test User"));
    assert_eq!(ctx.get("status").map(String::as_str), Some("Lead"));
    assert_eq!(
      ctx.get("email").map(String::as_str),
      Some("test@example.com")
    );
  }

  #[tokio::test]
  async fn reload_round_trips_customers() {
    let dir = tempfile::tempdir().unwrap();
    {
      let d = CustomerDirectory::open(dir.path()).await.unwrap();
      d.add_customer(test_user().with_projects(vec!["Alpha".into()]))
        .await
        .unwrap();
    }

    let d = CustomerDirectory::open(dir.path()).await.unwrap();
    let customer = d.find_customer("123").await.unwrap();
    assert_eq!(customer.id.as_str(), "CUST_001");
    assert_eq!(customer.projects, vec!["Alpha".to_string()]);

    // Counter resumes past the persisted records.
    let next = d
      .add_customer(NewCustomer::new("B", "b@example.com", "456", "Lead"))
      .await
      .unwrap();
    assert_eq!(next.id.as_str(), "CUST_002");
  }
}

//! Record storage behind object-safe traits.
//!
//! Persistence proper is an external collaborator; the in-memory
//! implementations here carry the dev/test wiring with the same contract a
//! database-backed store would honor.

use std::collections::HashMap;
use std::sync::Mutex;

use ledgerkeep_core::{DomainError, PrincipalId};

/// Stored accountant record.
#[derive(Debug, Clone)]
pub struct PrincipalRecord {
    pub id: PrincipalId,
    pub username: String,
    pub secret_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Stored client record, owned by the accountant who created it.
#[derive(Debug, Clone)]
pub struct ClientRecord {
    pub id: PrincipalId,
    pub username: String,
    pub secret_hash: String,
    pub company_name: String,
    pub tax_id: String,
    pub accountant: String,
}

pub trait PrincipalStore: Send + Sync {
    /// Insert a new record; `Conflict` if the username is taken.
    fn insert(&self, record: PrincipalRecord) -> Result<(), DomainError>;

    fn find_by_username(&self, username: &str) -> Option<PrincipalRecord>;

    fn exists(&self, username: &str) -> bool;
}

pub trait ClientStore: Send + Sync {
    /// Insert a new record; `Conflict` if the username or tax id is taken.
    fn insert(&self, record: ClientRecord) -> Result<(), DomainError>;

    fn find_by_username(&self, username: &str) -> Option<ClientRecord>;

    fn list_for_accountant(&self, accountant: &str) -> Vec<ClientRecord>;

    /// Remove by tax id. `NotFound` for unknown ids, `Unauthorized` when the
    /// record belongs to another accountant.
    fn remove(&self, accountant: &str, tax_id: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Default)]
pub struct InMemoryPrincipalStore {
    inner: Mutex<HashMap<String, PrincipalRecord>>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrincipalStore for InMemoryPrincipalStore {
    fn insert(&self, record: PrincipalRecord) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains_key(&record.username) {
            return Err(DomainError::conflict("username is already taken"));
        }
        inner.insert(record.username.clone(), record);
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Option<PrincipalRecord> {
        self.inner.lock().unwrap().get(username).cloned()
    }

    fn exists(&self, username: &str) -> bool {
        self.inner.lock().unwrap().contains_key(username)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    inner: Mutex<HashMap<String, ClientRecord>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStore for InMemoryClientStore {
    fn insert(&self, record: ClientRecord) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains_key(&record.username) {
            return Err(DomainError::conflict("username is already taken"));
        }
        if inner.values().any(|c| c.tax_id == record.tax_id) {
            return Err(DomainError::conflict("tax id is already registered"));
        }
        inner.insert(record.username.clone(), record);
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Option<ClientRecord> {
        self.inner.lock().unwrap().get(username).cloned()
    }

    fn list_for_accountant(&self, accountant: &str) -> Vec<ClientRecord> {
        self.inner
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.accountant == accountant)
            .cloned()
            .collect()
    }

    fn remove(&self, accountant: &str, tax_id: &str) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();

        let Some(username) = inner
            .values()
            .find(|c| c.tax_id == tax_id)
            .map(|c| c.username.clone())
        else {
            return Err(DomainError::NotFound);
        };

        if inner[&username].accountant != accountant {
            return Err(DomainError::Unauthorized);
        }

        inner.remove(&username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accountant(username: &str) -> PrincipalRecord {
        PrincipalRecord {
            id: PrincipalId::new(),
            username: username.to_string(),
            secret_hash: "$hash$".to_string(),
            first_name: "Noa".to_string(),
            last_name: "Levi".to_string(),
            email: format!("{username}@example.com"),
            phone: "050-0000000".to_string(),
        }
    }

    fn client(username: &str, tax_id: &str, owner: &str) -> ClientRecord {
        ClientRecord {
            id: PrincipalId::new(),
            username: username.to_string(),
            secret_hash: "$hash$".to_string(),
            company_name: "Acme Ltd".to_string(),
            tax_id: tax_id.to_string(),
            accountant: owner.to_string(),
        }
    }

    #[test]
    fn duplicate_username_conflicts() {
        let store = InMemoryPrincipalStore::new();

        store.insert(accountant("noa")).unwrap();
        assert!(store.exists("noa"));

        let err = store.insert(accountant("noa")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn duplicate_client_tax_id_conflicts() {
        let store = InMemoryClientStore::new();

        store.insert(client("acme", "511111111", "noa")).unwrap();

        let err = store.insert(client("other", "511111111", "noa")).unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn listing_is_scoped_to_the_owning_accountant() {
        let store = InMemoryClientStore::new();

        store.insert(client("acme", "511111111", "noa")).unwrap();
        store.insert(client("initech", "522222222", "noa")).unwrap();
        store.insert(client("globex", "533333333", "dana")).unwrap();

        let mine = store.list_for_accountant("noa");
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|c| c.accountant == "noa"));
        assert!(store.list_for_accountant("nobody").is_empty());
    }

    #[test]
    fn remove_is_scoped_to_the_owning_accountant() {
        let store = InMemoryClientStore::new();

        store.insert(client("acme", "511111111", "noa")).unwrap();

        assert_eq!(
            store.remove("dana", "511111111"),
            Err(DomainError::Unauthorized)
        );
        assert_eq!(store.remove("noa", "999999999"), Err(DomainError::NotFound));

        store.remove("noa", "511111111").unwrap();
        assert!(store.find_by_username("acme").is_none());
    }
}

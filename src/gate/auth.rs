//! Subject resolution.
//!
//! Stand-in for the external authentication provider: callers identify
//! themselves with an `X-User-Id` header which is resolved against an
//! in-memory directory. An absent or unknown id resolves to no subject;
//! the gate's authentication check then rejects.

use std::collections::HashMap;

use crate::gate::context::Subject;

/// Header carrying the caller's identity.
pub const X_USER_ID: &str = "x-user-id";

/// In-memory subject directory.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<u64, Subject>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subject, replacing any existing entry with the same id.
    pub fn insert(&mut self, subject: Subject) {
        self.users.insert(subject.id, subject);
    }

    /// Resolve a subject by id.
    pub fn resolve(&self, id: u64) -> Option<Subject> {
        self.users.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Demo directory covering every gate outcome against the default
    /// catalog section (department 10, owner 1).
    pub fn with_fixtures() -> Self {
        let mut directory = Self::new();
        directory.insert(Subject {
            id: 1,
            name: "Alice Durand".into(),
            role: "admin".into(),
            department_id: 10,
            is_premium: true,
        });
        directory.insert(Subject {
            id: 2,
            name: "Bruno Vega".into(),
            role: "manager".into(),
            department_id: 10,
            is_premium: false,
        });
        directory.insert(Subject {
            id: 3,
            name: "Carla Moss".into(),
            role: "staff".into(),
            department_id: 20,
            is_premium: false,
        });
        directory.insert(Subject {
            id: 4,
            name: "Deniz Aksoy".into(),
            role: "intern".into(),
            department_id: 10,
            is_premium: false,
        });
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_and_unknown_ids() {
        let directory = UserDirectory::with_fixtures();
        assert_eq!(directory.resolve(1).unwrap().role, "admin");
        assert!(directory.resolve(1).unwrap().is_premium);
        assert!(directory.resolve(404).is_none());
    }

    #[test]
    fn insert_replaces_existing_subject() {
        let mut directory = UserDirectory::new();
        directory.insert(Subject {
            id: 5,
            name: "Eve".into(),
            role: "staff".into(),
            department_id: 10,
            is_premium: false,
        });
        directory.insert(Subject {
            id: 5,
            name: "Eve".into(),
            role: "manager".into(),
            department_id: 10,
            is_premium: true,
        });
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.resolve(5).unwrap().role, "manager");
    }
}

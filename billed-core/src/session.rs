use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Storage key holding the JSON encoded [`User`].
pub const USER_KEY: &str = "user";

/// Client-local persistent key/value storage.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: String);
    fn remove_item(&mut self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    /// Reads the session user. A malformed entry counts as no session.
    pub fn load(storage: &dyn SessionStorage) -> Option<User> {
        let value = storage.get_item(USER_KEY)?;
        match serde_json::from_str(&value) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("ignoring malformed session user: {}", e);
                None
            }
        }
    }

    pub fn store(&self, storage: &mut dyn SessionStorage) -> Result<(), Error> {
        storage.set_item(USER_KEY, serde_json::to_string(self)?);
        Ok(())
    }

    pub fn clear(storage: &mut dyn SessionStorage) {
        storage.remove_item(USER_KEY);
    }
}

/// In-memory [`SessionStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }

    fn remove_item(&mut self, key: &str) {
        self.items.remove(key);
    }
}

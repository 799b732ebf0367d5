//! Mutable per-client session state: persistent headers and basic-auth
//! credentials.

use indexmap::IndexMap;
use std::fmt;

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Header map with case-insensitive names plus optional basic-auth
/// credentials. Read at request-send time, so mutations only affect
/// requests issued afterwards.
#[derive(Debug, Clone, Default)]
pub struct Session {
    headers: IndexMap<String, String>,
    basic_auth: Option<BasicCredentials>,
}

impl Session {
    /// Session seeded with the JSON defaults, then `defaults` on top
    pub fn new(defaults: &IndexMap<String, String>) -> Self {
        let mut session = Self::default();
        session.set_header("Content-Type", "application/json");
        session.set_header("Accept", "application/json");
        for (name, value) in defaults {
            session.set_header(name, value);
        }
        session
    }

    pub fn headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Insert or replace a header, dropping any differently-cased duplicate
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.insert(name, value.into());
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let key = self
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .cloned()?;
        self.headers.shift_remove(&key)
    }

    pub fn basic_auth(&self) -> Option<&BasicCredentials> {
        self.basic_auth.as_ref()
    }

    pub fn set_basic_auth(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.basic_auth = Some(BasicCredentials {
            username: username.into(),
            password: password.into(),
        });
    }

    pub fn clear_basic_auth(&mut self) {
        self.basic_auth = None;
    }

    /// Session headers with `overrides` merged on top
    pub fn merged_headers(&self, overrides: &IndexMap<String, String>) -> IndexMap<String, String> {
        let mut merged = self.clone();
        for (name, value) in overrides {
            merged.set_header(name, value);
        }
        merged.headers
    }
}

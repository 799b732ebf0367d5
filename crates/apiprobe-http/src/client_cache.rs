//! Lazily built HTTP clients, one per TLS verification mode.
//!
//! A request whose `verify_ssl` override differs from the session default is
//! sent through the other client; connection pools are never rebuilt per
//! call.

use crate::error::ClientResult;
use crate::timeout_manager::TimeoutManager;
use once_cell::sync::OnceCell;
use reqwest::Client;

#[derive(Debug, Default)]
pub struct ClientCache {
    verified: OnceCell<Client>,
    unverified: OnceCell<Client>,
}

impl ClientCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client for the requested verification mode, built on first use
    pub fn get_client(&self, verify_ssl: bool) -> ClientResult<&Client> {
        let cell = if verify_ssl {
            &self.verified
        } else {
            &self.unverified
        };
        cell.get_or_try_init(|| build_client(verify_ssl))
    }

    pub fn stats(&self) -> ClientCacheStats {
        ClientCacheStats {
            cached_clients: usize::from(self.verified.get().is_some())
                + usize::from(self.unverified.get().is_some()),
        }
    }
}

fn build_client(verify_ssl: bool) -> ClientResult<Client> {
    tracing::debug!(verify_ssl, "building HTTP client");
    let builder = TimeoutManager::apply_to_client_builder(Client::builder())
        .danger_accept_invalid_certs(!verify_ssl);
    Ok(builder.build()?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCacheStats {
    pub cached_clients: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_are_built_lazily_and_reused() {
        let cache = ClientCache::new();
        assert_eq!(cache.stats().cached_clients, 0);

        let first = cache.get_client(true).unwrap() as *const Client;
        let second = cache.get_client(true).unwrap() as *const Client;
        assert_eq!(first, second);
        assert_eq!(cache.stats().cached_clients, 1);

        cache.get_client(false).unwrap();
        assert_eq!(cache.stats().cached_clients, 2);
    }
}

//! API key selection policies.
//!
//! The client asks its [`KeySelector`] for a key once per discovery call and
//! uses that key for both the search and the batch-detail request.

use rand::seq::IndexedRandom;

use crate::error::YoutubeError;

pub trait KeySelector: Send + Sync {
    fn select(&self) -> &str;
}

/// Picks a key uniformly at random on every call.
///
/// Has no notion of per-key quota; an exhausted key is as likely to be picked
/// as a fresh one.
#[derive(Debug, Clone)]
pub struct RandomKeyPool {
    keys: Vec<String>,
}

impl RandomKeyPool {
    /// # Errors
    ///
    /// Returns [`YoutubeError::EmptyKeyPool`] if `keys` has no non-blank entry.
    pub fn new(keys: Vec<String>) -> Result<Self, YoutubeError> {
        let keys: Vec<String> = keys.into_iter().filter(|k| !k.trim().is_empty()).collect();
        if keys.is_empty() {
            return Err(YoutubeError::EmptyKeyPool);
        }
        Ok(Self { keys })
    }
}

impl KeySelector for RandomKeyPool {
    fn select(&self) -> &str {
        self.keys
            .choose(&mut rand::rng())
            .map_or("", String::as_str)
    }
}

/// Always returns the same key.
#[derive(Debug, Clone)]
pub struct FixedKey(pub String);

impl KeySelector for FixedKey {
    fn select(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn empty_pool_is_rejected() {
        assert!(matches!(
            RandomKeyPool::new(vec![]),
            Err(YoutubeError::EmptyKeyPool)
        ));
        assert!(matches!(
            RandomKeyPool::new(vec!["  ".to_string()]),
            Err(YoutubeError::EmptyKeyPool)
        ));
    }

    #[test]
    fn random_pool_only_returns_configured_keys() {
        let pool = RandomKeyPool::new(vec!["a".to_string(), "b".to_string(), "c".to_string()])
            .expect("non-empty pool");
        let allowed: HashSet<&str> = ["a", "b", "c"].into_iter().collect();
        for _ in 0..200 {
            assert!(allowed.contains(pool.select()));
        }
    }

    #[test]
    fn random_pool_eventually_uses_every_key() {
        let pool =
            RandomKeyPool::new(vec!["a".to_string(), "b".to_string()]).expect("non-empty pool");
        let seen: HashSet<String> = (0..500).map(|_| pool.select().to_string()).collect();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn fixed_key_is_stable() {
        let key = FixedKey("only".to_string());
        assert_eq!(key.select(), "only");
        assert_eq!(key.select(), "only");
    }
}

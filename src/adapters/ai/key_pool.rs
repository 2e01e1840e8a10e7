//! Key Pool - ordered API credentials with a rotating cursor.

use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::Secret;

/// An ordered pool of API credentials with a shared rotation cursor.
///
/// The cursor marks the credential the next invocation should try first.
/// It is advisory: concurrent invocations advance it without coordination,
/// which can skew key usage but never affects which credential a given
/// attempt actually used, since attempts resolve their own index locally.
#[derive(Debug)]
pub struct KeyPool {
    keys: Vec<Secret<String>>,
    cursor: AtomicUsize,
}

impl KeyPool {
    /// Creates a pool from the given credentials, cursor at the first key.
    pub fn new(keys: Vec<Secret<String>>) -> Self {
        Self {
            keys,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a pool from plain strings. Convenient in tests.
    pub fn from_plain<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(keys.into_iter().map(|k| Secret::new(k.into())).collect())
    }

    /// Number of credentials in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the pool holds no credentials.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the credential the next invocation starts from.
    ///
    /// The raw counter grows monotonically and is reduced modulo the pool
    /// size on read, so `advance` never has to loop on a compare-exchange.
    pub fn cursor(&self) -> usize {
        if self.keys.is_empty() {
            return 0;
        }
        self.cursor.load(Ordering::Relaxed) % self.keys.len()
    }

    /// Returns the credential at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds; callers index modulo `len()`.
    pub fn key(&self, index: usize) -> &Secret<String> {
        &self.keys[index]
    }

    /// Advances the cursor past a failed credential.
    pub fn advance(&self) {
        self.cursor.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use secrecy::ExposeSecret;

    #[test]
    fn new_pool_starts_at_first_key() {
        let pool = KeyPool::from_plain(["a", "b", "c"]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.cursor(), 0);
        assert_eq!(pool.key(0).expose_secret(), "a");
    }

    #[test]
    fn advance_wraps_modulo_pool_size() {
        let pool = KeyPool::from_plain(["a", "b", "c"]);

        pool.advance();
        assert_eq!(pool.cursor(), 1);
        pool.advance();
        assert_eq!(pool.cursor(), 2);
        pool.advance();
        assert_eq!(pool.cursor(), 0);
    }

    #[test]
    fn empty_pool_reports_empty() {
        let pool = KeyPool::from_plain(Vec::<String>::new());
        assert!(pool.is_empty());
        assert_eq!(pool.cursor(), 0);
    }

    proptest! {
        #[test]
        fn cursor_equals_advance_count_modulo_len(
            len in 1usize..16,
            advances in 0usize..256,
        ) {
            let keys: Vec<String> = (0..len).map(|i| format!("key-{i}")).collect();
            let pool = KeyPool::from_plain(keys);

            for _ in 0..advances {
                pool.advance();
            }

            prop_assert_eq!(pool.cursor(), advances % len);
        }

        #[test]
        fn rotation_from_cursor_visits_each_key_once(
            len in 1usize..16,
            advances in 0usize..64,
        ) {
            let keys: Vec<String> = (0..len).map(|i| format!("key-{i}")).collect();
            let pool = KeyPool::from_plain(keys);
            for _ in 0..advances {
                pool.advance();
            }

            let start = pool.cursor();
            let mut seen: Vec<usize> = (0..pool.len())
                .map(|offset| (start + offset) % pool.len())
                .collect();
            seen.sort_unstable();
            let expected: Vec<usize> = (0..pool.len()).collect();

            prop_assert_eq!(seen, expected);
        }
    }
}

//! Cache key construction.

/// Key for one immutable upstream record: `<namespace>:<record id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}:{}", namespace, id)]
pub struct CacheKey {
    namespace: String,
    id: String,
}

impl CacheKey {
    /// Build a key from a namespace (e.g. `lol:match`) and a record id.
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Namespace portion.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Record id portion.
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_joins_namespace_and_id() {
        let key = CacheKey::new("lol:match", "KR_7001234567");
        assert_eq!(key.to_string(), "lol:match:KR_7001234567");
        assert_eq!(key.namespace(), "lol:match");
        assert_eq!(key.id(), "KR_7001234567");
    }

    #[test]
    fn test_keys_differ_across_namespaces() {
        let lol = CacheKey::new("lol:match", "KR_1");
        let tft = CacheKey::new("tft:match", "KR_1");
        assert_ne!(lol, tft);
        assert_ne!(lol.to_string(), tft.to_string());
    }
}

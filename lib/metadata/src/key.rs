pub mod key {
    use std::fmt::Display;

    use serde::{Deserialize, Serialize};

    /// A metadata key.
    ///
    /// Keys are namespaced by dotted prefixes (`tdm.score.A`).
    /// There is no ordering significance beyond the lexical one.
    #[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct MetadataKey(String);

    impl MetadataKey {
        pub fn new(key: impl Into<String>) -> Self {
            Self(key.into())
        }

        /// A new key under `self`, joined with a dot.
        pub fn child(&self, segment: impl Display) -> Self {
            Self(format!("{}.{}", self.0, segment))
        }

        /// Whether this key lives under the given prefix key
        /// (or is equal to it).
        pub fn has_prefix(&self, prefix: &MetadataKey) -> bool {
            self.0 == prefix.0
                || (self.0.len() > prefix.0.len()
                    && self.0.starts_with(&prefix.0)
                    && self.0.as_bytes()[prefix.0.len()] == b'.')
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl Display for MetadataKey {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            self.0.fmt(f)
        }
    }

    impl From<&str> for MetadataKey {
        fn from(value: &str) -> Self {
            Self(value.into())
        }
    }

    #[cfg(test)]
    mod test {
        use super::MetadataKey;

        #[test]
        fn prefix_matches_whole_segments_only() {
            let score = MetadataKey::new("tdm.score");
            assert_eq!(score.child("A").as_str(), "tdm.score.A");
            assert!(score.child("A").has_prefix(&score));
            assert!(score.has_prefix(&score));
            // `tdm.scoreboard` is not under `tdm.score`
            assert!(!MetadataKey::new("tdm.scoreboard").has_prefix(&score));
            assert!(!MetadataKey::new("tdm").has_prefix(&score));
        }
    }
}

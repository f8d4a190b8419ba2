pub mod value {
    use std::fmt::Display;
    use std::str::FromStr;

    /// The closed set of value kinds the store accepts for writes.
    ///
    /// Everything is a string on the wire; typed values are encoded once
    /// at the write boundary and decoded once at the read boundary.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum MetadataValue {
        Int(i64),
        /// An enum-like tag, stored as its textual form.
        Tag(String),
    }

    impl MetadataValue {
        pub fn tag(tag: impl Display) -> Self {
            Self::Tag(tag.to_string())
        }

        pub fn encode(&self) -> String {
            match self {
                Self::Int(v) => v.to_string(),
                Self::Tag(v) => v.clone(),
            }
        }
    }

    impl From<i64> for MetadataValue {
        fn from(value: i64) -> Self {
            Self::Int(value)
        }
    }

    /// Lenient decoding of a replicated value into its typed form.
    ///
    /// A value that fails to decode is treated exactly like an absent
    /// one. This is a documented contract: readers cannot distinguish
    /// "absent" from "malformed" and always fall back to the default.
    pub trait MetadataDecode: Sized {
        fn decode(raw: &str) -> Option<Self>;
    }

    impl<T: FromStr> MetadataDecode for T {
        fn decode(raw: &str) -> Option<Self> {
            raw.parse().ok()
        }
    }

    #[cfg(test)]
    mod test {
        use super::{MetadataDecode, MetadataValue};

        #[test]
        fn malformed_decodes_as_none() {
            assert_eq!(i64::decode("3"), Some(3));
            assert_eq!(i64::decode("three"), None);
            assert_eq!(MetadataValue::Int(-7).encode(), "-7");
        }
    }
}

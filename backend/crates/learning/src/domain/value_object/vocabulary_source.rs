use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Where a vocabulary entry came from.
///
/// Serialized as its lowercase code; deserialized from the code or the
/// numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(i16)]
pub enum VocabularySource {
    #[default]
    Manual = 0,
    Imported = 1,
    Conversation = 2,
    Podcast = 3,
}

impl VocabularySource {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use VocabularySource::*;
        match self {
            Manual => "manual",
            Imported => "imported",
            Conversation => "conversation",
            Podcast => "podcast",
        }
    }

    pub fn from_id(id: i16) -> Option<Self> {
        use VocabularySource::*;
        match id {
            0 => Some(Manual),
            1 => Some(Imported),
            2 => Some(Conversation),
            3 => Some(Podcast),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        use VocabularySource::*;
        [Manual, Imported, Conversation, Podcast]
            .into_iter()
            .find(|source| source.code() == code)
    }
}

impl<'de> Deserialize<'de> for VocabularySource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Id(i64),
            Code(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Id(id) => i16::try_from(id)
                .ok()
                .and_then(Self::from_id)
                .ok_or_else(|| de::Error::custom(format!("unknown vocabulary source id {id}"))),
            Wire::Code(code) => Self::from_code(&code)
                .ok_or_else(|| de::Error::custom(format!("unknown vocabulary source `{code}`"))),
        }
    }
}

impl fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_code_matches() {
        for id in 0..=3 {
            let source = VocabularySource::from_id(id).unwrap();
            assert_eq!(
                serde_json::to_string(&source).unwrap(),
                format!("\"{}\"", source.code())
            );
        }
        assert_eq!(VocabularySource::from_id(4), None);
    }

    #[test]
    fn test_deserialize_accepts_id_or_code() {
        let from_id: VocabularySource = serde_json::from_str("3").unwrap();
        let from_code: VocabularySource = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(from_id, VocabularySource::Podcast);
        assert_eq!(from_code, VocabularySource::Podcast);
        assert_eq!(
            serde_json::from_str::<VocabularySource>("0").unwrap(),
            VocabularySource::Manual
        );

        assert!(serde_json::from_str::<VocabularySource>("4").is_err());
        assert!(serde_json::from_str::<VocabularySource>("-1").is_err());
        assert!(serde_json::from_str::<VocabularySource>("\"Podcast\"").is_err());
    }
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The closed set of block types a document can contain.
///
/// The wire spelling is the snake_case name (`heading_1`, `bullet_list`,
/// ...). Deserialization of an unknown spelling falls back to
/// [`BlockKind::Paragraph`]: stored documents from newer clients must
/// still hydrate. Callers that want the unknown spelling surfaced use
/// [`BlockKind::parse`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    #[default]
    Paragraph,
    Todo,
    BulletList,
    NumberedList,
    Code,
}

/// Error returned by the strict parser for unrecognized type spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown block type `{0}`")]
pub struct UnknownBlockKind(pub String);

impl BlockKind {
    /// All kinds, in the order the block-type menu presents them.
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Paragraph,
        BlockKind::Todo,
        BlockKind::BulletList,
        BlockKind::NumberedList,
        BlockKind::Code,
    ];

    /// The wire spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Heading1 => "heading_1",
            BlockKind::Heading2 => "heading_2",
            BlockKind::Heading3 => "heading_3",
            BlockKind::Paragraph => "paragraph",
            BlockKind::Todo => "todo",
            BlockKind::BulletList => "bullet_list",
            BlockKind::NumberedList => "numbered_list",
            BlockKind::Code => "code",
        }
    }

    /// Strict parse: unknown spellings are an error.
    pub fn parse(s: &str) -> Result<Self, UnknownBlockKind> {
        match s {
            "heading_1" => Ok(BlockKind::Heading1),
            "heading_2" => Ok(BlockKind::Heading2),
            "heading_3" => Ok(BlockKind::Heading3),
            "paragraph" => Ok(BlockKind::Paragraph),
            "todo" => Ok(BlockKind::Todo),
            "bullet_list" => Ok(BlockKind::BulletList),
            "numbered_list" => Ok(BlockKind::NumberedList),
            "code" => Ok(BlockKind::Code),
            other => Err(UnknownBlockKind(other.to_string())),
        }
    }

    /// Lenient parse: unknown spellings fall back to `Paragraph`.
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BlockKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(BlockKind::parse_or_default(&s))
    }
}

/// One unit of document content: a type and unconstrained plain text.
///
/// The `todo` completion checkbox is rendered but deliberately not part
/// of the model; persistence is `{type, content}` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: String,
}

impl Block {
    pub fn new(kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// An empty paragraph, the shape a fresh block starts as.
    pub fn empty() -> Self {
        Self::new(BlockKind::Paragraph, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BlockKind::Heading1, "heading_1")]
    #[case(BlockKind::Heading2, "heading_2")]
    #[case(BlockKind::Heading3, "heading_3")]
    #[case(BlockKind::Paragraph, "paragraph")]
    #[case(BlockKind::Todo, "todo")]
    #[case(BlockKind::BulletList, "bullet_list")]
    #[case(BlockKind::NumberedList, "numbered_list")]
    #[case(BlockKind::Code, "code")]
    fn wire_spelling_round_trips(#[case] kind: BlockKind, #[case] spelling: &str) {
        assert_eq!(kind.as_str(), spelling);
        assert_eq!(BlockKind::parse(spelling).unwrap(), kind);
    }

    #[test]
    fn strict_parse_rejects_unknown_spelling() {
        let err = BlockKind::parse("callout").unwrap_err();
        assert_eq!(err, UnknownBlockKind("callout".to_string()));
        assert!(err.to_string().contains("callout"));
    }

    #[test]
    fn lenient_parse_falls_back_to_paragraph() {
        assert_eq!(BlockKind::parse_or_default("callout"), BlockKind::Paragraph);
        assert_eq!(BlockKind::parse_or_default(""), BlockKind::Paragraph);
        assert_eq!(BlockKind::parse_or_default("code"), BlockKind::Code);
    }

    #[test]
    fn serde_uses_wire_spelling_and_falls_back() {
        let json = serde_json::to_string(&BlockKind::BulletList).unwrap();
        assert_eq!(json, "\"bullet_list\"");

        let kind: BlockKind = serde_json::from_str("\"heading_2\"").unwrap();
        assert_eq!(kind, BlockKind::Heading2);

        let unknown: BlockKind = serde_json::from_str("\"gallery\"").unwrap();
        assert_eq!(unknown, BlockKind::Paragraph);
    }

    #[test]
    fn empty_block_is_a_blank_paragraph() {
        let block = Block::empty();
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.content, "");
    }
}

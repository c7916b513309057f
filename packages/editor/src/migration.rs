//! # Legacy Migration
//!
//! Posts are stored in one of three shapes:
//!
//! ```text
//! canonical      { blocks: [ {..}, .. ],        content: "plain text" }
//! double-encoded { blocks: "[{..}, ..]",        content: "[{..}]" | text }
//! pre-block      { blocks: null | <missing>,   content: "[{..}, ..]" }
//! ```
//!
//! [`normalize`] rewrites the two legacy shapes into the canonical one and
//! regenerates `content` with the plain-text extractor. It is idempotent, so
//! it can run on every load; callers persist only when it reports a change.
//!
//! A `blocks` array that does not parse as blocks (an unknown `type`, a
//! mistyped field) is never migrated: `content` is not consulted and the
//! array is written back as read.
//!
//! "Looks encoded" is a prefix check on the trimmed content (`[`). A plain
//! text post that happens to start with `[` is treated as a candidate too;
//! if it does not parse as blocks it is left untouched.

use crate::block::Block;
use crate::text::extract_text;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// The `blocks` field as found on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredBlocks {
    /// Canonical block sequence
    Canonical(Vec<Block>),
    /// Block sequence serialized into a string
    Encoded(String),
    /// A sequence with at least one element that is not a valid block
    Array(Vec<Value>),
    /// Anything else: not a usable block sequence
    Other(Value),
}

/// One post as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,
    #[serde(default)]
    pub blocks: Option<StoredBlocks>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub date: String,
    #[serde(default)]
    pub section_id: Option<i64>,
    /// Fields this crate does not interpret, written back as read
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            blocks: None,
            image: None,
            date: String::new(),
            section_id: None,
            extra: Map::new(),
        }
    }

    /// Canonical blocks, if the post is in canonical form
    pub fn blocks(&self) -> Option<&Vec<Block>> {
        match &self.blocks {
            Some(StoredBlocks::Canonical(blocks)) => Some(blocks),
            _ => None,
        }
    }

    pub fn blocks_mut(&mut self) -> Option<&mut Vec<Block>> {
        match &mut self.blocks {
            Some(StoredBlocks::Canonical(blocks)) => Some(blocks),
            _ => None,
        }
    }

    /// Store new canonical blocks and regenerate the plain-text content
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.content = extract_text(&blocks);
        self.blocks = Some(StoredBlocks::Canonical(blocks));
    }
}

/// What [`normalize_in_place`] did to a post
#[derive(Debug, Clone, PartialEq)]
pub enum Migration {
    /// Already canonical, or nothing to migrate
    Unchanged,
    /// `blocks` held an encoded string that was decoded
    DecodedBlocks { content_regenerated: bool },
    /// `blocks` was unusable and `content` held the encoded blocks
    DecodedContent,
    /// An encoded field did not parse; the post was left as-is
    ParseFailure { field: &'static str, error: String },
}

impl Migration {
    pub fn changed(&self) -> bool {
        matches!(
            self,
            Migration::DecodedBlocks { .. } | Migration::DecodedContent
        )
    }
}

/// Heuristic: trimmed text opens a JSON array
pub fn looks_encoded(text: &str) -> bool {
    text.trim().starts_with('[')
}

/// Rewrite a legacy post into canonical form.
///
/// Returns whether anything changed and the (possibly rewritten) post.
pub fn normalize(mut post: Post) -> (bool, Post) {
    let changed = normalize_in_place(&mut post).changed();
    (changed, post)
}

pub fn normalize_in_place(post: &mut Post) -> Migration {
    let migration = match &post.blocks {
        Some(StoredBlocks::Encoded(raw)) => match serde_json::from_str::<Vec<Block>>(raw) {
            Ok(blocks) => {
                let content_regenerated = looks_encoded(&post.content);
                if content_regenerated {
                    post.content = extract_text(&blocks);
                }
                post.blocks = Some(StoredBlocks::Canonical(blocks));
                Migration::DecodedBlocks { content_regenerated }
            }
            Err(err) => Migration::ParseFailure {
                field: "blocks",
                error: err.to_string(),
            },
        },

        Some(StoredBlocks::Canonical(_)) => Migration::Unchanged,

        Some(StoredBlocks::Array(items)) => Migration::ParseFailure {
            field: "blocks",
            error: first_block_error(items),
        },

        _ if looks_encoded(&post.content) => {
            match serde_json::from_str::<Vec<Block>>(&post.content) {
                Ok(blocks) => {
                    post.set_blocks(blocks);
                    Migration::DecodedContent
                }
                Err(err) => Migration::ParseFailure {
                    field: "content",
                    error: err.to_string(),
                },
            }
        }

        _ => Migration::Unchanged,
    };

    match &migration {
        Migration::ParseFailure { field, error } => {
            tracing::warn!(post = %post.id, field, error = %error, "skipping legacy migration");
        }
        Migration::Unchanged => {}
        changed => tracing::debug!(post = %post.id, migration = ?changed, "migrated legacy post"),
    }

    migration
}

fn first_block_error(items: &[Value]) -> String {
    items
        .iter()
        .find_map(|item| Block::deserialize(item).err())
        .map(|err| err.to_string())
        .unwrap_or_else(|| "not a block sequence".to_string())
}

/// One entry of the `posts` array
///
/// Entries are read one at a time so a single mistyped post cannot keep the
/// rest of the file from loading. Malformed entries are written back as read.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredPost {
    Post(Post),
    Malformed { value: Value, error: String },
}

impl StoredPost {
    pub fn as_post(&self) -> Option<&Post> {
        match self {
            StoredPost::Post(post) => Some(post),
            StoredPost::Malformed { .. } => None,
        }
    }

    pub fn as_post_mut(&mut self) -> Option<&mut Post> {
        match self {
            StoredPost::Post(post) => Some(post),
            StoredPost::Malformed { .. } => None,
        }
    }

    /// Post id, or the raw `id` value of a malformed entry
    pub fn label(&self) -> Option<String> {
        match self {
            StoredPost::Post(post) => Some(post.id.clone()),
            StoredPost::Malformed { value, .. } => match value.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(other) => Some(other.to_string()),
                None => None,
            },
        }
    }
}

impl From<Post> for StoredPost {
    fn from(post: Post) -> Self {
        StoredPost::Post(post)
    }
}

impl Serialize for StoredPost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoredPost::Post(post) => post.serialize(serializer),
            StoredPost::Malformed { value, .. } => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StoredPost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let parsed = Post::deserialize(&value);
        Ok(match parsed {
            Ok(post) => StoredPost::Post(post),
            Err(err) => StoredPost::Malformed {
                error: err.to_string(),
                value,
            },
        })
    }
}

/// The flat store file: posts plus whatever else lives beside them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostCollection {
    #[serde(default, rename = "posts")]
    pub entries: Vec<StoredPost>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PostCollection {
    /// Well-formed posts, in stored order
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.entries.iter().filter_map(StoredPost::as_post)
    }

    pub fn posts_mut(&mut self) -> impl Iterator<Item = &mut Post> {
        self.entries.iter_mut().filter_map(StoredPost::as_post_mut)
    }

    pub fn push(&mut self, post: Post) {
        self.entries.push(post.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts().find(|post| post.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Post> {
        self.posts_mut().find(|post| post.id == id)
    }
}

/// Outcome of normalizing every post in a collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    /// Ids of posts that were rewritten
    pub changed: Vec<String>,
    /// Posts whose encoded data did not parse, with the parser message
    pub failures: Vec<(String, String)>,
}

impl MigrationReport {
    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }
}

/// Normalize each post independently
pub fn normalize_collection(collection: &mut PostCollection) -> MigrationReport {
    let mut report = MigrationReport::default();

    for (index, entry) in collection.entries.iter_mut().enumerate() {
        if let StoredPost::Malformed { error, .. } = &*entry {
            let label = entry.label().unwrap_or_else(|| format!("#{}", index));
            tracing::warn!(post = %label, error = %error, "skipping malformed post");
            report.failures.push((label, error.clone()));
            continue;
        }
        let Some(post) = entry.as_post_mut() else {
            continue;
        };

        match normalize_in_place(post) {
            Migration::ParseFailure { error, .. } => report.failures.push((post.id.clone(), error)),
            migration if migration.changed() => report.changed.push(post.id.clone()),
            _ => {}
        }
    }

    report
}

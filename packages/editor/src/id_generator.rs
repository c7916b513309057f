use crate::block::BlockId;
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_ID_PREFIX: &str = "blk";

/// Source of fresh block ids
pub trait IdGenerator {
    fn next_id(&mut self) -> BlockId;
}

/// Wall-clock ids with a random suffix: `<prefix>-<unix millis>-<8 hex>`
#[derive(Debug, Clone)]
pub struct TimeRandomIdGenerator {
    prefix: String,
}

impl TimeRandomIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TimeRandomIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl IdGenerator for TimeRandomIdGenerator {
    fn next_id(&mut self) -> BlockId {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        BlockId::Text(format!("{}-{}-{}", self.prefix, millis, &suffix[..8]))
    }
}

/// Sequential ID generator: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    count: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            count: 0,
        }
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> BlockId {
        self.count += 1;
        BlockId::Text(format!("{}-{}", self.prefix, self.count))
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&mut self) -> BlockId {
        (**self).next_id()
    }
}

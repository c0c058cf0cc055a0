/// Fixture generation loop.
///
/// Each iteration draws an offset into the past (`days`, then `seconds`),
/// then a record, and inserts `{key: [record]}` into the document. Draw
/// order is fixed so a seeded RNG and a pinned clock reproduce a document
/// exactly.
use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::{self, Clock};
use crate::error::Result;
use crate::record::Record;
use crate::value::Value;

/// Largest day offset (inclusive).
pub const MAX_DAYS_BACK: u32 = 365;
/// Largest second offset within a day (inclusive).
pub const MAX_SECONDS_BACK: u32 = 86_399;

/// Record strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Happiness with an optional derived sleep duration.
    #[default]
    Mood,
    /// Copies of the fixed four-entry pool.
    Pool,
}

impl Mode {
    /// Iterations used when no count is given.
    pub fn default_count(self) -> usize {
        match self {
            Mode::Mood => 100,
            Mode::Pool => 1000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Mood => "mood",
            Mode::Pool => "pool",
        }
    }

    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Record {
        match self {
            Mode::Mood => Record::sample_mood(rng),
            Mode::Pool => Record::sample_pool(rng),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    pub mode: Mode,
    /// Iterations; `None` uses `mode.default_count()`. The binary always
    /// passes `None`.
    pub count: Option<usize>,
}

impl GeneratorConfig {
    pub fn iterations(&self) -> usize {
        self.count.unwrap_or_else(|| self.mode.default_count())
    }
}

/// Timestamp key → one-element record list, keys kept sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: BTreeMap<String, Vec<Record>>,
    collisions: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` under `key`, replacing any earlier entry.
    /// Returns `true` if the key was already present.
    pub fn insert(&mut self, key: String, record: Record) -> bool {
        let replaced = self.entries.insert(key, vec![record]).is_some();
        if replaced {
            self.collisions += 1;
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of inserts that overwrote an existing key.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn get(&self, key: &str) -> Option<&[Record]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn to_value(&self) -> Value {
        Value::Map(
            self.entries
                .iter()
                .map(|(key, records)| {
                    let items = records.iter().map(Record::to_value).collect();
                    (key.clone(), Value::Seq(items))
                })
                .collect(),
        )
    }
}

/// Run the generation loop against the given RNG and clock.
pub fn generate<R, C>(config: &GeneratorConfig, rng: &mut R, clock: &C) -> Result<Document>
where
    R: Rng + ?Sized,
    C: Clock + ?Sized,
{
    let iterations = config.iterations();
    let mut doc = Document::new();

    for _ in 0..iterations {
        let days = rng.random_range(0..=MAX_DAYS_BACK);
        let seconds = rng.random_range(0..=MAX_SECONDS_BACK);
        let at = clock::offset_back(clock.now(), days, seconds)?;
        let key = clock::format_key(at);
        let record = config.mode.sample(rng);
        if doc.insert(key.clone(), record) {
            debug!(key = %key, "timestamp collision, replacing earlier entry");
        }
    }

    info!(
        mode = config.mode.name(),
        iterations,
        entries = doc.len(),
        collisions = doc.collisions(),
        "generated document"
    );
    Ok(doc)
}

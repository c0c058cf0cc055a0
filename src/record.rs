/// Synthetic log records.
///
/// `Mood` is the happiness + optional sleep record; `Pool` is a copy of one
/// of four fixed sample entries. Both render to a small single-level mapping.
use rand::Rng;

use crate::value::Value;

/// Inclusive happiness range.
pub const HAPPINESS_MIN: i8 = -2;
pub const HAPPINESS_MAX: i8 = 2;

/// Probability that a mood record also carries a `sleep` field.
pub const SLEEP_PROBABILITY: f64 = 0.8;

/// Fixed sample entries for pool mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolEntry {
    /// `sleep: 25m`
    Sleep,
    /// `weight: 78`
    Weight,
    /// `日本語: 1h20m`
    Tagged,
    /// `happiness: +2`
    Happiness,
}

impl PoolEntry {
    pub const ALL: [PoolEntry; 4] = [
        PoolEntry::Sleep,
        PoolEntry::Weight,
        PoolEntry::Tagged,
        PoolEntry::Happiness,
    ];

    /// The entry's single `(field, value)` pair.
    pub fn field(self) -> (&'static str, &'static str) {
        match self {
            PoolEntry::Sleep => ("sleep", "25m"),
            PoolEntry::Weight => ("weight", "78"),
            PoolEntry::Tagged => ("日本語", "1h20m"),
            PoolEntry::Happiness => ("happiness", "+2"),
        }
    }

    /// Uniform draw over `ALL`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Mood {
        happiness: i8,
        /// Hours of sleep, `(4 + happiness) * 2`, when present.
        sleep_hours: Option<u8>,
    },
    Pool(PoolEntry),
}

impl Record {
    /// Draw a mood record: happiness first, then the sleep coin.
    pub fn sample_mood<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let happiness = rng.random_range(HAPPINESS_MIN..=HAPPINESS_MAX);
        let sleep_hours = if rng.random::<f64>() < SLEEP_PROBABILITY {
            sleep_hours_for(happiness)
        } else {
            None
        };
        Record::Mood {
            happiness,
            sleep_hours,
        }
    }

    pub fn sample_pool<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Record::Pool(PoolEntry::sample(rng))
    }

    /// Field/value pairs in emission (sorted) order.
    pub fn fields(&self) -> Vec<(String, Value)> {
        match self {
            Record::Mood {
                happiness,
                sleep_hours,
            } => {
                let mut fields = vec![(
                    "happiness".to_string(),
                    Value::Int(i64::from(*happiness)),
                )];
                if let Some(hours) = sleep_hours {
                    fields.push(("sleep".to_string(), Value::from(format!("{hours}h"))));
                }
                fields
            }
            Record::Pool(entry) => {
                let (key, value) = entry.field();
                vec![(key.to_string(), Value::from(value))]
            }
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Map(self.fields())
    }
}

/// `(4 + happiness) * 2`, 4..=12 over the happiness range. `None` outside
/// `HAPPINESS_MIN..=HAPPINESS_MAX`.
pub fn sleep_hours_for(happiness: i8) -> Option<u8> {
    if !(HAPPINESS_MIN..=HAPPINESS_MAX).contains(&happiness) {
        return None;
    }
    u8::try_from((4 + i16::from(happiness)) * 2).ok()
}

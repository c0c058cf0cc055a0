/// Property tests over seeds, clock instants and iteration counts.
///
/// The iteration count is a library-only knob; the binary always runs the
/// mode default.
use fill::clock::{FixedClock, parse_key};
use fill::generate::{GeneratorConfig, Mode, generate};
use fill::output::{self, OutputConfig};
use fill::record::{PoolEntry, Record, sleep_hours_for};
use jiff::Span;
use jiff::civil::{DateTime, date};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn arb_now() -> impl Strategy<Value = DateTime> {
    (1950i16..2100, 1i8..=12, 1i8..=28, 0i8..24, 0i8..60, 0i8..60)
        .prop_map(|(y, mo, d, h, mi, s)| date(y, mo, d).at(h, mi, s, 0))
}

fn arb_mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Mood), Just(Mode::Pool)]
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn keys_fall_in_window(seed in any::<u64>(), now in arb_now(), mode in arb_mode()) {
        let generator = GeneratorConfig { mode, count: Some(200) };
        let doc = generate(&generator, &mut StdRng::seed_from_u64(seed), &FixedClock(now)).unwrap();
        let floor = now.checked_sub(Span::new().days(366)).unwrap();
        for (key, _) in doc.iter() {
            let at = parse_key(key).unwrap();
            prop_assert!(at <= now);
            prop_assert!(at >= floor);
        }
    }

    #[test]
    fn size_accounts_for_collisions(seed in any::<u64>(), count in 0usize..300, mode in arb_mode()) {
        let generator = GeneratorConfig { mode, count: Some(count) };
        let clock = FixedClock(date(2024, 1, 1).at(0, 0, 0, 0));
        let doc = generate(&generator, &mut StdRng::seed_from_u64(seed), &clock).unwrap();
        prop_assert!(doc.len() <= count);
        prop_assert_eq!(doc.len() + doc.collisions(), count);
    }

    #[test]
    fn records_match_mode(seed in any::<u64>(), mode in arb_mode()) {
        let generator = GeneratorConfig { mode, count: Some(100) };
        let clock = FixedClock(date(2030, 6, 1).at(6, 0, 0, 0));
        let doc = generate(&generator, &mut StdRng::seed_from_u64(seed), &clock).unwrap();
        for (_, records) in doc.iter() {
            prop_assert_eq!(records.len(), 1);
            match (&records[0], mode) {
                (Record::Mood { happiness, sleep_hours }, Mode::Mood) => {
                    prop_assert!((-2..=2).contains(happiness));
                    if let Some(h) = sleep_hours {
                        prop_assert_eq!(Some(*h), sleep_hours_for(*happiness));
                    }
                }
                (Record::Pool(entry), Mode::Pool) => {
                    prop_assert!(PoolEntry::ALL.contains(entry));
                }
                (other, _) => prop_assert!(false, "{:?} in {:?} mode", other, mode),
            }
        }
    }

    #[test]
    fn rendering_is_deterministic(seed in any::<u64>(), now in arb_now()) {
        let generator = GeneratorConfig::default();
        let render = || {
            let doc = generate(&generator, &mut StdRng::seed_from_u64(seed), &FixedClock(now)).unwrap();
            output::to_string(&doc.to_value(), &OutputConfig::default()).unwrap()
        };
        prop_assert_eq!(render(), render());
    }

    #[test]
    fn quoted_output_round_trips(seed in any::<u64>(), mode in arb_mode()) {
        let generator = GeneratorConfig { mode, count: Some(50) };
        let clock = FixedClock(date(2024, 7, 1).at(12, 0, 0, 0));
        let doc = generate(&generator, &mut StdRng::seed_from_u64(seed), &clock).unwrap();
        let keep = OutputConfig { strip_quotes: false, ..Default::default() };
        let text = output::to_string(&doc.to_value(), &keep).unwrap();

        let parsed: std::collections::BTreeMap<String, Vec<std::collections::BTreeMap<String, serde_yaml::Value>>> =
            serde_yaml::from_str(&text).unwrap();
        prop_assert_eq!(parsed.len(), doc.len());
        for (key, records) in doc.iter() {
            let got = &parsed[key];
            prop_assert_eq!(got.len(), 1);
            for (field, value) in records[0].fields() {
                let read = &got[0][&field];
                match value {
                    fill::value::Value::Int(n) => prop_assert_eq!(read.as_i64(), Some(n)),
                    fill::value::Value::String(s) => prop_assert_eq!(read.as_str(), Some(s.as_str())),
                    other => prop_assert!(false, "unexpected field value {:?}", other),
                }
            }
        }
    }
}

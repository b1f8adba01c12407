use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use stocksight_common::{TrackingEvent, TrackingEventType};

use crate::config::TrackingConfig;
use crate::error::Result;

const LABEL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LABEL_LEN: usize = 6;

/// Where live tracking events come from. `None` means the tick produced
/// nothing.
pub trait TrackingSource: Send {
    fn next_event(&mut self, now: DateTime<Utc>) -> Option<TrackingEvent>;
}

/// Fabricates detections the way the mock camera pipeline does.
pub struct RandomTrackingSource<R> {
    config: TrackingConfig,
    rng: R,
}

impl<R: Rng + Send> RandomTrackingSource<R> {
    pub fn new(config: &TrackingConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            rng,
        })
    }

    /// Builds one event unconditionally.
    pub fn generate(&mut self, now: DateTime<Utc>) -> TrackingEvent {
        let event_type = if self.rng.gen_bool(self.config.entry_probability) {
            TrackingEventType::Entry
        } else {
            TrackingEventType::Exit
        };

        let label: String = (0..LABEL_LEN)
            .map(|_| LABEL_ALPHABET[self.rng.gen_range(0..LABEL_ALPHABET.len())] as char)
            .collect();
        let camera = self.rng.gen_range(1..=self.config.camera_count);
        let zone = (b'A' + self.rng.gen_range(0..self.config.zone_count)) as char;
        let confidence = self.rng.gen_range(self.config.min_confidence..1.0);
        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();

        TrackingEvent {
            id: id.to_string(),
            event_type,
            item: format!("Item #{}", label),
            camera: format!("Camera {}", camera),
            zone: format!("Zone {}", zone),
            timestamp: now,
            confidence,
        }
    }
}

impl RandomTrackingSource<StdRng> {
    /// Reproducible source for simulations and tests.
    pub fn seeded(config: &TrackingConfig, seed: u64) -> Result<Self> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> TrackingSource for RandomTrackingSource<R> {
    fn next_event(&mut self, now: DateTime<Utc>) -> Option<TrackingEvent> {
        if self.rng.gen_bool(self.config.event_probability) {
            Some(self.generate(now))
        } else {
            None
        }
    }
}

/// Replays a fixed script of outcomes, one per tick. An exhausted script
/// produces nothing unless it repeats.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: VecDeque<Option<TrackingEventType>>,
    repeat: Option<TrackingEventType>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Option<TrackingEventType>>,
    {
        Self {
            script: script.into_iter().collect(),
            repeat: None,
            consumed: 0,
        }
    }

    pub fn repeating(event_type: TrackingEventType) -> Self {
        Self {
            script: VecDeque::new(),
            repeat: Some(event_type),
            consumed: 0,
        }
    }

    /// Ticks answered so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Scripted outcomes not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TrackingSource for ScriptedSource {
    fn next_event(&mut self, now: DateTime<Utc>) -> Option<TrackingEvent> {
        let outcome = match self.script.pop_front() {
            Some(outcome) => outcome,
            None => self.repeat,
        };
        self.consumed += 1;

        outcome.map(|event_type| TrackingEvent {
            id: format!("scripted-{}", self.consumed),
            event_type,
            item: format!("Item #{:06}", self.consumed),
            camera: "Camera 1".to_string(),
            zone: "Zone A".to_string(),
            timestamp: now,
            confidence: 0.9,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;
    use proptest::prelude::*;

    #[test]
    fn invalid_config_is_rejected() {
        let config = TrackingConfig {
            event_probability: 1.5,
            ..TrackingConfig::default()
        };
        assert!(matches!(
            RandomTrackingSource::seeded(&config, 1),
            Err(MonitorError::ConfigError(_))
        ));
    }

    #[test]
    fn same_seed_same_events() {
        let config = TrackingConfig::default();
        let now = Utc::now();
        let mut a = RandomTrackingSource::seeded(&config, 42).unwrap();
        let mut b = RandomTrackingSource::seeded(&config, 42).unwrap();
        for _ in 0..20 {
            assert_eq!(a.next_event(now), b.next_event(now));
        }
    }

    #[test]
    fn probability_extremes() {
        let now = Utc::now();
        let never = TrackingConfig {
            event_probability: 0.0,
            ..TrackingConfig::default()
        };
        let mut source = RandomTrackingSource::seeded(&never, 7).unwrap();
        assert!((0..50).all(|_| source.next_event(now).is_none()));

        let always_entry = TrackingConfig {
            event_probability: 1.0,
            entry_probability: 1.0,
            ..TrackingConfig::default()
        };
        let mut source = RandomTrackingSource::seeded(&always_entry, 7).unwrap();
        for _ in 0..50 {
            let event = source.next_event(now).unwrap();
            assert_eq!(event.event_type, TrackingEventType::Entry);
        }
    }

    #[test]
    fn scripted_source_replays_then_repeats() {
        let now = Utc::now();
        let mut source = ScriptedSource::new([Some(TrackingEventType::Exit), None]);
        assert_eq!(
            source.next_event(now).map(|e| e.event_type),
            Some(TrackingEventType::Exit)
        );
        assert!(source.next_event(now).is_none());
        assert!(source.next_event(now).is_none());
        assert_eq!(source.consumed(), 3);
    }

    proptest! {
        #[test]
        fn generated_events_are_well_formed(seed in any::<u64>()) {
            let config = TrackingConfig::default();
            let now = Utc::now();
            let mut source = RandomTrackingSource::seeded(&config, seed).unwrap();
            let event = source.generate(now);

            let label = event.item.strip_prefix("Item #").unwrap();
            prop_assert_eq!(label.len(), 6);
            prop_assert!(label.bytes().all(|b| LABEL_ALPHABET.contains(&b)));

            let camera: u32 = event.camera.strip_prefix("Camera ").unwrap().parse().unwrap();
            prop_assert!((1..=4).contains(&camera));
            prop_assert!(["Zone A", "Zone B", "Zone C", "Zone D"].contains(&event.zone.as_str()));
            prop_assert!((0.8..1.0).contains(&event.confidence));
            prop_assert_eq!(event.timestamp, now);
            prop_assert!(uuid::Uuid::parse_str(&event.id).is_ok());
        }
    }
}

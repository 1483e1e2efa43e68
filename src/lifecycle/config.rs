//! Run configuration and the family cast.

use std::time::Duration;
use thiserror::Error;

use crate::actors::{ActorPolicy, Role};

/// Errors from configuring the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Invalid value for {key}: {value:?}")]
    Config { key: &'static str, value: String },
}

/// One family member and the role they play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    pub role: Role,
}

impl CastMember {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), role }
    }
}

/// The usual Sunday lineup.
pub fn family_cast() -> Vec<CastMember> {
    vec![
        CastMember::new("Head Cook", Role::MainCook),
        CastMember::new("Uncle Alfonso", Role::Meddler),
        CastMember::new("Uncle Ariel", Role::Meddler),
        CastMember::new("Uncle Rodrigo", Role::Meddler),
        CastMember::new("Cousin Maxi", Role::Thief),
        CastMember::new("Cousin Sebastian", Role::Thief),
        CastMember::new("Grandma Vivi", Role::Seasoner),
    ]
}

#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// How long the cookout lasts.
    pub duration: Duration,
    /// Seed for every actor's random source. Actor `i` uses `seed + i`.
    pub seed: Option<u64>,
    /// Divides every actor timing; 1 is real time.
    pub time_scale: u64,
    /// How long shutdown waits for each actor before aborting it.
    pub join_grace: Duration,
    /// How often the charcoal burns down.
    pub charcoal_tick: Duration,
    pub cast: Vec<CastMember>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(60),
            seed: None,
            time_scale: 1,
            join_grace: Duration::from_secs(1),
            charcoal_tick: Duration::from_secs(2),
            cast: family_cast(),
        }
    }
}

impl SystemConfig {
    /// Defaults, overridden by `GRILL_DURATION_SECS`, `GRILL_SEED` and `GRILL_TIME_SCALE`.
    pub fn from_env() -> Result<Self, SystemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SystemError> {
        let mut config = Self::default();
        if let Some(secs) = parse_var(&lookup, "GRILL_DURATION_SECS")? {
            config.duration = Duration::from_secs(secs);
        }
        config.seed = parse_var(&lookup, "GRILL_SEED")?;
        if let Some(scale) = parse_var(&lookup, "GRILL_TIME_SCALE")? {
            let invalid = || SystemError::Config {
                key: "GRILL_TIME_SCALE",
                value: scale.to_string(),
            };
            if scale == 0 || scale > config.max_time_scale() {
                return Err(invalid());
            }
            let divisor = u32::try_from(scale).map_err(|_| invalid())?;
            config.time_scale = scale;
            config.charcoal_tick /= divisor;
        }
        Ok(config)
    }

    /// Largest time scale that keeps the charcoal tick and every cast
    /// member's timings at 1 ms or more.
    pub fn max_time_scale(&self) -> u64 {
        let tick_ms = u64::try_from(self.charcoal_tick.as_millis()).unwrap_or(u64::MAX);
        self.cast
            .iter()
            .map(|member| ActorPolicy::for_role(member.role).shortest_ms())
            .fold(tick_ms, u64::min)
            .max(1)
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<u64>, SystemError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SystemError::Config { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SystemConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.duration, Duration::from_secs(60));
        assert_eq!(config.seed, None);
        assert_eq!(config.cast.len(), 7);
    }

    #[test]
    fn test_overrides() {
        let config = SystemConfig::from_lookup(lookup(&[
            ("GRILL_DURATION_SECS", "5"),
            ("GRILL_SEED", "42"),
            ("GRILL_TIME_SCALE", "10"),
        ]))
        .unwrap();
        assert_eq!(config.duration, Duration::from_secs(5));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.time_scale, 10);
        assert_eq!(config.charcoal_tick, Duration::from_millis(200));
    }

    #[test]
    fn test_rejects_garbage() {
        let err = SystemConfig::from_lookup(lookup(&[("GRILL_SEED", "lots")])).unwrap_err();
        assert!(matches!(err, SystemError::Config { key: "GRILL_SEED", .. }));
        let err = SystemConfig::from_lookup(lookup(&[("GRILL_TIME_SCALE", "0")])).unwrap_err();
        assert!(matches!(err, SystemError::Config { key: "GRILL_TIME_SCALE", .. }));
    }

    #[test]
    fn test_rejects_scales_that_collapse_timings() {
        for huge in ["4294967296", "4000000000", "201"] {
            let err = SystemConfig::from_lookup(lookup(&[("GRILL_TIME_SCALE", huge)])).unwrap_err();
            assert!(matches!(err, SystemError::Config { key: "GRILL_TIME_SCALE", .. }), "{huge}");
        }
    }

    #[test]
    fn test_fastest_scale_keeps_every_timing_positive() {
        let config = SystemConfig::from_lookup(lookup(&[("GRILL_TIME_SCALE", "200")])).unwrap();
        assert_eq!(config.max_time_scale(), 200);
        assert_eq!(config.charcoal_tick, Duration::from_millis(10));
        for member in &config.cast {
            let policy = ActorPolicy::for_role(member.role).scaled(config.time_scale);
            assert!(policy.shortest_ms() >= 1, "{}", member.name);
        }
    }
}

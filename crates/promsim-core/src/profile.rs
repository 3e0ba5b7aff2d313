//! Endpoint profiles keyed by (path, method).
//!
//! The table is built once at startup and never mutated afterwards; the
//! harness shares it behind an `Arc`.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PromsimError, Result};

/// Static latency/error/outage parameters of one (path, method) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointProfile {
    /// Latency before outage scaling and noise.
    pub base_latency: Duration,
    /// Probability in `[0, 1]` that a request fails outside an outage.
    pub error_ratio: f64,
    /// Length of one outage window. A window opens every `10 * outage_duration`.
    pub outage_duration: Duration,
}

impl EndpointProfile {
    pub const fn new(base_latency: Duration, error_ratio: f64, outage_duration: Duration) -> Self {
        Self {
            base_latency,
            error_ratio,
            outage_duration,
        }
    }
}

/// Result of resolving a request against the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a EndpointProfile),
    /// No profile for this path at all (404).
    UnknownPath,
    /// Path is known, method is not (405).
    MethodNotAllowed,
}

/// path -> method -> profile
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    paths: HashMap<String, HashMap<String, EndpointProfile>>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four simulated endpoints.
    pub fn builtin() -> Self {
        let mut t = Self::new();
        let ms = Duration::from_millis;
        let secs = Duration::from_secs;
        let entries = [
            ("/api/foo", "GET", EndpointProfile::new(ms(10), 0.005, secs(23))),
            ("/api/foo", "POST", EndpointProfile::new(ms(20), 0.02, secs(60))),
            ("/api/bar", "GET", EndpointProfile::new(ms(15), 0.0025, secs(13))),
            ("/api/bar", "POST", EndpointProfile::new(ms(50), 0.01, secs(47))),
        ];
        for (path, method, profile) in entries {
            t.paths
                .entry(path.to_string())
                .or_default()
                .insert(method.to_string(), profile);
        }
        t
    }

    /// Add or replace a profile after validating its parameters.
    pub fn insert(&mut self, path: &str, method: &str, profile: EndpointProfile) -> Result<()> {
        let invalid = |reason: &str| PromsimError::InvalidProfile {
            path: path.to_string(),
            method: method.to_string(),
            reason: reason.to_string(),
        };

        if !(0.0..=1.0).contains(&profile.error_ratio) {
            return Err(invalid("error_ratio must be within [0, 1]"));
        }
        if profile.outage_duration.is_zero() {
            return Err(invalid("outage_duration must be non-zero"));
        }

        tracing::debug!(path, method, ?profile, "profile registered");
        self.paths
            .entry(path.to_string())
            .or_default()
            .insert(method.to_ascii_uppercase(), profile);
        Ok(())
    }

    pub fn lookup(&self, path: &str, method: &str) -> Lookup<'_> {
        let Some(methods) = self.paths.get(path) else {
            return Lookup::UnknownPath;
        };
        match methods.get(method) {
            Some(p) => Lookup::Found(p),
            None => Lookup::MethodNotAllowed,
        }
    }

    /// Number of (path, method) pairs.
    pub fn len(&self) -> usize {
        self.paths.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(path, method, profile)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &EndpointProfile)> {
        self.paths.iter().flat_map(|(path, methods)| {
            methods
                .iter()
                .map(move |(method, p)| (path.as_str(), method.as_str(), p))
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn builtin_has_four_profiles() {
        let t = ProfileTable::builtin();
        assert_eq!(t.len(), 4);
        match t.lookup("/api/foo", "GET") {
            Lookup::Found(p) => {
                assert_eq!(p.base_latency, Duration::from_millis(10));
                assert_eq!(p.error_ratio, 0.005);
                assert_eq!(p.outage_duration, Duration::from_secs(23));
            }
            other => panic!("unexpected lookup: {other:?}"),
        }
    }

    #[test]
    fn lookup_misses() {
        let t = ProfileTable::builtin();
        assert_eq!(t.lookup("/api/baz", "GET"), Lookup::UnknownPath);
        assert_eq!(t.lookup("/api/foo", "DELETE"), Lookup::MethodNotAllowed);
        // Methods are matched as sent on the wire.
        assert_eq!(t.lookup("/api/foo", "get"), Lookup::MethodNotAllowed);
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut t = ProfileTable::new();
        let bad_ratio = EndpointProfile::new(Duration::from_millis(1), 1.5, Duration::from_secs(1));
        assert!(t.insert("/x", "GET", bad_ratio).is_err());

        let no_outage = EndpointProfile::new(Duration::from_millis(1), 0.1, Duration::ZERO);
        assert!(t.insert("/x", "GET", no_outage).is_err());

        let ok = EndpointProfile::new(Duration::from_millis(1), 0.1, Duration::from_secs(1));
        t.insert("/x", "get", ok).unwrap();
        assert_eq!(t.lookup("/x", "GET"), Lookup::Found(&ok));
    }
}

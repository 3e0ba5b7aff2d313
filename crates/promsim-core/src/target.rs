//! Fixed request targets driven by the load oscillator.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One client loop: what to request and how long to pause (before oscillation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub method: Method,
    pub path: String,
    pub base_interval: Duration,
}

impl Target {
    pub fn new(method: Method, path: impl Into<String>, base_interval: Duration) -> Self {
        Self {
            method,
            path: path.into(),
            base_interval,
        }
    }

    /// The five default loops. `/api/nonexistent` exercises the 404 path.
    pub fn builtin() -> Vec<Target> {
        let ms = Duration::from_millis;
        vec![
            Target::new(Method::Get, "/api/foo", ms(10)),
            Target::new(Method::Post, "/api/foo", ms(150)),
            Target::new(Method::Get, "/api/bar", ms(20)),
            Target::new(Method::Post, "/api/bar", ms(100)),
            Target::new(Method::Get, "/api/nonexistent", ms(500)),
        ]
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

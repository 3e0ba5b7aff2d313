#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use promsim_core::error::ErrorKind;
use promsim_harness::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: ":8080"
client:
  oscilation_period_ms: 60000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, ":8080");
    assert_eq!(cfg.client.oscillation_period(), Duration::from_secs(300));
    assert!(cfg.client.enabled);
    assert_eq!(cfg.simulator.seed, None);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9090"
client:
  oscillation_period_ms: 60000
  enabled: false
simulator:
  seed: 42
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.bind_addr().unwrap(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
    assert_eq!(cfg.client.oscillation_period(), Duration::from_secs(60));
    assert!(!cfg.client.enabled);
    assert_eq!(cfg.simulator.seed, Some(42));
}

#[test]
fn rejects_bad_version_and_ranges() {
    assert!(config::load_from_str("version: 2\n").is_err());
    assert!(config::load_from_str("version: 1\nclient:\n  oscillation_period_ms: 0\n").is_err());
    assert!(
        config::load_from_str("version: 1\nclient:\n  oscillation_period_ms: 86400001\n").is_err()
    );
    assert!(config::load_from_str("version: 1\nserver:\n  listen: \"nope\"\n").is_err());
}

#[test]
fn port_only_listen_binds_wildcard_and_dials_loopback() {
    let bound = config::parse_listen(":8080").unwrap();
    assert_eq!(bound, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    assert_eq!(
        config::dial_addr(bound),
        "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
    );

    let explicit: SocketAddr = "10.1.2.3:81".parse().unwrap();
    assert_eq!(config::dial_addr(explicit), explicit);
}

#[test]
fn sub_second_periods_keep_their_precision() {
    let cfg = config::load_from_str("version: 1\nclient:\n  oscillation_period_ms: 500\n")
        .expect("must parse");
    assert_eq!(cfg.client.oscillation_period(), Duration::from_millis(500));

    let mut client = config::ClientSection::default();
    client.set_oscillation_period(humantime::parse_duration("1500ms").unwrap());
    client.validate().unwrap();
    assert_eq!(client.oscillation_period(), Duration::from_millis(1500));

    client.set_oscillation_period(Duration::from_secs(86_400));
    client.validate().unwrap();
    client.set_oscillation_period(Duration::from_secs(86_401));
    assert!(client.validate().is_err());
}

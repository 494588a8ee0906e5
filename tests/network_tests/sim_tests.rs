//! End-to-end tests over UDP
//!
//! A real `TelloClient` talking to a `SimPeer` on localhost.

use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use tello_command::network::{SimBehavior, SimHandle, SimPeer};
use tello_command::{Config, TelloClient, TelloError};

const WAIT: Duration = Duration::from_secs(2);

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_sim(behavior: SimBehavior) -> (SimHandle, Config) {
    let peer = SimPeer::bind("127.0.0.1:0", behavior).unwrap();
    let addr = peer.local_addr().unwrap();
    let handle = peer.spawn().unwrap();

    let config = Config::builder()
        .peer(addr)
        .bind_addr("127.0.0.1:0")
        .response_timeout_ms(1000)
        .build();
    (handle, config)
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_session_against_sim() {
    let (sim, config) = setup_sim(SimBehavior::default());
    let mut client = TelloClient::new(config);

    assert_eq!(client.connect_and_initialize().unwrap(), "ok");
    assert_eq!(client.takeoff().unwrap(), "ok");
    assert_eq!(client.fly_up(100).unwrap(), "ok");
    assert_eq!(client.rotate_clockwise(90).unwrap(), "ok");
    assert_eq!(client.flip('l').unwrap(), "ok");
    assert_eq!(client.land().unwrap(), "ok");
    client.disconnect().unwrap();

    let mut received = Vec::new();
    while received.len() < 6 {
        received.push(sim.next_received(WAIT).expect("sim should receive every command"));
    }
    assert_eq!(received, vec!["command", "takeoff", "up 100", "cw 90", "flip l", "land"]);

    sim.shutdown();
}

#[test]
fn test_fixed_acknowledgment_passed_through() {
    let behavior = SimBehavior {
        ack: "ack: Done.".to_string(),
        ..SimBehavior::default()
    };
    let (_sim, config) = setup_sim(behavior);
    let mut client = TelloClient::new(config);
    client.connect_and_initialize().unwrap();

    let ack = client.set_speed(55).unwrap();
    assert_eq!(ack.as_str(), "ack: Done.");
    assert_eq!(ack.bytes_sent(), "speed 55".len());
}

#[test]
fn test_raw_command_gets_error_reply() {
    let (sim, config) = setup_sim(SimBehavior::default());
    let mut client = TelloClient::new(config);
    client.connect_and_initialize().unwrap();

    assert_eq!(client.send_command("up 9000").unwrap(), "error");
    assert_eq!(client.send_command("hover").unwrap(), "error");

    let received = sim.drain_received();
    assert!(received.contains(&"up 9000".to_string()));
}

// =============================================================================
// Failure Tests
// =============================================================================

#[test]
fn test_silent_peer_times_out() {
    let behavior = SimBehavior {
        silent: true,
        ..SimBehavior::default()
    };
    let (_sim, config) = setup_sim(behavior);
    let config = Config {
        response_timeout_ms: 100,
        ..config
    };
    let mut client = TelloClient::new(config);
    client.connect().unwrap();

    let err = client.initialize_command_mode().unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert!(client.is_connected());
}

#[test]
fn test_late_reply_not_misattributed() {
    let (sim, config) = setup_sim(SimBehavior::default());
    let config = Config {
        response_timeout_ms: 100,
        ..config
    };
    let mut client = TelloClient::new(config);
    client.connect_and_initialize().unwrap();

    sim.set_behavior(SimBehavior {
        ack: "late".to_string(),
        reply_delay: Duration::from_millis(300),
        ..SimBehavior::default()
    });
    let err = client.takeoff().unwrap_err();
    assert!(err.is_timeout());

    sim.set_behavior(SimBehavior {
        ack: "fresh".to_string(),
        ..SimBehavior::default()
    });
    // Let the delayed reply land in the socket buffer
    thread::sleep(Duration::from_millis(500));

    assert_eq!(client.land().unwrap(), "fresh");
}

#[test]
fn test_operations_after_disconnect_fail() {
    let (_sim, config) = setup_sim(SimBehavior::default());
    let mut client = TelloClient::new(config);
    client.connect_and_initialize().unwrap();
    client.disconnect().unwrap();

    assert!(matches!(client.takeoff(), Err(TelloError::NotConnected)));
    client.disconnect().unwrap();
}

#[test]
fn test_unresolvable_host_is_config_error() {
    let config = Config::builder().host("no such host!").port(8889).build();
    let mut client = TelloClient::new(config);
    assert!(matches!(client.connect(), Err(TelloError::Config(_))));
}

#[test]
fn test_multiple_clients_coexist() {
    let (sim, config) = setup_sim(SimBehavior::default());
    let mut first = TelloClient::new(config.clone());
    let mut second = TelloClient::new(config);

    first.connect_and_initialize().unwrap();
    second.connect_and_initialize().unwrap();
    assert_eq!(first.fly_forward(20).unwrap(), "ok");
    assert_eq!(second.fly_backward(20).unwrap(), "ok");

    first.disconnect().unwrap();
    assert_eq!(second.stop().unwrap(), "ok");
    sim.shutdown();
}

#[test]
fn test_udp_transport_binds_locally() {
    // Sanity check that the bind address is honored
    let probe = UdpSocket::bind("127.0.0.1:0").unwrap();
    let config = Config::builder()
        .peer(probe.local_addr().unwrap())
        .bind_addr("127.0.0.1:0")
        .response_timeout_ms(50)
        .build();
    let mut client = TelloClient::new(config);
    client.connect().unwrap();

    let err = client.send_command("command").unwrap_err();
    assert!(err.is_timeout());

    let mut buf = [0u8; 64];
    probe.set_read_timeout(Some(WAIT)).unwrap();
    let (len, from) = probe.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..len], b"command");
    assert!(from.ip().is_loopback());
}

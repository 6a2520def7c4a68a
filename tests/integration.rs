//! End-to-end tests for the command proxy and event monitor
//!
//! Each test spins up a throwaway TCP endpoint on an ephemeral port and runs
//! the real client code against it, the way the mock-radio binary would be
//! used by hand.

use std::io::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

use radioctl::map::AddressMap;
use radioctl::monitor::EventMonitor;
use radioctl::proxy::{CommandKind, CommandProxy};
use radioctl::Error;

const MAP_CSV: &str = "engine,component,parameter,name\n\
    phyengine1,usrprx1,frequency,frequency\n\
    phyengine1,usrprx1,rate,rate\n\
    phyengine1,usrprx1,gain,gain\n\
    phyengine1,usrprx1,bandwidth,bandwidth\n";

fn test_map() -> AddressMap {
    let mut file = tempfile::NamedTempFile::new().expect("temp csv");
    file.write_all(MAP_CSV.as_bytes()).expect("write csv");
    AddressMap::load(file.path()).expect("load map")
}

/// One-shot endpoint that records the received message and answers with
/// fixed bytes
async fn spawn_endpoint(reply: &'static [u8]) -> (u16, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind endpoint");
    let port = listener.local_addr().expect("local addr").port();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let mut buf = vec![0u8; 256];
        let n = stream.read(&mut buf).await.expect("read message");
        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).into_owned());
        stream.write_all(reply).await.expect("write reply");
    });

    (port, rx)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached within 2s"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn set_builds_the_exact_wire_message() {
    let (port, received) = spawn_endpoint(b"ack1").await;
    let proxy = CommandProxy::new("127.0.0.1", port, test_map());

    let reply = proxy
        .send(CommandKind::Set, "frequency", Some("2800000000"))
        .await
        .expect("send");

    assert_eq!(reply, "ack1");
    assert_eq!(
        received.await.expect("message"),
        "set:phyengine1.usrprx1.frequency=2800000000"
    );
}

#[tokio::test]
async fn get_returns_the_reply_and_ignores_any_value() {
    let (port, received) = spawn_endpoint(b"ack1").await;
    let proxy = CommandProxy::new("127.0.0.1", port, test_map());

    let reply = proxy
        .send(CommandKind::Get, "gain", Some("ignored"))
        .await
        .expect("send");

    assert_eq!(reply, "ack1");
    assert_eq!(received.await.expect("message"), "get:phyengine1.usrprx1.gain");
}

#[tokio::test]
async fn fixed_logical_names_map_to_set_commands() {
    let (port, received) = spawn_endpoint(b"ack1").await;
    let proxy = CommandProxy::new("127.0.0.1", port, test_map());

    proxy.set_frequency(2_800_000_000).await.expect("send");

    assert_eq!(
        received.await.expect("message"),
        "set:phyengine1.usrprx1.frequency=2800000000"
    );
}

#[tokio::test]
async fn unknown_parameter_performs_no_network_io() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind endpoint");
    let port = listener.local_addr().expect("local addr").port();
    let connected = Arc::new(AtomicBool::new(false));

    let flag = Arc::clone(&connected);
    tokio::spawn(async move {
        if listener.accept().await.is_ok() {
            flag.store(true, Ordering::SeqCst);
        }
    });

    let proxy = CommandProxy::new("127.0.0.1", port, test_map());
    let err = proxy
        .send(CommandKind::Get, "azimuth", None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::UnknownParameter(name) if name == "azimuth"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        !connected.load(Ordering::SeqCst),
        "proxy opened a connection for an unknown parameter"
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_connection_failed() {
    // Bind and drop to find a port nothing is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);

    let proxy = CommandProxy::new("127.0.0.1", port, test_map());
    let err = proxy.send(CommandKind::Get, "rate", None).await.unwrap_err();

    assert!(
        matches!(err, Error::ConnectionFailed(_)),
        "expected ConnectionFailed, got {err:?}"
    );
}

#[tokio::test]
async fn truncated_reply_is_a_short_reply() {
    let (port, _received) = spawn_endpoint(b"ok").await;
    let proxy = CommandProxy::new("127.0.0.1", port, test_map());

    let err = proxy
        .send(CommandKind::Get, "bandwidth", None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::ShortReply { expected: 4, got: 2 }),
        "expected ShortReply, got {err:?}"
    );
}

#[tokio::test]
async fn monitor_classifies_event_markers() {
    let monitor = EventMonitor::bind("127.0.0.1", 0, 64)
        .await
        .expect("bind monitor");
    let counters = monitor.counters();

    let mut stream = TcpStream::connect(monitor.local_addr())
        .await
        .expect("connect");

    stream.write_all(b"1").await.expect("write tx marker");
    wait_until(|| counters.tx_count() == 1).await;
    assert_eq!(counters.rx_count(), 0);

    stream.write_all(b"2").await.expect("write rx marker");
    wait_until(|| counters.rx_count() == 1).await;
    assert_eq!(counters.tx_count(), 1);

    stream.write_all(b"x").await.expect("write junk");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(counters.tx_count(), 1);
    assert_eq!(counters.rx_count(), 1);

    monitor.shutdown().await;

    // The worker closed our connection on the way out
    let mut buf = [0u8; 1];
    match stream.read(&mut buf).await {
        Ok(0) | Err(_) => {}
        Ok(n) => panic!("unexpected {n} bytes after shutdown"),
    }
}

#[tokio::test]
async fn monitor_counts_across_multiple_connections() {
    let monitor = EventMonitor::bind("127.0.0.1", 0, 64)
        .await
        .expect("bind monitor");
    let counters = monitor.counters();

    for _ in 0..3 {
        let mut stream = TcpStream::connect(monitor.local_addr())
            .await
            .expect("connect");
        stream.write_all(b"1").await.expect("write");
        // Dropping the stream ends that connection's read loop
    }

    wait_until(|| counters.tx_count() == 3).await;
    assert_eq!(counters.rx_count(), 0);

    monitor.shutdown().await;
}

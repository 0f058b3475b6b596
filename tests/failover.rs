//! Integration tests over real sockets and processes.

mod common;

use std::time::Duration;

use peerguard::command::{CommandOutcome, Executor};
use peerguard::config::NodeConfig;
use peerguard::failover::{FailoverMachine, Role};
use peerguard::lifecycle::Shutdown;
use peerguard::net::{listener, Prober};
use tokio::net::TcpStream;
use tokio::time::sleep;

fn test_config(local: &str, peer: &str, role: Role, fallback: bool) -> NodeConfig {
    NodeConfig {
        local_addr: local.to_string(),
        peer_addr: peer.to_string(),
        probe_interval_secs: 1,
        failure_threshold: 1,
        command_interval_secs: 1,
        bind_budget_secs: 1,
        bind_retry_wait_secs: 1,
        initial_role: role,
        fallback,
        command: "true".to_string(),
    }
}

#[tokio::test]
async fn probe_reports_live_and_dead_peers() {
    let (_guard, addr) = common::occupy_port().await;
    let prober = Prober::new(Duration::from_millis(500));
    assert!(prober.probe(&addr.to_string()).await);

    let dead = common::free_port().await;
    assert!(!prober.probe(&dead.to_string()).await);
}

#[tokio::test]
async fn probe_collapses_dns_failure_to_false() {
    let prober = Prober::new(Duration::from_millis(500));
    assert!(!prober.probe("no-such-host.invalid:1").await);
}

#[tokio::test]
async fn listener_accepts_and_discards_probe_connections() {
    let addr = common::free_port().await;
    let handle = listener::start_once(&addr.to_string())
        .await
        .expect("bind should succeed on a free port");

    // The handshake works and the connection is closed without any payload.
    let stream = TcpStream::connect(addr).await.expect("probe connect");
    drop(stream);
    assert!(
        TcpStream::connect(addr).await.is_ok(),
        "listener keeps accepting"
    );

    handle.stop().await;
    sleep(Duration::from_millis(100)).await;
    assert!(
        !common::can_connect(addr).await,
        "port released after stop"
    );
}

#[tokio::test]
async fn bind_retry_exhausts_budget_and_returns_none() {
    let (_guard, addr) = common::occupy_port().await;
    let started = tokio::time::Instant::now();
    let handle = listener::start(
        &addr.to_string(),
        Duration::from_millis(300),
        Duration::from_millis(100),
    )
    .await;
    assert!(handle.is_none(), "occupied port must exhaust the budget");

    // floor(300 / 100) = 3 attempts with 2 waits in between.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(600));
}

#[tokio::test]
async fn zero_attempt_budget_gives_up_immediately() {
    let (_guard, addr) = common::occupy_port().await;
    let handle = listener::start(
        &addr.to_string(),
        Duration::from_millis(50),
        Duration::from_millis(100),
    )
    .await;
    assert!(handle.is_none());
}

#[tokio::test]
async fn executor_reports_exit_codes() {
    assert_eq!(Executor::new("exit 0").run().await, CommandOutcome::Exited(0));
    assert_eq!(Executor::new("exit 3").run().await, CommandOutcome::Exited(3));
}

#[cfg(unix)]
#[tokio::test]
async fn executor_reports_signal_termination() {
    assert_eq!(
        Executor::new("kill -9 $$").run().await,
        CommandOutcome::Signaled(9)
    );
}

#[tokio::test]
async fn supervisor_promotes_and_serves_probes_when_peer_is_gone() {
    let local = common::free_port().await;
    // Nobody ever listens on the peer port.
    let peer = common::free_port().await;

    let config = test_config(
        &local.to_string(),
        &peer.to_string(),
        Role::Supervisor,
        false,
    );
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(FailoverMachine::new(config).run(rx));

    // Threshold 1: promotion at the second failed probe's decision point,
    // then the worker binds its liveness port.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    let mut live = false;
    while tokio::time::Instant::now() < deadline {
        if common::can_connect(local).await {
            live = true;
            break;
        }
        sleep(Duration::from_millis(200)).await;
    }
    assert!(live, "promoted node should expose its liveness port");

    shutdown.trigger();
    task.await.unwrap();
}

#[tokio::test]
async fn worker_with_fallback_demotes_when_peer_reappears() {
    let local = common::free_port().await;
    // The peer is already alive when this node starts as worker.
    let (peer_guard, peer) = common::occupy_port().await;

    let config = test_config(&local.to_string(), &peer.to_string(), Role::Worker, true);
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(FailoverMachine::new(config).run(rx));

    // The first worker iteration sees the live peer, stops its listener and
    // demotes without running the command; the local port must not stay open.
    sleep(Duration::from_secs(3)).await;
    assert!(
        !common::can_connect(local).await,
        "demoted node must not keep its listener"
    );

    drop(peer_guard);
    shutdown.trigger();
    task.await.unwrap();
}

#[tokio::test]
async fn worker_runs_the_command_on_its_interval() {
    let local = common::free_port().await;
    let peer = common::free_port().await;

    let marker = std::env::temp_dir().join(format!(
        "peerguard-worker-cmd-{}-{}",
        std::process::id(),
        local.port()
    ));
    let _ = std::fs::remove_file(&marker);

    let mut config = test_config(&local.to_string(), &peer.to_string(), Role::Worker, false);
    config.command = format!("touch {}", marker.display());

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let task = tokio::spawn(FailoverMachine::new(config).run(rx));

    sleep(Duration::from_secs(2)).await;
    assert!(marker.exists(), "worker should have executed the command");

    shutdown.trigger();
    task.await.unwrap();
    let _ = std::fs::remove_file(&marker);
}

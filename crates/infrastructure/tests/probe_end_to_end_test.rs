use dnssec_probe_application::ports::TelemetrySink;
use dnssec_probe_application::use_cases::{
    ProbeRun, RunAllProbesUseCase, SendTcpQueryUseCase, SendUdpQueryUseCase,
};
use dnssec_probe_domain::{AttemptKey, ProbePlan, ReasonCode, RecordType};
use dnssec_probe_infrastructure::dns::{MessageBuilder, TcpTransport, UdpTransport};
use dnssec_probe_infrastructure::telemetry::TelemetryEmitter;
use std::sync::Arc;
use std::time::Duration;

mod helpers;
use helpers::{closed_port, MockTcpServer, MockUdpServer, TcpBehavior};

const TIMEOUT: Duration = Duration::from_millis(300);

fn use_cases(emitter: &TelemetryEmitter) -> (Arc<SendUdpQueryUseCase>, Arc<SendTcpQueryUseCase>) {
    let encoder = Arc::new(MessageBuilder::default());
    let sink: Arc<dyn TelemetrySink> = Arc::new(emitter.clone());
    let udp = Arc::new(SendUdpQueryUseCase::new(
        encoder.clone(),
        Arc::new(UdpTransport::new(TIMEOUT)),
        sink.clone(),
    ));
    let tcp = Arc::new(SendTcpQueryUseCase::new(
        encoder,
        Arc::new(TcpTransport::new(TIMEOUT)),
        sink,
    ));
    (udp, tcp)
}

#[tokio::test]
async fn test_tcp_falls_through_dead_server_to_live_one() {
    let (emitter, mut rx) = TelemetryEmitter::new_enabled();
    let (_, send_tcp) = use_cases(&emitter);
    let live = MockTcpServer::start(TcpBehavior::Answer).await.unwrap();
    let servers = [closed_port().await, live.nameserver()];
    let mut run = ProbeRun::new(Arc::from("e2e-tcp"));

    send_tcp
        .execute(&mut run, "example.com", &servers, RecordType::HTTPS, false)
        .await
        .unwrap();

    let key = AttemptKey::tcp(RecordType::HTTPS, false);
    assert_eq!(run.state.attempts(&key), 2);
    assert!(run.state.has_response(&key));

    drop(emitter);
    let event = rx.recv().await.unwrap();
    assert_eq!(event.reason, ReasonCode::TcpMisc);
    assert_eq!(event.error_attempt, Some(1));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_full_plan_against_loopback_servers() {
    let (emitter, _rx) = TelemetryEmitter::new_enabled();
    let (send_udp, send_tcp) = use_cases(&emitter);

    // UDP and TCP mocks listen on different ports, so each transport gets its
    // own run against its own nameserver list.
    let udp_server = MockUdpServer::start().await.unwrap();
    let tcp_server = MockTcpServer::start(TcpBehavior::Answer).await.unwrap();

    let udp_only = RunAllProbesUseCase::new(
        send_udp.clone(),
        send_tcp.clone(),
        ProbePlan::default(),
    );
    let state = udp_only
        .execute(Arc::from("e2e-plan"), &[udp_server.nameserver()])
        .await;

    for record_type in RecordType::ALL {
        let key = AttemptKey::udp(record_type, false);
        assert_eq!(state.attempts(&key), 1, "{}", key);
        assert!(state.has_response(&key), "{}", key);
    }
    assert!(state.has_response(&AttemptKey::udp(RecordType::A, true)));

    let mut run = ProbeRun::new(Arc::from("e2e-plan"));
    for step in ProbePlan::default().steps() {
        send_tcp
            .execute(
                &mut run,
                &step.domain,
                &[tcp_server.nameserver()],
                step.record_type,
                step.dnssec_ok,
            )
            .await
            .unwrap();
    }
    for record_type in RecordType::ALL {
        let key = AttemptKey::tcp(record_type, false);
        let response = run.state.response(&key).unwrap();
        let declared = u16::from_be_bytes([response[0], response[1]]) as usize;
        assert_eq!(declared + 2, response.len(), "{}", key);
    }
}

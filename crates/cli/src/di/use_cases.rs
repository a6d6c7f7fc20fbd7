use dnssec_probe_application::ports::{NameserverSource, TelemetrySink};
use dnssec_probe_application::use_cases::{
    RunAllProbesUseCase, RunMeasurementUseCase, SendTcpQueryUseCase, SendUdpQueryUseCase,
};
use dnssec_probe_domain::Config;
use dnssec_probe_infrastructure::dns::{MessageBuilder, TcpTransport, UdpTransport};
use dnssec_probe_infrastructure::measurement_id::RandomMeasurementId;
use dnssec_probe_infrastructure::system::{ResolvConfReader, StaticNameservers};
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub run_measurement: Arc<RunMeasurementUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, telemetry: Arc<dyn TelemetrySink>) -> anyhow::Result<Self> {
        let encoder = Arc::new(MessageBuilder::new(config.probe.udp_payload_size));

        let send_udp = Arc::new(
            SendUdpQueryUseCase::new(
                encoder.clone(),
                Arc::new(UdpTransport::new(config.probe.udp_timeout())),
                telemetry.clone(),
            )
            .with_attempts(config.probe.udp_attempts),
        );
        let send_tcp = Arc::new(SendTcpQueryUseCase::new(
            encoder,
            Arc::new(TcpTransport::new(config.probe.tcp_timeout())),
            telemetry.clone(),
        ));
        let run_all = Arc::new(RunAllProbesUseCase::new(
            send_udp,
            send_tcp,
            config.probe.plan(),
        ));

        Ok(Self {
            run_measurement: Arc::new(RunMeasurementUseCase::new(
                nameserver_source(config)?,
                Arc::new(RandomMeasurementId::new()),
                telemetry,
                run_all,
            )),
        })
    }
}

fn nameserver_source(config: &Config) -> anyhow::Result<Arc<dyn NameserverSource>> {
    if config.nameservers.has_overrides() {
        let servers = config.nameservers.parsed_servers()?;
        info!(count = servers.len(), "Using configured nameservers");
        return Ok(Arc::new(StaticNameservers::new(servers)));
    }

    info!(path = %config.nameservers.resolv_conf_path, "Discovering nameservers");
    Ok(Arc::new(ResolvConfReader::with_path(
        config.nameservers.resolv_conf_path.clone(),
    )))
}

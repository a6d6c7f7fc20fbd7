use super::framing::{FrameStatus, TcpFrameBuffer};
use super::{map_io_error, timeout_error, DEFAULT_TRANSPORT_TIMEOUT};
use async_trait::async_trait;
use dnssec_probe_application::ports::TcpExchange;
use dnssec_probe_domain::dns_message::TCP_LENGTH_PREFIX_LEN;
use dnssec_probe_domain::{DomainError, Nameserver};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const READ_CHUNK_SIZE: usize = 4096;

/// One connection per exchange; nothing is pooled.
pub struct TcpTransport {
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn connect(&self, server_addr: SocketAddr) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(server_addr))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| map_io_error(server_addr, e))?;

        stream
            .set_nodelay(true)
            .map_err(|e| map_io_error(server_addr, e))?;

        Ok(stream)
    }
}

impl Default for TcpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSPORT_TIMEOUT)
    }
}

#[async_trait]
impl TcpExchange for TcpTransport {
    async fn exchange(
        &self,
        nameserver: &Nameserver,
        frame: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        let server_addr = nameserver.socket_addr();
        let mut stream = self.connect(server_addr).await?;

        let result = self.send_and_receive(&mut stream, server_addr, frame).await;

        // The connection ends with the attempt, whatever the outcome.
        if let Err(e) = stream.shutdown().await {
            debug!(server = %server_addr, error = %e, "TCP shutdown failed");
        }

        result
    }
}

impl TcpTransport {
    async fn send_and_receive(
        &self,
        stream: &mut TcpStream,
        server_addr: SocketAddr,
        frame: &[u8],
    ) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(self.timeout, write_frame(stream, frame))
            .await
            .map_err(|_| timeout_error(server_addr))?
            .map_err(|e| map_io_error(server_addr, e))?;

        debug!(
            server = %server_addr,
            frame_len = frame.len(),
            "TCP query sent"
        );

        let response = tokio::time::timeout(self.timeout, read_frame(stream, server_addr))
            .await
            .map_err(|_| timeout_error(server_addr))??;

        debug!(
            server = %server_addr,
            response_len = response.len(),
            "TCP response received"
        );

        Ok(response)
    }
}

async fn write_frame<S>(stream: &mut S, frame: &[u8]) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    stream.write_all(frame).await?;
    stream.flush().await
}

/// Reads until the frame buffer reports completion or an overrun.
pub(crate) async fn read_frame<S>(
    stream: &mut S,
    server_addr: SocketAddr,
) -> Result<Vec<u8>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut buffer = TcpFrameBuffer::new();
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = stream
            .read(&mut chunk)
            .await
            .map_err(|e| map_io_error(server_addr, e))?;

        if n == 0 {
            return Err(DomainError::ConnectionClosed {
                server: server_addr.to_string(),
                received: buffer.received(),
                expected: buffer.expected_len().unwrap_or(TCP_LENGTH_PREFIX_LEN),
            });
        }

        if buffer.push(&chunk[..n])? == FrameStatus::Complete {
            return Ok(buffer.into_bytes());
        }
    }
}

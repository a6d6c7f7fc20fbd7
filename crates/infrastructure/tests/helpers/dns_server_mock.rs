#![allow(dead_code)]
use dnssec_probe_domain::Nameserver;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::{mpsc, oneshot};

fn nameserver_for(addr: SocketAddr) -> Nameserver {
    match addr {
        SocketAddr::V4(v4) => Nameserver::from(v4),
        SocketAddr::V6(_) => panic!("mock servers bind IPv4 loopback"),
    }
}

/// Minimal answer: query ID echoed, QR|RD|RA, question copied, no records.
pub fn mock_response(query: &[u8]) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(query.len());
    response.extend_from_slice(&query[0..2]);
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&query[4..]);
    response
}

// ── UDP ─────────────────────────────────────────────────────────────────────

pub struct MockUdpServer {
    addr: SocketAddr,
    queries: mpsc::UnboundedReceiver<Vec<u8>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUdpServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let (query_tx, queries) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = buf[..len].to_vec();
                            let response = mock_response(&query);
                            let _ = query_tx.send(query);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn nameserver(&self) -> Nameserver {
        nameserver_for(self.addr)
    }

    pub async fn next_query(&mut self) -> Option<Vec<u8>> {
        self.queries.recv().await
    }
}

impl Drop for MockUdpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// ── TCP ─────────────────────────────────────────────────────────────────────

/// What the TCP mock does with each accepted connection after reading the
/// framed query.
#[derive(Debug, Clone)]
pub enum TcpBehavior {
    /// Frames a mock response for the query and sends it in one write.
    Answer,
    /// Writes each chunk separately with a short pause in between.
    Chunks(Vec<Vec<u8>>),
    /// Closes without writing anything.
    Close,
    /// Holds the connection open without answering.
    Silent,
}

pub struct MockTcpServer {
    addr: SocketAddr,
    queries: mpsc::UnboundedReceiver<Vec<u8>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockTcpServer {
    pub async fn start(behavior: TcpBehavior) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let (query_tx, queries) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { continue };
                        let behavior = behavior.clone();
                        let query_tx = query_tx.clone();
                        tokio::spawn(Self::serve(stream, behavior, query_tx));
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn serve(
        mut stream: tokio::net::TcpStream,
        behavior: TcpBehavior,
        query_tx: mpsc::UnboundedSender<Vec<u8>>,
    ) {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }

        let mut framed_query = len_buf.to_vec();
        framed_query.extend_from_slice(&query);
        let _ = query_tx.send(framed_query);

        match behavior {
            TcpBehavior::Answer => {
                let response = mock_response(&query);
                let mut frame = (response.len() as u16).to_be_bytes().to_vec();
                frame.extend_from_slice(&response);
                let _ = stream.write_all(&frame).await;
            }
            TcpBehavior::Chunks(chunks) => {
                for chunk in chunks {
                    if stream.write_all(&chunk).await.is_err() {
                        return;
                    }
                    let _ = stream.flush().await;
                    tokio::time::sleep(Duration::from_millis(20)).await;
                }
            }
            TcpBehavior::Close => return,
            TcpBehavior::Silent => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                return;
            }
        }

        // Keep the socket open until the client hangs up.
        let mut rest = [0u8; 16];
        let _ = stream.read(&mut rest).await;
    }

    pub fn nameserver(&self) -> Nameserver {
        nameserver_for(self.addr)
    }

    pub async fn next_query(&mut self) -> Option<Vec<u8>> {
        self.queries.recv().await
    }
}

impl Drop for MockTcpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Loopback address with nothing listening on it.
pub async fn closed_port() -> Nameserver {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    nameserver_for(addr)
}

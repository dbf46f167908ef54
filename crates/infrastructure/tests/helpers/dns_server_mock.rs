#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const ANSWER_IP: [u8; 4] = [93, 184, 216, 34];

/// How a mock upstream answers every query it receives.
#[derive(Debug, Clone, Copy)]
pub struct Behavior {
    pub rcode: ResponseCode,
    pub delay: Duration,
    pub truncated: bool,
}

impl Behavior {
    pub fn answer() -> Self {
        Self {
            rcode: ResponseCode::NoError,
            delay: Duration::ZERO,
            truncated: false,
        }
    }

    pub fn rcode(rcode: ResponseCode) -> Self {
        Self {
            rcode,
            ..Self::answer()
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn udp(behavior: Behavior) -> Result<Self, std::io::Error> {
        Self::udp_on(SocketAddr::from(([127, 0, 0, 1], 0)), behavior).await
    }

    pub async fn udp_on(addr: SocketAddr, behavior: Behavior) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        let local_addr = socket.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = hits.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);

                        let Some(response) = build_response(&buf[..len], behavior) else { continue };
                        let socket = socket.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(behavior.delay).await;
                            let _ = socket.send_to(&response, peer).await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn tcp(behavior: Behavior) -> Result<Self, std::io::Error> {
        Self::tcp_on(SocketAddr::from(([127, 0, 0, 1], 0)), behavior).await
    }

    pub async fn tcp_on(addr: SocketAddr, behavior: Behavior) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { continue };
                        let counter = counter.clone();

                        tokio::spawn(async move {
                            let mut len_buf = [0u8; 2];
                            if stream.read_exact(&mut len_buf).await.is_err() {
                                return;
                            }
                            let mut frame = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                            if stream.read_exact(&mut frame).await.is_err() {
                                return;
                            }
                            counter.fetch_add(1, Ordering::SeqCst);

                            let Some(response) = build_response(&frame, behavior) else { return };
                            tokio::time::sleep(behavior.delay).await;
                            let _ = stream.write_all(&(response.len() as u16).to_be_bytes()).await;
                            let _ = stream.write_all(&response).await;
                            let _ = stream.flush().await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Address in the `host#port` form accepted by the resolver config.
    pub fn upstream(&self) -> String {
        format!("{}#{}", self.addr.ip(), self.addr.port())
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub fn build_response(query_bytes: &[u8], behavior: Behavior) -> Option<Vec<u8>> {
    let query = Message::from_vec(query_bytes).ok()?;

    let mut response = Message::new();
    response
        .set_id(query.id())
        .set_message_type(MessageType::Response)
        .set_op_code(query.op_code())
        .set_recursion_desired(query.recursion_desired())
        .set_recursion_available(true)
        .set_truncated(behavior.truncated)
        .set_response_code(behavior.rcode)
        .add_queries(query.queries().to_vec());

    if behavior.rcode == ResponseCode::NoError && !behavior.truncated {
        if let Some(question) = query.queries().first() {
            let [a, b, c, d] = ANSWER_IP;
            response.add_answer(Record::from_rdata(
                question.name().clone(),
                60,
                RData::A(A::new(a, b, c, d)),
            ));
        }
    }

    response.to_vec().ok()
}

//! 宿主边界：同步语义的跨进程调用，抽象为可注入的异步 trait。
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

/// Boundary to the privileged host process. Implementations may fail or never
/// answer; callers bound each call with a timeout.
#[async_trait]
pub trait HostBridge: Send + Sync {
    async fn send_message(&self, name: &str, params: Value) -> anyhow::Result<Value>;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostMessage {
    pub name: String,
    pub params: Value,
}

/// One message in flight through a [`ChannelBridge`], waiting for its reply.
#[derive(Debug)]
pub struct HostRequest {
    pub message: HostMessage,
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

impl HostRequest {
    pub fn respond(self, result: anyhow::Result<Value>) {
        // 调用方可能已超时离开
        if self.reply.send(result).is_err() {
            tracing::debug!(message = %self.message.name, "host reply dropped: caller gone");
        }
    }
}

/// In-process bridge: requests travel over a bounded mpsc queue to a
/// [`HostEndpoint`], replies come back on a oneshot per request.
#[derive(Clone, Debug)]
pub struct ChannelBridge {
    tx: mpsc::Sender<HostRequest>,
}

pub struct HostEndpoint {
    rx: mpsc::Receiver<HostRequest>,
}

impl ChannelBridge {
    pub fn channel(capacity: usize) -> (ChannelBridge, HostEndpoint) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (ChannelBridge { tx }, HostEndpoint { rx })
    }
}

impl HostEndpoint {
    pub async fn recv(&mut self) -> Option<HostRequest> {
        self.rx.recv().await
    }
}

#[async_trait]
impl HostBridge for ChannelBridge {
    async fn send_message(&self, name: &str, params: Value) -> anyhow::Result<Value> {
        let (reply, rx) = oneshot::channel();
        let message = HostMessage { name: name.to_string(), params };
        self.tx
            .send(HostRequest { message, reply })
            .await
            .map_err(|_| anyhow::anyhow!("host endpoint closed"))?;
        rx.await
            .map_err(|_| anyhow::anyhow!("host dropped the request without replying"))?
    }
}

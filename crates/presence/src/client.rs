//! Presence service clients.

use std::sync::Arc;

use async_trait::async_trait;
use common::{ShellError, ShellResult};
use discord_rich_presence::{activity, DiscordIpc, DiscordIpcClient};
use parking_lot::Mutex;

use crate::payload::PresencePayload;

/// Connection to a presence service.
#[async_trait]
pub trait PresenceClient: Send + 'static {
    /// Open the connection.
    async fn connect(&mut self) -> ShellResult<()>;

    /// Replace the displayed status.
    async fn update(&mut self, payload: &PresencePayload) -> ShellResult<()>;

    /// Remove the displayed status and close the connection.
    async fn clear(&mut self) -> ShellResult<()>;
}

/// Discord rich presence over the local IPC socket.
///
/// The IPC client blocks, so every call runs on the blocking pool.
pub struct DiscordPresence {
    client_id: String,
    ipc: Arc<Mutex<Option<DiscordIpcClient>>>,
}

impl DiscordPresence {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ipc: Arc::new(Mutex::new(None)),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    async fn with_ipc<F>(&self, op: F) -> ShellResult<()>
    where
        F: FnOnce(&mut Option<DiscordIpcClient>) -> ShellResult<()> + Send + 'static,
    {
        let ipc = Arc::clone(&self.ipc);
        tokio::task::spawn_blocking(move || op(&mut ipc.lock()))
            .await
            .map_err(|err| ShellError::presence(format!("IPC task failed: {}", err)))?
    }
}

#[async_trait]
impl PresenceClient for DiscordPresence {
    async fn connect(&mut self) -> ShellResult<()> {
        let client_id = self.client_id.clone();

        self.with_ipc(move |slot| {
            let mut client = DiscordIpcClient::new(&client_id)
                .map_err(|err| ShellError::presence(err.to_string()))?;
            client
                .connect()
                .map_err(|err| ShellError::presence(format!("connect failed: {}", err)))?;
            *slot = Some(client);
            Ok(())
        })
        .await
    }

    async fn update(&mut self, payload: &PresencePayload) -> ShellResult<()> {
        let payload = payload.clone();

        self.with_ipc(move |slot| {
            let client = slot
                .as_mut()
                .ok_or_else(|| ShellError::presence("not connected"))?;

            let activity = activity::Activity::new()
                .state(&payload.state)
                .details(&payload.details)
                .assets(
                    activity::Assets::new()
                        .large_image(&payload.large_image)
                        .large_text(&payload.large_text),
                )
                .timestamps(activity::Timestamps::new().start(payload.start));

            client
                .set_activity(activity)
                .map_err(|err| ShellError::presence(format!("update failed: {}", err)))
        })
        .await
    }

    async fn clear(&mut self) -> ShellResult<()> {
        self.with_ipc(|slot| {
            let Some(mut client) = slot.take() else {
                return Ok(());
            };
            client
                .clear_activity()
                .map_err(|err| ShellError::presence(format!("clear failed: {}", err)))?;
            client
                .close()
                .map_err(|err| ShellError::presence(format!("close failed: {}", err)))
        })
        .await
    }
}

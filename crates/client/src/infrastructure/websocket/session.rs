//! Session driver: one task owning the transport link and the renderer.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;
use std::time::Duration;

use livequiz_protocol::{encode_message, ClientMessage, Frame};
use tokio::sync::mpsc;
use tracing::Instrument;
use uuid::Uuid;

use crate::infrastructure::location::{resolve_realtime_url, PageLocation};
use crate::infrastructure::messaging::{
    BusMessage, CommandBus, SessionState, SessionStateObserver,
};
use crate::ports::outbound::{CloseKind, Transport, TransportEvent, TransportLink};
use crate::ui::presentation::{Page, Renderer};

use super::core::{CloseOutcome, DisconnectCause, SessionCore};
use super::shared::COMMAND_CHANNEL_CAPACITY;

type RenderObserver = Box<dyn Fn(&Page) + Send + Sync>;

/// A live quiz session bound to one endpoint and one renderer.
///
/// The session reconnects on its own after unclean closes and returns from
/// [`Session::run`] only when the server closes the connection cleanly.
pub struct Session<R: Renderer> {
    id: Uuid,
    core: SessionCore,
    location: PageLocation,
    renderer: R,
    transport: Arc<dyn Transport>,
    command_bus: CommandBus,
    commands: mpsc::Receiver<BusMessage>,
    state: Arc<AtomicU8>,
    on_render: Option<RenderObserver>,
}

impl<R: Renderer> Session<R> {
    pub fn new(
        endpoint: impl Into<String>,
        location: PageLocation,
        renderer: R,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (tx, commands) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let state = Arc::new(AtomicU8::new(SessionState::Connecting.to_u8()));

        Self {
            id: Uuid::new_v4(),
            core: SessionCore::new(endpoint, Arc::clone(&state)),
            location,
            renderer,
            transport,
            command_bus: CommandBus::new(tx),
            commands,
            state,
            on_render: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn command_bus(&self) -> CommandBus {
        self.command_bus.clone()
    }

    pub fn state_observer(&self) -> SessionStateObserver {
        SessionStateObserver::new(Arc::clone(&self.state))
    }

    pub fn state(&self) -> SessionState {
        self.core.state()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn last_message(&self) -> Option<&Frame> {
        self.core.last_message()
    }

    /// Call `callback` with the page after every change.
    pub fn set_on_render<F>(&mut self, callback: F)
    where
        F: Fn(&Page) + Send + Sync + 'static,
    {
        self.on_render = Some(Box::new(callback));
    }

    /// Drive the session until the server closes it cleanly.
    pub async fn run(&mut self) -> DisconnectCause {
        let span = tracing::info_span!(
            "session",
            id = %self.id,
            endpoint = %self.core.endpoint()
        );
        self.run_loop().instrument(span).await
    }

    async fn run_loop(&mut self) -> DisconnectCause {
        if self.core.state().is_terminal() {
            tracing::warn!("Session already closed by the server");
            return DisconnectCause::classify(self.core.last_message());
        }

        self.notify_render();

        loop {
            self.core.begin_attempt();
            self.drop_queued_commands("connecting");

            let url = resolve_realtime_url(&self.location, self.core.endpoint());
            tracing::info!(attempt = self.core.attempts(), url = %url, "Connecting");

            let outcome = match self.transport.connect(&url).await {
                Ok(mut link) => {
                    self.core.on_open();
                    let kind = self.pump(link.as_mut()).await;
                    link.close().await;
                    self.core.on_close(kind, &mut self.renderer)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Connection attempt failed");
                    self.core.on_connect_failed(&mut self.renderer)
                }
            };
            self.notify_render();

            match outcome {
                CloseOutcome::Reconnect { delay } => self.wait_for_reconnect(delay).await,
                CloseOutcome::Ended(cause) => return cause,
            }
        }
    }

    /// Process link events and queued commands in order until the link closes.
    async fn pump(&mut self, link: &mut dyn TransportLink) -> CloseKind {
        loop {
            tokio::select! {
                event = link.next_event() => match event {
                    TransportEvent::Frame(raw) => {
                        if self.core.on_message(&raw, &mut self.renderer) {
                            self.notify_render();
                        }
                    }
                    TransportEvent::Closed(kind) => return kind,
                },
                Some(message) = self.commands.recv() => {
                    self.handle_command(link, message).await;
                }
            }
        }
    }

    async fn handle_command(&mut self, link: &mut dyn TransportLink, message: BusMessage) {
        let command = match message {
            BusMessage::Send(command) => Some(command),
            BusMessage::Interact { action, input } => {
                self.renderer.perform(action, input.as_deref())
            }
        };

        if let Some(command) = command {
            Self::forward(link, &command).await;
        }
    }

    async fn forward(link: &mut dyn TransportLink, command: &ClientMessage) {
        let frame = match encode_message(command) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(kind = command.kind(), error = %e, "Failed to encode command");
                return;
            }
        };

        tracing::debug!(kind = command.kind(), "Sending command");
        if let Err(e) = link.send(frame).await {
            tracing::warn!(kind = command.kind(), error = %e, "Failed to send command");
        }
    }

    /// Sit out the reconnect delay. Commands arriving meanwhile are dropped.
    async fn wait_for_reconnect(&mut self, delay: Duration) {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => break,
                Some(message) = self.commands.recv() => {
                    tracing::warn!(message = ?message, "Dropping command while reconnecting");
                }
            }
        }
    }

    fn drop_queued_commands(&mut self, phase: &'static str) {
        while let Ok(message) = self.commands.try_recv() {
            tracing::warn!(message = ?message, phase, "Dropping command while not open");
        }
    }

    fn notify_render(&self) {
        if let Some(callback) = &self.on_render {
            callback(self.renderer.page());
        }
    }
}

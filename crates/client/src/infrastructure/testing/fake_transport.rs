//! Scripted transport: each connect plays the next script.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use crate::ports::outbound::{Transport, TransportError, TransportEvent, TransportLink};

/// What one connection attempt does.
#[derive(Debug, Clone)]
pub enum LinkScript {
    /// The handshake fails
    Refuse,
    /// The link opens and yields these events, then stays silent
    Open(Vec<TransportEvent>),
}

#[derive(Default)]
struct Inner {
    scripts: VecDeque<LinkScript>,
    connects: Vec<(Instant, Url)>,
    sent: Vec<String>,
    closed: usize,
}

/// Once its scripts run out, `connect` never completes.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedTransport {
    pub fn new(scripts: impl IntoIterator<Item = LinkScript>) -> Self {
        let transport = Self::default();
        transport.lock().scripts.extend(scripts);
        transport
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("transport lock")
    }

    pub fn connect_times(&self) -> Vec<Instant> {
        self.lock().connects.iter().map(|(at, _)| *at).collect()
    }

    pub fn connect_urls(&self) -> Vec<Url> {
        self.lock().connects.iter().map(|(_, url)| url.clone()).collect()
    }

    pub fn sent(&self) -> Vec<String> {
        self.lock().sent.clone()
    }

    pub fn closed_links(&self) -> usize {
        self.lock().closed
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn connect(&self, url: &Url) -> Result<Box<dyn TransportLink>, TransportError> {
        let script = {
            let mut inner = self.lock();
            inner.connects.push((Instant::now(), url.clone()));
            inner.scripts.pop_front()
        };

        match script {
            Some(LinkScript::Refuse) => Err(TransportError::Connect {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
            Some(LinkScript::Open(events)) => Ok(Box::new(ScriptedLink {
                events: events.into(),
                inner: Arc::clone(&self.inner),
            })),
            None => std::future::pending().await,
        }
    }
}

struct ScriptedLink {
    events: VecDeque<TransportEvent>,
    inner: Arc<Mutex<Inner>>,
}

#[async_trait]
impl TransportLink for ScriptedLink {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.inner.lock().expect("transport lock").sent.push(frame);
        Ok(())
    }

    async fn next_event(&mut self) -> TransportEvent {
        match self.events.pop_front() {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) {
        self.inner.lock().expect("transport lock").closed += 1;
    }
}

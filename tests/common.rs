use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::routing::post;
use gcm_channel::config::GcmConfig;
use gcm_channel::domain::response::ResponseBody;
use gcm_channel::{ClientError, Device, GcmClient, GcmMessage, GcmResponse, Notifiable, Notification, Packet, TokenResult};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("gcm_channel=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

/// Client double that records every packet and answers from a script.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    sent: Mutex<Vec<Packet>>,
    rejected: HashMap<String, String>,
    broken: HashSet<String>,
}

#[allow(dead_code)]
impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// GCM answers with `error` for this token.
    pub fn reject(mut self, token: &str, error: &str) -> Self {
        self.rejected.insert(token.to_string(), error.to_string());
        self
    }

    /// The transport fails when sending to this token.
    pub fn break_on(mut self, token: &str) -> Self {
        self.broken.insert(token.to_string());
        self
    }

    pub fn sent(&self) -> Vec<Packet> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent().into_iter().flat_map(|p| p.registration_ids).collect()
    }
}

#[async_trait]
impl GcmClient for ScriptedClient {
    async fn send(&self, packet: &Packet) -> Result<GcmResponse, ClientError> {
        self.sent.lock().unwrap().push(packet.clone());

        if let Some(token) = packet.registration_ids.iter().find(|t| self.broken.contains(*t)) {
            return Err(ClientError::Other(anyhow::anyhow!("connection reset while sending to {token}")));
        }

        let results: Vec<TokenResult> = packet
            .registration_ids
            .iter()
            .map(|token| match self.rejected.get(token) {
                Some(error) => TokenResult { error: Some(error.clone()), ..TokenResult::default() },
                None => TokenResult { message_id: Some(format!("0:{token}")), ..TokenResult::default() },
            })
            .collect();
        let failure = u32::try_from(results.iter().filter(|r| r.error.is_some()).count()).unwrap();
        let success = u32::try_from(results.len()).unwrap() - failure;

        Ok(GcmResponse::from_body(
            &packet.registration_ids,
            ResponseBody { multicast_id: 42, success, failure, canonical_ids: 0, results },
        ))
    }
}

/// Notifiable with a fixed device list.
#[derive(Debug, Default)]
pub struct StaticNotifiable {
    pub devices: Vec<Device>,
}

#[allow(dead_code)]
impl StaticNotifiable {
    pub fn with_tokens(tokens: &[&str]) -> Self {
        Self { devices: tokens.iter().map(|t| Device::from(*t)).collect() }
    }
}

impl Notifiable for StaticNotifiable {
    fn route_notification_for(&self, channel: &str) -> Vec<Device> {
        if channel == "gcm" { self.devices.clone() } else { Vec::new() }
    }
}

/// Notification that renders the same message for every device except the skipped ones.
#[derive(Debug)]
pub struct Greeting {
    pub message: GcmMessage,
    pub skip: HashSet<String>,
}

#[allow(dead_code)]
impl Greeting {
    pub fn new(title: &str, body: &str) -> Self {
        Self { message: GcmMessage::new(title, body), skip: HashSet::new() }
    }

    pub fn skipping(mut self, token: &str) -> Self {
        self.skip.insert(token.to_string());
        self
    }
}

impl Notification for Greeting {
    fn to_gcm(&self, _notifiable: &dyn Notifiable, device: &Device) -> Option<GcmMessage> {
        if self.skip.contains(&*device.token()) { None } else { Some(self.message.clone()) }
    }
}

/// What the stub GCM server answers with and what it received.
#[derive(Debug)]
pub struct StubGcm {
    pub status: StatusCode,
    pub retry_after: Option<String>,
    pub body: String,
    pub requests: Mutex<Vec<(Option<String>, serde_json::Value)>>,
}

#[allow(dead_code)]
impl StubGcm {
    pub fn answering(status: StatusCode, body: &str) -> Self {
        Self { status, retry_after: None, body: body.to_string(), requests: Mutex::new(Vec::new()) }
    }

    pub fn with_retry_after(mut self, value: &str) -> Self {
        self.retry_after = Some(value.to_string());
        self
    }

    pub fn requests(&self) -> Vec<(Option<String>, serde_json::Value)> {
        self.requests.lock().unwrap().clone()
    }
}

async fn stub_send(
    State(stub): State<Arc<StubGcm>>,
    headers: HeaderMap,
    axum::Json(body): axum::Json<serde_json::Value>,
) -> Response {
    let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).map(str::to_string);
    stub.requests.lock().unwrap().push((auth, body));

    let mut builder = axum::http::Response::builder().status(stub.status).header(header::CONTENT_TYPE, "application/json");
    if let Some(retry_after) = &stub.retry_after {
        builder = builder.header(header::RETRY_AFTER, retry_after.as_str());
    }
    builder.body(Body::from(stub.body.clone())).unwrap()
}

/// Starts a local GCM stand-in and returns its send URL.
#[allow(dead_code)]
pub async fn spawn_stub_gcm(stub: Arc<StubGcm>) -> String {
    let app = Router::new().route("/gcm/send", post(stub_send)).with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/gcm/send")
}

/// Returns a send URL on a local port nothing is listening on.
#[allow(dead_code)]
pub async fn closed_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/gcm/send")
}

#[allow(dead_code)]
pub fn get_test_config(endpoint: &str) -> GcmConfig {
    GcmConfig {
        api_key: "test_api_key".to_string(),
        endpoint: endpoint.to_string(),
        timeout_secs: 5,
        time_to_live: None,
        dry_run: false,
    }
}

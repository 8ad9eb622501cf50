//! In-process stand-in for the chat server, plus a harness that wires a
//! client context to it.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
    routing::get,
};
use serde_json::Value;
use tower_http::trace::TraceLayer;

use murmur_client::config::server_url;
use murmur_client::{
    ClientConfig, Context, MemorySurface, MemoryTokenStore, SyncEvent, SyncLog, SyncLogger,
};

const MAX_NICKNAME_LEN: usize = 12;

type Reply = (StatusCode, String);

fn malformed() -> Reply {
    (StatusCode::BAD_REQUEST, "400: Malformed request data.".into())
}

fn unauthorised() -> Reply {
    (StatusCode::UNAUTHORIZED, "401: No authentication key.".into())
}

/// A request the fixture saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seen {
    pub method: Method,
    pub path: &'static str,
    pub auth: Option<String>,
}

#[derive(Default)]
pub struct FixtureState {
    /// (nickname, key)
    pub users: Vec<(String, String)>,
    /// (author index, content)
    pub messages: Vec<(usize, String)>,
    /// (blocker index, blocked index)
    pub blocks: Vec<(usize, usize)>,
    pub seen: Vec<Seen>,
    /// Fixed replies for GETs, keyed by path.
    pub canned: HashMap<&'static str, Reply>,
    /// Delays applied to successive `GET api/messages`, after the body is built.
    pub message_delays: VecDeque<Duration>,
    /// Applied to every `GET api/messages` once `message_delays` runs dry.
    pub message_delay: Option<Duration>,
    next_key: usize,
}

impl FixtureState {
    fn record(&mut self, method: &Method, path: &'static str, headers: &HeaderMap) -> Option<usize> {
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let me = auth
            .as_deref()
            .and_then(|key| self.users.iter().position(|(_, k)| k == key));
        self.seen.push(Seen {
            method: method.clone(),
            path,
            auth,
        });
        me
    }

    fn canned(&self, method: &Method, path: &str) -> Option<Reply> {
        if method != Method::GET {
            return None;
        }
        self.canned.get(path).cloned()
    }

    fn names(&self) -> Vec<&str> {
        self.users.iter().map(|(n, _)| n.as_str()).collect()
    }
}

#[derive(Clone, Default)]
pub struct Fixture {
    state: Arc<Mutex<FixtureState>>,
}

impl Fixture {
    pub fn state(&self) -> MutexGuard<'_, FixtureState> {
        self.state.lock().unwrap()
    }

    /// Register a user directly and return its key.
    pub fn add_user(&self, nickname: &str) -> String {
        let mut st = self.state();
        st.next_key += 1;
        let key = format!("key-{}-{}", nickname, st.next_key);
        st.users.push((nickname.to_string(), key.clone()));
        key
    }

    pub fn add_message(&self, author: usize, content: &str) {
        self.state().messages.push((author, content.to_string()));
    }

    pub fn can(&self, path: &'static str, body: &str) {
        self.can_status(path, StatusCode::OK, body);
    }

    pub fn can_status(&self, path: &'static str, status: StatusCode, body: &str) {
        self.state().canned.insert(path, (status, body.to_string()));
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state().seen.clone()
    }

    pub fn clear_seen(&self) {
        self.state().seen.clear();
    }

    pub async fn serve(&self) -> SocketAddr {
        let app = Router::new()
            .route("/api/auth", get(auth))
            .route("/api/users", get(users).post(users).patch(users))
            .route("/api/messages", get(messages).post(messages))
            .route("/api/blocks", get(blocks).post(blocks).delete(blocks))
            .layer(TraceLayer::new_for_http())
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }
}

fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|v| !v.is_null())
}

async fn auth(State(fx): State<Fixture>, headers: HeaderMap) -> Reply {
    let mut st = fx.state();
    match st.record(&Method::GET, "api/auth", &headers) {
        Some(me) => (StatusCode::OK, st.users[me].0.clone()),
        None => unauthorised(),
    }
}

async fn users(State(fx): State<Fixture>, method: Method, headers: HeaderMap, body: String) -> Reply {
    let mut st = fx.state();
    let me = st.record(&method, "api/users", &headers);
    if let Some(reply) = st.canned(&method, "api/users") {
        return reply;
    }
    if method == Method::GET {
        return (StatusCode::OK, serde_json::to_string(&st.names()).unwrap());
    }

    let Ok(body) = serde_json::from_str::<Value>(&body) else {
        return malformed();
    };
    let nickname = match field(&body, "nickname").and_then(Value::as_str) {
        Some(n) if !n.is_empty() && n.chars().count() <= MAX_NICKNAME_LEN => n.to_string(),
        _ => return malformed(),
    };

    let taken = st.users.iter().any(|(n, _)| *n == nickname);
    let mine = me.is_some_and(|i| st.users[i].0 == nickname);
    if taken && !mine {
        return (StatusCode::UNAUTHORIZED, "Nickname taken.".into());
    }

    if method == Method::POST {
        st.next_key += 1;
        let key = format!("key-{}-{}", nickname, st.next_key);
        st.users.push((nickname, key.clone()));
        return (StatusCode::CREATED, key);
    }

    let Some(me) = me else {
        return unauthorised();
    };
    st.users[me].0 = nickname;
    (StatusCode::CREATED, "201: Changed.".into())
}

async fn messages(State(fx): State<Fixture>, method: Method, headers: HeaderMap, body: String) -> Reply {
    let (reply, delay) = {
        let mut st = fx.state();
        let me = st.record(&method, "api/messages", &headers);
        if let Some(reply) = st.canned(&method, "api/messages") {
            return reply;
        }

        if method == Method::GET {
            let list: Vec<(String, String)> = st
                .messages
                .iter()
                .map(|(author, content)| (st.users[*author].0.clone(), content.clone()))
                .collect();
            let delay = st.message_delays.pop_front().or(st.message_delay);
            ((StatusCode::OK, serde_json::to_string(&list).unwrap()), delay)
        } else {
            let Some(me) = me else {
                return unauthorised();
            };
            let content = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|b| field(&b, "content").and_then(Value::as_str).map(|s| s.trim().to_string()))
                .unwrap_or_default();
            if content.is_empty() {
                return malformed();
            }
            st.messages.push((me, content));
            ((StatusCode::CREATED, "201: Created.".into()), None)
        }
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    reply
}

async fn blocks(State(fx): State<Fixture>, method: Method, headers: HeaderMap, body: String) -> Reply {
    let mut st = fx.state();
    let me = st.record(&method, "api/blocks", &headers);
    if let Some(reply) = st.canned(&method, "api/blocks") {
        return reply;
    }
    let Some(me) = me else {
        return unauthorised();
    };

    if method == Method::GET {
        let mine: Vec<usize> = st
            .blocks
            .iter()
            .filter(|(u1, _)| *u1 == me)
            .map(|(_, u2)| *u2)
            .collect();
        return (StatusCode::OK, serde_json::to_string(&mine).unwrap());
    }

    let identifier = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|b| field(&b, "identifier").and_then(Value::as_u64))
        .map(|i| i as usize);
    let Some(identifier) = identifier.filter(|i| *i < st.users.len()) else {
        return malformed();
    };

    let block = (me, identifier);
    if method == Method::POST {
        if me == identifier {
            return (StatusCode::BAD_REQUEST, "Cannot block yourself.".into());
        }
        if st.blocks.contains(&block) {
            return (StatusCode::OK, "200: Done.".into());
        }
        st.blocks.push(block);
        return (StatusCode::CREATED, "201: Created.".into());
    }

    let Some(pos) = st.blocks.iter().position(|b| *b == block) else {
        return malformed();
    };
    st.blocks.remove(pos);
    (StatusCode::OK, "200: Done.".into())
}

// -- Client side --

/// Collects sync events for assertions.
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<SyncLog>>,
}

impl RecordingLogger {
    pub fn events(&self) -> Vec<SyncEvent> {
        self.entries.lock().unwrap().iter().map(|e| e.event.clone()).collect()
    }
}

impl SyncLogger for RecordingLogger {
    fn log(&self, entry: SyncLog) {
        self.entries.lock().unwrap().push(entry);
    }
}

pub struct Harness {
    pub fx: Fixture,
    pub ctx: Context,
    pub surface: Arc<MemorySurface>,
    pub tokens: Arc<MemoryTokenStore>,
    pub logger: Arc<RecordingLogger>,
}

pub async fn harness() -> Harness {
    harness_with(|_| {}).await
}

pub async fn harness_with(tweak: impl FnOnce(&mut ClientConfig)) -> Harness {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("murmur_client=debug,tower_http=debug")
        .with_test_writer()
        .try_init();

    let fx = Fixture::default();
    let addr = fx.serve().await;

    let mut config = ClientConfig::new(server_url(&format!("http://{}/", addr)).unwrap());
    tweak(&mut config);

    let surface = Arc::new(MemorySurface::new());
    let tokens = Arc::new(MemoryTokenStore::new());
    let logger = Arc::new(RecordingLogger::default());
    let ctx = Context::new(config, tokens.clone(), surface.clone(), logger.clone()).unwrap();

    Harness {
        fx,
        ctx,
        surface,
        tokens,
        logger,
    }
}

impl Harness {
    /// Register `nickname` on the fixture and store its key client side.
    pub fn sign_in_as(&self, nickname: &str) -> String {
        use murmur_client::TokenStore;

        let key = self.fx.add_user(nickname);
        self.tokens.set(&key).unwrap();
        key
    }
}

//! End-to-end tests: a real listener, the reqwest-backed client, and raw
//! HTTP for the server's own error paths.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use accord_client::{Client, ClientConfig, ClientError};
use accord_core::fixtures::{AddUser, DeleteUser, GetUser, ReplaceUser, SetUserName, User};
use accord_core::NoBody;
use accord_server::{bind_ephemeral, Routes, Server, ServerConfig};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
#[error("no user with id {0}")]
struct UnknownUser(Uuid);

type Store = Arc<Mutex<HashMap<Uuid, User>>>;

fn routes(store: &Store) -> Routes {
    let add = Arc::clone(store);
    let get = Arc::clone(store);
    let rename = Arc::clone(store);
    let delete = Arc::clone(store);
    let replace = Arc::clone(store);

    Routes::new()
        .endpoint(move |req: AddUser| {
            let store = Arc::clone(&add);
            async move {
                let user = User::new(Uuid::now_v7(), req.name);
                store.lock().unwrap().insert(user.id, user.clone());
                Ok::<_, UnknownUser>(user)
            }
        })
        .unwrap()
        .endpoint(move |req: GetUser| {
            let store = Arc::clone(&get);
            async move {
                store
                    .lock()
                    .unwrap()
                    .get(&req.id)
                    .cloned()
                    .ok_or(UnknownUser(req.id))
            }
        })
        .unwrap()
        .endpoint(move |req: SetUserName| {
            let store = Arc::clone(&rename);
            async move {
                let mut users = store.lock().unwrap();
                let user = users.get_mut(&req.id).ok_or(UnknownUser(req.id))?;
                user.name = req.name;
                Ok::<_, UnknownUser>(NoBody)
            }
        })
        .unwrap()
        .endpoint(move |req: DeleteUser| {
            let store = Arc::clone(&delete);
            async move {
                store
                    .lock()
                    .unwrap()
                    .remove(&req.id)
                    .map(|_| NoBody)
                    .ok_or(UnknownUser(req.id))
            }
        })
        .unwrap()
        .endpoint(move |req: ReplaceUser| {
            let store = Arc::clone(&replace);
            async move {
                store.lock().unwrap().insert(req.user.id, req.user);
                Ok::<_, UnknownUser>(NoBody)
            }
        })
        .unwrap()
}

struct Running {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

async fn start(config: ServerConfig) -> Running {
    let store = Store::default();
    let (listener, addr) = bind_ephemeral().await.unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let server = Server::new(routes(&store), config);
    let task = tokio::spawn(async move {
        server
            .serve(listener, async {
                let _ = stopped.await;
            })
            .await
            .unwrap();
    });
    Running { addr, stop, task }
}

impl Running {
    fn client(&self) -> Client {
        Client::from_config(&ClientConfig::new(format!("http://{}/", self.addr))).unwrap()
    }

    async fn shutdown(self) {
        self.stop.send(()).unwrap();
        self.task.await.unwrap();
    }
}

#[tokio::test]
async fn test_user_lifecycle_over_http() {
    let server = start(ServerConfig::default()).await;
    let client = server.client();

    let created = client
        .send(&AddUser {
            name: "Stuart".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.name, "Stuart");

    let fetched = client.send(&GetUser { id: created.id }).await.unwrap();
    assert_eq!(fetched, created);

    client
        .send(&SetUserName {
            id: created.id,
            name: "Bob".to_string(),
        })
        .await
        .unwrap();
    let renamed = client.send(&GetUser { id: created.id }).await.unwrap();
    assert_eq!(renamed.name, "Bob");

    client
        .send(&ReplaceUser {
            user: User::new(created.id, "Ada"),
        })
        .await
        .unwrap();
    assert_eq!(
        client.send(&GetUser { id: created.id }).await.unwrap().name,
        "Ada"
    );

    let deleted = client.send(&DeleteUser { id: created.id }).await.unwrap();
    assert_eq!(deleted, NoBody);

    server.shutdown().await;
}

#[tokio::test]
async fn test_handler_error_becomes_500() {
    let server = start(ServerConfig::default()).await;
    let client = server.client();

    let err = client
        .send(&GetUser { id: Uuid::nil() })
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            let envelope: serde_json::Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(envelope["error"]["code"], "INTERNAL_ERROR");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_server_error_paths() {
    let server = start(ServerConfig {
        max_body_bytes: 16,
        ..ServerConfig::default()
    })
    .await;
    let http = reqwest::Client::new();
    let base = format!("http://{}", server.addr);

    let response = http
        .post(format!("{base}/user"))
        .body(r#"{"name":"a name far longer than sixteen bytes"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::PAYLOAD_TOO_LARGE);

    let response = http.get(format!("{base}/missing")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = http
        .post(format!("{base}/user"))
        .body("{")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let envelope: serde_json::Value = response.json().await.unwrap();
    assert_eq!(envelope["error"]["source"], "body");

    let response = http.get(format!("{base}/user")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()["allow"], "POST");

    server.shutdown().await;
}

//! End-to-end HTTP tests over a real socket, with the in-memory record store
//! and the scriptable accounts gateway standing in for Postgres and the
//! accounts microservice.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};
use service::accounts::mock::MockAccountsGateway;
use service::accounts::GatewayError;
use service::customer::repository::mock::InMemoryCustomerRepository;
use service::customer::CustomerService;

struct TestApp {
    base_url: String,
    gateway: Arc<MockAccountsGateway>,
}

async fn start_server() -> TestApp {
    let repo = Arc::new(InMemoryCustomerRepository::default());
    let gateway = Arc::new(MockAccountsGateway::replying(false));
    let customers = Arc::new(CustomerService::new(repo, gateway.clone()));

    let app: Router = routes::build_router(ServerState { customers }, CorsLayer::very_permissive());
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {e}");
        }
    });

    TestApp { base_url: format!("http://{addr}"), gateway }
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn ana() -> serde_json::Value {
    json!({
        "firstName": "Ana",
        "lastName": "Soto",
        "dni": "98765432",
        "email": "ana.soto@mail.com"
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = start_server().await;
    let res = client().get(format!("{}/health", app.base_url)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_and_fetch_round_trip() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await.unwrap();
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["firstName"], "Ana");

    let res = c.get(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(fetched["lastName"], "Soto");
    assert_eq!(fetched["dni"], "98765432");
    assert_eq!(fetched["email"], "ana.soto@mail.com");

    let res = c.get(format!("{}/customers", app.base_url)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<Vec<serde_json::Value>>().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn invalid_candidates_are_rejected_with_400() {
    let app = start_server().await;
    let c = client();

    let cases = [
        json!({"firstName": "", "lastName": "Soto", "dni": "98765432", "email": "a@mail.com"}),
        json!({"firstName": "Ana", "lastName": "Soto", "dni": "9876", "email": "a@mail.com"}),
        json!({"firstName": "Ana", "lastName": "Soto", "dni": "98765432", "email": "nope"}),
        // Missing fields count as empty, not as a codec error.
        json!({"lastName": "Soto", "dni": "98765432", "email": "a@mail.com"}),
    ];
    for candidate in cases {
        let res = c
            .post(format!("{}/customers", app.base_url))
            .json(&candidate)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "candidate {candidate}");
        let body = res.json::<serde_json::Value>().await.unwrap();
        assert!(body["error"].as_str().is_some());
    }
}

#[tokio::test]
async fn duplicate_dni_is_rejected() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let other = json!({
        "firstName": "Luis",
        "lastName": "Mora",
        "dni": "98765432",
        "email": "luis@mail.com"
    });
    let res = c.post(format!("{}/customers", app.base_url)).json(&other).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("DNI"));
}

#[tokio::test]
async fn missing_customer_is_404() {
    let app = start_server().await;
    let c = client();

    let res = c.get(format!("{}/customers/99", app.base_url)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c
        .put(format!("{}/customers/99", app.base_url))
        .json(&ana())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/customers/99", app.base_url)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(app.gateway.calls(), 0);
}

#[tokio::test]
async fn update_keeps_the_stored_dni() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"].as_i64().unwrap();

    let candidate = json!({
        "firstName": "Ana Maria",
        "lastName": "Soto",
        "dni": "11111111",
        "email": "ana.m@mail.com"
    });
    let res = c
        .put(format!("{}/customers/{}", app.base_url, id))
        .json(&candidate)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await.unwrap();
    assert_eq!(updated["firstName"], "Ana Maria");
    assert_eq!(updated["dni"], "98765432");
}

#[tokio::test]
async fn delete_is_blocked_with_409_while_accounts_are_active() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"].as_i64().unwrap();

    app.gateway.set_reply(Ok(true));
    let res = c.delete(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // Record untouched.
    let res = c.get(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn gateway_trouble_is_a_502_and_blocks_the_delete() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"].as_i64().unwrap();

    app.gateway.set_reply(Err(GatewayError::Unavailable("connection refused".into())));
    let res = c.delete(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_GATEWAY);

    app.gateway.set_reply(Err(GatewayError::InvalidPayload(id as i32)));
    let res = c.delete(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::BAD_GATEWAY);

    let res = c.get(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn delete_succeeds_once_no_accounts_are_active() {
    let app = start_server().await;
    let c = client();

    let res = c.post(format!("{}/customers", app.base_url)).json(&ana()).send().await.unwrap();
    let id = res.json::<serde_json::Value>().await.unwrap()["id"].as_i64().unwrap();

    let res = c.delete(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(format!("{}/customers/{}", app.base_url, id)).send().await.unwrap();
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
}

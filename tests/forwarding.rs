//! End-to-end forwarding tests for the edge gateway.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::mpsc;

use bhaktamar_edge::config::GatewayConfig;
use bhaktamar_edge::http::response::FALLBACK_MESSAGE;
use bhaktamar_edge::http::HttpServer;
use bhaktamar_edge::lifecycle::Shutdown;

mod common;

async fn spawn_gateway(proxy_addr: SocketAddr, origin: String) -> Shutdown {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = proxy_addr.to_string();
    config.upstream.origin = origin;

    let shutdown = Shutdown::new();
    let (_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let listener = tokio::net::TcpListener::bind(proxy_addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn preflight_answers_with_cors_headers() {
    let proxy_addr: SocketAddr = "127.0.0.1:28411".parse().unwrap();
    // Origin points nowhere; preflight must not forward.
    let shutdown = spawn_gateway(proxy_addr, "http://127.0.0.1:28412".into()).await;
    let client = client();

    for path in ["/", "/api/room", "/elsewhere"] {
        let res = client
            .request(reqwest::Method::OPTIONS, format!("http://{}{}", proxy_addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let allow_origin = res.headers().get("access-control-allow-origin").cloned();
        let allow_methods = res.headers().get("access-control-allow-methods").cloned();
        let allow_headers = res.headers().get("access-control-allow-headers").cloned();
        assert_eq!(allow_origin.unwrap(), "*");
        assert_eq!(allow_methods.unwrap(), "GET, POST, DELETE, OPTIONS");
        assert_eq!(allow_headers.unwrap(), "Content-Type");
        assert!(res.text().await.unwrap().is_empty());
    }

    shutdown.trigger();
}

#[tokio::test]
async fn post_forwards_body_and_normalizes_content_type() {
    let backend_addr: SocketAddr = "127.0.0.1:28421".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28422".parse().unwrap();

    let mut captured =
        common::start_capture_backend(backend_addr, 200, "{\"room\":\"abc\"}").await;
    let shutdown = spawn_gateway(proxy_addr, format!("http://{}", backend_addr)).await;

    let res = client()
        .post(format!("http://{}/api/room", proxy_addr))
        .header("content-type", "text/plain")
        .body("{\"name\":\"test\"}")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let allow_origin = res.headers().get("access-control-allow-origin").cloned();
    let content_type = res.headers().get("content-type").cloned();
    assert_eq!(allow_origin.unwrap(), "*");
    assert_eq!(content_type.unwrap(), "application/json");
    assert_eq!(res.text().await.unwrap(), "{\"room\":\"abc\"}");

    let req = captured.recv().await.unwrap();
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/room");
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert!(req.header("x-request-id").is_some());
    assert_eq!(req.body, b"{\"name\":\"test\"}".to_vec());

    shutdown.trigger();
}

#[tokio::test]
async fn get_forwards_no_body_and_preserves_query() {
    let backend_addr: SocketAddr = "127.0.0.1:28431".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28432".parse().unwrap();

    let mut captured =
        common::start_capture_backend(backend_addr, 200, "{\"active_rooms\":[]}").await;
    let shutdown = spawn_gateway(proxy_addr, format!("http://{}", backend_addr)).await;

    let res = client()
        .get(format!("http://{}/api/rooms?limit=5&active=true", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let req = captured.recv().await.unwrap();
    assert_eq!(req.method, "GET");
    assert_eq!(req.path, "/rooms?limit=5&active=true");
    assert!(req.body.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn delete_is_forwarded_to_the_stripped_path() {
    let backend_addr: SocketAddr = "127.0.0.1:28441".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28442".parse().unwrap();

    let mut captured =
        common::start_capture_backend(backend_addr, 200, "{\"status\":\"deleted\"}").await;
    let shutdown = spawn_gateway(proxy_addr, format!("http://{}", backend_addr)).await;

    let res = client()
        .delete(format!("http://{}/api/room/foo", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let req = captured.recv().await.unwrap();
    assert_eq!(req.method, "DELETE");
    assert_eq!(req.path, "/room/foo");
    assert!(req.body.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn backend_errors_pass_through_verbatim() {
    let backend_addr: SocketAddr = "127.0.0.1:28451".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28452".parse().unwrap();

    let mut captured =
        common::start_capture_backend(backend_addr, 404, "{\"detail\":\"Not Found\"}").await;
    let shutdown = spawn_gateway(proxy_addr, format!("http://{}", backend_addr)).await;

    let res = client()
        .get(format!("http://{}/api/room/missing", proxy_addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let allow_origin = res.headers().get("access-control-allow-origin").cloned();
    assert_eq!(allow_origin.unwrap(), "*");
    assert_eq!(res.text().await.unwrap(), "{\"detail\":\"Not Found\"}");

    let req = captured.recv().await.unwrap();
    assert_eq!(req.path, "/room/missing");

    shutdown.trigger();
}

#[tokio::test]
async fn success_body_is_relayed_verbatim() {
    let backend_addr: SocketAddr = "127.0.0.1:28461".parse().unwrap();
    let proxy_addr: SocketAddr = "127.0.0.1:28462".parse().unwrap();

    common::start_mock_backend(
        backend_addr,
        "{\"status\":\"healthy\",\"service\":\"bhaktamar-voice-bot\"}",
    )
    .await;
    let shutdown = spawn_gateway(proxy_addr, format!("http://{}", backend_addr)).await;

    let res = client()
        .get(format!("http://{}/api/health", proxy_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.text().await.unwrap(),
        "{\"status\":\"healthy\",\"service\":\"bhaktamar-voice-bot\"}"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn unreachable_backend_maps_to_502_error_shape() {
    let proxy_addr: SocketAddr = "127.0.0.1:28471".parse().unwrap();
    // Nothing listens on the origin port.
    let shutdown = spawn_gateway(proxy_addr, "http://127.0.0.1:28472".into()).await;

    let res = client()
        .get(format!("http://{}/api/health", proxy_addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    let allow_origin = res.headers().get("access-control-allow-origin").cloned();
    assert_eq!(allow_origin.unwrap(), "*");

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Backend unreachable");
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));

    shutdown.trigger();
}

#[tokio::test]
async fn out_of_namespace_paths_get_the_service_note() {
    let proxy_addr: SocketAddr = "127.0.0.1:28481".parse().unwrap();
    let shutdown = spawn_gateway(proxy_addr, "http://127.0.0.1:28482".into()).await;
    let client = client();

    for path in ["/", "/static/logo.png", "/api"] {
        let res = client
            .get(format!("http://{}{}", proxy_addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200);

        let allow_origin = res.headers().get("access-control-allow-origin").cloned();
        assert_eq!(allow_origin.unwrap(), "*");
        assert_eq!(res.text().await.unwrap(), FALLBACK_MESSAGE);
    }

    shutdown.trigger();
}

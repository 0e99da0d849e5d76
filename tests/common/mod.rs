use actix_web::http::header::CACHE_CONTROL;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use trivia_web::config::Config;
use trivia_web::run;

/// Canned responses keyed by `path` or `path?query`, exactly as requested.
struct Stubs {
    routes: HashMap<String, (u16, serde_json::Value)>,
    requests: Arc<Mutex<Vec<String>>>,
    cache_controls: Arc<Mutex<Vec<Option<String>>>>,
}

#[allow(dead_code)]
pub struct FakeBackend {
    pub address: String,
    pub requests: Arc<Mutex<Vec<String>>>,
    /// `Cache-Control` header of every received request, in arrival order.
    pub cache_controls: Arc<Mutex<Vec<Option<String>>>>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn hits(&self, key: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| *r == key).count()
    }
}

async fn stubbed(req: HttpRequest, stubs: web::Data<Stubs>) -> HttpResponse {
    let key = if req.query_string().is_empty() {
        req.path().to_string()
    } else {
        format!("{}?{}", req.path(), req.query_string())
    };
    stubs.requests.lock().unwrap().push(key.clone());
    let cache_control = req
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stubs.cache_controls.lock().unwrap().push(cache_control);

    match stubs.routes.get(&key) {
        Some((status, body)) => {
            HttpResponse::build(StatusCode::from_u16(*status).unwrap()).json(body)
        }
        None => HttpResponse::NotFound().finish(),
    }
}

#[allow(dead_code)]
pub async fn spawn_backend(routes: Vec<(&str, u16, serde_json::Value)>) -> FakeBackend {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let cache_controls = Arc::new(Mutex::new(Vec::new()));
    let data = web::Data::new(Stubs {
        routes: routes
            .into_iter()
            .map(|(key, status, body)| (key.to_string(), (status, body)))
            .collect(),
        requests: requests.clone(),
        cache_controls: cache_controls.clone(),
    });

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(stubbed))
    })
    .listen(listener)
    .expect("Failed to bind address")
    .run();
    let _ = tokio::spawn(server);

    FakeBackend {
        address: format!("http://127.0.0.1:{}", port),
        requests,
        cache_controls,
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub backend: FakeBackend,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn get_html(&self, path: &str) -> (u16, String) {
        let response = self
            .api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.");
        let status = response.status().as_u16();
        let body = response.text().await.expect("Failed to read body");
        (status, body)
    }
}

#[allow(dead_code)]
pub async fn spawn_app(routes: Vec<(&str, u16, serde_json::Value)>) -> TestApp {
    spawn_app_with(routes, &[]).await
}

#[allow(dead_code)]
pub async fn spawn_app_with(
    routes: Vec<(&str, u16, serde_json::Value)>,
    env: &[(&str, &str)],
) -> TestApp {
    let backend = spawn_backend(routes).await;

    let base = backend.address.clone();
    let overrides: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|key| match key {
        "QUIZ_API_BASE_URL" => Some(base.clone()),
        other => overrides.get(other).cloned(),
    })
    .expect("Failed to build config");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, config).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        api_client: reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap(),
        backend,
    }
}

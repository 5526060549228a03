#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::{http::StatusCode, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Path the fake open-data service answers on
    pub const UPSTREAM_PATH: &str = "/sample/xml/CardSubwayTime/1/5/202411/";

    /// A fake open-data service running on an ephemeral local port
    pub struct MockUpstream {
        pub url: String,
        hits: Arc<AtomicUsize>,
    }

    impl MockUpstream {
        /// Number of requests the fake service has answered
        pub fn hits(&self) -> usize {
            self.hits.load(Ordering::SeqCst)
        }
    }

    /// Start a fake upstream answering every request with `status` and `body`
    pub async fn spawn_upstream(status: StatusCode, body: &str) -> MockUpstream {
        let hits = Arc::new(AtomicUsize::new(0));
        let body = body.to_string();

        let app = {
            let hits = hits.clone();
            Router::new().fallback(move || {
                let hits = hits.clone();
                let body = body.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, [("content-type", "text/xml;charset=UTF-8")], body)
                }
            })
        };

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener.local_addr().expect("Mock upstream has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock upstream failed");
        });

        MockUpstream {
            url: format!("http://{}{}", addr, UPSTREAM_PATH),
            hits,
        }
    }

    /// URL of a port nothing listens on
    pub async fn unreachable_upstream_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind throwaway listener");
        let addr = listener.local_addr().expect("Probe listener has no address");
        drop(listener);
        format!("http://{}{}", addr, UPSTREAM_PATH)
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(source_url: &str) -> AppState {
        // Local mock servers must not be routed through an ambient HTTP proxy
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build test HTTP client");
        AppState::new(client, source_url)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing, proxying to `source_url`
    pub fn setup_test_app(source_url: &str) -> (Router, tracing::subscriber::DefaultGuard) {
        let guard = init_test_tracing();
        let router = create_router(setup_test_app_state(source_url), None);
        (router, guard)
    }
}

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header},
    middleware::{self, Next},
    response::Response,
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let static_site = Router::new()
        .fallback_service(
            ServeDir::new(&state.site_dir)
                .precompressed_br()
                .precompressed_gzip(),
        )
        .layer(middleware::from_fn(set_static_cache_control));

    let app = Router::new()
        .route("/api/health", axum::routing::get(routes::api::health))
        .route("/api/stats", axum::routing::get(routes::api::get_stats));

    app.layer(CompressionLayer::new())
        .fallback_service(static_site)
        .with_state(state)
}

async fn set_static_cache_control(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    if response.status().is_success()
        && let Some(cache_control) = cache_control_for_path(&path)
    {
        response.headers_mut().insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static(cache_control),
        );
    }

    response
}

fn cache_control_for_path(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension().and_then(|ext| ext.to_str());

    // Stats and site data change underneath the page.
    if ext == Some("json") {
        return Some("no-cache");
    }

    if is_hashed_bundle_asset(path) {
        return Some("public, max-age=31536000, immutable");
    }

    if path.starts_with("/images/")
        || path.starts_with("/fonts/")
        || matches!(
            ext,
            Some("png" | "jpg" | "jpeg" | "webp" | "svg" | "ico" | "woff2")
        )
    {
        return Some("public, max-age=86400");
    }

    None
}

fn is_hashed_bundle_asset(path: &str) -> bool {
    let Some(ext) = Path::new(path).extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    if !matches!(ext, "wasm" | "js" | "css") {
        return false;
    }

    let Some(filename) = Path::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };

    filename
        .split(['-', '_', '.'])
        .any(|segment| segment.len() >= 8 && segment.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_shared::StatsFile;
    use axum::body::Body;
    use axum::http::StatusCode;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            None,
            PathBuf::from("does-not-exist"),
            PathBuf::from("does-not-exist/discord-stats.json"),
        )
    }

    async fn get(app: Router, uri: &str) -> Response {
        let request = axum::http::Request::get(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[test]
    fn immutable_cache_for_hashed_bundle_assets() {
        assert_eq!(
            cache_control_for_path("/alpha-client-71578f6b278221f3_bg.wasm"),
            Some("public, max-age=31536000, immutable")
        );
        assert_eq!(
            cache_control_for_path("/styles-a93762ff3bf6d63a.css"),
            Some("public, max-age=31536000, immutable")
        );
    }

    #[test]
    fn short_cache_for_images_and_fonts() {
        assert_eq!(
            cache_control_for_path("/images/logo.png"),
            Some("public, max-age=86400")
        );
        assert_eq!(
            cache_control_for_path("/fonts/inter.woff2"),
            Some("public, max-age=86400")
        );
        assert_eq!(
            cache_control_for_path("/favicon.ico"),
            Some("public, max-age=86400")
        );
    }

    #[test]
    fn data_files_are_never_cached() {
        assert_eq!(cache_control_for_path("/discord-stats.json"), Some("no-cache"));
        assert_eq!(cache_control_for_path("/data/tournaments.json"), Some("no-cache"));
    }

    #[test]
    fn no_cache_header_override_for_html() {
        assert_eq!(cache_control_for_path("/"), None);
        assert_eq!(cache_control_for_path("/index.html"), None);
        assert_eq!(cache_control_for_path("/script.js"), None);
    }

    #[tokio::test]
    async fn health_reports_missing_stats() {
        let response = get(build_app(test_state()), "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "stats_available": false }));
    }

    #[tokio::test]
    async fn stats_endpoint_is_404_until_published() {
        let state = test_state();
        let response = get(build_app(state.clone()), "/api/stats").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        *state.stats.write().await = Some(StatsFile {
            server_name: "Alpha".to_string(),
            online_count: 12,
            ..StatsFile::default()
        });

        let response = get(build_app(state), "/api/stats").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-cache"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: StatsFile = serde_json::from_slice(&body).unwrap();
        assert_eq!(stats.online_count, 12);
    }

    #[tokio::test]
    async fn unknown_static_path_is_not_found() {
        let response = get(build_app(test_state()), "/nope.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

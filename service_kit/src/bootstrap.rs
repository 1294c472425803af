use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const SWAGGER_UI_PATH: &str = "/api-docs/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// CORS policy applied to every service: any origin, method and header.
pub fn default_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Swagger UI at `/api-docs/swagger-ui`, backed by the document served at `/api-docs/openapi.json`.
///
/// Both live below `/api-docs` so a service may route any single top-level segment itself.
pub fn swagger_router(openapi: OpenApi) -> Router {
    SwaggerUi::new(SWAGGER_UI_PATH)
        .url(OPENAPI_JSON_PATH, openapi)
        .into()
}

/// Binds `config.socket_addr()` and serves `app` until Ctrl-C or SIGTERM.
pub async fn serve(app: Router, config: &ServiceConfig) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;

    tracing::info!(
        service = %config.service_name,
        "Server running at http://{}",
        addr
    );
    tracing::info!(
        service = %config.service_name,
        "Swagger UI available at http://{}{}",
        addr,
        SWAGGER_UI_PATH
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(service = %config.service_name, "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_swagger_router_serves_openapi_document() {
        let openapi = utoipa::openapi::OpenApiBuilder::new()
            .info(
                utoipa::openapi::InfoBuilder::new()
                    .title("Test Service")
                    .version("0.1.0")
                    .build(),
            )
            .build();

        let response = swagger_router(openapi)
            .oneshot(
                Request::builder()
                    .uri(OPENAPI_JSON_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_serve_reports_bind_failure() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = ServiceConfig::new("test-service");
        config.host = "127.0.0.1".to_string();
        config.port = occupied.local_addr().unwrap().port();

        let err = serve(Router::new(), &config).await.unwrap_err();
        match err {
            Error::Bind { addr, .. } => assert_eq!(addr, config.socket_addr()),
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}

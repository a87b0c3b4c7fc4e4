use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::Router;
use carbon_core_contact_contracts::ContactFeatureService;
use carbon_di::Build;
use tokio::net::TcpListener;
use tracing::info;

mod errors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub real_ip_config: Option<Arc<RealIpConfig>>,
}

/// Read the client ip from `header`, but only if the request comes from
/// `set_from`.
#[derive(Debug, Clone)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!("listening on {addr}");

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .context("Failed to serve http requests")
    }

    fn router(self) -> Router<()> {
        let router = Router::new().nest("/api", routes::contact::router(self.contact.into()));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(self.config.real_ip_config)(router);
        middlewares::request_id::add(router)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use axum::{
        body::Body,
        extract::connect_info::MockConnectInfo,
        http::{Request, StatusCode},
    };
    use carbon_core_contact_contracts::MockContactFeatureService;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn request_id_header() {
        // Arrange
        let sut = RestServer {
            contact: MockContactFeatureService::new()
                .with_list(Default::default(), Ok(Vec::new())),
            config: RestServerConfig {
                addr: (Ipv4Addr::LOCALHOST, 0).into(),
                real_ip_config: None,
            },
        }
        .router()
        .layer(MockConnectInfo(SocketAddr::from((Ipv4Addr::LOCALHOST, 1234))));

        // Act
        let response = sut
            .oneshot(Request::get("/api/contacts/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("X-Request-Id").unwrap();
        assert_eq!(request_id.len(), 22);
    }
}

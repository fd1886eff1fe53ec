//! Hosted-environment passthrough integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use devserver_core::{HandlerConfig, is_hosted};
    use devserver_http::{NotFoundApp, wrap};
    use hyper::body::Incoming;
    use reqwest::StatusCode;

    use crate::{asset_tree, echo_app, path_str, spawn_server};

    #[tokio::test]
    async fn test_should_pass_static_paths_to_app_when_hosted() {
        let root = asset_tree();
        let handlers = [HandlerConfig::static_dir(
            "/static",
            path_str(&root.path().join("public")),
        )];
        let server = spawn_server(echo_app(), &handlers, is_hosted(Some("standard"))).await;

        let resp = reqwest::get(server.url("/static/foo.txt")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.expect("body"), "app:GET /static/foo.txt");

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_route_when_env_is_not_standard() {
        let root = asset_tree();
        let handlers = [HandlerConfig::static_dir(
            "/static",
            path_str(&root.path().join("public")),
        )];
        let server = spawn_server(echo_app(), &handlers, is_hosted(Some("flex"))).await;

        let resp = reqwest::get(server.url("/static/foo.txt")).await.expect("get");
        assert_eq!(resp.text().await.expect("body"), "foo!");

        server.stop().await;
    }

    #[test]
    fn test_should_accept_invalid_handlers_when_hosted() {
        let invalid = [HandlerConfig::default()];

        let gate = wrap::<Incoming>(Arc::new(NotFoundApp), &invalid, true).expect("passthrough");
        assert!(gate.is_passthrough());
        assert!(wrap::<Incoming>(Arc::new(NotFoundApp), &invalid, false).is_err());
    }
}

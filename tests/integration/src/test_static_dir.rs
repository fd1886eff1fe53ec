//! `static_dir` integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use devserver_core::HandlerConfig;
    use devserver_http::NotFoundApp;
    use reqwest::StatusCode;

    use crate::{asset_tree, path_str, spawn_server};

    fn handlers(root: &std::path::Path) -> Vec<HandlerConfig> {
        vec![HandlerConfig::static_dir(
            "/static",
            path_str(&root.join("public")),
        )]
    }

    #[tokio::test]
    async fn test_should_serve_file_with_static_headers() {
        let root = asset_tree();
        let server = spawn_server(Arc::new(NotFoundApp), &handlers(root.path()), false).await;

        let resp = reqwest::get(server.url("/static/foo.txt")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::OK);

        let headers = resp.headers();
        assert_eq!(headers["content-type"], "text/plain");
        assert_eq!(headers["content-length"], "4");
        assert_eq!(headers["cache-control"], "public");
        assert!(headers.contains_key("date"));
        assert!(headers.contains_key("last-modified"));
        assert_eq!(resp.text().await.expect("body"), "foo!");

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_serve_nested_file_with_guessed_type() {
        let root = asset_tree();
        let server = spawn_server(Arc::new(NotFoundApp), &handlers(root.path()), false).await;

        let resp = reqwest::get(server.url("/static/css/site.css")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/css");
        assert_eq!(resp.text().await.expect("body"), "body{}");

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_return_not_found_outside_prefix() {
        let root = asset_tree();
        let server = spawn_server(Arc::new(NotFoundApp), &handlers(root.path()), false).await;

        let resp = reqwest::get(server.url("/")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.text().await.expect("body"), "Not Found");

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_missing_file_and_directory() {
        let root = asset_tree();
        let server = spawn_server(Arc::new(NotFoundApp), &handlers(root.path()), false).await;

        for path in ["/static/missing.txt", "/static/css", "/static/", "/static"] {
            let resp = reqwest::get(server.url(path)).await.expect("get");
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "path {path}");
        }

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_not_escape_static_dir() {
        let root = asset_tree();
        let server = spawn_server(Arc::new(NotFoundApp), &handlers(root.path()), false).await;

        let resp = reqwest::get(server.url("/static/%2e%2e/secret.txt"))
            .await
            .expect("get");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        server.stop().await;
    }
}

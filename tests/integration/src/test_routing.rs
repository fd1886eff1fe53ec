//! Route ordering and delegation integration tests.

#[cfg(test)]
mod tests {
    use devserver_core::HandlerConfig;
    use reqwest::StatusCode;

    use crate::{asset_tree, echo_app, path_str, spawn_server};

    #[tokio::test]
    async fn test_should_delegate_script_routes_unchanged() {
        let server = spawn_server(echo_app(), &[HandlerConfig::script("/api")], false).await;

        let resp = reqwest::Client::new()
            .post(server.url("/api/items?limit=5"))
            .body("payload")
            .send()
            .await
            .expect("post");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.text().await.expect("body"),
            "app:POST /api/items?limit=5"
        );

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_not_reach_app_without_matching_route() {
        let server = spawn_server(echo_app(), &[HandlerConfig::script("/api")], false).await;

        let resp = reqwest::get(server.url("/elsewhere")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.text().await.expect("body"), "Not Found");

        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_let_first_matching_route_win() {
        let root = asset_tree();
        let public = path_str(&root.path().join("public"));

        let static_first = [
            HandlerConfig::static_dir("/static", public.clone()),
            HandlerConfig::script("/"),
        ];
        let server = spawn_server(echo_app(), &static_first, false).await;
        let resp = reqwest::get(server.url("/static/foo.txt")).await.expect("get");
        assert_eq!(resp.text().await.expect("body"), "foo!");
        let resp = reqwest::get(server.url("/home")).await.expect("get");
        assert_eq!(resp.text().await.expect("body"), "app:GET /home");
        server.stop().await;

        let script_first = [
            HandlerConfig::script("/"),
            HandlerConfig::static_dir("/static", public),
        ];
        let server = spawn_server(echo_app(), &script_first, false).await;
        let resp = reqwest::get(server.url("/static/foo.txt")).await.expect("get");
        assert_eq!(resp.text().await.expect("body"), "app:GET /static/foo.txt");
        server.stop().await;
    }

    #[tokio::test]
    async fn test_should_not_fall_through_on_static_miss() {
        let root = asset_tree();
        let handlers = [
            HandlerConfig::static_dir("/static", path_str(&root.path().join("public"))),
            HandlerConfig::script("/"),
        ];
        let server = spawn_server(echo_app(), &handlers, false).await;

        let resp = reqwest::get(server.url("/static/missing.txt")).await.expect("get");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.text().await.expect("body"), "Not Found");

        server.stop().await;
    }
}

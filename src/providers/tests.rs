//! Provider tests with HTTP mocking.

#[cfg(test)]
mod ovh_tests {
    use crate::config::{Config, Credentials, IpSources, UpdateTarget};
    use crate::error::DdnsError;
    use crate::providers::{OvhClient, ZoneApi};
    use crate::signer;
    use reqwest::Method;
    use std::net::Ipv4Addr;
    use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(api_base_url: String) -> Config {
        Config {
            api_base_url,
            credentials: Credentials {
                application_key: "app-key".to_string(),
                application_secret: "app-secret".to_string(),
                consumer_key: "consumer-key".to_string(),
            },
            records: vec![UpdateTarget::new("example.com", "www")],
            ip_sources: IpSources::default(),
        }
    }

    fn client(server: &MockServer) -> OvhClient {
        OvhClient::new(&config(format!("{}/", server.uri())))
            .unwrap()
            .with_refresh_base_url(format!("{}/1.0/domain/zone/", server.uri()))
    }

    async fn mount_lookup(server: &MockServer, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path("/example.com/record"))
            .and(query_param("fieldType", "A"))
            .and(query_param("subDomain", "www"))
            .and(header("X-Ovh-Application", "app-key"))
            .and(header("X-Ovh-Consumer", "consumer-key"))
            .and(header_exists("X-Ovh-Timestamp"))
            .and(header_exists("X-Ovh-Signature"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_lookup_returns_first_id() {
        let server = MockServer::start().await;
        mount_lookup(&server, 200, "[42]").await;

        let id = client(&server)
            .lookup_record_id("example.com", "www")
            .await
            .unwrap();
        assert_eq!(id, Some(42));
    }

    #[tokio::test]
    async fn test_lookup_empty_array_is_not_found() {
        let server = MockServer::start().await;
        mount_lookup(&server, 200, "[]").await;

        let id = client(&server)
            .lookup_record_id("example.com", "www")
            .await
            .unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_lookup_garbage_is_not_found() {
        let server = MockServer::start().await;
        mount_lookup(&server, 200, "this is not json").await;

        let id = client(&server)
            .lookup_record_id("example.com", "www")
            .await
            .unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_lookup_error_status() {
        let server = MockServer::start().await;
        mount_lookup(&server, 403, r#"{"message":"This credential does not exist"}"#).await;

        let result = client(&server).lookup_record_id("example.com", "www").await;
        assert!(matches!(result, Err(DdnsError::Api { status: 403, .. })));
    }

    #[tokio::test]
    async fn test_update_success() {
        for status in [200, 204] {
            let server = MockServer::start().await;

            Mock::given(method("PUT"))
                .and(path("/example.com/record/42"))
                .and(header("X-Ovh-Application", "app-key"))
                .and(header("X-Ovh-Consumer", "consumer-key"))
                .and(header("Content-Type", "application/json"))
                .and(header_exists("X-Ovh-Signature"))
                .and(body_string(r#"{"target":"203.0.113.7"}"#))
                .respond_with(ResponseTemplate::new(status))
                .expect(1)
                .mount(&server)
                .await;

            client(&server)
                .update_record_target("example.com", 42, Ipv4Addr::new(203, 0, 113, 7))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_update_invalid_signature() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/example.com/record/42"))
            .respond_with(
                ResponseTemplate::new(403).set_body_string(r#"{"message":"Invalid signature"}"#),
            )
            .mount(&server)
            .await;

        let result = client(&server)
            .update_record_target("example.com", 42, Ipv4Addr::new(203, 0, 113, 7))
            .await;

        match result {
            Err(DdnsError::Api { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("Invalid signature"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_connection_error() {
        let client = OvhClient::new(&config("http://127.0.0.1:1/".to_string())).unwrap();

        let result = client
            .update_record_target("example.com", 42, Ipv4Addr::new(203, 0, 113, 7))
            .await;
        assert!(matches!(result, Err(DdnsError::Connection(_))));
    }

    #[tokio::test]
    async fn test_refresh_uses_refresh_host() {
        let server = MockServer::start().await;
        let zone_api = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1.0/domain/zone/example.com/refresh"))
            .and(header("X-Ovh-Application", "app-key"))
            .and(header_exists("X-Ovh-Signature"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        // The configurable API base must not receive the refresh call.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&zone_api)
            .await;

        let client = OvhClient::new(&config(format!("{}/", zone_api.uri())))
            .unwrap()
            .with_refresh_base_url(format!("{}/1.0/domain/zone/", server.uri()));

        client.refresh_zone("example.com").await.unwrap();
    }

    #[tokio::test]
    async fn test_refresh_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1.0/domain/zone/example.com/refresh"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let result = client(&server).refresh_zone("example.com").await;
        assert!(matches!(result, Err(DdnsError::Api { status: 500, .. })));
    }

    #[test]
    fn test_signature_covers_wire_request() {
        let client = OvhClient::new(&config("https://eu.api.ovh.com/1.0/domain/zone/".to_string()))
            .unwrap();
        let body = r#"{"target":"203.0.113.7"}"#;
        let request = client
            .signed_request(
                Method::PUT,
                "https://eu.api.ovh.com/1.0/domain/zone/example.com/record/42",
                body,
            )
            .unwrap();

        let headers = request.headers();
        let timestamp: i64 = headers["X-Ovh-Timestamp"].to_str().unwrap().parse().unwrap();
        let sent_body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(sent_body, body.as_bytes());

        let expected = signer::sign(
            "app-secret",
            "consumer-key",
            request.method().as_str(),
            request.url().as_str(),
            std::str::from_utf8(sent_body).unwrap(),
            timestamp,
        );
        assert_eq!(headers["X-Ovh-Signature"].to_str().unwrap(), expected);
        assert_eq!(headers["X-Ovh-Application"], "app-key");
        assert_eq!(headers["X-Ovh-Consumer"], "consumer-key");
    }

    #[test]
    fn test_get_has_no_body() {
        let client = OvhClient::new(&config("https://eu.api.ovh.com/1.0/domain/zone/".to_string()))
            .unwrap();
        let url = "https://eu.api.ovh.com/1.0/domain/zone/example.com/record?fieldType=A&subDomain=www";
        let request = client.signed_request(Method::GET, url, "").unwrap();

        assert!(request.body().is_none());
        assert_eq!(request.url().as_str(), url);

        let timestamp: i64 = request.headers()["X-Ovh-Timestamp"]
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        let expected = signer::sign("app-secret", "consumer-key", "GET", url, "", timestamp);
        assert_eq!(request.headers()["X-Ovh-Signature"], expected.as_str());
    }
}

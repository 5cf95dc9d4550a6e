//! API key registry routes

#[cfg(test)]
mod tests {
    use crate::common::MockGemini;
    use crate::common::assertions::ErrorEnvelopeAssertions;
    use actix_web::test;
    use gemini_gateway::server::create_app;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_generate_block_unblock() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/api-key/generate")
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let key = created["key"].as_str().unwrap().to_string();
        assert_eq!(key.len(), 32);
        assert_eq!(created["isBlocked"], false);
        assert_eq!(created["usageCount"], 0);
        assert!(created["expiresAt"].is_string());

        let req = test::TestRequest::patch()
            .uri(&format!("/api-key/{}/block", key))
            .to_request();
        let blocked: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(blocked["isBlocked"], true);

        let req = test::TestRequest::patch()
            .uri(&format!("/api-key/{}/unblock", key))
            .to_request();
        let unblocked: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unblocked["isBlocked"], false);

        let req = test::TestRequest::get().uri("/api-key").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["key"], key.as_str());
    }

    #[actix_web::test]
    async fn test_list_in_creation_order() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let mut created = Vec::new();
        for _ in 0..3 {
            let req = test::TestRequest::post()
                .uri("/api-key/generate")
                .to_request();
            let key: Value = test::call_and_read_body_json(&app, req).await;
            created.push(key["key"].clone());
        }

        let req = test::TestRequest::get().uri("/api-key").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        let listed: Vec<Value> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k["key"].clone())
            .collect();
        assert_eq!(listed, created);
    }

    #[actix_web::test]
    async fn test_update_expiration() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/api-key/generate")
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let key = created["key"].as_str().unwrap();

        let req = test::TestRequest::patch()
            .uri(&format!("/api-key/{}/expiration", key))
            .set_json(json!({ "expiresAt": "2031-01-01T00:00:00Z" }))
            .to_request();
        let updated: Value = test::call_and_read_body_json(&app, req).await;
        assert!(updated["expiresAt"].as_str().unwrap().starts_with("2031-01-01T00:00:00"));

        let req = test::TestRequest::patch()
            .uri(&format!("/api-key/{}/expiration", key))
            .set_json(json!({ "expiresAt": "whenever" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = test::read_body_json(resp).await;
        body.assert_error("invalid_request_error", 400);
    }

    #[actix_web::test]
    async fn test_missing_key_is_not_found() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        for uri in ["/api-key/missing/block", "/api-key/missing/unblock"] {
            let req = test::TestRequest::patch().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 404);
            let body: Value = test::read_body_json(resp).await;
            body.assert_error("not_found_error", 404);
            assert_eq!(body.error_message(), "API key not found");
        }

        let req = test::TestRequest::patch()
            .uri("/api-key/missing/expiration")
            .set_json(json!({ "expiresAt": "2031-01-01" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 404);
    }
}

//! Legacy text completions through the HTTP surface

#[cfg(test)]
mod tests {
    use crate::common::assertions::ErrorEnvelopeAssertions;
    use crate::common::{MockGemini, fixtures};
    use actix_web::test;
    use gemini_gateway::server::create_app;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_completion() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "there once was a crab").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/completions")
            .set_json(fixtures::completion_request("gemini-pro", "Write a limerick"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["object"], "text_completion");
        assert!(body["id"].as_str().unwrap().starts_with("cmpl-"));
        assert_eq!(body["model"], "gemini-pro");
        assert_eq!(body["choices"][0]["text"], "there once was a crab");
        assert_eq!(body["choices"][0]["index"], 0);
        assert!(body["choices"][0]["logprobs"].is_null());
        assert_eq!(body["choices"][0]["finish_reason"], "stop");
        // 16 prompt chars, 21 generated
        assert_eq!(
            body["usage"],
            json!({ "prompt_tokens": 4, "completion_tokens": 6, "total_tokens": 10 })
        );
    }

    #[actix_web::test]
    async fn test_prompt_is_sent_without_role() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro-vision", "ok").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/completions")
            .set_json(json!({
                "model": "gemini-pro-vision",
                "prompt": "Say ok",
                "max_tokens": 16
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let received = gemini.received().await;
        let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert!(sent["contents"][0].get("role").is_none());
        assert_eq!(sent["contents"][0]["parts"][0]["text"], "Say ok");
        assert_eq!(sent["generationConfig"]["maxOutputTokens"], 16);
        assert_eq!(sent["generationConfig"]["temperature"], 0.7);
    }

    #[actix_web::test]
    async fn test_empty_prompt_is_rejected() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/completions")
            .set_json(fixtures::completion_request("gemini-pro", ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("invalid_request_error", 400);
        assert_eq!(body.error_message(), "prompt should not be empty");
        assert!(gemini.received().await.is_empty());
    }

    #[actix_web::test]
    async fn test_missing_model_is_rejected() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/completions")
            .set_json(json!({ "prompt": "hello" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("invalid_request_error", 400);
    }
}

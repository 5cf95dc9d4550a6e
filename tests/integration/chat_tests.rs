//! Chat completions through the HTTP surface

#[cfg(test)]
mod tests {
    use crate::common::assertions::{ErrorEnvelopeAssertions, sse_data_frames};
    use crate::common::{MockGemini, fixtures};
    use actix_web::test;
    use gemini_gateway::server::create_app;
    use serde_json::{Value, json};
    use wiremock::ResponseTemplate;

    #[actix_web::test]
    async fn test_non_stream_chat_completion() {
        let gemini = MockGemini::start().await;
        gemini
            .reply_text("gemini-pro", "The capital of France is Paris.")
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request(
                "gemini-pro",
                "What is the capital of France?",
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert!(resp.headers().contains_key("x-request-id"));

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["object"], "chat.completion");
        assert_eq!(body["model"], "gemini-pro");
        assert!(body["id"].as_str().unwrap().starts_with("chatcmpl-"));
        assert!(body["system_fingerprint"].as_str().unwrap().starts_with("fp_"));

        let choices = body["choices"].as_array().unwrap();
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0]["index"], 0);
        assert_eq!(choices[0]["finish_reason"], "stop");
        assert_eq!(choices[0]["message"]["role"], "assistant");
        assert_eq!(
            choices[0]["message"]["content"],
            "The capital of France is Paris."
        );
        assert!(body.get("usage").is_none());
    }

    #[actix_web::test]
    async fn test_outbound_payload_shape() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "ok").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(json!({
                "model": "gemini-pro",
                "messages": [
                    { "role": "system", "content": "Be brief." },
                    { "role": "user", "content": "Hi" },
                    { "role": "assistant", "content": "Hello!" },
                    { "role": "user", "content": [
                        { "type": "text", "text": "first" },
                        { "type": "text", "text": "second" }
                    ]}
                ],
                "temperature": 0.2
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let received = gemini.received().await;
        assert_eq!(received.len(), 1);
        let sent: Value = serde_json::from_slice(&received[0].body).unwrap();

        let roles: Vec<&str> = sent["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, ["user", "user", "model", "user"]);
        assert_eq!(sent["contents"][3]["parts"][0]["text"], "first\nsecond");
        assert_eq!(sent["generationConfig"]["temperature"], 0.2);
        assert_eq!(sent["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(sent["generationConfig"]["topP"], 0.8);
        assert_eq!(sent["generationConfig"]["topK"], 40);
    }

    #[actix_web::test]
    async fn test_missing_model_uses_default() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "defaulted").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(json!({ "messages": [{ "role": "user", "content": "hi" }] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["model"], "gemini-pro");
        assert_eq!(body["choices"][0]["message"]["content"], "defaulted");
    }

    #[actix_web::test]
    async fn test_streaming_chat_completion() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "Paris").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_stream_request(
                "gemini-pro",
                "What is the capital of France?",
                false,
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(resp.headers().get("content-type").unwrap(), "text/event-stream");
        assert_eq!(resp.headers().get("cache-control").unwrap(), "no-cache");
        assert_eq!(resp.headers().get("connection").unwrap(), "keep-alive");

        let body = test::read_body(resp).await;
        let frames = sse_data_frames(std::str::from_utf8(&body).unwrap());
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2], "[DONE]");

        let first: Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(first["object"], "chat.completion.chunk");
        assert_eq!(first["choices"][0]["delta"]["role"], "assistant");
        assert_eq!(first["choices"][0]["delta"]["content"], "Paris");
        assert!(first["choices"][0]["finish_reason"].is_null());

        let second: Value = serde_json::from_str(&frames[1]).unwrap();
        assert_eq!(second["id"], first["id"]);
        assert_eq!(second["choices"][0]["delta"], json!({}));
        assert_eq!(second["choices"][0]["finish_reason"], "stop");
    }

    #[actix_web::test]
    async fn test_include_usage_adds_usage_block() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "12345678").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let mut request = fixtures::chat_request("gemini-pro", "abcd");
        request["stream_options"] = json!({ "include_usage": true });
        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(request)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["usage"],
            json!({ "prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3 })
        );
    }

    #[actix_web::test]
    async fn test_retry_once_after_bad_request() {
        let gemini = MockGemini::start().await;
        MockGemini::expect_call("gemini-pro", "generateContent")
            .respond_with(ResponseTemplate::new(400).set_body_json(fixtures::error_body(
                400,
                "Invalid JSON payload",
                "INVALID_ARGUMENT",
            )))
            .up_to_n_times(1)
            .expect(1)
            .mount(&gemini.server)
            .await;
        MockGemini::expect_call("gemini-pro", "generateContent")
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::generate_response("second try")),
            )
            .expect(1)
            .mount(&gemini.server)
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request("gemini-pro", "hello"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["choices"][0]["message"]["content"], "second try");
        assert_eq!(gemini.received().await.len(), 2);
    }

    #[actix_web::test]
    async fn test_second_bad_request_is_reported() {
        let gemini = MockGemini::start().await;
        gemini
            .reply(
                "gemini-pro",
                "generateContent",
                400,
                fixtures::error_body(400, "Invalid JSON payload", "INVALID_ARGUMENT"),
            )
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request("gemini-pro", "hello"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("upstream_error", 400);
        let message = body.error_message();
        assert!(message.starts_with("Gemini API error: Invalid JSON payload"));
        assert!(message.contains("\nRequest payload: "));
        assert_eq!(gemini.received().await.len(), 2);
    }

    #[actix_web::test]
    async fn test_rate_limit_is_mirrored() {
        let gemini = MockGemini::start().await;
        gemini
            .reply(
                "gemini-pro",
                "generateContent",
                429,
                fixtures::error_body(429, "Resource has been exhausted", "RESOURCE_EXHAUSTED"),
            )
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request("gemini-pro", "hello"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 429);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("upstream_error", 429);
        assert_eq!(
            body.error_message(),
            "Gemini API error: Resource has been exhausted"
        );
        assert_eq!(gemini.received().await.len(), 1);
    }

    #[actix_web::test]
    async fn test_stream_failure_is_plain_json() {
        let gemini = MockGemini::start().await;
        gemini
            .reply(
                "gemini-pro",
                "generateContent",
                503,
                fixtures::error_body(503, "The model is overloaded", "UNAVAILABLE"),
            )
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_stream_request("gemini-pro", "hello", false))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 503);
        assert_eq!(resp.headers().get("content-type").unwrap(), "application/json");

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("upstream_error", 503);
    }

    #[actix_web::test]
    async fn test_empty_candidates_fall_back_to_placeholder() {
        let gemini = MockGemini::start().await;
        gemini
            .reply("gemini-pro", "generateContent", 200, json!({ "candidates": [] }))
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request("gemini-pro", "hello"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["choices"][0]["message"]["content"],
            "No response generated"
        );
    }

    #[actix_web::test]
    async fn test_control_characters_are_removed() {
        let gemini = MockGemini::start().await;
        gemini
            .reply_text("gemini-pro", "clean\u{0}\u{7}\u{FFFE} text\n")
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .set_json(fixtures::chat_request("gemini-pro", "hello"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["choices"][0]["message"]["content"], "clean text\n");
    }

    #[actix_web::test]
    async fn test_dangling_surrogate_in_request_is_dropped() {
        let gemini = MockGemini::start().await;
        gemini.reply_text("gemini-pro", "ok").await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/chat/completions")
            .insert_header(("content-type", "application/json"))
            .set_payload(concat!(
                r#"{"model":"gemini-pro","#,
                r#""messages":[{"role":"user","content":"truncated emoji \ud83d"}]}"#
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let received = gemini.received().await;
        assert_eq!(received.len(), 1);
        let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(sent["contents"][0]["parts"][0]["text"], "truncated emoji ");
    }
}

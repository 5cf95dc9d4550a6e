//! Embeddings through the HTTP surface

#[cfg(test)]
mod tests {
    use crate::common::assertions::ErrorEnvelopeAssertions;
    use crate::common::{MockGemini, fixtures};
    use actix_web::test;
    use gemini_gateway::server::create_app;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_single_input_uses_embed_content() {
        let gemini = MockGemini::start().await;
        gemini
            .reply(
                "text-embedding-004",
                "embedContent",
                200,
                fixtures::embed_response(&[0.1, 0.2, 0.3]),
            )
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/embeddings")
            .set_json(fixtures::embedding_request(json!("hello world")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["object"], "list");
        assert_eq!(body["model"], "text-embedding-004");
        assert_eq!(body["data"][0]["object"], "embedding");
        assert_eq!(body["data"][0]["index"], 0);
        assert_eq!(body["data"][0]["embedding"], json!([0.1, 0.2, 0.3]));
        assert_eq!(
            body["usage"],
            json!({ "prompt_tokens": 3, "total_tokens": 3 })
        );

        let received = gemini.received().await;
        let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(sent["content"]["parts"][0]["text"], "hello world");
    }

    #[actix_web::test]
    async fn test_batch_keeps_input_order() {
        let gemini = MockGemini::start().await;
        gemini
            .reply(
                "text-embedding-004",
                "batchEmbedContents",
                200,
                fixtures::batch_embed_response(&[vec![1.0], vec![2.0], vec![3.0]]),
            )
            .await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/embeddings")
            .set_json(fixtures::embedding_request(json!(["one", "two", "three"])))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        for (i, item) in data.iter().enumerate() {
            assert_eq!(item["index"], i);
            assert_eq!(item["embedding"], json!([(i + 1) as f64]));
        }

        let received = gemini.received().await;
        let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
        let requests = sent["requests"].as_array().unwrap();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0]["model"], "models/text-embedding-004");
        assert_eq!(requests[2]["content"]["parts"][0]["text"], "three");
    }

    #[actix_web::test]
    async fn test_other_model_is_rejected() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/embeddings")
            .set_json(json!({ "model": "text-embedding-ada-002", "input": "hi" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("invalid_request_error", 400);
        assert_eq!(
            body.error_message(),
            "Invalid model. Only text-embedding-004 is supported for embeddings."
        );
        assert!(gemini.received().await.is_empty());
    }

    #[actix_web::test]
    async fn test_empty_input_is_rejected() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        for input in [json!(""), json!([])] {
            let req = test::TestRequest::post()
                .uri("/v1/embeddings")
                .set_json(fixtures::embedding_request(input))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status().as_u16(), 400);
        }
    }

    #[actix_web::test]
    async fn test_non_string_input_is_rejected() {
        let gemini = MockGemini::start().await;
        let app = test::init_service(create_app(gemini.state())).await;

        let req = test::TestRequest::post()
            .uri("/v1/embeddings")
            .set_json(fixtures::embedding_request(json!(["ok", 42])))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400);

        let body: Value = test::read_body_json(resp).await;
        body.assert_error("invalid_request_error", 400);
    }
}

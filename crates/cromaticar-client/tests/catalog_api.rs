//! Catalog client against a mocked API.

use std::sync::Arc;
use std::time::Duration;

use cromaticar_client::{CatalogClient, ClientConfig};
use cromaticar_core::normalize::normalize_color;
use cromaticar_core::{
    render_state, resolve_detail, CascadingFilter, CatalogError, CatalogSource, ColorRecord,
    FilterPhase, ResultView, SearchController, SearchFilters, SearchOutcome, SearchRequest,
    SearchStatus, StoreKind, StoreSearchRequest,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    CatalogClient::new(&ClientConfig {
        base_url: format!("{}/api", server.uri()),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn search_sends_canonical_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/search"))
        .and(query_param("montadora", "Ford"))
        .and(query_param("ano", "2022"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_cor": 5, "nome_cor": "Azul Belize", "codigo_cor": "A2", "rgb": "28,70,140" },
            "not a record"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = SearchRequest::from_filters(&SearchFilters::default().brand("Ford").year(2022));
    let raws = client.search_colors(&request).await.unwrap();

    assert_eq!(raws.len(), 1);
    let color = normalize_color(&raws[0]).unwrap();
    assert_eq!(color.hex_code, "#1C468C");
}

#[tokio::test]
async fn server_error_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/brands"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_brands().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("database down"));
}

#[tokio::test]
async fn missing_color_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Cor não encontrada" })))
        .mount(&server)
        .await;

    let err = resolve_detail(&client_for(&server), vec!["77".to_string()]).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn list_404_keeps_its_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/search"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.search_colors(&SearchRequest::default()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let controller = SearchController::new(Arc::new(client));
    let outcome = controller.search(SearchFilters::default().brand("Ford")).await;
    assert_eq!(outcome, SearchOutcome::Failed);

    let message = controller.state().error_message.unwrap();
    assert!(message.contains("404"), "{}", message);
}

#[tokio::test]
async fn detail_reconciles_field_variants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_cor": 3,
            "nome_cor": "Branco Summit",
            "codigoHex": "#FAFAFA",
            "rgb": "250,250,250",
            "montadora": "Chevrolet",
            "modelName": "Onix",
            "ano": 2022
        })))
        .mount(&server)
        .await;

    let color = resolve_detail(&client_for(&server), "3").await.unwrap();
    assert_eq!(
        color,
        ColorRecord {
            id: "3".to_string(),
            display_name: "Branco Summit".to_string(),
            hex_code: "#FAFAFA".to_string(),
            rgb_triple: Some("250,250,250".to_string()),
            color_code: None,
            brand_name: Some("Chevrolet".to_string()),
            model_name: Some("Onix".to_string()),
            model_year: Some(2022),
            category: None,
        }
    );
}

#[tokio::test]
async fn non_object_detail_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let err = client_for(&server).get_color("1").await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/popular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let client = client_for(&server).with_timeout(Duration::from_millis(100)).unwrap();
    let err = client.popular_colors().await.unwrap_err();
    assert!(matches!(err, CatalogError::Timeout(_)));
}

#[tokio::test]
async fn unreachable_api_is_network_error() {
    let client = CatalogClient::new(&ClientConfig {
        base_url: "http://127.0.0.1:9/api".to_string(),
        timeout_secs: 2,
    })
    .unwrap();

    let err = client.list_brands().await.unwrap_err();
    assert!(matches!(err, CatalogError::Network { status: None, .. }));
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn controller_surfaces_http_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/colors/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let controller = SearchController::new(Arc::new(client_for(&server)));
    let outcome = controller.search(SearchFilters::default().query("prata")).await;
    assert_eq!(outcome, SearchOutcome::Failed);

    let state = controller.state();
    assert_eq!(state.status, SearchStatus::Error);
    assert!(state.results.is_empty());
    match render_state(&state) {
        ResultView::Error(message) => assert!(message.contains("500")),
        other => panic!("expected error view, got {}", other.name()),
    }
}

#[tokio::test]
async fn cascading_filter_loads_models_for_brand() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_montadora": 1, "nome": "Chevrolet" },
            { "id_montadora": 2, "nome": "Ford" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/brands/2/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_modelo": 21, "nome": "Ranger", "id_montadora": 2 },
            { "id_modelo": 22, "nome": "Fiesta", "id_montadora": 2 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut filter = CascadingFilter::new();
    filter.load_brands(&client).await.unwrap();

    assert_eq!(filter.select_brand("ford", &client).await.unwrap(), FilterPhase::BrandSelected);
    filter.select_model("Fiesta").unwrap();
    assert_eq!(filter.select_year(Some(2019)), FilterPhase::FullySpecified);
}

#[tokio::test]
async fn store_search_posts_request_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/automotive-search/search-stores"))
        .and(body_partial_json(json!({ "color_name": "Vermelho Chili", "car_model": "S10" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Loja Online",
                "url": "https://loja.example.com",
                "type": "online",
                "ships_to_cep": true,
                "has_product": false,
                "product_match": "Possível correspondência"
            },
            {
                "name": "Tintas Centro",
                "url": "https://maps.example.com/tintas",
                "type": "physical",
                "address": "Rua A, 10",
                "distance_km": 1.2,
                "time_min": 5.0,
                "ships_to_cep": false,
                "has_product": true,
                "product_match": "Tinta Vermelho Chili S10"
            }
        ])))
        .mount(&server)
        .await;

    let request = StoreSearchRequest {
        color_name: "Vermelho Chili".to_string(),
        color_code: "GPJ".to_string(),
        car_brand: "Chevrolet".to_string(),
        car_model: "S10".to_string(),
        car_year: "2023".to_string(),
        user_cep: Some("01310100".to_string()),
        ..Default::default()
    };

    let stores = client_for(&server).search_stores(&request).await.unwrap();
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].kind, StoreKind::Online);
    assert!(stores[0].ships_to_cep);
    assert_eq!(stores[1].distance_km, Some(1.2));
}

#[tokio::test]
async fn brand_detail_and_colors_use_brand_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/brands/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id_montadora": 2, "nome": "Ford", "modelos": ["Ranger", "Fiesta"], "total_cores": 3
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/brands/2/colors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id_cor": 5, "nome_cor": "Azul Belize", "rgb": "28,70,140" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/colors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let brand = cromaticar_core::normalize::normalize_brand(&client.get_brand("2").await.unwrap()).unwrap();
    assert_eq!(brand.name, "Ford");
    assert_eq!(brand.models.len(), 2);
    assert_eq!(brand.color_count, Some(3));

    let colors = client.brand_colors("2").await.unwrap();
    assert_eq!(colors.len(), 1);
    assert!(client.list_colors().await.unwrap().is_empty());

    assert!(matches!(client.get_brand("9").await, Err(CatalogError::NotFound(_))));
}

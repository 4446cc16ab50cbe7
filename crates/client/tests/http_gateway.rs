//! `HttpGateway` against an in-process axum stub that speaks the API's wire
//! format, including its quirks (numeric ids, null sector names, the
//! Portuguese acknowledgement fields).

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use stockroom_client::{ClientError, Gateway, HttpGateway};
use stockroom_core::inventory::{
    ItemCategory, Sector, TransactionDraft, TransactionType, UNKNOWN_SECTOR_NAME,
};

/// Request bodies the stub received, keyed by "METHOD path".
type Seen = Arc<Mutex<Vec<(String, Value)>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn stub(seen: Seen) -> Router {
    Router::new()
        .route(
            "/setores",
            get(|| async { Json(json!([{ "id": 2, "name": "Almoxarifado" }, { "id": 1, "name": "TI" }])) })
                .post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                    let name = body["name"].clone();
                    seen.lock().unwrap().push(("POST /setores".into(), body));
                    (StatusCode::CREATED, Json(json!({ "id": 41, "name": name })))
                }),
        )
        .route(
            "/setores/{id}",
            put(|State(seen): State<Seen>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push((format!("PUT /setores/{id}"), body));
                Json(json!({ "success": true, "movimentacoes_atualizadas": 3 }))
            })
            .delete(|Path(_id): Path<String>| async {
                Json(json!({ "success": true, "movimentacoes_vinculadas": 2 }))
            }),
        )
        .route(
            "/movimentacoes",
            get(|| async {
                Json(json!([{
                    "id": 9,
                    "type": "SAIDA",
                    "sectorId": 2,
                    "sectorName": null,
                    "date": "2024-01-12",
                    "description": "Cadeira",
                    "category": "PATRIMONIO",
                    "quantity": 1,
                    "assetId": "0042",
                    "timestamp": 1_705_000_000_000_i64
                }]))
            })
            .post(|State(seen): State<Seen>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push(("POST /movimentacoes".into(), body));
                (StatusCode::CREATED, Json(json!({ "success": true, "id": 17 })))
            }),
        )
        .route(
            "/movimentacoes/{id}",
            put(|State(seen): State<Seen>, Path(id): Path<String>, Json(body): Json<Value>| async move {
                seen.lock().unwrap().push((format!("PUT /movimentacoes/{id}"), body));
                Json(json!({ "sucesso": true }))
            })
            .delete(|Path(_id): Path<String>| async { Json(json!({ "sucesso": true })) }),
        )
        .with_state(seen)
}

async fn gateway() -> (HttpGateway, Seen) {
    let seen = Seen::default();
    let url = spawn(stub(seen.clone())).await;
    (HttpGateway::new(url), seen)
}

fn cargo_draft() -> TransactionDraft {
    TransactionDraft {
        transaction_type: TransactionType::In,
        sector_id: Some("2".into()),
        sector_name: "Almoxarifado".into(),
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        description: "Caixas A4".into(),
        category: ItemCategory::Cargo,
        quantity: 5,
        asset_id: None,
        timestamp: 1_704_880_000_000,
    }
}

// ---------------------------------------------------------------------------
// Sectors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sector_ids_are_normalized_to_strings() {
    let (gateway, _) = gateway().await;
    let sectors = gateway.list_sectors().await.unwrap();

    assert_eq!(
        sectors,
        vec![
            Sector { id: "2".into(), name: "Almoxarifado".into() },
            Sector { id: "1".into(), name: "TI".into() },
        ]
    );
}

#[tokio::test]
async fn create_sector_returns_store_assigned_id() {
    let (gateway, seen) = gateway().await;
    let created = gateway.create_sector("Compras").await.unwrap();

    assert_eq!(created, Sector { id: "41".into(), name: "Compras".into() });
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        [("POST /setores".to_string(), json!({ "name": "Compras" }))]
    );
}

#[tokio::test]
async fn rename_and_delete_report_counts() {
    let (gateway, seen) = gateway().await;
    let sector = Sector { id: "2".into(), name: "Depósito".into() };

    assert_eq!(gateway.rename_sector(&sector).await.unwrap(), 3);
    assert_eq!(gateway.delete_sector("2").await.unwrap(), 2);
    assert_eq!(
        seen.lock().unwrap()[0],
        ("PUT /setores/2".to_string(), json!({ "name": "Depósito" }))
    );
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listed_transactions_are_normalized() {
    let (gateway, _) = gateway().await;
    let listed = gateway.list_transactions().await.unwrap();

    assert_eq!(listed.len(), 1);
    let tx = &listed[0];
    assert_eq!(tx.id, "9");
    assert_eq!(tx.transaction_type, TransactionType::Out);
    assert_eq!(tx.sector_id.as_deref(), Some("2"));
    assert_eq!(tx.sector_name, UNKNOWN_SECTOR_NAME);
    assert_eq!(tx.category, ItemCategory::Asset);
    assert_eq!(tx.asset_id.as_deref(), Some("0042"));
}

#[tokio::test]
async fn add_transaction_sends_wire_fields_and_attaches_id() {
    let (gateway, seen) = gateway().await;
    let saved = gateway.add_transaction(&cargo_draft()).await.unwrap();

    assert_eq!(saved.id, "17");
    assert_eq!(saved.to_draft(), cargo_draft());

    let seen = seen.lock().unwrap();
    let (route, body) = &seen[0];
    assert_eq!(route, "POST /movimentacoes");
    assert_eq!(
        *body,
        json!({
            "type": "ENTRADA",
            "sectorId": "2",
            "sectorName": "Almoxarifado",
            "date": "2024-01-10",
            "description": "Caixas A4",
            "category": "CARGA",
            "quantity": 5,
            "assetId": null,
            "timestamp": 1_704_880_000_000_i64
        })
    );
}

#[tokio::test]
async fn update_and_delete_transaction_succeed() {
    let (gateway, seen) = gateway().await;
    let tx = stockroom_core::inventory::Transaction::from_draft("9", cargo_draft());

    gateway.update_transaction(&tx).await.unwrap();
    gateway.delete_transaction("9").await.unwrap();
    assert_eq!(seen.lock().unwrap()[0].0, "PUT /movimentacoes/9");
}

#[tokio::test]
async fn listing_skips_rows_with_unknown_encodings() {
    let app = Router::new().route(
        "/movimentacoes",
        get(|| async {
            Json(json!([
                {
                    "id": 9,
                    "type": "SAIDA",
                    "sectorId": 2,
                    "sectorName": "TI",
                    "date": "2024-01-12",
                    "description": "Cadeira",
                    "category": "PATRIMONIO",
                    "quantity": 1,
                    "assetId": "0042",
                    "timestamp": 1_705_000_000_000_i64
                },
                {
                    "id": 10,
                    "type": "entrada",
                    "sectorId": 2,
                    "sectorName": "TI",
                    "date": "2024-01-11",
                    "description": "Toner",
                    "category": "CARGA",
                    "quantity": 2,
                    "assetId": null,
                    "timestamp": 1_704_900_000_000_i64
                },
                {
                    "id": 11,
                    "type": "ENTRADA",
                    "sectorId": 2,
                    "sectorName": "TI",
                    "date": "2024-01-10",
                    "description": "Papel",
                    "category": "ESTOQUE",
                    "quantity": 3,
                    "assetId": null,
                    "timestamp": 1_704_800_000_000_i64
                }
            ]))
        }),
    );
    let gateway = HttpGateway::new(spawn(app).await);

    let listed = gateway.list_transactions().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["9"]);
    assert_eq!(listed[0].description, "Cadeira");
}

#[tokio::test]
async fn ids_are_sent_as_a_single_encoded_segment() {
    let seen = Seen::default();
    let record = |State(seen): State<Seen>, uri: Uri| async move {
        seen.lock().unwrap().push((format!("DELETE {}", uri.path()), Value::Null));
        Json(json!({ "success": true, "sucesso": true, "movimentacoes_vinculadas": 0 }))
    };
    let app = Router::new()
        .route("/setores/{id}", delete(record))
        .route("/movimentacoes/{id}", delete(record))
        .with_state(seen.clone());
    let gateway = HttpGateway::new(spawn(app).await);

    gateway.delete_sector("1/../../movimentacoes/5").await.unwrap();
    assert_matches!(
        gateway.delete_transaction("..").await,
        Err(ClientError::InvalidUrl(_))
    );
    gateway.delete_transaction("7").await.unwrap();

    let routes: Vec<String> = seen.lock().unwrap().iter().map(|(r, _)| r.clone()).collect();
    assert_eq!(
        routes,
        [
            "DELETE /setores/1%2F..%2F..%2Fmovimentacoes%2F5",
            "DELETE /movimentacoes/7",
        ]
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_is_a_status_error() {
    let app = Router::new().route(
        "/setores",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" })),
            )
        }),
    );
    let gateway = HttpGateway::new(spawn(app).await);

    assert_matches!(
        gateway.list_sectors().await,
        Err(ClientError::Status { status: 500, body }) if body.contains("INTERNAL_ERROR")
    );
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let app = Router::new().route("/movimentacoes", get(|| async { "not json" }));
    let gateway = HttpGateway::new(spawn(app).await);

    assert_matches!(gateway.list_transactions().await, Err(ClientError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = HttpGateway::new(format!("http://{addr}"));
    assert_matches!(gateway.list_sectors().await, Err(ClientError::Transport(_)));
}

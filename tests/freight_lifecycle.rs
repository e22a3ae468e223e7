//! Integration tests for the freight lifecycle.
//!
//! Drives the public handlers against the JSON file store:
//! 1. Quotation opens a record with zero proposals
//! 2. Proposals are recorded and one is finalized
//! 3. Invoices are attached to the contracted record
//! 4. Charts and the carrier report read the stored records back

use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

use freight_desk::adapters::{InMemoryEventBus, InMemoryFileStorage, JsonFileFreightRepository};
use freight_desk::application::{
    AttachInvoiceCommand, AttachInvoiceHandler, CreateQuotationCommand, CreateQuotationHandler,
    FinalizeNegotiationCommand, FinalizeNegotiationHandler, GetChartsHandler, GetChartsQuery,
    GetFreightReportHandler, GetFreightReportQuery, NegotiationBoard, RecordProposalCommand,
    RecordProposalHandler,
};
use freight_desk::domain::foundation::{CommandMetadata, ErrorCode, FreightId, UserId};
use freight_desk::domain::freight::{
    FreightError, FreightStatus, LoadingMode, QuotationRequest, DEFAULT_ORIGIN,
};
use freight_desk::ports::{FileUpload, FreightRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Desk {
    _dir: TempDir,
    repository: Arc<JsonFileFreightRepository>,
    bus: Arc<InMemoryEventBus>,
    files: Arc<InMemoryFileStorage>,
}

impl Desk {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repository = Arc::new(JsonFileFreightRepository::new(dir.path().join("freights.json")));
        Self {
            _dir: dir,
            repository,
            bus: Arc::new(InMemoryEventBus::new()),
            files: Arc::new(InMemoryFileStorage::new()),
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(UserId::new("operator-1").unwrap()).with_correlation_id("it")
    }

    async fn quote(&self, map_value: f64, destination: &str, carriers: &[&str]) -> FreightId {
        let request = QuotationRequest {
            map_number: "MAP-2024-001".to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            destination: destination.to_string(),
            total_km: 300.0,
            weight: 10_000.0,
            map_value,
            truck_type: "Carreta".to_string(),
            loading_mode: LoadingMode::Paletizados,
            route_info: None,
            map_image_url: None,
            loading_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            carriers: carriers.iter().map(|c| c.to_string()).collect(),
        };
        let result = CreateQuotationHandler::new(self.repository.clone(), self.bus.clone())
            .handle(CreateQuotationCommand { request }, Self::metadata())
            .await
            .unwrap();
        *result.record.id()
    }

    async fn propose(&self, freight_id: FreightId, carrier: &str, value: f64) {
        RecordProposalHandler::new(self.repository.clone(), self.bus.clone())
            .handle(
                RecordProposalCommand {
                    freight_id,
                    carrier: carrier.to_string(),
                    value,
                },
                Self::metadata(),
            )
            .await
            .unwrap();
    }

    async fn finalize(&self, freight_id: FreightId, carrier: &str, final_value: f64) {
        FinalizeNegotiationHandler::new(self.repository.clone(), self.bus.clone())
            .handle(
                FinalizeNegotiationCommand {
                    freight_id,
                    carrier: carrier.to_string(),
                    final_value,
                },
                Self::metadata(),
            )
            .await
            .unwrap();
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn quotation_to_contract_end_to_end() {
    let desk = Desk::new();
    let id = desk.quote(1000.0, "Sorocaba/SP", &["A", "B"]).await;

    let opened = desk.repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(opened.carrier_proposals().get("A"), Some(&0.0));
    assert_eq!(opened.carrier_proposals().get("B"), Some(&0.0));

    desk.propose(id, "A", 900.0).await;
    desk.propose(id, "B", 950.0).await;

    // Pick A on the board and finalize at 850
    let negotiating = desk
        .repository
        .find_by_status(FreightStatus::Negotiating)
        .await
        .unwrap();
    let mut board = NegotiationBoard::new(negotiating);
    board.select_proposal(id, "A").unwrap();
    board.set_final_value(850.0);
    let cmd = board.finalize_command(id).unwrap();
    let result = FinalizeNegotiationHandler::new(desk.repository.clone(), desk.bus.clone())
        .handle(cmd, Desk::metadata())
        .await
        .unwrap();

    let stored = desk.repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), FreightStatus::Contracted);
    assert_eq!(stored.selected_carrier(), Some("A"));
    assert_eq!(result.metrics.savings, 50.0);
    assert_eq!(result.metrics.percentage_vs_map, 85.0);
    assert!((result.metrics.savings_percentage - 5.5556).abs() < 1e-3);

    let types: Vec<String> = desk
        .bus
        .published_events()
        .await
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            "freight.quoted.v1",
            "freight.proposal_recorded.v1",
            "freight.proposal_recorded.v1",
            "freight.contracted.v1",
        ]
    );
}

#[tokio::test]
async fn invoices_accumulate_on_contracted_record() {
    let desk = Desk::new();
    let id = desk.quote(1000.0, "Bauru/SP", &["A"]).await;
    desk.propose(id, "A", 900.0).await;
    desk.finalize(id, "A", 880.0).await;

    let handler =
        AttachInvoiceHandler::new(desk.repository.clone(), desk.files.clone(), desk.bus.clone());
    let mut counts = Vec::new();
    for (name, bytes) in [("nf-1.pdf", b"one".to_vec()), ("nf-2.pdf", b"two".to_vec())] {
        let result = handler
            .handle(
                AttachInvoiceCommand {
                    freight_id: id,
                    file: FileUpload::new(name, "application/pdf", bytes),
                },
                Desk::metadata(),
            )
            .await
            .unwrap();
        counts.push(result.record.invoice_urls().len());
    }

    desk.files.fail_uploads(true);
    let err = handler
        .handle(
            AttachInvoiceCommand {
                freight_id: id,
                file: FileUpload::new("nf-3.pdf", "application/pdf", b"three".to_vec()),
            },
            Desk::metadata(),
        )
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    let stored = desk.repository.find_by_id(&id).await.unwrap().unwrap();
    counts.push(stored.invoice_urls().len());
    assert_eq!(counts, vec![1, 2, 2]);
}

#[tokio::test]
async fn stale_write_is_a_conflict() {
    let desk = Desk::new();
    let id = desk.quote(1000.0, "Bauru/SP", &["A", "B"]).await;

    let mut first = desk.repository.find_by_id(&id).await.unwrap().unwrap();
    let mut second = first.clone();
    first.record_proposal("A", 900.0).unwrap();
    second.record_proposal("B", 950.0).unwrap();

    desk.repository.update(&first).await.unwrap();
    let err = desk.repository.update(&second).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ConcurrencyConflict);
    assert_eq!(FreightError::from(err), FreightError::Conflict(id));

    let stored = desk.repository.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.carrier_proposals().get("A"), Some(&900.0));
    assert_eq!(stored.carrier_proposals().get("B"), Some(&0.0));
}

// =============================================================================
// Reporting
// =============================================================================

#[tokio::test]
async fn carrier_stats_sum_two_contracts() {
    let desk = Desk::new();
    for (proposal, final_value) in [(120.0, 100.0), (350.0, 300.0)] {
        let id = desk.quote(500.0, "Curitiba/PR", &["A"]).await;
        desk.propose(id, "A", proposal).await;
        desk.finalize(id, "A", final_value).await;
    }

    let report = GetFreightReportHandler::new(desk.repository.clone())
        .handle(GetFreightReportQuery::default())
        .await
        .unwrap();

    let stats = &report.paletizados[0];
    assert_eq!(stats.carrier, "A");
    assert_eq!(stats.freight_count, 2);
    assert_eq!(stats.total_value, 400.0);
    assert_eq!(stats.total_savings, 70.0);
    assert_eq!(stats.average_savings, 35.0);
    assert_eq!(report.totals.total_freight, 2);
}

fn contracted_document(contracted_at: &str, final_value: f64) -> serde_json::Value {
    json!({
        "id": FreightId::new(),
        "mapNumber": "MAP-X",
        "destination": "Cuiabá/MT",
        "mapValue": 1000.0,
        "loadingMode": "bag",
        "loadingDate": "2023-12-01",
        "status": "contracted",
        "carrierProposals": { "A": final_value + 10.0 },
        "selectedCarrier": "A",
        "finalValue": final_value,
        "contractedAt": contracted_at,
    })
}

#[tokio::test]
async fn value_over_time_follows_calendar_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("freights.json");
    let documents = json!([
        contracted_document("2024-01-20T10:00:00Z", 200.0),
        contracted_document("2023-12-05T10:00:00Z", 100.0),
        contracted_document("2024-01-02T10:00:00Z", 50.0),
    ]);
    std::fs::write(&path, documents.to_string()).unwrap();
    let repository = Arc::new(JsonFileFreightRepository::new(&path));

    let charts = GetChartsHandler::new(repository)
        .handle(GetChartsQuery)
        .await
        .unwrap();

    let buckets: Vec<(&str, f64)> = charts
        .value_over_time
        .iter()
        .map(|m| (m.label.as_str(), m.value))
        .collect();
    assert_eq!(buckets, vec![("dez/23", 100.0), ("jan/24", 250.0)]);
    assert_eq!(charts.count_by_state[0].count, 3);
}

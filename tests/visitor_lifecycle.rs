//! End-to-end lifecycle tests over a file-backed register

use std::sync::Arc;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use gatehouse::error::AppError;
use gatehouse::models::{
    PhotoData, Purpose, RegisterVisitor, UpdateVisitor, Visitor, VisitorStatus,
};
use gatehouse::services::stats::StatsService;
use gatehouse::services::Services;
use gatehouse::store::{FileBackend, VisitorStore};
use gatehouse::view::VisitorFilter;

struct Fixture {
    services: Services,
    store: VisitorStore,
    // Held so the register file outlives the test body
    _dir: TempDir,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let backend = FileBackend::new(dir.path().join("visitors.json"));
    let store = VisitorStore::new(Arc::new(backend));
    Fixture {
        services: Services::new(store.clone()),
        store,
        _dir: dir,
    }
}

fn registration(name: &str, purpose: Purpose) -> RegisterVisitor {
    RegisterVisitor {
        name: name.to_string(),
        company: Some("Initech".to_string()),
        phone: "555-0100".to_string(),
        email: Some("visitor@example.com".to_string()),
        purpose,
        to_meet: "B. Lumbergh".to_string(),
        department: Some("Engineering".to_string()),
        photo: Some(PhotoData::from_jpeg(&[0xff, 0xd8, 0xff, 0xd9])),
    }
}

fn update_for(visitor: &Visitor) -> UpdateVisitor {
    UpdateVisitor {
        name: visitor.name.clone(),
        company: visitor.company.clone(),
        phone: visitor.phone.clone(),
        email: visitor.email.clone(),
        purpose: visitor.purpose,
        to_meet: visitor.to_meet.clone(),
        department: visitor.department.clone(),
        photo: None,
    }
}

#[tokio::test]
async fn register_sequence_has_unique_ids_newest_first() {
    let fx = fixture();

    for i in 0..11 {
        fx.services
            .visitors
            .register(registration(&format!("Visitor {}", i), Purpose::Meeting))
            .await
            .expect("registration succeeds");
    }

    let visitors = fx.store.load_all().await.unwrap();
    assert_eq!(visitors.len(), 11);

    // Newest first: ids strictly decreasing down the collection
    for pair in visitors.windows(2) {
        assert!(pair[0].id > pair[1].id, "ids must be unique and descending");
    }
    assert_eq!(visitors[0].name, "Visitor 10");
    assert_eq!(visitors[10].name, "Visitor 0");
}

#[tokio::test]
async fn register_without_photo_is_rejected_before_any_write() {
    let fx = fixture();

    let mut input = registration("No Photo", Purpose::Delivery);
    input.photo = None;
    let err = fx.services.visitors.register(input).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(fx.store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn register_rejects_whitespace_only_required_fields() {
    let fx = fixture();

    // Whitespace-only must fail the "required, trimmed" contract, not slip
    // through as an empty string
    let input = registration("   ", Purpose::Meeting);
    let err = fx.services.visitors.register(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(fx.store.load_all().await.unwrap().is_empty());

    let mut input = registration("Ada Wong", Purpose::Meeting);
    input.phone = " \t ".to_string();
    let err = fx.services.visitors.register(input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn edit_rejects_whitespace_only_required_fields() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let mut input = update_for(&registered);
    input.to_meet = "   ".to_string();
    let err = fx
        .services
        .visitors
        .update(registered.id, input)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let stored = fx.services.visitors.get(registered.id).await.unwrap();
    assert_eq!(stored.to_meet, "B. Lumbergh");
}

#[tokio::test]
async fn edit_overwrites_identity_fields_but_preserves_lifecycle() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let mut input = update_for(&registered);
    input.name = "Ada W.".to_string();
    input.purpose = Purpose::Interview;
    input.company = Some("  Umbrella  ".to_string());

    let updated = fx.services.visitors.update(registered.id, input).await.unwrap();

    assert_eq!(updated.name, "Ada W.");
    assert_eq!(updated.purpose, Purpose::Interview);
    assert_eq!(updated.company.as_deref(), Some("Umbrella"));
    // Untouched by edit
    assert_eq!(updated.id, registered.id);
    assert_eq!(updated.check_in_time, registered.check_in_time);
    assert_eq!(updated.date, registered.date);
    assert_eq!(updated.status, VisitorStatus::Active);
    // No new capture: the stored photo survives
    assert_eq!(updated.photo, registered.photo);
}

#[tokio::test]
async fn edit_replaces_photo_only_when_newly_captured() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let mut input = update_for(&registered);
    input.photo = Some(PhotoData::from_jpeg(&[0x01, 0x02]));
    let updated = fx.services.visitors.update(registered.id, input).await.unwrap();

    assert_ne!(updated.photo, registered.photo);
}

#[tokio::test]
async fn check_out_completes_the_visit_exactly_once() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let checked_out = fx.services.visitors.check_out(registered.id).await.unwrap();
    assert_eq!(checked_out.status, VisitorStatus::Completed);
    let first_time = checked_out.check_out_time.expect("check-out time set");

    // Second check-out is rejected and changes nothing
    let err = fx.services.visitors.check_out(registered.id).await.unwrap_err();
    assert!(matches!(err, AppError::BusinessRule(_)));

    let stored = fx.services.visitors.get(registered.id).await.unwrap();
    assert_eq!(stored.check_out_time, Some(first_time));
}

#[tokio::test]
async fn check_out_of_unknown_id_reports_not_found() {
    let fx = fixture();
    let err = fx.services.visitors.check_out(12345).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_record_permanently() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let removed = fx.services.visitors.delete(registered.id).await.unwrap();
    assert_eq!(removed.name, "Ada Wong");

    let err = fx.services.visitors.get(registered.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_of_unknown_id_leaves_the_register_untouched() {
    let fx = fixture();
    fx.services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();
    let before = fx.store.load_all().await.unwrap();

    let err = fx.services.visitors.delete(999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let after = fx.store.load_all().await.unwrap();
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
async fn auto_check_out_closes_only_stale_active_visitors() {
    let fx = fixture();
    let today = Utc::now().date_naive();
    let yesterday = today - Duration::days(1);

    let stale = Visitor {
        id: 1,
        photo: None,
        name: "Stale".to_string(),
        company: None,
        phone: "555-0101".to_string(),
        email: None,
        purpose: Purpose::Meeting,
        to_meet: "Host".to_string(),
        department: None,
        check_in_time: yesterday.and_hms_opt(9, 0, 0).unwrap().and_utc(),
        check_out_time: None,
        date: yesterday,
        status: VisitorStatus::Active,
    };
    let completed_yesterday = Visitor {
        id: 2,
        status: VisitorStatus::Completed,
        check_out_time: Some(yesterday.and_hms_opt(17, 0, 0).unwrap().and_utc()),
        name: "Done".to_string(),
        ..stale.clone()
    };
    let today_active = Visitor {
        id: 3,
        name: "Fresh".to_string(),
        check_in_time: today.and_hms_opt(8, 0, 0).unwrap().and_utc(),
        date: today,
        ..stale.clone()
    };

    for v in [stale, completed_yesterday, today_active] {
        fx.store.insert_front(v).await.unwrap();
    }

    let count = fx.services.visitors.auto_check_out_stale().await.unwrap();
    assert_eq!(count, 1);

    let stale_after = fx.services.visitors.get(1).await.unwrap();
    assert_eq!(stale_after.status, VisitorStatus::Completed);
    // Backdated to the end of the visitor's own day, not "now"
    assert_eq!(
        stale_after.check_out_time,
        Some(yesterday.and_hms_opt(23, 59, 59).unwrap().and_utc())
    );

    // Yesterday's completed record keeps its original check-out time
    let done_after = fx.services.visitors.get(2).await.unwrap();
    assert_eq!(
        done_after.check_out_time,
        Some(yesterday.and_hms_opt(17, 0, 0).unwrap().and_utc())
    );

    // Today's active visitor is untouched
    let fresh_after = fx.services.visitors.get(3).await.unwrap();
    assert_eq!(fresh_after.status, VisitorStatus::Active);

    // A second pass finds nothing left to close
    let count = fx.services.visitors.auto_check_out_stale().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn persisted_layout_round_trips_byte_identically() {
    let fx = fixture();
    fx.services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();
    fx.services
        .visitors
        .register(registration("Leon Kennedy", Purpose::Delivery))
        .await
        .unwrap();

    let loaded = fx.store.load_all().await.unwrap();
    let before = serde_json::to_string(&loaded).unwrap();
    fx.store.persist(&loaded).await.unwrap();
    let after = serde_json::to_string(&fx.store.load_all().await.unwrap()).unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn persisted_layout_uses_the_documented_keys() {
    let fx = fixture();
    fx.services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let loaded = fx.store.load_all().await.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&loaded).unwrap()).unwrap();
    let record = &json[0];

    assert!(record["id"].is_number());
    assert!(record["checkInTime"].is_string());
    assert!(record["checkOutTime"].is_null());
    assert_eq!(record["status"], "active");
    assert_eq!(record["purpose"], "Meeting");
    assert!(record["photo"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
    assert!(record["date"].as_str().unwrap().len() == 10);
}

#[tokio::test]
async fn stats_count_total_today_and_active() {
    let fx = fixture();
    let a = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();
    fx.services
        .visitors
        .register(registration("Leon Kennedy", Purpose::Delivery))
        .await
        .unwrap();
    fx.services.visitors.check_out(a.id).await.unwrap();

    let stats = fx.services.stats.summary().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.today, 2);
    assert_eq!(stats.active, 1);

    let of = StatsService::of(&fx.store.load_all().await.unwrap());
    assert_eq!(of, stats);
}

#[tokio::test]
async fn report_snapshot_honors_the_purpose_filter() {
    let fx = fixture();
    fx.services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();
    fx.services
        .visitors
        .register(registration("Leon Kennedy", Purpose::Delivery))
        .await
        .unwrap();

    let filter = VisitorFilter {
        purpose: Some(Purpose::Meeting),
        ..Default::default()
    };
    let snapshot = fx.services.reports.snapshot(&filter).await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Ada Wong");
}

#[tokio::test]
async fn gate_pass_carries_the_visit_fields() {
    let fx = fixture();
    let registered = fx
        .services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let pass = fx.services.reports.gate_pass(registered.id).await.unwrap();
    assert_eq!(pass.name, "Ada Wong");
    assert_eq!(pass.to_meet, "B. Lumbergh");
    assert_eq!(pass.valid_for, registered.date);
    assert_eq!(pass.check_in_time, registered.check_in_time);
    assert!(pass.photo.is_some());
}

struct CountingCsv;

impl gatehouse::services::reports::CsvExporter for CountingCsv {
    fn export(&self, visitors: &[Visitor]) -> gatehouse::AppResult<String> {
        Ok(format!("rows:{}", visitors.len()))
    }
}

#[tokio::test]
async fn export_refuses_an_empty_snapshot() {
    let fx = fixture();
    let err = fx
        .services
        .reports
        .export_csv(&CountingCsv, &VisitorFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn export_hands_the_snapshot_to_the_collaborator() {
    let fx = fixture();
    fx.services
        .visitors
        .register(registration("Ada Wong", Purpose::Meeting))
        .await
        .unwrap();

    let csv = fx
        .services
        .reports
        .export_csv(&CountingCsv, &VisitorFilter::default())
        .await
        .unwrap();
    assert_eq!(csv, "rows:1");
}

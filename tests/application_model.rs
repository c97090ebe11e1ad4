use appsync_model::source::{collect_batch, fetch_batch, ApplicationPayload, FileSource, ValidationOptions};
use appsync_model::{
    equal, fingerprint, index_by_key, validate, ApiDefinition, ApiSpec, ApiSpecType, Application,
    Credentials, Document, EventApiDefinition, SnapshotCache, SnapshotStatus, SpecFormat,
    SpecType, ValidationErrorKind,
};
use serde_json::json;

fn billing() -> Application {
    Application::new("app-1", "Billing")
        .with_description("Invoices and payments")
        .with_label("scenarios", &["DEFAULT", "finance"])
        .with_api(
            ApiDefinition::new("api-1", "invoices", "https://x/api", ApiSpecType::OpenApi)
                .with_credentials(Credentials::basic("u", "p"))
                .with_spec(
                    ApiSpec::new(SpecType::OpenApi, "openapi: 3.0.0").with_format(SpecFormat::Yaml),
                ),
        )
        .with_api(
            ApiDefinition::new("api-2", "ledger", "https://x/odata", ApiSpecType::Odata)
                .with_credentials(
                    Credentials::oauth("https://x/token", "client", "secret")
                        .with_csrf("https://x/csrf"),
                ),
        )
        .with_event_api(
            EventApiDefinition::new("evt-1", "invoice-events")
                .with_spec(ApiSpec::new(SpecType::AsyncApi, "asyncapi: 2.0.0")),
        )
        .with_document(Document::markdown("doc-1", "app-1", "Guide", "# Guide").with_kind("howto"))
        .with_document(Document::markdown("doc-2", "app-1", "FAQ", "# FAQ"))
}

#[test]
fn test_basic_auth_application_validates() {
    let payload: ApplicationPayload = serde_json::from_value(json!({
        "id": "app-1",
        "name": "Billing",
        "apis": [{
            "id": "api-1",
            "targetUrl": "https://x/api",
            "apiType": "OPEN_API",
            "credentials": {"basic": {"username": "u", "password": "p"}}
        }]
    }))
    .unwrap();

    let application = payload.into_application().unwrap();
    assert!(validate(&application).is_ok());
}

#[test]
fn test_adding_oauth_to_basic_is_a_conflict() {
    let payload: ApplicationPayload = serde_json::from_value(json!({
        "id": "app-1",
        "name": "Billing",
        "apis": [{
            "id": "api-1",
            "targetUrl": "https://x/api",
            "apiType": "OPEN_API",
            "credentials": {
                "basic": {"username": "u", "password": "p"},
                "oauth": {"url": "https://x/token", "clientId": "c", "clientSecret": "s"}
            }
        }]
    }))
    .unwrap();

    let errors = payload.into_application().unwrap_err();
    assert!(errors.has_kind(ValidationErrorKind::ConflictingVariant));
}

#[test]
fn test_full_application_is_valid() {
    assert!(validate(&billing()).is_ok());
}

#[test]
fn test_document_owner_mismatch_fails() {
    let mut application = billing();
    application.documents[1].application_id = "app-2".to_string();

    let errors = validate(&application).unwrap_err();
    assert_eq!(errors.first().path, "documents[doc-2].applicationId");
}

#[test]
fn test_insertion_order_of_apis_does_not_matter() {
    let first = billing();
    let mut second = billing();
    second.apis.swap(0, 1);
    second.event_apis.reverse();
    second.documents.swap(0, 1);

    assert!(equal(&first, &second));
    assert!(equal(&second, &first));
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn test_spec_bytes_change_equality() {
    let first = billing();
    let mut second = billing();
    second.apis[0].api_spec.as_mut().unwrap().data = b"openapi: 3.0.1".to_vec();

    assert!(!equal(&first, &second));
}

#[test]
fn test_equality_is_transitive() {
    let a = billing();
    let mut b = billing();
    b.apis.reverse();
    let mut c = billing();
    c.documents.reverse();

    assert!(equal(&a, &b) && equal(&b, &c));
    assert!(equal(&a, &c));
}

#[test]
fn test_label_value_order_changes_equality() {
    let first = billing();
    let second = billing().with_label("scenarios", &["finance", "DEFAULT"]);

    assert!(!equal(&first, &second));
}

#[test]
fn test_serialized_application_reads_back_equal() {
    let application = billing();
    let json = serde_json::to_string(&application).unwrap();
    let parsed: Application = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, application);
    assert_eq!(
        parsed.get_document("doc-1").unwrap().data,
        b"# Guide".to_vec()
    );
}

#[test]
fn test_keys_pair_children() {
    let application = billing();
    let index = index_by_key(&application.apis);
    assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec!["api-1", "api-2"]);
    assert_eq!(index["api-2"].api_type, ApiSpecType::Odata);
}

#[test]
fn test_concurrent_validation_and_comparison() {
    let application = std::sync::Arc::new(billing());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let application = application.clone();
            std::thread::spawn(move || {
                validate(&application).is_ok() && equal(&application, &billing())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_batch_quarantines_only_the_bad_application() {
    let good = ApplicationPayload::from(billing());
    let mut bad = ApplicationPayload::from(billing().with_description("copy"));
    bad.id = "app-2".to_string();
    bad.apis[0].api_spec = Some(ApiSpec::new(SpecType::AsyncApi, "asyncapi: 2.0.0"));

    let fetched = vec![good, bad]
        .into_iter()
        .enumerate()
        .map(|(i, payload)| appsync_model::source::Fetched {
            origin: format!("test[{}]", i),
            payload: Ok(payload),
        })
        .collect();

    let batch = collect_batch(fetched, ValidationOptions::default());
    assert_eq!(batch.accepted.len(), 1);
    assert_eq!(batch.quarantined.len(), 1);

    let errors = &batch.quarantined[0].errors;
    // Documents still point at app-1 while the application is now app-2
    assert!(errors.has_kind(ValidationErrorKind::TypeMismatch));
    assert!(errors.has_kind(ValidationErrorKind::StructuralViolation));
}

#[tokio::test]
async fn test_file_snapshots_feed_the_cache() {
    let previous_dir = tempfile::tempdir().unwrap();
    let current_dir = tempfile::tempdir().unwrap();

    let previous = vec![
        ApplicationPayload::from(billing()),
        ApplicationPayload::from(Application::new("app-9", "Retired")),
    ];
    std::fs::write(
        previous_dir.path().join("apps.json"),
        serde_json::to_vec(&previous).unwrap(),
    )
    .unwrap();

    let mut reordered = billing();
    reordered.apis.reverse();
    std::fs::write(
        current_dir.path().join("01-billing.json"),
        serde_json::to_vec(&ApplicationPayload::from(reordered)).unwrap(),
    )
    .unwrap();
    std::fs::write(
        current_dir.path().join("02-new.json"),
        serde_json::to_vec(&ApplicationPayload::from(Application::new("app-3", "Shipping"))).unwrap(),
    )
    .unwrap();

    let options = ValidationOptions::default();
    let before = fetch_batch(&FileSource::new(previous_dir.path()), options).await.unwrap();
    let after = fetch_batch(&FileSource::new(current_dir.path()), options).await.unwrap();
    assert!(before.is_clean() && after.is_clean());

    let cache = SnapshotCache::new();
    for application in before.accepted {
        cache.observe(application);
    }

    let removed = cache.retain_ids(after.accepted.iter().map(|a| a.id.as_str()));
    assert_eq!(removed, vec!["app-9".to_string()]);

    let statuses: Vec<SnapshotStatus> = after
        .accepted
        .into_iter()
        .map(|application| cache.observe(application))
        .collect();
    assert_eq!(statuses, vec![SnapshotStatus::Unchanged, SnapshotStatus::New]);
}

#[tokio::test]
async fn test_invalid_application_is_not_reported_removed() {
    let previous_dir = tempfile::tempdir().unwrap();
    let current_dir = tempfile::tempdir().unwrap();

    std::fs::write(
        previous_dir.path().join("billing.json"),
        serde_json::to_vec(&ApplicationPayload::from(billing())).unwrap(),
    )
    .unwrap();
    // Still in the inventory, just broken for now
    std::fs::write(
        current_dir.path().join("billing.json"),
        serde_json::to_vec(&json!({"id": "app-1", "name": ""})).unwrap(),
    )
    .unwrap();

    let options = ValidationOptions::default();
    let before = fetch_batch(&FileSource::new(previous_dir.path()), options).await.unwrap();
    let after = fetch_batch(&FileSource::new(current_dir.path()), options).await.unwrap();
    assert!(after.accepted.is_empty());
    assert_eq!(after.quarantined[0].application_id.as_deref(), Some("app-1"));

    let cache = SnapshotCache::new();
    for application in before.accepted {
        cache.observe(application);
    }

    let removed = cache.retain_ids(after.inventory_ids());
    assert!(removed.is_empty());
    assert!(cache.get("app-1").is_some());
}

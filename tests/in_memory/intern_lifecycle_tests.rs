//! In-memory integration tests for intern record operations.

use super::helpers::{TestService, empty_service, sample_service};
use internhub::intern::{
    domain::{InternId, TaskInput},
    services::{
        CreateInternRequest, ErrorKind, ListInternsRequest, ServiceResponse, UpdateInternRequest,
    },
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_intern_round_trips_through_get(empty_service: TestService) -> eyre::Result<()> {
    let request = CreateInternRequest::new("Grace Hopper", "2025-Fall")
        .with_roles(vec!["Compiler Engineer".to_owned()])
        .with_current_projects(vec!["COBOL".to_owned()])
        .with_tasks(vec![TaskInput::new("Write parser", "todo")]);

    let created = empty_service.create(request).await?;
    let fetched = empty_service.get(&created.id).await?;

    eyre::ensure!(fetched == created);
    eyre::ensure!(created.id.as_str().len() == 32, "generated ids are simple UUIDs");
    eyre::ensure!(created.tasks().len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_intern_serializes_with_wire_names(
    empty_service: TestService,
) -> eyre::Result<()> {
    let created = empty_service
        .create(CreateInternRequest::new("Ada", "2025-Fall").with_document_id("intern-042"))
        .await?;

    let value = serde_json::to_value(&created)?;

    eyre::ensure!(value.get("id") == Some(&json!("intern-042")));
    eyre::ensure!(value.get("internName") == Some(&json!("Ada")));
    eyre::ensure!(value.get("currentProjects") == Some(&json!([])));
    eyre::ensure!(value.get("tasksAssigned") == Some(&json!([])));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_document_id_is_a_storage_failure(
    empty_service: TestService,
) -> eyre::Result<()> {
    let request = CreateInternRequest::new("Ada", "2025-Fall").with_document_id("intern-042");
    empty_service.create(request.clone()).await?;

    let response = ServiceResponse::from(empty_service.create(request).await);

    eyre::ensure!(!response.success);
    eyre::ensure!(response.kind == Some(ErrorKind::Storage));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_unspecified_fields(sample_service: TestService) -> eyre::Result<()> {
    let id = InternId::new("intern-003");

    let updated = sample_service
        .update(
            &id,
            UpdateInternRequest::new().with_roles(vec!["Tech Lead".to_owned()]),
        )
        .await?;

    eyre::ensure!(updated.name == "Mike Johnson");
    eyre::ensure!(updated.batch == "2025-Fall");
    eyre::ensure!(updated.roles == ["Tech Lead"]);
    eyre::ensure!(updated.tasks().len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_intern_is_not_found(sample_service: TestService) {
    let response = ServiceResponse::from(
        sample_service
            .update(&InternId::new("intern-404"), UpdateInternRequest::new())
            .await,
    );

    assert!(!response.success);
    assert_eq!(response.kind, Some(ErrorKind::NotFound));
    assert_eq!(response.error.as_deref(), Some("intern not found: intern-404"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_intern_from_listing(sample_service: TestService) -> eyre::Result<()> {
    sample_service.delete(&InternId::new("intern-001")).await?;

    let list = sample_service.list(ListInternsRequest::new()).await?;

    eyre::ensure!(list.total == 4);
    eyre::ensure!(
        list.interns
            .iter()
            .all(|intern| intern.id.as_str() != "intern-001")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_and_paging_compose(sample_service: TestService) -> eyre::Result<()> {
    let list = sample_service
        .list(
            ListInternsRequest::new()
                .with_search("o")
                .with_sort("name", "asc")
                .with_offset(1)
                .with_limit(2),
        )
        .await?;

    let names: Vec<_> = list
        .interns
        .iter()
        .map(|intern| intern.name.as_str())
        .collect();
    eyre::ensure!(list.total == 3);
    eyre::ensure!(names == ["Mike Johnson", "Sarah Wilson"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_envelope_reports_total(sample_service: TestService) -> eyre::Result<()> {
    let response = ServiceResponse::from_list(
        sample_service
            .list(ListInternsRequest::new().with_limit(1))
            .await,
    );

    eyre::ensure!(response.success);
    eyre::ensure!(response.total == Some(5));
    eyre::ensure!(response.data.map(|interns| interns.len()) == Some(1));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn count_tracks_creates(empty_service: TestService) -> eyre::Result<()> {
    eyre::ensure!(empty_service.count().await? == 0);

    empty_service
        .create(CreateInternRequest::new("Ada", "2025-Fall"))
        .await?;
    empty_service
        .create(CreateInternRequest::new("Grace", "2025-Fall"))
        .await?;

    eyre::ensure!(empty_service.count().await? == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn write_envelopes_carry_confirmation_messages(
    empty_service: TestService,
) -> eyre::Result<()> {
    let id = InternId::new("intern-042");
    let created = ServiceResponse::created(
        empty_service
            .create(CreateInternRequest::new("Ada", "2025-Fall").with_document_id("intern-042"))
            .await,
    );
    let updated = ServiceResponse::updated(
        empty_service
            .update(&id, UpdateInternRequest::new().with_batch("2026-Spring"))
            .await,
    );
    let deleted = ServiceResponse::deleted(empty_service.delete(&id).await);

    eyre::ensure!(created.message.as_deref() == Some("Intern created successfully"));
    eyre::ensure!(updated.message.as_deref() == Some("Intern updated successfully"));
    eyre::ensure!(updated.data.map(|intern| intern.batch) == Some("2026-Spring".to_owned()));
    eyre::ensure!(
        serde_json::to_value(&deleted)?
            == json!({"success": true, "message": "Intern deleted successfully"})
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_envelope_has_no_confirmation(
    empty_service: TestService,
) -> eyre::Result<()> {
    let response =
        ServiceResponse::deleted(empty_service.delete(&InternId::new("intern-404")).await);

    eyre::ensure!(!response.success);
    eyre::ensure!(response.message.is_none());
    eyre::ensure!(response.kind == Some(ErrorKind::NotFound));
    Ok(())
}

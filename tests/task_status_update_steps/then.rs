//! Then steps for task status update BDD scenarios.

use super::world::{TaskStatusWorld, run_async};
use internhub::intern::{
    domain::{InternId, TaskStatus},
    services::ErrorKind,
};
use rstest_bdd_macros::then;

#[then("the update succeeds")]
fn update_succeeds(world: &TaskStatusWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(_)) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("missing update result")),
    }
}

#[then(r#"the update fails with a "{kind}" error"#)]
fn update_fails_with(world: &TaskStatusWorld, kind: String) -> Result<(), eyre::Report> {
    let expected = match kind.as_str() {
        "validation" => ErrorKind::Validation,
        "not_found" => ErrorKind::NotFound,
        "storage" => ErrorKind::Storage,
        other => return Err(eyre::eyre!("unknown error kind in scenario: {other}")),
    };
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;

    match result {
        Err(err) if err.kind() == expected => Ok(()),
        other => Err(eyre::eyre!("expected {kind} error, got {other:?}")),
    }
}

#[then(r#"task "{task_id}" of intern "{intern_id}" has status "{status}""#)]
fn task_has_status(
    world: &TaskStatusWorld,
    task_id: String,
    intern_id: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let intern = run_async(world.service()?.get(&InternId::new(intern_id)))?;

    let found = intern
        .tasks_assigned
        .iter()
        .find(|entry| entry.id() == Some(task_id.as_str()))
        .and_then(|entry| entry.status());
    if found != Some(expected) {
        return Err(eyre::eyre!("expected {task_id} to be {status}, found {found:?}"));
    }
    Ok(())
}

#[then(r#"the summary counts {count:u64} "{status}" tasks out of {total:u64}"#)]
fn summary_counts(
    world: &TaskStatusWorld,
    count: u64,
    status: String,
    total: u64,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let summary = run_async(world.service()?.task_summary())?;

    eyre::ensure!(
        summary.counts.get(expected) == count,
        "expected {count} {status} tasks, found {}",
        summary.counts.get(expected)
    );
    eyre::ensure!(summary.total == total, "expected {total} tasks in total");
    Ok(())
}

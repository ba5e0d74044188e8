//! Sample intern records for local development.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::intern::domain::{InternFields, InternId, InternRecord, StorageValue, TaskStatus};

struct SampleTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: TaskStatus,
}

struct SampleIntern {
    id: &'static str,
    name: &'static str,
    batch: &'static str,
    roles: &'static [&'static str],
    projects: &'static [&'static str],
    tasks: &'static [SampleTask],
}

const SAMPLE_INTERNS: [SampleIntern; 5] = [
    SampleIntern {
        id: "intern-001",
        name: "John Doe",
        batch: "2025-Summer",
        roles: &["Frontend Developer", "UI/UX Designer"],
        projects: &["E-commerce Platform", "Mobile App"],
        tasks: &[
            SampleTask {
                id: "task-1",
                title: "Create Login Page",
                description: "Design and implement user login functionality",
                status: TaskStatus::Working,
            },
            SampleTask {
                id: "task-2",
                title: "Setup Database Schema",
                description: "Design and create database tables",
                status: TaskStatus::Completed,
            },
        ],
    },
    SampleIntern {
        id: "intern-002",
        name: "Jane Smith",
        batch: "2025-Summer",
        roles: &["Backend Developer", "DevOps Engineer"],
        projects: &["API Development", "Cloud Infrastructure"],
        tasks: &[SampleTask {
            id: "task-3",
            title: "API Documentation",
            description: "Create comprehensive API documentation",
            status: TaskStatus::Open,
        }],
    },
    SampleIntern {
        id: "intern-003",
        name: "Mike Johnson",
        batch: "2025-Fall",
        roles: &["Full Stack Developer"],
        projects: &["CRM System"],
        tasks: &[
            SampleTask {
                id: "task-4",
                title: "User Authentication",
                description: "Implement JWT-based authentication",
                status: TaskStatus::Todo,
            },
            SampleTask {
                id: "task-5",
                title: "Dashboard Design",
                description: "Create responsive dashboard layout",
                status: TaskStatus::Pending,
            },
        ],
    },
    SampleIntern {
        id: "intern-004",
        name: "Sarah Wilson",
        batch: "2025-Spring",
        roles: &["Mobile Developer", "UI/UX Designer"],
        projects: &["Mobile Shopping App"],
        tasks: &[SampleTask {
            id: "task-6",
            title: "Wireframe Creation",
            description: "Create wireframes for mobile app",
            status: TaskStatus::Deferred,
        }],
    },
    SampleIntern {
        id: "intern-005",
        name: "Alex Chen",
        batch: "2025-Summer",
        roles: &["Data Scientist", "Backend Developer"],
        projects: &["Analytics Dashboard", "ML Pipeline"],
        tasks: &[
            SampleTask {
                id: "task-7",
                title: "Data Analysis",
                description: "Analyze user behavior patterns",
                status: TaskStatus::Working,
            },
            SampleTask {
                id: "task-8",
                title: "Model Training",
                description: "Train recommendation algorithm",
                status: TaskStatus::Completed,
            },
        ],
    },
];

/// Builds the sample records with every timestamp set to `now`.
pub(super) fn sample_records(now: DateTime<Utc>) -> Vec<InternRecord> {
    SAMPLE_INTERNS
        .iter()
        .map(|sample| {
            let fields = InternFields::new(sample.name, sample.batch)
                .with_roles(sample.roles.iter().map(|role| (*role).to_owned()))
                .with_current_projects(sample.projects.iter().map(|project| (*project).to_owned()))
                .with_tasks_assigned(StorageValue::ListOfMixed(
                    sample.tasks.iter().map(|task| task_value(task, now)).collect(),
                ));
            InternRecord::new(InternId::new(sample.id), fields, now)
        })
        .collect()
}

fn task_value(task: &SampleTask, now: DateTime<Utc>) -> Value {
    let timestamp = Value::String(now.to_rfc3339_opts(SecondsFormat::AutoSi, true));
    let mut fields = Map::new();
    fields.insert("id".to_owned(), Value::String(task.id.to_owned()));
    fields.insert("title".to_owned(), Value::String(task.title.to_owned()));
    fields.insert(
        "description".to_owned(),
        Value::String(task.description.to_owned()),
    );
    fields.insert(
        "status".to_owned(),
        Value::String(task.status.as_str().to_owned()),
    );
    fields.insert("assignedAt".to_owned(), timestamp.clone());
    fields.insert("updatedAt".to_owned(), timestamp);
    Value::Object(fields)
}

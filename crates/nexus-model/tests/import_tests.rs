use nexus_model::{
    EntitySnapshot, EntityStore, ProjectId, StoreError, TaskId, TaskStage, TaskStatus, TeamId,
    WorkerId,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const EXPORT: &str = r##"{
  "projects": [
    { "id": "p1", "name": "Migración Cloud", "color": "#3b82f6", "description": "AWS" },
    { "id": "p2", "name": "Lanzamiento Q4", "color": "#10b981", "memberIds": ["w1"] }
  ],
  "teams": [
    { "id": "t1", "projectId": "p1", "name": "Pareja Alpha", "memberIds": ["w2"] }
  ],
  "workers": [
    { "id": "w1", "name": "Carlos", "functionalRoles": ["Director Técnico"], "intensity": 14 },
    { "id": "w2", "name": "Ana", "functionalRoles": [], "intensity": 0, "managerId": "w1" }
  ],
  "tasks": [
    {
      "id": "tsk1", "title": "API", "workerId": "w2", "status": "RED", "stage": "IN_PROGRESS",
      "teamId": "t1", "projectId": "p1", "createdAt": "2024-10-01T09:00:00Z",
      "blockReason": "no staging env", "blockedByWorkerId": "w1"
    },
    {
      "id": "tsk2", "title": "Budget", "workerId": "w1", "status": "GREEN", "stage": "TODO",
      "teamId": "", "projectId": "p2", "createdAt": "2024-10-02T09:00:00Z", "dueDate": "2024-12-31"
    }
  ],
  "roles": [ { "id": "r1", "name": "Director Técnico" } ]
}"##;

#[test]
fn test_import_application_export() {
    let snapshot = EntitySnapshot::from_json(EXPORT).unwrap();

    assert!(snapshot.projects[0].member_ids.is_empty());
    let direct: Vec<_> = snapshot.projects[1].member_ids.iter().collect();
    assert_eq!(direct, vec![&WorkerId::new("w1")]);
    assert_eq!(snapshot.workers[0].intensity.value(), 10);
    assert_eq!(snapshot.workers[1].intensity.value(), 1);

    let red = snapshot.task(&TaskId::new("tsk1")).unwrap();
    assert_eq!(red.status, TaskStatus::Red);
    assert_eq!(red.stage, TaskStage::InProgress);
    assert_eq!(red.team_id, Some(TeamId::new("t1")));
    assert_eq!(red.block_reason(), Some("no staging env"));

    let direct = snapshot.task(&TaskId::new("tsk2")).unwrap();
    assert_eq!(direct.team_id, None);
    assert!(direct.block.is_none());
    assert!(direct.due_date.is_some());

    assert_eq!(snapshot.roles.len(), 1);
    assert_eq!(snapshot.blocked_task_count(), 1);
}

#[test]
fn test_export_import_round_trip() {
    let store = EntityStore::import_json(EXPORT).unwrap();
    let exported = store.export_json().unwrap();
    let reloaded = EntityStore::import_json(&exported).unwrap();
    assert_eq!(store.snapshot(), reloaded.snapshot());
}

#[test]
fn test_unknown_status_rejected() {
    let bad = EXPORT.replace("\"GREEN\"", "\"BLUE\"");
    let err = EntitySnapshot::from_json(&bad).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn test_partial_document_defaults_to_empty() {
    let snapshot = EntitySnapshot::from_json(r#"{ "workers": [] }"#).unwrap();
    assert!(snapshot.is_empty());
}

#[test]
fn test_repeated_member_ids_collapse_on_import() {
    let doubled = EXPORT
        .replace(r#""memberIds": ["w1"]"#, r#""memberIds": ["w1", "w1"]"#)
        .replace(r#""memberIds": ["w2"]"#, r#""memberIds": ["w2", "w2", "w2"]"#);
    let snapshot = EntitySnapshot::from_json(&doubled).unwrap();
    assert_eq!(snapshot.projects[1].member_ids.len(), 1);
    assert_eq!(snapshot.teams[0].member_ids.len(), 1);

    let exported = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(exported["teams"][0]["memberIds"], serde_json::json!(["w2"]));
}

#[test]
fn test_task_without_created_at_still_imports() {
    let legacy = EXPORT.replace(r#""createdAt": "2024-10-02T09:00:00Z", "#, "");
    let snapshot = EntitySnapshot::from_json(&legacy).unwrap();
    assert_eq!(snapshot.tasks.len(), 2);
}

#[test]
fn test_created_task_gets_fresh_id() {
    let mut store = EntityStore::import_json(EXPORT).unwrap();
    let first = store
        .create_task("Docs", WorkerId::new("w1"), ProjectId::new("p2"), None)
        .unwrap();
    let second = store
        .create_task("Review", WorkerId::new("w2"), ProjectId::new("p1"), Some(TeamId::new("t1")))
        .unwrap();

    assert_ne!(first, second);
    assert!(uuid::Uuid::parse_str(first.as_str()).is_ok());
    let task = store.task(&second).unwrap();
    assert_eq!(task.team_id, Some(TeamId::new("t1")));
    assert_eq!(task.status, TaskStatus::Green);
    assert_eq!(task.stage, TaskStage::Todo);
}

#[test]
fn test_crud_flow_keeps_store_consistent() {
    let mut store = EntityStore::import_json(EXPORT).unwrap();
    let id = TaskId::new("tsk1");

    store.update_task_status(&id, TaskStatus::Green, None).unwrap();
    assert!(store.task(&id).unwrap().block.is_none());

    let err = store.update_task_status(&id, TaskStatus::Red, None).unwrap_err();
    assert!(matches!(err, StoreError::MissingBlock(_)));

    store.move_task(&id, TaskStage::Done).unwrap();
    assert!(!store.task(&id).unwrap().is_active());

    store.remove_worker(&WorkerId::new("w2")).unwrap();
    // References to the removed worker stay behind.
    assert_eq!(store.task(&id).unwrap().worker_id, WorkerId::new("w2"));
    assert!(store.remove_worker(&WorkerId::new("w2")).unwrap_err().is_not_found());
}

proptest! {
    #[test]
    fn prop_intensity_always_clamped(raw in any::<i64>()) {
        let json = format!(r#"{{ "id": "w", "name": "W", "intensity": {raw} }}"#);
        let worker: nexus_model::Worker = serde_json::from_str(&json).unwrap();
        prop_assert!((1..=10).contains(&worker.intensity.value()));
    }
}

use nexus_cli::{command, run};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;

fn exec(args: &[&str]) -> anyhow::Result<String> {
    let matches = command().try_get_matches_from(std::iter::once("nexus").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    run(&matches, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn exec_json(args: &[&str]) -> Value {
    serde_json::from_str(&exec(args).unwrap()).unwrap()
}

#[test]
fn test_tree_of_sample_data() {
    let text = exec(&["tree"]).unwrap();
    assert!(text.starts_with("Nexus\n"));
    assert!(text.contains("[PROJECT] Migración Cloud"));
    assert!(text.contains("[PROJECT] Lanzamiento Q4"));
    assert!(text.contains("BLOCKED:"));
}

#[test]
fn test_red_filter_as_json() {
    let tree = exec_json(&["tree", "--status", "RED", "--json"]);
    assert_eq!(tree["type"], "ROOT");
    let projects = tree["children"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["name"], "Lanzamiento Q4");
}

#[test]
fn test_unknown_project_gives_empty_tree() {
    let tree = exec_json(&["tree", "--project", "nope", "--json"]);
    assert_eq!(tree["children"].as_array().unwrap().len(), 0);
}

#[test]
fn test_layout_report() {
    let report = exec_json(&["layout", "--height", "600"]);
    let nodes = report["nodes"].as_array().unwrap();
    assert_eq!(nodes[0]["x"], 0.0);
    assert_eq!(nodes[0]["node"]["type"], "ROOT");
    assert_eq!(report["links"].as_array().unwrap().len(), nodes.len() - 1);
    assert_eq!(report["transform"]["scale"], 0.75);
    assert_eq!(report["transform"]["translate_x"], 80.0);
}

#[test]
fn test_inspect_red_task() {
    let text = exec(&["inspect", "--kind", "task", "--id", "tsk3"]).unwrap();
    assert!(text.contains("status:   RED"));
    assert!(text.contains("blocker:  Pedro Junior"));

    let detail = exec_json(&["inspect", "--kind", "task", "--id", "tsk3", "--json"]);
    assert_eq!(detail["type"], "TASK");
    assert_eq!(detail["block"]["blocker_name"], "Pedro Junior");
}

#[test]
fn test_inspect_unknown_id_fails() {
    let err = exec(&["inspect", "--kind", "worker", "--id", "w404"]).unwrap_err();
    assert!(err.to_string().contains("w404"));
}

#[test]
fn test_stats() {
    let stats = exec_json(&["stats", "--json"]);
    assert_eq!(stats["projects"], 2);
    assert_eq!(stats["workers"], 5);
    assert_eq!(stats["blocked_tasks"], 1);
}

#[test]
fn test_members_sorted_by_name() {
    let text = exec(&["members"]).unwrap();
    let names: Vec<&str> = text.lines().filter_map(|l| l.split('\t').nth(1)).collect();
    let mut sorted = names.clone();
    sorted.sort_by_key(|n| n.to_lowercase());
    assert_eq!(names, sorted);
    assert_eq!(names.len(), 5);
}

#[test]
fn test_export_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let path_str = path.to_str().unwrap();

    exec(&["export", "--out", path_str]).unwrap();
    let original = exec(&["tree", "--json"]).unwrap();
    let reloaded = exec(&["--data", path_str, "tree", "--json"]).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn test_config_file_sets_root_label() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "root_label = \"Org\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let text = exec(&["--config", &path, "tree"]).unwrap();
    assert!(text.starts_with("Org\n"));
}

#[test]
fn test_invalid_config_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[layout]\nnode_size = -1.0").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let err = exec(&["--config", &path, "stats"]).unwrap_err();
    assert!(format!("{err:#}").contains("node_size"));
}

#[test]
fn test_malformed_data_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    assert!(exec(&["--data", &path, "tree"]).is_err());
}

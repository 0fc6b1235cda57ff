//! Built-in mock data the dashboard starts with

use crate::entity::{Block, FunctionalRole, Project, Task, TaskStage, TaskStatus, Team, Worker};
use crate::snapshot::EntitySnapshot;
use chrono::{DateTime, NaiveDate, Utc};

/// Initial state: two projects, five workers, three teams, four tasks
#[must_use]
pub fn seed_snapshot() -> EntitySnapshot {
    EntitySnapshot {
        projects: projects(),
        teams: teams(),
        workers: workers(),
        tasks: tasks(),
        roles: roles(),
    }
}

fn projects() -> Vec<Project> {
    vec![
        Project::new("p1", "Migración Cloud", "#3b82f6")
            .with_description("Migración de servidores a AWS")
            .with_member("w1"),
        Project::new("p2", "Lanzamiento Q4", "#10b981")
            .with_description("Campaña de marketing global"),
    ]
}

fn workers() -> Vec<Worker> {
    vec![
        Worker::new("w1", "Carlos Director")
            .with_role("Director Técnico")
            .with_intensity(9)
            .with_notes("Alta performance"),
        Worker::new("w2", "Ana Gerente")
            .with_role("Project Manager")
            .with_intensity(8)
            .with_notes("Excelente gestión")
            .with_manager("w1"),
        Worker::new("w3", "Luis Dev")
            .with_role("Senior Backend")
            .with_role("DevOps")
            .with_intensity(7)
            .with_notes("Necesita motivación")
            .with_manager("w2"),
        Worker::new("w4", "Sofia QA")
            .with_role("QA Lead")
            .with_intensity(6)
            .with_notes("Muy detallista")
            .with_manager("w2"),
        Worker::new("w5", "Pedro Junior")
            .with_role("Asistente Línea A")
            .with_intensity(4)
            .with_notes("En entrenamiento")
            .with_manager("w3"),
    ]
}

fn teams() -> Vec<Team> {
    vec![
        Team::new("t1", "p1", "Pareja Alpha").with_member("w2").with_member("w3"),
        Team::new("t2", "p1", "Pareja Beta").with_member("w3").with_member("w5"),
        Team::new("t3", "p2", "Equipo Creativo").with_member("w4"),
    ]
}

fn tasks() -> Vec<Task> {
    vec![
        Task::new("tsk1", "Diseño de Arquitectura", "w2", "p1")
            .in_team("t1")
            .with_stage(TaskStage::Done)
            .created(at(2024, 9, 2)),
        Task::new("tsk2", "Implementación API", "w3", "p1")
            .in_team("t1")
            .with_status(TaskStatus::Yellow)
            .with_stage(TaskStage::InProgress)
            .created(at(2024, 9, 9))
            .due(day(2024, 10, 31)),
        Task::new("tsk3", "Testing Automatizado", "w4", "p2")
            .in_team("t3")
            .blocked(Block::new(
                "Falta de entorno de pruebas configurado por soporte",
                "w5",
            ))
            .with_stage(TaskStage::InProgress)
            .created(at(2024, 9, 16)),
        Task::new("tsk4", "Revisión de costos", "w1", "p1")
            .created(at(2024, 9, 20))
            .due(day(2024, 11, 15))
            .with_notes("Comparar reservas contra on-demand"),
    ]
}

fn roles() -> Vec<FunctionalRole> {
    [
        "Director Técnico",
        "Project Manager",
        "Senior Backend",
        "DevOps",
        "QA Lead",
        "Asistente Línea A",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| FunctionalRole::new(format!("r{}", i + 1), *name))
    .collect()
}

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap_or_default()
}

fn at(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    day(year, month, d)
        .and_hms_opt(9, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TeamId;

    #[test]
    fn seed_references_resolve() {
        let snap = seed_snapshot();
        for team in &snap.teams {
            assert!(snap.project(&team.project_id).is_some());
            for member in &team.member_ids {
                assert!(snap.worker(member).is_some());
            }
        }
        for task in &snap.tasks {
            assert!(snap.worker(&task.worker_id).is_some());
            if task.status == TaskStatus::Red {
                assert!(task.block.is_some());
            }
        }
    }

    #[test]
    fn seed_has_direct_task() {
        let snap = seed_snapshot();
        assert!(snap.tasks.iter().any(|t| t.team_id.is_none()));
        assert!(snap
            .tasks
            .iter()
            .any(|t| t.team_id == Some(TeamId::new("t3"))));
    }
}

//! Integration tests for the hierarchy workflow.
//!
//! These tests drive the application handlers end to end:
//! 1. Create a hierarchy from a template and store it
//! 2. Apply structural and judgment edits through the edit handler
//! 3. Analyze the stored hierarchy and export the report
//! 4. Persist hierarchies as YAML/JSON files and read them back

use std::sync::Arc;

use ahp_engine::adapters::{
    exporter_for, read_hierarchy_file, write_hierarchy_file, FileHierarchyStorage,
    InMemoryHierarchyStorage,
};
use ahp_engine::application::{
    AnalyzeHierarchyCommand, AnalyzeHierarchyError, AnalyzeHierarchyHandler,
    CreateHierarchyCommand, CreateHierarchyHandler, EditHierarchyCommand, EditHierarchyError,
    EditHierarchyHandler, EditOutcome, HierarchyEdit, HierarchyLocks, HierarchyTemplate,
};
use ahp_engine::config::StorageFormat;
use ahp_engine::domain::ahp::reference::{
    reference_hierarchy, EXPECTED_CRITERIA_WEIGHTS, EXPECTED_RANKING,
};
use ahp_engine::domain::ahp::{
    AhpAnalyzer, AhpError, AnalysisReport, ConsistencyStatus, EntityKind, HierarchyLimits,
    MatrixRef,
};
use ahp_engine::domain::foundation::HierarchyId;
use ahp_engine::ports::HierarchyRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Workflow {
    create: CreateHierarchyHandler,
    edit: EditHierarchyHandler,
    analyze: AnalyzeHierarchyHandler,
}

impl Workflow {
    fn new(repository: Arc<dyn HierarchyRepository>) -> Self {
        let limits = HierarchyLimits::default();
        Self {
            create: CreateHierarchyHandler::new(repository.clone(), limits),
            edit: EditHierarchyHandler::new(repository.clone(), HierarchyLocks::new(), limits),
            analyze: AnalyzeHierarchyHandler::new(repository, AhpAnalyzer::default(), limits),
        }
    }

    async fn create(&self, template: HierarchyTemplate) -> HierarchyId {
        self.create
            .handle(CreateHierarchyCommand { template })
            .await
            .unwrap()
            .id
    }

    async fn edit(&self, id: HierarchyId, edit: HierarchyEdit) -> EditOutcome {
        self.edit
            .handle(EditHierarchyCommand {
                hierarchy_id: id,
                edit,
            })
            .await
            .unwrap()
            .outcome
    }

    async fn analyze(&self, id: HierarchyId) -> AnalysisReport {
        self.analyze
            .handle(AnalyzeHierarchyCommand { hierarchy_id: id })
            .await
            .unwrap()
    }
}

fn in_memory_workflow() -> Workflow {
    Workflow::new(Arc::new(InMemoryHierarchyStorage::new()))
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {} of {}",
        actual,
        tolerance,
        expected
    );
}

fn assert_reference_ranking(report: &AnalysisReport) {
    assert_eq!(report.ranking.len(), EXPECTED_RANKING.len());
    for (ranked, (name, score, rank)) in report.ranking.iter().zip(EXPECTED_RANKING) {
        assert_eq!(ranked.name, name);
        assert_eq!(ranked.rank, rank);
        assert_close(ranked.score, score, 1e-6);
    }
}

// =============================================================================
// Reference Dataset
// =============================================================================

#[tokio::test]
async fn stored_reference_hierarchy_reproduces_published_results() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Reference).await;

    let report = workflow.analyze(id).await;

    for (actual, expected) in report.criteria_weights.iter().zip(EXPECTED_CRITERIA_WEIGHTS) {
        assert_close(actual, expected, 1e-6);
    }
    assert_reference_ranking(&report);
    assert_eq!(report.best_alternative().unwrap().name, "Dosen E");
    assert_eq!(report.consistency.len(), 5);
    let first = &report.consistency[0].result;
    assert_eq!(first.status, ConsistencyStatus::Consistent);
}

#[tokio::test]
async fn reference_csv_export_lists_every_section() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Reference).await;
    let report = workflow.analyze(id).await;

    let csv = exporter_for("csv").unwrap().export(&report).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "AHP Analysis Results");
    assert!(lines.contains(&"Criteria Weights"));
    assert!(lines.contains(&"Final Rankings"));
    assert!(lines.contains(&"Consistency Results"));
    assert!(lines.iter().any(|l| l.starts_with("1,\"Dosen E\",")));
    assert!(lines.iter().any(|l| l.starts_with("2,\"Dosen A\",")));
    assert!(lines.iter().any(|l| l.starts_with("2,\"Dosen B\",")));
    assert!(lines.iter().any(|l| l.starts_with("5,\"Dosen C\",")));
}

// =============================================================================
// Editing
// =============================================================================

#[tokio::test]
async fn added_then_removed_alternative_restores_reference_ranking() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Reference).await;

    let outcome = workflow
        .edit(
            id,
            HierarchyEdit::AddEntity {
                kind: EntityKind::Alternative,
                name: "Dosen F".to_string(),
            },
        )
        .await;
    assert_eq!(outcome, EditOutcome::Added { index: 5 });

    let grown = workflow.analyze(id).await;
    assert_eq!(grown.ranking.len(), 6);
    assert!(grown.ranking.iter().any(|r| r.name == "Dosen F"));

    let outcome = workflow
        .edit(
            id,
            HierarchyEdit::RemoveEntity {
                kind: EntityKind::Alternative,
                index: 5,
            },
        )
        .await;
    assert_eq!(
        outcome,
        EditOutcome::Removed {
            name: "Dosen F".to_string()
        }
    );

    assert_reference_ranking(&workflow.analyze(id).await);
}

#[tokio::test]
async fn judgments_drive_the_ranking() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Default).await;

    let neutral = workflow.analyze(id).await;
    assert!(neutral.ranking.iter().all(|r| r.rank == 1));
    assert!(neutral.is_fully_consistent());

    // Dosen C strongly preferred on every criterion
    for criterion in neutral.criteria.clone() {
        for other in [0, 1, 3, 4] {
            workflow
                .edit(
                    id,
                    HierarchyEdit::SetJudgment {
                        matrix: MatrixRef::Alternatives(criterion.clone()),
                        row: 2,
                        col: other,
                        value: 5.0,
                    },
                )
                .await;
        }
    }

    let report = workflow.analyze(id).await;
    let best = report.best_alternative().unwrap();
    assert_eq!(best.name, "Dosen C");
    assert_eq!(best.rank, 1);
    assert!(report.ranking[1..].iter().all(|r| r.rank == 2));
    assert!(report.is_fully_consistent());
}

#[tokio::test]
async fn renamed_criterion_carries_its_judgments() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Reference).await;
    let before = workflow.analyze(id).await;

    workflow
        .edit(
            id,
            HierarchyEdit::RenameEntity {
                kind: EntityKind::Criterion,
                index: 0,
                new_name: "Pengajaran".to_string(),
            },
        )
        .await;

    let after = workflow.analyze(id).await;
    assert_eq!(after.criteria[0], "Pengajaran");
    assert_eq!(
        after.priorities_for("Pengajaran"),
        before.priorities_for("Pendidikan")
    );
    assert!(after.priorities_for("Pendidikan").is_none());
    assert_reference_ranking(&after);
}

#[tokio::test]
async fn rejected_edit_leaves_stored_hierarchy_untouched() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Reference).await;

    let result = workflow
        .edit
        .handle(EditHierarchyCommand {
            hierarchy_id: id,
            edit: HierarchyEdit::SetJudgment {
                matrix: MatrixRef::Criteria,
                row: 0,
                col: 1,
                value: -3.0,
            },
        })
        .await;

    assert!(matches!(result, Err(EditHierarchyError::Rejected(_))));
    assert_reference_ranking(&workflow.analyze(id).await);
}

#[tokio::test]
async fn removal_stops_at_minimum_alternatives() {
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Default).await;
    let remove_first = HierarchyEdit::RemoveEntity {
        kind: EntityKind::Alternative,
        index: 0,
    };

    for _ in 0..3 {
        workflow.edit(id, remove_first.clone()).await;
    }

    let result = workflow
        .edit
        .handle(EditHierarchyCommand {
            hierarchy_id: id,
            edit: remove_first,
        })
        .await;

    assert!(matches!(
        result,
        Err(EditHierarchyError::Rejected(AhpError::MinimumCardinality { min: 2, .. }))
    ));
    let report = workflow.analyze(id).await;
    assert_eq!(report.alternatives, vec!["Dosen D", "Dosen E"]);
}

#[tokio::test]
async fn unknown_hierarchy_cannot_be_analyzed() {
    let workflow = in_memory_workflow();

    let result = workflow
        .analyze
        .handle(AnalyzeHierarchyCommand {
            hierarchy_id: HierarchyId::new(),
        })
        .await;

    assert!(matches!(result, Err(AnalyzeHierarchyError::NotFound(_))));
}

#[tokio::test]
async fn concurrent_edits_on_shared_storage_are_all_kept() {
    let repository: Arc<dyn HierarchyRepository> = Arc::new(InMemoryHierarchyStorage::new());
    let workflow = Arc::new(Workflow::new(repository));
    let id = workflow.create(HierarchyTemplate::Default).await;

    let mut tasks = Vec::new();
    for i in 0..5 {
        let workflow = workflow.clone();
        tasks.push(tokio::spawn(async move {
            workflow
                .edit(
                    id,
                    HierarchyEdit::AddEntity {
                        kind: EntityKind::Criterion,
                        name: format!("Extra {}", i),
                    },
                )
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let report = workflow.analyze(id).await;
    assert_eq!(report.criteria.len(), 9);
    assert_eq!(report.alternative_priorities.len(), 9);
}

// =============================================================================
// File Storage
// =============================================================================

#[tokio::test]
async fn file_storage_round_trip_keeps_analysis_results() {
    let dir = tempfile::tempdir().unwrap();
    for format in [StorageFormat::Yaml, StorageFormat::Json] {
        let storage = Arc::new(FileHierarchyStorage::new(
            dir.path().join(format.extension()),
            format,
        ));
        let workflow = Workflow::new(storage.clone());

        let id = workflow.create(HierarchyTemplate::Reference).await;
        assert_eq!(storage.list_ids().await.unwrap(), vec![id]);

        assert_reference_ranking(&workflow.analyze(id).await);
    }
}

#[tokio::test]
async fn tiny_judgment_leaves_stored_file_loadable() {
    let dir = tempfile::tempdir().unwrap();
    for format in [StorageFormat::Yaml, StorageFormat::Json] {
        let storage = Arc::new(FileHierarchyStorage::new(
            dir.path().join(format.extension()),
            format,
        ));
        let workflow = Workflow::new(storage.clone());
        let id = workflow.create(HierarchyTemplate::Reference).await;

        let result = workflow
            .edit
            .handle(EditHierarchyCommand {
                hierarchy_id: id,
                edit: HierarchyEdit::SetJudgment {
                    matrix: MatrixRef::Alternatives("Penelitian".to_string()),
                    row: 0,
                    col: 1,
                    value: 1e-310,
                },
            })
            .await;
        assert!(matches!(
            result,
            Err(EditHierarchyError::Rejected(AhpError::InvalidJudgment { .. }))
        ));

        assert!(storage.find_by_id(id).await.unwrap().is_some());
        assert_reference_ranking(&workflow.analyze(id).await);
    }
}

#[tokio::test]
async fn hierarchy_document_written_then_imported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dosen.yaml");
    write_hierarchy_file(&path, &reference_hierarchy().unwrap())
        .await
        .unwrap();

    let imported = read_hierarchy_file(&path).await.unwrap();
    let workflow = in_memory_workflow();
    let id = workflow.create(HierarchyTemplate::Imported(imported)).await;

    assert_reference_ranking(&workflow.analyze(id).await);
}

#[tokio::test]
async fn handwritten_yaml_document_is_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("laptop.yaml");
    std::fs::write(
        &path,
        r#"goal: Choose a laptop
criteria: [Price, Battery]
alternatives: [Alpha, Beta]
criteria_matrix:
  - [1.0, 2.0]
  - [0.5, 1.0]
alternative_matrices:
  Price:
    - [1.0, 4.0]
    - [0.25, 1.0]
  Battery:
    - [1.0, 1.0]
    - [1.0, 1.0]
"#,
    )
    .unwrap();

    let hierarchy = read_hierarchy_file(&path).await.unwrap();
    let workflow = in_memory_workflow();
    let report = workflow.analyze.analyze(hierarchy).unwrap();

    // Alpha: 2/3 * 0.8 + 1/3 * 0.5 = 0.7
    assert_eq!(report.ranking[0].name, "Alpha");
    assert_close(report.ranking[0].score, 0.7, 1e-12);
    assert_close(report.ranking[1].score, 0.3, 1e-12);
    assert!(report.is_fully_consistent());
}

mod common;

use std::path::{Path, PathBuf};

use common::FakeTool;
use muster::core::resolver;
use muster::types::AppError;
use pretty_assertions::assert_eq;

fn fake_tool() -> FakeTool {
    FakeTool::new("/nonexistent/mutation-report.json")
}

#[test]
fn single_reference_is_the_tested_project() {
    let mut tool = fake_tool();
    tool.projects = vec![
        PathBuf::from("/s/A/A.csproj"),
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
    ];
    tool.references.insert(
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
        vec![PathBuf::from("/s/A/A.csproj")],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(
        pairs[0].test_project_path,
        PathBuf::from("/s/A.Tests/A.Tests.csproj")
    );
    assert_eq!(pairs[0].tested_project_path, PathBuf::from("/s/A/A.csproj"));
}

#[test]
fn multiple_references_select_by_naming_convention() {
    let mut tool = fake_tool();
    tool.projects = vec![
        PathBuf::from("/s/B/B.csproj"),
        PathBuf::from("/s/Common/Common.csproj"),
        PathBuf::from("/s/B.Tests/B.Tests.csproj"),
    ];
    tool.references.insert(
        PathBuf::from("/s/B.Tests/B.Tests.csproj"),
        vec![
            PathBuf::from("/s/Common/Common.csproj"),
            PathBuf::from("/s/B/B.csproj"),
        ],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].tested_project_path, PathBuf::from("/s/B/B.csproj"));
}

#[test]
fn unresolved_ambiguity_is_a_fatal_error() {
    let mut tool = fake_tool();
    tool.projects = vec![PathBuf::from("/s/B.Tests/B.Tests.csproj")];
    tool.references.insert(
        PathBuf::from("/s/B.Tests/B.Tests.csproj"),
        vec![
            PathBuf::from("/s/Common/Common.csproj"),
            PathBuf::from("/s/Other/Other.csproj"),
        ],
    );

    let error = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap_err();

    match error {
        AppError::AmbiguousReferences {
            test_project,
            count,
            suffix,
        } => {
            assert_eq!(test_project, PathBuf::from("/s/B.Tests/B.Tests.csproj"));
            assert_eq!(count, 2);
            assert_eq!(suffix, ".Tests");
        }
        other => panic!("expected AmbiguousReferences, got {other:?}"),
    }
}

#[test]
fn test_projects_without_references_are_skipped() {
    let mut tool = fake_tool();
    tool.projects = vec![
        PathBuf::from("/s/Orphan.Tests/Orphan.Tests.csproj"),
        PathBuf::from("/s/A/A.csproj"),
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
    ];
    tool.references.insert(
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
        vec![PathBuf::from("/s/A/A.csproj")],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(
        pairs[0].test_project_path,
        PathBuf::from("/s/A.Tests/A.Tests.csproj")
    );
}

#[test]
fn non_test_projects_are_never_paired() {
    let mut tool = fake_tool();
    tool.projects = vec![PathBuf::from("/s/A/A.csproj")];
    tool.references.insert(
        PathBuf::from("/s/A/A.csproj"),
        vec![PathBuf::from("/s/Common/Common.csproj")],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    assert!(pairs.is_empty());
}

/// The end-to-end resolution scenario: A.Tests has a single reference,
/// B.Tests disambiguates between B and Common via the suffix rule.
#[test]
fn solution_resolves_in_enumeration_order_and_common_is_never_a_target() {
    let mut tool = fake_tool();
    tool.projects = vec![
        PathBuf::from("/s/A/A.csproj"),
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
        PathBuf::from("/s/B/B.csproj"),
        PathBuf::from("/s/Common/Common.csproj"),
        PathBuf::from("/s/B.Tests/B.Tests.csproj"),
    ];
    tool.references.insert(
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
        vec![PathBuf::from("/s/A/A.csproj")],
    );
    tool.references.insert(
        PathBuf::from("/s/B.Tests/B.Tests.csproj"),
        vec![
            PathBuf::from("/s/B/B.csproj"),
            PathBuf::from("/s/Common/Common.csproj"),
        ],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    let resolved: Vec<(String, String)> = pairs
        .iter()
        .map(|pair| (pair.test_project_name(), pair.tested_project_name()))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("A.Tests.csproj".to_string(), "A.csproj".to_string()),
            ("B.Tests.csproj".to_string(), "B.csproj".to_string()),
        ]
    );
    assert!(
        pairs
            .iter()
            .all(|pair| pair.tested_project_name() != "Common.csproj")
    );
}

#[test]
fn report_path_swaps_the_project_extension_for_json() {
    let mut tool = fake_tool();
    tool.projects = vec![PathBuf::from("/s/A.Tests/A.Tests.csproj")];
    tool.references.insert(
        PathBuf::from("/s/A.Tests/A.Tests.csproj"),
        vec![PathBuf::from("/s/A/A.csproj")],
    );

    let pairs = resolver::resolve(&tool, Path::new("/s/S.sln")).unwrap();

    assert_eq!(
        pairs[0].report_path(),
        PathBuf::from("/s/A.Tests/A.Tests.json")
    );
}

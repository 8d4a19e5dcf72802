//! Library integration tests.

use degreeplan::PlannerError;

#[test]
fn error_types_are_public() {
    let err = PlannerError::UnknownProgram {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> degreeplan::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use degreeplan::cli::{Cli, Commands};

    let cli = Cli::parse_from(["degreeplan", "status", "--json"]);
    assert!(cli.command.is_some());

    if let Some(Commands::Status(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Status command");
    }
}

#[test]
fn lint_registry_checks_programs() {
    use degreeplan::lint::{RuleRegistry, Severity};
    use degreeplan::requirements::{Program, RequirementCategory, RequirementNode};

    let program = Program::new(
        "Broken",
        0,
        vec![RequirementCategory::new(
            "Core",
            vec![RequirementNode::reference("nowhere")],
        )],
    );

    let diagnostics = RuleRegistry::with_builtins().check(&program);

    assert!(diagnostics
        .iter()
        .any(|d| d.rule_id.0 == "undefined-group-ref" && d.severity == Severity::Error));
    assert!(diagnostics.iter().any(|d| d.rule_id.0 == "program-credits"));
}

#[test]
fn course_codes_normalize_for_lookup() {
    use degreeplan::requirements::normalize_course_code;

    assert_eq!(normalize_course_code("math1551"), "MATH 1551");
}

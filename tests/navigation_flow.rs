//! Integration tests for the interactive workspace flow.
//!
//! Walks the views the way a user would: enter inputs, analyze, open the
//! overview, drill into a dimension, read the summary and start over.

use std::sync::Arc;
use std::time::Duration;

use problem_analyzer::adapters::reasoning::{
    MockReasoningTransport, MockReply, ResilientStageInvoker, RetryPolicy, ServiceIdentity,
};
use problem_analyzer::application::{
    AnalysisWorkspace, AnalyzeOutcome, InputWarning, PipelineOrchestrator, RunAnalysisHandler,
};
use problem_analyzer::domain::analysis::{AnalysisSession, NO_EXPLANATION_PLACEHOLDER};
use problem_analyzer::domain::catalog::{EndpointTemplate, StageCatalog};
use problem_analyzer::domain::foundation::{DifficultyLevel, Dimension};
use problem_analyzer::domain::navigation::{NavigationOutcome, NavigationWarning, ViewState};
use problem_analyzer::ports::ReasoningRequest;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn reply(request: &ReasoningRequest) -> MockReply {
    let goal = request.agency_goal.as_str();
    if goal.contains("Provide Hardness Score") {
        return MockReply::text(
            "Volatility (V): 4.20\nAmbiguity (A): 3.10\nInterconnectedness (I): 4.60\n\
             Uncertainty (U): 3.90\nOverall Difficulty Score = 4.25 (Hard)",
        );
    }
    if goal.contains("Extract the vocabulary") {
        return MockReply::text("SKU: stock keeping unit");
    }
    if goal.contains("Q7. Provide detailed analysis") {
        return MockReply::text("Score: 5/5");
    }
    if goal.contains(". Provide detailed analysis") {
        return MockReply::text("Analysis: dependencies span three systems.\n\nJustification: strong coupling.\nScore: 4/5");
    }
    MockReply::text(goal.to_string())
}

fn setup() -> (AnalysisWorkspace, RunAnalysisHandler) {
    let catalog = Arc::new(StageCatalog::standard(&EndpointTemplate {
        base_url: "https://reasoning.test/agency/reasoning_api".to_string(),
        society_id: "1757657318406".to_string(),
        level: 1,
    }));
    let transport = MockReasoningTransport::new().with_responder(|_, _, request| reply(request));
    let invoker = ResilientStageInvoker::new(
        transport,
        ServiceIdentity::default().with_tenant("talos"),
        RetryPolicy::new(3, Duration::ZERO),
    );
    let orchestrator = PipelineOrchestrator::new(catalog.clone(), Arc::new(invoker));
    (
        AnalysisWorkspace::new(catalog),
        RunAnalysisHandler::new(Arc::new(orchestrator)),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn results_are_unreachable_before_analysis() {
    let (mut workspace, _handler) = setup();

    for target in [ViewState::Overview, ViewState::DimensionDrilldown, ViewState::Summary] {
        let outcome = workspace.navigate(target);
        assert_eq!(
            outcome.warning(),
            Some(&NavigationWarning::AnalysisIncomplete { target })
        );
        assert_eq!(workspace.view(), ViewState::Input);
    }
    assert!(workspace.select_dimension(Dimension::Volatility).is_rejected());
    assert!(workspace.executive_summary().is_none());
}

#[tokio::test]
async fn missing_customer_is_a_warning() {
    let (mut workspace, handler) = setup();
    workspace.update_inputs("Select Customer", "", "Stock-outs are rising");

    let outcome = workspace.analyze(&handler).await;

    assert_eq!(outcome, AnalyzeOutcome::Warning(InputWarning::MissingCustomer));
    assert_eq!(workspace.session(), &AnalysisSession::default());
}

#[tokio::test]
async fn full_walk_through_the_views() {
    let (mut workspace, handler) = setup();
    workspace.update_inputs("The Home Depot", "Retail", "Stock-outs are rising");

    let outcome = workspace.analyze(&handler).await;
    assert!(matches!(outcome, AnalyzeOutcome::Completed { ref failed_stages, .. } if failed_stages.is_empty()));
    assert_eq!(workspace.session().difficulty_level(), DifficultyLevel::Hard);

    // Input -> Overview
    assert_eq!(
        workspace.navigate(ViewState::Overview),
        NavigationOutcome::Moved {
            from: ViewState::Input,
            to: ViewState::Overview
        }
    );
    // Overview -> Summary is not a direct move
    assert!(workspace.navigate(ViewState::Summary).is_rejected());
    assert_eq!(workspace.view(), ViewState::Overview);

    // Overview -> DimensionDrilldown with a selection
    workspace.select_dimension(Dimension::Interconnectedness);
    assert_eq!(workspace.view(), ViewState::DimensionDrilldown);
    assert_eq!(workspace.selected_dimension(), Some(Dimension::Interconnectedness));

    let questions = workspace.dimension_questions(Dimension::Interconnectedness);
    assert_eq!(
        questions.iter().map(|q| q.stage_name.as_str()).collect::<Vec<_>>(),
        vec!["Q7", "Q8", "Q9"]
    );
    assert_eq!(questions[0].display_text, NO_EXPLANATION_PLACEHOLDER);
    assert_eq!(questions[0].score.map(|s| s.value()), Some(5.0));
    assert!(questions[1].display_text.starts_with("**Analysis:**"));
    assert!(!questions[1].display_text.contains("Score: 4/5"));

    // switch dimension inside the drill-down
    assert_eq!(
        workspace.select_dimension(Dimension::Uncertainty),
        NavigationOutcome::DimensionSelected {
            dimension: Dimension::Uncertainty
        }
    );

    // Drilldown -> Summary and back keeps the selection
    workspace.navigate(ViewState::Summary);
    let summary = workspace.executive_summary().unwrap();
    assert_eq!(summary.overall_score.value(), 4.25);
    assert_eq!(summary.primary_dimension, Dimension::Interconnectedness);
    assert_eq!(summary.lowest_dimension, Dimension::Ambiguity);
    workspace.navigate(ViewState::DimensionDrilldown);
    assert_eq!(workspace.selected_dimension(), Some(Dimension::Uncertainty));

    // back to the overview clears it
    workspace.navigate(ViewState::Overview);
    assert_eq!(workspace.selected_dimension(), None);

    // vocabulary panel
    assert!(workspace.toggle_vocabulary());
    assert_eq!(workspace.vocabulary(), Some("SKU: stock keeping unit"));

    // start over
    workspace.reset();
    assert_eq!(workspace.view(), ViewState::Input);
    assert_eq!(workspace.session(), &AnalysisSession::default());
    assert!(!workspace.is_vocabulary_shown());
}

#[tokio::test]
async fn editing_the_problem_discards_results() {
    let (mut workspace, handler) = setup();
    workspace.update_inputs("The Home Depot", "Retail", "Stock-outs are rising");
    workspace.analyze(&handler).await;
    workspace.navigate(ViewState::Overview);

    workspace.update_inputs("The Home Depot", "Retail", "Stock-outs are rising in the south");

    assert_eq!(workspace.view(), ViewState::Input);
    assert!(!workspace.session().is_completed());
    assert!(workspace.navigate(ViewState::Overview).is_rejected());
}

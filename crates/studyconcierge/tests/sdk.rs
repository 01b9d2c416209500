//! SDK re-export smoke tests.

use pretty_assertions::assert_eq;
use studyconcierge::config::StudyConciergeConfig;
use studyconcierge::core::memory_keys;
use studyconcierge::{PlanRequest, StudyConcierge, init_logging};

#[tokio::test]
async fn sdk_exposes_a_working_concierge() {
    init_logging();
    let config = StudyConciergeConfig::builder().without_latency().build();
    let concierge = StudyConcierge::new(config, None).expect("concierge");

    let plan = concierge
        .create_study_plan(&PlanRequest::from_syllabus("Logic, Sets"))
        .await
        .expect("plan");
    assert_eq!(plan.subjects, vec!["Logic", "Sets"]);
    assert_eq!(plan.total_days(), 7);
    assert_eq!(
        concierge.memory().keys(),
        vec![memory_keys::PAST_STUDY_PLANS.to_string()]
    );
}

#[test]
fn core_reexport_matches_root_types() {
    let from_core: studyconcierge::core::PlanRequest = PlanRequest::new(["Logic"]);
    assert_eq!(from_core, studyconcierge::core::PlanRequest::new(["Logic"]));
    let err: studyconcierge::StudyError = studyconcierge::core::StudyError::InvalidArgument("x".into());
    assert!(matches!(err, studyconcierge::core::StudyError::InvalidArgument(_)));
}

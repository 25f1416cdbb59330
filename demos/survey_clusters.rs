use survey_cluster::{
    analyze, suggest_cluster_count, AnalysisConfig, ClusteringMethod, Response, Survey,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG=survey_cluster=debug to see per-run convergence.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Schema and responses arrive as JSON from the survey-management layer.
    let survey: Survey = serde_json::from_str(
        r#"{
            "id": "onboarding",
            "questions": [
                {"id": "age", "type": "integer"},
                {"id": "plan", "type": "single", "options": ["free", "pro", "team"]},
                {"id": "features", "type": "multiple", "options": ["sync", "share", "api", "sso"]},
                {"id": "feedback", "type": "text"}
            ]
        }"#,
    )?;

    let responses: Vec<Response> = serde_json::from_str(
        r#"[
            {"id": "r1", "surveyId": "onboarding", "answers": {"age": 21, "plan": "free", "features": ["sync"], "feedback": "nice"}},
            {"id": "r2", "surveyId": "onboarding", "answers": {"age": 25, "plan": "free", "features": [], "feedback": "ok"}},
            {"id": "r3", "surveyId": "onboarding", "answers": {"age": 23, "plan": "free"}},
            {"id": "r4", "surveyId": "onboarding", "answers": {"age": 47, "plan": "team", "features": ["sync", "share", "api", "sso"], "feedback": "we need audit logs before rolling out"}},
            {"id": "r5", "surveyId": "onboarding", "answers": {"age": 52, "plan": "team", "features": ["share", "api", "sso"], "feedback": "SSO setup was painless for the whole org"}},
            {"id": "r6", "surveyId": "onboarding", "answers": {"age": 35, "plan": "pro", "features": ["sync", "api"], "feedback": "api limits are tight"}}
        ]"#,
    )?;

    println!("methods: {:?}", ClusteringMethod::supported());

    let config = AnalysisConfig::new(3).with_seed(7);
    let suggested = suggest_cluster_count(&survey, &responses, 1, 5, &config)?;
    println!("elbow suggests k={suggested}");

    let result = analyze(&survey, &responses, &config)?;
    println!(
        "k={} inertia={:.3} silhouette={:.3}",
        result.cluster_count, result.inertia, result.average_silhouette
    );
    for (cluster, count) in &result.cluster_counts {
        println!("  cluster {cluster}: {count} response(s)");
    }
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

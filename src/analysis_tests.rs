#[cfg(test)]
#[allow(clippy::unwrap_used, unused_results)]
mod tests {
    use crate::analysis::{analyze, analyze_with_rng, suggest_cluster_count, AnalysisConfig};
    use crate::cluster::ClusteringMethod;
    use crate::projection::SCALE;
    use crate::survey::{Question, QuestionType, Response, Survey};
    use crate::Result;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};
    use serde_json::{json, Value};

    fn single_question_survey() -> Survey {
        Survey::new(
            "s1",
            vec![Question::new("q1", QuestionType::Single).with_options(["A", "B"])],
        )
    }

    fn responses_for(question: &str, answers: Vec<Value>) -> Vec<Response> {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, a)| Response::new(format!("r{i}"), "s1").with_answer(question, a))
            .collect()
    }

    fn mixed_survey() -> Survey {
        Survey::new(
            "s1",
            vec![
                Question::new("age", QuestionType::Integer),
                Question::new("tier", QuestionType::Single).with_options(["free", "pro", "team"]),
                Question::new("tools", QuestionType::Multiple).with_options(["a", "b", "c", "d"]),
                Question::new("comment", QuestionType::Text),
            ],
        )
    }

    fn mixed_responses() -> Vec<Response> {
        let rows = [
            (22, "free", json!(["a"]), "ok"),
            (24, "free", json!(["a", "b"]), "fine"),
            (23, "free", json!([]), ""),
            (58, "team", json!(["a", "b", "c", "d"]), "we rely on this every single day"),
            (61, "team", json!(["a", "c", "d"]), "critical for our whole department"),
            (40, "pro", json!(["b", "c"]), "useful at times"),
        ];
        rows.into_iter()
            .enumerate()
            .map(|(i, (age, tier, tools, comment))| {
                Response::new(format!("r{i}"), "s1")
                    .with_answer("age", age)
                    .with_answer("tier", tier)
                    .with_answer("tools", tools)
                    .with_answer("comment", comment)
            })
            .collect()
    }

    #[test]
    fn test_identical_answers_collapse_into_one_cluster() -> Result<()> {
        let survey = Survey::new("s1", vec![Question::new("n", QuestionType::Integer)]);
        let responses = responses_for("n", vec![json!(1), json!(1), json!(1)]);

        for method in [ClusteringMethod::Kmeans, ClusteringMethod::KmeansPlusPlus] {
            let config = AnalysisConfig::new(2).with_method(method).with_seed(5);
            let result = analyze(&survey, &responses, &config)?;

            assert!(result.points.iter().all(|p| p.x == 0.0 && p.y == 0.0));
            assert_eq!(result.cluster_count, 2);
            let mut sizes: Vec<usize> = result.cluster_counts.values().copied().collect();
            sizes.sort_unstable();
            assert_eq!(sizes, vec![0, 3]);
            assert_eq!(result.inertia, 0.0);
            assert_eq!(result.average_silhouette, 0.0);
        }
        Ok(())
    }

    #[test]
    fn test_single_choice_answers_split_by_option() -> Result<()> {
        let responses = responses_for("q1", vec![json!("A"), json!("A"), json!("B"), json!("B")]);
        let config = AnalysisConfig::new(2).with_method(ClusteringMethod::Kmeans);
        let result = analyze(&single_question_survey(), &responses, &config)?;

        let labels: Vec<usize> = result.points.iter().map(|p| p.cluster_index).collect();
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
        assert_eq!(result.cluster_counts.get(&0), Some(&2));
        assert_eq!(result.cluster_counts.get(&1), Some(&2));
        assert_eq!(result.inertia, 0.0);
        assert_eq!(result.average_silhouette, 1.0);
        Ok(())
    }

    #[test]
    fn test_kmeans_is_bitwise_repeatable() -> Result<()> {
        let survey = mixed_survey();
        let responses = mixed_responses();
        let config = AnalysisConfig::new(3).with_method(ClusteringMethod::Kmeans);

        let a = analyze(&survey, &responses, &config)?;
        let b = analyze(&survey, &responses, &config)?;
        assert_eq!(a.points, b.points);
        assert_eq!(a.centroids, b.centroids);
        assert_eq!(a.inertia.to_bits(), b.inertia.to_bits());
        Ok(())
    }

    /// Random source pinned to the middle of every range.
    struct MidpointRng;

    impl RngCore for MidpointRng {
        fn next_u32(&mut self) -> u32 {
            1 << 31
        }

        fn next_u64(&mut self) -> u64 {
            1 << 63
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0x80);
        }
    }

    #[test]
    fn test_kmeans_plus_plus_golden_run() -> Result<()> {
        // x = age on [0, 100]; every draw is the midpoint, so seeding picks
        // index 3 (70), then the D² walk stops at 10, then at 100.
        let survey = Survey::new("s1", vec![Question::new("age", QuestionType::Integer)]);
        let responses = responses_for("age", [0, 10, 20, 70, 90, 100].map(|v| json!(v)).to_vec());
        let config = AnalysisConfig::new(3).with_method(ClusteringMethod::KmeansPlusPlus);

        let result = analyze_with_rng(&survey, &responses, &config, &mut MidpointRng)?;

        let labels: Vec<usize> = result.points.iter().map(|p| p.cluster_index).collect();
        assert_eq!(labels, vec![1, 1, 1, 0, 2, 2]);
        let centroids: Vec<(usize, f64, f64)> = result
            .centroids
            .iter()
            .map(|c| (c.cluster_index, c.x, c.y))
            .collect();
        assert_eq!(centroids, vec![(0, 70.0, 0.0), (1, 10.0, 0.0), (2, 95.0, 0.0)]);
        assert_eq!(
            result.cluster_counts.into_iter().collect::<Vec<_>>(),
            vec![(0, 1), (1, 3), (2, 2)]
        );
        assert_eq!(result.inertia, 250.0);
        Ok(())
    }

    #[test]
    fn test_seed_matches_explicit_rng() -> Result<()> {
        let survey = mixed_survey();
        let responses = mixed_responses();
        let config = AnalysisConfig::new(3).with_seed(42);

        let seeded = analyze(&survey, &responses, &config)?;
        let explicit = analyze_with_rng(&survey, &responses, &config, &mut StdRng::seed_from_u64(42))?;
        assert_eq!(seeded, explicit);
        Ok(())
    }

    #[test]
    fn test_mixed_survey_groups_similar_respondents() -> Result<()> {
        let config = AnalysisConfig::new(2).with_method(ClusteringMethod::Kmeans);
        let result = analyze(&mixed_survey(), &mixed_responses(), &config)?;

        let label = |i: usize| result.points[i].cluster_index;
        // Young free-tier respondents vs. heavy team users.
        assert_eq!(label(0), label(1));
        assert_eq!(label(0), label(2));
        assert_eq!(label(3), label(4));
        assert_ne!(label(0), label(3));
        Ok(())
    }

    #[test]
    fn test_k_larger_than_response_count_is_clamped() -> Result<()> {
        let responses = responses_for("q1", vec![json!("A"), json!("B"), json!("C")]);
        let config = AnalysisConfig::new(10).with_method(ClusteringMethod::Kmeans);
        let result = analyze(&single_question_survey(), &responses, &config)?;

        assert_eq!(result.cluster_count, 3);
        assert_eq!(result.centroids.len(), 3);
        assert!(result
            .centroids
            .iter()
            .all(|c| c.x.is_finite() && c.y.is_finite()));
        Ok(())
    }

    #[test]
    fn test_points_keep_response_order_and_ids() -> Result<()> {
        let result = analyze(
            &mixed_survey(),
            &mixed_responses(),
            &AnalysisConfig::new(2).with_seed(1),
        )?;
        let ids: Vec<&str> = result.points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r1", "r2", "r3", "r4", "r5"]);
        Ok(())
    }

    #[test]
    fn test_suggest_cluster_count_on_two_groups() -> Result<()> {
        let answers = ["A", "A", "A", "B", "B", "B"].map(|a| json!(a)).to_vec();
        let responses = responses_for("q1", answers);
        let config = AnalysisConfig::default().with_seed(3);
        let k = suggest_cluster_count(&single_question_survey(), &responses, 1, 4, &config)?;
        assert_eq!(k, 2);
        Ok(())
    }

    fn arb_answer(kind: QuestionType) -> BoxedStrategy<Value> {
        match kind {
            QuestionType::Integer => (-50i64..200).prop_map(|v| json!(v)).boxed(),
            QuestionType::Single => prop_oneof![Just("x"), Just("y"), Just("z"), Just("other")]
                .prop_map(|v| json!(v))
                .boxed(),
            QuestionType::Multiple => proptest::collection::vec(Just("x"), 0..4)
                .prop_map(|v| json!(v))
                .boxed(),
            QuestionType::Text => ".{0,12}".prop_map(|v| json!(v)).boxed(),
        }
    }

    fn arb_kind() -> impl Strategy<Value = QuestionType> {
        prop_oneof![
            Just(QuestionType::Integer),
            Just(QuestionType::Single),
            Just(QuestionType::Multiple),
            Just(QuestionType::Text),
        ]
    }

    fn arb_case() -> impl Strategy<Value = (Survey, Vec<Response>)> {
        proptest::collection::vec(arb_kind(), 0..5)
            .prop_flat_map(|kinds| {
                let row = kinds
                    .iter()
                    .map(|&k| proptest::option::of(arb_answer(k)))
                    .collect::<Vec<_>>();
                (Just(kinds), proptest::collection::vec(row, 2..25))
            })
            .prop_map(|(kinds, rows)| {
                let questions = kinds
                    .iter()
                    .enumerate()
                    .map(|(i, &k)| Question::new(format!("q{i}"), k).with_options(["x", "y", "z"]))
                    .collect();
                let responses = rows
                    .into_iter()
                    .enumerate()
                    .map(|(r, row)| {
                        let mut response = Response::new(format!("r{r}"), "s1");
                        for (q, answer) in row.into_iter().enumerate() {
                            if let Some(answer) = answer {
                                response = response.with_answer(format!("q{q}"), answer);
                            }
                        }
                        response
                    })
                    .collect();
                (Survey::new("s1", questions), responses)
            })
    }

    proptest! {
        #[test]
        fn analysis_invariants_hold(
            (survey, responses) in arb_case(),
            k in 1i64..8,
            plus_plus in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let method = if plus_plus { ClusteringMethod::KmeansPlusPlus } else { ClusteringMethod::Kmeans };
            let config = AnalysisConfig::new(k).with_method(method).with_seed(seed);
            let result = analyze(&survey, &responses, &config).unwrap();
            let n = responses.len();

            prop_assert_eq!(result.points.len(), n);
            prop_assert_eq!(result.cluster_counts.values().sum::<usize>(), n);
            prop_assert_eq!(result.cluster_count, (k as usize).min(n));
            prop_assert_eq!(result.centroids.len(), result.cluster_count);

            for p in &result.points {
                prop_assert!(p.cluster_index < result.cluster_count);
                prop_assert_eq!(
                    result.centroids.iter().filter(|c| c.cluster_index == p.cluster_index).count(),
                    1
                );
                prop_assert!((0.0..=SCALE).contains(&p.x));
                prop_assert!((0.0..=SCALE).contains(&p.y));
            }
            for c in &result.centroids {
                prop_assert!(c.x.is_finite() && c.y.is_finite());
            }
            prop_assert!(result.inertia >= 0.0);
            prop_assert!((-1.0..=1.0).contains(&result.average_silhouette));

            let again = analyze(&survey, &responses, &config).unwrap();
            prop_assert_eq!(again, result);
        }
    }
}

use super::super::domain::FinalRecommendation;
use super::super::format::trim_decimal;
use super::decision::DecisionResult;

pub(crate) fn render(result: &DecisionResult) -> String {
    let mut lines = vec![
        format!(
            "Credit decision for {} (CR {}), fiscal year {}",
            result.company_name, result.cr_number, result.year
        ),
        format!(
            "Rulebook {}: {} of {} rules met ({}%)",
            result.rulebook_version,
            result.rules_met(),
            result.rules_total(),
            trim_decimal(result.percent_met)
        ),
    ];

    lines.push("Met rules:".to_string());
    lines.extend(rule_lines(&result.met_rules));
    lines.push("Failed rules:".to_string());
    lines.extend(rule_lines(&result.failed_rules));

    lines.push(format!(
        "Recommendation: {}",
        result.final_recommendation.label()
    ));
    if result.credit_history_override {
        lines.push(
            "  Credit History Green failed; bureau flags override the rule percentage."
                .to_string(),
        );
    } else if result.requires_ratio_review {
        lines.push("  Failed ratio rules require manual review by a credit officer.".to_string());
    } else if result.final_recommendation == FinalRecommendation::NotRecommended {
        lines.push("  Fewer rules met than the recommendation threshold.".to_string());
    }

    if !result.defaulted_figures.is_empty() {
        lines.push(format!(
            "Figures not reported (scored as 0): {}",
            result.defaulted_figures.join(", ")
        ));
    }

    lines.push(format!(
        "Scorecard {}: total {} grade {}",
        result.scorecard_version,
        trim_decimal(result.total_score),
        result.grade.label()
    ));
    for entry in &result.scorecard_table {
        let points = entry
            .points
            .map_or_else(|| "no score".to_string(), trim_decimal);
        lines.push(format!(
            "  {} | {} | {}",
            entry.factor_name,
            entry.observed_value.display(),
            points
        ));
    }

    lines.join("\n")
}

fn rule_lines(rules: &[String]) -> Vec<String> {
    if rules.is_empty() {
        return vec!["  - none".to_string()];
    }
    rules.iter().map(|rule| format!("  - {rule}")).collect()
}

use super::common::*;
use crate::workflows::credit::domain::{CreditBureauFlagSet, Figure, FlagStatus};
use crate::workflows::credit::evaluation::{evaluate, RulebookConfig, RulebookRule};

#[test]
fn always_returns_nine_outcomes_in_order() {
    let config = RulebookConfig::standard();
    let outcomes = evaluate(&passing_period(), &green_flags(), &config);

    let rules: Vec<RulebookRule> = outcomes.iter().map(|outcome| outcome.rule).collect();
    assert_eq!(rules, RulebookRule::ordered().to_vec());
    assert!(outcomes.iter().all(|outcome| outcome.passed));
}

#[test]
fn rule_names_render_thresholds() {
    let config = RulebookConfig::standard();
    let names: Vec<String> = evaluate(&passing_period(), &green_flags(), &config)
        .into_iter()
        .map(|outcome| outcome.rule_name)
        .collect();

    assert_eq!(
        names,
        vec![
            "Revenue > 1,000,000",
            "Operating Profit > 0",
            "DSCR \u{2265} 1.5",
            "Gearing Ratio \u{2264} 1.7",
            "Leverage Ratio \u{2264} 2.0",
            "Current Ratio \u{2265} 1.2",
            "External Debt/Sales < 50%",
            "Total Equity > 100,000",
            "Credit History Green",
        ]
    );
}

#[test]
fn every_rule_is_evaluated_even_after_failures() {
    let config = RulebookConfig::standard();
    let mut period = passing_period();
    period.revenue = Figure::reported(900_000.0);
    period.net_profit = Figure::reported(-10.0);

    let outcomes = evaluate(&period, &green_flags(), &config);

    assert_eq!(outcomes.len(), 9);
    assert!(!outcomes[0].passed);
    assert!(!outcomes[1].passed);
    assert!(outcomes[2..].iter().all(|outcome| outcome.passed));
}

#[test]
fn threshold_boundaries_follow_operators() {
    let config = RulebookConfig::standard();
    let mut period = passing_period();
    period.revenue = Figure::reported(1_000_000.0);
    period.net_profit = Figure::reported(0.0);
    period.dscr = Figure::reported(1.5);
    period.gearing_ratio = Figure::reported(1.7);
    period.leverage_ratio = Figure::reported(2.0);
    period.current_ratio = Figure::reported(1.2);
    period.external_debt_sales_ratio = Figure::reported(0.5);
    period.total_equity = Figure::reported(100_000.0);

    let passed: Vec<bool> = evaluate(&period, &green_flags(), &config)
        .into_iter()
        .map(|outcome| outcome.passed)
        .collect();

    assert_eq!(
        passed,
        vec![false, false, true, true, true, true, false, false, true]
    );
}

#[test]
fn current_ratio_of_one_fails() {
    let config = RulebookConfig::standard();
    let mut period = passing_period();
    period.current_ratio = Figure::reported(1.0);

    let outcome = evaluate(&period, &green_flags(), &config)
        .into_iter()
        .find(|outcome| outcome.rule == RulebookRule::CurrentRatio)
        .expect("current ratio rule present");
    assert!(!outcome.passed);
}

#[test]
fn unreported_flags_pass_credit_history_but_red_fails() {
    let config = RulebookConfig::standard();
    let mut flags = green_flags();
    flags.consumer.unsettled_defaults.flag = None;

    let credit = |flags: &CreditBureauFlagSet| {
        evaluate(&passing_period(), flags, &config)
            .into_iter()
            .find(|outcome| outcome.rule == RulebookRule::CreditHistory)
            .expect("credit rule present")
            .passed
    };
    assert!(credit(&flags));

    flags.commercial.court_cases.flag = Some(FlagStatus::Red);
    assert!(!credit(&flags));
}

#[test]
fn custom_thresholds_change_labels_and_results() {
    let mut config = RulebookConfig::standard();
    config.minimum_dscr = 2.5;
    config.minimum_revenue = 5_000_000.0;

    let outcomes = evaluate(&passing_period(), &green_flags(), &config);

    assert_eq!(outcomes[0].rule_name, "Revenue > 5,000,000");
    assert!(!outcomes[0].passed);
    assert_eq!(outcomes[2].rule_name, "DSCR \u{2265} 2.5");
    assert!(!outcomes[2].passed);

    config.minimum_dscr = 1.75;
    let mut period = passing_period();
    period.dscr = Figure::reported(1.76);
    let outcomes = evaluate(&period, &green_flags(), &config);

    assert_eq!(outcomes[2].rule_name, "DSCR \u{2265} 1.75");
    assert!(outcomes[2].passed);
}

#[test]
fn unreported_figures_are_judged_at_zero() {
    let config = RulebookConfig::standard();
    let mut period = passing_period();
    period.gearing_ratio = Figure::defaulted();
    period.total_equity = Figure::defaulted();

    let outcomes = evaluate(&period, &green_flags(), &config);
    let gearing = &outcomes[3];
    let equity = &outcomes[7];

    assert!(gearing.passed);
    assert!(!equity.passed);
}

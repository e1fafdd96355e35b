use fingenie_core::loans::comparison::{self, LoanComparisonInput, LoanOption};
use fingenie_core::loans::interest_only;
use fingenie_core::loans::prepayment::{self, PrepaymentInput, PrepaymentStrategy};
use fingenie_core::loans::{calculate_emi, generate_schedule, LoanParameters};
use fingenie_core::FinGenieError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn typical_loans() -> Vec<LoanParameters> {
    vec![
        LoanParameters::new(dec!(1_000_000), dec!(8.5), 240),
        LoanParameters::new(dec!(750_000), dec!(9.25), 84),
        LoanParameters::new(dec!(250_000), dec!(13.99), 36),
        LoanParameters::new(dec!(4_500_000), dec!(7.1), 360),
        LoanParameters::new(dec!(99_999.99), dec!(18), 13),
        LoanParameters::new(dec!(500_000), Decimal::ZERO, 12),
        LoanParameters::new(dec!(1234.56), dec!(0.5), 7),
    ]
}

// ===========================================================================
// EMI and schedule tests
// ===========================================================================

#[test]
fn test_home_loan_reference_emi() {
    let params = LoanParameters::new(dec!(1_000_000), dec!(8.5), 240);
    let out = calculate_emi(&params).unwrap().result;
    assert_eq!(out.emi, dec!(8678.23));
    assert_eq!(out.schedule.len(), 240);
    assert_eq!(out.schedule.last().unwrap().remaining_principal, Decimal::ZERO);
    // Total interest over 20 years is a little over 1.08M.
    assert!(
        out.total_interest > dec!(1_080_000) && out.total_interest < dec!(1_085_000),
        "unexpected total interest {}",
        out.total_interest
    );
}

#[test]
fn test_schedule_repays_exact_principal() {
    for params in typical_loans() {
        let out = calculate_emi(&params).unwrap().result;
        assert_eq!(out.schedule.len(), params.tenure_months as usize);

        let repaid: Decimal = out.schedule.iter().map(|e| e.principal_payment).sum();
        assert_eq!(repaid, params.principal, "loan {:?}", params);
        assert_eq!(out.schedule.last().unwrap().remaining_principal, Decimal::ZERO);
    }
}

#[test]
fn test_schedule_is_chronological_and_consistent() {
    let params = LoanParameters::new(dec!(750_000), dec!(9.25), 84);
    let out = calculate_emi(&params).unwrap().result;

    let mut balance = params.principal;
    for (idx, entry) in out.schedule.iter().enumerate() {
        assert_eq!(entry.month as usize, idx + 1);
        assert_eq!(entry.emi, entry.principal_payment + entry.interest_payment);
        assert_eq!(entry.remaining_principal, balance - entry.principal_payment);
        balance = entry.remaining_principal;
    }

    // Every month but the last pays exactly the fixed EMI.
    let (last, body) = out.schedule.split_last().unwrap();
    assert!(body.iter().all(|e| e.emi == out.emi));
    assert!((last.emi - out.emi).abs() < dec!(5));
}

#[test]
fn test_zero_rate_has_no_interest() {
    let params = LoanParameters::new(dec!(500_000), Decimal::ZERO, 12);
    let out = calculate_emi(&params).unwrap().result;
    assert_eq!(out.emi, dec!(41666.67));
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert!(out.schedule.iter().all(|e| e.interest_payment.is_zero()));
}

#[test]
fn test_emi_is_deterministic() {
    let params = LoanParameters::new(dec!(4_500_000), dec!(7.1), 360);
    let first = calculate_emi(&params).unwrap();
    let second = calculate_emi(&params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_longer_tenure_lowers_emi_raises_interest() {
    let mut previous: Option<(Decimal, Decimal)> = None;
    for tenure in [12, 24, 60, 120, 240, 360] {
        let params = LoanParameters::new(dec!(2_000_000), dec!(9), tenure);
        let out = calculate_emi(&params).unwrap().result;
        if let Some((emi, interest)) = previous {
            assert!(out.emi < emi, "EMI should fall at tenure {tenure}");
            assert!(out.total_interest > interest, "interest should rise at tenure {tenure}");
        }
        previous = Some((out.emi, out.total_interest));
    }
}

#[test]
fn test_schedule_from_external_emi() {
    let params = LoanParameters::new(dec!(100_000), dec!(12), 12);
    let schedule = generate_schedule(&params, dec!(8884.88)).unwrap();
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule.last().unwrap().remaining_principal, Decimal::ZERO);
}

#[test]
fn test_invalid_loan_is_rejected_before_scheduling() {
    let params = LoanParameters::new(dec!(-100), dec!(8), 12);
    match calculate_emi(&params) {
        Err(FinGenieError::InvalidArgument { field, .. }) => assert_eq!(field, "principal"),
        other => panic!("expected InvalidArgument, got {other:?}"),
    }
    assert!(generate_schedule(&params, dec!(10)).is_err());
}

#[test]
fn test_emi_output_serialises_numbers() {
    let params = LoanParameters::new(dec!(500_000), Decimal::ZERO, 12);
    let value = serde_json::to_value(calculate_emi(&params).unwrap().result).unwrap();
    assert!(value["emi"].is_number());
    assert_eq!(value["schedule"].as_array().unwrap().len(), 12);
    assert!(value["schedule"][0].get("prepayment").is_none());
}

// ===========================================================================
// Prepayment tests
// ===========================================================================

fn prepay(params: &LoanParameters, amount: Decimal, month: u32) -> PrepaymentInput {
    PrepaymentInput {
        principal: params.principal,
        annual_rate: params.annual_rate,
        tenure_months: params.tenure_months,
        prepayment_amount: amount,
        prepayment_month: month,
        strategy: PrepaymentStrategy::default(),
    }
}

#[test]
fn test_prepayment_reduces_tenure_and_interest() {
    let params = LoanParameters::new(dec!(1_000_000), dec!(8.5), 240);
    let out = prepayment::calculate_prepayment(&prepay(&params, dec!(200_000), 12))
        .unwrap()
        .result;

    assert_eq!(out.strategy, PrepaymentStrategy::ReduceTenure);
    assert_eq!(out.new_emi, out.original_emi);
    assert!(out.months_reduced > 0);
    assert!(out.interest_saved > dec!(100_000));
    assert_eq!(out.interest_saved, out.original_total_interest - out.new_total_interest);
    assert_eq!(out.schedule.len() as u32, out.new_tenure_months);
    assert_eq!(out.schedule.last().unwrap().remaining_principal, Decimal::ZERO);

    let repaid: Decimal = out.schedule.iter().map(|e| e.principal_payment).sum();
    assert_eq!(repaid + out.prepayment_applied, params.principal);
}

#[test]
fn test_prepayment_savings_never_negative() {
    for params in typical_loans() {
        let n = params.tenure_months;
        for month in [1, n / 2 + 1, n] {
            for amount in [dec!(0.01), dec!(1000), params.principal / dec!(3), params.principal] {
                let out = prepayment::calculate_prepayment(&prepay(&params, amount, month))
                    .unwrap()
                    .result;
                assert!(out.interest_saved >= Decimal::ZERO);
                assert!(out.new_tenure_months <= n);
                assert!(out.schedule.last().unwrap().remaining_principal.is_zero());
            }
        }
    }
}

#[test]
fn test_prepayment_savings_percentage() {
    let params = LoanParameters::new(dec!(250_000), dec!(13.99), 36);
    let out = prepayment::calculate_prepayment(&prepay(&params, dec!(50_000), 6))
        .unwrap()
        .result;
    let expected = (out.interest_saved / out.original_total_interest * dec!(100)).round_dp(2);
    assert_eq!(out.savings_percentage, expected);
}

#[test]
fn test_prepayment_strategy_deserialises_with_default() {
    let input: PrepaymentInput = serde_json::from_value(serde_json::json!({
        "principal": 500000,
        "annual_rate": 9.5,
        "tenure_months": 60,
        "prepayment_amount": 50000,
        "prepayment_month": 12
    }))
    .unwrap();
    assert_eq!(input.strategy, PrepaymentStrategy::ReduceTenure);
    assert_eq!(input.annual_rate, dec!(9.5));

    let input: PrepaymentInput = serde_json::from_value(serde_json::json!({
        "principal": 500000,
        "annual_rate": 9.5,
        "tenure_months": 60,
        "prepayment_amount": 50000,
        "prepayment_month": 12,
        "strategy": "reduce_emi"
    }))
    .unwrap();
    assert_eq!(input.strategy, PrepaymentStrategy::ReduceEmi);
}

// ===========================================================================
// Comparison tests
// ===========================================================================

#[test]
fn test_comparison_matches_emi_calculator() {
    let input = LoanComparisonInput {
        loans: vec![LoanOption {
            name: Some("Bank A".into()),
            principal: dec!(1_000_000),
            annual_rate: dec!(8.5),
            tenure_months: 240,
        }],
    };
    let compared = comparison::compare_loans(&input).unwrap().result;
    let direct = calculate_emi(&LoanParameters::new(dec!(1_000_000), dec!(8.5), 240))
        .unwrap()
        .result;
    let best = compared.best_emi.unwrap();
    assert_eq!(best.emi, direct.emi);
    assert_eq!(best.total_interest, direct.total_interest);
}

// ===========================================================================
// Numeric limit tests
// ===========================================================================

#[test]
fn test_oversized_terms_are_invalid_arguments() {
    let huge = LoanParameters::new(dec!(70_000_000_000_000_000_000_000_000_000), dec!(1), 1200);
    assert!(matches!(
        calculate_emi(&huge),
        Err(FinGenieError::InvalidArgument { ref field, .. }) if field == "principal"
    ));

    let steep = LoanParameters::new(dec!(1_000_000_000_000_000_000_000_000), dec!(100_000_000), 12);
    assert!(matches!(
        interest_only::calculate_interest_only(&steep),
        Err(FinGenieError::InvalidArgument { ref field, .. }) if field == "principal"
    ));
}

#[test]
fn test_oversized_loan_excluded_from_comparison() {
    let input = LoanComparisonInput {
        loans: vec![
            LoanOption {
                name: Some("Sane".into()),
                principal: dec!(500_000),
                annual_rate: dec!(9),
                tenure_months: 60,
            },
            LoanOption {
                name: Some("Absurd".into()),
                principal: dec!(70_000_000_000_000_000_000_000_000_000),
                annual_rate: dec!(1),
                tenure_months: 1200,
            },
        ],
    };
    let output = comparison::compare_loans(&input).unwrap();
    assert_eq!(output.result.comparison.len(), 1);
    assert!(output.warnings.iter().any(|w| w.starts_with("Absurd excluded")));
}

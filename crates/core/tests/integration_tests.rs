// ═══════════════════════════════════════════════════════════════════
// Integration Tests — PortfolioLedger facade, full command sessions
// ═══════════════════════════════════════════════════════════════════

use portfolio_ledger_core::errors::{ErrorKind, LedgerError};
use portfolio_ledger_core::models::asset::Asset;
use portfolio_ledger_core::{parse_month_label, Month, PortfolioLedger, CANNOT_REBALANCE};

/// The reference session the command layer would drive:
///
/// ```text
/// ALLOCATE 6000 3000 1000
/// SIP 2000 1000 500
/// CHANGE 4% 10% 2% JANUARY
/// CHANGE -10% 40% 0% FEBRUARY
/// CHANGE 12.50% 12.50% 12.50% MARCH
/// CHANGE 8% -3% 7% APRIL
/// CHANGE 13% 21% 10.50% MAY
/// CHANGE 10% 8% -5% JUNE
/// BALANCE MARCH
/// REBALANCE
/// ```
fn reference_session() -> PortfolioLedger {
    let mut ledger = PortfolioLedger::new();
    ledger.allocate(&[6000.0, 3000.0, 1000.0]).unwrap();
    ledger
        .set_contribution_schedule(&[2000.0, 1000.0, 500.0])
        .unwrap();
    for (rates, label) in [
        ([4.0, 10.0, 2.0], "JANUARY"),
        ([-10.0, 40.0, 0.0], "FEBRUARY"),
        ([12.5, 12.5, 12.5], "MARCH"),
        ([8.0, -3.0, 7.0], "APRIL"),
        ([13.0, 21.0, 10.5], "MAY"),
        ([10.0, 8.0, -5.0], "JUNE"),
    ] {
        let month = parse_month_label(label).unwrap();
        ledger.register_rate(&rates, month).unwrap();
    }
    ledger
}

mod reference_scenario {
    use super::*;

    #[test]
    fn balance_march() {
        let mut ledger = reference_session();
        assert_eq!(ledger.balance(Month::March).unwrap(), "10593 7897 2272");
    }

    #[test]
    fn rebalance_june() {
        let mut ledger = reference_session();
        assert_eq!(
            ledger.last_rebalanced_balance().unwrap(),
            "23619 11809 3936"
        );
    }

    #[test]
    fn every_month_resolves() {
        let mut ledger = reference_session();
        let expected = [
            (Month::January, "6240 3300 1020"),
            (Month::February, "7416 6020 1520"),
            (Month::March, "10593 7897 2272"),
            (Month::April, "13600 8630 2966"),
            (Month::May, "17628 11652 3829"),
            (Month::June, "23619 11809 3936"),
        ];
        for (month, line) in expected {
            assert_eq!(ledger.balance(month).unwrap(), line, "{}", month.name());
        }
    }

    #[test]
    fn computed_through_tracks_projection() {
        let mut ledger = reference_session();
        assert_eq!(ledger.computed_through(), None);
        ledger.balance(Month::January).unwrap();
        assert_eq!(ledger.computed_through(), Some(Month::June));
        assert_eq!(ledger.latest_rated_month(), Some(Month::June));
        assert_eq!(ledger.registered_rate_count(), 6);
    }
}

mod early_session {
    use super::*;

    #[test]
    fn rebalance_before_checkpoint_is_sentinel() {
        let mut ledger = PortfolioLedger::new();
        ledger.allocate(&[6000.0, 3000.0, 1000.0]).unwrap();
        ledger
            .register_rate(&[10.0, 10.0, 10.0], Month::January)
            .unwrap();
        assert_eq!(ledger.last_rebalanced_balance().unwrap(), CANNOT_REBALANCE);
    }

    #[test]
    fn error_kinds_map_to_command_categories() {
        let mut ledger = PortfolioLedger::new();
        ledger.allocate(&[1.0, 1.0, 1.0]).unwrap();

        let state = ledger.allocate(&[1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(state.kind(), ErrorKind::State);

        let format = ledger.register_rate(&[1.0], Month::January).unwrap_err();
        assert_eq!(format.kind(), ErrorKind::Format);
    }
}

mod asset_configuration {
    use super::*;

    #[test]
    fn default_supports_three_assets() {
        let ledger = PortfolioLedger::new();
        assert_eq!(ledger.supported_asset_count(), 3);
        assert_eq!(
            ledger.assets(),
            &[Asset::Equity, Asset::Debt, Asset::Gold]
        );
    }

    #[test]
    fn custom_order_drives_positional_io() {
        let mut ledger =
            PortfolioLedger::with_assets(vec![Asset::Gold, Asset::Equity]).unwrap();
        assert_eq!(ledger.supported_asset_count(), 2);
        ledger.allocate(&[100.0, 900.0]).unwrap();
        ledger.register_rate(&[10.0, 10.0], Month::January).unwrap();
        assert_eq!(ledger.balance(Month::January).unwrap(), "110 990");
    }

    #[test]
    fn duplicate_assets_rejected() {
        let err = PortfolioLedger::with_assets(vec![Asset::Gold, Asset::Gold]).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAssetOrder(_)));
    }

    #[test]
    fn empty_assets_rejected() {
        assert!(PortfolioLedger::with_assets(vec![]).is_err());
    }
}

mod month_labels {
    use super::*;

    #[test]
    fn parses_uppercase_labels() {
        assert_eq!(parse_month_label("JANUARY").unwrap(), Month::January);
        assert_eq!(parse_month_label("DECEMBER").unwrap(), Month::December);
    }

    #[test]
    fn parses_mixed_case() {
        assert_eq!(parse_month_label("June").unwrap(), Month::June);
        assert_eq!(parse_month_label("february").unwrap(), Month::February);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(parse_month_label("  MARCH  ").unwrap(), Month::March);
    }

    #[test]
    fn empty_label_is_missing_input() {
        let err = parse_month_label("   ").unwrap_err();
        assert!(matches!(err, LedgerError::MissingInput("month")));
        assert_eq!(err.kind(), ErrorKind::NullInput);
    }

    #[test]
    fn unknown_label_is_invalid_month() {
        let err = parse_month_label("SMARCH").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidMonth(_)));
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}

mod export {
    use super::*;

    #[test]
    fn summary_reflects_session_state() {
        let mut ledger = reference_session();
        ledger.balance(Month::June).unwrap();

        let summary = ledger.summary();
        assert_eq!(summary.assets, vec!["EQUITY", "DEBT", "GOLD"]);
        assert!(summary.allocated);
        assert!(summary.contribution_active);
        assert_eq!(summary.rated_months.len(), 6);
        assert_eq!(summary.balances.len(), 6);

        let june = summary
            .balances
            .iter()
            .find(|b| b.month == "June")
            .unwrap();
        assert_eq!(june.amounts, vec![23619, 11809, 3936]);
        assert_eq!(june.total, 23619 + 11809 + 3936);

        let equity_weight = summary
            .target_weights
            .iter()
            .find(|w| w.asset == "EQUITY")
            .unwrap();
        assert!((equity_weight.percent - 60.0).abs() < 1e-9);
    }

    #[test]
    fn summary_of_empty_ledger() {
        let ledger = PortfolioLedger::new();
        let summary = ledger.summary();
        assert!(!summary.allocated);
        assert!(summary.target_weights.is_empty());
        assert!(summary.balances.is_empty());
    }

    #[test]
    fn json_export_round_trips() {
        let mut ledger = reference_session();
        ledger.balance(Month::June).unwrap();

        let json = ledger.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["assets"][0], "EQUITY");
        assert_eq!(value["balances"][5]["month"], "June");
        assert_eq!(value["balances"][5]["amounts"][0], 23619);
    }

    #[test]
    fn debug_shows_progress_not_contents() {
        let mut ledger = reference_session();
        ledger.balance(Month::June).unwrap();
        let rendered = format!("{ledger:?}");
        assert!(rendered.contains("PortfolioLedger"));
        assert!(rendered.contains("computed_months"));
    }
}

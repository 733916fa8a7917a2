mod common;

use appdata_core::plan::BindValue;
use appdata_core::{normalize, AppData, Table};
use chrono::{TimeZone, Utc};
use common::{asset, package, scenario_snapshot, user};

#[test]
fn test_scenario_produces_one_row_per_table() {
    let plan = normalize(scenario_snapshot()).unwrap();

    for table in Table::INSERT_ORDER {
        assert_eq!(plan.rows(table).len(), 1, "table {}", table);
    }
}

#[test]
fn test_scenario_coerces_flags_and_codes() {
    let plan = normalize(scenario_snapshot()).unwrap();

    let user = &plan.rows(Table::UserData)[0];
    assert_eq!(user.get("canAdmin"), Some(&BindValue::Integer(1)));

    let package = &plan.rows(Table::Package)[0];
    assert_eq!(package.get("reqRar"), Some(&BindValue::Integer(1)));

    let review = &plan.rows(Table::Review)[0];
    assert_eq!(review.get("result"), Some(&BindValue::Integer(3)));
    assert_eq!(review.get("status"), Some(&BindValue::Integer(1)));
    assert_eq!(review.get("autoResult"), Some(&BindValue::Integer(0)));
    assert_eq!(
        review.get("ts"),
        Some(&BindValue::Timestamp(
            Utc.with_ymd_and_hms(2020, 6, 1, 12, 0, 0).unwrap()
        ))
    );
}

#[test]
fn test_review_row_has_no_id_and_no_history() {
    let plan = normalize(scenario_snapshot()).unwrap();
    let review = &plan.rows(Table::Review)[0];

    assert!(review.get("reviewId").is_none());
    assert!(review.get("history").is_none());
    assert_eq!(
        review.names().collect::<Vec<_>>(),
        vec![
            "assetId",
            "ruleId",
            "result",
            "resultComment",
            "action",
            "actionComment",
            "userId",
            "autoResult",
            "ts",
            "rejectText",
            "rejectUserId",
            "status"
        ]
    );
}

#[test]
fn test_history_is_stamped_with_parent_review_keys() {
    let plan = normalize(scenario_snapshot()).unwrap();
    let history = &plan.rows(Table::ReviewHistory)[0];

    assert_eq!(history.get("assetId"), Some(&BindValue::Integer(1000)));
    assert_eq!(history.get("ruleId").and_then(BindValue::as_str), Some("R1"));
    assert_eq!(
        history.get("activityType").and_then(BindValue::as_str),
        Some("create")
    );
    assert!(matches!(history.get("ts"), Some(BindValue::Timestamp(_))));
}

#[test]
fn test_asset_row_excludes_reviewer_list() {
    let plan = normalize(scenario_snapshot()).unwrap();
    let asset = &plan.rows(Table::Asset)[0];

    assert_eq!(
        asset.names().collect::<Vec<_>>(),
        vec!["assetId", "name", "ip", "deptId", "packageId", "nonnetwork"]
    );
}

#[test]
fn test_user_stig_asset_rows_carry_lookup_keys() {
    let plan = normalize(scenario_snapshot()).unwrap();
    let row = &plan.rows(Table::UserStigAssetMap)[0];

    assert_eq!(row.get("userId"), Some(&BindValue::Integer(100)));
    assert_eq!(row.get("benchmarkId").and_then(BindValue::as_str), Some("B1"));
    assert_eq!(row.get("assetId"), Some(&BindValue::Integer(1000)));
    assert!(row.get("saId").is_none());
}

#[test]
fn test_reviewer_fan_out() {
    let snapshot = AppData {
        packages: vec![package(1, false)],
        users: vec![user(1, false), user(2, false), user(3, false)],
        assets: vec![
            asset(10, &[("B1", &[]), ("B2", &[1, 2, 3])]),
            asset(11, &[("B1", &[2])]),
        ],
        ..AppData::default()
    };

    let plan = normalize(snapshot).unwrap();

    assert_eq!(plan.rows(Table::StigAssetMap).len(), 3);
    assert_eq!(plan.rows(Table::UserStigAssetMap).len(), 4);
}

#[test]
fn test_empty_snapshot_yields_complete_plan_with_empty_batches() {
    let plan = normalize(AppData::default()).unwrap();

    assert_eq!(plan.tables.len(), 8);
    assert!(plan.tables.iter().all(|t| t.rows.is_empty()));
    assert!(!plan.preload.is_empty());
    assert!(!plan.reseed.is_empty());
    assert!(!plan.restore.is_empty());
}

#[test]
fn test_invalid_history_timestamp_is_reported_with_context() {
    let mut snapshot = scenario_snapshot();
    snapshot.reviews[0].history[0].ts = "yesterday".to_string();

    let err = normalize(snapshot).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("yesterday"));
    assert!(text.contains("1000/R1"));
}

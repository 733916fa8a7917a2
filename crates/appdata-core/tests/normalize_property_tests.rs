mod common;

use appdata_core::model::{HistoryEntry, Review};
use appdata_core::plan::BindValue;
use appdata_core::{normalize, AppData, Table};
use common::{asset, package, user};
use proptest::prelude::*;

fn review(asset_id: i64, rule_id: &str, history: usize) -> Review {
    Review {
        review_id: None,
        asset_id,
        rule_id: rule_id.to_string(),
        result: "fail".to_string(),
        result_comment: None,
        action: Some("remediate".to_string()),
        action_comment: None,
        user_id: 1,
        auto_result: false,
        ts: "2022-01-01 00:00:00".to_string(),
        reject_text: None,
        reject_user_id: None,
        status: None,
        history: (0..history)
            .map(|i| HistoryEntry {
                activity_type: "update".to_string(),
                column_name: Some("resultId".to_string()),
                old_value: None,
                new_value: Some(i.to_string()),
                user_id: 1,
                ts: "2021-12-31 23:59:59.500".to_string(),
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn prop_reviewer_assignments_fan_out(reviewers in prop::collection::vec(
        prop::collection::vec(1i64..1000, 0..6), 0..6)
    ) {
        let assignments: Vec<(String, Vec<i64>)> = reviewers
            .iter()
            .enumerate()
            .map(|(i, users)| (format!("B{}", i), users.clone()))
            .collect();
        let borrowed: Vec<(&str, &[i64])> = assignments
            .iter()
            .map(|(b, u)| (b.as_str(), u.as_slice()))
            .collect();

        let snapshot = AppData {
            packages: vec![package(1, false)],
            assets: vec![asset(7, &borrowed)],
            ..AppData::default()
        };
        let plan = normalize(snapshot).unwrap();

        let expected_usam: usize = reviewers.iter().map(Vec::len).sum();
        prop_assert_eq!(plan.rows(Table::Asset).len(), 1);
        prop_assert_eq!(plan.rows(Table::StigAssetMap).len(), reviewers.len());
        prop_assert_eq!(plan.rows(Table::UserStigAssetMap).len(), expected_usam);
        for row in plan.rows(Table::UserStigAssetMap) {
            prop_assert_eq!(row.get("assetId"), Some(&BindValue::Integer(7)));
        }
    }

    #[test]
    fn prop_flags_become_zero_or_one(req_rar: bool, can_admin: bool) {
        let snapshot = AppData {
            packages: vec![package(1, req_rar)],
            users: vec![user(1, can_admin)],
            ..AppData::default()
        };
        let plan = normalize(snapshot).unwrap();

        prop_assert_eq!(
            plan.rows(Table::Package)[0].get("reqRar"),
            Some(&BindValue::Integer(req_rar as i64))
        );
        prop_assert_eq!(
            plan.rows(Table::UserData)[0].get("canAdmin"),
            Some(&BindValue::Integer(can_admin as i64))
        );
    }

    #[test]
    fn prop_history_rows_carry_parent_keys(history_sizes in prop::collection::vec(0usize..5, 0..8)) {
        let reviews: Vec<Review> = history_sizes
            .iter()
            .enumerate()
            .map(|(i, n)| review(i as i64 + 1, &format!("SV-{}", i), *n))
            .collect();
        let snapshot = AppData { reviews, ..AppData::default() };

        let plan = normalize(snapshot).unwrap();

        prop_assert_eq!(plan.rows(Table::Review).len(), history_sizes.len());
        prop_assert_eq!(
            plan.rows(Table::ReviewHistory).len(),
            history_sizes.iter().sum::<usize>()
        );

        let mut offset = 0;
        for (i, n) in history_sizes.iter().enumerate() {
            let rule = format!("SV-{}", i);
            for row in &plan.rows(Table::ReviewHistory)[offset..offset + n] {
                prop_assert_eq!(row.get("assetId"), Some(&BindValue::Integer(i as i64 + 1)));
                prop_assert_eq!(row.get("ruleId").and_then(BindValue::as_str), Some(rule.as_str()));
            }
            offset += n;
        }
    }
}

//! Snapshot normalization
//!
//! Walks the hierarchical snapshot once and produces flat per-table row
//! batches. Nested collections (reviewer assignments, review history) are
//! lifted into their own batches, each row carrying the foreign keys copied
//! down from its parent.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::codes::{ReviewAction, ReviewResult, ReviewStatus};
use crate::errors::SnapshotError;
use crate::model::{AppData, Asset, Department, HistoryEntry, Package, Review, User};
use crate::plan::{LoadPlan, Row, Table};

/// Transform a snapshot into a load plan
///
/// Pure: no I/O. Fails only on review codes without a numeric mapping and on
/// timestamps that cannot be parsed.
pub fn normalize(snapshot: AppData) -> Result<LoadPlan, SnapshotError> {
    let AppData {
        departments,
        packages,
        users,
        assets,
        reviews,
    } = snapshot;

    let department_rows: Vec<Row> = departments.into_iter().map(department_row).collect();
    let package_rows: Vec<Row> = packages.into_iter().map(package_row).collect();
    let user_rows: Vec<Row> = users.into_iter().map(user_row).collect();

    let mut asset_rows = Vec::with_capacity(assets.len());
    let mut stig_asset_rows = Vec::new();
    let mut user_stig_asset_rows = Vec::new();
    for asset in assets {
        flatten_asset(
            asset,
            &mut asset_rows,
            &mut stig_asset_rows,
            &mut user_stig_asset_rows,
        );
    }

    let mut review_rows = Vec::with_capacity(reviews.len());
    let mut history_rows = Vec::new();
    for review in reviews {
        flatten_review(review, &mut review_rows, &mut history_rows)?;
    }

    let mut plan = LoadPlan::empty();
    for (table, rows) in [
        (Table::Department, department_rows),
        (Table::Package, package_rows),
        (Table::UserData, user_rows),
        (Table::Asset, asset_rows),
        (Table::StigAssetMap, stig_asset_rows),
        (Table::UserStigAssetMap, user_stig_asset_rows),
        (Table::Review, review_rows),
        (Table::ReviewHistory, history_rows),
    ] {
        if let Some(unit) = plan.table_mut(table) {
            unit.rows = rows;
        }
    }

    tracing::debug!(row_counts = ?plan.row_counts(), "Normalized snapshot");

    Ok(plan)
}

/// Parse a snapshot timestamp
///
/// Accepts RFC 3339 and the store's own `YYYY-MM-DD HH:MM:SS[.fff]` form,
/// which is taken as UTC.
pub fn parse_timestamp(value: &str, context: &str) -> Result<DateTime<Utc>, SnapshotError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(SnapshotError::InvalidTimestamp {
        context: context.to_string(),
        value: value.to_string(),
    })
}

fn department_row(d: Department) -> Row {
    Row::new().bind("deptId", d.dept_id).bind("name", d.name)
}

fn package_row(p: Package) -> Row {
    Row::new()
        .bind("packageId", p.package_id)
        .bind("name", p.name)
        .bind("emassId", p.emass_id)
        .bind("reqRar", p.req_rar)
        .bind("pocName", p.poc_name)
        .bind("pocEmail", p.poc_email)
        .bind("pocPhone", p.poc_phone)
}

fn user_row(u: User) -> Row {
    Row::new()
        .bind("userId", u.user_id)
        .bind("username", u.username)
        .bind("display", u.display)
        .bind("deptId", u.dept_id)
        .bind("accessLevel", u.access_level)
        .bind("canAdmin", u.can_admin)
}

fn flatten_asset(
    asset: Asset,
    assets: &mut Vec<Row>,
    stig_assets: &mut Vec<Row>,
    user_stig_assets: &mut Vec<Row>,
) {
    let Asset {
        asset_id,
        name,
        ip,
        dept_id,
        package_id,
        nonnetwork,
        stig_reviewers,
    } = asset;

    assets.push(
        Row::new()
            .bind("assetId", asset_id)
            .bind("name", name)
            .bind("ip", ip)
            .bind("deptId", dept_id)
            .bind("packageId", package_id)
            .bind("nonnetwork", nonnetwork),
    );

    for assignment in stig_reviewers {
        for user_id in &assignment.user_ids {
            user_stig_assets.push(
                Row::new()
                    .bind("userId", *user_id)
                    .bind("benchmarkId", assignment.benchmark_id.as_str())
                    .bind("assetId", asset_id),
            );
        }
        stig_assets.push(
            Row::new()
                .bind("assetId", asset_id)
                .bind("benchmarkId", assignment.benchmark_id),
        );
    }
}

fn flatten_review(
    review: Review,
    reviews: &mut Vec<Row>,
    history: &mut Vec<Row>,
) -> Result<(), SnapshotError> {
    // the store assigns review ids
    let Review {
        review_id: _,
        asset_id,
        rule_id,
        result,
        result_comment,
        action,
        action_comment,
        user_id,
        auto_result,
        ts,
        reject_text,
        reject_user_id,
        status,
        history: entries,
    } = review;

    let result = ReviewResult::from_api(&result)
        .ok_or_else(|| SnapshotError::UnknownResult {
            asset_id,
            rule_id: rule_id.clone(),
            value: result.clone(),
        })?
        .code();

    let action = match action.as_deref().filter(|a| !a.is_empty()) {
        None => None,
        Some(name) => Some(
            ReviewAction::from_api(name)
                .ok_or_else(|| SnapshotError::UnknownAction {
                    asset_id,
                    rule_id: rule_id.clone(),
                    value: name.to_string(),
                })?
                .code(),
        ),
    };

    let status = match status.as_deref().filter(|s| !s.is_empty()) {
        None => ReviewStatus::default(),
        Some(name) => {
            ReviewStatus::from_api(name).ok_or_else(|| SnapshotError::UnknownStatus {
                asset_id,
                rule_id: rule_id.clone(),
                value: name.to_string(),
            })?
        }
    }
    .code();

    let context = format!("review {}/{}", asset_id, rule_id);
    let ts = parse_timestamp(&ts, &context)?;

    for entry in entries {
        history.push(history_row(entry, asset_id, &rule_id, &context)?);
    }

    reviews.push(
        Row::new()
            .bind("assetId", asset_id)
            .bind("ruleId", rule_id)
            .bind("result", result)
            .bind("resultComment", result_comment)
            .bind("action", action)
            .bind("actionComment", action_comment)
            .bind("userId", user_id)
            .bind("autoResult", auto_result)
            .bind("ts", ts)
            .bind("rejectText", reject_text)
            .bind("rejectUserId", reject_user_id)
            .bind("status", status),
    );

    Ok(())
}

fn history_row(
    entry: HistoryEntry,
    asset_id: i64,
    rule_id: &str,
    context: &str,
) -> Result<Row, SnapshotError> {
    let ts = parse_timestamp(&entry.ts, &format!("history of {}", context))?;
    Ok(Row::new()
        .bind("assetId", asset_id)
        .bind("ruleId", rule_id)
        .bind("activityType", entry.activity_type)
        .bind("columnName", entry.column_name)
        .bind("oldValue", entry.old_value)
        .bind("newValue", entry.new_value)
        .bind("userId", entry.user_id)
        .bind("ts", ts))
}

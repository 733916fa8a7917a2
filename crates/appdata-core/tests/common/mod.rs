use appdata_core::model::{Asset, Department, Package, StigReviewers, User};
use appdata_core::AppData;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// One row per entity: department 1, package 10, user 100, asset 1000 with
/// benchmark B1 assigned to user 100, review 1000/R1 with one history entry
#[allow(dead_code)]
pub fn scenario_snapshot() -> AppData {
    let json = std::fs::read_to_string(fixtures_dir().join("appdata_scenario.json")).unwrap();
    AppData::from_json(&json).unwrap()
}

#[allow(dead_code)]
pub fn department(id: i64) -> Department {
    Department {
        dept_id: id,
        name: format!("dept-{}", id),
    }
}

#[allow(dead_code)]
pub fn package(id: i64, req_rar: bool) -> Package {
    Package {
        package_id: id,
        name: format!("package-{}", id),
        emass_id: None,
        req_rar,
        poc_name: None,
        poc_email: None,
        poc_phone: None,
    }
}

#[allow(dead_code)]
pub fn user(id: i64, can_admin: bool) -> User {
    User {
        user_id: id,
        username: format!("user-{}", id),
        display: None,
        dept_id: None,
        access_level: 1,
        can_admin,
    }
}

/// Asset in package 1 with one assignment per `(benchmark, reviewers)` pair
#[allow(dead_code)]
pub fn asset(id: i64, assignments: &[(&str, &[i64])]) -> Asset {
    Asset {
        asset_id: id,
        name: format!("asset-{}", id),
        ip: None,
        dept_id: None,
        package_id: 1,
        nonnetwork: false,
        stig_reviewers: assignments
            .iter()
            .map(|(benchmark, users)| StigReviewers {
                benchmark_id: benchmark.to_string(),
                user_ids: users.to_vec(),
            })
            .collect(),
    }
}

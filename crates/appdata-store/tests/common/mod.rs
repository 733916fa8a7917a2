#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use appdata_core::errors::{ExError, ExErrorKind};
use appdata_core::{normalize, AppData, LoadPlan, Row};
use appdata_store::errors::Result;
use appdata_store::{LoadSession, SessionSource};
use rusqlite::Connection;

/// 1 department, 1 package, 1 user, 1 asset with one benchmark assignment,
/// 1 review with 1 history entry
pub const SCENARIO_JSON: &str = r#"{
    "departments": [{ "deptId": 1, "name": "IT" }],
    "packages": [{ "packageId": 10, "name": "Payroll", "reqRar": true }],
    "users": [{ "userId": 100, "username": "admin", "accessLevel": 3, "canAdmin": true }],
    "assets": [{
        "assetId": 1000, "name": "host-1", "deptId": 1, "packageId": 10,
        "nonnetwork": false,
        "stigReviewers": [{ "benchmarkId": "B1", "userIds": [100] }]
    }],
    "reviews": [{
        "reviewId": 555, "assetId": 1000, "ruleId": "R1", "result": "pass",
        "userId": 100, "autoResult": false, "ts": "2020-06-01T12:00:00.000Z",
        "status": "submitted",
        "history": [{
            "activityType": "create", "columnName": "resultId", "newValue": "3",
            "userId": 100, "ts": "2020-06-01T11:59:00.000Z"
        }]
    }]
}"#;

pub const TABLES: [&str; 8] = [
    "department",
    "package",
    "user_data",
    "asset",
    "stig_asset_map",
    "user_stig_asset_map",
    "review",
    "review_history",
];

pub fn scenario_snapshot() -> AppData {
    AppData::from_json(SCENARIO_JSON).unwrap()
}

pub fn scenario_plan() -> LoadPlan {
    normalize(scenario_snapshot()).unwrap()
}

pub fn setup_test_db() -> Connection {
    let mut conn = appdata_store::db::open_in_memory().unwrap();
    appdata_store::migrations::apply_migrations(&mut conn).unwrap();
    conn
}

pub fn count_rows(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })
    .unwrap()
}

// ========== Recording session ==========

/// One call made by the loader against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Acquire,
    Begin,
    Execute(String),
    ExecuteMany { sql: String, rows: usize },
    Commit,
    Rollback,
    Release,
}

/// Where the recording session should fail
#[derive(Debug, Clone, Default)]
pub struct Faults {
    pub acquire: bool,
    pub begin: bool,
    pub commit: bool,
    pub rollback: bool,
    /// Any statement containing one of these fails
    pub statements: Vec<String>,
}

impl Faults {
    pub fn statement(fragment: &str) -> Self {
        Self {
            statements: vec![fragment.to_string()],
            ..Self::default()
        }
    }

    fn matches(&self, sql: &str) -> bool {
        self.statements.iter().any(|f| sql.contains(f.as_str()))
    }
}

fn injected(what: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence).with_message(format!("injected failure: {}", what))
}

/// In-memory session that records every call and fails where told to
#[derive(Clone, Default)]
pub struct RecordingSource {
    calls: Rc<RefCell<Vec<Call>>>,
    faults: Faults,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(faults: Faults) -> Self {
        Self {
            calls: Rc::default(),
            faults,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Statements passed to `execute`, in order
    pub fn executed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Execute(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    /// Statements passed to `execute_many`, in order
    pub fn bulk_executed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::ExecuteMany { sql, .. } => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }
}

pub struct RecordingSession {
    calls: Rc<RefCell<Vec<Call>>>,
    faults: Faults,
}

impl RecordingSession {
    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl LoadSession for RecordingSession {
    fn begin(&mut self) -> Result<()> {
        self.record(Call::Begin);
        if self.faults.begin {
            return Err(injected("begin"));
        }
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> Result<usize> {
        self.record(Call::Execute(sql.to_string()));
        if self.faults.matches(sql) {
            return Err(injected(sql));
        }
        Ok(1)
    }

    fn execute_many(&mut self, sql: &str, rows: &[Row]) -> Result<usize> {
        self.record(Call::ExecuteMany {
            sql: sql.to_string(),
            rows: rows.len(),
        });
        if self.faults.matches(sql) {
            return Err(injected(sql));
        }
        Ok(rows.len())
    }

    fn commit(&mut self) -> Result<()> {
        self.record(Call::Commit);
        if self.faults.commit {
            return Err(injected("commit"));
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.record(Call::Rollback);
        if self.faults.rollback {
            return Err(injected("rollback"));
        }
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.record(Call::Release);
        Ok(())
    }
}

impl SessionSource for RecordingSource {
    type Session<'a> = RecordingSession;

    fn acquire(&mut self) -> Result<RecordingSession> {
        self.calls.borrow_mut().push(Call::Acquire);
        if self.faults.acquire {
            return Err(injected("acquire"));
        }
        Ok(RecordingSession {
            calls: self.calls.clone(),
            faults: self.faults.clone(),
        })
    }
}

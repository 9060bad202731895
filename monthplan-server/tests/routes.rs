use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, TimeZone, Utc};
use monthplan_core::local::PlanDir;
use monthplan_core::memory::{MemoryLedger, MemoryStore};
use monthplan_core::store::{Activity, Goal, GoalStatus};
use monthplan_core::{FixedClock, MonthToken, Planner, PlanningClock};
use monthplan_server::{app, state::AppState};
use serde_json::Value;
use tower::ServiceExt;

fn clock(today: &str) -> PlanningClock {
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d").unwrap();
    PlanningClock::new(Arc::new(FixedClock::on(today)), "UTC".parse().unwrap())
}

fn setup() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let planner = Planner::new(
        Arc::new(MemoryLedger::new()),
        store.clone(),
        store.clone(),
        store.clone(),
        clock("2026-02-10"),
    );
    (app(AppState::new(planner)), store)
}

fn goal(id: &str, status: GoalStatus) -> Goal {
    Goal {
        id: id.to_string(),
        title: format!("Goal {id}"),
        status,
        task_count: 0,
        completed_task_count: 0,
    }
}

fn month(s: &str) -> MonthToken {
    s.parse().unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

const ANA: &[(&str, &str)] = &[("x-user-id", "ana")];
const SAM: &[(&str, &str)] = &[
    ("x-user-id", "sam"),
    ("x-user-role", "supervisor"),
    ("x-org-scope", "sales"),
];
const ROOT: &[(&str, &str)] = &[("x-user-id", "root"), ("x-user-role", "admin")];

#[tokio::test]
async fn health_is_open() {
    let (app, _) = setup();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn open_month_rules() {
    let (app, _) = setup();

    let (status, body) = send(&app, "POST", "/users/ana/months/2026-01/open", ANA, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "not_future");

    let (status, body) = send(&app, "POST", "/users/ana/months/2026-03/open", ANA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "future-open");
    assert_eq!(body["created"], true);

    let (_, body) = send(&app, "POST", "/users/ana/months/2026-03/open", ANA, None).await;
    assert_eq!(body["created"], false);

    let (status, body) = send(&app, "POST", "/users/ana/months/2026-04/open", SAM, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[tokio::test]
async fn rejects_bad_tokens_and_missing_identity() {
    let (app, _) = setup();

    let (status, body) = send(&app, "GET", "/users/ana/months/2026-2", ANA, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_format");

    let (status, _) = send(&app, "GET", "/users/ana/weeks/2026-W54", ANA, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/users/ana/days/2026-02-30", ANA, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/users/ana/months/2026-02", &[], None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let wizard = &[("x-user-id", "ana"), ("x-user-role", "wizard")];
    let (status, _) = send(&app, "GET", "/users/ana/months/2026-02", wizard, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn confirm_flow_and_supervisor_visibility() {
    let (app, store) = setup();
    store.link_supervisor("sam", "ana", "sales").unwrap();

    let (status, body) = send(&app, "POST", "/users/ana/months/2026-02/confirm", ANA, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "no_goals");

    store
        .set_goals("ana", month("2026-02"), vec![goal("g1", GoalStatus::Draft)])
        .unwrap();
    let (status, body) = send(&app, "POST", "/users/ana/months/2026-02/confirm", ANA, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "incomplete_confirmation");

    let (status, _) = send(&app, "GET", "/users/ana/months/2026-02", SAM, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    store
        .set_goals("ana", month("2026-02"), vec![goal("g1", GoalStatus::Confirmed)])
        .unwrap();
    let (status, body) = send(&app, "POST", "/users/ana/months/2026-02/confirm", ANA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_planning_confirmed"], true);

    let (status, body) = send(&app, "GET", "/users/ana/months/2026-02", SAM, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "current");
    assert_eq!(body["weeks"][0]["days"].as_array().unwrap().len(), 7);

    let (status, body) = send(&app, "GET", "/users/ana/months/2026-02/status", SAM, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confirmed_goals"], 1);
}

#[tokio::test]
async fn unconfirm_and_score_need_admin() {
    let (app, store) = setup();
    store
        .set_goals("ana", month("2026-02"), vec![goal("g1", GoalStatus::Completed)])
        .unwrap();
    send(&app, "POST", "/users/ana/months/2026-02/confirm", ANA, None).await;

    let score = serde_json::json!({ "score": 72.5 });
    let uri = "/users/ana/months/2026-02/ai-score";
    let (status, _) = send(&app, "PUT", uri, ANA, Some(score.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let too_high = serde_json::json!({ "score": 140.0 });
    let (status, body) = send(&app, "PUT", uri, ROOT, Some(too_high)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_score");

    let (status, body) = send(&app, "PUT", uri, ROOT, Some(score)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ai_score"], 72.5);

    let unconfirm = "/users/ana/months/2026-02/unconfirm";
    let (status, _) = send(&app, "POST", unconfirm, ANA, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, "POST", unconfirm, ROOT, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_planning_confirmed"], false);
    assert_eq!(body["confirmed_at"], Value::Null);

    let (status, body) = send(&app, "POST", unconfirm, ROOT, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "not_confirmed");
}

#[tokio::test]
async fn week_and_day_views() {
    let (app, store) = setup();
    store
        .add_activity(
            "ana",
            Activity {
                id: "a1".into(),
                title: "Call".into(),
                at: Utc.with_ymd_and_hms(2026, 2, 11, 9, 0, 0).unwrap(),
                completed: true,
                task: None,
            },
        )
        .unwrap();

    let (status, body) = send(&app, "GET", "/users/ana/weeks/2026-W07", ANA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["days"].as_array().unwrap().len(), 7);
    assert_eq!(body["days"][2]["activities"][0]["id"], "a1");

    let (status, body) = send(&app, "GET", "/users/ana/days/2026-02-11", ANA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["activities"].as_array().unwrap().len(), 1);
    assert_eq!(body["is_today"], false);
}

#[tokio::test]
async fn file_backed_state_survives_restarts() {
    let tmp = tempfile::tempdir().unwrap();
    let build = || {
        let dir = PlanDir::new(tmp.path().to_path_buf());
        app(AppState::new(Planner::from_dir(dir, clock("2026-02-10"))))
    };

    let (status, _) = send(&build(), "POST", "/users/ana/months/2026-05/open", ANA, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&build(), "GET", "/users/ana/months/2026-05", ANA, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "future-open");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_opens_share_one_ledger_record() {
    let tmp = tempfile::tempdir().unwrap();
    let planner = Planner::from_dir(PlanDir::new(tmp.path().to_path_buf()), clock("2026-02-10"));
    let app = app(AppState::new(planner));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                send(&app, "POST", "/users/ana/months/2026-06/open", ANA, None).await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        if body["created"] == true {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

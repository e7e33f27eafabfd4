//! Performance benchmarks for the payroll engine.
//!
//! This benchmark suite covers the hot paths of month-end processing:
//! - Pay stub computation from prepared inputs
//! - Pay stub generation through the HTTP API
//! - Batch generation for 100 employees
//! - Scaling with the number of attendance sessions in the month
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{PayStubInput, compute_pay_stub};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{Employee, EntryType, YearMonth};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/default").expect("Failed to load config")
}

fn create_employee(id: u64) -> Employee {
    Employee {
        id,
        first_name: "Bench".to_string(),
        last_name: format!("Employee{:03}", id),
        employee_number: format!("EMP-{:03}", id),
        job_title: "Operator".to_string(),
        statutory_id: None,
        hire_date: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
        base_salary: Decimal::new(1_500_000 + id as i64 * 1_000, 0),
    }
}

/// Creates state for `employee_count` employees, each with `sessions`
/// ten-hour days in March 2025.
fn create_test_state(employee_count: u64, sessions: u32) -> AppState {
    let state = AppState::new(load_config(), (1..=employee_count).map(create_employee));
    let first_day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

    for employee_id in 1..=employee_count {
        for offset in 0..sessions {
            let start = (first_day + Duration::days(i64::from(offset)))
                .and_hms_opt(8, 0, 0)
                .unwrap();
            state
                .clock()
                .check_in(employee_id, EntryType::Badge, start, None, state.attendance_config())
                .unwrap();
            state
                .clock()
                .check_out(employee_id, start + Duration::hours(11), state.attendance_config())
                .unwrap();
        }
    }

    state
}

fn generate_request(employee_id: u64) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/paystubs/{}/2025-03", employee_id))
        .body(Body::empty())
        .unwrap()
}

/// Benchmark: Pure pay stub computation.
///
/// Target: < 50μs mean
fn bench_compute_pay_stub(c: &mut Criterion) {
    let config = load_config();
    let employee = create_employee(1);
    let month: YearMonth = "2025-03".parse().unwrap();

    c.bench_function("compute_pay_stub", |b| {
        b.iter(|| {
            let stub = compute_pay_stub(&PayStubInput {
                employee: black_box(&employee),
                month,
                overtime_hours: black_box(Decimal::new(42, 0)),
                bonus_total: Decimal::new(25_000, 0),
                catalog: config.rate_catalog(),
            })
            .unwrap();
            black_box(stub)
        })
    });
}

/// Benchmark: Single pay stub generation through the API.
///
/// Target: < 1ms mean
fn bench_generate_via_api(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state(1, 22);
    let router = create_router(state);

    c.bench_function("generate_via_api", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router.oneshot(generate_request(1)).await.unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Month-end batch for 100 employees.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state(100, 22);

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for employee_id in 1..=100 {
                let router = create_router(state.clone());
                let response = router.oneshot(generate_request(employee_id)).await.unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Generation cost by number of attendance sessions in the month.
fn bench_scaling(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("scaling");

    for sessions in [1u32, 5, 10, 22, 31].iter() {
        let router = create_router(create_test_state(1, *sessions));

        group.throughput(Throughput::Elements(u64::from(*sessions)));
        group.bench_with_input(BenchmarkId::new("sessions", sessions), sessions, |b, _| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router.oneshot(generate_request(1)).await.unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_pay_stub,
    bench_generate_via_api,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);

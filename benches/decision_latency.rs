use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use sems::access::AccessService;
use sems::audit::{AuditRecorder, FixedClock, MemoryAuditLog};
use sems::catalog::Catalog;
use sems::domain::{
    Classification, Department, EmploymentStatus, Resource, ResourceId, Role, Subject, SubjectId,
    TimeWindow,
};
use sems::rules::{
    AccessContext, AccessRule, ClearanceRule, DecisionEngine, RoleMembershipRule, TimeWindowRule,
};

fn create_subject(id: &str, role: Role, clearance: Classification) -> Subject {
    Subject {
        id: SubjectId::new(id),
        name: format!("Employee {}", id),
        role,
        department: Department::Finance,
        clearance,
        employment_status: EmploymentStatus::Permanent,
        contract_end_date: None,
        mfa_enabled: true,
        last_login: None,
    }
}

fn create_resource(id: &str, classification: Classification, roles: &[Role]) -> Resource {
    Resource {
        id: ResourceId::new(id),
        title: format!("Report {}", id),
        classification,
        owner_id: SubjectId::new("EMP-2045"),
        department: Department::Finance,
        allowed_roles: roles.to_vec(),
        allowed_time_range: Some(TimeWindow::new(8, 17)),
        shared_with: smallvec::smallvec![SubjectId::new("EMP-3091")],
        last_modified: NaiveDate::from_ymd_opt(2025, 11, 12).unwrap(),
        content: String::new(),
    }
}

fn business_hours() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 12, 24)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

fn bench_clearance_rule(c: &mut Criterion) {
    let rule = ClearanceRule::new();
    let subject = create_subject("EMP-5001", Role::SeniorEmployee, Classification::Internal);
    let resource = create_resource("DOC-7781", Classification::Confidential, &[]);
    let ctx = AccessContext::new(&subject, &resource, business_hours());

    c.bench_function("clearance_rule_evaluate_deny", |b| {
        b.iter(|| rule.evaluate(black_box(&ctx)))
    });
}

fn bench_time_window_rule(c: &mut Criterion) {
    let rule = TimeWindowRule::new();
    let subject = create_subject("EMP-1023", Role::PayrollOfficer, Classification::Confidential);
    let resource = create_resource("DOC-7781", Classification::Confidential, &[]);
    let ctx = AccessContext::new(&subject, &resource, business_hours());

    c.bench_function("time_window_rule_evaluate_inside", |b| {
        b.iter(|| rule.evaluate(black_box(&ctx)))
    });
}

fn bench_role_rule(c: &mut Criterion) {
    let rule = RoleMembershipRule::new();
    let subject = create_subject("EMP-5001", Role::SeniorEmployee, Classification::Confidential);
    let resource = create_resource("DOC-0001", Classification::Internal, &Role::ALL);
    let ctx = AccessContext::new(&subject, &resource, business_hours());

    c.bench_function("role_rule_evaluate_all_roles", |b| {
        b.iter(|| rule.evaluate(black_box(&ctx)))
    });
}

fn bench_full_chain(c: &mut Criterion) {
    let engine = DecisionEngine::default();
    let now = business_hours();

    let restricted = create_resource(
        "DOC-7781",
        Classification::Confidential,
        &[Role::HrDirector, Role::HrManager, Role::PayrollOfficer, Role::SystemAdmin],
    );

    let low_clearance = create_subject("EMP-5001", Role::SeniorEmployee, Classification::Internal);
    let payroll = create_subject("EMP-1023", Role::PayrollOfficer, Classification::Confidential);
    let outsider = create_subject("EMP-6001", Role::ItSupport, Classification::Confidential);
    let admin = create_subject("EMP-001", Role::SystemAdmin, Classification::Confidential);

    c.bench_function("full_chain_mac_deny", |b| {
        b.iter(|| engine.evaluate(black_box(&low_clearance), black_box(&restricted), now))
    });

    c.bench_function("full_chain_rbac_grant", |b| {
        b.iter(|| engine.evaluate(black_box(&payroll), black_box(&restricted), now))
    });

    c.bench_function("full_chain_default_deny", |b| {
        b.iter(|| engine.evaluate(black_box(&outsider), black_box(&restricted), now))
    });

    c.bench_function("full_chain_admin", |b| {
        b.iter(|| engine.evaluate(black_box(&admin), black_box(&restricted), now))
    });
}

fn bench_authorized_resources(c: &mut Criterion) {
    let engine = DecisionEngine::default();
    let subject = create_subject("EMP-1023", Role::PayrollOfficer, Classification::Internal);

    let levels = Classification::ALL;
    let resources: Vec<Resource> = (0..1000)
        .map(|i| {
            let roles: &[Role] = if i % 3 == 0 { &Role::ALL } else { &[Role::HrManager] };
            create_resource(&format!("DOC-{:04}", i), levels[i % levels.len()], roles)
        })
        .collect();

    c.bench_function("authorized_resources_1000", |b| {
        b.iter(|| {
            engine.authorized_resources(black_box(&subject), black_box(&resources), business_hours())
        })
    });
}

fn bench_open_document(c: &mut Criterion) {
    let catalog = Catalog::new(
        vec![create_subject("EMP-1023", Role::PayrollOfficer, Classification::Confidential)],
        vec![create_resource(
            "DOC-7781",
            Classification::Confidential,
            &[Role::PayrollOfficer],
        )],
    )
    .unwrap();

    let service = AccessService::new(
        catalog,
        DecisionEngine::default(),
        AuditRecorder::with_clock(FixedClock::utc(business_hours().and_utc())),
        Arc::new(MemoryAuditLog::new(1024)),
    );

    c.bench_function("open_document_with_audit", |b| {
        b.iter(|| {
            service.open_document(black_box("EMP-1023"), black_box("DOC-7781"), None)
        })
    });
}

criterion_group!(
    benches,
    bench_clearance_rule,
    bench_time_window_rule,
    bench_role_rule,
    bench_full_chain,
    bench_authorized_resources,
    bench_open_document,
);

criterion_main!(benches);

// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use grafana_compose::{
    DashboardLogs, LogsTarget, LogsVisualization, LokiTarget, Manager, contact_point,
    contact_points, parse_alerting, parse_logs_panel, policy, routing, tag_eq,
};

fn benchmark_manager_construction(c: &mut Criterion,)
{
    c.bench_function("manager_100_policies", |b| {
        b.iter(|| {
            let manager = Manager::new([
                contact_points((0..10).map(|i| contact_point(format!("team-{i}"),),),),
                routing((0..100).map(|i| {
                    policy(format!("team-{}", i % 10), tag_eq("service", format!("svc-{i}"),),)
                },),),
            ],)
            .expect("build failed",);
            black_box(manager.routes().len(),)
        },)
    },);
}

fn benchmark_marshal_json(c: &mut Criterion,)
{
    let manager = Manager::new([
        contact_points((0..10).map(|i| contact_point(format!("team-{i}"),),),),
        routing((0..100).map(|i| {
            policy(format!("team-{}", i % 10), tag_eq("service", format!("svc-{i}"),),)
        },),),
    ],)
    .expect("build failed",);

    c.bench_function("marshal_json", |b| {
        b.iter(|| black_box(&manager,).marshal_json().expect("marshal failed",),)
    },);
    c.bench_function("marshal_indent_json", |b| {
        b.iter(|| black_box(&manager,).marshal_indent_json().expect("marshal failed",),)
    },);
}

fn benchmark_logs_decoding(c: &mut Criterion,)
{
    let panel = DashboardLogs {
        title: "logs".to_owned(),
        targets: (0..20)
            .map(|i| LogsTarget {
                loki: Some(LokiTarget {
                    query:     format!("{{app=\"svc-{i}\"}}"),
                    legend:    String::new(),
                    reference: format!("R{i}"),
                    hidden:    false,
                },),
            },)
            .collect(),
        visualization: Some(LogsVisualization {
            order: "asc".to_owned(),
            deduplication: "signature".to_owned(),
            ..LogsVisualization::default()
        },),
        ..DashboardLogs::default()
    };

    c.bench_function("decode_logs_panel_20_targets", |b| {
        b.iter(|| black_box(&panel,).to_option().expect("decode failed",),)
    },);
}

fn benchmark_yaml_documents(c: &mut Criterion,)
{
    let alerting = r"
contact_points:
  - name: team-a
    email:
      to: [a@example.com]
  - name: team-b
routing:
  - to: team-a
    if_labels:
      - { label: owner, value: team-a }
  - to: team-b
    if_labels:
      - { label: service, op: '=~', value: 'api|web' }
";
    let panel = r#"
panel:
  title: API logs
  targets:
    - loki:
        query: '{app="api"}'
  visualization:
    order: desc
"#;

    c.bench_function("parse_alerting_document", |b| {
        b.iter(|| parse_alerting(black_box(alerting,),).expect("parse failed",),)
    },);
    c.bench_function("parse_logs_panel_document", |b| {
        b.iter(|| parse_logs_panel(black_box(panel,),).expect("parse failed",),)
    },);
}

criterion_group!(
    benches,
    benchmark_manager_construction,
    benchmark_marshal_json,
    benchmark_logs_decoding,
    benchmark_yaml_documents
);
criterion_main!(benches);

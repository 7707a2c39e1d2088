use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use couchguard_auth::{Role, SecurityGroup, SecurityObject, UserContext, authorize};
use couchguard_core::{Document, DocumentWrite};
use serde_json::json;

fn security_with(n: usize) -> SecurityObject {
    SecurityObject::with_admins(SecurityGroup::new(
        (0..n).map(|i| format!("admin-{i}")).collect(),
        (0..n).map(|i| Role::new(format!("admin-role-{i}"))).collect(),
    ))
}

fn user_with(n: usize) -> UserContext {
    UserContext::named("bob", (0..n).map(|i| Role::new(format!("role-{i}"))))
}

fn bench_authorize(c: &mut Criterion) {
    let new = Document::new(json!({"_id": "packet-1", "value": 42}));
    let old = Document::new(json!({"_id": "packet-1", "value": 41}));
    let create = DocumentWrite::create(&new);
    let update = DocumentWrite::update(&new, &old);

    let mut group = c.benchmark_group("authorize");

    group.bench_function("create", |b| {
        let user = user_with(4);
        let sec = security_with(16);
        b.iter(|| authorize(black_box(&create), black_box(&user), black_box(&sec)))
    });

    group.bench_function("update_admin_marker", |b| {
        let user = UserContext::named("alice", [Role::ADMIN]);
        let sec = SecurityObject::default();
        b.iter(|| authorize(black_box(&update), black_box(&user), black_box(&sec)))
    });

    // Worst case: every rule is checked and none matches.
    for size in [4usize, 64, 512] {
        group.bench_with_input(BenchmarkId::new("update_rejected", size), &size, |b, &size| {
            let user = user_with(size);
            let sec = security_with(size);
            b.iter(|| authorize(black_box(&update), black_box(&user), black_box(&sec)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_authorize);
criterion_main!(benches);

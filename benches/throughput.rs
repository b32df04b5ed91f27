use criterion::{criterion_group, criterion_main, Criterion};
use minirouter::dispatcher::{handler_fn, ParamSpec};
use minirouter::router::Router;
use std::hint::black_box;

fn zoo_router() -> Router {
    let mut router = Router::new("Zoo", true);
    router
        .get("/", handler_fn(&[], |_| Ok("root")))
        .expect("register /")
        .get("/zoo/animals", handler_fn(&[], |_| Ok("animals")))
        .expect("register /zoo/animals")
        .post("/zoo/animals", handler_fn(&[], |_| Ok("created")))
        .expect("register POST /zoo/animals")
        .get(
            "/zoo/animals/<id:int>",
            handler_fn(&[ParamSpec::int("id")], |p| p.int("id")),
        )
        .expect("register animal")
        .get(
            "/zoo/animals/<id:int>/toys/<toy_id:int>",
            handler_fn(&[ParamSpec::int("id"), ParamSpec::int("toy_id")], |p| {
                Ok(p.int("id")? + p.int("toy_id")?)
            }),
        )
        .expect("register toy")
        .get(
            "/zoo/<category>/animals/<id>/habitats/<habitat_id>/sections/<section_id>",
            handler_fn(
                &[
                    ParamSpec::str("category"),
                    ParamSpec::str("id"),
                    ParamSpec::str("habitat_id"),
                    ParamSpec::str("section_id"),
                ],
                |p| Ok(p.str("category")?.len()),
            ),
        )
        .expect("register habitat section")
        .post(
            "/inventory/<warehouse_id:int>/feeds/<feed_id:int>/items/<item_id:int>/batches/<batch_id:int>",
            handler_fn(
                &[
                    ParamSpec::int("warehouse_id"),
                    ParamSpec::int("feed_id"),
                    ParamSpec::int("item_id"),
                    ParamSpec::int("batch_id"),
                ],
                |p| p.int("batch_id"),
            ),
        )
        .expect("register batch");
    router
}

fn bench_route_throughput(c: &mut Criterion) {
    let router = zoo_router();
    let test_paths = [
        ("GET", "/zoo/animals/123"),
        ("GET", "/zoo/animals/123/toys/456"),
        ("GET", "/zoo/cats/animals/123/habitats/88/sections/5"),
        ("POST", "/inventory/1/feeds/2/items/3/batches/4"),
        ("GET", "/zoo/missing"),
    ];

    c.bench_function("route_match", |b| {
        b.iter(|| {
            for (method, path) in &test_paths {
                let res = router.route(method, path);
                black_box(&res);
            }
        })
    });

    c.bench_function("handle", |b| {
        b.iter(|| {
            for (method, path) in &test_paths {
                black_box(router.handle(method, path));
            }
        })
    });

    c.bench_function("handle_conversion_error", |b| {
        b.iter(|| black_box(router.handle("GET", "/zoo/animals/not-a-number")));
    });
}

criterion_group!(benches, bench_route_throughput);
criterion_main!(benches);

// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for geometric primitive queries

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use physics2d::geometry::{
    lines_intersection, segments_intersection, Line, LineSegment, Matrix, Point, Stadium, Vector,
};

fn bench_vector_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector");
    let v = Vector::new(3.0, 4.0);

    group.bench_function("normalize", |b| b.iter(|| black_box(v).normalize()));
    group.bench_function("rotate", |b| b.iter(|| black_box(v).rotate(black_box(0.3))));
    group.bench_function("matrix_inverse", |b| {
        let m = Matrix::new(2.0, 1.0, -1.0, 3.0);
        b.iter(|| black_box(m).inverse())
    });

    group.finish();
}

fn bench_intersections(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersection");
    let l1 = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
    let l2 = Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0)).unwrap();
    let s1 = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
    let s2 = LineSegment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0)).unwrap();

    group.bench_function("lines", |b| {
        b.iter(|| lines_intersection(black_box(&l1), black_box(&l2)))
    });
    group.bench_function("segments", |b| {
        b.iter(|| segments_intersection(black_box(&s1), black_box(&s2)))
    });

    group.finish();
}

fn bench_stadium(c: &mut Criterion) {
    let mut group = c.benchmark_group("stadium");
    let stadium = Stadium::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 10.0).unwrap();
    let inside = Point::new(50.0, 5.0);
    let cap = Point::new(-5.0, 3.0);

    group.bench_function("closest_circle", |b| {
        b.iter(|| stadium.closest_circle(black_box(inside)))
    });
    group.bench_function("contains_end_cap", |b| {
        b.iter(|| stadium.contains(black_box(cap)))
    });

    group.finish();
}

criterion_group!(benches, bench_vector_ops, bench_intersections, bench_stadium);
criterion_main!(benches);

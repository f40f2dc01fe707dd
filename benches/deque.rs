use criterion::{black_box, criterion_group, criterion_main, Criterion};
use segmented_collections::SegmentedDeque;
use std::collections::VecDeque;

fn bench_deque(c: &mut Criterion) {
    let n = 1024;
    {
        let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (PushBack 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    d.push_back(black_box(i as i32));
                }
                d
            })
        });

        group.bench_function("SegmentedDeque cap=32", |b| {
            b.iter(|| {
                let mut d: SegmentedDeque<i32> = SegmentedDeque::new(32).unwrap();
                for i in 0..n {
                    d.append_in_place(black_box(i as i32));
                }
                d
            })
        });

        group.bench_function("SegmentedDeque cap=32 reserved", |b| {
            b.iter(|| {
                let mut d: SegmentedDeque<i32> = SegmentedDeque::new(32).unwrap();
                d.reserve(n);
                for i in 0..n {
                    d.append_in_place(black_box(i as i32));
                }
                d
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (Get 1024)");
        let mut d_std = VecDeque::new();
        let mut d_seg: SegmentedDeque<i32> = SegmentedDeque::new(32).unwrap();
        for i in 0..n {
            d_std.push_back(i as i32);
            d_seg.append_in_place(i as i32);
        }

        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..n {
                    sum += d_std.get(black_box(i)).copied().unwrap_or(0);
                }
                sum
            })
        });

        group.bench_function("SegmentedDeque cap=32", |b| {
            b.iter(|| {
                let mut sum = 0;
                for i in 0..n {
                    sum += d_seg.get(black_box(i)).copied().unwrap_or(0);
                }
                sum
            })
        });
        group.finish();
    }

    {
        let mut group = c.benchmark_group("VecDeque vs SegmentedDeque (Mixed ends 1024)");
        group.bench_function("std::collections::VecDeque", |b| {
            b.iter(|| {
                let mut d = VecDeque::new();
                for i in 0..n {
                    if i % 2 == 0 {
                        d.push_back(black_box(i as i32));
                    } else {
                        d.push_front(black_box(i as i32));
                    }
                }
                while d.pop_front().is_some() {}
                d
            })
        });

        group.bench_function("SegmentedDeque cap=32", |b| {
            b.iter(|| {
                let mut d: SegmentedDeque<i32> = SegmentedDeque::new(32).unwrap();
                for i in 0..n {
                    if i % 2 == 0 {
                        d.append_in_place(black_box(i as i32));
                    } else {
                        d.prepend_in_place(black_box(i as i32));
                    }
                }
                while d.pop_front().is_ok() {}
                d
            })
        });
        group.finish();
    }
}

criterion_group!(benches, bench_deque);
criterion_main!(benches);

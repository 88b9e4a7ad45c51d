use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use lab_test_tools::patterns;

use task_lab::mandel::{self, View};
use task_lab::multisort::{self, SortParams};
use task_lab::solver;

fn bench_multisort(c: &mut Criterion) {
    let params = SortParams::default();

    for size_pow in [16u32, 20] {
        let size = 1usize << size_pow;
        let input = patterns::recurrence_with_seed(size, 603);

        c.bench_function(&format!("multisort-par-2^{size_pow}"), |b| {
            b.iter_batched_ref(
                || (input.clone(), vec![0i32; size]),
                |(data, tmp)| multisort::sort(data, tmp, &params).unwrap(),
                BatchSize::LargeInput,
            )
        });

        c.bench_function(&format!("multisort-seq-2^{size_pow}"), |b| {
            b.iter_batched_ref(
                || (input.clone(), vec![0i32; size]),
                |(data, tmp)| multisort::sort_seq(data, tmp, &params).unwrap(),
                BatchSize::LargeInput,
            )
        });

        c.bench_function(&format!("sort-std-2^{size_pow}"), |b| {
            b.iter_batched_ref(
                || input.clone(),
                |data| data.sort(),
                BatchSize::LargeInput,
            )
        });
    }
}

fn bench_solver(c: &mut Criterion) {
    let size = 256usize;
    let mut u = vec![0.0f64; size * size];
    for j in 0..size {
        u[j] = 100.0;
    }

    c.bench_function("solver-sweep-256", |b| {
        b.iter_batched_ref(
            || vec![0.0f64; size * size],
            |u_new| solver::solve(black_box(&u), u_new, size, size).unwrap(),
            BatchSize::LargeInput,
        )
    });
}

fn bench_mandel(c: &mut Criterion) {
    let view = View {
        width: 256,
        height: 256,
        ..View::default()
    };

    c.bench_function("mandel-par-256", |b| {
        b.iter(|| mandel::render(black_box(&view), 256))
    });

    c.bench_function("mandel-seq-256", |b| {
        b.iter(|| mandel::render_seq(black_box(&view), 256))
    });
}

criterion_group!(benches, bench_multisort, bench_solver, bench_mandel);
criterion_main!(benches);

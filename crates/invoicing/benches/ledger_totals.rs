use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use billdesk_invoicing::{Ledger, LineField};

/// Ledger with `n` priced, discounted rows.
fn filled_ledger(n: usize) -> Ledger {
    let mut ledger = Ledger::from_parts(Vec::new(), 0.0, String::new(), String::new());
    for i in 0..n {
        ledger.add_item();
        let qty = (i % 17 + 1).to_string();
        let price = format!("{}.{:02}", i % 500, i % 100);
        let discount = (i % 30).to_string();
        ledger.update_field(i, LineField::Quantity, &qty);
        ledger.update_field(i, LineField::UnitPrice, &price);
        ledger.update_field(i, LineField::DiscountPercent, &discount);
        ledger.update_field(i, LineField::Weight, "1.25");
    }
    ledger.set_bill_discount("150");
    ledger
}

fn bench_compute_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_totals");
    for size in [10usize, 100, 1_000, 10_000] {
        let ledger = filled_ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter(|| black_box(ledger.compute_totals()));
        });
    }
    group.finish();
}

fn bench_remove_and_renumber(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_first_item");
    for size in [100usize, 1_000, 10_000] {
        let ledger = filled_ledger(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &ledger, |b, ledger| {
            b.iter_batched(
                || ledger.clone(),
                |mut l| {
                    l.remove_item(0);
                    black_box(l)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_totals, bench_remove_and_renumber);
criterion_main!(benches);

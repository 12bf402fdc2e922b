// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kickoff_bnb::{bnb::BnbSolver, monitor::no_op::NoOperationMonitor};
use kickoff_model::{
    catalog::Catalog,
    combo::{AttributeValue, ComboDefinition},
    inventory::Inventory,
    model::{Model, ModelBuilder},
    objective::{CategoryLimit, ObjectiveMode},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const SEED: u64 = 0x6b69_636b_6f66_66;

/// Builds a catalog shaped like a real combo table: `num_cards` distinct
/// cards, three-slot combos, roughly one in five restricted.
fn generate(num_combos: usize, num_cards: usize, mode: ObjectiveMode) -> Model {
    let mut rng = StdRng::seed_from_u64(SEED ^ (num_combos as u64));
    let cards: Vec<String> = (0..num_cards).map(|i| format!("Card {}", i)).collect();

    let catalog: Catalog = (0..num_combos)
        .map(|i| {
            let category = if rng.random_bool(0.2) { "GK" } else { "FW" };
            let mut combo = ComboDefinition::new(format!("Combo {}", i), category);
            for slot in 0..3 {
                let card = &cards[rng.random_range(0..cards.len())];
                combo = combo.with_slot(slot, card.clone());
            }
            combo
                .with_skill("Kicking", AttributeValue::Integer(rng.random_range(0..=3)))
                .with_skill("Speed", AttributeValue::Integer(rng.random_range(0..=3)))
        })
        .collect();

    let inventory: Inventory = cards
        .iter()
        .map(|c| (c.as_str(), rng.random_range(0..=4u32)))
        .collect();

    ModelBuilder::new(&catalog, &inventory)
        .objective(mode)
        .category_limit(CategoryLimit::AtMost(2))
        .build()
}

fn bench_generated_instances(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_benchmark");
    group.sample_size(20);

    for &(num_combos, num_cards) in &[(10, 8), (20, 12), (40, 16)] {
        for mode in [ObjectiveMode::Cards, ObjectiveMode::Skills] {
            let model = generate(num_combos, num_cards, mode);
            let label = format!("{}x{}-{}", num_combos, num_cards, mode);

            group.throughput(Throughput::Elements(model.num_entries() as u64));
            group.bench_with_input(BenchmarkId::new("solve", &label), &model, |b, model| {
                let mut solver = BnbSolver::new();
                b.iter(|| {
                    let outcome = solver.solve(black_box(model), NoOperationMonitor::new());
                    black_box(outcome.score())
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_generated_instances);
criterion_main!(benches);

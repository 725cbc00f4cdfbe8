#[path = "../tests/mock.rs"]
mod mock;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mock::{account, backend, contract, transaction_hash, MockVm, ROUTER_CODE};
use primitive_types::{H160, U256};
use smartstate::backend::MemoryVicinity;
use smartstate::executor::State;
use smartstate::gasometer::Config;
use smartstate::{ExternalCallMessage, MethodCall};

fn nested_calls(c: &mut Criterion) {
	let vm = MockVm::standard();
	let vicinity = MemoryVicinity::default();
	let alice = H160::from_low_u64_be(1);
	let router = H160::from_low_u64_be(0xa0);

	let mut group = c.benchmark_group("nested_calls");
	for depth in [4usize, 32, 256] {
		let config = Config {
			call_stack_limit: depth,
			..Config::standard()
		};

		group.bench_function(BenchmarkId::new("deep", depth), |b| {
			b.iter(|| {
				let world = backend(
					&vicinity,
					vec![
						(alice, account(1_000)),
						(router, contract(0, ROUTER_CODE, "Router")),
					],
				);
				let mut state = State::new(&config, &vm, world, transaction_hash(), u64::MAX);
				let result = state.apply(ExternalCallMessage {
					to: router,
					from: alice,
					amount: U256::zero(),
					gas_limit: u64::MAX / 2,
					method: MethodCall::new("deep", vec![]),
				});
				black_box(result)
			})
		});
	}
	group.finish();
}

criterion_group!(benches, nested_calls);
criterion_main!(benches);

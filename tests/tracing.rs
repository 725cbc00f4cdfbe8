#![cfg(feature = "tracing")]

mod mock;

use mock::{account, backend, contract, transaction_hash, MockVm, ROUTER_CODE};
use primitive_types::{H160, U256};
use smartstate::backend::MemoryVicinity;
use smartstate::executor::State;
use smartstate::gasometer::Config;
use smartstate::tracing::{using, Event, EventListener};
use smartstate::{ExternalCallMessage, MethodCall, Value};

#[derive(Default)]
struct Recorder {
	events: Vec<String>,
}

impl EventListener for Recorder {
	fn event(&mut self, event: Event) {
		let name = match event {
			Event::Apply { depth, .. } => format!("apply@{}", depth),
			Event::Commit { .. } => "commit".into(),
			Event::Rollback { .. } => "rollback".into(),
			Event::Transfer { transfer } => format!("transfer:{}", transfer.value),
		};
		self.events.push(name);
	}
}

#[test]
fn events_follow_nesting() {
	let config = Config::standard();
	let vm = MockVm::standard();
	let vicinity = MemoryVicinity::default();
	let alice = H160::from_low_u64_be(1);
	let router = H160::from_low_u64_be(0xa0);
	let carol = H160::from_low_u64_be(3);
	let world = backend(
		&vicinity,
		vec![
			(alice, account(1_000)),
			(router, contract(100, ROUTER_CODE, "Router")),
		],
	);
	let mut state = State::new(&config, &vm, world, transaction_hash(), 1_000_000);

	let mut recorder = Recorder::default();
	let result = using(&mut recorder, || {
		state.apply(ExternalCallMessage {
			to: router,
			from: alice,
			amount: U256::zero(),
			gas_limit: 100_000,
			method: MethodCall::new(
				"pay",
				vec![Value::Address(carol), Value::U256(U256::from(7))],
			),
		})
	})
	.unwrap();

	assert!(result.is_succeed());
	assert_eq!(
		recorder.events,
		vec!["apply@0", "apply@1", "transfer:7", "commit"]
	);
}

use crate::backend::{AccountChange, Backend};
use crate::ExitFatal;
use alloc::{collections::BTreeMap, string::String, vec::Vec};
use primitive_types::{H160, U256};

/// Index of a layer in a [`LayeredState`] arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LayerId(usize);

impl LayerId {
	pub fn index(&self) -> usize {
		self.0
	}
}

#[derive(Clone, Debug, Default)]
struct LayerAccount {
	/// Created in this layer, shadowing the backend and every ancestor.
	created: bool,
	code: Option<Vec<u8>>,
	contract_type: Option<String>,
}

#[derive(Clone, Debug, Default)]
struct Layer {
	parent: Option<LayerId>,
	accounts: BTreeMap<H160, LayerAccount>,
	storages: BTreeMap<(H160, Vec<u8>), Vec<u8>>,
}

/// Copy-on-write layers over a backend. Layers form a strict stack: only
/// the top layer may be committed, and dropping the layers above a retained
/// id is the only way to discard writes.
pub struct LayeredState<B> {
	backend: B,
	layers: Vec<Layer>,
}

impl<B: Backend> LayeredState<B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend,
			layers: alloc::vec![Layer::default()],
		}
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Layer holding everything committed by this transaction so far.
	pub fn root(&self) -> LayerId {
		LayerId(0)
	}

	/// Most recently opened live layer.
	pub fn top(&self) -> LayerId {
		LayerId(self.layers.len() - 1)
	}

	/// Number of layers open above the root.
	pub fn depth(&self) -> usize {
		self.layers.len() - 1
	}

	pub fn is_live(&self, layer: LayerId) -> bool {
		layer.0 < self.layers.len()
	}

	/// Open a child of `parent`, which must be the top layer.
	pub fn start_tracking(&mut self, parent: LayerId) -> Result<LayerId, ExitFatal> {
		if parent != self.top() {
			return Err(ExitFatal::LayerOutOfOrder(parent.0));
		}

		self.layers.push(Layer {
			parent: Some(parent),
			..Default::default()
		});

		Ok(self.top())
	}

	/// Merge the writes of `child`, which must be the top layer, into its
	/// parent. The child id becomes invalid and the parent id is returned.
	pub fn commit(&mut self, child: LayerId) -> Result<LayerId, ExitFatal> {
		if child != self.top() {
			return Err(ExitFatal::LayerOutOfOrder(child.0));
		}

		let mut exited = match self.layers.pop() {
			Some(layer) => layer,
			None => return Err(ExitFatal::LayerOutOfOrder(child.0)),
		};
		let parent = match exited.parent {
			Some(parent) => parent,
			None => {
				self.layers.push(exited);
				return Err(ExitFatal::LayerOutOfOrder(child.0));
			}
		};

		let entering = &mut self.layers[parent.0];
		for (address, account) in core::mem::take(&mut exited.accounts) {
			if account.created {
				entering.storages.retain(|(a, _), _| *a != address);
				entering.accounts.insert(address, account);
				continue;
			}

			let merged = entering.accounts.entry(address).or_default();
			if account.code.is_some() {
				merged.code = account.code;
			}
			if account.contract_type.is_some() {
				merged.contract_type = account.contract_type;
			}
		}
		entering.storages.append(&mut exited.storages);

		Ok(parent)
	}

	/// Drop every layer above `keep` without touching it or its ancestors.
	pub fn abandon(&mut self, keep: LayerId) {
		self.layers.truncate(keep.0 + 1);
	}

	/// Entries for address from `layer` down to the root, nearest first.
	fn known_accounts(&self, layer: LayerId, address: H160) -> impl Iterator<Item = &LayerAccount> + '_ {
		core::iter::successors(Some(&self.layers[layer.0]), move |layer| {
			layer.parent.map(|parent| &self.layers[parent.0])
		})
		.filter_map(move |layer| layer.accounts.get(&address))
	}

	fn account_mut(&mut self, layer: LayerId, address: H160) -> Result<&mut LayerAccount, ExitFatal> {
		if layer != self.top() {
			return Err(ExitFatal::LayerOutOfOrder(layer.0));
		}

		Ok(self.layers[layer.0].accounts.entry(address).or_default())
	}

	/// Create an empty account. Storage the backend holds for the address is
	/// shadowed from this layer on.
	pub fn create_account(&mut self, layer: LayerId, address: H160) -> Result<(), ExitFatal> {
		if layer != self.top() {
			return Err(ExitFatal::LayerOutOfOrder(layer.0));
		}

		let entering = &mut self.layers[layer.0];
		entering.storages.retain(|(a, _), _| *a != address);
		entering.accounts.insert(
			address,
			LayerAccount {
				created: true,
				code: None,
				contract_type: None,
			},
		);

		Ok(())
	}

	pub fn set_code(&mut self, layer: LayerId, address: H160, code: Vec<u8>) -> Result<(), ExitFatal> {
		self.account_mut(layer, address)?.code = Some(code);
		Ok(())
	}

	pub fn set_contract_type(
		&mut self,
		layer: LayerId,
		address: H160,
		contract_type: String,
	) -> Result<(), ExitFatal> {
		self.account_mut(layer, address)?.contract_type = Some(contract_type);
		Ok(())
	}

	pub fn set_storage(
		&mut self,
		layer: LayerId,
		address: H160,
		key: Vec<u8>,
		value: Vec<u8>,
	) -> Result<(), ExitFatal> {
		if layer != self.top() {
			return Err(ExitFatal::LayerOutOfOrder(layer.0));
		}

		self.layers[layer.0].storages.insert((address, key), value);
		Ok(())
	}

	pub fn code(&self, layer: LayerId, address: H160) -> Option<Vec<u8>> {
		for account in self.known_accounts(layer, address) {
			if let Some(code) = &account.code {
				return Some(code.clone());
			}
			if account.created {
				return None;
			}
		}

		self.backend.code(address)
	}

	pub fn contract_type(&self, layer: LayerId, address: H160) -> Option<String> {
		for account in self.known_accounts(layer, address) {
			if let Some(contract_type) = &account.contract_type {
				return Some(contract_type.clone());
			}
			if account.created {
				return None;
			}
		}

		self.backend.contract_type(address)
	}

	pub fn storage(&self, layer: LayerId, address: H160, key: &[u8]) -> Option<Vec<u8>> {
		let mut current = Some(layer);
		while let Some(id) = current {
			let layer = &self.layers[id.0];
			if let Some(value) = layer.storages.get(&(address, key.to_vec())) {
				return if value.is_empty() {
					None
				} else {
					Some(value.clone())
				};
			}
			if let Some(LayerAccount { created: true, .. }) = layer.accounts.get(&address) {
				return None;
			}
			current = layer.parent;
		}

		self.backend.storage(address, key)
	}

	pub fn exists(&self, layer: LayerId, address: H160) -> bool {
		self.known_accounts(layer, address)
			.any(|account| account.created || account.code.is_some())
			|| self.backend.exists(address)
	}

	/// Committed balance. Layers never hold balances; in-flight value moves
	/// live in the transfer list.
	pub fn balance(&self, address: H160) -> U256 {
		self.backend.balance(address)
	}

	/// Flatten the root layer into per-account changes. Every layer above the
	/// root must have been committed or abandoned.
	pub fn deconstruct(mut self) -> Result<(B, BTreeMap<H160, AccountChange>), ExitFatal> {
		if self.depth() != 0 {
			return Err(ExitFatal::LayerOutOfOrder(self.top().0));
		}

		let root = self.layers.swap_remove(0);
		let mut changes = BTreeMap::<H160, AccountChange>::new();

		for (address, account) in root.accounts {
			changes.insert(
				address,
				AccountChange {
					created: account.created,
					code: account.code,
					contract_type: account.contract_type,
					storage: BTreeMap::new(),
				},
			);
		}

		for ((address, key), value) in root.storages {
			changes
				.entry(address)
				.or_default()
				.storage
				.insert(key, value);
		}

		Ok((self.backend, changes))
	}
}

//! Testing utilities for corecfg workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use corecfg_core::{OptionSet, Options, OptionsConfig, Record};
use corecfg_schema::{HostAddr, Schema, ValueCodec};
use corecfg_store::{MemoryStore, Mutation, Op, Version};
use std::sync::Arc;

pub const TRUSTED_HOST: &str = "trusted_host";
pub const TRUSTED_HOST_PATH: &str = "/core/config/trusted_host";

pub fn standard_schema() -> Arc<Schema> {
    Arc::new(Schema::standard())
}

/// Raw CLI-style arguments
pub fn raw(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| (*s).to_string()).collect()
}

/// Record as the host codec encodes it
pub fn host_record(input: &str) -> Record {
    let schema = Schema::standard();
    let descriptor = schema.lookup(TRUSTED_HOST).unwrap();
    Record::new(descriptor.encode(&raw(&[input])).unwrap())
}

/// Option set holding one host record per input, in order
pub fn host_set(inputs: &[&str]) -> OptionSet {
    inputs.iter().map(|input| host_record(input)).collect()
}

/// Store with `trusted_host` seeded to `hosts`
pub fn seeded_store(hosts: &[&str]) -> (Arc<MemoryStore>, Version) {
    let store = Arc::new(MemoryStore::new());
    let version = store.seed(TRUSTED_HOST_PATH, host_set(hosts).to_bytes().unwrap());
    (store, version)
}

pub fn options_with(store: Arc<MemoryStore>) -> Options {
    Options::new(store, standard_schema(), &OptionsConfig::default()).unwrap()
}

/// The single mutation of an append op, decoded
pub fn written_set(op: &Op) -> OptionSet {
    match op.mutations() {
        [Mutation::Set { value, .. }] => OptionSet::from_bytes(value).unwrap(),
        other => panic!("expected one set mutation, got {other:?}"),
    }
}

/// Hosts held by an option set, as displayed
pub fn hosts_in(set: &OptionSet) -> Vec<String> {
    set.iter()
        .map(|record| HostAddr::decode(record.as_bytes()).unwrap().to_string())
        .collect()
}

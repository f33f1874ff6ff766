//! Property tests for the append pipeline over the in-memory store.

use corecfg_core::{Context, Options};
use corecfg_store::{Condition, MemoryStore, VersionedStore};
use corecfg_test_utils::{host_set, hosts_in, options_with, raw, written_set, TRUSTED_HOST_PATH};
use proptest::prelude::*;
use std::sync::Arc;

fn host() -> impl Strategy<Value = String> {
    ("[a-z]{1,8}(\\.[a-z]{2,4})?", prop::option::of(1u16..)).prop_map(|(name, port)| match port {
        Some(port) => format!("{name}:{port}"),
        None => name,
    })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn add_is_strict_append(existing in prop::collection::vec(host(), 0..6), new in host()) {
        let existing: Vec<&str> = existing.iter().map(String::as_str).collect();
        let store = Arc::new(MemoryStore::new());
        let seeded = (!existing.is_empty())
            .then(|| store.seed(TRUSTED_HOST_PATH, host_set(&existing).to_bytes().unwrap()));
        let options = options_with(store.clone());

        let op = runtime()
            .block_on(options.add(&Context::background(), "trusted_host", &raw(&[new.as_str()])))
            .unwrap();

        let mut expected = existing.clone();
        expected.push(new.as_str());
        prop_assert_eq!(written_set(&op), host_set(&expected));

        let observed = seeded.unwrap_or_default();
        prop_assert_eq!(
            op.conditions(),
            &[Condition::NotModified { path: TRUSTED_HOST_PATH.to_string(), version: observed }]
        );
    }

    #[test]
    fn committed_values_list_in_order(hosts in prop::collection::vec(host(), 1..6)) {
        let store = Arc::new(MemoryStore::new());
        let options: Options = options_with(store.clone());
        let ctx = Context::background();

        let listed = runtime().block_on(async {
            for host in &hosts {
                let op = options.add(&ctx, "trusted_host", &raw(&[host.as_str()])).await.unwrap();
                store.exec(op).await.unwrap();
            }
            options.values(&ctx, "trusted_host").await.unwrap()
        });

        let listed: Vec<String> = listed.iter().map(ToString::to_string).collect();
        prop_assert_eq!(listed, hosts);
    }

    #[test]
    fn stored_set_survives_append(existing in prop::collection::vec(host(), 1..6), new in host()) {
        let existing: Vec<&str> = existing.iter().map(String::as_str).collect();
        let store = Arc::new(MemoryStore::new());
        store.seed(TRUSTED_HOST_PATH, host_set(&existing).to_bytes().unwrap());
        let options = options_with(store);

        let op = runtime()
            .block_on(options.add(&Context::background(), "trusted_host", &raw(&[new.as_str()])))
            .unwrap();

        let hosts = hosts_in(&written_set(&op));
        prop_assert_eq!(&hosts[..existing.len()], existing.as_slice());
    }
}

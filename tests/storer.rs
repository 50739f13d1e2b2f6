use puppy_store::{ErrorCode, MapStore, Puppy, PuppyStorer, SledStore, SyncStore};

// 每个 backend 都跑同一组测试
// create / read / update / delete
// 以及 invalid input / not found

fn first_puppy() -> Puppy {
    Puppy::new("Retriever", "Golden", 9999.99)
}

fn modified_puppy() -> Puppy {
    Puppy::new("Bitsa", "Mixed", 1.99)
}

fn another_puppy() -> Puppy {
    Puppy::new("Labrador", "Black", 0.0)
}

fn invalid_puppy() -> Puppy {
    Puppy::new("Poodle", "White", -23.67)
}

fn with_id(mut puppy: Puppy, id: u32) -> Puppy {
    puppy.id = id;
    puppy
}

// store with `first_puppy` already stored under id 1
fn setup<S: PuppyStorer>(store: S) -> S {
    assert_eq!(store.create(first_puppy()).unwrap(), 1);
    store
}

macro_rules! storer_tests {
    ($name:ident, $new_store:expr) => {
        mod $name {
            use super::*;

            fn new_store() -> impl PuppyStorer {
                setup($new_store)
            }

            #[test]
            fn create_then_read() {
                let store = new_store();
                let id = store.create(first_puppy()).unwrap();
                assert_eq!(id, 2);
                assert_eq!(store.read(id).unwrap(), with_id(first_puppy(), id));
            }

            #[test]
            fn create_zero_value() {
                let store = new_store();
                let id = store.create(another_puppy()).unwrap();
                assert_eq!(store.read(id).unwrap(), with_id(another_puppy(), id));
            }

            #[test]
            fn create_ignores_caller_id() {
                let store = new_store();
                let id = store.create(with_id(another_puppy(), 77)).unwrap();
                assert_eq!(id, 2);
                assert_eq!(store.read(2).unwrap().id, 2);
                assert_eq!(store.read(77).unwrap_err().code(), ErrorCode::NotFound);
            }

            #[test]
            fn create_invalid_input() {
                let store = new_store();
                let err = store.create(invalid_puppy()).unwrap_err();
                assert_eq!(err.code(), ErrorCode::InvalidInput);
                assert_eq!(store.read(1).unwrap(), with_id(first_puppy(), 1));
            }

            #[test]
            fn create_rejects_nan() {
                let store = new_store();
                let err = store.create(Puppy::new("Pug", "Fawn", f64::NAN)).unwrap_err();
                assert_eq!(err.code(), ErrorCode::InvalidInput);
            }

            #[test]
            fn ids_increase_and_are_not_reused() {
                let store = new_store();
                let second = store.create(another_puppy()).unwrap();
                store.delete(second).unwrap();
                let third = store.create(another_puppy()).unwrap();
                assert_eq!(second, 2);
                assert_eq!(third, 3);
                assert_eq!(store.read(second).unwrap_err().code(), ErrorCode::NotFound);
            }

            #[test]
            fn read() {
                let store = new_store();
                assert_eq!(store.read(1).unwrap(), with_id(first_puppy(), 1));
            }

            #[test]
            fn read_not_found() {
                let store = new_store();
                let err = store.read(99).unwrap_err();
                assert_eq!(err.code(), ErrorCode::NotFound);
                assert_eq!(err.message(), "Read failed, no puppy found with id 99");
            }

            #[test]
            fn update() {
                let store = new_store();
                store.update(1, with_id(modified_puppy(), 1)).unwrap();
                assert_eq!(store.read(1).unwrap(), with_id(modified_puppy(), 1));
            }

            #[test]
            fn update_forces_id_to_key() {
                let store = new_store();
                store.update(1, with_id(modified_puppy(), 42)).unwrap();
                assert_eq!(store.read(1).unwrap(), with_id(modified_puppy(), 1));
                assert_eq!(store.read(42).unwrap_err().code(), ErrorCode::NotFound);
            }

            #[test]
            fn update_zero_value() {
                let store = new_store();
                store.update(1, another_puppy()).unwrap();
                assert_eq!(store.read(1).unwrap().value, 0.0);
            }

            #[test]
            fn update_not_found() {
                let store = new_store();
                let err = store.update(99, another_puppy()).unwrap_err();
                assert_eq!(err.code(), ErrorCode::NotFound);
                assert_eq!(err.message(), "Update failed, no puppy found with id 99");
            }

            #[test]
            fn update_invalid_input_keeps_record() {
                let store = new_store();
                let err = store.update(1, invalid_puppy()).unwrap_err();
                assert_eq!(err.code(), ErrorCode::InvalidInput);
                assert_eq!(
                    err.message(),
                    "Update failed for puppy with id 1, value must not be < 0"
                );
                assert_eq!(store.read(1).unwrap(), with_id(first_puppy(), 1));
            }

            #[test]
            fn update_only_touches_target() {
                let store = new_store();
                let other = store.create(another_puppy()).unwrap();
                store.update(1, modified_puppy()).unwrap();
                assert_eq!(store.read(other).unwrap(), with_id(another_puppy(), other));
            }

            #[test]
            fn delete_existing() {
                let store = new_store();
                store.delete(1).unwrap();
                assert_eq!(store.read(1).unwrap_err().code(), ErrorCode::NotFound);
            }

            #[test]
            fn delete_not_found() {
                let store = new_store();
                let err = store.delete(99).unwrap_err();
                assert_eq!(err.code(), ErrorCode::NotFound);
                assert_eq!(err.message(), "Delete failed, no puppy found with id 99");
            }

            #[test]
            fn delete_twice() {
                let store = new_store();
                store.delete(1).unwrap();
                assert_eq!(store.delete(1).unwrap_err().code(), ErrorCode::NotFound);
                assert_eq!(store.update(1, another_puppy()).unwrap_err().code(), ErrorCode::NotFound);
            }

            #[test]
            fn works_as_trait_object() {
                let store: Box<dyn PuppyStorer> = Box::new(new_store());
                assert_eq!(store.create(another_puppy()).unwrap(), 2);
            }
        }
    };
}

storer_tests!(map_store, MapStore::new());
storer_tests!(sync_store, SyncStore::new());
storer_tests!(sled_store, SledStore::temporary());

#[test]
fn scenario_on_every_backend() {
    let stores: Vec<Box<dyn PuppyStorer>> = vec![
        Box::new(MapStore::new()),
        Box::new(SyncStore::new()),
        Box::new(SledStore::temporary()),
    ];
    for store in stores {
        let id = store.create(first_puppy()).unwrap();
        assert_eq!(id, 1);
        assert_eq!(
            store.read(1).unwrap(),
            Puppy {
                id: 1,
                breed: "Retriever".to_owned(),
                colour: "Golden".to_owned(),
                value: 9999.99,
            }
        );
        let err = store.create(invalid_puppy()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        let err = store.update(99, another_puppy()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}

#[test]
fn in_memory_create_failure_does_not_consume_id() {
    let map = MapStore::new();
    assert!(map.create(invalid_puppy()).is_err());
    assert_eq!(map.create(first_puppy()).unwrap(), 1);

    let sync = SyncStore::new();
    assert!(sync.create(invalid_puppy()).is_err());
    assert_eq!(sync.create(first_puppy()).unwrap(), 1);
}

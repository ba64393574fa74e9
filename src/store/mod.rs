pub mod mapping_store;

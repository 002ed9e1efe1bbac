pub mod dev_backend;

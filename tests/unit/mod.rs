//! Unit test modules.

mod resolver_test;
mod transport_kind_test;

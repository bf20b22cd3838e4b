//! Unit and service tests for the account module.

mod domain_tests;

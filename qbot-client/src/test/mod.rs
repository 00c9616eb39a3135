//! Unit test module
//!
//! Dispatcher and API client tests live here, separate from source files.
//! HTTP is substituted by the scripted [`mock::MockTransport`].

mod api_test;

mod helpers;
mod service_tests;

mod helpers;

mod auth_tests;

mod helpers;

mod checkout_test;
mod http_test;
mod reporting_test;

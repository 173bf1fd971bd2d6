pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod contact;
pub mod directory;
pub mod orders;
pub mod reporting;

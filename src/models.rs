pub mod contact;
pub mod address;

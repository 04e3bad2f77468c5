pub mod header;
pub mod percentage_bar;

pub mod click;
pub mod compare;
pub mod listing;
pub mod offers;
pub mod product;
pub mod types;

#[cfg(test)]
pub mod fixtures;

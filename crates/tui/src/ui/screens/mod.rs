pub mod expenses;
pub mod form;

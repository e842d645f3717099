pub mod money;
pub mod toast;

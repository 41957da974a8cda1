pub mod mint_form;

pub use mint_form::MintForm;

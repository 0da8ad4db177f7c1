pub mod emit;
pub mod inspect;
pub mod lookup;
pub mod scan;
pub mod settings;
pub mod validate;

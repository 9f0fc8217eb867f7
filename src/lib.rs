#![deny(rust_2018_idioms)]

mod binding;
mod field;
mod presentation;
mod validate;

pub use binding::Binding;
pub use field::{ContentKind, FieldConfig, FieldStyle, MaterialTextField};
pub use validate::{EmailValidator, PatternValidator, RequiredValidator, Validator, evaluate};

pub mod prelude {
    pub use super::{
        Binding, ContentKind, EmailValidator, FieldStyle, MaterialTextField, PatternValidator,
        RequiredValidator, Validator,
    };
}

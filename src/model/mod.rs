mod fields;
mod validation;

pub use fields::{FieldName, FormFields};
pub use validation::{FieldError, ValidationErrors, validate};

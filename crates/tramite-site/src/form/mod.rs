//! Quote form: field validation and the submit lifecycle

pub mod controller;
pub mod field;
pub mod submission;

pub use controller::FormController;
pub use field::{Field, Validity};
pub use submission::{SubmissionState, ERROR_LABEL, LOADING_LABEL, SUCCESS_LABEL};

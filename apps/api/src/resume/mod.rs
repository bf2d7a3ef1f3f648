// Resume model workflows: placeholder data, editor operations, validation,
// and persistence of saved resumes through the backend tables.

pub mod defaults;
pub mod editor;
pub mod handlers;
pub mod persistence;
pub mod validation;

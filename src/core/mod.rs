//! Analysis request dispatch and response rendering.

pub mod dispatcher;
pub mod report;

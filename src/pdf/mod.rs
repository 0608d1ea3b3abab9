mod convert;

pub use convert::html_to_pdf;

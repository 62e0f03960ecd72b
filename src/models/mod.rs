pub mod context;
pub mod document;
pub mod focus_area;
pub mod opportunity;
pub mod proposal;

pub mod html;
pub mod identity;
pub mod relative_time;

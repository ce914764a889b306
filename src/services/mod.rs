pub mod feed;
pub mod handlers;
pub mod page;
pub mod response;
pub mod widget;

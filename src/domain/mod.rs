pub mod device;
pub mod message;
pub mod notification;
pub mod packet;
pub mod response;

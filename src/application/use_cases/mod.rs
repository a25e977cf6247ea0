pub mod approval;
pub mod store_access;
pub mod trial;
pub mod waitlist;

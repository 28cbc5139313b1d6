//! Domain models

pub mod booking;
pub mod closure;
pub mod court;
pub mod enums;
pub mod notification;
pub mod product;
pub mod report;
pub mod schedule;
pub mod token;
pub mod user;

//! Business logic services

pub mod calendar;
pub mod suggestion;

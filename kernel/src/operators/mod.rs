//! Actions, action generation and the transition function.

pub mod action;
pub mod apply;
pub mod generate;

// Control endpoint handlers and routes

pub mod control;

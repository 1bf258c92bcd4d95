pub mod banner;
pub mod commands;
pub mod console;
pub mod consts;
pub mod gateway;
pub mod interrupt;

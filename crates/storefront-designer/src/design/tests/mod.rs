mod common;
mod render;
mod session;
